use crate::compare_config::{AggregationPolicy, CompareConfig, OutputMode, Thresholds};
use crate::ConfigError;

/// Load comparison configuration for the given output mode, applying
/// environment-variable overrides.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env
/// vars.
///
/// # Errors
///
/// Returns `ConfigError` if an override value is unparseable or the
/// resulting thresholds fail validation.
pub fn load_compare_config(output: OutputMode) -> Result<CompareConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_compare_config_from_env(output)
}

/// Load comparison configuration from environment variables already in the
/// process.
///
/// Unlike [`load_compare_config`], this does NOT load `.env` files — useful
/// for testing or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if an override value is unparseable or the
/// resulting thresholds fail validation.
pub fn load_compare_config_from_env(output: OutputMode) -> Result<CompareConfig, ConfigError> {
    build_compare_config(output, |key| std::env::var(key))
}

/// Build comparison configuration using the provided env-var lookup
/// function.
///
/// This is the core parsing/validation logic, decoupled from the actual
/// environment so it can be tested with a pure `HashMap` lookup.
fn build_compare_config<F>(output: OutputMode, lookup: F) -> Result<CompareConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let defaults = Thresholds::default();

    let parse_f64 = |var: &str, default: f64| -> Result<f64, ConfigError> {
        match lookup(var) {
            Ok(raw) => raw.parse::<f64>().map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            }),
            Err(_) => Ok(default),
        }
    };

    let thresholds = Thresholds {
        matched: parse_f64("PRICECROSS_MATCHED_THRESHOLD", defaults.matched)?,
        weak: parse_f64("PRICECROSS_WEAK_THRESHOLD", defaults.weak)?,
        minimum: parse_f64("PRICECROSS_MIN_THRESHOLD", defaults.minimum)?,
    };
    thresholds.validate()?;

    let default_aggregation = match output {
        OutputMode::Long => AggregationPolicy::Max,
        OutputMode::Short => AggregationPolicy::Mean,
    };
    let aggregation = match lookup("PRICECROSS_AGGREGATION") {
        Ok(raw) => parse_aggregation(&raw)?,
        Err(_) => default_aggregation,
    };

    Ok(CompareConfig {
        thresholds,
        aggregation,
        output,
    })
}

fn parse_aggregation(raw: &str) -> Result<AggregationPolicy, ConfigError> {
    match raw.trim().to_lowercase().as_str() {
        "max" => Ok(AggregationPolicy::Max),
        "mean" => Ok(AggregationPolicy::Mean),
        other => Err(ConfigError::InvalidEnvVar {
            var: "PRICECROSS_AGGREGATION".to_string(),
            reason: format!("expected 'max' or 'mean', got '{other}'"),
        }),
    }
}
