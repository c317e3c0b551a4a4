use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("retailer {retailer} table is missing required columns: {missing:?}")]
    MissingColumns {
        retailer: String,
        missing: Vec<String>,
    },

    #[error("sink rejected table '{table}': {source}")]
    Sink {
        table: String,
        #[source]
        source: crate::sink::SinkError,
    },
}
