use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("HTTP error: {0}")]
    HttpError(String),

    #[error("JSON parsing error: {0}")]
    JsonError(String),

    #[error("Catalog error: {0}")]
    CatalogError(String),

    #[error("Missing corpus chunk: {0}")]
    MissingChunk(String),

    #[error("Output error: {0}")]
    OutputError(String),
}
