use thiserror::Error;

/// Request-level failures surfaced through the API failure envelope.
///
/// The display strings are the envelope `message` values, so the
/// provider/aggregation variants carry the underlying text unchanged.
#[derive(Debug, Error)]
pub enum SupplyError {
    #[error("alchemyApi not provided")]
    MissingCredential,

    #[error("{0}")]
    Provider(String),

    #[error("{0}")]
    Aggregation(String),
}
