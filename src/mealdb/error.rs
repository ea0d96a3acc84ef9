use reqwest::StatusCode;

/// Failure of a single upstream call. "Zero results" is not an error here:
/// the upstream reports it as a null list inside a 200 body, and the client
/// maps that to an empty vec.
#[derive(Debug, thiserror::Error)]
pub enum MealDbError {
    #[error("upstream returned HTTP {0}")]
    Status(StatusCode),
    #[error("upstream request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("upstream body is not valid JSON: {0}")]
    Decode(#[from] serde_json::Error),
}
