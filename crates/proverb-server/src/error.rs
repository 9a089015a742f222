use thiserror::Error;

/// Failures while talking to the generation backend. None of these reach
/// the browser; the route handler swaps in a fallback quote.
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Generation API returned status {0}: {1}")]
    Status(u16, String),

    #[error("Unexpected response shape")]
    UnexpectedShape,
}
