use thiserror::Error;

/// The only errors the presentation layer ever sees.
///
/// Upstream failures (network, auth, rate limits, bad replies, missing
/// credentials) are logged where they happen and collapse into
/// [`SuggestionError::GenerationFailed`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SuggestionError {
    #[error("Failed to generate names")]
    GenerationFailed,

    #[error("No names were generated")]
    NoNamesGenerated,
}

impl SuggestionError {
    /// Notice shown to the user, whatever went wrong.
    pub fn notice(&self) -> &'static str {
        "Sorry, we couldn't generate names at this time. Please try again later."
    }
}
