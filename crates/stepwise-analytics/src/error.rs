/// Errors a step searcher can report instead of a step.
///
/// "Nothing found" is not an error; searchers return `Ok(None)` for it.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error, derive_more::IsVariant)]
pub enum SearcherError {
    /// The searcher does not implement this case yet.
    #[display("searcher is not implemented")]
    NotImplemented,
    /// The searcher cannot handle this kind of puzzle.
    #[display("searcher does not support this puzzle")]
    NotSupported,
    /// The searcher observed a cancellation request.
    #[display("searcher was cancelled")]
    Cancelled,
    /// The searcher failed for another reason, including a panic.
    #[display("searcher failed: {message}")]
    Failed {
        /// Description of the failure.
        message: String,
    },
}

impl SearcherError {
    /// Creates a [`SearcherError::Failed`] with the given message.
    #[must_use]
    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed {
            message: message.into(),
        }
    }
}

/// A cancellation raised by a searcher that did not come from the analyzer's
/// own cancellation token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("analysis was cancelled")]
pub struct Cancelled;
