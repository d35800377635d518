use thiserror::Error;

use crate::encoding::Encoding;

/// Text used when the native library fails without leaving a message.
pub(crate) const UNKNOWN_NATIVE_ERROR: &str = "unknown native dialog error";

/// Errors that can occur when showing a file dialog.
///
/// Dismissing the dialog is not an error: the operations return `None` or an
/// empty list instead.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DialogError {
    /// The native library reported a failure. Carries the library's message verbatim.
    #[error("{0}")]
    Native(String),

    /// Text could not cross the boundary in the given encoding.
    #[error("text cannot be represented as {encoding}: {reason}")]
    Encoding {
        /// Encoding the text was being converted to or from.
        encoding: Encoding,
        /// What was wrong with it.
        reason: String,
    },

    /// More filters than the native filter count type can hold.
    #[error("too many filters: {0}")]
    TooManyFilters(usize),

    /// The native library reported success without writing the named result.
    #[error("native dialog reported success but returned no {0}")]
    MissingResult(&'static str),

    /// The native library returned a result code outside of error/okay/cancel.
    #[error("unexpected native result code {0}")]
    UnexpectedResult(i32),
}

impl DialogError {
    pub(crate) fn encoding(encoding: Encoding, reason: impl Into<String>) -> Self {
        Self::Encoding {
            encoding,
            reason: reason.into(),
        }
    }
}
