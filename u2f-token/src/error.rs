use u2f_types::{FrameError, RequestError, ResponseError};

use crate::Operation;

/// Errors produced by [`Token`](crate::Token) operations.
///
/// `E` is the error type of the [`Transport`](crate::Transport), which is passed through untouched.
#[derive(Debug, thiserror::Error)]
pub enum TokenError<E> {
    /// The request was rejected before anything was sent to the token.
    #[error("invalid request: {0}")]
    InvalidRequest(#[from] RequestError),
    /// The transport failed to complete the round trip.
    #[error("transport error: {0}")]
    Transport(#[source] E),
    /// The reply could not be framed, or the request could not be encoded.
    #[error("framing error: {0}")]
    Frame(#[from] FrameError),
    /// The user must provide proof of presence to the token, after which the identical request
    /// can be sent again.
    #[error("user presence required")]
    PresenceRequired,
    /// The key handle is unknown to the token or was issued for another application.
    #[error("unknown key handle")]
    UnknownKeyHandle,
    /// The token answered with a status the operation does not expect.
    #[error("unexpected status {status:#06x} during {operation}")]
    UnexpectedStatus {
        /// The operation that was attempted
        operation: Operation,
        /// The raw status word
        status: u16,
    },
    /// The token reported success but the reply data could not be decoded.
    #[error("malformed {operation} response: {source}")]
    MalformedResponse {
        /// The operation that was attempted
        operation: Operation,
        /// What was wrong with the data
        source: ResponseError,
    },
    /// User presence was still required after the retry policy ran out.
    #[error("user presence was not provided after {attempts} attempts")]
    PresenceTimeout {
        /// Number of times the operation was sent
        attempts: u32,
    },
}

impl<E> TokenError<E> {
    /// Whether sending the same request again after a presence gesture may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, TokenError::PresenceRequired)
    }
}
