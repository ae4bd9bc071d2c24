//! Errors raised while building requests and decoding replies.

use std::fmt;

/// A request was rejected before it could be encoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestError {
    /// The challenge parameter must be exactly [`CHALLENGE_LEN`](crate::CHALLENGE_LEN) bytes.
    ChallengeLength(usize),
    /// The application parameter must be exactly [`APPLICATION_LEN`](crate::APPLICATION_LEN) bytes.
    ApplicationLength(usize),
    /// The key handle is longer than [`MAX_KEY_HANDLE_LEN`](crate::MAX_KEY_HANDLE_LEN) bytes.
    KeyHandleTooLong(usize),
}

impl fmt::Display for RequestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestError::ChallengeLength(len) => {
                write!(f, "challenge must be exactly 32 bytes, got {len}")
            }
            RequestError::ApplicationLength(len) => {
                write!(f, "application must be exactly 32 bytes, got {len}")
            }
            RequestError::KeyHandleTooLong(len) => {
                write!(f, "key handle is too long, got {len} bytes")
            }
        }
    }
}

impl std::error::Error for RequestError {}

/// A frame could not be encoded or decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrameError {
    /// The payload does not fit in the 3 byte length field.
    PayloadTooLong(usize),
    /// A reply must at least contain its 2 byte status word.
    ResponseTooShort(usize),
    /// A request must at least contain its 7 byte header.
    RequestTooShort(usize),
    /// The class byte of a request must be zero.
    InvalidClass(u8),
    /// The instruction byte of a request is not a known [`Command`](crate::Command).
    UnknownCommand(u8),
    /// The length field of a request disagrees with the payload that follows it.
    LengthMismatch {
        /// Length announced in the header
        declared: usize,
        /// Number of payload bytes present
        actual: usize,
    },
}

impl fmt::Display for FrameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FrameError::PayloadTooLong(len) => write!(f, "payload of {len} bytes is too long"),
            FrameError::ResponseTooShort(len) => {
                write!(f, "response is too short, got {len} bytes")
            }
            FrameError::RequestTooShort(len) => write!(f, "request is too short, got {len} bytes"),
            FrameError::InvalidClass(cla) => write!(f, "unsupported class byte {cla:#04x}"),
            FrameError::UnknownCommand(ins) => write!(f, "unknown command {ins:#04x}"),
            FrameError::LengthMismatch { declared, actual } => write!(
                f,
                "request declares {declared} payload bytes but carries {actual}"
            ),
        }
    }
}

impl std::error::Error for FrameError {}

/// A reply carried a success status but its data could not be decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponseError {
    /// The data ended before a required field.
    TooShort {
        /// Minimum number of bytes needed at this point
        expected: usize,
        /// Number of bytes available
        actual: usize,
    },
    /// The leading reserved byte of a registration response must be `0x05`.
    InvalidReservedByte(u8),
    /// The user public key is not an uncompressed P-256 point.
    InvalidPublicKey,
    /// The attestation certificate does not start with a DER SEQUENCE header.
    InvalidCertificate,
    /// A registration response can only carry key handles of up to 255 bytes.
    KeyHandleTooLong(usize),
}

impl fmt::Display for ResponseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResponseError::TooShort { expected, actual } => {
                write!(f, "expected at least {expected} bytes, got {actual}")
            }
            ResponseError::InvalidReservedByte(b) => write!(f, "invalid reserved byte {b:#04x}"),
            ResponseError::InvalidPublicKey => f.write_str("public key is not uncompressed"),
            ResponseError::InvalidCertificate => {
                f.write_str("attestation certificate is not DER encoded")
            }
            ResponseError::KeyHandleTooLong(len) => {
                write!(f, "key handle of {len} bytes does not fit a registration response")
            }
        }
    }
}

impl std::error::Error for ResponseError {}
