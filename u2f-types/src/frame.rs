//! Request and response framing.
//!
//! Requests use the extended length encoding of the raw message format:
//!
//! ```text
//! | CLA | INS | P1 | P2 | LC1 | LC2 | LC3 | data... |
//! ```
//!
//! where `LC1..LC3` is the big endian length of the data. Replies are the response data followed by
//! the big endian status word.

use crate::{Command, FrameError, StatusWord};


/// Largest payload the 3 byte length field can describe.
pub const MAX_PAYLOAD_LEN: usize = 0x00FF_FFFF;

/// Length of `CLA | INS | P1 | P2 | LC1 | LC2 | LC3`
const REQUEST_HEADER_LEN: usize = 7;

/// Length of the trailing status word of a reply.
const STATUS_LEN: usize = 2;

/// U2F request frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestFrame {
    /// Command byte
    pub command: Command,
    /// First parameter byte, the [`ControlByte`](crate::ControlByte) for Register and Authenticate
    pub p1: u8,
    /// Second parameter byte, always 0 in U2F 1.2
    pub p2: u8,
    /// Data payload
    pub data: Vec<u8>,
}

impl RequestFrame {
    /// Create a frame for `command` with the given first parameter and a zero second parameter.
    pub fn new(command: Command, p1: impl Into<u8>, data: Vec<u8>) -> Self {
        Self {
            command,
            p1: p1.into(),
            p2: 0,
            data,
        }
    }

    /// Encode the frame to its wire representation. The class byte is always 0.
    pub fn encode(&self) -> Result<Vec<u8>, FrameError> {
        if self.data.len() > MAX_PAYLOAD_LEN {
            return Err(FrameError::PayloadTooLong(self.data.len()));
        }
        let len = u32::try_from(self.data.len())
            .map_err(|_| FrameError::PayloadTooLong(self.data.len()))?;
        let [_, len_hi, len_mid, len_lo] = len.to_be_bytes();

        let mut buf = Vec::with_capacity(REQUEST_HEADER_LEN + self.data.len());
        buf.extend_from_slice(&[
            0x00,
            self.command.into(),
            self.p1,
            self.p2,
            len_hi,
            len_mid,
            len_lo,
        ]);
        buf.extend_from_slice(&self.data);
        Ok(buf)
    }
}

impl TryFrom<&[u8]> for RequestFrame {
    type Error = FrameError;

    fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
        if value.len() < REQUEST_HEADER_LEN {
            return Err(FrameError::RequestTooShort(value.len()));
        }
        let (header, data) = value.split_at(REQUEST_HEADER_LEN);

        let cla = header[0];
        if cla != 0 {
            return Err(FrameError::InvalidClass(cla));
        }
        let command =
            Command::try_from(header[1]).map_err(|err| FrameError::UnknownCommand(err.0))?;

        let declared =
            (usize::from(header[4]) << 16) | (usize::from(header[5]) << 8) | usize::from(header[6]);
        if declared != data.len() {
            return Err(FrameError::LengthMismatch {
                declared,
                actual: data.len(),
            });
        }

        Ok(Self {
            command,
            p1: header[2],
            p2: header[3],
            data: data.to_vec(),
        })
    }
}

/// U2F reply frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseFrame {
    /// Everything preceding the status word
    pub data: Vec<u8>,
    /// Raw status word
    pub status: u16,
}

impl ResponseFrame {
    /// Create a reply from its data and status.
    pub fn new(data: Vec<u8>, status: impl Into<u16>) -> Self {
        Self {
            data,
            status: status.into(),
        }
    }

    /// The status as a known [`StatusWord`], if it is one.
    pub fn status_word(&self) -> Option<StatusWord> {
        StatusWord::try_from(self.status).ok()
    }

    /// Whether the token answered with [`StatusWord::NoError`].
    pub fn is_success(&self) -> bool {
        self.status == StatusWord::NoError.as_primitive()
    }

    /// Encode the reply to its wire representation, the data followed by the status.
    pub fn encode(self) -> Vec<u8> {
        self.data
            .into_iter()
            .chain(self.status.to_be_bytes())
            .collect()
    }
}

impl TryFrom<Vec<u8>> for ResponseFrame {
    type Error = FrameError;

    fn try_from(mut value: Vec<u8>) -> Result<Self, Self::Error> {
        let Some(split) = value.len().checked_sub(STATUS_LEN) else {
            return Err(FrameError::ResponseTooShort(value.len()));
        };
        let status = value.split_off(split);
        Ok(Self {
            data: value,
            status: u16::from_be_bytes([status[0], status[1]]),
        })
    }
}

impl TryFrom<&[u8]> for ResponseFrame {
    type Error = FrameError;

    fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
        Self::try_from(value.to_vec())
    }
}
