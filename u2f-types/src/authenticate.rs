use crate::{
    register::check_parameters, Command, ControlByte, RequestError, RequestFrame, ResponseError,
};


/// Longest key handle accepted in an authentication request.
///
/// The length travels in a single byte, so a 256 byte handle is announced with length `0x00`.
pub const MAX_KEY_HANDLE_LEN: usize = 256;

/// This message is used to initiate a U2F token authentication, or to check whether the token
/// knows a key handle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticateRequest {
    /// The challenge parameter is the SHA-256 hash of the Client Data, a stringified JSON data
    /// structure that the FIDO Client prepares.
    pub challenge: Vec<u8>,
    /// The application parameter is the SHA-256 hash of the UTF-8 encoding of the application
    /// identity of the application requesting the authentication as provided by the relying party.
    pub application: Vec<u8>,
    /// This is provided by the relying party, and was obtained by the relying party during registration.
    pub key_handle: Vec<u8>,
}

impl AuthenticateRequest {
    /// Validate the request and encode it into a frame with the given control byte.
    ///
    /// The payload is `challenge | application | L | key handle`.
    pub fn to_frame(&self, control: ControlByte) -> Result<RequestFrame, RequestError> {
        check_parameters(&self.challenge, &self.application)?;
        if self.key_handle.len() > MAX_KEY_HANDLE_LEN {
            return Err(RequestError::KeyHandleTooLong(self.key_handle.len()));
        }
        // only the low byte of the length is sent
        let handle_len = u8::try_from(self.key_handle.len() % 256)
            .map_err(|_| RequestError::KeyHandleTooLong(self.key_handle.len()))?;

        let data = self
            .challenge
            .iter()
            .chain(&self.application)
            .chain(&[handle_len])
            .chain(&self.key_handle)
            .copied()
            .collect();
        Ok(RequestFrame::new(Command::Authenticate, control, data))
    }
}

/// This message is output by the U2F token after processing/signing the [`AuthenticateRequest`]
/// message. Its raw representation is the concatenation of its fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticateResponse {
    /// Bit 0 is set when user presence was verified.
    pub user_presence: u8,
    /// This a counter value that the U2F token increments every time it performs an authentication
    /// operation. It is transported in big endian representation.
    pub counter: u32,
    /// This is a ECDSA signature (on P-256) over the following byte string.
    /// 1. The application parameter [32 bytes] from the authentication request message.
    /// 2. The above user presence byte [1 byte].
    /// 3. The above counter [4 bytes].
    /// 4. The challenge parameter [32 bytes] from the authentication request message.
    pub signature: Vec<u8>,
    /// The complete response data, for relying parties that verify the signature themselves.
    pub raw_response: Vec<u8>,
}

impl AuthenticateResponse {
    /// Presence byte, counter, and at least one byte of signature.
    const MIN_LEN: usize = 6;

    /// Whether the token reports that user presence was verified.
    pub fn user_present(&self) -> bool {
        self.user_presence & 0x01 != 0
    }
}

impl TryFrom<Vec<u8>> for AuthenticateResponse {
    type Error = ResponseError;

    fn try_from(data: Vec<u8>) -> Result<Self, Self::Error> {
        if data.len() < Self::MIN_LEN {
            return Err(ResponseError::TooShort {
                expected: Self::MIN_LEN,
                actual: data.len(),
            });
        }
        Ok(Self {
            user_presence: data[0],
            counter: u32::from_be_bytes([data[1], data[2], data[3], data[4]]),
            signature: data[5..].to_vec(),
            raw_response: data,
        })
    }
}
