use crate::{Command, ControlByte, RequestError, RequestFrame, ResponseError};


/// Length of the challenge parameter, a SHA-256 hash of the client data.
pub const CHALLENGE_LEN: usize = 32;
/// Length of the application parameter, a SHA-256 hash of the application identity.
pub const APPLICATION_LEN: usize = 32;

/// Reserved first byte of a registration response.
const REGISTER_RESERVED_BYTE: u8 = 0x05;

/// Check the fixed length challenge and application parameters shared by all requests.
pub(crate) fn check_parameters(challenge: &[u8], application: &[u8]) -> Result<(), RequestError> {
    if challenge.len() != CHALLENGE_LEN {
        return Err(RequestError::ChallengeLength(challenge.len()));
    }
    if application.len() != APPLICATION_LEN {
        return Err(RequestError::ApplicationLength(application.len()));
    }
    Ok(())
}

/// Request payload to register a new credential with the token.
///
/// The lengths are only checked when the request is encoded, so a token is never contacted with a
/// malformed request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterRequest {
    /// The 32-byte SHA-256 hash of the Client Data prepared by the client
    pub challenge: Vec<u8>,
    /// The 32-byte SHA-256 hash of the application identity of the relying party
    pub application: Vec<u8>,
}

impl RegisterRequest {
    /// Validate the request and encode it into a frame asking the token to enforce user presence.
    pub fn to_frame(&self) -> Result<RequestFrame, RequestError> {
        check_parameters(&self.challenge, &self.application)?;
        let data = [self.challenge.as_slice(), self.application.as_slice()].concat();
        Ok(RequestFrame::new(Command::Register, ControlByte::ENFORCE, data))
    }
}

/// Register response payload
///
/// This is the decoded form of the opaque bytes returned on a successful registration:
///
/// ```text
/// | 0x05 | public key (65) | L | key handle (L) | attestation cert | signature |
/// ```
///
/// Nothing here is verified, that is up to the relying party.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterResponse {
    /// This is the (uncompressed) x,y-representation of a curve point on the P-256 NIST elliptic
    /// curve. User's new public key
    pub public_key: PublicKey,

    /// This a handle that allows the U2F token to identify the generated key pair.
    pub key_handle: Vec<u8>,

    /// This is a certificate in X.509 DER format. Parsing of the X.509 certificate unambiguously
    /// establishes its ending.
    pub attestation_certificate: Vec<u8>,

    /// This is a ECDSA signature (on P-256) over the following byte string:
    /// 1. A byte reserved for future use [1 byte] with the value 0x00.
    /// 2. The application parameter [32 bytes] from the registration request message.
    /// 3. The challenge parameter [32 bytes] from the registration request message.
    /// 4. The above key handle [variable length].
    /// 5. The above user public key [65 bytes].
    pub signature: Vec<u8>,
}

/// U2F public key is the concatenation of `0x04 | x | y` where `0x04` signifies ecc uncompressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PublicKey {
    /// X coordinate of the ECC public key
    pub x: [u8; 32],
    /// Y coordinate of the ECC public key
    pub y: [u8; 32],
}

impl PublicKey {
    /// Length of the encoded key
    pub const LEN: usize = 65;

    /// Encode a Public key into an iterator
    pub fn encode(self) -> impl Iterator<Item = u8> {
        [0x04].into_iter().chain(self.x).chain(self.y)
    }
}

impl TryFrom<&[u8]> for PublicKey {
    type Error = ResponseError;

    fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
        let (magic, coords) = value.split_first().ok_or(ResponseError::InvalidPublicKey)?;
        if *magic != 0x04 || coords.len() != 64 {
            return Err(ResponseError::InvalidPublicKey);
        }
        let (x, y) = coords.split_at(32);
        Ok(Self {
            x: x.try_into().map_err(|_| ResponseError::InvalidPublicKey)?,
            y: y.try_into().map_err(|_| ResponseError::InvalidPublicKey)?,
        })
    }
}

/// Split `n` bytes off the front of `data`, failing if there are not enough.
fn take(data: &[u8], n: usize) -> Result<(&[u8], &[u8]), ResponseError> {
    if data.len() < n {
        return Err(ResponseError::TooShort {
            expected: n,
            actual: data.len(),
        });
    }
    Ok(data.split_at(n))
}

/// Total length of the DER element starting at `data[0]`, header included.
///
/// Only the SEQUENCE tag is accepted since an X.509 certificate always is one.
fn der_sequence_len(data: &[u8]) -> Result<usize, ResponseError> {
    const SEQUENCE_TAG: u8 = 0x30;
    let (header, rest) = take(data, 2)?;
    if header[0] != SEQUENCE_TAG {
        return Err(ResponseError::InvalidCertificate);
    }
    let first = header[1];
    if first & 0x80 == 0 {
        return Ok(2 + usize::from(first));
    }

    // long form, the low bits give the number of length bytes that follow
    let num_bytes = usize::from(first & 0x7F);
    if num_bytes == 0 || num_bytes > 4 {
        return Err(ResponseError::InvalidCertificate);
    }
    let (len_bytes, _) = take(rest, num_bytes)?;
    let len = len_bytes
        .iter()
        .fold(0usize, |acc, b| (acc << 8) | usize::from(*b));
    Ok((2 + num_bytes).saturating_add(len))
}

impl TryFrom<&[u8]> for RegisterResponse {
    type Error = ResponseError;

    fn try_from(data: &[u8]) -> Result<Self, Self::Error> {
        let (reserved, data) = take(data, 1)?;
        if reserved[0] != REGISTER_RESERVED_BYTE {
            return Err(ResponseError::InvalidReservedByte(reserved[0]));
        }
        let (public_key, data) = take(data, PublicKey::LEN)?;
        let public_key = PublicKey::try_from(public_key)?;

        let (handle_len, data) = take(data, 1)?;
        let (key_handle, data) = take(data, usize::from(handle_len[0]))?;

        let cert_len = der_sequence_len(data)?;
        let (attestation_certificate, signature) = take(data, cert_len)?;
        if signature.is_empty() {
            return Err(ResponseError::TooShort {
                expected: cert_len + 1,
                actual: cert_len,
            });
        }

        Ok(Self {
            public_key,
            key_handle: key_handle.to_vec(),
            attestation_certificate: attestation_certificate.to_vec(),
            signature: signature.to_vec(),
        })
    }
}

impl RegisterResponse {
    /// Encode the response back to the bytes a token returns on success, without the status word.
    ///
    /// Fails if the key handle is longer than its single length byte allows.
    pub fn encode(self) -> Result<Vec<u8>, ResponseError> {
        let handle_len = u8::try_from(self.key_handle.len())
            .map_err(|_| ResponseError::KeyHandleTooLong(self.key_handle.len()))?;
        Ok([REGISTER_RESERVED_BYTE]
            .into_iter()
            .chain(self.public_key.encode())
            .chain([handle_len])
            .chain(self.key_handle)
            .chain(self.attestation_certificate)
            .chain(self.signature)
            .collect())
    }
}
