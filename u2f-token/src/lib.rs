//! # U2F Token
//!
//! This crate defines a [`Token`] type which speaks the [FIDO U2F raw message protocol][raw] to a
//! hardware security key. The bytes reach the key through a [`Transport`], usually a USB HID
//! implementation living in another crate, which keeps this crate free of any device handling and
//! lets tests swap in a mock.
//!
//! Every operation on a [`Token`] performs exactly one round trip. When the key wants the user to
//! touch it, the operation fails with [`TokenError::PresenceRequired`] and the caller is expected to
//! try again with the same request. [`retry_presence`] and the `*_with_presence` methods implement
//! that loop according to a [`RetryPolicy`].
//!
//! ```no_run
//! # fn run<T: u2f_token::Transport>(transport: T) -> Result<(), u2f_token::TokenError<T::Error>> {
//! use u2f_token::{RegisterRequest, RetryPolicy, Token};
//!
//! let mut token = Token::new(transport);
//! let request = RegisterRequest {
//!     challenge: vec![0; 32],
//!     application: vec![0; 32],
//! };
//! println!("provide user presence");
//! let registration = token.register_with_presence(&request, &RetryPolicy::default())?;
//! # let _ = registration;
//! # Ok(())
//! # }
//! ```
//!
//! [raw]: https://fidoalliance.org/specs/fido-u2f-v1.2-ps-20170411/fido-u2f-raw-message-formats-v1.2-ps-20170411.html

mod error;
mod retry;
mod status;
mod token;
mod transport;

pub use self::{
    error::TokenError,
    retry::{retry_presence, RetryPolicy},
    status::{Operation, StatusClass},
    token::Token,
    transport::Transport,
};

#[cfg(feature = "testable")]
pub use self::transport::MockTransport;

pub use u2f_types::{
    AuthenticateRequest, AuthenticateResponse, PublicKey, RegisterRequest, RegisterResponse,
    RequestError, RequestFrame, ResponseError, ResponseFrame, StatusWord, U2F_V2,
};

/// Re-export of the wire types this crate is built on.
pub use u2f_types as types;
