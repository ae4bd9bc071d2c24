//! # U2F Types
//!
//! Rust type definitions for the [FIDO U2F Raw Message Formats][raw] used between a relying
//! party's client and a hardware token.
//!
//! This crate only knows about bytes. It builds request frames, splits reply frames into data and
//! status word, and decodes the payloads of successful replies. Sending frames to a token is the
//! job of `u2f-token`.
//!
//! [raw]: https://fidoalliance.org/specs/fido-u2f-v1.2-ps-20170411/fido-u2f-raw-message-formats-v1.2-ps-20170411.html

#[macro_use]
mod utils;

mod authenticate;
mod commands;
mod error;
mod frame;
mod register;
mod status;
mod version;

pub use self::{
    authenticate::*, commands::*, error::*, frame::*, register::*, status::*, version::*,
};
pub use utils::repr_enum::CodeOutOfRange;
