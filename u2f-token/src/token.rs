//! Follows U2F 1.2 <https://fidoalliance.org/specs/fido-u2f-v1.2-ps-20170411/fido-u2f-raw-message-formats-v1.2-ps-20170411.html>

use u2f_types::{
    decode_version, AuthenticateRequest, AuthenticateResponse, Command, ControlByte,
    RegisterRequest, RequestFrame, ResponseFrame,
};

use crate::{retry_presence, Operation, RetryPolicy, StatusClass, TokenError, Transport};

#[cfg(test)]
mod tests;

/// A U2F hardware token reached through a [`Transport`].
///
/// The token holds no state besides the transport, each method is a single request/response
/// exchange. Methods take `&mut self` so only one request is ever in flight.
pub struct Token<T> {
    transport: T,
}

impl<T: Transport> Token<T> {
    /// Create a token that will use `transport` to communicate with the device.
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    /// Access the underlying [`Transport`].
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Exclusively access the underlying [`Transport`].
    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    /// Give back the underlying [`Transport`].
    pub fn into_inner(self) -> T {
        self.transport
    }

    /// Register an application with the token and return the raw registration response to be
    /// passed to the relying party. It can be decoded with
    /// [`RegisterResponse::try_from`](u2f_types::RegisterResponse).
    ///
    /// Returns [`TokenError::PresenceRequired`] if the call should be retried after proof of user
    /// presence is provided to the token.
    pub fn register(&mut self, request: &RegisterRequest) -> Result<Vec<u8>, TokenError<T::Error>> {
        let frame = request.to_frame()?;
        let response = self.message(&frame)?;
        interpret(Operation::Register, response)
    }

    /// Perform an authentication and return the response to provide to the relying party.
    ///
    /// Returns [`TokenError::PresenceRequired`] if the call should be retried after proof of user
    /// presence is provided to the token. A key handle the token does not know is not reported as
    /// [`TokenError::UnknownKeyHandle`] here, use [`Token::check_authenticate`] first to find out.
    pub fn authenticate(
        &mut self,
        request: &AuthenticateRequest,
    ) -> Result<AuthenticateResponse, TokenError<T::Error>> {
        let frame = request.to_frame(ControlByte::ENFORCE)?;
        let response = self.message(&frame)?;
        let data = interpret(Operation::Authenticate, response)?;
        AuthenticateResponse::try_from(data).map_err(|source| {
            log::warn!("Token sent a malformed authentication response: {source}");
            TokenError::MalformedResponse {
                operation: Operation::Authenticate,
                source,
            }
        })
    }

    /// Check whether the key handle is known to the token without requiring a test of user
    /// presence.
    ///
    /// Returns [`TokenError::UnknownKeyHandle`] if the key handle is unknown to the token.
    pub fn check_authenticate(
        &mut self,
        request: &AuthenticateRequest,
    ) -> Result<(), TokenError<T::Error>> {
        let frame = request.to_frame(ControlByte::CHECK_ONLY)?;
        let response = self.message(&frame)?;
        interpret(Operation::CheckAuthenticate, response).map(|_| ())
    }

    /// Return the U2F protocol version implemented by the token, `"U2F_V2"` for U2F 1.2.
    ///
    /// Any data returned with a success status is the version, invalid UTF-8 is replaced lossily.
    pub fn version(&mut self) -> Result<String, TokenError<T::Error>> {
        let frame = RequestFrame::new(Command::Version, 0u8, Vec::new());
        let response = self.message(&frame)?;
        let data = interpret(Operation::Version, response)?;
        Ok(decode_version(&data))
    }

    /// [`Token::register`], re-sent according to `policy` while the token waits for the user.
    pub fn register_with_presence(
        &mut self,
        request: &RegisterRequest,
        policy: &RetryPolicy,
    ) -> Result<Vec<u8>, TokenError<T::Error>> {
        retry_presence(policy, || self.register(request))
    }

    /// [`Token::authenticate`], re-sent according to `policy` while the token waits for the user.
    pub fn authenticate_with_presence(
        &mut self,
        request: &AuthenticateRequest,
        policy: &RetryPolicy,
    ) -> Result<AuthenticateResponse, TokenError<T::Error>> {
        retry_presence(policy, || self.authenticate(request))
    }

    /// Send a low-level request to the token and return the framed reply without interpreting its
    /// status.
    pub fn message(&mut self, frame: &RequestFrame) -> Result<ResponseFrame, TokenError<T::Error>> {
        let request = frame.encode()?;
        log::debug!(
            "Sending {:?} with p1={:#04x}, {} byte payload",
            frame.command,
            frame.p1,
            frame.data.len()
        );
        log::trace!("Request frame is {} bytes", request.len());

        let reply = self
            .transport
            .message(&request)
            .map_err(TokenError::Transport)?;
        log::trace!("Reply frame is {} bytes", reply.len());

        let response = ResponseFrame::try_from(reply)?;
        log::debug!("Token answered with status {:#06x}", response.status);
        Ok(response)
    }
}

/// Apply the status table of `operation` to a reply, returning its data on success.
fn interpret<E>(operation: Operation, response: ResponseFrame) -> Result<Vec<u8>, TokenError<E>> {
    match operation.classify(response.status) {
        StatusClass::Success => Ok(response.data),
        StatusClass::PresenceRequired => Err(TokenError::PresenceRequired),
        StatusClass::UnknownKeyHandle => Err(TokenError::UnknownKeyHandle),
        StatusClass::Unexpected => {
            log::warn!(
                "Unexpected status {:#06x} during {operation}",
                response.status
            );
            Err(TokenError::UnexpectedStatus {
                operation,
                status: response.status,
            })
        }
    }
}
