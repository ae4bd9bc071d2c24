use std::io;

use mockall::Sequence;
use u2f_types::{FrameError, RequestError, ResponseError, StatusWord};

use super::*;
use crate::transport::MockTransport;

fn reply(data: &[u8], status: impl Into<u16>) -> Vec<u8> {
    ResponseFrame::new(data.to_vec(), status).encode()
}

fn register_request() -> RegisterRequest {
    RegisterRequest {
        challenge: vec![0x01; 32],
        application: vec![0x02; 32],
    }
}

fn authenticate_request() -> AuthenticateRequest {
    AuthenticateRequest {
        challenge: vec![0x03; 32],
        application: vec![0x04; 32],
        key_handle: vec![0x05; 64],
    }
}

/// Transport that fails the test if anything is sent.
fn silent_transport() -> MockTransport {
    let mut transport = MockTransport::new();
    transport.expect_message().times(0);
    transport
}

#[test]
fn invalid_register_requests_never_reach_the_transport() {
    let mut token = Token::new(silent_transport());

    let mut request = register_request();
    request.challenge.truncate(16);
    let err = token.register(&request).unwrap_err();
    assert!(matches!(
        err,
        TokenError::InvalidRequest(RequestError::ChallengeLength(16))
    ));

    let mut request = register_request();
    request.application.push(0);
    let err = token.register(&request).unwrap_err();
    assert!(matches!(
        err,
        TokenError::InvalidRequest(RequestError::ApplicationLength(33))
    ));
}

#[test]
fn invalid_authenticate_requests_never_reach_the_transport() {
    let mut token = Token::new(silent_transport());

    let mut request = authenticate_request();
    request.key_handle = vec![0; 257];
    assert!(matches!(
        token.authenticate(&request).unwrap_err(),
        TokenError::InvalidRequest(RequestError::KeyHandleTooLong(257))
    ));
    assert!(matches!(
        token.check_authenticate(&request).unwrap_err(),
        TokenError::InvalidRequest(RequestError::KeyHandleTooLong(257))
    ));

    let mut request = authenticate_request();
    request.challenge.clear();
    assert!(matches!(
        token.authenticate(&request).unwrap_err(),
        TokenError::InvalidRequest(RequestError::ChallengeLength(0))
    ));
}

#[test]
fn register_returns_raw_data() {
    let expected_frame = register_request().to_frame().unwrap().encode().unwrap();
    let mut transport = MockTransport::new();
    transport
        .expect_message()
        .withf(move |request| request.to_vec() == expected_frame)
        .times(1)
        .returning(|_| Ok(reply(&[0x05, 0xDE, 0xAD], StatusWord::NoError)));

    let mut token = Token::new(transport);
    let data = token.register(&register_request()).expect("registration failed");
    assert_eq!(data, [0x05, 0xDE, 0xAD]);
}

#[test]
fn register_sends_enforce_control_byte() {
    let mut transport = MockTransport::new();
    transport
        .expect_message()
        .withf(|request| request[..7] == [0x00, 0x01, 0x03, 0x00, 0x00, 0x00, 0x40])
        .times(1)
        .returning(|_| Ok(reply(&[], StatusWord::NoError)));

    let mut token = Token::new(transport);
    assert!(token.register(&register_request()).is_ok());
}

#[test]
fn presence_required_on_register_and_authenticate() {
    let mut transport = MockTransport::new();
    transport
        .expect_message()
        .times(2)
        .returning(|_| Ok(reply(&[], StatusWord::ConditionsNotSatisfied)));

    let mut token = Token::new(transport);
    let err = token.register(&register_request()).unwrap_err();
    assert!(matches!(err, TokenError::PresenceRequired));
    assert!(err.is_retryable());

    let err = token.authenticate(&authenticate_request()).unwrap_err();
    assert!(matches!(err, TokenError::PresenceRequired));
}

#[test]
fn unexpected_register_status_carries_the_code() {
    let mut transport = MockTransport::new();
    transport
        .expect_message()
        .returning(|_| Ok(reply(&[], StatusWord::WrongLength)));

    let mut token = Token::new(transport);
    let err = token.register(&register_request()).unwrap_err();
    assert!(!err.is_retryable());
    assert!(matches!(
        err,
        TokenError::UnexpectedStatus {
            operation: Operation::Register,
            status: 0x6700
        }
    ));
    assert_eq!(err.to_string(), "unexpected status 0x6700 during registration");
}

#[test]
fn check_authenticate_accepts_conditions_not_satisfied() {
    let mut transport = MockTransport::new();
    transport
        .expect_message()
        .withf(|request| request[1] == 0x02 && request[2] == 0x07)
        .times(1)
        .returning(|_| Ok(reply(&[], StatusWord::ConditionsNotSatisfied)));

    let mut token = Token::new(transport);
    assert!(token.check_authenticate(&authenticate_request()).is_ok());
}

#[test]
fn longest_key_handle_reaches_the_token() {
    let mut transport = MockTransport::new();
    transport
        .expect_message()
        .withf(|request| {
            request.len() == 7 + 32 + 32 + 1 + 256
                && request[2] == 0x07
                && request[4..7] == [0x00, 0x01, 0x41]
                && request[7 + 64] == 0x00
        })
        .times(1)
        .returning(|_| Ok(reply(&[], StatusWord::WrongData)));

    let mut token = Token::new(transport);
    let mut request = authenticate_request();
    request.key_handle = vec![0xAB; 256];
    assert!(matches!(
        token.check_authenticate(&request),
        Err(TokenError::UnknownKeyHandle)
    ));
}

#[test]
fn check_authenticate_reports_unknown_key_handle() {
    let mut transport = MockTransport::new();
    transport
        .expect_message()
        .returning(|_| Ok(reply(&[], StatusWord::WrongData)));

    let mut token = Token::new(transport);
    assert!(matches!(
        token.check_authenticate(&authenticate_request()),
        Err(TokenError::UnknownKeyHandle)
    ));
}

#[test]
fn check_authenticate_treats_success_as_unexpected() {
    let mut transport = MockTransport::new();
    transport
        .expect_message()
        .returning(|_| Ok(reply(&[0x01], StatusWord::NoError)));

    let mut token = Token::new(transport);
    assert!(matches!(
        token.check_authenticate(&authenticate_request()),
        Err(TokenError::UnexpectedStatus {
            operation: Operation::CheckAuthenticate,
            status: 0x9000
        })
    ));
}

#[test]
fn authenticate_does_not_map_wrong_data_to_unknown_key_handle() {
    let mut transport = MockTransport::new();
    transport
        .expect_message()
        .returning(|_| Ok(reply(&[], StatusWord::WrongData)));

    let mut token = Token::new(transport);
    assert!(matches!(
        token.authenticate(&authenticate_request()),
        Err(TokenError::UnexpectedStatus {
            operation: Operation::Authenticate,
            status: 0x6A80
        })
    ));
}

#[test]
fn check_then_authenticate() {
    let mut seq = Sequence::new();
    let mut transport = MockTransport::new();
    transport
        .expect_message()
        .withf(|request| request[2] == 0x07)
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_| Ok(reply(&[], StatusWord::ConditionsNotSatisfied)));
    transport
        .expect_message()
        .withf(|request| request[2] == 0x03)
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_| {
            Ok(reply(
                &[0x00, 0, 0, 0, 5, 0xAA, 0xBB, 0xCC, 0xDD],
                StatusWord::NoError,
            ))
        });

    let mut token = Token::new(transport);
    let request = authenticate_request();
    token
        .check_authenticate(&request)
        .expect("key handle should be known");
    let response = token.authenticate(&request).expect("authentication failed");
    assert_eq!(response.counter, 5);
    assert_eq!(response.signature, [0xAA, 0xBB, 0xCC, 0xDD]);
    assert_eq!(
        response.raw_response,
        [0x00, 0, 0, 0, 5, 0xAA, 0xBB, 0xCC, 0xDD]
    );
}

#[test]
fn short_authenticate_data_is_malformed() {
    let mut transport = MockTransport::new();
    transport
        .expect_message()
        .returning(|_| Ok(reply(&[0x01, 0, 0, 0], StatusWord::NoError)));

    let mut token = Token::new(transport);
    assert!(matches!(
        token.authenticate(&authenticate_request()),
        Err(TokenError::MalformedResponse {
            operation: Operation::Authenticate,
            source: ResponseError::TooShort { .. }
        })
    ));
}

#[test]
fn version_sends_empty_payload() {
    let mut transport = MockTransport::new();
    transport
        .expect_message()
        .withf(|request| {
            request.to_vec() == [0x00, 0x03, 0x00, 0x00, 0x00, 0x00, 0x00]
        })
        .times(1)
        .returning(|_| Ok(reply(b"U2F_V2", StatusWord::NoError)));

    let mut token = Token::new(transport);
    assert_eq!(token.version().unwrap(), u2f_types::U2F_V2);
}

#[test]
fn version_with_unsupported_instruction() {
    let mut transport = MockTransport::new();
    transport
        .expect_message()
        .returning(|_| Ok(reply(&[], StatusWord::InsNotSupported)));

    let mut token = Token::new(transport);
    assert!(matches!(
        token.version(),
        Err(TokenError::UnexpectedStatus {
            operation: Operation::Version,
            status: 0x6D00
        })
    ));
}

#[test]
fn version_is_returned_for_any_success_data() {
    let mut transport = MockTransport::new();
    transport
        .expect_message()
        .returning(|_| Ok(reply(&[b'U', 0xFF, b'2'], StatusWord::NoError)));

    let mut token = Token::new(transport);
    assert_eq!(token.version().unwrap(), "U\u{FFFD}2");
}

#[test]
fn short_reply_is_a_framing_error() {
    let mut transport = MockTransport::new();
    transport.expect_message().returning(|_| Ok(vec![0x90]));

    let mut token = Token::new(transport);
    assert!(matches!(
        token.version(),
        Err(TokenError::Frame(FrameError::ResponseTooShort(1)))
    ));
}

#[test]
fn transport_errors_pass_through() {
    let mut transport = MockTransport::new();
    transport
        .expect_message()
        .returning(|_| Err(io::Error::new(io::ErrorKind::NotConnected, "unplugged")));

    let mut token = Token::new(transport);
    match token.register(&register_request()) {
        Err(TokenError::Transport(err)) => {
            assert_eq!(err.kind(), io::ErrorKind::NotConnected);
            assert_eq!(err.to_string(), "unplugged");
        }
        other => panic!("expected a transport error, got {other:?}"),
    }
}

#[test]
fn token_works_through_a_borrowed_transport() {
    let mut transport = MockTransport::new();
    transport
        .expect_message()
        .times(1)
        .returning(|_| Ok(reply(b"U2F_V2", StatusWord::NoError)));

    {
        let mut token = Token::new(&mut transport);
        assert_eq!(token.version().unwrap(), "U2F_V2");
    }
    transport.checkpoint();
}
