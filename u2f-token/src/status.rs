use u2f_types::StatusWord;


/// The high level operations of a [`Token`](crate::Token), used to interpret status words and to
/// describe failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum Operation {
    /// Create a new credential.
    #[strum(to_string = "registration")]
    Register,
    /// Sign a challenge with an existing credential, enforcing user presence.
    #[strum(to_string = "authentication")]
    Authenticate,
    /// Ask whether a key handle belongs to the token without signing anything.
    #[strum(to_string = "auth check")]
    CheckAuthenticate,
    /// Query the protocol version.
    #[strum(to_string = "version request")]
    Version,
}

/// What a status word means for a given [`Operation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusClass {
    /// The operation succeeded, the reply data holds its result.
    Success,
    /// The user must prove presence, after which the identical request can be sent again.
    PresenceRequired,
    /// The token did not issue the key handle for this application.
    UnknownKeyHandle,
    /// Any status the operation does not expect.
    Unexpected,
}

impl Operation {
    /// Interpret a raw status word for this operation.
    ///
    /// For [`Operation::CheckAuthenticate`] the token signals a known key handle with
    /// `SW_CONDITIONS_NOT_SATISFIED`, so that status is a success there. [`Operation::Authenticate`]
    /// does not single out `SW_WRONG_DATA`: tokens disagree on what they return for a bad key
    /// handle when presence is enforced, so it is reported as unexpected like any other code.
    pub fn classify(self, status: u16) -> StatusClass {
        let Ok(status) = StatusWord::try_from(status) else {
            return StatusClass::Unexpected;
        };
        match (self, status) {
            (
                Operation::Register | Operation::Authenticate | Operation::Version,
                StatusWord::NoError,
            ) => StatusClass::Success,
            (Operation::Register | Operation::Authenticate, StatusWord::ConditionsNotSatisfied) => {
                StatusClass::PresenceRequired
            }
            (Operation::CheckAuthenticate, StatusWord::ConditionsNotSatisfied) => {
                StatusClass::Success
            }
            (Operation::CheckAuthenticate, StatusWord::WrongData) => StatusClass::UnknownKeyHandle,
            _ => StatusClass::Unexpected,
        }
    }
}
