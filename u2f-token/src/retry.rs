//! Caller side handling of `SW_CONDITIONS_NOT_SATISFIED`.
//!
//! A token answers Register and Authenticate with "presence required" until the user touches it.
//! The protocol offers no way to wait for that, so the client keeps re-sending the same request.

use std::{
    thread,
    time::{Duration, Instant},
};

use serde::{Deserialize, Serialize};

use crate::TokenError;


/// Polling interval used by U2F clients in the wild.
const DEFAULT_INTERVAL: Duration = Duration::from_millis(200);

/// How often and for how long to re-send a request while the token waits for the user.
///
/// The default polls every 200ms and never gives up, which leaves the bound to the caller. It can
/// be read from a configuration file, durations are given in milliseconds:
///
/// ```
/// # use u2f_token::RetryPolicy;
/// # use std::time::Duration;
/// let policy: RetryPolicy = serde_json::from_str(r#"{ "interval_ms": 100, "timeout_ms": 30000 }"#).unwrap();
/// assert_eq!(policy, RetryPolicy::default().interval(Duration::from_millis(100)).timeout(Duration::from_secs(30)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryPolicy {
    /// Time slept between two attempts.
    #[serde(rename = "interval_ms", with = "millis")]
    pub interval: Duration,
    /// Give up after this many attempts. An attempt is always made, even with `Some(0)`.
    pub max_attempts: Option<u32>,
    /// Give up once this much time has passed since the first attempt.
    #[serde(rename = "timeout_ms", with = "optional_millis")]
    pub timeout: Option<Duration>,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::unbounded()
    }
}

impl RetryPolicy {
    /// Poll every 200ms until the token stops asking for presence.
    pub fn unbounded() -> Self {
        Self {
            interval: DEFAULT_INTERVAL,
            max_attempts: None,
            timeout: None,
        }
    }

    /// Builder method for the polling interval.
    pub fn interval(self, interval: Duration) -> Self {
        Self { interval, ..self }
    }

    /// Builder method for the maximum number of attempts.
    pub fn max_attempts(self, max_attempts: u32) -> Self {
        Self {
            max_attempts: Some(max_attempts),
            ..self
        }
    }

    /// Builder method for the overall deadline.
    pub fn timeout(self, timeout: Duration) -> Self {
        Self {
            timeout: Some(timeout),
            ..self
        }
    }

    fn is_exhausted(&self, attempts: u32, started: Instant) -> bool {
        self.max_attempts.is_some_and(|max| attempts >= max)
            || self
                .timeout
                .is_some_and(|timeout| started.elapsed() >= timeout)
    }
}

/// Run `operation` until it returns something other than [`TokenError::PresenceRequired`].
///
/// Between attempts the thread sleeps for [`RetryPolicy::interval`]. When the policy's bounds are
/// reached while presence is still required, [`TokenError::PresenceTimeout`] is returned. Every
/// other error ends the loop immediately.
pub fn retry_presence<T, E, F>(policy: &RetryPolicy, mut operation: F) -> Result<T, TokenError<E>>
where
    F: FnMut() -> Result<T, TokenError<E>>,
{
    let started = Instant::now();
    let mut attempts: u32 = 0;
    loop {
        attempts = attempts.saturating_add(1);
        match operation() {
            Err(TokenError::PresenceRequired) => {}
            result => {
                if attempts > 1 {
                    log::debug!("user presence resolved after {attempts} attempts");
                }
                return result;
            }
        }

        if attempts == 1 {
            log::info!("waiting for user presence on the token");
        }
        if policy.is_exhausted(attempts, started) {
            log::warn!(
                "giving up on user presence after {attempts} attempts and {:?}",
                started.elapsed()
            );
            return Err(TokenError::PresenceTimeout { attempts });
        }
        thread::sleep(policy.interval);
    }
}

mod millis {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub(super) fn serialize<S: Serializer>(value: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(u64::try_from(value.as_millis()).unwrap_or(u64::MAX))
    }

    pub(super) fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        u64::deserialize(d).map(Duration::from_millis)
    }
}

mod optional_millis {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub(super) fn serialize<S: Serializer>(
        value: &Option<Duration>,
        s: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(value) => {
                s.serialize_some(&u64::try_from(value.as_millis()).unwrap_or(u64::MAX))
            }
            None => s.serialize_none(),
        }
    }

    pub(super) fn deserialize<'de, D: Deserializer<'de>>(
        d: D,
    ) -> Result<Option<Duration>, D::Error> {
        Option::<u64>::deserialize(d).map(|ms| ms.map(Duration::from_millis))
    }
}
