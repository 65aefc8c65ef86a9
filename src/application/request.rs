//! Lifecycle of one remote request type.

use crate::error::ServiceError;

/// Where a request of one kind currently stands.
///
/// One state is kept per request type. A new request moves it back to
/// `Loading`; whichever response lands last decides the final state.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum RequestState<T> {
    #[default]
    Idle,
    Loading,
    Ready(T),
    /// Human-readable error message for the banner.
    Failed(String),
}

impl<T> RequestState<T> {
    /// Record the outcome of a finished request.
    pub fn settle(&mut self, outcome: Result<T, ServiceError>) {
        *self = match outcome {
            Ok(value) => Self::Ready(value),
            Err(err) => Self::Failed(err.banner_message()),
        };
    }

    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    #[must_use]
    pub const fn value(&self) -> Option<&T> {
        match self {
            Self::Ready(value) => Some(value),
            _ => None,
        }
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failed(message) => Some(message),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settle_keeps_server_message_verbatim() {
        let mut state: RequestState<u32> = RequestState::Loading;
        state.settle(Err(ServiceError::Rejected {
            status: 400,
            message: "Not enough data for ZZZ".into(),
        }));

        assert_eq!(state.error(), Some("Not enough data for ZZZ"));
        assert!(state.value().is_none());
    }

    #[test]
    fn settle_ok_is_ready() {
        let mut state = RequestState::Idle;
        assert!(!state.is_loading());
        state.settle(Ok(7));
        assert_eq!(state.value(), Some(&7));
    }
}
