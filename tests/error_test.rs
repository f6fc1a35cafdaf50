use std::collections::HashSet;
use std::time::Duration;

use fitzone::error::{
    FAILURE_MESSAGE, RATE_LIMITED_MESSAGE, TIMEOUT_MESSAGE, TROUBLE_MESSAGE,
    UNCONFIGURED_MESSAGE, UPSTREAM_RATE_LIMITED_MESSAGE,
};
use fitzone::{ErrorKind, FitzoneError, Result};

fn json_error() -> FitzoneError {
    serde_json::from_str::<serde_json::Value>("{").unwrap_err().into()
}

#[test]
fn test_error_display() {
    let err = FitzoneError::Api {
        status: 503,
        message: "unavailable".into(),
    };
    assert!(err.to_string().contains("503"));
}

#[test]
fn test_result_alias() {
    fn returns_error() -> Result<()> {
        Err(FitzoneError::Unconfigured)
    }
    assert!(returns_error().is_err());
}

// ============================================================================
// Classification
// ============================================================================

#[test]
fn kinds() {
    assert_eq!(
        FitzoneError::LocalRateLimited {
            max_requests: 10,
            window: Duration::from_secs(60)
        }
        .kind(),
        ErrorKind::LocalRateLimited
    );
    assert_eq!(
        FitzoneError::UpstreamRateLimited { retry_after: None }.kind(),
        ErrorKind::UpstreamRateLimited
    );
    assert_eq!(FitzoneError::Unconfigured.kind(), ErrorKind::Unconfigured);
    assert_eq!(
        FitzoneError::Timeout(Duration::from_secs(20)).kind(),
        ErrorKind::Timeout
    );
    assert_eq!(
        FitzoneError::Http("connection reset".into()).kind(),
        ErrorKind::TransportFailure
    );
    assert_eq!(json_error().kind(), ErrorKind::TransportFailure);
    assert_eq!(
        FitzoneError::MalformedResponse("x".into()).kind(),
        ErrorKind::TransportFailure
    );
}

#[test]
fn user_messages() {
    assert_eq!(
        FitzoneError::LocalRateLimited {
            max_requests: 10,
            window: Duration::from_secs(60)
        }
        .user_message(),
        RATE_LIMITED_MESSAGE
    );
    assert_eq!(
        FitzoneError::UpstreamRateLimited {
            retry_after: Some(Duration::from_secs(5))
        }
        .user_message(),
        UPSTREAM_RATE_LIMITED_MESSAGE
    );
    assert_eq!(FitzoneError::Unconfigured.user_message(), UNCONFIGURED_MESSAGE);
    assert_eq!(
        FitzoneError::Timeout(Duration::from_secs(20)).user_message(),
        TIMEOUT_MESSAGE
    );
    assert_eq!(
        FitzoneError::Api {
            status: 500,
            message: "internal".into()
        }
        .user_message(),
        FAILURE_MESSAGE
    );
    assert_eq!(
        FitzoneError::Http("dns".into()).user_message(),
        TROUBLE_MESSAGE
    );
    assert_eq!(json_error().user_message(), TROUBLE_MESSAGE);
}

#[test]
fn user_messages_hide_the_cause() {
    let err = FitzoneError::Http("tcp connect error: 10.0.0.7:443".into());
    assert!(!err.user_message().contains("10.0.0.7"));

    let err = FitzoneError::Api {
        status: 400,
        message: "API key not valid".into(),
    };
    assert!(!err.user_message().contains("API key"));
}

#[test]
fn each_kind_has_a_distinct_label() {
    let labels: HashSet<_> = [
        ErrorKind::LocalRateLimited,
        ErrorKind::UpstreamRateLimited,
        ErrorKind::Unconfigured,
        ErrorKind::Timeout,
        ErrorKind::TransportFailure,
    ]
    .iter()
    .map(ErrorKind::as_str)
    .collect();
    assert_eq!(labels.len(), 5);
}
