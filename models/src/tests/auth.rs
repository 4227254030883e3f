use crate::{Credentials, Registration};

/// **VALUE**: Verifies required login fields.
///
/// **WHY THIS MATTERS**: The login form marks both fields required; an empty password
/// should never hit the network.
///
/// **BUG THIS CATCHES**: Would catch either emptiness check being dropped.
#[test]
fn given_missing_fields_when_creating_credentials_then_returns_validation_error() {
    assert!(Credentials::new("  ", "secret").is_err());
    assert!(Credentials::new("alice", "").is_err());

    let credentials = Credentials::new(" alice ", "secret").unwrap();
    assert_eq!(credentials.username(), "alice");
    assert_eq!(credentials.password().expose(), "secret");
}

/// **VALUE**: Verifies email validation and the request body shape.
///
/// **WHY THIS MATTERS**: The server validates emails too; rejecting early gives a
/// clearer message than a 422.
///
/// **BUG THIS CATCHES**: Would catch the body exposing the wrong fields.
#[test]
fn given_registration_when_validated_then_builds_request_body() {
    assert!(Registration::new("bob", "not-an-email", "pw").is_err());
    assert!(Registration::new("bob", "bob@localhost", "pw").is_err());

    let registration = Registration::new("bob", "bob@example.com", "pw").unwrap();
    let body = serde_json::to_value(registration.to_request_body()).unwrap();

    assert_eq!(body["username"], "bob");
    assert_eq!(body["email"], "bob@example.com");
    assert_eq!(body["password"], "pw");
}
