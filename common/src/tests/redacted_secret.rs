use crate::RedactedSecret;

/// **VALUE**: Verifies that Debug and Display never reveal the secret.
///
/// **WHY THIS MATTERS**: Credentials and tokens flow through structs that are logged
/// with `{:?}`. A leak would write bearer tokens into `fintrack.log`.
///
/// **BUG THIS CATCHES**: Would catch a derived Debug replacing the manual impl.
#[test]
fn given_secret_when_formatted_then_value_is_redacted() {
    // GIVEN: A password
    let secret = RedactedSecret::new("hunter2");

    // WHEN: Formatting both ways
    let debug = format!("{secret:?}");
    let display = format!("{secret}");

    // THEN: Neither contains the value
    assert!(!debug.contains("hunter2"));
    assert!(!display.contains("hunter2"));
    assert_eq!(secret.expose(), "hunter2");
    assert_eq!(secret.len(), 7);
}

/// **VALUE**: Verifies that serialization is refused.
///
/// **WHY THIS MATTERS**: Persisting a struct holding a secret via serde must fail loudly
/// rather than silently writing the token.
///
/// **BUG THIS CATCHES**: Would catch someone deriving Serialize on the wrapper.
#[test]
fn given_secret_when_serialized_then_returns_error() {
    let secret = RedactedSecret::from("token-value");

    let result = serde_json::to_string(&secret);

    assert!(result.is_err());
    assert!(result.unwrap_err().to_string().contains("cannot be serialized"));
}
