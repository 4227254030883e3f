use crate::Session;

/// **VALUE**: Verifies the default session is the unresolved loading state.
///
/// **WHY THIS MATTERS**: Guards must show a placeholder until stored credentials are
/// checked; defaulting to anonymous would flash a redirect to login on startup.
///
/// **BUG THIS CATCHES**: Would catch `Default` being derived (all false).
#[test]
fn given_default_session_when_created_then_is_loading_and_unauthenticated() {
    let session = Session::default();

    assert!(session.loading);
    assert!(!session.is_authenticated);
    assert!(!session.is_resolved());
}

#[test]
fn given_authenticated_session_when_created_then_is_resolved_with_username() {
    let session = Session::authenticated("alice");

    assert!(session.is_resolved());
    assert!(session.is_authenticated);
    assert_eq!(session.username.as_deref(), Some("alice"));
    assert!(!Session::anonymous().is_authenticated);
}
