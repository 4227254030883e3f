use crate::auth::SessionContext;

use models::Session;

/// **VALUE**: Verifies the session starts unresolved.
///
/// **WHY THIS MATTERS**: Protected screens must not redirect to login before the
/// stored token has been checked.
#[test]
fn given_new_context_when_read_then_loading() {
    let context = SessionContext::new();

    assert_eq!(context.current(), Session::loading());
    assert!(!context.current().is_resolved());
}

/// **VALUE**: Verifies clones observe the same state and subscribers see changes.
///
/// **BUG THIS CATCHES**: Would catch a clone that copies the state instead of
/// sharing it, leaving the guard with a stale session after login.
#[tokio::test]
async fn given_subscriber_when_signed_in_through_clone_then_change_observed() {
    let context = SessionContext::new();
    let clone = context.clone();
    let mut receiver = context.subscribe();

    clone.sign_in("alice");

    receiver.changed().await.unwrap();
    assert_eq!(*receiver.borrow(), Session::authenticated("alice"));
    assert_eq!(context.current().username.as_deref(), Some("alice"));
}

/// **VALUE**: Verifies resolve and sign out end in definite states.
#[test]
fn given_context_when_resolved_and_signed_out_then_states_match() {
    let context = SessionContext::default();

    context.resolve(None);
    assert_eq!(context.current(), Session::anonymous());

    context.resolve(Some(String::from("bob")));
    assert!(context.current().is_authenticated);

    context.sign_out();
    let session = context.current();
    assert!(!session.is_authenticated);
    assert!(!session.loading);
    assert_eq!(session.username, None);
}
