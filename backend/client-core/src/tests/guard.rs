use crate::auth::{Access, SessionGuard};
use crate::router::{NavigationHistory, Route};

use models::Session;

/// **VALUE**: Verifies the three guard decisions.
///
/// **WHY THIS MATTERS**: This is the only thing standing between an anonymous
/// user and the transaction screens.
///
/// **BUG THIS CATCHES**: Would catch redirecting during loading (which bounces
/// signed-in users to login on every start) or granting while anonymous.
#[test]
fn given_each_session_state_when_deciding_then_loading_granted_or_redirected() {
    let guard = SessionGuard::new();

    assert_eq!(guard.decide(&Session::loading(), "props"), Access::Loading);
    assert_eq!(guard.decide(&Session::authenticated("alice"), "props"), Access::Granted("props"));
    assert_eq!(guard.decide(&Session::anonymous(), "props"), Access::Redirected(Route::Login));
}

/// **VALUE**: Verifies a denied visit replaces the history entry with login.
///
/// **BUG THIS CATCHES**: Would catch pushing login on top, so "back" returns to
/// the protected screen and redirects again.
#[test]
fn given_anonymous_when_enforced_then_current_entry_replaced_with_login() {
    let guard = SessionGuard::new();
    let mut history = NavigationHistory::new(Route::Transactions);

    let access = guard.enforce(&Session::anonymous(), Route::Transactions, (), &mut history);

    assert_eq!(access, Access::Redirected(Route::Login));
    assert_eq!(history.entries(), &[Route::Login]);
}

/// **VALUE**: Verifies granted and loading decisions never navigate.
#[test]
fn given_loading_or_signed_in_when_enforced_then_history_untouched() {
    let guard = SessionGuard::new();
    let mut history = NavigationHistory::new(Route::CreateTransaction);

    let loading = guard.enforce(&Session::loading(), Route::CreateTransaction, 1, &mut history);
    let granted = guard.enforce(&Session::authenticated("a"), Route::CreateTransaction, 2, &mut history);

    assert_eq!(loading, Access::Loading);
    assert!(granted.is_granted());
    assert_eq!(history.entries(), &[Route::CreateTransaction]);
}

/// **VALUE**: Verifies a custom login route is honoured.
#[test]
fn given_custom_login_route_when_denied_then_redirects_there() {
    let guard = SessionGuard::with_login_route(Route::Register);

    assert_eq!(guard.decide(&Session::anonymous(), ()), Access::Redirected(Route::Register));
}
