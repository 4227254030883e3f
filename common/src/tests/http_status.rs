use crate::HttpStatusCode;

/// **VALUE**: Verifies status classification used when logging API failures.
///
/// **WHY THIS MATTERS**: A 401 on the list endpoint means the stored token is stale;
/// the CLI hints the user to log in again only for auth rejections.
///
/// **BUG THIS CATCHES**: Would catch off-by-one range checks.
#[test]
fn given_status_codes_when_classified_then_ranges_are_correct() {
    assert!(HttpStatusCode(400).is_client_error());
    assert!(HttpStatusCode(499).is_client_error());
    assert!(!HttpStatusCode(500).is_client_error());
    assert!(HttpStatusCode(503).is_server_error());
    assert!(!HttpStatusCode(600).is_server_error());

    assert!(HttpStatusCode(401).is_auth_rejection());
    assert!(HttpStatusCode(403).is_auth_rejection());
    assert!(!HttpStatusCode(404).is_auth_rejection());
    assert!(HttpStatusCode::from(404).is_not_found());
}
