use crate::prompt::Prompt;

/// **VALUE**: Confirmation defaults to no.
///
/// **WHY THIS MATTERS**: Delete is irreversible. Anything other than an
/// explicit yes, including just pressing enter or closing stdin, must keep
/// the record.
///
/// **BUG THIS CATCHES**: Would catch a default-yes prompt or a confirmation
/// that treats end of input as consent.
#[tokio::test]
async fn given_various_answers_when_confirming_then_only_yes_accepts() {
    // GIVEN: Scripted answers, then end of input
    let mut prompt = Prompt::new("y\nYES\n\nno\nmaybe\n".as_bytes());

    // WHEN/THEN: Each answer in order
    assert!(prompt.confirm("Delete?").await.unwrap());
    assert!(prompt.confirm("Delete?").await.unwrap());
    assert!(!prompt.confirm("Delete?").await.unwrap());
    assert!(!prompt.confirm("Delete?").await.unwrap());
    assert!(!prompt.confirm("Delete?").await.unwrap());
    assert!(!prompt.confirm("Delete?").await.unwrap(), "End of input must not confirm");
}

#[tokio::test]
async fn given_lines_when_asking_then_returned_without_newline_until_eof() {
    let mut prompt = Prompt::new("next\npage 3\n".as_bytes());

    assert_eq!(prompt.ask("> ").await.unwrap().as_deref(), Some("next"));
    assert_eq!(prompt.ask("> ").await.unwrap().as_deref(), Some("page 3"));
    assert_eq!(prompt.ask("> ").await.unwrap(), None);
}

#[tokio::test]
async fn given_closed_input_when_asking_for_password_then_invalid_input() {
    let mut prompt = Prompt::new("".as_bytes());

    let err = prompt.secret("Password: ").await.unwrap_err();

    assert_eq!(err.user_message(), "Password is required");
}

#[tokio::test]
async fn given_password_line_when_asking_for_secret_then_wrapped() {
    let mut prompt = Prompt::new("hunter2\n".as_bytes());

    let secret = prompt.secret("Password: ").await.unwrap();

    assert_eq!(secret.expose(), "hunter2");
}
