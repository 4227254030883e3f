use crate::app::App;
use crate::error::FintrackError;
use crate::output::Report;
use crate::prompt::Prompt;

use client_core::screens;

use common::RedactedSecret;
use models::{Credentials, Registration};

use log::info;
use serde_json::json;
use tokio::io::AsyncBufRead;

async fn password_or_prompt<R: AsyncBufRead + Unpin>(
    password: Option<String>,
    prompt: &mut Prompt<R>,
) -> Result<RedactedSecret, FintrackError> {
    match password {
        Some(password) => Ok(RedactedSecret::new(password)),
        None => prompt.secret("Password: ").await,
    }
}

pub async fn login<R: AsyncBufRead + Unpin>(
    app: &mut App,
    username: String,
    password: Option<String>,
    prompt: &mut Prompt<R>,
) -> Result<Report, FintrackError> {
    let password = password_or_prompt(password, prompt).await?;
    let credentials = Credentials::new(username, password)?;

    let (auth, notifier, history) = app.auth_and_history();
    screens::submit_login(auth, &credentials, notifier, history).await?;

    info!("Signed in as {}", credentials.username());
    Ok(Report::new(
        format!("Signed in as {}", credentials.username()),
        json!({ "username": credentials.username() }),
    ))
}

pub async fn register<R: AsyncBufRead + Unpin>(
    app: &mut App,
    username: String,
    email: String,
    password: Option<String>,
    prompt: &mut Prompt<R>,
) -> Result<Report, FintrackError> {
    let password = password_or_prompt(password, prompt).await?;
    let registration = Registration::new(username, email, password)?;

    let (auth, notifier, history) = app.auth_and_history();
    let user = screens::submit_register(auth, &registration, notifier, history).await?;

    Ok(Report::new(
        format!("Registered and signed in as {}", user.username),
        json!({ "id": user.id, "username": user.username, "email": user.email }),
    ))
}

pub fn logout(app: &mut App) -> Result<Report, FintrackError> {
    let (auth, _, history) = app.auth_and_history();
    screens::logout(auth, history)?;

    Ok(Report::new("Signed out", json!({ "signed_in": false })))
}

pub fn status(app: &App) -> Report {
    let session = app.auth().session().current();
    let base_url = app.client().base_url().to_string();

    let text = match &session.username {
        Some(username) if session.is_authenticated => format!("Signed in as {username} at {base_url}"),
        _ => format!("Not signed in ({base_url})"),
    };

    Report::new(
        text,
        json!({
            "signed_in": session.is_authenticated,
            "username": session.username,
            "base_url": base_url,
            "config_dir": app.config_dir().display().to_string(),
            "page_size": app.config().list.page_size,
        }),
    )
}
