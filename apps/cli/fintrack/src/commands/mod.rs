//! One handler per subcommand.

pub mod account;
pub mod browse;
pub mod transactions;

use crate::app::App;
use crate::cli::Commands;
use crate::error::FintrackError;
use crate::output::Report;
use crate::prompt::Prompt;

use std::io::Write;

use tokio::io::AsyncBufRead;

pub async fn dispatch<R, W>(
    app: &mut App,
    command: Commands,
    prompt: &mut Prompt<R>,
    out: &mut W,
) -> Result<Report, FintrackError>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    match command {
        Commands::Login { username, password } => account::login(app, username, password, prompt).await,
        Commands::Register {
            username,
            email,
            password,
        } => account::register(app, username, email, password, prompt).await,
        Commands::Logout => account::logout(app),
        Commands::Status => Ok(account::status(app)),
        Commands::List(args) => transactions::list(app, &args).await,
        Commands::Show { id } => transactions::show(app, id).await,
        Commands::Create(args) => transactions::create(app, args).await,
        Commands::Update { id, fields } => transactions::update(app, id, fields).await,
        Commands::Delete { id, yes, list } => transactions::delete(app, id, yes, &list, prompt).await,
        Commands::Browse(args) => browse::run(app, &args, prompt, out).await,
    }
}
