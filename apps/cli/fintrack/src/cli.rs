use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use uuid::Uuid;

#[derive(Debug, Parser)]
#[command(name = "fintrack")]
#[command(about = "Personal finance transaction manager")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[arg(long, short, global = true, help = "Log debug output to stderr")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Config directory (default: platform config dir)")]
    pub config_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    #[command(about = "Sign in and remember the session")]
    Login {
        username: String,
        #[arg(long, help = "Password (prompted for if omitted)")]
        password: Option<String>,
    },

    #[command(about = "Create an account and sign in")]
    Register {
        username: String,
        email: String,
        #[arg(long, help = "Password (prompted for if omitted)")]
        password: Option<String>,
    },

    #[command(about = "Sign out and forget the stored session")]
    Logout,

    #[command(about = "Show who is signed in and where the API is")]
    Status,

    #[command(about = "List one page of transactions")]
    List(ListArgs),

    #[command(about = "Show a single transaction")]
    Show { id: Uuid },

    #[command(about = "Record a new transaction")]
    Create(TransactionArgs),

    #[command(about = "Edit a transaction; omitted fields keep their value")]
    Update {
        id: Uuid,
        #[command(flatten)]
        fields: UpdateArgs,
    },

    #[command(about = "Delete a transaction and show the refreshed page")]
    Delete {
        id: Uuid,
        #[arg(long, short, help = "Skip the confirmation prompt")]
        yes: bool,
        #[command(flatten)]
        list: ListArgs,
    },

    #[command(about = "Page through transactions interactively")]
    Browse(ListArgs),
}

#[derive(Debug, Clone, Args)]
pub struct ListArgs {
    #[arg(long, default_value_t = 1, help = "Page number (1-based)")]
    pub page: u32,

    #[arg(long, help = "Rows per page (default from config)")]
    pub size: Option<u32>,

    #[arg(long, short, help = "Filter by text")]
    pub search: Option<String>,
}

impl Default for ListArgs {
    fn default() -> Self {
        Self {
            page: 1,
            size: None,
            search: None,
        }
    }
}

#[derive(Debug, Clone, Args)]
pub struct TransactionArgs {
    #[arg(long, allow_negative_numbers = true)]
    pub amount: f64,

    #[arg(long)]
    pub category: String,

    #[arg(long, default_value = "")]
    pub description: String,

    #[arg(long, help = "Mark as income instead of expense")]
    pub income: bool,

    #[arg(long, help = "YYYY-MM-DD (default: today)")]
    pub date: Option<String>,
}

#[derive(Debug, Clone, Default, Args)]
pub struct UpdateArgs {
    #[arg(long, allow_negative_numbers = true)]
    pub amount: Option<f64>,

    #[arg(long)]
    pub category: Option<String>,

    #[arg(long)]
    pub description: Option<String>,

    #[arg(long, help = "true for income, false for expense")]
    pub income: Option<bool>,

    #[arg(long, help = "YYYY-MM-DD")]
    pub date: Option<String>,
}
