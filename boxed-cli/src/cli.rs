//! Command-line interface

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "boxedup", version, about = "Storage tub inventory with printable QR labels")]
pub struct Cli {
    /// Backend project URL (overrides SUPABASE_URL)
    #[arg(long, global = true)]
    pub url: Option<String>,

    /// Backend anon key (overrides SUPABASE_ANON_KEY)
    #[arg(long, global = true)]
    pub key: Option<String>,

    /// Access token of a signed-in user
    #[arg(long, global = true, env = "BOXEDUP_ACCESS_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    #[command(flatten)]
    pub login: Login,

    /// Directory for label documents and backups
    #[arg(long, global = true)]
    pub output_dir: Option<PathBuf>,

    /// Emit JSON log lines
    #[arg(long, global = true)]
    pub log_json: bool,

    /// Write logs to a daily rolling file in this directory
    #[arg(long, global = true)]
    pub log_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Password sign-in
#[derive(Args, Debug)]
pub struct Login {
    #[arg(id = "login_email", long = "email", global = true, env = "BOXEDUP_EMAIL")]
    pub email: Option<String>,

    #[arg(
        id = "login_password",
        long = "password",
        global = true,
        env = "BOXEDUP_PASSWORD",
        hide_env_values = true
    )]
    pub password: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List containers, newest first
    List {
        /// Filter by name, description or location
        #[arg(short, long)]
        search: Option<String>,
    },
    /// Show a container and its items
    Show { id: String },
    /// Print QR labels
    Print(PrintArgs),
    /// List label formats
    Formats,
    /// List recommended label supplies
    Supplies,
    /// Interpret a spoken command
    Voice {
        #[arg(required = true, num_args = 1..)]
        words: Vec<String>,
    },
    /// Decode the text of a scanned QR code
    Scan { text: String },
    /// Search items across all containers
    Search { term: String },
    /// Tag usage counts
    Tags,
    /// Container and item totals
    Stats,
    /// Create a container
    AddContainer(AddContainerArgs),
    /// Add an item to a container
    AddItem(AddItemArgs),
    /// Delete a container and its items
    DeleteContainer { id: String },
    /// Delete an item
    DeleteItem { id: String },
    /// Export everything to a JSON backup
    Backup {
        /// Output file (defaults to boxedup-backup-<date>.json in the output dir)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Restore a JSON backup
    Restore { file: PathBuf },
    /// Print the OAuth sign-in URL
    LoginUrl {
        #[arg(long, default_value = "google")]
        provider: String,
        #[arg(long, default_value = "http://localhost:3000")]
        origin: String,
    },
    /// Create an account
    SignUp {
        email: String,
        #[arg(long, env = "BOXEDUP_NEW_PASSWORD", hide_env_values = true)]
        new_password: String,
    },
    /// Send a password reset email
    ResetPassword {
        email: String,
        #[arg(long, default_value = "http://localhost:3000")]
        origin: String,
    },
    /// Set a new password for the signed-in user
    SetPassword { password: String },
}

#[derive(Args, Debug)]
pub struct PrintArgs {
    /// Container ids to print
    pub ids: Vec<String>,

    /// Print every container
    #[arg(long, conflicts_with = "ids")]
    pub all: bool,

    /// Label format (single, 22806, 5160, thermal-4x6, thermal-3x2, thermal-2.25x1.25)
    #[arg(short, long, default_value = "single")]
    pub format: String,

    /// Labels per container
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u16).range(1..))]
    pub copies: u16,

    /// Fill a whole sheet (12 or 30 labels) with each container
    #[arg(long, conflicts_with = "copies")]
    pub fill_sheet: bool,

    /// Open the document in the system browser
    #[arg(long)]
    pub open: bool,

    /// Show label supplies before printing
    #[arg(long)]
    pub buy_supplies: bool,
}

#[derive(Args, Debug)]
pub struct AddContainerArgs {
    pub name: String,
    #[arg(short, long, default_value = "")]
    pub description: String,
    #[arg(short, long, default_value = "")]
    pub location: String,
    /// Hex colour, e.g. #8a2be2
    #[arg(short, long)]
    pub color: Option<String>,
    /// Container type (bin, box, bag, crate, ...)
    #[arg(short, long)]
    pub icon: Option<String>,
}

#[derive(Args, Debug)]
pub struct AddItemArgs {
    /// Container id
    pub tub_id: String,
    pub name: String,
    #[arg(short, long, default_value = "")]
    pub description: String,
    /// Tag, repeatable
    #[arg(short, long = "tag")]
    pub tags: Vec<String>,
    /// Expiry date (YYYY-MM-DD)
    #[arg(long)]
    pub expires: Option<chrono::NaiveDate>,
    /// Photo to attach
    #[arg(long)]
    pub image: Option<PathBuf>,
}
