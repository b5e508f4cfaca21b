//! Paramount Credit Pathway CLI - operator tools.
//!
//! # Usage
//!
//! ```bash
//! # Sign in (shared with the dashboard through PATHWAY_DATA_DIR/state.json)
//! pathway-cli login -e ops@pathway.test -r superadmin
//!
//! # Show who is signed in
//! pathway-cli whoami
//!
//! # Browse the user table
//! pathway-cli users --tier Pro --sort last_activity --page 1
//!
//! # Export a table as CSV
//! pathway-cli export tickets --range last_30_days --out ./exports
//! ```
//!
//! # Commands
//!
//! - `login`, `logout`, `whoami`, `profile` - Session management
//! - `theme` - Show, set or toggle the colour theme
//! - `users` - Filtered, paginated user table (superadmin only)
//! - `export` - CSV export of users, journeys or tickets

#![cfg_attr(not(test), forbid(unsafe_code))]
// Table rows and identities are the command output
#![allow(clippy::print_stdout)]

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use pathway_admin::config::AdminConfig;
use pathway_admin::services::AuthSession;
use pathway_core::{DateRange, Role};

mod commands;

use commands::CliError;
use commands::export::ExportTarget;
use commands::users::UserQuery;

#[derive(Parser)]
#[command(name = "pathway-cli")]
#[command(author, version, about = "Paramount Credit Pathway operator tools")]
struct Cli {
    /// Directory holding state.json (defaults to `PATHWAY_DATA_DIR`)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in with an email and role
    Login {
        /// Operator email address
        #[arg(short, long)]
        email: String,

        /// Role (`superadmin` or `support`)
        #[arg(short, long, default_value = "superadmin")]
        role: Role,
    },
    /// Sign out
    Logout,
    /// Show the signed-in identity
    Whoami,
    /// Change the signed-in email
    Profile {
        #[arg(short, long)]
        email: String,
    },
    /// Show the theme, or set it to `light`, `dark` or `toggle`
    Theme { change: Option<String> },
    /// List the user table
    Users {
        #[arg(long)]
        search: Option<String>,
        #[arg(long)]
        tier: Option<String>,
        #[arg(long)]
        status: Option<String>,
        /// `date_joined` or `last_activity`
        #[arg(long)]
        sort: Option<String>,
        #[arg(long)]
        page: Option<usize>,
    },
    /// Export a table as CSV
    Export {
        #[arg(value_enum)]
        target: ExportTarget,

        /// Reporting range used in the file name
        #[arg(long)]
        range: Option<DateRange>,

        /// Output directory
        #[arg(long, default_value = ".")]
        out: PathBuf,
    },
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let dir = commands::data_dir(cli.data_dir)?;
    let store = commands::open_store(&dir);

    match cli.command {
        Commands::Login { email, role } => {
            commands::session::login(store, &email, role).await?;
        }
        Commands::Logout => commands::session::logout(store),
        Commands::Whoami => match commands::session::whoami(store) {
            Some(identity) => println!("{} ({})", identity.email, identity.role),
            None => println!("Not signed in"),
        },
        Commands::Profile { email } => {
            let identity = commands::session::profile(store, &email)?;
            println!("{} ({})", identity.email, identity.role);
        }
        Commands::Theme { change } => {
            let theme = commands::session::theme(store, change.as_deref())?;
            println!("{theme}");
        }
        Commands::Users {
            search,
            tier,
            status,
            sort,
            page,
        } => {
            let page_size = AdminConfig::from_env()?.page_sizes.users;
            let session = AuthSession::restore(store);
            let options = UserQuery {
                search,
                tier,
                status,
                sort,
                page,
            };
            let table = commands::users::list(&session, &options, page_size)?;
            print!("{}", commands::users::render(&table));
        }
        Commands::Export { target, range, out } => {
            let session = AuthSession::restore(store);
            let path = commands::export::run(&session, target, range, &out)?;
            println!("{}", path.display());
        }
    }
    Ok(())
}
