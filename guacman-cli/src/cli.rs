//! CLI argument parsing types using `clap`.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

/// `guacman` command-line interface for Guacamole administration
#[derive(Parser)]
#[command(name = "guacman-cli")]
#[command(author, version, about = "guacman command-line interface")]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Options shared by every command
#[derive(Args, Clone, Default)]
pub struct GlobalArgs {
    /// Path to the configuration directory
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Application root URL of the Guacamole server
    #[arg(long, global = true, env = "GUACMAN_URL")]
    pub url: Option<String>,

    /// Auth token issued by the server
    #[arg(long, global = true, env = "GUACMAN_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Increase output verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

impl std::fmt::Debug for GlobalArgs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GlobalArgs")
            .field("config", &self.config)
            .field("url", &self.url)
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .field("verbose", &self.verbose)
            .field("quiet", &self.quiet)
            .finish()
    }
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Load the admin view and summarize what is visible
    #[command(about = "Show load state of connections, users and protocols")]
    Overview,

    /// Show the connection group tree
    #[command(about = "Show the connection group tree you may update")]
    Tree {
        /// Output format
        #[arg(short, long, default_value = "table", value_enum)]
        format: DocumentFormat,
    },

    /// List users
    #[command(about = "List users you may update")]
    Users {
        /// Output format for the user list
        #[arg(short, long, default_value = "table", value_enum)]
        format: OutputFormat,
    },

    /// List protocols
    #[command(about = "List protocols supported by the server")]
    Protocols {
        /// Output format
        #[arg(short, long, default_value = "table", value_enum)]
        format: DocumentFormat,
    },

    /// Create a user
    #[command(name = "user-add", about = "Create a user with the given username")]
    UserAdd {
        /// Username for the new account
        username: String,
    },

    /// Show the data an edit form would be opened with
    #[command(subcommand)]
    Form(FormCommands),

    /// Generate shell completions
    #[command(about = "Generate shell completion scripts")]
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Generate man page
    #[command(about = "Generate a man page in roff format")]
    Manpage,
}

/// Edit form subcommands
#[derive(Subcommand)]
pub enum FormCommands {
    /// Connection form
    #[command(about = "Show the connection form, for a new connection if no ID is given")]
    Connection {
        /// Connection identifier
        id: Option<String>,
    },

    /// Connection group form
    #[command(about = "Show the connection group form, for a new group if no ID is given")]
    Group {
        /// Connection group identifier
        id: Option<String>,
    },

    /// User form
    #[command(about = "Show the user form for an existing user")]
    User {
        /// Username
        username: String,
    },
}

/// Output format for lists
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum OutputFormat {
    /// Display as formatted table
    Table,
    /// Output as JSON
    Json,
    /// Output as CSV
    Csv,
}

/// Output format for single documents (no CSV)
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum DocumentFormat {
    /// Display as formatted table
    Table,
    /// Output as JSON
    Json,
}
