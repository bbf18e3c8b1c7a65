use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "jotz")]
#[command(version)]
#[command(about = "A personal journal for the command line", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Verbose output (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Sign in anonymously (provisions a local identity)
    Signin,

    /// Sign out and forget the local identity
    Signout,

    /// Print the current user id
    Whoami,

    /// Create a new entry
    #[command(alias = "n")]
    Create {
        /// Title of the entry
        title: String,

        /// Body of the entry
        #[arg(required = false)]
        content: Option<String>,

        /// Entry color as a hex code (defaults to the first palette color)
        #[arg(long)]
        color: Option<String>,
    },

    /// List entries, most recently updated first
    #[command(alias = "ls")]
    List,

    /// View one entry in full
    #[command(alias = "v")]
    View {
        /// Index of the entry as shown by `list`
        index: usize,
    },

    /// Edit an entry's title, content or color
    #[command(alias = "e")]
    Edit {
        /// Index of the entry as shown by `list`
        index: usize,

        /// New title
        #[arg(long)]
        title: Option<String>,

        /// New body
        #[arg(long)]
        content: Option<String>,

        /// New color as a hex code
        #[arg(long)]
        color: Option<String>,
    },

    /// Delete an entry
    #[command(alias = "rm")]
    Delete {
        /// Index of the entry as shown by `list`
        index: usize,
    },

    /// Get or set configuration
    Config {
        /// Configuration key (backend, remote-url)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },
}
