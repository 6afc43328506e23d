use clap::{Parser, Subcommand};

/// Poll management for an academic faculty: professors create polls,
/// students vote once per poll.
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (directory path) Where the application records are kept. The
    /// directory is created on first use. State persists across runs, the
    /// open session included.
    #[clap(long, value_parser, default_value = "facvote-data")]
    pub data: String,

    /// If passed as an argument, will turn on verbose logging to the standard output.
    #[clap(long, takes_value = false)]
    pub verbose: bool,

    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Create an account. Usernames use letters, digits and underscores;
    /// passwords need 6+ characters with at least one letter and one digit.
    Register {
        #[clap(short, long, value_parser)]
        username: String,
        #[clap(short, long, value_parser)]
        password: String,
        /// 'professor' or 'student'.
        #[clap(short, long, value_parser)]
        role: String,
        #[clap(short, long, value_parser)]
        faculty: String,
    },
    /// Open a session with an existing account.
    Login {
        #[clap(short, long, value_parser)]
        username: String,
        #[clap(short, long, value_parser)]
        password: String,
    },
    /// Close the current session.
    Logout,
    /// Show the screen for the current session.
    Show,
    /// Create a poll for your faculty (professors only).
    CreatePoll {
        #[clap(short, long, value_parser)]
        title: String,
        /// Comma-separated list of options, at least 2 non-empty.
        #[clap(short, long, value_parser)]
        options: String,
        /// (YYYY-MM-DD) Must be strictly after today.
        #[clap(short, long, value_parser)]
        deadline: String,
    },
    /// Vote on a pending poll (students only).
    Vote {
        /// The poll number shown in the pending list.
        #[clap(short, long, value_parser)]
        poll: usize,
        /// The chosen option, exactly as listed.
        #[clap(short, long, value_parser)]
        option: Option<String>,
    },
}
