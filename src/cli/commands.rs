use clap::Subcommand;

#[derive(Subcommand)]
pub enum DbCommands {
    /// Insert the sample users, catalog, greenhouses and user plant
    Populate {
        /// Data directory for the local and remote databases
        #[arg(long, default_value = "./data")]
        data_dir: String,

        /// Remove already written records if a later write fails
        #[arg(long)]
        rollback_on_failure: bool,
    },

    /// Delete every seeded collection
    Clear {
        /// Data directory for the local and remote databases
        #[arg(long, default_value = "./data")]
        data_dir: String,
    },
}

#[derive(Subcommand)]
pub enum SessionCommands {
    /// Log in as a registered user
    Login {
        /// Data directory for the local and remote databases
        #[arg(long, default_value = "./data")]
        data_dir: String,

        /// Email of the user
        #[arg(long)]
        email: String,

        /// Password (prompted for when omitted)
        #[arg(long)]
        password: Option<String>,

        /// Skip interactive prompts
        #[arg(long)]
        non_interactive: bool,
    },

    /// Log out of the current session
    Logout {
        /// Data directory for the local and remote databases
        #[arg(long, default_value = "./data")]
        data_dir: String,
    },

    /// Show the current session
    Show {
        /// Data directory for the local and remote databases
        #[arg(long, default_value = "./data")]
        data_dir: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Change the name or email of the current session
    Update {
        /// Data directory for the local and remote databases
        #[arg(long, default_value = "./data")]
        data_dir: String,

        /// New display name
        #[arg(long)]
        name: Option<String>,

        /// New email
        #[arg(long)]
        email: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum ThemeCommands {
    /// Show the active theme and its colors
    Show {
        /// Data directory for the local and remote databases
        #[arg(long, default_value = "./data")]
        data_dir: String,
    },

    /// Switch between light and dark
    Toggle {
        /// Data directory for the local and remote databases
        #[arg(long, default_value = "./data")]
        data_dir: String,
    },
}
