use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use estufa::cli::{
    DbCommands, SessionCommands, ThemeCommands, run_db_clear, run_db_populate, run_plants,
    run_session_login, run_session_logout, run_session_show, run_session_update, run_theme_show,
    run_theme_toggle, run_water,
};

#[derive(Parser)]
#[command(name = "estufa")]
#[command(about = "Greenhouse and plant care data manager", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Seed or clear the remote database
    Db {
        #[command(subcommand)]
        command: DbCommands,
    },

    /// Manage the logged-in session
    Session {
        #[command(subcommand)]
        command: SessionCommands,
    },

    /// Show or switch the color theme
    Theme {
        #[command(subcommand)]
        command: ThemeCommands,
    },

    /// List the plant catalog and the current user's plants
    Plants {
        /// Data directory for the local and remote databases
        #[arg(long, default_value = "./data")]
        data_dir: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Mark one of your plants as watered now
    Water {
        /// Data directory for the local and remote databases
        #[arg(long, default_value = "./data")]
        data_dir: String,

        /// Key of the plant in plantas_usuario
        #[arg(long)]
        plant_id: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("estufa=info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Db { command } => match command {
            DbCommands::Populate {
                data_dir,
                rollback_on_failure,
            } => run_db_populate(&data_dir, rollback_on_failure)?,
            DbCommands::Clear { data_dir } => run_db_clear(&data_dir)?,
        },
        Commands::Session { command } => match command {
            SessionCommands::Login {
                data_dir,
                email,
                password,
                non_interactive,
            } => run_session_login(&data_dir, email, password, non_interactive)?,
            SessionCommands::Logout { data_dir } => run_session_logout(&data_dir)?,
            SessionCommands::Show { data_dir, json } => run_session_show(&data_dir, json)?,
            SessionCommands::Update {
                data_dir,
                name,
                email,
            } => run_session_update(&data_dir, name, email)?,
        },
        Commands::Theme { command } => match command {
            ThemeCommands::Show { data_dir } => run_theme_show(&data_dir)?,
            ThemeCommands::Toggle { data_dir } => run_theme_toggle(&data_dir)?,
        },
        Commands::Plants { data_dir, json } => run_plants(&data_dir, json).await?,
        Commands::Water { data_dir, plant_id } => run_water(&data_dir, &plant_id)?,
    }

    Ok(())
}
