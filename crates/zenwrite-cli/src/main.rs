use clap::{CommandFactory, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "zenwrite", version, about = "ZenWrite: focused writing with a Pomodoro timer")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive writing session with a live timer
    Session(commands::session::SessionArgs),
    /// One-shot writing assistant tools
    Assist {
        #[command(subcommand)]
        action: commands::assist::AssistAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// List the badge catalog
    Badges {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the XP level table
    Levels {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Generate shell completions
    Completions {
        shell: clap_complete::Shell,
    },
}

fn init_logging() {
    let filter = EnvFilter::try_from_env("ZENWRITE_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() {
    init_logging();
    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Session(args) => commands::session::run(args),
        Commands::Assist { action } => commands::assist::run(action),
        Commands::Config { action } => commands::config::run(action),
        Commands::Badges { json } => commands::progress::badges(json),
        Commands::Levels { json } => commands::progress::levels(json),
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "zenwrite", &mut std::io::stdout());
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
