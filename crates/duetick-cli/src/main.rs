use clap::{CommandFactory, Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "duetick-cli", version, about = "Duetick CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Current countdown status
    Status {
        /// Print the raw status sample as JSON
        #[arg(long)]
        json: bool,
    },
    /// Mark the recurring task done now
    Done,
    /// Completion history, newest first
    History {
        /// Print raw epoch-millisecond timestamps as JSON
        #[arg(long)]
        json: bool,
        /// Show at most N entries
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Foreground countdown with due-notification delivery
    Watch,
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Generate shell completions
    Completions {
        shell: clap_complete::Shell,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Status { json } => commands::status::run(json),
        Commands::Done => commands::done::run(),
        Commands::History { json, limit } => commands::history::run(json, limit),
        Commands::Watch => commands::watch::run(),
        Commands::Config { action } => commands::config::run(action),
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            clap_complete::generate(shell, &mut cmd, name, &mut std::io::stdout());
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
