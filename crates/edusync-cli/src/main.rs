use clap::{CommandFactory, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "edusync", version, about = "EduSync CLI")]
struct Cli {
    #[command(flatten)]
    global: commands::GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show tasks ranked by urgency and energy
    Rank(commands::rank::RankArgs),
    /// Show the recommended next task
    Next(commands::rank::NextArgs),
    /// Task counters (total, completed, overdue, urgent)
    Stats,
    /// List distinct course labels
    Courses,
    /// Task management
    Task {
        #[command(subcommand)]
        action: commands::task::TaskAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Print shell completions
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() {
    init_tracing();
    let cli = Cli::parse();
    let global = cli.global;

    let result = match cli.command {
        Commands::Rank(args) => commands::rank::run_rank(&global, args).await,
        Commands::Next(args) => commands::rank::run_next(&global, args).await,
        Commands::Stats => commands::stats::run_stats(&global).await,
        Commands::Courses => commands::stats::run_courses(&global).await,
        Commands::Task { action } => commands::task::run(&global, action).await,
        Commands::Config { action } => commands::config::run(action),
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "edusync", &mut std::io::stdout());
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
