use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;

mod commands;

#[derive(Parser)]
#[command(name = "podpost")]
#[command(author, version)]
#[command(
    about = "Publish podcast episodes through the hosting console with a headless browser",
    long_about = "podpost logs in to the podcast hosting console, uploads an episode's audio, \
                  fills in its metadata, optionally schedules a publish date and artwork, \
                  then saves it as a draft, schedules it or publishes it right away."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Upload and publish one episode
    Publish(commands::publish::PublishArgs),

    /// Generate shell completion scripts
    #[command(after_help = "SUPPORTED SHELLS:\n  bash, zsh, fish, powershell, elvish\n\n\
        INSTALLATION:\n  bash:  podpost completion --shell bash >> ~/.bashrc\n  \
        zsh:   podpost completion --shell zsh > ~/.zfunc/_podpost\n  \
        fish:  podpost completion --shell fish > ~/.config/fish/completions/podpost.fish")]
    Completion {
        /// Shell to generate completions for
        #[arg(long, value_enum)]
        shell: Shell,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    match cli.command {
        Commands::Publish(args) => commands::publish::execute(args),
        Commands::Completion { shell } => {
            commands::completion::execute(shell, &mut Cli::command(), &mut std::io::stdout())
        }
    }
}

fn init_logging(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::new("podpost=debug,podpost_core=debug,podpost_workflow=debug,podpost_browser=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new("podpost=info,podpost_workflow=info,podpost_browser=info")
        })
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();
}
