use clap::{Parser, Subcommand};
use signalform::cmd::{self, ApplyArgs, DeleteArgs, GetArgs};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Directory holding `app.yaml`, `muting_rules.yaml` and `state.json`.
    #[arg(long, global = true)]
    config_dir: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Creates, updates and deletes muting rules to match the configuration.
    Apply(ApplyArgs),
    /// Shows what `apply` would change without changing anything.
    Plan(ApplyArgs),
    /// Refreshes and prints one managed muting rule.
    Get(GetArgs),
    /// Deletes one managed muting rule.
    Delete(DeleteArgs),
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing subscriber
    let subscriber =
        FmtSubscriber::builder().with_env_filter(EnvFilter::from_default_env()).finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    let cli = Cli::parse();
    let config_dir = cli.config_dir.as_deref();

    match cli.command {
        Commands::Apply(args) => cmd::apply::execute(args, config_dir, false).await?,
        Commands::Plan(args) => cmd::apply::execute(args, config_dir, true).await?,
        Commands::Get(args) => cmd::get::execute(args, config_dir).await?,
        Commands::Delete(args) => cmd::delete::execute(args, config_dir).await?,
    }

    Ok(())
}
