use crate::demo::{run_demo, run_insights, DemoArgs, InsightsArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use fairway_insights::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Fairway Insights",
    about = "Compute handicap, strokes gained, and insight cards from golf round history",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Summarize a round history CSV export for one or every scoring mode
    Insights(InsightsArgs),
    /// Print insights for a synthetic player history
    Demo(DemoArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Insights(args) => run_insights(args),
        Command::Demo(args) => run_demo(args),
    }
}
