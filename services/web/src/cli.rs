use crate::server;
use crate::talents::{run_talent_listing, TalentListArgs};
use clap::{Args, Parser, Subcommand};
use missionable::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "MissionAble Systems",
    about = "Serve the MissionAble Systems site or query the talent network",
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
    /// Inspect talent profiles with admin credentials
    Talents {
        #[command(subcommand)]
        command: TalentsCommand,
    },
}

#[derive(Subcommand, Debug)]
enum TalentsCommand {
    /// List talent profiles, newest first, with optional dashboard filters
    List(TalentListArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// Serve against an in-process backend instead of the hosted one
    #[arg(long)]
    pub(crate) offline: bool,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Talents {
            command: TalentsCommand::List(args),
        } => run_talent_listing(args).await,
    }
}
