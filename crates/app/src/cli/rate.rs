use clap::{Args, Subcommand};

use benabazar_app::{config::BackendArgs, context::AppContext};

#[derive(Debug, Args)]
pub(crate) struct RateCommand {
    #[command(subcommand)]
    command: RateSubcommand,
}

#[derive(Debug, Subcommand)]
enum RateSubcommand {
    /// Show the current exchange rate
    Show(ShowRateArgs),
}

#[derive(Debug, Args)]
pub(crate) struct ShowRateArgs {
    #[command(flatten)]
    backend: BackendArgs,
}

pub(crate) async fn run(command: RateCommand) -> Result<(), String> {
    match command.command {
        RateSubcommand::Show(args) => show_rate(args).await,
    }
}

async fn show_rate(args: ShowRateArgs) -> Result<(), String> {
    let context = AppContext::from_backend(args.backend.into());

    let rate = context
        .settings
        .fetch_exchange_rate()
        .await
        .map_err(|error| format!("failed to fetch exchange rate: {error}"))?;

    println!("{rate}");

    Ok(())
}
