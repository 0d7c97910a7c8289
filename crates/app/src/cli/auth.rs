use clap::{Args, Subcommand};

use benabazar_app::{config::BackendArgs, context::AppContext};

#[derive(Debug, Args)]
pub(crate) struct AuthCommand {
    #[command(subcommand)]
    command: AuthSubcommand,
}

#[derive(Debug, Subcommand)]
enum AuthSubcommand {
    /// Sign in and report which account the credentials belong to
    Check(CheckArgs),
}

#[derive(Debug, Args)]
pub(crate) struct CheckArgs {
    #[command(flatten)]
    backend: BackendArgs,

    /// Account email
    #[arg(long)]
    email: String,

    /// Account password
    #[arg(long, env = "BENABAZAR_PASSWORD", hide_env_values = true)]
    password: String,
}

pub(crate) async fn run(command: AuthCommand) -> Result<(), String> {
    match command.command {
        AuthSubcommand::Check(args) => check(args).await,
    }
}

async fn check(args: CheckArgs) -> Result<(), String> {
    let context = AppContext::from_backend(args.backend.into());

    let user = context
        .auth
        .sign_in(&args.email, &args.password)
        .await
        .map_err(|error| format!("sign-in failed: {error}"))?;

    if user.is_admin() {
        println!("signed in as {} (order management enabled)", user.email);
    } else {
        println!("signed in as {}", user.email);
    }

    context
        .auth
        .sign_out()
        .await
        .map_err(|error| format!("sign-out failed: {error}"))?;

    Ok(())
}
