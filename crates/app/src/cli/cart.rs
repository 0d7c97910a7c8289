use std::time::Duration;

use benabazar::{
    cities::City,
    pricing::{checkout_totals, format_iqd},
};
use clap::{Args, Subcommand};
use tracing::warn;

use benabazar_app::{
    config::{BackendArgs, SessionArgs},
    context::AppContext,
    session::CartSession,
    storage::JsonFileStorage,
};

#[derive(Debug, Args)]
pub(crate) struct CartCommand {
    #[command(subcommand)]
    command: CartSubcommand,
}

#[derive(Debug, Subcommand)]
enum CartSubcommand {
    /// Show the locally saved cart, priced for a destination city
    Show(ShowCartArgs),
}

#[derive(Debug, Args)]
pub(crate) struct ShowCartArgs {
    #[command(flatten)]
    backend: BackendArgs,

    #[command(flatten)]
    session: SessionArgs,

    /// Destination city for the delivery-fee quote
    #[arg(long, default_value = "Erbil")]
    city: City,
}

pub(crate) async fn run(command: CartCommand) -> Result<(), String> {
    match command.command {
        CartSubcommand::Show(args) => show_cart(args).await,
    }
}

async fn show_cart(args: ShowCartArgs) -> Result<(), String> {
    let context = AppContext::from_backend(args.backend.into());

    let feed = context.spawn_rate_feed(args.session.rate_refresh_interval());
    let mut handle = feed.handle();

    // Give the first fetch a moment; fall back to whatever the handle
    // holds (the default) if the backend is slow or down.
    let first = tokio::time::timeout(Duration::from_secs(5), handle.changed()).await;
    if !matches!(first, Ok(Ok(()))) {
        warn!("could not fetch the exchange rate; using {}", handle.current());
    }

    let rate = handle.current();

    let session = CartSession::restore(Box::new(JsonFileStorage::new(args.session.cart_path)));

    if session.cart().is_empty() {
        println!("the cart is empty");
        return Ok(());
    }

    for line in session.cart() {
        println!(
            "{}  {} x{} @ ${}",
            line.product_id, line.name, line.quantity, line.unit_price
        );
    }

    let totals = checkout_totals(session.cart(), args.city, rate);

    println!();
    println!("subtotal: ${}", totals.subtotal_usd);
    println!("exchange rate: {rate}");
    println!("delivery to {}: {} IQD", args.city, totals.delivery_fee_iqd);
    println!("total: {} IQD", format_iqd(totals.grand_total_iqd));

    feed.shutdown();

    Ok(())
}
