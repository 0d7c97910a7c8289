use std::time::Duration;

use benabazar::{orders::OrderStatus, pricing::format_iqd};
use clap::{Args, Subcommand};

use benabazar_app::{
    config::BackendArgs,
    context::AppContext,
    domain::orders::{OrderRecord, OrderScope},
};

#[derive(Debug, Args)]
pub(crate) struct OrdersCommand {
    #[command(subcommand)]
    command: OrdersSubcommand,
}

#[derive(Debug, Subcommand)]
enum OrdersSubcommand {
    /// List orders, newest first
    List(ListOrdersArgs),

    /// Follow the order list, reprinting it whenever it changes
    Watch(WatchOrdersArgs),

    /// Move an order to a new lifecycle state
    SetStatus(SetStatusArgs),

    /// Permanently delete an order
    Delete(DeleteOrderArgs),
}

#[derive(Debug, Args)]
pub(crate) struct ListOrdersArgs {
    #[command(flatten)]
    backend: BackendArgs,

    /// Only orders placed under this email; omit for all orders
    #[arg(long)]
    email: Option<String>,
}

#[derive(Debug, Args)]
pub(crate) struct WatchOrdersArgs {
    #[command(flatten)]
    backend: BackendArgs,

    /// Only orders placed under this email; omit for all orders
    #[arg(long)]
    email: Option<String>,

    /// Refresh interval in seconds
    #[arg(long, default_value_t = 30)]
    refresh_seconds: u64,
}

#[derive(Debug, Args)]
pub(crate) struct SetStatusArgs {
    #[command(flatten)]
    backend: BackendArgs,

    /// Order id
    #[arg(long)]
    id: i64,

    /// New status (pending, confirmed, preparing, shipped, delivered, cancelled)
    #[arg(long)]
    status: OrderStatus,
}

#[derive(Debug, Args)]
pub(crate) struct DeleteOrderArgs {
    #[command(flatten)]
    backend: BackendArgs,

    /// Order id
    #[arg(long)]
    id: i64,
}

pub(crate) async fn run(command: OrdersCommand) -> Result<(), String> {
    match command.command {
        OrdersSubcommand::List(args) => list_orders(args).await,
        OrdersSubcommand::Watch(args) => watch_orders(args).await,
        OrdersSubcommand::SetStatus(args) => set_status(args).await,
        OrdersSubcommand::Delete(args) => delete_order(args).await,
    }
}

async fn list_orders(args: ListOrdersArgs) -> Result<(), String> {
    let context = AppContext::from_backend(args.backend.into());

    let scope = args.email.map_or(OrderScope::All, OrderScope::Submitter);

    let orders = context
        .orders
        .list_orders(scope)
        .await
        .map_err(|error| format!("failed to list orders: {error}"))?;

    if orders.is_empty() {
        println!("no orders found");
        return Ok(());
    }

    for order in orders {
        print_order(&order);
    }

    Ok(())
}

async fn watch_orders(args: WatchOrdersArgs) -> Result<(), String> {
    let context = AppContext::from_backend(args.backend.into());

    let scope = args.email.map_or(OrderScope::All, OrderScope::Submitter);
    let feed = context.spawn_orders_feed(scope, Duration::from_secs(args.refresh_seconds));
    let mut handle = feed.handle();

    loop {
        handle
            .changed()
            .await
            .map_err(|error| format!("orders feed stopped: {error}"))?;

        let orders = handle.current();

        if orders.is_empty() {
            println!("no orders found");
        } else {
            for order in &orders {
                print_order(order);
            }
        }
    }
}

fn print_order(order: &OrderRecord) {
    println!("order #{} [{}]", order.id, order.status);
    println!("  placed: {}", order.created_at);
    println!("  customer: {} ({})", order.customer_name, order.phone);
    println!("  deliver to: {}, {}", order.city, order.address);
    println!("  submitted by: {}", order.user_email.as_str());

    for item in &order.items {
        println!("    {} x{} @ ${}", item.name, item.quantity, item.unit_price);
    }

    println!(
        "  total: {} IQD (delivery {} IQD)",
        format_iqd(order.total_price),
        format_iqd(order.delivery_price.into())
    );
    println!();
}

async fn set_status(args: SetStatusArgs) -> Result<(), String> {
    let context = AppContext::from_backend(args.backend.into());

    context
        .orders
        .update_status(args.id, args.status)
        .await
        .map_err(|error| format!("failed to update order status: {error}"))?;

    println!("order {} moved to {}", args.id, args.status);

    Ok(())
}

async fn delete_order(args: DeleteOrderArgs) -> Result<(), String> {
    let context = AppContext::from_backend(args.backend.into());

    context
        .orders
        .delete_order(args.id)
        .await
        .map_err(|error| format!("failed to delete order: {error}"))?;

    println!("order {} deleted", args.id);

    Ok(())
}
