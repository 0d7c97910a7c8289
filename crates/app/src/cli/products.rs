use clap::{Args, Subcommand};

use benabazar_app::{config::BackendArgs, context::AppContext};

#[derive(Debug, Args)]
pub(crate) struct ProductsCommand {
    #[command(subcommand)]
    command: ProductsSubcommand,
}

#[derive(Debug, Subcommand)]
enum ProductsSubcommand {
    /// List the product catalog
    List(ListProductsArgs),
}

#[derive(Debug, Args)]
pub(crate) struct ListProductsArgs {
    #[command(flatten)]
    backend: BackendArgs,
}

pub(crate) async fn run(command: ProductsCommand) -> Result<(), String> {
    match command.command {
        ProductsSubcommand::List(args) => list_products(args).await,
    }
}

async fn list_products(args: ListProductsArgs) -> Result<(), String> {
    let context = AppContext::from_backend(args.backend.into());

    let products = context
        .products
        .list_products()
        .await
        .map_err(|error| format!("failed to list products: {error}"))?;

    if products.is_empty() {
        println!("no products in the catalog");
        return Ok(());
    }

    for product in products {
        println!(
            "{}  {}  ${}  [{}]",
            product.id, product.name, product.unit_price, product.category
        );
    }

    Ok(())
}
