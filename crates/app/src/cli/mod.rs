use clap::{Parser, Subcommand};

use benabazar_app::logging::{LoggingConfig, init_subscriber};

mod auth;
mod cart;
mod orders;
mod products;
mod rate;

#[derive(Debug, Parser)]
#[command(name = "benabazar", about = "Bena Bazar operator CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(flatten)]
    logging: LoggingConfig,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Products(products::ProductsCommand),
    Orders(orders::OrdersCommand),
    Rate(rate::RateCommand),
    Cart(cart::CartCommand),
    Auth(auth::AuthCommand),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        init_subscriber(&self.logging).map_err(|error| error.to_string())?;

        match self.command {
            Commands::Products(command) => products::run(command).await,
            Commands::Orders(command) => orders::run(command).await,
            Commands::Rate(command) => rate::run(command).await,
            Commands::Cart(command) => cart::run(command).await,
            Commands::Auth(command) => auth::run(command).await,
        }
    }
}
