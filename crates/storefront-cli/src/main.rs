mod checkout;
mod orders;
mod render;
mod shop;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use storefront_app::SessionSettings;
use storefront_client::StorefrontClient;
use storefront_core::OrderStatus;

#[derive(Debug, Parser)]
#[command(name = "storefront")]
#[command(about = "Storefront catalog, cart and order dashboard")]
struct Cli {
    /// Override the API origin (defaults to `STOREFRONT_API_BASE_URL`).
    #[arg(long, global = true, env = "STOREFRONT_API_BASE_URL")]
    api: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Interactive session: browse, fill a cart, check out, manage orders.
    Shop,
    /// List the product catalog.
    Products,
    /// Show order stats and the order table.
    Orders {
        /// Keep polling and reprint on every refresh until Ctrl-C.
        #[arg(long)]
        watch: bool,
    },
    /// Show one order in detail.
    Order {
        /// Full order id or the six-character reference from `orders`.
        id: String,
    },
    /// Change an order's status, then show the refreshed stats.
    SetStatus {
        id: String,
        #[arg(value_parser = parse_status)]
        status: OrderStatus,
    },
    /// Place an order without the interactive session.
    Checkout {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        /// Product to buy, as `ID` or `ID:QTY`. Repeat for several products.
        #[arg(long = "item", required = true)]
        items: Vec<String>,
    },
}

fn parse_status(raw: &str) -> Result<OrderStatus, String> {
    raw.parse::<OrderStatus>().map_err(|e| e.to_string())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Loaded before parsing so `.env` values reach clap's `env` fallbacks.
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let mut config = storefront_core::load_app_config_from_env()?;
    if let Some(api) = &cli.api {
        config.api_base_url = api.trim_end_matches('/').to_string();
    }

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!(api = %config.api_base_url, env = %config.env, "starting storefront");
    let client = StorefrontClient::from_config(&config)?;
    let settings = SessionSettings::from(&config);

    match cli.command.unwrap_or(Commands::Shop) {
        Commands::Shop => shop::run_shop(client, settings).await?,
        Commands::Products => {
            let products = client.list_products().await?;
            println!("{}", render::render_catalog(&products));
        }
        Commands::Orders { watch: false } => orders::run_orders_once(client).await?,
        Commands::Orders { watch: true } => orders::run_orders_watch(client, settings).await?,
        Commands::Order { id } => orders::run_order_detail(client, &id).await?,
        Commands::SetStatus { id, status } => {
            orders::run_set_status(client, &id, status).await?;
        }
        Commands::Checkout { name, email, items } => {
            checkout::run_checkout(client, settings, &name, &email, &items).await?;
        }
    }

    Ok(())
}
