pub mod app_config;
pub mod cart;
pub mod config;
pub mod money;
pub mod orders;
pub mod products;

pub use app_config::{AppConfig, Environment};
pub use cart::{Cart, CartLine};
pub use config::load_app_config_from_env;
pub use money::format_money;
pub use orders::{
    CheckoutReceipt, Order, OrderItem, OrderRequest, OrderStats, OrderStatus,
    ParseOrderStatusError, StatusUpdate,
};
pub use products::{Product, ProductId};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
