//! View state for the storefront: catalog, cart checkout, admin dashboard,
//! and the session that routes between them.
//!
//! Nothing in this crate renders; front ends read the state exposed here and
//! forward user actions to it.

pub mod catalog;
pub mod checkout;
pub mod dashboard;
pub mod error;
pub mod poll;
pub mod session;

pub use catalog::Catalog;
pub use checkout::{CheckoutFlow, CheckoutForm, Confirmation};
pub use dashboard::{Dashboard, OrderBoard};
pub use error::CheckoutError;
pub use poll::PollHandle;
pub use session::{Session, SessionSettings, View};
