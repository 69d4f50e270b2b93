//! A shopping session: the catalog, the cart, checkout and the admin
//! dashboard, with a router selecting which one is on screen.
//!
//! The session owns all mutable state. Switching views is a local change;
//! the only side effect is mounting the dashboard when `admin` is entered and
//! tearing it down when it is left.

use std::str::FromStr;
use std::time::Duration;

use storefront_client::StorefrontClient;
use storefront_core::{AppConfig, Cart, Product};

use crate::catalog::Catalog;
use crate::checkout::CheckoutFlow;
use crate::dashboard::Dashboard;
use crate::error::CheckoutError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Shop,
    Cart,
    Admin,
}

impl View {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            View::Shop => "shop",
            View::Cart => "cart",
            View::Admin => "admin",
        }
    }
}

impl std::fmt::Display for View {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for View {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "shop" => Ok(View::Shop),
            "cart" => Ok(View::Cart),
            "admin" => Ok(View::Admin),
            other => Err(format!("unknown view '{other}'")),
        }
    }
}

/// Timing knobs for a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSettings {
    pub poll_interval: Duration,
    pub confirmation_ttl: Duration,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(5),
            confirmation_ttl: Duration::from_secs(3),
        }
    }
}

impl From<&AppConfig> for SessionSettings {
    fn from(config: &AppConfig) -> Self {
        Self {
            poll_interval: config.poll_interval,
            confirmation_ttl: config.confirmation_ttl,
        }
    }
}

#[derive(Debug)]
pub struct Session {
    client: StorefrontClient,
    view: View,
    catalog: Catalog,
    cart: Cart,
    checkout: CheckoutFlow,
    dashboard: Dashboard,
}

impl Session {
    /// Starts a session on the `shop` view, fetching the catalog first.
    pub async fn start(client: StorefrontClient, settings: SessionSettings) -> Self {
        let catalog = Catalog::load(&client).await;
        Self::with_catalog(client, catalog, settings)
    }

    #[must_use]
    pub fn with_catalog(
        client: StorefrontClient,
        catalog: Catalog,
        settings: SessionSettings,
    ) -> Self {
        let dashboard = Dashboard::new(client.clone(), settings.poll_interval);
        Self {
            client,
            view: View::Shop,
            catalog,
            cart: Cart::new(),
            checkout: CheckoutFlow::new(settings.confirmation_ttl),
            dashboard,
        }
    }

    #[must_use]
    pub fn view(&self) -> View {
        self.view
    }

    /// Switches views, mounting or tearing down the dashboard as needed.
    pub async fn navigate(&mut self, view: View) {
        if view == self.view {
            return;
        }
        if self.view == View::Admin {
            self.dashboard.unmount().await;
        }
        if view == View::Admin {
            self.dashboard.mount();
        }
        tracing::debug!(from = %self.view, to = %view, "navigate");
        self.view = view;
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[must_use]
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn cart_mut(&mut self) -> &mut Cart {
        &mut self.cart
    }

    #[must_use]
    pub fn checkout(&self) -> &CheckoutFlow {
        &self.checkout
    }

    pub fn checkout_mut(&mut self) -> &mut CheckoutFlow {
        &mut self.checkout
    }

    #[must_use]
    pub fn dashboard(&self) -> &Dashboard {
        &self.dashboard
    }

    pub fn dashboard_mut(&mut self) -> &mut Dashboard {
        &mut self.dashboard
    }

    /// Adds one unit of the catalog product with the given id.
    ///
    /// Returns the product, or `None` if the id is not in the catalog.
    pub fn add_to_cart(&mut self, raw_id: &str) -> Option<&Product> {
        let product = self.catalog.find(raw_id)?;
        self.cart.add(product);
        Some(product)
    }

    /// Removes the cart line whose product id matches `raw_id`.
    pub fn remove_from_cart(&mut self, raw_id: &str) -> bool {
        let Some(id) = self.cart_line_id(raw_id) else {
            return false;
        };
        self.cart.remove(&id)
    }

    /// Sets a line's quantity from user input.
    ///
    /// Only the leading integer of the input is used, so `"2.5"` sets 2.
    /// Input with no leading digits counts as zero, which removes the line.
    /// Returns `false` if no cart line matches `raw_id`.
    pub fn set_quantity(&mut self, raw_id: &str, raw_quantity: &str) -> bool {
        let Some(id) = self.cart_line_id(raw_id) else {
            return false;
        };
        let quantity = leading_integer(raw_quantity).unwrap_or(0);
        self.cart.set_quantity(&id, quantity);
        true
    }

    /// Submits the cart through the checkout flow.
    ///
    /// # Errors
    ///
    /// See [`CheckoutFlow::submit`].
    pub async fn place_order(&mut self) -> Result<String, CheckoutError> {
        self.checkout.submit(&mut self.cart, &self.client).await
    }

    /// Tears down anything still running.
    pub async fn close(&mut self) {
        self.dashboard.unmount().await;
    }

    fn cart_line_id(&self, raw_id: &str) -> Option<storefront_core::ProductId> {
        self.cart
            .lines()
            .find(|line| line.product.id.matches(raw_id))
            .map(|line| line.product.id.clone())
    }
}

/// Parses an optional sign followed by the leading run of ASCII digits,
/// ignoring whatever follows. Values too large for `i64` saturate.
fn leading_integer(raw: &str) -> Option<i64> {
    let raw = raw.trim_start();
    let (negative, rest) = match raw.as_bytes().first() {
        Some(b'-') => (true, &raw[1..]),
        Some(b'+') => (false, &raw[1..]),
        _ => (false, raw),
    };
    let digits_end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    let digits = &rest[..digits_end];
    if digits.is_empty() {
        return None;
    }
    let magnitude = digits.parse::<i64>().unwrap_or(i64::MAX);
    Some(if negative { -magnitude } else { magnitude })
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
