//! Checkout: turns the cart plus the customer's details into an order.
//!
//! Validation happens before any network call. On success the cart and form
//! are cleared and a [`Confirmation`] is shown for a fixed time. On failure
//! nothing is touched, so the user can simply retry.

use std::time::Duration;

use tokio::time::Instant;

use storefront_client::StorefrontClient;
use storefront_core::{Cart, OrderRequest};

use crate::error::CheckoutError;

/// Customer details typed into the checkout form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckoutForm {
    pub customer_name: String,
    pub customer_email: String,
}

impl CheckoutForm {
    fn is_complete(&self) -> bool {
        !self.customer_name.trim().is_empty() && !self.customer_email.trim().is_empty()
    }

    pub fn clear(&mut self) {
        self.customer_name.clear();
        self.customer_email.clear();
    }
}

/// Transient notice for a placed order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Confirmation {
    order_id: String,
    expires_at: Instant,
}

impl Confirmation {
    #[must_use]
    pub fn new(order_id: String, ttl: Duration) -> Self {
        Self {
            order_id,
            expires_at: Instant::now() + ttl,
        }
    }

    #[must_use]
    pub fn order_id(&self) -> &str {
        &self.order_id
    }

    #[must_use]
    pub fn is_visible_at(&self, now: Instant) -> bool {
        now < self.expires_at
    }

    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.is_visible_at(Instant::now())
    }
}

#[derive(Debug, Clone)]
pub struct CheckoutFlow {
    form: CheckoutForm,
    confirmation: Option<Confirmation>,
    confirmation_ttl: Duration,
}

impl CheckoutFlow {
    #[must_use]
    pub fn new(confirmation_ttl: Duration) -> Self {
        Self {
            form: CheckoutForm::default(),
            confirmation: None,
            confirmation_ttl,
        }
    }

    #[must_use]
    pub fn form(&self) -> &CheckoutForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut CheckoutForm {
        &mut self.form
    }

    /// Validates the form and cart, then submits the order.
    ///
    /// Returns the new order's id. A double submit places two orders; no
    /// idempotency key is used.
    ///
    /// # Errors
    ///
    /// - [`CheckoutError::MissingFields`] / [`CheckoutError::EmptyCart`]
    ///   before any request is sent.
    /// - [`CheckoutError::Rejected`] when the server refuses the order.
    /// - [`CheckoutError::Transport`] when the request fails outright.
    pub async fn submit(
        &mut self,
        cart: &mut Cart,
        client: &StorefrontClient,
    ) -> Result<String, CheckoutError> {
        if !self.form.is_complete() {
            return Err(CheckoutError::MissingFields);
        }
        if cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        let request = OrderRequest::from_cart(
            self.form.customer_name.trim(),
            self.form.customer_email.trim(),
            cart,
        );

        match client.checkout(&request).await {
            Ok(order_id) => {
                cart.clear();
                self.form.clear();
                self.confirmation = Some(Confirmation::new(
                    order_id.clone(),
                    self.confirmation_ttl,
                ));
                Ok(order_id)
            }
            Err(e) => {
                tracing::error!(error = %e, "checkout failed");
                Err(e.into())
            }
        }
    }

    /// The confirmation, if one is still within its display window.
    #[must_use]
    pub fn confirmation(&self) -> Option<&Confirmation> {
        self.confirmation_at(Instant::now())
    }

    #[must_use]
    pub fn confirmation_at(&self, now: Instant) -> Option<&Confirmation> {
        self.confirmation
            .as_ref()
            .filter(|c| c.is_visible_at(now))
    }
}

#[cfg(test)]
#[path = "checkout_test.rs"]
mod tests;
