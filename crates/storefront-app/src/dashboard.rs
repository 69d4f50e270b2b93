//! Admin order dashboard.
//!
//! While mounted, the dashboard polls the full order list and publishes each
//! result on a `watch` channel. The server is the source of truth: a status
//! change is never applied locally, it is followed by a fresh fetch instead.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;

use storefront_client::{ClientError, StorefrontClient};
use storefront_core::{Order, OrderStats, OrderStatus};

use crate::poll::{spawn_poller, PollHandle};

/// Latest order list as seen by the dashboard.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderBoard {
    loaded: bool,
    orders: Vec<Order>,
}

impl OrderBoard {
    /// `true` until the first fetch has completed, successfully or not.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        !self.loaded
    }

    #[must_use]
    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    #[must_use]
    pub fn stats(&self) -> OrderStats {
        OrderStats::from_orders(&self.orders)
    }

    #[must_use]
    pub fn get(&self, order_id: &str) -> Option<&Order> {
        self.orders.iter().find(|o| o.id == order_id)
    }

    /// Resolves a full order id or a unique short reference (see
    /// [`Order::short_ref`]) to an order.
    #[must_use]
    pub fn resolve(&self, raw: &str) -> Option<&Order> {
        let raw = raw.trim();
        if let Some(order) = self.get(raw) {
            return Some(order);
        }
        let mut matches = self
            .orders
            .iter()
            .filter(|o| o.short_ref().eq_ignore_ascii_case(raw));
        match (matches.next(), matches.next()) {
            (Some(order), None) => Some(order),
            _ => None,
        }
    }
}

#[derive(Debug)]
pub struct Dashboard {
    client: StorefrontClient,
    board: Arc<watch::Sender<OrderBoard>>,
    poll_interval: Duration,
    poller: Option<PollHandle>,
    selected: Option<String>,
}

impl Dashboard {
    #[must_use]
    pub fn new(client: StorefrontClient, poll_interval: Duration) -> Self {
        let (board, _) = watch::channel(OrderBoard::default());
        Self {
            client,
            board: Arc::new(board),
            poll_interval,
            poller: None,
            selected: None,
        }
    }

    /// Starts polling. The first fetch is issued immediately. Mounting an
    /// already mounted dashboard does nothing.
    pub fn mount(&mut self) {
        if self.poller.is_some() {
            return;
        }
        let client = self.client.clone();
        let board = Arc::clone(&self.board);
        tracing::info!(interval_ms = self.poll_interval.as_millis(), "dashboard mounted");
        self.poller = Some(spawn_poller(self.poll_interval, move || {
            let client = client.clone();
            let board = Arc::clone(&board);
            async move {
                let _ = refresh_board(&client, &board).await;
            }
        }));
    }

    /// Stops polling, aborting any fetch still in flight, and discards the
    /// view state. A later [`Dashboard::mount`] starts from the loading state.
    pub async fn unmount(&mut self) {
        if let Some(poller) = self.poller.take() {
            poller.shutdown().await;
            tracing::info!("dashboard unmounted");
        }
        self.selected = None;
        self.board.send_replace(OrderBoard::default());
    }

    #[must_use]
    pub fn is_mounted(&self) -> bool {
        self.poller.is_some()
    }

    /// Receiver that observes every published order list.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<OrderBoard> {
        self.board.subscribe()
    }

    /// Snapshot of the current board.
    #[must_use]
    pub fn board(&self) -> OrderBoard {
        self.board.borrow().clone()
    }

    /// Stats for the current list, or `None` while still loading.
    #[must_use]
    pub fn stats(&self) -> Option<OrderStats> {
        let board = self.board.borrow();
        (!board.is_loading()).then(|| board.stats())
    }

    /// Fetches the order list once, outside the polling schedule.
    ///
    /// # Errors
    ///
    /// Returns the client error if the fetch fails; the previous list stays
    /// published.
    pub async fn refresh(&self) -> Result<(), ClientError> {
        refresh_board(&self.client, &self.board).await
    }

    /// Requests a status change and, once the server has accepted it,
    /// re-fetches the full list.
    ///
    /// # Errors
    ///
    /// Returns the client error if the update request fails. A failed
    /// follow-up fetch is logged but does not fail the update.
    pub async fn update_status(
        &self,
        order_id: &str,
        status: OrderStatus,
    ) -> Result<(), ClientError> {
        if let Err(e) = self.client.update_order_status(order_id, status).await {
            tracing::error!(order_id, %status, error = %e, "failed to update order status");
            return Err(e);
        }
        let _ = refresh_board(&self.client, &self.board).await;
        Ok(())
    }

    /// Opens the detail view for an order id or short reference. Returns
    /// `false` if no such order is on the board.
    pub fn select(&mut self, order: &str) -> bool {
        let resolved = self.board.borrow().resolve(order).map(|o| o.id.clone());
        match resolved {
            Some(id) => {
                self.selected = Some(id);
                true
            }
            None => false,
        }
    }

    /// The order in the detail view, as of the latest fetch.
    #[must_use]
    pub fn selected_order(&self) -> Option<Order> {
        let id = self.selected.as_deref()?;
        self.board.borrow().get(id).cloned()
    }

    pub fn close_detail(&mut self) {
        self.selected = None;
    }
}

/// Fetches the order list and publishes it. On failure the previous list is
/// kept but the board leaves the loading state.
async fn refresh_board(
    client: &StorefrontClient,
    board: &watch::Sender<OrderBoard>,
) -> Result<(), ClientError> {
    match client.list_orders().await {
        Ok(orders) => {
            board.send_replace(OrderBoard {
                loaded: true,
                orders,
            });
            Ok(())
        }
        Err(e) => {
            tracing::error!(error = %e, "failed to fetch orders");
            board.send_modify(|b| b.loaded = true);
            Err(e)
        }
    }
}

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod tests;
