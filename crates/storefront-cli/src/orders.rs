//! One-shot and watch-mode order commands.

use anyhow::{bail, Context};
use storefront_app::{Dashboard, SessionSettings};
use storefront_client::StorefrontClient;
use storefront_core::OrderStatus;

use crate::render;

pub(crate) async fn run_orders_once(client: StorefrontClient) -> anyhow::Result<()> {
    let dashboard = Dashboard::new(client, SessionSettings::default().poll_interval);
    dashboard
        .refresh()
        .await
        .context("failed to fetch orders")?;
    println!("{}", render::render_board(&dashboard.board()));
    Ok(())
}

/// Polls the order list and reprints the dashboard on every change until
/// Ctrl-C.
pub(crate) async fn run_orders_watch(
    client: StorefrontClient,
    settings: SessionSettings,
) -> anyhow::Result<()> {
    let mut dashboard = Dashboard::new(client, settings.poll_interval);
    let mut board = dashboard.subscribe();
    dashboard.mount();
    println!("{}", render::render_board(&board.borrow_and_update()));

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            changed = board.changed() => {
                if changed.is_err() {
                    break;
                }
                let snapshot = board.borrow_and_update().clone();
                println!("{}", render::render_board(&snapshot));
            }
        }
    }

    dashboard.unmount().await;
    Ok(())
}

pub(crate) async fn run_order_detail(client: StorefrontClient, raw_id: &str) -> anyhow::Result<()> {
    let mut dashboard = Dashboard::new(client, SessionSettings::default().poll_interval);
    dashboard
        .refresh()
        .await
        .context("failed to fetch orders")?;
    if !dashboard.select(raw_id) {
        bail!("no order matches '{raw_id}'");
    }
    let Some(order) = dashboard.selected_order() else {
        bail!("no order matches '{raw_id}'");
    };
    println!("{}", render::render_order_detail(&order));
    Ok(())
}

/// Updates an order's status. Short references are resolved against a fresh
/// order list; anything unresolved is sent as a full id.
pub(crate) async fn run_set_status(
    client: StorefrontClient,
    raw_id: &str,
    status: OrderStatus,
) -> anyhow::Result<()> {
    let dashboard = Dashboard::new(client, SessionSettings::default().poll_interval);
    if let Err(e) = dashboard.refresh().await {
        tracing::warn!(error = %e, "could not fetch orders to resolve id");
    }
    let order_id = dashboard
        .board()
        .resolve(raw_id)
        .map_or_else(|| raw_id.trim().to_string(), |o| o.id.clone());

    dashboard
        .update_status(&order_id, status)
        .await
        .with_context(|| format!("failed to update order {order_id}"))?;

    println!("Order {order_id} is now {status}");
    println!("{}", render::render_board(&dashboard.board()));
    Ok(())
}
