//! Non-interactive checkout: build a cart from `ID[:QTY]` arguments and place
//! the order.

use anyhow::{anyhow, bail};
use storefront_app::{Session, SessionSettings};
use storefront_client::StorefrontClient;

use crate::render;

/// One `--item` argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ItemArg {
    pub id: String,
    pub quantity: u32,
}

pub(crate) fn parse_item(raw: &str) -> Result<ItemArg, String> {
    let raw = raw.trim();
    let (id, quantity) = match raw.split_once(':') {
        Some((id, qty)) => {
            let quantity = qty
                .trim()
                .parse::<u32>()
                .map_err(|_| format!("invalid quantity in '{raw}'"))?;
            (id.trim(), quantity)
        }
        None => (raw, 1),
    };
    if id.is_empty() {
        return Err(format!("missing product id in '{raw}'"));
    }
    if quantity == 0 {
        return Err(format!("quantity must be at least 1 in '{raw}'"));
    }
    Ok(ItemArg {
        id: id.to_string(),
        quantity,
    })
}

pub(crate) async fn run_checkout(
    client: StorefrontClient,
    settings: SessionSettings,
    name: &str,
    email: &str,
    items: &[String],
) -> anyhow::Result<()> {
    let items = items
        .iter()
        .map(|raw| parse_item(raw))
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| anyhow!(e))?;

    let mut session = Session::start(client, settings).await;
    if session.catalog().is_empty() {
        bail!("the catalog is empty or could not be loaded");
    }

    for item in &items {
        if session.add_to_cart(&item.id).is_none() {
            bail!("product '{}' is not in the catalog", item.id);
        }
        if item.quantity > 1 {
            session.set_quantity(&item.id, &item.quantity.to_string());
        }
    }

    let form = session.checkout_mut().form_mut();
    form.customer_name = name.to_string();
    form.customer_email = email.to_string();

    println!("{}", render::render_cart(session.cart(), session.checkout()));

    let result = session.place_order().await;
    session.close().await;
    let order_id = result?;
    println!("Order placed successfully! Order ID: {order_id}");
    Ok(())
}
