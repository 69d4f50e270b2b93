//! Interactive session driven by line commands on stdin.

use std::time::Duration;

use anyhow::Context;
use tokio::io::{AsyncBufReadExt, BufReader};

use storefront_app::{Session, SessionSettings, View};
use storefront_client::StorefrontClient;
use storefront_core::OrderStatus;

use crate::render;

const FIRST_POLL_WAIT: Duration = Duration::from_secs(5);

const HELP: &str = "\
Commands:
  shop | cart | admin          switch view
  add <id>                     add one unit of a product to the cart
  remove <id>                  remove a cart line
  qty <id> <n>                 set a line's quantity (0 or non-numeric removes it)
  name <text>                  set the customer name
  email <text>                 set the customer email
  checkout                     place the order
  view <order>                 show order details (admin)
  close                        close order details (admin)
  status <order> <status>      change an order's status (admin)
  refresh                      reprint the current view
  help                         show this help
  quit                         leave";

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ShopCommand {
    Navigate(View),
    Add(String),
    Remove(String),
    Quantity { id: String, quantity: String },
    Name(String),
    Email(String),
    Checkout,
    ViewOrder(String),
    CloseOrder,
    SetStatus { order: String, status: OrderStatus },
    Refresh,
    Help,
    Quit,
}

pub(crate) fn parse_command(line: &str) -> Result<Option<ShopCommand>, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (word, rest) = line
        .split_once(char::is_whitespace)
        .map_or((line, ""), |(w, r)| (w, r.trim()));
    let need = |what: &str| {
        if rest.is_empty() {
            Err(format!("usage: {word} <{what}>"))
        } else {
            Ok(rest.to_string())
        }
    };

    let command = match word.to_ascii_lowercase().as_str() {
        "shop" => ShopCommand::Navigate(View::Shop),
        "cart" => ShopCommand::Navigate(View::Cart),
        "admin" => ShopCommand::Navigate(View::Admin),
        "add" => ShopCommand::Add(need("id")?),
        "remove" | "rm" => ShopCommand::Remove(need("id")?),
        "qty" => {
            let (id, quantity) = rest
                .split_once(char::is_whitespace)
                .ok_or_else(|| "usage: qty <id> <n>".to_string())?;
            ShopCommand::Quantity {
                id: id.to_string(),
                quantity: quantity.trim().to_string(),
            }
        }
        // Empty values are allowed so a field can be cleared.
        "name" => ShopCommand::Name(rest.to_string()),
        "email" => ShopCommand::Email(rest.to_string()),
        "checkout" | "order" => ShopCommand::Checkout,
        "view" => ShopCommand::ViewOrder(need("order")?),
        "close" => ShopCommand::CloseOrder,
        "status" => {
            let (order, status) = rest
                .split_once(char::is_whitespace)
                .ok_or_else(|| "usage: status <order> <status>".to_string())?;
            let status = status.trim().parse::<OrderStatus>().map_err(|e| e.to_string())?;
            ShopCommand::SetStatus {
                order: order.to_string(),
                status,
            }
        }
        "refresh" | "ls" => ShopCommand::Refresh,
        "help" | "?" => ShopCommand::Help,
        "quit" | "exit" | "q" => ShopCommand::Quit,
        other => return Err(format!("unknown command '{other}', try `help`")),
    };
    Ok(Some(command))
}

pub(crate) async fn run_shop(
    client: StorefrontClient,
    settings: SessionSettings,
) -> anyhow::Result<()> {
    let mut session = Session::start(client, settings).await;
    println!("{}", render_view(&session));
    println!("Type `help` for commands.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let line = tokio::select! {
            line = lines.next_line() => line.context("failed to read stdin")?,
            _ = tokio::signal::ctrl_c() => None,
        };
        let Some(line) = line else { break };

        let command = match parse_command(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                println!("{e}");
                continue;
            }
        };
        if command == ShopCommand::Quit {
            break;
        }
        apply(&mut session, command).await;
    }

    session.close().await;
    Ok(())
}

async fn apply(session: &mut Session, command: ShopCommand) {
    match command {
        ShopCommand::Navigate(view) => {
            session.navigate(view).await;
            if view == View::Admin {
                // Wait briefly for the first poll so the table is not just "Loading".
                let mut board = session.dashboard().subscribe();
                let loading = board.borrow_and_update().is_loading();
                if loading {
                    let _ = tokio::time::timeout(FIRST_POLL_WAIT, board.changed()).await;
                }
            }
            println!("{}", render_view(session));
        }
        ShopCommand::Add(id) => match session.add_to_cart(&id) {
            Some(product) => println!("Added {} to cart", product.name),
            None => println!("No product with id '{id}'"),
        },
        ShopCommand::Remove(id) => {
            if session.remove_from_cart(&id) {
                println!("{}", render::render_cart(session.cart(), session.checkout()));
            } else {
                println!("'{id}' is not in the cart");
            }
        }
        ShopCommand::Quantity { id, quantity } => {
            if session.set_quantity(&id, &quantity) {
                println!("{}", render::render_cart(session.cart(), session.checkout()));
            } else {
                println!("'{id}' is not in the cart");
            }
        }
        ShopCommand::Name(name) => session.checkout_mut().form_mut().customer_name = name,
        ShopCommand::Email(email) => session.checkout_mut().form_mut().customer_email = email,
        ShopCommand::Checkout => match session.place_order().await {
            Ok(_) => println!("{}", render::render_cart(session.cart(), session.checkout())),
            Err(e) => println!("{e}"),
        },
        ShopCommand::ViewOrder(order) => {
            if session.view() != View::Admin {
                println!("Switch to `admin` first");
            } else if session.dashboard_mut().select(&order) {
                print_selected(session);
            } else {
                println!("No order matches '{order}'");
            }
        }
        ShopCommand::CloseOrder => {
            session.dashboard_mut().close_detail();
            println!("{}", render_view(session));
        }
        ShopCommand::SetStatus { order, status } => {
            if session.view() != View::Admin {
                println!("Switch to `admin` first");
                return;
            }
            let board = session.dashboard().board();
            let order_id = board
                .resolve(&order)
                .map_or_else(|| order.clone(), |o| o.id.clone());
            match session.dashboard().update_status(&order_id, status).await {
                Ok(()) => println!("{}", render_view(session)),
                Err(e) => println!("Error updating order status: {e}"),
            }
        }
        ShopCommand::Refresh => println!("{}", render_view(session)),
        ShopCommand::Help => println!("{HELP}"),
        ShopCommand::Quit => {}
    }
}

fn print_selected(session: &Session) {
    match session.dashboard().selected_order() {
        Some(order) => println!("{}", render::render_order_detail(&order)),
        None => println!("{}", render_view(session)),
    }
}

fn render_view(session: &Session) -> String {
    let nav = render::render_nav(session.view(), session.cart().len());
    let body = match session.view() {
        View::Shop => render::render_catalog(session.catalog().products()),
        View::Cart => render::render_cart(session.cart(), session.checkout()),
        View::Admin => match session.dashboard().selected_order() {
            Some(order) => render::render_order_detail(&order),
            None => render::render_board(&session.dashboard().board()),
        },
    };
    format!("{nav}\n\n{body}")
}
