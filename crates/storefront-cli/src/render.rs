//! Plain-text rendering of each view.
//!
//! Every function returns a `String` so the output can be asserted in tests;
//! callers decide where to print it.

use storefront_app::{CheckoutFlow, OrderBoard, View};
use storefront_core::{format_money, Cart, Order, OrderStatus, Product};

pub(crate) fn render_nav(view: View, cart_lines: usize) -> String {
    let tab = |v: View, label: String| {
        if v == view {
            format!("[{label}]")
        } else {
            format!(" {label} ")
        }
    };
    format!(
        "E-Commerce Store  {} {} {}",
        tab(View::Shop, "Shop".to_string()),
        tab(View::Cart, format!("Cart ({cart_lines})")),
        tab(View::Admin, "Admin Panel".to_string()),
    )
}

pub(crate) fn render_catalog(products: &[Product]) -> String {
    if products.is_empty() {
        return "No products available. Please check back later.".to_string();
    }

    let mut lines = vec!["Available Products".to_string()];
    for product in products {
        lines.push(format!(
            "  #{:<6} {:<28} {:>10}  {}",
            product.id.to_string(),
            product.name,
            format_money(product.price),
            product.category
        ));
        lines.push(format!("          {}", product.description_or_default()));
        lines.push(format!("          image: {}", product.image_or_placeholder()));
    }
    lines.push("Add a product with `add <id>`.".to_string());
    lines.join("\n")
}

pub(crate) fn render_cart(cart: &Cart, checkout: &CheckoutFlow) -> String {
    let mut lines = Vec::new();

    if let Some(confirmation) = checkout.confirmation() {
        lines.push(format!(
            "Order placed successfully! Order ID: {}",
            confirmation.order_id()
        ));
    }

    if cart.is_empty() {
        lines.push("Your cart is empty".to_string());
        lines.push("Start shopping by going to the Shop page!".to_string());
        return lines.join("\n");
    }

    lines.push(format!(
        "  {:<8} {:<28} {:>10} {:>5} {:>11}",
        "ID", "Product", "Price", "Qty", "Total"
    ));
    for line in cart.lines() {
        lines.push(format!(
            "  {:<8} {:<28} {:>10} {:>5} {:>11}",
            line.product.id.to_string(),
            line.product.name,
            format_money(line.product.price),
            line.quantity,
            format_money(line.line_total())
        ));
    }
    lines.push(format!("Subtotal: {}", format_money(cart.total())));

    let form = checkout.form();
    lines.push(format!(
        "Checkout as: {} <{}>",
        blank_or(&form.customer_name),
        blank_or(&form.customer_email)
    ));
    lines.push(format!(
        "Total Items: {}  Total Price: {}",
        cart.len(),
        format_money(cart.total())
    ));
    lines.join("\n")
}

pub(crate) fn render_board(board: &OrderBoard) -> String {
    if board.is_loading() {
        return "Loading orders...".to_string();
    }

    let stats = board.stats();
    let mut lines = vec![format!(
        "Total Orders: {}  Pending Orders: {}  Total Revenue: {}",
        stats.total_orders,
        stats.pending_orders,
        format_money(stats.revenue)
    )];

    if board.orders().is_empty() {
        lines.push("No orders yet. Waiting for customers to checkout...".to_string());
        return lines.join("\n");
    }

    lines.push(format!(
        "  {:<8} {:<20} {:<28} {:>6} {:>11} {:<10} {}",
        "Order", "Customer", "Email", "Items", "Total", "Status", "Date"
    ));
    for order in board.orders() {
        lines.push(format!(
            "  {:<8} {:<20} {:<28} {:>6} {:>11} {:<10} {}",
            order.short_ref(),
            order.customer_name,
            order.customer_email,
            order.items.len(),
            format_money(order.total_amount),
            order.status.as_str().to_uppercase(),
            order.created_at.format("%Y-%m-%d")
        ));
    }
    lines.join("\n")
}

pub(crate) fn render_order_detail(order: &Order) -> String {
    let mut lines = vec![
        "Order Details".to_string(),
        format!("  Order ID:      {}", order.id),
        format!("  Customer Name: {}", order.customer_name),
        format!("  Email:         {}", order.customer_email),
        format!(
            "  Order Date:    {}",
            order.created_at.format("%Y-%m-%d %H:%M:%S UTC")
        ),
        "  Items Ordered:".to_string(),
    ];
    for item in &order.items {
        lines.push(format!(
            "    {:<28} {:>10} x{:<4} {:>11}",
            item.product_name,
            format_money(item.price),
            item.quantity,
            format_money(item.line_total())
        ));
    }
    lines.push(format!(
        "  Total Amount:  {}",
        format_money(order.total_amount)
    ));
    let statuses: Vec<&str> = OrderStatus::ALL.iter().map(|s| s.as_str()).collect();
    lines.push(format!(
        "  Status:        {} (change with `status <{}>`)",
        order.status,
        statuses.join("|")
    ));
    lines.join("\n")
}

fn blank_or(value: &str) -> &str {
    if value.trim().is_empty() {
        "-"
    } else {
        value
    }
}
