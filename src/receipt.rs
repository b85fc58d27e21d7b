//! Order Summary
//!
//! Terminal rendering for cart contents and catalog listings. This is the
//! crate's presentation surface; all amounts come preformatted from
//! [`Money`]'s two-decimal display.

use std::io;

use rusty_money::{Money, iso::Currency};
use tabled::{
    builder::Builder,
    grid::config::HorizontalLine,
    settings::{
        Alignment, Color, Style, Theme,
        object::{Columns, Rows},
    },
};
use thiserror::Error;

use crate::{
    cart::Cart,
    pricing::OrderTotals,
    products::{Product, ProductKey},
};

/// Errors that can occur while rendering a summary.
#[derive(Debug, Error)]
pub enum SummaryError {
    /// IO error
    #[error("IO error")]
    IO,
}

/// Render the cart lines and derived totals as the checkout order summary.
///
/// An empty cart renders the storefront's empty-state line instead of a
/// table.
///
/// # Errors
///
/// Returns a [`SummaryError::IO`] if writing to `out` fails.
pub fn write_order_summary(
    mut out: impl io::Write,
    cart: &Cart<'_>,
    totals: &OrderTotals<'_>,
) -> Result<(), SummaryError> {
    if cart.is_empty() {
        return writeln!(out, "\nYour cart is empty.").map_err(|_err| SummaryError::IO);
    }

    let mut builder = Builder::default();

    builder.push_record(["", "Item", "Brand", "Unit Price", "Qty", "Line Total"]);

    let mut brand_rows = Vec::with_capacity(cart.len());

    for (idx, line) in cart.iter().enumerate() {
        let product = line.product();

        builder.push_record([
            format!("#{:<3}", idx + 1),
            product.name.clone(),
            product.brand.clone(),
            format!("{}", product.price),
            format!("x{}", line.quantity()),
            format!("{}", line.line_total()),
        ]);

        brand_rows.push(idx + 1);
    }

    write_table(&mut out, builder, &brand_rows)?;

    write_totals_block(&mut out, totals)
}

/// Render a catalog listing (e.g. a filtered search result) as a table.
///
/// # Errors
///
/// Returns a [`SummaryError::IO`] if writing to `out` fails.
pub fn write_product_table(
    mut out: impl io::Write,
    entries: &[(ProductKey, &Product<'_>)],
) -> Result<(), SummaryError> {
    if entries.is_empty() {
        return writeln!(out, "\nNo products found.").map_err(|_err| SummaryError::IO);
    }

    let mut builder = Builder::default();

    builder.push_record([
        "", "Product", "Brand", "Category", "Price", "Rating", "Reviews", "Stock",
    ]);

    let mut brand_rows = Vec::with_capacity(entries.len());

    for (idx, (_, product)) in entries.iter().enumerate() {
        let price = product.original_price.map_or_else(
            || format!("{}", product.price),
            |original| format!("{} (was {original})", product.price),
        );

        let stock = if product.in_stock {
            "in stock".to_string()
        } else {
            "\x1b[31mout of stock\x1b[0m".to_string()
        };

        builder.push_record([
            format!("#{:<3}", idx + 1),
            product.name.clone(),
            product.brand.clone(),
            product.category.clone(),
            price,
            format!("{}", product.rating),
            format!("{}", product.reviews),
            stock,
        ]);

        brand_rows.push(idx + 1);
    }

    write_table(&mut out, builder, &brand_rows)
}

fn write_table(
    out: &mut impl io::Write,
    builder: Builder,
    brand_rows: &[usize],
) -> Result<(), SummaryError> {
    let mut table = builder.build();
    let mut theme = Theme::from(Style::modern_rounded());
    let separator = HorizontalLine::new(Some('─'), Some('┼'), Some('├'), Some('┤'));

    theme.remove_horizontal_lines();
    theme.insert_horizontal_line(1, separator);

    table.with(theme);
    table.modify(Rows::first(), Color::BOLD);
    table.modify(Columns::new(3..6), Alignment::right());

    for &row in brand_rows {
        table.modify((row, 2), Color::new("\x1b[90m", "\x1b[0m"));
    }

    writeln!(out, "\n{table}").map_err(|_err| SummaryError::IO)
}

fn write_totals_block(
    out: &mut impl io::Write,
    totals: &OrderTotals<'_>,
) -> Result<(), SummaryError> {
    let shipping_value = if totals.shipping_is_free() {
        "\x1b[32mFREE\x1b[0m".to_string()
    } else {
        format!("{}", totals.shipping)
    };

    let lines = [
        ("Subtotal:", format!("{}", totals.subtotal), false),
        ("Shipping:", shipping_value, false),
        ("Tax (10%):", format!("{}", totals.tax), false),
        ("Total:", format!("{}", totals.total), true),
    ];

    let label_width = lines
        .iter()
        .map(|(label, _, _)| label.chars().count())
        .max()
        .unwrap_or(0);

    let value_width = lines
        .iter()
        .map(|(_, value, _)| visible_width(value))
        .max()
        .unwrap_or(0);

    for (label, value, bold) in &lines {
        let value_pad = " ".repeat(value_width.saturating_sub(visible_width(value)));

        if *bold {
            writeln!(out, " \x1b[1m{label:>label_width$}\x1b[0m  {value_pad}\x1b[1m{value}\x1b[0m")
        } else {
            writeln!(out, " {label:>label_width$}  {value_pad}{value}")
        }
        .map_err(|_err| SummaryError::IO)?;
    }

    if let Some(gap) = totals.free_shipping_gap() {
        write_free_shipping_hint(out, gap)?;
    }

    writeln!(out).map_err(|_err| SummaryError::IO)
}

fn write_free_shipping_hint(
    out: &mut impl io::Write,
    gap: Money<'_, Currency>,
) -> Result<(), SummaryError> {
    writeln!(out, "\n Add {gap} more for free shipping!").map_err(|_err| SummaryError::IO)
}

/// Returns the visible (non-ANSI) width of a string.
fn visible_width(s: &str) -> usize {
    let mut width = 0usize;
    let mut in_escape = false;

    for ch in s.chars() {
        if in_escape {
            if ch.is_ascii_alphabetic() {
                in_escape = false;
            }
        } else if ch == '\x1b' {
            in_escape = true;
        } else {
            width += 1;
        }
    }

    width
}
