//! Storefront demo
//!
//! Renders the catalog and a checkout receipt in the terminal for a given
//! instant, so every pricing window can be exercised without waiting for
//! the right day of the week.
//!
//! Use `--date` to pin the evaluation instant
//! Use `--add ID=QTY` (repeatable) to fill the cart
//! Use `--category` / `--sort` to shape the catalog listing

#![expect(
    clippy::print_stdout,
    reason = "demo binary prints to the console"
)]

use std::io;

use anyhow::{Context, Result};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use clap::Parser;
use tabled::{
    Table,
    builder::Builder,
    settings::{
        Alignment, Color, Style,
        object::{Columns, Rows},
    },
};
use tracing_subscriber::EnvFilter;

use gottfrid::{
    calendar::Calendar,
    cart::{Cart, SortKey},
    delivery::DeliveryEstimate,
    products::{Category, Product},
};

/// Arguments for the storefront demo
#[derive(Debug, Parser)]
struct StorefrontArgs {
    /// Evaluation instant, e.g. `2024-12-13T09:00` (defaults to now)
    #[clap(short, long)]
    date: Option<String>,

    /// Cart contents as `ID=QTY` pairs, e.g. `--add 1=12`
    #[clap(short, long = "add")]
    add: Vec<String>,

    /// Only list one shelf category
    #[clap(short, long)]
    category: Option<Category>,

    /// Sort order for the catalog listing
    #[clap(short, long)]
    sort: Option<SortKey>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = StorefrontArgs::parse();

    let calendar = match args.date.as_deref() {
        Some(raw) => Calendar::at(parse_instant(raw)?),
        None => Calendar::now(),
    };

    let mut cart = Cart::builtin()?;

    for entry in &args.add {
        let (id, quantity) = parse_cart_entry(entry)?;
        cart.set_amount(id, quantity)?;
    }

    print_catalog(&cart, args.category, args.sort);
    print_windows(&calendar);

    println!();
    cart.summary(&calendar)?.write_to(io::stdout())?;

    println!(
        "\n Estimated delivery: {}",
        DeliveryEstimate::for_calendar(&calendar)
    );

    Ok(())
}

/// Parse the `--date` argument; a bare date means midnight.
fn parse_instant(raw: &str) -> Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S")
        .or_else(|_err| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M"))
        .or_else(|_err| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d").map(|date| date.and_time(NaiveTime::MIN))
        })
        .with_context(|| format!("unparseable date: {raw}"))
}

/// Parse one `--add` entry of the form `ID=QTY`.
fn parse_cart_entry(raw: &str) -> Result<(u32, u32)> {
    let (id, quantity) = raw
        .split_once('=')
        .with_context(|| format!("expected ID=QTY, got: {raw}"))?;

    let id = id
        .trim()
        .parse()
        .with_context(|| format!("unparseable product id: {id}"))?;

    let quantity = quantity
        .trim()
        .parse()
        .with_context(|| format!("unparseable quantity: {quantity}"))?;

    Ok((id, quantity))
}

fn print_catalog(cart: &Cart<'_>, category: Option<Category>, sort: Option<SortKey>) {
    let mut listing: Vec<&Product<'_>> = match category {
        Some(category) => cart.by_category(category),
        None => cart.products().iter().collect(),
    };

    if let Some(key) = sort {
        gottfrid::cart::sort_products(&mut listing, key);
    }

    println!("{}", catalog_table(&listing));
}

fn catalog_table(products: &[&Product<'_>]) -> Table {
    let mut builder = Builder::default();

    builder.push_record(["ID", "Category", "Name", "Rating", "Price", "10+ Price", "In Cart"]);

    for product in products {
        builder.push_record([
            product.id.to_string(),
            product.category.to_string(),
            product.name.clone(),
            format!("{:.1}", product.rating),
            product.price.to_string(),
            product.bulk_price.to_string(),
            product.amount().to_string(),
        ]);
    }

    let mut table = builder.build();

    table.with(Style::rounded());
    table.modify(Rows::first(), Color::BOLD);
    table.modify(Columns::new(3..7), Alignment::right());

    table
}

fn print_windows(calendar: &Calendar) {
    if calendar.weekend_surcharge_window {
        println!(" 15% weekend surcharge in effect");
    }

    if calendar.monday_morning_discount_window {
        println!(" Monday morning: 10% off the whole order before 11:00");
    }

    if calendar.tuesday_even_week_discount_window {
        println!(" Even-week Tuesday: 25 kr off orders over 25 kr");
    }

    if calendar.is_lucia {
        println!(" Lucia: a free gift with every order today");
    }

    if calendar.is_christmas_eve {
        println!(" Christmas Eve: last orders before the holidays");
    }
}
