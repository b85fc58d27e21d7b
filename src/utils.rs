//! Utils

use clap::{Parser, ValueEnum};

use crate::catalog::SortBy;

/// Arguments for the storefront demo
#[derive(Debug, Parser)]
pub struct DemoArgs {
    /// Fixture set to load the catalog and order history from
    #[clap(short, long, default_value = "shop")]
    pub fixture: String,

    /// Only list products in this category
    #[clap(short, long)]
    pub category: Option<String>,

    /// Case-insensitive search over names, descriptions and brands
    #[clap(short, long)]
    pub search: Option<String>,

    /// Sort order for the listing
    #[clap(long, value_enum, default_value = "popularity")]
    pub sort: SortArg,

    /// Add a product to the cart, as KEY or KEY=QTY. Repeatable.
    #[clap(short, long)]
    pub add: Vec<String>,

    /// Sign in with the demo account and run the simulated checkout
    #[clap(long)]
    pub checkout: bool,
}

/// Sort options exposed on the command line.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum SortArg {
    /// Most reviewed first
    Popularity,

    /// Cheapest first
    PriceLow,

    /// Most expensive first
    PriceHigh,

    /// Newest arrivals first
    Newest,

    /// Highest rated first
    Rating,
}

impl From<SortArg> for SortBy {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::Popularity => SortBy::Popularity,
            SortArg::PriceLow => SortBy::PriceLow,
            SortArg::PriceHigh => SortBy::PriceHigh,
            SortArg::Newest => SortBy::Newest,
            SortArg::Rating => SortBy::Rating,
        }
    }
}
