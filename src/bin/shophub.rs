//! Storefront Demo
//!
//! Browse the demo catalog, fill a cart and run the simulated checkout.
//!
//! Use `-c`/`-s` to filter the listing by category or search text
//! Use `--sort` to pick a sort order
//! Use `-a KEY=QTY` (repeatable) to add fixture products to the cart
//! Use `--checkout` to sign in with the demo account and place the order

use std::{error::Error, io, io::Write as _, thread, time::Duration};

use clap::Parser;

use shophub::{
    catalog::ProductQuery,
    checkout::{CheckoutForm, Country, PaymentMethod, ShippingAddress, place_order},
    fixtures::Fixture,
    pricing::OrderTotals,
    receipt,
    session::{DEMO_EMAIL, DEMO_PASSWORD},
    utils::DemoArgs,
};

fn main() -> Result<(), Box<dyn Error>> {
    let args = DemoArgs::parse();

    let fixture = Fixture::from_set(&args.fixture)?;
    let catalog = fixture.catalog()?;

    let query = ProductQuery {
        category: args.category.clone(),
        search: args.search.clone(),
        sort: args.sort.into(),
        ..ProductQuery::default()
    };

    let listing = catalog.search(&query);

    let stdout = io::stdout();
    let mut handle = stdout.lock();

    writeln!(
        handle,
        "Showing {} {}",
        listing.len(),
        if listing.len() == 1 { "product" } else { "products" }
    )?;

    receipt::write_product_table(&mut handle, &listing)?;

    let mut session = fixture.session()?;

    for spec in &args.add {
        let (key, quantity) = match spec.split_once('=') {
            Some((key, quantity)) => (key, quantity.parse::<u32>()?),
            None => (spec.as_str(), 1),
        };

        session
            .cart_mut()
            .add_item(fixture.product_key(key)?, fixture.product(key)?, quantity)?;
    }

    if !session.cart().is_empty() {
        let totals = OrderTotals::for_cart(session.cart());

        receipt::write_order_summary(&mut handle, session.cart(), &totals)?;
    }

    if args.checkout {
        session.login(DEMO_EMAIL, DEMO_PASSWORD)?;

        let form = demo_form();

        writeln!(handle, "Processing...")?;

        // The storefront simulated its payment gateway with a two second
        // timer; the engine itself never blocks.
        thread::sleep(Duration::from_secs(2));

        let order = place_order(&mut session, &form)?;

        writeln!(handle, "\nOrder Confirmed!")?;
        writeln!(handle, "  Order ID: {}", order.id)?;
        writeln!(handle, "  Items:    {}", order.item_count())?;
        writeln!(handle, "  Charged:  {}", order.totals.total)?;
    }

    Ok(())
}

fn demo_form() -> CheckoutForm {
    CheckoutForm {
        shipping: ShippingAddress {
            first_name: "Demo".to_string(),
            last_name: "User".to_string(),
            email: DEMO_EMAIL.to_string(),
            phone: "555-0100".to_string(),
            street: "1 Main St".to_string(),
            city: "Springfield".to_string(),
            state: "IL".to_string(),
            zip_code: "62704".to_string(),
            country: Country::Usa,
        },
        payment: PaymentMethod::Card {
            number: "4242424242424242".to_string(),
            expiry: "12/27".to_string(),
            cvc: "123".to_string(),
        },
    }
}
