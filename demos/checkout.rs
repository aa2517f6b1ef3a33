//! Checkout Demo
//!
//! Prices a sample cart against a fixture set and prints the receipt.
//!
//! Use `-f` to load a fixture set by name
//! Use `-s` to select a shipping method id

use std::io;

use anyhow::Result;
use clap::Parser;

use cordiweave::{
    carts::CartLineItem,
    checkout::compute_totals,
    fixtures::Fixture,
    receipt::OrderReceipt,
    utils::DemoCheckoutArgs,
};

/// Checkout Demo
pub fn main() -> Result<()> {
    let args = DemoCheckoutArgs::parse();

    let fixture = Fixture::from_set(&args.fixture)?;

    let cart: Vec<CartLineItem> = fixture
        .catalog()
        .products()
        .iter()
        .map(|(id, _product)| CartLineItem::new(*id, 1))
        .collect();

    let totals = compute_totals(&cart, &args.shipping, fixture.catalog(), fixture.shipping())?;
    let receipt = OrderReceipt::from_cart(&cart, fixture.catalog(), totals)?;

    let stdout = io::stdout();
    let mut handle = stdout.lock();

    receipt.write_to(&mut handle)?;

    Ok(())
}
