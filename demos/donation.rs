//! Donation Demo
//!
//! Allocates a donation amount across the transparency buckets and prints
//! the statement a donor would see.
//!
//! Use `-a` to set the donation amount
//! Use `-c` to set the ISO currency code

use std::io;

use anyhow::{Context, Result};
use clap::Parser;
use rust_decimal::Decimal;
use rusty_money::{Findable, iso::Currency};

use cordiweave::{donations::allocate, receipt::TransparencyStatement, utils::DemoDonationArgs};

/// Donation Demo
pub fn main() -> Result<()> {
    let args = DemoDonationArgs::parse();

    let amount: Decimal = args
        .amount
        .parse()
        .with_context(|| format!("invalid amount: {}", args.amount))?;

    let currency = Currency::find(&args.currency)
        .with_context(|| format!("unknown currency code: {}", args.currency))?;

    let breakdown = allocate(amount, currency)?;

    let stdout = io::stdout();
    let mut handle = stdout.lock();

    TransparencyStatement::new(&breakdown).write_to(&mut handle)?;

    Ok(())
}
