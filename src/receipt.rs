//! Receipts
//!
//! Terminal rendering for order breakdowns and donation transparency
//! statements. Writers take any [`io::Write`] so callers decide where the
//! output goes.

use std::io;

use rust_decimal::Decimal;
use rusty_money::{Money, iso::Currency};
use smallvec::SmallVec;
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
    carts::{CartLineItem, ProductId},
    checkout::OrderTotals,
    donations::DonationBreakdown,
    money::{AmountError, round2, to_money},
    products::Catalog,
};

/// Errors that can occur when building or writing a receipt.
#[derive(Debug, Error)]
pub enum ReceiptError {
    /// A cart line references a product missing from the catalog.
    #[error("missing product: {0}")]
    MissingProduct(ProductId),

    /// A line amount cannot be represented in minor units.
    #[error(transparent)]
    Amount(#[from] AmountError),

    /// IO error
    #[error("IO error")]
    Io,
}

/// One rendered cart line.
#[derive(Debug, Clone)]
struct ReceiptLine<'a> {
    name: String,
    quantity: u32,
    unit_price: Decimal,
    amount: Money<'a, Currency>,
}

/// Printable breakdown of a priced order.
#[derive(Debug, Clone)]
pub struct OrderReceipt<'a> {
    lines: SmallVec<[ReceiptLine<'a>; 8]>,
    totals: OrderTotals<'a>,
}

impl<'a> OrderReceipt<'a> {
    /// Builds a receipt from the cart and the totals computed for it.
    ///
    /// Line amounts shown on the receipt are rounded per line for display;
    /// the totals themselves were computed over unrounded lines.
    ///
    /// # Errors
    ///
    /// Returns [`ReceiptError::MissingProduct`] if a line's product is not
    /// in the catalog.
    pub fn from_cart(
        items: &[CartLineItem],
        catalog: &Catalog,
        totals: OrderTotals<'a>,
    ) -> Result<Self, ReceiptError> {
        let currency = totals.total().currency();
        let mut lines = SmallVec::new();

        for item in items {
            let product = catalog
                .product(item.product_id)
                .ok_or(ReceiptError::MissingProduct(item.product_id))?;

            let amount = round2(product.price * Decimal::from(item.quantity));

            lines.push(ReceiptLine {
                name: product.name.clone(),
                quantity: item.quantity,
                unit_price: product.price,
                amount: to_money(amount, currency)?,
            });
        }

        Ok(Self { lines, totals })
    }

    /// The totals this receipt was built from.
    #[must_use]
    pub fn totals(&self) -> &OrderTotals<'a> {
        &self.totals
    }

    /// Writes the receipt table and totals summary.
    ///
    /// # Errors
    ///
    /// Returns [`ReceiptError::Io`] if the receipt cannot be written.
    pub fn write_to(&self, mut out: impl io::Write) -> Result<(), ReceiptError> {
        let mut builder = Builder::default();

        builder.push_record(["", "Item", "Qty", "Unit Price", "Amount"]);

        for (idx, line) in self.lines.iter().enumerate() {
            builder.push_record([
                format!("#{:<3}", idx + 1),
                line.name.clone(),
                line.quantity.to_string(),
                line.unit_price.to_string(),
                line.amount.to_string(),
            ]);
        }

        write_table(&mut out, builder)?;

        write_summary_line(&mut out, "Subtotal:", &self.totals.subtotal().to_string())?;
        write_summary_line(&mut out, "VAT (12%):", &self.totals.tax().to_string())?;
        write_summary_line(&mut out, "Shipping:", &self.totals.shipping().to_string())?;
        write_bold_summary_line(&mut out, "Total:", &self.totals.total().to_string())?;

        writeln!(out).map_err(|_err| ReceiptError::Io)
    }
}

/// Printable transparency statement for a completed donation.
#[derive(Debug)]
pub struct TransparencyStatement<'a> {
    breakdown: &'a DonationBreakdown<'a>,
}

impl<'a> TransparencyStatement<'a> {
    /// Creates a statement for a donation breakdown.
    pub fn new(breakdown: &'a DonationBreakdown<'a>) -> Self {
        Self { breakdown }
    }

    /// Writes the bucket table, the beneficiary table and the donation line.
    ///
    /// # Errors
    ///
    /// Returns [`ReceiptError::Io`] if the statement cannot be written.
    pub fn write_to(&self, mut out: impl io::Write) -> Result<(), ReceiptError> {
        let mut buckets = Builder::default();

        buckets.push_record(["Bucket", "%", "Amount"]);

        for allocation in self.breakdown.buckets() {
            buckets.push_record([
                allocation.bucket.label().to_string(),
                format!("{}%", allocation.percentage),
                allocation.amount.to_string(),
            ]);
        }

        write_table(&mut out, buckets)?;

        writeln!(out, " Artisan support is shared with partner organisations:")
            .map_err(|_err| ReceiptError::Io)?;

        let mut beneficiaries = Builder::default();

        beneficiaries.push_record(["Beneficiary", "%", "Amount"]);

        for allocation in self.breakdown.beneficiaries() {
            beneficiaries.push_record([
                allocation.beneficiary.name.to_string(),
                format!("{}%", allocation.percentage),
                allocation.amount.to_string(),
            ]);
        }

        write_table(&mut out, beneficiaries)?;

        write_bold_summary_line(&mut out, "Donation:", &self.breakdown.donation().to_string())?;

        writeln!(out).map_err(|_err| ReceiptError::Io)
    }
}

fn write_table(out: &mut impl io::Write, builder: Builder) -> Result<(), ReceiptError> {
    let mut table = builder.build();
    let mut theme = Theme::from(Style::modern_rounded());
    let separator = HorizontalLine::new(Some('─'), Some('┼'), Some('├'), Some('┤'));

    theme.remove_horizontal_lines();
    theme.insert_horizontal_line(1, separator);

    table.with(theme);
    table.modify(Rows::first(), Color::BOLD);
    table.modify(Columns::new(2..), Alignment::right());

    writeln!(out, "\n{table}").map_err(|_err| ReceiptError::Io)
}

fn write_summary_line(
    out: &mut impl io::Write,
    label: &str,
    value: &str,
) -> Result<(), ReceiptError> {
    writeln!(out, " {label:<12}{value:>18}").map_err(|_err| ReceiptError::Io)
}

fn write_bold_summary_line(
    out: &mut impl io::Write,
    label: &str,
    value: &str,
) -> Result<(), ReceiptError> {
    writeln!(out, " \x1b[1m{label:<12}{value:>18}\x1b[0m").map_err(|_err| ReceiptError::Io)
}
