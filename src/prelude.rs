//! CordiWeave prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    carts::{CartLineItem, ProductId, TotalsRequest},
    checkout::{CartViolation, CheckoutError, OrderTotals, compute_totals, vat_rate},
    donations::{
        AllocationError, BENEFICIARIES, Beneficiary, BeneficiaryAllocation, Bucket,
        BucketAllocation, DonationBreakdown, allocate,
    },
    fixtures::{Fixture, FixtureError},
    money::{AmountError, minor_units, round2, to_money},
    products::{Catalog, PriceLookup, Product},
    receipt::{OrderReceipt, ReceiptError, TransparencyStatement},
    shipping::{ShippingLookup, ShippingOption, ShippingTable},
};
