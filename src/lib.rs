//! CordiWeave
//!
//! CordiWeave is the pricing core of a marketplace connecting Cordillera
//! weaving artisans with buyers. It computes checkout order totals with
//! fixed-point currency rounding, and partitions completed donations into
//! transparency buckets and beneficiary shares that reconcile exactly.

pub mod carts;
pub mod checkout;
pub mod donations;
pub mod fixtures;
pub mod money;
pub mod prelude;
pub mod products;
pub mod receipt;
pub mod shipping;
pub mod utils;
