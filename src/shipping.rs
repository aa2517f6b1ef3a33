//! Shipping
//!
//! Shipping options are read-only reference data supplied by the
//! shipping-rate provider and immutable for the duration of a calculation.

use rustc_hash::FxHashMap;
use rusty_money::{Money, iso::Currency};

/// A shipping method offered at checkout.
#[derive(Debug, Clone, PartialEq)]
pub struct ShippingOption<'a> {
    /// Public identifier selected by the buyer (e.g. `standard`).
    pub id: String,

    /// Display name.
    pub name: String,

    /// Flat fee, already rounded to two decimal places.
    pub price: Money<'a, Currency>,

    /// Carrier fulfilling the delivery.
    pub carrier: String,
}

/// Resolves a shipping option by its public identifier.
pub trait ShippingLookup<'a> {
    /// Returns the shipping option with the given id, if offered.
    fn option(&self, id: &str) -> Option<&ShippingOption<'a>>;
}

/// In-memory table of shipping options.
#[derive(Debug, Clone, Default)]
pub struct ShippingTable<'a> {
    options: FxHashMap<String, ShippingOption<'a>>,
}

impl<'a> ShippingTable<'a> {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self {
            options: FxHashMap::default(),
        }
    }

    /// Builds a table from a list of options.
    pub fn from_options(options: impl IntoIterator<Item = ShippingOption<'a>>) -> Self {
        let mut table = Self::new();

        for option in options {
            table.insert(option);
        }

        table
    }

    /// Inserts an option, replacing any previous entry with the same id.
    pub fn insert(&mut self, option: ShippingOption<'a>) {
        self.options.insert(option.id.clone(), option);
    }

    /// Returns all options ordered by id, for stable listing.
    pub fn options(&self) -> Vec<&ShippingOption<'a>> {
        let mut options: Vec<_> = self.options.values().collect();
        options.sort_by(|a, b| a.id.cmp(&b.id));

        options
    }

    /// Number of options in the table.
    pub fn len(&self) -> usize {
        self.options.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }
}

impl<'a> ShippingLookup<'a> for ShippingTable<'a> {
    fn option(&self, id: &str) -> Option<&ShippingOption<'a>> {
        self.options.get(id)
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::PHP;

    use super::*;

    fn test_table() -> ShippingTable<'static> {
        ShippingTable::from_options([
            ShippingOption {
                id: "standard".to_string(),
                name: "Standard Delivery".to_string(),
                price: Money::from_minor(15_000, PHP),
                carrier: "LBC Express".to_string(),
            },
            ShippingOption {
                id: "express".to_string(),
                name: "Express Delivery".to_string(),
                price: Money::from_minor(32_000, PHP),
                carrier: "J&T Express".to_string(),
            },
        ])
    }

    #[test]
    fn option_resolves_known_ids() {
        let table = test_table();
        let option = table.option("standard");

        assert_eq!(
            option.map(|o| o.price),
            Some(Money::from_minor(15_000, PHP))
        );
    }

    #[test]
    fn option_returns_none_for_unknown_ids() {
        let table = test_table();

        assert!(table.option("teleport").is_none());
    }

    #[test]
    fn options_are_ordered_by_id() {
        let table = test_table();
        let ids: Vec<&str> = table.options().iter().map(|o| o.id.as_str()).collect();

        assert_eq!(ids, vec!["express", "standard"]);
    }

    #[test]
    fn len_and_is_empty() {
        let table = test_table();

        assert_eq!(table.len(), 2);
        assert!(!table.is_empty());
        assert!(ShippingTable::new().is_empty());
    }
}
