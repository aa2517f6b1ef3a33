//! Fixtures
//!
//! YAML-backed reference data for demos and tests: a product catalog and a
//! shipping-option table, loaded as named sets from `fixtures/`.

use std::{fs, path::PathBuf};

use rusty_money::{Money, iso::Currency};
use thiserror::Error;

use crate::{
    carts::ProductId,
    products::{Catalog, Product},
    shipping::{ShippingOption, ShippingTable},
};

pub mod products;
pub mod shipping;

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid price format
    #[error("Invalid price format: {0}")]
    InvalidPrice(String),

    /// Unknown currency code
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    /// Currency mismatch within a fixture set
    #[error("Currency mismatch: expected {0}, found {1}")]
    CurrencyMismatch(String, String),

    /// Two products in a set share an id
    #[error("Duplicate product id: {0}")]
    DuplicateProduct(ProductId),

    /// No fixture set loaded yet
    #[error("No fixtures loaded yet; currency unknown")]
    NoCurrency,
}

/// A loaded fixture set: catalog, shipping options and their currency.
#[derive(Debug)]
pub struct Fixture {
    /// Base path for fixture files
    base_path: PathBuf,

    catalog: Catalog,
    shipping: ShippingTable<'static>,
    currency: Option<&'static Currency>,
}

impl Fixture {
    /// Creates a new empty fixture with the default base path.
    pub fn new() -> Self {
        Self::with_base_path("./fixtures")
    }

    /// Creates a new empty fixture with a custom base path.
    pub fn with_base_path(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
            catalog: Catalog::new(),
            shipping: ShippingTable::new(),
            currency: None,
        }
    }

    /// Loads products from a YAML fixture file into the catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, if an id is
    /// duplicated, or if there is a currency mismatch.
    pub fn load_products(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let file_path = self.base_path.join("products").join(format!("{name}.yml"));
        let contents = fs::read_to_string(&file_path)?;
        let fixture: products::ProductsFixture = serde_norway::from_str(&contents)?;

        for (_key, product_fixture) in fixture.products {
            let (price, currency) = products::parse_price(&product_fixture.price)?;

            self.check_currency(currency)?;

            let id = ProductId::new(product_fixture.id);

            if self.catalog.product(id).is_some() {
                return Err(FixtureError::DuplicateProduct(id));
            }

            self.catalog.insert(
                id,
                Product {
                    name: product_fixture.name,
                    price,
                },
            );
        }

        Ok(self)
    }

    /// Loads shipping options from a YAML fixture file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, if a price is
    /// not a two-decimal amount, or if there is a currency mismatch.
    pub fn load_shipping(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let file_path = self.base_path.join("shipping").join(format!("{name}.yml"));
        let contents = fs::read_to_string(&file_path)?;
        let fixture: shipping::ShippingFixture = serde_norway::from_str(&contents)?;

        for (id, option_fixture) in fixture.options {
            let (minor, currency) = shipping::parse_fee(&option_fixture.price)?;

            self.check_currency(currency)?;

            self.shipping.insert(ShippingOption {
                id,
                name: option_fixture.name,
                price: Money::from_minor(minor, currency),
                carrier: option_fixture.carrier,
            });
        }

        Ok(self)
    }

    /// Loads a complete fixture set (products and shipping with the same name).
    ///
    /// # Errors
    ///
    /// Returns an error if any of the fixture files cannot be loaded.
    pub fn from_set(name: &str) -> Result<Self, FixtureError> {
        let mut fixture = Self::new();

        fixture.load_products(name)?.load_shipping(name)?;

        Ok(fixture)
    }

    /// The loaded product catalog.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// The loaded shipping table.
    pub fn shipping(&self) -> &ShippingTable<'static> {
        &self.shipping
    }

    /// The currency of the loaded set.
    ///
    /// # Errors
    ///
    /// Returns an error if nothing has been loaded yet.
    pub fn currency(&self) -> Result<&'static Currency, FixtureError> {
        self.currency.ok_or(FixtureError::NoCurrency)
    }

    fn check_currency(&mut self, currency: &'static Currency) -> Result<(), FixtureError> {
        if let Some(existing) = self.currency {
            if existing != currency {
                return Err(FixtureError::CurrencyMismatch(
                    existing.iso_alpha_code.to_string(),
                    currency.iso_alpha_code.to_string(),
                ));
            }
        } else {
            self.currency = Some(currency);
        }

        Ok(())
    }
}

impl Default for Fixture {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::{fs, path::Path};

    use rusty_money::iso::PHP;
    use testresult::TestResult;

    use super::*;

    fn write_fixture(base: &Path, category: &str, name: &str, contents: &str) -> TestResult {
        let dir = base.join(category);

        fs::create_dir_all(&dir)?;
        fs::write(dir.join(format!("{name}.yml")), contents)?;

        Ok(())
    }

    #[test]
    fn fixture_loads_products_and_shipping() -> TestResult {
        let fixture = Fixture::from_set("handwoven")?;

        assert_eq!(fixture.catalog().len(), 4);
        assert_eq!(fixture.shipping().len(), 3);
        assert_eq!(fixture.currency()?, PHP);

        Ok(())
    }

    #[test]
    fn fixture_resolves_products_by_id() -> TestResult {
        let fixture = Fixture::from_set("handwoven")?;
        let blanket = fixture.catalog().product(ProductId::new(1));

        assert_eq!(blanket.map(|p| p.name.as_str()), Some("Inabel Blanket"));

        Ok(())
    }

    #[test]
    fn fixture_no_currency_returns_error() {
        let fixture = Fixture::new();
        let result = fixture.currency();

        assert!(matches!(result, Err(FixtureError::NoCurrency)));
    }

    #[test]
    fn fixture_missing_set_returns_io_error() {
        let mut fixture = Fixture::new();
        let result = fixture.load_products("nonexistent");

        assert!(matches!(result, Err(FixtureError::Io(_))));
    }

    #[test]
    fn fixture_rejects_currency_mismatch() -> TestResult {
        let base_dir = tempfile::tempdir()?;
        let base_path = base_dir.path();

        write_fixture(
            base_path,
            "products",
            "mixed",
            "products:\n  blanket:\n    id: 1\n    name: Blanket\n    price: 1500.00 PHP\n",
        )?;

        write_fixture(
            base_path,
            "shipping",
            "mixed",
            "options:\n  standard:\n    name: Standard\n    price: 5.00 USD\n    carrier: Post\n",
        )?;

        let mut fixture = Fixture::with_base_path(base_path);

        fixture.load_products("mixed")?;

        let result = fixture.load_shipping("mixed");

        assert!(matches!(result, Err(FixtureError::CurrencyMismatch(_, _))));

        Ok(())
    }

    #[test]
    fn fixture_rejects_duplicate_product_ids() -> TestResult {
        let base_dir = tempfile::tempdir()?;
        let base_path = base_dir.path();

        write_fixture(
            base_path,
            "products",
            "dupes",
            "products:\n  blanket:\n    id: 1\n    name: Blanket\n    price: 1500.00 PHP\n  runner:\n    id: 1\n    name: Runner\n    price: 850.00 PHP\n",
        )?;

        let mut fixture = Fixture::with_base_path(base_path);
        let result = fixture.load_products("dupes");

        assert!(matches!(result, Err(FixtureError::DuplicateProduct(_))));

        Ok(())
    }
}
