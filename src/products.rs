//! Products

use rust_decimal::Decimal;
use rustc_hash::FxHashMap;

use crate::carts::ProductId;

/// A catalog product.
///
/// The unit price is carried in major units. Catalog prices are normally
/// two-decimal values, but the lookup seam tolerates finer precision so that
/// per-line extensions stay unrounded until the subtotal is aggregated.
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    /// Product name.
    pub name: String,

    /// Unit price in major units.
    pub price: Decimal,
}

/// Resolves the current unit price of a product.
///
/// Implementations are treated as black boxes by the totals calculator; a
/// `None` means the product is no longer in the catalog.
pub trait PriceLookup {
    /// Returns the current unit price for the product, if it exists.
    fn unit_price(&self, product: ProductId) -> Option<Decimal>;
}

/// In-memory product catalog.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: FxHashMap<ProductId, Product>,
}

impl Catalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a product, replacing any previous entry with the same id.
    pub fn insert(&mut self, id: ProductId, product: Product) {
        self.products.insert(id, product);
    }

    /// Returns the product with the given id, if present.
    pub fn product(&self, id: ProductId) -> Option<&Product> {
        self.products.get(&id)
    }

    /// Returns all products ordered by id.
    pub fn products(&self) -> Vec<(ProductId, &Product)> {
        let mut products: Vec<_> = self.products.iter().map(|(id, p)| (*id, p)).collect();
        products.sort_by_key(|(id, _)| *id);

        products
    }

    /// Number of products in the catalog.
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

impl PriceLookup for Catalog {
    fn unit_price(&self, product: ProductId) -> Option<Decimal> {
        self.products.get(&product).map(|p| p.price)
    }
}
