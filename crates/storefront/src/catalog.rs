//! Product catalog loaded from the content directory at startup.
//!
//! The catalog is the upstream source of product data: anything it hands
//! out is assumed valid by the cart, which treats product attributes as
//! opaque passthrough fields. It is loaded once from a JSON file and held
//! in memory for the life of the process.

use std::collections::HashSet;
use std::path::Path;

use potted_core::{Product, ProductId};
use thiserror::Error;

/// Errors that can occur while loading the catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to parse catalog file {path}: {source}")]
    Parse {
        path: String,
        source: serde_json::Error,
    },
    #[error("duplicate product id {0} in catalog")]
    DuplicateId(ProductId),
}

/// The in-memory product catalog.
///
/// Lookups are linear scans; the catalog is small and read-only.
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Build a catalog from a list of products.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::DuplicateId`] if two products share an id.
    pub fn from_products(products: Vec<Product>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::new();
        for product in &products {
            if !seen.insert(product.id) {
                return Err(CatalogError::DuplicateId(product.id));
            }
        }
        Ok(Self { products })
    }

    /// Load the catalog from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if it
    /// contains duplicate product ids.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let raw = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let products: Vec<Product> =
            serde_json::from_str(&raw).map_err(|source| CatalogError::Parse {
                path: path.display().to_string(),
                source,
            })?;

        let catalog = Self::from_products(products)?;
        tracing::info!(products = catalog.len(), "Catalog loaded");
        Ok(catalog)
    }

    /// All products, in catalog order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Look up a product by id.
    #[must_use]
    pub fn by_id(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Look up a product by handle.
    #[must_use]
    pub fn by_handle(&self, handle: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.handle == handle)
    }

    /// The first `count` products, for the landing page's featured section.
    #[must_use]
    pub fn featured(&self, count: usize) -> &[Product] {
        self.products.get(..count.min(self.products.len())).unwrap_or(&[])
    }

    /// Number of products in the catalog.
    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Whether the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn parse_products(json: &str) -> Vec<Product> {
        serde_json::from_str(json).unwrap()
    }

    const TWO_PLANTS: &str = r#"[
        {"id": 1, "handle": "monstera-deliciosa", "title": "Monstera Deliciosa",
         "price": {"amount": "38.00", "currency_code": "USD"}},
        {"id": 2, "handle": "snake-plant", "title": "Snake Plant",
         "price": {"amount": "24.00", "currency_code": "USD"}}
    ]"#;

    #[test]
    fn test_from_products_accepts_unique_ids() {
        let catalog = Catalog::from_products(parse_products(TWO_PLANTS)).unwrap();
        assert_eq!(catalog.len(), 2);
    }

    #[test]
    fn test_from_products_rejects_duplicate_ids() {
        let duplicated = r#"[
            {"id": 1, "handle": "a", "title": "A", "price": {"amount": "1.00"}},
            {"id": 1, "handle": "b", "title": "B", "price": {"amount": "2.00"}}
        ]"#;
        let err = Catalog::from_products(parse_products(duplicated)).unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateId(id) if id == ProductId::new(1)));
    }

    #[test]
    fn test_lookup_by_id_and_handle() {
        let catalog = Catalog::from_products(parse_products(TWO_PLANTS)).unwrap();

        let by_id = catalog.by_id(ProductId::new(2)).unwrap();
        assert_eq!(by_id.title, "Snake Plant");

        let by_handle = catalog.by_handle("monstera-deliciosa").unwrap();
        assert_eq!(by_handle.id, ProductId::new(1));

        assert!(catalog.by_id(ProductId::new(99)).is_none());
        assert!(catalog.by_handle("no-such-plant").is_none());
    }

    #[test]
    fn test_featured_clamps_to_catalog_size() {
        let catalog = Catalog::from_products(parse_products(TWO_PLANTS)).unwrap();
        assert_eq!(catalog.featured(1).len(), 1);
        assert_eq!(catalog.featured(10).len(), 2);
    }

    #[test]
    fn test_load_reports_missing_file() {
        let err = Catalog::load(Path::new("/nonexistent/catalog.json")).unwrap_err();
        assert!(matches!(err, CatalogError::Io { .. }));
    }
}
