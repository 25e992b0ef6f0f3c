//! JSON product source
//!
//! The catalog document is a JSON array of product objects. Entries without
//! an id are skipped; other missing fields fall back to defaults.

use std::path::PathBuf;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::application::ports::ProductSource;
use crate::domain::{DomainError, DomainResult, Product};

/// Reads the catalog from a JSON file on every load.
pub struct JsonFileProductSource {
    path: PathBuf,
}

impl JsonFileProductSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl ProductSource for JsonFileProductSource {
    async fn load_catalog(&self) -> DomainResult<Vec<Product>> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                warn!(path = %self.path.display(), "Product file not found, catalog is empty");
                return Ok(Vec::new());
            }
            Err(e) => {
                return Err(DomainError::CatalogSource(format!(
                    "{}: {}",
                    self.path.display(),
                    e
                )))
            }
        };

        let products = parse_catalog(&raw)?;
        info!(path = %self.path.display(), count = products.len(), "Catalog loaded");
        Ok(products)
    }
}

fn parse_catalog(raw: &str) -> DomainResult<Vec<Product>> {
    if raw.trim().is_empty() {
        return Ok(Vec::new());
    }
    let products: Vec<Product> = serde_json::from_str(raw)
        .map_err(|e| DomainError::CatalogSource(format!("invalid catalog JSON: {}", e)))?;

    let total = products.len();
    let products: Vec<Product> = products.into_iter().filter(|p| !p.id.is_empty()).collect();
    if products.len() != total {
        warn!(skipped = total - products.len(), "Skipped products without an id");
    }
    Ok(products)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use std::io::Write;

    #[tokio::test]
    async fn loads_products_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[
                {{"id": "a", "name": "Phone X", "price": 5000, "specs": "128GB"}},
                {{"id": "b", "name": "Tablet Y", "price": 3000, "sizeType": ""}},
                {{"name": "No id"}}
            ]"#
        )
        .unwrap();

        let products = JsonFileProductSource::new(file.path())
            .load_catalog()
            .await
            .unwrap();
        assert_eq!(products.len(), 2);
        assert_eq!(products[0].price, Decimal::from(5000));
        assert_eq!(products[0].specs, "128GB");
    }

    #[tokio::test]
    async fn missing_file_is_an_empty_catalog() {
        let dir = tempfile::tempdir().unwrap();
        let source = JsonFileProductSource::new(dir.path().join("products.json"));
        assert!(source.load_catalog().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn malformed_json_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();
        let result = JsonFileProductSource::new(file.path()).load_catalog().await;
        assert!(matches!(result, Err(DomainError::CatalogSource(_))));
    }
}
