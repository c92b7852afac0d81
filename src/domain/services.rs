//! Workflow rules for the storefront.
//!
//! Pure functions governing what user actions are allowed to do: currency
//! formatting for Malawian Kwacha, client-side validation of the product
//! form, and CSV export of the product listing.

use super::errors::{DomainError, DomainResult};
use super::models::Product;

/// Formats a price in integer Malawian Kwacha for display.
///
/// Prices are whole Kwacha: digits are grouped in thousands, there are no
/// decimal places and no rounding. An absent price renders as zero.
///
/// # Examples
///
/// ```
/// use pay265::domain::format_mwk;
///
/// assert_eq!(format_mwk(None), "MWK 0");
/// assert_eq!(format_mwk(Some(500)), "MWK 500");
/// assert_eq!(format_mwk(Some(15000)), "MWK 15,000");
/// assert_eq!(format_mwk(Some(1234567)), "MWK 1,234,567");
/// ```
pub fn format_mwk(price: Option<u64>) -> String {
    let n = price.unwrap_or(0);
    let digits = n.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("MWK {}", grouped)
}

/// Validates the raw product form input before any backend call.
///
/// Title and price must both be present and the price must parse as a
/// non-negative integer. Returns the cleaned title and price on success.
///
/// # Errors
///
/// `DomainError::Validation` when a required field is missing or the price
/// is not a number. The backend is never contacted on this path.
pub fn validate_product_input(title: &str, price: &str) -> DomainResult<(String, u64)> {
    if title.is_empty() || price.is_empty() {
        return Err(DomainError::Validation("add title and price".to_string()));
    }
    let price_mwk = price
        .parse::<u64>()
        .map_err(|_| DomainError::Validation(format!("price '{}' is not a whole number", price)))?;
    Ok((title.to_string(), price_mwk))
}

pub struct CsvExporter;

impl CsvExporter {
    /// Writes the product listing to a CSV file.
    ///
    /// One row per product in the order given (newest first as listed),
    /// with the store's column names. Returns the filename on success.
    pub fn export_products(products: &[Product], filename: &str) -> Result<String, String> {
        let mut writer = csv::Writer::from_path(filename).map_err(|e| e.to_string())?;
        writer
            .write_record(["id", "title", "price_mwk", "seller_name", "district", "status"])
            .map_err(|e| e.to_string())?;
        for product in products {
            writer
                .write_record([
                    product.id.to_string(),
                    product.title.clone(),
                    product.price_mwk.unwrap_or(0).to_string(),
                    product.seller_name.clone(),
                    product.district.label().to_string(),
                    product.status().label().to_string(),
                ])
                .map_err(|e| e.to_string())?;
        }
        writer.flush().map_err(|e| e.to_string())?;
        Ok(filename.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::{District, ProductStatus};

    #[test]
    fn test_format_mwk_empty_is_zero() {
        assert_eq!(format_mwk(None), "MWK 0");
        assert_eq!(format_mwk(Some(0)), "MWK 0");
    }

    #[test]
    fn test_format_mwk_groups_thousands() {
        assert_eq!(format_mwk(Some(1)), "MWK 1");
        assert_eq!(format_mwk(Some(999)), "MWK 999");
        assert_eq!(format_mwk(Some(1000)), "MWK 1,000");
        assert_eq!(format_mwk(Some(15000)), "MWK 15,000");
        assert_eq!(format_mwk(Some(100000)), "MWK 100,000");
        assert_eq!(format_mwk(Some(2500000)), "MWK 2,500,000");
    }

    #[test]
    fn test_validate_rejects_missing_fields() {
        assert!(matches!(
            validate_product_input("", "500"),
            Err(DomainError::Validation(_))
        ));
        assert!(matches!(
            validate_product_input("Maize bag", ""),
            Err(DomainError::Validation(_))
        ));
        assert!(matches!(
            validate_product_input("", ""),
            Err(DomainError::Validation(_))
        ));
    }

    #[test]
    fn test_validate_rejects_non_numeric_price() {
        assert!(matches!(
            validate_product_input("Maize bag", "cheap"),
            Err(DomainError::Validation(_))
        ));
        assert!(matches!(
            validate_product_input("Maize bag", "-5"),
            Err(DomainError::Validation(_))
        ));
        assert!(matches!(
            validate_product_input("Maize bag", "12.50"),
            Err(DomainError::Validation(_))
        ));
    }

    #[test]
    fn test_validate_accepts_whole_prices() {
        assert_eq!(
            validate_product_input("Maize bag", "15000"),
            Ok(("Maize bag".to_string(), 15000))
        );
    }

    #[test]
    fn test_csv_export_writes_listing() {
        let products = vec![
            Product {
                id: 2,
                title: "Maize bag".to_string(),
                price_mwk: Some(15000),
                seller_name: "Grace".to_string(),
                district: District::Zomba,
                status: None,
            },
            Product {
                id: 1,
                title: "Charcoal".to_string(),
                price_mwk: None,
                seller_name: "Chimwemwe".to_string(),
                district: District::Mzimba,
                status: Some(ProductStatus::Available),
            },
        ];

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("listing.csv");
        let filename = path.to_str().unwrap();

        let result = CsvExporter::export_products(&products, filename);
        assert_eq!(result, Ok(filename.to_string()));

        let content = std::fs::read_to_string(filename).unwrap();
        let mut lines = content.lines();
        assert_eq!(
            lines.next().unwrap(),
            "id,title,price_mwk,seller_name,district,status"
        );
        assert_eq!(lines.next().unwrap(), "2,Maize bag,15000,Grace,Zomba,available");
        assert_eq!(lines.next().unwrap(), "1,Charcoal,0,Chimwemwe,Mzimba,available");
    }

    #[test]
    fn test_csv_export_bad_path_fails() {
        let result = CsvExporter::export_products(&[], "/nonexistent-dir/listing.csv");
        assert!(result.is_err());
    }
}
