//! Validation and parsing of upstream records
//!
//! Raw records are rejected with [`CoreError::DataFormat`] when a field cannot
//! be trusted (missing or unparseable date, fractional or negative quantity,
//! negative price). Inconsistent but
//! usable data (an expiration date before the purchase date) is kept and
//! reported as a [`DataQualityWarning`].

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::Value;

use crate::error::{CoreError, CoreResult};
use crate::models::{InventoryRecord, RawInventoryRecord, RawSaleRecord, SaleRecord};

// ============================================================================
// Dates
// ============================================================================

fn parse_instant(field: &str, raw: &str) -> CoreResult<DateTime<FixedOffset>> {
    let value = raw.trim();

    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Ok(date.and_time(NaiveTime::MIN).and_utc().fixed_offset());
    }
    if let Ok(instant) = DateTime::parse_from_rfc3339(value) {
        return Ok(instant);
    }
    // Flask-style "Tue, 15 Oct 2024 00:00:00 GMT"
    if let Ok(instant) = DateTime::parse_from_rfc2822(value) {
        return Ok(instant);
    }

    Err(CoreError::data_format(
        field,
        format!("'{}' is not a recognized date", value),
    ))
}

/// Parse a calendar date field
///
/// Timestamps keep the calendar date of their own offset.
pub fn parse_date(field: &str, raw: &str) -> CoreResult<NaiveDate> {
    parse_instant(field, raw).map(|instant| instant.date_naive())
}

/// Parse a timestamp field; a bare date means midnight UTC
pub fn parse_timestamp(field: &str, raw: &str) -> CoreResult<DateTime<Utc>> {
    parse_instant(field, raw).map(|instant| instant.with_timezone(&Utc))
}

fn required<'a>(field: &str, raw: &'a Option<String>) -> CoreResult<&'a str> {
    raw.as_deref()
        .ok_or_else(|| CoreError::data_format(field, "Date is missing"))
}

fn required_date(field: &str, raw: &Option<String>) -> CoreResult<NaiveDate> {
    parse_date(field, required(field, raw)?)
}

// ============================================================================
// Numeric fields
// ============================================================================

/// Validate a monetary amount is non-negative
pub fn validate_price(price: Decimal) -> CoreResult<Decimal> {
    if price < Decimal::ZERO {
        return Err(CoreError::data_format("price", "Price cannot be negative"));
    }
    Ok(price)
}

/// Validate a unit count is a non-negative whole number that fits the record type
pub fn validate_quantity(raw: &Value) -> CoreResult<u32> {
    let quantity = match raw {
        Value::Number(number) => number.as_i64().ok_or_else(|| {
            CoreError::data_format("quantity", format!("'{}' is not a whole number", number))
        })?,
        Value::Null => {
            return Err(CoreError::data_format("quantity", "Quantity is missing"));
        }
        other => {
            return Err(CoreError::data_format(
                "quantity",
                format!("'{}' is not a number", other),
            ));
        }
    };
    if quantity < 0 {
        return Err(CoreError::data_format(
            "quantity",
            "Quantity cannot be negative",
        ));
    }
    u32::try_from(quantity)
        .map_err(|_| CoreError::data_format("quantity", "Quantity is out of range"))
}

fn validate_name(name: &str) -> CoreResult<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(CoreError::data_format("name", "Name cannot be empty"));
    }
    Ok(trimmed.to_string())
}

// ============================================================================
// Records
// ============================================================================

/// Non-fatal inconsistency found in an accepted record
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct DataQualityWarning {
    /// Name of the record the warning refers to
    pub record: String,
    pub field: String,
    pub message: String,
}

/// Records that passed validation, with any warnings raised along the way
#[derive(Debug, Clone)]
pub struct Parsed<T> {
    pub records: Vec<T>,
    pub warnings: Vec<DataQualityWarning>,
}

impl<T> Default for Parsed<T> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            warnings: Vec::new(),
        }
    }
}

/// Parse one raw inventory record
pub fn parse_inventory_record(raw: &RawInventoryRecord) -> CoreResult<InventoryRecord> {
    Ok(InventoryRecord {
        name: validate_name(&raw.name)?,
        price: validate_price(raw.price)?,
        purchase_date: required_date("purchase_date", &raw.purchase_date)?,
        expiration_date: required_date("expiration_date", &raw.expiration_date)?,
        quantity: validate_quantity(&raw.quantity)?,
        supplier: raw.supplier.trim().to_string(),
    })
}

/// Parse one raw sale record
pub fn parse_sale_record(raw: &RawSaleRecord) -> CoreResult<SaleRecord> {
    Ok(SaleRecord {
        name: validate_name(&raw.name)?,
        price: validate_price(raw.price)?,
        purchase_date: required_date("purchase_date", &raw.purchase_date)?,
        expiration_date: required_date("expiration_date", &raw.expiration_date)?,
        quantity: validate_quantity(&raw.quantity)?,
        supplier: raw.supplier.trim().to_string(),
        sale_date: parse_timestamp("sale_date", required("sale_date", &raw.sale_date)?)?,
    })
}

/// Data-quality checks for an accepted inventory record
pub fn check_inventory_record(record: &InventoryRecord) -> Vec<DataQualityWarning> {
    let mut warnings = Vec::new();
    if record.expiration_date < record.purchase_date {
        warnings.push(DataQualityWarning {
            record: record.name.clone(),
            field: "expiration_date".to_string(),
            message: "Expiration date precedes purchase date".to_string(),
        });
    }
    warnings
}

/// Data-quality checks for an accepted sale record
pub fn check_sale_record(record: &SaleRecord) -> Vec<DataQualityWarning> {
    let mut warnings = Vec::new();
    if record.expiration_date < record.purchase_date {
        warnings.push(DataQualityWarning {
            record: record.name.clone(),
            field: "expiration_date".to_string(),
            message: "Expiration date precedes purchase date".to_string(),
        });
    }
    if record.sale_date.date_naive() < record.purchase_date {
        warnings.push(DataQualityWarning {
            record: record.name.clone(),
            field: "sale_date".to_string(),
            message: "Sale date precedes purchase date".to_string(),
        });
    }
    warnings
}

/// Parse a batch of inventory records, failing on the first malformed one
pub fn parse_inventory(raw: &[RawInventoryRecord]) -> CoreResult<Parsed<InventoryRecord>> {
    let mut parsed = Parsed::default();
    for record in raw {
        let record = parse_inventory_record(record)?;
        parsed.warnings.extend(check_inventory_record(&record));
        parsed.records.push(record);
    }
    Ok(parsed)
}

/// Parse a batch of sale records, failing on the first malformed one
pub fn parse_sales(raw: &[RawSaleRecord]) -> CoreResult<Parsed<SaleRecord>> {
    let mut parsed = Parsed::default();
    for record in raw {
        let record = parse_sale_record(record)?;
        parsed.warnings.extend(check_sale_record(&record));
        parsed.records.push(record);
    }
    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    fn raw_item(purchase: &str, expiration: &str, quantity: i64) -> RawInventoryRecord {
        RawInventoryRecord {
            name: "Whole Milk".to_string(),
            price: Decimal::new(449, 2),
            purchase_date: Some(purchase.to_string()),
            expiration_date: Some(expiration.to_string()),
            quantity: Value::from(quantity),
            supplier: "Dairy Farms".to_string(),
        }
    }

    // ========================================================================
    // Date Parsing Tests
    // ========================================================================

    #[test]
    fn test_parse_date_iso() {
        let date = parse_date("purchase_date", "2024-10-15").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 10, 15).unwrap());
    }

    #[test]
    fn test_parse_date_rfc2822() {
        let date = parse_date("expiration_date", "Tue, 15 Oct 2024 00:00:00 GMT").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 10, 15).unwrap());
    }

    #[test]
    fn test_parse_date_rfc3339_keeps_local_calendar_date() {
        let date = parse_date("purchase_date", "2024-10-15T23:30:00-05:00").unwrap();
        assert_eq!(date.day(), 15);
    }

    #[test]
    fn test_parse_timestamp_date_only_is_midnight_utc() {
        let ts = parse_timestamp("sale_date", "2024-10-15").unwrap();
        assert_eq!(ts.hour(), 0);
        assert_eq!(ts.date_naive(), NaiveDate::from_ymd_opt(2024, 10, 15).unwrap());
    }

    #[test]
    fn test_parse_date_invalid_names_field() {
        let err = parse_date("expiration_date", "next tuesday").unwrap_err();
        assert_eq!(err.field(), Some("expiration_date"));
    }

    #[test]
    fn test_parse_date_rejects_impossible_date() {
        assert!(parse_date("purchase_date", "2024-02-30").is_err());
    }

    // ========================================================================
    // Record Tests
    // ========================================================================

    #[test]
    fn test_parse_inventory_record_valid() {
        let record = parse_inventory_record(&raw_item("2024-10-01", "2024-10-20", 80)).unwrap();
        assert_eq!(record.quantity, 80);
        assert_eq!(record.price, Decimal::new(449, 2));
    }

    #[test]
    fn test_parse_inventory_record_bad_date() {
        let err = parse_inventory_record(&raw_item("2024-10-01", "soon", 80)).unwrap_err();
        assert_eq!(err.field(), Some("expiration_date"));
    }

    #[test]
    fn test_parse_inventory_record_negative_quantity() {
        let err = parse_inventory_record(&raw_item("2024-10-01", "2024-10-20", -1)).unwrap_err();
        assert_eq!(err.field(), Some("quantity"));
    }

    #[test]
    fn test_parse_inventory_record_null_date_names_field() {
        let json = r#"{
            "Name": "Whole Milk",
            "Price": 4.49,
            "Purchase Date": "2024-10-01",
            "Expiration Date": null,
            "Quantity": 80
        }"#;
        let raw: RawInventoryRecord = serde_json::from_str(json).unwrap();
        let err = parse_inventory_record(&raw).unwrap_err();
        assert_eq!(err.field(), Some("expiration_date"));
    }

    #[test]
    fn test_parse_sale_record_missing_sale_date_names_field() {
        let json = r#"{
            "Name": "Whole Milk",
            "Price": 4.49,
            "Purchase Date": "2024-10-01",
            "Expiration Date": "2024-10-20",
            "Quantity": 2
        }"#;
        let raw: RawSaleRecord = serde_json::from_str(json).unwrap();
        assert_eq!(parse_sale_record(&raw).unwrap_err().field(), Some("sale_date"));
    }

    #[test]
    fn test_parse_inventory_record_fractional_quantity() {
        let json = r#"{
            "Name": "Whole Milk",
            "Price": 4.49,
            "Purchase Date": "2024-10-01",
            "Expiration Date": "2024-10-20",
            "Quantity": 1.5
        }"#;
        let raw: RawInventoryRecord = serde_json::from_str(json).unwrap();
        let err = parse_inventory_record(&raw).unwrap_err();
        assert_eq!(err.field(), Some("quantity"));
    }

    #[test]
    fn test_validate_quantity_rejects_text() {
        let err = validate_quantity(&Value::from("many")).unwrap_err();
        assert_eq!(err.field(), Some("quantity"));
    }

    #[test]
    fn test_parse_inventory_record_negative_price() {
        let mut raw = raw_item("2024-10-01", "2024-10-20", 5);
        raw.price = Decimal::new(-1, 0);
        let err = parse_inventory_record(&raw).unwrap_err();
        assert_eq!(err.field(), Some("price"));
    }

    #[test]
    fn test_parse_inventory_record_empty_name() {
        let mut raw = raw_item("2024-10-01", "2024-10-20", 5);
        raw.name = "  ".to_string();
        assert_eq!(parse_inventory_record(&raw).unwrap_err().field(), Some("name"));
    }

    #[test]
    fn test_expiration_before_purchase_is_warning() {
        let parsed = parse_inventory(&[raw_item("2024-10-20", "2024-10-01", 5)]).unwrap();
        assert_eq!(parsed.records.len(), 1);
        assert_eq!(parsed.warnings.len(), 1);
        assert_eq!(parsed.warnings[0].field, "expiration_date");
    }

    #[test]
    fn test_batch_fails_on_malformed_record() {
        let batch = vec![
            raw_item("2024-10-01", "2024-10-20", 5),
            raw_item("2024-10-01", "20/10/2024", 5),
        ];
        assert!(parse_inventory(&batch).is_err());
    }

    #[test]
    fn test_raw_record_accepts_title_case_keys() {
        let json = r#"{
            "Name": "Organic Bananas",
            "Price": 2.99,
            "Purchase Date": "Tue, 01 Oct 2024 00:00:00 GMT",
            "Expiration Date": "Tue, 15 Oct 2024 00:00:00 GMT",
            "Quantity": 150,
            "Supplier": "Fresh Farms",
            "Sale Date": "Thu, 03 Oct 2024 00:00:00 GMT"
        }"#;
        let raw: RawSaleRecord = serde_json::from_str(json).unwrap();
        let sale = parse_sale_record(&raw).unwrap();
        assert_eq!(sale.name, "Organic Bananas");
        assert_eq!(sale.sale_date.date_naive(), NaiveDate::from_ymd_opt(2024, 10, 3).unwrap());
        assert!(check_sale_record(&sale).is_empty());
    }

    #[test]
    fn test_sale_before_purchase_is_warning() {
        let raw = RawSaleRecord {
            name: "Whole Milk".to_string(),
            price: Decimal::new(449, 2),
            purchase_date: Some("2024-10-05".to_string()),
            expiration_date: Some("2024-10-20".to_string()),
            quantity: Value::from(2),
            supplier: String::new(),
            sale_date: Some("2024-10-01".to_string()),
        };
        let parsed = parse_sales(&[raw]).unwrap();
        assert_eq!(parsed.warnings[0].field, "sale_date");
    }
}
