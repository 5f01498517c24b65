//! WebAssembly module for the IntelliStock dashboard
//!
//! Provides client-side computation for:
//! - Inventory health assessment
//! - Dashboard summary cards
//! - Demand trends and signal outlooks
//! - Inventory search
//!
//! All functions exchange JSON strings with JavaScript. Raw records use the
//! upstream field names ("Name", "Purchase Date", ...).

use chrono::{DateTime, NaiveDate, Utc};
use shared::{
    filter_by_name, parse_date, parse_inventory, parse_sales, trend, weekly_revenue_series,
    AggregateStatsCalculator, DataQualityWarning, RawInventoryRecord, RawSaleRecord,
    ShipmentOrder, SignalOutlook, StatusClassifier, Thresholds,
};
use wasm_bindgen::prelude::*;

/// Weeks of revenue compared by the trend banner
const TREND_WEEKS: u32 = 2;

// Re-export shared types for use in JavaScript
pub use shared::models::*;
pub use shared::types::*;

/// Current time in milliseconds since the Unix epoch, from the browser clock
#[wasm_bindgen]
pub fn now_ms() -> f64 {
    js_sys::Date::now()
}

/// Classify a single item from its quantity and days until expiration
#[wasm_bindgen]
pub fn classify_item(
    quantity: u32,
    days_until_expiration: i64,
    low_stock: u32,
    expiration_proximity_days: i64,
) -> String {
    let classifier = StatusClassifier::new(Thresholds::new(low_stock, expiration_proximity_days));
    format!("{}", classifier.classify(quantity, days_until_expiration))
}

/// Assess raw inventory and sales snapshots as of `today` (YYYY-MM-DD)
///
/// Returns a JSON array of assessments.
#[wasm_bindgen]
pub fn assess_inventory(
    inventory_json: &str,
    sales_json: &str,
    today: &str,
    low_stock: u32,
    expiration_proximity_days: i64,
) -> Result<String, JsValue> {
    let thresholds = Thresholds::new(low_stock, expiration_proximity_days);
    let (json, warnings) = assess_inventory_json(inventory_json, sales_json, today, thresholds)
        .map_err(|e| JsValue::from_str(&e))?;
    log_warnings(&warnings);
    Ok(json)
}

/// Summary cards for raw snapshots as of `now_ms`
///
/// The trend compares last week's revenue with this week's, as the server does.
/// Fails on a non-finite `now_ms` (what `new Date("bad").getTime()` yields).
#[wasm_bindgen]
pub fn dashboard_summary(
    inventory_json: &str,
    sales_json: &str,
    orders_json: &str,
    low_stock: u32,
    expiration_proximity_days: i64,
    now_ms: f64,
) -> Result<String, JsValue> {
    let (json, warnings) = summary_json(
        inventory_json,
        sales_json,
        orders_json,
        Thresholds::new(low_stock, expiration_proximity_days),
        now_ms,
    )
    .map_err(|e| JsValue::from_str(&e))?;
    log_warnings(&warnings);
    Ok(json)
}

/// Trend of an ordered series as `{percent_change, direction}` JSON
#[wasm_bindgen]
pub fn trend_percent_change(values_json: &str) -> Result<String, JsValue> {
    trend_json(values_json).map_err(|e| JsValue::from_str(&e))
}

/// Outlook label for a demand source's percent trend
#[wasm_bindgen]
pub fn signal_outlook(trend_percent: f64) -> String {
    format!("{}", SignalOutlook::from_trend(trend_percent))
}

/// Filter raw inventory records by name, case-insensitively
#[wasm_bindgen]
pub fn filter_inventory(inventory_json: &str, query: &str) -> Result<String, JsValue> {
    filter_json(inventory_json, query).map_err(|e| JsValue::from_str(&e))
}

fn log_warnings(warnings: &[DataQualityWarning]) {
    for warning in warnings {
        web_sys::console::warn_1(&JsValue::from_str(&format!(
            "{} ({}): {}",
            warning.record, warning.field, warning.message
        )));
    }
}

fn from_json<T: serde::de::DeserializeOwned>(label: &str, json: &str) -> Result<T, String> {
    serde_json::from_str(json).map_err(|e| format!("Invalid {} JSON: {}", label, e))
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string(value).map_err(|e| format!("Serialization error: {}", e))
}

fn assess_inventory_json(
    inventory_json: &str,
    sales_json: &str,
    today: &str,
    thresholds: Thresholds,
) -> Result<(String, Vec<DataQualityWarning>), String> {
    let today: NaiveDate = parse_date("today", today).map_err(|e| e.to_string())?;
    let raw_inventory: Vec<RawInventoryRecord> = from_json("inventory", inventory_json)?;
    let raw_sales: Vec<RawSaleRecord> = from_json("sales", sales_json)?;

    let inventory = parse_inventory(&raw_inventory).map_err(|e| e.to_string())?;
    let sales = parse_sales(&raw_sales).map_err(|e| e.to_string())?;

    let assessments =
        StatusClassifier::new(thresholds).assess_all(&inventory.records, &sales.records, today);

    let mut warnings = inventory.warnings;
    warnings.extend(sales.warnings);
    Ok((to_json(&assessments)?, warnings))
}

fn summary_json(
    inventory_json: &str,
    sales_json: &str,
    orders_json: &str,
    thresholds: Thresholds,
    now_ms: f64,
) -> Result<(String, Vec<DataQualityWarning>), String> {
    if !now_ms.is_finite() {
        return Err(format!("Invalid timestamp: {}", now_ms));
    }
    let now: DateTime<Utc> = DateTime::from_timestamp_millis(now_ms as i64)
        .ok_or_else(|| format!("Invalid timestamp: {}", now_ms))?;
    let raw_inventory: Vec<RawInventoryRecord> = from_json("inventory", inventory_json)?;
    let raw_sales: Vec<RawSaleRecord> = from_json("sales", sales_json)?;
    let orders: Vec<ShipmentOrder> = from_json("orders", orders_json)?;

    let inventory = parse_inventory(&raw_inventory).map_err(|e| e.to_string())?;
    let sales = parse_sales(&raw_sales).map_err(|e| e.to_string())?;

    let revenue = weekly_revenue_series(&sales.records, now, TREND_WEEKS);
    let summary = AggregateStatsCalculator::new(thresholds).summarize(
        &inventory.records,
        &sales.records,
        &orders,
        &revenue,
        now,
    );

    let mut warnings = inventory.warnings;
    warnings.extend(sales.warnings);
    Ok((to_json(&summary)?, warnings))
}

fn trend_json(values_json: &str) -> Result<String, String> {
    let values: Vec<f64> = from_json("series", values_json)?;
    let result = trend(&values).map_err(|e| e.to_string())?;
    to_json(&result)
}

fn filter_json(inventory_json: &str, query: &str) -> Result<String, String> {
    let records: Vec<RawInventoryRecord> = from_json("inventory", inventory_json)?;
    let inventory = parse_inventory(&records).map_err(|e| e.to_string())?;
    to_json(&filter_by_name(&inventory.records, query))
}

#[cfg(test)]
mod tests {
    use super::*;

    const INVENTORY: &str = r#"[
        {"Name": "Whole Milk", "Price": 4.49, "Purchase Date": "2024-10-08",
         "Expiration Date": "2024-10-18", "Quantity": 80, "Supplier": "Valley Dairy"},
        {"Name": "Greek Yogurt", "Price": 1.99, "Purchase Date": "2024-10-05",
         "Expiration Date": "2024-11-05", "Quantity": 6, "Supplier": "Valley Dairy"}
    ]"#;

    const SALES: &str = r#"[
        {"Name": "Whole Milk", "Price": 4.49, "Purchase Date": "2024-10-08",
         "Expiration Date": "2024-10-18", "Quantity": 12, "Supplier": "Valley Dairy",
         "Sale Date": "2024-10-11"}
    ]"#;

    const TWO_WEEKS_OF_SALES: &str = r#"[
        {"Name": "Greek Yogurt", "Price": 1.99, "Purchase Date": "2024-10-01",
         "Expiration Date": "2024-11-05", "Quantity": 5, "Supplier": "Valley Dairy",
         "Sale Date": "2024-10-04"},
        {"Name": "Whole Milk", "Price": 4.49, "Purchase Date": "2024-10-08",
         "Expiration Date": "2024-10-18", "Quantity": 12, "Supplier": "Valley Dairy",
         "Sale Date": "2024-10-11"}
    ]"#;

    // 2024-10-15T00:00:00Z
    const NOW_MS: f64 = 1_728_950_400_000.0;

    fn thresholds() -> Thresholds {
        Thresholds::new(10, 3)
    }

    #[test]
    fn test_classify_item() {
        assert_eq!(classify_item(500, -1, 10, 3), "Expired");
        assert_eq!(classify_item(100, 3, 10, 3), "Critical Near Expiration");
        assert_eq!(classify_item(5, 30, 10, 3), "Low Stock");
        assert_eq!(classify_item(50, 30, 10, 3), "Healthy Stock");
    }

    #[test]
    fn test_signal_outlook() {
        assert_eq!(signal_outlook(12.5), "Growing demand");
        assert_eq!(signal_outlook(0.0), "Stable demand");
        assert_eq!(signal_outlook(-10.0), "Cooling demand");
    }

    #[test]
    fn test_assess_inventory() {
        let (json, warnings) =
            assess_inventory_json(INVENTORY, SALES, "2024-10-15", thresholds()).unwrap();
        let assessments: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert!(warnings.is_empty());
        assert_eq!(assessments[0]["status"], "critical_near_expiration");
        assert!(assessments[0]["predicted_quantity_at_expiration"].is_null());
        assert_eq!(assessments[1]["status"], "low_stock");
    }

    #[test]
    fn test_assess_inventory_rejects_bad_date() {
        let err = assess_inventory_json(INVENTORY, SALES, "15.10.2024", thresholds()).unwrap_err();
        assert!(err.contains("today"));
    }

    #[test]
    fn test_summary() {
        let (json, _) =
            summary_json(INVENTORY, TWO_WEEKS_OF_SALES, "[]", thresholds(), NOW_MS).unwrap();
        let summary: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(summary["total_items"], 2);
        assert_eq!(summary["low_stock_count"], 1);
        assert_eq!(summary["weekly_sales"], "53.88");
        assert_eq!(summary["trend"]["direction"], "up");
    }

    #[test]
    fn test_summary_without_last_week_has_no_trend() {
        let (json, _) = summary_json(INVENTORY, SALES, "[]", thresholds(), NOW_MS).unwrap();
        let summary: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert!(summary["trend"].is_null());
    }

    #[test]
    fn test_summary_rejects_non_finite_now() {
        let old_sale = r#"[
            {"Name": "Whole Milk", "Price": 1, "Purchase Date": "1969-12-30",
             "Expiration Date": "1970-01-05", "Quantity": 1, "Sale Date": "1969-12-31"}
        ]"#;
        for now in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let err = summary_json("[]", old_sale, "[]", thresholds(), now).unwrap_err();
            assert!(err.contains("Invalid timestamp"));
        }
    }

    #[test]
    fn test_assess_inventory_null_date_names_field() {
        let inventory = r#"[
            {"Name": "Whole Milk", "Price": 4.49, "Purchase Date": "2024-10-08",
             "Expiration Date": null, "Quantity": 80}
        ]"#;
        let err = assess_inventory_json(inventory, "[]", "2024-10-15", thresholds()).unwrap_err();
        assert!(err.contains("expiration_date"));
    }

    #[test]
    fn test_assess_inventory_fractional_quantity_names_field() {
        let inventory = r#"[
            {"Name": "Whole Milk", "Price": 4.49, "Purchase Date": "2024-10-08",
             "Expiration Date": "2024-10-18", "Quantity": 1.5}
        ]"#;
        let err = assess_inventory_json(inventory, "[]", "2024-10-15", thresholds()).unwrap_err();
        assert!(err.contains("quantity"));
    }

    #[test]
    fn test_trend_zero_baseline() {
        assert!(trend_json("[0, 50]").is_err());
        let json = trend_json("[100, 50]").unwrap();
        assert!(json.contains("\"down\""));
    }

    #[test]
    fn test_filter_inventory() {
        let json = filter_json(INVENTORY, "YOGURT").unwrap();
        let items: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(items.as_array().unwrap().len(), 1);
        assert_eq!(items[0]["name"], "Greek Yogurt");
    }
}
