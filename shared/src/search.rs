//! Name search over inventory snapshots

/// Anything listed on the dashboard under a display name
pub trait Named {
    fn name(&self) -> &str;
}

impl Named for crate::models::InventoryRecord {
    fn name(&self) -> &str {
        &self.name
    }
}

/// Case-insensitive substring match on the name; order is preserved
pub fn filter_by_name<'a, T: Named>(items: &'a [T], query: &str) -> Vec<&'a T> {
    let needle = query.trim().to_lowercase();
    items
        .iter()
        .filter(|item| needle.is_empty() || item.name().to_lowercase().contains(&needle))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::InventoryRecord;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    fn item(name: &str) -> InventoryRecord {
        InventoryRecord {
            name: name.to_string(),
            price: Decimal::ONE,
            purchase_date: NaiveDate::from_ymd_opt(2024, 10, 1).unwrap(),
            expiration_date: NaiveDate::from_ymd_opt(2024, 10, 30).unwrap(),
            quantity: 1,
            supplier: String::new(),
        }
    }

    #[test]
    fn test_filter_is_case_insensitive() {
        let items = vec![item("Organic Bananas"), item("Whole Milk"), item("Banana Bread")];
        let found: Vec<&str> = filter_by_name(&items, "BANANA")
            .into_iter()
            .map(|i| i.name.as_str())
            .collect();
        assert_eq!(found, vec!["Organic Bananas", "Banana Bread"]);
    }

    #[test]
    fn test_empty_query_returns_everything() {
        let items = vec![item("Organic Bananas"), item("Whole Milk")];
        assert_eq!(filter_by_name(&items, "  ").len(), 2);
    }

    #[test]
    fn test_no_match() {
        let items = vec![item("Whole Milk")];
        assert!(filter_by_name(&items, "eggs").is_empty());
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn prop_matches_ignore_case(names in prop::collection::vec("[A-Za-z ]{1,12}", 0..10), query in "[a-z]{0,3}") {
                let items: Vec<InventoryRecord> = names.iter().map(|name| item(name)).collect();
                let upper = query.to_uppercase();
                let lower: Vec<&str> = filter_by_name(&items, &query).iter().map(|i| i.name.as_str()).collect();
                let shouted: Vec<&str> = filter_by_name(&items, &upper).iter().map(|i| i.name.as_str()).collect();
                prop_assert_eq!(lower, shouted);
            }

            #[test]
            fn prop_results_are_a_subsequence(names in prop::collection::vec("[a-z]{1,8}", 0..10), query in "[a-z]{0,2}") {
                let items: Vec<InventoryRecord> = names.iter().map(|name| item(name)).collect();
                let found = filter_by_name(&items, &query);
                let mut remaining = items.iter();
                for hit in found {
                    prop_assert!(remaining.any(|candidate| std::ptr::eq(candidate, hit)));
                }
            }
        }
    }
}
