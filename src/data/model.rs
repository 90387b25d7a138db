use std::collections::BTreeSet;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Serialize, Serializer};

// ---------------------------------------------------------------------------
// Order – one row of the source tables
// ---------------------------------------------------------------------------

/// A single purchased line item. The field names map onto the source
/// dataset's columns via serde renames, so exporting a filtered subset
/// reproduces the original header row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Order {
    pub product_id: String,
    #[serde(rename = "product_category_name")]
    pub category: String,
    #[serde(rename = "order_purchase_timestamp", serialize_with = "serialize_timestamp")]
    pub purchased_at: NaiveDateTime,
    pub price: f64,
    pub payment_value: f64,
    pub freight_value: f64,
    pub product_weight_g: f64,
    pub quantity: u32,
}

impl Order {
    /// Calendar date of the purchase; all date-range filtering compares on
    /// this, not on the full timestamp.
    pub fn purchase_date(&self) -> NaiveDate {
        self.purchased_at.date()
    }
}

fn serialize_timestamp<S: Serializer>(ts: &NaiveDateTime, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&ts.format("%Y-%m-%d %H:%M:%S").to_string())
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The full loaded table with pre-computed column indexes. Built once at
/// startup and never mutated afterwards; the view layer only ever derives
/// filtered index lists from it.
#[derive(Debug, Clone)]
pub struct Dataset {
    /// All orders (rows), in load order.
    pub orders: Vec<Order>,
    /// Sorted unique category names.
    pub categories: Vec<String>,
    /// Earliest purchase date in the table.
    pub first_date: NaiveDate,
    /// Latest purchase date in the table.
    pub last_date: NaiveDate,
}

impl Dataset {
    /// Build the category and date indexes from the loaded orders.
    pub fn from_orders(orders: Vec<Order>) -> Self {
        let mut categories: BTreeSet<String> = BTreeSet::new();
        let mut first_date: Option<NaiveDate> = None;
        let mut last_date: Option<NaiveDate> = None;

        for order in &orders {
            categories.insert(order.category.clone());
            let date = order.purchase_date();
            first_date = Some(first_date.map_or(date, |d| d.min(date)));
            last_date = Some(last_date.map_or(date, |d| d.max(date)));
        }

        Dataset {
            orders,
            categories: categories.into_iter().collect(),
            first_date: first_date.unwrap_or_default(),
            last_date: last_date.unwrap_or_default(),
        }
    }

    /// Number of orders.
    pub fn len(&self) -> usize {
        self.orders.len()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Shorthand order constructor shared by the data-layer tests.
    pub(crate) fn order(date: &str, category: &str, price: f64) -> Order {
        let purchased_at = NaiveDate::parse_from_str(date, "%Y-%m-%d")
            .expect("test date")
            .and_hms_opt(12, 0, 0)
            .expect("test time");
        Order {
            product_id: format!("P-{category}-{price}"),
            category: category.to_string(),
            purchased_at,
            price,
            payment_value: price,
            freight_value: 10.0,
            product_weight_g: 500.0,
            quantity: 1,
        }
    }

    #[test]
    fn indexes_are_built_from_orders() {
        let ds = Dataset::from_orders(vec![
            order("2023-02-01", "toys", 10.0),
            order("2023-01-01", "books", 20.0),
            order("2023-01-15", "toys", 30.0),
        ]);

        assert_eq!(ds.len(), 3);
        assert_eq!(ds.categories, vec!["books".to_string(), "toys".to_string()]);
        assert_eq!(ds.first_date, NaiveDate::from_ymd_opt(2023, 1, 1).unwrap());
        assert_eq!(ds.last_date, NaiveDate::from_ymd_opt(2023, 2, 1).unwrap());
    }

    #[test]
    fn empty_dataset_is_allowed() {
        let ds = Dataset::from_orders(Vec::new());
        assert!(ds.is_empty());
        assert!(ds.categories.is_empty());
    }
}
