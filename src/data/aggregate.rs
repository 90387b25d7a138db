use std::collections::{BTreeMap, BTreeSet};

use chrono::{Datelike, Duration, NaiveDate};

use super::model::Dataset;

// ---------------------------------------------------------------------------
// Aggregates over the filtered table
// ---------------------------------------------------------------------------
//
// Every function here takes the immutable dataset plus the filtered index
// list and fully recomputes its result; nothing is cached between renders.

/// Headline figures shown above the charts.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Kpis {
    pub total_revenue: f64,
    pub avg_order_value: f64,
    pub total_units: u64,
    pub unique_products: usize,
}

pub fn compute_kpis(dataset: &Dataset, indices: &[usize]) -> Kpis {
    if indices.is_empty() {
        return Kpis::default();
    }

    let mut revenue = 0.0;
    let mut units = 0u64;
    let mut products: BTreeSet<&str> = BTreeSet::new();
    for &i in indices {
        let order = &dataset.orders[i];
        revenue += order.price;
        units += u64::from(order.quantity);
        products.insert(order.product_id.as_str());
    }

    Kpis {
        total_revenue: revenue,
        avg_order_value: revenue / indices.len() as f64,
        total_units: units,
        unique_products: products.len(),
    }
}

/// Revenue for one product, used by the top-sellers bar chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductRevenue {
    pub product_id: String,
    pub category: String,
    pub revenue: f64,
}

/// Group by (product, category), sum price, keep the `limit` largest.
/// Ties break on product id so the chart is stable across renders.
pub fn top_products(dataset: &Dataset, indices: &[usize], limit: usize) -> Vec<ProductRevenue> {
    let mut by_product: BTreeMap<(&str, &str), f64> = BTreeMap::new();
    for &i in indices {
        let order = &dataset.orders[i];
        *by_product
            .entry((order.product_id.as_str(), order.category.as_str()))
            .or_default() += order.price;
    }

    let mut rows: Vec<ProductRevenue> = by_product
        .into_iter()
        .map(|((product_id, category), revenue)| ProductRevenue {
            product_id: product_id.to_string(),
            category: category.to_string(),
            revenue,
        })
        .collect();
    rows.sort_by(|a, b| {
        b.revenue
            .total_cmp(&a.revenue)
            .then_with(|| a.product_id.cmp(&b.product_id))
    });
    rows.truncate(limit);
    rows
}

/// The Sunday on or after `date`; weekly buckets are labelled by the day
/// that ends the week.
pub fn week_ending(date: NaiveDate) -> NaiveDate {
    let days_to_sunday = (7 - date.weekday().num_days_from_sunday()) % 7;
    date + Duration::days(i64::from(days_to_sunday))
}

/// Revenue summed into weekly buckets, ascending by week.
pub fn weekly_revenue(dataset: &Dataset, indices: &[usize]) -> Vec<(NaiveDate, f64)> {
    let mut buckets: BTreeMap<NaiveDate, f64> = BTreeMap::new();
    for &i in indices {
        let order = &dataset.orders[i];
        *buckets.entry(week_ending(order.purchase_date())).or_default() += order.price;
    }
    buckets.into_iter().collect()
}

/// Totals for one side of the discount split.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SaleTotals {
    pub revenue: f64,
    pub payments: f64,
    pub units: u64,
}

/// Orders split by whether the payment fell short of the list price.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DiscountImpact {
    pub discounted: SaleTotals,
    pub full_price: SaleTotals,
}

pub fn discount_impact(dataset: &Dataset, indices: &[usize]) -> DiscountImpact {
    let mut impact = DiscountImpact::default();
    for &i in indices {
        let order = &dataset.orders[i];
        let side = if order.price - order.payment_value > 0.0 {
            &mut impact.discounted
        } else {
            &mut impact.full_price
        };
        side.revenue += order.price;
        side.payments += order.payment_value;
        side.units += u64::from(order.quantity);
    }
    impact
}

/// Pearson correlation between price and quantity over the filtered rows.
/// `None` when there are fewer than two rows or either column is constant.
pub fn price_quantity_correlation(dataset: &Dataset, indices: &[usize]) -> Option<f64> {
    if indices.len() < 2 {
        return None;
    }

    let n = indices.len() as f64;
    let (mut sum_p, mut sum_q) = (0.0, 0.0);
    for &i in indices {
        let order = &dataset.orders[i];
        sum_p += order.price;
        sum_q += f64::from(order.quantity);
    }
    let (mean_p, mean_q) = (sum_p / n, sum_q / n);

    let (mut cov, mut var_p, mut var_q) = (0.0, 0.0, 0.0);
    for &i in indices {
        let order = &dataset.orders[i];
        let dp = order.price - mean_p;
        let dq = f64::from(order.quantity) - mean_q;
        cov += dp * dq;
        var_p += dp * dp;
        var_q += dq * dq;
    }

    if var_p <= 0.0 || var_q <= 0.0 {
        return None;
    }
    Some(cov / (var_p.sqrt() * var_q.sqrt()))
}
