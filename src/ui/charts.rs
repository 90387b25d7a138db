use chrono::{Datelike, NaiveDate};
use eframe::egui::{Color32, RichText, ScrollArea, Ui};
use egui_plot::{Bar, BarChart, Legend, Line, Plot, PlotPoints, Points};

use crate::data::aggregate;
use crate::state::AppState;

const TOP_PRODUCT_LIMIT: usize = 10;
const CHART_HEIGHT: f32 = 240.0;

const REVENUE_COLOR: Color32 = Color32::from_rgb(52, 152, 219);
const PAYMENT_COLOR: Color32 = Color32::from_rgb(46, 204, 113);

// ---------------------------------------------------------------------------
// Central panel – KPIs and charts
// ---------------------------------------------------------------------------

/// Render the dashboard body: KPI row plus the four charts, recomputed
/// from the filtered rows on every frame.
pub fn central_panel(ui: &mut Ui, state: &AppState) {
    if state.dataset.is_empty() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a data file to get started  (File → Open…)");
        });
        return;
    }

    if state.visible.is_empty() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("No orders match the current filters.");
        });
        return;
    }

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            kpi_row(ui, state);
            ui.add_space(8.0);
            ui.separator();

            section_heading(ui, "🏆 Top products by revenue");
            top_products_chart(ui, state);

            section_heading(ui, "📆 Weekly revenue");
            weekly_chart(ui, state);

            section_heading(ui, "🎯 Discount impact");
            discount_chart(ui, state);

            section_heading(ui, "📉 Price vs quantity");
            scatter_chart(ui, state);
        });
}

fn section_heading(ui: &mut Ui, title: &str) {
    ui.add_space(10.0);
    ui.label(RichText::new(title).size(15.0).strong());
    ui.add_space(4.0);
}

// ---------------------------------------------------------------------------
// KPI row
// ---------------------------------------------------------------------------

fn kpi_row(ui: &mut Ui, state: &AppState) {
    let kpis = aggregate::compute_kpis(&state.dataset, &state.visible);

    ui.columns(4, |columns: &mut [Ui]| {
        metric(&mut columns[0], "Total Sales", &format_money(kpis.total_revenue));
        metric(
            &mut columns[1],
            "Average Order Value",
            &format_money(kpis.avg_order_value),
        );
        metric(&mut columns[2], "Total Orders", &format_count(kpis.total_units));
        metric(
            &mut columns[3],
            "Unique Products",
            &format_count(kpis.unique_products as u64),
        );
    });
}

fn metric(ui: &mut Ui, title: &str, value: &str) {
    ui.group(|ui: &mut Ui| {
        ui.vertical_centered(|ui: &mut Ui| {
            ui.label(RichText::new(title).size(11.0).color(Color32::GRAY));
            ui.label(RichText::new(value).size(18.0).strong());
        });
    });
}

// ---------------------------------------------------------------------------
// Charts
// ---------------------------------------------------------------------------

fn top_products_chart(ui: &mut Ui, state: &AppState) {
    let rows = aggregate::top_products(&state.dataset, &state.visible, TOP_PRODUCT_LIMIT);

    let labels: Vec<String> = rows.iter().map(|r| r.category.clone()).collect();
    let bars: Vec<Bar> = rows
        .iter()
        .enumerate()
        .map(|(i, r)| {
            Bar::new(i as f64, r.revenue)
                .width(0.6)
                .name(format!("{}  ({})", r.product_id, r.category))
                .fill(state.colors.color_for(&r.category))
        })
        .collect();

    Plot::new("top_products")
        .height(CHART_HEIGHT)
        .allow_scroll(false)
        .y_axis_label("Revenue ($)")
        .x_axis_formatter(move |mark, _range| {
            let idx = mark.value.round() as usize;
            if (mark.value - mark.value.round()).abs() < 0.001 && idx < labels.len() {
                labels[idx].clone()
            } else {
                String::new()
            }
        })
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars));
        });
}

fn weekly_chart(ui: &mut Ui, state: &AppState) {
    let series = aggregate::weekly_revenue(&state.dataset, &state.visible);

    let points_vec: Vec<[f64; 2]> = series
        .iter()
        .map(|(week, revenue)| [f64::from(week.num_days_from_ce()), *revenue])
        .collect();

    Plot::new("weekly_revenue")
        .height(CHART_HEIGHT)
        .allow_scroll(false)
        .y_axis_label("Revenue ($)")
        .x_axis_formatter(|mark, _range| {
            NaiveDate::from_num_days_from_ce_opt(mark.value.round() as i32)
                .map(|d| d.format("%b %d").to_string())
                .unwrap_or_default()
        })
        .show(ui, |plot_ui| {
            plot_ui.line(
                Line::new(PlotPoints::from_iter(points_vec.iter().copied()))
                    .color(REVENUE_COLOR)
                    .width(2.0)
                    .name("Weekly revenue"),
            );
            plot_ui.points(
                Points::new(PlotPoints::from_iter(points_vec.iter().copied()))
                    .radius(3.0)
                    .color(REVENUE_COLOR),
            );
        });
}

fn discount_chart(ui: &mut Ui, state: &AppState) {
    let impact = aggregate::discount_impact(&state.dataset, &state.visible);
    let sides = [("Discounted", impact.discounted), ("Full price", impact.full_price)];

    let list_bars: Vec<Bar> = sides
        .iter()
        .enumerate()
        .map(|(i, (_, totals))| {
            Bar::new(i as f64 - 0.18, totals.revenue)
                .width(0.32)
                .fill(REVENUE_COLOR)
        })
        .collect();
    let paid_bars: Vec<Bar> = sides
        .iter()
        .enumerate()
        .map(|(i, (_, totals))| {
            Bar::new(i as f64 + 0.18, totals.payments)
                .width(0.32)
                .fill(PAYMENT_COLOR)
        })
        .collect();

    let group_labels: Vec<String> = sides.iter().map(|(name, _)| name.to_string()).collect();

    Plot::new("discount_impact")
        .height(CHART_HEIGHT)
        .allow_scroll(false)
        .legend(Legend::default())
        .y_axis_label("Total ($)")
        .x_axis_formatter(move |mark, _range| {
            let idx = mark.value.round() as usize;
            if (mark.value - mark.value.round()).abs() < 0.001 && idx < group_labels.len() {
                group_labels[idx].clone()
            } else {
                String::new()
            }
        })
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(list_bars).name("List price"));
            plot_ui.bar_chart(BarChart::new(paid_bars).name("Paid"));
        });

    ui.label(format!(
        "{} units sold with a discount, {} at full price",
        format_count(impact.discounted.units),
        format_count(impact.full_price.units)
    ));
}

fn scatter_chart(ui: &mut Ui, state: &AppState) {
    match aggregate::price_quantity_correlation(&state.dataset, &state.visible) {
        Some(r) => {
            ui.label(format!(
                "Pearson correlation between price and quantity: {r:.2}"
            ));
        }
        None => {
            ui.label("Pearson correlation between price and quantity: not enough data");
        }
    }

    let points_vec: Vec<[f64; 2]> = state
        .visible
        .iter()
        .map(|&i| {
            let order = &state.dataset.orders[i];
            [order.price, f64::from(order.quantity)]
        })
        .collect();

    Plot::new("price_quantity")
        .height(CHART_HEIGHT)
        .allow_scroll(false)
        .x_axis_label("Price ($)")
        .y_axis_label("Quantity")
        .show(ui, |plot_ui| {
            plot_ui.points(
                Points::new(PlotPoints::from_iter(points_vec.iter().copied()))
                    .radius(2.5)
                    .color(REVENUE_COLOR),
            );
        });
}

// ---------------------------------------------------------------------------
// Number formatting
// ---------------------------------------------------------------------------

fn format_count(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

fn format_money(v: f64) -> String {
    let cents_total = (v.abs() * 100.0).round() as u64;
    let sign = if v < 0.0 && cents_total > 0 { "-" } else { "" };
    format!(
        "{sign}${}.{:02}",
        format_count(cents_total / 100),
        cents_total % 100
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_group_thousands() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1000), "1,000");
        assert_eq!(format_count(1234567), "1,234,567");
    }

    #[test]
    fn money_keeps_two_decimals() {
        assert_eq!(format_money(0.0), "$0.00");
        assert_eq!(format_money(49.9), "$49.90");
        assert_eq!(format_money(1234567.891), "$1,234,567.89");
        assert_eq!(format_money(-5.5), "-$5.50");
    }
}
