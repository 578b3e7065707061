// src/io/reporting.rs

use crate::io::error::StoreResult;
use crate::simulation::config::SimulationConfig;
use crate::simulation::engine::InventoryFlow;
use serde::Serialize;
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

pub const TIMELINE_FILE: &str = "timeline.csv";
pub const ORDERS_FILE: &str = "orders.csv";
pub const DELIVERIES_FILE: &str = "deliveries.csv";

/// Writes any serializable rows to a CSV file.
///
/// # Arguments
/// * `path` - Destination file (e.g., "results/timeline.csv").
/// * `rows` - Records written one per line, header taken from field names.
pub fn write_csv<T: Serialize>(path: &Path, rows: &[T]) -> StoreResult<()> {
    let mut wtr = csv::Writer::from_path(path)?;
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Exports timeline, orders and deliveries into `dir`, creating it if
/// needed. Returns the written paths in that order.
pub fn export_flow(dir: &Path, flow: &InventoryFlow) -> StoreResult<Vec<PathBuf>> {
    fs::create_dir_all(dir)?;

    let timeline = dir.join(TIMELINE_FILE);
    let orders = dir.join(ORDERS_FILE);
    let deliveries = dir.join(DELIVERIES_FILE);
    write_csv(&timeline, &flow.timeline)?;
    write_csv(&orders, &flow.orders)?;
    write_csv(&deliveries, &flow.deliveries)?;

    info!(
        dir = %dir.display(),
        days = flow.timeline.len(),
        orders = flow.orders.len(),
        "exported inventory flow"
    );
    Ok(vec![timeline, orders, deliveries])
}

/// Formats a count with thousands separators, e.g. `12,345`.
pub fn group_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Plain-text report of a (possibly windowed) run.
pub fn render_report(flow: &InventoryFlow, sku_name: Option<&str>, config: &SimulationConfig) -> String {
    let mut out = String::new();
    let title = match sku_name {
        Some(name) => format!("{} ({})", name, flow.sku_id),
        None => flow.sku_id.clone(),
    };
    let _ = writeln!(out, "Inventory flow - {}", title);

    match (flow.first_date(), flow.last_date()) {
        (Some(start), Some(end)) => {
            let _ = writeln!(out, "Period: {} to {}", start, end);
        }
        _ => {
            let _ = writeln!(out, "Period: no sales history");
        }
    }
    let _ = writeln!(
        out,
        "Lead time: {} ({:.1} days) / initial stock: {}",
        config.lead_time_type.label(),
        flow.parameters.lead_time_days,
        group_thousands(config.initial_stock)
    );
    let _ = writeln!(
        out,
        "Order size: {:.1} months of average sales ({} units)",
        config.reorder_months,
        group_thousands(flow.parameters.reorder_quantity as i64)
    );
    let _ = writeln!(out, "Warning level: {:.1}", flow.warning_level());

    if let Some(summary) = flow.summary() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Average stock: {}", group_thousands(summary.average.trunc() as i64));
        let _ = writeln!(out, "Minimum stock: {}", group_thousands(summary.min));
        let _ = writeln!(out, "Maximum stock: {}", group_thousands(summary.max));
    }

    if !flow.orders.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Orders");
        for order in &flow.orders {
            let _ = writeln!(out, "  {}  {:>10}", order.date, group_thousands(order.quantity as i64));
        }
    }

    if !flow.deliveries.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Deliveries");
        for delivery in &flow.deliveries {
            let _ = writeln!(
                out,
                "  {}  {:>10}",
                delivery.date,
                group_thousands(delivery.quantity as i64)
            );
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::events::{DailyState, DeliveryEvent, OrderEvent};
    use crate::strategy::optimization::ReorderParameters;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, d).unwrap()
    }

    fn sample_flow() -> InventoryFlow {
        InventoryFlow {
            sku_id: "SKU-9".to_string(),
            parameters: ReorderParameters {
                lead_time_days: 2.0,
                delivery_offset_days: 2,
                avg_monthly_sales: 300.0,
                avg_daily_sales: 10.0,
                safety_stock: 20.0,
                warning_level: 24.0,
                reorder_quantity: 1200,
            },
            timeline: vec![
                DailyState { date: day(1), stock_level: 30, demand: 10, received: 0, on_order: 0 },
                DailyState { date: day(2), stock_level: 20, demand: 10, received: 0, on_order: 1200 },
                DailyState { date: day(3), stock_level: 10, demand: 10, received: 0, on_order: 1200 },
            ],
            orders: vec![OrderEvent { date: day(2), quantity: 1200 }],
            deliveries: vec![DeliveryEvent { date: day(4), quantity: 1200 }],
        }
    }

    #[test]
    fn thousands_grouping() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(1234567), "1,234,567");
        assert_eq!(group_thousands(-45000), "-45,000");
    }

    #[test]
    fn report_lists_summary_and_events() {
        let report = render_report(&sample_flow(), Some("Widget"), &SimulationConfig::default());
        assert!(report.contains("Inventory flow - Widget (SKU-9)"));
        assert!(report.contains("Period: 2024-06-01 to 2024-06-03"));
        assert!(report.contains("Warning level: 24.0"));
        assert!(report.contains("Average stock: 20"));
        assert!(report.contains("Minimum stock: 10"));
        assert!(report.contains("2024-06-02       1,200"));
        assert!(report.contains("Deliveries"));
    }

    #[test]
    fn export_writes_three_files() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("run");
        let paths = export_flow(&out, &sample_flow()).unwrap();
        assert_eq!(paths.len(), 3);

        let timeline = fs::read_to_string(out.join(TIMELINE_FILE)).unwrap();
        let mut lines = timeline.lines();
        assert_eq!(lines.next(), Some("date,stock_level,demand,received,on_order"));
        assert_eq!(lines.next(), Some("2024-06-01,30,10,0,0"));
        assert_eq!(timeline.lines().count(), 4);

        let orders = fs::read_to_string(out.join(ORDERS_FILE)).unwrap();
        assert_eq!(orders, "date,quantity\n2024-06-02,1200\n");
    }
}
