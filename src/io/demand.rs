// src/io/demand.rs

//! Sample datasets in the record-store CSV layout, for demos and tests.

use crate::io::error::StoreResult;
use crate::io::reporting::write_csv;
use crate::io::store::{CONTROL_FILE, ITEMS_FILE, SALES_FILE};
use crate::model::records::SalesRecord;
use chrono::NaiveDate;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};
use serde::Serialize;
use std::fs;
use std::path::Path;
use tracing::info;

/// Shape of a generated dataset.
#[derive(Debug, Clone)]
pub struct SampleSpec {
    pub sku_count: usize,
    pub start: NaiveDate,
    pub days: u64,
    pub mean_daily_demand: f64,
    pub std_dev_daily_demand: f64,
    pub seed: u64,
}

impl Default for SampleSpec {
    fn default() -> Self {
        Self {
            sku_count: 5,
            start: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap_or(NaiveDate::MIN),
            days: 365,
            mean_daily_demand: 12.0,
            std_dev_daily_demand: 4.0,
            seed: 42,
        }
    }
}

pub fn sample_sku_id(index: usize) -> String {
    format!("SKU-{:04}", index + 1)
}

/// Draws one sale per SKU per day from a Normal distribution.
///
/// Values are rounded and clamped to 0; days that draw 0 produce no
/// record. The same seed always yields the same history. A non-positive
/// or non-finite standard deviation gives a flat `mean` every day. The
/// history is cut short at the end of the calendar.
pub fn generate_sales_history(
    sku_ids: &[String],
    start: NaiveDate,
    days: u64,
    mean: f64,
    std_dev: f64,
    seed: u64,
) -> Vec<SalesRecord> {
    let mut rng = StdRng::seed_from_u64(seed);
    let normal = Normal::new(mean, std_dev).ok();

    let span = usize::try_from(days).unwrap_or(usize::MAX);
    let mut records = Vec::new();
    for date in start.iter_days().take(span) {
        for sku_id in sku_ids {
            let val = match &normal {
                Some(dist) if std_dev > 0.0 => dist.sample(&mut rng),
                _ => mean,
            };

            // Demand cannot be negative.
            let quantity = val.round().max(0.0) as u64;
            if quantity > 0 {
                records.push(SalesRecord::new(sku_id.clone(), date, quantity));
            }
        }
    }
    records
}

#[derive(Serialize)]
struct SalesRow<'a> {
    #[serde(rename = "SKU ID")]
    sku_id: &'a str,
    #[serde(rename = "Order Date")]
    order_date: NaiveDate,
    #[serde(rename = "Order Quantity")]
    quantity: u64,
}

#[derive(Serialize)]
struct ControlRow {
    #[serde(rename = "SKU ID")]
    sku_id: String,
    #[serde(rename = "Average Lead Time (days)")]
    average: f64,
    #[serde(rename = "Maximum Lead Time (days)")]
    maximum: f64,
}

#[derive(Serialize)]
struct ItemRow {
    #[serde(rename = "SKU ID")]
    sku_id: String,
    #[serde(rename = "SKU Name")]
    name: String,
}

/// Writes `sales_data.csv`, `inventory_control.csv` and `sku_items.csv`
/// into `dir`. Lead times are drawn per SKU (average 3-10 days, maximum
/// 1-5 days above that).
pub fn write_sample_dataset(dir: &Path, spec: &SampleSpec) -> StoreResult<usize> {
    fs::create_dir_all(dir)?;
    let sku_ids: Vec<String> = (0..spec.sku_count).map(sample_sku_id).collect();

    let sales = generate_sales_history(
        &sku_ids,
        spec.start,
        spec.days,
        spec.mean_daily_demand,
        spec.std_dev_daily_demand,
        spec.seed,
    );
    let sales_rows: Vec<SalesRow> = sales
        .iter()
        .map(|r| SalesRow {
            sku_id: &r.sku_id,
            order_date: r.order_date,
            quantity: r.quantity,
        })
        .collect();
    write_csv(&dir.join(SALES_FILE), &sales_rows)?;

    let mut rng = StdRng::seed_from_u64(spec.seed.wrapping_add(1));
    let controls: Vec<ControlRow> = sku_ids
        .iter()
        .map(|id| {
            let average = rng.gen_range(3..=10) as f64;
            let maximum = average + rng.gen_range(1..=5) as f64;
            ControlRow {
                sku_id: id.clone(),
                average,
                maximum,
            }
        })
        .collect();
    write_csv(&dir.join(CONTROL_FILE), &controls)?;

    let items: Vec<ItemRow> = sku_ids
        .iter()
        .enumerate()
        .map(|(i, id)| ItemRow {
            sku_id: id.clone(),
            name: format!("Sample item {}", i + 1),
        })
        .collect();
    write_csv(&dir.join(ITEMS_FILE), &items)?;

    info!(dir = %dir.display(), skus = sku_ids.len(), sales = sales.len(), "wrote sample dataset");
    Ok(sales.len())
}
