// src/io/store.rs

//! Loads the three record tables (sales, inventory control, SKU items)
//! from an Excel workbook or from a directory of CSV files.

use crate::io::error::{StoreError, StoreResult};
use crate::model::records::{SalesRecord, SkuControl, SkuItem};
use calamine::{open_workbook_auto, Data, DataType, Reader, Sheets};
use chrono::{NaiveDate, NaiveDateTime};
use csv::ReaderBuilder;
use std::collections::{BTreeMap, HashMap};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::{info, warn};

pub const SALES_SHEET: &str = "Sales Data";
pub const CONTROL_SHEET: &str = "Inventory Control";
pub const ITEMS_SHEET: &str = "SKU Items";

pub const SALES_FILE: &str = "sales_data.csv";
pub const CONTROL_FILE: &str = "inventory_control.csv";
pub const ITEMS_FILE: &str = "sku_items.csv";

pub const COL_SKU_ID: &str = "SKU ID";
pub const COL_ORDER_DATE: &str = "Order Date";
pub const COL_ORDER_QUANTITY: &str = "Order Quantity";
pub const COL_AVG_LEAD_TIME: &str = "Average Lead Time (days)";
pub const COL_MAX_LEAD_TIME: &str = "Maximum Lead Time (days)";
pub const COL_SKU_NAME: &str = "SKU Name";

/// A table as read from disk: trimmed headers and one map per non-blank row.
#[derive(Debug, Default)]
struct RawTable {
    name: String,
    headers: Vec<String>,
    rows: Vec<HashMap<String, String>>,
}

impl RawTable {
    fn new(name: &str, raw_headers: Vec<String>) -> Self {
        Self {
            name: name.to_string(),
            headers: raw_headers.into_iter().map(|h| h.trim().to_string()).collect(),
            rows: Vec::new(),
        }
    }

    /// Adds a row; blank rows and `Unnamed:` / empty-header columns are dropped.
    fn push_row<I: IntoIterator<Item = String>>(&mut self, cells: I) {
        let mut row = HashMap::new();
        for (header, value) in self.headers.iter().zip(cells) {
            if header.is_empty() || header.starts_with("Unnamed:") {
                continue;
            }
            row.insert(header.clone(), value.trim().to_string());
        }
        if row.values().all(|v| v.is_empty()) {
            return;
        }
        self.rows.push(row);
    }

    fn require(&self, column: &str) -> StoreResult<()> {
        if self.headers.iter().any(|h| h == column) {
            Ok(())
        } else {
            Err(StoreError::MissingColumn {
                table: self.name.clone(),
                column: column.to_string(),
            })
        }
    }

    fn invalid(&self, row: usize, column: &str, value: &str) -> StoreError {
        StoreError::InvalidValue {
            table: self.name.clone(),
            row,
            column: column.to_string(),
            value: value.to_string(),
        }
    }
}

fn cell<'r>(row: &'r HashMap<String, String>, column: &str) -> &'r str {
    row.get(column).map(String::as_str).unwrap_or("")
}

/// 1-based source line of the `index`-th data row (the header is line 1).
fn source_row(index: usize) -> usize {
    index + 2
}

// ==========================================
// Value parsing
// ==========================================

/// Accepts `YYYY-MM-DD`, `YYYY/MM/DD` and date-times whose time part is
/// dropped.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    for format in ["%Y-%m-%d", "%Y/%m/%d"] {
        if let Ok(date) = NaiveDate::parse_from_str(value, format) {
            return Some(date);
        }
    }
    for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(value, format) {
            return Some(datetime.date());
        }
    }
    None
}

/// Whole, non-negative units. Spreadsheets often hand back `12.0`.
pub fn parse_quantity(value: &str) -> Option<u64> {
    let value = value.trim();
    if let Ok(q) = value.parse::<u64>() {
        return Some(q);
    }
    let f = value.parse::<f64>().ok()?;
    if f.is_finite() && f >= 0.0 && f.fract() == 0.0 && f <= u64::MAX as f64 {
        Some(f as u64)
    } else {
        None
    }
}

/// Numeric lead time, or `None` for anything that is not a finite number.
pub fn parse_lead_time(value: &str) -> Option<f64> {
    value.trim().parse::<f64>().ok().filter(|f| f.is_finite())
}

// ==========================================
// Sources
// ==========================================

fn read_csv_table(path: &Path, name: &str) -> StoreResult<RawTable> {
    if !path.exists() {
        return Err(StoreError::FileNotFound(path.display().to_string()));
    }
    let file = File::open(path)?;
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(file);

    let headers = reader.headers()?.iter().map(str::to_string).collect();
    let mut table = RawTable::new(name, headers);
    for result in reader.records() {
        let record = result?;
        table.push_row(record.iter().map(str::to_string));
    }
    Ok(table)
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::DateTime(_) | Data::DateTimeIso(_) => cell
            .as_date()
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_default(),
        other => other.to_string(),
    }
}

fn read_sheet(workbook: &mut Sheets<BufReader<File>>, sheet: &str) -> StoreResult<RawTable> {
    if !workbook.sheet_names().iter().any(|s| s == sheet) {
        return Err(StoreError::MissingSheet(sheet.to_string()));
    }
    let range = workbook.worksheet_range(sheet)?;
    let mut rows = range.rows();
    let headers = match rows.next() {
        Some(header_row) => header_row.iter().map(cell_text).collect(),
        None => Vec::new(),
    };
    let mut table = RawTable::new(sheet, headers);
    for data_row in rows {
        table.push_row(data_row.iter().map(cell_text));
    }
    Ok(table)
}

// ==========================================
// Record store
// ==========================================

/// In-memory sales, control and item tables, addressable by SKU id.
#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    sales: BTreeMap<String, Vec<SalesRecord>>,
    controls: Vec<SkuControl>,
    items: HashMap<String, SkuItem>,
}

impl RecordStore {
    pub fn new(sales: Vec<SalesRecord>, controls: Vec<SkuControl>, items: Vec<SkuItem>) -> Self {
        let mut by_sku: BTreeMap<String, Vec<SalesRecord>> = BTreeMap::new();
        for record in sales {
            by_sku.entry(record.sku_id.clone()).or_default().push(record);
        }
        for records in by_sku.values_mut() {
            records.sort_by_key(|r| r.order_date);
        }

        let mut item_map = HashMap::new();
        for item in items {
            item_map.entry(item.sku_id.clone()).or_insert(item);
        }

        Self {
            sales: by_sku,
            controls,
            items: item_map,
        }
    }

    /// Opens a workbook (`.xlsx`, `.xls`, `.xlsm`) or a directory holding
    /// `sales_data.csv`, `inventory_control.csv` and `sku_items.csv`.
    pub fn open<P: AsRef<Path>>(path: P) -> StoreResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(StoreError::FileNotFound(path.display().to_string()));
        }
        if path.is_dir() {
            return Self::from_csv_dir(path);
        }
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();
        match ext.as_str() {
            "xlsx" | "xls" | "xlsm" => Self::from_workbook(path),
            _ => Err(StoreError::UnsupportedFormat(path.display().to_string())),
        }
    }

    pub fn from_csv_dir(dir: &Path) -> StoreResult<Self> {
        let sales = read_csv_table(&dir.join(SALES_FILE), SALES_SHEET)?;
        let controls = read_csv_table(&dir.join(CONTROL_FILE), CONTROL_SHEET)?;
        let items = read_csv_table(&dir.join(ITEMS_FILE), ITEMS_SHEET)?;
        let store = Self::from_tables(sales, controls, items)?;
        info!(source = %dir.display(), skus = store.controls.len(), "loaded CSV records");
        Ok(store)
    }

    pub fn from_workbook(path: &Path) -> StoreResult<Self> {
        let mut workbook = open_workbook_auto(path)?;
        let sales = read_sheet(&mut workbook, SALES_SHEET)?;
        let controls = read_sheet(&mut workbook, CONTROL_SHEET)?;
        let items = read_sheet(&mut workbook, ITEMS_SHEET)?;
        let store = Self::from_tables(sales, controls, items)?;
        info!(source = %path.display(), skus = store.controls.len(), "loaded workbook records");
        Ok(store)
    }

    fn from_tables(sales: RawTable, controls: RawTable, items: RawTable) -> StoreResult<Self> {
        Ok(Self::new(
            parse_sales(&sales)?,
            parse_controls(&controls)?,
            parse_items(&items)?,
        ))
    }

    /// All sales of `sku_id`, sorted by date. Empty for unknown SKUs.
    pub fn sales_for(&self, sku_id: &str) -> &[SalesRecord] {
        self.sales.get(sku_id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// The first control record for `sku_id`.
    pub fn sku_control(&self, sku_id: &str) -> StoreResult<&SkuControl> {
        self.controls
            .iter()
            .find(|c| c.sku_id == sku_id)
            .ok_or_else(|| StoreError::NotFound(sku_id.to_string()))
    }

    pub fn sku_name(&self, sku_id: &str) -> Option<&str> {
        self.items.get(sku_id).map(|i| i.name.as_str())
    }

    /// SKU ids in inventory-control order.
    pub fn sku_ids(&self) -> Vec<&str> {
        self.controls.iter().map(|c| c.sku_id.as_str()).collect()
    }

    /// SKUs that have both a control record and a name, in control order.
    pub fn listing(&self) -> Vec<(&str, &str)> {
        self.controls
            .iter()
            .filter_map(|c| {
                self.items
                    .get(&c.sku_id)
                    .map(|i| (c.sku_id.as_str(), i.name.as_str()))
            })
            .collect()
    }

    pub fn sales_count(&self) -> usize {
        self.sales.values().map(Vec::len).sum()
    }
}

fn parse_sales(table: &RawTable) -> StoreResult<Vec<SalesRecord>> {
    for column in [COL_SKU_ID, COL_ORDER_DATE, COL_ORDER_QUANTITY] {
        table.require(column)?;
    }

    let mut records = Vec::with_capacity(table.rows.len());
    let mut skipped = 0usize;
    for (index, row) in table.rows.iter().enumerate() {
        let sku_id = cell(row, COL_SKU_ID);
        let raw_date = cell(row, COL_ORDER_DATE);
        let Some(order_date) = parse_date(raw_date) else {
            warn!(row = source_row(index), value = raw_date, "skipping sales row with unreadable date");
            skipped += 1;
            continue;
        };
        if sku_id.is_empty() {
            warn!(row = source_row(index), "skipping sales row without SKU ID");
            skipped += 1;
            continue;
        }
        let raw_qty = cell(row, COL_ORDER_QUANTITY);
        let quantity = parse_quantity(raw_qty)
            .ok_or_else(|| table.invalid(source_row(index), COL_ORDER_QUANTITY, raw_qty))?;
        records.push(SalesRecord::new(sku_id, order_date, quantity));
    }

    if skipped > 0 {
        warn!(table = %table.name, skipped, "sales rows skipped");
    }
    Ok(records)
}

fn parse_controls(table: &RawTable) -> StoreResult<Vec<SkuControl>> {
    table.require(COL_SKU_ID)?;

    let mut controls = Vec::with_capacity(table.rows.len());
    for (index, row) in table.rows.iter().enumerate() {
        let sku_id = cell(row, COL_SKU_ID);
        if sku_id.is_empty() {
            warn!(row = source_row(index), "skipping control row without SKU ID");
            continue;
        }
        let average = parse_lead_time(cell(row, COL_AVG_LEAD_TIME));
        let maximum = parse_lead_time(cell(row, COL_MAX_LEAD_TIME));
        if average.is_none() || maximum.is_none() {
            warn!(sku = sku_id, "lead time missing or not numeric");
        }
        controls.push(SkuControl {
            sku_id: sku_id.to_string(),
            average_lead_time_days: average,
            maximum_lead_time_days: maximum,
        });
    }
    Ok(controls)
}

fn parse_items(table: &RawTable) -> StoreResult<Vec<SkuItem>> {
    table.require(COL_SKU_ID)?;
    table.require(COL_SKU_NAME)?;

    Ok(table
        .rows
        .iter()
        .filter(|row| !cell(row, COL_SKU_ID).is_empty())
        .map(|row| SkuItem {
            sku_id: cell(row, COL_SKU_ID).to_string(),
            name: cell(row, COL_SKU_NAME).to_string(),
        })
        .collect())
}
