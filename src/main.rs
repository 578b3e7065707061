use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use inventory_flow::io::demand::{write_sample_dataset, SampleSpec};
use inventory_flow::io::reporting::{export_flow, render_report};
use inventory_flow::{logging, simulate, LeadTimeType, RecordStore, SimulationConfig};
use std::path::{Path, PathBuf};

/// Reorder-point inventory simulation over historical sales
#[derive(Parser, Debug)]
#[command(name = "inventory-flow")]
#[command(about = "Simulate daily stock, reorders and deliveries for one SKU")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List SKUs that have both control parameters and a name
    Skus {
        /// Workbook (.xlsx) or directory of CSV tables
        #[arg(long, env = "INVENTORY_DATA")]
        data: PathBuf,
    },
    /// Run the simulation for one SKU and print the report
    Simulate(SimulateArgs),
    /// Write a reproducible sample dataset as CSV tables
    Generate {
        /// Output directory
        #[arg(long)]
        out: PathBuf,
        /// Number of SKUs
        #[arg(long, default_value_t = 5)]
        skus: usize,
        /// Days of sales history
        #[arg(long, default_value_t = 365)]
        days: u64,
        /// RNG seed
        #[arg(long, default_value_t = 42)]
        seed: u64,
    },
}

#[derive(Args, Debug)]
struct SimulateArgs {
    /// Workbook (.xlsx) or directory of CSV tables
    #[arg(long, env = "INVENTORY_DATA")]
    data: PathBuf,

    /// SKU to simulate
    #[arg(long, env = "INVENTORY_SKU")]
    sku: String,

    /// Stock on hand before the first day
    #[arg(long, env = "INVENTORY_INITIAL_STOCK", default_value_t = 500, allow_negative_numbers = true)]
    initial_stock: i64,

    /// Lead time column that drives the reorder point
    #[arg(long, env = "INVENTORY_LEAD_TIME", value_enum, default_value_t = LeadTimeType::Average)]
    lead_time: LeadTimeType,

    /// Extra fraction on top of expected lead-time consumption
    #[arg(long, env = "INVENTORY_WARNING_RATIO", default_value_t = 0.2, allow_negative_numbers = true)]
    warning_ratio: f64,

    /// Order size in months of average sales
    #[arg(long, env = "INVENTORY_REORDER_MONTHS", default_value_t = 3.0, allow_negative_numbers = true)]
    reorder_months: f64,

    /// Minimum days between two orders
    #[arg(long, env = "INVENTORY_MIN_ORDER_INTERVAL", default_value_t = 7, allow_negative_numbers = true)]
    min_order_interval: i64,

    /// Days shown before the last sales date (0 = everything)
    #[arg(long, env = "INVENTORY_DISPLAY_DAYS", default_value_t = 30)]
    display_days: u64,

    /// Also export timeline/orders/deliveries CSV files here
    #[arg(long)]
    output: Option<PathBuf>,
}

impl SimulateArgs {
    fn config(&self) -> SimulationConfig {
        SimulationConfig {
            initial_stock: self.initial_stock,
            lead_time_type: self.lead_time,
            warning_stock_ratio: self.warning_ratio,
            reorder_months: self.reorder_months,
            min_order_interval_days: self.min_order_interval,
        }
    }
}

fn main() -> Result<()> {
    logging::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Skus { data } => list_skus(&data),
        Command::Simulate(args) => run_simulation(&args),
        Command::Generate {
            out,
            skus,
            days,
            seed,
        } => {
            let spec = SampleSpec {
                sku_count: skus,
                days,
                seed,
                ..Default::default()
            };
            let rows = write_sample_dataset(&out, &spec)
                .with_context(|| format!("writing sample dataset to {}", out.display()))?;
            println!("Wrote {} sales rows for {} SKUs to {}", rows, skus, out.display());
            Ok(())
        }
    }
}

fn list_skus(data: &Path) -> Result<()> {
    let store = RecordStore::open(data)
        .with_context(|| format!("loading records from {}", data.display()))?;
    for (sku_id, name) in store.listing() {
        println!("{}  {}", sku_id, name);
    }
    Ok(())
}

fn run_simulation(args: &SimulateArgs) -> Result<()> {
    // 1. LOAD RECORDS
    let store = RecordStore::open(&args.data)
        .with_context(|| format!("loading records from {}", args.data.display()))?;

    // 2. SIMULATE OVER THE FULL HISTORY
    let config = args.config();
    let flow = simulate(&store, &args.sku, config.clone())
        .with_context(|| format!("simulating {}", args.sku))?;

    // 3. NARROW TO THE DISPLAY WINDOW
    let shown = if args.display_days == 0 {
        flow
    } else {
        flow.window(args.display_days)
    };

    // 4. REPORT
    print!("{}", render_report(&shown, store.sku_name(&args.sku), &config));

    // 5. EXPORT
    if let Some(dir) = &args.output {
        let written = export_flow(dir, &shown)
            .with_context(|| format!("exporting results to {}", dir.display()))?;
        for path in written {
            println!("Wrote {}", path.display());
        }
    }
    Ok(())
}
