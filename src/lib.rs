//! Day-by-day inventory simulation for a single SKU under a reorder-point
//! policy.
//!
//! Sales history is reduced to a [`DemandProfile`]; the
//! [`InventoryFlowSimulation`] then walks every calendar day of that
//! history, placing a fixed-size order whenever on-hand plus in-transit
//! stock drops to the warning level and scheduling its delivery one lead
//! time later.
//!
//! ```no_run
//! use inventory_flow::{simulate, RecordStore, SimulationConfig};
//!
//! let store = RecordStore::open("Dynamic Inventory Analytics.xlsx")?;
//! let flow = simulate(&store, "SKU-0001", SimulationConfig::default())?;
//! println!("{} orders, warning level {:.1}", flow.orders.len(), flow.warning_level());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod io;
pub mod logging;
pub mod model;
pub mod simulation;
pub mod strategy;

pub use crate::io::error::StoreError;
pub use crate::io::store::RecordStore;
pub use crate::model::demand::DemandProfile;
pub use crate::model::events::{DailyState, DeliveryEvent, OrderEvent};
pub use crate::model::records::{LeadTimeType, SalesRecord, SkuControl, SkuItem};
pub use crate::simulation::config::SimulationConfig;
pub use crate::simulation::engine::{InventoryFlow, InventoryFlowSimulation, StockSummary};
pub use crate::simulation::error::{SimulationError, SimulationResult};
pub use crate::strategy::implementations::ReorderPointPolicy;
pub use crate::strategy::optimization::ReorderParameters;
pub use crate::strategy::traits::{OrderContext, OrderPolicy};

/// Runs the simulation for `sku_id` over the store's full sales history.
///
/// # Errors
/// `UnknownSku` when the SKU has no inventory control record;
/// `InvalidParameter` for a bad config or an unresolvable lead time.
pub fn simulate(
    store: &RecordStore,
    sku_id: &str,
    config: SimulationConfig,
) -> SimulationResult<InventoryFlow> {
    let control = store
        .sku_control(sku_id)
        .map_err(|_| SimulationError::UnknownSku(sku_id.to_string()))?;
    let simulation = InventoryFlowSimulation::new(control, store.sales_for(sku_id), config)?;
    Ok(simulation.run())
}
