// src/simulation/engine.rs

use crate::model::demand::{add_days, DemandProfile};
use crate::model::events::{DailyState, DeliveryEvent, OrderEvent};
use crate::model::queues::DeliverySchedule;
use crate::model::records::{SalesRecord, SkuControl};
use crate::simulation::config::SimulationConfig;
use crate::simulation::error::SimulationResult;
use crate::strategy::implementations::ReorderPointPolicy;
use crate::strategy::optimization::ReorderParameters;
use crate::strategy::traits::{OrderContext, OrderPolicy};
use chrono::{Days, NaiveDate};
use serde::Serialize;
use tracing::{debug, info};

/// State carried from one day to the next.
#[derive(Debug, Clone)]
pub struct FlowState {
    /// Committed stock at the end of the previous day.
    pub prev_stock: i64,
    pub last_order_date: Option<NaiveDate>,
    pub schedule: DeliverySchedule,
}

impl FlowState {
    pub fn new(initial_stock: i64) -> Self {
        Self {
            prev_stock: initial_stock,
            last_order_date: None,
            schedule: DeliverySchedule::new(),
        }
    }
}

/// Result of advancing one day.
#[derive(Debug, Clone, PartialEq)]
pub struct StepOutcome {
    pub day: DailyState,
    pub placed: Option<(OrderEvent, DeliveryEvent)>,
}

/// Output of a full run over a SKU's sales history.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InventoryFlow {
    pub sku_id: String,
    pub parameters: ReorderParameters,
    pub timeline: Vec<DailyState>,
    pub orders: Vec<OrderEvent>,
    pub deliveries: Vec<DeliveryEvent>,
}

/// Average, lowest and highest stock over a timeline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StockSummary {
    pub average: f64,
    pub min: i64,
    pub max: i64,
}

impl InventoryFlow {
    pub fn warning_level(&self) -> f64 {
        self.parameters.warning_level
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.timeline.first().map(|d| d.date)
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.timeline.last().map(|d| d.date)
    }

    /// Keeps only what falls in `[end - display_days, end]`, where `end` is
    /// the last simulated day. Timeline, orders and deliveries are each
    /// filtered on their own dates; the run itself is not repeated.
    pub fn window(&self, display_days: u64) -> InventoryFlow {
        let Some(end) = self.last_date() else {
            return self.clone();
        };
        let start = end
            .checked_sub_days(Days::new(display_days))
            .unwrap_or(NaiveDate::MIN);
        let within = |date: NaiveDate| start <= date && date <= end;

        InventoryFlow {
            sku_id: self.sku_id.clone(),
            parameters: self.parameters,
            timeline: self
                .timeline
                .iter()
                .filter(|d| within(d.date))
                .cloned()
                .collect(),
            orders: self.orders.iter().filter(|o| within(o.date)).copied().collect(),
            deliveries: self
                .deliveries
                .iter()
                .filter(|d| within(d.date))
                .copied()
                .collect(),
        }
    }

    /// `None` for an empty timeline.
    pub fn summary(&self) -> Option<StockSummary> {
        let min = self.timeline.iter().map(|d| d.stock_level).min()?;
        let max = self.timeline.iter().map(|d| d.stock_level).max()?;
        let total: f64 = self.timeline.iter().map(|d| d.stock_level as f64).sum();
        Some(StockSummary {
            average: total / self.timeline.len() as f64,
            min,
            max,
        })
    }
}

/// Day-by-day reorder-point simulation for one SKU.
#[derive(Debug)]
pub struct InventoryFlowSimulation {
    sku_id: String,
    config: SimulationConfig,
    demand: DemandProfile,
    parameters: ReorderParameters,
    policy: Box<dyn OrderPolicy>,
}

impl InventoryFlowSimulation {
    /// Validates `config`, aggregates the SKU's demand and derives the
    /// reorder parameters. Sales for other SKUs in `sales` are ignored.
    pub fn new<'a, I>(control: &SkuControl, sales: I, config: SimulationConfig) -> SimulationResult<Self>
    where
        I: IntoIterator<Item = &'a SalesRecord>,
    {
        config.validate()?;
        let demand = DemandProfile::from_records(&control.sku_id, sales);
        let parameters = ReorderParameters::derive(&demand, control, &config)?;
        let policy = ReorderPointPolicy::from_parameters(&parameters, config.min_order_interval_days);

        Ok(Self {
            sku_id: control.sku_id.clone(),
            config,
            demand,
            parameters,
            policy: Box::new(policy),
        })
    }

    /// Swaps the ordering rule while keeping demand and lead time.
    pub fn with_policy(mut self, policy: Box<dyn OrderPolicy>) -> Self {
        self.policy = policy;
        self
    }

    /// Walks every day of the sales history once, in order.
    pub fn run(&self) -> InventoryFlow {
        let dates = self.demand.date_range();
        let mut state = FlowState::new(self.config.initial_stock);
        let mut flow = InventoryFlow {
            sku_id: self.sku_id.clone(),
            parameters: self.parameters,
            timeline: Vec::with_capacity(dates.len()),
            orders: Vec::new(),
            deliveries: Vec::new(),
        };

        for date in dates {
            let outcome = self.step(&mut state, date);
            if let Some((order, delivery)) = outcome.placed {
                flow.orders.push(order);
                flow.deliveries.push(delivery);
            }
            flow.timeline.push(outcome.day);
        }

        info!(
            sku = %self.sku_id,
            days = flow.timeline.len(),
            demand = self.demand.total_quantity(),
            orders = flow.orders.len(),
            warning_level = self.parameters.warning_level,
            reorder_quantity = self.parameters.reorder_quantity,
            "inventory flow simulated"
        );
        flow
    }

    /// Advances `state` by one day.
    pub fn step(&self, state: &mut FlowState, date: NaiveDate) -> StepOutcome {
        // 1. Demand
        let demand = self.demand.daily_demand(date);
        let mut stock = state.prev_stock.saturating_sub(units(demand));

        // 2. Arrivals due today
        let mut received = state.schedule.pop_arrival(date);
        stock = stock.saturating_add(units(received));

        // 3. Decide against on-hand plus what is still on the way
        let context = OrderContext {
            date,
            stock_level: stock,
            pending_quantity: state.schedule.pending_after(date),
            last_order_date: state.last_order_date,
        };

        // A history without a demand rate (empty, single day) never orders.
        let decision = if self.parameters.avg_monthly_sales > 0.0 {
            self.policy.calculate_order(&context)
        } else {
            None
        };

        let placed = decision.map(|quantity| {
            let arrival = add_days(date, self.parameters.delivery_offset_days);
            if arrival == date {
                // Zero lead time: the goods land the day they are ordered.
                received += quantity;
                stock = stock.saturating_add(units(quantity));
            } else {
                state.schedule.push_departure(arrival, quantity);
            }
            state.last_order_date = Some(date);

            debug!(
                sku = %self.sku_id,
                %date,
                quantity,
                position = context.inventory_position(),
                arrival = %arrival,
                "reorder placed"
            );
            (
                OrderEvent { date, quantity },
                DeliveryEvent {
                    date: arrival,
                    quantity,
                },
            )
        });

        // 4. Commit
        state.prev_stock = stock;
        StepOutcome {
            day: DailyState {
                date,
                stock_level: stock,
                demand,
                received,
                on_order: state.schedule.pending_after(date),
            },
            placed,
        }
    }
}

fn units(quantity: u64) -> i64 {
    i64::try_from(quantity).unwrap_or(i64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::records::LeadTimeType;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    /// 10 units sold every day for `days` days.
    fn flat_history(days: u64) -> Vec<SalesRecord> {
        let start = date(2024, 1, 1);
        (0..days)
            .map(|i| SalesRecord::new("A", add_days(start, i), 10))
            .collect()
    }

    #[test]
    fn empty_history_gives_empty_outputs() {
        let sim = InventoryFlowSimulation::new(
            &SkuControl::new("A", 5.0, 9.0),
            &Vec::<SalesRecord>::new(),
            SimulationConfig::default(),
        )
        .unwrap();
        let flow = sim.run();
        assert!(flow.timeline.is_empty());
        assert!(flow.orders.is_empty());
        assert!(flow.deliveries.is_empty());
        assert_eq!(flow.warning_level(), 0.0);
        assert_eq!(flow.summary(), None);
    }

    #[test]
    fn single_day_history_never_orders() {
        let sales = vec![SalesRecord::new("A", date(2024, 1, 1), 900)];
        let flow = InventoryFlowSimulation::new(
            &SkuControl::new("A", 5.0, 9.0),
            &sales,
            SimulationConfig::default(),
        )
        .unwrap()
        .run();

        assert_eq!(flow.timeline.len(), 1);
        assert_eq!(flow.timeline[0].stock_level, -400);
        assert!(flow.orders.is_empty());
    }

    #[test]
    fn delivery_arrives_after_the_lead_time() {
        // 60 days at 10/day: rate 600 over 59/30 months.
        let sales = flat_history(60);
        let sim = InventoryFlowSimulation::new(
            &SkuControl::new("A", 5.0, 9.0),
            &sales,
            SimulationConfig::default(),
        )
        .unwrap();
        let flow = sim.run();

        let order = flow.orders[0];
        let delivery = flow.deliveries[0];
        assert_eq!(delivery.date, add_days(order.date, 5));
        assert_eq!(delivery.quantity, order.quantity);

        let arrival_day = flow.timeline.iter().find(|d| d.date == delivery.date).unwrap();
        assert_eq!(arrival_day.received, delivery.quantity);
    }

    #[test]
    fn step_applies_demand_then_arrivals() {
        let sales = flat_history(40);
        let sim = InventoryFlowSimulation::new(
            &SkuControl::new("A", 5.0, 9.0),
            &sales,
            SimulationConfig::default(),
        )
        .unwrap();

        let mut state = FlowState::new(100);
        state.schedule.push_departure(date(2024, 1, 1), 25);
        state.schedule.push_departure(date(2024, 1, 4), 7);
        let outcome = sim.step(&mut state, date(2024, 1, 1));

        assert_eq!(outcome.day.stock_level, 115);
        assert_eq!(outcome.day.received, 25);
        assert_eq!(outcome.day.on_order, 7);
        assert_eq!(state.prev_stock, 115);
        assert!(outcome.placed.is_none());
    }

    #[test]
    fn zero_lead_time_credits_the_order_day() {
        let sales = flat_history(60);
        let config = SimulationConfig {
            initial_stock: 0,
            ..Default::default()
        };
        let flow = InventoryFlowSimulation::new(&SkuControl::new("A", 0.0, 0.0), &sales, config)
            .unwrap()
            .run();

        let first = &flow.timeline[0];
        let order = flow.orders[0];
        assert_eq!(order.date, first.date);
        assert_eq!(flow.deliveries[0].date, first.date);
        assert_eq!(first.received, order.quantity);
        assert_eq!(first.stock_level, order.quantity as i64 - 10);
        assert_eq!(first.on_order, 0);
    }

    #[test]
    fn window_filters_each_list_on_its_own_dates() {
        let sales = flat_history(90);
        let flow = InventoryFlowSimulation::new(
            &SkuControl::new("A", 5.0, 9.0),
            &sales,
            SimulationConfig {
                lead_time_type: LeadTimeType::Maximum,
                ..Default::default()
            },
        )
        .unwrap()
        .run();

        let windowed = flow.window(10);
        let end = flow.last_date().unwrap();
        let start = end.checked_sub_days(Days::new(10)).unwrap();

        assert_eq!(windowed.timeline.len(), 11);
        assert_eq!(windowed.first_date(), Some(start));
        assert!(windowed.orders.iter().all(|o| o.date >= start && o.date <= end));
        assert!(windowed.deliveries.iter().all(|d| d.date >= start && d.date <= end));
        assert_eq!(windowed.warning_level(), flow.warning_level());

        // A window wider than the history keeps everything on or before the end.
        let all = flow.window(10_000);
        assert_eq!(all.timeline, flow.timeline);
        assert_eq!(all.orders, flow.orders);
    }

    #[test]
    fn summary_reports_average_min_max() {
        let sales = vec![
            SalesRecord::new("A", date(2024, 1, 1), 10),
            SalesRecord::new("A", date(2024, 1, 3), 30),
        ];
        let config = SimulationConfig {
            initial_stock: 100,
            reorder_months: 0.0,
            ..Default::default()
        };
        let flow = InventoryFlowSimulation::new(&SkuControl::new("A", 1.0, 1.0), &sales, config)
            .unwrap()
            .run();

        let levels: Vec<i64> = flow.timeline.iter().map(|d| d.stock_level).collect();
        assert_eq!(levels, vec![90, 90, 60]);
        let summary = flow.summary().unwrap();
        assert_eq!(summary.min, 60);
        assert_eq!(summary.max, 90);
        assert!((summary.average - 80.0).abs() < 1e-9);
    }

    #[test]
    fn zero_reorder_months_still_places_empty_orders() {
        let sales = flat_history(30);
        let config = SimulationConfig {
            initial_stock: 0,
            reorder_months: 0.0,
            ..Default::default()
        };
        let flow = InventoryFlowSimulation::new(&SkuControl::new("A", 5.0, 9.0), &sales, config)
            .unwrap()
            .run();

        assert_eq!(flow.parameters.reorder_quantity, 0);
        let dates: Vec<NaiveDate> = flow.orders.iter().map(|o| o.date).collect();
        assert_eq!(
            dates,
            vec![
                date(2024, 1, 1),
                date(2024, 1, 8),
                date(2024, 1, 15),
                date(2024, 1, 22),
                date(2024, 1, 29),
            ]
        );
        assert!(flow.orders.iter().all(|o| o.quantity == 0));
        assert_eq!(flow.deliveries.len(), flow.orders.len());
        assert_eq!(flow.deliveries[0].date, date(2024, 1, 6));
        assert_eq!(flow.timeline.last().unwrap().stock_level, -300);
    }

    #[test]
    fn invalid_config_is_refused_before_running() {
        let sales = flat_history(10);
        let config = SimulationConfig {
            initial_stock: -5,
            ..Default::default()
        };
        assert!(InventoryFlowSimulation::new(&SkuControl::new("A", 5.0, 9.0), &sales, config).is_err());
    }
}
