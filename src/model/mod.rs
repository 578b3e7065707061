pub mod demand;
pub mod events;
pub mod queues;
pub mod records;
