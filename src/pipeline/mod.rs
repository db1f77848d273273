pub mod checkpoint;
pub mod collector;
pub mod dedup;
pub mod record_builder;

pub use collector::Collector;
pub use record_builder::{process_search_items, score_quality};
