pub mod cli;
pub mod run;
pub mod run_collection;
pub mod run_export;
pub mod run_validation;
pub mod show_database_stats;
