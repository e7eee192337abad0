pub mod config_model;
pub mod error;
