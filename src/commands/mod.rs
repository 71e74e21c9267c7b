pub mod config;
pub mod explain;
