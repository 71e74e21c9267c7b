pub mod command;
pub mod config;
pub mod confirm;
pub mod dirs;
pub mod env_var;
pub mod logging;
pub mod markdown;
pub mod select;
pub mod spinner;
#[cfg(test)]
pub mod testing;
