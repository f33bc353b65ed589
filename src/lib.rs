pub mod checkout;
pub mod cli;
pub mod config;
pub mod driver;
pub mod logging;
