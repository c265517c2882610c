pub mod bot;
pub mod commands;
pub mod config;
pub mod conversion;
pub mod dialogue;
pub mod error;
pub mod logging;
pub mod rates;
pub mod session;
pub mod telegram;
pub mod types;

pub use bot::run;
