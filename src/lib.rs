pub mod args;
pub mod commands;
mod config;
mod error;
pub mod model;
pub mod scoring;
pub mod server;
pub mod service;
pub mod store;
mod utils;
pub mod validation;

#[cfg(test)]
mod test;

pub use config::Config;
pub use error::{Error, ErrorType, IntoResult, Res, Result, ServiceError};
pub use service::ReceiptService;
