//! The `serve` and `score` subcommands.

mod score;
mod serve;

use serde::Serialize;
use std::fmt::Debug;
use tracing::{debug, info};

pub use score::{score, ScoreReport};
pub use serve::serve;

/// What a subcommand hands back to `main`: a line for the operator and, for `score`, the report
/// behind it.
#[derive(Debug, Clone, Serialize)]
pub struct Out<T>
where
    T: Serialize + Clone + Debug,
{
    message: String,
    report: Option<T>,
}

impl<T, S> From<S> for Out<T>
where
    T: Serialize + Clone + Debug,
    S: Into<String>,
{
    fn from(message: S) -> Self {
        Self {
            message: message.into(),
            report: None,
        }
    }
}

impl<T> Out<T>
where
    T: Serialize + Clone + Debug,
{
    pub fn new(message: impl Into<String>, report: T) -> Self {
        Self {
            message: message.into(),
            report: Some(report),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn report(&self) -> Option<&T> {
        self.report.as_ref()
    }

    /// Logs the message at `info` and the report, as JSON, at `debug`.
    pub fn print(&self) {
        info!("{}", self.message);
        if let Some(json) = self
            .report
            .as_ref()
            .and_then(|report| serde_json::to_string_pretty(report).ok())
        {
            debug!("Report:\n{json}");
        }
    }
}
