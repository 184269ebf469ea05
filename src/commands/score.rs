use crate::commands::Out;
use crate::scoring::{self, RuleContribution};
use crate::{utils, validation, Config, Result};
use anyhow::anyhow;
use serde::Serialize;
use serde_json::Value;
use std::path::Path;

/// The points a receipt earns along with what each rule contributed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoreReport {
    pub points: u64,
    pub breakdown: Vec<RuleContribution>,
}

/// Validates the receipt JSON file at `path` and scores it, without storing anything.
///
/// # Errors
///
/// - Returns an error if the file cannot be read or is not JSON.
/// - Returns an error carrying the rejection reason if the receipt fails validation.
pub async fn score(config: Config, path: &Path) -> Result<Out<ScoreReport>> {
    let raw: Value = utils::read_json(path).await?;
    let receipt = validation::validate_with(&raw, config.policy())
        .map_err(|reason| anyhow!("The receipt in {} was rejected: {reason}", path.display()))?;

    let report = ScoreReport {
        points: scoring::score(&receipt),
        breakdown: scoring::breakdown(&receipt),
    };

    let mut message = format!("The receipt earns {} points", report.points);
    for contribution in &report.breakdown {
        message.push_str(&format!(
            "\n  {:<24}{:>6}",
            contribution.rule.to_string(),
            contribution.points
        ));
    }
    Ok(Out::new(message, report))
}
