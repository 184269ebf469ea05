//! Computes the reward points a receipt earns.
//!
//! Points are the sum of seven independent rules. Every rule works on an already validated
//! `Receipt`, so nothing here can fail. Money is handled as `Decimal` throughout.

use crate::model::Receipt;
use chrono::{Datelike, Timelike};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One of the rules that contribute to a receipt's points, listed in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rule {
    /// One point for every letter or digit in the retailer name.
    RetailerName,
    /// 50 points if the total is a round dollar amount with no cents.
    RoundDollarTotal,
    /// 25 points if the total is a multiple of `0.25`.
    QuarterMultipleTotal,
    /// 5 points for every two items on the receipt.
    ItemPairs,
    /// For each item whose trimmed description length is a multiple of 3, the price multiplied
    /// by `0.2` and rounded up.
    DescriptionLength,
    /// 6 points if the day in the purchase date is odd.
    OddPurchaseDay,
    /// 10 points if the purchase time is at or after 14:00 and before 16:00.
    AfternoonPurchase,
}

serde_plain::derive_display_from_serialize!(Rule);
serde_plain::derive_fromstr_from_deserialize!(Rule);

const ROUND_DOLLAR_POINTS: u64 = 50;
const QUARTER_MULTIPLE_POINTS: u64 = 25;
const POINTS_PER_ITEM_PAIR: u64 = 5;
const ODD_DAY_POINTS: u64 = 6;
const AFTERNOON_POINTS: u64 = 10;
const AFTERNOON_START_HOUR: u32 = 14;
const AFTERNOON_END_HOUR: u32 = 16;

impl Rule {
    pub const ALL: [Rule; 7] = [
        Rule::RetailerName,
        Rule::RoundDollarTotal,
        Rule::QuarterMultipleTotal,
        Rule::ItemPairs,
        Rule::DescriptionLength,
        Rule::OddPurchaseDay,
        Rule::AfternoonPurchase,
    ];

    /// The points this rule awards to `receipt`.
    pub fn points(self, receipt: &Receipt) -> u64 {
        match self {
            Rule::RetailerName => receipt
                .retailer()
                .as_str()
                .chars()
                .filter(|c| c.is_alphanumeric())
                .count() as u64,
            Rule::RoundDollarTotal => award(receipt.total().is_whole(), ROUND_DOLLAR_POINTS),
            Rule::QuarterMultipleTotal => award(
                receipt.total().is_multiple_of(quarter()),
                QUARTER_MULTIPLE_POINTS,
            ),
            Rule::ItemPairs => (receipt.items().len() / 2) as u64 * POINTS_PER_ITEM_PAIR,
            Rule::DescriptionLength => receipt
                .items()
                .iter()
                .filter(|item| item.short_description().trimmed_len() % 3 == 0)
                .map(|item| price_points(item.price().value()))
                .fold(0, u64::saturating_add),
            Rule::OddPurchaseDay => award(
                receipt.purchase_date().date().day() % 2 == 1,
                ODD_DAY_POINTS,
            ),
            Rule::AfternoonPurchase => {
                let hour = receipt.purchase_time().time().hour();
                award(
                    (AFTERNOON_START_HOUR..AFTERNOON_END_HOUR).contains(&hour),
                    AFTERNOON_POINTS,
                )
            }
        }
    }
}

fn award(condition: bool, points: u64) -> u64 {
    if condition {
        points
    } else {
        0
    }
}

fn quarter() -> Decimal {
    Decimal::new(25, 2)
}

/// `ceil(price * 0.2)`, saturating for prices too large to fit.
fn price_points(price: Decimal) -> u64 {
    (price * Decimal::new(2, 1))
        .ceil()
        .to_u64()
        .unwrap_or(u64::MAX)
}

/// The points one rule contributed to a receipt's score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleContribution {
    pub rule: Rule,
    pub points: u64,
}

/// Evaluates every rule against `receipt`, in rule order.
pub fn breakdown(receipt: &Receipt) -> Vec<RuleContribution> {
    Rule::ALL
        .iter()
        .map(|&rule| RuleContribution {
            rule,
            points: rule.points(receipt),
        })
        .collect()
}

/// The total points `receipt` earns.
pub fn score(receipt: &Receipt) -> u64 {
    Rule::ALL
        .iter()
        .map(|rule| rule.points(receipt))
        .fold(0, u64::saturating_add)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::{corner_market_json, receipt, receipt_json, target_json};
    use serde_json::json;

    fn with_total(total: &str) -> Receipt {
        receipt(&receipt_json(
            "Shop",
            "2022-01-02",
            "09:00",
            total,
            vec![],
        ))
    }

    fn with_time(time: &str) -> Receipt {
        receipt(&receipt_json("Shop", "2022-01-02", time, "1.10", vec![]))
    }

    fn with_items(count: usize) -> Receipt {
        let items = vec![("ab", "1.00"); count];
        receipt(&receipt_json("Shop", "2022-01-02", "09:00", "1.10", items))
    }

    fn points_for(rule: Rule, receipt: &Receipt) -> u64 {
        rule.points(receipt)
    }

    #[test]
    fn test_target_receipt() {
        let receipt = receipt(&target_json());
        assert_eq!(score(&receipt), 28);
    }

    #[test]
    fn test_target_receipt_breakdown() {
        let receipt = receipt(&target_json());
        let points: Vec<(Rule, u64)> = breakdown(&receipt)
            .into_iter()
            .map(|c| (c.rule, c.points))
            .collect();
        assert_eq!(
            points,
            vec![
                (Rule::RetailerName, 6),
                (Rule::RoundDollarTotal, 0),
                (Rule::QuarterMultipleTotal, 0),
                (Rule::ItemPairs, 10),
                (Rule::DescriptionLength, 6),
                (Rule::OddPurchaseDay, 6),
                (Rule::AfternoonPurchase, 0),
            ]
        );
    }

    #[test]
    fn test_corner_market_receipt() {
        let receipt = receipt(&corner_market_json());
        assert_eq!(score(&receipt), 109);
    }

    #[test]
    fn test_score_is_sum_of_breakdown() {
        for raw in [target_json(), corner_market_json()] {
            let receipt = receipt(&raw);
            let sum: u64 = breakdown(&receipt).iter().map(|c| c.points).sum();
            assert_eq!(sum, score(&receipt));
        }
    }

    #[test]
    fn test_score_is_deterministic() {
        let receipt = receipt(&target_json());
        assert_eq!(score(&receipt), score(&receipt));
    }

    #[test]
    fn test_retailer_name_counts_only_alphanumerics() {
        let receipt = receipt(&receipt_json(
            "M&M - Corner  Market 24",
            "2022-01-02",
            "09:00",
            "1.10",
            vec![],
        ));
        assert_eq!(points_for(Rule::RetailerName, &receipt), 16);
    }

    #[test]
    fn test_total_boundaries() {
        let r = with_total("100.00");
        assert_eq!(points_for(Rule::RoundDollarTotal, &r), 50);
        assert_eq!(points_for(Rule::QuarterMultipleTotal, &r), 25);

        let r = with_total("100.50");
        assert_eq!(points_for(Rule::RoundDollarTotal, &r), 0);
        assert_eq!(points_for(Rule::QuarterMultipleTotal, &r), 25);

        let r = with_total("100.10");
        assert_eq!(points_for(Rule::RoundDollarTotal, &r), 0);
        assert_eq!(points_for(Rule::QuarterMultipleTotal, &r), 0);
    }

    #[test]
    fn test_quarter_multiple_without_float_error() {
        // 0.30 has no exact binary float representation.
        assert_eq!(
            points_for(Rule::QuarterMultipleTotal, &with_total("0.75")),
            25
        );
        assert_eq!(
            points_for(Rule::QuarterMultipleTotal, &with_total("0.30")),
            0
        );
        assert_eq!(
            points_for(Rule::QuarterMultipleTotal, &with_total("123456789.25")),
            25
        );
    }

    #[test]
    fn test_zero_total_is_round_and_quarter() {
        let r = with_total("0.00");
        assert_eq!(points_for(Rule::RoundDollarTotal, &r), 50);
        assert_eq!(points_for(Rule::QuarterMultipleTotal, &r), 25);
    }

    #[test]
    fn test_item_pairs() {
        assert_eq!(points_for(Rule::ItemPairs, &with_items(0)), 0);
        assert_eq!(points_for(Rule::ItemPairs, &with_items(1)), 0);
        assert_eq!(points_for(Rule::ItemPairs, &with_items(2)), 5);
        assert_eq!(points_for(Rule::ItemPairs, &with_items(5)), 10);
    }

    #[test]
    fn test_adding_an_item_adds_zero_or_five() {
        for count in 0..10 {
            let before = points_for(Rule::ItemPairs, &with_items(count));
            let after = points_for(Rule::ItemPairs, &with_items(count + 1));
            let delta = after - before;
            assert!(delta == 0 || delta == 5, "delta was {delta} at {count}");
        }
    }

    #[test]
    fn test_description_length_rounds_up() {
        let r = receipt(&receipt_json(
            "Shop",
            "2022-01-02",
            "09:00",
            "1.10",
            vec![("abc", "10.00"), ("abcdef", "10.01"), ("abcd", "100.00")],
        ));
        // 10.00 * 0.2 = 2 exactly, 10.01 * 0.2 = 2.002 rounds up to 3, "abcd" does not count.
        assert_eq!(points_for(Rule::DescriptionLength, &r), 5);
    }

    #[test]
    fn test_description_length_uses_trimmed_text() {
        let r = receipt(&receipt_json(
            "Shop",
            "2022-01-02",
            "09:00",
            "1.10",
            vec![("  abc  ", "5.00"), ("ab ", "5.00")],
        ));
        assert_eq!(points_for(Rule::DescriptionLength, &r), 1);
    }

    #[test]
    fn test_description_length_zero_price() {
        let r = receipt(&receipt_json(
            "Shop",
            "2022-01-02",
            "09:00",
            "0.00",
            vec![("abc", "0.00")],
        ));
        assert_eq!(points_for(Rule::DescriptionLength, &r), 0);
    }

    #[test]
    fn test_description_length_huge_price_saturates() {
        let price = format!("{}.00", "9".repeat(25));
        let r = receipt(&receipt_json(
            "Shop",
            "2022-01-02",
            "09:00",
            "1.10",
            vec![("abc", price.as_str())],
        ));
        assert_eq!(points_for(Rule::DescriptionLength, &r), u64::MAX);
        assert_eq!(score(&r), u64::MAX);
    }

    #[test]
    fn test_odd_day() {
        let odd = receipt(&receipt_json("Shop", "2022-01-31", "09:00", "1.10", vec![]));
        let even = receipt(&receipt_json("Shop", "2022-01-30", "09:00", "1.10", vec![]));
        assert_eq!(points_for(Rule::OddPurchaseDay, &odd), 6);
        assert_eq!(points_for(Rule::OddPurchaseDay, &even), 0);
    }

    #[test]
    fn test_afternoon_window_boundaries() {
        assert_eq!(points_for(Rule::AfternoonPurchase, &with_time("13:59")), 0);
        assert_eq!(points_for(Rule::AfternoonPurchase, &with_time("14:00")), 10);
        assert_eq!(points_for(Rule::AfternoonPurchase, &with_time("15:59")), 10);
        assert_eq!(points_for(Rule::AfternoonPurchase, &with_time("16:00")), 0);
    }

    #[test]
    fn test_rule_names() {
        assert_eq!(Rule::RetailerName.to_string(), "retailer_name");
        assert_eq!(
            serde_json::to_value(RuleContribution {
                rule: Rule::AfternoonPurchase,
                points: 10
            })
            .unwrap(),
            json!({"rule": "afternoon_purchase", "points": 10})
        );
    }
}
