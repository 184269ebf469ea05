use crate::model::Amount;
use crate::validation::{self, ValidationError};
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt::{Display, Formatter};
use std::ops::RangeInclusive;
use std::str::FromStr;

/// A receipt that has passed validation. Every field holds both its parsed value and the exact
/// text it was submitted with, so serializing a `Receipt` gives back what the caller sent.
///
/// The only way to obtain a `Receipt` is through `validation::validate` (or deserialization, which
/// calls it), so code holding one never needs to handle a malformed field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "serde_json::Value")]
pub struct Receipt {
    pub(crate) retailer: Retailer,
    pub(crate) purchase_date: PurchaseDate,
    pub(crate) purchase_time: PurchaseTime,
    pub(crate) total: Amount,
    pub(crate) items: Vec<Item>,
}

impl Receipt {
    pub fn retailer(&self) -> &Retailer {
        &self.retailer
    }

    pub fn purchase_date(&self) -> &PurchaseDate {
        &self.purchase_date
    }

    pub fn purchase_time(&self) -> &PurchaseTime {
        &self.purchase_time
    }

    pub fn total(&self) -> &Amount {
        &self.total
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }
}

impl TryFrom<serde_json::Value> for Receipt {
    type Error = ValidationError;

    fn try_from(value: serde_json::Value) -> Result<Self, Self::Error> {
        validation::validate(&value)
    }
}

/// One line on a receipt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub(crate) short_description: Description,
    pub(crate) price: Amount,
}

impl Item {
    pub fn short_description(&self) -> &Description {
        &self.short_description
    }

    pub fn price(&self) -> &Amount {
        &self.price
    }
}

/// The merchant name: letters, digits, whitespace, `-` and `&`, at least one character.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Retailer(String);

impl Retailer {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Retailer {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let allowed = |c: char| c.is_alphanumeric() || c.is_whitespace() || c == '-' || c == '&';
        if s.is_empty() || !s.chars().all(allowed) {
            return Err(ValidationError::Retailer);
        }
        Ok(Self(s.to_string()))
    }
}

impl Display for Retailer {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// An item's short description: letters, digits, whitespace and `-`, at least one character.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Description(String);

impl Description {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The number of characters left after trimming surrounding whitespace.
    pub fn trimmed_len(&self) -> usize {
        self.0.trim().chars().count()
    }
}

impl FromStr for Description {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let allowed = |c: char| c.is_alphanumeric() || c.is_whitespace() || c == '-';
        if s.is_empty() || !s.chars().all(allowed) {
            return Err(ValidationError::ItemDescription(s.to_string()));
        }
        Ok(Self(s.to_string()))
    }
}

impl Display for Description {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIME_FORMAT: &str = "%H:%M";

/// Checks that `s` is made of ASCII digit groups joined by `sep`, one group per entry in `widths`,
/// each group's length within its range. chrono skips spaces and accepts signs and short years, so
/// the layout is checked here before the text reaches it.
fn has_layout(s: &str, sep: char, widths: &[RangeInclusive<usize>]) -> bool {
    let groups: Vec<&str> = s.split(sep).collect();
    groups.len() == widths.len()
        && groups.iter().zip(widths).all(|(group, width)| {
            width.contains(&group.len()) && group.bytes().all(|b| b.is_ascii_digit())
        })
}

/// The purchase date, submitted as `YYYY-MM-DD`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PurchaseDate {
    date: NaiveDate,
    text: String,
}

impl PurchaseDate {
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }
}

impl FromStr for PurchaseDate {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if !has_layout(s, '-', &[4..=4, 1..=2, 1..=2]) {
            return Err(ValidationError::PurchaseDate);
        }
        let date =
            NaiveDate::parse_from_str(s, DATE_FORMAT).map_err(|_| ValidationError::PurchaseDate)?;
        Ok(Self {
            date,
            text: s.to_string(),
        })
    }
}

impl Serialize for PurchaseDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.text)
    }
}

/// The purchase time, submitted as 24-hour `HH:MM`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PurchaseTime {
    time: NaiveTime,
    text: String,
}

impl PurchaseTime {
    pub fn time(&self) -> NaiveTime {
        self.time
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }
}

impl FromStr for PurchaseTime {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if !has_layout(s, ':', &[1..=2, 1..=2]) {
            return Err(ValidationError::PurchaseTime);
        }
        let time =
            NaiveTime::parse_from_str(s, TIME_FORMAT).map_err(|_| ValidationError::PurchaseTime)?;
        Ok(Self {
            time,
            text: s.to_string(),
        })
    }
}

impl Serialize for PurchaseTime {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.text)
    }
}
