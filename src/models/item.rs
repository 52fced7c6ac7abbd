//! Budget item model
//!
//! A budget item is one income or expense line with a temporal scope and a
//! recurrence type. Items come into existence from an [`ItemDraft`] whose
//! fields are loosely typed (they may originate from JSON produced by a web
//! or conversational front end) and are validated in one pass.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::ids::ItemId;
use super::scope::{ItemScope, Scope};

/// Whether an item recurs every month or occurs once within its scope
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeType {
    #[serde(alias = "月度")]
    Monthly,
    #[serde(alias = "非月度")]
    NonMonthly,
}

impl fmt::Display for TimeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Monthly => write!(f, "Monthly"),
            Self::NonMonthly => write!(f, "NonMonthly"),
        }
    }
}

impl FromStr for TimeType {
    type Err = ItemValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "monthly" | "月度" => Ok(Self::Monthly),
            "nonmonthly" | "non-monthly" | "non_monthly" | "one-time" | "onetime" | "非月度" => {
                Ok(Self::NonMonthly)
            }
            _ => Err(ItemValidationError::InvalidTimeType(s.to_string())),
        }
    }
}

/// Income or expense
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(alias = "收入")]
    Income,
    #[serde(alias = "支出")]
    Expense,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Income => write!(f, "Income"),
            Self::Expense => write!(f, "Expense"),
        }
    }
}

impl FromStr for Category {
    type Err = ItemValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "income" | "收入" => Ok(Self::Income),
            "expense" | "支出" => Ok(Self::Expense),
            _ => Err(ItemValidationError::InvalidCategory(s.to_string())),
        }
    }
}

/// Validation errors for budget items
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemValidationError {
    MissingField(&'static str),
    EmptyField(&'static str),
    InvalidTimeType(String),
    InvalidCategory(String),
    InvalidAmount(String),
    NegativeAmount,
    NothingToUpdate,
}

impl fmt::Display for ItemValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingField(field) => write!(f, "Missing required field: {}", field),
            Self::EmptyField(field) => write!(f, "Field must not be empty: {}", field),
            Self::InvalidTimeType(value) => write!(
                f,
                "time_type must be 'Monthly' or 'NonMonthly', got '{}'",
                value
            ),
            Self::InvalidCategory(value) => write!(
                f,
                "category must be 'Income' or 'Expense', got '{}'",
                value
            ),
            Self::InvalidAmount(value) => write!(f, "amount must be a number, got {}", value),
            Self::NegativeAmount => write!(f, "amount must not be negative"),
            Self::NothingToUpdate => write!(f, "No fields to update"),
        }
    }
}

impl std::error::Error for ItemValidationError {}

/// A stored income or expense line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetItem {
    pub id: ItemId,
    pub name: String,
    pub scope: ItemScope,
    pub time_type: TimeType,
    pub category: Category,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub amount: Decimal,
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_optional_timestamp"
    )]
    pub updated_at: Option<DateTime<Utc>>,
}

impl BudgetItem {
    /// Create a new item from validated fields, stamped with the current time
    pub fn new(id: ItemId, fields: ItemFields) -> Self {
        Self {
            id,
            name: fields.name,
            scope: fields.scope,
            time_type: fields.time_type,
            category: fields.category,
            amount: fields.amount,
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    /// The effective scope (permanent if the stored text did not parse)
    pub fn resolved_scope(&self) -> Scope {
        self.scope.resolved()
    }

    /// Check whether this item counts towards the given year
    pub fn applies_to_year(&self, year: i32) -> bool {
        self.resolved_scope().applies_to_year(year)
    }

    /// Validate the stored item
    pub fn validate(&self) -> Result<(), ItemValidationError> {
        if self.id.is_empty() {
            return Err(ItemValidationError::EmptyField("id"));
        }
        if self.name.trim().is_empty() {
            return Err(ItemValidationError::EmptyField("name"));
        }
        if self.scope.as_str().trim().is_empty() {
            return Err(ItemValidationError::EmptyField("scope"));
        }
        if self.amount.is_sign_negative() && !self.amount.is_zero() {
            return Err(ItemValidationError::NegativeAmount);
        }
        Ok(())
    }
}

impl fmt::Display for BudgetItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [{}] {} {} {} ({})",
            self.name, self.scope, self.time_type, self.category, self.amount, self.id
        )
    }
}

/// Validated content of a new item, before it is given an id
#[derive(Debug, Clone, PartialEq)]
pub struct ItemFields {
    pub name: String,
    pub scope: ItemScope,
    pub time_type: TimeType,
    pub category: Category,
    pub amount: Decimal,
}

/// Unvalidated input for a new item
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ItemDraft {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub scope: Option<String>,
    #[serde(default)]
    pub time_type: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub amount: Option<Value>,
}

impl ItemDraft {
    /// Create a draft with every field present
    pub fn new(
        name: impl Into<String>,
        scope: impl Into<String>,
        time_type: impl Into<String>,
        category: impl Into<String>,
        amount: impl Into<Value>,
    ) -> Self {
        Self {
            name: Some(name.into()),
            scope: Some(scope.into()),
            time_type: Some(time_type.into()),
            category: Some(category.into()),
            amount: Some(amount.into()),
        }
    }

    /// Validate the draft
    ///
    /// Presence of every field is checked first, in declaration order, then
    /// the values. The scope is normalized to its canonical text when it
    /// parses and kept verbatim otherwise.
    pub fn validate(&self) -> Result<ItemFields, ItemValidationError> {
        let name = self
            .name
            .as_deref()
            .ok_or(ItemValidationError::MissingField("name"))?;
        let scope = self
            .scope
            .as_deref()
            .ok_or(ItemValidationError::MissingField("scope"))?;
        let time_type = self
            .time_type
            .as_deref()
            .ok_or(ItemValidationError::MissingField("time_type"))?;
        let category = self
            .category
            .as_deref()
            .ok_or(ItemValidationError::MissingField("category"))?;
        let amount = self
            .amount
            .as_ref()
            .ok_or(ItemValidationError::MissingField("amount"))?;

        let category: Category = category.parse()?;
        let time_type: TimeType = time_type.parse()?;
        let amount = parse_amount(amount)?;

        Ok(ItemFields {
            name: validate_name(name)?,
            scope: validate_scope(scope)?,
            time_type,
            category,
            amount,
        })
    }
}

/// Partial update of an existing item; absent fields stay unchanged
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ItemPatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub scope: Option<String>,
    #[serde(default)]
    pub time_type: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub amount: Option<Value>,
}

impl ItemPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.scope.is_none()
            && self.time_type.is_none()
            && self.category.is_none()
            && self.amount.is_none()
    }

    /// Produce the updated item
    ///
    /// Every present field is validated before anything is applied, so a
    /// failed patch leaves no trace. `id` and `created_at` are preserved.
    pub fn apply_to(&self, item: &BudgetItem) -> Result<BudgetItem, ItemValidationError> {
        if self.is_empty() {
            return Err(ItemValidationError::NothingToUpdate);
        }

        let name = self.name.as_deref().map(validate_name).transpose()?;
        let scope = self.scope.as_deref().map(validate_scope).transpose()?;
        let time_type = self
            .time_type
            .as_deref()
            .map(str::parse::<TimeType>)
            .transpose()?;
        let category = self
            .category
            .as_deref()
            .map(str::parse::<Category>)
            .transpose()?;
        let amount = self.amount.as_ref().map(parse_amount).transpose()?;

        let mut updated = item.clone();
        if let Some(name) = name {
            updated.name = name;
        }
        if let Some(scope) = scope {
            updated.scope = scope;
        }
        if let Some(time_type) = time_type {
            updated.time_type = time_type;
        }
        if let Some(category) = category {
            updated.category = category;
        }
        if let Some(amount) = amount {
            updated.amount = amount;
        }
        updated.updated_at = Some(Utc::now());

        Ok(updated)
    }
}

fn validate_name(name: &str) -> Result<String, ItemValidationError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ItemValidationError::EmptyField("name"));
    }
    Ok(name.to_string())
}

fn validate_scope(scope: &str) -> Result<ItemScope, ItemValidationError> {
    if scope.trim().is_empty() {
        return Err(ItemValidationError::EmptyField("scope"));
    }
    Ok(ItemScope::normalized(scope))
}

/// Parse an amount given as a JSON number or a numeric string
pub fn parse_amount(value: &Value) -> Result<Decimal, ItemValidationError> {
    let text = match value {
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.trim().to_string(),
        other => return Err(ItemValidationError::InvalidAmount(other.to_string())),
    };

    let amount = Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .map_err(|_| ItemValidationError::InvalidAmount(value.to_string()))?;

    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(ItemValidationError::NegativeAmount);
    }

    Ok(amount.normalize())
}

const NAIVE_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// Accept RFC 3339 timestamps as well as offset-less ones (read as UTC)
fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(s, NAIVE_TIMESTAMP_FORMAT)
                .ok()
                .map(|naive| naive.and_utc())
        })
}

fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    parse_timestamp(&s)
        .ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp: {}", s)))
}

fn deserialize_optional_timestamp<'de, D>(
    deserializer: D,
) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        Some(s) => parse_timestamp(&s)
            .map(Some)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp: {}", s))),
        None => Ok(None),
    }
}
