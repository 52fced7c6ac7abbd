//! Temporal scope of a budget item
//!
//! Scopes arrive as free text ("Permanent", "2025", "2025-12",
//! "2025 Year 12 Month", "2025年12月", "2025-Dec") and resolve into one of
//! three structured forms. Resolution is forgiving: text without a usable
//! year behaves as permanent so it never drops out of a query.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Strings (compared case-insensitively) that mark a permanent scope
pub const PERMANENT_MARKERS: &[&str] = &["permanent", "永久"];

const MONTH_NAMES: [&str; 12] = [
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
];

/// Structured temporal validity of a budget item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scope {
    /// Valid in every year
    Permanent,

    /// Valid throughout one calendar year
    Year(i32),

    /// Valid only in one month of one year
    YearMonth { year: i32, month: u32 },
}

impl Scope {
    /// Create a year+month scope
    pub fn year_month(year: i32, month: u32) -> Self {
        Self::YearMonth { year, month }
    }

    /// Parse a scope descriptor
    ///
    /// The first run of exactly four ASCII digits is the year. A month is
    /// the first later token that is a number from 1 to 12 or an English
    /// month name (full or abbreviated to at least three letters). Other
    /// tokens, such as "Year", "Month" or an out-of-range "13", are skipped,
    /// so a scope with a year never loses it.
    pub fn parse(s: &str) -> Result<Self, ScopeParseError> {
        let s = s.trim();

        if s.is_empty() {
            return Err(ScopeParseError::Empty);
        }

        if is_permanent_marker(s) {
            return Ok(Self::Permanent);
        }

        let tokens = tokenize(s);
        let year_pos = tokens
            .iter()
            .position(|t| t.len() == 4 && t.bytes().all(|b| b.is_ascii_digit()))
            .ok_or_else(|| ScopeParseError::MissingYear(s.to_string()))?;

        let year: i32 = tokens[year_pos]
            .parse()
            .map_err(|_| ScopeParseError::MissingYear(s.to_string()))?;

        Ok(tokens[year_pos + 1..]
            .iter()
            .find_map(|token| month_token(token))
            .map_or(Self::Year(year), |month| Self::YearMonth { year, month }))
    }

    /// Resolve a scope descriptor, treating unparseable text as permanent
    pub fn resolve(s: &str) -> Self {
        Self::parse(s).unwrap_or(Self::Permanent)
    }

    /// The discrete year this scope is bound to, if any
    pub fn year(&self) -> Option<i32> {
        match self {
            Self::Permanent => None,
            Self::Year(year) | Self::YearMonth { year, .. } => Some(*year),
        }
    }

    /// The explicit month of this scope, if any
    pub fn month(&self) -> Option<u32> {
        match self {
            Self::YearMonth { month, .. } => Some(*month),
            _ => None,
        }
    }

    /// Check whether this scope is valid somewhere in the given year
    pub fn applies_to_year(&self, year: i32) -> bool {
        self.year().map_or(true, |y| y == year)
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Permanent => write!(f, "Permanent"),
            Self::Year(year) => write!(f, "{:04}", year),
            Self::YearMonth { year, month } => write!(f, "{:04}-{:02}", year, month),
        }
    }
}

fn is_permanent_marker(s: &str) -> bool {
    let lowered = s.to_lowercase();
    PERMANENT_MARKERS.iter().any(|m| lowered == *m)
}

/// Split into maximal runs of ASCII digits or ASCII letters
fn tokenize(s: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut start: Option<(usize, bool)> = None;

    for (i, c) in s.char_indices() {
        let class = if c.is_ascii_digit() {
            Some(true)
        } else if c.is_ascii_alphabetic() {
            Some(false)
        } else {
            None
        };

        match (start, class) {
            (Some((_, digits)), Some(is_digit)) if digits == is_digit => {}
            (Some((begin, _)), _) => {
                tokens.push(&s[begin..i]);
                start = class.map(|is_digit| (i, is_digit));
            }
            (None, Some(is_digit)) => start = Some((i, is_digit)),
            (None, None) => {}
        }
    }

    if let Some((begin, _)) = start {
        tokens.push(&s[begin..]);
    }

    tokens
}

/// A month number in 1..=12 or a month name; anything else is not a month
fn month_token(token: &str) -> Option<u32> {
    if token.bytes().all(|b| b.is_ascii_digit()) {
        return match token.parse::<u32>() {
            Ok(month) if token.len() <= 2 && (1..=12).contains(&month) => Some(month),
            _ => None,
        };
    }

    let lowered = token.to_ascii_lowercase();
    if lowered.len() < 3 {
        return None;
    }

    MONTH_NAMES
        .iter()
        .position(|name| name.starts_with(&lowered))
        .map(|idx| idx as u32 + 1)
}

/// Error type for scope parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScopeParseError {
    Empty,
    MissingYear(String),
}

impl fmt::Display for ScopeParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScopeParseError::Empty => write!(f, "Scope is empty"),
            ScopeParseError::MissingYear(s) => write!(f, "No 4-digit year in scope: {}", s),
        }
    }
}

impl std::error::Error for ScopeParseError {}

/// A scope as stored on an item: the persisted text plus its parsed form
///
/// Parsing happens once, when the text enters the process (deserialization
/// or item creation). `parsed` is `None` for text the resolver could not
/// understand; such scopes resolve to [`Scope::Permanent`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct ItemScope {
    raw: String,
    parsed: Option<Scope>,
}

impl ItemScope {
    /// Wrap scope text exactly as given
    pub fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let parsed = Scope::parse(&raw).ok();
        Self { raw, parsed }
    }

    /// Wrap scope text, rewriting it to canonical form when it parses
    pub fn normalized(raw: &str) -> Self {
        match Scope::parse(raw) {
            Ok(scope) => scope.into(),
            Err(_) => Self {
                raw: raw.trim().to_string(),
                parsed: None,
            },
        }
    }

    /// The stored text
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// The parsed scope, or `None` if the text did not parse
    pub fn parsed(&self) -> Option<Scope> {
        self.parsed
    }

    /// The effective scope, falling back to permanent
    pub fn resolved(&self) -> Scope {
        self.parsed.unwrap_or(Scope::Permanent)
    }

    /// Whether this scope only matches because of the permanent fallback
    pub fn is_fallback(&self) -> bool {
        self.parsed.is_none()
    }
}

impl From<Scope> for ItemScope {
    fn from(scope: Scope) -> Self {
        Self {
            raw: scope.to_string(),
            parsed: Some(scope),
        }
    }
}

impl From<String> for ItemScope {
    fn from(raw: String) -> Self {
        Self::new(raw)
    }
}

impl From<ItemScope> for String {
    fn from(scope: ItemScope) -> Self {
        scope.raw
    }
}

impl fmt::Display for ItemScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_permanent_markers() {
        assert_eq!(Scope::parse("Permanent").unwrap(), Scope::Permanent);
        assert_eq!(Scope::parse("  permanent ").unwrap(), Scope::Permanent);
        assert_eq!(Scope::parse("永久").unwrap(), Scope::Permanent);
    }

    #[test]
    fn test_parse_year_only() {
        assert_eq!(Scope::parse("2025").unwrap(), Scope::Year(2025));
        assert_eq!(Scope::parse("2025年").unwrap(), Scope::Year(2025));
        assert_eq!(Scope::parse("2025 Year").unwrap(), Scope::Year(2025));
    }

    #[test]
    fn test_parse_year_month_notations() {
        let dec = Scope::year_month(2025, 12);
        assert_eq!(Scope::parse("2025-12").unwrap(), dec);
        assert_eq!(Scope::parse("2025-Dec").unwrap(), dec);
        assert_eq!(Scope::parse("2025 December").unwrap(), dec);
        assert_eq!(Scope::parse("2025年12月").unwrap(), dec);
        assert_eq!(Scope::parse("2025 Year 12 Month").unwrap(), dec);
        assert_eq!(Scope::parse("2025 Year Month 12").unwrap(), dec);
        assert_eq!(
            Scope::parse("2025-aug").unwrap(),
            Scope::year_month(2025, 8)
        );
    }

    #[test]
    fn test_month_before_year_is_ignored() {
        assert_eq!(Scope::parse("Dec 2025").unwrap(), Scope::Year(2025));
    }

    #[test]
    fn test_parse_failures() {
        assert_eq!(Scope::parse("   "), Err(ScopeParseError::Empty));
        assert!(matches!(
            Scope::parse("someday"),
            Err(ScopeParseError::MissingYear(_))
        ));
        assert!(matches!(
            Scope::parse("25-12"),
            Err(ScopeParseError::MissingYear(_))
        ));
    }

    #[test]
    fn test_out_of_range_month_keeps_year() {
        assert_eq!(Scope::parse("2025-13").unwrap(), Scope::Year(2025));
        assert_eq!(Scope::parse("2025年0月").unwrap(), Scope::Year(2025));
        assert_eq!(Scope::parse("2025-00").unwrap(), Scope::Year(2025));
        assert_eq!(Scope::parse("2025 13 4").unwrap(), Scope::year_month(2025, 4));
        assert!(!Scope::resolve("2025-13").applies_to_year(2030));
    }

    #[test]
    fn test_resolve_falls_back_to_permanent() {
        assert_eq!(Scope::resolve("someday"), Scope::Permanent);
        assert_eq!(Scope::resolve("next year"), Scope::Permanent);
        assert_eq!(Scope::resolve("2025-13"), Scope::Year(2025));
        assert_eq!(Scope::resolve("2024-03"), Scope::year_month(2024, 3));
    }

    #[test]
    fn test_applies_to_year() {
        assert!(Scope::Permanent.applies_to_year(1999));
        assert!(Scope::Year(2025).applies_to_year(2025));
        assert!(!Scope::Year(2025).applies_to_year(2026));
        assert!(Scope::year_month(2025, 8).applies_to_year(2025));
        assert!(!Scope::year_month(2024, 8).applies_to_year(2025));
    }

    #[test]
    fn test_display() {
        assert_eq!(Scope::Permanent.to_string(), "Permanent");
        assert_eq!(Scope::Year(2025).to_string(), "2025");
        assert_eq!(Scope::year_month(2025, 3).to_string(), "2025-03");
    }

    #[test]
    fn test_item_scope_keeps_raw_text() {
        let scope = ItemScope::new("2025年12月");
        assert_eq!(scope.as_str(), "2025年12月");
        assert_eq!(scope.resolved(), Scope::year_month(2025, 12));
        assert!(!scope.is_fallback());
    }

    #[test]
    fn test_item_scope_normalized() {
        assert_eq!(ItemScope::normalized("2025 Year 12 Month").as_str(), "2025-12");
        assert_eq!(ItemScope::normalized("永久").as_str(), "Permanent");

        let unparsed = ItemScope::normalized("  whenever ");
        assert_eq!(unparsed.as_str(), "whenever");
        assert!(unparsed.is_fallback());
        assert_eq!(unparsed.resolved(), Scope::Permanent);
    }

    #[test]
    fn test_item_scope_serializes_as_string() {
        let scope = ItemScope::from(Scope::year_month(2025, 12));
        let json = serde_json::to_string(&scope).unwrap();
        assert_eq!(json, "\"2025-12\"");

        let back: ItemScope = serde_json::from_str("\"2025-Dec\"").unwrap();
        assert_eq!(back.as_str(), "2025-Dec");
        assert_eq!(back.parsed(), Some(Scope::year_month(2025, 12)));
    }
}
