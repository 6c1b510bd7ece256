use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;
use thiserror::Error;

/// Most open level of any dimension.
pub const BEST_LEVEL: u8 = 1;
/// Least open (or unknown) level of any dimension.
pub const WORST_LEVEL: u8 = 4;

/// The five dimensions of a classification tuple, in canonical order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    Place,
    Licence,
    Version,
    Embargo,
    Conditions,
}

impl Dimension {
    pub const fn ordered() -> [Self; 5] {
        [
            Self::Place,
            Self::Licence,
            Self::Version,
            Self::Embargo,
            Self::Conditions,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Place => "Place of OA",
            Self::Licence => "Licence",
            Self::Version => "Publication version",
            Self::Embargo => "Embargo period",
            Self::Conditions => "Conditions of OA",
        }
    }

    const fn index(self) -> usize {
        match self {
            Self::Place => 0,
            Self::Licence => 1,
            Self::Version => 2,
            Self::Embargo => 3,
            Self::Conditions => 4,
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Contract violations when building or parsing a [`Coat`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoatError {
    #[error("{dimension} level {value} is outside 1..=4")]
    LevelOutOfRange { dimension: Dimension, value: i64 },
    #[error("expected 5 comma-separated levels, found {found}")]
    WrongArity { found: usize },
    #[error("token '{token}' at position {position} is not an integer")]
    InvalidToken { position: usize, token: String },
}

/// Classification of open access tuples.
///
/// Immutable five-dimensional ordinal vector (place, licence, version, embargo,
/// conditions), each level in `1..=4` where lower means more open. The label is
/// informational: equality, hashing and ordering only look at the levels.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "RawCoat")]
pub struct Coat {
    label: String,
    place: u8,
    licence: u8,
    version: u8,
    embargo: u8,
    conditions: u8,
}

impl Coat {
    pub fn new(
        label: impl Into<String>,
        place: u8,
        licence: u8,
        version: u8,
        embargo: u8,
        conditions: u8,
    ) -> Result<Self, CoatError> {
        Self::from_levels(label, [place, licence, version, embargo, conditions])
    }

    pub fn from_levels(label: impl Into<String>, levels: [u8; 5]) -> Result<Self, CoatError> {
        for (dimension, value) in Dimension::ordered().into_iter().zip(levels) {
            check_level(dimension, i64::from(value))?;
        }
        Ok(Self::from_checked(label.into(), levels))
    }

    /// Builds a tuple from levels already known to be within range.
    pub(crate) fn from_checked(label: String, levels: [u8; 5]) -> Self {
        debug_assert!(levels
            .iter()
            .all(|level| (BEST_LEVEL..=WORST_LEVEL).contains(level)));
        let [place, licence, version, embargo, conditions] = levels;
        Self {
            label,
            place,
            licence,
            version,
            embargo,
            conditions,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Returns a copy carrying a different label.
    pub fn with_label(&self, label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            ..self.clone()
        }
    }

    pub fn place(&self) -> u8 {
        self.place
    }

    pub fn licence(&self) -> u8 {
        self.licence
    }

    pub fn version(&self) -> u8 {
        self.version
    }

    pub fn embargo(&self) -> u8 {
        self.embargo
    }

    pub fn conditions(&self) -> u8 {
        self.conditions
    }

    pub fn level(&self, dimension: Dimension) -> u8 {
        self.levels()[dimension.index()]
    }

    pub fn levels(&self) -> [u8; 5] {
        [
            self.place,
            self.licence,
            self.version,
            self.embargo,
            self.conditions,
        ]
    }

    /// Pointwise dominance: every level of `self` is `<=` the level of `other`.
    ///
    /// Reflexive, and a partial order: two tuples may not dominate each other.
    pub fn is_lower(&self, other: &Coat) -> bool {
        self.levels()
            .iter()
            .zip(other.levels().iter())
            .all(|(mine, theirs)| mine <= theirs)
    }

    /// Dominance with at least one strictly better level.
    pub fn strictly_dominates(&self, other: &Coat) -> bool {
        self.is_lower(other) && self != other
    }

    /// Comma-separated levels in canonical order, e.g. `1,4,1,1,3`. Excludes the label.
    pub fn to_canonical_string(&self) -> String {
        self.levels()
            .iter()
            .map(u8::to_string)
            .collect::<Vec<_>>()
            .join(",")
    }

    /// Exact inverse of [`Coat::to_canonical_string`]; the parsed tuple has an empty label.
    pub fn from_canonical_string(value: &str) -> Result<Self, CoatError> {
        let tokens: Vec<&str> = value.split(',').collect();
        if tokens.len() != 5 {
            return Err(CoatError::WrongArity {
                found: tokens.len(),
            });
        }

        let mut levels = [WORST_LEVEL; 5];
        for (position, (token, dimension)) in tokens
            .into_iter()
            .zip(Dimension::ordered())
            .enumerate()
        {
            let value: i64 = token.parse().map_err(|_| CoatError::InvalidToken {
                position,
                token: token.to_string(),
            })?;
            levels[position] = check_level(dimension, value)?;
        }

        Ok(Self::from_checked(String::new(), levels))
    }

    /// Tab-separated levels with the provenance note of each dimension, one per line.
    pub fn explain_with(&self, notes: &[(Dimension, &str)]) -> String {
        let mut text = String::new();
        for dimension in Dimension::ordered() {
            let note = notes
                .iter()
                .find(|(candidate, _)| *candidate == dimension)
                .map(|(_, note)| *note)
                .unwrap_or("");
            text.push_str(&format!("{}\t{}\r\n", self.level(dimension), note));
        }
        text
    }
}

fn check_level(dimension: Dimension, value: i64) -> Result<u8, CoatError> {
    u8::try_from(value)
        .ok()
        .filter(|level| (BEST_LEVEL..=WORST_LEVEL).contains(level))
        .ok_or(CoatError::LevelOutOfRange { dimension, value })
}

impl PartialEq for Coat {
    fn eq(&self, other: &Self) -> bool {
        self.levels() == other.levels()
    }
}

impl Eq for Coat {}

impl Hash for Coat {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.levels().hash(state);
    }
}

impl PartialOrd for Coat {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if self == other {
            Some(Ordering::Equal)
        } else if self.is_lower(other) {
            Some(Ordering::Less)
        } else if other.is_lower(self) {
            Some(Ordering::Greater)
        } else {
            None
        }
    }
}

impl FromStr for Coat {
    type Err = CoatError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::from_canonical_string(value)
    }
}

impl fmt::Display for Coat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}, {}, {}, {}, {})",
            self.label, self.place, self.licence, self.version, self.embargo, self.conditions
        )
    }
}

#[derive(Deserialize)]
struct RawCoat {
    #[serde(default)]
    label: String,
    place: i64,
    licence: i64,
    version: i64,
    embargo: i64,
    conditions: i64,
}

impl TryFrom<RawCoat> for Coat {
    type Error = CoatError;

    fn try_from(raw: RawCoat) -> Result<Self, Self::Error> {
        let levels = [
            check_level(Dimension::Place, raw.place)?,
            check_level(Dimension::Licence, raw.licence)?,
            check_level(Dimension::Version, raw.version)?,
            check_level(Dimension::Embargo, raw.embargo)?,
            check_level(Dimension::Conditions, raw.conditions)?,
        ];
        Ok(Self::from_checked(raw.label, levels))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gold() -> Coat {
        Coat::new("gold", 1, 4, 1, 1, 3).expect("valid coat")
    }

    #[test]
    fn new_rejects_levels_outside_range() {
        let error = Coat::new("broken", 1, 0, 1, 1, 1).expect_err("level 0 rejected");
        assert_eq!(
            error,
            CoatError::LevelOutOfRange {
                dimension: Dimension::Licence,
                value: 0
            }
        );
        assert!(Coat::new("broken", 1, 1, 1, 1, 5).is_err());
    }

    #[test]
    fn parse_reports_position_of_bad_token() {
        match Coat::from_canonical_string("1,4,x,1,3") {
            Err(CoatError::InvalidToken { position, token }) => {
                assert_eq!(position, 2);
                assert_eq!(token, "x");
            }
            other => panic!("expected invalid token, got {other:?}"),
        }
    }

    #[test]
    fn parse_rejects_wrong_arity_and_range() {
        assert_eq!(
            Coat::from_canonical_string("1,4,1,1"),
            Err(CoatError::WrongArity { found: 4 })
        );
        assert_eq!(
            Coat::from_canonical_string(""),
            Err(CoatError::WrongArity { found: 1 })
        );
        assert!(matches!(
            Coat::from_canonical_string("-1,-1,-1,-1,-1"),
            Err(CoatError::LevelOutOfRange { value: -1, .. })
        ));
        assert!(matches!(
            Coat::from_canonical_string("1, 4,1,1,3"),
            Err(CoatError::InvalidToken { position: 1, .. })
        ));
    }

    #[test]
    fn equality_ignores_label() {
        assert_eq!(gold(), gold().with_label("something else"));
        assert_eq!(gold().with_label("renamed").label(), "renamed");
    }

    #[test]
    fn partial_order_follows_dominance() {
        let green = Coat::new("green", 2, 4, 4, 4, 1).expect("valid");
        let closed = Coat::new("closed", 4, 4, 4, 4, 4).expect("valid");
        assert_eq!(gold().partial_cmp(&closed), Some(Ordering::Less));
        assert_eq!(closed.partial_cmp(&green), Some(Ordering::Greater));
        assert_eq!(gold().partial_cmp(&green), None);
        assert!(gold() < closed);
    }

    #[test]
    fn deserialize_validates_levels() {
        let coat: Coat = serde_json::from_str(
            r#"{"label":"gold","place":1,"licence":4,"version":1,"embargo":1,"conditions":3}"#,
        )
        .expect("valid json coat");
        assert_eq!(coat, gold());

        let invalid = serde_json::from_str::<Coat>(
            r#"{"place":9,"licence":4,"version":1,"embargo":1,"conditions":3}"#,
        );
        assert!(invalid.is_err());
    }

    #[test]
    fn explanation_lists_every_dimension() {
        let text = gold().explain_with(&[(Dimension::Place, "host type = publisher")]);
        assert_eq!(text.lines().count(), 5);
        assert!(text.starts_with("1\thost type = publisher\r\n4\t\r\n"));
    }
}
