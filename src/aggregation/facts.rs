use serde::{Deserialize, Deserializer, Serialize};

use super::errors::AggregationError;
use super::kind::AggregationKind;

/// One aggregate call discovered in the caller's result projection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateFact {
    pub alias: String,
    #[serde(default, deserialize_with = "deserialize_path")]
    pub source_path: Vec<String>,
    pub kind: AggregationKind,
}

impl AggregateFact {
    pub fn new<I, S>(alias: impl Into<String>, source_path: I, kind: AggregationKind) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            alias: alias.into(),
            source_path: source_path.into_iter().map(Into::into).collect(),
            kind,
        }
    }

    /// A bare `$count` aggregate.
    pub fn count(alias: impl Into<String>) -> Self {
        Self {
            alias: alias.into(),
            source_path: Vec::new(),
            kind: AggregationKind::Count,
        }
    }

    pub fn path_text(&self) -> String {
        self.source_path.join("/")
    }
}

/// One grouping key: a member path, optionally named by the caller's key type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupingKey {
    #[serde(default)]
    pub member: Option<String>,
    #[serde(deserialize_with = "deserialize_path")]
    pub path: Vec<String>,
}

impl GroupingKey {
    pub fn new<I, S>(path: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            member: None,
            path: path.into_iter().map(Into::into).collect(),
        }
    }

    pub fn named<I, S>(member: impl Into<String>, path: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            member: Some(member.into()),
            ..Self::new(path)
        }
    }

    pub fn path_text(&self) -> String {
        self.path.join("/")
    }
}

/// Grouping of an aggregation stage.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum GroupingSpec {
    /// Constant key: aggregate over the whole set, no `groupby` wrapper.
    #[default]
    None,
    Keys(Vec<GroupingKey>),
}

/// Key selector shape as reported by the expression walker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeySelector {
    /// `g => 1`, `g => "all"`
    Constant(String),
    /// `g => g.Product.Color`
    Member(#[serde(deserialize_with = "deserialize_path")] Vec<String>),
    /// `g => new { Color = g.Product.Color, g.Year }`
    MemberInit(Vec<GroupingKey>),
    /// `g => new Key(g.Color)`
    Constructor { source_text: String },
}

impl TryFrom<KeySelector> for GroupingSpec {
    type Error = AggregationError;

    fn try_from(selector: KeySelector) -> Result<Self, Self::Error> {
        match selector {
            KeySelector::Constant(_) => Ok(GroupingSpec::None),
            KeySelector::Member(path) => Ok(GroupingSpec::Keys(vec![GroupingKey::new(path)])),
            KeySelector::MemberInit(keys) => Ok(GroupingSpec::Keys(keys)),
            KeySelector::Constructor { source_text } => {
                Err(AggregationError::InvalidGroupByKeySelector {
                    selector: source_text,
                })
            }
        }
    }
}

/// Accept a path either as `"A/B"` or as `[A, B]`.
pub(crate) fn deserialize_path<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawPath {
        Text(String),
        Segments(Vec<String>),
    }

    Ok(match RawPath::deserialize(deserializer)? {
        RawPath::Text(text) if text.is_empty() => Vec::new(),
        RawPath::Text(text) => text.split('/').map(str::to_string).collect(),
        RawPath::Segments(segments) => segments,
    })
}
