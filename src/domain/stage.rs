use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// One lane of a board: a stage key plus its display color and icon glyph
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stage {
    pub key: String,
    pub color: String,
    pub icon: String,
}

impl Stage {
    pub fn new(key: impl Into<String>, color: impl Into<String>, icon: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            color: color.into(),
            icon: icon.into(),
        }
    }
}

/// Ordered stage list of a board type.
///
/// Order is fixed when the board type is defined and drives left-to-right
/// lane order; it is never derived from card data.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StageSet(Vec<Stage>);

impl StageSet {
    pub fn new(stages: Vec<Stage>) -> Self {
        Self(stages)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Stage> {
        self.0.iter()
    }

    /// Stage keys in lane order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|s| s.key.as_str())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.iter().any(|s| s.key == key)
    }

    pub fn get(&self, key: &str) -> Option<&Stage> {
        self.0.iter().find(|s| s.key == key)
    }

    /// Lane index of a stage key
    pub fn position(&self, key: &str) -> Option<usize> {
        self.0.iter().position(|s| s.key == key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the first key declared twice, if any
    pub fn duplicate_key(&self) -> Option<&str> {
        let mut seen = BTreeSet::new();
        self.keys().find(|key| !seen.insert(*key))
    }
}

impl FromIterator<Stage> for StageSet {
    fn from_iter<I: IntoIterator<Item = Stage>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Which stage-to-stage moves a board accepts
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", content = "edges", rename_all = "snake_case")]
pub enum TransitionPolicy {
    /// Any declared stage may move to any other declared stage
    #[default]
    Unrestricted,
    /// Only listed source -> destination edges are accepted
    AllowList(BTreeMap<String, BTreeSet<String>>),
}

impl TransitionPolicy {
    /// Starts an empty allow-list
    pub fn allow_list() -> Self {
        Self::AllowList(BTreeMap::new())
    }

    /// Adds an edge; turns an unrestricted policy into an allow-list
    pub fn allow(mut self, from: impl Into<String>, to: impl Into<String>) -> Self {
        if let Self::Unrestricted = self {
            self = Self::allow_list();
        }
        if let Self::AllowList(edges) = &mut self {
            edges.entry(from.into()).or_default().insert(to.into());
        }
        self
    }

    /// Checks if a move from `from` to `to` is accepted
    pub fn allows(&self, from: &str, to: &str) -> bool {
        match self {
            Self::Unrestricted => true,
            // Staying put is always valid
            _ if from == to => true,
            Self::AllowList(edges) => edges
                .get(from)
                .map(|targets| targets.contains(to))
                .unwrap_or(false),
        }
    }
}
