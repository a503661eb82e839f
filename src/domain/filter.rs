use crate::domain::card::Trackable;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A single-valued filter choice; `Any` places no constraint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Selection<T> {
    Any,
    Only(T),
}

impl<T> Default for Selection<T> {
    fn default() -> Self {
        Self::Any
    }
}

impl<T> Selection<T> {
    pub fn is_any(&self) -> bool {
        matches!(self, Self::Any)
    }
}

impl Selection<String> {
    pub fn only(value: impl Into<String>) -> Self {
        Self::Only(value.into())
    }

    /// Checks a single optional field against the selection
    pub fn admits(&self, value: Option<&str>) -> bool {
        match self {
            Self::Any => true,
            Self::Only(wanted) => value == Some(wanted.as_str()),
        }
    }

    /// Checks set membership against the selection
    pub fn admits_any_of(&self, values: &[String]) -> bool {
        match self {
            Self::Any => true,
            Self::Only(wanted) => values.iter().any(|v| v == wanted),
        }
    }
}

/// Assignee filter. `Me` resolves against the session user at match time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssigneeSelection {
    #[default]
    Any,
    Me,
    Named(String),
}

impl AssigneeSelection {
    pub fn admits(&self, assignee: Option<&str>, ctx: &FilterContext<'_>) -> bool {
        match self {
            Self::Any => true,
            // No session user means nothing is "mine"
            Self::Me => match (ctx.current_user, assignee) {
                (Some(me), Some(assignee)) => me == assignee,
                _ => false,
            },
            Self::Named(name) => assignee == Some(name.as_str()),
        }
    }
}

/// Completed / incomplete toggle
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompletionSelection {
    #[default]
    Any,
    Incomplete,
    Completed,
}

impl CompletionSelection {
    pub fn admits(&self, completed: bool) -> bool {
        match self {
            Self::Any => true,
            Self::Incomplete => !completed,
            Self::Completed => completed,
        }
    }
}

/// Who is looking at the board, for selections that depend on it
#[derive(Debug, Clone, Copy, Default)]
pub struct FilterContext<'a> {
    pub current_user: Option<&'a str>,
}

impl<'a> FilterContext<'a> {
    pub fn for_user(name: &'a str) -> Self {
        Self {
            current_user: Some(name),
        }
    }
}

/// The filter bar of one board.
///
/// A card passes when it satisfies every active selection. With every field at
/// its default nothing is filtered out. Applying a selection never touches the
/// underlying collection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterSelection {
    /// Task type or loan type
    pub kind: Selection<String>,
    /// Stage or loan stage
    pub stage: Selection<String>,
    pub assignee: AssigneeSelection,
    /// Exact-match due date
    pub due_date: Option<NaiveDate>,
    pub tag: Selection<String>,
    /// Case-insensitive substring of the title / borrower name
    pub search: String,
    pub completion: CompletionSelection,
}

impl FilterSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Selection::only(kind);
        self
    }

    pub fn with_stage(mut self, stage: impl Into<String>) -> Self {
        self.stage = Selection::only(stage);
        self
    }

    pub fn with_assignee(mut self, assignee: AssigneeSelection) -> Self {
        self.assignee = assignee;
        self
    }

    pub fn with_due_date(mut self, date: NaiveDate) -> Self {
        self.due_date = Some(date);
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Selection::only(tag);
        self
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    pub fn with_completion(mut self, completion: CompletionSelection) -> Self {
        self.completion = completion;
        self
    }

    /// Resets every selection to "no constraint"
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// True when at least one selection constrains
    pub fn is_active(&self) -> bool {
        *self != Self::default()
    }

    pub fn matches<T: Trackable>(&self, item: &T, ctx: &FilterContext<'_>) -> bool {
        self.kind.admits(item.kind())
            && self.stage.admits(Some(item.stage()))
            && self.assignee.admits(item.assignee(), ctx)
            && self.due_date.map_or(true, |due| item.due_date() == Some(due))
            && self.tag.admits_any_of(item.tags())
            && self.matches_search(item.search_text())
            && self.completion.admits(item.is_completed())
    }

    fn matches_search(&self, text: &str) -> bool {
        self.search.is_empty() || text.to_lowercase().contains(&self.search.to_lowercase())
    }

    /// Items passing the filter, in collection order
    pub fn apply<'a, T: Trackable>(&self, items: &'a [T], ctx: &FilterContext<'_>) -> Vec<&'a T> {
        let kept: Vec<&T> = items.iter().filter(|item| self.matches(*item, ctx)).collect();
        debug!(total = items.len(), kept = kept.len(), active = self.is_active(), "applied filter");
        kept
    }
}

/// Distinct tags across a collection, in first-seen order
pub fn collect_tags<T: Trackable>(items: &[T]) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();
    for tag in items.iter().flat_map(|item| item.tags()) {
        if !tags.contains(tag) {
            tags.push(tag.clone());
        }
    }
    tags
}
