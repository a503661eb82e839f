use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Stable identifier of a card or task within one board
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardId(String);

impl CardId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Fresh identifier for cards created during a session
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for CardId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Anything that sits in a lane.
///
/// Lane partition, filtering and the move operation are written against this
/// trait so pipeline cards and tasks share one implementation.
pub trait Trackable {
    fn id(&self) -> &CardId;

    /// Current stage key
    fn stage(&self) -> &str;

    /// Days since the last stage change
    fn time_in_stage(&self) -> u32;

    /// Places the card in `stage` and restarts `time_in_stage`. Returns
    /// whether the stage key changed.
    fn enter_stage(&mut self, stage: &str) -> bool;

    /// Advances `time_in_stage`
    fn record_elapsed(&mut self, days: u32);

    /// Field matched by free-text search (title or borrower name)
    fn search_text(&self) -> &str;

    /// Task type or loan type
    fn kind(&self) -> Option<&str>;

    fn assignee(&self) -> Option<&str>;

    fn due_date(&self) -> Option<NaiveDate>;

    fn tags(&self) -> &[String];

    fn is_completed(&self) -> bool;
}

pub(crate) fn rewrite_stage(stage: &mut String, time_in_stage: &mut u32, target: &str) -> bool {
    *time_in_stage = 0;
    if stage == target {
        return false;
    }
    *stage = target.to_string();
    true
}

pub(crate) fn insert_tag(tags: &mut Vec<String>, tag: String) {
    if !tags.contains(&tag) {
        tags.push(tag);
    }
}

/// Health flag shown on pipeline cards
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CardStatus {
    #[default]
    #[serde(rename = "On Track")]
    OnTrack,
    Delayed,
    Stalled,
}

impl fmt::Display for CardStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OnTrack => write!(f, "On Track"),
            Self::Delayed => write!(f, "Delayed"),
            Self::Stalled => write!(f, "Stalled"),
        }
    }
}

/// A pipeline card (one borrower / loan file)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub id: CardId,
    pub borrower: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub loan_type: String,
    #[serde(default)]
    pub loan_number: String,
    pub stage: String,
    #[serde(default)]
    pub time_in_stage: u32,
    #[serde(default)]
    pub status: CardStatus,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
}

impl Card {
    /// Creates a card in the given stage with zero time in stage
    pub fn new(id: CardId, borrower: impl Into<String>, stage: impl Into<String>) -> Self {
        Self {
            id,
            borrower: borrower.into(),
            address: String::new(),
            loan_type: String::new(),
            loan_number: String::new(),
            stage: stage.into(),
            time_in_stage: 0,
            status: CardStatus::OnTrack,
            tags: Vec::new(),
            assignee: None,
            due_date: None,
        }
    }

    pub fn with_loan(
        mut self,
        loan_number: impl Into<String>,
        loan_type: impl Into<String>,
        address: impl Into<String>,
    ) -> Self {
        self.loan_number = loan_number.into();
        self.loan_type = loan_type.into();
        self.address = address.into();
        self
    }

    pub fn with_status(mut self, status: CardStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_time_in_stage(mut self, days: u32) -> Self {
        self.time_in_stage = days;
        self
    }

    pub fn with_assignee(mut self, assignee: impl Into<String>) -> Self {
        self.assignee = Some(assignee.into());
        self
    }

    pub fn with_due_date(mut self, date: NaiveDate) -> Self {
        self.due_date = Some(date);
        self
    }

    /// Adds a tag; tags behave as a set
    pub fn add_tag(&mut self, tag: impl Into<String>) {
        insert_tag(&mut self.tags, tag.into());
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.add_tag(tag);
        self
    }
}

impl Trackable for Card {
    fn id(&self) -> &CardId {
        &self.id
    }

    fn stage(&self) -> &str {
        &self.stage
    }

    fn time_in_stage(&self) -> u32 {
        self.time_in_stage
    }

    fn enter_stage(&mut self, stage: &str) -> bool {
        rewrite_stage(&mut self.stage, &mut self.time_in_stage, stage)
    }

    fn record_elapsed(&mut self, days: u32) {
        self.time_in_stage = self.time_in_stage.saturating_add(days);
    }

    fn search_text(&self) -> &str {
        &self.borrower
    }

    fn kind(&self) -> Option<&str> {
        if self.loan_type.is_empty() {
            None
        } else {
            Some(&self.loan_type)
        }
    }

    fn assignee(&self) -> Option<&str> {
        self.assignee.as_deref()
    }

    fn due_date(&self) -> Option<NaiveDate> {
        self.due_date
    }

    fn tags(&self) -> &[String] {
        &self.tags
    }

    // Pipeline cards have no completion flag; reaching the last lane is not "done".
    fn is_completed(&self) -> bool {
        false
    }
}
