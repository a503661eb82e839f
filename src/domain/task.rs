use crate::domain::card::{insert_tag, rewrite_stage, CardId, Trackable};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Kind of follow-up work a task represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskType {
    Call,
    Email,
    #[serde(rename = "Doc Collection")]
    DocCollection,
    #[serde(rename = "Follow-up")]
    FollowUp,
    Compliance,
    Marketing,
}

impl TaskType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Call => "Call",
            Self::Email => "Email",
            Self::DocCollection => "Doc Collection",
            Self::FollowUp => "Follow-up",
            Self::Compliance => "Compliance",
            Self::Marketing => "Marketing",
        }
    }

    pub fn all() -> &'static [TaskType] {
        &[
            Self::Call,
            Self::Email,
            Self::DocCollection,
            Self::FollowUp,
            Self::Compliance,
            Self::Marketing,
        ]
    }
}

impl fmt::Display for TaskType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TaskType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s))
            .copied()
            .ok_or_else(|| format!("Invalid task type '{}'", s))
    }
}

/// Completion state of a task
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskStatus {
    #[default]
    Open,
    Completed,
}

/// A task on the task board.
///
/// Its lane is the loan stage the task belongs to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: CardId,
    pub title: String,
    #[serde(rename = "type")]
    pub task_type: TaskType,
    pub stage: String,
    #[serde(default)]
    pub time_in_stage: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(default)]
    pub status: TaskStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snoozed_until: Option<DateTime<Utc>>,
}

impl Task {
    pub fn new(
        id: CardId,
        title: impl Into<String>,
        task_type: TaskType,
        stage: impl Into<String>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            task_type,
            stage: stage.into(),
            time_in_stage: 0,
            assignee: None,
            due_date: None,
            tags: Vec::new(),
            status: TaskStatus::Open,
            completed_at: None,
            snoozed_until: None,
        }
    }

    pub fn with_assignee(mut self, assignee: impl Into<String>) -> Self {
        self.assignee = Some(assignee.into());
        self
    }

    pub fn with_due_date(mut self, date: NaiveDate) -> Self {
        self.due_date = Some(date);
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.add_tag(tag);
        self
    }

    pub fn add_tag(&mut self, tag: impl Into<String>) {
        insert_tag(&mut self.tags, tag.into());
    }

    pub fn mark_done(&mut self) {
        self.status = TaskStatus::Completed;
        self.completed_at = Some(Utc::now());
        self.snoozed_until = None;
    }

    pub fn reopen(&mut self) {
        self.status = TaskStatus::Open;
        self.completed_at = None;
    }

    pub fn toggle_done(&mut self) {
        match self.status {
            TaskStatus::Open => self.mark_done(),
            TaskStatus::Completed => self.reopen(),
        }
    }

    pub fn reassign(&mut self, assignee: impl Into<String>) {
        self.assignee = Some(assignee.into());
    }

    /// Hides the task until `until`
    pub fn snooze(&mut self, until: DateTime<Utc>) {
        self.snoozed_until = Some(until);
    }

    pub fn is_snoozed_at(&self, now: DateTime<Utc>) -> bool {
        self.snoozed_until.map(|until| now < until).unwrap_or(false)
    }
}

impl Trackable for Task {
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
        &self.title
    }

    fn kind(&self) -> Option<&str> {
        Some(self.task_type.as_str())
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

    fn is_completed(&self) -> bool {
        self.status == TaskStatus::Completed
    }
}
