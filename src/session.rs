use crate::{
    domain::{board::BoardType, filter::FilterContext},
    error::{Result, WorkdeskError},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use uuid::Uuid;

/// Who is using the workdesk; drives the default pipeline and which task
/// actions are offered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "Loan Officer")]
    LoanOfficer,
    #[serde(rename = "LOA / Processor", alias = "LOA")]
    Loa,
    #[serde(rename = "Production Partner")]
    ProductionPartner,
    Admin,
    /// Self-registered account without a business role
    User,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LoanOfficer => "Loan Officer",
            Self::Loa => "LOA / Processor",
            Self::ProductionPartner => "Production Partner",
            Self::Admin => "Admin",
            Self::User => "User",
        }
    }

    /// Pipeline shown first after login
    pub fn default_board(&self) -> BoardType {
        match self {
            Self::LoanOfficer | Self::Admin | Self::User => BoardType::Lo,
            Self::Loa => BoardType::Loa,
            Self::ProductionPartner => BoardType::Cem,
        }
    }

    /// Reassign and snooze are offered to loan officers and processors only
    pub fn can_manage_tasks(&self) -> bool {
        matches!(self, Self::LoanOfficer | Self::Loa)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Role {
    type Err = WorkdeskError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "loan officer" | "lo" => Ok(Self::LoanOfficer),
            "loa" | "loa / processor" => Ok(Self::Loa),
            "production partner" | "pp" => Ok(Self::ProductionPartner),
            "admin" => Ok(Self::Admin),
            "user" => Ok(Self::User),
            _ => Err(WorkdeskError::UnknownRole(s.to_string())),
        }
    }
}

/// Profile identifier. Older profiles carry a millisecond timestamp, newer
/// ones a UUID string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProfileId {
    Numeric(u64),
    Text(String),
}

impl fmt::Display for ProfileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Numeric(n) => write!(f, "{}", n),
            Self::Text(s) => write!(f, "{}", s),
        }
    }
}

/// Locally stored user profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: ProfileId,
    pub email: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    pub tier: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registered_at: Option<DateTime<Utc>>,
}

impl UserProfile {
    /// Creates a fresh profile for a newly registered user
    pub fn register(email: impl Into<String>, name: impl Into<String>, role: Role) -> Self {
        Self {
            id: ProfileId::Text(Uuid::new_v4().to_string()),
            email: email.into(),
            name: name.into(),
            avatar: None,
            tier: role,
            registered_at: Some(Utc::now()),
        }
    }
}

/// The logged-in user and their active role.
///
/// Passed explicitly to whatever needs to know who is acting.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub profile: UserProfile,
    pub role: Role,
}

impl Session {
    pub fn new(profile: UserProfile, role: Role) -> Self {
        Self { profile, role }
    }

    pub fn user_name(&self) -> &str {
        &self.profile.name
    }

    /// Resolves "assigned to me" filters against this user
    pub fn filter_context(&self) -> FilterContext<'_> {
        FilterContext::for_user(&self.profile.name)
    }

    /// Fails unless the role may reassign or snooze tasks
    pub fn require_task_management(&self, action: &str) -> Result<()> {
        if self.role.can_manage_tasks() {
            Ok(())
        } else {
            Err(WorkdeskError::PermissionDenied {
                role: self.role.to_string(),
                action: action.to_string(),
            })
        }
    }
}
