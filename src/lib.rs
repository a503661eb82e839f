//! # Workdesk Core
//!
//! Board, lane and filter model behind the loan officer / production
//! partner workdesk.
//!
//! The crate owns the kanban stage-transition model shared by the pipeline
//! boards and the task board: the static board catalog, lane partitioning,
//! filter composition and the move operation fired when a card is dropped on
//! another lane. Session state (user profile and role) is an explicit value
//! held by [`Workdesk`] rather than ambient global state.

pub mod config;
pub mod domain;
pub mod error;
pub mod session;
pub mod storage;
pub mod telemetry;
pub mod workdesk;

// Re-export commonly used types
pub use config::WorkdeskConfig;
pub use domain::{
    board::{Board, BoardCatalog, BoardConfig, BoardType},
    card::{Card, CardId, CardStatus, Trackable},
    filter::{AssigneeSelection, CompletionSelection, FilterContext, FilterSelection, Selection},
    lanes::Lanes,
    metrics::StageMetrics,
    stage::{Stage, StageSet, TransitionPolicy},
    task::{Task, TaskStatus, TaskType},
    transition::{IgnoreReason, LanePosition, MoveEvent, MoveOutcome},
};
pub use error::{Result, WorkdeskError};
pub use session::{ProfileId, Role, Session, UserProfile};
pub use storage::{FileProfileStore, ProfileStore};
pub use workdesk::Workdesk;
