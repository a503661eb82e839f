pub mod board;
pub mod card;
pub mod filter;
pub mod lanes;
pub mod metrics;
mod seed;
pub mod stage;
pub mod task;
pub mod transition;

pub use board::{Board, BoardCatalog, BoardConfig, BoardType};
pub use card::{Card, CardId, CardStatus, Trackable};
pub use filter::{collect_tags, FilterContext, FilterSelection};
pub use lanes::Lanes;
pub use metrics::StageMetrics;
pub use stage::{Stage, StageSet, TransitionPolicy};
pub use task::{Task, TaskStatus, TaskType};
pub use transition::{apply_move, MoveEvent, MoveOutcome};
