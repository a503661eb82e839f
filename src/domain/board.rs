use crate::domain::{
    card::{Card, CardId, Trackable},
    filter::{collect_tags, FilterContext, FilterSelection},
    lanes::Lanes,
    metrics::StageMetrics,
    seed,
    stage::{StageSet, TransitionPolicy},
    task::Task,
    transition::{apply_move, MoveEvent, MoveOutcome},
};
use crate::error::{Result, WorkdeskError};
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, collections::HashSet, fmt, path::Path, str::FromStr};
use tracing::debug;

/// The fixed pipeline workflows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum BoardType {
    /// Loan application pipeline
    #[serde(rename = "LO")]
    Lo,
    /// Closed client management pipeline
    #[serde(rename = "ClosedClient")]
    ClosedClient,
    /// LOA file processing pipeline
    #[serde(rename = "LOA")]
    Loa,
    /// Production partner prospect pipeline
    #[serde(rename = "CEM")]
    Cem,
}

impl BoardType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Lo => "LO",
            Self::ClosedClient => "ClosedClient",
            Self::Loa => "LOA",
            Self::Cem => "CEM",
        }
    }

    pub fn all() -> &'static [BoardType] {
        &[Self::Lo, Self::ClosedClient, Self::Loa, Self::Cem]
    }

    /// Position in [`BoardType::all`]
    pub fn index(&self) -> usize {
        match self {
            Self::Lo => 0,
            Self::ClosedClient => 1,
            Self::Loa => 2,
            Self::Cem => 3,
        }
    }
}

impl fmt::Display for BoardType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for BoardType {
    type Err = WorkdeskError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::all()
            .iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s))
            .copied()
            .ok_or_else(|| WorkdeskError::UnknownBoardType(s.to_string()))
    }
}

/// Static definition of one board: label, ordered stages, move policy and
/// the cards it starts with
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardConfig<T> {
    pub label: String,
    pub stages: StageSet,
    #[serde(default)]
    pub policy: TransitionPolicy,
    #[serde(default = "Vec::new")]
    pub seed: Vec<T>,
}

impl<T: Trackable> BoardConfig<T> {
    pub fn new(label: impl Into<String>, stages: StageSet) -> Self {
        Self {
            label: label.into(),
            stages,
            policy: TransitionPolicy::Unrestricted,
            seed: Vec::new(),
        }
    }

    pub fn with_seed(mut self, seed: Vec<T>) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_policy(mut self, policy: TransitionPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Checks stage keys and seed cards against the board invariants
    pub fn validate(&self) -> Result<()> {
        if self.stages.is_empty() {
            return Err(WorkdeskError::ConfigError(format!(
                "{} declares no stages",
                self.label
            )));
        }
        if let Some(key) = self.stages.duplicate_key() {
            return Err(WorkdeskError::ConfigError(format!(
                "{} declares stage '{}' twice",
                self.label, key
            )));
        }

        let mut ids = HashSet::new();
        for card in &self.seed {
            if !self.stages.contains(card.stage()) {
                return Err(WorkdeskError::UnknownStage {
                    board: self.label.clone(),
                    stage: card.stage().to_string(),
                });
            }
            if !ids.insert(card.id()) {
                return Err(WorkdeskError::DuplicateCard(card.id().to_string()));
            }
        }
        Ok(())
    }
}

/// Every board definition, built once at startup and read-only afterwards
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardCatalog {
    pub pipelines: BTreeMap<BoardType, BoardConfig<Card>>,
    pub tasks: BoardConfig<Task>,
}

impl BoardCatalog {
    /// The four pipelines and the task board shipped with the workdesk
    pub fn builtin() -> Self {
        Self {
            pipelines: BoardType::all()
                .iter()
                .map(|t| (*t, seed::pipeline(*t)))
                .collect(),
            tasks: seed::task_board(),
        }
    }

    /// Parses and validates a catalog from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        let catalog: Self = serde_json::from_str(json)?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Reads a catalog file
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let contents = tokio::fs::read_to_string(path.as_ref()).await?;
        Self::from_json(&contents)
    }

    pub fn validate(&self) -> Result<()> {
        for board_type in BoardType::all() {
            self.pipelines
                .get(board_type)
                .ok_or_else(|| {
                    WorkdeskError::ConfigError(format!("missing pipeline {}", board_type))
                })?
                .validate()?;
        }
        self.tasks.validate()
    }

    pub fn pipeline(&self, board_type: BoardType) -> Option<&BoardConfig<Card>> {
        self.pipelines.get(&board_type)
    }

    pub fn task_board(&self) -> &BoardConfig<Task> {
        &self.tasks
    }
}

impl Default for BoardCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Kanban board state: the declared lanes plus the in-memory card collection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Board<T> {
    pub label: String,
    stages: StageSet,
    policy: TransitionPolicy,
    cards: Vec<T>,
}

impl<T: Trackable + Clone> Board<T> {
    /// Empty board with the given lanes
    pub fn new(label: impl Into<String>, stages: StageSet) -> Self {
        Self {
            label: label.into(),
            stages,
            policy: TransitionPolicy::Unrestricted,
            cards: Vec::new(),
        }
    }

    /// Board seeded from its static definition
    pub fn from_config(config: &BoardConfig<T>) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            label: config.label.clone(),
            stages: config.stages.clone(),
            policy: config.policy.clone(),
            cards: config.seed.clone(),
        })
    }

    pub fn with_policy(mut self, policy: TransitionPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn stages(&self) -> &StageSet {
        &self.stages
    }

    pub fn policy(&self) -> &TransitionPolicy {
        &self.policy
    }

    pub fn cards(&self) -> &[T] {
        &self.cards
    }

    pub fn get(&self, id: &CardId) -> Option<&T> {
        self.cards.iter().find(|c| c.id() == id)
    }

    /// Cards grouped by lane
    pub fn lanes(&self) -> Lanes<'_, T> {
        Lanes::partition(&self.cards, &self.stages)
    }

    /// Lanes showing only cards that pass `filter`
    pub fn filtered_lanes(
        &self,
        filter: &FilterSelection,
        ctx: &FilterContext<'_>,
    ) -> Lanes<'_, T> {
        self.lanes().filter(|card| filter.matches(card, ctx))
    }

    /// Handles a drag-release on this board
    pub fn apply_move(&mut self, event: &MoveEvent) -> MoveOutcome {
        apply_move(&mut self.cards, &self.stages, &self.policy, event)
    }

    /// Adds a card at the end of its lane
    pub fn insert(&mut self, card: T) -> Result<()> {
        self.check_stage(card.stage())?;
        if self.get(card.id()).is_some() {
            return Err(WorkdeskError::DuplicateCard(card.id().to_string()));
        }
        debug!(board = %self.label, card_id = %card.id(), stage = card.stage(), "card added");
        self.cards.push(card);
        Ok(())
    }

    /// Edits a card in place. The edit is discarded if it changes the id or
    /// leaves the card in an undeclared stage.
    pub fn update<F>(&mut self, id: &CardId, edit: F) -> Result<()>
    where
        F: FnOnce(&mut T),
    {
        let pos = self.position(id)?;
        let mut edited = self.cards[pos].clone();
        edit(&mut edited);

        if edited.id() != id {
            return Err(WorkdeskError::ConfigError(format!(
                "card {} may not change its id",
                id
            )));
        }
        self.check_stage(edited.stage())?;

        self.cards[pos] = edited;
        Ok(())
    }

    pub fn remove(&mut self, id: &CardId) -> Result<T> {
        let pos = self.position(id)?;
        debug!(board = %self.label, card_id = %id, "card removed");
        Ok(self.cards.remove(pos))
    }

    /// Advances every card's time in stage
    pub fn record_elapsed(&mut self, days: u32) {
        for card in &mut self.cards {
            card.record_elapsed(days);
        }
    }

    pub fn metrics(&self) -> Vec<StageMetrics> {
        StageMetrics::for_lanes(&self.lanes())
    }

    /// Distinct tags on the board, for the tag dropdown
    pub fn tags(&self) -> Vec<String> {
        collect_tags(&self.cards)
    }

    fn position(&self, id: &CardId) -> Result<usize> {
        self.cards
            .iter()
            .position(|c| c.id() == id)
            .ok_or_else(|| WorkdeskError::CardNotFound(id.to_string()))
    }

    fn check_stage(&self, stage: &str) -> Result<()> {
        if self.stages.contains(stage) {
            Ok(())
        } else {
            Err(WorkdeskError::UnknownStage {
                board: self.label.clone(),
                stage: stage.to_string(),
            })
        }
    }
}
