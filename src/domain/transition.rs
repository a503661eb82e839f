use crate::domain::{
    card::{CardId, Trackable},
    lanes::Lanes,
    stage::{StageSet, TransitionPolicy},
};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, info};

/// A slot on the board: lane (stage key) and index within that lane
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanePosition {
    pub lane: String,
    pub index: usize,
}

impl LanePosition {
    pub fn new(lane: impl Into<String>, index: usize) -> Self {
        Self {
            lane: lane.into(),
            index,
        }
    }
}

/// A drag-release (or keyboard) reorder request.
///
/// Indices address the unfiltered lane partition. A missing destination
/// means the drop landed outside every lane.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveEvent {
    pub source: LanePosition,
    pub destination: Option<LanePosition>,
}

impl MoveEvent {
    pub fn new(
        source_lane: impl Into<String>,
        source_index: usize,
        destination_lane: impl Into<String>,
        destination_index: usize,
    ) -> Self {
        Self {
            source: LanePosition::new(source_lane, source_index),
            destination: Some(LanePosition::new(destination_lane, destination_index)),
        }
    }

    /// A drop that landed outside every lane
    pub fn cancelled(source_lane: impl Into<String>, source_index: usize) -> Self {
        Self {
            source: LanePosition::new(source_lane, source_index),
            destination: None,
        }
    }
}

/// Why a move event left the board untouched
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IgnoreReason {
    NoDestination,
    SamePosition,
    UnknownLane(String),
    NoCardAtSource,
    NotPermitted { from: String, to: String },
}

impl fmt::Display for IgnoreReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoDestination => write!(f, "dropped outside any lane"),
            Self::SamePosition => write!(f, "dropped where it started"),
            Self::UnknownLane(lane) => write!(f, "unknown lane '{}'", lane),
            Self::NoCardAtSource => write!(f, "no card at source position"),
            Self::NotPermitted { from, to } => write!(f, "move {} -> {} not permitted", from, to),
        }
    }
}

/// Result of applying a move event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoveOutcome {
    Moved {
        card_id: CardId,
        from: String,
        to: String,
        /// False for a drop onto another slot of the same lane
        stage_changed: bool,
    },
    Ignored(IgnoreReason),
}

impl MoveOutcome {
    pub fn is_moved(&self) -> bool {
        matches!(self, Self::Moved { .. })
    }
}

/// Applies a move event to a card collection.
///
/// The card found at the source slot is taken out, rewritten to the
/// destination stage with its time in stage reset to zero, and appended to
/// the end of the collection, so it lands last in its new lane. Malformed or
/// cancelled events are no-ops.
pub fn apply_move<T: Trackable>(
    cards: &mut Vec<T>,
    stages: &StageSet,
    policy: &TransitionPolicy,
    event: &MoveEvent,
) -> MoveOutcome {
    let outcome = resolve(cards.as_slice(), stages, policy, event).map(|(card_id, from, to)| {
        let Some(pos) = cards.iter().position(|c| c.id() == &card_id) else {
            return MoveOutcome::Ignored(IgnoreReason::NoCardAtSource);
        };
        let mut card = cards.remove(pos);
        let stage_changed = card.enter_stage(&to);
        cards.push(card);

        info!(card_id = %card_id, from = %from, to = %to, stage_changed, "card moved");
        MoveOutcome::Moved {
            card_id,
            from,
            to,
            stage_changed,
        }
    });

    match outcome {
        Ok(moved) => moved,
        Err(reason) => {
            debug!(%reason, source = %event.source.lane, "move ignored");
            MoveOutcome::Ignored(reason)
        }
    }
}

fn resolve<T: Trackable>(
    cards: &[T],
    stages: &StageSet,
    policy: &TransitionPolicy,
    event: &MoveEvent,
) -> Result<(CardId, String, String), IgnoreReason> {
    let source = &event.source;
    let destination = event
        .destination
        .as_ref()
        .ok_or(IgnoreReason::NoDestination)?;

    if source == destination {
        return Err(IgnoreReason::SamePosition);
    }
    for lane in [&source.lane, &destination.lane] {
        if !stages.contains(lane) {
            return Err(IgnoreReason::UnknownLane(lane.clone()));
        }
    }

    let card_id = Lanes::partition(cards, stages)
        .card_at(&source.lane, source.index)
        .map(|card| card.id().clone())
        .ok_or(IgnoreReason::NoCardAtSource)?;

    if !policy.allows(&source.lane, &destination.lane) {
        return Err(IgnoreReason::NotPermitted {
            from: source.lane.clone(),
            to: destination.lane.clone(),
        });
    }

    Ok((card_id, source.lane.clone(), destination.lane.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{card::Card, stage::Stage};

    fn stages() -> StageSet {
        StageSet::new(vec![
            Stage::new("New Lead", "teal", "🟢"),
            Stage::new("Contacted", "gray", "📞"),
            Stage::new("Closed", "green", "🏁"),
        ])
    }

    fn card(id: &str, stage: &str, days: u32) -> Card {
        Card::new(CardId::new(id), format!("Borrower {}", id), stage).with_time_in_stage(days)
    }

    fn lane_ids(cards: &[Card], stages: &StageSet, lane: &str) -> Vec<String> {
        Lanes::partition(cards, stages)
            .get(lane)
            .unwrap()
            .iter()
            .map(|c| c.id.to_string())
            .collect()
    }

    #[test]
    fn test_single_card_scenario() {
        let stages = StageSet::new(vec![
            Stage::new("New Lead", "teal", "🟢"),
            Stage::new("Contacted", "gray", "📞"),
        ]);
        let mut cards = vec![card("1", "New Lead", 3)];

        let outcome = apply_move(
            &mut cards,
            &stages,
            &TransitionPolicy::default(),
            &MoveEvent::new("New Lead", 0, "Contacted", 0),
        );

        assert!(outcome.is_moved());
        assert!(lane_ids(&cards, &stages, "New Lead").is_empty());
        assert_eq!(lane_ids(&cards, &stages, "Contacted"), vec!["1"]);
        assert_eq!(cards[0].stage, "Contacted");
        assert_eq!(cards[0].time_in_stage, 0);
    }

    #[test]
    fn test_cancelled_drop_is_identity() {
        let stages = stages();
        let mut cards = vec![card("1", "New Lead", 3), card("2", "Contacted", 1)];
        let before = cards.clone();

        let outcome = apply_move(
            &mut cards,
            &stages,
            &TransitionPolicy::default(),
            &MoveEvent::cancelled("New Lead", 0),
        );

        assert_eq!(outcome, MoveOutcome::Ignored(IgnoreReason::NoDestination));
        assert_eq!(cards, before);
    }

    #[test]
    fn test_same_position_is_noop() {
        let stages = stages();
        let mut cards = vec![card("1", "New Lead", 3)];
        let before = cards.clone();

        let outcome = apply_move(
            &mut cards,
            &stages,
            &TransitionPolicy::default(),
            &MoveEvent::new("New Lead", 0, "New Lead", 0),
        );

        assert_eq!(outcome, MoveOutcome::Ignored(IgnoreReason::SamePosition));
        assert_eq!(cards, before);
    }

    #[test]
    fn test_moved_card_appends_to_destination_lane() {
        let stages = stages();
        let mut cards = vec![
            card("1", "New Lead", 2),
            card("2", "Contacted", 5),
            card("3", "Contacted", 1),
        ];

        apply_move(
            &mut cards,
            &stages,
            &TransitionPolicy::default(),
            &MoveEvent::new("New Lead", 0, "Contacted", 0),
        );

        assert_eq!(lane_ids(&cards, &stages, "Contacted"), vec!["2", "3", "1"]);
    }

    #[test]
    fn test_same_lane_reorder_resets_time_in_stage() {
        let stages = stages();
        let mut cards = vec![card("1", "Contacted", 5), card("2", "Contacted", 1)];

        let outcome = apply_move(
            &mut cards,
            &stages,
            &TransitionPolicy::default(),
            &MoveEvent::new("Contacted", 0, "Contacted", 1),
        );

        assert_eq!(
            outcome,
            MoveOutcome::Moved {
                card_id: CardId::new("1"),
                from: "Contacted".into(),
                to: "Contacted".into(),
                stage_changed: false,
            }
        );
        assert_eq!(lane_ids(&cards, &stages, "Contacted"), vec!["2", "1"]);
        assert_eq!(cards[1].time_in_stage, 0);
        assert_eq!(cards[0].time_in_stage, 1);
    }

    #[test]
    fn test_closed_card_can_move_back() {
        let stages = stages();
        let mut cards = vec![card("1", "Closed", 9)];

        let outcome = apply_move(
            &mut cards,
            &stages,
            &TransitionPolicy::default(),
            &MoveEvent::new("Closed", 0, "New Lead", 0),
        );

        assert!(outcome.is_moved());
        assert_eq!(cards[0].stage, "New Lead");
    }

    #[test]
    fn test_malformed_events_are_ignored() {
        let stages = stages();
        let mut cards = vec![card("1", "New Lead", 3)];
        let before = cards.clone();
        let policy = TransitionPolicy::default();

        let outcome = apply_move(
            &mut cards,
            &stages,
            &policy,
            &MoveEvent::new("New Lead", 4, "Contacted", 0),
        );
        assert_eq!(outcome, MoveOutcome::Ignored(IgnoreReason::NoCardAtSource));

        let outcome = apply_move(
            &mut cards,
            &stages,
            &policy,
            &MoveEvent::new("New Lead", 0, "Archived", 0),
        );
        assert_eq!(
            outcome,
            MoveOutcome::Ignored(IgnoreReason::UnknownLane("Archived".into()))
        );

        assert_eq!(cards, before);
    }

    #[test]
    fn test_allow_list_rejects_unlisted_edge() {
        let stages = stages();
        let mut cards = vec![card("1", "Closed", 9)];
        let policy = TransitionPolicy::allow_list()
            .allow("New Lead", "Contacted")
            .allow("Contacted", "Closed");

        let outcome = apply_move(
            &mut cards,
            &stages,
            &policy,
            &MoveEvent::new("Closed", 0, "New Lead", 0),
        );

        assert_eq!(
            outcome,
            MoveOutcome::Ignored(IgnoreReason::NotPermitted {
                from: "Closed".into(),
                to: "New Lead".into(),
            })
        );
        assert_eq!(cards[0].stage, "Closed");
        assert_eq!(cards[0].time_in_stage, 9);
    }

    #[test]
    fn test_event_wire_shape() {
        let json = r#"{"source": {"lane": "New Lead", "index": 0}, "destination": null}"#;
        let event: MoveEvent = serde_json::from_str(json).unwrap();
        assert_eq!(event, MoveEvent::cancelled("New Lead", 0));
    }
}
