use crate::domain::{card::Trackable, stage::StageSet};

/// Cards of a board grouped by stage, in stage order.
///
/// A projection over borrowed cards: it holds no state of its own and is
/// rebuilt whenever the collection changes. Every declared stage has a lane,
/// empty or not. Cards whose stage is not declared are kept in `unassigned`
/// so no card is ever dropped.
#[derive(Debug)]
pub struct Lanes<'a, T> {
    lanes: Vec<(&'a str, Vec<&'a T>)>,
    unassigned: Vec<&'a T>,
}

impl<'a, T: Trackable> Lanes<'a, T> {
    /// Groups `cards` by stage, preserving their relative order in each lane
    pub fn partition(cards: &'a [T], stages: &'a StageSet) -> Self {
        let mut lanes: Vec<(&'a str, Vec<&'a T>)> =
            stages.keys().map(|key| (key, Vec::new())).collect();
        let mut unassigned = Vec::new();

        for card in cards {
            match lanes.iter_mut().find(|(key, _)| *key == card.stage()) {
                Some((_, lane)) => lane.push(card),
                None => unassigned.push(card),
            }
        }

        Self { lanes, unassigned }
    }

    /// Keeps only cards matching `predicate`; lanes themselves are kept
    pub fn filter<F>(&self, predicate: F) -> Self
    where
        F: Fn(&T) -> bool,
    {
        let keep = |cards: &Vec<&'a T>| -> Vec<&'a T> {
            cards.iter().copied().filter(|card| predicate(*card)).collect()
        };

        Self {
            lanes: self
                .lanes
                .iter()
                .map(|(key, cards)| (*key, keep(cards)))
                .collect(),
            unassigned: keep(&self.unassigned),
        }
    }

    /// Cards in one lane; `None` only for an undeclared stage
    pub fn get(&self, stage: &str) -> Option<&[&'a T]> {
        self.lanes
            .iter()
            .find(|(key, _)| *key == stage)
            .map(|(_, cards)| cards.as_slice())
    }

    /// Card at `index` within a lane
    pub fn card_at(&self, stage: &str, index: usize) -> Option<&'a T> {
        self.get(stage).and_then(|cards| cards.get(index).copied())
    }

    /// Lanes in stage order
    pub fn iter(&self) -> impl Iterator<Item = (&'a str, &[&'a T])> + '_ {
        self.lanes.iter().map(|(key, cards)| (*key, cards.as_slice()))
    }

    pub fn unassigned(&self) -> &[&'a T] {
        &self.unassigned
    }

    /// All cards, lane by lane, followed by any unassigned ones
    pub fn flatten(&self) -> Vec<&'a T> {
        self.lanes
            .iter()
            .flat_map(|(_, cards)| cards.iter().copied())
            .chain(self.unassigned.iter().copied())
            .collect()
    }

    /// Number of lanes (declared stages)
    pub fn lane_count(&self) -> usize {
        self.lanes.len()
    }

    /// Number of cards across all lanes
    pub fn card_count(&self) -> usize {
        self.lanes.iter().map(|(_, cards)| cards.len()).sum::<usize>() + self.unassigned.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        card::{Card, CardId},
        stage::Stage,
    };

    fn stages() -> StageSet {
        StageSet::new(vec![
            Stage::new("New Lead", "teal", "🟢"),
            Stage::new("Contacted", "gray", "📞"),
            Stage::new("Closed", "green", "🏁"),
        ])
    }

    fn card(id: &str, stage: &str) -> Card {
        Card::new(CardId::new(id), format!("Borrower {}", id), stage)
    }

    fn ids(cards: &[&Card]) -> Vec<String> {
        cards.iter().map(|c| c.id.to_string()).collect()
    }

    #[test]
    fn test_partition_preserves_order_within_lane() {
        let stages = stages();
        let cards = vec![
            card("1", "Contacted"),
            card("2", "New Lead"),
            card("3", "Contacted"),
            card("4", "New Lead"),
        ];

        let lanes = Lanes::partition(&cards, &stages);

        assert_eq!(ids(lanes.get("New Lead").unwrap()), vec!["2", "4"]);
        assert_eq!(ids(lanes.get("Contacted").unwrap()), vec!["1", "3"]);
        assert_eq!(lanes.get("Closed").unwrap().len(), 0);
    }

    #[test]
    fn test_empty_stage_has_lane() {
        let stages = stages();
        let cards: Vec<Card> = Vec::new();
        let lanes = Lanes::partition(&cards, &stages);

        assert_eq!(lanes.lane_count(), 3);
        for (_, cards) in lanes.iter() {
            assert!(cards.is_empty());
        }
        assert!(lanes.get("Unknown").is_none());
    }

    #[test]
    fn test_lanes_follow_stage_order() {
        let stages = stages();
        let cards = vec![card("1", "Closed"), card("2", "New Lead")];
        let lanes = Lanes::partition(&cards, &stages);

        let keys: Vec<&str> = lanes.iter().map(|(key, _)| key).collect();
        assert_eq!(keys, vec!["New Lead", "Contacted", "Closed"]);
        assert_eq!(ids(&lanes.flatten()), vec!["2", "1"]);
    }

    #[test]
    fn test_undeclared_stage_is_not_dropped() {
        let stages = stages();
        let cards = vec![card("1", "New Lead"), card("2", "Archived")];
        let lanes = Lanes::partition(&cards, &stages);

        assert_eq!(lanes.card_count(), 2);
        assert_eq!(ids(lanes.unassigned()), vec!["2"]);
    }

    #[test]
    fn test_card_at() {
        let stages = stages();
        let cards = vec![card("1", "Contacted"), card("2", "Contacted")];
        let lanes = Lanes::partition(&cards, &stages);

        assert_eq!(lanes.card_at("Contacted", 1).map(|c| c.id.as_str()), Some("2"));
        assert!(lanes.card_at("Contacted", 2).is_none());
        assert!(lanes.card_at("New Lead", 0).is_none());
    }

    #[test]
    fn test_filter_keeps_lanes() {
        let stages = stages();
        let cards = vec![card("1", "New Lead"), card("2", "Contacted")];
        let lanes = Lanes::partition(&cards, &stages);

        let filtered = lanes.filter(|c| c.id.as_str() == "2");
        assert_eq!(filtered.lane_count(), 3);
        assert!(filtered.get("New Lead").unwrap().is_empty());
        assert_eq!(ids(filtered.get("Contacted").unwrap()), vec!["2"]);
    }
}
