use proptest::prelude::*;
use workdesk_core::{
    AssigneeSelection, Board, Card, CardId, CompletionSelection, FilterContext, FilterSelection,
    Lanes, MoveEvent, MoveOutcome, Stage, StageSet, Trackable,
};

const STAGE_KEYS: [&str; 4] = ["New Lead", "Contacted", "Pre-Approved", "Closed"];
const TAGS: [&str; 3] = ["VIP", "Refi", "Referral"];
const PEOPLE: [&str; 3] = ["Team Member 1", "Team Member 2", "Jordan Reyes"];

fn stages() -> StageSet {
    STAGE_KEYS
        .iter()
        .map(|key| Stage::new(*key, "teal", "•"))
        .collect()
}

prop_compose! {
    fn card_fields()(
        stage in 0..STAGE_KEYS.len(),
        name in "[A-Za-z ]{0,12}",
        days in 0u32..30,
        tag in proptest::option::of(0..TAGS.len()),
        assignee in proptest::option::of(0..PEOPLE.len()),
    ) -> (usize, String, u32, Option<usize>, Option<usize>) {
        (stage, name, days, tag, assignee)
    }
}

fn cards_strategy() -> impl Strategy<Value = Vec<Card>> {
    proptest::collection::vec(card_fields(), 0..24).prop_map(|rows| {
        rows.into_iter()
            .enumerate()
            .map(|(i, (stage, name, days, tag, assignee))| {
                let mut card = Card::new(CardId::new(i.to_string()), name, STAGE_KEYS[stage])
                    .with_time_in_stage(days);
                if let Some(t) = tag {
                    card.add_tag(TAGS[t]);
                }
                if let Some(a) = assignee {
                    card = card.with_assignee(PEOPLE[a]);
                }
                card
            })
            .collect()
    })
}

fn filter_strategy() -> impl Strategy<Value = FilterSelection> {
    (
        proptest::option::of(0..STAGE_KEYS.len()),
        proptest::option::of(0..TAGS.len()),
        proptest::option::of(0..PEOPLE.len()),
        "[a-z]{0,2}",
        any::<bool>(),
    )
        .prop_map(|(stage, tag, person, search, me)| {
            let mut filter = FilterSelection::new().with_search(search);
            if let Some(s) = stage {
                filter = filter.with_stage(STAGE_KEYS[s]);
            }
            if let Some(t) = tag {
                filter = filter.with_tag(TAGS[t]);
            }
            if me {
                filter = filter.with_assignee(AssigneeSelection::Me);
            } else if let Some(p) = person {
                filter = filter.with_assignee(AssigneeSelection::Named(PEOPLE[p].into()));
            }
            filter.with_completion(CompletionSelection::Incomplete)
        })
}

fn ids<'a>(cards: impl IntoIterator<Item = &'a Card>) -> Vec<String> {
    cards.into_iter().map(|c| c.id.to_string()).collect()
}

proptest! {
    #[test]
    fn prop_partition_is_order_preserving_permutation(cards in cards_strategy()) {
        let stages = stages();
        let lanes = Lanes::partition(&cards, &stages);

        let mut flattened = ids(lanes.flatten());
        let mut original = ids(&cards);
        prop_assert_eq!(flattened.len(), original.len());
        flattened.sort();
        original.sort();
        prop_assert_eq!(flattened, original);

        for (key, lane) in lanes.iter() {
            let expected = ids(cards.iter().filter(|c| c.stage == key));
            prop_assert_eq!(ids(lane.iter().copied()), expected);
        }
        prop_assert_eq!(lanes.lane_count(), STAGE_KEYS.len());
    }

    #[test]
    fn prop_filter_yields_subset(cards in cards_strategy(), filter in filter_strategy()) {
        let ctx = FilterContext::for_user("Jordan Reyes");
        let kept = filter.apply(&cards, &ctx);

        prop_assert!(kept.len() <= cards.len());
        for card in &kept {
            prop_assert!(cards.iter().any(|c| std::ptr::eq(c, *card)));
            prop_assert!(filter.matches(*card, &ctx));
        }
    }

    #[test]
    fn prop_cleared_filter_passes_everything(
        cards in cards_strategy(),
        filter in filter_strategy(),
    ) {
        let mut filter = filter;
        filter.clear();
        prop_assert_eq!(&filter, &FilterSelection::default());

        let kept = filter.apply(&cards, &FilterContext::default());
        prop_assert_eq!(ids(kept), ids(&cards));
    }

    #[test]
    fn prop_cancelled_move_is_identity(
        cards in cards_strategy(),
        lane in 0..STAGE_KEYS.len(),
        index in 0usize..8,
    ) {
        let mut board = Board::new("Loans", stages());
        for card in cards.clone() {
            board.insert(card).unwrap();
        }

        let outcome = board.apply_move(&MoveEvent::cancelled(STAGE_KEYS[lane], index));

        prop_assert!(!outcome.is_moved());
        prop_assert_eq!(board.cards(), cards.as_slice());
    }

    #[test]
    fn prop_move_rewrites_stage_and_resets_timer(
        cards in cards_strategy(),
        from in 0..STAGE_KEYS.len(),
        to in 0..STAGE_KEYS.len(),
        index in 0usize..8,
    ) {
        prop_assume!(from != to);
        let mut board = Board::new("Loans", stages());
        for card in cards {
            board.insert(card).unwrap();
        }

        let (from, to) = (STAGE_KEYS[from], STAGE_KEYS[to]);
        let target = board.lanes().card_at(from, index).map(|c| c.id.clone());
        let before = board.cards().len();

        let outcome = board.apply_move(&MoveEvent::new(from, index, to, 0));

        match target {
            None => prop_assert!(!outcome.is_moved()),
            Some(id) => {
                let is_expected = matches!(
                    &outcome,
                    MoveOutcome::Moved { card_id, stage_changed: true, .. } if *card_id == id
                );
                prop_assert!(is_expected);

                let moved = board.get(&id).unwrap();
                prop_assert_eq!(moved.stage(), to);
                prop_assert_eq!(moved.time_in_stage(), 0);

                let lanes = board.lanes();
                prop_assert!(lanes.get(from).unwrap().iter().all(|c| c.id != id));
                prop_assert_eq!(&lanes.get(to).unwrap().last().unwrap().id, &id);
            }
        }
        prop_assert_eq!(board.cards().len(), before);
    }
}

#[test]
fn scenario_single_card_moves_to_contacted() {
    let stages = StageSet::new(vec![
        Stage::new("New Lead", "teal", "🟢"),
        Stage::new("Contacted", "gray", "📞"),
    ]);
    let mut board = Board::new("Loans", stages);
    board
        .insert(Card::new(CardId::new("1"), "Alice Smith", "New Lead").with_time_in_stage(2))
        .unwrap();

    board.apply_move(&MoveEvent::new("New Lead", 0, "Contacted", 0));

    let lanes = board.lanes();
    assert!(lanes.get("New Lead").unwrap().is_empty());
    let contacted = lanes.get("Contacted").unwrap();
    assert_eq!(contacted.len(), 1);
    assert_eq!(contacted[0].id.as_str(), "1");
    assert_eq!(contacted[0].stage, "Contacted");
    assert_eq!(contacted[0].time_in_stage, 0);
}
