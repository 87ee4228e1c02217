use proptest::prelude::*;
use typeahead::filter::contains_ignore_case;
use typeahead::query_list::{Direction, QueryList};
use typeahead::suggest::{SuggestConfig, SuggestEvent, SuggestState};

fn words() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[a-c]{1,4}", 0..12)
}

fn list(items: Vec<String>) -> QueryList<String> {
    QueryList::new(items, contains_ignore_case(String::clone))
}

proptest! {
    #[test]
    fn test_recompute_active_is_member_or_none(
        items in words(),
        query in "[a-c]{0,2}",
        active in prop::option::of(0usize..16),
    ) {
        let mut list = list(items);
        let next = list.recompute(&query, active);

        match next {
            Some(a) => prop_assert!(list.filtered().contains(&a)),
            None => prop_assert!(list.filtered().is_empty()),
        }
        // An active item that survives the filter is kept.
        if let Some(a) = active {
            if list.filtered().contains(&a) {
                prop_assert_eq!(next, Some(a));
            }
        }
        // Source order is preserved.
        prop_assert!(list.filtered().windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_recompute_is_idempotent(
        items in words(),
        query in "[a-c]{0,2}",
        active in prop::option::of(0usize..16),
    ) {
        let mut list = list(items);
        let once = list.recompute(&query, active);
        let filtered = list.filtered().to_vec();
        let twice = list.recompute(&query, once);
        prop_assert_eq!(once, twice);
        prop_assert_eq!(list.filtered(), filtered.as_slice());
    }

    #[test]
    fn test_navigation_cycles_back(
        items in words(),
        query in "[a-c]{0,1}",
    ) {
        let mut list = list(items);
        let start = list.recompute(&query, None);
        let len = list.filtered().len();

        let mut down = start;
        for _ in 0..len {
            down = list.next_active(down, Direction::Down);
        }
        prop_assert_eq!(down, start);

        let mut up = start;
        for _ in 0..len {
            up = list.next_active(up, Direction::Up);
        }
        prop_assert_eq!(up, start);

        let there = list.next_active(start, Direction::Down);
        prop_assert_eq!(list.next_active(there, Direction::Up), start);
    }

    #[test]
    fn test_display_matches_typing_flag(
        items in words(),
        query in "[a-c]{0,3}",
        pick in 0usize..12,
        reset_on_select in any::<bool>(),
    ) {
        let list = list(items);
        let config = SuggestConfig { reset_on_select, ..SuggestConfig::default() };
        let render = |s: &String| s.to_uppercase();

        let (typed, _) = SuggestState::default()
            .apply(SuggestEvent::QueryChanged(query.clone()), &config, &list);
        prop_assert_eq!(typed.display_value(&render), query);

        let (selected, _) = typed.apply(
            SuggestEvent::ItemSelected {
                index: pick,
                source: typeahead::suggest::SelectSource::Programmatic,
            },
            &config,
            &list,
        );
        match list.items().get(pick) {
            Some(item) => {
                prop_assert!(!selected.is_typing);
                prop_assert_eq!(selected.display_value(&render), item.to_uppercase());
                if reset_on_select {
                    prop_assert_eq!(selected.query.as_str(), "");
                    prop_assert_eq!(selected.active_item, if list.items().is_empty() { None } else { Some(0) });
                }
            }
            None => prop_assert_eq!(selected, typed),
        }
    }
}
