//! Algebraic properties of the filter engine, option builder and paging.

use std::collections::HashSet;

use chrono::NaiveDate;
use ledgerview_lib::column::{ColumnSpec, Columns};
use ledgerview_lib::config::TableConfig;
use ledgerview_lib::controller::{Direction, TableController};
use ledgerview_lib::filter::{FilterState, FilterValue, filter_data};
use ledgerview_lib::model::{Record, Value};
use ledgerview_lib::options::build_options;
use proptest::prelude::*;

const USERS: &[&str] = &["a", "b", "C", "dd"];
const DESKS: &[&str] = &["spot", "otc", "futures"];

fn record_strategy() -> impl Strategy<Value = Record> {
    (
        prop::sample::select(USERS),
        0i32..100,
        0u32..60,
        prop::collection::vec(prop::sample::select(DESKS), 0..3),
        any::<bool>(),
    )
        .prop_map(|(user, amt, day, desks, with_date)| {
            let mut record = Record::new().set("user", user).set("amt", amt).set("desks", desks);
            if with_date {
                let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap() + chrono::Days::new(day as u64);
                record.insert("date", date.format("%Y-%m-%d").to_string());
            } else {
                record.insert("date", "n/a");
            }
            record
        })
}

fn dataset_strategy() -> impl Strategy<Value = Vec<Record>> {
    prop::collection::vec(record_strategy(), 0..40)
}

fn user_filter() -> impl Strategy<Value = FilterState> {
    prop::option::of(prop::sample::select(USERS))
        .prop_map(|user| match user {
            Some(user) => FilterState::new().with("user", FilterValue::scalar(user.to_uppercase())),
            None => FilterState::new(),
        })
}

fn date_filter() -> impl Strategy<Value = FilterState> {
    (0u64..60, 0u64..30).prop_map(|(start, len)| {
        let base = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        FilterState::new().with(
            "date",
            FilterValue::range(
                Some(base + chrono::Days::new(start)),
                Some(base + chrono::Days::new(start + len)),
            ),
        )
    })
}

fn desk_filter() -> impl Strategy<Value = FilterState> {
    prop::collection::vec(prop::sample::select(DESKS), 0..3)
        .prop_map(|desks| FilterState::new().with("desks", FilterValue::multi(desks)))
}

fn mixed_value() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::from),
        (-50i64..50).prop_map(Value::from),
        (-50i64..50).prop_map(|n| Value::from(n.to_string())),
        (-500i32..500).prop_map(|n| Value::from(n as f64 / 10.0)),
        (1u32..28).prop_map(|d| Value::from(format!("2024-02-{:02}", d))),
        prop::sample::select(USERS).prop_map(Value::from),
        Just(Value::from("  ")),
    ]
}

fn same_rows(a: &[&Record], b: &[&Record]) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(x, y)| std::ptr::eq(*x, *y))
}

fn owned(rows: &[&Record]) -> Vec<Record> {
    rows.iter().map(|r| (*r).clone()).collect()
}

proptest! {
    #[test]
    fn prop_empty_filter_is_identity(data in dataset_strategy()) {
        let visible = filter_data(&FilterState::new(), &data);
        let all: Vec<&Record> = data.iter().collect();
        prop_assert!(same_rows(&visible, &all));
    }

    #[test]
    fn prop_filter_is_idempotent(
        data in dataset_strategy(),
        users in user_filter(),
        dates in date_filter(),
    ) {
        let mut state = users;
        state.merge(&dates);

        let once = owned(&filter_data(&state, &data));
        let twice = owned(&filter_data(&state, &once));
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn prop_keys_compose_with_and(
        data in dataset_strategy(),
        users in user_filter(),
        desks in desk_filter(),
    ) {
        let mut both = users.clone();
        both.merge(&desks);

        let combined = owned(&filter_data(&both, &data));
        let inner = owned(&filter_data(&desks, &data));
        let chained = owned(&filter_data(&users, &inner));
        prop_assert_eq!(combined, chained);
    }

    #[test]
    fn prop_multi_select_is_or_within_key(data in dataset_strategy()) {
        let state = FilterState::new().with("user", FilterValue::multi(["a", "b"]));
        let visible = filter_data(&state, &data);
        let expected = data
            .iter()
            .filter(|r| matches!(r.get_string("user"), Ok(Some("a")) | Ok(Some("b"))))
            .count();
        prop_assert_eq!(visible.len(), expected);
    }

    #[test]
    fn prop_options_are_distinct(data in dataset_strategy()) {
        for key in ["user", "desks", "date"] {
            let options = build_options(key, &data);
            let distinct: HashSet<_> = options.iter().map(|o| o.value.clone()).collect();
            prop_assert_eq!(distinct.len(), options.len());
        }
    }

    #[test]
    fn prop_page_index_stays_in_range(
        data in dataset_strategy(),
        page_length in 1usize..8,
        page in 0usize..20,
        users in user_filter(),
    ) {
        let columns = Columns::new(vec![ColumnSpec::path("user", "user")]).unwrap();
        let config = TableConfig::new().with_page_length(page_length);
        let mut table = TableController::new(columns, config).unwrap();
        table.on_dataset_replaced(data.clone());
        table.set_page(page);

        let filtered_len = filter_data(&users, &data).len();
        for (key, value) in &users {
            table.on_filter_change(key.clone(), value.clone());
        }
        table.set_page(page);

        let count = table.page_count();
        prop_assert_eq!(count, filtered_len.div_ceil(page_length));
        if count == 0 {
            prop_assert_eq!(table.page_index(), 0);
        } else {
            prop_assert!(table.page_index() < count);
        }
        prop_assert!(table.page().len() <= page_length);
    }

    #[test]
    fn prop_sort_handles_mixed_kinds_stably(
        values in prop::collection::vec(mixed_value(), 0..200),
        descending in any::<bool>(),
    ) {
        let columns = Columns::new(vec![ColumnSpec::path("amt", "amt").sortable()]).unwrap();
        let mut table = TableController::new(columns, TableConfig::default()).unwrap();
        let data: Vec<Record> = values
            .into_iter()
            .enumerate()
            .map(|(i, v)| Record::new().set("seq", i as i64).set("amt", v))
            .collect();
        table.on_dataset_replaced(data);

        let direction = if descending { Direction::Desc } else { Direction::Asc };
        prop_assert!(table.on_sort("amt", direction));
        prop_assert_eq!(table.visible_len(), table.full_len());

        let visible = table.visible();
        for pair in visible.windows(2) {
            let a = pair[0].get("amt").cloned().unwrap_or_default().sort_key();
            let b = pair[1].get("amt").cloned().unwrap_or_default().sort_key();
            if a == b {
                let (sa, sb) = (pair[0].get_long("seq").unwrap(), pair[1].get_long("seq").unwrap());
                prop_assert!(sa < sb);
            } else if a.is_empty() || b.is_empty() {
                prop_assert!(b.is_empty());
            } else if descending {
                prop_assert!(a > b);
            } else {
                prop_assert!(a < b);
            }
        }
    }
}
