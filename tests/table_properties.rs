//! End-to-end properties of the headless table state, exercised without a
//! terminal.

use gridtui::core::{
    ColumnLayout, LoadState, MIN_WIDTH, MonoMeasure, PAGE_PARAM, PageDir, PageInfo, Paginator,
    Record, RecordSet, SelectionManager, TablePhase, TableSchema, move_column, table_phase,
};
use gridtui::services::{SEARCH_DEBOUNCE, SearchController};
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;
use std::time::Instant;

fn record(pairs: &[(&str, Value)]) -> Record {
    let mut r = Record::new();
    for (k, v) in pairs {
        r.insert((*k).to_string(), v.clone());
    }
    r
}

fn roster() -> Vec<Record> {
    vec![
        record(&[("name", json!("Ada")), ("score", json!(97)), ("active", json!(true))]),
        record(&[("name", json!("Grace")), ("score", json!(91)), ("active", json!(true))]),
        record(&[("name", json!("Alan")), ("score", json!(55)), ("active", json!(false))]),
    ]
}

#[test]
fn reorder_is_order_preserving_for_unmoved_columns() {
    let order: Vec<String> = ["a", "b", "c", "d", "e"].iter().map(|s| s.to_string()).collect();

    let moved = move_column(&order, 0, 3);
    assert_eq!(moved, ["b", "c", "d", "a", "e"]);

    // Relative order of everything except the moved element is intact.
    let rest: Vec<&String> = moved.iter().filter(|k| *k != "a").collect();
    let original_rest: Vec<&String> = order.iter().filter(|k| *k != "a").collect();
    assert_eq!(rest, original_rest);

    // Moving it back restores the original order exactly.
    assert_eq!(move_column(&moved, 3, 0), order);
}

#[test]
fn reorder_commits_to_schema_and_restructures_records() {
    let mut schema = TableSchema::new();
    let mut records = RecordSet::from_records(roster());
    schema.set_columns_order(vec![
        "name".to_string(),
        "score".to_string(),
        "active".to_string(),
    ]);

    let visible = schema.visible_columns(&records.first_keys());
    let (order, had_full) = schema.reorder_columns(&visible, 2, 0).unwrap();
    assert!(had_full);
    assert_eq!(order, ["active", "name", "score"]);

    records.restructure(&order);
    for row in records.records() {
        let keys: Vec<&String> = row.keys().collect();
        assert_eq!(keys, ["active", "name", "score"]);
    }
}

#[test]
fn resize_always_lands_at_floor_or_above() {
    let schema = TableSchema::new();
    let records = RecordSet::from_records(roster());
    let mut layout = ColumnLayout::new();
    layout.rebuild(&schema, &records, false, &MonoMeasure::default());

    for (start, delta) in [(100u16, 50i32), (100, -50), (80, -200), (MIN_WIDTH, 0)] {
        let result = layout.resize("name", start, delta).unwrap();
        let expected = ((start as i32 + delta).max(MIN_WIDTH as i32)) as u16;
        assert_eq!(result, expected);
        assert!(result >= MIN_WIDTH);
    }
}

#[test]
fn hide_is_soft_and_reversible() {
    let mut schema = TableSchema::new();
    let records = RecordSet::from_records(roster());
    let first = records.first_keys();

    schema.hide_column("score");
    assert_eq!(schema.visible_columns(&first), vec!["name", "active"]);

    // The data itself is untouched; only visibility changed.
    assert!(records.records()[0].contains_key("score"));

    schema.show_column("score");
    assert_eq!(schema.visible_columns(&first), vec!["name", "score", "active"]);
}

#[test]
fn selection_snapshots_survive_record_mutation() {
    let rows = roster();
    let mut selection = SelectionManager::new();
    selection.add_selection(&rows[0], 0);

    // Mutating the displayed row does not mutate the snapshot.
    let mut mutated = rows[0].clone();
    mutated.insert("score".to_string(), json!(0));
    assert!(!selection.is_selected(&mutated));
    assert_eq!(selection.selected()[0].get("score"), Some(&json!(97)));
}

#[test]
fn select_all_honors_predicate_and_partial_deselect_drops_flag() {
    let rows = roster();
    let mut selection = SelectionManager::with_predicate(Box::new(|record, _| {
        record.get("active").and_then(Value::as_bool).unwrap_or(false)
    }));

    selection.select_all(&rows);
    assert!(selection.all_selected());
    assert_eq!(selection.selected_count(), 2);

    selection.remove_selection(0);
    assert!(!selection.all_selected());
    assert_eq!(selection.selected_count(), 1);
}

#[test]
fn pagination_boundaries_and_query_writing() {
    let mut paginator = Paginator::new(Some(PageInfo::new(1, 3, 25)));
    let mut query = BTreeMap::new();

    // Prev is a no-op on page one.
    assert_eq!(paginator.navigate(PageDir::Prev, &mut query), None);
    assert!(!paginator.loading());

    assert_eq!(paginator.navigate(PageDir::Next, &mut query), Some(2));
    assert_eq!(query.get(PAGE_PARAM).map(String::as_str), Some("2"));
    assert!(paginator.loading());

    paginator.set_info(Some(PageInfo::new(3, 3, 25)));
    paginator.data_ready();
    assert_eq!(paginator.navigate(PageDir::Next, &mut query), None);
    assert_eq!(query.get(PAGE_PARAM).map(String::as_str), Some("2"));
}

#[test]
fn search_burst_collapses_and_carries_final_text() {
    let calls = Rc::new(RefCell::new(Vec::new()));
    let log = calls.clone();
    let mut controller = SearchController::new(Box::new(move |text, _| {
        log.borrow_mut().push(text.to_string());
    }));
    let start = Instant::now();

    for (i, text) in ["a", "ad", "ada"].iter().enumerate() {
        controller.input_at(*text, start + SEARCH_DEBOUNCE / 10 * (i as u32));
    }

    // The window restarts with every keystroke.
    assert!(!controller.poll_at(start + SEARCH_DEBOUNCE));
    assert!(controller.poll_at(start + SEARCH_DEBOUNCE * 2));
    assert_eq!(*calls.borrow(), vec!["ada"]);
}

#[test]
fn phase_machine_orders_loading_error_empty_populated() {
    let mut records = RecordSet::new();

    // Idle counts as loading; no flash of the empty panel before a fetch.
    assert_eq!(table_phase(&records, false, None), TablePhase::Loading);

    records.set_loading();
    assert_eq!(table_phase(&records, false, None), TablePhase::Loading);

    // Error outranks empty.
    records.set_error("fetch failed");
    assert_eq!(*records.state(), LoadState::Error("fetch failed".to_string()));
    assert_eq!(table_phase(&records, false, None), TablePhase::Error);

    records.set_records(vec![]);
    assert_eq!(table_phase(&records, false, None), TablePhase::Empty);

    records.set_records(roster());
    assert_eq!(table_phase(&records, false, None), TablePhase::Populated);

    // A pagination fetch in flight outranks populated data.
    assert_eq!(table_phase(&records, true, None), TablePhase::Loading);

    // A caller error outranks the ready state.
    assert_eq!(table_phase(&records, false, Some("boom")), TablePhase::Error);
}

#[test]
fn layout_rebuild_follows_data_generation() {
    let mut records = RecordSet::from_records(roster());
    let schema = TableSchema::new();
    let mut layout = ColumnLayout::new();
    let measure = MonoMeasure::default();

    assert!(layout.sync(&schema, &records, true, &measure));
    let before = layout.width("name").unwrap();

    // Same generation, no rebuild.
    assert!(!layout.sync(&schema, &records, true, &measure));

    // New data with a longer value rebuilds and widens.
    records.set_records(vec![record(&[("name", json!("Bartholomew Cubbins"))])]);
    assert!(layout.sync(&schema, &records, true, &measure));
    assert!(layout.width("name").unwrap() > before);
}
