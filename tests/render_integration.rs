//! Rendering checks against ratatui's test backend: the phase panels and the
//! fallback cell content the table actually puts on screen.

use gridtui::core::{ColumnSpec, PageInfo, Record, RowAction, TableSchema};
use gridtui::tui::components::RecordTable;
use gridtui::tui::{Action, Component};
use ratatui::{Terminal, backend::TestBackend};
use serde_json::{Value, json};

fn record(pairs: &[(&str, Value)]) -> Record {
    let mut r = Record::new();
    for (k, v) in pairs {
        r.insert((*k).to_string(), v.clone());
    }
    r
}

fn render_to_string(table: &mut RecordTable) -> String {
    table.update().unwrap();
    let backend = TestBackend::new(120, 16);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal.draw(|frame| table.render(frame, frame.area())).unwrap();

    let buffer = terminal.backend().buffer().clone();
    let mut out = String::new();
    for y in 0..buffer.area.height {
        for x in 0..buffer.area.width {
            out.push_str(buffer[(x, y)].symbol());
        }
        out.push('\n');
    }
    out
}

fn roster() -> Vec<Record> {
    vec![
        record(&[
            ("firstName", json!("Ada")),
            ("enrolledCourses", json!(["Algebra", "History"])),
            ("active", json!(true)),
            ("lastLogin", Value::Null),
        ]),
        record(&[
            ("firstName", json!("Alan")),
            ("enrolledCourses", json!(["Logic"])),
            ("active", json!(false)),
            ("lastLogin", json!("2026-08-20")),
        ]),
    ]
}

#[test]
fn empty_panel_shows_default_copy() {
    let mut table = RecordTable::new(TableSchema::new());
    table.deliver_page(vec![], None);

    let screen = render_to_string(&mut table);
    assert!(screen.contains("Table is empty"));
}

#[test]
fn empty_copy_is_overridable() {
    let mut table = RecordTable::new(TableSchema::new()).with_empty_copy("No students match");
    table.deliver_page(vec![], None);

    let screen = render_to_string(&mut table);
    assert!(screen.contains("No students match"));
    assert!(!screen.contains("Table is empty"));
}

#[test]
fn loading_panel_before_first_fetch() {
    let mut table = RecordTable::new(TableSchema::new());
    let screen = render_to_string(&mut table);
    assert!(screen.contains("Loading"));
}

#[test]
fn error_panel_shows_message_verbatim() {
    let mut table = RecordTable::new(TableSchema::new());
    table.fail("503 from the roster service");

    let screen = render_to_string(&mut table);
    assert!(screen.contains("503 from the roster service"));
}

#[test]
fn populated_table_renders_fallback_cells() {
    let mut table = RecordTable::new(TableSchema::new());
    table.deliver_page(roster(), None);

    let screen = render_to_string(&mut table);

    // Humanized headers.
    assert!(screen.contains("First Name"));
    assert!(screen.contains("Enrolled Courses"));

    // Arrays join with a comma, booleans become glyphs, nulls the
    // placeholder.
    assert!(screen.contains("Algebra, History"));
    assert!(screen.contains("✓"));
    assert!(screen.contains("✗"));
    assert!(screen.contains("None"));
    assert!(screen.contains("Ada"));
}

#[test]
fn allow_null_column_renders_blank_instead_of_placeholder() {
    let mut schema = TableSchema::new();
    schema.set_column("lastLogin", ColumnSpec { allow_null: true, ..Default::default() });
    let mut table = RecordTable::new(schema);
    table.deliver_page(
        vec![record(&[("firstName", json!("Ada")), ("lastLogin", Value::Null)])],
        None,
    );

    let screen = render_to_string(&mut table);
    assert!(!screen.contains("None"));
}

#[test]
fn hidden_column_absent_from_screen() {
    let mut schema = TableSchema::new();
    schema.set_column("email", ColumnSpec { hidden: true, ..Default::default() });
    let mut table = RecordTable::new(schema);
    table.deliver_page(
        vec![record(&[
            ("firstName", json!("Ada")),
            ("email", json!("ada@school.example")),
        ])],
        None,
    );

    let screen = render_to_string(&mut table);
    assert!(screen.contains("First Name"));
    assert!(!screen.contains("Email"));
    assert!(!screen.contains("ada@school.example"));
}

#[test]
fn pagination_bar_rendered_with_metadata() {
    let mut table = RecordTable::new(TableSchema::new());
    table.deliver_page(roster(), Some(PageInfo::new(2, 5, 42)));

    let screen = render_to_string(&mut table);
    assert!(screen.contains("Showing 10-18 of 42"));
    assert!(screen.contains("Prev"));
    assert!(screen.contains("Next"));
}

#[test]
fn pagination_bar_absent_without_rows() {
    let mut table = RecordTable::new(TableSchema::new());
    table.deliver_page(roster(), Some(PageInfo::new(1, 0, 0)));

    let screen = render_to_string(&mut table);
    assert!(!screen.contains("Showing"));
}

#[test]
fn page_navigation_shows_loading_until_delivery() {
    let mut table = RecordTable::new(TableSchema::new());
    table.deliver_page(roster(), Some(PageInfo::new(1, 5, 42)));

    table.handle_action(Action::NextPage).unwrap();
    let screen = render_to_string(&mut table);
    assert!(screen.contains("Loading"));
    assert!(!screen.contains("Ada"));

    table.deliver_page(roster(), Some(PageInfo::new(2, 5, 42)));
    let screen = render_to_string(&mut table);
    assert!(screen.contains("Ada"));
}

#[test]
fn reorder_reflected_in_header_order() {
    let mut table = RecordTable::new(TableSchema::new());
    table.deliver_page(roster(), None);
    table.update().unwrap();

    table.handle_action(Action::FocusHeader).unwrap();
    table.handle_action(Action::GrabColumn).unwrap();
    table.handle_action(Action::ColumnRight).unwrap();
    table.handle_action(Action::Confirm).unwrap();

    let screen = render_to_string(&mut table);
    let first = screen.find("First Name").unwrap();
    let courses = screen.find("Enrolled Courses").unwrap();
    assert!(courses < first, "moved column should render before the grabbed one's origin");
}

#[test]
fn custom_action_label_renders_in_open_menu() {
    let mut schema = TableSchema::new();
    schema.root.custom_actions.push(Box::new(|_record, _index| {
        Some(RowAction::new("Retry import", Box::new(|_, _| {})))
    }));
    let mut table = RecordTable::new(schema);
    table.deliver_page(roster(), None);

    let screen = render_to_string(&mut table);
    assert!(screen.contains("⋯"));

    table.handle_action(Action::OpenActions).unwrap();
    let screen = render_to_string(&mut table);
    assert!(screen.contains("Retry import"));
}

#[test]
fn selection_marks_render() {
    let mut table = RecordTable::new(TableSchema::new());
    table.deliver_page(roster(), None);

    table.handle_action(Action::ToggleSelect).unwrap();
    let screen = render_to_string(&mut table);
    assert!(screen.contains("[x]"));
    assert!(screen.contains("[ ]"));
    assert!(screen.contains("1 selected"));
}
