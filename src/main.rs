//! Demo console: a simulated student roster served page by page through an
//! async fetch worker, rendered with the gridtui table.

use clap::Parser;
use color_eyre::Result;
use crossterm::{
    event::{Event, EventStream},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use gridtui::core::{
    CellContent, ColumnSpec, PageInfo, Record, RowAction, RowDecor, RowTone, TableSchema,
};
use gridtui::services::{FilterController, SearchController, SearchOption};
use gridtui::tui::{App, FilterMenu, KeyBindings, RecordTable, SearchBar, Theme};
use ratatui::{Terminal, backend::CrosstermBackend};
use serde_json::{Value, json};
use std::path::PathBuf;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Cli {
    /// Use the light theme
    #[arg(long)]
    light: bool,

    /// Rows per fetched page
    #[arg(long, default_value_t = 8)]
    page_size: u64,

    /// Custom log file path
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long)]
    log_level: Option<tracing::Level>,

    /// Custom keybindings file (JSON)
    #[arg(long)]
    keybindings: Option<PathBuf>,
}

/// Request from the UI to the fetch worker.
#[derive(Debug)]
enum FetchRequest {
    Page(u64),
    Search { text: String, field: Option<String> },
    ClearSearch,
    Filter { name: String, on: bool },
}

/// One fetched page.
struct FetchResponse {
    rows: Vec<Record>,
    info: Option<PageInfo>,
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    gridtui::logging::init_with(cli.log_file.clone(), cli.log_level)?;

    let keybindings = load_keybindings(cli.keybindings.as_deref())?;
    for warning in keybindings.validate() {
        tracing::warn!("{warning}");
    }
    let theme = if cli.light { Theme::light() } else { Theme::default() };

    let (req_tx, req_rx) = mpsc::unbounded_channel::<FetchRequest>();
    let (resp_tx, mut resp_rx) = mpsc::unbounded_channel::<FetchResponse>();
    let cancel = CancellationToken::new();
    tokio::spawn(fetch_worker(
        req_rx,
        resp_tx,
        cli.page_size.max(1),
        cancel.clone(),
    ));

    let mut app = build_app(&req_tx, theme.clone())
        .with_keybindings(keybindings)
        .with_theme(theme);
    app.table_mut().begin_loading();
    req_tx.send(FetchRequest::Page(1))?;

    enable_raw_mode()?;
    execute!(std::io::stdout(), EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(std::io::stdout());
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, &mut app, &req_tx, &mut resp_rx).await;

    cancel.cancel();
    disable_raw_mode()?;
    execute!(std::io::stdout(), LeaveAlternateScreen)?;
    result
}

async fn run(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    app: &mut App,
    req_tx: &mpsc::UnboundedSender<FetchRequest>,
    resp_rx: &mut mpsc::UnboundedReceiver<FetchResponse>,
) -> Result<()> {
    let mut events = EventStream::new();
    let mut tick = tokio::time::interval(Duration::from_millis(50));

    loop {
        tokio::select! {
            maybe_event = events.next() => {
                match maybe_event {
                    Some(Ok(Event::Key(key))) => app.handle_key_event(key)?,
                    Some(Ok(_)) => {}
                    Some(Err(err)) => return Err(err.into()),
                    None => return Ok(()),
                }
            }
            _ = tick.tick() => {
                app.update()?;
                if let Some(page) = app.table_mut().take_page_request() {
                    req_tx.send(FetchRequest::Page(page))?;
                }
                if let Some(target) = app.table_mut().take_nav_request() {
                    tracing::info!(target = %target, "row activated");
                }
                terminal.draw(|frame| app.render(frame))?;
                if app.should_quit() {
                    return Ok(());
                }
            }
            Some(response) = resp_rx.recv() => {
                app.table_mut().deliver_page(response.rows, response.info);
            }
        }
    }
}

fn load_keybindings(path: Option<&std::path::Path>) -> Result<KeyBindings> {
    if let Some(path) = path {
        return KeyBindings::load_from_file(path);
    }
    if let Some(dirs) = directories::ProjectDirs::from("com", "gridtui", "gridtui") {
        let default_path = dirs.config_dir().join("keybindings.json");
        if default_path.exists() {
            return KeyBindings::load_from_file(&default_path);
        }
    }
    Ok(KeyBindings::default())
}

fn build_app(req_tx: &mpsc::UnboundedSender<FetchRequest>, theme: Theme) -> App {
    let table = RecordTable::new(roster_schema())
        .with_title("Students")
        .with_empty_copy("No students match")
        .with_create_route("/students/new")
        .with_export(Box::new(|| tracing::info!("export requested")))
        .with_theme(theme.clone());

    let search_tx = req_tx.clone();
    let reset_tx = req_tx.clone();
    let search = SearchController::new(Box::new(move |text, field| {
        let _ = search_tx.send(FetchRequest::Search {
            text: text.to_string(),
            field: field.map(String::from),
        });
    }))
    .with_reset(Box::new(move || {
        let _ = reset_tx.send(FetchRequest::ClearSearch);
    }))
    .with_options(vec![
        SearchOption::field("firstName"),
        SearchOption::field("lastName"),
        SearchOption::field("email"),
    ]);

    let mut filters = FilterController::new();
    for name in ["Active only", "Failing"] {
        let tx = req_tx.clone();
        let filter = name.to_string();
        filters.add_toggle(
            name,
            Box::new(move |on| {
                let _ = tx.send(FetchRequest::Filter { name: filter.clone(), on });
            }),
        );
    }

    App::new(
        table,
        SearchBar::new(search).with_theme(theme.clone()),
        FilterMenu::new(filters).with_theme(theme),
    )
}

/// Column directives for the roster table.
fn roster_schema() -> TableSchema {
    let mut schema = TableSchema::new();
    schema.set_column("id", ColumnSpec { hidden: true, ..Default::default() });
    schema.set_column(
        "quizAverage",
        ColumnSpec {
            name: Some("Quiz Avg".to_string()),
            render: Some(Box::new(|value, _record, _index| {
                match value.and_then(Value::as_f64) {
                    Some(avg) => CellContent::Text(format!("{avg:.0}%")),
                    None => CellContent::Placeholder,
                }
            })),
            ..Default::default()
        },
    );
    schema.set_column("notes", ColumnSpec { allow_null: true, ..Default::default() });

    schema.root.render = Some(Box::new(|record, _index| {
        let failing = record
            .get("quizAverage")
            .and_then(Value::as_f64)
            .is_some_and(|avg| avg < 60.0);
        let id = record.get("id").and_then(Value::as_str).unwrap_or_default();
        RowDecor {
            tone: if failing { RowTone::Danger } else { RowTone::Normal },
            nav_target: Some(format!("/students/{id}")),
        }
    }));
    schema.root.actions = Some(Box::new(|record, _index| {
        let active = record.get("active").and_then(Value::as_bool).unwrap_or(false);
        let mut actions = vec![RowAction::new(
            "View profile",
            Box::new(|record, _| {
                tracing::info!(record = %json!(record), "view profile");
            }),
        )];
        if active {
            actions.push(RowAction::new(
                "Unenroll",
                Box::new(|record, _| {
                    tracing::info!(record = %json!(record), "unenroll");
                }),
            ));
        } else {
            actions.push(RowAction::suppressed("Unenroll"));
        }
        actions
    }));
    schema
}

/// Serves pages of the simulated roster, holding the current search and
/// filter state between requests.
async fn fetch_worker(
    mut requests: mpsc::UnboundedReceiver<FetchRequest>,
    responses: mpsc::UnboundedSender<FetchResponse>,
    page_size: u64,
    cancel: CancellationToken,
) {
    let roster = sample_roster();
    let mut search: Option<(String, Option<String>)> = None;
    let mut filters: Vec<String> = Vec::new();

    loop {
        let request = tokio::select! {
            _ = cancel.cancelled() => return,
            request = requests.recv() => match request {
                Some(request) => request,
                None => return,
            },
        };

        // Scope changes restart at page one.
        let mut page = match request {
            FetchRequest::Page(target) => target,
            FetchRequest::Search { text, field } => {
                search = Some((text, field));
                1
            }
            FetchRequest::ClearSearch => {
                search = None;
                1
            }
            FetchRequest::Filter { name, on } => {
                filters.retain(|f| f != &name);
                if on {
                    filters.push(name);
                }
                1
            }
        };

        // Simulated backend latency so the loading panel is visible.
        tokio::time::sleep(Duration::from_millis(250)).await;

        let matched: Vec<&Record> = roster
            .iter()
            .filter(|record| matches_filters(record, &filters))
            .filter(|record| matches_search(record, search.as_ref()))
            .collect();

        let total_count = matched.len() as u64;
        let total_pages = total_count.div_ceil(page_size);
        page = page.clamp(1, total_pages.max(1));

        let start = ((page - 1) * page_size) as usize;
        let rows: Vec<Record> = matched
            .into_iter()
            .skip(start)
            .take(page_size as usize)
            .cloned()
            .collect();

        let info = Some(PageInfo::new(page, total_pages, total_count));
        if responses.send(FetchResponse { rows, info }).is_err() {
            return;
        }
    }
}

fn matches_filters(record: &Record, filters: &[String]) -> bool {
    for filter in filters {
        let keep = match filter.as_str() {
            "Active only" => record.get("active").and_then(Value::as_bool).unwrap_or(false),
            "Failing" => record
                .get("quizAverage")
                .and_then(Value::as_f64)
                .is_some_and(|avg| avg < 60.0),
            _ => true,
        };
        if !keep {
            return false;
        }
    }
    true
}

fn matches_search(record: &Record, search: Option<&(String, Option<String>)>) -> bool {
    let Some((text, field)) = search else {
        return true;
    };
    let needle = text.to_lowercase();
    let haystack = |value: &Value| {
        value
            .as_str()
            .map(|s| s.to_lowercase().contains(&needle))
            .unwrap_or(false)
    };
    match field {
        Some(field) => record.get(field).map(haystack).unwrap_or(false),
        None => record.values().any(|v| haystack(v)),
    }
}

/// Fifty-odd fake students with the value shapes the fallback renderer
/// handles: strings, numbers, booleans, arrays, and nulls.
fn sample_roster() -> Vec<Record> {
    let first_names = [
        "Ada", "Grace", "Alan", "Edsger", "Barbara", "Donald", "Radia", "Vint", "Katherine",
        "Linus", "Margaret", "Dennis", "Frances", "Ken", "Adele",
    ];
    let last_names = ["Lovelace", "Hopper", "Turing", "Dijkstra", "Liskov", "Knuth"];
    let courses = ["Algebra", "Biology", "Chemistry", "History", "Literature"];

    (0..57)
        .map(|i| {
            let first = first_names[i % first_names.len()];
            let last = last_names[i % last_names.len()];
            let mut record = Record::new();
            record.insert("id".to_string(), json!(Uuid::new_v4().to_string()));
            record.insert("firstName".to_string(), json!(first));
            record.insert("lastName".to_string(), json!(last));
            record.insert(
                "email".to_string(),
                json!(format!("{}.{}@school.example", first.to_lowercase(), last.to_lowercase())),
            );
            record.insert(
                "enrolledCourses".to_string(),
                json!([courses[i % courses.len()], courses[(i + 2) % courses.len()]]),
            );
            record.insert("quizAverage".to_string(), json!(40 + (i * 7) % 60));
            record.insert("active".to_string(), json!(i % 4 != 0));
            record.insert(
                "lastLogin".to_string(),
                if i % 5 == 0 { Value::Null } else { json!(format!("2026-08-{:02}", 1 + i % 28)) },
            );
            record.insert("notes".to_string(), Value::Null);
            record
        })
        .collect()
}
