//! CLI tool for gridcore - runs a JSON scenario through the engine and
//! prints the resulting window, placements and focus as JSON
//!
//! Usage:
//!   grid_probe <scenario.json>              # Output JSON to stdout
//!   grid_probe <scenario.json> -o out.json  # Output JSON to file
//!
//! Scenario fields (all optional except `columns`):
//!   config, columns, rows, viewport {width, height}, scroll {top, left},
//!   sort [{columnId, direction}], focus {row, col}, keys ["ArrowDown", "Shift+Tab", ...],
//!   edit {row, col, text}
//!
//! Set `RUST_LOG=gridcore=debug` to trace edits and sorting on stderr.

#![allow(clippy::exit)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::indexing_slicing)]

use futures::executor::block_on;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::io::{self, Write};
use tracing_subscriber::EnvFilter;

use gridcore::cell_ref::format_cell_ref;
use gridcore::editor::AcceptAll;
use gridcore::{
    dataset_from_rows, ActionOutcome, CellPosition, Column, CommitPayload, GridConfig, GridState,
    Modifiers, NavAction, RenderFrame, Row, ScrollOffset, SortStack, ViewportSize,
};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Scenario {
    #[serde(default)]
    config: GridConfig,
    columns: Vec<Column>,
    #[serde(default)]
    rows: Vec<Row>,
    #[serde(default = "default_viewport")]
    viewport: ViewportSize,
    #[serde(default)]
    scroll: ScrollOffset,
    #[serde(default)]
    sort: SortStack,
    #[serde(default)]
    focus: CellPosition,
    #[serde(default)]
    keys: Vec<String>,
    edit: Option<EditStep>,
}

#[derive(Deserialize)]
struct EditStep {
    row: usize,
    col: usize,
    text: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Report {
    frame: RenderFrame,
    focus: CellPosition,
    /// Focus as a spreadsheet reference ("B3")
    focus_ref: String,
    scroll: ScrollOffset,
    row_order: Vec<usize>,
    actions: Vec<ActionOutcome>,
    commit: Option<CommitPayload>,
}

fn default_viewport() -> ViewportSize {
    ViewportSize::new(800.0, 600.0)
}

/// "Shift+Tab", "Ctrl+End", "ArrowDown"
fn parse_key(combo: &str) -> Option<NavAction> {
    let mut modifiers = Modifiers::default();
    let mut parts: Vec<&str> = combo.split('+').collect();
    let key = parts.pop()?;
    for part in parts {
        match part.to_ascii_lowercase().as_str() {
            "shift" => modifiers.shift = true,
            "ctrl" | "control" => modifiers.ctrl = true,
            "meta" | "cmd" => modifiers.meta = true,
            _ => return None,
        }
    }
    NavAction::from_key(key, modifiers)
}

fn run(scenario: Scenario) -> Result<Report, gridcore::GridError> {
    let mut grid = GridState::try_new(
        scenario.config,
        scenario.columns,
        dataset_from_rows(scenario.rows),
    )?;
    grid.set_viewport(scenario.viewport);
    grid.scroll_to(scenario.scroll);
    grid.set_sort(scenario.sort);
    grid.set_focus(scenario.focus);

    let mut actions = Vec::new();
    for key in &scenario.keys {
        match parse_key(key) {
            Some(action) => actions.push(grid.handle_action(action)),
            None => tracing::warn!(key = %key, "ignoring unknown key"),
        }
    }

    let commit = match scenario.edit {
        Some(step) => {
            if grid.open_edit(CellPosition::new(step.row, step.col)).is_none() {
                tracing::warn!(row = step.row, col = step.col, "cell is not editable");
            }
            grid.update_edit_text(&step.text);
            block_on(grid.commit_edit(&AcceptAll))
        }
        None => None,
    };

    Ok(Report {
        frame: grid.render_frame(),
        focus: grid.focus(),
        focus_ref: format_cell_ref(grid.focus()),
        scroll: grid.scroll(),
        row_order: grid.row_order().to_vec(),
        actions,
        commit,
    })
}

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(true)
        .init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: grid_probe <scenario.json> [-o output.json]");
        std::process::exit(1);
    }

    let input_path = &args[1];
    let output_path = if args.len() > 3 && args[2] == "-o" {
        Some(&args[3])
    } else {
        None
    };

    let text = match fs::read_to_string(input_path) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("Error reading {}: {}", input_path, e);
            std::process::exit(1);
        }
    };

    let scenario: Scenario = match serde_json::from_str(&text) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error parsing scenario: {}", e);
            std::process::exit(1);
        }
    };

    let report = match run(scenario) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let json = match serde_json::to_string_pretty(&report) {
        Ok(j) => j,
        Err(e) => {
            eprintln!("Error serializing JSON: {}", e);
            std::process::exit(1);
        }
    };

    match output_path {
        Some(path) => {
            if let Err(e) = fs::write(path, &json) {
                eprintln!("Error writing {}: {}", path, e);
                std::process::exit(1);
            }
            eprintln!("Written: {}", path);
        }
        None => {
            io::stdout().write_all(json.as_bytes()).unwrap();
            println!();
        }
    }
}
