//! Host-owned grid state and per-frame composition.
//!
//! [`GridState`] ties the pure pieces together: the schema and its metrics,
//! the dataset with its active sort order, scroll/viewport, focus and the
//! single edit session. Every operation borrows it; nothing is shared.
//!
//! Logical row indices (what focus and rendering use) address the sorted
//! order. Edits are written back by source index so they survive a re-sort.

use serde::Serialize;
use std::sync::Arc;

use crate::config::GridConfig;
use crate::editor::{
    parse_draft, CommitOutcome, CommitPayload, CommitRequest, EditSession, SessionId,
    ValidationVerdict, Validator,
};
use crate::error::Result;
use crate::layout::{self, ColumnMetrics, Placement, VisibleWindow};
use crate::navigation::{next_position, NavAction, NavBounds};
use crate::sort::{sorted_order, SortStack};
use crate::types::{
    column_at, validate_schema, CellPosition, CellValue, Column, Dataset, Region, Row,
    ScrollOffset, ViewportSize,
};

/// One cell the host must materialize this frame
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderCell {
    pub region: Region,
    /// Logical position; `row` is 0 for header cells
    pub position: CellPosition,
    pub column_id: String,
    /// Header label for header cells, the row value for body cells
    pub content: CellValue,
    pub placement: Placement,
    pub focused: bool,
    pub editing: bool,
}

/// Render instructions for one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderFrame {
    pub window: VisibleWindow,
    pub header_height: f64,
    /// Scrollable content size of the body
    pub content_width: f64,
    pub content_height: f64,
    pub cells: Vec<RenderCell>,
}

/// Effect of a [`NavAction`] on the grid
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ActionOutcome {
    /// Focus moved (scroll may have followed)
    Focus { position: CellPosition },
    /// Enter opened a session on the focused cell
    EditOpened { session: SessionId },
    /// Escape discarded the active session
    EditCancelled { payload: CommitPayload },
    /// Nothing changed
    Ignored,
}

#[derive(Debug)]
pub struct GridState {
    config: GridConfig,
    schema: Vec<Column>,
    metrics: ColumnMetrics,
    rows: Dataset,
    sort: SortStack,
    /// `order[logical] = source index`
    order: Vec<usize>,
    scroll: ScrollOffset,
    viewport: ViewportSize,
    focus: CellPosition,
    edit: Option<EditSession>,
    next_session: u64,
}

impl GridState {
    /// Build state without checking the schema; see [`GridState::try_new`].
    pub fn new(config: GridConfig, schema: Vec<Column>, rows: Dataset) -> Self {
        let metrics = ColumnMetrics::build(&schema);
        let sort = SortStack::new();
        let order = sorted_order(&rows, &sort, &config.id_column);
        Self {
            config,
            schema,
            metrics,
            rows,
            sort,
            order,
            scroll: ScrollOffset::default(),
            viewport: ViewportSize::default(),
            focus: CellPosition::default(),
            edit: None,
            next_session: 1,
        }
    }

    /// Validate config and schema, then build state.
    pub fn try_new(config: GridConfig, schema: Vec<Column>, rows: Dataset) -> Result<Self> {
        config.validate()?;
        validate_schema(&schema)?;
        Ok(Self::new(config, schema, rows))
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    pub fn schema(&self) -> &[Column] {
        &self.schema
    }

    pub fn metrics(&self) -> &ColumnMetrics {
        &self.metrics
    }

    /// Rows in source (unsorted) order.
    pub fn rows(&self) -> &Dataset {
        &self.rows
    }

    pub fn sort_stack(&self) -> &SortStack {
        &self.sort
    }

    /// Active permutation: source index of each logical row.
    pub fn row_order(&self) -> &[usize] {
        &self.order
    }

    pub fn scroll(&self) -> ScrollOffset {
        self.scroll
    }

    pub fn viewport(&self) -> ViewportSize {
        self.viewport
    }

    pub fn focus(&self) -> CellPosition {
        self.focus
    }

    pub fn edit_session(&self) -> Option<&EditSession> {
        self.edit.as_ref()
    }

    pub fn row_count(&self) -> usize {
        self.order.len()
    }

    /// Row at a logical index.
    pub fn row(&self, logical: usize) -> Option<&Arc<Row>> {
        self.order.get(logical).and_then(|&source| self.rows.get(source))
    }

    /// Rows in display order, sharing the source rows.
    pub fn sorted_rows(&self) -> Dataset {
        self.order
            .iter()
            .filter_map(|&source| self.rows.get(source).map(Arc::clone))
            .collect()
    }

    /// Column at `col`, synthesized past the schema in unbounded mode.
    pub fn column(&self, col: usize) -> Option<Column> {
        column_at(
            &self.schema,
            col,
            self.config.unbounded_columns,
            self.config.default_column_width,
        )
    }

    pub fn cell_value(&self, position: CellPosition) -> CellValue {
        match (self.row(position.row), self.column(position.col)) {
            (Some(row), Some(column)) => row.get(&column.id).clone(),
            _ => CellValue::Null,
        }
    }

    // --- schema / data / config ---------------------------------------------

    /// Replace the schema and rebuild column metrics.
    ///
    /// An active session on a column that no longer exists is cancelled.
    pub fn set_schema(&mut self, schema: Vec<Column>) {
        self.metrics = ColumnMetrics::build(&schema);
        self.schema = schema;
        tracing::debug!(
            columns = self.metrics.column_count(),
            pinned = self.metrics.pinned_count(),
            "rebuilt column metrics"
        );

        let orphaned = self.edit.as_ref().is_some_and(|s| {
            !s.status().is_settled() && !self.schema.iter().any(|c| c.id == s.column_id())
        });
        if orphaned {
            self.cancel_edit();
        }
        self.focus = self.nav_bounds().clamp(self.focus);
        self.clamp_scroll();
    }

    /// Replace the dataset. Any unsettled session is cancelled since its row
    /// may no longer exist.
    pub fn set_rows(&mut self, rows: Dataset) {
        self.cancel_edit();
        self.rows = rows;
        self.order = sorted_order(&self.rows, &self.sort, &self.config.id_column);
        self.focus = self.nav_bounds().clamp(self.focus);
        self.clamp_scroll();
    }

    pub fn set_config(&mut self, config: GridConfig) {
        let resort = config.id_column != self.config.id_column;
        self.config = config;
        if resort {
            self.reorder();
        }
        self.focus = self.nav_bounds().clamp(self.focus);
        self.clamp_scroll();
    }

    // --- scroll / viewport --------------------------------------------------

    /// Body content size in pixels. Width is the schema width even in
    /// unbounded mode; hosts extend it as they scroll.
    #[allow(clippy::cast_precision_loss)]
    pub fn content_size(&self) -> (f64, f64) {
        (
            self.metrics.total_width(),
            self.row_count() as f64 * self.config.row_height,
        )
    }

    pub fn set_viewport(&mut self, viewport: ViewportSize) {
        self.viewport = viewport;
        self.clamp_scroll();
    }

    pub fn scroll_to(&mut self, scroll: ScrollOffset) {
        self.scroll = scroll;
        self.clamp_scroll();
    }

    fn clamp_scroll(&mut self) {
        let (width, height) = self.content_size();
        let max_top = (height - self.viewport.height).max(0.0);
        let top = self.scroll.top.max(0.0).min(max_top);

        let left = self.scroll.left.max(0.0);
        let left = if self.config.unbounded_columns {
            left
        } else {
            left.min((width - self.viewport.width).max(0.0))
        };

        // NaN in either coordinate resets to the origin
        self.scroll = ScrollOffset::new(
            if top.is_nan() { 0.0 } else { top },
            if left.is_nan() { 0.0 } else { left },
        );
    }

    /// Adjust scroll by the minimum amount that brings `position` fully into
    /// view. Pinned columns never scroll horizontally, and scrollable ones
    /// must clear the pinned block.
    #[allow(clippy::cast_precision_loss)]
    pub fn ensure_visible(&mut self, position: CellPosition) {
        if self.viewport.is_degenerate() {
            return;
        }
        let row_height = self.config.row_height;
        let row_top = position.row as f64 * row_height;
        let mut scroll = self.scroll;

        if row_top < scroll.top {
            scroll.top = row_top;
        } else if row_top + row_height > scroll.top + self.viewport.height {
            scroll.top = row_top + row_height - self.viewport.height;
        }

        if !self.metrics.is_pinned(position.col) {
            let (x, width) = layout::column_extent(&self.metrics, position.col, &self.config);
            let pinned_width = self.metrics.pinned_width();
            if x - scroll.left < pinned_width {
                scroll.left = x - pinned_width;
            } else if x + width - scroll.left > self.viewport.width {
                scroll.left = x + width - self.viewport.width;
            }
        }

        if scroll != self.scroll {
            tracing::trace!(?position, ?scroll, "scrolled to keep focus visible");
            self.scroll_to(scroll);
        }
    }

    // --- per-frame ----------------------------------------------------------

    pub fn visible_window(&self) -> VisibleWindow {
        layout::visible_window(
            &self.metrics,
            self.row_count(),
            self.scroll,
            self.viewport,
            &self.config,
        )
    }

    pub fn place(&self, position: CellPosition, region: Region) -> Placement {
        layout::place_cell(position, region, &self.metrics, self.scroll, &self.config)
    }

    /// Hit test a point relative to the body viewport.
    pub fn cell_at_point(&self, x: f64, y: f64) -> Option<CellPosition> {
        layout::cell_at_point(
            x,
            y,
            &self.metrics,
            self.scroll,
            self.row_count(),
            &self.config,
        )
    }

    /// Everything the renderer needs for the current frame: header cells for
    /// every visible column, then body cells row by row.
    pub fn render_frame(&self) -> RenderFrame {
        let window = self.visible_window();
        let columns: Vec<(usize, Column)> = window
            .pinned_columns
            .indices()
            .chain(window.columns.indices())
            .filter_map(|col| self.column(col).map(|c| (col, c)))
            .collect();
        let editing = self
            .edit
            .as_ref()
            .filter(|s| !s.status().is_settled())
            .map(EditSession::position);

        let mut cells = Vec::with_capacity(columns.len() * (window.rows.len() + 1));
        for (col, column) in &columns {
            let position = CellPosition::new(0, *col);
            cells.push(RenderCell {
                region: Region::Header,
                position,
                column_id: column.id.clone(),
                content: CellValue::Text(if column.label.is_empty() {
                    column.id.clone()
                } else {
                    column.label.clone()
                }),
                placement: self.place(position, Region::Header),
                focused: false,
                editing: false,
            });
        }
        for row_index in window.rows.indices() {
            let Some(row) = self.row(row_index) else {
                continue;
            };
            for (col, column) in &columns {
                let position = CellPosition::new(row_index, *col);
                cells.push(RenderCell {
                    region: Region::Body,
                    position,
                    column_id: column.id.clone(),
                    content: row.get(&column.id).clone(),
                    placement: self.place(position, Region::Body),
                    focused: position == self.focus,
                    editing: editing == Some(position),
                });
            }
        }

        let (content_width, content_height) = self.content_size();
        RenderFrame {
            window,
            header_height: self.config.header_height(),
            content_width,
            content_height,
            cells,
        }
    }

    // --- navigation ---------------------------------------------------------

    pub fn nav_bounds(&self) -> NavBounds {
        let page_rows = self.config.page_rows(self.viewport.height);
        if self.config.unbounded_columns {
            NavBounds::unbounded(self.row_count(), self.schema.len(), page_rows)
        } else {
            NavBounds::bounded(self.row_count(), self.schema.len(), page_rows)
        }
    }

    /// Move focus (clamped) and scroll it into view.
    pub fn set_focus(&mut self, position: CellPosition) -> CellPosition {
        self.focus = self.nav_bounds().clamp(position);
        self.ensure_visible(self.focus);
        self.focus
    }

    pub fn handle_action(&mut self, action: NavAction) -> ActionOutcome {
        match action {
            NavAction::Enter => match self.open_edit(self.focus) {
                Some(session) => ActionOutcome::EditOpened { session },
                None => ActionOutcome::Ignored,
            },
            NavAction::Escape => match self.cancel_edit() {
                Some(payload) => ActionOutcome::EditCancelled { payload },
                None => ActionOutcome::Ignored,
            },
            _ => {
                let next = next_position(self.focus, action, &self.nav_bounds());
                if next == self.focus {
                    return ActionOutcome::Ignored;
                }
                let position = self.set_focus(next);
                ActionOutcome::Focus { position }
            }
        }
    }

    // --- editing ------------------------------------------------------------

    /// Open a session on an editable cell, replacing any previous session.
    ///
    /// `None` (and the previous session left alone) when the cell is out of
    /// range or its column is not editable.
    pub fn open_edit(&mut self, position: CellPosition) -> Option<SessionId> {
        let column = self.column(position.col).filter(|c| c.editable)?;
        let source_row = *self.order.get(position.row)?;
        let value = self
            .rows
            .get(source_row)
            .map_or(CellValue::Null, |row| row.get(&column.id).clone());

        if let Some(mut previous) = self.edit.take() {
            previous.cancel();
        }

        let id = SessionId(self.next_session);
        self.next_session += 1;
        tracing::debug!(session = id.0, ?position, column = %column.id, "edit opened");
        self.edit = Some(EditSession::open(id, position, source_row, column.id, value));
        Some(id)
    }

    /// Replace the draft of the active session.
    pub fn update_edit(&mut self, value: CellValue) -> bool {
        self.edit.as_mut().is_some_and(|s| s.set_value(value))
    }

    /// Replace the draft from raw input text, typed by the column.
    pub fn update_edit_text(&mut self, text: &str) -> bool {
        let Some(session) = self.edit.as_ref() else {
            return false;
        };
        let column_type = self
            .schema
            .iter()
            .find(|c| c.id == session.column_id())
            .and_then(|c| c.column_type);
        self.update_edit(parse_draft(text, column_type))
    }

    /// First half of a commit.
    ///
    /// An unchanged draft settles here. A changed one returns
    /// [`CommitRequest::Validate`]; the host runs it and hands the verdict to
    /// [`finish_commit`](Self::finish_commit), navigating freely meanwhile.
    pub fn begin_commit(&mut self) -> Option<CommitRequest> {
        let request = self.edit.as_mut()?.request_commit()?;
        if let CommitRequest::Resolved(payload) = &request {
            self.apply_commit(payload);
        }
        Some(request)
    }

    /// Deliver a verdict. Verdicts for a superseded, cancelled or already
    /// settled session are dropped.
    pub fn finish_commit(
        &mut self,
        session: SessionId,
        verdict: ValidationVerdict,
    ) -> Option<CommitPayload> {
        let Some(active) = self.edit.as_mut().filter(|s| s.id() == session) else {
            tracing::debug!(session = session.0, "dropped verdict for stale session");
            return None;
        };
        let payload = active.resolve(verdict)?;
        self.apply_commit(&payload);
        Some(payload)
    }

    /// Commit the active session against `validator` and write back the result.
    pub async fn commit_edit<V: Validator + ?Sized>(&mut self, validator: &V) -> Option<CommitPayload> {
        match self.begin_commit()? {
            CommitRequest::Resolved(payload) => Some(payload),
            CommitRequest::Validate(pending) => {
                let (session, verdict) = pending.run(validator).await;
                self.finish_commit(session, verdict)
            }
        }
    }

    pub fn cancel_edit(&mut self) -> Option<CommitPayload> {
        self.edit.as_mut()?.cancel()
    }

    /// Persist a settled session's value.
    ///
    /// Only accepted drafts change the dataset; every other outcome keeps the
    /// original, which is already in place. The edited row is replaced by a
    /// new `Row`, and the order is recomputed when an active sort key changed.
    pub fn apply_commit(&mut self, payload: &CommitPayload) -> bool {
        if payload.outcome != CommitOutcome::Committed {
            return false;
        }
        let Some(slot) = self.rows.get_mut(payload.source_row) else {
            return false;
        };
        *slot = Arc::new(slot.with_value(&payload.column_id, payload.value.clone()));
        tracing::debug!(
            row = payload.source_row,
            column = %payload.column_id,
            "committed cell value"
        );

        let sort_key_changed = self
            .sort
            .active()
            .any(|d| d.column_id == payload.column_id);
        if sort_key_changed {
            self.reorder();
        }
        true
    }

    // --- sort ---------------------------------------------------------------

    pub fn set_sort(&mut self, stack: SortStack) {
        self.sort = stack;
        self.reorder();
    }

    /// Header click on `column_id`; `additive` for shift-click.
    pub fn toggle_sort(&mut self, column_id: &str, additive: bool) {
        self.sort.toggle(column_id, additive);
        self.reorder();
    }

    /// Recompute the order; focus and the session follow their rows.
    fn reorder(&mut self) {
        let focused_source = self.order.get(self.focus.row).copied();
        self.order = sorted_order(&self.rows, &self.sort, &self.config.id_column);

        let logical_of = |source: usize, order: &[usize]| order.iter().position(|&s| s == source);
        if let Some(row) = focused_source.and_then(|s| logical_of(s, &self.order)) {
            self.focus.row = row;
        }
        if let Some(session) = self.edit.as_mut() {
            if let Some(row) = logical_of(session.source_row(), &self.order) {
                session.relocate(CellPosition::new(row, session.position().col));
            }
        }
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]
mod tests {
    use super::*;
    use crate::editor::{EditStatus, SyncValidator, ValidationOutcome};
    use crate::navigation::Direction;
    use crate::sort::SortDescriptor;
    use crate::types::dataset_from_rows;
    use futures::executor::block_on;

    fn schema() -> Vec<Column> {
        vec![
            Column::new("id", 80.0).pinned(),
            Column::new("name", 200.0).editable(),
            Column::new("qty", 100.0).editable(),
            Column::new("note", 300.0),
        ]
    }

    fn grid(rows: usize) -> GridState {
        let data = (0..rows)
            .map(|i| {
                Row::new()
                    .with("id", format!("r{i:03}"))
                    .with("name", format!("name {i}"))
                    .with("qty", i32::try_from(rows - i).unwrap())
            })
            .collect();
        let mut grid = GridState::new(GridConfig::default(), schema(), dataset_from_rows(data));
        grid.set_viewport(ViewportSize::new(400.0, 200.0));
        grid
    }

    #[test]
    fn test_render_frame_has_header_and_body() {
        let g = grid(100);
        let frame = g.render_frame();
        let headers = frame
            .cells
            .iter()
            .filter(|c| c.region == Region::Header)
            .count();
        let visible_cols = frame.window.pinned_columns.len() + frame.window.columns.len();
        assert_eq!(headers, visible_cols);
        assert_eq!(
            frame.cells.len(),
            visible_cols * (frame.window.rows.len() + 1)
        );
        assert!(frame.cells.iter().any(|c| c.focused));
        assert_eq!(frame.content_height, 4000.0);
    }

    #[test]
    fn test_arrow_scrolls_focus_into_view() {
        let mut g = grid(100);
        for _ in 0..6 {
            g.handle_action(NavAction::Move(Direction::Down));
        }
        assert_eq!(g.focus(), CellPosition::new(6, 0));
        // row 6 spans 240..280; viewport height 200
        assert_eq!(g.scroll().top, 80.0);
    }

    #[test]
    fn test_horizontal_ensure_visible_clears_pinned_block() {
        let mut g = grid(10);
        g.set_focus(CellPosition::new(0, 3));
        // note spans 380..680 in a 400px viewport
        assert_eq!(g.scroll().left, 280.0);
        g.set_focus(CellPosition::new(0, 1));
        // name starts at 80, right after the 80px pinned block
        assert_eq!(g.scroll().left, 0.0);
    }

    #[test]
    fn test_enter_only_opens_editable_columns() {
        let mut g = grid(5);
        assert_eq!(g.handle_action(NavAction::Enter), ActionOutcome::Ignored);
        g.set_focus(CellPosition::new(1, 1));
        assert!(matches!(
            g.handle_action(NavAction::Enter),
            ActionOutcome::EditOpened { .. }
        ));
        assert_eq!(
            g.edit_session().unwrap().current_value(),
            &CellValue::from("name 1")
        );
        assert!(matches!(
            g.handle_action(NavAction::Escape),
            ActionOutcome::EditCancelled { .. }
        ));
        assert_eq!(g.edit_session().unwrap().status(), EditStatus::Cancelled);
    }

    #[test]
    fn test_commit_writes_back_new_row() {
        let mut g = grid(5);
        let before = Arc::clone(&g.rows()[2]);
        g.open_edit(CellPosition::new(2, 2)).unwrap();
        assert!(g.update_edit_text("42"));
        let payload = block_on(g.commit_edit(&SyncValidator(|_: &CellValue| {
            ValidationOutcome::valid()
        })))
        .unwrap();

        assert_eq!(payload.value, CellValue::Number(42.0));
        assert_eq!(g.cell_value(CellPosition::new(2, 2)), CellValue::Number(42.0));
        assert_eq!(before.get("qty"), &CellValue::from(3));
        assert!(!Arc::ptr_eq(&before, &g.rows()[2]));
        assert!(Arc::ptr_eq(&g.rows()[1], &g.row(1).map(Arc::clone).unwrap()));
    }

    #[test]
    fn test_rejected_commit_leaves_dataset() {
        let mut g = grid(5);
        g.open_edit(CellPosition::new(0, 1)).unwrap();
        g.update_edit(CellValue::from(""));
        let payload = block_on(g.commit_edit(&SyncValidator(|_: &CellValue| {
            ValidationOutcome::invalid("required")
        })))
        .unwrap();
        assert_eq!(payload.value, CellValue::from("name 0"));
        assert_eq!(g.cell_value(CellPosition::new(0, 1)), CellValue::from("name 0"));
    }

    #[test]
    fn test_stale_verdict_is_dropped() {
        let mut g = grid(5);
        let first = g.open_edit(CellPosition::new(0, 1)).unwrap();
        g.update_edit(CellValue::from("changed"));
        let Some(CommitRequest::Validate(pending)) = g.begin_commit() else {
            panic!("expected validation");
        };

        // Focus moves on and a new session supersedes the pending one
        g.set_focus(CellPosition::new(3, 2));
        let second = g.handle_action(NavAction::Enter);
        assert!(matches!(second, ActionOutcome::EditOpened { .. }));

        let (id, verdict) = block_on(pending.run(&SyncValidator(|_: &CellValue| {
            ValidationOutcome::valid()
        })));
        assert_eq!(id, first);
        assert!(g.finish_commit(id, verdict).is_none());
        assert_eq!(g.cell_value(CellPosition::new(0, 1)), CellValue::from("name 0"));
        assert_eq!(g.edit_session().unwrap().status(), EditStatus::Editing);
    }

    #[test]
    fn test_sort_keeps_focus_and_session_on_their_rows() {
        let mut g = grid(5);
        g.set_focus(CellPosition::new(1, 2));
        g.open_edit(CellPosition::new(1, 2)).unwrap();

        // qty runs 5,4,3,2,1 in source order; ascending reverses it
        g.set_sort(SortStack::from(vec![SortDescriptor::asc("qty")]));
        assert_eq!(g.row_order(), &[4, 3, 2, 1, 0]);
        assert_eq!(g.focus().row, 3);
        assert_eq!(g.edit_session().unwrap().position(), CellPosition::new(3, 2));

        g.update_edit(CellValue::from(10));
        let payload = block_on(g.commit_edit(&SyncValidator(|_: &CellValue| {
            ValidationOutcome::valid()
        })))
        .unwrap();
        assert_eq!(payload.source_row, 1);
        // The row now sorts last and focus followed it
        assert_eq!(g.row_order(), &[4, 3, 2, 0, 1]);
        assert_eq!(g.focus().row, 4);
    }

    #[test]
    fn test_scroll_clamps_to_content() {
        let mut g = grid(10);
        g.scroll_to(ScrollOffset::new(10_000.0, 10_000.0));
        assert_eq!(g.scroll().top, 400.0 - 200.0);
        assert_eq!(g.scroll().left, 680.0 - 400.0);
        g.scroll_to(ScrollOffset::new(-5.0, f64::NAN));
        assert_eq!(g.scroll(), ScrollOffset::default());
    }

    #[test]
    fn test_unbounded_focus_runs_past_schema() {
        let mut g = grid(3);
        g.set_config(GridConfig {
            unbounded_columns: true,
            ..GridConfig::default()
        });
        for _ in 0..10 {
            g.handle_action(NavAction::Move(Direction::Right));
        }
        assert_eq!(g.focus().col, 10);
        assert_eq!(g.column(10).unwrap().label, "K");
        // column 10 spans 1000..1100 in a 400px viewport
        assert_eq!(g.scroll().left, 700.0);
        assert_eq!(g.handle_action(NavAction::Enter), ActionOutcome::Ignored);
    }

    #[test]
    fn test_schema_change_cancels_orphaned_session() {
        let mut g = grid(3);
        g.open_edit(CellPosition::new(0, 2)).unwrap();
        g.set_schema(vec![Column::new("id", 80.0), Column::new("name", 100.0)]);
        assert_eq!(g.edit_session().unwrap().status(), EditStatus::Cancelled);
        assert_eq!(g.focus(), CellPosition::new(0, 0));
        assert_eq!(g.metrics().total_width(), 180.0);
    }

    #[test]
    fn test_try_new_rejects_bad_schema() {
        let bad = vec![Column::new("a", 10.0), Column::new("a", 10.0)];
        assert!(GridState::try_new(GridConfig::default(), bad, Dataset::new()).is_err());
    }
}
