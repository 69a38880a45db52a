//! Section/row list model bridged onto a virtualized list host.
//!
//! A [`ListAdapter`] owns a two-level model (sections of rows) and its own
//! mount pipeline, independent of any screen [`Context`](crate::Context).
//! The host asks it for counts, cells, and heights the way virtualized list
//! toolkits do; the adapter answers by mounting each row's widget subtree at
//! most once and caching the mounted cell in a reuse pool keyed by the row's
//! stable identifier.

use std::collections::HashMap;

use crate::{
    core::{Mounter, Tree, ViewId},
    error::{Error, Result},
    layout::Constraint,
    widget::Widget,
};

/// Position of a row in the section/row model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IndexPath {
    /// Section index.
    pub section: usize,
    /// Row index within the section.
    pub row: usize,
}

impl IndexPath {
    /// The path for `row` within `section`.
    pub fn new(section: usize, row: usize) -> Self {
        Self { section, row }
    }
}

/// Row lifecycle callback.
type RowHook = Box<dyn FnMut(IndexPath) + Send>;
/// Highlight predicate.
type HighlightHook = Box<dyn Fn(IndexPath) -> bool + Send>;
/// Per-dequeue cell configuration callback.
type CellHook = Box<dyn FnMut(&mut Tree, ViewId) + Send>;

/// One row of a list: a stable identifier, a widget subtree, and hooks.
///
/// The identifier drives cell reuse: rows sharing an identifier share one
/// mounted cell, so it must be stable across model updates and unique per
/// cell shape.
pub struct ListRow {
    /// Stable reuse identifier.
    identifier: String,
    /// Taken on first mount; the reuse pool serves later requests.
    widget: Option<Widget>,
    /// Fixed height, if declared.
    height: Option<f64>,
    /// Estimated height, if declared.
    estimated_height: Option<f64>,
    /// Selection hook.
    on_tap: Option<RowHook>,
    /// Pre-display hook.
    will_display: Option<RowHook>,
    /// Highlight predicate; absent means not highlightable.
    should_highlight: Option<HighlightHook>,
    /// Runs against the mounted cell on every dequeue.
    configure_cell: Option<CellHook>,
}

impl ListRow {
    /// A row with a stable identifier and a widget subtree.
    pub fn new(identifier: impl Into<String>, widget: Widget) -> Self {
        Self {
            identifier: identifier.into(),
            widget: Some(widget),
            height: None,
            estimated_height: None,
            on_tap: None,
            will_display: None,
            should_highlight: None,
            configure_cell: None,
        }
    }

    /// Fixed row height reported to the host.
    pub fn height(mut self, height: f64) -> Self {
        self.height = Some(height);
        self
    }

    /// Estimated height for the host's scroll geometry.
    pub fn estimated_height(mut self, height: f64) -> Self {
        self.estimated_height = Some(height);
        self
    }

    /// Called when the host reports the row selected.
    pub fn on_tap(mut self, hook: impl FnMut(IndexPath) + Send + 'static) -> Self {
        self.on_tap = Some(Box::new(hook));
        self
    }

    /// Called just before the host displays the row.
    pub fn will_display(mut self, hook: impl FnMut(IndexPath) + Send + 'static) -> Self {
        self.will_display = Some(Box::new(hook));
        self
    }

    /// Whether the row highlights on touch. Absent means no.
    pub fn should_highlight(mut self, hook: impl Fn(IndexPath) -> bool + Send + 'static) -> Self {
        self.should_highlight = Some(Box::new(hook));
        self
    }

    /// Runs on every [`ListAdapter::cell_for`] call with the mounted cell.
    ///
    /// Runs on reuse too, so it must be idempotent.
    pub fn configure_cell(
        mut self,
        hook: impl FnMut(&mut Tree, ViewId) + Send + 'static,
    ) -> Self {
        self.configure_cell = Some(Box::new(hook));
        self
    }
}

/// An ordered group of rows with optional header and footer chrome.
pub struct ListSection {
    /// Rows in presentation order.
    rows: Vec<ListRow>,
    /// Header widget, taken on first mount.
    header: Option<Widget>,
    /// Footer widget, taken on first mount.
    footer: Option<Widget>,
    /// Plain-text header, for hosts that render titles themselves.
    header_title: Option<String>,
    /// Plain-text footer.
    footer_title: Option<String>,
    /// Fixed header height; zero when no header is declared.
    header_height: f64,
    /// Fixed footer height; zero when no footer is declared.
    footer_height: f64,
}

impl ListSection {
    /// A section holding `rows` with no header or footer.
    pub fn new(rows: Vec<ListRow>) -> Self {
        Self {
            rows,
            header: None,
            footer: None,
            header_title: None,
            footer_title: None,
            header_height: 0.0,
            footer_height: 0.0,
        }
    }

    /// Attach a header widget with a fixed height.
    pub fn header(mut self, widget: Widget, height: f64) -> Self {
        self.header = Some(widget);
        self.header_height = height;
        self
    }

    /// Attach a footer widget with a fixed height.
    pub fn footer(mut self, widget: Widget, height: f64) -> Self {
        self.footer = Some(widget);
        self.footer_height = height;
        self
    }

    /// Attach a plain-text header title.
    pub fn header_title(mut self, title: impl Into<String>) -> Self {
        self.header_title = Some(title.into());
        self
    }

    /// Attach a plain-text footer title.
    pub fn footer_title(mut self, title: impl Into<String>) -> Self {
        self.footer_title = Some(title.into());
        self
    }
}

/// Maps the section/row model onto a virtualized list host.
pub struct ListAdapter {
    /// The adapter's own mount pipeline, independent of any screen context.
    tree: Tree,
    /// The section/row model.
    sections: Vec<ListSection>,
    /// Reuse pool: row identifier to mounted cell container.
    pool: HashMap<String, ViewId>,
    /// Widget keys registered by row and chrome mounts.
    keys: HashMap<String, ViewId>,
    /// Mounted header views by section.
    headers: HashMap<usize, ViewId>,
    /// Mounted footer views by section.
    footers: HashMap<usize, ViewId>,
}

impl ListAdapter {
    /// An adapter over an ordered section model.
    pub fn new(sections: Vec<ListSection>) -> Self {
        Self {
            tree: Tree::new(),
            sections,
            pool: HashMap::new(),
            keys: HashMap::new(),
            headers: HashMap::new(),
            footers: HashMap::new(),
        }
    }

    /// A single-section adapter.
    pub fn from_rows(rows: Vec<ListRow>) -> Self {
        Self::new(vec![ListSection::new(rows)])
    }

    /// Number of sections in the model.
    pub fn section_count(&self) -> usize {
        self.sections.len()
    }

    /// Rows in a section; zero for an out-of-range section.
    pub fn row_count(&self, section: usize) -> usize {
        self.sections.get(section).map_or(0, |s| s.rows.len())
    }

    /// The mounted cell for a row, mounting on first request.
    ///
    /// The cell is a detached container with the row's widget mounted
    /// full-bleed inside it; the host attaches it wherever its recycler
    /// wants. The row's `configure_cell` hook runs on every call, reuse
    /// included.
    pub fn cell_for(&mut self, path: IndexPath) -> Result<ViewId> {
        let row = self
            .sections
            .get(path.section)
            .and_then(|s| s.rows.get(path.row))
            .ok_or(Error::NoSuchRow {
                section: path.section,
                row: path.row,
            })?;
        let identifier = row.identifier.clone();

        let cell = match self.pool.get(&identifier) {
            Some(&cell) => {
                if self.sections[path.section].rows[path.row].widget.is_some() {
                    // Another row already mounted under this identifier;
                    // this row's own widget will never mount. Undefined if
                    // the two shapes differ.
                    tracing::warn!(
                        identifier = %identifier,
                        "row identifier shared across rows; reusing existing cell"
                    );
                }
                cell
            }
            None => {
                let widget = self.sections[path.section].rows[path.row]
                    .widget
                    .take()
                    .ok_or_else(|| {
                        Error::Internal(format!("row widget for {identifier:?} already consumed"))
                    })?;
                let cell = self.tree.create_plain();
                let mounted = Mounter {
                    tree: &mut self.tree,
                    keys: &mut self.keys,
                    chrome: None,
                }
                .mount(widget)?;
                self.tree.attach(cell, mounted.root)?;
                self.tree
                    .add_constraints(mounted.root, Constraint::fill(mounted.root, cell));
                self.pool.insert(identifier, cell);
                cell
            }
        };

        if let Some(configure) = self.sections[path.section].rows[path.row]
            .configure_cell
            .as_mut()
        {
            configure(&mut self.tree, cell);
        }
        Ok(cell)
    }

    /// The section's header view, mounted lazily on first request.
    pub fn header_view(&mut self, section: usize) -> Result<Option<ViewId>> {
        if let Some(&id) = self.headers.get(&section) {
            return Ok(Some(id));
        }
        let Some(widget) = self
            .sections
            .get_mut(section)
            .and_then(|s| s.header.take())
        else {
            return Ok(None);
        };
        let id = self.mount_chrome(widget)?;
        self.headers.insert(section, id);
        Ok(Some(id))
    }

    /// The section's footer view, mounted lazily on first request.
    pub fn footer_view(&mut self, section: usize) -> Result<Option<ViewId>> {
        if let Some(&id) = self.footers.get(&section) {
            return Ok(Some(id));
        }
        let Some(widget) = self
            .sections
            .get_mut(section)
            .and_then(|s| s.footer.take())
        else {
            return Ok(None);
        };
        let id = self.mount_chrome(widget)?;
        self.footers.insert(section, id);
        Ok(Some(id))
    }

    /// The section's plain-text header title, if declared.
    pub fn header_title(&self, section: usize) -> Option<&str> {
        self.sections.get(section)?.header_title.as_deref()
    }

    /// The section's plain-text footer title, if declared.
    pub fn footer_title(&self, section: usize) -> Option<&str> {
        self.sections.get(section)?.footer_title.as_deref()
    }

    /// Header height; zero unless the section declared one.
    pub fn header_height(&self, section: usize) -> f64 {
        self.sections.get(section).map_or(0.0, |s| s.header_height)
    }

    /// Footer height; zero unless the section declared one.
    pub fn footer_height(&self, section: usize) -> f64 {
        self.sections.get(section).map_or(0.0, |s| s.footer_height)
    }

    /// Fixed row height, if the row declared one.
    pub fn row_height(&self, path: IndexPath) -> Option<f64> {
        self.row(path)?.height
    }

    /// Estimated row height, if the row declared one.
    pub fn estimated_row_height(&self, path: IndexPath) -> Option<f64> {
        self.row(path)?.estimated_height
    }

    /// Forward a will-display notice to the row's hook.
    pub fn will_display(&mut self, path: IndexPath) {
        if let Some(hook) = self.row_mut(path).and_then(|r| r.will_display.as_mut()) {
            hook(path);
        }
    }

    /// Forward a selection to the row's tap hook. Returns whether one ran.
    pub fn did_select(&mut self, path: IndexPath) -> bool {
        match self.row_mut(path).and_then(|r| r.on_tap.as_mut()) {
            Some(hook) => {
                hook(path);
                true
            }
            None => false,
        }
    }

    /// Whether the row highlights on touch. False when no hook is set.
    pub fn should_highlight(&self, path: IndexPath) -> bool {
        self.row(path)
            .and_then(|r| r.should_highlight.as_ref())
            .is_some_and(|hook| hook(path))
    }

    /// Read-only view of the adapter's mounted arena.
    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    /// The row at a path, if in range.
    fn row(&self, path: IndexPath) -> Option<&ListRow> {
        self.sections.get(path.section)?.rows.get(path.row)
    }

    /// Mutable row access for hook invocation.
    fn row_mut(&mut self, path: IndexPath) -> Option<&mut ListRow> {
        self.sections.get_mut(path.section)?.rows.get_mut(path.row)
    }

    /// Mount a header or footer widget full-bleed in a detached container.
    fn mount_chrome(&mut self, widget: Widget) -> Result<ViewId> {
        let container = self.tree.create_plain();
        let mounted = Mounter {
            tree: &mut self.tree,
            keys: &mut self.keys,
            chrome: None,
        }
        .mount(widget)?;
        self.tree.attach(container, mounted.root)?;
        self.tree
            .add_constraints(mounted.root, Constraint::fill(mounted.root, container));
        Ok(container)
    }
}
