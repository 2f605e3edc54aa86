use crossterm::terminal::{self, WindowSize};
use dimscale_core::{DimensionEvents, DisplayHost, MetricsProvider, Subscription};
use dimscale_protocol::ScreenMetrics;
use log::{debug, warn};

/// Logical size of one terminal cell.
const CELL_WIDTH: f64 = 8.0;
const CELL_HEIGHT: f64 = 16.0;

/// Display host backed by the controlling terminal.
///
/// Sizes come from `crossterm` as the cell grid scaled by a nominal cell size.
/// When the terminal reports its pixel size, that only feeds the pixel ratio.
#[derive(Debug, Clone)]
pub struct TerminalHost {
    host: DisplayHost,
}

impl TerminalHost {
    pub fn new() -> Self {
        Self {
            host: DisplayHost::new(query(None)),
        }
    }

    /// Handle `Event::Resize(columns, rows)`.
    pub fn resized(&self, columns: u16, rows: u16) {
        let metrics = query(Some((columns, rows)));
        debug!("terminal resized to {columns}x{rows} cells -> {metrics:?}");
        self.host.update(metrics);
    }

    pub fn listener_count(&self) -> usize {
        self.host.listener_count()
    }
}

impl Default for TerminalHost {
    fn default() -> Self {
        Self::new()
    }
}

impl MetricsProvider for TerminalHost {
    fn metrics(&self) -> ScreenMetrics {
        self.host.metrics()
    }
}

impl DimensionEvents for TerminalHost {
    fn subscribe(&self, listener: Box<dyn FnMut(ScreenMetrics)>) -> Subscription {
        self.host.subscribe(listener)
    }
}

fn query(cells: Option<(u16, u16)>) -> ScreenMetrics {
    match terminal::window_size() {
        Ok(size) => from_window_size(&size, cells),
        Err(err) => match cells.or_else(|| terminal::size().ok()) {
            Some((columns, rows)) => from_cells(columns, rows),
            None => {
                warn!("terminal size unavailable ({err}), using zero metrics");
                ScreenMetrics::ZERO
            }
        },
    }
}

/// Logical size always comes from the cell grid; a reported pixel size only
/// sets the density. `cells` overrides the grid from the size query, since
/// resize events are fresher, and makes a mismatched pixel size stale.
fn from_window_size(size: &WindowSize, cells: Option<(u16, u16)>) -> ScreenMetrics {
    let (columns, rows) = cells.unwrap_or((size.columns, size.rows));
    let logical = from_cells(columns, rows);
    let current = cells.is_none_or(|c| c == (size.columns, size.rows));
    if size.width > 0 && size.height > 0 && columns > 0 && current {
        let pixel_ratio = f64::from(size.width) / logical.width;
        return ScreenMetrics::new(logical.width, logical.height, pixel_ratio).sanitized();
    }
    logical
}

fn from_cells(columns: u16, rows: u16) -> ScreenMetrics {
    ScreenMetrics::new(
        f64::from(columns) * CELL_WIDTH,
        f64::from(rows) * CELL_HEIGHT,
        1.0,
    )
}
