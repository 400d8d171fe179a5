//! Pure arithmetic over tab positions.
//!
//! Nothing in here touches the DOM: a [`TabMetrics`] snapshot goes in, the next
//! [`SliderState`] comes out. Offsets are CSS `left` values in pixels, so they are
//! always `<= 0`; "visible left" is the same number with the sign flipped.

/// Scroll direction of a control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    /// Parse the direction names accepted by `scrollTabs`.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "left" => Some(Direction::Left),
            "right" => Some(Direction::Right),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }
}

/// One measurement of the tab strip.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TabMetrics {
    /// Outer width of every tab, in reading order
    pub widths: Vec<f64>,
    /// Left edge of every tab relative to the unshifted strip
    pub lefts: Vec<f64>,
    /// Outer width of the wrapper
    pub viewport: f64,
}

impl TabMetrics {
    /// Metrics for tabs laid out edge to edge starting at 0.
    pub fn from_widths(widths: Vec<f64>, viewport: f64) -> Self {
        let mut lefts = Vec::with_capacity(widths.len());
        let mut acc = 0.0;
        for w in &widths {
            lefts.push(acc);
            acc += w;
        }
        Self {
            widths,
            lefts,
            viewport,
        }
    }

    pub fn total(&self) -> f64 {
        self.widths.iter().sum()
    }

    /// Largest distance the strip may travel to the left.
    pub fn max_offset(&self) -> f64 {
        (self.total() - self.viewport).max(0.0)
    }

    pub fn overflows(&self) -> bool {
        self.total() > self.viewport
    }

    fn left_of(&self, index: usize) -> f64 {
        self.lefts.get(index).copied().unwrap_or(0.0)
    }

    fn right_of(&self, index: usize) -> f64 {
        self.left_of(index) + self.widths.get(index).copied().unwrap_or(0.0)
    }
}

/// Offset of the strip plus the visibility of both controls.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SliderState {
    pub offset: f64,
    pub show_left: bool,
    pub show_right: bool,
}

impl SliderState {
    fn visible_left(&self) -> f64 {
        -self.offset
    }
}

/// First tab whose right edge reaches the right edge of the visible window.
///
/// The window's right edge sits at `viewport + visible_left`; widths are
/// subtracted from it left to right until nothing is left.
pub fn next_right_index(metrics: &TabMetrics, visible_left: f64) -> Option<usize> {
    let mut remaining = metrics.viewport + visible_left.abs();
    for (index, width) in metrics.widths.iter().enumerate() {
        remaining -= width;
        if remaining <= 0.0 {
            return Some(index);
        }
    }
    None
}

/// First tab, walking from the right end, that crosses the visible left edge.
///
/// Content to the right of the window's left edge measures
/// `total - visible_left`; the tab that pushes the running width from the
/// right past that amount is the one partially (or fully) hidden on the left.
/// The result is a forward index.
pub fn next_left_index(metrics: &TabMetrics, visible_left: f64) -> Option<usize> {
    let mut remaining = metrics.total() - visible_left.abs();
    for (index, width) in metrics.widths.iter().enumerate().rev() {
        remaining -= width;
        if remaining < 0.0 {
            return Some(index);
        }
    }
    None
}

/// State after a reset: strip at its origin, right control only on overflow.
pub fn reset_state(metrics: &TabMetrics) -> SliderState {
    SliderState {
        offset: 0.0,
        show_left: false,
        show_right: metrics.overflows(),
    }
}

/// State after one step in `direction` starting from `current`.
pub fn scroll_state(direction: Direction, metrics: &TabMetrics, current: SliderState) -> SliderState {
    if !metrics.overflows() {
        return reset_state(metrics);
    }
    match direction {
        Direction::Right => scroll_right(metrics, current),
        Direction::Left => scroll_left(metrics, current),
    }
}

fn scroll_right(metrics: &TabMetrics, current: SliderState) -> SliderState {
    let max = metrics.max_offset();
    let visible_left = current.visible_left();

    let candidate = match next_right_index(metrics, visible_left) {
        Some(index) => {
            let left = metrics.left_of(index);
            // A tab wider than the window can start before its left edge
            if left > visible_left {
                left
            } else {
                metrics.right_of(index)
            }
        }
        None => max,
    };

    if candidate >= max || candidate <= visible_left {
        SliderState {
            offset: -max,
            show_left: true,
            show_right: false,
        }
    } else {
        SliderState {
            offset: -candidate,
            show_left: true,
            show_right: true,
        }
    }
}

fn scroll_left(metrics: &TabMetrics, current: SliderState) -> SliderState {
    let visible_left = current.visible_left().min(metrics.max_offset());

    let candidate = match next_left_index(metrics, visible_left) {
        Some(index) => {
            let aligned_right = metrics.right_of(index) - metrics.viewport;
            if aligned_right < visible_left {
                aligned_right
            } else {
                metrics.left_of(index)
            }
        }
        None => 0.0,
    };

    if candidate <= 0.0 || candidate >= visible_left {
        SliderState {
            offset: 0.0,
            show_left: false,
            show_right: true,
        }
    } else {
        SliderState {
            offset: -candidate,
            show_left: true,
            show_right: true,
        }
    }
}
