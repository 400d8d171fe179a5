//! The slider controller.
//!
//! [`TabSlider`] keeps the one piece of state the widget owns and delegates
//! measuring and drawing to its [`TabLayout`].

use crate::events::SliderEvent;
use crate::geometry::{self, Direction, SliderState};
use crate::layout::TabLayout;

pub struct TabSlider<L> {
    layout: L,
    state: SliderState,
}

impl<L: TabLayout> TabSlider<L> {
    /// Wrap a layout. Nothing is drawn until [`TabSlider::init`].
    pub fn new(layout: L) -> Self {
        Self {
            layout,
            state: SliderState::default(),
        }
    }

    /// Initial layout pass.
    pub fn init(&mut self) {
        self.reset_tabs();
    }

    /// Move the strip back to its origin and recompute which controls are needed.
    pub fn reset_tabs(&mut self) {
        let metrics = self.layout.measure();
        let next = geometry::reset_state(&metrics);
        log::debug!(
            "boottab-slider: reset (tabs {} / viewport {}), right control {}",
            metrics.total(),
            metrics.viewport,
            if next.show_right { "shown" } else { "hidden" }
        );
        self.apply(next);
    }

    /// Shift the strip by one tab towards `direction`.
    pub fn scroll_tabs(&mut self, direction: Direction) {
        let metrics = self.layout.measure();
        let next = geometry::scroll_state(direction, &metrics, self.state);
        log::debug!(
            "boottab-slider: scroll {} {} -> {}",
            direction.as_str(),
            self.state.offset,
            next.offset
        );
        self.apply(next);
    }

    /// String form used by the JS surface; unknown directions do nothing.
    pub fn scroll_named(&mut self, direction: &str) {
        match Direction::parse(direction) {
            Some(direction) => self.scroll_tabs(direction),
            None => log::debug!("boottab-slider: ignoring scroll direction `{}`", direction),
        }
    }

    pub fn handle(&mut self, event: SliderEvent) {
        match event {
            SliderEvent::ScrollLeftClicked => self.scroll_tabs(Direction::Left),
            SliderEvent::ScrollRightClicked => self.scroll_tabs(Direction::Right),
            SliderEvent::WindowResized => self.reset_tabs(),
        }
    }

    pub fn state(&self) -> SliderState {
        self.state
    }

    pub fn offset(&self) -> f64 {
        self.state.offset
    }

    pub fn layout(&self) -> &L {
        &self.layout
    }

    fn apply(&mut self, next: SliderState) {
        self.state = next;
        self.layout.render(&self.state);
    }
}
