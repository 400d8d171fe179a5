//! Scroll controls for an overflowing tab bar.
//!
//! When the tabs are wider than their wrapper, a left and a right control
//! shift the strip one tab at a time without running past either end. The
//! arithmetic lives in [`geometry`], state in [`slider::TabSlider`], and the
//! browser glue in [`layout`], [`events`] and [`registry`].

pub mod component;
pub mod config;
pub mod error;
pub mod events;
pub mod geometry;
pub mod layout;
pub mod plugin;
pub mod registry;
pub mod slider;

pub use component::TabSliderNav;
pub use config::{Selectors, SliderOptions, SliderSettings};
pub use error::SliderError;
pub use geometry::{Direction, SliderState, TabMetrics};
pub use registry::{attach, detach, SliderHandle};
pub use slider::TabSlider;

use wasm_bindgen::prelude::wasm_bindgen;

/// Route `log` output to the browser console and install the panic hook.
#[wasm_bindgen(js_name = installLogging)]
pub fn install_logging() {
    _ = console_log::init_with_level(log::Level::Debug);
    console_error_panic_hook::set_once();
}
