//! Widget options.
//!
//! Every field has a default, so `{}` (or no options at all) gives the
//! Bootstrap markup the widget was written for.

use serde::Deserialize;

/// CSS selectors used to find the parts of the widget inside its container.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Selectors {
    /// Tab items, in reading order
    pub tabs: String,
    /// The strip that gets shifted
    pub nav: String,
    /// The visible window around the strip
    pub wrapper: String,
    pub scroll_left: String,
    pub scroll_right: String,
}

impl Default for Selectors {
    fn default() -> Self {
        Self {
            tabs: ".nav-tabs > li".to_string(),
            nav: ".nav-tabs".to_string(),
            wrapper: ".boottab-slider__wrapper".to_string(),
            scroll_left: ".boottab-slider__scroll-left".to_string(),
            scroll_right: ".boottab-slider__scroll-right".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SliderOptions {
    pub selectors: Selectors,
    /// Count horizontal margins as part of a tab's width
    pub include_margin: bool,
}

impl Default for SliderOptions {
    fn default() -> Self {
        Self {
            selectors: Selectors::default(),
            include_margin: true,
        }
    }
}

/// Options plus the one-shot completion callback.
#[derive(Default)]
pub struct SliderSettings {
    pub options: SliderOptions,
    /// Runs once after the first layout of a fresh attachment
    pub complete: Option<Box<dyn FnOnce()>>,
}

impl SliderSettings {
    pub fn new(options: SliderOptions) -> Self {
        Self {
            options,
            complete: None,
        }
    }

    pub fn on_complete(mut self, complete: impl FnOnce() + 'static) -> Self {
        self.complete = Some(Box::new(complete));
        self
    }
}

impl std::fmt::Debug for SliderSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SliderSettings")
            .field("options", &self.options)
            .field("complete", &self.complete.is_some())
            .finish()
    }
}
