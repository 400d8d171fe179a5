//! [`TabLayout`] backed by the live DOM.

use super::TabLayout;
use crate::config::SliderOptions;
use crate::error::SliderError;
use crate::geometry::{Direction, SliderState, TabMetrics};
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlElement};

pub struct DomLayout {
    container: Element,
    options: SliderOptions,
    nav: Option<HtmlElement>,
    wrapper: Option<HtmlElement>,
    scroll_left: Option<HtmlElement>,
    scroll_right: Option<HtmlElement>,
}

impl DomLayout {
    /// Look up the strip, wrapper and controls inside `container`.
    ///
    /// Parts that are not there are remembered as absent; only a selector the
    /// browser refuses to parse is an error.
    pub fn discover(container: &Element, options: SliderOptions) -> Result<Self, SliderError> {
        let selectors = &options.selectors;
        // validated here so `measure` can stay infallible
        find_all(container, &selectors.tabs)?;

        let nav = find(container, &selectors.nav)?;
        let wrapper = find(container, &selectors.wrapper)?;
        let scroll_left = find(container, &selectors.scroll_left)?;
        let scroll_right = find(container, &selectors.scroll_right)?;

        for (name, part) in [
            ("nav", nav.is_some()),
            ("wrapper", wrapper.is_some()),
            ("scroll-left", scroll_left.is_some()),
            ("scroll-right", scroll_right.is_some()),
        ] {
            if !part {
                log::debug!("boottab-slider: no {} element in container", name);
            }
        }

        Ok(Self {
            container: container.clone(),
            options,
            nav,
            wrapper,
            scroll_left,
            scroll_right,
        })
    }

    pub fn container(&self) -> &Element {
        &self.container
    }

    pub fn control(&self, direction: Direction) -> Option<&HtmlElement> {
        match direction {
            Direction::Left => self.scroll_left.as_ref(),
            Direction::Right => self.scroll_right.as_ref(),
        }
    }

    /// Tab items are looked up on every measurement so tabs added after
    /// attachment are picked up by the next reset.
    fn tabs(&self) -> Vec<HtmlElement> {
        match find_all(&self.container, &self.options.selectors.tabs) {
            Ok(tabs) => tabs,
            Err(err) => {
                log::warn!("boottab-slider: {}", err);
                Vec::new()
            }
        }
    }

    fn margins(&self, el: &HtmlElement) -> (f64, f64) {
        if !self.options.include_margin {
            return (0.0, 0.0);
        }
        let Some(style) = web_sys::window()
            .and_then(|w| w.get_computed_style(el).ok())
            .flatten()
        else {
            return (0.0, 0.0);
        };
        let read = |property: &str| {
            style
                .get_property_value(property)
                .map(|value| parse_px(&value))
                .unwrap_or(0.0)
        };
        (read("margin-left"), read("margin-right"))
    }
}

impl TabLayout for DomLayout {
    fn measure(&self) -> TabMetrics {
        let viewport = self
            .wrapper
            .as_ref()
            .map(|w| f64::from(w.offset_width()))
            .unwrap_or(0.0);

        let tabs = self.tabs();
        let origin = self
            .nav
            .as_ref()
            .map(|nav| nav.get_bounding_client_rect().left());

        let mut widths = Vec::with_capacity(tabs.len());
        let mut lefts = Vec::with_capacity(tabs.len());
        let mut acc = 0.0;
        for tab in &tabs {
            let margins = self.margins(tab);
            let (width, left) = margin_box(
                f64::from(tab.offset_width()),
                origin.map(|origin| tab.get_bounding_client_rect().left() - origin),
                margins,
                acc,
            );
            acc += width;
            widths.push(width);
            lefts.push(left);
        }

        TabMetrics {
            widths,
            lefts,
            viewport,
        }
    }

    fn render(&mut self, state: &SliderState) {
        if let Some(nav) = &self.nav {
            let _ = nav
                .style()
                .set_property("left", &format!("{}px", state.offset));
        }
        if let Some(el) = &self.scroll_left {
            set_visible(el, state.show_left);
        }
        if let Some(el) = &self.scroll_right {
            set_visible(el, state.show_right);
        }
    }
}

fn set_visible(el: &HtmlElement, visible: bool) {
    let style = el.style();
    if visible {
        let _ = style.remove_property("display");
    } else {
        let _ = style.set_property("display", "none");
    }
    let _ = el.set_attribute("aria-hidden", if visible { "false" } else { "true" });
}

fn find(container: &Element, selector: &str) -> Result<Option<HtmlElement>, SliderError> {
    let found = container
        .query_selector(selector)
        .map_err(|err| SliderError::selector(selector, err))?;
    Ok(found.and_then(|el| el.dyn_into::<HtmlElement>().ok()))
}

fn find_all(container: &Element, selector: &str) -> Result<Vec<HtmlElement>, SliderError> {
    let nodes = container
        .query_selector_all(selector)
        .map_err(|err| SliderError::selector(selector, err))?;
    let mut out = Vec::with_capacity(nodes.length() as usize);
    for i in 0..nodes.length() {
        if let Some(el) = nodes.get(i).and_then(|node| node.dyn_into::<HtmlElement>().ok()) {
            out.push(el);
        }
    }
    Ok(out)
}

/// Outer width and left edge of a tab's margin box.
///
/// `border_left` is the border-box left edge relative to the strip; without a
/// strip the tabs are assumed to sit edge to edge from `fallback_left`.
fn margin_box(
    border_width: f64,
    border_left: Option<f64>,
    (margin_left, margin_right): (f64, f64),
    fallback_left: f64,
) -> (f64, f64) {
    let width = border_width + margin_left + margin_right;
    let left = match border_left {
        Some(left) => left - margin_left,
        None => fallback_left,
    };
    (width, left)
}

/// Computed lengths come back as `"12px"`; anything else counts as zero.
fn parse_px(value: &str) -> f64 {
    value
        .trim()
        .trim_end_matches("px")
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::{margin_box, parse_px};

    #[test]
    fn test_parse_px() {
        assert_eq!(parse_px("12px"), 12.0);
        assert_eq!(parse_px(" 2.5px "), 2.5);
        assert_eq!(parse_px("0px"), 0.0);
        assert_eq!(parse_px("-4px"), -4.0);
        assert_eq!(parse_px("auto"), 0.0);
        assert_eq!(parse_px(""), 0.0);
    }

    #[test]
    fn test_margin_box() {
        // 100px border box at 12px with 4px/6px margins
        assert_eq!(margin_box(100.0, Some(12.0), (4.0, 6.0), 0.0), (110.0, 8.0));
        assert_eq!(margin_box(100.0, Some(12.0), (0.0, 0.0), 0.0), (100.0, 12.0));
        // no strip to measure against
        assert_eq!(margin_box(80.0, None, (5.0, 5.0), 220.0), (90.0, 220.0));
    }
}
