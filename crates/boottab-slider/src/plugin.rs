//! JavaScript entry points, the `$.fn.bootTabSlider` equivalent.
//!
//! ```js
//! import init, { bootTabSlider } from "./boottab_slider.js";
//! await init();
//! const slider = bootTabSlider(document.querySelector(".boottab-slider"), {
//!   complete: () => console.log("ready"),
//! });
//! slider.scrollTabs("right");
//! ```

use crate::config::{SliderOptions, SliderSettings};
use crate::error::{describe, SliderError};
use crate::registry::{self, SliderHandle};
use js_sys::{Function, Object, Reflect};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::Element;

#[wasm_bindgen]
pub struct BootTabSlider {
    handle: SliderHandle,
}

#[wasm_bindgen]
impl BootTabSlider {
    #[wasm_bindgen(js_name = resetTabs)]
    pub fn reset_tabs(&self) {
        self.handle.reset_tabs();
    }

    /// `"left"` or `"right"`; anything else is ignored.
    #[wasm_bindgen(js_name = scrollTabs)]
    pub fn scroll_tabs(&self, direction: &str) {
        self.handle.scroll_named(direction);
    }

    #[wasm_bindgen(getter)]
    pub fn offset(&self) -> f64 {
        self.handle.state().offset
    }

    #[wasm_bindgen(getter, js_name = leftVisible)]
    pub fn left_visible(&self) -> bool {
        self.handle.state().show_left
    }

    #[wasm_bindgen(getter, js_name = rightVisible)]
    pub fn right_visible(&self) -> bool {
        self.handle.state().show_right
    }

    /// Unregister the listeners and forget the element.
    pub fn destroy(&self) -> bool {
        registry::detach_key(self.handle.key())
    }
}

/// Attach to `element` once; later calls return the same slider.
#[wasm_bindgen(js_name = bootTabSlider)]
pub fn boot_tab_slider(element: &Element, options: JsValue) -> Result<BootTabSlider, JsValue> {
    let settings = settings_from_js(&options)?;
    let handle = registry::attach(element, settings)?;
    Ok(BootTabSlider { handle })
}

fn settings_from_js(options: &JsValue) -> Result<SliderSettings, SliderError> {
    if options.is_undefined() || options.is_null() {
        return Ok(SliderSettings::default());
    }
    if !options.is_object() {
        return Err(SliderError::Options("expected an object".to_string()));
    }

    let complete = Reflect::get(options, &JsValue::from_str("complete"))
        .ok()
        .and_then(|value| value.dyn_into::<Function>().ok());

    // functions do not deserialize, so read the rest from a copy without it
    let rest = Object::assign(&Object::new(), options.unchecked_ref::<Object>());
    let _ = Reflect::delete_property(&rest, &JsValue::from_str("complete"));
    let parsed: SliderOptions = serde_wasm_bindgen::from_value(rest.into())
        .map_err(|err| SliderError::Options(err.to_string()))?;

    let mut settings = SliderSettings::new(parsed);
    if let Some(complete) = complete {
        settings = settings.on_complete(move || {
            if let Err(err) = complete.call0(&JsValue::NULL) {
                log::warn!("boottab-slider: complete callback threw {}", describe(&err));
            }
        });
    }
    Ok(settings)
}
