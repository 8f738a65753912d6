// ============================================================================
// ELEMENT HELPERS - basic DOM access
// ============================================================================

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement, Window};

pub fn window() -> Option<Window> {
    web_sys::window()
}

pub fn document() -> Option<Document> {
    window()?.document()
}

pub fn get_element_by_id(id: &str) -> Option<Element> {
    document()?.get_element_by_id(id)
}

pub fn create_element(tag: &str) -> Result<Element, JsValue> {
    document()
        .ok_or_else(|| JsValue::from_str("No document"))
        .and_then(|doc| doc.create_element(tag))
}

pub fn set_inner_html(element: &Element, html: &str) {
    element.set_inner_html(html);
}

pub fn append_child(parent: &Element, child: &Element) -> Result<(), JsValue> {
    parent.append_child(child).map(|_| ())
}

/// Swap the element with `id` for `replacement`. Errors when the region is
/// not in the DOM, so callers can fall back to a full render.
pub fn replace_region(id: &str, replacement: &Element) -> Result<(), JsValue> {
    let current = get_element_by_id(id)
        .ok_or_else(|| JsValue::from_str(&format!("#{} not in DOM, needs full render", id)))?;
    current.replace_with_with_node_1(replacement)
}

/// Set the text of the element with `id`. Missing elements are ignored.
pub fn set_text_by_id(id: &str, text: &str) {
    if let Some(element) = get_element_by_id(id) {
        element.set_text_content(Some(text));
    }
}

/// Update an `<input>` in place; `attrs` are applied before the value so
/// range bounds never clamp the new value.
pub fn set_input_by_id(id: &str, attrs: &[(&str, &str)], value: &str) {
    let Some(input) = get_element_by_id(id).and_then(|e| e.dyn_into::<HtmlInputElement>().ok())
    else {
        return;
    };
    for (name, attr) in attrs {
        let _ = input.set_attribute(name, attr);
    }
    input.set_value(value);
}

/// Current value of an `<input>`, `<select>` or `<textarea>` event target.
pub fn target_value(event: &web_sys::Event) -> Option<String> {
    let target = event.target()?;
    if let Some(input) = target.dyn_ref::<HtmlInputElement>() {
        return Some(input.value());
    }
    if let Some(select) = target.dyn_ref::<HtmlSelectElement>() {
        return Some(select.value());
    }
    target.dyn_ref::<HtmlTextAreaElement>().map(|t| t.value())
}
