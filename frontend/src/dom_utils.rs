//! dom_utils.rs – thin helpers for the repetitive DOM work the router does.

use wasm_bindgen::JsValue;
use web_sys::{Document, Element};

/// Remove every child of `el`.
pub fn clear_children(el: &Element) {
    while let Some(child) = el.first_child() {
        let _ = el.remove_child(&child);
    }
}

/// Return the direct child of `parent` with `id`, creating it as a `tag`
/// element when there is none. Elements with the same id elsewhere in the
/// page are ignored.
pub fn ensure_child(
    document: &Document,
    parent: &Element,
    id: &str,
    tag: &str,
    class_name: &str,
) -> Result<Element, JsValue> {
    if let Some(el) = parent.query_selector(&format!(":scope > #{}", id))? {
        return Ok(el);
    }
    let el = document.create_element(tag)?;
    el.set_id(id);
    el.set_class_name(class_name);
    parent.append_child(&el)?;
    Ok(el)
}

/// Create an element with text content in one go.
pub fn text_element(document: &Document, tag: &str, text: &str) -> Result<Element, JsValue> {
    let el = document.create_element(tag)?;
    el.set_text_content(Some(text));
    Ok(el)
}
