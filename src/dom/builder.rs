// ============================================================================
// ELEMENT BUILDER - chainable element construction
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::{Element, Event, KeyboardEvent, MouseEvent};

use crate::dom::{append_child, create_element, on_change, on_click, on_input, on_keydown};

pub struct ElementBuilder {
    element: Element,
}

impl ElementBuilder {
    pub fn new(tag: &str) -> Result<Self, JsValue> {
        Ok(Self {
            element: create_element(tag)?,
        })
    }

    /// Replaces all classes
    pub fn class(self, class: &str) -> Self {
        self.element.set_class_name(class);
        self
    }

    pub fn id(self, id: &str) -> Self {
        self.element.set_id(id);
        self
    }

    pub fn text(self, text: &str) -> Self {
        self.element.set_text_content(Some(text));
        self
    }

    /// Caller is responsible for escaping.
    pub fn html(self, html: &str) -> Self {
        self.element.set_inner_html(html);
        self
    }

    pub fn attr(self, name: &str, value: &str) -> Result<Self, JsValue> {
        self.element.set_attribute(name, value)?;
        Ok(self)
    }

    /// Set a boolean attribute such as `disabled` when `on` is true.
    pub fn flag(self, name: &str, on: bool) -> Result<Self, JsValue> {
        if on {
            self.element.set_attribute(name, "")?;
        }
        Ok(self)
    }

    pub fn child(self, child: Element) -> Result<Self, JsValue> {
        append_child(&self.element, &child)?;
        Ok(self)
    }

    pub fn children<I>(self, children: I) -> Result<Self, JsValue>
    where
        I: IntoIterator<Item = Element>,
    {
        for child in children {
            append_child(&self.element, &child)?;
        }
        Ok(self)
    }

    pub fn on_click<F>(self, handler: F) -> Result<Self, JsValue>
    where
        F: FnMut(MouseEvent) + 'static,
    {
        on_click(&self.element, handler)?;
        Ok(self)
    }

    pub fn on_input<F>(self, handler: F) -> Result<Self, JsValue>
    where
        F: FnMut(Event) + 'static,
    {
        on_input(&self.element, handler)?;
        Ok(self)
    }

    pub fn on_change<F>(self, handler: F) -> Result<Self, JsValue>
    where
        F: FnMut(Event) + 'static,
    {
        on_change(&self.element, handler)?;
        Ok(self)
    }

    pub fn on_keydown<F>(self, handler: F) -> Result<Self, JsValue>
    where
        F: FnMut(KeyboardEvent) + 'static,
    {
        on_keydown(&self.element, handler)?;
        Ok(self)
    }

    pub fn build(self) -> Element {
        self.element
    }
}
