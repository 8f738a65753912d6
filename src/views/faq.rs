// ============================================================================
// FAQ VIEW
// ============================================================================
// Search input sits outside the replaced region so it keeps focus.
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::dom::{target_value, ElementBuilder};
use crate::models::{FaqCategory, FAQ_ITEMS};
use crate::state::{AppState, IncrementalUpdate, UpdateType};
use crate::viewmodels::faq_viewmodel::{filter_faq, summary_line};

pub const FAQ_ID: &str = "faq-region";

fn refresh() {
    crate::rerender_app_with_type(UpdateType::Incremental(IncrementalUpdate::Faq));
}

fn category_button(
    state: &AppState,
    category: Option<FaqCategory>,
    label: &str,
) -> Result<Element, JsValue> {
    let active = state.faq.borrow().category == category;
    let state = state.clone();
    Ok(ElementBuilder::new("button")?
        .class(if active {
            "faq-category faq-category--active"
        } else {
            "faq-category"
        })
        .text(label)
        .on_click(move |_| {
            state.faq.borrow_mut().category = category;
            refresh();
        })?
        .build())
}

pub fn render_faq_body(state: &AppState) -> Result<Element, JsValue> {
    let filter = state.faq.borrow().clone();
    let items = filter_faq(FAQ_ITEMS, &filter);

    let mut categories = vec![category_button(state, None, "All")?];
    for category in FaqCategory::ALL {
        categories.push(category_button(state, Some(category), category.label())?);
    }

    let list = if items.is_empty() {
        ElementBuilder::new("p")?
            .class("faq-empty")
            .text("No questions match your search.")
            .build()
    } else {
        let mut rows = Vec::with_capacity(items.len());
        for item in &items {
            let id = item.id;
            let expanded = filter.is_expanded(id);
            let toggle_state = state.clone();
            let question = ElementBuilder::new("button")?
                .class("faq-question")
                .attr("aria-expanded", if expanded { "true" } else { "false" })?
                .text(&format!("{} {}", if expanded { "−" } else { "+" }, item.question))
                .on_click(move |_| {
                    toggle_state.faq.borrow_mut().toggle(id);
                    refresh();
                })?
                .build();

            let mut row = ElementBuilder::new("li")?
                .class("faq-item")
                .child(question)?;
            if expanded {
                row = row.child(
                    ElementBuilder::new("p")?
                        .class("faq-answer")
                        .text(item.answer)
                        .build(),
                )?;
            }
            rows.push(row.build());
        }
        ElementBuilder::new("ul")?
            .class("faq-list")
            .children(rows)?
            .build()
    };

    Ok(ElementBuilder::new("div")?
        .id(FAQ_ID)
        .class("faq-body")
        .child(
            ElementBuilder::new("div")?
                .class("faq-categories")
                .children(categories)?
                .build(),
        )?
        .child(list)?
        .child(
            ElementBuilder::new("p")?
                .class("faq-summary")
                .text(&summary_line(items.len(), FAQ_ITEMS.len()))
                .build(),
        )?
        .build())
}

pub fn render_faq(state: &AppState) -> Result<Element, JsValue> {
    let search_state = state.clone();
    let search = ElementBuilder::new("input")?
        .class("faq-search")
        .attr("type", "search")?
        .attr("placeholder", "Search questions...")?
        .attr("value", &state.faq.borrow().search)?
        .on_input(move |event| {
            search_state.faq.borrow_mut().search = target_value(&event).unwrap_or_default();
            refresh();
        })?
        .build();

    Ok(ElementBuilder::new("section")?
        .class("faq")
        .child(
            ElementBuilder::new("h2")?
                .text("Frequently Asked Questions")
                .build(),
        )?
        .child(search)?
        .child(render_faq_body(state)?)?
        .build())
}
