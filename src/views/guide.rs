// ============================================================================
// GUIDE VIEW - trip guide chat, shown beside the FAQ
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::dom::{get_element_by_id, target_value, ElementBuilder};
use crate::models::{TripSuggestion, QUICK_PROMPTS, TRIP_SUGGESTIONS};
use crate::state::{AppState, GuideAuthor, GuideState};
use crate::utils::escape_html;
use crate::viewmodels::ViewModels;

pub const GUIDE_ID: &str = "guide-region";
const SEND_ID: &str = "guide-send";

/// Typing only toggles the send button; the region is not re-rendered.
fn sync_send_button(state: &AppState) {
    if let Some(button) = get_element_by_id(SEND_ID) {
        if state.guide.borrow().can_send() {
            let _ = button.remove_attribute("disabled");
        } else {
            let _ = button.set_attribute("disabled", "");
        }
    }
}

fn render_welcome(vms: &ViewModels) -> Result<Element, JsValue> {
    let mut prompts = Vec::with_capacity(QUICK_PROMPTS.len());
    for prompt in QUICK_PROMPTS {
        let vms = vms.clone();
        prompts.push(
            ElementBuilder::new("button")?
                .class("guide-prompt")
                .text(prompt)
                .on_click(move |_| vms.guide.use_prompt(prompt))?
                .build(),
        );
    }
    Ok(ElementBuilder::new("div")?
        .class("guide-welcome")
        .html(
            "<h4>Welcome to your Trip Guide!</h4>\
             <p>Ask me anything about planning your monastery visit in Sikkim. I can help with \
             itineraries, recommendations, and cultural insights.</p>",
        )
        .child(
            ElementBuilder::new("div")?
                .class("guide-prompts")
                .children(prompts)?
                .build(),
        )?
        .build())
}

fn badges(class: &str, items: &[&str]) -> String {
    items
        .iter()
        .map(|item| format!(r#"<span class="{}">{}</span>"#, class, escape_html(item)))
        .collect()
}

fn render_suggestion(suggestion: &TripSuggestion) -> Result<Element, JsValue> {
    let html = format!(
        concat!(
            r#"<div class="guide-card__head"><h4>{}</h4><span class="{}">{}</span></div>"#,
            r#"<p>{}</p>"#,
            r#"<p class="guide-card__meta">🕒 {} · 📍 {}</p>"#,
            r#"<h5>Key Highlights</h5><div class="guide-badges">{}</div>"#,
            r#"<h5>Monasteries Included</h5><div class="guide-badges">{}</div>"#,
        ),
        escape_html(suggestion.title),
        suggestion.difficulty.css_class(),
        suggestion.difficulty.label(),
        escape_html(suggestion.description),
        escape_html(suggestion.duration),
        escape_html(suggestion.best_time),
        badges("guide-badge", suggestion.highlights),
        badges("guide-badge guide-badge--monastery", suggestion.monasteries),
    );
    Ok(ElementBuilder::new("div")?
        .class("guide-card")
        .html(&html)
        .build())
}

fn render_messages(guide: &GuideState, vms: &ViewModels) -> Result<Element, JsValue> {
    let list = ElementBuilder::new("div")?.class("guide-messages");
    if guide.messages.is_empty() {
        return Ok(list.child(render_welcome(vms)?)?.build());
    }

    let mut children = Vec::with_capacity(guide.messages.len() + 2);
    for message in &guide.messages {
        let class = match message.author {
            GuideAuthor::Traveler => "guide-message guide-message--user",
            GuideAuthor::Guide => "guide-message guide-message--guide",
        };
        children.push(
            ElementBuilder::new("p")?
                .class(class)
                .text(&message.text)
                .build(),
        );
    }
    if let Some(suggestion) = guide.suggestion.and_then(|i| TRIP_SUGGESTIONS.get(i)) {
        children.push(render_suggestion(suggestion)?);
    }
    if guide.generating {
        children.push(
            ElementBuilder::new("p")?
                .class("guide-loading")
                .text("Generating recommendations...")
                .build(),
        );
    }
    Ok(list.children(children)?.build())
}

fn render_composer(
    state: &AppState,
    guide: &GuideState,
    vms: &ViewModels,
) -> Result<Element, JsValue> {
    let input_state = state.clone();
    let input_vms = vms.clone();
    let key_vms = vms.clone();
    let draft = ElementBuilder::new("textarea")?
        .class("guide-draft")
        .attr("rows", "2")?
        .attr(
            "placeholder",
            "Ask me about monastery visits, cultural experiences, travel planning...",
        )?
        .text(&guide.draft)
        .on_input(move |event| {
            input_vms.guide.set_draft(target_value(&event).unwrap_or_default());
            sync_send_button(&input_state);
        })?
        .on_keydown(move |event| {
            if event.key() == "Enter" && !event.shift_key() {
                event.prevent_default();
                key_vms.guide.send();
            }
        })?
        .build();

    let send_vms = vms.clone();
    let send = ElementBuilder::new("button")?
        .id(SEND_ID)
        .class("guide-send")
        .attr("title", "Send")?
        .text("➤")
        .flag("disabled", !guide.can_send())?
        .on_click(move |_| send_vms.guide.send())?
        .build();

    Ok(ElementBuilder::new("div")?
        .class("guide-composer")
        .child(draft)?
        .child(send)?
        .child(
            ElementBuilder::new("p")?
                .class("guide-hint")
                .text("Press Enter to send, Shift+Enter for new line")
                .build(),
        )?
        .build())
}

pub fn render_guide(state: &AppState, vms: &ViewModels) -> Result<Element, JsValue> {
    let guide = state.guide.borrow().clone();
    Ok(ElementBuilder::new("section")?
        .id(GUIDE_ID)
        .class("guide")
        .html(r#"<h3>✨ AI Trip Guide <span class="guide-tag">Curated itineraries</span></h3>"#)
        .child(render_messages(&guide, vms)?)?
        .child(render_composer(state, &guide, vms)?)?
        .build())
}
