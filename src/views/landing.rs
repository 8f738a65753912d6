// ============================================================================
// LANDING VIEW - first screen, leads into the map
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::dom::ElementBuilder;
use crate::state::{ActiveView, AppState};

const FEATURES: &[(&str, &str, &str)] = &[
    (
        "🗺️",
        "Interactive Maps",
        "Explore monasteries across Sikkim with detailed location mapping",
    ),
    ("🎧", "Audio Guides", "Immersive audio experiences and virtual tours"),
    (
        "📅",
        "Festival Calendar",
        "Stay updated with monastery events and cultural celebrations",
    ),
    (
        "🧭",
        "Trip Planner",
        "Plan your spiritual journey with personalized itineraries",
    ),
];

const STATS: &[(&str, &str, &str)] = &[
    ("100+", "Monasteries", "Sacred Sites"),
    ("360°", "Virtual Tours", "Immersive view"),
    ("24/7", "Audio Guides", "Always Available"),
];

fn render_hero(state: &AppState) -> Result<Element, JsValue> {
    let stats: String = STATS
        .iter()
        .map(|(value, label, caption)| {
            format!(
                concat!(
                    r#"<li class="landing-stat"><strong>{}</strong>"#,
                    r#"<span>{}</span><small>{}</small></li>"#,
                ),
                value, label, caption
            )
        })
        .collect();

    let start_state = state.clone();
    let start = ElementBuilder::new("button")?
        .class("landing-cta")
        .text("Start Exploring →")
        .on_click(move |_| {
            if start_state.set_view(ActiveView::Map) {
                log::info!("🧭 [NAV] Start exploring");
                crate::rerender_app();
            }
        })?
        .build();

    Ok(ElementBuilder::new("div")?
        .class("landing-hero")
        .html(&format!(
            concat!(
                r#"<span class="landing-tag">✨ Spiritual Journey Awaits</span>"#,
                r#"<h1 class="notranslate" translate="no">Monastery360</h1>"#,
                "<h2>Discover the Sacred Heritage of Sikkim</h2>",
                "<p>Embark on a spiritual journey through ancient monasteries with interactive ",
                "maps, immersive audio guides, and cultural insights. Experience the tranquility ",
                "and wisdom of Himalayan Buddhism from anywhere in the world.</p>",
                r#"<ul class="landing-stats">{}</ul>"#,
            ),
            stats
        ))
        .child(start)?
        .child(
            ElementBuilder::new("p")?
                .class("landing-badges")
                .text("PWA Ready · Offline Support · Multilingual")
                .build(),
        )?
        .build())
}

fn render_features() -> Result<Element, JsValue> {
    let cards: String = FEATURES
        .iter()
        .map(|(icon, title, description)| {
            format!(
                r#"<li class="landing-feature"><span>{}</span><h3>{}</h3><p>{}</p></li>"#,
                icon, title, description
            )
        })
        .collect();
    Ok(ElementBuilder::new("div")?
        .class("landing-side")
        .html(&format!(
            concat!(
                r#"<ul class="landing-features">{}</ul>"#,
                r#"<div class="landing-a11y"><h3>Accessibility</h3>"#,
                "<p>Designed following WCAG 2.1 AA practices: semantic HTML structure, keyboard ",
                "navigability, and ARIA where appropriate.</p></div>",
            ),
            cards
        ))
        .build())
}

pub fn render_landing(state: &AppState) -> Result<Element, JsValue> {
    Ok(ElementBuilder::new("section")?
        .class("landing")
        .child(render_hero(state)?)?
        .child(render_features()?)?
        .build())
}
