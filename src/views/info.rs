// ============================================================================
// INFO VIEW - about the app
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::dom::ElementBuilder;

const FEATURES: &[(&str, &str, &str)] = &[
    (
        "🗺️",
        "Interactive Map",
        "Explore Sikkim's monasteries with geo-tagged locations and detailed information.",
    ),
    (
        "📷",
        "360° Virtual Tours",
        "Immersive virtual experiences of monastery interiors and surroundings.",
    ),
    (
        "📅",
        "Festival Calendar",
        "Stay updated with Buddhist festivals and cultural events throughout the year.",
    ),
    (
        "🎧",
        "Audio Guides",
        "Listen to detailed descriptions and cultural insights about each monastery.",
    ),
    (
        "🌐",
        "Multilingual Support",
        "Available in English, Hindi, and Nepali for broader accessibility.",
    ),
    (
        "🏛️",
        "Cultural Preservation",
        "Digital archive preserving Sikkim's rich Buddhist heritage for future generations.",
    ),
];

const STATS: &[(&str, &str)] = &[
    ("100+", "Monasteries Featured"),
    ("3", "Languages Supported"),
    ("20+", "Cultural Festivals"),
    ("100+", "Audio Guides"),
];

pub fn render_info() -> Result<Element, JsValue> {
    let stats: String = STATS
        .iter()
        .map(|(value, label)| {
            format!(
                r#"<li class="info-stat"><strong>{}</strong><span>{}</span></li>"#,
                value, label
            )
        })
        .collect();
    let sections: String = FEATURES
        .iter()
        .map(|(icon, title, description)| {
            format!(
                r#"<li class="info-section"><span>{}</span><h3>{}</h3><p>{}</p></li>"#,
                icon, title, description
            )
        })
        .collect();

    Ok(ElementBuilder::new("section")?
        .class("info")
        .html(&format!(
            concat!(
                r#"<h2 class="notranslate" translate="no">Monastery360</h2>"#,
                "<p>A Progressive Web App designed to boost tourism and preserve the cultural ",
                "heritage of Sikkim's monasteries through interactive digital experiences.</p>",
                r#"<ul class="info-stats">{}</ul>"#,
                r#"<ul class="info-sections">{}</ul>"#,
            ),
            stats, sections
        ))
        .build())
}
