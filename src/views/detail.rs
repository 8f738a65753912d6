// ============================================================================
// DETAIL VIEW - monastery / archive / service panel over the map
// ============================================================================

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlImageElement};

use crate::dom::{on_error, ElementBuilder};
use crate::maps::SelectionTarget;
use crate::services::SpeechStatus;
use crate::state::{AppState, DetailMode, IncrementalUpdate, UpdateType};
use crate::utils::html::escape_html;
use crate::viewmodels::detail_viewmodel::{detail_for, DetailView, DESCRIPTION_ELEMENT_ID};
use crate::viewmodels::ViewModels;

pub const DETAIL_ID: &str = "detail-region";

const PLACEHOLDER_IMAGE: &str = "/placeholder.svg";

fn refresh() {
    crate::rerender_app_with_type(UpdateType::Incremental(IncrementalUpdate::Detail));
}

fn mode_label(mode: DetailMode) -> &'static str {
    match mode {
        DetailMode::Image => "Image",
        DetailMode::Panorama => "360° View",
        DetailMode::Interior => "Interior",
    }
}

/// Image that falls back once, then shows the placeholder.
fn render_image(src: &str, fallback: Option<&str>, alt: &str) -> Result<Element, JsValue> {
    let img = ElementBuilder::new("img")?
        .class("detail-image")
        .attr("src", src)?
        .attr("alt", alt)?
        .attr("loading", "lazy")?
        .build();

    let fallback = fallback.map(str::to_string);
    let handle = img.clone();
    on_error(&img, move |_| {
        let Some(img) = handle.dyn_ref::<HtmlImageElement>() else {
            return;
        };
        let current = img.src();
        let on_placeholder = current.ends_with(PLACEHOLDER_IMAGE);
        match &fallback {
            Some(next) if !current.ends_with(next.as_str()) && !on_placeholder => img.set_src(next),
            _ if !on_placeholder => img.set_src(PLACEHOLDER_IMAGE),
            _ => {}
        }
    })?;
    Ok(img)
}

fn render_media(view: &DetailView, state: &AppState, vms: &ViewModels) -> Result<Element, JsValue> {
    let interior_image = state.detail_interior_image.borrow().clone();
    let interior_known = match view.target {
        SelectionTarget::Monastery(id) => state.data.interior_ids.borrow().contains(&id),
        _ => false,
    };
    let modes = view.modes(interior_image.as_deref(), interior_known);
    let requested = *state.detail_mode.borrow();
    let mode = if modes.contains(&requested) {
        requested
    } else {
        modes.first().copied().unwrap_or(DetailMode::Image)
    };

    let mut switcher = Vec::new();
    if modes.len() > 1 {
        for m in &modes {
            let m = *m;
            let vms = vms.clone();
            switcher.push(
                ElementBuilder::new("button")?
                    .class(if m == mode { "mode-tab mode-tab--active" } else { "mode-tab" })
                    .text(mode_label(m))
                    .on_click(move |_| {
                        vms.detail.set_mode(m);
                        refresh();
                    })?
                    .build(),
            );
        }
    }

    let stage = match mode {
        DetailMode::Panorama => match &view.panorama_html {
            Some(html) => ElementBuilder::new("div")?
                .class("detail-embed")
                .html(html)
                .build(),
            None => placeholder("No 360° view available")?,
        },
        DetailMode::Interior => match (&view.interior_html, &interior_image) {
            (Some(html), _) => ElementBuilder::new("div")?
                .class("detail-embed")
                .html(html)
                .build(),
            (None, Some(src)) => render_image(src, None, &view.title)?,
            (None, None) => placeholder("Interior view is loading...")?,
        },
        DetailMode::Image => match &view.image_url {
            Some(src) => render_image(src, view.fallback_image_url.as_deref(), &view.title)?,
            None => placeholder("No image available")?,
        },
    };

    Ok(ElementBuilder::new("div")?
        .class("detail-media")
        .child(
            ElementBuilder::new("div")?
                .class("mode-tabs")
                .children(switcher)?
                .build(),
        )?
        .child(stage)?
        .build())
}

fn placeholder(text: &str) -> Result<Element, JsValue> {
    Ok(ElementBuilder::new("div")?
        .class("detail-placeholder")
        .text(text)
        .build())
}

fn render_speech(view: &DetailView, vms: &ViewModels) -> Result<Element, JsValue> {
    let panel = ElementBuilder::new("div")?.class("audio-guide");
    if !vms.detail.speech_supported() {
        return Ok(panel
            .child(placeholder("Audio guide is not supported in this browser.")?)?
            .build());
    }

    let status = vms.detail.speech_status();
    let mut buttons = Vec::new();

    let primary = {
        let vms = vms.clone();
        let text = view.speech_text.clone();
        let (label, class) = match status {
            SpeechStatus::Idle => ("▶ Listen", "speech-play"),
            SpeechStatus::Speaking => ("⏸ Pause", "speech-pause"),
            SpeechStatus::Paused => ("▶ Resume", "speech-resume"),
        };
        ElementBuilder::new("button")?
            .class(class)
            .text(label)
            .flag("disabled", text.is_empty())?
            .on_click(move |_| {
                match vms.detail.speech_status() {
                    SpeechStatus::Idle => vms.detail.play(&text),
                    SpeechStatus::Speaking => vms.detail.pause(),
                    SpeechStatus::Paused => vms.detail.resume(),
                }
                refresh();
            })?
            .build()
    };
    buttons.push(primary);

    if status != SpeechStatus::Idle {
        let vms = vms.clone();
        buttons.push(
            ElementBuilder::new("button")?
                .class("speech-stop")
                .text("⏹ Stop")
                .on_click(move |_| {
                    vms.detail.stop();
                    refresh();
                })?
                .build(),
        );
    }

    Ok(panel
        .child(ElementBuilder::new("h4")?.text("🔊 Audio Guide").build())?
        .children(buttons)?
        .build())
}

fn render_links(view: &DetailView) -> Result<Option<Element>, JsValue> {
    let mut links = Vec::new();
    if let Some(url) = &view.map_url {
        links.push(
            ElementBuilder::new("a")?
                .class("detail-link")
                .attr("href", url)?
                .attr("target", "_blank")?
                .attr("rel", "noopener")?
                .text("Open in Maps")
                .build(),
        );
    }
    if let Some(url) = &view.booking_url {
        links.push(
            ElementBuilder::new("a")?
                .class("detail-link detail-link--book")
                .attr("href", url)?
                .attr("target", "_blank")?
                .attr("rel", "noopener")?
                .text("Book")
                .build(),
        );
    }
    if links.is_empty() {
        return Ok(None);
    }
    Ok(Some(ElementBuilder::new("div")?
        .class("detail-links")
        .children(links)?
        .build()))
}

/// Empty placeholder region when nothing is selected.
pub fn render_detail(state: &AppState, vms: &ViewModels) -> Result<Element, JsValue> {
    let region = ElementBuilder::new("section")?.id(DETAIL_ID);
    let Some(target) = state.selection() else {
        return Ok(region.class("detail-panel detail-panel--hidden").build());
    };
    let Some(view) = detail_for(&state.data, target) else {
        log::warn!("⚠️ [DETAIL] {:?} not found in loaded data", target);
        return Ok(region.class("detail-panel detail-panel--hidden").build());
    };

    let back_vms = vms.clone();
    let back = ElementBuilder::new("button")?
        .class("detail-back notranslate")
        .attr("translate", "no")?
        .text("← Back to Map")
        .on_click(move |_| back_vms.detail.close())?
        .build();

    let heading = ElementBuilder::new("div")?
        .class("detail-heading")
        .html(&format!(
            concat!(
                r#"<h2>{}</h2><span class="detail-kind">{}</span>"#,
                r#"<span class="detail-region">📍 {}</span>"#,
            ),
            escape_html(&view.title),
            view.kind_label,
            view.region
        ))
        .build();

    let description = ElementBuilder::new("div")?
        .id(DESCRIPTION_ELEMENT_ID)
        .class("detail-description")
        .text(if view.description.is_empty() {
            "No description available."
        } else {
            &view.description
        })
        .build();

    let mut panel = region
        .class("detail-panel")
        .child(back)?
        .child(heading)?
        .child(render_media(&view, state, vms)?)?
        .child(description)?
        .child(render_speech(&view, vms)?)?;
    if let Some(links) = render_links(&view)? {
        panel = panel.child(links)?;
    }
    Ok(panel.build())
}
