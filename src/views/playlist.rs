// ============================================================================
// PLAYLIST VIEW - curated audio tracks and player controls
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::dom::{set_input_by_id, set_text_by_id, target_value, ElementBuilder};
use crate::models::AUDIO_TRACKS;
use crate::state::{AppState, ProgressDisplay};
use crate::utils::escape_html;
use crate::viewmodels::ViewModels;

pub const PLAYLIST_ID: &str = "playlist-region";
const ELAPSED_ID: &str = "playlist-elapsed";
const SEEK_ID: &str = "playlist-seek";
const DURATION_ID: &str = "playlist-duration";

fn control(
    label: &str,
    title: &str,
    active: bool,
    on_click: impl FnMut(web_sys::MouseEvent) + 'static,
) -> Result<Element, JsValue> {
    let class = if active {
        "player-control player-control--active"
    } else {
        "player-control"
    };
    Ok(ElementBuilder::new("button")?
        .class(class)
        .attr("title", title)?
        .text(label)
        .on_click(on_click)?
        .build())
}

/// Built with the player; `timeupdate` only patches it through
/// [`sync_progress`], so the slider keeps its listeners and the drag.
fn render_progress(vms: &ViewModels) -> Result<Element, JsValue> {
    let (elapsed, duration) = vms.playlist.position();
    let progress = ProgressDisplay::new(elapsed, duration);

    let drag_vms = vms.clone();
    let seek_vms = vms.clone();
    let seek = ElementBuilder::new("input")?
        .id(SEEK_ID)
        .class("player-seek")
        .attr("type", "range")?
        .attr("min", "0")?
        .attr("step", "1")?
        .attr("max", &progress.max.to_string())?
        .attr("value", &progress.value.to_string())?
        .on_input(move |_| drag_vms.playlist.begin_seek())?
        .on_change(move |event| {
            let seconds = target_value(&event).and_then(|v| v.parse::<f64>().ok());
            seek_vms.playlist.seek(seconds.unwrap_or(f64::NAN));
        })?
        .build();

    Ok(ElementBuilder::new("div")?
        .class("player-progress")
        .child(
            ElementBuilder::new("span")?
                .id(ELAPSED_ID)
                .text(&progress.elapsed)
                .build(),
        )?
        .child(seek)?
        .child(
            ElementBuilder::new("span")?
                .id(DURATION_ID)
                .text(&progress.duration)
                .build(),
        )?
        .build())
}

/// Patch the progress row in place. No-op when the Audio page is not showing.
pub fn sync_progress(vms: &ViewModels) {
    let (elapsed, duration) = vms.playlist.position();
    let progress = ProgressDisplay::new(elapsed, duration);
    set_text_by_id(ELAPSED_ID, &progress.elapsed);
    set_text_by_id(DURATION_ID, &progress.duration);
    if !vms.playlist.is_seeking() {
        let max = progress.max.to_string();
        set_input_by_id(SEEK_ID, &[("max", &max)], &progress.value.to_string());
    }
}

fn render_player(state: &AppState, vms: &ViewModels) -> Result<Element, JsValue> {
    let playlist = state.playlist.borrow().clone();
    let now_playing = AUDIO_TRACKS.get(playlist.current);

    let heading = match now_playing {
        Some(track) => format!(
            r#"<h3>{}</h3><p class="player-meta">{} · {}</p>"#,
            escape_html(track.title),
            escape_html(track.monastery),
            track.kind.label()
        ),
        None => "<h3>No track selected</h3>".to_string(),
    };

    let controls = {
        let (v1, v2, v3) = (vms.clone(), vms.clone(), vms.clone());
        let (v4, v5, v6) = (vms.clone(), vms.clone(), vms.clone());
        vec![
            control("🔀", "Shuffle", playlist.shuffle, move |_| v1.playlist.toggle_shuffle())?,
            control("⏮", "Previous", false, move |_| v2.playlist.previous())?,
            control(
                if playlist.playing { "⏸" } else { "▶" },
                if playlist.playing { "Pause" } else { "Play" },
                playlist.playing,
                move |_| v3.playlist.toggle_play(),
            )?,
            control("⏭", "Next", false, move |_| v4.playlist.next())?,
            control("🔁", "Repeat", playlist.repeat, move |_| v5.playlist.toggle_repeat())?,
            control(
                if playlist.muted { "🔇" } else { "🔊" },
                "Mute",
                playlist.muted,
                move |_| v6.playlist.toggle_mute(),
            )?,
        ]
    };

    let shown_volume = if playlist.muted { 0 } else { playlist.volume };
    let volume_vms = vms.clone();
    let volume = ElementBuilder::new("input")?
        .class("player-volume")
        .attr("type", "range")?
        .attr("min", "0")?
        .attr("max", "100")?
        .attr("value", &shown_volume.to_string())?
        .on_input(move |event| {
            if let Some(volume) = target_value(&event).and_then(|v| v.parse::<u32>().ok()) {
                volume_vms.playlist.set_volume(volume);
            }
        })?
        .build();

    Ok(ElementBuilder::new("div")?
        .class("player")
        .html(&heading)
        .child(render_progress(vms)?)?
        .child(
            ElementBuilder::new("div")?
                .class("player-controls")
                .children(controls)?
                .build(),
        )?
        .child(volume)?
        .build())
}

fn render_tracks(state: &AppState, vms: &ViewModels) -> Result<Element, JsValue> {
    let current = state.playlist.borrow().current;
    let mut rows = Vec::with_capacity(AUDIO_TRACKS.len());
    for (index, track) in AUDIO_TRACKS.iter().enumerate() {
        let vms = vms.clone();
        rows.push(
            ElementBuilder::new("li")?
                .class(if index == current {
                    "track-row track-row--current"
                } else {
                    "track-row"
                })
                .html(&format!(
                    concat!(
                        r#"<strong>{}</strong><span class="track-kind">{}</span>"#,
                        r#"<span class="track-duration">{}</span><p>{}</p>"#,
                    ),
                    escape_html(track.title),
                    track.kind.label(),
                    track.duration,
                    escape_html(track.description)
                ))
                .on_click(move |_| vms.playlist.select(index))?
                .build(),
        );
    }
    Ok(ElementBuilder::new("ul")?
        .class("track-list")
        .children(rows)?
        .build())
}

pub fn render_playlist(state: &AppState, vms: &ViewModels) -> Result<Element, JsValue> {
    Ok(ElementBuilder::new("section")?
        .id(PLAYLIST_ID)
        .class("playlist")
        .child(ElementBuilder::new("h2")?.text("Sacred Sounds").build())?
        .child(render_player(state, vms)?)?
        .child(render_tracks(state, vms)?)?
        .build())
}
