// ============================================================================
// CALENDAR VIEW - festival month grid, list and detail
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::app::today;
use crate::dom::{on_error, ElementBuilder};
use crate::models::FestivalEvent;
use crate::state::{AppState, IncrementalUpdate, UpdateType};
use crate::viewmodels::calendar_viewmodel::{event_list, month_grid, DayCell, WEEKDAY_LABELS};

pub const CALENDAR_ID: &str = "calendar-region";

fn refresh() {
    crate::rerender_app_with_type(UpdateType::Incremental(IncrementalUpdate::Calendar));
}

fn nav_button(state: &AppState, label: &str, step: fn(&AppState)) -> Result<Element, JsValue> {
    let state = state.clone();
    Ok(ElementBuilder::new("button")?
        .class("calendar-nav")
        .text(label)
        .on_click(move |_| {
            step(&state);
            refresh();
        })?
        .build())
}

fn render_grid(state: &AppState) -> Result<Element, JsValue> {
    let cursor = state.calendar.borrow().clone();
    let grid = month_grid(&cursor, &state.data.events.borrow(), today());

    let header = ElementBuilder::new("div")?
        .class("calendar-header")
        .child(nav_button(state, "‹", |s| s.calendar.borrow_mut().previous_month())?)?
        .child(ElementBuilder::new("h3")?.text(&grid.title).build())?
        .child(nav_button(state, "›", |s| s.calendar.borrow_mut().next_month())?)?
        .child(nav_button(state, "Today", |s| s.calendar.borrow_mut().reset_to(today()))?)?
        .build();

    let weekdays: String = WEEKDAY_LABELS
        .iter()
        .map(|d| format!(r#"<span class="calendar-weekday">{}</span>"#, d))
        .collect();

    let cells: String = grid
        .cells
        .iter()
        .map(|cell| match cell {
            DayCell::Blank => {
                r#"<span class="calendar-cell calendar-cell--blank"></span>"#.to_string()
            }
            DayCell::Day { day, has_event, is_today } => {
                let mut class = String::from("calendar-cell");
                if *has_event {
                    class.push_str(" calendar-cell--event");
                }
                if *is_today {
                    class.push_str(" calendar-cell--today");
                }
                format!(r#"<span class="{}">{}</span>"#, class, day)
            }
        })
        .collect();

    Ok(ElementBuilder::new("div")?
        .class("calendar-grid-wrap")
        .child(header)?
        .child(
            ElementBuilder::new("div")?
                .class("calendar-grid")
                .html(&format!("{}{}", weekdays, cells))
                .build(),
        )?
        .build())
}

fn render_event_detail(event: &FestivalEvent) -> Result<Element, JsValue> {
    let img = ElementBuilder::new("img")?
        .class("event-image")
        .attr("src", &event.image_url())?
        .attr("alt", &event.name)?
        .attr("loading", "lazy")?
        .build();
    let handle = img.clone();
    on_error(&img, move |_| {
        if handle.get_attribute("src").as_deref() != Some("/placeholder.svg") {
            let _ = handle.set_attribute("src", "/placeholder.svg");
        }
    })?;

    Ok(ElementBuilder::new("article")?
        .class("event-detail")
        .child(img)?
        .child(ElementBuilder::new("h3")?.text(&event.name).build())?
        .child(
            ElementBuilder::new("p")?
                .class("event-date")
                .text(&format!("📅 {}", event.display_date()))
                .build(),
        )?
        .child(
            ElementBuilder::new("p")?
                .class("event-description")
                .text(&event.description)
                .build(),
        )?
        .build())
}

fn render_events(state: &AppState) -> Result<Element, JsValue> {
    let events = event_list(&state.data.events.borrow());
    let selected = state.calendar.borrow().selected_event;

    if events.is_empty() {
        return Ok(ElementBuilder::new("p")?
            .class("calendar-empty")
            .text("No festivals loaded yet.")
            .build());
    }

    let mut rows = Vec::with_capacity(events.len());
    for event in &events {
        let id = event.id;
        let state = state.clone();
        rows.push(
            ElementBuilder::new("li")?
                .class(if selected == Some(id) {
                    "event-row event-row--selected"
                } else {
                    "event-row"
                })
                .html(&format!(
                    "<strong>{}</strong><span>{}</span>",
                    crate::utils::escape_html(&event.name),
                    crate::utils::escape_html(event.display_date())
                ))
                .on_click(move |_| {
                    state.calendar.borrow_mut().selected_event = Some(id);
                    refresh();
                })?
                .build(),
        );
    }

    let mut column = ElementBuilder::new("div")?
        .class("calendar-events")
        .child(
            ElementBuilder::new("ul")?
                .class("event-rows")
                .children(rows)?
                .build(),
        )?;
    if let Some(event) = selected.and_then(|id| events.iter().find(|e| e.id == id)) {
        column = column.child(render_event_detail(event)?)?;
    }
    Ok(column.build())
}

pub fn render_calendar(state: &AppState) -> Result<Element, JsValue> {
    Ok(ElementBuilder::new("section")?
        .id(CALENDAR_ID)
        .class("calendar")
        .child(ElementBuilder::new("h2")?.text("Festival Calendar").build())?
        .child(render_grid(state)?)?
        .child(render_events(state)?)?
        .build())
}
