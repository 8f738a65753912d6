// ============================================================================
// PLANNER VIEW - trip plan form and generated itinerary
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::dom::{get_element_by_id, target_value, ElementBuilder};
use crate::models::plan::{ACCOMMODATION_OPTIONS, TRANSPORT_OPTIONS};
use crate::models::PlanField;
use crate::state::{AppState, PlanStatus};
use crate::utils::html::{escape_html, render_markdown};
use crate::viewmodels::ViewModels;

pub const PLANNER_ID: &str = "planner-region";
const SUBMIT_ID: &str = "plan-submit";

/// Typing must not re-render the form, so the submit button is toggled in place.
fn sync_submit_button(state: &AppState) {
    if let Some(button) = get_element_by_id(SUBMIT_ID) {
        if state.planner.borrow().can_submit() {
            let _ = button.remove_attribute("disabled");
        } else {
            let _ = button.set_attribute("disabled", "");
        }
    }
}

fn field_value(event: &web_sys::Event) -> String {
    target_value(event).unwrap_or_default()
}

fn labelled(label: &str, control: Element) -> Result<Element, JsValue> {
    Ok(ElementBuilder::new("label")?
        .class("plan-field")
        .child(ElementBuilder::new("span")?.text(label).build())?
        .child(control)?
        .build())
}

fn text_input(
    state: &AppState,
    field: PlanField,
    kind: &str,
    placeholder: &str,
    value: &str,
    disabled: bool,
) -> Result<Element, JsValue> {
    let state = state.clone();
    Ok(ElementBuilder::new("input")?
        .attr("type", kind)?
        .attr("placeholder", placeholder)?
        .attr("value", value)?
        .flag("disabled", disabled)?
        .on_input(move |event| {
            state.planner.borrow_mut().set_field(field, field_value(&event));
            sync_submit_button(&state);
        })?
        .build())
}

fn select_input(
    state: &AppState,
    field: PlanField,
    options: &[(&str, &str)],
    value: &str,
    disabled: bool,
) -> Result<Element, JsValue> {
    let mut children = vec![ElementBuilder::new("option")?
        .attr("value", "")?
        .text("Select...")
        .build()];
    for (code, label) in options {
        children.push(
            ElementBuilder::new("option")?
                .attr("value", code)?
                .flag("selected", *code == value)?
                .text(label)
                .build(),
        );
    }
    let state = state.clone();
    Ok(ElementBuilder::new("select")?
        .flag("disabled", disabled)?
        .children(children)?
        .on_change(move |event| {
            state.planner.borrow_mut().set_field(field, field_value(&event));
        })?
        .build())
}

fn render_form(state: &AppState, vms: &ViewModels) -> Result<Element, JsValue> {
    let planner = state.planner.borrow().clone();
    let form = &planner.form;
    let busy = planner.is_generating();

    let interests_state = state.clone();
    let interests = ElementBuilder::new("textarea")?
        .attr("placeholder", "Monasteries, trekking, local food...")?
        .attr("rows", "3")?
        .flag("disabled", busy)?
        .text(&form.interests)
        .on_input(move |event| {
            interests_state
                .planner
                .borrow_mut()
                .set_field(PlanField::Interests, field_value(&event));
        })?
        .build();

    let budget = text_input(state, PlanField::Budget, "number", "25000", &form.budget, busy)?;
    let days = text_input(state, PlanField::Days, "number", "5", &form.days, busy)?;
    let travelers =
        text_input(state, PlanField::Travelers, "number", "2", &form.travelers, busy)?;

    let submit_vms = vms.clone();
    let submit = ElementBuilder::new("button")?
        .id(SUBMIT_ID)
        .class("plan-submit")
        .text(if busy { "Generating..." } else { "✨ Generate Trip Plan" })
        .flag("disabled", !planner.can_submit())?
        .on_click(move |_| submit_vms.planner.submit())?
        .build();

    Ok(ElementBuilder::new("div")?
        .class("plan-form")
        .child(
            ElementBuilder::new("h3")?
                .text("Plan Your Sikkim Journey")
                .build(),
        )?
        .child(labelled("Budget (₹)", budget)?)?
        .child(labelled("Days", days)?)?
        .child(labelled("Travelers", travelers)?)?
        .child(labelled("Interests", interests)?)?
        .child(labelled(
            "Accommodation",
            select_input(
                state,
                PlanField::Accommodation,
                ACCOMMODATION_OPTIONS,
                &form.accommodation,
                busy,
            )?,
        )?)?
        .child(labelled(
            "Transport",
            select_input(state, PlanField::Transport, TRANSPORT_OPTIONS, &form.transport, busy)?,
        )?)?
        .child(submit)?
        .build())
}

fn render_result(state: &AppState, vms: &ViewModels) -> Result<Element, JsValue> {
    let status = state.planner.borrow().status.clone();
    let panel = ElementBuilder::new("div")?.class("plan-result");

    let reset_button = |label: &str| -> Result<Element, JsValue> {
        let vms = vms.clone();
        Ok(ElementBuilder::new("button")?
            .class("plan-reset")
            .text(label)
            .on_click(move |_| vms.planner.reset())?
            .build())
    };

    let panel = match status {
        PlanStatus::Idle => panel.html(concat!(
            r#"<p class="plan-empty">Ready to plan your perfect trip?</p>"#,
            r#"<p class="plan-hint">Fill in the form and click "Generate Trip Plan" "#,
            "to get started!</p>",
        )),
        PlanStatus::Generating => {
            panel.html(r#"<p class="plan-loading">✨ Creating your itinerary...</p>"#)
        }
        PlanStatus::Ready { title, text } => {
            let title = title.unwrap_or_else(|| "Your Trip Itinerary".to_string());
            panel
                .child(
                    ElementBuilder::new("h3")?
                        .html(&escape_html(&title))
                        .build(),
                )?
                .child(
                    ElementBuilder::new("div")?
                        .class("trip-markdown")
                        .html(&render_markdown(&text))
                        .build(),
                )?
                .child(reset_button("New plan")?)?
        }
        PlanStatus::Failed(message) => panel
            .child(
                ElementBuilder::new("p")?
                    .class("plan-error")
                    .text(&format!("⚠️ {}", message))
                    .build(),
            )?
            .child(reset_button("Try again")?)?,
    };
    Ok(panel.build())
}

pub fn render_planner(state: &AppState, vms: &ViewModels) -> Result<Element, JsValue> {
    Ok(ElementBuilder::new("section")?
        .id(PLANNER_ID)
        .class("planner")
        .child(render_form(state, vms)?)?
        .child(render_result(state, vms)?)?
        .build())
}
