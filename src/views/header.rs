// ============================================================================
// HEADER VIEW - navigation, language, translate toggle, install
// ============================================================================

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;

use crate::dom::{target_value, ElementBuilder};
use crate::services::InstallOutcome;
use crate::state::{ActiveView, AppState, IncrementalUpdate, UpdateType};
use crate::utils::i18n::Language;
use crate::utils::translate_ffi::{apply_language, set_widget_visible};
use crate::viewmodels::ViewModels;

pub const HEADER_ID: &str = "app-header";

fn go_to(state: &AppState, view: ActiveView) {
    if state.set_view(view) {
        log::info!("🧭 [NAV] {:?}", view);
        crate::rerender_app();
    }
}

fn render_nav(state: &AppState) -> Result<Element, JsValue> {
    let active = state.active_view();
    let mut buttons = Vec::new();
    for view in ActiveView::NAV {
        let class = if view == active { "nav-tab nav-tab--active" } else { "nav-tab" };
        let state = state.clone();
        buttons.push(
            ElementBuilder::new("button")?
                .class(class)
                .text(view.label())
                .on_click(move |_| go_to(&state, view))?
                .build(),
        );
    }
    Ok(ElementBuilder::new("nav")?
        .class("app-nav")
        .children(buttons)?
        .build())
}

fn render_language_select(state: &AppState) -> Result<Element, JsValue> {
    let current = state.language();
    let mut options = Vec::new();
    for lang in Language::ALL {
        options.push(
            ElementBuilder::new("option")?
                .attr("value", lang.code())?
                .flag("selected", lang == current)?
                .text(lang.native_name())
                .build(),
        );
    }

    let state = state.clone();
    Ok(ElementBuilder::new("select")?
        .class("language-select notranslate")
        .attr("aria-label", "Language")?
        .attr("translate", "no")?
        .children(options)?
        .on_change(move |event| {
            let Some(lang) = target_value(&event).and_then(|code| Language::from_code(&code)) else {
                return;
            };
            if state.set_language(lang) {
                log::info!("🌐 [I18N] Language -> {}", lang.code());
                apply_language(lang);
                crate::rerender_app_with_type(UpdateType::Incremental(IncrementalUpdate::Header));
            }
        })?
        .build())
}

fn render_install(state: &AppState, vms: &ViewModels) -> Result<Option<Element>, JsValue> {
    let install = *state.install.borrow();
    if install.installed {
        return Ok(None);
    }
    let label = if install.can_install { "Install App" } else { "Install" };

    let state = state.clone();
    let service = vms.install.clone();
    let button = ElementBuilder::new("button")?
        .class("install-button")
        .text(label)
        .on_click(move |_| {
            let state = state.clone();
            let service = service.clone();
            spawn_local(async move {
                let outcome = service.install().await;
                log::info!("📲 [PWA] Install outcome: {:?}", outcome);
                *state.install.borrow_mut() = service.state();
                *state.install_message.borrow_mut() = match outcome {
                    InstallOutcome::Manual(text) => Some(text.to_string()),
                    InstallOutcome::Accepted | InstallOutcome::Dismissed => None,
                };
                crate::rerender_app_with_type(UpdateType::Incremental(IncrementalUpdate::Header));
            });
        })?
        .build();
    Ok(Some(button))
}

fn render_install_message(state: &AppState) -> Result<Option<Element>, JsValue> {
    let Some(message) = state.install_message.borrow().clone() else {
        return Ok(None);
    };
    let dismiss_state = state.clone();
    let dismiss = ElementBuilder::new("button")?
        .class("install-help__close")
        .text("Got it")
        .on_click(move |_| {
            *dismiss_state.install_message.borrow_mut() = None;
            crate::rerender_app_with_type(UpdateType::Incremental(IncrementalUpdate::Header));
        })?
        .build();
    Ok(Some(
        ElementBuilder::new("div")?
            .class("install-help")
            .attr("role", "dialog")?
            .child(
                ElementBuilder::new("p")?
                    .class("install-help__text")
                    .text(&message)
                    .build(),
            )?
            .child(dismiss)?
            .build(),
    ))
}

pub fn render_header(state: &AppState, vms: &ViewModels) -> Result<Element, JsValue> {
    let translate_visible = *state.translate_visible.borrow();
    set_widget_visible(translate_visible);

    let toggle_state = state.clone();
    let translate_toggle = ElementBuilder::new("button")?
        .class(if translate_visible {
            "translate-toggle translate-toggle--on"
        } else {
            "translate-toggle"
        })
        .attr("title", "Show translation widget")?
        .text("🌐")
        .on_click(move |_| {
            toggle_state.toggle_translate();
            crate::rerender_app_with_type(UpdateType::Incremental(IncrementalUpdate::Header));
        })?
        .build();

    let info_state = state.clone();
    let info = ElementBuilder::new("button")?
        .class("info-button")
        .attr("title", "About Monastery360")?
        .text("ℹ️ Information")
        .on_click(move |_| go_to(&info_state, ActiveView::Info))?
        .build();

    let mut actions = ElementBuilder::new("div")?
        .class("header-actions")
        .child(render_language_select(state)?)?
        .child(translate_toggle)?
        .child(info)?;
    if let Some(install) = render_install(state, vms)? {
        actions = actions.child(install)?;
    }

    let home_state = state.clone();
    let mut header = ElementBuilder::new("header")?
        .id(HEADER_ID)
        .class("app-header")
        .child(
            ElementBuilder::new("h1")?
                .class("app-title notranslate")
                .attr("translate", "no")?
                .attr("role", "button")?
                .attr("aria-label", "Go to home page")?
                .text("Monastery360")
                .on_click(move |_| go_to(&home_state, ActiveView::Landing))?
                .build(),
        )?
        .child(render_nav(state)?)?
        .child(actions.build())?;
    if let Some(message) = render_install_message(state)? {
        header = header.child(message)?;
    }
    Ok(header.build())
}
