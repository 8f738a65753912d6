// ============================================================================
// PWA INSTALL
// ============================================================================
// Captures `beforeinstallprompt` (default prevented) and `appinstalled`.
// Without a captured prompt, installing falls back to manual instructions.
// ============================================================================

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{window, Event};

use crate::error::js_error_message;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InstallState {
    pub installed: bool,
    pub can_install: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallOutcome {
    Accepted,
    Dismissed,
    /// No native prompt; the caller should show these instructions.
    Manual(&'static str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrowserFamily {
    ChromeOrEdge,
    Firefox,
    Safari,
    Other,
}

/// Chrome's UA also mentions Safari, so order matters.
pub fn browser_family(user_agent: &str) -> BrowserFamily {
    let ua = user_agent.to_lowercase();
    if ua.contains("chrome") || ua.contains("edge") || ua.contains("edg/") {
        BrowserFamily::ChromeOrEdge
    } else if ua.contains("firefox") {
        BrowserFamily::Firefox
    } else if ua.contains("safari") {
        BrowserFamily::Safari
    } else {
        BrowserFamily::Other
    }
}

pub fn install_instructions(user_agent: &str) -> &'static str {
    match browser_family(user_agent) {
        BrowserFamily::ChromeOrEdge => {
            "To install Monastery360:\n1. Open the browser menu (⋮)\n2. Select \"Install Monastery360\" or \"Add to Home screen\"\n3. Click \"Install\" when prompted"
        }
        BrowserFamily::Firefox => {
            "To install Monastery360:\n1. Open the browser menu (☰)\n2. Select \"Install\" or \"Add to Home Screen\"\n3. Click \"Add\" when prompted"
        }
        BrowserFamily::Safari => {
            "To install Monastery360:\n1. Tap the Share button\n2. Scroll down and tap \"Add to Home Screen\"\n3. Tap \"Add\" to confirm"
        }
        BrowserFamily::Other => {
            "To install Monastery360:\n1. Look for an install option in your browser menu\n2. Or add this page to your home screen\n3. The app works offline once installed"
        }
    }
}

/// Registers the install listeners once and keeps the captured prompt.
pub struct PwaInstallService {
    state: Rc<Cell<InstallState>>,
    prompt: Rc<RefCell<Option<Event>>>,
    listening: Cell<bool>,
}

impl PwaInstallService {
    pub fn new() -> Self {
        let standalone = window()
            .and_then(|w| w.match_media("(display-mode: standalone)").ok().flatten())
            .map(|m| m.matches())
            .unwrap_or(false);

        Self {
            state: Rc::new(Cell::new(InstallState {
                installed: standalone,
                can_install: false,
            })),
            prompt: Rc::new(RefCell::new(None)),
            listening: Cell::new(false),
        }
    }

    pub fn state(&self) -> InstallState {
        self.state.get()
    }

    /// `on_change` runs after every state change. Calling twice is a no-op.
    pub fn start<F>(&self, on_change: F)
    where
        F: Fn(InstallState) + 'static,
    {
        if self.listening.replace(true) {
            log::warn!("⚠️ [PWA] Install listeners already registered");
            return;
        }
        let Some(window) = window() else {
            return;
        };
        let on_change = Rc::new(on_change);

        let before_prompt = Closure::wrap(Box::new({
            let state = self.state.clone();
            let prompt = self.prompt.clone();
            let on_change = on_change.clone();
            move |event: Event| {
                event.prevent_default();
                *prompt.borrow_mut() = Some(event);
                let next = InstallState {
                    can_install: true,
                    ..state.get()
                };
                state.set(next);
                on_change(next);
            }
        }) as Box<dyn FnMut(Event)>);

        let installed = Closure::wrap(Box::new({
            let state = self.state.clone();
            let prompt = self.prompt.clone();
            move |_event: Event| {
                log::info!("📲 [PWA] App installed");
                prompt.borrow_mut().take();
                let next = InstallState {
                    installed: true,
                    can_install: false,
                };
                state.set(next);
                on_change(next);
            }
        }) as Box<dyn FnMut(Event)>);

        let _ = window.add_event_listener_with_callback(
            "beforeinstallprompt",
            before_prompt.as_ref().unchecked_ref(),
        );
        let _ = window
            .add_event_listener_with_callback("appinstalled", installed.as_ref().unchecked_ref());

        // Window listeners live for the whole app
        before_prompt.forget();
        installed.forget();
    }

    /// Show the native prompt if one was captured.
    pub async fn install(&self) -> InstallOutcome {
        let user_agent = window()
            .and_then(|w| w.navigator().user_agent().ok())
            .unwrap_or_default();

        let Some(event) = self.prompt.borrow_mut().take() else {
            return InstallOutcome::Manual(install_instructions(&user_agent));
        };

        match show_prompt(&event).await {
            Ok(true) => {
                self.state.set(InstallState {
                    installed: true,
                    can_install: false,
                });
                InstallOutcome::Accepted
            }
            Ok(false) => {
                // A prompt can only be shown once
                self.state.set(InstallState {
                    can_install: false,
                    ..self.state.get()
                });
                InstallOutcome::Dismissed
            }
            Err(e) => {
                log::error!("❌ [PWA] Install prompt failed: {}", e);
                InstallOutcome::Manual(install_instructions(&user_agent))
            }
        }
    }
}

impl Default for PwaInstallService {
    fn default() -> Self {
        Self::new()
    }
}

async fn show_prompt(event: &Event) -> Result<bool, String> {
    let prompt_fn = js_sys::Reflect::get(event, &JsValue::from_str("prompt"))
        .map_err(|e| js_error_message(&e))?
        .dyn_into::<js_sys::Function>()
        .map_err(|_| "prompt() not available".to_string())?;
    let shown = prompt_fn.call0(event).map_err(|e| js_error_message(&e))?;
    if let Ok(promise) = shown.dyn_into::<js_sys::Promise>() {
        JsFuture::from(promise).await.map_err(|e| js_error_message(&e))?;
    }

    let choice = js_sys::Reflect::get(event, &JsValue::from_str("userChoice"))
        .map_err(|e| js_error_message(&e))?
        .dyn_into::<js_sys::Promise>()
        .map_err(|_| "userChoice not available".to_string())?;
    let result = JsFuture::from(choice).await.map_err(|e| js_error_message(&e))?;
    let outcome = js_sys::Reflect::get(&result, &JsValue::from_str("outcome"))
        .ok()
        .and_then(|v| v.as_string())
        .unwrap_or_default();
    Ok(outcome == "accepted")
}

#[cfg(test)]
mod tests {
    use super::*;

    const CHROME: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0 Safari/537.36";
    const FIREFOX: &str = "Mozilla/5.0 (X11; Linux x86_64; rv:121.0) Gecko/20100101 Firefox/121.0";
    const SAFARI: &str = "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.0 Mobile/15E148 Safari/604.1";

    #[test]
    fn detects_browser_family() {
        assert_eq!(browser_family(CHROME), BrowserFamily::ChromeOrEdge);
        assert_eq!(browser_family(FIREFOX), BrowserFamily::Firefox);
        assert_eq!(browser_family(SAFARI), BrowserFamily::Safari);
        assert_eq!(browser_family("curl/8.0"), BrowserFamily::Other);
    }

    #[test]
    fn instructions_match_browser() {
        assert!(install_instructions(SAFARI).contains("Share"));
        assert!(install_instructions(FIREFOX).contains("☰"));
        assert!(install_instructions(CHROME).contains("Install Monastery360"));
        assert!(install_instructions("").contains("home screen"));
    }
}
