// ============================================================================
// TRANSLATE WIDGET BRIDGE
// ============================================================================
// The widget script itself is loaded by index.html. From Rust we only touch
// its cookie, its <select class="goog-te-combo"> and <html lang>.
// ============================================================================

use wasm_bindgen::JsCast;
use web_sys::{HtmlDocument, HtmlSelectElement};

use super::i18n::{googtrans_cookie, Language};

const COOKIE_NAME: &str = "googtrans";
const SELECT_QUERY: &str = "select.goog-te-combo";
const WIDGET_HOST_ID: &str = "google_translate_element";

fn html_document() -> Option<HtmlDocument> {
    web_sys::window()?.document()?.dyn_into::<HtmlDocument>().ok()
}

fn translate_select() -> Option<HtmlSelectElement> {
    web_sys::window()?
        .document()?
        .query_selector(SELECT_QUERY)
        .ok()??
        .dyn_into::<HtmlSelectElement>()
        .ok()
}

fn hostname() -> Option<String> {
    web_sys::window()?.location().hostname().ok()
}

fn write_cookie(value: Option<&str>) {
    let Some(doc) = html_document() else {
        return;
    };
    let entry = match value {
        Some(v) => format!("{}={}; path=/", COOKIE_NAME, v),
        None => format!("{}=; expires=Thu, 01 Jan 1970 00:00:00 GMT; path=/", COOKIE_NAME),
    };
    let _ = doc.set_cookie(&entry);
    if let Some(host) = hostname().filter(|h| h.contains('.')) {
        let _ = doc.set_cookie(&format!("{}; domain=.{}", entry, host));
    }
}

/// Switch page translation. Falls back to a reload when the widget has not
/// rendered its select yet, so it picks the cookie up on start.
pub fn apply_language(lang: Language) {
    let cookie = googtrans_cookie(lang);
    write_cookie(cookie.as_deref());

    let target = match lang {
        Language::English => "",
        other => other.code(),
    };

    match translate_select() {
        Some(select) => {
            if select.value() != target {
                select.set_value(target);
                if let Ok(event) = web_sys::Event::new("change") {
                    let _ = select.dispatch_event(&event);
                }
            }
        }
        None => {
            log::info!("🌐 [I18N] Translate widget not rendered, reloading");
            if let Some(window) = web_sys::window() {
                let _ = window.location().reload();
            }
        }
    }

    if let Some(root) = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.document_element())
    {
        let _ = root.set_attribute("lang", lang.code());
    }
}

/// Show or hide the widget's host element.
pub fn set_widget_visible(visible: bool) {
    let Some(host) = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(WIDGET_HOST_ID))
    else {
        return;
    };
    let _ = host.set_attribute("style", if visible { "display:block" } else { "display:none" });
}
