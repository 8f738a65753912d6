// ============================================================================
// GUIDE VIEWMODEL - trip guide chat on the Q&A page
// ============================================================================
// Replies come from the curated suggestions after a short delay; there is no
// model call behind the guide.
// ============================================================================

use gloo_timers::callback::Timeout;

use crate::state::{pick_suggestion, AppState, IncrementalUpdate, UpdateType};

const REPLY_DELAY_MS: u32 = 2_000;

#[derive(Clone)]
pub struct GuideViewModel {
    state: AppState,
}

impl GuideViewModel {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    pub fn set_draft(&self, text: String) {
        self.state.guide.borrow_mut().draft = text;
    }

    pub fn use_prompt(&self, prompt: &str) {
        self.state.guide.borrow_mut().use_prompt(prompt);
        rerender();
    }

    /// Ignored while a reply is pending or the draft is blank.
    pub fn send(&self) {
        let Some(query) = self.state.guide.borrow_mut().begin() else {
            return;
        };
        log::info!("✨ [GUIDE] Question: {}", query.trim());
        rerender();

        let state = self.state.clone();
        Timeout::new(REPLY_DELAY_MS, move || {
            let index = pick_suggestion(js_sys::Math::random());
            state.guide.borrow_mut().finish(index);
            rerender();
        })
        .forget();
    }
}

fn rerender() {
    crate::rerender_app_with_type(UpdateType::Incremental(IncrementalUpdate::Guide));
}
