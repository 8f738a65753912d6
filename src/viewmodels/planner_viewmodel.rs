// ============================================================================
// PLANNER VIEWMODEL - submits the trip plan request
// ============================================================================

use wasm_bindgen_futures::spawn_local;

use crate::services::ApiClient;
use crate::state::{AppState, IncrementalUpdate, UpdateType};

#[derive(Clone)]
pub struct PlannerViewModel {
    state: AppState,
    api: ApiClient,
}

impl PlannerViewModel {
    pub fn new(state: AppState) -> Self {
        Self {
            state,
            api: ApiClient::new(),
        }
    }

    /// Ignored while a request is in flight or the form is incomplete.
    pub fn submit(&self) {
        let Some((ticket, body)) = self.state.planner.borrow_mut().begin() else {
            return;
        };
        log::info!("✨ [PLANNER] Requesting a {}-day plan", body.days.trim());
        rerender();

        let vm = self.clone();
        spawn_local(async move {
            let result = vm.api.generate_plan(&body).await;
            if let Err(e) = &result {
                log::error!("❌ [PLANNER] {}", e);
            }
            if vm.state.planner.borrow_mut().complete(ticket, result) {
                rerender();
            }
        });
    }

    /// "New plan" and "Try again".
    pub fn reset(&self) {
        self.state.planner.borrow_mut().reset();
        rerender();
    }
}

fn rerender() {
    crate::rerender_app_with_type(UpdateType::Incremental(IncrementalUpdate::Planner));
}
