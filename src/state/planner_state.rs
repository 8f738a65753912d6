use crate::error::AppError;
use crate::models::{PlanField, PlanRequest, PlanResponse};

#[derive(Debug, Clone, PartialEq)]
pub enum PlanStatus {
    Idle,
    Generating,
    Ready { title: Option<String>, text: String },
    Failed(String),
}

/// Trip planner form and request lifecycle.
/// Idle -> Generating -> Ready | Failed, and back to Idle on user action.
#[derive(Debug, Clone)]
pub struct PlannerState {
    pub form: PlanRequest,
    pub status: PlanStatus,
    request_seq: u64,
}

impl Default for PlannerState {
    fn default() -> Self {
        Self {
            form: PlanRequest::default(),
            status: PlanStatus::Idle,
            request_seq: 0,
        }
    }
}

impl PlannerState {
    pub fn set_field(&mut self, field: PlanField, value: String) {
        self.form.set_field(field, value);
    }

    pub fn is_generating(&self) -> bool {
        matches!(self.status, PlanStatus::Generating)
    }

    pub fn can_submit(&self) -> bool {
        self.form.is_submittable() && !self.is_generating()
    }

    /// Move to `Generating`, returning the ticket and the body to send.
    pub fn begin(&mut self) -> Option<(u64, PlanRequest)> {
        if !self.can_submit() {
            return None;
        }
        self.request_seq += 1;
        self.status = PlanStatus::Generating;
        Some((self.request_seq, self.form.clone()))
    }

    /// Apply a finished request. Results for an outdated ticket are ignored.
    pub fn complete(&mut self, ticket: u64, result: Result<PlanResponse, AppError>) -> bool {
        if ticket != self.request_seq || !self.is_generating() {
            return false;
        }
        self.status = match result {
            Ok(response) => match response.itinerary() {
                Some(text) => PlanStatus::Ready {
                    title: response.title.clone(),
                    text: text.to_string(),
                },
                None => PlanStatus::Failed("The planner returned no itinerary.".to_string()),
            },
            Err(e) => PlanStatus::Failed(e.to_string()),
        };
        true
    }

    /// "New plan" and "Try again". The form is kept for editing.
    pub fn reset(&mut self) {
        self.request_seq += 1;
        self.status = PlanStatus::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ready_form() -> PlannerState {
        let mut state = PlannerState::default();
        state.set_field(PlanField::Budget, "25000".into());
        state.set_field(PlanField::Days, "5".into());
        state
    }

    #[test]
    fn cannot_begin_without_budget_and_days() {
        let mut state = PlannerState::default();
        assert!(state.begin().is_none());
        assert_eq!(state.status, PlanStatus::Idle);
    }

    #[test]
    fn success_renders_plan() {
        let mut state = ready_form();
        let (ticket, body) = state.begin().unwrap();
        assert_eq!(body.days, "5");
        assert!(state.is_generating());
        assert!(state.begin().is_none());

        let response = PlanResponse {
            title: None,
            text: Some("# 5-Day Tour".into()),
        };
        assert!(state.complete(ticket, Ok(response)));
        assert_eq!(
            state.status,
            PlanStatus::Ready {
                title: None,
                text: "# 5-Day Tour".into()
            }
        );
    }

    #[test]
    fn failure_is_retryable() {
        let mut state = ready_form();
        let (ticket, _) = state.begin().unwrap();
        let failure = AppError::PlanGenerationFailure("HTTP 502: Bad Gateway".into());
        state.complete(ticket, Err(failure));
        assert_eq!(
            state.status,
            PlanStatus::Failed("trip plan generation failed: HTTP 502: Bad Gateway".into())
        );

        state.reset();
        assert_eq!(state.status, PlanStatus::Idle);
        assert!(state.begin().is_some());
    }

    #[test]
    fn missing_text_counts_as_failure() {
        let mut state = ready_form();
        let (ticket, _) = state.begin().unwrap();
        state.complete(ticket, Ok(PlanResponse::default()));
        assert!(matches!(state.status, PlanStatus::Failed(_)));
    }

    #[test]
    fn outdated_ticket_is_ignored() {
        let mut state = ready_form();
        let (old, _) = state.begin().unwrap();
        state.reset();
        let (current, _) = state.begin().unwrap();
        assert!(!state.complete(old, Ok(PlanResponse::default())));
        assert!(state.is_generating());
        assert!(state.complete(current, Err(AppError::PlanGenerationFailure("x".into()))));
    }
}
