use serde::{Deserialize, Serialize};

/// Body of `POST {base}/generate-plan`. Every field travels as a string.
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug, Default)]
pub struct PlanRequest {
    pub budget: String,
    pub days: String,
    pub travelers: String,
    pub interests: String,
    pub accommodation: String,
    pub transport: String,
}

impl PlanRequest {
    /// Budget and duration are the only mandatory inputs.
    pub fn is_submittable(&self) -> bool {
        !self.budget.trim().is_empty() && !self.days.trim().is_empty()
    }

    pub fn set_field(&mut self, field: PlanField, value: String) {
        match field {
            PlanField::Budget => self.budget = value,
            PlanField::Days => self.days = value,
            PlanField::Travelers => self.travelers = value,
            PlanField::Interests => self.interests = value,
            PlanField::Accommodation => self.accommodation = value,
            PlanField::Transport => self.transport = value,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum PlanField {
    Budget,
    Days,
    Travelers,
    Interests,
    Accommodation,
    Transport,
}

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug, Default)]
pub struct PlanResponse {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
}

impl PlanResponse {
    /// Itinerary text, if the server actually produced one.
    pub fn itinerary(&self) -> Option<&str> {
        self.text.as_deref().filter(|t| !t.trim().is_empty())
    }
}

/// `(value, label)` pairs for the accommodation select.
pub const ACCOMMODATION_OPTIONS: &[(&str, &str)] = &[
    ("budget", "Budget Hotels"),
    ("mid-range", "Mid-range Hotels"),
    ("luxury", "Luxury Resorts"),
    ("homestay", "Local Homestays"),
];

pub const TRANSPORT_OPTIONS: &[(&str, &str)] = &[
    ("shared-taxi", "Shared Taxi"),
    ("private-car", "Private Car"),
    ("bike", "Motorbike"),
    ("trek", "Trekking"),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn requires_budget_and_days() {
        let mut req = PlanRequest::default();
        assert!(!req.is_submittable());
        req.set_field(PlanField::Budget, "20000".into());
        assert!(!req.is_submittable());
        req.set_field(PlanField::Days, "  ".into());
        assert!(!req.is_submittable());
        req.set_field(PlanField::Days, "4".into());
        assert!(req.is_submittable());
    }

    #[test]
    fn request_serializes_all_fields_as_strings() {
        let req = PlanRequest {
            budget: "15000".into(),
            days: "3".into(),
            ..Default::default()
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["budget"], "15000");
        assert_eq!(json["transport"], "");
        assert_eq!(json.as_object().unwrap().len(), 6);
    }

    #[test]
    fn response_without_text_has_no_itinerary() {
        let resp: PlanResponse = serde_json::from_str(r#"{"title":"Error"}"#).unwrap();
        assert!(resp.itinerary().is_none());
        let resp: PlanResponse = serde_json::from_str(r##"{"text":"# Day 1"}"##).unwrap();
        assert_eq!(resp.itinerary(), Some("# Day 1"));
    }
}
