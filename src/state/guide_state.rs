// ============================================================================
// GUIDE STATE - trip guide conversation
// ============================================================================

use crate::models::TRIP_SUGGESTIONS;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuideAuthor {
    Traveler,
    Guide,
}

#[derive(Clone, Debug, PartialEq)]
pub struct GuideMessage {
    pub author: GuideAuthor,
    pub text: String,
}

#[derive(Clone, Debug, Default)]
pub struct GuideState {
    pub draft: String,
    pub messages: Vec<GuideMessage>,
    pub generating: bool,
    /// Index into `TRIP_SUGGESTIONS` of the latest recommendation
    pub suggestion: Option<usize>,
}

impl GuideState {
    pub fn can_send(&self) -> bool {
        !self.generating && !self.draft.trim().is_empty()
    }

    /// Quick prompts replace the draft; they are not sent.
    pub fn use_prompt(&mut self, prompt: &str) {
        self.draft = prompt.to_string();
    }

    /// Post the draft. `None` when it is blank or a reply is pending.
    pub fn begin(&mut self) -> Option<String> {
        if !self.can_send() {
            return None;
        }
        let query = self.draft.clone();
        self.messages.push(GuideMessage {
            author: GuideAuthor::Traveler,
            text: query.clone(),
        });
        self.generating = true;
        Some(query)
    }

    /// Answer with the suggestion at `index` and clear the draft.
    pub fn finish(&mut self, index: usize) {
        self.generating = false;
        let Some(suggestion) = TRIP_SUGGESTIONS.get(index) else {
            return;
        };
        self.suggestion = Some(index);
        self.messages.push(GuideMessage {
            author: GuideAuthor::Guide,
            text: suggestion.reply(),
        });
        self.draft.clear();
    }
}

/// Map `random` in `[0, 1)` to a suggestion index.
pub fn pick_suggestion(random: f64) -> usize {
    let len = TRIP_SUGGESTIONS.len();
    let index = (random.clamp(0.0, 1.0) * len as f64).floor() as usize;
    index.min(len.saturating_sub(1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_draft_is_not_sent() {
        let mut guide = GuideState::default();
        assert_eq!(guide.begin(), None);
        guide.draft = "   \n".to_string();
        assert_eq!(guide.begin(), None);
        assert!(guide.messages.is_empty());
    }

    #[test]
    fn one_question_at_a_time() {
        let mut guide = GuideState::default();
        guide.use_prompt("Best monasteries for photography");
        assert_eq!(guide.begin().as_deref(), Some("Best monasteries for photography"));
        assert!(guide.generating);
        assert_eq!(guide.begin(), None);
        assert_eq!(guide.messages.len(), 1);
    }

    #[test]
    fn finish_appends_reply_and_clears_draft() {
        let mut guide = GuideState::default();
        guide.draft = "Festival season recommendations".to_string();
        guide.begin();
        guide.finish(1);
        assert!(!guide.generating);
        assert!(guide.draft.is_empty());
        assert_eq!(guide.suggestion, Some(1));
        let reply = &guide.messages[1];
        assert_eq!(reply.author, GuideAuthor::Guide);
        assert!(reply.text.contains("Complete Monastery Circuit"));
    }

    #[test]
    fn pick_stays_in_range() {
        assert_eq!(pick_suggestion(0.0), 0);
        assert_eq!(pick_suggestion(0.5), 1);
        assert_eq!(pick_suggestion(0.999), TRIP_SUGGESTIONS.len() - 1);
        assert_eq!(pick_suggestion(1.0), TRIP_SUGGESTIONS.len() - 1);
        assert_eq!(pick_suggestion(f64::NAN), 0);
    }
}
