// ============================================================================
// SPEECH - text-to-speech audio guides
// ============================================================================

use std::cell::Cell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{SpeechSynthesis, SpeechSynthesisUtterance, SpeechSynthesisVoice};

pub const DEFAULT_SPEECH_LANG: &str = "en-US";

/// Index of the best voice for `lang`: exact match, then prefix match,
/// then base-language match, then any English voice.
pub fn choose_voice(voice_langs: &[String], lang: &str) -> Option<usize> {
    let wanted = lang.trim().to_lowercase();
    let langs: Vec<String> = voice_langs.iter().map(|l| l.to_lowercase()).collect();

    let base = |l: &str| l.split(['-', '_']).next().unwrap_or("").to_string();

    langs
        .iter()
        .position(|l| *l == wanted)
        .or_else(|| langs.iter().position(|l| !wanted.is_empty() && l.starts_with(&wanted)))
        .or_else(|| langs.iter().position(|l| !wanted.is_empty() && base(l) == wanted))
        .or_else(|| langs.iter().position(|l| l.starts_with("en")))
}

/// `hi` -> `hi-HI`; longer codes pass through; empty -> `en-US`.
pub fn normalize_lang(lang: &str) -> String {
    let lang = lang.trim();
    if lang.is_empty() {
        return DEFAULT_SPEECH_LANG.to_string();
    }
    if lang.len() == 2 && lang.chars().all(|c| c.is_ascii_alphabetic()) {
        let lower = lang.to_ascii_lowercase();
        return format!("{}-{}", lower, lower.to_ascii_uppercase());
    }
    lang.to_string()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SpeechStatus {
    #[default]
    Idle,
    Speaking,
    Paused,
}

/// Counts utterances so a late `end` from a replaced one is ignored.
#[derive(Debug, Clone, Default)]
struct Generation(Rc<Cell<u64>>);

impl Generation {
    fn advance(&self) -> u64 {
        let next = self.0.get().wrapping_add(1);
        self.0.set(next);
        next
    }

    fn is_current(&self, generation: u64) -> bool {
        self.0.get() == generation
    }
}

/// The utterance being spoken and the handlers attached to it. Handlers are
/// detached before the closures are dropped: `cancel()` queues `end`/`error`
/// events that would otherwise call into freed closures.
struct ActiveUtterance {
    utterance: SpeechSynthesisUtterance,
    _on_end: Closure<dyn FnMut()>,
    _on_error: Closure<dyn FnMut()>,
}

impl ActiveUtterance {
    fn detach(&self) {
        self.utterance.set_onend(None);
        self.utterance.set_onerror(None);
    }
}

/// Drives the browser speech engine for one detail view at a time.
pub struct SpeechService {
    synth: Option<SpeechSynthesis>,
    status: Rc<Cell<SpeechStatus>>,
    generation: Generation,
    current: Option<ActiveUtterance>,
}

impl SpeechService {
    pub fn new() -> Self {
        Self {
            synth: web_sys::window().and_then(|w| w.speech_synthesis().ok()),
            status: Rc::new(Cell::new(SpeechStatus::Idle)),
            generation: Generation::default(),
            current: None,
        }
    }

    pub fn is_supported(&self) -> bool {
        self.synth.is_some()
    }

    pub fn status(&self) -> SpeechStatus {
        self.status.get()
    }

    /// Speak `text`, cancelling whatever is playing. `on_finished` runs when
    /// the utterance ends on its own.
    pub fn play<F>(&mut self, text: &str, lang: &str, on_finished: F)
    where
        F: Fn() + 'static,
    {
        let Some(synth) = self.synth.clone() else {
            log::warn!("🔇 [SPEECH] Speech synthesis not supported");
            return;
        };
        let text = text.trim();
        if text.is_empty() {
            return;
        }
        self.release_current();
        synth.cancel();

        let Ok(utterance) = SpeechSynthesisUtterance::new_with_text(text) else {
            return;
        };

        let voices: Vec<SpeechSynthesisVoice> = synth
            .get_voices()
            .iter()
            .filter_map(|v| v.dyn_into::<SpeechSynthesisVoice>().ok())
            .collect();
        let voice_langs: Vec<String> = voices.iter().map(|v| v.lang()).collect();

        match choose_voice(&voice_langs, lang).and_then(|i| voices.get(i)) {
            Some(voice) => {
                utterance.set_voice(Some(voice));
                utterance.set_lang(&voice.lang());
            }
            None => utterance.set_lang(&normalize_lang(lang)),
        }

        let mine = self.generation.advance();
        let on_finished = Rc::new(on_finished);
        let finish = {
            let status = self.status.clone();
            let generation = self.generation.clone();
            move |what: &str| {
                if !generation.is_current(mine) {
                    return;
                }
                log::info!("🔊 [SPEECH] Utterance {}", what);
                status.set(SpeechStatus::Idle);
                on_finished();
            }
        };
        let on_end = {
            let finish = finish.clone();
            Closure::wrap(Box::new(move || finish("ended")) as Box<dyn FnMut()>)
        };
        let on_error = Closure::wrap(Box::new(move || finish("failed")) as Box<dyn FnMut()>);
        utterance.set_onend(Some(on_end.as_ref().unchecked_ref()));
        utterance.set_onerror(Some(on_error.as_ref().unchecked_ref()));

        synth.speak(&utterance);
        self.status.set(SpeechStatus::Speaking);
        log::info!("🔊 [SPEECH] Speaking {} chars ({})", text.len(), utterance.lang());
        self.current = Some(ActiveUtterance {
            utterance,
            _on_end: on_end,
            _on_error: on_error,
        });
    }

    fn release_current(&mut self) {
        self.generation.advance();
        if let Some(current) = self.current.take() {
            current.detach();
        }
    }

    pub fn pause(&self) {
        if let Some(synth) = &self.synth {
            if self.status.get() == SpeechStatus::Speaking {
                synth.pause();
                self.status.set(SpeechStatus::Paused);
            }
        }
    }

    pub fn resume(&self) {
        if let Some(synth) = &self.synth {
            if self.status.get() == SpeechStatus::Paused {
                synth.resume();
                self.status.set(SpeechStatus::Speaking);
            }
        }
    }

    /// Safe when nothing is speaking.
    pub fn stop(&mut self) {
        self.release_current();
        if let Some(synth) = &self.synth {
            if synth.speaking() || synth.pending() {
                synth.cancel();
            }
        }
        self.status.set(SpeechStatus::Idle);
    }
}

impl Default for SpeechService {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn langs(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn exact_match_wins() {
        let voices = langs(&["en-US", "hi-IN", "hi"]);
        assert_eq!(choose_voice(&voices, "hi"), Some(2));
        assert_eq!(choose_voice(&voices, "HI-in"), Some(1));
    }

    #[test]
    fn prefix_then_base_then_english() {
        assert_eq!(choose_voice(&langs(&["en-GB", "ne-NP"]), "ne"), Some(1));
        assert_eq!(choose_voice(&langs(&["en-GB", "ne_NP"]), "ne"), Some(1));
        assert_eq!(choose_voice(&langs(&["fr-FR", "en-IN"]), "bo"), Some(1));
        assert_eq!(choose_voice(&langs(&["fr-FR"]), "bo"), None);
        assert_eq!(choose_voice(&[], "en"), None);
    }

    #[test]
    fn replaced_generation_is_stale() {
        let generation = Generation::default();
        let first = generation.advance();
        assert!(generation.is_current(first));
        let second = generation.advance();
        assert!(!generation.is_current(first));
        assert!(generation.is_current(second));

        let shared = generation.clone();
        shared.advance();
        assert!(!generation.is_current(second));
    }

    #[test]
    fn two_letter_codes_normalize() {
        assert_eq!(normalize_lang("hi"), "hi-HI");
        assert_eq!(normalize_lang("en-GB"), "en-GB");
        assert_eq!(normalize_lang(""), "en-US");
    }
}
