// ============================================================================
// PLAYLIST VIEWMODEL - drives one <audio> element for the curated tracks
// ============================================================================

use std::cell::Cell;
use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::HtmlAudioElement;

use crate::error::js_error_message;
use crate::models::AUDIO_TRACKS;
use crate::state::{AppState, IncrementalUpdate, TrackEnd, UpdateType};

#[derive(Clone)]
pub struct PlaylistViewModel {
    state: AppState,
    audio: Option<HtmlAudioElement>,
    /// (elapsed, duration) in seconds
    position: Rc<Cell<(f64, f64)>>,
    /// Set while the user drags the seek bar
    seeking: Rc<Cell<bool>>,
    listening: Rc<Cell<bool>>,
}

impl PlaylistViewModel {
    pub fn new(state: AppState) -> Self {
        let audio = HtmlAudioElement::new().ok();
        if audio.is_none() {
            log::warn!("🔇 [AUDIO] <audio> not available");
        }
        Self {
            state,
            audio,
            position: Rc::new(Cell::new((0.0, 0.0))),
            seeking: Rc::new(Cell::new(false)),
            listening: Rc::new(Cell::new(false)),
        }
    }

    pub fn position(&self) -> (f64, f64) {
        self.position.get()
    }

    pub fn is_seeking(&self) -> bool {
        self.seeking.get()
    }

    /// Attach media listeners. Only the first call registers anything.
    pub fn start(&self) {
        if self.listening.replace(true) {
            return;
        }
        let Some(audio) = &self.audio else {
            return;
        };
        self.load_current(false);
        self.apply_volume();

        let on_time = Closure::wrap(Box::new({
            let audio = audio.clone();
            let position = self.position.clone();
            move || {
                position.set((audio.current_time(), audio.duration()));
                crate::rerender_app_with_type(UpdateType::Incremental(
                    IncrementalUpdate::PlaylistProgress,
                ));
            }
        }) as Box<dyn FnMut()>);

        let on_ended = Closure::wrap(Box::new({
            let vm = self.clone();
            move || vm.on_track_end()
        }) as Box<dyn FnMut()>);

        for event in ["timeupdate", "loadedmetadata"] {
            let _ = audio
                .add_event_listener_with_callback(event, on_time.as_ref().unchecked_ref());
        }
        let _ =
            audio.add_event_listener_with_callback("ended", on_ended.as_ref().unchecked_ref());

        // The element lives as long as the app
        on_time.forget();
        on_ended.forget();
    }

    fn load_current(&self, autoplay: bool) {
        let Some(audio) = &self.audio else {
            return;
        };
        let index = self.state.playlist.borrow().current;
        let Some(track) = AUDIO_TRACKS.get(index) else {
            return;
        };
        audio.set_src(track.url);
        self.position.set((0.0, 0.0));
        if autoplay {
            self.play();
        }
    }

    fn play(&self) {
        let Some(audio) = &self.audio else {
            return;
        };
        self.state.playlist.borrow_mut().playing = true;
        match audio.play() {
            Ok(promise) => {
                let state = self.state.clone();
                spawn_local(async move {
                    if let Err(e) = JsFuture::from(promise).await {
                        log::warn!("⚠️ [AUDIO] Playback refused: {}", js_error_message(&e));
                        state.playlist.borrow_mut().playing = false;
                        rerender();
                    }
                });
            }
            Err(e) => {
                log::warn!("⚠️ [AUDIO] Playback failed: {}", js_error_message(&e));
                self.state.playlist.borrow_mut().playing = false;
            }
        }
    }

    fn pause(&self) {
        if let Some(audio) = &self.audio {
            let _ = audio.pause();
        }
        self.state.playlist.borrow_mut().playing = false;
    }

    pub fn toggle_play(&self) {
        let playing = self.state.playlist.borrow().playing;
        if playing {
            self.pause();
        } else {
            self.play();
        }
        rerender();
    }

    pub fn next(&self) {
        self.state.playlist.borrow_mut().next(js_sys::Math::random());
        self.change_track();
    }

    pub fn previous(&self) {
        self.state.playlist.borrow_mut().previous();
        self.change_track();
    }

    pub fn select(&self, index: usize) {
        self.state.playlist.borrow_mut().select(index);
        self.change_track();
    }

    fn change_track(&self) {
        let playing = self.state.playlist.borrow().playing;
        self.load_current(playing);
        rerender();
    }

    fn on_track_end(&self) {
        let end = self.state.playlist.borrow_mut().on_track_end(js_sys::Math::random());
        match end {
            TrackEnd::Replay => {
                if let Some(audio) = &self.audio {
                    audio.set_current_time(0.0);
                }
                self.play();
            }
            TrackEnd::Advance(_) => self.load_current(true),
        }
        rerender();
    }

    pub fn toggle_shuffle(&self) {
        let mut playlist = self.state.playlist.borrow_mut();
        playlist.shuffle = !playlist.shuffle;
        drop(playlist);
        rerender();
    }

    pub fn toggle_repeat(&self) {
        let mut playlist = self.state.playlist.borrow_mut();
        playlist.repeat = !playlist.repeat;
        drop(playlist);
        rerender();
    }

    pub fn toggle_mute(&self) {
        let mut playlist = self.state.playlist.borrow_mut();
        playlist.muted = !playlist.muted;
        drop(playlist);
        self.apply_volume();
        rerender();
    }

    pub fn set_volume(&self, volume: u32) {
        {
            let mut playlist = self.state.playlist.borrow_mut();
            playlist.volume = volume.min(100);
            playlist.muted = false;
        }
        self.apply_volume();
    }

    fn apply_volume(&self) {
        if let Some(audio) = &self.audio {
            audio.set_volume(self.state.playlist.borrow().output_volume());
        }
    }

    pub fn begin_seek(&self) {
        self.seeking.set(true);
    }

    pub fn seek(&self, seconds: f64) {
        self.seeking.set(false);
        if let Some(audio) = &self.audio {
            if seconds.is_finite() && seconds >= 0.0 {
                audio.set_current_time(seconds);
            }
        }
    }
}

fn rerender() {
    crate::rerender_app_with_type(UpdateType::Incremental(IncrementalUpdate::Playlist));
}
