//! View binding: the display regions the controller writes to, injected at construction.

use std::{
    collections::BTreeSet,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use shared::domain::Track;

use crate::error::NoticeKind;

pub const HIDDEN_CLASS: &str = "hidden";
pub const VISIBLE_CLASS: &str = "visible";
pub const TRACK_CLASS: &str = "track";
/// Link target that opens the track in a new browsing context.
pub const NEW_BROWSING_CONTEXT: &str = "_blank";

/// One rendered entry of the music list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackEntry {
    pub href: String,
    pub target: String,
    pub class_name: String,
    pub image_src: String,
    pub image_alt: String,
    pub name: String,
    pub artist: String,
}

impl TrackEntry {
    pub fn from_track(track: &Track) -> Self {
        Self {
            href: track.url.clone(),
            target: NEW_BROWSING_CONTEXT.to_string(),
            class_name: TRACK_CLASS.to_string(),
            image_src: track.album_art.clone(),
            image_alt: format!("Album art for {}", track.name),
            name: track.name.clone(),
            artist: track.artist.clone(),
        }
    }
}

/// Handle to a single display element.
pub trait Element: Send + Sync {
    fn text(&self) -> String;
    fn set_text(&self, text: &str);
    /// Current value of an input element.
    fn value(&self) -> String;
    fn set_value(&self, value: &str);
    fn add_class(&self, class: &str);
    fn remove_class(&self, class: &str);
    fn has_class(&self, class: &str) -> bool;
    fn is_disabled(&self) -> bool;
    fn set_disabled(&self, disabled: bool);
    fn clear_entries(&self);
    fn append_entry(&self, entry: TrackEntry);
    fn entries(&self) -> Vec<TrackEntry>;
}

/// Presents a failure notice to the user.
pub trait Notifier: Send + Sync {
    fn notify(&self, notice: NoticeKind);
}

#[derive(Debug, Default)]
struct ElementState {
    text: String,
    value: String,
    classes: BTreeSet<String>,
    disabled: bool,
    entries: Vec<TrackEntry>,
}

#[derive(Debug, Default)]
pub struct MemoryElement {
    state: Mutex<ElementState>,
}

impl MemoryElement {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_classes(classes: &[&str]) -> Self {
        let element = Self::new();
        for class in classes {
            element.add_class(class);
        }
        element
    }

    fn state(&self) -> MutexGuard<'_, ElementState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Element for MemoryElement {
    fn text(&self) -> String {
        self.state().text.clone()
    }

    fn set_text(&self, text: &str) {
        self.state().text = text.to_string();
    }

    fn value(&self) -> String {
        self.state().value.clone()
    }

    fn set_value(&self, value: &str) {
        self.state().value = value.to_string();
    }

    fn add_class(&self, class: &str) {
        self.state().classes.insert(class.to_string());
    }

    fn remove_class(&self, class: &str) {
        self.state().classes.remove(class);
    }

    fn has_class(&self, class: &str) -> bool {
        self.state().classes.contains(class)
    }

    fn is_disabled(&self) -> bool {
        self.state().disabled
    }

    fn set_disabled(&self, disabled: bool) {
        self.state().disabled = disabled;
    }

    fn clear_entries(&self) {
        self.state().entries.clear();
    }

    fn append_entry(&self, entry: TrackEntry) {
        self.state().entries.push(entry);
    }

    fn entries(&self) -> Vec<TrackEntry> {
        self.state().entries.clone()
    }
}

/// Element handles for the mood form and its two result regions.
#[derive(Clone)]
pub struct ViewBindings {
    pub mood_text: Arc<dyn Element>,
    pub submit_button: Arc<dyn Element>,
    pub button_text: Arc<dyn Element>,
    pub spinner: Arc<dyn Element>,
    pub result_container: Arc<dyn Element>,
    pub detected_emotion: Arc<dyn Element>,
    pub recommended_quote: Arc<dyn Element>,
    pub music_container: Arc<dyn Element>,
    pub music_list: Arc<dyn Element>,
}

impl ViewBindings {
    /// Initial page state: idle button, spinner and both result regions hidden.
    pub fn in_memory() -> Self {
        Self {
            mood_text: Arc::new(MemoryElement::new()),
            submit_button: Arc::new(MemoryElement::new()),
            button_text: Arc::new(MemoryElement::new()),
            spinner: Arc::new(MemoryElement::with_classes(&[HIDDEN_CLASS])),
            result_container: Arc::new(MemoryElement::with_classes(&[HIDDEN_CLASS])),
            detected_emotion: Arc::new(MemoryElement::new()),
            recommended_quote: Arc::new(MemoryElement::new()),
            music_container: Arc::new(MemoryElement::with_classes(&[HIDDEN_CLASS])),
            music_list: Arc::new(MemoryElement::new()),
        }
    }

    pub fn is_busy(&self) -> bool {
        self.submit_button.is_disabled() || !self.spinner.has_class(HIDDEN_CLASS)
    }

    pub fn result_shown(&self) -> bool {
        !self.result_container.has_class(HIDDEN_CLASS)
    }

    pub fn music_shown(&self) -> bool {
        !self.music_container.has_class(HIDDEN_CLASS)
    }
}
