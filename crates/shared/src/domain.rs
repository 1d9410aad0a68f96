use serde::{Deserialize, Serialize};

/// Free text describing how the user feels. Empty text is allowed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoodSubmission {
    pub text: String,
}

impl MoodSubmission {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prediction {
    pub detected_emotion: String,
    pub recommended_quote: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    pub name: String,
    pub artist: String,
    pub url: String,
    pub album_art: String,
}
