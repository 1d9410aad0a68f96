use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    domain::{Prediction, Track},
    error::BackendRejection,
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictRequest {
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendRequest {
    pub emotion: String,
}

/// Raw `/predict` body. The backend uses the same object shape for success and
/// failure, so every field is optional until [`PredictResponse::into_reply`].
/// Echoed fields such as `input_text` are ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PredictResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detected_emotion: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommended_quote: Option<String>,
}

/// Raw `/recommend` body: either a track list or an object carrying `error`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecommendResponse {
    Tracks(Vec<Track>),
    Object {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        error: Option<String>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply<T> {
    Accepted(T),
    Rejected(BackendRejection),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShapeError {
    #[error("response is missing `{0}`")]
    MissingField(&'static str),
    #[error("expected a list of tracks")]
    NotATrackList,
}

impl PredictResponse {
    pub fn into_reply(self) -> Result<Reply<Prediction>, ShapeError> {
        if let Some(rejection) = BackendRejection::from_field(self.error) {
            return Ok(Reply::Rejected(rejection));
        }
        let detected_emotion = self
            .detected_emotion
            .ok_or(ShapeError::MissingField("detected_emotion"))?;
        let recommended_quote = self
            .recommended_quote
            .ok_or(ShapeError::MissingField("recommended_quote"))?;
        Ok(Reply::Accepted(Prediction {
            detected_emotion,
            recommended_quote,
        }))
    }
}

impl RecommendResponse {
    pub fn into_reply(self) -> Result<Reply<Vec<Track>>, ShapeError> {
        match self {
            Self::Tracks(tracks) => Ok(Reply::Accepted(tracks)),
            Self::Object { error } => BackendRejection::from_field(error)
                .map(Reply::Rejected)
                .ok_or(ShapeError::NotATrackList),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorBody;

    #[test]
    fn predict_error_wins_over_payload_fields() {
        let body: PredictResponse = serde_json::from_str(
            r#"{"error":"No text provided","detected_emotion":"joy","recommended_quote":"q"}"#,
        )
        .expect("decode");
        assert_eq!(
            body.into_reply(),
            Ok(Reply::Rejected(BackendRejection::new("No text provided")))
        );
    }

    #[test]
    fn predict_empty_error_is_not_a_rejection() {
        let body: PredictResponse = serde_json::from_str(
            r#"{"error":"","input_text":"meh","detected_emotion":"sadness","recommended_quote":"q"}"#,
        )
        .expect("decode");
        assert_eq!(
            body.into_reply(),
            Ok(Reply::Accepted(Prediction {
                detected_emotion: "sadness".into(),
                recommended_quote: "q".into(),
            }))
        );
    }

    #[test]
    fn predict_without_quote_is_malformed() {
        let body: PredictResponse =
            serde_json::from_str(r#"{"detected_emotion":"joy"}"#).expect("decode");
        assert_eq!(
            body.into_reply(),
            Err(ShapeError::MissingField("recommended_quote"))
        );
    }

    #[test]
    fn recommend_decodes_track_list_in_order() {
        let body: RecommendResponse = serde_json::from_str(
            r#"[{"name":"A","artist":"X","url":"u1","album_art":"a1"},
                {"name":"B","artist":"Y","url":"u2","album_art":"a2"}]"#,
        )
        .expect("decode");
        let Ok(Reply::Accepted(tracks)) = body.into_reply() else {
            panic!("expected tracks");
        };
        let names: Vec<_> = tracks.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, ["A", "B"]);
    }

    #[test]
    fn recommend_error_object_is_a_rejection() {
        let body: RecommendResponse =
            serde_json::from_str(r#"{"error":"User not logged in"}"#).expect("decode");
        assert_eq!(
            body.into_reply(),
            Ok(Reply::Rejected(BackendRejection::new("User not logged in")))
        );
    }

    #[test]
    fn error_body_decodes_as_rejection_for_both_endpoints() {
        let raw = serde_json::to_string(&ErrorBody::new("User not logged in")).expect("encode");

        let predict: PredictResponse = serde_json::from_str(&raw).expect("decode predict");
        let recommend: RecommendResponse = serde_json::from_str(&raw).expect("decode recommend");

        let expected = BackendRejection::new("User not logged in");
        assert_eq!(predict.into_reply(), Ok(Reply::Rejected(expected.clone())));
        assert_eq!(recommend.into_reply(), Ok(Reply::Rejected(expected)));
    }

    #[test]
    fn recommend_object_without_error_is_malformed() {
        let body: RecommendResponse = serde_json::from_str(r#"{}"#).expect("decode");
        assert_eq!(body.into_reply(), Err(ShapeError::NotATrackList));
    }

    #[test]
    fn recommend_track_missing_field_fails_to_decode() {
        let decoded = serde_json::from_str::<RecommendResponse>(
            r#"[{"name":"A","artist":"X","url":"u1"}]"#,
        );
        assert!(decoded.is_err());
    }
}
