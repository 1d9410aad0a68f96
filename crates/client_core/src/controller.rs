//! Submission pipeline: predict, recommend, render, with busy state held for the whole run.

use std::{sync::Arc, time::Duration};

use shared::domain::{MoodSubmission, Prediction, Track};
use tracing::{debug, error, info};

use crate::{
    error::{NoticeKind, PipelineError},
    view::{Notifier, TrackEntry, ViewBindings, HIDDEN_CLASS, VISIBLE_CLASS},
    MoodBackend, PREDICT_PATH, RECOMMEND_PATH,
};

/// Gap between unhiding the result region and marking it visible, so the transition runs.
pub const DEFAULT_REVEAL_DELAY: Duration = Duration::from_millis(10);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineOutcome {
    Rendered { emotion: String, tracks: usize },
    Notified(NoticeKind),
}

/// Holds the submit control in its busy state until dropped.
struct BusyGuard<'a> {
    view: &'a ViewBindings,
}

impl<'a> BusyGuard<'a> {
    fn acquire(view: &'a ViewBindings) -> Self {
        view.button_text.add_class(HIDDEN_CLASS);
        view.spinner.remove_class(HIDDEN_CLASS);
        view.submit_button.set_disabled(true);
        Self { view }
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.view.button_text.remove_class(HIDDEN_CLASS);
        self.view.spinner.add_class(HIDDEN_CLASS);
        self.view.submit_button.set_disabled(false);
    }
}

/// Drives one page's mood form.
///
/// Overlapping submissions are not prevented beyond disabling the submit
/// control; there is no cancellation and no request timeout.
pub struct MoodSubmissionController {
    backend: Arc<dyn MoodBackend>,
    view: ViewBindings,
    notifier: Arc<dyn Notifier>,
    reveal_delay: Duration,
}

impl MoodSubmissionController {
    pub fn new(
        backend: Arc<dyn MoodBackend>,
        view: ViewBindings,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            backend,
            view,
            notifier,
            reveal_delay: DEFAULT_REVEAL_DELAY,
        }
    }

    pub fn with_reveal_delay(mut self, reveal_delay: Duration) -> Self {
        self.reveal_delay = reveal_delay;
        self
    }

    pub fn view(&self) -> &ViewBindings {
        &self.view
    }

    /// Submits whatever is currently in the mood text input.
    pub async fn on_submit(&self) -> PipelineOutcome {
        let submission = MoodSubmission::new(self.view.mood_text.value());
        self.submit(submission).await
    }

    /// Runs the whole pipeline. Failures are reported through the notifier, never returned.
    pub async fn submit(&self, submission: MoodSubmission) -> PipelineOutcome {
        let _busy = BusyGuard::acquire(&self.view);
        self.view.music_container.add_class(HIDDEN_CLASS);
        self.view.music_list.clear_entries();

        match self.run_pipeline(&submission).await {
            Ok(outcome) => outcome,
            Err(err) => {
                error!(error = %err, "mood submission failed");
                let notice = err.notice();
                self.notifier.notify(notice);
                PipelineOutcome::Notified(notice)
            }
        }
    }

    async fn run_pipeline(
        &self,
        submission: &MoodSubmission,
    ) -> Result<PipelineOutcome, PipelineError> {
        let reply = self.backend.predict(submission).await?.into_reply();
        let prediction = PipelineError::settle(PREDICT_PATH, reply)?;
        self.render_prediction(&prediction);

        let reply = self
            .backend
            .recommend(&prediction.detected_emotion)
            .await?
            .into_reply();
        let tracks = PipelineError::settle(RECOMMEND_PATH, reply)?;
        self.render_tracks(&tracks);

        info!(
            emotion = %prediction.detected_emotion,
            tracks = tracks.len(),
            "rendered mood recommendations"
        );
        Ok(PipelineOutcome::Rendered {
            emotion: prediction.detected_emotion,
            tracks: tracks.len(),
        })
    }

    fn render_prediction(&self, prediction: &Prediction) {
        self.view
            .detected_emotion
            .set_text(&prediction.detected_emotion);
        self.view
            .recommended_quote
            .set_text(&prediction.recommended_quote);
        self.view.result_container.remove_class(HIDDEN_CLASS);

        let container = Arc::clone(&self.view.result_container);
        let delay = self.reveal_delay;
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            container.add_class(VISIBLE_CLASS);
        });
    }

    fn render_tracks(&self, tracks: &[Track]) {
        for track in tracks {
            self.view.music_list.append_entry(TrackEntry::from_track(track));
        }
        self.view.music_container.remove_class(HIDDEN_CLASS);
        debug!(count = tracks.len(), "music list rendered");
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
