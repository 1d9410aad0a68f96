use std::{io, path::PathBuf, process::ExitCode, sync::Arc};

use anyhow::{Context, Result};
use clap::Parser;
use client_core::{
    HttpMoodBackend, MoodSubmissionController, PipelineOutcome, ViewBindings, LOGIN_PATH,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod config;
mod terminal;

use config::load_settings;
use terminal::TerminalNotifier;

/// Ask MoodMate for a quote and music that fit your mood.
#[derive(Parser, Debug)]
struct Args {
    /// Settings file; defaults to ./moodmate.toml when present.
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    server_url: Option<String>,
    /// Value for the Cookie header, e.g. `session=...` copied from a logged-in browser.
    #[arg(long)]
    session_cookie: Option<String>,
    #[arg(long)]
    reveal_delay_ms: Option<u64>,
    /// How you feel. Read from stdin when omitted.
    text: Option<String>,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();
    let args = Args::parse();

    let mut settings = load_settings(args.config.as_deref())?;
    if let Some(v) = args.server_url {
        settings.server_url = v;
    }
    if let Some(v) = args.session_cookie {
        settings.session_cookie = Some(v);
    }
    if let Some(v) = args.reveal_delay_ms {
        settings.reveal_delay_ms = v;
    }

    let text = match args.text {
        Some(text) => text,
        None => strip_line_ending(
            &io::read_to_string(io::stdin()).context("failed to read mood text from stdin")?,
        ),
    };

    let mut backend = HttpMoodBackend::new(&settings.server_url)
        .with_context(|| format!("invalid server url '{}'", settings.server_url))?;
    if let Some(cookie) = &settings.session_cookie {
        backend = backend.with_session_cookie(cookie.clone());
    }
    let login_url = backend.endpoint_url(LOGIN_PATH)?;

    let view = ViewBindings::in_memory();
    view.mood_text.set_value(&text);
    let controller = MoodSubmissionController::new(
        Arc::new(backend),
        view,
        Arc::new(TerminalNotifier::new(login_url)),
    )
    .with_reveal_delay(settings.reveal_delay());

    info!(server_url = %settings.server_url, "submitting mood");
    let outcome = controller.on_submit().await;
    print!("{}", terminal::render(controller.view()));

    Ok(exit_code(&outcome))
}

/// Drops the trailing newline a shell pipe leaves; inner whitespace is part of the mood.
fn strip_line_ending(raw: &str) -> String {
    raw.trim_end_matches(['\r', '\n']).to_string()
}

fn exit_code(outcome: &PipelineOutcome) -> ExitCode {
    match outcome {
        PipelineOutcome::Rendered { .. } => ExitCode::SUCCESS,
        PipelineOutcome::Notified(_) => ExitCode::FAILURE,
    }
}

#[cfg(test)]
mod tests {
    use client_core::NoticeKind;

    use super::*;

    #[test]
    fn rendered_outcome_exits_successfully() {
        let outcome = PipelineOutcome::Rendered {
            emotion: "joy".into(),
            tracks: 0,
        };
        assert_eq!(exit_code(&outcome), ExitCode::SUCCESS);
    }

    #[test]
    fn notified_outcome_exits_with_failure() {
        for notice in [NoticeKind::LoginPrompt, NoticeKind::GenericRetry] {
            assert_eq!(
                exit_code(&PipelineOutcome::Notified(notice)),
                ExitCode::FAILURE
            );
        }
    }

    #[test]
    fn strips_only_trailing_line_endings_from_stdin() {
        assert_eq!(strip_line_ending("feeling blue\n"), "feeling blue");
        assert_eq!(strip_line_ending("feeling blue\r\n\n"), "feeling blue");
        assert_eq!(strip_line_ending("  two\nlines  \n"), "  two\nlines  ");
        assert_eq!(strip_line_ending("\n"), "");
        assert_eq!(strip_line_ending(""), "");
    }
}
