//! Terminal presentation of the in-memory page state.

use std::fmt::Write as _;

use client_core::{NoticeKind, Notifier, ViewBindings};

/// Prints failure notices on stderr.
pub struct TerminalNotifier {
    login_url: String,
}

impl TerminalNotifier {
    pub fn new(login_url: impl Into<String>) -> Self {
        Self {
            login_url: login_url.into(),
        }
    }

    fn notice_lines(&self, notice: NoticeKind) -> Vec<String> {
        let mut lines = vec![notice.message().to_string()];
        if notice == NoticeKind::LoginPrompt {
            lines.push(format!(
                "Sign in at {} and pass the session cookie with --session-cookie.",
                self.login_url
            ));
        }
        lines
    }
}

impl Notifier for TerminalNotifier {
    fn notify(&self, notice: NoticeKind) {
        for line in self.notice_lines(notice) {
            eprintln!("{line}");
        }
    }
}

/// Renders whichever regions the controller left revealed.
pub fn render(view: &ViewBindings) -> String {
    let mut out = String::new();
    if view.result_shown() {
        let _ = writeln!(out, "Detected emotion: {}", view.detected_emotion.text());
        let _ = writeln!(out, "Quote: {}", view.recommended_quote.text());
    }
    if view.music_shown() {
        let entries = view.music_list.entries();
        if entries.is_empty() {
            let _ = writeln!(out, "No tracks found.");
        } else {
            let _ = writeln!(out, "Recommended tracks:");
        }
        for (i, entry) in entries.iter().enumerate() {
            let _ = writeln!(out, "{:>2}. {} - {}", i + 1, entry.name, entry.artist);
            let _ = writeln!(out, "    {}", entry.href);
        }
    }
    out
}
