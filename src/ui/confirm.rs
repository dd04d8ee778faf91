//! Confirmation dialogs and result notices
//!
//! Every destructive action goes through a [`Confirmer`]. The console
//! implementation prompts on the terminal; [`ScriptedConfirmer`] answers from
//! a queue for tests and unattended runs.

use std::collections::VecDeque;
use std::io::{BufRead, Write};
use std::sync::Mutex;
use crate::utils::errors::Result;

/// Question asked before a mutation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dialog {
    pub title: String,
    pub text: String,
    pub confirm_label: String,
    pub cancel_label: String,
}

impl Dialog {
    pub fn new(title: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            text: text.into(),
            confirm_label: "Yes".to_string(),
            cancel_label: "Cancel".to_string(),
        }
    }

    /// Standard delete prompt
    pub fn delete(title: impl Into<String>) -> Self {
        Self {
            confirm_label: "Yes, delete".to_string(),
            ..Self::new(title, "This action cannot be undone.")
        }
    }

    pub fn with_confirm_label(mut self, label: impl Into<String>) -> Self {
        self.confirm_label = label.into();
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// Result shown after a mutation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub title: String,
    pub text: String,
}

impl Notice {
    pub fn success(title: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            title: title.into(),
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            title: "Error".to_string(),
            text: text.into(),
        }
    }
}

/// Dialog backend
pub trait Confirmer: Send + Sync {
    /// Ask the question; `Ok(true)` means the user confirmed
    fn confirm(&self, dialog: &Dialog) -> Result<bool>;

    /// Show the outcome of an action
    fn notify(&self, notice: &Notice);
}

/// Terminal prompt reading `y`/`n` from stdin
#[derive(Debug, Clone, Default)]
pub struct ConsoleConfirmer {
    assume_yes: bool,
}

impl ConsoleConfirmer {
    pub fn new(assume_yes: bool) -> Self {
        Self { assume_yes }
    }

    fn ask(&self, dialog: &Dialog, input: &mut impl BufRead, output: &mut impl Write) -> Result<bool> {
        writeln!(output, "{}", dialog.title)?;
        writeln!(output, "{}", dialog.text)?;
        write!(output, "[y] {} / [N] {}: ", dialog.confirm_label, dialog.cancel_label)?;
        output.flush()?;

        let mut answer = String::new();
        input.read_line(&mut answer)?;
        Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
    }
}

impl Confirmer for ConsoleConfirmer {
    fn confirm(&self, dialog: &Dialog) -> Result<bool> {
        if self.assume_yes {
            return Ok(true);
        }
        let stdin = std::io::stdin();
        let stderr = std::io::stderr();
        self.ask(dialog, &mut stdin.lock(), &mut stderr.lock())
    }

    fn notify(&self, notice: &Notice) {
        match notice.kind {
            NoticeKind::Success => println!("✔ {}: {}", notice.title, notice.text),
            NoticeKind::Error => eprintln!("✘ {}: {}", notice.title, notice.text),
        }
    }
}

/// Answers dialogs from a pre-loaded queue and records everything shown
#[derive(Debug, Default)]
pub struct ScriptedConfirmer {
    answers: Mutex<VecDeque<bool>>,
    asked: Mutex<Vec<Dialog>>,
    notices: Mutex<Vec<Notice>>,
}

impl ScriptedConfirmer {
    pub fn new(answers: impl IntoIterator<Item = bool>) -> Self {
        Self {
            answers: Mutex::new(answers.into_iter().collect()),
            ..Default::default()
        }
    }

    pub fn asked(&self) -> Vec<Dialog> {
        self.asked.lock().map(|a| a.clone()).unwrap_or_default()
    }

    pub fn notices(&self) -> Vec<Notice> {
        self.notices.lock().map(|n| n.clone()).unwrap_or_default()
    }
}

impl Confirmer for ScriptedConfirmer {
    fn confirm(&self, dialog: &Dialog) -> Result<bool> {
        if let Ok(mut asked) = self.asked.lock() {
            asked.push(dialog.clone());
        }
        // An exhausted script declines
        Ok(self
            .answers
            .lock()
            .ok()
            .and_then(|mut a| a.pop_front())
            .unwrap_or(false))
    }

    fn notify(&self, notice: &Notice) {
        if let Ok(mut notices) = self.notices.lock() {
            notices.push(notice.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_console_prompt_parsing() {
        let confirmer = ConsoleConfirmer::new(false);
        let dialog = Dialog::delete("Delete event?");

        let mut out = Vec::new();
        assert!(confirmer.ask(&dialog, &mut Cursor::new("Y\n"), &mut out).unwrap());
        let shown = String::from_utf8(out).unwrap();
        assert!(shown.contains("This action cannot be undone."));
        assert!(shown.contains("Yes, delete"));

        let mut out = Vec::new();
        assert!(!confirmer.ask(&dialog, &mut Cursor::new("\n"), &mut out).unwrap());
        assert!(!confirmer.ask(&dialog, &mut Cursor::new("nope\n"), &mut out).unwrap());
    }

    #[test]
    fn test_assume_yes_skips_prompt() {
        assert!(ConsoleConfirmer::new(true).confirm(&Dialog::delete("x")).unwrap());
    }

    #[test]
    fn test_scripted_answers_in_order() {
        let confirmer = ScriptedConfirmer::new([true, false]);
        assert!(confirmer.confirm(&Dialog::delete("a")).unwrap());
        assert!(!confirmer.confirm(&Dialog::delete("b")).unwrap());
        assert!(!confirmer.confirm(&Dialog::delete("c")).unwrap());
        assert_eq!(confirmer.asked().len(), 3);

        confirmer.notify(&Notice::error("nope"));
        assert_eq!(confirmer.notices()[0].kind, NoticeKind::Error);
    }
}
