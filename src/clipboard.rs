//! Clipboard Access
//!
//! Copying is the only operation in promptbox that leaves the process. It is
//! fire-and-forget: [`BackgroundClipboard`] queues the text to a worker
//! thread and returns immediately. Whatever happens afterwards is logged and
//! reported as a [`CopyOutcome`] the UI may show, but never feeds back into
//! catalog state.

use crate::error::{PromptBoxError, Result};
use flume::{Receiver, Sender};
use std::io::{ErrorKind, Write};
use std::process::{Command, Stdio};
use std::thread;

/// Host clipboard capability
pub trait Clipboard {
    fn copy(&self, text: &str) -> Result<()>;
}

/// Writes to the system clipboard through the platform's command-line tool.
#[derive(Debug, Clone, Default)]
pub struct SystemClipboard {
    /// Overrides the platform defaults when set (program followed by args).
    command: Option<Vec<String>>,
}

impl SystemClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_command(command: Vec<String>) -> Self {
        Self {
            command: if command.is_empty() {
                None
            } else {
                Some(command)
            },
        }
    }

    fn candidates(&self) -> Vec<Vec<String>> {
        if let Some(command) = &self.command {
            return vec![command.clone()];
        }

        let defaults: &[&[&str]] = if cfg!(target_os = "macos") {
            &[&["pbcopy"]]
        } else if cfg!(target_os = "windows") {
            &[&["clip"]]
        } else {
            &[
                &["wl-copy"],
                &["xclip", "-selection", "clipboard"],
                &["xsel", "--clipboard", "--input"],
            ]
        };

        defaults
            .iter()
            .map(|argv| argv.iter().map(|s| s.to_string()).collect())
            .collect()
    }
}

impl Clipboard for SystemClipboard {
    fn copy(&self, text: &str) -> Result<()> {
        let candidates = self.candidates();

        for argv in &candidates {
            let Some((program, args)) = argv.split_first() else {
                continue;
            };

            let spawned = Command::new(program)
                .args(args)
                .stdin(Stdio::piped())
                .stdout(Stdio::null())
                .stderr(Stdio::null())
                .spawn();

            let mut child = match spawned {
                Ok(child) => child,
                // Tool not installed, try the next one
                Err(e) if e.kind() == ErrorKind::NotFound => continue,
                Err(source) => {
                    return Err(PromptBoxError::ClipboardIo {
                        command: program.clone(),
                        source,
                    });
                }
            };

            if let Some(mut stdin) = child.stdin.take() {
                if let Err(source) = stdin.write_all(text.as_bytes()) {
                    // Reap the tool so the worker thread does not collect zombies
                    drop(stdin);
                    let _ = child.kill();
                    let _ = child.wait();
                    return Err(PromptBoxError::ClipboardIo {
                        command: program.clone(),
                        source,
                    });
                }
            }

            let status = child.wait().map_err(|source| PromptBoxError::ClipboardIo {
                command: program.clone(),
                source,
            })?;

            if !status.success() {
                return Err(PromptBoxError::ClipboardStatus {
                    command: program.clone(),
                    status: status.to_string(),
                });
            }

            tracing::debug!(command = %program, bytes = text.len(), "copied to clipboard");
            return Ok(());
        }

        Err(PromptBoxError::ClipboardUnavailable {
            tried: candidates
                .iter()
                .filter_map(|argv| argv.first().cloned())
                .collect::<Vec<_>>()
                .join(", "),
        })
    }
}

/// Result of one queued copy, reported back for status display only
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CopyOutcome {
    Copied { bytes: usize },
    Failed(String),
}

/// Runs another clipboard on a worker thread so callers never block.
#[derive(Debug)]
pub struct BackgroundClipboard {
    requests: Sender<String>,
    outcomes: Receiver<CopyOutcome>,
}

impl BackgroundClipboard {
    pub fn spawn<C>(inner: C) -> Self
    where
        C: Clipboard + Send + 'static,
    {
        let (requests, jobs) = flume::unbounded::<String>();
        let (report, outcomes) = flume::unbounded();

        thread::spawn(move || {
            // Exits once every sender is dropped
            while let Ok(text) = jobs.recv() {
                let outcome = match inner.copy(&text) {
                    Ok(()) => CopyOutcome::Copied { bytes: text.len() },
                    Err(e) => {
                        tracing::warn!(error = %e, "clipboard write failed");
                        CopyOutcome::Failed(e.to_string())
                    }
                };
                let _ = report.send(outcome);
            }
        });

        Self { requests, outcomes }
    }

    /// Next finished copy, if any. Never blocks.
    pub fn poll_outcome(&self) -> Option<CopyOutcome> {
        self.outcomes.try_recv().ok()
    }
}

impl Clipboard for BackgroundClipboard {
    fn copy(&self, text: &str) -> Result<()> {
        self.requests
            .send(text.to_string())
            .map_err(|_| PromptBoxError::ClipboardClosed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    #[derive(Clone, Default)]
    struct MemoryClipboard {
        contents: Arc<Mutex<Vec<String>>>,
        fail: bool,
    }

    impl Clipboard for MemoryClipboard {
        fn copy(&self, text: &str) -> Result<()> {
            if self.fail {
                return Err(PromptBoxError::ClipboardUnavailable {
                    tried: "memory".to_string(),
                });
            }
            self.contents.lock().unwrap().push(text.to_string());
            Ok(())
        }
    }

    #[test]
    fn background_copy_reaches_inner_clipboard() {
        let memory = MemoryClipboard::default();
        let background = BackgroundClipboard::spawn(memory.clone());

        background.copy("hello").unwrap();
        let outcome = background
            .outcomes
            .recv_timeout(Duration::from_secs(5))
            .unwrap();

        assert_eq!(outcome, CopyOutcome::Copied { bytes: 5 });
        assert_eq!(memory.contents.lock().unwrap().as_slice(), ["hello"]);
    }

    #[test]
    fn background_failure_is_reported_not_raised() {
        let background = BackgroundClipboard::spawn(MemoryClipboard {
            fail: true,
            ..MemoryClipboard::default()
        });

        assert!(background.copy("text").is_ok());
        let outcome = background
            .outcomes
            .recv_timeout(Duration::from_secs(5))
            .unwrap();
        assert!(matches!(outcome, CopyOutcome::Failed(msg) if msg.contains("memory")));
    }

    #[test]
    fn poll_outcome_is_empty_before_any_copy() {
        let background = BackgroundClipboard::spawn(MemoryClipboard::default());
        assert!(background.poll_outcome().is_none());
    }

    #[test]
    fn configured_command_replaces_defaults() {
        let clipboard = SystemClipboard::with_command(vec!["my-copy".into(), "--in".into()]);
        assert_eq!(clipboard.candidates(), vec![vec!["my-copy", "--in"]]);
        assert!(!SystemClipboard::with_command(Vec::new()).candidates().is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn tool_that_ignores_stdin_is_an_io_error() {
        // `true` exits without reading, so the write hits a closed pipe
        let clipboard = SystemClipboard::with_command(vec!["true".into()]);
        let text = "x".repeat(4 * 1024 * 1024);
        let err = clipboard.copy(&text).unwrap_err();
        assert!(matches!(err, PromptBoxError::ClipboardIo { ref command, .. } if command == "true"));
    }

    #[test]
    fn missing_tool_is_unavailable() {
        let clipboard =
            SystemClipboard::with_command(vec!["promptbox-no-such-clipboard-tool".into()]);
        let err = clipboard.copy("x").unwrap_err();
        assert!(matches!(err, PromptBoxError::ClipboardUnavailable { .. }));
    }
}
