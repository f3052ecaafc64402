//! Input handler for the terminal using rustyline
//!
//! Provides line editing and persistent history. Blank lines are passed
//! through: the interpreter echoes them like any other command.

use anyhow::Result;
use rustyline::error::ReadlineError;
use rustyline::history::History;
use rustyline::DefaultEditor;
use std::path::PathBuf;
use tracing::debug;

use crate::errors::SurakshaError;
use crate::repl::commands::PROMPT;

/// Input handler managing readline interface and command history
pub struct InputHandler {
    editor: DefaultEditor,
    history_path: Option<PathBuf>,
    prompt: String,
}

impl InputHandler {
    pub fn new() -> Result<Self> {
        let editor = DefaultEditor::new()?;

        Ok(InputHandler {
            editor,
            history_path: None,
            prompt: format!("{} ", PROMPT),
        })
    }

    /// Create input handler with persistent history
    pub fn with_history(history_file: PathBuf) -> Result<Self> {
        let mut editor = DefaultEditor::new()?;

        if history_file.exists() {
            if let Err(e) = editor.load_history(&history_file) {
                debug!(error = %e, "Could not load command history");
            }
        }

        Ok(InputHandler {
            editor,
            history_path: Some(history_file),
            prompt: format!("{} ", PROMPT),
        })
    }

    /// Read a line of input from user
    ///
    /// Returns:
    /// - Ok(Some(input)) for normal input, including blank lines
    /// - Ok(None) when the user leaves (Ctrl-D or Ctrl-C)
    /// - Err on terminal errors
    pub fn read_line(&mut self) -> Result<Option<String>> {
        match self.editor.readline(&self.prompt) {
            Ok(line) => {
                let trimmed = line.trim();

                if !trimmed.is_empty() {
                    let _ = self.editor.add_history_entry(trimmed);
                }

                Ok(Some(line))
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => Ok(None),
            Err(err) => Err(SurakshaError::InputError(err.to_string()).into()),
        }
    }

    /// Save history to disk
    pub fn save_history(&mut self) -> Result<()> {
        if let Some(ref path) = self.history_path {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            self.editor.save_history(path)?;
        }
        Ok(())
    }

    pub fn history_len(&self) -> usize {
        self.editor.history().len()
    }
}
