use crate::completer::EnvHelper;
use lisp_interpreter::errors::Result;
use rustyline::Editor;

pub trait LineReader {
    fn read_line(&mut self) -> Result<String>;
}

pub struct ReplInput {
    rl: Editor<EnvHelper>,
    prompt: String,
    continuation: String,
    pending: bool,
}

impl ReplInput {
    pub fn new(prompt: &str, helper: EnvHelper) -> Self {
        let mut rl = Editor::new();
        rl.set_helper(Some(helper));
        ReplInput {
            rl,
            prompt: prompt.to_string(),
            continuation: " ".repeat(prompt.chars().count()),
            pending: false,
        }
    }

    /// Switch to the continuation prompt while an input has open parentheses.
    pub fn set_pending(&mut self, pending: bool) {
        self.pending = pending;
    }
}

impl LineReader for ReplInput {
    fn read_line(&mut self) -> Result<String> {
        let prompt = if self.pending {
            &self.continuation
        } else {
            &self.prompt
        };
        let line = self.rl.readline(prompt)?;
        self.rl.add_history_entry(line.as_str());
        Ok(line + "\n")
    }
}
