//! Interactive y/n confirmation on the terminal.

use std::io::{self, BufRead, Write};

use devtrack_core::confirm::{ConfirmPrompt, PromptError};

/// Blocking line prompt: question on stderr, answer from stdin. Anything
/// other than an explicit yes declines; IO failures surface as
/// [`PromptError`] so the managers' fail-open rule applies.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdinPrompt;

impl ConfirmPrompt for StdinPrompt {
    fn confirm(&mut self, message: &str) -> Result<bool, PromptError> {
        let mut stderr = io::stderr();
        write!(stderr, "{message} [y/N] ")
            .and_then(|()| stderr.flush())
            .map_err(|err| PromptError::new(format!("write prompt: {err}")))?;

        let mut answer = String::new();
        let read = io::stdin()
            .lock()
            .read_line(&mut answer)
            .map_err(|err| PromptError::new(format!("read answer: {err}")))?;
        if read == 0 {
            return Err(PromptError::new("stdin closed"));
        }

        let answer = answer.trim().to_ascii_lowercase();
        Ok(answer == "y" || answer == "yes")
    }
}
