use std::collections::VecDeque;
use std::io;

/// Source of interactive answers for the setup flow.
pub trait Prompter {
    /// Ask for a value without echoing it to the terminal.
    fn prompt_secret(&mut self, prompt: &str) -> io::Result<String>;
    /// Ask for a plain value.
    fn prompt_text(&mut self, prompt: &str) -> io::Result<String>;
}

/// Prompts on the controlling terminal.
#[derive(Debug, Default)]
pub struct TerminalPrompter;

impl Prompter for TerminalPrompter {
    fn prompt_secret(&mut self, prompt: &str) -> io::Result<String> {
        dialoguer::Password::new().with_prompt(prompt).interact()
    }

    fn prompt_text(&mut self, prompt: &str) -> io::Result<String> {
        dialoguer::Input::<String>::new()
            .with_prompt(prompt)
            .interact_text()
    }
}

/// Replays canned answers in order; runs dry with `UnexpectedEof`.
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    answers: VecDeque<String>,
    asked: Vec<String>,
}

impl ScriptedPrompter {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
            asked: Vec::new(),
        }
    }

    /// Prompts shown so far, in order.
    pub fn asked(&self) -> &[String] {
        &self.asked
    }

    fn next(&mut self, prompt: &str) -> io::Result<String> {
        self.asked.push(prompt.to_string());
        self.answers.pop_front().ok_or_else(|| {
            io::Error::new(io::ErrorKind::UnexpectedEof, "no scripted answer left")
        })
    }
}

impl Prompter for ScriptedPrompter {
    fn prompt_secret(&mut self, prompt: &str) -> io::Result<String> {
        self.next(prompt)
    }

    fn prompt_text(&mut self, prompt: &str) -> io::Result<String> {
        self.next(prompt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scripted_prompter_replays_in_order() {
        let mut prompter = ScriptedPrompter::new(["secret", "octocat"]);

        assert_eq!(prompter.prompt_secret("Token").unwrap(), "secret");
        assert_eq!(prompter.prompt_text("Username").unwrap(), "octocat");
        assert_eq!(prompter.asked(), ["Token", "Username"]);
    }

    #[test]
    fn test_scripted_prompter_runs_dry() {
        let mut prompter = ScriptedPrompter::new(Vec::<String>::new());
        let err = prompter.prompt_text("Username").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }
}
