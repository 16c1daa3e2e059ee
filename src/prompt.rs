//! Operator input for interactive conflict resolution.

use std::collections::VecDeque;

use dialoguer::Input;

use crate::error::{Error, Result};

/// Source of free-text answers to conflict prompts.
pub trait ResponseSource {
    /// Shows `prompt` and blocks until an answer is available.
    fn respond(&mut self, prompt: &str) -> Result<String>;
}

/// Reads answers from the terminal.
#[derive(Debug, Default)]
pub struct TerminalResponses;

impl TerminalResponses {
    pub fn new() -> Self {
        Self
    }
}

impl ResponseSource for TerminalResponses {
    fn respond(&mut self, prompt: &str) -> Result<String> {
        Input::<String>::new()
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()
            .map_err(|e| Error::PromptError(e.to_string()))
    }
}

/// Replays a fixed sequence of answers and records the prompts it saw.
#[derive(Debug, Default)]
pub struct ScriptedResponses {
    answers: VecDeque<String>,
    prompts: Vec<String>,
}

impl ScriptedResponses {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self { answers: answers.into_iter().map(Into::into).collect(), prompts: Vec::new() }
    }

    /// Prompts answered so far, in order.
    pub fn prompts(&self) -> &[String] {
        &self.prompts
    }

    /// Answers not consumed yet.
    pub fn remaining(&self) -> usize {
        self.answers.len()
    }
}

impl ResponseSource for ScriptedResponses {
    fn respond(&mut self, prompt: &str) -> Result<String> {
        self.prompts.push(prompt.to_string());
        self.answers
            .pop_front()
            .ok_or_else(|| Error::PromptError("no scripted response left".to_string()))
    }
}
