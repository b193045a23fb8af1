//! Text prompt collaborator used by the text tool

use std::collections::VecDeque;

use crate::domain::Point;

/// Synchronously asks the user for a line of text
///
/// The editor suspends gesture handling until the prompt returns. `None` or an
/// empty string means the user cancelled.
pub trait TextPrompt {
    fn request_text(&mut self, at: Point) -> Option<String>;
}

impl<F> TextPrompt for F
where
    F: FnMut(Point) -> Option<String>,
{
    fn request_text(&mut self, at: Point) -> Option<String> {
        self(at)
    }
}

/// Prompt that always cancels, for callers without a text tool
#[derive(Clone, Copy, Debug, Default)]
pub struct NoPrompt;

impl TextPrompt for NoPrompt {
    fn request_text(&mut self, _at: Point) -> Option<String> {
        None
    }
}

/// Prompt answering from a prepared queue, one answer per request
#[derive(Clone, Debug, Default)]
pub struct ScriptedPrompt {
    answers: VecDeque<String>,
}

impl ScriptedPrompt {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
        }
    }

    /// Answers not yet handed out
    pub fn remaining(&self) -> usize {
        self.answers.len()
    }
}

impl TextPrompt for ScriptedPrompt {
    fn request_text(&mut self, at: Point) -> Option<String> {
        let answer = self.answers.pop_front();
        if answer.is_none() {
            log::warn!("Text prompt at ({}, {}) has no scripted answer", at.x, at.y);
        }
        answer
    }
}
