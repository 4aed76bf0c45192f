//! Question/option structure builder.
//!
//! A three-state machine fed one classified line at a time:
//!
//! ```text
//! state        QuestionStart            OptionStart               Continuation
//! NoQuestion   open question            drop                      drop
//! InQuestion   emit, open question      open option               append to question
//! InOption     close option, emit,      close option, open next   append to option
//!              open question
//! ```
//!
//! At most one question and one option are open at a time, and both live in
//! the builder value itself, so every document gets an independent builder.
//! Options keep their spans until [`crate::extract`] evaluates color.

use crate::classify::LineKind;
use crate::document::Span;

/// An option that has not been color-evaluated yet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DraftOption {
    pub text: String,
    /// Every non-blank span from the label line and continuation lines.
    pub spans: Vec<Span>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DraftQuestion {
    pub text: String,
    pub options: Vec<DraftOption>,
}

/// Observable builder state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuilderPhase {
    NoQuestion,
    InQuestionNoOption,
    InOption,
}

#[derive(Debug)]
enum State {
    NoQuestion,
    InQuestion(DraftQuestion),
    InOption(DraftQuestion, DraftOption),
}

#[derive(Debug)]
pub struct StructureBuilder {
    state: State,
    finished: Vec<DraftQuestion>,
    dropped: usize,
}

impl StructureBuilder {
    pub fn new() -> Self {
        Self {
            state: State::NoQuestion,
            finished: Vec::new(),
            dropped: 0,
        }
    }

    pub fn phase(&self) -> BuilderPhase {
        match self.state {
            State::NoQuestion => BuilderPhase::NoQuestion,
            State::InQuestion(_) => BuilderPhase::InQuestionNoOption,
            State::InOption(..) => BuilderPhase::InOption,
        }
    }

    /// Lines dropped because no question was open yet.
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    /// Questions closed so far; the open one is not included.
    pub fn finished(&self) -> &[DraftQuestion] {
        &self.finished
    }

    /// Feed one non-empty line.
    pub fn push(&mut self, kind: LineKind, text: &str, spans: &[Span]) {
        let state = std::mem::replace(&mut self.state, State::NoQuestion);
        self.state = match (state, kind) {
            (state, LineKind::QuestionStart) => {
                self.close(state);
                State::InQuestion(DraftQuestion {
                    text: text.to_string(),
                    options: Vec::new(),
                })
            }
            (State::InQuestion(question), LineKind::OptionStart) => {
                State::InOption(question, open_option(text, spans))
            }
            (State::InOption(mut question, option), LineKind::OptionStart) => {
                question.options.push(option);
                State::InOption(question, open_option(text, spans))
            }
            (State::InQuestion(mut question), LineKind::Continuation) => {
                append_text(&mut question.text, text);
                State::InQuestion(question)
            }
            (State::InOption(question, mut option), LineKind::Continuation) => {
                append_text(&mut option.text, text);
                option.spans.extend(non_blank(spans));
                State::InOption(question, option)
            }
            (State::NoQuestion, kind) => {
                self.dropped += 1;
                tracing::debug!(kind = kind.as_str(), text, "dropped line before first question");
                State::NoQuestion
            }
        };
    }

    /// Flush any open option and question and return the questions in
    /// document order.
    pub fn finish(mut self) -> Vec<DraftQuestion> {
        let state = std::mem::replace(&mut self.state, State::NoQuestion);
        self.close(state);
        self.finished
    }

    fn close(&mut self, state: State) {
        match state {
            State::NoQuestion => {}
            State::InQuestion(question) => self.finished.push(question),
            State::InOption(mut question, option) => {
                question.options.push(option);
                self.finished.push(question);
            }
        }
    }
}

impl Default for StructureBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn open_option(text: &str, spans: &[Span]) -> DraftOption {
    DraftOption {
        text: text.to_string(),
        spans: non_blank(spans).collect(),
    }
}

fn non_blank(spans: &[Span]) -> impl Iterator<Item = Span> + '_ {
    spans
        .iter()
        .filter(|span| !span.text.trim().is_empty())
        .cloned()
}

fn append_text(target: &mut String, text: &str) {
    if !target.is_empty() {
        target.push(' ');
    }
    target.push_str(text);
}
