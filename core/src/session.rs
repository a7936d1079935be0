//! Application state of one interactive session.
//!
//! [`Session`] is a plain value. Every change goes through
//! [`Session::apply`], which consumes the old state and returns the next one,
//! so the UI never mutates individual fields.

use crate::message_history::{Message, MessageHistory, Role};
use crate::prompt::Mode;
use crate::thoughts::Thoughts;
use slide_common::Deck;
use std::path::PathBuf;

pub const GENERATION_FAILED_MESSAGE: &str =
    "Sorry, I encountered an error while generating the presentation. Please try again.";
pub const EXPORT_FAILED_MESSAGE: &str = "Sorry, there was an error saving the presentation.";

#[derive(Debug, Clone)]
pub enum SessionEvent {
    /// The user sent a prompt. Ignored while a generation is in flight.
    Submitted { prompt: String },
    ThoughtAdvanced,
    GenerationSucceeded { deck: Deck },
    GenerationFailed,
    ThoughtsCleared,
    NextSlide,
    PrevSlide,
    FirstSlide,
    LastSlide,
    GoToSlide(usize),
    ExportStarted,
    ExportSucceeded { path: PathBuf },
    ExportFailed,
}

#[derive(Debug, Clone, Default)]
pub struct Session {
    transcript: MessageHistory,
    deck: Option<Deck>,
    slide_index: usize,
    thoughts: Thoughts,
    /// Mode of the generation in flight, if any.
    generating: Option<Mode>,
    exporting: bool,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// A session that starts out showing `deck`, as when previewing a file.
    pub fn with_deck(deck: Deck) -> Self {
        Self {
            deck: Some(deck),
            ..Self::default()
        }
    }

    pub fn messages(&self) -> &[Message] {
        self.transcript.messages()
    }

    pub fn deck(&self) -> Option<&Deck> {
        self.deck.as_ref()
    }

    pub fn slide_index(&self) -> usize {
        self.slide_index
    }

    pub fn thoughts(&self) -> &Thoughts {
        &self.thoughts
    }

    pub fn is_generating(&self) -> bool {
        self.generating.is_some()
    }

    pub fn is_exporting(&self) -> bool {
        self.exporting
    }

    /// Edit once a deck exists, create before that.
    pub fn mode(&self) -> Mode {
        Mode::for_prior(self.deck.as_ref())
    }

    /// Whether submitting `prompt` would start a generation.
    pub fn accepts(&self, prompt: &str) -> bool {
        !prompt.trim().is_empty() && self.generating.is_none()
    }

    pub fn can_export(&self) -> bool {
        self.deck.is_some() && !self.exporting
    }

    pub fn apply(mut self, event: SessionEvent) -> Self {
        match event {
            SessionEvent::Submitted { prompt } => {
                if !self.accepts(&prompt) {
                    return self;
                }
                let mode = self.mode();
                self.transcript.add_message(Role::User, prompt.trim());
                self.thoughts = Thoughts::start(mode);
                self.generating = Some(mode);
            }
            SessionEvent::ThoughtAdvanced => {
                if self.generating.is_some() {
                    self.thoughts.advance();
                }
            }
            SessionEvent::GenerationSucceeded { deck } => {
                let Some(mode) = self.generating.take() else {
                    return self;
                };
                let summary = match mode {
                    Mode::Create => format!(
                        "I've created a presentation titled \"{}\" with {} slides. You can preview it on the right and export it when ready.",
                        deck.title,
                        deck.slide_count()
                    ),
                    Mode::Edit => "I've updated your presentation based on your request. You can preview it on the right and export it when ready.".to_string(),
                };
                self.slide_index = match mode {
                    Mode::Create => 0,
                    Mode::Edit => clamp_index(self.slide_index, deck.slide_count()),
                };
                self.deck = Some(deck);
                self.thoughts.finish();
                self.transcript.add_message(Role::Assistant, summary);
            }
            SessionEvent::GenerationFailed => {
                if self.generating.take().is_none() {
                    return self;
                }
                self.thoughts.clear();
                self.transcript
                    .add_message(Role::Assistant, GENERATION_FAILED_MESSAGE);
            }
            SessionEvent::ThoughtsCleared => {
                if self.generating.is_none() {
                    self.thoughts.clear();
                }
            }
            SessionEvent::NextSlide => {
                self.slide_index = clamp_index(self.slide_index.saturating_add(1), self.slide_count());
            }
            SessionEvent::PrevSlide => {
                self.slide_index = self.slide_index.saturating_sub(1);
            }
            SessionEvent::FirstSlide => self.slide_index = 0,
            SessionEvent::LastSlide => {
                self.slide_index = self.slide_count().saturating_sub(1);
            }
            SessionEvent::GoToSlide(index) => {
                self.slide_index = clamp_index(index, self.slide_count());
            }
            SessionEvent::ExportStarted => {
                if self.can_export() {
                    self.exporting = true;
                }
            }
            SessionEvent::ExportSucceeded { path } => {
                self.exporting = false;
                self.transcript.add_message(
                    Role::Assistant,
                    format!("Your presentation has been saved to {}", path.display()),
                );
            }
            SessionEvent::ExportFailed => {
                self.exporting = false;
                self.transcript
                    .add_message(Role::Assistant, EXPORT_FAILED_MESSAGE);
            }
        }
        self
    }

    fn slide_count(&self) -> usize {
        self.deck.as_ref().map_or(0, Deck::slide_count)
    }
}

fn clamp_index(index: usize, count: usize) -> usize {
    index.min(count.saturating_sub(1))
}
