use crate::terminal;
use crate::widgets::{SlideView, StatusBar};
use anyhow::Result;
use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind};
use futures::StreamExt;
use ratatui::prelude::*;
use slide_common::Deck;
use slide_core::session::{Session, SessionEvent};

/// Read-only viewer for a saved deck.
pub struct SlidePreview {
    session: Session,
    running: bool,
}

impl SlidePreview {
    pub fn new(deck: Deck) -> Self {
        Self {
            session: Session::with_deck(deck),
            running: true,
        }
    }

    pub fn slide_index(&self) -> usize {
        self.session.slide_index()
    }

    pub async fn run(&mut self) -> Result<()> {
        let mut terminal = terminal::init()?;
        let mut events = EventStream::new();

        let result: Result<()> = async {
            while self.running {
                terminal.draw(|f| self.draw(f))?;
                match events.next().await {
                    Some(Ok(Event::Key(key))) => self.handle_key(key),
                    Some(Ok(_)) => {}
                    Some(Err(e)) => return Err(e.into()),
                    None => break,
                }
            }
            Ok(())
        }
        .await;

        terminal::restore(&mut terminal)?;
        result
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        let event = match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.running = false;
                return;
            }
            KeyCode::Left | KeyCode::Char('h') => SessionEvent::PrevSlide,
            KeyCode::Right | KeyCode::Char('l') => SessionEvent::NextSlide,
            KeyCode::Home => SessionEvent::FirstSlide,
            KeyCode::End => SessionEvent::LastSlide,
            _ => return,
        };
        self.session = std::mem::take(&mut self.session).apply(event);
    }

    fn draw(&self, f: &mut Frame) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(5), Constraint::Length(3)])
            .split(f.area());
        f.render_widget(
            SlideView::new(self.session.deck(), self.session.slide_index()),
            rows[0],
        );
        let status = self.status();
        f.render_widget(
            StatusBar::new("PREVIEW", &status, "←/→ slides · Home/End · q quit"),
            rows[1],
        );
    }

    fn status(&self) -> String {
        match self.session.deck() {
            Some(deck) if deck.slide_count() > 0 => format!(
                "Slide {}/{}",
                self.session.slide_index() + 1,
                deck.slide_count()
            ),
            _ => "No slides".to_string(),
        }
    }
}
