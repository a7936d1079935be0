use crate::app_event_sender::AppEventSender;
use crate::terminal;
use crate::widgets::{ChatWidget, ComposerWidget, SlideView, StatusBar, ThoughtsWidget};
use anyhow::Result;
use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use futures::StreamExt;
use ratatui::prelude::*;
use slide_common::Deck;
use slide_core::prompt::Mode;
use slide_core::session::{Session, SessionEvent};
use slide_core::Synthesizer;
use std::path::PathBuf;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver};
use tokio::time::{interval, sleep, Duration};

/// Delays before each cosmetic progress step advances.
const THOUGHT_DELAYS: [Duration; 2] = [Duration::from_millis(1000), Duration::from_millis(1500)];
/// How long completed steps stay on screen after a successful generation.
const THOUGHTS_LINGER: Duration = Duration::from_secs(3);

const TICK: Duration = Duration::from_millis(250);

const HINTS: &str = "Enter send · ←/→ slides · Home/End · Ctrl+S export · Esc quit";

/// Chat-driven deck builder: transcript and composer on the left, live
/// slide preview on the right.
pub struct InteractiveApp {
    session: Session,
    input: String,
    synthesizer: Synthesizer,
    output_dir: PathBuf,
    tx: AppEventSender,
    rx: UnboundedReceiver<SessionEvent>,
    running: bool,
}

impl InteractiveApp {
    pub fn new(synthesizer: Synthesizer, output_dir: PathBuf) -> Self {
        let (tx, rx) = unbounded_channel();
        Self {
            session: Session::new(),
            input: String::new(),
            synthesizer,
            output_dir,
            tx: AppEventSender::new(tx),
            rx,
            running: true,
        }
    }

    /// Start from an existing deck, so the first prompt edits it.
    pub fn with_deck(mut self, deck: Deck) -> Self {
        self.session = Session::with_deck(deck);
        self
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub async fn run(&mut self) -> Result<()> {
        let mut terminal = terminal::init()?;
        let result = self.event_loop(&mut terminal).await;
        terminal::restore(&mut terminal)?;
        result
    }

    async fn event_loop(&mut self, terminal: &mut terminal::Tui) -> Result<()> {
        let mut events = EventStream::new();
        let mut tick = interval(TICK);

        while self.running {
            terminal.draw(|f| self.draw(f))?;

            tokio::select! {
                _ = tick.tick() => {}
                Some(ev) = self.rx.recv() => self.apply(ev),
                maybe_event = events.next() => match maybe_event {
                    Some(Ok(Event::Key(key))) => self.handle_key(key),
                    Some(Ok(_)) => {}
                    Some(Err(e)) => return Err(e.into()),
                    None => self.running = false,
                },
            }
        }
        Ok(())
    }

    fn apply(&mut self, event: SessionEvent) {
        let session = std::mem::take(&mut self.session);
        self.session = session.apply(event);
    }

    /// Drain events reported by background tasks without blocking.
    pub fn pump(&mut self) {
        while let Ok(ev) = self.rx.try_recv() {
            self.apply(ev);
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => self.running = false,
            KeyCode::Char('c') | KeyCode::Char('q') if ctrl => self.running = false,
            KeyCode::Char('s') if ctrl => self.start_export(),
            KeyCode::Enter => self.submit(),
            KeyCode::Left => self.apply(SessionEvent::PrevSlide),
            KeyCode::Right => self.apply(SessionEvent::NextSlide),
            KeyCode::Home => self.apply(SessionEvent::FirstSlide),
            KeyCode::End => self.apply(SessionEvent::LastSlide),
            KeyCode::Backspace => {
                self.input.pop();
            }
            KeyCode::Char(c) if !ctrl => self.input.push(c),
            _ => {}
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    fn submit(&mut self) {
        if !self.session.accepts(&self.input) {
            return;
        }
        let prompt = std::mem::take(&mut self.input).trim().to_string();
        let prior = self.session.deck().cloned();
        self.apply(SessionEvent::Submitted {
            prompt: prompt.clone(),
        });

        let synthesizer = self.synthesizer.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let ticker = tokio::spawn(advance_thoughts(tx.clone()));
            let result = synthesizer.synthesize(&prompt, prior.as_ref()).await;
            ticker.abort();
            match result {
                Ok(deck) => {
                    tx.send(SessionEvent::GenerationSucceeded { deck });
                    sleep(THOUGHTS_LINGER).await;
                    tx.send(SessionEvent::ThoughtsCleared);
                }
                Err(e) => {
                    tracing::error!(kind = ?e.kind(), "generation failed: {e}");
                    tx.send(SessionEvent::GenerationFailed);
                }
            }
        });
    }

    fn start_export(&mut self) {
        if !self.session.can_export() {
            return;
        }
        let Some(deck) = self.session.deck().cloned() else {
            return;
        };
        self.apply(SessionEvent::ExportStarted);

        let dir = self.output_dir.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            match slide_export::export_to_dir(&deck, &dir).await {
                Ok(path) => tx.send(SessionEvent::ExportSucceeded { path }),
                Err(e) => {
                    tracing::error!("export failed: {e}");
                    tx.send(SessionEvent::ExportFailed);
                }
            }
        });
    }

    fn status(&self) -> String {
        if self.session.is_generating() {
            return "Generating...".to_string();
        }
        if self.session.is_exporting() {
            return "Exporting...".to_string();
        }
        match self.session.deck() {
            Some(deck) if deck.slide_count() > 0 => format!(
                "Slide {}/{}",
                self.session.slide_index() + 1,
                deck.slide_count()
            ),
            _ => "Ready".to_string(),
        }
    }

    pub fn draw(&self, f: &mut Frame) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(5), Constraint::Length(3)])
            .split(f.area());
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
            .split(rows[0]);

        let thoughts = self.session.thoughts();
        let left = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(3),
                Constraint::Length(ThoughtsWidget::height(thoughts)),
                Constraint::Length(3),
            ])
            .split(cols[0]);

        f.render_widget(ChatWidget::new(self.session.messages()), left[0]);
        if !thoughts.is_empty() {
            f.render_widget(ThoughtsWidget::new(thoughts), left[1]);
        }
        let composer = ComposerWidget::new(&self.input, !self.session.is_generating());
        let composer = match self.session.mode() {
            Mode::Create => composer,
            Mode::Edit => composer.with_placeholder("Ask for changes to the presentation..."),
        };
        f.render_widget(composer, left[2]);

        f.render_widget(
            SlideView::new(self.session.deck(), self.session.slide_index()),
            cols[1],
        );

        let mode = match self.session.mode() {
            Mode::Create => "CREATE",
            Mode::Edit => "EDIT",
        };
        let status = self.status();
        f.render_widget(StatusBar::new(mode, &status, HINTS), rows[1]);
    }
}

async fn advance_thoughts(tx: AppEventSender) {
    for delay in THOUGHT_DELAYS {
        sleep(delay).await;
        tx.send(SessionEvent::ThoughtAdvanced);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widgets::buffer_text;
    use ratatui::backend::TestBackend;
    use slide_core::client::StubClient;
    use std::sync::Arc;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn app(dir: PathBuf) -> InteractiveApp {
        InteractiveApp::new(Synthesizer::new(Arc::new(StubClient::sample())), dir)
    }

    fn type_text(app: &mut InteractiveApp, text: &str) {
        for c in text.chars() {
            app.handle_key(key(KeyCode::Char(c)));
        }
    }

    async fn wait_until(app: &mut InteractiveApp, done: impl Fn(&Session) -> bool) {
        for _ in 0..200 {
            app.pump();
            if done(app.session()) {
                return;
            }
            sleep(Duration::from_millis(10)).await;
        }
        panic!("condition not reached");
    }

    #[tokio::test]
    async fn prompt_generates_deck_and_navigation_clamps() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(dir.path().to_path_buf());
        type_text(&mut app, "solar energy");
        app.handle_key(key(KeyCode::Enter));
        assert!(app.session().is_generating());
        assert!(app.input.is_empty());

        wait_until(&mut app, |s| s.deck().is_some()).await;
        assert_eq!(app.session().slide_index(), 0);

        app.handle_key(key(KeyCode::End));
        app.handle_key(key(KeyCode::Right));
        assert_eq!(app.session().slide_index(), 2);
        app.handle_key(key(KeyCode::Home));
        app.handle_key(key(KeyCode::Left));
        assert_eq!(app.session().slide_index(), 0);
    }

    #[tokio::test]
    async fn ctrl_s_exports_into_output_dir() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(dir.path().to_path_buf()).with_deck(Deck::new("Q3 Review", vec![]));
        app.handle_key(ctrl('s'));
        assert!(app.session().is_exporting());
        wait_until(&mut app, |s| !s.is_exporting()).await;
        assert!(dir.path().join("Q3_Review.pptx").exists());
    }

    #[tokio::test]
    async fn quit_keys_stop_the_loop() {
        let dir = tempfile::tempdir().unwrap();
        for k in [key(KeyCode::Esc), ctrl('c'), ctrl('q')] {
            let mut app = app(dir.path().to_path_buf());
            app.handle_key(k);
            assert!(!app.is_running());
        }
    }

    #[tokio::test]
    async fn draws_all_panes() {
        let dir = tempfile::tempdir().unwrap();
        let app = app(dir.path().to_path_buf());
        let mut terminal = Terminal::new(TestBackend::new(100, 24)).unwrap();
        terminal.draw(|f| app.draw(f)).unwrap();
        let text = buffer_text(terminal.backend().buffer());
        assert!(text.contains("Chat"));
        assert!(text.contains("CREATE"));
        assert!(text.contains("Your presentation will appear here."));
    }
}
