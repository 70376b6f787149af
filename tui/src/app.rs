use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
};
use std::io;
use std::sync::Arc;
use strive_common::{FieldId, Recommendation};
use strive_core::client::RecommendationSource;
use strive_core::request::{FetchOutcome, Phase, RequestCycle};
use strive_core::store::FieldStore;
use tokio::sync::mpsc;

use crate::form::{Focus, ProblemForm};

pub struct InteractiveApp {
    running: bool,
    form: ProblemForm,
    cycle: RequestCycle,
    source: Arc<dyn RecommendationSource>,
    outcome_tx: mpsc::Sender<(u64, FetchOutcome)>,
    outcome_rx: mpsc::Receiver<(u64, FetchOutcome)>,
}

impl InteractiveApp {
    pub fn new(source: Arc<dyn RecommendationSource>, store: Box<dyn FieldStore>) -> Self {
        let (outcome_tx, outcome_rx) = mpsc::channel(8);
        Self {
            running: true,
            form: ProblemForm::new(store),
            cycle: RequestCycle::new(),
            source,
            outcome_tx,
            outcome_rx,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        while self.running {
            terminal.draw(|f| self.draw(f))?;

            tokio::select! {
                Some((ticket, outcome)) = self.outcome_rx.recv() => {
                    self.cycle.complete(ticket, outcome);
                }
                event_result = tokio::task::spawn_blocking(|| event::poll(std::time::Duration::from_millis(50))) => {
                    if let Ok(Ok(true)) = event_result {
                        if let Ok(Event::Key(key)) = event::read() {
                            self.handle_key(key);
                        }
                    }
                }
            }
        }

        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        Ok(())
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('q') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.running = false;
            return;
        }
        // Once a problem is submitted the collector is gone; only quit
        // remains. There is deliberately no reset action.
        if self.cycle.problem().is_some() {
            return;
        }
        match key.code {
            KeyCode::Tab => self.form.focus_next(),
            KeyCode::BackTab => self.form.focus_prev(),
            KeyCode::Backspace => self.form.backspace(),
            KeyCode::Enter => match self.form.focus() {
                Focus::Struggle => self.form.newline(),
                Focus::Next => self.submit(),
                _ => self.form.focus_next(),
            },
            KeyCode::Char(c) => self.form.insert(c),
            _ => {}
        }
    }

    /// Confirm the form: build the problem, enter `Pending` and start the
    /// one fetch of this cycle. The task reports back over the channel with
    /// its ticket; a superseded ticket is dropped by the cycle.
    fn submit(&mut self) {
        let problem = self.form.problem();
        let ticket = self.cycle.submit(problem.clone());
        let source = Arc::clone(&self.source);
        let tx = self.outcome_tx.clone();
        tokio::spawn(async move {
            let outcome = match source.fetch(&problem).await {
                Ok(Some(recommendation)) => FetchOutcome::Recommendation(recommendation),
                Ok(None) => FetchOutcome::Unusable,
                Err(err) => FetchOutcome::Error(format!("{err:?}")),
            };
            let _ = tx.send((ticket, outcome)).await;
        });
    }

    fn draw(&self, f: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(2), Constraint::Min(3)])
            .split(f.area());

        let header = Paragraph::new("STRIVE").block(Block::default().borders(Borders::BOTTOM));
        f.render_widget(header, chunks[0]);

        match self.cycle.phase() {
            Phase::NoProblem => self.draw_form(f, chunks[1]),
            Phase::Pending => {
                f.render_widget(Paragraph::new("Thinking ...").wrap(Wrap { trim: true }), chunks[1]);
            }
            Phase::Resolved(recommendation) => {
                self.draw_recommendation(f, chunks[1], recommendation);
            }
            Phase::Failed { error } => self.draw_failure(f, chunks[1], error.as_deref()),
        }
    }

    fn draw_form(&self, f: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Min(5),
                Constraint::Length(1),
            ])
            .split(area);

        let field = |title: &str, id: FieldId, focus: Focus| {
            let border = if self.form.focus() == focus {
                Style::default().fg(Color::Cyan)
            } else {
                Style::default()
            };
            Paragraph::new(self.form.value(id).to_string())
                .block(
                    Block::default()
                        .title(title.to_string())
                        .borders(Borders::ALL)
                        .border_style(border),
                )
                .wrap(Wrap { trim: false })
        };

        f.render_widget(
            field("Hey, what is your name?", FieldId::Name, Focus::Name),
            chunks[0],
        );
        f.render_widget(field("I am a ...", FieldId::Role, Focus::Role), chunks[1]);
        f.render_widget(
            field(
                "... and I struggle with this:",
                FieldId::Struggle,
                Focus::Struggle,
            ),
            chunks[2],
        );

        let next_style = if self.form.focus() == Focus::Next {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default()
        };
        let next = Paragraph::new("[ next ]   Tab: move, Enter: confirm, Ctrl+Q: quit")
            .style(next_style);
        f.render_widget(next, chunks[3]);
    }

    fn draw_recommendation(&self, f: &mut Frame, area: Rect, recommendation: &Recommendation) {
        let name = self
            .cycle
            .problem()
            .map(|p| p.name.as_str())
            .unwrap_or_default();
        let symptom_lines = recommendation.identified_symptoms.len().max(1) as u16;
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2),
                Constraint::Length(symptom_lines),
                Constraint::Min(6),
            ])
            .split(area);

        f.render_widget(
            Paragraph::new(format!("So {name},\nyou may be struggling with:")),
            chunks[0],
        );

        let items: Vec<ListItem> = recommendation
            .identified_symptoms
            .iter()
            .map(|s| ListItem::new(format!("- {s}")))
            .collect();
        f.render_widget(List::new(items), chunks[1]);

        let body = format!(
            "A symptom is: {}\n\nA measure to improve this is: {}\n\nDo you need help with presenting this to your manager?\n\nFollow up\nYou should follow up with this.\n{}\n\nShould I schedule a follow up reminder?",
            recommendation.symptom, recommendation.measure, recommendation.follow_up
        );
        f.render_widget(Paragraph::new(body).wrap(Wrap { trim: true }), chunks[2]);
    }

    fn draw_failure(&self, f: &mut Frame, area: Rect, error: Option<&str>) {
        // A rejected call dumps the raw error; an unusable response has no
        // error value to show.
        let text = match error {
            Some(err) => err.to_string(),
            None => "The service answered, but the response could not be read.".to_string(),
        };
        let dump = Paragraph::new(text)
            .block(Block::default().title("Error").borders(Borders::ALL))
            .wrap(Wrap { trim: true });
        f.render_widget(dump, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strive_core::client::StubSource;
    use strive_core::store::MemoryFieldStore;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn app() -> InteractiveApp {
        InteractiveApp::new(Arc::new(StubSource), Box::<MemoryFieldStore>::default())
    }

    #[tokio::test]
    async fn typing_and_confirming_submits_the_problem() {
        let mut app = app();
        for c in "Ada".chars() {
            app.handle_key(key(KeyCode::Char(c)));
        }
        app.handle_key(key(KeyCode::Enter)); // name -> role
        for c in "dev".chars() {
            app.handle_key(key(KeyCode::Char(c)));
        }
        app.handle_key(key(KeyCode::Tab)); // role -> struggle
        for c in "meetings".chars() {
            app.handle_key(key(KeyCode::Char(c)));
        }
        app.handle_key(key(KeyCode::Tab)); // struggle -> next
        app.handle_key(key(KeyCode::Enter)); // confirm

        assert!(app.cycle.is_pending());
        let problem = app.cycle.problem().cloned().expect("problem submitted");
        assert_eq!(problem.name, "Ada");
        assert_eq!(problem.role, "dev");
        assert_eq!(problem.struggle, "meetings");

        // The stub answers immediately; the cycle resolves.
        let (ticket, outcome) = app.outcome_rx.recv().await.expect("outcome");
        assert!(app.cycle.complete(ticket, outcome));
        assert!(matches!(app.cycle.phase(), Phase::Resolved(_)));
    }

    #[tokio::test]
    async fn keys_after_submission_do_not_reopen_the_collector() {
        let mut app = app();
        // Empty fields are accepted: straight to [ next ].
        app.handle_key(key(KeyCode::BackTab));
        app.handle_key(key(KeyCode::Enter));
        assert!(app.cycle.is_pending());

        app.handle_key(key(KeyCode::Char('x')));
        app.handle_key(key(KeyCode::Enter));
        assert!(app.cycle.is_pending());
        assert_eq!(app.cycle.problem().map(|p| p.name.as_str()), Some(""));
    }

    #[tokio::test]
    async fn ctrl_q_quits_in_any_state() {
        let mut app = app();
        assert!(app.running);
        app.handle_key(KeyEvent::new(KeyCode::Char('q'), KeyModifiers::CONTROL));
        assert!(!app.running);
    }
}
