use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};
use slide_core::thoughts::{StepStatus, Thoughts};

pub struct ThoughtsWidget<'a> {
    thoughts: &'a Thoughts,
}

impl<'a> ThoughtsWidget<'a> {
    pub fn new(thoughts: &'a Thoughts) -> Self {
        Self { thoughts }
    }

    /// Rows needed to show every step, borders included.
    pub fn height(thoughts: &Thoughts) -> u16 {
        if thoughts.is_empty() {
            0
        } else {
            u16::try_from(thoughts.steps().len() * 2 + 2).unwrap_or(u16::MAX)
        }
    }
}

impl Widget for ThoughtsWidget<'_> {
    fn render(self, area: Rect, buf: &mut ratatui::buffer::Buffer) {
        let mut lines = Vec::with_capacity(self.thoughts.steps().len() * 2);
        for step in self.thoughts.steps() {
            let (icon, style) = match step.status {
                StepStatus::Completed => ("✓", Style::default().fg(Color::Green)),
                StepStatus::InProgress => (
                    "●",
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                ),
                StepStatus::Pending => ("○", Style::default().fg(Color::DarkGray)),
            };
            lines.push(Line::from(vec![
                Span::styled(format!("{icon} "), style),
                Span::styled(step.title.as_str(), style),
            ]));
            lines.push(Line::from(Span::styled(
                format!("  {}", step.description),
                Style::default().fg(Color::DarkGray),
            )));
        }
        Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL).title("Thinking"))
            .wrap(Wrap { trim: false })
            .render(area, buf);
    }
}
