use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};
use slide_core::message_history::{Message, Role};

const EMPTY_HINT: &str =
    "Ask for a presentation on any topic, then keep chatting to refine it.";

/// Transcript pane, pinned to the newest message.
pub struct ChatWidget<'a> {
    messages: &'a [Message],
}

impl<'a> ChatWidget<'a> {
    pub fn new(messages: &'a [Message]) -> Self {
        Self { messages }
    }

    fn build_lines(&self) -> Vec<Line<'a>> {
        let mut lines = Vec::with_capacity(self.messages.len() * 3);
        for message in self.messages {
            let (who, color) = match message.role {
                Role::User => ("You", Color::Yellow),
                Role::Assistant => ("Assistant", Color::Green),
            };
            lines.push(Line::from(vec![
                Span::styled(
                    who,
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!("  {}", message.time_label()),
                    Style::default().fg(Color::DarkGray),
                ),
            ]));
            lines.extend(message.content.lines().map(|l| Line::from(l.to_string())));
            lines.push(Line::default());
        }
        lines
    }
}

impl Widget for ChatWidget<'_> {
    fn render(self, area: Rect, buf: &mut ratatui::buffer::Buffer) {
        let block = Block::default().borders(Borders::ALL).title("Chat");
        if self.messages.is_empty() {
            Paragraph::new(Span::styled(
                EMPTY_HINT,
                Style::default().fg(Color::DarkGray),
            ))
            .block(block)
            .wrap(Wrap { trim: true })
            .render(area, buf);
            return;
        }

        let lines = self.build_lines();
        let inner = block.inner(area);
        let paragraph = Paragraph::new(lines).wrap(Wrap { trim: false });
        // line_count accounts for wrapping at this width.
        let total = paragraph.line_count(inner.width);
        let scroll = total.saturating_sub(usize::from(inner.height));
        paragraph
            .block(block)
            .scroll((u16::try_from(scroll).unwrap_or(u16::MAX), 0))
            .render(area, buf);
    }
}
