use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

/// Single-line prompt input.
pub struct ComposerWidget<'a> {
    input: &'a str,
    /// False while a generation is in flight.
    enabled: bool,
    placeholder: &'a str,
}

impl<'a> ComposerWidget<'a> {
    pub fn new(input: &'a str, enabled: bool) -> Self {
        Self {
            input,
            enabled,
            placeholder: "Describe the presentation you want...",
        }
    }

    pub fn with_placeholder(mut self, placeholder: &'a str) -> Self {
        self.placeholder = placeholder;
        self
    }
}

impl Widget for ComposerWidget<'_> {
    fn render(self, area: ratatui::layout::Rect, buf: &mut ratatui::buffer::Buffer) {
        let line = if self.input.is_empty() {
            Line::from(Span::styled(
                self.placeholder,
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::ITALIC),
            ))
        } else {
            Line::from(self.input)
        };
        let (title, border) = if self.enabled {
            ("Message", Style::default().fg(Color::Cyan))
        } else {
            ("Message (generating...)", Style::default().fg(Color::DarkGray))
        };
        Paragraph::new(line)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(border)
                    .title(title),
            )
            .wrap(Wrap { trim: false })
            .render(area, buf);
    }
}
