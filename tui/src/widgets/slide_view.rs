//! Terminal rendition of the current slide.
//!
//! Mirrors the exported templates loosely: the first slide and `title`
//! slides are centered, `image-content` puts the image link beside the
//! bullets, and everything else is a heading over bullets.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout as Split, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};
use slide_common::{Deck, Layout, Slide};

pub struct SlideView<'a> {
    deck: Option<&'a Deck>,
    index: usize,
}

impl<'a> SlideView<'a> {
    pub fn new(deck: Option<&'a Deck>, index: usize) -> Self {
        Self { deck, index }
    }
}

/// `RRGGBB` as a terminal color.
fn rgb(hex: &str) -> Option<Color> {
    let n = u32::from_str_radix(hex, 16).ok()?;
    Some(Color::Rgb((n >> 16) as u8, (n >> 8) as u8, n as u8))
}

/// Dark or light text, whichever reads on `hex`.
fn ink_for(hex: &str) -> Color {
    let Some(Color::Rgb(r, g, b)) = rgb(hex) else {
        return Color::Black;
    };
    let luma = 299 * u32::from(r) + 587 * u32::from(g) + 114 * u32::from(b);
    if luma > 128_000 {
        Color::Rgb(0x36, 0x36, 0x36)
    } else {
        Color::White
    }
}

/// One dot per slide, the current one filled.
fn position_dots(index: usize, count: usize) -> String {
    (0..count)
        .map(|i| if i == index { "●" } else { "○" })
        .collect::<Vec<_>>()
        .join(" ")
}

fn bullet_lines(slide: &Slide) -> Vec<Line<'_>> {
    slide
        .content
        .iter()
        .flat_map(|c| c.split('\n'))
        .map(|l| Line::from(format!("• {l}")))
        .collect()
}

impl Widget for SlideView<'_> {
    fn render(self, area: Rect, buf: &mut ratatui::buffer::Buffer) {
        let Some(deck) = self.deck else {
            Paragraph::new("Your presentation will appear here.")
                .alignment(Alignment::Center)
                .style(Style::default().fg(Color::DarkGray))
                .block(Block::default().borders(Borders::ALL).title("Preview"))
                .render(area, buf);
            return;
        };
        let Some(slide) = deck.slide(self.index) else {
            Paragraph::new("This presentation has no slides.")
                .alignment(Alignment::Center)
                .block(Block::default().borders(Borders::ALL).title(deck.title.as_str()))
                .render(area, buf);
            return;
        };

        let bg = slide.background_hex();
        let ink = ink_for(bg);
        let base = Style::default().fg(ink).bg(rgb(bg).unwrap_or(Color::White));
        let count = deck.slide_count();
        let block = Block::default()
            .borders(Borders::ALL)
            .title(deck.title.as_str())
            .title(
                Line::from(format!(" {count} slides • Slide {} of {count} ", self.index + 1))
                    .right_aligned(),
            )
            .title_bottom(Line::from(position_dots(self.index, count)).centered())
            .title_bottom(Line::from(format!(" {} ", slide.layout.as_str())).right_aligned())
            .style(base);
        let inner = block.inner(area);
        block.render(area, buf);

        let heading = Style::default().fg(ink).add_modifier(Modifier::BOLD);

        if self.index == 0 || slide.layout == Layout::Title {
            let mut lines = vec![Line::from(Span::styled(slide.title.as_str(), heading))];
            if let Some(sub) = slide.subtitle() {
                lines.push(Line::default());
                lines.push(Line::from(Span::styled(
                    sub,
                    Style::default().fg(Color::Rgb(0x66, 0x66, 0x66)),
                )));
            }
            let height = u16::try_from(lines.len()).unwrap_or(u16::MAX);
            let top = inner.height.saturating_sub(height) / 2;
            let body = Rect {
                y: inner.y + top,
                height: inner.height.saturating_sub(top),
                ..inner
            };
            Paragraph::new(lines)
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true })
                .render(body, buf);
            return;
        }

        let rows = Split::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(2), Constraint::Min(1)])
            .split(inner);
        Paragraph::new(Span::styled(slide.title.as_str(), heading))
            .wrap(Wrap { trim: true })
            .render(rows[0], buf);

        if slide.layout == Layout::ImageContent {
            let cols = Split::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
                .split(rows[1]);
            if let Some(url) = slide.image_url.as_deref() {
                let width = usize::from(cols[0].width.saturating_sub(2));
                Paragraph::new(truncate(url, width))
                    .block(Block::default().borders(Borders::ALL).title("Image"))
                    .render(cols[0], buf);
            }
            Paragraph::new(bullet_lines(slide))
                .wrap(Wrap { trim: false })
                .render(cols[1], buf);
        } else {
            Paragraph::new(bullet_lines(slide))
                .wrap(Wrap { trim: false })
                .render(rows[1], buf);
        }
    }
}

/// Shorten `text` to `width` characters, marking the cut with `…`.
fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut out: String = text.chars().take(width.saturating_sub(1)).collect();
    if width > 0 {
        out.push('…');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widgets::buffer_text;
    use ratatui::{backend::TestBackend, Terminal};

    fn deck() -> Deck {
        Deck::new(
            "Solar Energy",
            vec![
                Slide::new("slide-1", "Solar Energy", Layout::Content)
                    .with_content(["Powering tomorrow"]),
                Slide::new("slide-2", "Benefits", Layout::Content)
                    .with_content(["Clean", "Renewable"])
                    .with_background("0F172A"),
                Slide::new("slide-3", "Panels", Layout::ImageContent)
                    .with_content(["Silicon"])
                    .with_image("https://img.example/p.png"),
            ],
        )
    }

    fn draw(deck: Option<&Deck>, index: usize) -> (String, ratatui::buffer::Buffer) {
        draw_at(deck, index, 60)
    }

    fn draw_at(deck: Option<&Deck>, index: usize, width: u16) -> (String, ratatui::buffer::Buffer) {
        let mut terminal = Terminal::new(TestBackend::new(width, 14)).unwrap();
        terminal
            .draw(|f| f.render_widget(SlideView::new(deck, index), f.area()))
            .unwrap();
        let buf = terminal.backend().buffer().clone();
        (buffer_text(&buf), buf)
    }

    #[test]
    fn placeholder_without_deck() {
        let (text, _) = draw(None, 0);
        assert!(text.contains("Your presentation will appear here."));
    }

    #[test]
    fn first_slide_shows_title_and_subtitle() {
        let d = deck();
        let (text, _) = draw(Some(&d), 0);
        assert!(text.contains("Solar Energy"));
        assert!(text.contains("Powering tomorrow"));
        assert!(text.contains("3 slides • Slide 1 of 3"));
        assert!(text.contains("● ○ ○"));
    }

    #[test]
    fn content_slide_lists_bullets_on_its_background() {
        let d = deck();
        let (text, buf) = draw(Some(&d), 1);
        assert!(text.contains("• Clean"));
        assert!(text.contains("• Renewable"));
        assert_eq!(buf[(5u16, 5u16)].bg, Color::Rgb(0x0F, 0x17, 0x2A));
    }

    #[test]
    fn image_slide_shows_link() {
        let d = deck();
        let (text, _) = draw_at(Some(&d), 2, 100);
        assert!(text.contains("https://img.example/p.png"));
        assert!(text.contains("• Silicon"));
    }

    #[test]
    fn narrow_image_box_truncates_link_on_one_row() {
        let d = deck();
        let (text, _) = draw(Some(&d), 2);
        assert!(text.contains("https://img.example/"));
        assert!(text.contains('…'));
        assert!(!text.contains("p.png"));
    }

    #[test]
    fn truncate_marks_the_cut() {
        assert_eq!(truncate("https://a.b/c.png", 40), "https://a.b/c.png");
        assert_eq!(truncate("https://a.b/c.png", 8), "https:/…");
        assert_eq!(truncate("abc", 0), "");
    }

    #[test]
    fn ink_contrasts_with_background() {
        assert_eq!(ink_for("FFFFFF"), Color::Rgb(0x36, 0x36, 0x36));
        assert_eq!(ink_for("000000"), Color::White);
    }
}
