pub mod chat;
pub mod composer;
pub mod slide_view;
pub mod status_bar;
pub mod thoughts;

pub use chat::ChatWidget;
pub use composer::ComposerWidget;
pub use slide_view::SlideView;
pub use status_bar::StatusBar;
pub use thoughts::ThoughtsWidget;

#[cfg(test)]
pub(crate) fn buffer_text(buf: &ratatui::buffer::Buffer) -> String {
    let area = buf.area;
    let mut out = String::new();
    for y in area.top()..area.bottom() {
        for x in area.left()..area.right() {
            out.push_str(buf[(x, y)].symbol());
        }
        out.push('\n');
    }
    out
}
