use super::Frame;
use crate::state::{State, View};
use crate::ui::widgets::{spinner, styling};
use crate::utils::text_processing;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    widgets::Paragraph,
};

/// Return the key hints for the current view.
///
fn hints_for_view(view: &View) -> &'static str {
    match view {
        View::Login => " Enter: sign in | Tab: next | Ctrl+R: register | Ctrl+C: quit",
        View::Register => " Enter: register | Tab: next | Esc: back | Ctrl+C: quit",
        View::Users => {
            " Enter: details | n: new | e: edit | d: delete | r: refresh | L: log out | D: log | q: quit"
        }
        View::UserDetail => " e: edit | d: delete | y: copy email | D: log | Esc: back",
        View::CreateUser | View::EditUser => {
            " Type to edit | Tab: next field | Enter: submit | Esc: cancel"
        }
        View::DebugLog => " Esc: back",
    }
}

/// Render footer widget according to state.
///
pub fn footer(frame: &mut Frame, size: Rect, state: &State) {
    let theme = state.theme();

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(10), Constraint::Length(40)].as_ref())
        .split(size);

    let hints = Paragraph::new(hints_for_view(state.current_view()))
        .style(styling::muted_text_style(theme));
    frame.render_widget(hints, chunks[0]);

    let status_width = chunks[1].width.saturating_sub(1) as usize;
    let status = if state.is_loading() {
        Paragraph::new(format!(
            "{} Loading... ",
            spinner::frame(state.spinner_index())
        ))
        .style(styling::normal_text_style(theme))
    } else if let Some(error) = state.api_error() {
        Paragraph::new(format!("{} ", text_processing::truncate_text(error, status_width)))
            .style(styling::error_text_style(theme))
    } else if let Some(flash) = state.flash() {
        Paragraph::new(format!("{} ", text_processing::truncate_text(flash, status_width)))
            .style(styling::success_text_style(theme))
    } else {
        Paragraph::new("")
    };
    frame.render_widget(status.alignment(Alignment::Right), chunks[1]);
}
