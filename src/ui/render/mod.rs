mod fields;
mod footer;
mod log;
mod login;
mod register;
mod user_detail;
mod user_form;
mod users;

use super::Frame;
use crate::state::{State, View};
use crate::ui::theme::Theme;
use crate::ui::widgets::styling;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::widgets::{Paragraph, Wrap};

/// Render the active view and the footer according to state.
///
pub fn render(frame: &mut Frame, state: &mut State) {
    let size = frame.size();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)].as_ref())
        .split(size);

    match state.current_view().clone() {
        View::Login => login::login(frame, chunks[0], state),
        View::Register => register::register(frame, chunks[0], state),
        View::Users => users::users(frame, chunks[0], state),
        View::UserDetail => user_detail::user_detail(frame, chunks[0], state),
        View::CreateUser => user_form::user_form(frame, chunks[0], state, "Create User"),
        View::EditUser => user_form::user_form(frame, chunks[0], state, "Edit User"),
        View::DebugLog => log::log(frame, chunks[0], state),
    }

    footer::footer(frame, chunks[1], state);

    // Confirmation dialog renders on top of everything.
    if state.delete_confirmation().is_some() {
        users::render_delete_confirmation(frame, size, state);
    }
}

/// Render the most recent error or flash notice, if any.
///
fn render_notice(frame: &mut Frame, size: Rect, state: &State, theme: &Theme) {
    let paragraph = if let Some(error) = state.api_error() {
        Paragraph::new(error.to_string()).style(styling::error_text_style(theme))
    } else if let Some(flash) = state.flash() {
        Paragraph::new(flash.to_string()).style(styling::success_text_style(theme))
    } else {
        return;
    };
    frame.render_widget(paragraph.wrap(Wrap { trim: true }), size);
}
