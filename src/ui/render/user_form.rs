use super::fields::form_fields;
use super::Frame;
use crate::state::State;
use crate::ui::widgets::styling;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    widgets::{Block, Borders, Paragraph},
};

/// Render user record form according to state.
///
pub fn user_form(frame: &mut Frame, size: Rect, state: &mut State, title: &str) {
    let theme = state.theme().clone();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Length(3), // Title
                Constraint::Length(1), // Notices
                Constraint::Min(1),    // Form fields
            ]
            .as_ref(),
        )
        .split(size);

    let title_block = Block::default()
        .borders(Borders::ALL)
        .border_style(styling::active_block_border_style(&theme));
    let heading = Paragraph::new(title.to_string())
        .style(styling::active_block_title_style())
        .block(title_block)
        .alignment(Alignment::Center);
    frame.render_widget(heading, chunks[0]);

    super::render_notice(frame, chunks[1], state, &theme);

    if let Some(binding) = state.user_form() {
        form_fields(frame, chunks[2], binding, &theme);
    }
}
