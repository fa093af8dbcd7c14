use super::fields::{form_fields, FIELD_HEIGHT};
use super::login::BANNER;
use super::Frame;
use crate::state::State;
use crate::ui::widgets::styling;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::Text,
    widgets::{Block, Borders, Paragraph, Wrap},
};

const INSTRUCTIONS: &str =
    "Create an account for the user directory.\nEnter: register    Tab: next field    Esc: back to sign in";

/// Render registration form according to state.
///
pub fn register(frame: &mut Frame, size: Rect, state: &mut State) {
    let theme = state.theme().clone();

    let block = Block::default()
        .borders(Borders::ALL)
        .title("Userdeck - Register")
        .border_style(styling::active_block_border_style(&theme));
    frame.render_widget(block, size);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Length(7),                // Banner
                Constraint::Length(3),                // Instructions
                Constraint::Length(2),                // Notices
                Constraint::Length(4 * FIELD_HEIGHT), // Account fields
                Constraint::Min(0),                   // Fill remaining space
            ]
            .as_ref(),
        )
        .margin(2)
        .split(size);

    let mut banner = Text::from(BANNER);
    banner = banner.patch_style(styling::banner_style(&theme));
    let banner_widget = Paragraph::new(banner).alignment(Alignment::Center);
    frame.render_widget(banner_widget, chunks[0]);

    let instructions = Paragraph::new(INSTRUCTIONS)
        .style(styling::muted_text_style(&theme))
        .wrap(Wrap { trim: true });
    frame.render_widget(instructions, chunks[1]);

    super::render_notice(frame, chunks[2], state, &theme);

    form_fields(frame, chunks[3], state.register_form(), &theme);
}
