use super::Frame;
use crate::state::State;
use crate::ui::widgets::{spinner, styling};
use crate::utils::text_processing;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap},
};

/// Render user list according to state.
///
pub fn users(frame: &mut Frame, size: Rect, state: &mut State) {
    let theme = state.theme().clone();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(1)].as_ref())
        .split(size);

    let header_text = match state.session() {
        Some(session) => format!(
            "Logged in as {} since {}",
            session.username,
            session.logged_in_at.format("%Y-%m-%d %H:%M UTC")
        ),
        None => String::from("Not logged in"),
    };
    let header = Paragraph::new(header_text)
        .style(styling::muted_text_style(&theme))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(Line::from(Span::styled(
                    "Users",
                    styling::active_block_title_style(),
                )))
                .border_style(styling::normal_block_border_style(&theme)),
        );
    frame.render_widget(header, chunks[0]);

    let list_block = Block::default()
        .borders(Borders::ALL)
        .title(format!("{} records", state.users().len()))
        .border_style(styling::active_block_border_style(&theme));

    if state.users().is_empty() {
        let text = if state.is_loading() {
            format!("{} Loading users...", spinner::frame(state.spinner_index()))
        } else {
            String::from("No user records. Press r to refresh.")
        };
        let placeholder = Paragraph::new(text)
            .style(styling::muted_text_style(&theme))
            .alignment(Alignment::Center)
            .block(list_block);
        frame.render_widget(placeholder, chunks[1]);
        return;
    }

    let width = chunks[1].width.saturating_sub(4) as usize;
    let items: Vec<ListItem> = state
        .users()
        .iter()
        .map(|user| {
            let line = format!(
                "{:<24} {:<16} {}",
                text_processing::truncate_text(&user.name, 24),
                text_processing::truncate_text(&user.username, 16),
                user.email
            );
            ListItem::new(text_processing::truncate_text(&line, width))
                .style(styling::normal_text_style(&theme))
        })
        .collect();

    let list = List::new(items)
        .block(list_block)
        .highlight_style(styling::current_list_item_style(&theme))
        .highlight_symbol("> ");
    frame.render_stateful_widget(list, chunks[1], state.users_list_state());
}

/// Render delete confirmation dialog on top of the current view.
///
pub fn render_delete_confirmation(frame: &mut Frame, size: Rect, state: &State) {
    let theme = state.theme();
    let name = state
        .delete_confirmation()
        .and_then(|id| {
            state
                .users()
                .iter()
                .find(|user| user.id == id)
                .map(|user| user.name.clone())
                .or_else(|| state.current_user().map(|user| user.name.clone()))
        })
        .unwrap_or_else(|| String::from("this user"));

    let area = centered_rect(46, 5, size);
    frame.render_widget(Clear, area);
    let dialog = Paragraph::new(format!("Delete {}?\n\ny: confirm    n: cancel", name))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .style(styling::normal_text_style(theme))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Confirm Delete")
                .border_style(styling::error_text_style(theme)),
        );
    frame.render_widget(dialog, area);
}

fn centered_rect(width: u16, height: u16, size: Rect) -> Rect {
    let width = width.min(size.width);
    let height = height.min(size.height);
    Rect {
        x: size.x + (size.width - width) / 2,
        y: size.y + (size.height - height) / 2,
        width,
        height,
    }
}
