use super::Frame;
use crate::directory::User;
use crate::state::State;
use crate::ui::theme::Theme;
use crate::ui::widgets::{spinner, styling};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    widgets::{Block, Borders, Paragraph},
};

/// Render user detail view according to state.
///
pub fn user_detail(frame: &mut Frame, size: Rect, state: &mut State) {
    let theme = state.theme().clone();

    let user = match state.current_user() {
        Some(user) => user.clone(),
        None => {
            let text = format!("{} Loading user...", spinner::frame(state.spinner_index()));
            let placeholder = Paragraph::new(text)
                .style(styling::muted_text_style(&theme))
                .alignment(Alignment::Center)
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .title("User")
                        .border_style(styling::normal_block_border_style(&theme)),
                );
            frame.render_widget(placeholder, size);
            return;
        }
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Length(7), // Contact
                Constraint::Length(8), // Address
                Constraint::Length(5), // Company
                Constraint::Min(0),    // Fill remaining space
            ]
            .as_ref(),
        )
        .split(size);

    render_section(
        frame,
        chunks[0],
        &theme,
        &format!("{} (#{})", user.name, user.id),
        &contact_lines(&user),
    );
    render_section(frame, chunks[1], &theme, "Address", &address_lines(&user));
    render_section(frame, chunks[2], &theme, "Company", &company_lines(&user));
}

fn contact_lines(user: &User) -> String {
    format!(
        "Username: {}\nEmail:    {}\nPhone:    {}\nWebsite:  {}\n(y: copy email to clipboard)",
        user.username, user.email, user.phone, user.website
    )
}

fn address_lines(user: &User) -> String {
    format!(
        "Street:  {}\nSuite:   {}\nCity:    {}\nZipcode: {}\nGeo:     {}, {}",
        user.address.street,
        user.address.suite,
        user.address.city,
        user.address.zipcode,
        user.address.geo.lat,
        user.address.geo.lng
    )
}

fn company_lines(user: &User) -> String {
    format!(
        "Name:         {}\nCatch phrase: {}\nBusiness:     {}",
        user.company.name, user.company.catch_phrase, user.company.bs
    )
}

fn render_section(frame: &mut Frame, size: Rect, theme: &Theme, title: &str, content: &str) {
    let section = Paragraph::new(content.to_string())
        .style(styling::normal_text_style(theme))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(title.to_string())
                .border_style(styling::normal_block_border_style(theme)),
        );
    frame.render_widget(section, size);
}
