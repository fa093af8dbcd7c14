use super::Frame;
use crate::state::State;
use crate::ui::widgets::styling;
use ratatui::{
    layout::Rect,
    style::Style,
    widgets::{Block, Borders},
};
use tui_logger::{TuiLoggerLevelOutput, TuiLoggerWidget};

/// Render debug log widget according to state.
///
pub fn log(frame: &mut Frame, size: Rect, state: &mut State) {
    let theme = state.theme();
    let widget = TuiLoggerWidget::default()
        .block(
            Block::default()
                .title("Debug Log (Esc: back)")
                .borders(Borders::ALL)
                .border_style(styling::active_block_border_style(theme)),
        )
        .style_error(styling::error_text_style(theme))
        .style_warn(Style::default().fg(theme.warning.to_color()))
        .style_info(Style::default().fg(theme.info.to_color()))
        .style_debug(styling::muted_text_style(theme))
        .style_trace(styling::muted_text_style(theme))
        .output_separator(' ')
        .output_timestamp(Some("%H:%M:%S".to_string()))
        .output_level(Some(TuiLoggerLevelOutput::Abbreviated))
        .output_target(false)
        .output_file(false)
        .output_line(false);
    frame.render_widget(widget, size);
}
