use super::Frame;
use crate::form::FieldStatus;
use crate::state::FormBinding;
use crate::ui::theme::Theme;
use crate::ui::widgets::styling;
use crate::utils::text_processing;
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

/// Rendered height of one form field block.
pub const FIELD_HEIGHT: u16 = 3;

/// Render a form binding's fields as a stack of bordered inputs, windowed so
/// the focused field stays visible. Error feedback only appears on touched
/// fields; the focused field carries the input cursor.
///
pub fn form_fields(frame: &mut Frame, size: Rect, binding: &FormBinding, theme: &Theme) {
    let per_screen = ((size.height / FIELD_HEIGHT).max(1)) as usize;
    let start = if binding.cursor() >= per_screen {
        binding.cursor() + 1 - per_screen
    } else {
        0
    };

    for (offset, index) in (start..binding.fields().len()).take(per_screen).enumerate() {
        let spec = binding.fields()[index];
        let focused = index == binding.cursor();
        let status = binding.status(&spec);

        let title_style = if focused {
            styling::active_block_title_style()
        } else {
            Style::default()
        };
        let mut title_spans = vec![Span::styled(spec.label, title_style)];
        if status == FieldStatus::Invalid {
            if let Some(message) = binding.error(&spec) {
                title_spans.push(Span::styled(
                    format!(" ({})", message),
                    styling::error_text_style(theme),
                ));
            }
        }

        let text = if spec.secret {
            text_processing::mask_secret(binding.text(&spec))
        } else {
            binding.text(&spec).to_string()
        };
        let content = if focused {
            format!("{}▌", text)
        } else {
            text
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .title(Line::from(title_spans))
            .border_style(styling::field_border_style(theme, status, focused));
        let paragraph = Paragraph::new(content)
            .block(block)
            .style(styling::normal_text_style(theme));

        let y_offset = (offset as u16) * FIELD_HEIGHT;
        let height = FIELD_HEIGHT.min(size.height.saturating_sub(y_offset));
        if height == 0 {
            break;
        }
        let area = Rect {
            x: size.x,
            y: size.y + y_offset,
            width: size.width,
            height,
        };
        frame.render_widget(paragraph, area);
    }
}
