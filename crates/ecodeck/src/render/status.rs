use eframe::egui::{self, FontId, Rect, Stroke};

use super::{draw_centered_text, draw_spinner};
use crate::theme::Theme;

const LOADING_HINTS: [&str; 3] = [
    "Analyzing renewable feedstocks...",
    "Reviewing China's policy contributions...",
    "Designing slides for energy efficiency...",
];

/// Spinner, heading and progress hints shown while generation is outstanding.
///
/// `replacing` is the slide count of the presentation being regenerated, if any.
pub fn draw_loading(
    ui: &egui::Ui,
    theme: &Theme,
    rect: Rect,
    scale: f32,
    replacing: Option<usize>,
) {
    ui.painter().rect_filled(rect, 0.0, theme.status_background);

    let column = 720.0 * scale;
    let center_x = rect.center().x;
    let mut y = rect.center().y - 300.0 * scale;

    let spinner_center = egui::pos2(center_x, y + 72.0 * scale);
    draw_spinner(
        ui,
        spinner_center,
        72.0 * scale,
        Stroke::new(6.0 * scale, theme.accent),
        4.0,
    );
    draw_spinner(
        ui,
        spinner_center,
        54.0 * scale,
        Stroke::new(6.0 * scale, theme.accent_soft),
        -2.5,
    );
    y += 190.0 * scale;

    let heading = if replacing.is_some() {
        "Regenerating Presentation"
    } else {
        "Synthesizing Presentation"
    };
    y += draw_centered_text(
        ui,
        heading,
        FontId::proportional(44.0 * scale),
        theme.heading_color,
        center_x,
        y,
        column,
    );
    y += 16.0 * scale;

    let subtitle = match replacing {
        Some(count) => format!(
            "Consulting Gemini for a fresh deck. \
             The current {count} slides are kept until it arrives..."
        ),
        None => "Consulting Gemini for the latest in Green Chemistry & Energy Efficiency..."
            .to_string(),
    };
    y += draw_centered_text(
        ui,
        &subtitle,
        FontId::proportional(24.0 * scale),
        theme.chrome_muted,
        center_x,
        y,
        column,
    );
    y += 40.0 * scale;

    let padding = 24.0 * scale;
    let line_height = 40.0 * scale;
    let card = Rect::from_min_size(
        egui::pos2(center_x - column / 2.0, y),
        egui::vec2(column, padding * 2.0 + line_height * LOADING_HINTS.len() as f32),
    );
    ui.painter().rect_filled(card, 12.0 * scale, theme.slide_background);
    ui.painter().rect_stroke(
        card,
        12.0 * scale,
        Stroke::new(1.0, theme.skeleton),
        egui::StrokeKind::Inside,
    );

    let mut line_y = card.top() + padding;
    for hint in LOADING_HINTS {
        let dot = egui::pos2(card.left() + padding + 6.0 * scale, line_y + line_height / 2.0);
        ui.painter().circle_filled(dot, 5.0 * scale, theme.accent_soft);
        let galley = ui.painter().layout_no_wrap(
            hint.to_string(),
            FontId::proportional(22.0 * scale),
            theme.skeleton_text,
        );
        let pos = egui::pos2(
            card.left() + padding + 24.0 * scale,
            line_y + (line_height - galley.rect.height()) / 2.0,
        );
        ui.painter().galley(pos, galley, theme.skeleton_text);
        line_y += line_height;
    }
}

/// Failure card with the error message. Returns true when "Try Again" was clicked.
pub fn draw_error(ui: &egui::Ui, theme: &Theme, rect: Rect, scale: f32, message: &str) -> bool {
    ui.painter().rect_filled(rect, 0.0, theme.error_background);

    let padding = 48.0 * scale;
    let width = 720.0 * scale;
    let inner = width - padding * 2.0;
    let center_x = rect.center().x;

    // Measure the message first so the card can be sized around it.
    let message_font = FontId::proportional(24.0 * scale);
    let message_height = ui
        .painter()
        .layout(message.to_string(), message_font.clone(), theme.body_color, inner)
        .rect
        .height();
    let icon_radius = 48.0 * scale;
    let button_height = 72.0 * scale;
    let height = padding * 2.0
        + icon_radius * 2.0
        + 32.0 * scale
        + 56.0 * scale
        + message_height
        + 32.0 * scale
        + button_height;

    let card = Rect::from_center_size(rect.center(), egui::vec2(width, height));
    ui.painter().rect_filled(card, 24.0 * scale, theme.slide_background);

    let mut y = card.top() + padding;
    let icon_center = egui::pos2(center_x, y + icon_radius);
    ui.painter().circle_filled(
        icon_center,
        icon_radius,
        Theme::with_opacity(theme.error_accent, 0.15),
    );
    let bang = ui.painter().layout_no_wrap(
        "!".to_string(),
        FontId::proportional(56.0 * scale),
        theme.error_accent,
    );
    ui.painter()
        .galley(icon_center - bang.rect.size() / 2.0, bang, theme.error_accent);
    y += icon_radius * 2.0 + 32.0 * scale;

    draw_centered_text(
        ui,
        "Generation Failed",
        FontId::proportional(40.0 * scale),
        theme.heading_color,
        center_x,
        y,
        inner,
    );
    y += 56.0 * scale;

    y += draw_centered_text(
        ui,
        message,
        message_font,
        theme.body_color,
        center_x,
        y,
        inner,
    );
    y += 32.0 * scale;

    let button = Rect::from_min_size(
        egui::pos2(card.left() + padding, y),
        egui::vec2(inner, button_height),
    );
    let response = ui.interact(button, ui.id().with("try_again"), egui::Sense::click());
    let fill = if response.hovered() {
        theme.accent_strong
    } else {
        theme.chrome_hover
    };
    ui.painter().rect_filled(button, 12.0 * scale, fill);
    let label = ui.painter().layout_no_wrap(
        "Try Again".to_string(),
        FontId::proportional(26.0 * scale),
        theme.chrome_text,
    );
    ui.painter()
        .galley(button.center() - label.rect.size() / 2.0, label, theme.chrome_text);

    response.clicked()
}
