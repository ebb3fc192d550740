pub mod deck;
pub mod image_cache;
pub mod status;

use eframe::egui::{self, Color32, FontId, Pos2, Rect, Stroke};

use crate::theme::Theme;

/// Scale factor relative to a 1920x1080 reference canvas.
pub fn compute_scale(rect: Rect) -> f32 {
    let ref_w = 1920.0;
    let ref_h = 1080.0;
    (rect.width() / ref_w).min(rect.height() / ref_h)
}

/// A painted pill button with an interaction region.
pub struct Button<'a> {
    pub id: &'a str,
    pub label: &'a str,
    pub rect: Rect,
    pub enabled: bool,
    pub active: bool,
}

impl Button<'_> {
    /// Paint the button and report whether it was clicked this frame.
    pub fn show(self, ui: &egui::Ui, theme: &Theme, scale: f32) -> bool {
        let sense = if self.enabled {
            egui::Sense::click()
        } else {
            egui::Sense::hover()
        };
        let response = ui.interact(self.rect, ui.id().with(self.id), sense);

        let (fill, text) = if !self.enabled {
            (
                Theme::with_opacity(theme.chrome, 0.3),
                Theme::with_opacity(theme.chrome_text, 0.3),
            )
        } else if response.hovered() {
            (theme.chrome_hover, theme.chrome_text)
        } else if self.active {
            (theme.chrome, theme.accent_soft)
        } else {
            (theme.chrome, theme.chrome_muted)
        };

        let radius = self.rect.height() / 2.0;
        ui.painter().rect_filled(self.rect, radius, fill);
        let galley = ui.painter().layout_no_wrap(
            self.label.to_string(),
            FontId::proportional(theme.label_size * scale),
            text,
        );
        let pos = self.rect.center() - galley.rect.size() / 2.0;
        ui.painter().galley(pos, galley, text);

        self.enabled && response.clicked()
    }
}

/// Draw wrapped text and return its height.
pub fn draw_text(
    ui: &egui::Ui,
    text: &str,
    font: FontId,
    color: Color32,
    pos: Pos2,
    max_width: f32,
) -> f32 {
    let galley = ui.painter().layout(text.to_string(), font, color, max_width);
    let height = galley.rect.height();
    ui.painter().galley(pos, galley, color);
    height
}

/// Draw text centered horizontally on `center_x`, returning its height.
pub fn draw_centered_text(
    ui: &egui::Ui,
    text: &str,
    font: FontId,
    color: Color32,
    center_x: f32,
    top: f32,
    max_width: f32,
) -> f32 {
    let galley = ui.painter().layout(text.to_string(), font, color, max_width);
    let height = galley.rect.height();
    let pos = egui::pos2(center_x - galley.rect.width() / 2.0, top);
    ui.painter().galley(pos, galley, color);
    height
}

/// Vertical two-color gradient over `rect`.
pub fn draw_vertical_gradient(ui: &egui::Ui, rect: Rect, top: Color32, bottom: Color32) {
    let mut mesh = egui::Mesh::default();
    mesh.colored_vertex(rect.left_top(), top);
    mesh.colored_vertex(rect.right_top(), top);
    mesh.colored_vertex(rect.left_bottom(), bottom);
    mesh.colored_vertex(rect.right_bottom(), bottom);
    // Two triangles: (0,2,1) and (1,2,3)
    mesh.add_triangle(0, 2, 1);
    mesh.add_triangle(1, 2, 3);
    ui.painter().add(egui::Shape::mesh(mesh));
}

/// Rotating arc used while waiting on the generation service.
pub fn draw_spinner(ui: &egui::Ui, center: Pos2, radius: f32, stroke: Stroke, speed: f32) {
    let time = ui.input(|i| i.time) as f32;
    let start = time * speed;
    let sweep = std::f32::consts::PI * 1.2;
    let segments = 32;
    let points: Vec<Pos2> = (0..=segments)
        .map(|i| {
            let angle = start + sweep * i as f32 / segments as f32;
            center + radius * egui::vec2(angle.cos(), angle.sin())
        })
        .collect();
    ui.painter().add(egui::Shape::line(points, stroke));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compute_scale_reference() {
        let rect = Rect::from_min_size(Pos2::ZERO, egui::vec2(1920.0, 1080.0));
        assert_eq!(compute_scale(rect), 1.0);
    }

    #[test]
    fn test_compute_scale_limited_by_height() {
        let rect = Rect::from_min_size(Pos2::ZERO, egui::vec2(1920.0, 540.0));
        assert_eq!(compute_scale(rect), 0.5);
    }
}
