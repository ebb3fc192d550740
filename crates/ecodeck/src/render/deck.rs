use eframe::egui::{self, Color32, FontId, Pos2, Rect, Stroke, Vec2};

use super::image_cache::ImageCache;
use super::{Button, draw_text, draw_vertical_gradient};
use crate::slide::{Presentation, SlideContent};
use crate::state::{Event, ViewState};
use crate::theme::Theme;

const APP_LABEL: &str = "ECOCHEM SLIDES";
/// Share of the slide width given to the picture.
const VISUAL_FRACTION: f32 = 5.0 / 12.0;

/// Everything the slide view needs for one frame.
pub struct DeckView<'a> {
    pub presentation: &'a Presentation,
    pub view: &'a ViewState,
    pub image_cache: &'a ImageCache,
    pub image_url: &'a str,
}

impl DeckView<'_> {
    fn slide(&self) -> Option<&SlideContent> {
        self.presentation.get(self.view.current_index())
    }

    /// Paint the current slide with its chrome and return the input events it produced.
    pub fn draw(&self, ui: &egui::Ui, theme: &Theme, rect: Rect, scale: f32) -> Vec<Event> {
        let mut events = Vec::new();
        let Some(slide) = self.slide() else {
            return events;
        };

        ui.painter().rect_filled(rect, 0.0, theme.backdrop);
        let outer = if self.view.fullscreen() {
            rect
        } else {
            rect.shrink(32.0 * scale)
        };

        let bar_height = 56.0 * scale;
        let controls_height = 72.0 * scale;
        let gap = 24.0 * scale;

        let top_bar = Rect::from_min_size(outer.min, egui::vec2(outer.width(), bar_height));
        let controls = Rect::from_min_max(
            egui::pos2(outer.left(), outer.bottom() - controls_height),
            outer.max,
        );
        let slide_rect = Rect::from_min_max(
            egui::pos2(outer.left(), top_bar.bottom() + gap),
            egui::pos2(outer.right(), controls.top() - gap),
        );

        self.draw_top_bar(ui, theme, top_bar, scale, &mut events);
        ui.painter()
            .rect_filled(slide_rect, 24.0 * scale, theme.slide_background);

        let visual_width = slide_rect.width() * VISUAL_FRACTION;
        let text_rect = Rect::from_min_max(
            slide_rect.min,
            egui::pos2(slide_rect.right() - visual_width, slide_rect.bottom()),
        );
        let visual_rect = Rect::from_min_max(
            egui::pos2(text_rect.right(), slide_rect.top()),
            slide_rect.max,
        );

        self.draw_text_panel(ui, theme, text_rect, scale, slide);
        let texture = self.image_cache.texture(self.image_url);
        let (visual, loaded) = visual_state(self.view, texture.is_some());
        if let Some(event) = loaded {
            events.push(event);
            ui.ctx().request_repaint();
        }
        let picture = texture.filter(|_| visual == Visual::Picture);
        self.draw_visual_panel(ui, theme, visual_rect, scale, slide, picture);

        if self.view.notes_visible() {
            draw_notes(ui, theme, slide_rect, scale, &slide.notes);
        }

        self.draw_controls(ui, theme, controls, scale, &mut events);
        events
    }

    fn draw_top_bar(
        &self,
        ui: &egui::Ui,
        theme: &Theme,
        bar: Rect,
        scale: f32,
        events: &mut Vec<Event>,
    ) {
        let label = ui.painter().layout_no_wrap(
            APP_LABEL.to_string(),
            FontId::proportional(theme.label_size * scale),
            theme.accent_soft,
        );
        let label_pos = egui::pos2(
            bar.left() + 8.0 * scale,
            bar.center().y - label.rect.height() / 2.0,
        );
        ui.painter().galley(label_pos, label, theme.accent_soft);

        let fullscreen_label = if self.view.fullscreen() {
            "Exit Fullscreen"
        } else {
            "Fullscreen"
        };
        let buttons = [
            ("regenerate", "Regenerate", false, Event::Regenerate),
            (
                "notes",
                "Speaker Notes",
                self.view.notes_visible(),
                Event::ToggleNotes,
            ),
            ("fullscreen", fullscreen_label, false, Event::ToggleFullscreen),
        ];

        let height = 44.0 * scale;
        let width = 200.0 * scale;
        let spacing = 12.0 * scale;
        let mut right = bar.right();
        for (id, text, active, event) in buttons.into_iter().rev() {
            let rect = Rect::from_min_size(
                egui::pos2(right - width, bar.center().y - height / 2.0),
                egui::vec2(width, height),
            );
            let button = Button {
                id,
                label: text,
                rect,
                enabled: true,
                active,
            };
            if button.show(ui, theme, scale) {
                events.push(event);
            }
            right -= width + spacing;
        }
    }

    fn draw_text_panel(
        &self,
        ui: &egui::Ui,
        theme: &Theme,
        rect: Rect,
        scale: f32,
        slide: &SlideContent,
    ) {
        draw_vertical_gradient(
            ui,
            rect.shrink(12.0 * scale),
            theme.slide_wash,
            theme.slide_background,
        );

        let padding = 80.0 * scale;
        let content = rect.shrink(padding);
        let width = content.width();
        let mut y = content.top();

        let label = slide_label(self.view.current_index(), self.presentation.len());
        y += draw_text(
            ui,
            &label,
            FontId::proportional(theme.label_size * scale),
            theme.accent_strong,
            egui::pos2(content.left(), y),
            width,
        );
        y += 12.0 * scale;

        y += draw_text(
            ui,
            &slide.title,
            FontId::proportional(theme.title_size * scale),
            theme.heading_color,
            egui::pos2(content.left(), y),
            width,
        );
        y += 24.0 * scale;

        let rule = Rect::from_min_size(
            egui::pos2(content.left(), y),
            egui::vec2(80.0 * scale, 4.0 * scale),
        );
        ui.painter().rect_filled(rule, 2.0 * scale, theme.accent);
        y += 48.0 * scale;

        let bullet_font = FontId::proportional(theme.body_size * scale);
        let indent = 28.0 * scale;
        for bullet in &slide.bullets {
            let dot = egui::pos2(
                content.left() + 5.0 * scale,
                y + theme.body_size * scale * 0.6,
            );
            ui.painter().circle_filled(dot, 5.0 * scale, theme.accent_soft);
            y += draw_text(
                ui,
                bullet,
                bullet_font.clone(),
                theme.body_color,
                egui::pos2(content.left() + indent, y),
                width - indent,
            );
            y += 20.0 * scale;
        }

        // Highlight box sits at the bottom of the panel, or below the bullets if they run long.
        let box_padding = 24.0 * scale;
        let quote = format!("\u{201C}{}\u{201D}", slide.highlight);
        let galley = ui.painter().layout(
            quote,
            FontId::proportional(theme.highlight_size * scale),
            theme.highlight_text,
            width - box_padding * 2.0,
        );
        let box_height = galley.rect.height() + box_padding * 2.0;
        let box_top = (content.bottom() - box_height).max(y + 16.0 * scale);
        let highlight = Rect::from_min_size(
            egui::pos2(content.left(), box_top),
            egui::vec2(width, box_height),
        );
        ui.painter().rect_filled(highlight, 8.0 * scale, theme.highlight_background);
        let bar = Rect::from_min_size(highlight.min, egui::vec2(6.0 * scale, box_height));
        ui.painter().rect_filled(bar, 0.0, theme.accent);
        ui.painter().galley(
            egui::pos2(highlight.left() + box_padding, highlight.top() + box_padding),
            galley,
            theme.highlight_text,
        );
    }

    /// Paint the picture, or its skeleton when `picture` is `None`.
    fn draw_visual_panel(
        &self,
        ui: &egui::Ui,
        theme: &Theme,
        rect: Rect,
        scale: f32,
        slide: &SlideContent,
        picture: Option<&egui::TextureHandle>,
    ) {
        match picture {
            Some(texture) => {
                let uv = cover_uv(texture.size_vec2(), rect.size());
                ui.painter().image(texture.id(), rect, uv, Color32::WHITE);
            }
            None => {
                let time = ui.input(|i| i.time) as f32;
                let pulse = 0.75 + 0.25 * (time * 2.0).sin();
                ui.painter().rect_filled(
                    rect,
                    0.0,
                    Theme::mix(theme.skeleton, theme.slide_background, 1.0 - pulse),
                );
                let galley = ui.painter().layout_no_wrap(
                    "Loading Visual...".to_string(),
                    FontId::proportional(theme.label_size * scale),
                    theme.skeleton_text,
                );
                ui.painter()
                    .galley(rect.center() - galley.rect.size() / 2.0, galley, theme.skeleton_text);
            }
        }

        let fade = Rect::from_min_max(egui::pos2(rect.left(), rect.center().y), rect.max);
        draw_vertical_gradient(
            ui,
            fade,
            Theme::with_opacity(theme.backdrop, 0.0),
            Theme::with_opacity(theme.backdrop, 0.6),
        );

        let padding = 12.0 * scale;
        let concept = ui.painter().layout_no_wrap(
            format!("CONCEPT: {}", slide.image_keyword.to_uppercase()),
            FontId::monospace(theme.label_size * 0.9 * scale),
            Theme::with_opacity(Color32::WHITE, 0.8),
        );
        let chip = Rect::from_min_size(
            egui::pos2(
                rect.left() + 48.0 * scale,
                rect.bottom() - 48.0 * scale - concept.rect.height() - padding * 2.0,
            ),
            concept.rect.size() + egui::vec2(padding * 2.0, padding * 2.0),
        );
        ui.painter()
            .rect_filled(chip, 6.0 * scale, Theme::with_opacity(Color32::BLACK, 0.3));
        ui.painter().galley(
            chip.min + egui::vec2(padding, padding),
            concept,
            Color32::WHITE,
        );
    }

    fn draw_controls(
        &self,
        ui: &egui::Ui,
        theme: &Theme,
        bar: Rect,
        scale: f32,
        events: &mut Vec<Event>,
    ) {
        let index = self.view.current_index();
        let len = self.presentation.len();
        let width = 200.0 * scale;
        let height = 60.0 * scale;
        let y = bar.center().y - height / 2.0;

        let previous = Button {
            id: "previous",
            label: "\u{2039}  Previous",
            rect: Rect::from_min_size(
                egui::pos2(bar.left() + 16.0 * scale, y),
                egui::vec2(width, height),
            ),
            enabled: index > 0,
            active: false,
        };
        if previous.show(ui, theme, scale) {
            events.push(Event::Previous);
        }

        let next = Button {
            id: "next",
            label: "Next  \u{203A}",
            rect: Rect::from_min_size(
                egui::pos2(bar.right() - 16.0 * scale - width, y),
                egui::vec2(width, height),
            ),
            enabled: index + 1 < len,
            active: false,
        };
        if next.show(ui, theme, scale) {
            events.push(Event::Next);
        }

        for (i, dot) in dot_rects(len, index, bar.center(), scale).into_iter().enumerate() {
            let response = ui.interact(
                dot.expand(6.0 * scale),
                ui.id().with(("dot", i)),
                egui::Sense::click(),
            );
            let color = if i == index {
                theme.accent
            } else if response.hovered() {
                theme.chrome_muted
            } else {
                theme.chrome
            };
            ui.painter().rect_filled(dot, dot.height() / 2.0, color);
            if response.clicked() {
                events.push(Event::JumpTo(i));
            }
        }
    }
}

fn draw_notes(ui: &egui::Ui, theme: &Theme, slide_rect: Rect, scale: f32, notes: &str) {
    let padding = 28.0 * scale;
    let width = 480.0 * scale;
    let max_height = slide_rect.height() * 0.5;
    let inner = width - padding * 2.0;

    let heading = ui.painter().layout_no_wrap(
        "SPEAKER NOTES".to_string(),
        FontId::proportional(theme.label_size * scale),
        theme.notes_heading,
    );
    let body = ui.painter().layout(
        notes.to_string(),
        FontId::proportional(theme.notes_size * scale),
        theme.notes_text,
        inner,
    );
    let content_height = heading.rect.height() + 12.0 * scale + body.rect.height();
    let height = (content_height + padding * 2.0).min(max_height);

    let overlay = Rect::from_min_size(
        egui::pos2(
            slide_rect.right() - 24.0 * scale - width,
            slide_rect.bottom() - 24.0 * scale - height,
        ),
        egui::vec2(width, height),
    );
    ui.painter()
        .rect_filled(overlay, 12.0 * scale, theme.notes_background);
    ui.painter().rect_stroke(
        overlay,
        12.0 * scale,
        Stroke::new(1.0, theme.notes_border),
        egui::StrokeKind::Inside,
    );

    let painter = ui.painter().with_clip_rect(overlay.shrink(padding / 2.0));
    let heading_pos = overlay.min + egui::vec2(padding, padding);
    let body_pos = heading_pos + egui::vec2(0.0, heading.rect.height() + 12.0 * scale);
    painter.galley(heading_pos, heading, theme.notes_heading);
    painter.galley(body_pos, body, theme.notes_text);
}

/// "SLIDE 3 / 10" for the zero-based `index`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visual {
    Skeleton,
    Picture,
}

/// The picture shows only once the current slide is marked loaded. A ready
/// texture on an unmarked slide yields the event that marks it.
pub fn visual_state(view: &ViewState, texture_ready: bool) -> (Visual, Option<Event>) {
    let index = view.current_index();
    match (view.is_image_loaded(index), texture_ready) {
        (true, true) => (Visual::Picture, None),
        (false, true) => (Visual::Skeleton, Some(Event::ImageLoaded(index))),
        (_, false) => (Visual::Skeleton, None),
    }
}

pub fn slide_label(index: usize, len: usize) -> String {
    format!("SLIDE {} / {len}", index + 1)
}

/// UV window that fills `target` with a texture of `texture` size, cropping the overflow.
pub fn cover_uv(texture: Vec2, target: Vec2) -> Rect {
    if texture.x <= 0.0 || texture.y <= 0.0 || target.x <= 0.0 || target.y <= 0.0 {
        return Rect::from_min_max(Pos2::ZERO, egui::pos2(1.0, 1.0));
    }
    let texture_aspect = texture.x / texture.y;
    let target_aspect = target.x / target.y;
    if texture_aspect > target_aspect {
        let visible = target_aspect / texture_aspect;
        let margin = (1.0 - visible) / 2.0;
        Rect::from_min_max(egui::pos2(margin, 0.0), egui::pos2(1.0 - margin, 1.0))
    } else {
        let visible = texture_aspect / target_aspect;
        let margin = (1.0 - visible) / 2.0;
        Rect::from_min_max(egui::pos2(0.0, margin), egui::pos2(1.0, 1.0 - margin))
    }
}

/// Progress dots centered on `center`; the active one is stretched.
pub fn dot_rects(len: usize, active: usize, center: Pos2, scale: f32) -> Vec<Rect> {
    let dot = 10.0 * scale;
    let wide = 40.0 * scale;
    let gap = 10.0 * scale;
    let widths: Vec<f32> = (0..len).map(|i| if i == active { wide } else { dot }).collect();
    let total: f32 = widths.iter().sum::<f32>() + gap * len.saturating_sub(1) as f32;

    let mut x = center.x - total / 2.0;
    widths
        .into_iter()
        .map(|w| {
            let rect = Rect::from_min_size(egui::pos2(x, center.y - dot / 2.0), egui::vec2(w, dot));
            x += w + gap;
            rect
        })
        .collect()
}
