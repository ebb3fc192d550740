use eframe::egui::Color32;

/// Palette and type sizes for every view, in 1920x1080 reference pixels.
#[derive(Debug, Clone)]
pub struct Theme {
    pub backdrop: Color32,
    pub chrome: Color32,
    pub chrome_hover: Color32,
    pub chrome_text: Color32,
    pub chrome_muted: Color32,
    pub slide_background: Color32,
    pub slide_wash: Color32,
    pub heading_color: Color32,
    pub body_color: Color32,
    pub accent: Color32,
    pub accent_soft: Color32,
    pub accent_strong: Color32,
    pub highlight_background: Color32,
    pub highlight_text: Color32,
    pub skeleton: Color32,
    pub skeleton_text: Color32,
    pub notes_background: Color32,
    pub notes_border: Color32,
    pub notes_heading: Color32,
    pub notes_text: Color32,
    pub status_background: Color32,
    pub error_background: Color32,
    pub error_accent: Color32,
    pub label_size: f32,
    pub title_size: f32,
    pub body_size: f32,
    pub highlight_size: f32,
    pub notes_size: f32,
}

impl Theme {
    /// Slate chrome around an emerald-accented white slide.
    pub fn emerald() -> Self {
        Self {
            backdrop: Color32::from_rgb(0x0F, 0x17, 0x2A),
            chrome: Color32::from_rgb(0x1E, 0x29, 0x3B),
            chrome_hover: Color32::from_rgb(0x05, 0x96, 0x69),
            chrome_text: Color32::WHITE,
            chrome_muted: Color32::from_rgb(0x94, 0xA3, 0xB8),
            slide_background: Color32::WHITE,
            slide_wash: Color32::from_rgb(0xEC, 0xFD, 0xF5),
            heading_color: Color32::from_rgb(0x0F, 0x17, 0x2A),
            body_color: Color32::from_rgb(0x33, 0x41, 0x55),
            accent: Color32::from_rgb(0x10, 0xB9, 0x81),
            accent_soft: Color32::from_rgb(0x34, 0xD3, 0x99),
            accent_strong: Color32::from_rgb(0x05, 0x96, 0x69),
            highlight_background: Color32::from_rgb(0xD1, 0xFA, 0xE5),
            highlight_text: Color32::from_rgb(0x06, 0x4E, 0x3B),
            skeleton: Color32::from_rgb(0xE2, 0xE8, 0xF0),
            skeleton_text: Color32::from_rgb(0x94, 0xA3, 0xB8),
            notes_background: Color32::from_rgb(0xFE, 0xFC, 0xE8),
            notes_border: Color32::from_rgb(0xFE, 0xF0, 0x8A),
            notes_heading: Color32::from_rgb(0x85, 0x4D, 0x0E),
            notes_text: Color32::from_rgb(0x1E, 0x29, 0x3B),
            status_background: Color32::from_rgb(0xF8, 0xFA, 0xFC),
            error_background: Color32::from_rgb(0xFE, 0xF2, 0xF2),
            error_accent: Color32::from_rgb(0xEF, 0x44, 0x44),
            label_size: 20.0,
            title_size: 64.0,
            body_size: 30.0,
            highlight_size: 28.0,
            notes_size: 22.0,
        }
    }

    /// Apply opacity to a color
    pub fn with_opacity(color: Color32, opacity: f32) -> Color32 {
        Color32::from_rgba_unmultiplied(color.r(), color.g(), color.b(), (opacity * 255.0) as u8)
    }

    /// Linear blend between two colors, `t` in 0..=1.
    pub fn mix(a: Color32, b: Color32, t: f32) -> Color32 {
        let t = t.clamp(0.0, 1.0);
        let channel = |x: u8, y: u8| (x as f32 + (y as f32 - x as f32) * t).round() as u8;
        Color32::from_rgb(
            channel(a.r(), b.r()),
            channel(a.g(), b.g()),
            channel(a.b(), b.b()),
        )
    }
}
