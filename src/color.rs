use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use sapre_dashboard::data::model::Status;

// ---------------------------------------------------------------------------
// Status colours
// ---------------------------------------------------------------------------

/// One distinct colour per lifecycle status, shared by every chart so a
/// status keeps its colour across pages.
#[derive(Debug, Clone)]
pub struct StatusColors {
    colors: [Color32; Status::ALL.len()],
}

impl Default for StatusColors {
    fn default() -> Self {
        let mut colors = [Color32::GRAY; Status::ALL.len()];
        for (slot, color) in colors.iter_mut().zip(evenly_spaced_hues(Status::ALL.len())) {
            *slot = color;
        }
        Self { colors }
    }
}

impl StatusColors {
    pub fn color_for(&self, status: Status) -> Color32 {
        self.colors[status.index()]
    }
}

/// `n` visually distinct colours, hues spread evenly around the wheel.
fn evenly_spaced_hues(n: usize) -> impl Iterator<Item = Color32> {
    (0..n).map(move |i| {
        let hue = (i as f32 / n as f32) * 360.0;
        let rgb: Srgb = Hsl::new(hue, 0.70, 0.55).into_color();
        Color32::from_rgb(
            (rgb.red * 255.0) as u8,
            (rgb.green * 255.0) as u8,
            (rgb.blue * 255.0) as u8,
        )
    })
}

/// Accent used for single-series charts.
pub const ACCENT: Color32 = Color32::from_rgb(66, 133, 244);
