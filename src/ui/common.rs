use egui::{Align2, Color32, RichText};

use crate::math::Rgb;
use crate::scenes::ViewKind;

pub const ACCENT: Color32 = Color32::from_rgb(74, 158, 255);
pub const SUCCESS: Color32 = Color32::from_rgb(76, 175, 80);

pub fn color32(color: Rgb) -> Color32 {
    let [r, g, b] = color.to_bytes();
    Color32::from_rgb(r, g, b)
}

/// `#rrggbb` to an egui color; unparsable input gives white
pub fn hex_color(hex: &str) -> Color32 {
    color32(Rgb::parse_hex(hex).unwrap_or(Rgb::WHITE))
}

/// Small uppercase caption above a value
pub fn caption(ui: &mut egui::Ui, text: &str, color: Color32) {
    ui.label(RichText::new(text.to_uppercase()).size(11.0).strong().color(color));
}

/// Centered card shown until a view finishes loading
pub fn loading_overlay(ctx: &egui::Context, title: &str, note: &str, progress: Option<u8>) {
    egui::Window::new("loading")
        .title_bar(false)
        .resizable(false)
        .collapsible(false)
        .anchor(Align2::CENTER_CENTER, [0.0, 0.0])
        .min_width(300.0)
        .show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add(egui::Spinner::new().size(40.0));
                ui.add_space(10.0);
                ui.label(RichText::new(title).size(18.0).strong().color(Color32::WHITE));
                ui.label(RichText::new(note).size(14.0).color(Color32::GRAY));
                if let Some(percent) = progress {
                    ui.add_space(8.0);
                    ui.add(egui::ProgressBar::new(f32::from(percent) / 100.0).fill(SUCCESS));
                }
            });
        });
}

/// Bottom-left switcher between the three views
pub fn view_selector(ctx: &egui::Context, current: ViewKind) -> Option<ViewKind> {
    let mut chosen = None;
    egui::Window::new("views")
        .title_bar(false)
        .resizable(false)
        .anchor(Align2::LEFT_BOTTOM, [10.0, -10.0])
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                for kind in ViewKind::ALL {
                    if ui.selectable_label(kind == current, kind.title()).clicked() && kind != current {
                        chosen = Some(kind);
                    }
                }
            });
        });
    chosen
}

pub fn fps_badge(ctx: &egui::Context, fps: f32) {
    egui::Window::new("FPS")
        .title_bar(false)
        .resizable(false)
        .anchor(Align2::RIGHT_BOTTOM, [-10.0, -10.0])
        .frame(egui::Frame::NONE)
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(RichText::new(format!("{:.0}", fps)).size(16.0).strong().color(ACCENT));
                ui.label(RichText::new("FPS").size(12.0).color(Color32::GRAY));
            });
        });
}

#[cfg(test)]
pub(crate) fn run_frame(build: impl FnMut(&egui::Context)) {
    let ctx = egui::Context::default();
    let _ = ctx.run(egui::RawInput::default(), build);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_colors() {
        assert_eq!(hex_color("#FF6B35"), Color32::from_rgb(0xff, 0x6b, 0x35));
        assert_eq!(hex_color("#000000ff"), Color32::BLACK);
        assert_eq!(hex_color("nope"), Color32::WHITE);
    }

    #[test]
    fn selector_reports_nothing_without_clicks() {
        let mut chosen = Some(ViewKind::Globe);
        run_frame(|ctx| {
            loading_overlay(ctx, "Cargando", "nota", Some(40));
            fps_badge(ctx, 60.0);
            chosen = view_selector(ctx, ViewKind::Solar);
        });
        assert_eq!(chosen, None);
    }
}
