use egui::{Align2, Color32, RichText};

use super::common::SUCCESS;
use crate::catalog::PlanetRecord;

const SUN_YELLOW: Color32 = Color32::from_rgb(255, 255, 0);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolarAction {
    ResetView,
    CloseInfo,
}

pub fn show(ctx: &egui::Context, selected: Option<&PlanetRecord>) -> Option<SolarAction> {
    let mut action = None;

    egui::Window::new("solar")
        .title_bar(false)
        .resizable(false)
        .fixed_pos(egui::pos2(20.0, 20.0))
        .max_width(320.0)
        .show(ctx, |ui| {
            ui.label(RichText::new("🌟 Sistema Solar").size(18.0).strong().color(SUN_YELLOW));
            ui.label(RichText::new("Haz clic en un planeta para ver su información.").color(Color32::LIGHT_GRAY));
            ui.add_space(10.0);
            let reset = egui::Button::new(RichText::new("🔄 Reiniciar Vista").strong().color(Color32::WHITE))
                .fill(SUCCESS)
                .min_size(egui::vec2(280.0, 0.0));
            if ui.add(reset).clicked() {
                action = Some(SolarAction::ResetView);
            }
        });

    if let Some(planet) = selected {
        egui::Window::new("planet-info")
            .title_bar(false)
            .resizable(false)
            .anchor(Align2::RIGHT_TOP, [-20.0, 20.0])
            .max_width(350.0)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label(RichText::new(format!("🪐 {}", planet.name)).size(22.0).strong().color(SUCCESS));
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.button(RichText::new("×").size(20.0)).clicked() {
                            action = Some(SolarAction::CloseInfo);
                        }
                    });
                });
                ui.separator();
                field(ui, "🌞 Distancia al Sol:", planet.distance_from_sun);
                field(ui, "📏 Diámetro:", planet.diameter);
                field(ui, "🕐 Período orbital:", planet.orbital_period);
                ui.add_space(10.0);
                ui.label(planet.description);
            });
    }

    action
}

fn field(ui: &mut egui::Ui, label: &str, value: &str) {
    ui.horizontal_wrapped(|ui| {
        ui.label(RichText::new(label).strong());
        ui.label(value);
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::planet;
    use crate::ui::common::run_frame;

    #[test]
    fn info_panel_renders_without_actions() {
        let mut action = Some(SolarAction::ResetView);
        run_frame(|ctx| action = show(ctx, planet("saturn")));
        assert_eq!(action, None);
    }
}
