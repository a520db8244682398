use egui::{Align2, Color32, RichText};

use super::common::{caption, hex_color};
use crate::catalog::ShapeKind;
use crate::math::Rgb;
use crate::scenes::geometry_explorer::{ExplorerState, MAX_SCALE, MIN_SCALE};

const LABEL: Color32 = Color32::from_rgb(147, 197, 253);
const MUTED: Color32 = Color32::from_rgb(148, 163, 184);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExplorerAction {
    Reset,
}

/// Controls, detail card and stats bar. Shape, color, scale and auto-rotate
/// are edited in place; reset is returned so the view can also reset the
/// camera.
pub fn show(ctx: &egui::Context, state: &mut ExplorerState) -> Option<ExplorerAction> {
    let mut action = None;

    egui::Window::new("Diseña tu figura")
        .resizable(false)
        .collapsible(false)
        .fixed_pos(egui::pos2(20.0, 20.0))
        .default_width(300.0)
        .show(ctx, |ui| {
            caption(ui, "Panel creativo", LABEL);
            ui.label(
                RichText::new("Cambia la forma, color y tamaño en tiempo real como si fuera plastilina digital.")
                    .color(MUTED),
            );
            ui.add_space(10.0);

            caption(ui, "Forma", LABEL);
            egui::ComboBox::from_id_salt("shape-select")
                .selected_text(state.shape.name())
                .width(260.0)
                .show_ui(ui, |ui| {
                    for kind in ShapeKind::ALL {
                        ui.selectable_value(&mut state.shape, kind, kind.name());
                    }
                });
            ui.add_space(8.0);

            caption(ui, "Color", LABEL);
            ui.horizontal(|ui| {
                let mut bytes = state.color.to_bytes();
                if ui.color_edit_button_srgb(&mut bytes).changed() {
                    state.color = Rgb::from_bytes(bytes);
                }
                ui.label(RichText::new(state.color_label()).strong());
            });
            ui.add_space(8.0);

            caption(ui, "Escala", LABEL);
            let mut scale = state.scale;
            let slider = egui::Slider::new(&mut scale, MIN_SCALE..=MAX_SCALE)
                .step_by(0.01)
                .show_value(false);
            if ui.add(slider).changed() {
                state.set_scale(scale);
            }
            ui.horizontal(|ui| {
                ui.label(RichText::new("Pequeño").size(11.0).color(MUTED));
                ui.label(RichText::new(state.scale_label()).strong());
                ui.label(RichText::new("Grande").size(11.0).color(MUTED));
            });
            ui.add_space(10.0);

            ui.horizontal(|ui| {
                if ui.button("Reiniciar").clicked() {
                    action = Some(ExplorerAction::Reset);
                }
                let toggle = if state.auto_rotate { "🔄 Activada" } else { "⏸️ Detenida" };
                if ui.selectable_label(state.auto_rotate, toggle).clicked() {
                    state.auto_rotate = !state.auto_rotate;
                }
            });

            ui.add_space(10.0);
            ui.separator();
            caption(ui, "Consejo pro", LABEL);
            ui.label("Pulsa y arrastra el modelo para explorar cada cara como si fueras un astronauta miniatura.");
        });

    let detail = state.detail();
    let accent = hex_color(detail.accent);
    egui::Window::new("Ficha creativa")
        .resizable(false)
        .collapsible(false)
        .anchor(Align2::RIGHT_TOP, [-20.0, 20.0])
        .default_width(340.0)
        .show(ctx, |ui| {
            ui.label(RichText::new(detail.icon).size(36.0));
            ui.label(RichText::new(detail.title).size(22.0).strong().color(accent));
            ui.label(RichText::new(detail.description).color(MUTED));
            ui.add_space(8.0);
            caption(ui, "Ejemplos reales", LABEL);
            ui.label(RichText::new(detail.examples).strong());
            ui.add_space(8.0);
            ui.separator();
            caption(ui, "Dato curioso", Color32::from_rgb(216, 180, 254));
            ui.label(detail.fact);
        });

    let info = state.info();
    let badges = [
        ("Caras", info.faces.to_string()),
        ("Vértices", info.vertices.to_string()),
        ("Bordes", info.edges.to_string()),
        ("Volumen ≈", info.volume_label()),
    ];
    egui::Window::new("stats")
        .title_bar(false)
        .resizable(false)
        .anchor(Align2::CENTER_BOTTOM, [0.0, -20.0])
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                for (label, value) in &badges {
                    ui.vertical(|ui| {
                        caption(ui, label, MUTED);
                        ui.label(RichText::new(value).size(18.0).strong());
                    });
                    ui.add_space(12.0);
                }
            });
        });

    action
}
