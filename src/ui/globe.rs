use egui::{Align2, Color32, RichText};

use super::common::hex_color;
use crate::catalog::{ContinentRecord, CONTINENTS};
use crate::scenes::GlobeState;

const TITLE_BLUE: Color32 = Color32::from_rgb(37, 99, 235);
const GOLD: Color32 = Color32::from_rgb(250, 204, 21);

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GlobeAction {
    ResetView,
    ToggleClouds,
    Select(&'static ContinentRecord),
    CloseInfo,
    NextFact,
    StartQuiz,
    Answer(&'static str),
    CloseQuiz,
}

/// All globe panels; at most one action per frame since each comes from a
/// click
pub fn show(ctx: &egui::Context, state: &GlobeState, day_loaded: bool) -> Option<GlobeAction> {
    let mut action = None;

    controls(ctx, state, &mut action);
    continent_list(ctx, state, &mut action);
    if let Some(record) = state.selected {
        continent_card(ctx, state, record, &mut action);
    }
    quiz(ctx, state, &mut action);

    if day_loaded {
        egui::Area::new(egui::Id::new("texture-indicator"))
            .anchor(Align2::CENTER_TOP, [0.0, 8.0])
            .show(ctx, |ui| {
                ui.label(RichText::new("✅ Tierra real cargada").size(12.0).color(Color32::LIGHT_GREEN));
            });
    }
    egui::Area::new(egui::Id::new("globe-footer"))
        .anchor(Align2::RIGHT_BOTTOM, [-8.0, -8.0])
        .show(ctx, |ui| {
            ui.label(RichText::new("🛰️ Imágenes reales de la Tierra - NASA").size(11.0).color(Color32::WHITE));
            ui.label(RichText::new("☀️ Sistema de iluminación realista").size(11.0).color(Color32::WHITE));
        });

    action
}

fn controls(ctx: &egui::Context, state: &GlobeState, action: &mut Option<GlobeAction>) {
    egui::Window::new("globe-controls")
        .title_bar(false)
        .resizable(false)
        .fixed_pos(egui::pos2(16.0, 16.0))
        .show(ctx, |ui| {
            let reset = egui::Button::new(RichText::new("🌍 Volver al Inicio").strong().color(Color32::BLACK)).fill(GOLD);
            if ui.add(reset).clicked() {
                *action = Some(GlobeAction::ResetView);
            }
            let clouds = if state.clouds_enabled { "☁️ Sin Nubes" } else { "🌤️ Con Nubes" };
            if ui.button(RichText::new(clouds).strong()).clicked() {
                *action = Some(GlobeAction::ToggleClouds);
            }
            ui.add_space(8.0);
            ui.label(RichText::new("🎮 Cómo Jugar:").strong().color(TITLE_BLUE));
            ui.label("👆 Toca los continentes");
            ui.label("🔄 Gira el globo");
            ui.label("🔍 Acerca para ver mejor");
        });
}

fn continent_list(ctx: &egui::Context, state: &GlobeState, action: &mut Option<GlobeAction>) {
    egui::Window::new("continents")
        .title_bar(false)
        .resizable(false)
        .anchor(Align2::RIGHT_TOP, [-16.0, 16.0])
        .show(ctx, |ui| {
            ui.label(RichText::new("🗺️ Continentes del Mundo").size(18.0).strong().color(TITLE_BLUE));
            egui::Grid::new("continent-grid").num_columns(2).spacing([6.0, 6.0]).show(ui, |ui| {
                for (i, record) in CONTINENTS.iter().enumerate() {
                    let selected = state.selected.is_some_and(|s| s.name == record.name);
                    let text = RichText::new(format!("{} {}", record.icon, record.short_name()))
                        .strong()
                        .color(Color32::WHITE);
                    let mut button = egui::Button::new(text).fill(hex_color(record.color));
                    if selected {
                        button = button.stroke(egui::Stroke::new(2.0, GOLD));
                    }
                    if ui.add(button).clicked() {
                        *action = Some(GlobeAction::Select(record));
                    }
                    if i % 2 == 1 {
                        ui.end_row();
                    }
                }
            });
        });
}

fn continent_card(
    ctx: &egui::Context,
    state: &GlobeState,
    record: &'static ContinentRecord,
    action: &mut Option<GlobeAction>,
) {
    egui::Window::new("continent-info")
        .title_bar(false)
        .resizable(false)
        .anchor(Align2::CENTER_BOTTOM, [0.0, -16.0])
        .default_width(560.0)
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(RichText::new(record.icon).size(28.0));
                ui.label(RichText::new(record.name).size(22.0).strong().color(hex_color(record.color)));
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("✕").clicked() {
                        *action = Some(GlobeAction::CloseInfo);
                    }
                });
            });

            ui.columns(2, |cols| {
                cols[0].label(RichText::new("📏 Tamaño:").strong().color(TITLE_BLUE));
                cols[0].label(record.area);
                cols[1].label(RichText::new("👥 Personas:").strong().color(Color32::DARK_GREEN));
                cols[1].label(record.population);
            });
            ui.add_space(6.0);

            ui.horizontal(|ui| {
                ui.label(RichText::new("🌟 Datos Divertidos").strong().color(Color32::from_rgb(126, 34, 206)));
                if ui.button("Siguiente").clicked() {
                    *action = Some(GlobeAction::NextFact);
                }
            });
            if let Some(fact) = state.current_fact() {
                ui.label(fact);
            }
            ui.add_space(6.0);

            ui.label(RichText::new("🐾 Animales que viven aquí:").strong().color(Color32::from_rgb(194, 65, 12)));
            ui.horizontal_wrapped(|ui| {
                for animal in record.animals {
                    ui.label(RichText::new(animal).background_color(Color32::from_rgb(255, 237, 213)).color(Color32::BLACK));
                }
            });
            ui.add_space(8.0);

            let play = egui::Button::new(
                RichText::new(format!("🎯 Jugar Quiz sobre {}", record.name)).strong().color(Color32::WHITE),
            )
            .fill(Color32::from_rgb(74, 222, 128));
            if ui.add_sized([ui.available_width(), 28.0], play).clicked() {
                *action = Some(GlobeAction::StartQuiz);
            }
        });
}

fn quiz(ctx: &egui::Context, state: &GlobeState, action: &mut Option<GlobeAction>) {
    let Some(quiz) = &state.quiz else {
        return;
    };
    egui::Window::new(format!("🎯 Quiz de {}", quiz.continent))
        .resizable(false)
        .collapsible(false)
        .anchor(Align2::CENTER_CENTER, [0.0, 0.0])
        .default_width(420.0)
        .show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.label(RichText::new(&quiz.question).size(16.0).strong());
            });
            ui.add_space(10.0);

            let answered = quiz.is_answered();
            for option in &quiz.options {
                let button = egui::Button::new(*option).min_size(egui::vec2(ui.available_width(), 32.0));
                if ui.add_enabled(!answered, button).clicked() {
                    *action = Some(GlobeAction::Answer(*option));
                }
            }

            if let Some(feedback) = quiz.feedback() {
                let color = if feedback.is_correct() { Color32::DARK_GREEN } else { Color32::DARK_RED };
                ui.add_space(8.0);
                ui.label(RichText::new(feedback.message()).strong().color(color));
            }

            ui.add_space(8.0);
            ui.horizontal(|ui| {
                if ui.button("Volver").clicked() {
                    *action = Some(GlobeAction::CloseQuiz);
                }
                if answered && ui.button("Nuevo Quiz").clicked() {
                    *action = Some(GlobeAction::StartQuiz);
                }
            });
        });
}
