use eframe::egui;

use route_core::details::DetailCard;

use crate::app::PlannerApp;
use crate::ui::utils::opaque;

pub fn render_detail_cards(ui: &mut egui::Ui, app: &mut PlannerApp) {
    ui.heading("Routes");
    egui::ScrollArea::vertical().show(ui, |ui| {
        for card in app.planner.detail_cards() {
            if render_card(ui, &card) {
                app.planner.toggle_visibility(card.index);
            }
            ui.add_space(6.0);
        }
    });
}

/// Returns whether the hide checkbox was toggled.
fn render_card(ui: &mut egui::Ui, card: &DetailCard) -> bool {
    let mut toggled = false;
    let color = opaque(card.color);
    egui::Frame::group(ui.style())
        .stroke(egui::Stroke::new(2.0, color))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.horizontal(|ui| {
                ui.colored_label(color, "━━");
                ui.strong(card.title());
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let mut hidden = card.hidden;
                    toggled = ui.checkbox(&mut hidden, "Hide").changed();
                });
            });

            let Some(rows) = &card.body else {
                return;
            };
            egui::Grid::new(("route_details", card.index))
                .num_columns(2)
                .striped(true)
                .show(ui, |ui| {
                    for row in rows {
                        ui.label(row.label);
                        ui.monospace(&row.value);
                        ui.end_row();
                    }
                });
        });
    toggled
}
