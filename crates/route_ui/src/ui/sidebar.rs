use eframe::egui;

use route_core::geo::{Axis, CoordinateField, Endpoint};
use route_core::request::Algorithm;
use route_core::style::{END_MARKER_COLOR, START_MARKER_COLOR};
use route_core::transport::TransportMode;

use crate::app::PlannerApp;
use crate::ui::utils::opaque;

pub fn render_sidebar(ui: &mut egui::Ui, app: &mut PlannerApp) {
    ui.heading("Route planner");
    ui.separator();

    render_endpoint(ui, app, Endpoint::Start);
    ui.horizontal(|ui| {
        if ui
            .button("⇅ Swap")
            .on_hover_text("Swap start and end")
            .clicked()
        {
            app.planner.swap_endpoints();
        }
    });
    render_endpoint(ui, app, Endpoint::End);

    ui.separator();
    render_transport(ui, app);
    ui.separator();
    render_algorithm(ui, app);
    ui.separator();

    ui.horizontal(|ui| {
        if ui.button("Find route").clicked() {
            app.planner.submit();
        }
        let pending = app.planner.pending_requests();
        if pending > 0 {
            ui.spinner();
            ui.label(format!("{pending} pending"));
        }
    });

    ui.with_layout(egui::Layout::bottom_up(egui::Align::LEFT), |ui| {
        ui.small("Double click: set start. Right double click: set end.");
        ui.small("Drag markers to adjust, scroll to zoom.");
        if ui.small_button("Reset view").clicked() {
            app.reset_view();
        }
        ui.small(format!("Backend: {}", app.backend_url));
    });
}

fn render_endpoint(ui: &mut egui::Ui, app: &mut PlannerApp, endpoint: Endpoint) {
    let (title, color, fields) = match endpoint {
        Endpoint::Start => (
            "Start",
            START_MARKER_COLOR,
            [CoordinateField::StartLat, CoordinateField::StartLong],
        ),
        Endpoint::End => (
            "End",
            END_MARKER_COLOR,
            [CoordinateField::EndLat, CoordinateField::EndLong],
        ),
    };

    ui.horizontal(|ui| {
        ui.colored_label(opaque(color), "●");
        ui.strong(title);
        if ui.small_button("Clear").clicked() {
            app.planner.reset_endpoint(endpoint);
        }
    });
    egui::Grid::new(("endpoint_fields", title))
        .num_columns(2)
        .show(ui, |ui| {
            for field in fields {
                ui.label(match field.axis() {
                    Axis::Latitude => "Latitude",
                    Axis::Longitude => "Longitude",
                });
                let response = ui.add(
                    egui::TextEdit::singleline(app.planner.field_text_mut(field))
                        .id_salt(field.id())
                        .hint_text(field.placeholder())
                        .desired_width(140.0),
                );
                if response.changed() {
                    app.planner.commit_field(field);
                }
                if response.lost_focus() {
                    app.planner.revert_field(field);
                }
                ui.end_row();
            }
        });
}

fn render_transport(ui: &mut egui::Ui, app: &mut PlannerApp) {
    ui.label("Transport");
    ui.horizontal_wrapped(|ui| {
        let active = app.planner.transport().active_mode();
        for mode in TransportMode::ALL {
            if ui
                .selectable_label(active == mode, format!("{} {}", mode.icon(), mode.name()))
                .on_hover_text(format!("up to {} km/h", mode.ceiling_kmh()))
                .clicked()
            {
                app.planner.set_active_mode(mode);
            }
        }
    });
    ui.horizontal(|ui| {
        ui.label("Speed (km/h)");
        let mut text = app.planner.transport().speed_text().to_string();
        let response = ui.add(egui::TextEdit::singleline(&mut text).desired_width(80.0));
        if response.changed() {
            app.planner.set_speed_text(&text);
        }
    });
}

fn render_algorithm(ui: &mut egui::Ui, app: &mut PlannerApp) {
    ui.horizontal(|ui| {
        ui.label("Algorithm");
        let mut selected = app.planner.algorithm();
        egui::ComboBox::from_id_salt("algorithm")
            .selected_text(selected.label())
            .show_ui(ui, |ui| {
                for algorithm in Algorithm::ALL {
                    ui.selectable_value(&mut selected, algorithm, algorithm.label());
                }
            });
        if selected != app.planner.algorithm() {
            app.planner.set_algorithm(selected);
        }
    });
}
