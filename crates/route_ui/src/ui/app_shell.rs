use std::time::Duration;

use eframe::egui;

use crate::app::PlannerApp;
use crate::ui::details::render_detail_cards;
use crate::ui::map_view::render_map;
use crate::ui::sidebar::render_sidebar;

pub fn run(app: PlannerApp) -> eframe::Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 800.0])
            .with_min_inner_size([800.0, 500.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Route Planner",
        options,
        Box::new(|_cc| Ok(Box::new(app))),
    )
}

impl eframe::App for PlannerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.planner.poll_responses();
        self.base_map.drain_results();
        if self.planner.pending_requests() > 0 || self.base_map.is_loading() {
            ctx.request_repaint_after(Duration::from_millis(100));
        }

        egui::SidePanel::left("sidebar")
            .resizable(false)
            .default_width(260.0)
            .show(ctx, |ui| {
                render_sidebar(ui, self);
            });

        if !self.planner.detail_cards().is_empty() {
            egui::SidePanel::right("details")
                .resizable(true)
                .default_width(280.0)
                .show(ctx, |ui| {
                    render_detail_cards(ui, self);
                });
        }

        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| {
                render_map(ui, self);
            });
    }
}
