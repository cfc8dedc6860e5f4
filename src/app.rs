use eframe::egui::{self, RichText, Ui};

use crate::state::AppState;
use crate::ui::{panels, plot, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct DriblabApp {
    pub state: AppState,
}

impl DriblabApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for DriblabApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: title ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &self.state);
        });

        // ---- Left side panel: selectors ----
        egui::SidePanel::left("selector_panel")
            .default_width(260.0)
            .resizable(true)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui: &mut Ui| {
                    panels::side_panel(ui, &mut self.state);
                });
            });

        // ---- Central panel: plot + table ----
        egui::CentralPanel::default().show(ctx, |ui| {
            let state = &self.state;
            match &state.pass {
                Ok(dashboard) => {
                    plot::metric_scatter(ui, state.dataset(), dashboard);
                    ui.add_space(12.0);
                    table::player_table(ui, &state.config.columns, dashboard);
                }
                Err(halted) => {
                    ui.label(
                        RichText::new(format!("⚠️ {halted}"))
                            .size(16.0)
                            .color(egui::Color32::from_rgb(0xb5, 0x8b, 0x00)),
                    );
                }
            }
        });
    }
}
