use eframe::egui::{self, Color32, RichText, Ui};

use crate::data::model::DatasetKind;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – selectors
// ---------------------------------------------------------------------------

/// Render the left selector panel. Every change triggers a full recompute
/// through the `AppState` setters.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Seleccionar sección");
    for kind in DatasetKind::ALL {
        if ui
            .radio(state.dataset_kind == kind, kind.label())
            .clicked()
        {
            state.set_dataset_kind(kind);
        }
    }
    ui.separator();

    // Clone what we need so we can mutate state inside the widgets.
    let controls = state.controls().clone();

    // ---- Macro-position ----
    ui.strong("Macroposición");
    if controls.macro_options.is_empty() {
        egui::ComboBox::from_id_salt("macro_position")
            .selected_text("Sin datos")
            .show_ui(ui, |ui: &mut Ui| {
                let _ = ui.selectable_label(true, "Sin datos");
            });
        return;
    }
    let current = controls.macro_position;
    egui::ComboBox::from_id_salt("macro_position")
        .selected_text(current.map(|m| m.label()).unwrap_or_default())
        .show_ui(ui, |ui: &mut Ui| {
            for m in &controls.macro_options {
                if ui.selectable_label(current == Some(*m), m.label()).clicked() {
                    state.set_macro_position(*m);
                }
            }
        });
    ui.add_space(6.0);

    // ---- Minutes range ----
    let (Some((min, max)), Some((mut lo, mut hi))) =
        (controls.minutes_bounds, controls.minutes_range)
    else {
        return;
    };
    ui.strong("Rango de minutos jugados");
    let lo_changed = ui
        .add(egui::Slider::new(&mut lo, min..=max).text("desde"))
        .changed();
    let hi_changed = ui
        .add(egui::Slider::new(&mut hi, min..=max).text("hasta"))
        .changed();
    if lo_changed || hi_changed {
        // Keep the handles ordered; the one being dragged wins.
        if lo_changed && lo > hi {
            hi = lo;
        } else if hi_changed && hi < lo {
            lo = hi;
        }
        state.set_minutes_range(lo, hi);
    }
    ui.add_space(6.0);

    if controls.players.is_empty() && controls.metric_options.is_empty() {
        return;
    }

    // ---- Highlighted player ----
    ui.strong("Destacar");
    let current = controls.highlight.clone().unwrap_or_default();
    egui::ComboBox::from_id_salt("highlight")
        .selected_text(&current)
        .show_ui(ui, |ui: &mut Ui| {
            for name in &controls.players {
                if ui.selectable_label(current == *name, name).clicked() {
                    state.set_highlight(name.clone());
                }
            }
        });
    ui.add_space(6.0);

    // ---- Metric ----
    ui.strong("Seleccionar métrica");
    let current = controls.metric.clone().unwrap_or_default();
    egui::ComboBox::from_id_salt("metric")
        .selected_text(&current)
        .show_ui(ui, |ui: &mut Ui| {
            for col in &controls.metric_options {
                if ui.selectable_label(current == *col, col).clicked() {
                    state.set_metric(col.clone());
                }
            }
        });
    ui.separator();

    ui.add_enabled_ui(state.pass.is_ok(), |ui: &mut Ui| {
        if ui.button("Exportar CSV…").clicked() {
            export_file_dialog(state);
        }
    });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the title row with row counts and the latest status message.
pub fn top_bar(ui: &mut Ui, state: &AppState) {
    ui.horizontal(|ui: &mut Ui| {
        ui.heading("🔎 Análisis de Jugadores – Driblab");
        ui.separator();

        let ds = state.dataset();
        let visible = state
            .pass
            .as_ref()
            .map(|d| d.view.rows.len())
            .unwrap_or(0);
        ui.label(format!("{} jugadores cargados, {} visibles", ds.len(), visible));

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn export_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Exportar tabla")
        .set_file_name("jugadores.csv")
        .add_filter("CSV", &["csv"])
        .save_file();

    let Some(path) = file else {
        log::warn!("Table export cancelled");
        return;
    };
    match state.export_table(&path) {
        Ok(()) => {
            log::info!("Exported table to {}", path.display());
            state.status_message = None;
        }
        Err(e) => {
            log::error!("Failed to export table: {e:#}");
            state.status_message = Some(format!("Error: {e:#}"));
        }
    }
}
