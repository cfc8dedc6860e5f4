use eframe::egui::{RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::model::ColumnNames;
use crate::state::Dashboard;

// ---------------------------------------------------------------------------
// Player table (central panel, below the plot)
// ---------------------------------------------------------------------------

/// Render the metric-sorted table of the current pass.
pub fn player_table(ui: &mut Ui, names: &ColumnNames, dashboard: &Dashboard) {
    let highlight = dashboard.view.highlight();

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .column(Column::auto().at_least(160.0))
        .column(Column::auto().at_least(140.0))
        .column(Column::auto().at_least(80.0))
        .column(Column::remainder())
        .header(22.0, |mut header| {
            for title in [
                names.name.as_str(),
                names.team.as_str(),
                names.minutes.as_str(),
                dashboard.view.metric(),
            ] {
                header.col(|ui| {
                    ui.strong(title);
                });
            }
        })
        .body(|body| {
            body.rows(20.0, dashboard.table.len(), |mut row| {
                let r = &dashboard.table[row.index()];
                let is_highlight = highlight == Some(r.name.as_str());
                row.col(|ui| {
                    let text = RichText::new(&r.name);
                    ui.label(if is_highlight { text.strong() } else { text });
                });
                row.col(|ui| {
                    ui.label(&r.team);
                });
                row.col(|ui| {
                    ui.label(format!("{}", r.minutes));
                });
                row.col(|ui| {
                    ui.label(r.metric.map(|v| format!("{v:.2}")).unwrap_or_default());
                });
            });
        });
}
