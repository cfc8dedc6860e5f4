use std::path::Path;

use anyhow::{Context, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::DashboardConfig;
use crate::data::filter::{apply, Controls, FilteredView, Halted, Selection};
use crate::data::model::{Dataset, DatasetKind};
use crate::data::positions::MacroPosition;
use crate::data::store::DatasetStore;
use crate::encoding::{encode, EncoderSettings, Encoding};
use crate::table::{export_csv, table_rows, TableRow};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// Everything a completed pass produces for the presentation layer.
#[derive(Debug, Clone, PartialEq)]
pub struct Dashboard {
    pub view: FilteredView,
    pub encoding: Encoding,
    pub table: Vec<TableRow>,
}

/// The full UI state, independent of rendering.
pub struct AppState {
    store: DatasetStore,
    pub config: DashboardConfig,
    encoder: EncoderSettings,

    /// Which export is on screen.
    pub dataset_kind: DatasetKind,

    /// Raw user choices; the pipeline resolves them into `Controls`.
    pub selection: Selection,

    /// Outcome of the latest pass.
    pub pass: Result<Dashboard, Halted>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,

    rng: StdRng,
}

impl AppState {
    pub fn new(store: DatasetStore, config: DashboardConfig) -> Self {
        Self::with_rng(store, config, StdRng::from_entropy())
    }

    /// Same as [`AppState::new`] with a caller-chosen jitter source.
    pub fn with_rng(store: DatasetStore, config: DashboardConfig, mut rng: StdRng) -> Self {
        let encoder = EncoderSettings::from(&config);
        let dataset_kind = DatasetKind::Physical;
        let selection = Selection::default();
        let pass = run_pass(store.get(dataset_kind), &selection, &encoder, &mut rng);
        Self {
            store,
            config,
            encoder,
            dataset_kind,
            selection,
            pass,
            status_message: None,
            rng,
        }
    }

    pub fn dataset(&self) -> &Dataset {
        self.store.get(self.dataset_kind)
    }

    /// Controls in effect for the latest pass, halted or not.
    pub fn controls(&self) -> &Controls {
        match &self.pass {
            Ok(dashboard) => &dashboard.view.controls,
            Err(halted) => &halted.controls,
        }
    }

    /// Run filter → encode → table for the current selection.
    pub fn recompute(&mut self) {
        let pass = run_pass(
            self.store.get(self.dataset_kind),
            &self.selection,
            &self.encoder,
            &mut self.rng,
        );

        match &pass {
            Ok(d) => log::debug!(
                "{}: {} points, p25={:.2} p75={:.2}",
                self.dataset_kind.label(),
                d.encoding.points.len(),
                d.encoding.thresholds.p25,
                d.encoding.thresholds.p75
            ),
            Err(h) => log::warn!("{}: halted ({:?})", self.dataset_kind.label(), h.reason),
        }
        self.pass = pass;
    }

    /// Switch export. Every option list belongs to the old data, so every
    /// selector goes back to its first entry.
    pub fn set_dataset_kind(&mut self, kind: DatasetKind) {
        if kind != self.dataset_kind {
            self.dataset_kind = kind;
            self.selection = Selection::default();
            self.recompute();
        }
    }

    /// Pick a macro-position. The range and the highlight restart from the
    /// new category; the metric list does not depend on it and is kept.
    pub fn set_macro_position(&mut self, macro_position: MacroPosition) {
        self.selection.macro_position = Some(macro_position);
        self.selection.minutes_range = None;
        self.selection.highlight = None;
        self.recompute();
    }

    pub fn set_minutes_range(&mut self, lo: i64, hi: i64) {
        self.selection.minutes_range = Some((lo, hi));
        self.recompute();
    }

    pub fn set_highlight(&mut self, name: String) {
        self.selection.highlight = Some(name);
        self.recompute();
    }

    pub fn set_metric(&mut self, metric: String) {
        self.selection.metric = Some(metric);
        self.recompute();
    }

    /// Write the displayed table. Fails when the current pass halted.
    pub fn export_table(&self, path: &Path) -> Result<()> {
        let dashboard = self.pass.as_ref().map_err(|h| anyhow::anyhow!("{h}"))?;
        export_csv(
            path,
            &self.config.columns,
            dashboard.view.metric(),
            &dashboard.table,
        )
        .with_context(|| format!("exporting table to {}", path.display()))
    }
}

/// One full pass over a dataset. Encoder halts keep the filter's controls.
fn run_pass(
    dataset: &Dataset,
    selection: &Selection,
    encoder: &EncoderSettings,
    rng: &mut StdRng,
) -> Result<Dashboard, Halted> {
    let view = apply(dataset, selection)?;
    match encode(dataset, &view, encoder, rng) {
        Ok(encoding) => {
            let table = table_rows(dataset, &view);
            Ok(Dashboard {
                view,
                encoding,
                table,
            })
        }
        Err(reason) => Err(Halted {
            reason,
            controls: view.controls,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::PointColor;
    use crate::data::filter::tests::dataset;
    use crate::data::filter::Halt;
    use crate::data::model::CellValue;

    fn state() -> AppState {
        let physical = dataset(&[
            ("Armani", "River Plate", CellValue::Integer(900), "GK", CellValue::Integer(4)),
            ("Borja", "River Plate", CellValue::Integer(1200), "ST", CellValue::Integer(30)),
            ("Cavani", "Boca Juniors", CellValue::Integer(300), "CF", CellValue::Integer(18)),
        ]);
        let events = dataset(&[("Nadie", "Sin club", CellValue::Integer(10), "XX", CellValue::Integer(1))]);
        AppState::with_rng(
            DatasetStore::from_datasets(physical, events),
            DashboardConfig::default(),
            StdRng::seed_from_u64(11),
        )
    }

    #[test]
    fn first_pass_runs_on_construction() {
        let state = state();
        let dashboard = state.pass.as_ref().unwrap();
        assert_eq!(state.controls().macro_position, Some(MacroPosition::Goalkeeper));
        assert_eq!(dashboard.encoding.points.len(), 1);
        assert_eq!(dashboard.encoding.points[0].color, PointColor::Highlight);
    }

    #[test]
    fn macro_change_resets_range() {
        let mut state = state();
        state.set_minutes_range(900, 900);
        state.set_macro_position(MacroPosition::Forward);
        assert_eq!(state.controls().minutes_range, Some((300, 1200)));
        assert_eq!(state.pass.as_ref().unwrap().table.len(), 2);
    }

    #[test]
    fn switching_to_dataset_without_categories_halts() {
        let mut state = state();
        state.set_dataset_kind(DatasetKind::Events);
        assert_eq!(state.pass.as_ref().unwrap_err().reason, Halt::EmptyCategory);
        assert!(state.export_table(Path::new("unused.csv")).is_err());

        state.set_dataset_kind(DatasetKind::Physical);
        assert!(state.pass.is_ok());
    }

    #[test]
    fn upstream_changes_reset_downstream_selectors() {
        let mut state = state();
        state.set_macro_position(MacroPosition::Forward);
        state.set_highlight("Cavani".to_string());
        state.set_metric("Sprints".to_string());

        // Same category again: the highlight starts over at the first player.
        state.set_macro_position(MacroPosition::Forward);
        assert_eq!(state.controls().highlight.as_deref(), Some("Borja"));

        state.set_highlight("Cavani".to_string());
        state.set_dataset_kind(DatasetKind::Events);
        assert_eq!(state.selection, Selection::default());
        state.set_dataset_kind(DatasetKind::Physical);
        assert_eq!(state.controls().macro_position, Some(MacroPosition::Goalkeeper));
        assert_eq!(state.controls().highlight.as_deref(), Some("Armani"));
    }

    #[test]
    fn narrowing_the_range_keeps_a_still_offered_highlight() {
        let mut state = state();
        state.set_macro_position(MacroPosition::Forward);
        state.set_highlight("Cavani".to_string());
        state.set_minutes_range(300, 600);
        assert_eq!(state.controls().highlight.as_deref(), Some("Cavani"));
        state.set_minutes_range(1000, 1200);
        assert_eq!(state.controls().highlight.as_deref(), Some("Borja"));
    }

    #[test]
    fn highlight_selection_moves_the_black_marker() {
        let mut state = state();
        state.set_macro_position(MacroPosition::Forward);
        state.set_highlight("Cavani".to_string());
        let dashboard = state.pass.as_ref().unwrap();
        let black: Vec<_> = dashboard
            .encoding
            .points
            .iter()
            .filter(|p| p.color == PointColor::Highlight)
            .map(|p| state.dataset().records[p.index].name.clone())
            .collect();
        assert_eq!(black, vec![Some("Cavani".to_string())]);
    }
}
