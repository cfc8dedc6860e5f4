use std::collections::BTreeSet;

use thiserror::Error;

use super::model::Dataset;
use super::positions::MacroPosition;

// ---------------------------------------------------------------------------
// Halt conditions
// ---------------------------------------------------------------------------

/// Conditions that end a recomputation pass without a plot or table.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Halt {
    /// The dataset has no row with a known macro-position.
    #[error("No hay jugadores con minutos válidos en esta categoría.")]
    EmptyCategory,
    /// Every row was filtered out (or none has a usable metric value).
    #[error("No hay jugadores con minutos válidos en esta categoría.")]
    EmptyResult,
    /// The dataset has no numeric column to plot.
    #[error("No hay métricas numéricas disponibles en esta sección.")]
    NoMetricColumns,
}

// ---------------------------------------------------------------------------
// Selection – what the user picked
// ---------------------------------------------------------------------------

/// User choices. `None` (or a value no longer offered) falls back to the
/// first option, the way a single-select shows its first entry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selection {
    pub macro_position: Option<MacroPosition>,
    /// Inclusive `[lo, hi]`; clamped into the current minute bounds.
    pub minutes_range: Option<(i64, i64)>,
    pub highlight: Option<String>,
    pub metric: Option<String>,
}

/// Options offered to the user and the values actually in effect.
/// Filled as far as the pipeline got, so a halted pass can still draw the
/// controls that precede the halt.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Controls {
    pub macro_options: Vec<MacroPosition>,
    pub macro_position: Option<MacroPosition>,
    pub minutes_bounds: Option<(i64, i64)>,
    pub minutes_range: Option<(i64, i64)>,
    pub players: Vec<String>,
    pub highlight: Option<String>,
    pub metric_options: Vec<String>,
    pub metric: Option<String>,
}

/// A surviving row: index into the dataset plus its coerced minutes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilteredRow {
    pub index: usize,
    pub minutes: f64,
}

/// Result of a full filter pass. Never mutates the dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct FilteredView {
    pub controls: Controls,
    /// Survivors in dataset order.
    pub rows: Vec<FilteredRow>,
}

impl FilteredView {
    /// The active metric. Always set on a completed pass.
    pub fn metric(&self) -> &str {
        self.controls.metric.as_deref().unwrap_or_default()
    }

    pub fn highlight(&self) -> Option<&str> {
        self.controls.highlight.as_deref()
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
#[error("{reason}")]
pub struct Halted {
    pub reason: Halt,
    pub controls: Controls,
}

// ---------------------------------------------------------------------------
// Pipeline
// ---------------------------------------------------------------------------

/// Run every filter step over `dataset` for the given selection.
pub fn apply(dataset: &Dataset, selection: &Selection) -> Result<FilteredView, Halted> {
    let mut controls = Controls {
        macro_options: dataset.macro_positions.clone(),
        ..Controls::default()
    };
    let halt = |reason: Halt, controls: Controls| Err(Halted { reason, controls });

    let Some(macro_position) = pick(&controls.macro_options, selection.macro_position.as_ref())
    else {
        return halt(Halt::EmptyCategory, controls);
    };
    controls.macro_position = Some(macro_position);

    // Rows with unparseable minutes drop out together with negative ones.
    let valid: Vec<FilteredRow> = dataset
        .records
        .iter()
        .enumerate()
        .filter(|(_, r)| r.macro_position == Some(macro_position))
        .filter_map(|(index, r)| {
            r.minutes
                .to_number()
                .filter(|m| *m >= 0.0)
                .map(|minutes| FilteredRow { index, minutes })
        })
        .collect();
    if valid.is_empty() {
        return halt(Halt::EmptyResult, controls);
    }

    let bounds = minutes_bounds(&valid);
    let (lo, hi) = selection
        .minutes_range
        .map(|(lo, hi)| (lo.clamp(bounds.0, bounds.1), hi.clamp(bounds.0, bounds.1)))
        .unwrap_or(bounds);
    controls.minutes_bounds = Some(bounds);
    controls.minutes_range = Some((lo, hi));

    let rows: Vec<FilteredRow> = valid
        .into_iter()
        .filter(|r| lo as f64 <= r.minutes && r.minutes <= hi as f64)
        .collect();
    if rows.is_empty() {
        return halt(Halt::EmptyResult, controls);
    }

    controls.players = rows
        .iter()
        .filter_map(|r| dataset.records[r.index].name.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    controls.highlight = pick(&controls.players, selection.highlight.as_ref());

    controls.metric_options = dataset.metric_columns.clone();
    let Some(metric) = pick(&controls.metric_options, selection.metric.as_ref()) else {
        return halt(Halt::NoMetricColumns, controls);
    };
    controls.metric = Some(metric);

    log::debug!(
        "{} / {}: {} of {} rows in [{lo}, {hi}] minutes",
        dataset.kind.label(),
        macro_position,
        rows.len(),
        dataset.len()
    );

    Ok(FilteredView { controls, rows })
}

/// Integer-truncated min and max minutes of a non-empty row set.
fn minutes_bounds(rows: &[FilteredRow]) -> (i64, i64) {
    let (min, max) = rows
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), r| {
            (lo.min(r.minutes), hi.max(r.minutes))
        });
    (min.trunc() as i64, max.trunc() as i64)
}

fn pick<T: Clone + PartialEq>(options: &[T], wanted: Option<&T>) -> Option<T> {
    wanted
        .filter(|w| options.contains(w))
        .or_else(|| options.first())
        .cloned()
}
