use std::path::Path;

use anyhow::{Context, Result};

use crate::data::filter::FilteredView;
use crate::data::model::{ColumnNames, Dataset};

/// One line of the player table.
#[derive(Debug, Clone, PartialEq)]
pub struct TableRow {
    pub name: String,
    pub team: String,
    pub minutes: f64,
    pub metric: Option<f64>,
}

/// Name, team, minutes and metric of every surviving row, sorted by the
/// metric descending. Missing values go last; ties keep filter order.
pub fn table_rows(dataset: &Dataset, view: &FilteredView) -> Vec<TableRow> {
    let metric = view.metric();
    let mut rows: Vec<TableRow> = view
        .rows
        .iter()
        .map(|r| {
            let record = &dataset.records[r.index];
            TableRow {
                name: record.name.clone().unwrap_or_default(),
                team: record.team.clone().unwrap_or_default(),
                minutes: r.minutes,
                metric: record.metric(metric),
            }
        })
        .collect();

    rows.sort_by(|a, b| match (a.metric, b.metric) {
        (Some(x), Some(y)) => y.total_cmp(&x),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => std::cmp::Ordering::Equal,
    });
    rows
}

/// Write the table as CSV under the dataset's own header names.
pub fn export_csv(
    path: &Path,
    names: &ColumnNames,
    metric: &str,
    rows: &[TableRow],
) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("creating {}", path.display()))?;
    writer.write_record([
        names.name.as_str(),
        names.team.as_str(),
        names.minutes.as_str(),
        metric,
    ])?;
    for row in rows {
        writer.write_record([
            row.name.clone(),
            row.team.clone(),
            row.minutes.to_string(),
            row.metric.map(|v| v.to_string()).unwrap_or_default(),
        ])?;
    }
    writer.flush().context("flushing CSV")?;
    Ok(())
}
