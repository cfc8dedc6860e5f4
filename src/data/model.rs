use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use super::positions::MacroPosition;

/// Name of the derived grouping column. Never a metric.
pub const MACRO_POSITION_COLUMN: &str = "Macroposición";

// ---------------------------------------------------------------------------
// CellValue – a single cell of a source table
// ---------------------------------------------------------------------------

/// A dynamically-typed cell mirroring the dtypes a spreadsheet export carries.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Null,
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::String(s) => write!(f, "{s}"),
            CellValue::Integer(i) => write!(f, "{i}"),
            CellValue::Float(v) => write!(f, "{v}"),
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::Null => write!(f, "<null>"),
        }
    }
}

impl CellValue {
    /// Whether the cell carries a native numeric type. Bools are not numbers
    /// here; all-bool columns are handled by the metric classification.
    pub fn is_numeric(&self) -> bool {
        matches!(self, CellValue::Integer(_) | CellValue::Float(_))
    }

    /// Coerce to a number. Numeric text parses; anything else (text, bools,
    /// missing values, NaN, infinities) becomes `None`.
    pub fn to_number(&self) -> Option<f64> {
        let v = match self {
            CellValue::Integer(i) => *i as f64,
            CellValue::Float(v) => *v,
            CellValue::String(s) => s.trim().parse::<f64>().ok()?,
            CellValue::Bool(_) | CellValue::Null => return None,
        };
        v.is_finite().then_some(v)
    }

    /// Like [`CellValue::to_number`], but a bool counts as 0 or 1.
    pub fn to_metric(&self) -> Option<f64> {
        match self {
            CellValue::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            other => other.to_number(),
        }
    }

    /// Text content for identity-like columns (names, teams, codes).
    pub fn as_text(&self) -> Option<String> {
        match self {
            CellValue::Null => None,
            CellValue::String(s) if s.is_empty() => None,
            CellValue::String(s) => Some(s.clone()),
            CellValue::Float(v) if v.is_nan() => None,
            other => Some(other.to_string()),
        }
    }

    /// Strip surrounding whitespace from string cells; other cells are untouched.
    pub fn trimmed(self) -> Self {
        match self {
            CellValue::String(s) => {
                let t = s.trim();
                if t.len() == s.len() {
                    CellValue::String(s)
                } else {
                    CellValue::String(t.to_string())
                }
            }
            other => other,
        }
    }
}

// ---------------------------------------------------------------------------
// RawTable – what a file loader hands over
// ---------------------------------------------------------------------------

/// Rows and columns exactly as read, before normalisation.
#[derive(Debug, Clone, Default)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<CellValue>>,
}

impl RawTable {
    /// Trim every header and every string cell.
    pub fn normalized(self) -> Self {
        RawTable {
            headers: self.headers.iter().map(|h| h.trim().to_string()).collect(),
            rows: self
                .rows
                .into_iter()
                .map(|row| row.into_iter().map(CellValue::trimmed).collect())
                .collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// Column names of the identity columns
// ---------------------------------------------------------------------------

/// Header names of the columns every export must carry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColumnNames {
    pub name: String,
    pub team: String,
    pub age: String,
    pub minutes: String,
    pub position: String,
}

impl Default for ColumnNames {
    fn default() -> Self {
        Self {
            name: "Nombre".to_string(),
            team: "Equipo".to_string(),
            age: "Edad".to_string(),
            minutes: "Minutos".to_string(),
            position: "Posición".to_string(),
        }
    }
}

impl ColumnNames {
    /// Columns that are never offered as metrics.
    pub fn is_excluded_from_metrics(&self, column: &str) -> bool {
        column == self.name
            || column == self.team
            || column == self.age
            || column == self.minutes
            || column == MACRO_POSITION_COLUMN
    }
}

// ---------------------------------------------------------------------------
// PlayerRecord – one row of a dataset
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct PlayerRecord {
    pub name: Option<String>,
    pub team: Option<String>,
    pub age: Option<f64>,
    pub position: Option<String>,
    pub macro_position: Option<MacroPosition>,
    /// Raw minutes cell; coerced by the filter pipeline.
    pub minutes: CellValue,
    /// Every column other than name, team, age and minutes (position included).
    pub cells: BTreeMap<String, CellValue>,
}

impl PlayerRecord {
    /// Numeric value of a metric column, `None` when missing or non-numeric.
    pub fn metric(&self, column: &str) -> Option<f64> {
        self.cells.get(column).and_then(CellValue::to_metric)
    }
}

// ---------------------------------------------------------------------------
// Dataset
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DatasetKind {
    Physical,
    Events,
}

impl DatasetKind {
    pub const ALL: [DatasetKind; 2] = [DatasetKind::Physical, DatasetKind::Events];

    pub fn label(self) -> &'static str {
        match self {
            DatasetKind::Physical => "Datos físicos",
            DatasetKind::Events => "Eventos",
        }
    }
}

/// A loaded, validated and immutable export.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub kind: DatasetKind,
    /// Trimmed column names in file order.
    pub columns: Vec<String>,
    pub records: Vec<PlayerRecord>,
    /// Columns holding only numbers, minus the identity columns; sorted.
    pub metric_columns: Vec<String>,
    /// Distinct macro-positions present; sorted by label.
    pub macro_positions: Vec<MacroPosition>,
}

impl Dataset {
    /// Validate the schema of a normalised table and build the records.
    pub fn from_table(kind: DatasetKind, table: RawTable, names: &ColumnNames) -> Result<Self> {
        let RawTable { headers, rows } = table;
        let headers = dedup_headers(kind, headers);

        let require = |col: &str| -> Result<usize> {
            headers
                .iter()
                .position(|h| h == col)
                .with_context(|| format!("{} data is missing the '{col}' column", kind.label()))
        };
        let name_idx = require(&names.name)?;
        let team_idx = require(&names.team)?;
        let age_idx = require(&names.age)?;
        let minutes_idx = require(&names.minutes)?;
        let position_idx = require(&names.position)?;
        let identity = [name_idx, team_idx, age_idx, minutes_idx];

        let metric_columns: Vec<String> = {
            let mut cols: Vec<String> = headers
                .iter()
                .enumerate()
                .filter(|(_, h)| !names.is_excluded_from_metrics(h))
                .filter(|(i, _)| is_metric_column(&rows, *i))
                .map(|(_, h)| h.clone())
                .collect();
            cols.sort();
            cols
        };

        let records: Vec<PlayerRecord> = rows
            .into_iter()
            .map(|row| {
                let cell = |i: usize| row.get(i).cloned().unwrap_or(CellValue::Null);
                let macro_position = match row.get(position_idx) {
                    Some(CellValue::String(code)) => MacroPosition::from_code(code),
                    _ => None,
                };
                let cells = headers
                    .iter()
                    .enumerate()
                    .filter(|(i, _)| !identity.contains(i))
                    .map(|(i, h)| (h.clone(), cell(i)))
                    .collect();

                PlayerRecord {
                    name: cell(name_idx).as_text(),
                    team: cell(team_idx).as_text(),
                    age: cell(age_idx).to_number(),
                    position: cell(position_idx).as_text(),
                    macro_position,
                    minutes: cell(minutes_idx),
                    cells,
                }
            })
            .collect();

        let macro_positions: Vec<MacroPosition> = records
            .iter()
            .filter_map(|r| r.macro_position)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        Ok(Dataset {
            kind,
            columns: headers,
            records,
            metric_columns,
            macro_positions,
        })
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Rename repeated headers to `name.1`, `name.2`, ... so every column keeps
/// a unique key.
fn dedup_headers(kind: DatasetKind, headers: Vec<String>) -> Vec<String> {
    let mut seen: BTreeSet<String> = BTreeSet::new();
    let mut out = Vec::with_capacity(headers.len());
    for h in headers {
        let mut name = h.clone();
        let mut n = 0;
        while seen.contains(&name) {
            n += 1;
            name = format!("{h}.{n}");
        }
        if n > 0 {
            log::warn!("{}: repeated column '{h}' renamed to '{name}'", kind.label());
        }
        seen.insert(name.clone());
        out.push(name);
    }
    out
}

/// Numbers (with gaps) or bools (without gaps) make a metric column.
fn is_metric_column(rows: &[Vec<CellValue>], i: usize) -> bool {
    let numeric = rows
        .iter()
        .all(|row| row.get(i).map_or(true, |c| c.is_numeric() || *c == CellValue::Null));
    let boolean = !rows.is_empty()
        && rows.iter().all(|row| matches!(row.get(i), Some(CellValue::Bool(_))));
    numeric || boolean
}
