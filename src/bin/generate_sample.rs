//! Writes a synthetic physical export and a synthetic event export under the
//! names the dashboard opens by default.
//!
//! ```text
//! generate_sample [PHYSICAL] [EVENTS]
//! ```
//! Paths ending in `.parquet` are written as Parquet, anything else as CSV.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{ArrayRef, Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use driblab_viewer::config::{DEFAULT_EVENTS_FILE, DEFAULT_HIGHLIGHT_TEAM, DEFAULT_PHYSICAL_FILE};

const TEAMS: [&str; 6] = [
    DEFAULT_HIGHLIGHT_TEAM,
    "Boca Juniors",
    "Racing Club",
    "Independiente",
    "San Lorenzo",
    "Estudiantes",
];

/// Every code the dashboard maps, plus one it does not.
const POSITIONS: [&str; 15] = [
    "GK", "DC", "DL", "DR", "DMC", "MC", "ML", "MR", "AMC", "AML", "AMR", "FW", "CF", "ST", "XX",
];

const FIRST_NAMES: [&str; 12] = [
    "Franco", "Lucas", "Matías", "Santiago", "Nicolás", "Facundo", "Agustín", "Tomás", "Julián",
    "Gonzalo", "Ezequiel", "Maximiliano",
];

const LAST_NAMES: [&str; 12] = [
    "González", "Rodríguez", "Fernández", "López", "Martínez", "Pérez", "Gómez", "Díaz",
    "Sosa", "Romero", "Álvarez", "Acosta",
];

/// One synthetic player line. `minutes` is `None` for the "n/d" rows.
struct Player {
    name: String,
    team: &'static str,
    age: i64,
    minutes: Option<i64>,
    position: &'static str,
}

struct Metric {
    name: &'static str,
    mean: f64,
    spread: f64,
    decimals: i32,
}

const PHYSICAL_METRICS: [Metric; 4] = [
    Metric { name: "Distancia total (m)", mean: 9500.0, spread: 1500.0, decimals: 0 },
    Metric { name: "Sprints", mean: 22.0, spread: 10.0, decimals: 0 },
    Metric { name: "Velocidad máxima (km/h)", mean: 31.0, spread: 3.0, decimals: 1 },
    Metric { name: "Aceleraciones", mean: 45.0, spread: 15.0, decimals: 0 },
];

const EVENT_METRICS: [Metric; 4] = [
    Metric { name: "Goles", mean: 3.0, spread: 3.0, decimals: 0 },
    Metric { name: "Asistencias", mean: 2.0, spread: 2.0, decimals: 0 },
    Metric { name: "Pases completados (%)", mean: 78.0, spread: 10.0, decimals: 1 },
    Metric { name: "Duelos ganados (%)", mean: 50.0, spread: 12.0, decimals: 1 },
];

fn squad(rng: &mut StdRng) -> Vec<Player> {
    let mut players = Vec::new();
    for (t, team) in TEAMS.iter().enumerate() {
        for (p, position) in POSITIONS.iter().enumerate() {
            let first = FIRST_NAMES[(t * 5 + p) % FIRST_NAMES.len()];
            let last = LAST_NAMES[(t * 7 + p * 3) % LAST_NAMES.len()];
            let minutes = match rng.gen_range(0..20) {
                0 => None,
                1 => Some(-rng.gen_range(1..90)),
                _ => Some(rng.gen_range(0..2700)),
            };
            players.push(Player {
                name: format!("{first} {last} ({})", t * POSITIONS.len() + p + 1),
                team,
                age: rng.gen_range(17..37),
                minutes,
                position,
            });
        }
    }
    players
}

/// Values for one metric column. Roughly one cell in twenty is left empty.
fn metric_values(metric: &Metric, n: usize, rng: &mut StdRng) -> Vec<Option<f64>> {
    let scale = 10f64.powi(metric.decimals);
    (0..n)
        .map(|_| {
            if rng.gen_range(0..20) == 0 {
                return None;
            }
            let v = metric.mean + rng.gen_range(-metric.spread..=metric.spread);
            Some((v.max(0.0) * scale).round() / scale)
        })
        .collect()
}

fn write_dataset(path: &Path, players: &[Player], metrics: &[Metric], rng: &mut StdRng) -> Result<()> {
    let columns: Vec<(&str, Vec<Option<f64>>)> = metrics
        .iter()
        .map(|m| (m.name, metric_values(m, players.len(), rng)))
        .collect();

    let is_parquet = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("parquet"));
    let written = if is_parquet {
        write_parquet(path, players, &columns)
    } else {
        write_csv(path, players, &columns)
    };
    written.with_context(|| format!("writing {}", path.display()))?;

    println!("Wrote {} players to {}", players.len(), path.display());
    Ok(())
}

fn write_csv(path: &Path, players: &[Player], columns: &[(&str, Vec<Option<f64>>)]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    let mut header = vec!["Nombre", "Equipo", "Edad", "Minutos", "Posición"];
    header.extend(columns.iter().map(|(name, _)| *name));
    writer.write_record(&header)?;

    for (i, p) in players.iter().enumerate() {
        let mut record = vec![
            p.name.clone(),
            p.team.to_string(),
            p.age.to_string(),
            p.minutes.map_or_else(|| "n/d".to_string(), |m| m.to_string()),
            p.position.to_string(),
        ];
        record.extend(
            columns
                .iter()
                .map(|(_, values)| values[i].map(|v| v.to_string()).unwrap_or_default()),
        );
        writer.write_record(&record)?;
    }
    writer.flush()?;
    Ok(())
}

fn write_parquet(
    path: &Path,
    players: &[Player],
    columns: &[(&str, Vec<Option<f64>>)],
) -> Result<()> {
    let mut fields = vec![
        Field::new("Nombre", DataType::Utf8, false),
        Field::new("Equipo", DataType::Utf8, false),
        Field::new("Edad", DataType::Int64, false),
        Field::new("Minutos", DataType::Int64, true),
        Field::new("Posición", DataType::Utf8, false),
    ];
    let mut arrays: Vec<ArrayRef> = vec![
        Arc::new(StringArray::from_iter_values(players.iter().map(|p| p.name.as_str()))),
        Arc::new(StringArray::from_iter_values(players.iter().map(|p| p.team))),
        Arc::new(Int64Array::from_iter_values(players.iter().map(|p| p.age))),
        Arc::new(Int64Array::from(players.iter().map(|p| p.minutes).collect::<Vec<_>>())),
        Arc::new(StringArray::from_iter_values(players.iter().map(|p| p.position))),
    ];
    for (name, values) in columns {
        fields.push(Field::new(*name, DataType::Float64, true));
        arrays.push(Arc::new(Float64Array::from(values.clone())));
    }

    let schema = Arc::new(Schema::new(fields));
    let batch = RecordBatch::try_new(schema.clone(), arrays)?;

    let file = std::fs::File::create(path)?;
    let mut writer = ArrowWriter::try_new(file, schema, None)?;
    writer.write(&batch)?;
    writer.close()?;
    Ok(())
}

fn main() -> Result<()> {
    let mut args = std::env::args().skip(1);
    let physical = args
        .next()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_PHYSICAL_FILE));
    let events = args
        .next()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_EVENTS_FILE));

    let mut rng = StdRng::seed_from_u64(42);
    let players = squad(&mut rng);

    write_dataset(&physical, &players, &PHYSICAL_METRICS, &mut rng)?;
    write_dataset(&events, &players, &EVENT_METRICS, &mut rng)?;
    Ok(())
}
