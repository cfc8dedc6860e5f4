use anyhow::Result;

use super::loader::load_dataset;
use super::model::{Dataset, DatasetKind};
use crate::config::DashboardConfig;

// ---------------------------------------------------------------------------
// DatasetStore – both exports, loaded once
// ---------------------------------------------------------------------------

/// Owns the two datasets for the lifetime of the process.
///
/// Built once at start-up and handed to the UI by reference; every
/// recomputation pass reads from here instead of touching the files again.
/// Picking up edited files requires a restart.
#[derive(Debug, Clone)]
pub struct DatasetStore {
    physical: Dataset,
    events: Dataset,
}

impl DatasetStore {
    /// Load both exports. Any failure aborts the whole load.
    pub fn load(config: &DashboardConfig) -> Result<Self> {
        let physical = load_dataset(
            DatasetKind::Physical,
            config.path_for(DatasetKind::Physical),
            &config.columns,
        )?;
        let events = load_dataset(
            DatasetKind::Events,
            config.path_for(DatasetKind::Events),
            &config.columns,
        )?;
        Ok(Self::from_datasets(physical, events))
    }

    pub fn from_datasets(physical: Dataset, events: Dataset) -> Self {
        Self { physical, events }
    }

    pub fn get(&self, kind: DatasetKind) -> &Dataset {
        match kind {
            DatasetKind::Physical => &self.physical,
            DatasetKind::Events => &self.events,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::path::{Path, PathBuf};

    use super::*;
    use crate::data::filter::{apply, Selection};

    fn write_csv(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        path
    }

    #[test]
    fn reads_never_touch_the_files_again() {
        let dir = tempfile::tempdir().unwrap();
        let config = DashboardConfig {
            physical_path: write_csv(
                dir.path(),
                "fisico.csv",
                "Nombre,Equipo,Edad,Minutos,Posición,Sprints\nBorja,River Plate,31,1200,ST,21\n",
            ),
            events_path: write_csv(
                dir.path(),
                "eventos.csv",
                "Nombre,Equipo,Edad,Minutos,Posición,Goles\nBorja,River Plate,31,1200,ST,9\n",
            ),
            ..DashboardConfig::default()
        };
        let store = DatasetStore::load(&config).unwrap();

        std::fs::remove_file(&config.physical_path).unwrap();
        std::fs::remove_file(&config.events_path).unwrap();

        for kind in DatasetKind::ALL {
            let view = apply(store.get(kind), &Selection::default()).unwrap();
            assert_eq!(view.controls.players, vec!["Borja"]);
        }
        assert_eq!(store.get(DatasetKind::Events).metric_columns, vec!["Goles"]);
    }

    #[test]
    fn repeated_header_still_loads() {
        let dir = tempfile::tempdir().unwrap();
        let config = DashboardConfig {
            physical_path: write_csv(
                dir.path(),
                "fisico.csv",
                "Nombre,Equipo,Edad,Minutos,Posición,Goles,Goles\nBorja,River Plate,31,inf,ST,9,4\nCavani,Boca Juniors,38,90,CF,5,1\n",
            ),
            events_path: write_csv(
                dir.path(),
                "eventos.csv",
                "Nombre,Equipo,Edad,Minutos,Posición,Goles\nBorja,River Plate,31,1200,ST,9\n",
            ),
            ..DashboardConfig::default()
        };
        let store = DatasetStore::load(&config).unwrap();
        let physical = store.get(DatasetKind::Physical);
        assert_eq!(physical.metric_columns, vec!["Goles", "Goles.1"]);

        // Infinite minutes never widen the slider bounds.
        let view = apply(physical, &Selection::default()).unwrap();
        assert_eq!(view.controls.minutes_bounds, Some((90, 90)));
        assert_eq!(view.controls.players, vec!["Cavani"]);
    }
}
