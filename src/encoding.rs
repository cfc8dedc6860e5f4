//! Visual encoding of a filtered view: percentile thresholds, marker colour,
//! size, border and vertical jitter for each surviving row.

use rand::Rng;

use crate::color::{Border, PointColor};
use crate::config::DashboardConfig;
use crate::data::filter::{FilteredView, Halt};
use crate::data::model::Dataset;

pub const HIGHLIGHT_SIZE: f32 = 15.0;
pub const DEFAULT_SIZE: f32 = 9.0;
pub const BORDER_WIDTH: f32 = 2.0;

/// 25th and 75th percentile of the active metric.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    pub p25: f64,
    pub p75: f64,
}

impl Thresholds {
    /// Thresholds over the defined values; `None` when there are none.
    pub fn from_values(values: impl IntoIterator<Item = f64>) -> Option<Self> {
        let mut sorted: Vec<f64> = values.into_iter().filter(|v| !v.is_nan()).collect();
        if sorted.is_empty() {
            return None;
        }
        sorted.sort_by(f64::total_cmp);
        Some(Self {
            p25: percentile(&sorted, 25.0),
            p75: percentile(&sorted, 75.0),
        })
    }

    /// Colour rule, first match wins: highlight, low, high, mid.
    /// A value equal to both thresholds is low.
    pub fn classify(&self, value: Option<f64>, highlighted: bool) -> PointColor {
        if highlighted {
            return PointColor::Highlight;
        }
        match value {
            Some(v) if v <= self.p25 => PointColor::Low,
            Some(v) if v >= self.p75 => PointColor::High,
            _ => PointColor::Mid,
        }
    }
}

/// Percentile using linear interpolation (NumPy compatible).
/// `sorted_values` must be sorted and non-empty.
fn percentile(sorted_values: &[f64], p: f64) -> f64 {
    let n = sorted_values.len();
    if n == 1 {
        return sorted_values[0];
    }

    let rank = (p / 100.0) * (n - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = (rank.ceil() as usize).min(n - 1);
    let frac = rank - lower as f64;

    if lower == upper {
        sorted_values[lower]
    } else {
        sorted_values[lower] * (1.0 - frac) + sorted_values[upper] * frac
    }
}

// ---------------------------------------------------------------------------
// Per-row encoding
// ---------------------------------------------------------------------------

/// Styling knobs taken from the dashboard configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct EncoderSettings {
    pub highlight_team: String,
    pub jitter: f64,
}

impl From<&DashboardConfig> for EncoderSettings {
    fn from(config: &DashboardConfig) -> Self {
        Self {
            highlight_team: config.highlight_team.clone(),
            jitter: config.jitter,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EncodedPoint {
    /// Index into the dataset.
    pub index: usize,
    /// Metric value; `None` keeps the row but leaves it off the x axis.
    pub x: Option<f64>,
    /// Jitter only. Not data.
    pub y: f64,
    pub color: PointColor,
    pub size: f32,
    pub border: Border,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Encoding {
    pub thresholds: Thresholds,
    /// Same order as the view's rows.
    pub points: Vec<EncodedPoint>,
}

/// Encode every row of `view`. Halts with `EmptyResult` when no row has a
/// usable metric value.
pub fn encode<R: Rng + ?Sized>(
    dataset: &Dataset,
    view: &FilteredView,
    settings: &EncoderSettings,
    rng: &mut R,
) -> Result<Encoding, Halt> {
    let metric = view.metric();
    let values: Vec<Option<f64>> = view
        .rows
        .iter()
        .map(|r| dataset.records[r.index].metric(metric))
        .collect();

    let Some(thresholds) = Thresholds::from_values(values.iter().flatten().copied()) else {
        log::warn!("No numeric '{metric}' values among {} rows", view.rows.len());
        return Err(Halt::EmptyResult);
    };

    let highlight = view.highlight();
    let points = view
        .rows
        .iter()
        .zip(values)
        .map(|(row, x)| {
            let record = &dataset.records[row.index];
            let highlighted = highlight.is_some() && record.name.as_deref() == highlight;
            let border = if record.team.as_deref() == Some(settings.highlight_team.as_str()) {
                Border::Team
            } else {
                Border::None
            };
            EncodedPoint {
                index: row.index,
                x,
                y: rng.gen_range(-settings.jitter..=settings.jitter),
                color: thresholds.classify(x, highlighted),
                size: if highlighted { HIGHLIGHT_SIZE } else { DEFAULT_SIZE },
                border,
            }
        })
        .collect();

    Ok(Encoding { thresholds, points })
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::data::filter::tests::dataset;
    use crate::data::filter::{apply, Selection};
    use crate::data::model::CellValue;

    fn settings() -> EncoderSettings {
        EncoderSettings::from(&DashboardConfig::default())
    }

    fn five_forwards() -> Dataset {
        dataset(&[
            ("A", "Boca Juniors", CellValue::Integer(90), "ST", CellValue::Integer(10)),
            ("B", "Boca Juniors", CellValue::Integer(90), "ST", CellValue::Integer(20)),
            ("C", "River Plate", CellValue::Integer(90), "ST", CellValue::Integer(30)),
            ("D", "Boca Juniors", CellValue::Integer(90), "ST", CellValue::Integer(40)),
            ("E", "Boca Juniors", CellValue::Integer(90), "ST", CellValue::Integer(50)),
        ])
    }

    #[test]
    fn numpy_linear_percentiles() {
        let t = Thresholds::from_values([50.0, 10.0, 40.0, 20.0, 30.0]).unwrap();
        assert_eq!(t, Thresholds { p25: 20.0, p75: 40.0 });

        let t = Thresholds::from_values([1.0, 2.0, 3.0, 4.0]).unwrap();
        assert!((t.p25 - 1.75).abs() < 1e-12);
        assert!((t.p75 - 3.25).abs() < 1e-12);

        let t = Thresholds::from_values([7.0]).unwrap();
        assert_eq!(t, Thresholds { p25: 7.0, p75: 7.0 });

        assert_eq!(Thresholds::from_values([f64::NAN]), None);
        assert_eq!(Thresholds::from_values(Vec::new()), None);
    }

    #[test]
    fn five_values_without_highlight() {
        let t = Thresholds::from_values([10.0, 20.0, 30.0, 40.0, 50.0]).unwrap();
        let colors: Vec<_> = [10.0, 20.0, 30.0, 40.0, 50.0]
            .iter()
            .map(|v| t.classify(Some(*v), false))
            .collect();
        assert_eq!(
            colors,
            vec![
                PointColor::Low,
                PointColor::Low,
                PointColor::Mid,
                PointColor::High,
                PointColor::High
            ]
        );
    }

    #[test]
    fn identical_values_are_all_low() {
        let t = Thresholds::from_values([5.0, 5.0, 5.0]).unwrap();
        assert_eq!(t.classify(Some(5.0), false), PointColor::Low);
        assert_eq!(t.classify(Some(5.0), true), PointColor::Highlight);
    }

    #[test]
    fn highlighted_row_is_black_and_large_whatever_its_value() {
        let ds = five_forwards();
        for name in ["A", "C", "E"] {
            let sel = Selection {
                highlight: Some(name.to_string()),
                ..Selection::default()
            };
            let view = apply(&ds, &sel).unwrap();
            let enc = encode(&ds, &view, &settings(), &mut StdRng::seed_from_u64(7)).unwrap();
            for p in &enc.points {
                let is_highlight = ds.records[p.index].name.as_deref() == Some(name);
                assert_eq!(p.color == PointColor::Highlight, is_highlight);
                assert_eq!(p.size, if is_highlight { HIGHLIGHT_SIZE } else { DEFAULT_SIZE });
            }
        }
    }

    #[test]
    fn distinguished_team_gets_border_and_jitter_stays_in_band() {
        let ds = five_forwards();
        let view = apply(&ds, &Selection::default()).unwrap();
        let enc = encode(&ds, &view, &settings(), &mut StdRng::seed_from_u64(1)).unwrap();
        let borders: Vec<_> = enc.points.iter().map(|p| p.border).collect();
        assert_eq!(
            borders,
            vec![Border::None, Border::None, Border::Team, Border::None, Border::None]
        );
        assert!(enc.points.iter().all(|p| (-0.5..=0.5).contains(&p.y)));
    }

    #[test]
    fn rows_without_metric_are_kept_as_mid() {
        let ds = dataset(&[
            ("A", "Boca Juniors", CellValue::Integer(90), "DC", CellValue::Integer(1)),
            ("B", "Boca Juniors", CellValue::Integer(90), "DC", CellValue::Null),
            ("C", "Boca Juniors", CellValue::Integer(90), "DC", CellValue::Integer(3)),
        ]);
        let sel = Selection {
            highlight: Some("C".into()),
            ..Selection::default()
        };
        let view = apply(&ds, &sel).unwrap();
        let enc = encode(&ds, &view, &settings(), &mut StdRng::seed_from_u64(3)).unwrap();
        assert_eq!(enc.points.len(), 3);
        assert_eq!(enc.points[1].x, None);
        assert_eq!(enc.points[1].color, PointColor::Mid);
        assert_eq!(enc.points[0].color, PointColor::Low);
    }

    #[test]
    fn no_metric_values_halts() {
        let ds = dataset(&[
            ("A", "Boca Juniors", CellValue::Integer(90), "DC", CellValue::Null),
            ("B", "Boca Juniors", CellValue::Integer(90), "DC", CellValue::Null),
        ]);
        let view = apply(&ds, &Selection::default()).unwrap();
        let err = encode(&ds, &view, &settings(), &mut StdRng::seed_from_u64(0)).unwrap_err();
        assert_eq!(err, Halt::EmptyResult);
    }

    proptest! {
        #[test]
        fn exactly_one_rule_fires_in_priority_order(
            values in prop::collection::vec(-1000.0f64..1000.0, 1..30),
            probe in -1200.0f64..1200.0,
            highlighted in any::<bool>(),
        ) {
            let t = Thresholds::from_values(values).unwrap();
            prop_assert!(t.p25 <= t.p75);
            let expected = if highlighted {
                PointColor::Highlight
            } else if probe <= t.p25 {
                PointColor::Low
            } else if probe >= t.p75 {
                PointColor::High
            } else {
                PointColor::Mid
            };
            prop_assert_eq!(t.classify(Some(probe), highlighted), expected);
        }
    }
}
