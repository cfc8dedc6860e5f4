use eframe::egui::{self, Color32, Ui};
use egui_plot::{MarkerShape, Plot, PlotPoint, PlotPoints, Points};

use crate::color::Border;
use crate::data::model::Dataset;
use crate::encoding::BORDER_WIDTH;
use crate::state::Dashboard;

// ---------------------------------------------------------------------------
// Metric scatter (central panel)
// ---------------------------------------------------------------------------

/// Render the one-dimensional scatter: x is the metric, y is jitter.
pub fn metric_scatter(ui: &mut Ui, dataset: &Dataset, dashboard: &Dashboard) {
    let metric = dashboard.view.metric().to_string();
    let label_metric = metric.clone();

    egui::Frame::new().fill(Color32::WHITE).show(ui, |ui: &mut Ui| {
        Plot::new("metric_scatter")
            .height(400.0)
            .x_axis_label(metric.as_str())
            .y_axis_formatter(|_, _| String::new())
            .show_grid([true, false])
            .include_y(-0.6)
            .include_y(0.6)
            .allow_boxed_zoom(true)
            .allow_drag(true)
            .allow_scroll(false)
            .label_formatter(move |name: &str, value: &PlotPoint| {
                if name.is_empty() {
                    String::new()
                } else {
                    format!("{name}\n{label_metric}: {:.2}", value.x)
                }
            })
            .show(ui, |plot_ui| {
                for point in &dashboard.encoding.points {
                    let Some(x) = point.x else {
                        continue;
                    };
                    let name = dataset.records[point.index]
                        .name
                        .clone()
                        .unwrap_or_default();
                    // Marker size is a diameter; egui_plot wants a radius.
                    let radius = point.size / 2.0;

                    if point.border == Border::Team {
                        plot_ui.points(
                            Points::new(PlotPoints::new(vec![[x, point.y]]))
                                .shape(MarkerShape::Circle)
                                .filled(false)
                                .radius(radius + BORDER_WIDTH / 2.0)
                                .color(point.border.color32()),
                        );
                    }
                    plot_ui.points(
                        Points::new(PlotPoints::new(vec![[x, point.y]]))
                            .shape(MarkerShape::Circle)
                            .filled(true)
                            .radius(radius)
                            .color(point.color.color32())
                            .name(name),
                    );
                }
            });
    });
}
