use eframe::egui::{vec2, Color32, Pos2, RichText, Sense, Shape, Stroke, Ui};
use egui_plot::{Bar, BarChart, GridMark, Legend, Plot};

use crate::data::views::HistogramBin;

// ---------------------------------------------------------------------------
// Categorical bar charts (egui_plot)
// ---------------------------------------------------------------------------

/// One labelled value in a categorical bar chart.
#[derive(Debug, Clone)]
pub struct BarEntry {
    pub label: String,
    pub value: f64,
    pub color: Color32,
}

impl BarEntry {
    pub fn new(label: impl Into<String>, value: f64, color: Color32) -> Self {
        Self {
            label: label.into(),
            value,
            color,
        }
    }
}

/// Vertical bar chart with category labels on the x axis.
pub fn bar_chart(ui: &mut Ui, id: &str, y_label: &str, entries: &[BarEntry], height: f32) {
    let bars: Vec<Bar> = entries
        .iter()
        .enumerate()
        .map(|(i, e)| {
            Bar::new(i as f64, e.value)
                .width(0.6)
                .fill(e.color)
                .name(&e.label)
        })
        .collect();
    let labels: Vec<String> = entries.iter().map(|e| e.label.clone()).collect();

    static_plot(Plot::new(id.to_string()))
        .height(height)
        .y_axis_label(y_label.to_string())
        .x_axis_formatter(move |mark: GridMark, _range| category_label(&labels, mark))
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars));
        });
}

/// Horizontal bar chart; entries render top to bottom in the given order.
pub fn horizontal_bar_chart(ui: &mut Ui, id: &str, x_label: &str, entries: &[BarEntry], height: f32) {
    let n = entries.len();
    let bars: Vec<Bar> = entries
        .iter()
        .enumerate()
        .map(|(i, e)| {
            Bar::new((n - 1 - i) as f64, e.value)
                .width(0.6)
                .fill(e.color)
                .name(&e.label)
        })
        .collect();
    // Row i sits at y = n-1-i, so reverse the labels for the axis.
    let labels: Vec<String> = entries.iter().rev().map(|e| e.label.clone()).collect();

    static_plot(Plot::new(id.to_string()))
        .height(height)
        .x_axis_label(x_label.to_string())
        .y_axis_formatter(move |mark: GridMark, _range| category_label(&labels, mark))
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).horizontal());
        });
}

/// Grouped bar chart: one bar per (category, series) pair with a legend.
pub struct GroupedSeries {
    pub name: String,
    pub color: Color32,
    /// One value per category, in category order.
    pub values: Vec<f64>,
}

pub fn grouped_bar_chart(
    ui: &mut Ui,
    id: &str,
    categories: &[&str],
    series: &[GroupedSeries],
    height: f32,
) {
    let group_width = 0.8;
    let bar_width = group_width / series.len().max(1) as f64;

    let charts: Vec<BarChart> = series
        .iter()
        .enumerate()
        .map(|(j, s)| {
            let bars: Vec<Bar> = s
                .values
                .iter()
                .enumerate()
                .map(|(i, &v)| {
                    let x = i as f64 - group_width / 2.0 + bar_width * (j as f64 + 0.5);
                    Bar::new(x, v).width(bar_width * 0.9).fill(s.color)
                })
                .collect();
            BarChart::new(bars).name(&s.name).color(s.color)
        })
        .collect();

    let labels: Vec<String> = categories.iter().map(|c| c.to_string()).collect();

    static_plot(Plot::new(id.to_string()))
        .height(height)
        .legend(Legend::default())
        .x_axis_formatter(move |mark: GridMark, _range| category_label(&labels, mark))
        .show(ui, |plot_ui| {
            for chart in charts {
                plot_ui.bar_chart(chart);
            }
        });
}

/// Histogram over pre-bucketed bins.
pub fn histogram(ui: &mut Ui, id: &str, bins: &[HistogramBin], color: Color32, height: f32) {
    let bars: Vec<Bar> = bins
        .iter()
        .map(|b| {
            // A degenerate single-bin histogram has zero width; keep it visible.
            let width = (b.end - b.start).max(0.5);
            Bar::new((b.start + b.end) / 2.0, b.count as f64)
                .width(width)
                .fill(color)
        })
        .collect();

    static_plot(Plot::new(id.to_string()))
        .height(height)
        .x_axis_label("Admit Rate (%)")
        .y_axis_label("Schools")
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars));
        });
}

/// Non-interactive plot: the dashboard charts are read-only displays.
#[allow(elided_lifetimes_in_paths)]
fn static_plot(plot: Plot) -> Plot {
    plot.allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .include_y(0.0)
}

fn category_label(labels: &[String], mark: GridMark) -> String {
    let rounded = mark.value.round();
    if (mark.value - rounded).abs() > 0.05 || rounded < 0.0 {
        return String::new();
    }
    labels
        .get(rounded as usize)
        .cloned()
        .unwrap_or_default()
}

// ---------------------------------------------------------------------------
// Donut chart (egui painter; egui_plot has no pie type)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct Slice {
    pub label: String,
    pub value: f64,
    pub color: Color32,
}

impl Slice {
    pub fn new(label: impl Into<String>, value: f64, color: Color32) -> Self {
        Self {
            label: label.into(),
            value,
            color,
        }
    }
}

/// Draw a donut chart with a legend underneath. Slices with non-positive
/// values are skipped; an all-zero input draws nothing (the caller shows a
/// placeholder instead).
pub fn donut_chart(ui: &mut Ui, slices: &[Slice], diameter: f32) {
    let total: f64 = slices.iter().map(|s| s.value.max(0.0)).sum();
    if total <= 0.0 {
        return;
    }

    ui.vertical_centered(|ui| {
        let (response, painter) = ui.allocate_painter(vec2(diameter, diameter), Sense::hover());
        let center = response.rect.center();
        let outer = diameter * 0.48;
        let inner = outer * 0.55;

        let mut angle = -std::f32::consts::FRAC_PI_2; // start at 12 o'clock
        for slice in slices {
            if slice.value <= 0.0 {
                continue;
            }
            let sweep = (slice.value / total) as f32 * std::f32::consts::TAU;
            paint_ring_sector(&painter, center, inner, outer, angle, angle + sweep, slice.color);
            angle += sweep;
        }
    });

    for slice in slices {
        if slice.value <= 0.0 {
            continue;
        }
        let share = slice.value / total * 100.0;
        ui.horizontal(|ui| {
            ui.label(RichText::new("⬤").color(slice.color).small());
            ui.label(format!("{} ({share:.1}%)", slice.label));
        });
    }
}

/// Fill a ring sector as a fan of small convex quads (a full ring sector is
/// concave, which the tessellator would mangle).
fn paint_ring_sector(
    painter: &eframe::egui::Painter,
    center: Pos2,
    inner: f32,
    outer: f32,
    from: f32,
    to: f32,
    color: Color32,
) {
    let steps = (((to - from).abs() / 0.08).ceil() as usize).max(2);
    let at = |radius: f32, angle: f32| center + radius * vec2(angle.cos(), angle.sin());

    for i in 0..steps {
        let a0 = from + (to - from) * i as f32 / steps as f32;
        let a1 = from + (to - from) * (i + 1) as f32 / steps as f32;
        painter.add(Shape::convex_polygon(
            vec![at(outer, a0), at(outer, a1), at(inner, a1), at(inner, a0)],
            color,
            Stroke::NONE,
        ));
    }
}
