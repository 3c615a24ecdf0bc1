use eframe::egui::{RichText, ScrollArea, Ui};

use crate::color;
use crate::data::views::{self, AnalyticsReport};
use crate::state::AppState;
use crate::ui::{charts, panels};

// ---------------------------------------------------------------------------
// Analytics tab
// ---------------------------------------------------------------------------

pub fn show(ui: &mut Ui, state: &mut AppState) {
    let Some(dataset) = state.dataset.clone() else {
        return;
    };

    ui.heading("Analytics");
    ui.add_space(4.0);

    ui.horizontal(|ui: &mut Ui| {
        ui.label("UC Campus:");
        panels::optional_combo(
            ui,
            "analytics_campus",
            "All UC",
            &dataset.campuses,
            &mut state.analytics_campus,
        );
    });
    ui.add_space(8.0);

    let Some(report) = views::campus_analytics(&dataset, state.analytics_campus.as_deref())
    else {
        ui.label("No records match this campus filter.");
        return;
    };

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            headline_row(ui, &report);
            ui.add_space(12.0);

            ui.columns(2, |columns: &mut [Ui]| {
                top_schools_chart(&mut columns[0], &report);
                distribution_chart(&mut columns[1], &report);
            });
            ui.add_space(12.0);

            ui.columns(2, |columns: &mut [Ui]| {
                type_breakdown(&mut columns[0], &report);
                city_chart(&mut columns[1], &report);
            });
            ui.add_space(12.0);

            demographic_chart(ui, &report);
        });
}

fn headline_row(ui: &mut Ui, report: &AnalyticsReport<'_>) {
    ui.horizontal(|ui: &mut Ui| {
        panels::metric_card(ui, &report.headline.schools.to_string(), "Total Schools");
        panels::metric_card(
            ui,
            &format!("{:.1}%", report.headline.mean_admit_rate),
            "Avg Admit Rate",
        );
        panels::metric_card(
            ui,
            &format!("{:.1}%", report.headline.max_admit_rate),
            "Highest Rate",
        );
        panels::metric_card(
            ui,
            &format!("{:.1}%", report.headline.min_admit_rate),
            "Lowest Rate",
        );
    });
}

fn top_schools_chart(ui: &mut Ui, report: &AnalyticsReport<'_>) {
    ui.strong("Top 10 Schools by Admit Rate");
    let entries: Vec<charts::BarEntry> = report
        .top_schools
        .iter()
        .map(|rec| {
            charts::BarEntry::new(
                truncate_label(&rec.school, 24),
                rec.admit_rate,
                color::rate_color(rec.admit_rate),
            )
        })
        .collect();
    charts::horizontal_bar_chart(ui, "analytics_top10", "Admit Rate (%)", &entries, 300.0);
}

fn distribution_chart(ui: &mut Ui, report: &AnalyticsReport<'_>) {
    ui.strong("Admit Rate Distribution");
    charts::histogram(ui, "analytics_histogram", &report.histogram, color::ACCENT, 300.0);
}

fn type_breakdown(ui: &mut Ui, report: &AnalyticsReport<'_>) {
    ui.strong("Public vs Private Schools");
    if report.by_type.is_empty() {
        ui.label(RichText::new("No school type data.").weak());
        return;
    }

    let palette = color::generate_palette(report.by_type.len());
    let slices: Vec<charts::Slice> = report
        .by_type
        .iter()
        .zip(palette)
        .map(|(stats, color)| {
            charts::Slice::new(stats.school_type.label(), stats.schools as f64, color)
        })
        .collect();
    charts::donut_chart(ui, &slices, 160.0);

    ui.add_space(4.0);
    for stats in &report.by_type {
        ui.label(format!(
            "{}: {} schools | Avg Rate: {:.1}% | Total Apps: {}",
            stats.school_type.label(),
            stats.schools,
            stats.mean_admit_rate,
            panels::format_count(stats.total_applied)
        ));
    }
}

fn city_chart(ui: &mut Ui, report: &AnalyticsReport<'_>) {
    ui.strong("Top Cities by Average Admit Rate");
    if report.by_city.is_empty() {
        ui.label(RichText::new("No city has two or more ranked schools.").weak());
        return;
    }
    let entries: Vec<charts::BarEntry> = report
        .by_city
        .iter()
        .map(|stats| {
            charts::BarEntry::new(
                format!("{} ({})", stats.city, stats.schools),
                stats.mean_admit_rate,
                color::ACCENT,
            )
        })
        .collect();
    charts::bar_chart(ui, "analytics_cities", "Avg Admit Rate (%)", &entries, 300.0);
}

fn demographic_chart(ui: &mut Ui, report: &AnalyticsReport<'_>) {
    ui.strong("Average Admit Rate by Demographic (schools with data)");
    if report.demo_averages.is_empty() {
        ui.label(RichText::new("No demographic rate data in this subset.").weak());
        return;
    }
    let palette = color::generate_palette(report.demo_averages.len());
    let entries: Vec<charts::BarEntry> = report
        .demo_averages
        .iter()
        .zip(palette)
        .map(|(&(group, rate), color)| charts::BarEntry::new(group.label(), rate, color))
        .collect();
    charts::bar_chart(ui, "analytics_demographics", "Avg Admit Rate (%)", &entries, 260.0);
}

fn truncate_label(name: &str, max: usize) -> String {
    if name.chars().count() > max {
        let head: String = name.chars().take(max.saturating_sub(1)).collect();
        format!("{head}…")
    } else {
        name.to_string()
    }
}
