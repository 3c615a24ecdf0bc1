use eframe::egui::{self, RichText, ScrollArea, Ui};
use egui_extras::{Column, TableBuilder};

use crate::color;
use crate::data::model::SchoolRecord;
use crate::data::views::{self, DemographicRow};
use crate::state::AppState;
use crate::ui::{charts, panels};

// ---------------------------------------------------------------------------
// School detail tab
// ---------------------------------------------------------------------------

pub fn show(ui: &mut Ui, state: &mut AppState) {
    let Some(dataset) = state.dataset.clone() else {
        return;
    };

    ui.heading("School Detail");
    ui.add_space(4.0);

    // The detail view always works on a concrete campus.
    if state.detail_campus.is_none() {
        state.detail_campus = dataset.campuses.first().cloned();
    }

    ui.horizontal(|ui: &mut Ui| {
        ui.label("UC Campus:");
        let before = state.detail_campus.clone();
        if let Some(campus) = &mut state.detail_campus {
            egui::ComboBox::from_id_salt("detail_campus")
                .selected_text(campus.clone())
                .show_ui(ui, |ui: &mut Ui| {
                    for option in &dataset.campuses {
                        if ui.selectable_label(campus == option, option).clicked() {
                            *campus = option.clone();
                        }
                    }
                });
        }
        if state.detail_campus != before {
            // Campus changed; the school list is different now.
            state.detail_school = None;
        }

        let campus = state.detail_campus.clone().unwrap_or_default();
        let schools = dataset.schools_at(Some(&campus));
        if state
            .detail_school
            .as_ref()
            .is_some_and(|s| !schools.contains(s))
        {
            state.detail_school = None;
        }

        ui.label("School:");
        panels::optional_combo(
            ui,
            "detail_school",
            "Select a school",
            &schools,
            &mut state.detail_school,
        );
    });

    ui.add_space(8.0);

    let campus = state.detail_campus.clone().unwrap_or_default();
    let Some(school) = state.detail_school.clone() else {
        ui.label("Pick a school to see its admission statistics.");
        return;
    };

    match views::find_school(&dataset, &school, &campus) {
        Some(rec) => render_detail(ui, rec),
        None => {
            ui.label("No record for that school at this campus. Pick another.");
        }
    }
}

fn render_detail(ui: &mut Ui, rec: &SchoolRecord) {
    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.horizontal(|ui: &mut Ui| {
                ui.heading(&rec.school);
                panels::badge(
                    ui,
                    &format!("{:.1}%", rec.admit_rate),
                    color::rate_color(rec.admit_rate),
                );
            });
            ui.label(
                RichText::new(format!(
                    "{}, {} County | {} School | {}",
                    rec.city,
                    rec.county,
                    rec.school_type.label(),
                    rec.college
                ))
                .weak(),
            );
            ui.add_space(8.0);

            ui.horizontal(|ui: &mut Ui| {
                panels::metric_card(ui, &format!("{:.1}%", rec.admit_rate), "Admit Rate");
                panels::metric_card(ui, &panels::format_count(rec.applied.into()), "Applied");
                panels::metric_card(ui, &panels::format_count(rec.admitted.into()), "Admitted");
                panels::metric_card(ui, &panels::format_count(rec.enrolled.into()), "Enrolled");
            });

            ui.add_space(12.0);
            ui.strong("Demographic Breakdown");
            ui.add_space(4.0);

            ui.columns(2, |columns: &mut [Ui]| {
                demographic_rate_chart(&mut columns[0], rec);
                demographic_share_chart(&mut columns[1], rec);
            });

            ui.add_space(12.0);
            ui.strong("Detailed Demographics");
            ui.add_space(4.0);

            let rows = views::demographic_rows(rec);
            if rows.is_empty() {
                ui.label("No detailed demographic data available for this school.");
            } else {
                demographic_table(ui, &rows);
            }
        });
}

fn demographic_rate_chart(ui: &mut Ui, rec: &SchoolRecord) {
    ui.label("Admit rate by demographic");
    let series = views::demo_rate_series(rec);
    if series.is_empty() {
        ui.label(RichText::new("No demographic admit rate data.").weak());
        return;
    }
    let palette = color::generate_palette(series.len());
    let entries: Vec<charts::BarEntry> = series
        .iter()
        .zip(palette)
        .map(|(&(group, rate), color)| charts::BarEntry::new(group.label(), rate, color))
        .collect();
    charts::bar_chart(ui, "detail_demo_rates", "Admit Rate (%)", &entries, 240.0);
}

fn demographic_share_chart(ui: &mut Ui, rec: &SchoolRecord) {
    ui.label("Applications by demographic");
    let series = views::demo_applied_series(rec);
    if series.is_empty() {
        ui.label(RichText::new("No demographic application data.").weak());
        return;
    }
    let palette = color::generate_palette(series.len());
    let slices: Vec<charts::Slice> = series
        .iter()
        .zip(palette)
        .map(|(&(group, applied), color)| {
            charts::Slice::new(group.label(), f64::from(applied), color)
        })
        .collect();
    charts::donut_chart(ui, &slices, 180.0);
}

fn demographic_table(ui: &mut Ui, rows: &[DemographicRow]) {
    TableBuilder::new(ui)
        .striped(true)
        .column(Column::remainder())
        .column(Column::auto().at_least(80.0))
        .column(Column::auto().at_least(80.0))
        .column(Column::auto().at_least(90.0))
        .header(20.0, |mut header| {
            header.col(|ui| {
                ui.strong("Demographic");
            });
            header.col(|ui| {
                ui.strong("Applied");
            });
            header.col(|ui| {
                ui.strong("Admitted");
            });
            header.col(|ui| {
                ui.strong("Admit Rate");
            });
        })
        .body(|mut body| {
            for row in rows {
                body.row(18.0, |mut table_row| {
                    table_row.col(|ui| {
                        ui.label(row.group.label());
                    });
                    table_row.col(|ui| {
                        ui.label(panels::format_count(row.applied.into()));
                    });
                    table_row.col(|ui| {
                        ui.label(panels::format_count(row.admitted.into()));
                    });
                    table_row.col(|ui| {
                        ui.label(format!("{:.1}%", row.admit_rate));
                    });
                });
            }
        });
}
