use eframe::egui::{self, RichText, ScrollArea, Ui};

use crate::color;
use crate::data::model::SchoolRecord;
use crate::data::views;
use crate::state::{AppState, MAX_COMPARE};
use crate::ui::{charts, panels};

// ---------------------------------------------------------------------------
// Comparison tab
// ---------------------------------------------------------------------------

pub fn show(ui: &mut Ui, state: &mut AppState) {
    let Some(dataset) = state.dataset.clone() else {
        return;
    };

    ui.heading("School Comparison");
    ui.label("Pick 2 to 3 schools to compare their admission statistics side by side.");
    ui.add_space(4.0);

    ui.horizontal(|ui: &mut Ui| {
        ui.label("UC Campus:");
        let before = state.compare_campus.clone();
        panels::optional_combo(
            ui,
            "compare_campus",
            "All UC",
            &dataset.campuses,
            &mut state.compare_campus,
        );
        if state.compare_campus != before {
            // Scope changed; drop selections that no longer resolve.
            let available = dataset.schools_at(state.compare_campus.as_deref());
            state.compare_schools.retain(|s| available.contains(s));
        }
    });

    let options = dataset.schools_at(state.compare_campus.as_deref());
    let header = format!(
        "Schools ({}/{} selected)",
        state.compare_schools.len(),
        MAX_COMPARE
    );
    egui::CollapsingHeader::new(RichText::new(header).strong())
        .id_salt("compare_schools")
        .default_open(true)
        .show(ui, |ui: &mut Ui| {
            ScrollArea::vertical()
                .max_height(160.0)
                .show(ui, |ui: &mut Ui| {
                    for name in &options {
                        let mut checked = state.compare_schools.contains(name);
                        let at_cap = !checked && state.compare_schools.len() >= MAX_COMPARE;
                        if ui
                            .add_enabled(!at_cap, egui::Checkbox::new(&mut checked, name))
                            .changed()
                        {
                            state.toggle_compare_school(name);
                        }
                    }
                });
        });

    let records =
        views::resolve_comparison(&dataset, state.compare_campus.as_deref(), &state.compare_schools);

    ui.add_space(8.0);
    if records.len() < 2 {
        ui.label("Select at least 2 schools from the list above to start comparing.");
        return;
    }

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.columns(records.len(), |columns: &mut [Ui]| {
                for (column, rec) in columns.iter_mut().zip(&records) {
                    comparison_card(column, rec);
                }
            });

            ui.add_space(12.0);
            ui.strong("Applications, Admissions, and Enrollment");
            applied_admitted_chart(ui, &records);

            ui.add_space(12.0);
            ui.strong("Admit Rate Comparison");
            admit_rate_chart(ui, &records);
        });
}

fn comparison_card(ui: &mut Ui, rec: &SchoolRecord) {
    egui::Frame::group(ui.style()).show(ui, |ui: &mut Ui| {
        ui.set_width(ui.available_width());
        ui.vertical_centered(|ui: &mut Ui| {
            ui.strong(&rec.school);
            ui.label(
                RichText::new(format!(
                    "{} | {} | {}",
                    rec.city,
                    rec.school_type.label(),
                    rec.college
                ))
                .weak(),
            );
        });
        ui.separator();
        ui.label(format!("Admit Rate: {:.1}%", rec.admit_rate));
        ui.label(format!(
            "Applications: {}",
            panels::format_count(rec.applied.into())
        ));
        ui.label(format!(
            "Admissions: {}",
            panels::format_count(rec.admitted.into())
        ));
        ui.label(format!(
            "Enrolled: {}",
            panels::format_count(rec.enrolled.into())
        ));
    });
}

fn applied_admitted_chart(ui: &mut Ui, records: &[&SchoolRecord]) {
    let palette = color::generate_palette(records.len());
    let series: Vec<charts::GroupedSeries> = records
        .iter()
        .zip(palette)
        .map(|(rec, color)| charts::GroupedSeries {
            name: rec.school.clone(),
            color,
            values: vec![
                f64::from(rec.applied),
                f64::from(rec.admitted),
                f64::from(rec.enrolled),
            ],
        })
        .collect();
    charts::grouped_bar_chart(
        ui,
        "compare_counts",
        &["Applied", "Admitted", "Enrolled"],
        &series,
        280.0,
    );
}

fn admit_rate_chart(ui: &mut Ui, records: &[&SchoolRecord]) {
    let entries: Vec<charts::BarEntry> = records
        .iter()
        .map(|rec| {
            charts::BarEntry::new(
                rec.school.clone(),
                rec.admit_rate,
                color::rate_color(rec.admit_rate),
            )
        })
        .collect();
    charts::bar_chart(ui, "compare_rates", "Admit Rate (%)", &entries, 220.0);
}
