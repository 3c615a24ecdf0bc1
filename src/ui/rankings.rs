use eframe::egui::{ScrollArea, Ui};

use crate::data::views;
use crate::state::AppState;
use crate::ui::panels;

// ---------------------------------------------------------------------------
// Rankings tab
// ---------------------------------------------------------------------------

pub fn show(ui: &mut Ui, state: &mut AppState) {
    let Some(dataset) = state.dataset.clone() else {
        return;
    };

    ui.heading("Top Schools by Admit Rate");
    ui.add_space(4.0);

    ui.horizontal(|ui: &mut Ui| {
        ui.label("UC Campus:");
        panels::optional_combo(
            ui,
            "rank_campus",
            "All UC",
            &dataset.campuses,
            &mut state.ranking_filter.campus,
        );
        ui.label("School Type:");
        panels::type_combo(ui, "rank_type", &mut state.ranking_filter.school_type);
        ui.label("City:");
        panels::optional_combo(
            ui,
            "rank_city",
            "All Cities",
            &dataset.cities,
            &mut state.ranking_filter.city,
        );
    });

    let page = views::rank_schools(&dataset, &state.ranking_filter);

    ui.add_space(8.0);
    ui.horizontal(|ui: &mut Ui| {
        panels::metric_card(ui, &page.summary.shown.to_string(), "Schools Shown");
        panels::metric_card(
            ui,
            &format!("{:.1}%", page.summary.mean_admit_rate),
            "Avg Admit Rate (shown)",
        );
        panels::metric_card(
            ui,
            &panels::format_count(page.summary.total_applied),
            "Total Applied (shown)",
        );
        panels::metric_card(
            ui,
            &panels::format_count(page.summary.total_admitted),
            "Total Admitted (shown)",
        );
    });
    ui.add_space(8.0);

    if page.records.is_empty() {
        ui.label("No schools match the current filters. Try loosening them.");
        return;
    }

    let mut open_detail: Option<(String, String)> = None;
    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for (i, rec) in page.records.iter().enumerate() {
                if panels::school_card(ui, i + 1, rec) {
                    open_detail = Some((rec.school.clone(), rec.college.clone()));
                }
            }
        });

    if let Some((school, campus)) = open_detail {
        state.open_detail(school, campus);
    }
}
