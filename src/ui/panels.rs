use eframe::egui::{self, Color32, RichText, Ui};

use crate::color;
use crate::data::loader;
use crate::data::model::{SchoolRecord, SchoolType};
use crate::state::{AppState, Tab};

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / tab strip.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open CSV…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        for (tab, label) in [
            (Tab::Rankings, "Rankings"),
            (Tab::Detail, "School Details"),
            (Tab::Compare, "Compare Schools"),
            (Tab::Analytics, "Analytics"),
        ] {
            if ui.selectable_label(state.tab == tab, label).clicked() {
                state.tab = tab;
            }
        }

        ui.separator();

        if let Some(ds) = &state.dataset {
            ui.label(format!(
                "{} records, {} schools, {} campuses",
                ds.len(),
                ds.school_names.len(),
                ds.campuses.len()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open admissions CSV")
        .add_filter("CSV", &["csv"])
        .pick_file();

    if let Some(path) = file {
        match loader::load_csv(&path) {
            Ok(dataset) => {
                log::info!("Loaded {} records from {}", dataset.len(), path.display());
                state.set_dataset(dataset);
            }
            Err(e) => {
                log::error!("Failed to load file: {e}");
                state.status_message = Some(format!("Error: {e}"));
            }
        }
    }
}

/// Shown instead of the tab views when no candidate source resolved.
pub fn no_dataset_screen(ui: &mut Ui, state: &mut AppState) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.add_space(ui.available_height() * 0.3);
        ui.heading("No admissions dataset found");
        ui.label("Place the CSV at data/UC_Schools_Admission_Rankings.csv, or open one manually.");
        ui.add_space(8.0);
        if ui.button("Open CSV…").clicked() {
            open_file_dialog(state);
        }
    });
}

// ---------------------------------------------------------------------------
// Shared widgets
// ---------------------------------------------------------------------------

/// Metric card: big value over a muted label.
pub fn metric_card(ui: &mut Ui, value: &str, label: &str) {
    egui::Frame::group(ui.style()).show(ui, |ui: &mut Ui| {
        ui.vertical_centered(|ui: &mut Ui| {
            ui.label(RichText::new(value).size(22.0).strong().color(color::ACCENT));
            ui.label(RichText::new(label).small().weak());
        });
    });
}

/// Pill-style badge with a coloured background.
pub fn badge(ui: &mut Ui, text: &str, fill: Color32) {
    ui.label(
        RichText::new(format!(" {text} "))
            .strong()
            .color(Color32::BLACK)
            .background_color(fill),
    );
}

fn type_badge_color(school_type: SchoolType) -> Color32 {
    match school_type {
        SchoolType::Public => Color32::from_rgb(0x38, 0xa1, 0x69),
        SchoolType::Private => Color32::from_rgb(0xd6, 0x9e, 0x2e),
    }
}

/// One ranked school card. Returns true when "View details" was clicked.
pub fn school_card(ui: &mut Ui, rank: usize, rec: &SchoolRecord) -> bool {
    let mut open_details = false;

    egui::Frame::group(ui.style()).show(ui, |ui: &mut Ui| {
        ui.set_width(ui.available_width());

        ui.horizontal(|ui: &mut Ui| {
            ui.vertical(|ui: &mut Ui| {
                ui.strong(format!("#{rank}  {}", rec.school));
                ui.label(
                    RichText::new(format!("{}, {} County", rec.city, rec.county)).weak(),
                );
            });
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui: &mut Ui| {
                badge(ui, &format!("{:.1}%", rec.admit_rate), color::tier_color(rec.rate_tier()));
                badge(ui, rec.school_type.label(), type_badge_color(rec.school_type));
            });
        });

        ui.horizontal(|ui: &mut Ui| {
            ui.label(format!("Applied: {}", format_count(rec.applied.into())));
            ui.label(format!("Admitted: {}", format_count(rec.admitted.into())));
            ui.label(format!("Enrolled: {}", format_count(rec.enrolled.into())));
            ui.label(format!("Campus: {}", rec.college));
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui: &mut Ui| {
                if ui.small_button("View details").clicked() {
                    open_details = true;
                }
            });
        });

        let fraction = (rec.admit_rate / 100.0).clamp(0.0, 1.0) as f32;
        ui.add(
            egui::ProgressBar::new(fraction)
                .desired_height(6.0)
                .fill(color::tier_color(rec.rate_tier())),
        );
    });

    open_details
}

/// Combo box over string options with a leading "All …" sentinel entry.
pub fn optional_combo(
    ui: &mut Ui,
    id: &str,
    all_label: &str,
    options: &[String],
    selected: &mut Option<String>,
) {
    let current = selected.clone().unwrap_or_else(|| all_label.to_string());
    egui::ComboBox::from_id_salt(id)
        .selected_text(current)
        .show_ui(ui, |ui: &mut Ui| {
            if ui.selectable_label(selected.is_none(), all_label).clicked() {
                *selected = None;
            }
            for option in options {
                if ui
                    .selectable_label(selected.as_deref() == Some(option), option)
                    .clicked()
                {
                    *selected = Some(option.clone());
                }
            }
        });
}

/// Combo box over the school-type filter (All / Public / Private).
pub fn type_combo(ui: &mut Ui, id: &str, selected: &mut Option<SchoolType>) {
    let current = selected.map(|t| t.label()).unwrap_or("All Types");
    egui::ComboBox::from_id_salt(id)
        .selected_text(current)
        .show_ui(ui, |ui: &mut Ui| {
            if ui.selectable_label(selected.is_none(), "All Types").clicked() {
                *selected = None;
            }
            for ty in [SchoolType::Public, SchoolType::Private] {
                if ui.selectable_label(*selected == Some(ty), ty.label()).clicked() {
                    *selected = Some(ty);
                }
            }
        });
}

/// Render "1234567" as "1,234,567".
pub fn format_count(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::format_count;

    #[test]
    fn thousands_separators() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1000), "1,000");
        assert_eq!(format_count(1234567), "1,234,567");
    }
}
