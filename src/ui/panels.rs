use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};
use egui_extras::DatePickerButton;

use crate::data::export::write_filtered_csv;
use crate::data::loader;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    if state.dataset.is_empty() {
        ui.label("No orders loaded.");
        return;
    }

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            // ---- Date range ----
            ui.strong("Date range");
            ui.add_space(2.0);

            let mut start = state.criteria.start;
            ui.horizontal(|ui: &mut Ui| {
                ui.label("From");
                if ui
                    .add(DatePickerButton::new(&mut start).id_salt("start_date"))
                    .changed()
                {
                    state.set_start_date(start);
                }
            });

            let mut end = state.criteria.end;
            ui.horizontal(|ui: &mut Ui| {
                ui.label("To");
                if ui
                    .add(DatePickerButton::new(&mut end).id_salt("end_date"))
                    .changed()
                {
                    state.set_end_date(end);
                }
            });

            if ui.small_button("Full range").clicked() {
                state.reset_date_range();
            }

            ui.separator();

            // ---- Category filter ----
            let categories = state.dataset.categories.clone();
            let header_text = format!(
                "Categories  ({}/{})",
                state.selected_category_count(),
                categories.len()
            );

            egui::CollapsingHeader::new(RichText::new(header_text).strong())
                .id_salt("category_filter")
                .default_open(true)
                .show(ui, |ui: &mut Ui| {
                    if ui.small_button("All").clicked() {
                        state.select_all_categories();
                    }

                    for category in &categories {
                        let swatch = state.colors.color_for(category);
                        let mut checked = state.is_category_selected(category);
                        if ui
                            .checkbox(&mut checked, RichText::new(category).color(swatch))
                            .changed()
                        {
                            state.toggle_category(category);
                        }
                    }
                });

            ui.separator();

            // ---- Export ----
            if ui.button("Export filtered CSV…").clicked() {
                export_filtered(state);
            }
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        ui.label(format!(
            "{} orders loaded, {} shown",
            state.dataset.len(),
            state.visible.len()
        ));

        ui.separator();

        if let Some(msg) = &state.status_message {
            let color = if msg.starts_with("Error") {
                Color32::from_rgb(220, 53, 69)
            } else {
                Color32::from_rgb(40, 167, 69)
            };
            ui.label(RichText::new(msg).color(color));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

/// Let the user pick one or more order tables and replace the dataset.
pub fn open_file_dialog(state: &mut AppState) {
    let files = rfd::FileDialog::new()
        .set_title("Open order data")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_files();

    if let Some(paths) = files {
        match loader::load_files(&paths) {
            Ok(dataset) => {
                log::info!(
                    "loaded {} orders across {} categories",
                    dataset.len(),
                    dataset.categories.len()
                );
                state.replace_dataset(dataset);
            }
            Err(e) => {
                log::error!("failed to load order data: {e}");
                state.status_message = Some(format!("Error: {e}"));
            }
        }
    }
}

fn export_filtered(state: &mut AppState) {
    let Some(path) = rfd::FileDialog::new()
        .set_title("Export filtered orders")
        .add_filter("CSV", &["csv"])
        .set_file_name("filtered_orders.csv")
        .save_file()
    else {
        return;
    };

    match write_filtered_csv(&state.dataset, &state.visible, &path) {
        Ok(()) => {
            log::info!("exported {} rows to {}", state.visible.len(), path.display());
            state.status_message = Some(format!(
                "Exported {} rows to {}",
                state.visible.len(),
                path.display()
            ));
        }
        Err(e) => {
            log::error!("export failed: {e:#}");
            state.status_message = Some(format!("Error: {e:#}"));
        }
    }
}
