use eframe::egui::{self, Color32, DragValue, Image, RichText, Ui};

use crate::state::{AppState, ProfileMode};

/// Upper bound of the max-words input; layout runs on the UI thread.
const MAX_WORDS_LIMIT: usize = 500;

// ---------------------------------------------------------------------------
// Side panel: label entry and plot triggers
// ---------------------------------------------------------------------------

/// Render the left side panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            skills_section(ui, state);
            ui.separator();
            profile_section(ui, state);
            ui.separator();
            last_saved_section(ui, state);
        });
}

fn skills_section(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Skills");

    let Some(table) = &state.table else {
        ui.label("No table loaded.");
        return;
    };

    // Clicking a known label copies it into the input box.
    let mut picked: Option<String> = None;
    egui::CollapsingHeader::new(RichText::new(format!("Titles ({})", table.titles().len())).strong())
        .default_open(true)
        .show(ui, |ui: &mut Ui| {
            for title in table.titles() {
                if ui.selectable_label(state.label_input == *title, title).clicked() {
                    picked = Some(title.clone());
                }
            }
        });
    egui::CollapsingHeader::new(
        RichText::new(format!("Categories ({})", table.categories().len())).strong(),
    )
    .default_open(true)
    .show(ui, |ui: &mut Ui| {
        for category in table.categories() {
            if ui.selectable_label(state.label_input == *category, category).clicked() {
                picked = Some(category.clone());
            }
        }
    });
    if let Some(label) = picked {
        state.label_input = label;
    }

    ui.add_space(4.0);
    ui.label("Title or category:");
    ui.text_edit_singleline(&mut state.label_input);
    ui.checkbox(&mut state.save_figure, "Save figure");

    ui.horizontal(|ui: &mut Ui| {
        if ui.button("Plot title").clicked() {
            state.plot_title();
        }
        if ui.button("Plot category").clicked() {
            state.plot_category();
        }
    });
}

fn profile_section(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Profile");
    ui.label(format!("Postings from {}", state.settings.data_dir.display()));

    ui.label("Job title:");
    ui.text_edit_singleline(&mut state.profile_title);

    ui.horizontal(|ui: &mut Ui| {
        ui.label("First n:");
        ui.add(DragValue::new(&mut state.first_n).range(0..=100_000));
    });

    ui.horizontal(|ui: &mut Ui| {
        ui.radio_value(&mut state.profile_mode, ProfileMode::WordCloud, "Cloud");
        ui.radio_value(&mut state.profile_mode, ProfileMode::Tokens, "Tokens");
        ui.radio_value(&mut state.profile_mode, ProfileMode::TextList, "Texts");
        ui.radio_value(&mut state.profile_mode, ProfileMode::Posting, "Posting");
    });

    if state.profile_mode == ProfileMode::WordCloud {
        ui.horizontal(|ui: &mut Ui| {
            ui.label("Max words:");
            ui.add(DragValue::new(&mut state.max_words).range(1..=MAX_WORDS_LIMIT));
        });
    }

    if ui.button("Run profile").clicked() {
        state.run_profile();
    }
}

fn last_saved_section(ui: &mut Ui, state: &AppState) {
    let Some(path) = &state.last_saved else {
        return;
    };
    ui.label(RichText::new("Last saved").strong());
    ui.label(path.display().to_string());
    ui.add(Image::new(file_uri(path)).max_width(ui.available_width()));
}

/// `file://` URI understood by the egui_extras image loaders.
pub fn file_uri(path: &std::path::Path) -> String {
    let absolute = std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
    format!("file://{}", absolute.display())
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open table…").clicked() {
                open_table_dialog(state);
                ui.close_menu();
            }
            if ui.button("Posting folder…").clicked() {
                pick_data_dir(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(table) = &state.table {
            let per_title: Vec<String> = table
                .rows_per_title()
                .iter()
                .map(|(title, n)| format!("{title}: {n}"))
                .collect();
            ui.label(format!("{} rows  ({})", table.len(), per_title.join(", ")));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_table_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open skill frequency table")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        match crate::data::loader::load_table(&path) {
            Ok(table) => {
                if table.is_empty() {
                    log::warn!("{} contains no rows", path.display());
                }
                log::info!(
                    "Loaded {} rows: titles {:?}, categories {:?}",
                    table.len(),
                    table.titles(),
                    table.categories()
                );
                state.set_table(table);
            }
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}

fn pick_data_dir(state: &mut AppState) {
    if let Some(dir) = rfd::FileDialog::new()
        .set_title("Folder with posting stores")
        .set_directory(&state.settings.data_dir)
        .pick_folder()
    {
        log::info!("Posting folder set to {}", dir.display());
        state.settings.data_dir = dir;
    }
}
