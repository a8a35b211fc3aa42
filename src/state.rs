use std::path::PathBuf;

use eframe::egui::{ColorImage, Rect};

use crate::data::filter::LabelError;
use crate::data::model::FrequencyTable;
use crate::export::{SaveRequest, crop, save_png};
use crate::grid::{FigureLayout, plot_category_grid, plot_title_grid};
use crate::profile::{Profile, ProfileRequest, plot_profile};
use crate::settings::Settings;
use crate::wordcloud::WordCloud;

// ---------------------------------------------------------------------------
// What the central panel shows
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq)]
pub enum View {
    #[default]
    Empty,
    Figure(FigureLayout),
    WordCloud(WordCloud),
    /// Posting text, text list or tokens from a profile request.
    Text { heading: String, lines: Vec<String> },
}

/// Which profile output the side panel asks for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ProfileMode {
    Posting,
    TextList,
    Tokens,
    #[default]
    WordCloud,
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub settings: Settings,

    /// Loaded frequency table (None until user loads a file).
    pub table: Option<FrequencyTable>,

    /// Title or category typed by the user.
    pub label_input: String,

    /// Persist the next figure as PNG.
    pub save_figure: bool,

    /// Profile inputs.
    pub profile_title: String,
    pub first_n: usize,
    pub max_words: usize,
    pub profile_mode: ProfileMode,

    /// Current content of the central panel.
    pub view: View,

    /// Screenshot-to-file step for the current view, if requested.
    pub pending_save: Option<SaveRequest>,

    /// Path of the last figure written to disk.
    pub last_saved: Option<PathBuf>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(settings: Settings) -> Self {
        Self {
            max_words: settings.wordcloud.max_words,
            settings,
            table: None,
            label_input: String::new(),
            save_figure: false,
            profile_title: String::new(),
            first_n: 100,
            profile_mode: ProfileMode::default(),
            view: View::Empty,
            pending_save: None,
            last_saved: None,
            status_message: None,
        }
    }

    /// Ingest a newly loaded table.
    pub fn set_table(&mut self, table: FrequencyTable) {
        self.table = Some(table);
        self.view = View::Empty;
        self.pending_save = None;
        self.status_message = None;
    }

    /// Plot the skill grid of the title in `label_input`.
    pub fn plot_title(&mut self) {
        let Some(table) = &self.table else {
            self.status_message = Some("Load a frequency table first.".to_string());
            return;
        };
        let result = plot_title_grid(table, &self.label_input);
        self.show_figure(result);
    }

    /// Plot the per-title grid of the category in `label_input`.
    pub fn plot_category(&mut self) {
        let Some(table) = &self.table else {
            self.status_message = Some("Load a frequency table first.".to_string());
            return;
        };
        let result = plot_category_grid(table, &self.label_input);
        self.show_figure(result);
    }

    /// Invalid labels are reported and leave the current view untouched.
    fn show_figure(&mut self, result: Result<FigureLayout, LabelError>) {
        match result {
            Ok(figure) => {
                log::info!(
                    "Plotting '{}' ({}x{}, {} cells removed)",
                    figure.title,
                    figure.nrows,
                    figure.ncols,
                    figure.removed_count()
                );
                self.pending_save = self
                    .save_figure
                    .then(|| SaveRequest::new(&self.settings.output_dir, &figure.file_name()));
                self.view = View::Figure(figure);
                self.status_message = None;
            }
            Err(e) => {
                log::warn!("{e} ('{}')", e.requested());
                self.status_message = Some(e.to_string());
            }
        }
    }

    /// Run the selected profile request for `profile_title`.
    pub fn run_profile(&mut self) {
        let request = match self.profile_mode {
            ProfileMode::Posting => ProfileRequest::Posting,
            ProfileMode::TextList => ProfileRequest::TextList,
            ProfileMode::Tokens => ProfileRequest::Tokens,
            ProfileMode::WordCloud => ProfileRequest::WordCloud {
                max_words: self.max_words,
            },
        };

        match plot_profile(&self.settings, &self.profile_title, self.first_n, request) {
            Ok(profile) => self.show_profile(profile),
            Err(e) => {
                log::error!("Profile failed: {e:#}");
                self.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }

    fn show_profile(&mut self, profile: Profile) {
        self.pending_save = None;
        self.status_message = None;
        self.view = match profile {
            Profile::WordCloud(cloud) => {
                self.pending_save = self
                    .save_figure
                    .then(|| SaveRequest::new(&self.settings.output_dir, &cloud.file_name()));
                View::WordCloud(cloud)
            }
            Profile::Posting(text) => View::Text {
                heading: format!("Posting #{}", self.first_n),
                lines: vec![text],
            },
            Profile::TextList(texts) => View::Text {
                heading: format!("First {} postings", self.first_n),
                lines: texts,
            },
            Profile::Tokens(tokens) => View::Text {
                heading: format!("{} tokens", tokens.len()),
                lines: tokens,
            },
        };
    }

    /// A screenshot has arrived: write the figure region and clear the request.
    pub fn complete_save(&mut self, screenshot: &ColorImage, figure_rect: Rect, pixels_per_point: f32) {
        let Some(request) = self.pending_save.take() else {
            return;
        };
        let image = crop(screenshot, figure_rect, pixels_per_point);
        match save_png(&request.path, &image) {
            Ok(()) => {
                self.status_message = Some(format!("Saved {}", request.path.display()));
                self.last_saved = Some(request.path);
            }
            Err(e) => {
                log::error!("Failed to save figure: {e:#}");
                self.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}
