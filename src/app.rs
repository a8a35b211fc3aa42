use eframe::egui::{self, Rect, UserData, ViewportCommand};

use crate::state::{AppState, View};
use crate::ui::{cloud, figure, listing, panels};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct SkillLensApp {
    pub state: AppState,
}

impl SkillLensApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    /// Two-frame save: ask for a screenshot once the figure is on screen,
    /// then crop and write it when the image arrives.
    fn drive_save(&mut self, ctx: &egui::Context, drawn: Option<Rect>) {
        let Some(rect) = drawn else {
            return;
        };

        let screenshot = ctx.input(|i| {
            i.raw.events.iter().find_map(|e| match e {
                egui::Event::Screenshot { image, .. } => Some(image.clone()),
                _ => None,
            })
        });

        if let Some(image) = screenshot {
            self.state.complete_save(&image, rect, ctx.pixels_per_point());
            if let Some(path) = &self.state.last_saved {
                ctx.forget_image(&panels::file_uri(path));
            }
            return;
        }

        if let Some(request) = &mut self.state.pending_save {
            if !request.requested {
                ctx.send_viewport_cmd(ViewportCommand::Screenshot(UserData::default()));
                request.requested = true;
                ctx.request_repaint();
            }
        }
    }
}

impl eframe::App for SkillLensApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: labels and profile ----
        egui::SidePanel::left("control_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: figure ----
        let drawn = egui::CentralPanel::default()
            .show(ctx, |ui| match &self.state.view {
                View::Empty => {
                    ui.centered_and_justified(|ui| {
                        ui.heading("Open a frequency table to plot skills  (File → Open table…)");
                    });
                    None
                }
                View::Figure(layout) => Some(figure::figure_view(ui, layout)),
                View::WordCloud(words) => Some(cloud::word_cloud_view(ui, words)),
                View::Text { heading, lines } => {
                    listing::text_view(ui, heading, lines);
                    None
                }
            })
            .inner;

        self.drive_save(ctx, drawn);
    }
}
