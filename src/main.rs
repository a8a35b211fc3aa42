mod app;
mod color;
mod data;
mod export;
mod grid;
mod profile;
mod settings;
mod state;
mod text;
mod ui;
mod wordcloud;

use app::SkillLensApp;
use eframe::egui;
use settings::Settings;
use state::AppState;

fn main() -> eframe::Result {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let settings = Settings::load_or_default();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 900.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Skill Lens – Job Posting Explorer",
        options,
        Box::new(|cc| {
            // Install image loaders so the saved-figure preview can load png.
            egui_extras::install_image_loaders(&cc.egui_ctx);
            // Figures are drawn on white, like printed charts.
            cc.egui_ctx.set_visuals(egui::Visuals::light());
            Ok(Box::new(SkillLensApp::new(AppState::new(settings))))
        }),
    )
}
