use eframe::egui::{Label, RichText, ScrollArea, Ui};
use egui_extras::{Column, TableBuilder};

/// Numbered list of posting texts or tokens.
pub fn text_view(ui: &mut Ui, heading: &str, lines: &[String]) {
    ui.heading(heading);
    ui.separator();

    if lines.is_empty() {
        ui.label(RichText::new("Nothing to show.").italics());
        return;
    }

    // A single posting reads better as wrapped prose.
    if let [text] = lines {
        ScrollArea::vertical().show(ui, |ui: &mut Ui| {
            ui.label(text);
        });
        return;
    }

    TableBuilder::new(ui)
        .striped(true)
        .column(Column::auto().at_least(40.0))
        .column(Column::remainder())
        .header(20.0, |mut header| {
            header.col(|ui| {
                ui.strong("#");
            });
            header.col(|ui| {
                ui.strong("Text");
            });
        })
        .body(|body| {
            body.rows(18.0, lines.len(), |mut row| {
                let i = row.index();
                row.col(|ui| {
                    ui.label(i.to_string());
                });
                row.col(|ui| {
                    ui.add(Label::new(&lines[i]).truncate());
                });
            });
        });
}
