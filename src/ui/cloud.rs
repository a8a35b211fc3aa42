use eframe::egui::{Align2, Color32, FontId, Rect, Sense, Ui, pos2, vec2};

use crate::wordcloud::WordCloud;

/// Draw a word cloud scaled to fit the remaining space, keeping its
/// aspect ratio. Returns the canvas rect.
pub fn word_cloud_view(ui: &mut Ui, cloud: &WordCloud) -> Rect {
    let available = ui.available_rect_before_wrap();
    let scale = (available.width() / cloud.width).min(available.height() / cloud.height);
    let canvas = Rect::from_center_size(
        available.center(),
        vec2(cloud.width * scale, cloud.height * scale),
    );

    let painter = ui.painter();
    painter.rect_filled(canvas, 0.0, Color32::WHITE);
    for word in &cloud.words {
        painter.text(
            pos2(
                canvas.left() + word.pos[0] * scale,
                canvas.top() + word.pos[1] * scale,
            ),
            Align2::LEFT_TOP,
            &word.text,
            FontId::proportional(word.font_size * scale),
            word.color,
        );
    }

    ui.allocate_rect(available, Sense::hover());
    canvas
}
