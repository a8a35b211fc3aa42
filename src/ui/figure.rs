use eframe::egui::epaint::TextShape;
use eframe::egui::{self, Align2, Color32, FontId, Pos2, Rect, Sense, Ui, UiBuilder, pos2, vec2};
use egui_plot::{Bar, BarChart, Plot, PlotPoint};

use crate::color::ColorMap;
use crate::grid::{Cell, FigureLayout, TitleAnchor, Y_LABEL};

/// Subplot region as fractions of the figure (left, right, bottom, top),
/// measured from the bottom-left like a matplotlib figure.
const SUBPLOT_LEFT: f32 = 0.125;
const SUBPLOT_RIGHT: f32 = 0.9;
const SUBPLOT_BOTTOM: f32 = 0.11;
const SUBPLOT_TOP: f32 = 0.88;
const WSPACE: f32 = 0.2;

const CELL_TITLE_PX: f32 = 12.0;
const TICK_LABEL_PX: f32 = 10.0;
const MIN_SUPTITLE_PX: f32 = 18.0;

// ---------------------------------------------------------------------------
// Grid figure (central panel)
// ---------------------------------------------------------------------------

/// Draw a grid figure into the remaining space and return the figure rect.
pub fn figure_view(ui: &mut Ui, figure: &FigureLayout) -> Rect {
    let rect = ui.available_rect_before_wrap();
    ui.painter().rect_filled(rect, 0.0, Color32::WHITE);

    // Typographic points → screen points, from the figure height in inches.
    let pt = rect.height() / (figure.style.size[1] * 72.0);

    draw_suptitle(ui, figure, rect, pt);

    let grid = Rect::from_min_max(
        pos2(
            rect.left() + SUBPLOT_LEFT * rect.width(),
            rect.bottom() - SUBPLOT_TOP * rect.height(),
        ),
        pos2(
            rect.left() + SUBPLOT_RIGHT * rect.width(),
            rect.bottom() - SUBPLOT_BOTTOM * rect.height(),
        ),
    );
    let (axis_h, row_gap) = figure.style.row_geometry(grid.height(), figure.nrows);
    let (axis_w, col_gap) = column_geometry(grid.width(), figure.ncols);

    let colors = ColorMap::new(figure.cells.iter().map(|c| c.label.as_str()));

    for row in 0..figure.nrows {
        for col in 0..figure.ncols {
            let Some(cell) = figure.cell(row, col) else {
                continue;
            };
            if cell.removed {
                continue;
            }
            let min = pos2(
                grid.left() + col as f32 * (axis_w + col_gap),
                grid.top() + row as f32 * (axis_h + row_gap),
            );
            let axis_rect = Rect::from_min_size(min, vec2(axis_w, axis_h));
            let id = (figure.title.as_str(), row, col);
            let color = colors.color_for(&cell.label);
            draw_cell(ui, id, cell, axis_rect, figure.style.tick_rotation, color);
        }
    }

    ui.allocate_rect(rect, Sense::hover());
    rect
}

fn draw_suptitle(ui: &Ui, figure: &FigureLayout, rect: Rect, pt: f32) {
    let font = FontId::proportional((figure.style.suptitle_font_size * pt).max(MIN_SUPTITLE_PX));
    let mut y = rect.bottom() - figure.style.suptitle_y * rect.height();
    if figure.style.suptitle_anchor == TitleAnchor::Baseline {
        // Descenders hang about a fifth of the font size below the baseline.
        y += 0.2 * font.size;
    }
    ui.painter().text(
        pos2(rect.center().x, y),
        Align2::CENTER_BOTTOM,
        &figure.title,
        font,
        Color32::BLACK,
    );
}

/// Column widths with `WSPACE` gaps, same split as the row geometry.
fn column_geometry(width: f32, ncols: usize) -> (f32, f32) {
    if ncols == 0 {
        return (0.0, 0.0);
    }
    let n = ncols as f32;
    let axis = width / (n + (n - 1.0) * WSPACE);
    (axis, axis * WSPACE)
}

fn draw_cell(
    ui: &mut Ui,
    id: impl std::hash::Hash,
    cell: &Cell,
    axis_rect: Rect,
    rotation: f32,
    color: Color32,
) {
    ui.painter().text(
        pos2(axis_rect.center().x, axis_rect.top() - 2.0),
        Align2::CENTER_BOTTOM,
        &cell.label,
        FontId::proportional(CELL_TITLE_PX),
        Color32::BLACK,
    );

    let n = cell.bars.len();
    let bars: Vec<Bar> = cell
        .bars
        .iter()
        .enumerate()
        .map(|(i, b)| {
            Bar::new(i as f64, b.frequency as f64)
                .width(0.5)
                .name(&b.skill)
                .fill(color)
        })
        .collect();

    let response = ui
        .scope_builder(UiBuilder::new().max_rect(axis_rect), |ui: &mut Ui| {
            Plot::new(id)
                .width(axis_rect.width())
                .height(axis_rect.height())
                .show_axes([false, true])
                .show_grid([false, true])
                .y_axis_label(Y_LABEL)
                .include_x(-0.5)
                .include_x(n as f64 - 0.5)
                .include_y(0.0)
                .allow_drag(false)
                .allow_zoom(false)
                .allow_scroll(false)
                .allow_boxed_zoom(false)
                .show(ui, |plot_ui| {
                    plot_ui.bar_chart(BarChart::new(bars).color(color));
                })
        })
        .inner;

    let frame = *response.transform.frame();
    let ticks: Vec<Pos2> = (0..n)
        .map(|i| {
            let at = response.transform.position_from_point(&PlotPoint::new(i as f64, 0.0));
            pos2(at.x, frame.bottom() + 3.0)
        })
        .collect();
    draw_tick_labels(ui, cell, &ticks, rotation);
}

/// Paint skill names under the axis, rotated counter-clockwise by
/// `rotation` degrees, each ending at its tick.
fn draw_tick_labels(ui: &Ui, cell: &Cell, ticks: &[Pos2], rotation: f32) {
    let painter = ui.painter();
    let font = FontId::proportional(TICK_LABEL_PX);
    let theta = rotation.to_radians();
    for (bar, tick) in cell.bars.iter().zip(ticks) {
        let galley = painter.layout_no_wrap(bar.skill.clone(), font.clone(), Color32::BLACK);
        let w = galley.size().x;
        let h = galley.size().y;
        // Top-left corner so the text's right end lands on the tick,
        // shifted half a line so the baseline runs through it.
        let origin = pos2(
            tick.x - w * theta.cos() - 0.5 * h * theta.sin(),
            tick.y + w * theta.sin() - 0.5 * h * theta.cos(),
        );
        painter.add(egui::Shape::Text(
            TextShape::new(origin, galley, Color32::BLACK).with_angle(-theta),
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn columns_split_with_gaps() {
        let (axis, gap) = column_geometry(440.0, 2);
        assert!((2.0 * axis + gap - 440.0).abs() < 1e-3);
        assert_eq!(column_geometry(300.0, 1), (300.0, 60.0));
        assert_eq!(column_geometry(300.0, 0), (0.0, 0.0));
    }
}
