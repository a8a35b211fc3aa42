//! Grid figures of skill-frequency bar charts.
//!
//! Both plotters are pure: they read the table, validate the label and
//! return a [`FigureLayout`] that the UI draws and optionally saves.

use crate::data::filter::{LabelError, LabelKind, cell_rows, resolve_label, select};
use crate::data::model::{FrequencyRow, FrequencyTable};

/// Padding category used to fill the last slots of a title grid.
pub const PLACEHOLDER: &str = "Empty";

/// Y-axis label of every subplot.
pub const Y_LABEL: &str = "Frequency";

const TITLE_GRID_COLS: usize = 2;
const TITLE_GRID_MIN_ROWS: usize = 4;

// ---------------------------------------------------------------------------
// Figure styling
// ---------------------------------------------------------------------------

/// How the figure title is anchored at `suptitle_y`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TitleAnchor {
    /// The bottom edge of the text sits at `suptitle_y`.
    Bottom,
    /// The text baseline sits at `suptitle_y`.
    Baseline,
}

/// Decoration parameters that differ between the two grid kinds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FigureStyle {
    /// Figure size in inches (width, height); used as an aspect hint.
    pub size: [f32; 2],
    /// Vertical position of the figure title as a fraction of the height,
    /// measured from the bottom.
    pub suptitle_y: f32,
    pub suptitle_anchor: TitleAnchor,
    pub suptitle_font_size: f32,
    /// Space between subplot rows as a fraction of the mean axis height.
    pub hspace: f32,
    /// Tick label rotation in degrees, counter-clockwise.
    pub tick_rotation: f32,
}

pub const TITLE_GRID_STYLE: FigureStyle = FigureStyle {
    size: [15.0, 20.0],
    suptitle_y: 0.92,
    suptitle_anchor: TitleAnchor::Bottom,
    suptitle_font_size: 30.0,
    hspace: 0.9,
    tick_rotation: 60.0,
};

pub const CATEGORY_GRID_STYLE: FigureStyle = FigureStyle {
    size: [10.0, 12.0],
    suptitle_y: 0.95,
    suptitle_anchor: TitleAnchor::Baseline,
    suptitle_font_size: 30.0,
    hspace: 0.36,
    tick_rotation: 30.0,
};

impl FigureStyle {
    /// Split `height` into `nrows` axes separated by `hspace` gaps.
    ///
    /// Returns `(axis_height, gap)` with
    /// `nrows * axis_height + (nrows - 1) * gap == height`.
    pub fn row_geometry(&self, height: f32, nrows: usize) -> (f32, f32) {
        if nrows == 0 {
            return (0.0, 0.0);
        }
        let n = nrows as f32;
        let axis = height / (n + (n - 1.0) * self.hspace);
        (axis, axis * self.hspace)
    }
}

// ---------------------------------------------------------------------------
// Layout types
// ---------------------------------------------------------------------------

/// One bar of a subplot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bar {
    pub skill: String,
    pub frequency: u64,
}

/// One subplot of the grid.
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    /// Subplot title: a category (title grid) or a job title (category grid).
    pub label: String,
    /// Bars ordered by frequency descending.
    pub bars: Vec<Bar>,
    /// A cell without rows has its axis removed from the figure.
    pub removed: bool,
}

impl Cell {
    fn from_rows(label: &str, rows: &[&FrequencyRow]) -> Self {
        let bars: Vec<Bar> = rows
            .iter()
            .map(|row| Bar {
                skill: row.skill.clone(),
                frequency: row.frequency,
            })
            .collect();
        Cell {
            label: label.to_string(),
            removed: bars.is_empty(),
            bars,
        }
    }
}

/// A complete grid figure, ready to draw.
#[derive(Debug, Clone, PartialEq)]
pub struct FigureLayout {
    /// Figure title (also the saved file's stem).
    pub title: String,
    pub style: FigureStyle,
    pub nrows: usize,
    pub ncols: usize,
    /// `nrows * ncols` cells in row-major order.
    pub cells: Vec<Cell>,
}

impl FigureLayout {
    pub fn cell(&self, row: usize, col: usize) -> Option<&Cell> {
        if col >= self.ncols {
            return None;
        }
        self.cells.get(row * self.ncols + col)
    }

    /// File name used when the figure is saved.
    pub fn file_name(&self) -> String {
        format!("{}.png", self.title)
    }

    pub fn removed_count(&self) -> usize {
        self.cells.iter().filter(|c| c.removed).count()
    }
}

// ---------------------------------------------------------------------------
// Plotters
// ---------------------------------------------------------------------------

/// Skill distribution of one job title across every category.
///
/// Categories come from the whole table so every title shares the same
/// cell order. The grid is two columns wide with at least four rows;
/// slots past the last category hold [`PLACEHOLDER`] and are removed.
pub fn plot_title_grid(table: &FrequencyTable, title: &str) -> Result<FigureLayout, LabelError> {
    let title = resolve_label(table.titles(), title, LabelKind::Title)?;
    let title_rows = select(table, LabelKind::Title, &title);

    let categories = table.categories();
    let ncols = TITLE_GRID_COLS;
    let nrows = categories.len().div_ceil(ncols).max(TITLE_GRID_MIN_ROWS);

    let cells = (0..nrows * ncols)
        .map(|slot| {
            let category = categories.get(slot).map_or(PLACEHOLDER, String::as_str);
            Cell::from_rows(category, &cell_rows(&title_rows, LabelKind::Category, category))
        })
        .collect();

    log::debug!(
        "Title grid for '{title}': {} rows over {} categories",
        title_rows.len(),
        categories.len()
    );

    Ok(FigureLayout {
        title: format!("{title} Skills Distribution"),
        style: TITLE_GRID_STYLE,
        nrows,
        ncols,
        cells,
    })
}

/// Skill distribution of one category, one row per job title.
pub fn plot_category_grid(
    table: &FrequencyTable,
    category: &str,
) -> Result<FigureLayout, LabelError> {
    let category = resolve_label(table.categories(), category, LabelKind::Category)?;
    let category_rows = select(table, LabelKind::Category, &category);

    let cells: Vec<Cell> = table
        .titles()
        .iter()
        .map(|title| Cell::from_rows(title, &cell_rows(&category_rows, LabelKind::Title, title)))
        .collect();

    log::debug!(
        "Category grid for '{category}': {} rows over {} titles",
        category_rows.len(),
        cells.len()
    );

    Ok(FigureLayout {
        title: format!("{category} Distribution"),
        style: CATEGORY_GRID_STYLE,
        nrows: cells.len(),
        ncols: 1,
        cells,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_title_table() -> FrequencyTable {
        FrequencyTable::from_rows(vec![
            FrequencyRow::new("Data Scientist", "Programming Languages", "R", 40),
            FrequencyRow::new("Data Scientist", "Programming Languages", "Python", 120),
            FrequencyRow::new("Data Engineer", "Programming Languages", "Python", 90),
            FrequencyRow::new("Data Engineer", "Programming Languages", "Java", 70),
            FrequencyRow::new("Data Scientist", "Big Data Technologies", "Spark", 15),
            FrequencyRow::new("Data Scientist", "Big Data Technologies", "Hadoop", 30),
        ])
        .unwrap()
    }

    fn seven_category_table() -> FrequencyTable {
        let categories = [
            "Programming Languages",
            "Big Data Technologies",
            "Databases",
            "Cloud Platforms",
            "Machine Learning",
            "Visualization",
            "Soft Skills",
        ];
        let mut rows = Vec::new();
        for (i, cat) in categories.iter().enumerate() {
            rows.push(FrequencyRow::new("Data Scientist", cat, "a", i as u64));
            rows.push(FrequencyRow::new("Data Scientist", cat, "b", 10 - i as u64));
        }
        FrequencyTable::from_rows(rows).unwrap()
    }

    fn skills(cell: &Cell) -> Vec<(&str, u64)> {
        cell.bars.iter().map(|b| (b.skill.as_str(), b.frequency)).collect()
    }

    fn non_increasing(cell: &Cell) -> bool {
        cell.bars.windows(2).all(|w| w[0].frequency >= w[1].frequency)
    }

    #[test]
    fn category_grid_has_one_sorted_row_per_title() {
        let fig = plot_category_grid(&two_title_table(), "programming languages").unwrap();

        assert_eq!(fig.title, "Programming Languages Distribution");
        assert_eq!((fig.nrows, fig.ncols), (2, 1));
        assert_eq!(fig.cells[0].label, "Data Scientist");
        assert_eq!(skills(&fig.cells[0]), [("Python", 120), ("R", 40)]);
        assert_eq!(fig.cells[1].label, "Data Engineer");
        assert_eq!(skills(&fig.cells[1]), [("Python", 90), ("Java", 70)]);
        assert_eq!(fig.style.tick_rotation, 30.0);
    }

    #[test]
    fn title_grid_with_two_categories_removes_six_cells() {
        let fig = plot_title_grid(&two_title_table(), "data scientist").unwrap();

        assert_eq!(fig.title, "Data Scientist Skills Distribution");
        assert_eq!((fig.nrows, fig.ncols), (4, 2));
        assert_eq!(fig.cells.len(), 8);
        assert_eq!(fig.removed_count(), 6);

        let kept: Vec<&Cell> = fig.cells.iter().filter(|c| !c.removed).collect();
        assert_eq!(kept.len(), 2);
        assert!(kept.iter().all(|c| non_increasing(c)));
        assert_eq!(skills(fig.cell(0, 1).unwrap()), [("Hadoop", 30), ("Spark", 15)]);
        assert!(fig.cells[2..].iter().all(|c| c.label == PLACEHOLDER));
    }

    #[test]
    fn title_grid_with_seven_categories_is_four_by_two() {
        let fig = plot_title_grid(&seven_category_table(), "Data Scientist").unwrap();

        assert_eq!((fig.nrows, fig.ncols), (4, 2));
        assert_eq!(fig.removed_count(), 1);
        let last = fig.cell(3, 1).unwrap();
        assert_eq!(last.label, PLACEHOLDER);
        assert!(last.removed);
        assert_eq!(fig.cell(2, 0).unwrap().label, "Machine Learning");
        assert!(fig.cells.iter().all(non_increasing));
    }

    #[test]
    fn title_grid_grows_past_eight_categories() {
        let rows: Vec<FrequencyRow> = (0..11)
            .map(|i| FrequencyRow::new("Data Engineer", &format!("Category {i}"), "SQL", 1))
            .collect();
        let table = FrequencyTable::from_rows(rows).unwrap();

        let fig = plot_title_grid(&table, "data engineer").unwrap();
        assert_eq!((fig.nrows, fig.ncols), (6, 2));
        assert_eq!(fig.removed_count(), 1);
    }

    #[test]
    fn title_without_rows_in_a_category_gets_that_cell_removed() {
        let fig = plot_title_grid(&two_title_table(), "Data Engineer").unwrap();
        let big_data = fig.cell(0, 1).unwrap();
        assert_eq!(big_data.label, "Big Data Technologies");
        assert!(big_data.removed);
        assert_eq!(fig.removed_count(), 7);

        let fig = plot_category_grid(&two_title_table(), "big data technologies").unwrap();
        assert!(!fig.cells[0].removed);
        assert!(fig.cells[1].removed);
    }

    #[test]
    fn invalid_labels_are_soft_and_repeatable() {
        let table = two_title_table();
        let first = plot_title_grid(&table, "astronaut").unwrap_err();
        let second = plot_title_grid(&table, "astronaut").unwrap_err();
        assert_eq!(first, second);
        assert_eq!(first.to_string(), "Title invalid. Please try again!");

        let err = plot_category_grid(&table, "Data Scientist").unwrap_err();
        assert_eq!(err.to_string(), "Category invalid. Please try again!");
    }

    #[test]
    fn label_casing_does_not_change_the_figure() {
        let table = two_title_table();
        let upper = plot_title_grid(&table, "DATA SCIENTIST").unwrap();
        let lower = plot_title_grid(&table, "data scientist").unwrap();
        assert_eq!(upper, lower);
        assert_eq!(upper.file_name(), "Data Scientist Skills Distribution.png");

        let fig = plot_category_grid(&table, "BIG data TECHNOLOGIES").unwrap();
        assert_eq!(fig.file_name(), "Big Data Technologies Distribution.png");
    }

    #[test]
    fn row_geometry_fills_the_height() {
        let (axis, gap) = TITLE_GRID_STYLE.row_geometry(1000.0, 4);
        assert!((4.0 * axis + 3.0 * gap - 1000.0).abs() < 1e-3);
        assert!((gap / axis - 0.9).abs() < 1e-6);

        let (axis, gap) = CATEGORY_GRID_STYLE.row_geometry(500.0, 1);
        assert_eq!((axis, gap), (500.0, 0.36 * 500.0));
        assert_eq!(CATEGORY_GRID_STYLE.row_geometry(500.0, 0), (0.0, 0.0));
    }
}
