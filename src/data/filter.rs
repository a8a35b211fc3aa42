use super::model::{FrequencyRow, FrequencyTable};

// ---------------------------------------------------------------------------
// Label normalisation
// ---------------------------------------------------------------------------

/// Title-case a label the way Python's `str.title()` does: a letter is
/// upper-cased when the preceding character is not a cased letter and
/// lower-cased otherwise. `"machine LEARNING engineer"` becomes
/// `"Machine Learning Engineer"`, `"c++/3d"` becomes `"C++/3D"`.
pub fn title_case(label: &str) -> String {
    let mut out = String::with_capacity(label.len());
    let mut prev_cased = false;
    for ch in label.chars() {
        let cased = ch.is_lowercase() || ch.is_uppercase();
        if cased {
            if prev_cased {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
        } else {
            out.push(ch);
        }
        prev_cased = cased;
    }
    out
}

// ---------------------------------------------------------------------------
// Label validation
// ---------------------------------------------------------------------------

/// Which column of the table a label is looked up in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelKind {
    Title,
    Category,
}

/// A requested title or category that the table does not contain.
///
/// The message is the retry guidance shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LabelError {
    #[error("Title invalid. Please try again!")]
    InvalidTitle(String),
    #[error("Category invalid. Please try again!")]
    InvalidCategory(String),
}

impl LabelError {
    /// The label exactly as the user typed it.
    pub fn requested(&self) -> &str {
        match self {
            LabelError::InvalidTitle(s) | LabelError::InvalidCategory(s) => s,
        }
    }
}

/// Normalise `requested` and return it if it is one of `known`.
pub fn resolve_label(
    known: &[String],
    requested: &str,
    kind: LabelKind,
) -> Result<String, LabelError> {
    let normalized = title_case(requested);
    if known.iter().any(|k| *k == normalized) {
        return Ok(normalized);
    }
    Err(match kind {
        LabelKind::Title => LabelError::InvalidTitle(requested.to_string()),
        LabelKind::Category => LabelError::InvalidCategory(requested.to_string()),
    })
}

// ---------------------------------------------------------------------------
// Row selection
// ---------------------------------------------------------------------------

/// Rows of `table` whose `kind` column equals `label`, in table order.
pub fn select<'a>(table: &'a FrequencyTable, kind: LabelKind, label: &str) -> Vec<&'a FrequencyRow> {
    table
        .rows()
        .iter()
        .filter(|row| column(row, kind) == label)
        .collect()
}

/// Narrow an existing selection, then order it by frequency descending.
///
/// The sort is stable so equal counts keep their table order.
pub fn cell_rows<'a>(
    rows: &[&'a FrequencyRow],
    kind: LabelKind,
    label: &str,
) -> Vec<&'a FrequencyRow> {
    let mut cell: Vec<&FrequencyRow> = rows
        .iter()
        .copied()
        .filter(|row| column(row, kind) == label)
        .collect();
    cell.sort_by(|a, b| b.frequency.cmp(&a.frequency));
    cell
}

fn column(row: &FrequencyRow, kind: LabelKind) -> &str {
    match kind {
        LabelKind::Title => &row.title,
        LabelKind::Category => &row.category,
    }
}
