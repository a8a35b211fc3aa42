use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use arrow::array::{Array, AsArray, Int32Array, Int64Array, StringArray, UInt32Array, UInt64Array};
use arrow::datatypes::DataType;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

use super::model::{FrequencyRow, FrequencyTable};

/// Index string → posting text, as saved by the scraper.
pub type PostingStore = BTreeMap<String, String>;

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load a frequency table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header `title,category,skill,frequency`
/// * `.json`    – `[{ "title": ..., "category": ..., "skill": ..., "frequency": 12 }, ...]`
/// * `.parquet` – three utf8 columns and an integer `frequency` column
pub fn load_table(path: &Path) -> Result<FrequencyTable> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let rows = match ext.as_str() {
        "csv" => load_csv(path)?,
        "json" => load_json(path)?,
        "parquet" | "pq" => load_parquet(path)?,
        other => bail!("Unsupported file extension: .{other}"),
    };
    FrequencyTable::from_rows(rows).with_context(|| format!("validating {}", path.display()))
}

/// Load a posting store: a JSON object mapping index strings to posting text.
pub fn load_postings(path: &Path) -> Result<PostingStore> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading posting store {}", path.display()))?;
    serde_json::from_str(&text).context("parsing posting store JSON")
}

/// Load a stopword list: the tokens of the first CSV row.
pub fn load_stopwords(path: &Path) -> Result<Vec<String>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("opening stopwords {}", path.display()))?;

    match reader.records().next() {
        Some(record) => {
            let record = record.context("reading stopwords row")?;
            Ok(record
                .iter()
                .map(|tok| tok.trim().to_string())
                .filter(|tok| !tok.is_empty())
                .collect())
        }
        None => Ok(Vec::new()),
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn load_csv(path: &Path) -> Result<Vec<FrequencyRow>> {
    let mut reader = csv::Reader::from_path(path).context("opening CSV")?;
    let mut rows = Vec::new();
    for (row_no, result) in reader.deserialize::<FrequencyRow>().enumerate() {
        rows.push(result.with_context(|| format!("CSV row {row_no}"))?);
    }
    Ok(rows)
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Records-oriented, as written by `df.to_json(orient='records')`.
fn load_json(path: &Path) -> Result<Vec<FrequencyRow>> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    serde_json::from_str(&text).context("parsing JSON frequency records")
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Works with files written by both **Pandas** (`df.to_parquet()`) and
/// **Polars** (`df.write_parquet()`).
fn load_parquet(path: &Path) -> Result<Vec<FrequencyRow>> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut rows = Vec::new();

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let schema = batch.schema();

        let index_of = |name: &str| {
            schema
                .index_of(name)
                .map_err(|_| anyhow::anyhow!("Parquet file missing '{name}' column"))
        };
        let title = batch.column(index_of("title")?);
        let category = batch.column(index_of("category")?);
        let skill = batch.column(index_of("skill")?);
        let frequency = batch.column(index_of("frequency")?);

        for row in 0..batch.num_rows() {
            rows.push(FrequencyRow {
                title: extract_string(title, row).with_context(|| format!("Row {row}: 'title'"))?,
                category: extract_string(category, row)
                    .with_context(|| format!("Row {row}: 'category'"))?,
                skill: extract_string(skill, row).with_context(|| format!("Row {row}: 'skill'"))?,
                frequency: extract_count(frequency, row)
                    .with_context(|| format!("Row {row}: 'frequency'"))?,
            });
        }
    }

    Ok(rows)
}

// -- Parquet / Arrow helpers --

fn extract_string(col: &Arc<dyn Array>, row: usize) -> Result<String> {
    if col.is_null(row) {
        bail!("null value in string column");
    }
    match col.data_type() {
        DataType::Utf8 => {
            let arr = col
                .as_any()
                .downcast_ref::<StringArray>()
                .context("expected StringArray")?;
            Ok(arr.value(row).to_string())
        }
        DataType::LargeUtf8 => Ok(col.as_string::<i64>().value(row).to_string()),
        other => bail!("Expected Utf8 column, got {other:?}"),
    }
}

/// Read a non-negative integer count; negative values are rejected.
fn extract_count(col: &Arc<dyn Array>, row: usize) -> Result<u64> {
    if col.is_null(row) {
        bail!("null value in frequency column");
    }
    let signed = match col.data_type() {
        DataType::Int32 => col
            .as_any()
            .downcast_ref::<Int32Array>()
            .context("expected Int32Array")?
            .value(row) as i64,
        DataType::Int64 => col
            .as_any()
            .downcast_ref::<Int64Array>()
            .context("expected Int64Array")?
            .value(row),
        DataType::UInt32 => {
            let arr = col
                .as_any()
                .downcast_ref::<UInt32Array>()
                .context("expected UInt32Array")?;
            return Ok(arr.value(row) as u64);
        }
        DataType::UInt64 => {
            let arr = col
                .as_any()
                .downcast_ref::<UInt64Array>()
                .context("expected UInt64Array")?;
            return Ok(arr.value(row));
        }
        other => bail!("Expected integer column, got {other:?}"),
    };
    u64::try_from(signed).map_err(|_| anyhow::anyhow!("negative frequency {signed}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    use arrow::array::{ArrayRef, LargeStringArray};
    use arrow::datatypes::{Field, Schema};
    use arrow::record_batch::RecordBatch;
    use parquet::arrow::ArrowWriter;

    fn temp_file(name: &str, contents: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("skill-lens-loader-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join(name);
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn csv_and_json_tables_agree() {
        let csv = temp_file(
            "table.csv",
            "title,category,skill,frequency\n\
             Data Scientist,Programming Languages,Python,120\n\
             Data Engineer,Programming Languages,Java,70\n",
        );
        let json = temp_file(
            "table.json",
            r#"[
                {"title": "Data Scientist", "category": "Programming Languages", "skill": "Python", "frequency": 120},
                {"title": "Data Engineer", "category": "Programming Languages", "skill": "Java", "frequency": 70}
            ]"#,
        );

        let a = load_table(&csv).unwrap();
        let b = load_table(&json).unwrap();
        assert_eq!(a.rows(), b.rows());
        assert_eq!(a.titles(), ["Data Scientist", "Data Engineer"]);
    }

    fn temp_parquet(name: &str, columns: Vec<(&str, ArrayRef)>) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("skill-lens-loader-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join(name);

        let fields: Vec<Field> = columns
            .iter()
            .map(|(n, col)| Field::new(*n, col.data_type().clone(), true))
            .collect();
        let schema = Arc::new(Schema::new(fields));
        let batch =
            RecordBatch::try_new(schema.clone(), columns.into_iter().map(|(_, c)| c).collect())
                .unwrap();

        let file = std::fs::File::create(&path).unwrap();
        let mut writer = ArrowWriter::try_new(file, schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();
        path
    }

    fn strings(values: &[&str]) -> ArrayRef {
        Arc::new(StringArray::from(values.to_vec()))
    }

    #[test]
    fn parquet_table_matches_csv() {
        let csv = temp_file(
            "fixture.csv",
            "title,category,skill,frequency\n\
             Data Scientist,Programming Languages,Python,120\n\
             Data Engineer,Programming Languages,Java,70\n",
        );
        let titles = ["Data Scientist", "Data Engineer"];
        let categories = ["Programming Languages", "Programming Languages"];
        let skills = ["Python", "Java"];
        let parquet = temp_parquet(
            "fixture.parquet",
            vec![
                ("title", strings(&titles)),
                ("category", strings(&categories)),
                ("skill", strings(&skills)),
                ("frequency", Arc::new(Int64Array::from(vec![120i64, 70]))),
            ],
        );

        let expected = load_table(&csv).unwrap();
        let table = load_table(&parquet).unwrap();
        assert_eq!(table.rows(), expected.rows());
        assert_eq!(table.categories(), ["Programming Languages"]);
    }

    #[test]
    fn parquet_accepts_large_strings_and_other_int_widths() {
        let large = |values: &[&str]| -> ArrayRef { Arc::new(LargeStringArray::from(values.to_vec())) };
        let counts: [(&str, ArrayRef); 3] = [
            ("i32.parquet", Arc::new(Int32Array::from(vec![5, 3]))),
            ("u32.parquet", Arc::new(UInt32Array::from(vec![5u32, 3]))),
            ("u64.parquet", Arc::new(UInt64Array::from(vec![5u64, 3]))),
        ];
        for (name, frequency) in counts {
            let path = temp_parquet(
                name,
                vec![
                    ("title", large(&["Data Engineer", "Data Engineer"])),
                    ("category", large(&["Databases", "Databases"])),
                    ("skill", strings(&["SQL", "MongoDB"])),
                    ("frequency", frequency),
                ],
            );
            let table = load_table(&path).unwrap();
            assert_eq!(
                table.rows(),
                [
                    FrequencyRow::new("Data Engineer", "Databases", "SQL", 5),
                    FrequencyRow::new("Data Engineer", "Databases", "MongoDB", 3),
                ]
            );
        }
    }

    #[test]
    fn parquet_rejects_negative_and_null_counts() {
        let negative = temp_parquet(
            "negative.parquet",
            vec![
                ("title", strings(&["Data Scientist"])),
                ("category", strings(&["Databases"])),
                ("skill", strings(&["SQL"])),
                ("frequency", Arc::new(Int64Array::from(vec![-3i64]))),
            ],
        );
        let err = load_table(&negative).unwrap_err();
        assert!(format!("{err:#}").contains("negative frequency -3"));

        let null = temp_parquet(
            "null.parquet",
            vec![
                ("title", strings(&["Data Scientist"])),
                ("category", strings(&["Databases"])),
                ("skill", strings(&["SQL"])),
                ("frequency", Arc::new(Int64Array::from(vec![None::<i64>]))),
            ],
        );
        let err = load_table(&null).unwrap_err();
        assert!(format!("{err:#}").contains("null value in frequency column"));
    }

    #[test]
    fn parquet_without_a_frequency_column_is_rejected() {
        let path = temp_parquet(
            "no_frequency.parquet",
            vec![
                ("title", strings(&["Data Scientist"])),
                ("category", strings(&["Databases"])),
                ("skill", strings(&["SQL"])),
            ],
        );
        let err = load_table(&path).unwrap_err();
        assert!(format!("{err:#}").contains("missing 'frequency' column"));
    }

    #[test]
    fn negative_frequency_is_an_error() {
        let csv = temp_file(
            "negative.csv",
            "title,category,skill,frequency\nData Scientist,Databases,SQL,-3\n",
        );
        assert!(load_table(&csv).is_err());
    }

    #[test]
    fn non_numeric_frequency_is_an_error() {
        let csv = temp_file(
            "text_count.csv",
            "title,category,skill,frequency\nData Scientist,Databases,SQL,many\n",
        );
        let err = load_table(&csv).unwrap_err();
        assert!(format!("{err:#}").contains("CSV row 0"));
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let path = temp_file("table.xlsx", "");
        let err = load_table(&path).unwrap_err();
        assert_eq!(err.to_string(), "Unsupported file extension: .xlsx");
    }

    #[test]
    fn postings_and_stopwords_load() {
        let postings = temp_file(
            "data_scientist.json",
            r#"{"0": "Build models in Python", "1": "Own the SQL warehouse"}"#,
        );
        let store = load_postings(&postings).unwrap();
        assert_eq!(store.len(), 2);
        assert_eq!(store["1"], "Own the SQL warehouse");

        let stop = temp_file("stopwords.csv", "experience, team ,work\nignored,row\n");
        assert_eq!(load_stopwords(&stop).unwrap(), ["experience", "team", "work"]);
    }
}
