use std::collections::BTreeMap;
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

const TITLES: [&str; 3] = ["Data Scientist", "Machine Learning Engineer", "Data Engineer"];

const CATEGORIES: [(&str, &[&str]); 7] = [
    ("Programming Languages", &["Python", "R", "SQL", "Java", "Scala", "C++", "Go"]),
    ("Big Data Technologies", &["Spark", "Hadoop", "Kafka", "Hive", "Flink", "Airflow"]),
    ("Databases", &["PostgreSQL", "MySQL", "MongoDB", "Cassandra", "Redshift", "Snowflake"]),
    ("Cloud Platforms", &["AWS", "GCP", "Azure", "Databricks"]),
    ("Machine Learning Frameworks", &["TensorFlow", "PyTorch", "Scikit-Learn", "Keras", "XGBoost"]),
    ("Visualization Tools", &["Tableau", "PowerBI", "Matplotlib", "Looker"]),
    ("Soft Skills", &["Communication", "Leadership", "Teamwork", "Presentation"]),
];

/// Relative emphasis of each category per title, same order as `CATEGORIES`.
const EMPHASIS: [[f64; 7]; 3] = [
    [1.0, 0.4, 0.5, 0.5, 0.8, 0.7, 0.6],
    [1.0, 0.5, 0.3, 0.7, 1.0, 0.2, 0.4],
    [0.9, 1.0, 0.9, 0.8, 0.2, 0.3, 0.4],
];

const FILLER: [&str; 12] = [
    "experience with", "strong knowledge of", "you will use", "our team relies on",
    "hands-on work in", "we are looking for", "familiarity with", "build pipelines in",
    "deploy models with", "collaborate using", "years of", "work closely with",
];

const POSTINGS_PER_TITLE: usize = 120;

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn pick<'a>(&mut self, items: &[&'a str]) -> &'a str {
        items[(self.next_u64() % items.len() as u64) as usize]
    }
}

struct Row {
    title: &'static str,
    category: &'static str,
    skill: &'static str,
    frequency: i64,
}

fn frequency_rows(rng: &mut SimpleRng) -> Vec<Row> {
    let mut rows = Vec::new();
    for (t, &title) in TITLES.iter().enumerate() {
        for (c, &(category, skills)) in CATEGORIES.iter().enumerate() {
            for (rank, &skill) in skills.iter().enumerate() {
                // Earlier skills in a category are more common.
                let base = 150.0 * EMPHASIS[t][c] / (1.0 + rank as f64 * 0.6);
                let frequency = (base * (0.7 + 0.6 * rng.next_f64())).round() as i64;
                if frequency > 0 {
                    rows.push(Row { title, category, skill, frequency });
                }
            }
        }
    }
    rows
}

fn postings(rng: &mut SimpleRng, title_index: usize) -> BTreeMap<String, String> {
    (0..POSTINGS_PER_TITLE)
        .map(|i| {
            let sentences: Vec<String> = (0..6)
                .map(|_| {
                    let c = (rng.next_u64() % CATEGORIES.len() as u64) as usize;
                    // Skip categories this title rarely asks for.
                    let c = if rng.next_f64() > EMPHASIS[title_index][c] { 0 } else { c };
                    format!("{} {}.", rng.pick(&FILLER), rng.pick(CATEGORIES[c].1))
                })
                .collect();
            (i.to_string(), format!("{} {}", TITLES[title_index], sentences.join(" ")))
        })
        .collect()
}

fn write_csv(rows: &[Row], path: &str) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).with_context(|| format!("creating {path}"))?;
    writer.write_record(["title", "category", "skill", "frequency"])?;
    for row in rows {
        let frequency = row.frequency.to_string();
        writer.write_record([row.title, row.category, row.skill, frequency.as_str()])?;
    }
    writer.flush()?;
    Ok(())
}

fn write_parquet(rows: &[Row], path: &str) -> Result<()> {
    let schema = Arc::new(Schema::new(vec![
        Field::new("title", DataType::Utf8, false),
        Field::new("category", DataType::Utf8, false),
        Field::new("skill", DataType::Utf8, false),
        Field::new("frequency", DataType::Int64, false),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(StringArray::from(rows.iter().map(|r| r.title).collect::<Vec<_>>())),
            Arc::new(StringArray::from(rows.iter().map(|r| r.category).collect::<Vec<_>>())),
            Arc::new(StringArray::from(rows.iter().map(|r| r.skill).collect::<Vec<_>>())),
            Arc::new(Int64Array::from(rows.iter().map(|r| r.frequency).collect::<Vec<_>>())),
        ],
    )
    .context("creating RecordBatch")?;

    let file = std::fs::File::create(path).with_context(|| format!("creating {path}"))?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing batch")?;
    writer.close().context("closing parquet writer")?;
    Ok(())
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);

    let rows = frequency_rows(&mut rng);
    write_csv(&rows, "sample_frequencies.csv")?;
    write_parquet(&rows, "sample_frequencies.parquet")?;
    println!("Wrote {} frequency rows to sample_frequencies.csv / .parquet", rows.len());

    for (t, title) in TITLES.iter().enumerate() {
        let store = postings(&mut rng, t);
        let path = format!("{}.json", title.to_lowercase().replace(' ', "_"));
        let json = serde_json::to_string_pretty(&store).context("serialising postings")?;
        std::fs::write(&path, json).with_context(|| format!("writing {path}"))?;
        println!("Wrote {} postings to {path}", store.len());
    }

    let mut writer = csv::Writer::from_path("stopwords.csv").context("creating stopwords.csv")?;
    writer.write_record(["experience", "team", "work", "looking", "years", "knowledge", "strong"])?;
    writer.flush()?;
    println!("Wrote stopwords.csv");

    Ok(())
}
