use std::fs::File;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use arrow::array::{Array, AsArray, Float32Array, Float64Array, Int32Array, Int64Array, StringArray};
use arrow::datatypes::DataType;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde::Deserialize;

use super::model::{LaunchDataset, LaunchRecord};

// ---------------------------------------------------------------------------
// Column contract
// ---------------------------------------------------------------------------

// Fixed external contract of the launch record table.
pub const COL_SITE: &str = "Launch Site";
pub const COL_PAYLOAD: &str = "Payload Mass (kg)";
pub const COL_OUTCOME: &str = "Mission Outcome";
pub const COL_BOOSTER: &str = "Booster Version Category";
pub const COL_CLASS: &str = "class";

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load the launch record table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row with the launch record columns (primary format)
/// * `.json`    – records-oriented array of objects with the same keys
/// * `.parquet` – one column per field
///
/// Extra columns are ignored; a table with zero rows is rejected so the
/// payload bounds seeding the range control are always defined.
pub fn load_file(path: &Path) -> Result<LaunchDataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let records = match ext.as_str() {
        "csv" => load_csv(path),
        "json" => load_json(path),
        "parquet" | "pq" => load_parquet(path),
        other => bail!("Unsupported file extension: .{other}"),
    }?;

    if records.is_empty() {
        bail!("{} contains no launch records", path.display());
    }

    Ok(LaunchDataset::from_records(records))
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn load_csv(path: &Path) -> Result<Vec<LaunchRecord>> {
    let reader = csv::Reader::from_path(path).context("opening CSV")?;
    parse_csv(reader)
}

fn parse_csv<R: std::io::Read>(mut reader: csv::Reader<R>) -> Result<Vec<LaunchRecord>> {
    let headers = reader.headers().context("reading CSV headers")?.clone();
    let column = |name: &str| -> Result<usize> {
        headers
            .iter()
            .position(|h| h == name)
            .with_context(|| format!("CSV missing '{name}' column"))
    };

    let site_idx = column(COL_SITE)?;
    let payload_idx = column(COL_PAYLOAD)?;
    let outcome_idx = column(COL_OUTCOME)?;
    let booster_idx = column(COL_BOOSTER)?;
    let class_idx = column(COL_CLASS)?;

    let mut records = Vec::new();

    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        let field = |idx: usize| record.get(idx).unwrap_or("").trim();

        let payload_mass_kg: f64 = field(payload_idx).parse().with_context(|| {
            format!(
                "CSV row {row_no}: '{}' is not a payload mass",
                field(payload_idx)
            )
        })?;
        let class: i64 = field(class_idx).parse().with_context(|| {
            format!(
                "CSV row {row_no}: '{}' is not a success indicator",
                field(class_idx)
            )
        })?;

        records.push(LaunchRecord {
            site: field(site_idx).to_string(),
            payload_mass_kg,
            outcome: field(outcome_idx).to_string(),
            booster_category: field(booster_idx).to_string(),
            success: class == 1,
        });
    }

    Ok(records)
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Records-oriented JSON, the default `df.to_json(orient='records')` layout:
///
/// ```json
/// [
///   {
///     "Launch Site": "CCAFS LC-40",
///     "Payload Mass (kg)": 2500.0,
///     "Mission Outcome": "Success",
///     "Booster Version Category": "FT",
///     "class": 1
///   },
///   ...
/// ]
/// ```
#[derive(Debug, Deserialize)]
struct RawRecord {
    #[serde(rename = "Launch Site")]
    site: String,
    #[serde(rename = "Payload Mass (kg)")]
    payload_mass_kg: f64,
    #[serde(rename = "Mission Outcome")]
    outcome: String,
    #[serde(rename = "Booster Version Category")]
    booster_category: String,
    #[serde(rename = "class")]
    class: i64,
}

impl From<RawRecord> for LaunchRecord {
    fn from(raw: RawRecord) -> Self {
        LaunchRecord {
            site: raw.site,
            payload_mass_kg: raw.payload_mass_kg,
            outcome: raw.outcome,
            booster_category: raw.booster_category,
            success: raw.class == 1,
        }
    }
}

fn load_json(path: &Path) -> Result<Vec<LaunchRecord>> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let raw: Vec<RawRecord> = serde_json::from_str(&text).context("parsing JSON records")?;
    Ok(raw.into_iter().map(LaunchRecord::from).collect())
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load launch records from a Parquet file with one scalar column per field.
///
/// Works with files written by both **Pandas** (`df.to_parquet()`) and
/// **Polars** (`df.write_parquet()`).
fn load_parquet(path: &Path) -> Result<Vec<LaunchRecord>> {
    let file = File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut records = Vec::new();

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let schema = batch.schema();
        let column = |name: &str| -> Result<usize> {
            schema
                .index_of(name)
                .map_err(|_| anyhow::anyhow!("Parquet file missing '{name}' column"))
        };

        let site_col = batch.column(column(COL_SITE)?);
        let payload_col = batch.column(column(COL_PAYLOAD)?);
        let outcome_col = batch.column(column(COL_OUTCOME)?);
        let booster_col = batch.column(column(COL_BOOSTER)?);
        let class_col = batch.column(column(COL_CLASS)?);

        for row in 0..batch.num_rows() {
            records.push(LaunchRecord {
                site: string_at(site_col, row)
                    .with_context(|| format!("row {row}: '{COL_SITE}'"))?,
                payload_mass_kg: f64_at(payload_col, row)
                    .with_context(|| format!("row {row}: '{COL_PAYLOAD}'"))?,
                outcome: string_at(outcome_col, row)
                    .with_context(|| format!("row {row}: '{COL_OUTCOME}'"))?,
                booster_category: string_at(booster_col, row)
                    .with_context(|| format!("row {row}: '{COL_BOOSTER}'"))?,
                success: i64_at(class_col, row)
                    .with_context(|| format!("row {row}: '{COL_CLASS}'"))?
                    == 1,
            });
        }
    }

    Ok(records)
}

// -- Arrow helpers --

fn string_at(col: &Arc<dyn Array>, row: usize) -> Result<String> {
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
        other => bail!("expected string column, got {other:?}"),
    }
}

fn f64_at(col: &Arc<dyn Array>, row: usize) -> Result<f64> {
    if col.is_null(row) {
        bail!("null value in numeric column");
    }
    match col.data_type() {
        DataType::Float64 => {
            let arr = col
                .as_any()
                .downcast_ref::<Float64Array>()
                .context("expected Float64Array")?;
            Ok(arr.value(row))
        }
        DataType::Float32 => {
            let arr = col
                .as_any()
                .downcast_ref::<Float32Array>()
                .context("expected Float32Array")?;
            Ok(arr.value(row) as f64)
        }
        DataType::Int64 => {
            let arr = col
                .as_any()
                .downcast_ref::<Int64Array>()
                .context("expected Int64Array")?;
            Ok(arr.value(row) as f64)
        }
        other => bail!("expected numeric column, got {other:?}"),
    }
}

fn i64_at(col: &Arc<dyn Array>, row: usize) -> Result<i64> {
    if col.is_null(row) {
        bail!("null value in integer column");
    }
    match col.data_type() {
        DataType::Int64 => {
            let arr = col
                .as_any()
                .downcast_ref::<Int64Array>()
                .context("expected Int64Array")?;
            Ok(arr.value(row))
        }
        DataType::Int32 => {
            let arr = col
                .as_any()
                .downcast_ref::<Int32Array>()
                .context("expected Int32Array")?;
            Ok(arr.value(row) as i64)
        }
        other => bail!("expected integer column, got {other:?}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(csv_text: &str) -> Result<Vec<LaunchRecord>> {
        parse_csv(csv::Reader::from_reader(csv_text.as_bytes()))
    }

    const HEADER: &str =
        "Flight Number,Launch Site,class,Payload Mass (kg),Booster Version Category,Mission Outcome";

    #[test]
    fn csv_rows_map_onto_launch_records() {
        let text = format!(
            "{HEADER}\n\
             1,CCAFS LC-40,0,0,v1.0,Failure (parachute)\n\
             24,KSC LC-39A,1,5300,FT,Success\n"
        );
        let records = parse(&text).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].site, "CCAFS LC-40");
        assert!(!records[0].success);
        assert_eq!(records[1].payload_mass_kg, 5300.0);
        assert_eq!(records[1].booster_category, "FT");
        assert_eq!(records[1].outcome, "Success");
        assert!(records[1].success);
    }

    #[test]
    fn extra_columns_are_ignored() {
        let text = "Launch Site,Payload Mass (kg),Mission Outcome,Booster Version Category,class,Booster Version\n\
                    VAFB SLC-4E,500,Success,v1.1,1,F9 v1.1 B1003\n";
        let records = parse(text).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].site, "VAFB SLC-4E");
    }

    #[test]
    fn missing_column_is_reported() {
        let text = "Launch Site,Payload Mass (kg),Mission Outcome,class\nCCAFS LC-40,2500,Success,1\n";
        let err = parse(text).unwrap_err();
        assert!(format!("{err:#}").contains("Booster Version Category"));
    }

    #[test]
    fn malformed_payload_is_reported_with_row() {
        let text = format!("{HEADER}\n7,CCAFS LC-40,1,n/a,FT,Success\n");
        let err = parse(&text).unwrap_err();
        let msg = format!("{err:#}");
        assert!(msg.contains("row 0"));
        assert!(msg.contains("payload mass"));
    }

    #[test]
    fn malformed_class_is_reported() {
        let text = format!("{HEADER}\n7,CCAFS LC-40,yes,2500,FT,Success\n");
        let err = parse(&text).unwrap_err();
        assert!(format!("{err:#}").contains("success indicator"));
    }

    #[test]
    fn unsupported_extension_is_rejected() {
        let err = load_file(Path::new("launches.xlsx")).unwrap_err();
        assert!(err.to_string().contains(".xlsx"));
    }
}
