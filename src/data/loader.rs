use std::fs::File;
use std::path::{Path, PathBuf};

use arrow::array::{
    Array, ArrayRef, Float32Array, Float64Array, Int32Array, Int64Array, LargeStringArray,
    StringArray, TimestampMicrosecondArray, TimestampMillisecondArray, TimestampNanosecondArray,
    TimestampSecondArray,
};
use arrow::datatypes::{DataType, TimeUnit};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use log::{info, warn};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde::Deserialize;
use serde_json::Value as JsonValue;
use thiserror::Error;

use super::model::{Dataset, Order};

/// Category assigned to rows whose category cell is missing or blank.
pub const UNKNOWN_CATEGORY: &str = "Unknown Category";

/// Columns every input file must provide. `payment_value` and `quantity`
/// are optional and fall back per row (see [`finish_batch`]).
const REQUIRED_COLUMNS: [&str; 6] = [
    "order_purchase_timestamp",
    "product_category_name",
    "product_id",
    "price",
    "freight_value",
    "product_weight_g",
];

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("no input files given")]
    NoInputs,
    #[error("failed to open {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("unsupported file extension: .{0}")]
    UnsupportedExtension(String),
    #[error("{}: {source}", .path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    #[error("{}: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("{}: {source}", .path.display())]
    Parquet {
        path: PathBuf,
        #[source]
        source: parquet::errors::ParquetError,
    },
    #[error("{}: {source}", .path.display())]
    Arrow {
        path: PathBuf,
        #[source]
        source: arrow::error::ArrowError,
    },
    #[error("{}: missing required column '{column}'", .path.display())]
    MissingColumn { path: PathBuf, column: String },
    #[error("{} row {row}: {message}", .path.display())]
    BadRecord {
        path: PathBuf,
        row: usize,
        message: String,
    },
}

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load one or more order tables and concatenate them into a single
/// [`Dataset`]. All files must share the order schema; a failure on any
/// file aborts the whole load.
pub fn load_files(paths: &[PathBuf]) -> Result<Dataset, LoadError> {
    if paths.is_empty() {
        return Err(LoadError::NoInputs);
    }

    let mut orders = Vec::new();
    for path in paths {
        let batch = load_file(path)?;
        info!("{}: loaded {} orders", path.display(), batch.len());
        orders.extend(batch);
    }
    Ok(Dataset::from_orders(orders))
}

/// Load a single order table. Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row with the source column names
/// * `.json`    – records-oriented array: `[{ "product_id": ..., ... }, ...]`
/// * `.parquet` – flat columns, timestamps either typed or as strings
pub fn load_file(path: &Path) -> Result<Vec<Order>, LoadError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let raws = match ext.as_str() {
        "csv" => load_csv(path)?,
        "json" => load_json(path)?,
        "parquet" | "pq" => load_parquet(path)?,
        other => return Err(LoadError::UnsupportedExtension(other.to_string())),
    };

    finish_batch(path, raws)
}

// ---------------------------------------------------------------------------
// Intermediate row and coercion
// ---------------------------------------------------------------------------

/// One row as read from disk, before coercion. Each format-specific loader
/// produces these; [`finish_batch`] turns them into typed [`Order`]s.
#[derive(Debug, Default)]
struct RawOrder {
    product_id: Option<String>,
    category: Option<String>,
    purchased_at: Option<NaiveDateTime>,
    price: Option<f64>,
    payment_value: Option<f64>,
    freight_value: Option<f64>,
    product_weight_g: Option<f64>,
    quantity: Option<u32>,
}

/// Coercion rules, applied per input file:
/// * unparsable timestamp → the row is dropped (logged);
/// * blank category → [`UNKNOWN_CATEGORY`];
/// * missing `price` / `freight_value` / `product_weight_g` → the column
///   mean over this file's parsed values;
/// * missing `payment_value` → the row's own price (counts as full price);
/// * missing `quantity` → 1.
fn finish_batch(path: &Path, raws: Vec<RawOrder>) -> Result<Vec<Order>, LoadError> {
    let price_mean = column_mean(raws.iter().map(|r| r.price));
    let freight_mean = column_mean(raws.iter().map(|r| r.freight_value));
    let weight_mean = column_mean(raws.iter().map(|r| r.product_weight_g));

    let total = raws.len();
    let mut dropped = 0usize;
    let mut orders = Vec::with_capacity(total);

    for raw in raws {
        let Some(purchased_at) = raw.purchased_at else {
            dropped += 1;
            continue;
        };
        let price = raw.price.unwrap_or(price_mean);
        orders.push(Order {
            product_id: raw.product_id.unwrap_or_default(),
            category: match raw.category {
                Some(c) if !c.trim().is_empty() => c,
                _ => UNKNOWN_CATEGORY.to_string(),
            },
            purchased_at,
            price,
            payment_value: raw.payment_value.unwrap_or(price),
            freight_value: raw.freight_value.unwrap_or(freight_mean),
            product_weight_g: raw.product_weight_g.unwrap_or(weight_mean),
            quantity: raw.quantity.unwrap_or(1),
        });
    }

    if dropped > 0 {
        warn!(
            "{}: dropped {dropped} of {total} rows with unparsable order_purchase_timestamp",
            path.display()
        );
    }
    if orders.is_empty() && dropped > 0 {
        // Every row lacked a usable timestamp: the file does not hold what
        // we expect, so refuse it rather than load nothing.
        return Err(LoadError::BadRecord {
            path: path.to_path_buf(),
            row: 0,
            message: "no rows with a parsable order_purchase_timestamp".to_string(),
        });
    }

    Ok(orders)
}

fn column_mean(values: impl Iterator<Item = Option<f64>>) -> f64 {
    let (sum, n) = values
        .flatten()
        .fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
    if n == 0 {
        0.0
    } else {
        sum / n as f64
    }
}

/// Parse `2023-01-05 14:30:00`, falling back to a bare `2023-01-05`.
fn parse_timestamp(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

fn lenient_f64(s: Option<&str>) -> Option<f64> {
    let t = s?.trim();
    if t.is_empty() {
        return None;
    }
    t.parse::<f64>().ok().filter(|v| v.is_finite())
}

fn lenient_u32(s: Option<&str>) -> Option<u32> {
    let t = s?.trim();
    t.parse::<u32>().ok().or_else(|| {
        t.parse::<f64>()
            .ok()
            .filter(|v| v.is_finite() && *v >= 0.0)
            .map(|v| v.round() as u32)
    })
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// Raw CSV cells. Everything is kept as text here so that a stray
/// non-numeric cell coerces instead of failing the whole file.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CsvRow {
    order_purchase_timestamp: Option<String>,
    product_category_name: Option<String>,
    product_id: Option<String>,
    price: Option<String>,
    payment_value: Option<String>,
    freight_value: Option<String>,
    product_weight_g: Option<String>,
    quantity: Option<String>,
}

fn load_csv(path: &Path) -> Result<Vec<RawOrder>, LoadError> {
    let file = File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(file);

    let headers: Vec<String> = reader
        .headers()
        .map_err(|source| LoadError::Csv {
            path: path.to_path_buf(),
            source,
        })?
        .iter()
        .map(str::to_string)
        .collect();
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(LoadError::MissingColumn {
                path: path.to_path_buf(),
                column: column.to_string(),
            });
        }
    }

    let mut raws = Vec::new();
    for result in reader.deserialize() {
        let row: CsvRow = result.map_err(|source| LoadError::Csv {
            path: path.to_path_buf(),
            source,
        })?;
        raws.push(RawOrder {
            product_id: row.product_id,
            category: row.product_category_name,
            purchased_at: row
                .order_purchase_timestamp
                .as_deref()
                .and_then(parse_timestamp),
            price: lenient_f64(row.price.as_deref()),
            payment_value: lenient_f64(row.payment_value.as_deref()),
            freight_value: lenient_f64(row.freight_value.as_deref()),
            product_weight_g: lenient_f64(row.product_weight_g.as_deref()),
            quantity: lenient_u32(row.quantity.as_deref()),
        });
    }
    Ok(raws)
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, the default
/// `df.to_json(orient='records')`):
///
/// ```json
/// [
///   {
///     "product_id": "a1b2",
///     "product_category_name": "toys",
///     "order_purchase_timestamp": "2023-01-05 14:30:00",
///     "price": 49.9,
///     "payment_value": 45.0,
///     "freight_value": 8.2,
///     "product_weight_g": 300.0,
///     "quantity": 1
///   },
///   ...
/// ]
/// ```
fn load_json(path: &Path) -> Result<Vec<RawOrder>, LoadError> {
    let text = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let root: JsonValue = serde_json::from_str(&text).map_err(|source| LoadError::Json {
        path: path.to_path_buf(),
        source,
    })?;

    let records = root.as_array().ok_or_else(|| LoadError::BadRecord {
        path: path.to_path_buf(),
        row: 0,
        message: "expected a top-level JSON array of records".to_string(),
    })?;

    let mut raws = Vec::with_capacity(records.len());
    for (i, rec) in records.iter().enumerate() {
        let obj = rec.as_object().ok_or_else(|| LoadError::BadRecord {
            path: path.to_path_buf(),
            row: i,
            message: "record is not a JSON object".to_string(),
        })?;

        raws.push(RawOrder {
            product_id: obj.get("product_id").and_then(json_string),
            category: obj.get("product_category_name").and_then(json_string),
            purchased_at: obj
                .get("order_purchase_timestamp")
                .and_then(|v| v.as_str())
                .and_then(parse_timestamp),
            price: obj.get("price").and_then(json_f64),
            payment_value: obj.get("payment_value").and_then(json_f64),
            freight_value: obj.get("freight_value").and_then(json_f64),
            product_weight_g: obj.get("product_weight_g").and_then(json_f64),
            quantity: obj.get("quantity").and_then(json_u32),
        });
    }
    Ok(raws)
}

fn json_string(v: &JsonValue) -> Option<String> {
    v.as_str().map(str::to_string)
}

fn json_f64(v: &JsonValue) -> Option<f64> {
    v.as_f64()
        .or_else(|| v.as_str().and_then(|s| s.trim().parse().ok()))
        .filter(|v| v.is_finite())
}

fn json_u32(v: &JsonValue) -> Option<u32> {
    v.as_u64()
        .and_then(|n| u32::try_from(n).ok())
        .or_else(|| json_f64(v).filter(|f| *f >= 0.0).map(|f| f.round() as u32))
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet export of the order table. Flat columns; the timestamp
/// column may be a typed Arrow timestamp (any unit) or plain strings.
/// Works with files written by both Pandas (`df.to_parquet()`) and Polars
/// (`df.write_parquet()`).
fn load_parquet(path: &Path) -> Result<Vec<RawOrder>, LoadError> {
    let file = File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).map_err(|source| LoadError::Parquet {
            path: path.to_path_buf(),
            source,
        })?;
    let reader = builder.build().map_err(|source| LoadError::Parquet {
        path: path.to_path_buf(),
        source,
    })?;

    let mut raws = Vec::new();
    for batch_result in reader {
        let batch = batch_result.map_err(|source| LoadError::Arrow {
            path: path.to_path_buf(),
            source,
        })?;

        for column in REQUIRED_COLUMNS {
            if batch.column_by_name(column).is_none() {
                return Err(LoadError::MissingColumn {
                    path: path.to_path_buf(),
                    column: column.to_string(),
                });
            }
        }

        for row in 0..batch.num_rows() {
            raws.push(RawOrder {
                product_id: batch
                    .column_by_name("product_id")
                    .and_then(|c| string_at(c, row)),
                category: batch
                    .column_by_name("product_category_name")
                    .and_then(|c| string_at(c, row)),
                purchased_at: batch
                    .column_by_name("order_purchase_timestamp")
                    .and_then(|c| timestamp_at(c, row)),
                price: batch.column_by_name("price").and_then(|c| float_at(c, row)),
                payment_value: batch
                    .column_by_name("payment_value")
                    .and_then(|c| float_at(c, row)),
                freight_value: batch
                    .column_by_name("freight_value")
                    .and_then(|c| float_at(c, row)),
                product_weight_g: batch
                    .column_by_name("product_weight_g")
                    .and_then(|c| float_at(c, row)),
                quantity: batch
                    .column_by_name("quantity")
                    .and_then(|c| uint_at(c, row)),
            });
        }
    }
    Ok(raws)
}

// -- Arrow helpers --

fn string_at(col: &ArrayRef, row: usize) -> Option<String> {
    if col.is_null(row) {
        return None;
    }
    match col.data_type() {
        DataType::Utf8 => col
            .as_any()
            .downcast_ref::<StringArray>()
            .map(|a| a.value(row).to_string()),
        DataType::LargeUtf8 => col
            .as_any()
            .downcast_ref::<LargeStringArray>()
            .map(|a| a.value(row).to_string()),
        _ => None,
    }
}

fn float_at(col: &ArrayRef, row: usize) -> Option<f64> {
    if col.is_null(row) {
        return None;
    }
    let value = match col.data_type() {
        DataType::Float64 => col
            .as_any()
            .downcast_ref::<Float64Array>()
            .map(|a| a.value(row)),
        DataType::Float32 => col
            .as_any()
            .downcast_ref::<Float32Array>()
            .map(|a| a.value(row) as f64),
        DataType::Int64 => col
            .as_any()
            .downcast_ref::<Int64Array>()
            .map(|a| a.value(row) as f64),
        DataType::Int32 => col
            .as_any()
            .downcast_ref::<Int32Array>()
            .map(|a| a.value(row) as f64),
        _ => None,
    };
    value.filter(|v| v.is_finite())
}

fn uint_at(col: &ArrayRef, row: usize) -> Option<u32> {
    if col.is_null(row) {
        return None;
    }
    match col.data_type() {
        DataType::Int64 => col
            .as_any()
            .downcast_ref::<Int64Array>()
            .map(|a| a.value(row))
            .filter(|v| *v >= 0)
            .map(|v| v as u32),
        DataType::Int32 => col
            .as_any()
            .downcast_ref::<Int32Array>()
            .map(|a| a.value(row))
            .filter(|v| *v >= 0)
            .map(|v| v as u32),
        DataType::UInt32 => col
            .as_any()
            .downcast_ref::<arrow::array::UInt32Array>()
            .map(|a| a.value(row)),
        _ => float_at(col, row)
            .filter(|v| *v >= 0.0)
            .map(|v| v.round() as u32),
    }
}

fn timestamp_at(col: &ArrayRef, row: usize) -> Option<NaiveDateTime> {
    if col.is_null(row) {
        return None;
    }
    match col.data_type() {
        DataType::Timestamp(TimeUnit::Second, _) => col
            .as_any()
            .downcast_ref::<TimestampSecondArray>()
            .and_then(|a| DateTime::from_timestamp(a.value(row), 0))
            .map(|dt| dt.naive_utc()),
        DataType::Timestamp(TimeUnit::Millisecond, _) => col
            .as_any()
            .downcast_ref::<TimestampMillisecondArray>()
            .and_then(|a| DateTime::from_timestamp_millis(a.value(row)))
            .map(|dt| dt.naive_utc()),
        DataType::Timestamp(TimeUnit::Microsecond, _) => col
            .as_any()
            .downcast_ref::<TimestampMicrosecondArray>()
            .and_then(|a| DateTime::from_timestamp_micros(a.value(row)))
            .map(|dt| dt.naive_utc()),
        DataType::Timestamp(TimeUnit::Nanosecond, _) => col
            .as_any()
            .downcast_ref::<TimestampNanosecondArray>()
            .map(|a| DateTime::from_timestamp_nanos(a.value(row)).naive_utc()),
        DataType::Utf8 | DataType::LargeUtf8 => {
            string_at(col, row).as_deref().and_then(parse_timestamp)
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_file(name: &str, contents: &str) -> PathBuf {
        let path =
            std::env::temp_dir().join(format!("shopsight-loader-{}-{name}", std::process::id()));
        std::fs::write(&path, contents).expect("write temp file");
        path
    }

    const FULL_CSV: &str = "\
product_id,product_category_name,order_purchase_timestamp,price,payment_value,freight_value,product_weight_g,quantity
a1,toys,2023-01-01 10:00:00,100.0,90.0,10.0,250.0,2
b2,books,2023-02-01 09:30:00,50.0,50.0,5.0,400.0,1
";

    #[test]
    fn loads_typed_rows_from_csv() {
        let path = temp_file("full.csv", FULL_CSV);
        let orders = load_file(&path).expect("load");

        assert_eq!(orders.len(), 2);
        assert_eq!(orders[0].product_id, "a1");
        assert_eq!(orders[0].category, "toys");
        assert_eq!(
            orders[0].purchase_date(),
            NaiveDate::from_ymd_opt(2023, 1, 1).unwrap()
        );
        assert_eq!(orders[0].quantity, 2);
        assert_eq!(orders[1].price, 50.0);
    }

    #[test]
    fn coerces_blank_category_and_bad_price() {
        let csv = "\
product_id,product_category_name,order_purchase_timestamp,price,payment_value,freight_value,product_weight_g
a1,,2023-01-01 10:00:00,not-a-number,90.0,10.0,250.0
b2,books,2023-01-02 10:00:00,40.0,40.0,10.0,250.0
c3,books,2023-01-03 10:00:00,60.0,60.0,10.0,250.0
";
        let path = temp_file("coerce.csv", csv);
        let orders = load_file(&path).expect("load");

        assert_eq!(orders.len(), 3);
        assert_eq!(orders[0].category, UNKNOWN_CATEGORY);
        // Bad price cell takes the file mean of the parsable values.
        assert_eq!(orders[0].price, 50.0);
        // Quantity column absent entirely: every row defaults to 1.
        assert!(orders.iter().all(|o| o.quantity == 1));
    }

    #[test]
    fn drops_rows_with_unparsable_timestamps() {
        let csv = "\
product_id,product_category_name,order_purchase_timestamp,price,payment_value,freight_value,product_weight_g
a1,toys,garbage,10.0,10.0,1.0,100.0
b2,toys,2023-01-02,20.0,20.0,1.0,100.0
";
        let path = temp_file("drop.csv", csv);
        let orders = load_file(&path).expect("load");

        assert_eq!(orders.len(), 1);
        assert_eq!(orders[0].product_id, "b2");
        // Bare dates parse as midnight.
        assert_eq!(
            orders[0].purchased_at,
            NaiveDate::from_ymd_opt(2023, 1, 2)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap()
        );
    }

    #[test]
    fn all_timestamps_unparsable_is_an_error() {
        let csv = "\
product_id,product_category_name,order_purchase_timestamp,price,payment_value,freight_value,product_weight_g
a1,toys,garbage,10.0,10.0,1.0,100.0
";
        let path = temp_file("all-bad.csv", csv);
        assert!(matches!(load_file(&path), Err(LoadError::BadRecord { .. })));
    }

    #[test]
    fn missing_required_column_is_an_error() {
        let csv = "\
product_id,order_purchase_timestamp,price,payment_value,freight_value,product_weight_g
a1,2023-01-01 10:00:00,10.0,10.0,1.0,100.0
";
        let path = temp_file("missing-col.csv", csv);
        match load_file(&path) {
            Err(LoadError::MissingColumn { column, .. }) => {
                assert_eq!(column, "product_category_name");
            }
            other => panic!("expected MissingColumn, got {other:?}"),
        }
    }

    #[test]
    fn unsupported_extension_is_rejected() {
        let path = temp_file("orders.xlsx", "not really a spreadsheet");
        assert!(matches!(
            load_file(&path),
            Err(LoadError::UnsupportedExtension(ext)) if ext == "xlsx"
        ));
    }

    #[test]
    fn loads_records_oriented_json() {
        let json = r#"[
            {"product_id": "a1", "product_category_name": "toys",
             "order_purchase_timestamp": "2023-01-01 10:00:00",
             "price": 10.5, "payment_value": 10.5,
             "freight_value": 2.0, "product_weight_g": 100.0, "quantity": 3},
            {"product_id": "b2", "product_category_name": null,
             "order_purchase_timestamp": "2023-01-02",
             "price": "20.5", "payment_value": 18.0,
             "freight_value": 2.0, "product_weight_g": 100.0}
        ]"#;
        let path = temp_file("orders.json", json);
        let orders = load_file(&path).expect("load");

        assert_eq!(orders.len(), 2);
        assert_eq!(orders[0].quantity, 3);
        assert_eq!(orders[1].category, UNKNOWN_CATEGORY);
        // Numeric strings coerce like the CSV path.
        assert_eq!(orders[1].price, 20.5);
        assert_eq!(orders[1].quantity, 1);
    }

    #[test]
    fn concatenation_is_order_independent() {
        let a = temp_file("concat-a.csv", FULL_CSV);
        let b = temp_file(
            "concat-b.csv",
            "\
product_id,product_category_name,order_purchase_timestamp,price,payment_value,freight_value,product_weight_g,quantity
c3,games,2023-03-01 08:00:00,75.0,70.0,7.0,300.0,1
",
        );

        let ab = load_files(&[a.clone(), b.clone()]).expect("load ab");
        let ba = load_files(&[b, a]).expect("load ba");

        let key = |o: &Order| (o.product_id.clone(), o.purchased_at, o.price.to_bits());
        let mut ab_keys: Vec<_> = ab.orders.iter().map(key).collect();
        let mut ba_keys: Vec<_> = ba.orders.iter().map(key).collect();
        ab_keys.sort();
        ba_keys.sort();
        assert_eq!(ab_keys, ba_keys);
        assert_eq!(ab.categories, ba.categories);
    }

    #[test]
    fn empty_path_list_is_an_error() {
        assert!(matches!(load_files(&[]), Err(LoadError::NoInputs)));
    }

    #[test]
    fn loads_parquet_with_string_timestamps() {
        use arrow::array::UInt32Array;
        use arrow::datatypes::{Field, Schema};
        use arrow::record_batch::RecordBatch;
        use parquet::arrow::ArrowWriter;
        use std::sync::Arc;

        let schema = Arc::new(Schema::new(vec![
            Field::new("product_id", DataType::Utf8, false),
            Field::new("product_category_name", DataType::Utf8, true),
            Field::new("order_purchase_timestamp", DataType::Utf8, false),
            Field::new("price", DataType::Float64, false),
            Field::new("payment_value", DataType::Float64, false),
            Field::new("freight_value", DataType::Float64, false),
            Field::new("product_weight_g", DataType::Float64, false),
            Field::new("quantity", DataType::UInt32, false),
        ]));
        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![
                Arc::new(StringArray::from(vec!["a1", "b2"])),
                Arc::new(StringArray::from(vec![Some("toys"), None])),
                Arc::new(StringArray::from(vec![
                    "2023-01-01 10:00:00",
                    "2023-01-02 11:00:00",
                ])),
                Arc::new(Float64Array::from(vec![10.0, 20.0])),
                Arc::new(Float64Array::from(vec![9.0, 20.0])),
                Arc::new(Float64Array::from(vec![1.0, 2.0])),
                Arc::new(Float64Array::from(vec![100.0, 200.0])),
                Arc::new(UInt32Array::from(vec![1, 2])),
            ],
        )
        .expect("record batch");

        let path = std::env::temp_dir().join(format!(
            "shopsight-loader-{}-orders.parquet",
            std::process::id()
        ));
        let file = std::fs::File::create(&path).expect("create parquet");
        let mut writer = ArrowWriter::try_new(file, schema, None).expect("writer");
        writer.write(&batch).expect("write batch");
        writer.close().expect("close writer");

        let orders = load_file(&path).expect("load parquet");
        assert_eq!(orders.len(), 2);
        assert_eq!(orders[0].category, "toys");
        assert_eq!(orders[1].category, UNKNOWN_CATEGORY);
        assert_eq!(orders[1].quantity, 2);
    }
}
