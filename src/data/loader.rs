use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver};
use std::thread;

use serde_json::Value as JsonValue;
use thiserror::Error;

use super::model::{QuestionSet, Record};

/// Default location of the question bank, relative to the working directory.
pub const DEFAULT_DATA_PATH: &str = "data/master_prelims.csv";

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Everything that can go wrong while ingesting a question bank.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("reading {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parsing CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("parsing JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("expected a top-level JSON array of records")]
    NotAnArray,

    #[error("row {row} is not a JSON object")]
    RowNotObject { row: usize },

    #[error("unsupported file extension: .{0}")]
    UnsupportedFormat(String),
}

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load a question bank, never failing.
///
/// Any ingestion error is logged and collapsed into an empty set so the
/// caller can always render something.
pub fn load(path: &Path) -> QuestionSet {
    try_load(path).unwrap_or_else(|e| {
        log::error!("Failed to load {}: {e}", path.display());
        QuestionSet::default()
    })
}

/// Load a question bank from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`  – header row followed by one question per record (default)
/// * `.json` – `[{ "year": "2021", "question_text": "...", ... }, ...]`
pub fn try_load(path: &Path) -> Result<QuestionSet, LoadError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("csv")
        .to_ascii_lowercase();

    // Always consume the whole resource before parsing.
    let read = || {
        std::fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })
    };

    let set = match ext.as_str() {
        "csv" | "txt" => parse_csv(&read()?)?,
        "json" => parse_json(&read()?)?,
        other => return Err(LoadError::UnsupportedFormat(other.to_string())),
    };

    log::info!(
        "Loaded {} questions from {} (columns {:?})",
        set.len(),
        path.display(),
        set.column_names
    );
    Ok(set)
}

/// Run [`try_load`] on a background thread.
///
/// The result arrives on the returned channel; `on_done` is invoked right
/// after sending so a UI can schedule a repaint.
pub fn spawn_load<F>(path: PathBuf, on_done: F) -> Receiver<Result<QuestionSet, LoadError>>
where
    F: FnOnce() + Send + 'static,
{
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        log::debug!("Loading {} in background", path.display());
        // Receiver may already be gone if a newer load replaced it.
        let _ = tx.send(try_load(&path));
        on_done();
    });
    rx
}

// ---------------------------------------------------------------------------
// CSV parser
// ---------------------------------------------------------------------------

/// CSV layout: header row with column names, then one question per record.
///
/// Quoted cells may span lines and contain commas. Short rows are padded
/// with empty cells; cells beyond the header are dropped. Blank lines are
/// skipped, but a line of bare delimiters (`,,`) is a row of empty cells.
pub fn parse_csv(text: &str) -> Result<QuestionSet, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = reader.headers()?.iter().map(|h| h.to_string()).collect();

    let mut records = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let row = result?;

        // Empty lines never reach us; a whitespace-only line arrives as one cell.
        if row.len() == 1 && row.get(0).is_some_and(|c| c.trim().is_empty()) {
            continue;
        }
        if row.len() > headers.len() {
            log::debug!(
                "CSV row {row_no}: {} cells but only {} headers, extra cells dropped",
                row.len(),
                headers.len()
            );
        }

        let record: Record = headers
            .iter()
            .enumerate()
            .map(|(i, h)| (h.as_str(), row.get(i).unwrap_or("")))
            .collect();
        records.push(record);
    }

    Ok(QuestionSet::new(headers, records))
}

// ---------------------------------------------------------------------------
// JSON parser
// ---------------------------------------------------------------------------

/// Records-oriented JSON: an array of flat objects.  Columns are listed in
/// the order rows introduce them; keys within one object come back sorted.
pub fn parse_json(text: &str) -> Result<QuestionSet, LoadError> {
    let root: JsonValue = serde_json::from_str(text)?;
    let rows = root.as_array().ok_or(LoadError::NotAnArray)?;

    let mut column_names: Vec<String> = Vec::new();
    let mut records: Vec<Record> = Vec::with_capacity(rows.len());

    for (i, row) in rows.iter().enumerate() {
        let obj = row.as_object().ok_or(LoadError::RowNotObject { row: i })?;

        for key in obj.keys() {
            if !column_names.iter().any(|c| c == key) {
                column_names.push(key.clone());
            }
        }
        records.push(obj.iter().map(|(k, v)| (k.as_str(), json_to_cell(v))).collect());
    }

    // Same header contract as CSV: every record carries every column.
    for record in &mut records {
        for col in &column_names {
            if record.get(col).is_none() {
                record.insert(col.as_str(), "");
            }
        }
    }

    Ok(QuestionSet::new(column_names, records))
}

fn json_to_cell(val: &JsonValue) -> String {
    match val {
        JsonValue::String(s) => s.clone(),
        JsonValue::Null => String::new(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const HEADER: &str =
        "year,question_number,question_text,question_category,sub_category,source\n";

    #[test]
    fn parses_header_keyed_records() {
        let text = format!("{HEADER}2021,1,Capital of France,Geo,Europe,UPSC\n");
        let set = parse_csv(&text).unwrap();
        assert_eq!(set.len(), 1);
        assert_eq!(set.column_names.len(), 6);
        let r = &set.records[0];
        assert_eq!(r.year(), Some("2021"));
        assert_eq!(r.question_text(), Some("Capital of France"));
        assert_eq!(r.source(), Some("UPSC"));
    }

    #[test]
    fn quoted_cells_keep_commas_newlines_and_quotes() {
        let text = format!(
            "{HEADER}2022,5,\"Consider:\n1. rivers, lakes\n2. \"\"wetlands\"\"\",Env,,UPSC\n"
        );
        let set = parse_csv(&text).unwrap();
        assert_eq!(set.len(), 1);
        assert_eq!(
            set.records[0].question_text(),
            Some("Consider:\n1. rivers, lakes\n2. \"wetlands\"")
        );
        assert_eq!(set.records[0].sub_category(), Some(""));
    }

    #[test]
    fn short_rows_are_padded_with_empty_strings() {
        let text = format!("{HEADER}2020,3,Short row\n");
        let set = parse_csv(&text).unwrap();
        let r = &set.records[0];
        assert_eq!(r.question_text(), Some("Short row"));
        assert_eq!(r.question_category(), Some(""));
        assert_eq!(r.source(), Some(""));
    }

    #[test]
    fn blank_lines_are_skipped() {
        let text = format!("{HEADER}\n2020,1,A,X,,S\n\n   \n2021,2,B,Y,,S\n\n");
        let set = parse_csv(&text).unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(set.records[1].question_number(), Some("2"));
    }

    #[test]
    fn delimiter_only_line_is_a_row_of_empty_cells() {
        let set = parse_csv("year,question_number,question_text\n2021,1,A\n,,\n2022,2,B\n").unwrap();
        assert_eq!(set.len(), 3);
        let empty = &set.records[1];
        assert_eq!(empty.year(), Some(""));
        assert_eq!(empty.question_number(), Some(""));
        assert_eq!(empty.question_text(), Some(""));
        assert_eq!(set.records[2].question_number(), Some("2"));
    }

    #[test]
    fn extra_cells_are_dropped() {
        let text = "year,question_number\n2020,1,surplus\n";
        let set = parse_csv(text).unwrap();
        assert_eq!(set.records[0].iter().count(), 2);
    }

    #[test]
    fn header_only_yields_empty_set() {
        let set = parse_csv(HEADER).unwrap();
        assert!(set.is_empty());
        assert_eq!(set.column_names[0], "year");
    }

    #[test]
    fn json_values_are_stringified_and_padded() {
        let text = r#"[
            {"year": "2021", "question_number": 4, "question_text": null},
            {"year": 2022, "source": "Mock", "flag": true}
        ]"#;
        let set = parse_json(text).unwrap();
        assert_eq!(
            set.column_names,
            vec!["question_number", "question_text", "year", "flag", "source"]
        );
        assert_eq!(set.records[0].question_number(), Some("4"));
        assert_eq!(set.records[0].question_text(), Some(""));
        assert_eq!(set.records[0].source(), Some(""));
        assert_eq!(set.records[1].year(), Some("2022"));
        assert_eq!(set.records[1].get("flag"), Some("true"));
    }

    #[test]
    fn json_must_be_array_of_objects() {
        assert!(matches!(parse_json("{}"), Err(LoadError::NotAnArray)));
        assert!(matches!(
            parse_json("[{}, 3]"),
            Err(LoadError::RowNotObject { row: 1 })
        ));
        assert!(matches!(parse_json("[oops"), Err(LoadError::Json(_))));
    }

    #[test]
    fn unsupported_extension_is_rejected() {
        let err = try_load(Path::new("questions.xlsx")).unwrap_err();
        assert!(matches!(err, LoadError::UnsupportedFormat(ref e) if e == "xlsx"));
    }

    #[test]
    fn missing_file_fails_open() {
        let set = load(Path::new("/definitely/not/here/master_prelims.csv"));
        assert!(set.is_empty());
        assert!(set.column_names.is_empty());
    }

    #[test]
    fn invalid_utf8_fails_open() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.csv");
        std::fs::write(&path, b"year,question_text\n2020,\xff\xfe\n").unwrap();
        assert!(matches!(try_load(&path), Err(LoadError::Io { .. })));
        assert!(load(&path).is_empty());
    }

    #[test]
    fn spawn_load_delivers_result_and_notifies() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bank.csv");
        std::fs::write(&path, format!("{HEADER}2021,1,Q,Geo,,S\n")).unwrap();

        let (done_tx, done_rx) = mpsc::channel();
        let rx = spawn_load(path, move || {
            let _ = done_tx.send(());
        });
        let set = rx.recv().unwrap().unwrap();
        done_rx.recv().unwrap();
        assert_eq!(set.len(), 1);
    }
}
