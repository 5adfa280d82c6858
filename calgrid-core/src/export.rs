//! JSON and CSV export of the event store.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use chrono::{DateTime, Utc};

use crate::error::{CalGridError, CalGridResult};
use crate::event::date_key;
use crate::store::Buckets;

const CSV_HEADERS: [&str; 6] = ["Date", "Title", "Description", "Start Time", "End Time", "Color"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Csv,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Csv => "csv",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = CalGridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "json" => Ok(ExportFormat::Json),
            "csv" => Ok(ExportFormat::Csv),
            other => Err(CalGridError::InvalidFormat(other.to_string())),
        }
    }
}

/// A rendered export, ready to be written out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Export {
    pub format: ExportFormat,
    pub file_name: String,
    pub contents: String,
}

impl Export {
    pub fn render(buckets: &Buckets, format: ExportFormat, at: DateTime<Utc>) -> CalGridResult<Self> {
        let contents = match format {
            ExportFormat::Json => to_json(buckets)?,
            ExportFormat::Csv => to_csv(buckets),
        };

        Ok(Export {
            format,
            file_name: file_name(format, at),
            contents,
        })
    }

    /// Write the export into `dir` under its timestamped name.
    pub fn write_to(&self, dir: &Path) -> CalGridResult<PathBuf> {
        std::fs::create_dir_all(dir)?;
        let path = dir.join(&self.file_name);
        std::fs::write(&path, &self.contents)?;
        Ok(path)
    }
}

/// `calendar-events-<ISO8601>.<ext>`, with a millisecond UTC timestamp in
/// the basic form so the name carries no colons.
pub fn file_name(format: ExportFormat, at: DateTime<Utc>) -> String {
    format!(
        "calendar-events-{}.{}",
        at.format("%Y%m%dT%H%M%S%.3fZ"),
        format.extension()
    )
}

/// The full store as a 2-space indented JSON document.
pub fn to_json(buckets: &Buckets) -> CalGridResult<String> {
    Ok(serde_json::to_string_pretty(buckets)?)
}

/// Parse a store document, as persisted or exported as JSON.
///
/// Buckets are re-sorted by start time. An event dated differently from
/// the bucket holding it is rejected.
pub fn parse_json(document: &str) -> CalGridResult<Buckets> {
    let mut buckets: Buckets = serde_json::from_str(document)?;

    for (date, events) in buckets.iter_mut() {
        if let Some(stray) = events.iter().find(|e| e.date != *date) {
            return Err(CalGridError::Serialization(format!(
                "event '{}' is dated {} but stored under {}",
                stray.id,
                stray.date_key(),
                date_key(*date)
            )));
        }
        events.sort_by_key(|e| e.start_time);
    }

    Ok(buckets)
}

/// One row per event, every data field quoted. Embedded quotes are doubled.
pub fn to_csv(buckets: &Buckets) -> String {
    let mut lines = vec![CSV_HEADERS.join(",")];

    for (date, events) in buckets {
        for event in events {
            let row = [
                date_key(*date),
                event.title.clone(),
                event.description.clone().unwrap_or_default(),
                event.start_time.to_string(),
                event.end_time.to_string(),
                event.color.to_string(),
            ];
            lines.push(row.iter().map(|cell| quote(cell)).collect::<Vec<_>>().join(","));
        }
    }

    lines.join("\n")
}

fn quote(cell: &str) -> String {
    format!("\"{}\"", cell.replace('"', "\"\""))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::parse_date_key;
    use crate::event::tests::make_event;
    use crate::event::EventColor;
    use chrono::TimeZone;

    fn sample() -> Buckets {
        let mut standup = make_event("1", "2024-06-10", "09:00", "10:00");
        standup.title = "Standup".into();
        let mut review = make_event("2", "2024-06-11", "14:00", "15:30");
        review.title = "Review \"Q2\"".into();
        review.description = Some("bring notes, slides".into());
        review.color = EventColor::Personal;

        let mut buckets = Buckets::new();
        buckets.insert(standup.date, vec![standup]);
        buckets.insert(review.date, vec![review]);
        buckets
    }

    #[test]
    fn file_name_uses_iso_timestamp() {
        let at = Utc.with_ymd_and_hms(2024, 6, 10, 8, 5, 3).unwrap();
        assert_eq!(
            file_name(ExportFormat::Json, at),
            "calendar-events-20240610T080503.000Z.json"
        );
        assert_eq!(
            file_name(ExportFormat::Csv, at),
            "calendar-events-20240610T080503.000Z.csv"
        );
        assert!(!file_name(ExportFormat::Json, Utc::now()).contains(':'));
    }

    #[test]
    fn csv_has_header_and_quoted_rows() {
        let csv = to_csv(&sample());
        let lines: Vec<_> = csv.lines().collect();
        assert_eq!(
            lines,
            vec![
                "Date,Title,Description,Start Time,End Time,Color",
                r#""2024-06-10","Standup","","09:00","10:00","work""#,
                r#""2024-06-11","Review ""Q2""","bring notes, slides","14:00","15:30","personal""#,
            ]
        );
        assert!(!csv.ends_with('\n'));
    }

    #[test]
    fn csv_of_empty_store_is_just_the_header() {
        assert_eq!(to_csv(&Buckets::new()), "Date,Title,Description,Start Time,End Time,Color");
    }

    #[test]
    fn json_is_pretty_printed_with_two_spaces() {
        let json = to_json(&sample()).unwrap();
        assert!(json.starts_with("{\n  \"2024-06-10\": [\n    {\n      \"id\": \"1\""));
    }

    #[test]
    fn json_round_trips() {
        let buckets = sample();
        let parsed = parse_json(&to_json(&buckets).unwrap()).unwrap();
        assert_eq!(parsed, buckets);
    }

    #[test]
    fn parse_rejects_event_in_wrong_bucket() {
        let doc = r#"{"2024-06-10":[{"id":"1","title":"x","startTime":"09:00",
            "endTime":"10:00","date":"2024-06-11","color":"work"}]}"#;
        assert!(matches!(parse_json(doc), Err(CalGridError::Serialization(_))));
    }

    #[test]
    fn parse_sorts_buckets() {
        let doc = r#"{"2024-06-10":[
            {"id":"b","title":"b","startTime":"11:00","endTime":"12:00","date":"2024-06-10","color":"work"},
            {"id":"a","title":"a","startTime":"09:00","endTime":"10:00","date":"2024-06-10","color":"work"}]}"#;
        let buckets = parse_json(doc).unwrap();
        let ids: Vec<_> = buckets[&parse_date_key("2024-06-10").unwrap()]
            .iter()
            .map(|e| e.id.as_str())
            .collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[test]
    fn export_writes_named_file() {
        let dir = tempfile::tempdir().unwrap();
        let at = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
        let export = Export::render(&sample(), ExportFormat::Csv, at).unwrap();
        let path = export.write_to(dir.path()).unwrap();

        assert_eq!(path.file_name().unwrap(), "calendar-events-20240102T030405.000Z.csv");
        assert_eq!(std::fs::read_to_string(path).unwrap(), export.contents);
    }

    #[test]
    fn format_parses_case_insensitively() {
        assert_eq!("JSON".parse::<ExportFormat>().unwrap(), ExportFormat::Json);
        assert_eq!("csv".parse::<ExportFormat>().unwrap(), ExportFormat::Csv);
        assert!(matches!(
            "xml".parse::<ExportFormat>(),
            Err(CalGridError::InvalidFormat(f)) if f == "xml"
        ));
    }
}
