use std::path::Path;

use csv::{ReaderBuilder, StringRecord};

use crate::{
    error::{Error, Result},
    model::letterboxd_entry::LetterboxdEntry,
    persisters::csv_writer::CsvWriter,
};

pub const DEFAULT_INPUT_FILE: &str = "senscritique-movies.csv";

const TITLE_COLUMN: usize = 0;
const YEAR_COLUMN: usize = 1;
const SOURCE_RATING_COLUMN: usize = 2;
const LETTERBOXD_RATING_COLUMN: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConversionReport {
    pub records_read: usize,
    pub rows_written: usize,
}

/// Reformats a SensCritique export (`Title,Year,Rating,...,LetterboxdRating`)
/// into a Letterboxd import file.
pub fn convert_csv<P: AsRef<Path>, Q: AsRef<Path>>(input: P, output: Q) -> Result<ConversionReport> {
    let input = input.as_ref();
    if !input.exists() {
        return Err(Error::MissingInput(input.to_path_buf()));
    }

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(input)?;

    let mut records_read = 0;
    let mut entries = vec![];
    for (index, record) in reader.records().enumerate() {
        records_read += 1;
        let line = index + 1;
        match record {
            Ok(record) => {
                if let Some(entry) = entry_from_record(&record) {
                    entries.push(entry);
                }
            }
            Err(e) => log::warn!("Error parsing line {}: {}", line, e),
        }
    }

    log::info!("Original file: {} movies + header", records_read);

    CsvWriter::save_entries_to_csv(&entries, output)?;

    Ok(ConversionReport {
        records_read,
        rows_written: entries.len(),
    })
}

/// Rows without both a positive source rating and a positive Letterboxd
/// rating are dropped.
fn entry_from_record(record: &StringRecord) -> Option<LetterboxdEntry> {
    if record.len() <= LETTERBOXD_RATING_COLUMN {
        log::warn!(
            "Skipping line with {} fields: {}",
            record.len(),
            preview(record)
        );
        return None;
    }

    // Decimal source ratings keep their integer part.
    let source_rating = record[SOURCE_RATING_COLUMN]
        .parse::<f32>()
        .ok()
        .filter(|r| r.is_finite())
        .map(|r| r.trunc() as i32);
    let letterboxd_rating = record[LETTERBOXD_RATING_COLUMN].parse::<f32>().ok();

    match (source_rating, letterboxd_rating) {
        (Some(rating10), Some(rating)) if rating10 > 0 && rating > 0.0 => Some(LetterboxdEntry {
            title: record[TITLE_COLUMN].to_string(),
            year: record[YEAR_COLUMN].to_string(),
            rating,
            rating10,
        }),
        (None, _) | (_, None) => {
            log::warn!("Error parsing ratings on line: {}", preview(record));
            None
        }
        _ => None,
    }
}

fn preview(record: &StringRecord) -> String {
    let line = record.iter().collect::<Vec<_>>().join(",");
    let mut shortened: String = line.chars().take(50).collect();
    if shortened.len() < line.len() {
        shortened.push_str("...");
    }
    shortened
}
