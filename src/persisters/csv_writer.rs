use std::path::Path;

use csv::{QuoteStyle, Terminator, Writer, WriterBuilder};

use crate::{error::Result, model::letterboxd_entry::LetterboxdEntry};

pub struct CsvWriter {}

impl CsvWriter {
    pub fn save_entries_to_csv<P: AsRef<Path>>(entries: &[LetterboxdEntry], path: P) -> Result<()> {
        let mut wrt = Self::builder().from_path(path.as_ref())?;
        Self::write_entries(&mut wrt, entries)?;

        log::debug!(
            "Wrote {} entries to {}",
            entries.len(),
            path.as_ref().display()
        );
        Ok(())
    }

    #[cfg(test)]
    fn entries_to_string(entries: &[LetterboxdEntry]) -> Result<String> {
        let mut wrt = Self::builder().from_writer(vec![]);
        Self::write_entries(&mut wrt, entries)?;

        let bytes = wrt
            .into_inner()
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e.to_string()))?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    fn builder() -> WriterBuilder {
        let mut builder = WriterBuilder::new();
        builder
            .quote_style(QuoteStyle::Never)
            .terminator(Terminator::Any(b'\n'));
        builder
    }

    fn write_entries<W: std::io::Write>(
        wrt: &mut Writer<W>,
        entries: &[LetterboxdEntry],
    ) -> Result<()> {
        wrt.write_record(LetterboxdEntry::csv_titles())?;
        for entry in entries {
            if let Err(e) = wrt.write_record(entry.to_csvable_array()) {
                log::error!("Error when adding entry to CSV. Entry: {:?}", entry);
                return Err(e.into());
            }
        }
        wrt.flush()?;
        Ok(())
    }
}
