//! Per-city CSV table of extracted records
//!
//! Each city owns one file, `{data_dir}/zomato_{city}_names.csv`, replaced
//! wholesale on every write. Writes go through a temp file in the same
//! directory and a rename, so a concurrent reader sees either the old table
//! or the new one.

use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, info};

use super::csv_codec::{parse_rows, write_row};
use crate::page_extractor::ExtractedRecord;
use crate::scrape_engine::{ScrapeError, ScrapeResult};
use crate::utils::{CSV_COLUMNS, is_valid_city_slug};

/// Reads and writes the per-city record tables under one directory
#[derive(Debug, Clone)]
pub struct CsvStore {
    data_dir: PathBuf,
}

impl CsvStore {
    #[must_use]
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    #[must_use]
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// File backing `city`'s table. Rejects slugs unsafe for a file name.
    pub fn path_for(&self, city: &str) -> ScrapeResult<PathBuf> {
        if !is_valid_city_slug(city) {
            return Err(ScrapeError::InvalidRequest(format!(
                "invalid city slug '{city}'"
            )));
        }
        Ok(self.data_dir.join(format!("zomato_{city}_names.csv")))
    }

    /// Replace `city`'s table with `records`. Returns the file written.
    pub async fn write_rows(&self, city: &str, records: &[ExtractedRecord]) -> ScrapeResult<PathBuf> {
        let path = self.path_for(city)?;
        let data_dir = self.data_dir.clone();
        let records = records.to_vec();

        let target = path.clone();
        let count = records.len();
        tokio::task::spawn_blocking(move || write_table(&data_dir, &target, &records))
            .await
            .map_err(|e| ScrapeError::Other(format!("CSV write task failed: {e}")))??;

        info!("Saved {count} rows to {}", path.display());
        Ok(path)
    }

    /// `city`'s persisted records, or `None` when no table was ever written
    pub async fn read_rows(&self, city: &str) -> ScrapeResult<Option<Vec<ExtractedRecord>>> {
        let path = self.path_for(city)?;

        let text = match tokio::fs::read_to_string(&path).await {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("No table at {}", path.display());
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };

        decode_table(&text).map(Some).map_err(ScrapeError::from)
    }
}

fn write_table(data_dir: &Path, path: &Path, records: &[ExtractedRecord]) -> io::Result<()> {
    std::fs::create_dir_all(data_dir)?;

    let temp = NamedTempFile::new_in(data_dir)?;
    {
        let mut w = BufWriter::new(temp.as_file());
        encode_table(&mut w, records)?;
        w.flush()?;
    }
    temp.as_file().sync_all()?;
    temp.persist(path)?;
    Ok(())
}

/// Header row followed by one row per record; absent values are empty cells
pub fn encode_table<W: Write>(mut w: W, records: &[ExtractedRecord]) -> io::Result<()> {
    write_row(&mut w, &CSV_COLUMNS)?;
    for r in records {
        let opt = |v: &Option<String>| v.clone().unwrap_or_default();
        write_row(
            &mut w,
            &[
                r.city.clone(),
                r.page.to_string(),
                r.name.clone(),
                opt(&r.url),
                opt(&r.address),
                opt(&r.rating),
                opt(&r.review_count),
            ],
        )?;
    }
    Ok(())
}

/// Parse a table written by `encode_table`.
///
/// Empty cells read back as `None`. A header that does not match the fixed
/// column list, a short row or a non-numeric page is `InvalidData`.
pub fn decode_table(text: &str) -> io::Result<Vec<ExtractedRecord>> {
    let mut rows = parse_rows(text).into_iter();

    let Some(header) = rows.next() else {
        return Ok(Vec::new());
    };
    if header.iter().map(String::as_str).ne(CSV_COLUMNS.iter().copied()) {
        return Err(invalid_data(format!(
            "unexpected header: {}",
            header.join(",")
        )));
    }

    rows.enumerate()
        .map(|(i, row)| decode_row(row).map_err(|msg| invalid_data(format!("row {}: {msg}", i + 1))))
        .collect()
}

fn decode_row(row: Vec<String>) -> Result<ExtractedRecord, String> {
    let [city, page, name, url, address, rating, review_count]: [String; 7] = row
        .try_into()
        .map_err(|row: Vec<String>| format!("expected {} fields, got {}", CSV_COLUMNS.len(), row.len()))?;

    let page = page
        .parse::<u32>()
        .map_err(|e| format!("bad page number '{page}': {e}"))?;
    let opt = |v: String| (!v.is_empty()).then_some(v);

    Ok(ExtractedRecord {
        city,
        page,
        name,
        url: opt(url),
        address: opt(address),
        rating: opt(rating),
        review_count: opt(review_count),
    })
}

fn invalid_data(msg: String) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, msg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_only_table_is_empty() {
        let mut buf = Vec::new();
        encode_table(&mut buf, &[]).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text, "city,page,name,url,address,rating,reviewCount\n");
        assert_eq!(decode_table(&text).unwrap(), Vec::new());
    }

    #[test]
    fn rejects_foreign_header() {
        let err = decode_table("name,url\nA,/r/a\n").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }

    #[test]
    fn rejects_short_rows() {
        let text = "city,page,name,url,address,rating,reviewCount\nx,1,A\n";
        let err = decode_table(text).unwrap_err();
        assert!(err.to_string().contains("expected 7 fields"));
    }

    #[test]
    fn path_uses_city_slug() {
        let store = CsvStore::new("/tmp/data");
        assert_eq!(
            store.path_for("hyderabad").unwrap(),
            PathBuf::from("/tmp/data/zomato_hyderabad_names.csv")
        );
        assert!(store.path_for("../etc").is_err());
    }
}
