use calamine::{open_workbook, Data, Reader, Xlsx};
use std::collections::HashSet;
use std::path::Path;

use crate::domain::models::CatalogEntry;

const AUTHOR_COLUMNS: [&str; 5] = ["Author 1", "Author 2", "Author 3", "Author 4", "Author 5"];

#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    #[error("unsupported file format: {0} (use .csv or .xlsx)")]
    UnsupportedFormat(String),
    #[error("failed to read catalog: {0}")]
    Load(String),
    #[error("invalid item id: {0}")]
    InvalidId(String),
    #[error("no item with id {0}")]
    NotFound(i64),
}

/// The in-memory catalog: loaded once, read-only afterwards. All queries
/// are pure scans over the entry list in id order.
#[derive(Debug, Default)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
}

/// Column indices resolved from the header row. Shared between the csv
/// and xlsx paths so both formats honor the same column contract.
struct Columns {
    title: usize,
    subtitle: usize,
    authors: Vec<usize>,
    kind: usize,
    format: usize,
    topic: usize,
    publisher: usize,
    year: usize,
    free_download: Option<usize>,
}

impl Columns {
    fn resolve(headers: &[String]) -> Result<Self, StoreError> {
        let required = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim() == name)
                .ok_or_else(|| StoreError::Load(format!("missing column: {}", name)))
        };
        let authors = AUTHOR_COLUMNS
            .iter()
            .map(|&name| required(name))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Columns {
            title: required("Title")?,
            subtitle: required("Subtitle")?,
            authors,
            kind: required("Type")?,
            format: required("Format")?,
            topic: required("Topic")?,
            publisher: required("Publisher")?,
            year: required("Year")?,
            free_download: headers.iter().position(|h| h.trim() == "Free Download"),
        })
    }
}

impl Catalog {
    /// Loads a `.csv` or `.xlsx` catalog. Any other extension is
    /// `UnsupportedFormat`; read/parse failures are `Load`. The caller is
    /// expected to absorb errors into an empty catalog and check
    /// `is_empty` before proceeding.
    pub fn load(path: &Path) -> Result<Self, StoreError> {
        let ext = path
            .extension()
            .map(|e| e.to_string_lossy().to_ascii_lowercase())
            .unwrap_or_default();
        let rows = match ext.as_str() {
            "csv" => read_csv(path)?,
            "xlsx" => read_xlsx(path)?,
            _ => return Err(StoreError::UnsupportedFormat(path.display().to_string())),
        };

        let mut iter = rows.into_iter();
        let headers = iter
            .next()
            .ok_or_else(|| StoreError::Load("catalog has no header row".to_string()))?
            .into_iter()
            .map(|c| c.unwrap_or_default())
            .collect::<Vec<_>>();
        let columns = Columns::resolve(&headers)?;

        let entries: Vec<CatalogEntry> = iter
            .enumerate()
            .map(|(i, row)| entry_from_row(&columns, &row, i as u32 + 1))
            .collect();
        tracing::debug!(rows = entries.len(), source = %path.display(), "catalog loaded");
        Ok(Catalog { entries })
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// All entries in id order, or only those whose type contains the
    /// filter substring (ASCII case-insensitive, unanchored). An empty
    /// result is a valid outcome, not an error.
    pub fn list<'a>(&'a self, filter: Option<&str>) -> impl Iterator<Item = &'a CatalogEntry> {
        let filter = filter.map(|f| f.to_ascii_lowercase());
        self.entries.iter().filter(move |e| match &filter {
            None => true,
            Some(f) => e.kind.to_ascii_lowercase().contains(f.as_str()),
        })
    }

    /// Case-insensitive substring match OR-ed over title, authors, topic
    /// and subtitle, in id order. An absent subtitle never matches.
    pub fn search<'a>(&'a self, query: &str) -> impl Iterator<Item = &'a CatalogEntry> {
        let q = query.to_ascii_lowercase();
        self.entries.iter().filter(move |e| {
            contains_ci(&e.title, &q)
                || contains_ci(&e.authors, &q)
                || contains_ci(&e.topic, &q)
                || e.subtitle
                    .as_deref()
                    .map(|s| contains_ci(s, &q))
                    .unwrap_or(false)
        })
    }

    /// Looks up one entry by its raw (user-typed) id. Returns the entry
    /// plus the "has a free download" display signal.
    pub fn get(&self, raw_id: &str) -> Result<(&CatalogEntry, bool), StoreError> {
        let id: i64 = raw_id
            .trim()
            .parse()
            .map_err(|_| StoreError::InvalidId(raw_id.trim().to_string()))?;
        let entry = self
            .entries
            .iter()
            .find(|e| i64::from(e.id) == id)
            .ok_or(StoreError::NotFound(id))?;
        Ok((entry, entry.is_free_download()))
    }

    /// Unique type values in first-seen order.
    pub fn types(&self) -> Vec<&str> {
        distinct(self.entries.iter().map(|e| e.kind.as_str()))
    }

    /// Unique topic values in first-seen order.
    pub fn topics(&self) -> Vec<&str> {
        distinct(self.entries.iter().map(|e| e.topic.as_str()))
    }
}

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<&'a str> {
    let mut seen = HashSet::new();
    values.filter(|v| seen.insert(*v)).collect()
}

fn contains_ci(haystack: &str, needle_lower: &str) -> bool {
    haystack.to_ascii_lowercase().contains(needle_lower)
}

/// Raw cell grid: `None` for missing/blank cells, trimmed strings otherwise.
type RawRows = Vec<Vec<Option<String>>>;

fn read_csv(path: &Path) -> Result<RawRows, StoreError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .from_path(path)
        .map_err(|e| StoreError::Load(e.to_string()))?;
    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| StoreError::Load(e.to_string()))?;
        rows.push(record.iter().map(clean_cell).collect());
    }
    Ok(rows)
}

fn read_xlsx(path: &Path) -> Result<RawRows, StoreError> {
    let mut workbook: Xlsx<_> =
        open_workbook(path).map_err(|e: calamine::XlsxError| StoreError::Load(e.to_string()))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| StoreError::Load("workbook has no sheets".to_string()))?
        .map_err(|e| StoreError::Load(e.to_string()))?;
    Ok(range
        .rows()
        .map(|row| row.iter().map(cell_to_string).collect())
        .collect())
}

fn clean_cell(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn cell_to_string(cell: &Data) -> Option<String> {
    match cell {
        Data::Empty | Data::Error(_) => None,
        Data::String(s) => clean_cell(s),
        // Excel stores years as floats; keep integral values whole.
        Data::Float(f) if f.fract() == 0.0 => Some(format!("{}", *f as i64)),
        other => clean_cell(&other.to_string()),
    }
}

fn entry_from_row(columns: &Columns, cells: &[Option<String>], id: u32) -> CatalogEntry {
    let cell = |idx: usize| cells.get(idx).and_then(|c| c.as_deref());
    let text = |idx: usize| cell(idx).unwrap_or_default().to_string();
    let authors: Vec<Option<String>> = columns
        .authors
        .iter()
        .map(|&idx| cell(idx).map(str::to_string))
        .collect();
    CatalogEntry {
        id,
        title: text(columns.title),
        subtitle: cell(columns.subtitle).map(str::to_string),
        authors: collapse_authors(&authors),
        kind: text(columns.kind),
        format: text(columns.format),
        topic: text(columns.topic),
        publisher: text(columns.publisher),
        year: normalize_year(cell(columns.year)),
        free_download: columns.free_download.and_then(|idx| parse_flag(cell(idx))),
    }
}

/// Joins non-empty, non-"n/a" author values with ", "; falls back to
/// "Unknown" when nothing survives. The result is never empty.
fn collapse_authors(raw: &[Option<String>]) -> String {
    let names: Vec<&str> = raw
        .iter()
        .filter_map(|a| a.as_deref())
        .map(str::trim)
        .filter(|a| !a.is_empty() && !a.eq_ignore_ascii_case("n/a"))
        .collect();
    if names.is_empty() {
        "Unknown".to_string()
    } else {
        names.join(", ")
    }
}

/// Missing years render "Unknown"; an exact trailing ".0" (as produced by
/// float-typed spreadsheet cells) is stripped. Anything else passes
/// through unchanged.
fn normalize_year(raw: Option<&str>) -> String {
    match raw {
        None => "Unknown".to_string(),
        Some(y) => y.strip_suffix(".0").unwrap_or(y).to_string(),
    }
}

/// Canonical free-download rule: case-insensitive "yes" or "true" in every
/// view. Blank cells carry no flag at all.
fn parse_flag(raw: Option<&str>) -> Option<bool> {
    raw.map(|v| v.eq_ignore_ascii_case("yes") || v.eq_ignore_ascii_case("true"))
}
