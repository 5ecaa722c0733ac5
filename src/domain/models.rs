use serde::Serialize;

#[derive(Serialize)]
pub struct JsonOut<T: Serialize> {
    pub ok: bool,
    pub data: T,
}

/// One normalized catalog row. Immutable after load; `id` is 1-based and
/// contiguous for the lifetime of one loaded catalog.
#[derive(Debug, Clone, Serialize)]
pub struct CatalogEntry {
    pub id: u32,
    pub title: String,
    pub subtitle: Option<String>,
    /// Collapsed author display string; never empty ("Unknown" fallback).
    pub authors: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub format: String,
    pub topic: String,
    pub publisher: String,
    /// Display string: "Unknown" when missing, trailing ".0" stripped.
    pub year: String,
    /// None when the source has no Free Download column or a blank cell.
    pub free_download: Option<bool>,
}

impl CatalogEntry {
    pub fn is_free_download(&self) -> bool {
        self.free_download == Some(true)
    }
}
