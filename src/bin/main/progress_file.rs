//! Sidecar-file persistence for the reading position. The format is a
//! single ASCII line, `page token_index`, next to the document itself.

use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;
use veloread_core::document::{DocumentId, DocumentMeta};
use veloread_core::progress::Checkpoint;
use veloread_core::source::ProgressStore;

pub struct FileProgressStore {
    path: PathBuf,
}

impl FileProgressStore {
    pub fn new(document_path: &Path) -> Self {
        let mut sidecar = document_path.as_os_str().to_os_string();
        sidecar.push(".progress");
        Self {
            path: PathBuf::from(sidecar),
        }
    }

    /// Read the stored position. Any read or parse failure falls back
    /// to the default (start of the document).
    pub fn load_meta(&self) -> DocumentMeta {
        let Ok(contents) = std::fs::read_to_string(&self.path) else {
            return DocumentMeta::default();
        };
        let meta = parse_meta(&contents).unwrap_or_default();
        debug!(
            "progress: loaded page={} token={}",
            meta.last_read_page, meta.last_token_index
        );
        meta
    }
}

impl ProgressStore for FileProgressStore {
    type Error = io::Error;

    fn persist(&mut self, _id: &DocumentId, checkpoint: Checkpoint) -> Result<(), Self::Error> {
        std::fs::write(
            &self.path,
            format!("{} {}\n", checkpoint.page, checkpoint.token_index),
        )
    }
}

fn parse_meta(contents: &str) -> Option<DocumentMeta> {
    let mut fields = contents.split_whitespace();
    let last_read_page = fields.next()?.parse().ok()?;
    let last_token_index = fields.next()?.parse().ok()?;
    Some(DocumentMeta {
        last_read_page,
        last_token_index,
    })
}
