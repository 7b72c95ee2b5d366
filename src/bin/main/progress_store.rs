use std::{
    fs, io,
    path::{Path, PathBuf},
};

use log::warn;
use pacer_core::settings::{ProgressStore, ResumeState};

const RECORD_EXTENSION: &str = "progress";

/// One small text file per document under a progress directory.
pub(super) struct FileProgressStore {
    dir: PathBuf,
}

impl FileProgressStore {
    pub(super) fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, document_key: &str) -> PathBuf {
        self.dir
            .join(format!("{}.{}", sanitize_key(document_key), RECORD_EXTENSION))
    }
}

impl ProgressStore for FileProgressStore {
    type Error = io::Error;

    fn load(&mut self, document_key: &str) -> Result<Option<ResumeState>, Self::Error> {
        let path = self.path_for(document_key);
        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err),
        };

        let record = parse_record(&text);
        if record.is_none() {
            warn!("progress: ignoring malformed record {}", path.display());
        }
        Ok(record)
    }

    fn save(&mut self, document_key: &str, state: &ResumeState) -> Result<(), Self::Error> {
        fs::create_dir_all(&self.dir)?;
        fs::write(
            self.path_for(document_key),
            format!("{} {}\n", state.position, state.total),
        )
    }
}

/// Identity of a document for progress records: its file name.
pub(super) fn document_key(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}

fn sanitize_key(key: &str) -> String {
    let sanitized: String = key
        .chars()
        .map(|ch| {
            if ch.is_alphanumeric() || matches!(ch, '-' | '_' | '.') {
                ch
            } else {
                '_'
            }
        })
        .collect();
    if sanitized.is_empty() {
        "_".to_owned()
    } else {
        sanitized
    }
}

fn parse_record(text: &str) -> Option<ResumeState> {
    let mut fields = text.split_whitespace();
    let position = fields.next()?.parse().ok()?;
    let total = fields.next()?.parse().ok()?;
    if fields.next().is_some() {
        return None;
    }
    Some(ResumeState::new(position, total))
}
