use actix_multipart::{Field, Multipart};
use futures_util::StreamExt;
use serde::de::DeserializeOwned;

use crate::common::ContentError;
use crate::services::{StoredFile, UploadCategory, UploadKind, UploadStore};

/// Name of the part carrying the JSON record input.
pub const INPUT_FIELD: &str = "input";

const INPUT_MAX_BYTES: usize = 64 * 1024;

/// Which multipart part may carry which kind of file, and where it goes.
#[derive(Debug, Clone)]
pub struct FileRule {
    pub field: &'static str,
    pub kind: UploadKind,
    pub category: UploadCategory,
}

/// A create/update request: the JSON input plus any files already stored.
#[derive(Debug, Default)]
pub struct RecordForm {
    pub input: Option<String>,
    pub files: Vec<(&'static str, StoredFile)>,
}

impl RecordForm {
    pub fn file_url(&self, field: &str) -> Option<String> {
        self.files
            .iter()
            .find(|(name, _)| *name == field)
            .map(|(_, file)| file.url.clone())
    }

    pub fn parse_input<T: DeserializeOwned>(&self) -> Result<T, ContentError> {
        let raw = self.input.as_deref().ok_or_else(|| {
            ContentError::Validation(format!("Missing '{}' part", INPUT_FIELD))
        })?;

        serde_json::from_str(raw)
            .map_err(|e| ContentError::Validation(format!("Malformed '{}': {}", INPUT_FIELD, e)))
    }

    /// Removes the stored files after the record write was rejected.
    pub async fn discard(self, store: &UploadStore) {
        let files: Vec<StoredFile> = self.files.into_iter().map(|(_, f)| f).collect();
        store.discard(&files).await;
    }
}

/// Reads a record form, storing file parts as they stream in.
///
/// Files already stored are removed again if a later part fails.
pub async fn read_record_form(
    mut payload: Multipart,
    store: &UploadStore,
    rules: &[FileRule],
) -> Result<RecordForm, ContentError> {
    let mut form = RecordForm::default();

    match collect_parts(&mut payload, store, rules, &mut form).await {
        Ok(()) => Ok(form),
        Err(e) => {
            form.discard(store).await;
            Err(e)
        }
    }
}

async fn collect_parts(
    payload: &mut Multipart,
    store: &UploadStore,
    rules: &[FileRule],
    form: &mut RecordForm,
) -> Result<(), ContentError> {
    while let Some(item) = payload.next().await {
        let mut field = item.map_err(malformed)?;
        let name = field.name().unwrap_or_default().to_string();

        if name == INPUT_FIELD {
            form.input = Some(read_text(&mut field, INPUT_MAX_BYTES).await?);
            continue;
        }

        let Some(rule) = rules.iter().find(|rule| rule.field == name) else {
            drain(&mut field).await?;
            continue;
        };

        if form.files.iter().any(|(f, _)| *f == rule.field) {
            return Err(ContentError::Validation(format!(
                "Part '{}' sent more than once",
                rule.field
            )));
        }

        let (filename, mime) = file_meta(&field);
        let stored = store
            .store(&rule.category, rule.kind, &filename, mime.as_deref(), field)
            .await?;

        form.files.push((rule.field, stored));
    }

    Ok(())
}

/// Stores every `files` part of a batch upload, in order.
pub async fn read_batch_files(
    mut payload: Multipart,
    store: &UploadStore,
    category: &UploadCategory,
    kind: UploadKind,
) -> Result<Vec<StoredFile>, ContentError> {
    let mut stored = Vec::new();

    while let Some(item) = payload.next().await {
        let result = match item {
            Ok(field) => store_batch_part(field, store, category, kind).await,
            Err(e) => Err(malformed(e)),
        };

        match result {
            Ok(Some(file)) => stored.push(file),
            Ok(None) => {}
            Err(e) => {
                store.discard(&stored).await;
                return Err(e);
            }
        }
    }

    Ok(stored)
}

async fn store_batch_part(
    mut field: Field,
    store: &UploadStore,
    category: &UploadCategory,
    kind: UploadKind,
) -> Result<Option<StoredFile>, ContentError> {
    let name = field.name().unwrap_or_default();

    if name != "files" && name != "files[]" {
        drain(&mut field).await?;
        return Ok(None);
    }

    let (filename, mime) = file_meta(&field);
    let file = store
        .store(category, kind, &filename, mime.as_deref(), field)
        .await?;

    Ok(Some(file))
}

fn file_meta(field: &Field) -> (String, Option<String>) {
    let filename = field
        .content_disposition()
        .and_then(|cd| cd.get_filename())
        .unwrap_or_default()
        .to_string();

    let mime = field
        .content_type()
        .map(|mime| mime.essence_str().to_string());

    (filename, mime)
}

async fn read_text(field: &mut Field, limit: usize) -> Result<String, ContentError> {
    let mut buf = Vec::new();

    while let Some(chunk) = field.next().await {
        let chunk = chunk.map_err(malformed)?;

        if buf.len() + chunk.len() > limit {
            return Err(ContentError::Validation(format!(
                "Part '{}' exceeds {} bytes",
                INPUT_FIELD, limit
            )));
        }

        buf.extend_from_slice(&chunk);
    }

    String::from_utf8(buf)
        .map_err(|_| ContentError::Validation(format!("Part '{}' must be UTF-8", INPUT_FIELD)))
}

async fn drain(field: &mut Field) -> Result<(), ContentError> {
    while let Some(chunk) = field.next().await {
        chunk.map_err(malformed)?;
    }

    Ok(())
}

fn malformed(err: actix_multipart::MultipartError) -> ContentError {
    ContentError::Validation(format!("Malformed multipart body: {}", err))
}
