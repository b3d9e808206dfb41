use std::fmt::Display;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::Utc;
use futures_util::{Stream, StreamExt};
use tokio::fs::{self, File, OpenOptions};
use tokio::io::AsyncWriteExt;

use crate::common::UploadError;

pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png"];
pub const IMAGE_MIME_TYPES: &[&str] = &["image/jpeg", "image/jpg", "image/png"];
pub const VIDEO_EXTENSIONS: &[&str] = &["mp4", "webm", "ogg", "ogv"];
pub const VIDEO_MIME_TYPES: &[&str] = &["video/mp4", "video/webm", "video/ogg"];

const URL_PREFIX: &str = "/uploads";
const MAX_NAME_ATTEMPTS: i64 = 16;

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum UploadKind {
    Image,
    Video,
}

impl UploadKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Image => "Image",
            Self::Video => "Video",
        }
    }
}

/// Sub-directory of the uploads root a file lands in.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct UploadCategory(String);

impl UploadCategory {
    pub fn news_images() -> Self {
        Self("news".into())
    }

    pub fn news_videos() -> Self {
        Self("videos".into())
    }

    pub fn product_images() -> Self {
        Self("products".into())
    }

    /// `images/<target>` for the batch image uploader.
    pub fn batch_images(target: &str) -> Result<Self, UploadError> {
        Ok(Self(format!("images/{}", validate_target(target)?)))
    }

    /// `videos/<target>` for the batch video uploader.
    pub fn batch_videos(target: &str) -> Result<Self, UploadError> {
        Ok(Self(format!("videos/{}", validate_target(target)?)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, Copy)]
pub struct UploadLimits {
    pub image_max_bytes: u64,
    pub video_max_bytes: u64,
}

impl UploadLimits {
    fn for_kind(&self, kind: UploadKind) -> u64 {
        match kind {
            UploadKind::Image => self.image_max_bytes,
            UploadKind::Video => self.video_max_bytes,
        }
    }
}

/// A completed upload: where it lives on disk and the URL handed back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredFile {
    pub path: PathBuf,
    pub url: String,
    pub size: u64,
}

/// Writes uploaded media under a root directory.
#[derive(Debug, Clone)]
pub struct UploadStore {
    root: PathBuf,
    limits: UploadLimits,
}

impl UploadStore {
    pub fn new(root: impl Into<PathBuf>, limits: UploadLimits) -> Self {
        Self {
            root: root.into(),
            limits,
        }
    }

    /// Validates, then streams `body` to disk.
    ///
    /// The write stops as soon as the running size passes the ceiling for
    /// `kind`. On any failure the partial file is removed, so callers only
    /// ever see complete files.
    pub async fn store<S, B, E>(
        &self,
        category: &UploadCategory,
        kind: UploadKind,
        filename: &str,
        mime: Option<&str>,
        body: S,
    ) -> Result<StoredFile, UploadError>
    where
        S: Stream<Item = Result<B, E>>,
        B: AsRef<[u8]>,
        E: Display,
    {
        match kind {
            UploadKind::Image => validate_image(filename, mime)?,
            UploadKind::Video => validate_video(filename, mime)?,
        }

        let dir = self.root.join(category.as_str());
        fs::create_dir_all(&dir).await?;

        let (file, stored_name, path) = create_unique(&dir, &sanitize_filename(filename)).await?;

        match write_body(file, body, kind, self.limits.for_kind(kind)).await {
            Ok(size) => {
                log::info!("Stored {} upload {} ({} bytes)", kind.as_str(), path.display(), size);

                Ok(StoredFile {
                    url: format!("{}/{}/{}", URL_PREFIX, category.as_str(), stored_name),
                    path,
                    size,
                })
            }
            Err(e) => {
                if let Err(rm) = fs::remove_file(&path).await {
                    log::warn!("Could not remove partial upload {}: {}", path.display(), rm);
                }
                log::warn!("Rejected {} upload '{}': {}", kind.as_str(), filename, e);
                Err(e)
            }
        }
    }

    /// Deletes files stored for a request that did not go through.
    pub async fn discard(&self, files: &[StoredFile]) {
        for file in files {
            match fs::remove_file(&file.path).await {
                Ok(()) => log::info!("Discarded orphaned upload {}", file.path.display()),
                Err(e) if e.kind() == ErrorKind::NotFound => {}
                Err(e) => log::warn!("Could not discard upload {}: {}", file.path.display(), e),
            }
        }
    }
}

async fn create_unique(
    dir: &Path,
    sanitized: &str,
) -> Result<(File, String, PathBuf), UploadError> {
    let stamp = Utc::now().timestamp_millis();

    for bump in 0..MAX_NAME_ATTEMPTS {
        let name = format!("{}-{}", stamp + bump, sanitized);
        let path = dir.join(&name);

        match OpenOptions::new().write(true).create_new(true).open(&path).await {
            Ok(file) => return Ok((file, name, path)),
            Err(e) if e.kind() == ErrorKind::AlreadyExists => continue,
            Err(e) => return Err(e.into()),
        }
    }

    Err(UploadError::Io(std::io::Error::new(
        ErrorKind::AlreadyExists,
        format!("no free name for '{}'", sanitized),
    )))
}

async fn write_body<S, B, E>(
    mut file: File,
    body: S,
    kind: UploadKind,
    max_bytes: u64,
) -> Result<u64, UploadError>
where
    S: Stream<Item = Result<B, E>>,
    B: AsRef<[u8]>,
    E: Display,
{
    let mut body = std::pin::pin!(body);
    let mut written: u64 = 0;

    while let Some(chunk) = body.next().await {
        let chunk = chunk.map_err(|e| UploadError::Stream(e.to_string()))?;
        let bytes = chunk.as_ref();

        written += bytes.len() as u64;
        if written > max_bytes {
            return Err(UploadError::TooLarge {
                kind: kind.as_str(),
                limit_bytes: max_bytes,
            });
        }

        file.write_all(bytes).await?;
    }

    file.flush().await?;
    Ok(written)
}

fn has_extension(filename: &str, allowed: &[&str]) -> bool {
    filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_lowercase())
        .is_some_and(|ext| allowed.contains(&ext.as_str()))
}

pub fn validate_image(filename: &str, mime: Option<&str>) -> Result<(), UploadError> {
    let ext_ok = has_extension(filename, IMAGE_EXTENSIONS);

    // Clients that cannot tell send octet-stream; the extension decides then.
    let mime_ok = match mime.map(str::to_lowercase).as_deref() {
        None | Some("application/octet-stream") => true,
        Some(mime) => IMAGE_MIME_TYPES.contains(&mime),
    };

    if ext_ok && mime_ok {
        Ok(())
    } else {
        Err(UploadError::DisallowedType(IMAGE_EXTENSIONS.join(", ")))
    }
}

/// Both the declared type and the extension must be video: `/uploads`
/// picks the served content type from the stored extension.
pub fn validate_video(filename: &str, mime: Option<&str>) -> Result<(), UploadError> {
    let mime_ok = mime
        .map(str::to_lowercase)
        .is_some_and(|mime| VIDEO_MIME_TYPES.contains(&mime.as_str()));

    if mime_ok && has_extension(filename, VIDEO_EXTENSIONS) {
        Ok(())
    } else {
        Err(UploadError::DisallowedType(VIDEO_EXTENSIONS.join(", ")))
    }
}

/// Batch upload targets become a directory name, so only one plain
/// segment is accepted.
pub fn validate_target(target: &str) -> Result<&str, UploadError> {
    let valid = !target.is_empty()
        && target.len() <= 64
        && target
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');

    if valid {
        Ok(target)
    } else {
        Err(UploadError::InvalidTarget(target.to_string()))
    }
}

/// Lower-cases, maps whitespace to `_`, drops anything outside
/// `[a-z0-9_-]` from the stem and keeps the lower-cased extension.
pub fn sanitize_filename(filename: &str) -> String {
    // Browsers on Windows may send a full path.
    let base = filename
        .rsplit(|c: char| c == '/' || c == '\\')
        .next()
        .unwrap_or(filename);

    let (stem, extension) = match base.rfind('.') {
        Some(idx) if idx > 0 => (&base[..idx], &base[idx..]),
        _ => (base, ""),
    };

    let mut name = String::with_capacity(stem.len());
    for c in stem.chars() {
        let c = if c.is_whitespace() { '_' } else { c };

        if !(c.is_ascii_alphanumeric() || c == '_' || c == '-') {
            continue;
        }

        if c == '_' && name.ends_with('_') {
            continue;
        }

        name.push(c.to_ascii_lowercase());
    }

    if name.is_empty() {
        name.push_str("file");
    }

    let extension: String = extension
        .chars()
        .filter(|c| *c == '.' || c.is_ascii_alphanumeric())
        .collect::<String>()
        .to_lowercase();

    if extension.len() > 1 {
        name.push_str(&extension);
    }

    name
}
