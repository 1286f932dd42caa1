//! Upload naming rules.
//!
//! Uploaded files are stored under a generated name of the form
//! `<unix_millis>-<uuid_v4><.ext>` so user-supplied names never reach the
//! filesystem. The original name is kept only in the database.

use uuid::Uuid;

/// Public URL prefix under which stored uploads are served.
pub const UPLOADS_URL_PREFIX: &str = "/uploads";

/// Longest extension (without the dot) carried over to the stored name.
const MAX_EXTENSION_LEN: usize = 16;

/// Lowercased extension of `file_name`, if it has a usable one.
///
/// Only ASCII alphanumeric extensions are kept; anything else is dropped.
pub fn safe_extension(file_name: &str) -> Option<String> {
    let base = file_name.rsplit(['/', '\\']).next().unwrap_or(file_name);
    let (stem, ext) = base.rsplit_once('.')?;
    if stem.is_empty()
        || ext.is_empty()
        || ext.len() > MAX_EXTENSION_LEN
        || !ext.chars().all(|c| c.is_ascii_alphanumeric())
    {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}

/// Generate the stored file name for an upload called `original_name`.
pub fn generate_stored_name(original_name: &str) -> String {
    let millis = chrono::Utc::now().timestamp_millis();
    match safe_extension(original_name) {
        Some(ext) => format!("{millis}-{}.{ext}", Uuid::new_v4()),
        None => format!("{millis}-{}", Uuid::new_v4()),
    }
}

/// Public URL for a stored file name.
pub fn public_url(stored_name: &str) -> String {
    format!("{UPLOADS_URL_PREFIX}/{stored_name}")
}

/// Whether a declared content type is an image.
pub fn is_image_content_type(content_type: Option<&str>) -> bool {
    content_type.is_some_and(|ct| ct.trim().to_ascii_lowercase().starts_with("image/"))
}
