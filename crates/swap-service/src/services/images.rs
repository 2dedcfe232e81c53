//! Upload checks shared by avatar and offer-image handling

use swap_common::StorageConfig;
use swap_core::error::DomainError;

use crate::dto::ImageUpload;

/// Content types the marketplace accepts for image uploads
const ACCEPTED_TYPES: [&str; 4] = ["image/jpeg", "image/jpg", "image/png", "image/webp"];

/// Check an upload against the configured size cap and the accepted
/// content types. Runs before any byte reaches the blob store.
pub(crate) fn validate_image(
    upload: &ImageUpload,
    config: &StorageConfig,
) -> Result<(), DomainError> {
    let max_bytes = config.max_image_size_bytes();
    if upload.bytes.len() > max_bytes {
        return Err(DomainError::ImageTooLarge { max_bytes });
    }

    if !ACCEPTED_TYPES.contains(&upload.content_type.as_str()) {
        return Err(DomainError::UnsupportedImageType(
            upload.content_type.clone(),
        ));
    }

    Ok(())
}

/// File extension for an accepted content type
pub(crate) fn extension_for(content_type: &str) -> &'static str {
    match content_type {
        "image/png" => "png",
        "image/webp" => "webp",
        _ => "jpg",
    }
}
