pub const PROFILE_UPLOADS: &str = "/uploads/profiles";
pub const PLACEHOLDER_IMAGE: &str = "https://via.placeholder.com";

/// Resolve the stored profile image into something displayable. Absolute
/// urls pass through, bare file names live under the uploads directory.
pub fn profile_image_url(image: Option<&str>, size: u32) -> String {
    match image {
        Some(image) if image.starts_with("http") => image.to_owned(),
        Some(image) if !image.is_empty() => format!("{}/{}", PROFILE_UPLOADS, image),
        _ => format!("{}/{size}x{size}?text=U", PLACEHOLDER_IMAGE, size = size),
    }
}
