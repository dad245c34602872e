use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Attachment file names accepted by the new bill form
    /// - Valid: "test.jpg", "scan.JPEG", "facture.png"
    /// - Invalid: "test.pdf", "photo.gif", "jpg", "archive.png.zip"
    pub static ref ATTACHMENT_FILE_REGEX: Regex = Regex::new(r"(?i)\.(jpe?g|png)$").unwrap();

    /// Image extensions the preview modal can display
    pub static ref PREVIEWABLE_IMAGE_REGEX: Regex =
        Regex::new(r"(?i)\.(jpe?g|png|gif|webp)$").unwrap();

    /// Non-negative integer form input
    pub static ref UNSIGNED_INT_REGEX: Regex = Regex::new(r"^\d+$").unwrap();
}

/// Last segment of a file path, whichever separator the platform used.
/// `C:\fakepath\test.jpg` gives `test.jpg`.
pub fn base_name(path: &str) -> &str {
    path.rsplit(['\\', '/']).next().unwrap_or(path)
}
