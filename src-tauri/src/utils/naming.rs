//! Output file naming.

/// Extension of every converted file.
pub const TARGET_EXTENSION: &str = "webp";

/// Drops the last dot-delimited segment of `file_name`.
///
/// A name without a dot is returned unchanged. Only the final segment goes,
/// so `archive.tar.gz` becomes `archive.tar`.
pub fn strip_extension(file_name: &str) -> &str {
    match file_name.rfind('.') {
        Some(idx) => &file_name[..idx],
        None => file_name,
    }
}

/// Derives `<stem>.webp` from an uploaded file name.
pub fn output_name(file_name: &str) -> String {
    format!("{}.{TARGET_EXTENSION}", strip_extension(file_name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replaces_only_the_final_extension() {
        assert_eq!(output_name("photo.png"), "photo.webp");
        assert_eq!(output_name("holiday.2024.jpeg"), "holiday.2024.webp");
        assert_eq!(output_name("scan.webp"), "scan.webp");
    }

    #[test]
    fn extensionless_name_is_kept_whole() {
        assert_eq!(strip_extension("image"), "image");
        assert_eq!(output_name("image"), "image.webp");
    }

    #[test]
    fn dot_edge_cases() {
        assert_eq!(output_name(".png"), ".webp");
        assert_eq!(output_name("photo."), "photo.webp");
        assert_eq!(output_name(""), ".webp");
    }
}
