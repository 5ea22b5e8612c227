use std::path::{Path, PathBuf};
use tokio::fs;
use crate::utils::ConvertResult;

/// Path of a converted file inside the chosen folder.
pub fn output_path(dir: &Path, output_name: &str) -> PathBuf {
    dir.join(output_name)
}

/// Writes encoded bytes, replacing any file already at `path`.
pub async fn write_output(path: &Path, bytes: &[u8]) -> ConvertResult<()> {
    fs::write(path, bytes).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn write_output_overwrites_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = output_path(dir.path(), "a.webp");

        write_output(&path, b"first").await.unwrap();
        write_output(&path, b"second").await.unwrap();

        assert_eq!(std::fs::read(&path).unwrap(), b"second");
    }

    #[tokio::test]
    async fn write_output_into_missing_folder_reports_io_message() {
        let dir = tempfile::tempdir().unwrap();
        let path = output_path(&dir.path().join("gone"), "a.webp");

        let err = write_output(&path, b"x").await.unwrap_err();
        assert!(matches!(err, crate::utils::ConvertError::Io(_)));
    }
}
