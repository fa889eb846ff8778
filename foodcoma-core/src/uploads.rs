//! Local file store for generated images.

use std::fs;
use std::path::{Path, PathBuf};

use uuid::Uuid;

/// Writes generated images under a fixed uploads directory and hands back
/// relative URL paths. Files are never cleaned up here.
#[derive(Debug, Clone)]
pub struct UploadStore {
    dir: PathBuf,
}

impl UploadStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Write one PNG under the uploads directory, creating it if absent.
    ///
    /// Filenames use a uuid so concurrent writes never collide. Returns the
    /// relative URL path the server serves the file under.
    pub fn save_png(&self, data: &[u8]) -> Result<String, std::io::Error> {
        fs::create_dir_all(&self.dir)?;

        let filename = format!("mix_{}.png", Uuid::new_v4().simple());
        fs::write(self.dir.join(&filename), data)?;

        Ok(format!("/uploads/{filename}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_png_creates_directory_and_file() {
        let tmp = tempfile::tempdir().unwrap();
        let store = UploadStore::new(tmp.path().join("uploads"));

        let url = store.save_png(b"not really a png").unwrap();

        assert!(url.starts_with("/uploads/mix_"));
        assert!(url.ends_with(".png"));

        let filename = url.strip_prefix("/uploads/").unwrap();
        let written = fs::read(store.dir().join(filename)).unwrap();
        assert_eq!(written, b"not really a png");
    }

    #[test]
    fn test_save_png_filenames_are_unique() {
        let tmp = tempfile::tempdir().unwrap();
        let store = UploadStore::new(tmp.path());

        let first = store.save_png(b"a").unwrap();
        let second = store.save_png(b"b").unwrap();
        assert_ne!(first, second);
    }
}
