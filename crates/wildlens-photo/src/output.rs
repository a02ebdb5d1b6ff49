//! Saving photos as timestamped PNG files.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use image::{ImageFormat, RgbImage};

use crate::error::PhotoError;

/// Writes photos into one directory, creating it on first use.
#[derive(Clone, Debug)]
pub struct PhotoWriter {
    dir: PathBuf,
}

impl PhotoWriter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Encode `image` as PNG named after `taken_at`. When a photo with that
    /// name already exists (two captures in the same second) a `_1`, `_2`,
    /// ... suffix is added. Returns the path written.
    pub fn save(&self, image: &RgbImage, taken_at: &DateTime<Local>) -> Result<PathBuf, PhotoError> {
        std::fs::create_dir_all(&self.dir).map_err(|source| PhotoError::Io {
            path: self.dir.clone(),
            source,
        })?;

        let path = self.unused_path(&photo_file_name(taken_at));
        image.save_with_format(&path, ImageFormat::Png)?;
        tracing::info!("Photo saved to {}", path.display());
        Ok(path)
    }

    fn unused_path(&self, file_name: &str) -> PathBuf {
        let candidate = self.dir.join(file_name);
        if !candidate.exists() {
            return candidate;
        }
        let stem = file_name.trim_end_matches(".png");
        (1..)
            .map(|n| self.dir.join(format!("{stem}_{n}.png")))
            .find(|path| !path.exists())
            .unwrap_or(candidate)
    }
}

/// `Foto_yyyy-MM-dd_HH-mm-ss.png` for the given local time.
pub fn photo_file_name(taken_at: &DateTime<Local>) -> String {
    taken_at.format("Foto_%Y-%m-%d_%H-%M-%S.png").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(year: i32, month: u32, day: u32, hour: u32, min: u32, sec: u32) -> DateTime<Local> {
        Local
            .with_ymd_and_hms(year, month, day, hour, min, sec)
            .earliest()
            .unwrap()
    }

    #[test]
    fn test_file_name_format() {
        assert_eq!(
            photo_file_name(&at(2024, 2, 29, 13, 45, 7)),
            "Foto_2024-02-29_13-45-07.png"
        );
        assert_eq!(
            photo_file_name(&at(2000, 12, 31, 23, 59, 59)),
            "Foto_2000-12-31_23-59-59.png"
        );
    }

    #[test]
    fn test_file_name_uses_local_wall_clock() {
        let now = Local::now();
        let expected = format!(
            "Foto_{}.png",
            now.naive_local().format("%Y-%m-%d_%H-%M-%S")
        );
        assert_eq!(photo_file_name(&now), expected);
    }

    #[test]
    fn test_save_creates_directory_and_png() {
        let dir = tempfile::tempdir().unwrap();
        let writer = PhotoWriter::new(dir.path().join("Fotos"));
        let image = RgbImage::new(4, 3);

        let path = writer.save(&image, &at(2024, 6, 1, 9, 5, 0)).unwrap();
        assert_eq!(path, dir.path().join("Fotos").join("Foto_2024-06-01_09-05-00.png"));
        let loaded = image::open(&path).unwrap();
        assert_eq!((loaded.width(), loaded.height()), (4, 3));
    }

    #[test]
    fn test_same_second_gets_suffix() {
        let dir = tempfile::tempdir().unwrap();
        let writer = PhotoWriter::new(dir.path());
        let image = RgbImage::new(2, 2);

        let taken_at = at(2024, 6, 1, 9, 6, 0);
        let first = writer.save(&image, &taken_at).unwrap();
        let second = writer.save(&image, &taken_at).unwrap();
        let third = writer.save(&image, &taken_at).unwrap();
        assert_ne!(first, second);
        assert!(second.ends_with("Foto_2024-06-01_09-06-00_1.png"));
        assert!(third.ends_with("Foto_2024-06-01_09-06-00_2.png"));
    }

    #[test]
    fn test_unwritable_directory_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("not_a_dir");
        std::fs::write(&blocker, b"").unwrap();
        let writer = PhotoWriter::new(blocker.join("Fotos"));

        let result = writer.save(&RgbImage::new(1, 1), &Local::now());
        assert!(matches!(result, Err(PhotoError::Io { .. })));
    }
}
