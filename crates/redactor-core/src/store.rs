//! File-backed measurement, transform and persistence.
//!
//! URIs are filesystem paths, with or without a `file://` prefix. Transform
//! output goes to a working directory; saving copies into a library
//! directory standing in for the device media library.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::decode::{decode_jpeg, read_dimensions};
use crate::encode::{encode_jpeg, DEFAULT_QUALITY};
use crate::providers::{
    ImageTransformProvider, MeasurementProvider, PersistenceProvider, ProviderError,
};
use crate::transform::apply_regions;
use crate::Region;

const FILE_SCHEME: &str = "file://";

/// Image provider over two local directories.
#[derive(Debug, Clone)]
pub struct FileImageStore {
    output_dir: PathBuf,
    library_dir: PathBuf,
    quality: u8,
    written: u64,
}

impl FileImageStore {
    pub fn new(output_dir: impl Into<PathBuf>, library_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            library_dir: library_dir.into(),
            quality: DEFAULT_QUALITY,
            written: 0,
        }
    }

    /// JPEG quality for transformed images (clamped to 1-100 on encode).
    pub fn with_quality(mut self, quality: u8) -> Self {
        self.quality = quality;
        self
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn library_dir(&self) -> &Path {
        &self.library_dir
    }

    fn next_output_path(&mut self, source: &Path) -> PathBuf {
        let stem = source
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("image");
        loop {
            self.written += 1;
            let candidate = self.output_dir.join(format!("{stem}-{}.jpg", self.written));
            if !candidate.exists() {
                return candidate;
            }
        }
    }
}

/// Strip an optional `file://` scheme.
pub fn path_from_uri(uri: &str) -> PathBuf {
    PathBuf::from(uri.strip_prefix(FILE_SCHEME).unwrap_or(uri))
}

fn io_failure(err: io::Error, wrap: fn(String) -> ProviderError, context: &Path) -> ProviderError {
    if err.kind() == io::ErrorKind::PermissionDenied {
        ProviderError::PermissionDenied
    } else {
        wrap(format!("{}: {err}", context.display()))
    }
}

fn unused_name(dir: &Path, file_name: &str) -> PathBuf {
    let first = dir.join(file_name);
    if !first.exists() {
        return first;
    }
    let path = Path::new(file_name);
    let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or("image");
    let ext = path.extension().and_then(|s| s.to_str()).unwrap_or("jpg");
    (1u32..)
        .map(|n| dir.join(format!("{stem} ({n}).{ext}")))
        .find(|p| !p.exists())
        .unwrap_or(first)
}

impl MeasurementProvider for FileImageStore {
    fn measure(&self, uri: &str) -> Result<(u32, u32), ProviderError> {
        let path = path_from_uri(uri);
        let bytes = fs::read(&path).map_err(|e| io_failure(e, ProviderError::Measure, &path))?;
        read_dimensions(&bytes).map_err(|e| ProviderError::Measure(e.to_string()))
    }
}

impl ImageTransformProvider for FileImageStore {
    fn crop_or_overlay(&mut self, uri: &str, regions: &[Region]) -> Result<String, ProviderError> {
        let source = path_from_uri(uri);
        let bytes =
            fs::read(&source).map_err(|e| io_failure(e, ProviderError::Transform, &source))?;

        let image = decode_jpeg(&bytes).map_err(|e| ProviderError::Transform(e.to_string()))?;
        let result =
            apply_regions(&image, regions).map_err(|e| ProviderError::Transform(e.to_string()))?;
        let jpeg = encode_jpeg(&result, self.quality)
            .map_err(|e| ProviderError::Transform(e.to_string()))?;

        fs::create_dir_all(&self.output_dir)
            .map_err(|e| io_failure(e, ProviderError::Transform, &self.output_dir))?;
        let target = self.next_output_path(&source);
        fs::write(&target, jpeg).map_err(|e| io_failure(e, ProviderError::Transform, &target))?;

        log::debug!(
            "applied {} regions to {} -> {} ({}x{})",
            regions.len(),
            source.display(),
            target.display(),
            result.width,
            result.height
        );
        Ok(target.to_string_lossy().into_owned())
    }
}

impl PersistenceProvider for FileImageStore {
    fn save_to_library(&mut self, uri: &str) -> Result<(), ProviderError> {
        let source = path_from_uri(uri);
        let file_name = source
            .file_name()
            .and_then(|s| s.to_str())
            .ok_or_else(|| ProviderError::Save(format!("{uri} does not name a file")))?;

        fs::create_dir_all(&self.library_dir)
            .map_err(|e| io_failure(e, ProviderError::Save, &self.library_dir))?;
        let target = unused_name(&self.library_dir, file_name);
        fs::copy(&source, &target).map_err(|e| io_failure(e, ProviderError::Save, &source))?;

        log::debug!("saved {} to {}", source.display(), target.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::DecodedImage;
    use crate::geometry::PixelRegion;

    fn write_photo(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
        let img = DecodedImage::filled(width, height, [230, 230, 230]);
        let path = dir.join(name);
        fs::write(&path, encode_jpeg(&img, 95).unwrap()).unwrap();
        path
    }

    #[test]
    fn test_path_from_uri() {
        assert_eq!(path_from_uri("file:///tmp/a.jpg"), PathBuf::from("/tmp/a.jpg"));
        assert_eq!(path_from_uri("/tmp/a.jpg"), PathBuf::from("/tmp/a.jpg"));
    }

    #[test]
    fn test_measure() {
        let dir = tempfile::tempdir().unwrap();
        let photo = write_photo(dir.path(), "photo.jpg", 120, 80);
        let store = FileImageStore::new(dir.path().join("out"), dir.path().join("lib"));

        let uri = format!("file://{}", photo.display());
        assert_eq!(store.measure(&uri).unwrap(), (120, 80));
    }

    #[test]
    fn test_measure_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileImageStore::new(dir.path(), dir.path());
        let result = store.measure(&dir.path().join("nope.jpg").to_string_lossy());
        assert!(matches!(result, Err(ProviderError::Measure(_))));
    }

    #[test]
    fn test_measure_not_an_image() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.jpg");
        fs::write(&path, b"plain text").unwrap();
        let store = FileImageStore::new(dir.path(), dir.path());

        let result = store.measure(&path.to_string_lossy());
        assert!(matches!(result, Err(ProviderError::Measure(_))));
    }

    #[test]
    fn test_crop_or_overlay_writes_new_file() {
        let dir = tempfile::tempdir().unwrap();
        let photo = write_photo(dir.path(), "photo.jpg", 100, 60);
        let mut store = FileImageStore::new(dir.path().join("out"), dir.path().join("lib"));

        let regions = [
            Region::blackout(PixelRegion::new(0, 0, 40, 20)),
            Region::crop(PixelRegion::new(0, 0, 50, 30)),
        ];
        let first = store.crop_or_overlay(&photo.to_string_lossy(), &regions).unwrap();
        let second = store.crop_or_overlay(&photo.to_string_lossy(), &regions).unwrap();
        assert_ne!(first, second);

        let out = decode_jpeg(&fs::read(&first).unwrap()).unwrap();
        assert_eq!((out.width, out.height), (50, 30));
        let [r, g, b] = out.pixel(5, 5).unwrap();
        assert!(r < 30 && g < 30 && b < 30, "redacted area should be black");
        let [r, _, _] = out.pixel(45, 25).unwrap();
        assert!(r > 200, "untouched area keeps its color");
    }

    #[test]
    fn test_crop_or_overlay_invalid_region() {
        let dir = tempfile::tempdir().unwrap();
        let photo = write_photo(dir.path(), "photo.jpg", 20, 20);
        let mut store = FileImageStore::new(dir.path().join("out"), dir.path().join("lib"));

        let regions = [Region::crop(PixelRegion::new(10, 10, 20, 20))];
        let result = store.crop_or_overlay(&photo.to_string_lossy(), &regions);
        assert!(matches!(result, Err(ProviderError::Transform(_))));
        assert!(!dir.path().join("out").exists());
    }

    #[test]
    fn test_save_to_library_avoids_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let photo = write_photo(dir.path(), "scan.jpg", 10, 10);
        let library = dir.path().join("lib");
        let mut store = FileImageStore::new(dir.path().join("out"), &library);

        store.save_to_library(&photo.to_string_lossy()).unwrap();
        store.save_to_library(&photo.to_string_lossy()).unwrap();

        assert!(library.join("scan.jpg").exists());
        assert!(library.join("scan (1).jpg").exists());
    }

    #[test]
    fn test_save_missing_source() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileImageStore::new(dir.path(), dir.path().join("lib"));
        let result = store.save_to_library(&dir.path().join("gone.jpg").to_string_lossy());
        assert!(matches!(result, Err(ProviderError::Save(_))));
    }
}
