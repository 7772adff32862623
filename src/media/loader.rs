/// Image file loading
///
/// Loads picked or dropped files into previewable form. Each file is
/// validated by extension, read asynchronously and decoded to a
/// downscaled preview. Files that are not images, cannot be read or
/// fail to decode are rejected and reported by filename.

use crate::state::data::SelectedImage;
use iced::widget::image::Handle;
use image::imageops::FilterType;
use std::path::{Path, PathBuf};
use tokio::task;
use uuid::Uuid;

/// Size of decoded previews (longest side)
const PREVIEW_SIZE: u32 = 256;

/// Supported image file extensions
const IMAGE_EXTENSIONS: [&str; 8] = ["jpg", "jpeg", "png", "gif", "webp", "bmp", "tif", "tiff"];

/// Outcome of loading a batch of selected files
#[derive(Debug, Clone)]
pub struct LoadedSelection {
    /// Successfully loaded images, in input order
    pub images: Vec<SelectedImage>,
    /// Filenames of files that were not usable images
    pub rejected: Vec<String>,
}

/// Check whether a path looks like a supported image file
pub fn is_image_path(path: &Path) -> bool {
    match path.extension() {
        Some(extension) => {
            let ext = extension.to_string_lossy().to_lowercase();
            IMAGE_EXTENSIONS.contains(&ext.as_str())
        }
        None => false,
    }
}

/// Load every given file into a selectable image
///
/// Invalid files never block the valid ones: each rejection is recorded
/// and the loop moves on. Input order is preserved for the loaded list.
pub async fn load_images(paths: Vec<PathBuf>) -> LoadedSelection {
    let mut images = Vec::new();
    let mut rejected = Vec::new();

    for path in paths {
        let filename = path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());

        if !is_image_path(&path) {
            eprintln!("⚠️  Not an image file, skipping: {}", filename);
            rejected.push(filename);
            continue;
        }

        match load_one(&path, &filename).await {
            Some(image) => images.push(image),
            None => {
                eprintln!("⚠️  Could not load image: {}", filename);
                rejected.push(filename);
            }
        }
    }

    if !images.is_empty() {
        println!("🖼️  Loaded {} image(s)", images.len());
    }

    LoadedSelection { images, rejected }
}

/// Read one file and decode its preview
async fn load_one(path: &Path, filename: &str) -> Option<SelectedImage> {
    let bytes = tokio::fs::read(path).await.ok()?;

    // Spawn blocking because decoding and resizing are CPU-intensive
    let to_decode = bytes.clone();
    let preview = task::spawn_blocking(move || decode_preview(&to_decode))
        .await
        .ok()??;

    Some(SelectedImage {
        id: Uuid::new_v4(),
        filename: filename.to_string(),
        path: path.to_path_buf(),
        bytes,
        preview,
    })
}

/// Decode image bytes and downscale them to a preview handle
fn decode_preview(bytes: &[u8]) -> Option<Handle> {
    let decoded = image::load_from_memory(bytes).ok()?;
    let preview = decoded.resize(PREVIEW_SIZE, PREVIEW_SIZE, FilterType::Lanczos3);

    let rgba = preview.to_rgba8();
    let (width, height) = rgba.dimensions();
    Some(Handle::from_rgba(width, height, rgba.into_raw()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write_test_png(dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        let pixel = image::Rgba([180u8, 40, 40, 255]);
        image::RgbaImage::from_pixel(8, 8, pixel)
            .save(&path)
            .expect("failed to write test image");
        path
    }

    #[test]
    fn test_image_path_detection() {
        assert!(is_image_path(Path::new("/photos/cat.jpg")));
        assert!(is_image_path(Path::new("/photos/CAT.PNG")));
        assert!(is_image_path(Path::new("banner.webp")));
        assert!(!is_image_path(Path::new("/docs/notes.txt")));
        assert!(!is_image_path(Path::new("/bin/no_extension")));
    }

    #[tokio::test]
    async fn test_valid_images_load_in_input_order() {
        let dir = tempfile::tempdir().unwrap();
        let first = write_test_png(dir.path(), "first.png");
        let second = write_test_png(dir.path(), "second.png");

        let selection = load_images(vec![first, second]).await;

        assert_eq!(selection.rejected.len(), 0);
        assert_eq!(selection.images.len(), 2);
        assert_eq!(selection.images[0].filename, "first.png");
        assert_eq!(selection.images[1].filename, "second.png");
        assert!(!selection.images[0].bytes.is_empty());
        assert_ne!(selection.images[0].id, selection.images[1].id);
    }

    #[tokio::test]
    async fn test_non_image_files_are_rejected_without_blocking_valid_ones() {
        let dir = tempfile::tempdir().unwrap();
        let valid = write_test_png(dir.path(), "photo.png");
        let invalid = dir.path().join("notes.txt");
        fs::write(&invalid, "not an image").unwrap();

        let selection = load_images(vec![invalid, valid]).await;

        assert_eq!(selection.images.len(), 1);
        assert_eq!(selection.images[0].filename, "photo.png");
        assert_eq!(selection.rejected, vec!["notes.txt".to_string()]);
    }

    #[tokio::test]
    async fn test_unreadable_file_is_rejected() {
        let selection = load_images(vec![PathBuf::from("/nonexistent/ghost.jpg")]).await;

        assert!(selection.images.is_empty());
        assert_eq!(selection.rejected, vec!["ghost.jpg".to_string()]);
    }

    #[tokio::test]
    async fn test_undecodable_file_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let fake = dir.path().join("fake.png");
        fs::write(&fake, "png by name only").unwrap();

        let selection = load_images(vec![fake]).await;

        assert!(selection.images.is_empty());
        assert_eq!(selection.rejected, vec!["fake.png".to_string()]);
    }
}
