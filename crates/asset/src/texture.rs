//! Texture loading and data structures.
//! Images are decoded to RGB8 with rows flipped bottom-up, the order
//! GL-style uploads expect.

use std::path::{Path, PathBuf};

use crate::error::TextureError;

/// Texture data in CPU-friendly format before GPU upload.
#[derive(Clone, Debug)]
pub struct TextureData {
    pub data: Vec<u8>,
    pub width: u32,
    pub height: u32,
    pub format: TextureFormat,
}

/// Supported texture formats.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TextureFormat {
    Rgb8,
}

impl TextureData {
    /// Create a new texture with given dimensions and RGB8 format.
    pub fn new_rgb8(width: u32, height: u32, data: Vec<u8>) -> Self {
        assert_eq!(
            data.len(),
            (width * height * 3) as usize,
            "Data size doesn't match RGB8 format"
        );
        Self {
            data,
            width,
            height,
            format: TextureFormat::Rgb8,
        }
    }

    /// Load a PNG or JPEG texture, flipped vertically.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, TextureError> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(TextureError::NotFound {
                path: path.to_path_buf(),
            });
        }

        let img = image::open(path).map_err(|source| TextureError::Decode {
            path: path.to_path_buf(),
            source,
        })?;

        let rgb = img.flipv().to_rgb8();
        let (width, height) = rgb.dimensions();
        let data = rgb.into_raw();

        log::debug!("Loaded texture {:?} {}x{} ({} bytes)", path, width, height, data.len());

        Ok(Self::new_rgb8(width, height, data))
    }

    /// Get the number of bytes per pixel for the format.
    pub fn bytes_per_pixel(&self) -> u32 {
        match self.format {
            TextureFormat::Rgb8 => 3,
        }
    }

    /// Check if the texture data is valid.
    pub fn is_valid(&self) -> bool {
        let expected_size = (self.width * self.height * self.bytes_per_pixel()) as usize;
        self.data.len() == expected_size && self.width > 0 && self.height > 0
    }
}

/// Cubemap face order: +X, -X, +Y, -Y, +Z, -Z.
pub const CUBEMAP_FACES: [&str; 6] = ["right", "left", "top", "bottom", "front", "back"];

/// Six-sided skybox texture. Faces that failed to load stay `None`.
#[derive(Clone, Debug)]
pub struct CubemapData {
    pub faces: [Option<TextureData>; 6],
}

impl CubemapData {
    /// Loads faces in [`CUBEMAP_FACES`] order. Unreadable faces are skipped
    /// with a warning; only a wrong face count is an error.
    pub fn load<P: AsRef<Path>>(paths: &[P]) -> Result<Self, TextureError> {
        if paths.len() != CUBEMAP_FACES.len() {
            return Err(TextureError::FaceCount(paths.len()));
        }

        let faces = std::array::from_fn(|i| match TextureData::load(&paths[i]) {
            Ok(face) => Some(face),
            Err(err) => {
                log::warn!("Skipping cubemap face '{}': {}", CUBEMAP_FACES[i], err);
                None
            }
        });
        Ok(Self { faces })
    }

    /// Face paths `<dir>/<name>.<ext>` in upload order.
    pub fn face_paths(dir: impl AsRef<Path>, extension: &str) -> Vec<PathBuf> {
        CUBEMAP_FACES
            .iter()
            .map(|name| dir.as_ref().join(format!("{name}.{extension}")))
            .collect()
    }

    pub fn loaded_faces(&self) -> usize {
        self.faces.iter().filter(|f| f.is_some()).count()
    }

    pub fn is_complete(&self) -> bool {
        self.loaded_faces() == CUBEMAP_FACES.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("cityview-{}-{name}", std::process::id()))
    }

    /// Top row red, everything else blue.
    fn write_marker_png(path: &Path) {
        let img = image::RgbImage::from_fn(4, 2, |_, y| {
            if y == 0 {
                image::Rgb([255, 0, 0])
            } else {
                image::Rgb([0, 0, 255])
            }
        });
        img.save(path).expect("save png");
    }

    #[test]
    fn load_flips_rows() {
        let path = temp_path("flip.png");
        write_marker_png(&path);
        let tex = TextureData::load(&path).expect("load png");
        let _ = std::fs::remove_file(&path);

        assert_eq!((tex.width, tex.height), (4, 2));
        assert!(tex.is_valid());
        // first row in memory is the image's bottom row
        assert_eq!(&tex.data[0..3], &[0, 0, 255]);
        assert_eq!(&tex.data[12..15], &[255, 0, 0]);
    }

    #[test]
    fn missing_texture_is_not_found() {
        let err = TextureData::load("/no/such/texture.png").unwrap_err();
        assert!(matches!(err, TextureError::NotFound { .. }));
    }

    #[test]
    fn garbage_is_decode_error() {
        let path = temp_path("garbage.png");
        std::fs::write(&path, b"not an image").expect("write");
        let err = TextureData::load(&path).unwrap_err();
        let _ = std::fs::remove_file(&path);
        assert!(matches!(err, TextureError::Decode { .. }));
    }

    #[test]
    fn cubemap_skips_missing_faces() {
        let dir = temp_path("sky");
        std::fs::create_dir_all(&dir).expect("mkdir");
        let paths = CubemapData::face_paths(&dir, "png");
        write_marker_png(&paths[0]);
        write_marker_png(&paths[5]);

        let cube = CubemapData::load(&paths).expect("cubemap");
        let _ = std::fs::remove_dir_all(&dir);
        assert_eq!(cube.loaded_faces(), 2);
        assert!(!cube.is_complete());
        assert!(cube.faces[0].is_some() && cube.faces[2].is_none());
    }

    #[test]
    fn cubemap_needs_six_paths() {
        let err = CubemapData::load(&["a.png", "b.png"][..]).unwrap_err();
        assert!(matches!(err, TextureError::FaceCount(2)));
    }
}
