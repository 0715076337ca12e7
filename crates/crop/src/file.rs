use crate::error::CropError;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use image::RgbaImage;
use std::fs;
use std::path::Path;

pub const DEFAULT_MAX_SIZE_MB: f64 = 5.0;

/// Decoded images above this many pixels are rejected.
const MAX_IMAGE_PIXELS: u64 = 16_777_216; // 4096 * 4096

/// A file as handed over by a picker: name, declared MIME type, contents.
#[derive(Clone, Debug)]
pub struct ImageFile {
    pub name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl ImageFile {
    pub fn new(name: impl Into<String>, mime: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime: mime.into(),
            bytes,
        }
    }

    /// Read a file from disk, declaring its MIME type from the extension.
    pub fn read(path: &Path) -> Result<Self, CropError> {
        let bytes = fs::read(path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let mime = mime_from_extension(path);
        Ok(Self::new(name, mime, bytes))
    }

    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }
}

fn mime_from_extension(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "bmp" => "image/bmp",
        _ => "application/octet-stream",
    }
}

/// Cheap checks, in order: presence, size, MIME class. Nothing is decoded.
pub fn validate(file: Option<&ImageFile>, max_size_mb: f64) -> Result<(), CropError> {
    let file = file.ok_or(CropError::NoFile)?;

    let max_bytes = max_size_mb * 1024.0 * 1024.0;
    if file.size() as f64 > max_bytes {
        return Err(CropError::TooLarge {
            max_mb: max_size_mb,
        });
    }

    if !file.mime.starts_with("image/") {
        return Err(CropError::NotAnImage);
    }

    Ok(())
}

/// A validated, decoded upload ready for cropping.
#[derive(Clone, Debug)]
pub struct PreparedImage {
    name: String,
    mime: String,
    source: Vec<u8>,
    pixels: RgbaImage,
}

impl PreparedImage {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    /// The original upload as a `data:` URL, for showing it before cropping.
    pub fn source_data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime, STANDARD.encode(&self.source))
    }
}

/// Validate then decode, on the calling thread.
pub fn prepare(file: Option<ImageFile>, max_size_mb: f64) -> Result<PreparedImage, CropError> {
    validate(file.as_ref(), max_size_mb)?;
    let file = file.ok_or(CropError::NoFile)?;
    decode(file)
}

pub(crate) fn decode(file: ImageFile) -> Result<PreparedImage, CropError> {
    if file.bytes.is_empty() {
        return Err(CropError::Decode("empty file".to_string()));
    }

    let img = image::load_from_memory(&file.bytes).map_err(|e| CropError::Decode(e.to_string()))?;
    let pixels = img.to_rgba8();
    let (w, h) = pixels.dimensions();

    let pixel_count = u64::from(w) * u64::from(h);
    if pixel_count == 0 || pixel_count > MAX_IMAGE_PIXELS {
        return Err(CropError::Decode(format!(
            "decoded image size {w}x{h} is not supported"
        )));
    }

    log::debug!(target: "crop", "decoded {:?} ({w}x{h}, {} bytes)", file.name, file.bytes.len());

    Ok(PreparedImage {
        name: file.name,
        mime: file.mime,
        source: file.bytes,
        pixels,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgba};
    use std::io::Cursor;

    fn png(w: u32, h: u32) -> Vec<u8> {
        let mut out = Cursor::new(Vec::new());
        RgbaImage::from_pixel(w, h, Rgba([10, 20, 30, 255]))
            .write_to(&mut out, ImageFormat::Png)
            .unwrap();
        out.into_inner()
    }

    #[test]
    fn missing_file_is_reported_first() {
        assert!(matches!(validate(None, 0.0), Err(CropError::NoFile)));
    }

    #[test]
    fn size_is_checked_before_type() {
        let file = ImageFile::new("doc.pdf", "application/pdf", vec![0; 2048]);
        let err = validate(Some(&file), 0.001).unwrap_err();
        assert!(matches!(err, CropError::TooLarge { .. }));

        let err = validate(Some(&file), 1.0).unwrap_err();
        assert!(matches!(err, CropError::NotAnImage));
    }

    #[test]
    fn exactly_at_limit_passes() {
        let file = ImageFile::new("a.png", "image/png", vec![0; 1024 * 1024]);
        assert!(validate(Some(&file), 1.0).is_ok());
    }

    #[test]
    fn garbage_with_image_mime_fails_decode() {
        let file = ImageFile::new("a.png", "image/png", b"not a png".to_vec());
        assert!(matches!(prepare(Some(file), 5.0), Err(CropError::Decode(_))));
    }

    #[test]
    fn prepare_decodes_and_keeps_source() {
        let bytes = png(3, 2);
        let prepared = prepare(Some(ImageFile::new("p.png", "image/png", bytes)), 5.0).unwrap();
        assert_eq!((prepared.width(), prepared.height()), (3, 2));
        assert_eq!(prepared.name(), "p.png");
        assert!(prepared.source_data_url().starts_with("data:image/png;base64,iVBOR"));
    }

    #[test]
    fn mime_guess_by_extension() {
        assert_eq!(mime_from_extension(Path::new("x.JPG")), "image/jpeg");
        assert_eq!(mime_from_extension(Path::new("x.txt")), "application/octet-stream");
        assert_eq!(mime_from_extension(Path::new("noext")), "application/octet-stream");
    }
}
