use crate::error::CropError;
use crate::file::PreparedImage;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use image::codecs::jpeg::JpegEncoder;
use image::imageops::{self, FilterType};
use image::{Rgb, RgbImage, RgbaImage};

/// Share of the image the initial crop box covers.
pub const AUTO_CROP_AREA: f64 = 0.8;
/// The crop area must be at least this wide and tall (CSS px).
pub const MIN_CONTAINER_SIZE: f32 = 200.0;
pub const PREVIEW_SIZE: u32 = 120;
pub const JPEG_QUALITY: u8 = 90;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ContainerSize {
    pub width: f32,
    pub height: f32,
}

impl ContainerSize {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// A hidden container measures 0x0 and is never ready.
    pub fn is_ready(&self) -> bool {
        self.width >= MIN_CONTAINER_SIZE && self.height >= MIN_CONTAINER_SIZE
    }
}

/// Crop box in image pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CropRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl CropRect {
    fn center(&self) -> (f64, f64) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CommitOptions {
    pub max_width: u32,
    pub max_height: u32,
    /// Background for transparent pixels.
    pub fill: [u8; 3],
}

impl Default for CommitOptions {
    fn default() -> Self {
        Self {
            max_width: 1000,
            max_height: 1000,
            fill: [0xff, 0xff, 0xff],
        }
    }
}

/// An active crop over one prepared image.
#[derive(Clone, Debug)]
pub struct CropSession {
    image: PreparedImage,
    aspect_ratio: Option<f64>,
    container: ContainerSize,
    rect: CropRect,
}

impl CropSession {
    /// Start cropping. The container must already be laid out.
    ///
    /// A non-positive or non-finite `aspect_ratio` leaves the box free.
    pub fn initialize(
        image: PreparedImage,
        aspect_ratio: f64,
        container: ContainerSize,
    ) -> Result<Self, CropError> {
        if !container.is_ready() {
            return Err(CropError::ContainerNotReady);
        }

        let aspect_ratio = (aspect_ratio.is_finite() && aspect_ratio > 0.0).then_some(aspect_ratio);
        let rect = initial_rect(
            f64::from(image.width()),
            f64::from(image.height()),
            aspect_ratio,
        );
        log::debug!(
            target: "crop",
            "crop session on {:?}: {}x{} box {:.0}x{:.0} at ({:.0}, {:.0})",
            image.name(),
            image.width(),
            image.height(),
            rect.width,
            rect.height,
            rect.x,
            rect.y
        );

        Ok(Self {
            image,
            aspect_ratio,
            container,
            rect,
        })
    }

    pub fn image(&self) -> &PreparedImage {
        &self.image
    }

    pub fn aspect_ratio(&self) -> Option<f64> {
        self.aspect_ratio
    }

    pub fn container(&self) -> ContainerSize {
        self.container
    }

    pub fn crop_box(&self) -> CropRect {
        self.rect
    }

    /// Follow a container resize. The crop box is in image space and stays.
    pub fn set_container(&mut self, container: ContainerSize) -> Result<(), CropError> {
        if !container.is_ready() {
            return Err(CropError::ContainerNotReady);
        }
        self.container = container;
        Ok(())
    }

    fn bounds(&self) -> (f64, f64) {
        (f64::from(self.image.width()), f64::from(self.image.height()))
    }

    /// Drag the box; it stops at the image edges.
    pub fn move_by(&mut self, dx: f64, dy: f64) {
        let (w, h) = self.bounds();
        self.rect.x = (self.rect.x + dx).clamp(0.0, w - self.rect.width);
        self.rect.y = (self.rect.y + dy).clamp(0.0, h - self.rect.height);
    }

    /// Scale the box about its center, keeping its proportions. The box
    /// never leaves the image and never drops below one pixel.
    pub fn resize(&mut self, factor: f64) {
        if !factor.is_finite() || factor <= 0.0 {
            return;
        }
        let (w, h) = self.bounds();
        let max_factor = (w / self.rect.width).min(h / self.rect.height);
        let min_factor = 1.0 / self.rect.width.min(self.rect.height);
        let factor = factor.min(max_factor).max(min_factor.min(1.0));

        let (cx, cy) = self.rect.center();
        let width = self.rect.width * factor;
        let height = self.rect.height * factor;
        self.rect = CropRect {
            x: (cx - width / 2.0).clamp(0.0, w - width),
            y: (cy - height / 2.0).clamp(0.0, h - height),
            width,
            height,
        };
    }

    /// Rasterize the selection, flattened onto `opts.fill` and scaled down
    /// (never up) to fit `max_width` x `max_height`.
    pub fn commit(&self, opts: &CommitOptions) -> CroppedImage {
        let region = flatten(&self.region(), opts.fill);
        let (w, h) = region.dimensions();
        let (tw, th) = fit_within(w, h, opts.max_width, opts.max_height);
        let image = if (tw, th) == (w, h) {
            region
        } else {
            imageops::resize(&region, tw, th, FilterType::CatmullRom)
        };
        CroppedImage { image }
    }

    /// Fixed-size thumbnail of the selection on white.
    pub fn preview(&self) -> CroppedImage {
        let region = flatten(&self.region(), [0xff, 0xff, 0xff]);
        CroppedImage {
            image: imageops::resize(&region, PREVIEW_SIZE, PREVIEW_SIZE, FilterType::CatmullRom),
        }
    }

    fn region(&self) -> RgbaImage {
        let pixels = self.image.pixels();
        let (iw, ih) = pixels.dimensions();
        let x = (self.rect.x.round() as u32).min(iw.saturating_sub(1));
        let y = (self.rect.y.round() as u32).min(ih.saturating_sub(1));
        let w = (self.rect.width.round() as u32).clamp(1, iw - x);
        let h = (self.rect.height.round() as u32).clamp(1, ih - y);
        imageops::crop_imm(pixels, x, y, w, h).to_image()
    }
}

fn initial_rect(w: f64, h: f64, ratio: Option<f64>) -> CropRect {
    let (bw, bh) = match ratio {
        Some(r) if w / h > r => (h * r, h),
        Some(r) => (w, w / r),
        None => (w, h),
    };
    let (bw, bh) = (bw * AUTO_CROP_AREA, bh * AUTO_CROP_AREA);
    CropRect {
        x: (w - bw) / 2.0,
        y: (h - bh) / 2.0,
        width: bw,
        height: bh,
    }
}

fn fit_within(w: u32, h: u32, max_w: u32, max_h: u32) -> (u32, u32) {
    if w <= max_w && h <= max_h {
        return (w, h);
    }
    let scale = (f64::from(max_w) / f64::from(w)).min(f64::from(max_h) / f64::from(h));
    let tw = ((f64::from(w) * scale).round() as u32).clamp(1, max_w.max(1));
    let th = ((f64::from(h) * scale).round() as u32).clamp(1, max_h.max(1));
    (tw, th)
}

fn flatten(src: &RgbaImage, fill: [u8; 3]) -> RgbImage {
    RgbImage::from_fn(src.width(), src.height(), |x, y| {
        let [r, g, b, a] = src.get_pixel(x, y).0;
        let alpha = u32::from(a);
        let mix = |c: u8, bg: u8| -> u8 {
            ((u32::from(c) * alpha + u32::from(bg) * (255 - alpha) + 127) / 255) as u8
        };
        Rgb([mix(r, fill[0]), mix(g, fill[1]), mix(b, fill[2])])
    })
}

/// Output of [`CropSession::commit`] / [`CropSession::preview`].
#[derive(Clone, Debug)]
pub struct CroppedImage {
    image: RgbImage,
}

impl CroppedImage {
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn pixels(&self) -> &RgbImage {
        &self.image
    }

    /// `quality` is 1..=100.
    pub fn to_jpeg_bytes(&self, quality: u8) -> Result<Vec<u8>, CropError> {
        let mut buf = Vec::new();
        JpegEncoder::new_with_quality(&mut buf, quality.clamp(1, 100))
            .encode_image(&self.image)
            .map_err(|e| CropError::Encode(e.to_string()))?;
        Ok(buf)
    }

    pub fn to_jpeg_data_url(&self, quality: u8) -> Result<String, CropError> {
        let bytes = self.to_jpeg_bytes(quality)?;
        Ok(format!("data:image/jpeg;base64,{}", STANDARD.encode(bytes)))
    }
}
