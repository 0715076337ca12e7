//! # crop
//!
//! The image half of a profile-photo style upload:
//!
//! 1. [`prepare`] (or [`ImageLoader::spawn`] off-thread) validates a picked
//!    file and decodes it.
//! 2. [`estimated_area_height`] / [`available_area_height`] size the crop area.
//! 3. [`CropSession`] holds the crop box once the area is visible.
//! 4. [`CropSession::commit`] rasterizes the selection, bounded and flattened,
//!    and [`CroppedImage::to_jpeg_data_url`] turns it into a form value.
//!
//! ```
//! use crop::{CommitOptions, ContainerSize, CropSession, ImageFile, prepare};
//! use image::{ImageFormat, Rgba, RgbaImage};
//! use std::io::Cursor;
//!
//! let mut png = Cursor::new(Vec::new());
//! RgbaImage::from_pixel(40, 20, Rgba([0, 128, 255, 255]))
//!     .write_to(&mut png, ImageFormat::Png)
//!     .unwrap();
//!
//! let file = ImageFile::new("avatar.png", "image/png", png.into_inner());
//! let prepared = prepare(Some(file), 5.0).unwrap();
//! let session = CropSession::initialize(prepared, 1.0, ContainerSize::new(300.0, 300.0)).unwrap();
//!
//! let out = session.commit(&CommitOptions::default());
//! assert_eq!((out.width(), out.height()), (16, 16));
//! assert!(out.to_jpeg_data_url(90).unwrap().starts_with("data:image/jpeg;base64,"));
//! ```

mod error;
mod file;
mod layout;
mod loader;
mod session;

pub use error::CropError;
pub use file::{DEFAULT_MAX_SIZE_MB, ImageFile, PreparedImage, prepare, validate};
pub use layout::{
    FALLBACK_AREA_HEIGHT, MAX_AREA_HEIGHT, MIN_AREA_HEIGHT, ModalMetrics, available_area_height,
    estimated_area_height,
};
pub use loader::{ImageLoader, PendingImage};
pub use session::{
    AUTO_CROP_AREA, CommitOptions, ContainerSize, CropRect, CropSession, CroppedImage,
    JPEG_QUALITY, MIN_CONTAINER_SIZE, PREVIEW_SIZE,
};
