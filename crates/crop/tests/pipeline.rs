//! Upload to JPEG, the way the photo modal drives it.

use crop::{
    CommitOptions, ContainerSize, CropError, CropSession, ImageFile, ImageLoader, prepare,
};
use image::{ImageFormat, Rgb, RgbImage, Rgba, RgbaImage};
use std::io::Cursor;

fn png(img: &RgbaImage) -> Vec<u8> {
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, ImageFormat::Png).unwrap();
    out.into_inner()
}

#[test]
fn large_photo_is_bounded_and_flattened() {
    // transparent left half, opaque blue right half
    let img = RgbaImage::from_fn(2400, 1600, |x, _| {
        if x < 1200 {
            Rgba([0, 0, 0, 0])
        } else {
            Rgba([0, 0, 255, 255])
        }
    });
    let file = ImageFile::new("wide.png", "image/png", png(&img));
    let prepared = prepare(Some(file), 50.0).unwrap();
    let session =
        CropSession::initialize(prepared, 1.0, ContainerSize::new(500.0, 400.0)).unwrap();

    let b = session.crop_box();
    assert_eq!((b.width, b.height), (1280.0, 1280.0));
    assert_eq!((b.x, b.y), (560.0, 160.0));

    let out = session.commit(&CommitOptions::default());
    assert_eq!((out.width(), out.height()), (1000, 1000));
    // left edge came from transparent pixels, so it is white now
    let [r, g, b] = out.pixels().get_pixel(5, 500).0;
    assert!(r > 240 && g > 240 && b > 240);

    let preview = session.preview();
    assert_eq!((preview.width(), preview.height()), (120, 120));
}

#[test]
fn free_ratio_keeps_image_proportions() {
    let mut jpeg = Cursor::new(Vec::new());
    RgbImage::from_pixel(100, 50, Rgb([10, 20, 30]))
        .write_to(&mut jpeg, ImageFormat::Jpeg)
        .unwrap();
    let file = ImageFile::new("a.jpg", "image/jpeg", jpeg.into_inner());
    let prepared = prepare(Some(file), 5.0).unwrap();
    let mut session =
        CropSession::initialize(prepared, 0.0, ContainerSize::new(300.0, 300.0)).unwrap();
    assert_eq!(session.aspect_ratio(), None);

    let b = session.crop_box();
    assert_eq!((b.width, b.height), (80.0, 40.0));

    session.move_by(1000.0, -1000.0);
    let b = session.crop_box();
    assert_eq!((b.x, b.y), (20.0, 0.0));
}

#[test]
fn background_loader_reports_validation_errors_immediately() {
    let mut pending = ImageLoader::spawn(None, 5.0);
    assert!(pending.is_finished());
    assert!(matches!(pending.wait(), Err(CropError::NoFile)));
    assert!(matches!(pending.wait(), Err(CropError::NotPrepared)));

    let big = ImageFile::new("big.png", "image/png", vec![0; 2 * 1024 * 1024]);
    let mut pending = ImageLoader::spawn(Some(big), 1.0);
    assert!(matches!(pending.poll(), Some(Err(CropError::TooLarge { .. }))));
}

#[test]
fn corrupt_image_fails_to_decode() {
    let file = ImageFile::new("x.png", "image/png", b"not really a png".to_vec());
    let mut pending = ImageLoader::spawn(Some(file), 5.0);
    assert!(matches!(pending.wait(), Err(CropError::Decode(_))));
}
