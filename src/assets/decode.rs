use std::sync::Arc;

use anyhow::Context;

use crate::assets::PreparedImage;
use crate::error::TileboardResult;

/// Decode encoded image bytes and convert to premultiplied RGBA8.
pub fn decode_image(bytes: &[u8]) -> TileboardResult<PreparedImage> {
    let dyn_img = image::load_from_memory(bytes).context("decode image from memory")?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();

    let mut rgba8_premul = rgba.into_raw();
    premultiply_rgba8_in_place(&mut rgba8_premul);

    Ok(PreparedImage {
        width,
        height,
        rgba8_premul: Arc::new(rgba8_premul),
    })
}

/// Resample a prepared image to `size` x `size`.
///
/// Resampling happens in premultiplied space so semi-transparent edges do
/// not bleed background color.
pub fn scale_to(img: &PreparedImage, size: u32) -> PreparedImage {
    if img.width == size && img.height == size {
        return img.clone();
    }

    let src = image::RgbaImage::from_raw(img.width, img.height, img.rgba8_premul.as_ref().clone())
        .expect("prepared image buffer matches its dimensions");
    let resized = image::imageops::resize(&src, size, size, image::imageops::FilterType::Triangle);

    PreparedImage {
        width: size,
        height: size,
        rgba8_premul: Arc::new(resized.into_raw()),
    }
}

fn premultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            continue;
        }
        px[0] = ((px[0] as u16 * a + 127) / 255) as u8;
        px[1] = ((px[1] as u16 * a + 127) / 255) as u8;
        px[2] = ((px[2] as u16 * a + 127) / 255) as u8;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn png_bytes(w: u32, h: u32, px: [u8; 4]) -> Vec<u8> {
        let img = image::RgbaImage::from_pixel(w, h, image::Rgba(px));
        let mut buf = Vec::new();
        image::DynamicImage::ImageRgba8(img)
            .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
            .unwrap();
        buf
    }

    #[test]
    fn decode_premultiplies_alpha() {
        let prepared = decode_image(&png_bytes(2, 2, [200, 100, 0, 128])).unwrap();
        assert_eq!((prepared.width, prepared.height), (2, 2));
        let px = &prepared.rgba8_premul[0..4];
        assert_eq!(px[3], 128);
        assert!((px[0] as i32 - 100).abs() <= 1);
        assert!((px[1] as i32 - 50).abs() <= 1);
    }

    #[test]
    fn decode_rejects_garbage() {
        assert!(decode_image(b"not an image").is_err());
    }

    #[test]
    fn scale_resizes_to_exact_tile_size() {
        let prepared = decode_image(&png_bytes(8, 8, [10, 20, 30, 255])).unwrap();
        let scaled = scale_to(&prepared, 3);
        assert_eq!((scaled.width, scaled.height), (3, 3));
        assert_eq!(scaled.rgba8_premul.len(), 3 * 3 * 4);
        // Uniform source stays uniform after resampling.
        assert_eq!(&scaled.rgba8_premul[0..4], &[10, 20, 30, 255]);
    }

    #[test]
    fn scale_is_identity_at_native_size() {
        let prepared = decode_image(&png_bytes(4, 4, [1, 2, 3, 255])).unwrap();
        let same = scale_to(&prepared, 4);
        assert!(Arc::ptr_eq(&prepared.rgba8_premul, &same.rgba8_premul));
    }
}
