use std::borrow::Cow;

use log::debug;
use rgb::RGB8;

use crate::error::Error;
use crate::image::Image;

/// Resizes `image` by `factor`, averaging the 3x3 source window around each
/// sampled position.
///
/// A factor of exactly 1 returns the input borrowed. Returns
/// [`Error::InvalidScaleFactor`] if `factor` is not finite or not positive.
pub fn scale(image: &Image, factor: f32) -> Result<Cow<'_, Image>, Error> {
    if !factor.is_finite() || factor <= 0.0 {
        return Err(Error::InvalidScaleFactor(factor));
    }

    if factor == 1.0 {
        return Ok(Cow::Borrowed(image));
    }

    let src_w = image.width();
    let src_h = image.height();
    let dst_w = scaled_dim(src_w, factor);
    let dst_h = scaled_dim(src_h, factor);

    debug!("scaling {}x{} image to {}x{}", src_w, src_h, dst_w, dst_h);

    let mut pixels = Vec::with_capacity(dst_w * dst_h);

    for y in 0..dst_h {
        let src_y = (y as f32 / factor).round() as i64;

        for x in 0..dst_w {
            let src_x = (x as f32 / factor).round() as i64;
            pixels.push(box_average(image, src_x, src_y));
        }
    }

    Ok(Cow::Owned(Image::from_parts(pixels, dst_w, dst_h)))
}

fn scaled_dim(dim: usize, factor: f32) -> usize {
    ((dim as f32 * factor).round() as usize).max(1)
}

fn box_average(image: &Image, cx: i64, cy: i64) -> RGB8 {
    let width = image.width() as i64;
    let height = image.height() as i64;

    let mut sum = [0u32; 3];
    let mut count = 0u32;

    for y in (cy - 1)..=(cy + 1) {
        if y < 0 || y >= height {
            continue;
        }

        for x in (cx - 1)..=(cx + 1) {
            if x < 0 || x >= width {
                continue;
            }

            let pix = image.pixel(x as usize, y as usize);
            sum[0] += pix.r as u32;
            sum[1] += pix.g as u32;
            sum[2] += pix.b as u32;
            count += 1;
        }
    }

    let count = count.max(1);
    let avg = |s: u32| ((s + count / 2) / count) as u8;

    RGB8::new(avg(sum[0]), avg(sum[1]), avg(sum[2]))
}
