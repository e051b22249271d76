use crate::color::Rgba8Premul;

pub type PremulRgba8 = [u8; 4];

/// Source-over blend of premultiplied RGBA8 pixels.
pub fn over(dst: PremulRgba8, src: PremulRgba8) -> PremulRgba8 {
    if src[3] == 0 {
        return dst;
    }
    if src[3] == 255 {
        return src;
    }

    let inv = 255u16 - u16::from(src[3]);

    let mut out = [0u8; 4];
    for i in 0..4 {
        let dc = mul_div255(u16::from(dst[i]), inv);
        out[i] = src[i].saturating_add(dc);
    }
    out
}

fn mul_div255(x: u16, y: u16) -> u8 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u8
}

/// The single mutable output surface of one render.
///
/// Row-major premultiplied RGBA8, tightly packed. The compositor is the only
/// writer; everything else reads.
#[derive(Clone, Debug)]
pub struct Canvas {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Canvas {
    /// Allocate a fully transparent canvas.
    pub fn new(width: u32, height: u32) -> Self {
        let len = (width as usize) * (height as usize) * 4;
        Self {
            width,
            height,
            data: vec![0u8; len],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Premultiplied pixel bytes, row-major.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba8Premul> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        let px = &self.data[idx..idx + 4];
        Some(Rgba8Premul {
            r: px[0],
            g: px[1],
            b: px[2],
            a: px[3],
        })
    }

    /// Blend a single pixel with source-over; out-of-bounds writes are
    /// silently clipped.
    pub fn blend_pixel(&mut self, x: u32, y: u32, color: Rgba8Premul) {
        if x >= self.width || y >= self.height {
            return;
        }
        let idx = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        let dst = [
            self.data[idx],
            self.data[idx + 1],
            self.data[idx + 2],
            self.data[idx + 3],
        ];
        let out = over(dst, [color.r, color.g, color.b, color.a]);
        self.data[idx..idx + 4].copy_from_slice(&out);
    }

    /// Blend a solid rectangle, clipped to the canvas.
    pub fn fill_rect(&mut self, x: u32, y: u32, w: u32, h: u32, color: Rgba8Premul) {
        let src = [color.r, color.g, color.b, color.a];
        let x1 = x.min(self.width);
        let y1 = y.min(self.height);
        let x2 = x.saturating_add(w).min(self.width);
        let y2 = y.saturating_add(h).min(self.height);

        for row in y1..y2 {
            let start = ((row as usize) * (self.width as usize) + (x1 as usize)) * 4;
            let end = ((row as usize) * (self.width as usize) + (x2 as usize)) * 4;
            for px in self.data[start..end].chunks_exact_mut(4) {
                let out = over([px[0], px[1], px[2], px[3]], src);
                px.copy_from_slice(&out);
            }
        }
    }

    /// Draw the four edge bands of a rectangle outline, `[x, y]` to the
    /// inclusive corner `[x2, y2]`, each band `thickness` pixels deep.
    pub fn stroke_rect(&mut self, x: u32, y: u32, x2: u32, y2: u32, thickness: u32, color: Rgba8Premul) {
        if thickness == 0 || x2 < x || y2 < y {
            return;
        }
        let w = x2 - x + 1;
        let h = y2 - y + 1;
        let t = thickness.min(w).min(h);

        // Top and bottom bands cover the full width; the side bands fill
        // the remaining rows so corners are painted exactly once.
        self.fill_rect(x, y, w, t, color);
        self.fill_rect(x, y2 + 1 - t, w, t, color);
        if h > 2 * t {
            self.fill_rect(x, y + t, t, h - 2 * t, color);
            self.fill_rect(x2 + 1 - t, y + t, t, h - 2 * t, color);
        }
    }

    /// Paste premultiplied RGBA8 pixels with source-over blending, clipped
    /// to the canvas.
    pub fn blit(&mut self, x: u32, y: u32, src_w: u32, src_h: u32, src: &[u8]) {
        debug_assert_eq!(src.len(), (src_w as usize) * (src_h as usize) * 4);

        if x >= self.width || y >= self.height {
            return;
        }
        let cols = src_w.min(self.width.saturating_sub(x));
        let rows = src_h.min(self.height.saturating_sub(y));

        for row in 0..rows {
            let dst_start =
                (((y + row) as usize) * (self.width as usize) + (x as usize)) * 4;
            let src_start = (row as usize) * (src_w as usize) * 4;
            let dst_row = &mut self.data[dst_start..dst_start + (cols as usize) * 4];
            let src_row = &src[src_start..src_start + (cols as usize) * 4];
            for (d, s) in dst_row.chunks_exact_mut(4).zip(src_row.chunks_exact(4)) {
                let out = over([d[0], d[1], d[2], d[3]], [s[0], s[1], s[2], s[3]]);
                d.copy_from_slice(&out);
            }
        }
    }

    /// Convert to straight-alpha RGBA8 for encoding.
    pub fn to_straight_rgba8(&self) -> Vec<u8> {
        let mut out = self.data.clone();
        for px in out.chunks_exact_mut(4) {
            let a = px[3] as u32;
            if a == 0 || a == 255 {
                continue;
            }
            px[0] = ((px[0] as u32 * 255 + a / 2) / a).min(255) as u8;
            px[1] = ((px[1] as u32 * 255 + a / 2) / a).min(255) as u8;
            px[2] = ((px[2] as u32 * 255 + a / 2) / a).min(255) as u8;
        }
        out
    }
}
