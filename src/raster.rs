//! Gradient rasters for the hue strip and the saturation/value plane.
//!
//! Both generators are pure functions of the target size (and, for the plane,
//! the hue). Pixels are sampled through [`Rgb565`] and expanded back to 8 bits,
//! so the preview shows exactly the colors a 16-bit panel can display.
//!
//! Output is row-major RGBA with 4 bytes per pixel and alpha fixed at 255,
//! ready to hand to an image-data style surface.
//!
//! Rendering costs `O(width * height)` conversions. [`hue_strip`] and
//! [`saturation_value_plane`] memoize results in small process-wide LRUs so
//! that every picker on a page shares one strip and repeated hues are free.

use lru::LruCache;
use std::fmt;
use std::num::NonZeroUsize;
use std::sync::{Arc, LazyLock, Mutex};

use crate::color::{Rgb565, Rgb888, normalize_hue};
use crate::sync::lock_recover_debug;

/// Bytes per RGBA pixel.
pub const BYTES_PER_PIXEL: usize = 4;

const STRIP_CACHE_CAPACITY: NonZeroUsize = NonZeroUsize::new(16).unwrap();
const PLANE_CACHE_CAPACITY: NonZeroUsize = NonZeroUsize::new(8).unwrap();

/// An RGBA pixel buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raster {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl Raster {
    /// Render a raster by evaluating `sample(x, y)` for every pixel.
    fn from_fn(width: u32, height: u32, mut sample: impl FnMut(u32, u32) -> Rgb888) -> Self {
        let mut pixels = Vec::with_capacity(width as usize * height as usize * BYTES_PER_PIXEL);
        for y in 0..height {
            for x in 0..width {
                let color = sample(x, y);
                pixels.extend_from_slice(&[color.red, color.green, color.blue, 255]);
            }
        }
        Self {
            width,
            height,
            pixels,
        }
    }

    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Raw RGBA bytes, row-major.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.pixels
    }

    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.pixels
    }

    /// Color of the pixel at `(x, y)`, or `None` outside the raster.
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgb888> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let index = (y as usize * self.width as usize + x as usize) * BYTES_PER_PIXEL;
        let px = self.pixels.get(index..index + 3)?;
        Some(Rgb888::new(px[0], px[1], px[2]))
    }

    /// RGBA bytes of row `y`.
    #[must_use]
    pub fn row(&self, y: u32) -> Option<&[u8]> {
        if y >= self.height {
            return None;
        }
        let stride = self.width as usize * BYTES_PER_PIXEL;
        let start = y as usize * stride;
        self.pixels.get(start..start + stride)
    }
}

/// Fraction `index / extent` as used for pixel-to-component mapping.
fn fraction(index: u32, extent: u32) -> f64 {
    f64::from(index) / f64::from(extent)
}

/// Render the hue strip: hue `(x / width) * 360` at full saturation and value.
///
/// Every row is identical.
#[must_use]
pub fn render_hue_strip(width: u32, height: u32) -> Raster {
    log::trace!("rendering hue strip {width}x{height}");
    let columns: Vec<Rgb888> = (0..width)
        .map(|x| Rgb565::from_hsv(fraction(x, width) * 360.0, 1.0, 1.0).to_rgb888())
        .collect();
    Raster::from_fn(width, height, |x, _| columns[x as usize])
}

/// Render the saturation/value plane for `hue`.
///
/// Pixel `(x, y)` shows saturation `x / width` and value `y / height`.
#[must_use]
pub fn render_saturation_value_plane(width: u32, height: u32, hue: f64) -> Raster {
    log::trace!("rendering saturation/value plane {width}x{height} at hue {hue:.2}");
    Raster::from_fn(width, height, |x, y| {
        Rgb565::from_hsv(hue, fraction(x, width), fraction(y, height)).to_rgb888()
    })
}

type RasterCache<K> = LazyLock<Mutex<LruCache<K, Arc<Raster>>>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct StripKey {
    width: u32,
    height: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct PlaneKey {
    width: u32,
    height: u32,
    hue_bits: u64,
}

static STRIPS: RasterCache<StripKey> =
    LazyLock::new(|| Mutex::new(LruCache::new(STRIP_CACHE_CAPACITY)));

// A hue drag renders a new plane per step; only the last few are worth keeping.
static PLANES: RasterCache<PlaneKey> =
    LazyLock::new(|| Mutex::new(LruCache::new(PLANE_CACHE_CAPACITY)));

fn cached<K>(
    cache: &Mutex<LruCache<K, Arc<Raster>>>,
    context: &str,
    key: K,
    render: impl FnOnce() -> Raster,
) -> Arc<Raster>
where
    K: std::hash::Hash + Eq + fmt::Debug,
{
    if let Some(hit) = lock_recover_debug(cache, context).get(&key) {
        return Arc::clone(hit);
    }

    // Rendered outside the lock; concurrent misses may both render.
    log::trace!("{context} miss: {key:?}");
    let raster = Arc::new(render());
    lock_recover_debug(cache, context).put(key, Arc::clone(&raster));
    raster
}

/// Shared, cached hue strip.
#[must_use]
pub fn hue_strip(width: u32, height: u32) -> Arc<Raster> {
    cached(&STRIPS, "hue strip cache", StripKey { width, height }, || {
        render_hue_strip(width, height)
    })
}

/// Shared, cached saturation/value plane.
#[must_use]
pub fn saturation_value_plane(width: u32, height: u32, hue: f64) -> Arc<Raster> {
    let hue = normalize_hue(hue);
    let key = PlaneKey {
        width,
        height,
        hue_bits: hue.to_bits(),
    };
    cached(&PLANES, "plane cache", key, || {
        render_saturation_value_plane(width, height, hue)
    })
}
