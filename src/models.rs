use image::{DynamicImage, GrayImage, Luma, RgbImage};
use serde::Serialize;

use crate::detection::geometry;
use crate::error::DetectError;

/// Sample order of a raw frame handed in by a loader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChannelOrder {
    #[default]
    Rgb,
    Bgr,
}

/// Decoded input frame, always stored in RGB order.
#[derive(Debug, Clone)]
pub struct PixelBuffer {
    image: RgbImage,
}

impl PixelBuffer {
    /// Wrap raw interleaved samples. The length must be exactly `width * height * 3`.
    pub fn from_raw(
        width: u32,
        height: u32,
        mut data: Vec<u8>,
        order: ChannelOrder,
    ) -> Result<Self, DetectError> {
        let expected = width as usize * height as usize * 3;
        if data.len() != expected {
            return Err(DetectError::InvalidBuffer {
                width,
                height,
                len: data.len(),
            });
        }

        if order == ChannelOrder::Bgr {
            for px in data.chunks_exact_mut(3) {
                px.swap(0, 2);
            }
        }

        let len = data.len();
        let image = RgbImage::from_raw(width, height, data)
            .ok_or(DetectError::InvalidBuffer { width, height, len })?;
        Ok(Self { image })
    }

    pub fn from_rgb_image(image: RgbImage) -> Self {
        Self { image }
    }

    pub fn from_dynamic(img: &DynamicImage) -> Self {
        Self {
            image: img.to_rgb8(),
        }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    /// RGB triple at (x, y). Panics when out of bounds, like `ImageBuffer::get_pixel`.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 3] {
        self.image.get_pixel(x, y).0
    }

    pub fn as_rgb_image(&self) -> &RgbImage {
        &self.image
    }
}

/// One HSV sample: hue in [0, 179], saturation and value in [0, 255].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Hsv {
    pub h: u8,
    pub s: u8,
    pub v: u8,
}

/// HSV rendition of a [`PixelBuffer`], same dimensions, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HsvBuffer {
    width: u32,
    height: u32,
    data: Vec<Hsv>,
}

impl HsvBuffer {
    pub(crate) fn from_vec(width: u32, height: u32, data: Vec<Hsv>) -> Self {
        debug_assert_eq!(data.len(), width as usize * height as usize);
        Self {
            width,
            height,
            data,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn get(&self, x: u32, y: u32) -> Hsv {
        self.data[y as usize * self.width as usize + x as usize]
    }

    pub fn as_slice(&self) -> &[Hsv] {
        &self.data
    }
}

const FOREGROUND: Luma<u8> = Luma([255]);
const BACKGROUND: Luma<u8> = Luma([0]);

/// Binary foreground mask, stored as a 0/255 gray image so it can be handed
/// to imageproc and dumped as-is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mask {
    image: GrayImage,
}

impl Mask {
    /// All-background mask.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: GrayImage::new(width, height),
        }
    }

    pub fn from_fn(width: u32, height: u32, mut f: impl FnMut(u32, u32) -> bool) -> Self {
        let image = GrayImage::from_fn(width, height, |x, y| {
            if f(x, y) { FOREGROUND } else { BACKGROUND }
        });
        Self { image }
    }

    /// Any nonzero pixel counts as foreground.
    pub fn from_gray(image: &GrayImage) -> Self {
        Self::from_fn(image.width(), image.height(), |x, y| {
            image.get_pixel(x, y)[0] != 0
        })
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn get(&self, x: u32, y: u32) -> bool {
        self.image.get_pixel(x, y)[0] != 0
    }

    /// Bounds-checked lookup with signed coordinates; outside reads as background.
    pub fn get_signed(&self, x: i32, y: i32) -> bool {
        x >= 0
            && y >= 0
            && (x as u32) < self.width()
            && (y as u32) < self.height()
            && self.get(x as u32, y as u32)
    }

    pub fn set(&mut self, x: u32, y: u32, foreground: bool) {
        let value = if foreground { FOREGROUND } else { BACKGROUND };
        self.image.put_pixel(x, y, value);
    }

    /// Number of foreground pixels.
    pub fn count(&self) -> usize {
        self.image.pixels().filter(|p| p[0] != 0).count()
    }

    pub fn as_gray(&self) -> &GrayImage {
        &self.image
    }
}

/// Integer pixel coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned bounding box, inclusive of its edge pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BoundingBox {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Sub-pixel centroid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Centroid {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Circle {
    pub cx: f64,
    pub cy: f64,
    pub radius: f64,
}

impl Circle {
    pub fn contains(&self, x: f64, y: f64, tolerance: f64) -> bool {
        let dx = x - self.cx;
        let dy = y - self.cy;
        (dx * dx + dy * dy).sqrt() <= self.radius + tolerance
    }
}

/// Closed outer boundary of one 8-connected foreground component. The first
/// point is the component's topmost-then-leftmost pixel and is not repeated
/// at the end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contour {
    pub points: Vec<Point>,
    /// Foreground pixels in the traced component.
    pub pixel_count: u32,
}

impl Contour {
    pub fn start(&self) -> Option<Point> {
        self.points.first().copied()
    }

    pub fn area(&self) -> f64 {
        geometry::polygon_area(&self.points)
    }

    pub fn bounding_box(&self) -> BoundingBox {
        geometry::bounding_box(&self.points)
    }

    pub fn centroid(&self) -> Option<Centroid> {
        geometry::moments(&self.points).centroid()
    }

    pub fn min_enclosing_circle(&self) -> Option<Circle> {
        geometry::min_enclosing_circle(&self.points)
    }

    pub fn distinct_points(&self) -> usize {
        let mut pts = self.points.clone();
        pts.sort_unstable();
        pts.dedup();
        pts.len()
    }
}

/// One labeled region reported by the detector.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Detection {
    pub label: String,
    pub bbox: BoundingBox,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub centroid: Option<Centroid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub circle: Option<Circle>,
    /// Polygon area of the traced boundary.
    pub area: f64,
    pub pixel_count: u32,
}
