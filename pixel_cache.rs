//! Read-back cache over a rendered pixel buffer
//!
//! Reading pixels back from a render target is slow, so the cache keeps a
//! snapshot and only re-reads after it has been marked stale.

use heapless::Vec;

use crate::color::Rgba;
use crate::error::{EmitterError, Result};

/// Anything that can copy out its RGBA pixels, row-major.
pub trait PixelSource {
    fn width(&self) -> u32;
    fn height(&self) -> u32;
    /// Fill `out` (exactly `width * height` long) with the current pixels.
    fn read_pixels(&self, out: &mut [Rgba]);
}

/// Lazy RGBA snapshot of a [`PixelSource`] holding at most `CAPACITY`
/// pixels.
///
/// The cache owns its source. Mutable access through
/// [`owner_mut`](Self::owner_mut) marks the snapshot stale, as does
/// [`refresh`](Self::refresh); the next in-bounds read re-snapshots.
/// Dimensions are fixed at construction.
pub struct PixelCache<S, const CAPACITY: usize> {
    owner: S,
    width: u32,
    height: u32,
    data: Vec<Rgba, CAPACITY>,
    is_cached: bool,
}

impl<S: PixelSource, const CAPACITY: usize> PixelCache<S, CAPACITY> {
    /// Wrap `owner` and take the first snapshot.
    pub fn new(owner: S) -> Result<Self> {
        let width = owner.width();
        let height = owner.height();
        let len = (width as usize)
            .checked_mul(height as usize)
            .filter(|&len| len <= CAPACITY)
            .ok_or(EmitterError::InvalidArgument("source is larger than the cache capacity"))?;

        let mut data = Vec::new();
        // len <= CAPACITY was checked above
        let _ = data.resize(len, Rgba::TRANSPARENT);

        let mut cache = Self {
            owner,
            width,
            height,
            data,
            is_cached: false,
        };
        cache.cache_pixels();
        Ok(cache)
    }

    fn cache_pixels(&mut self) {
        self.owner.read_pixels(&mut self.data);
        self.is_cached = true;
        tracing::trace!(width = self.width, height = self.height, "pixel cache refreshed");
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn owner(&self) -> &S {
        &self.owner
    }

    /// Mutable access to the source; invalidates the snapshot.
    pub fn owner_mut(&mut self) -> &mut S {
        self.is_cached = false;
        &mut self.owner
    }

    pub fn into_inner(self) -> S {
        self.owner
    }

    /// Mark the snapshot stale. The copy is taken on the next read.
    pub fn refresh(&mut self) {
        self.is_cached = false;
    }

    pub fn is_cached(&self) -> bool {
        self.is_cached
    }

    /// Color at `(x, y)`; transparent black outside the buffer.
    pub fn pixel(&mut self, x: i32, y: i32) -> Rgba {
        if x < 0 || y < 0 || x as u32 >= self.width || y as u32 >= self.height {
            return Rgba::TRANSPARENT;
        }
        if !self.is_cached {
            self.cache_pixels();
        }
        self.data[x as usize + y as usize * self.width as usize]
    }

    pub fn rgba(&mut self, x: i32, y: i32) -> [u8; 4] {
        self.pixel(x, y).to_array()
    }

    pub fn red(&mut self, x: i32, y: i32) -> u8 {
        self.pixel(x, y).r
    }

    pub fn green(&mut self, x: i32, y: i32) -> u8 {
        self.pixel(x, y).g
    }

    pub fn blue(&mut self, x: i32, y: i32) -> u8 {
        self.pixel(x, y).b
    }

    pub fn alpha(&mut self, x: i32, y: i32) -> u8 {
        self.pixel(x, y).a
    }

    pub fn is_transparent(&mut self, x: i32, y: i32) -> bool {
        self.pixel(x, y).a == 0
    }

    /// Copy the snapshot into `out` as RGBA bytes. Returns the number of
    /// bytes written.
    pub fn write_blob(&mut self, out: &mut [u8]) -> Result<usize> {
        let len = self.data.len() * 4;
        if out.len() < len {
            return Err(EmitterError::InvalidArgument("blob buffer is too small"));
        }
        if !self.is_cached {
            self.cache_pixels();
        }
        for (chunk, pixel) in out.chunks_exact_mut(4).zip(self.data.iter()) {
            chunk.copy_from_slice(&pixel.to_array());
        }
        Ok(len)
    }
}
