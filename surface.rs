//! Drawing seam between the emitter and whatever renders it
//!
//! The emitter never rasterizes. It hands each live particle to a
//! [`DrawSurface`] as a [`Sprite`], optionally passing it through a
//! [`SpriteShader`] first.

use heapless::Vec;

use crate::color::ColorF;

/// Drawable snapshot of one particle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sprite {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    /// Radians
    pub rotation: f32,
    pub scale: f32,
    pub color: ColorF,
}

/// A point-sprite draw primitive. Failures are the surface's business.
pub trait DrawSurface {
    fn draw_point_sprite(&mut self, sprite: &Sprite);
}

impl<S: DrawSurface + ?Sized> DrawSurface for &mut S {
    fn draw_point_sprite(&mut self, sprite: &Sprite) {
        (**self).draw_point_sprite(sprite)
    }
}

/// Per-sprite decorator applied during a draw call.
pub trait SpriteShader {
    fn shade(&self, sprite: Sprite) -> Sprite;
}

/// Identity shader.
impl SpriteShader for () {
    fn shade(&self, sprite: Sprite) -> Sprite {
        sprite
    }
}

impl<H: SpriteShader + ?Sized> SpriteShader for &H {
    fn shade(&self, sprite: Sprite) -> Sprite {
        (**self).shade(sprite)
    }
}

/// Multiplies every sprite's color by a fixed color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tint(pub ColorF);

impl SpriteShader for Tint {
    fn shade(&self, mut sprite: Sprite) -> Sprite {
        sprite.color = sprite.color.modulate(self.0);
        sprite
    }
}

/// Collects sprites into a fixed buffer, e.g. for a later batched upload.
/// Sprites past the buffer's capacity are counted and dropped.
#[derive(Debug, Default)]
pub struct SpriteBuffer<const N: usize> {
    sprites: Vec<Sprite, N>,
    dropped: usize,
}

impl<const N: usize> SpriteBuffer<N> {
    pub const fn new() -> Self {
        Self {
            sprites: Vec::new(),
            dropped: 0,
        }
    }

    pub fn sprites(&self) -> &[Sprite] {
        &self.sprites
    }

    pub fn dropped(&self) -> usize {
        self.dropped
    }

    pub fn clear(&mut self) {
        self.sprites.clear();
        self.dropped = 0;
    }
}

impl<const N: usize> DrawSurface for SpriteBuffer<N> {
    fn draw_point_sprite(&mut self, sprite: &Sprite) {
        if self.sprites.push(*sprite).is_err() {
            self.dropped += 1;
        }
    }
}

#[cfg(feature = "embedded-graphics")]
pub use self::canvas::Canvas;

#[cfg(feature = "embedded-graphics")]
mod canvas {
    use embedded_graphics::{
        pixelcolor::Rgb888,
        prelude::*,
        primitives::{Circle, PrimitiveStyle},
    };

    use super::{DrawSurface, Sprite};

    /// Renders sprites onto an embedded-graphics target as filled circles.
    ///
    /// The targets have no alpha channel, so colors are premultiplied
    /// against black.
    pub struct Canvas<'a, D> {
        target: &'a mut D,
        base_size: f32,
        failures: usize,
    }

    impl<'a, D> Canvas<'a, D>
    where
        D: DrawTarget<Color = Rgb888>,
    {
        /// `base_size` is the diameter in pixels of a sprite at scale 1.
        pub fn new(target: &'a mut D, base_size: f32) -> Self {
            Self {
                target,
                base_size,
                failures: 0,
            }
        }

        /// Draw calls the target rejected.
        pub fn failures(&self) -> usize {
            self.failures
        }

        /// Circle diameter for `scale`, capped at twice the target's longer
        /// side.
        fn diameter(&self, scale: f32) -> u32 {
            let size = self.target.bounding_box().size;
            let limit = size.width.max(size.height).saturating_mul(2) as f32;
            // NaN casts to 0
            (self.base_size * scale).clamp(0.0, limit) as u32
        }
    }

    impl<D> DrawSurface for Canvas<'_, D>
    where
        D: DrawTarget<Color = Rgb888>,
    {
        fn draw_point_sprite(&mut self, sprite: &Sprite) {
            let diameter = self.diameter(sprite.scale);
            if diameter == 0 || sprite.color.a <= 0.0 {
                return;
            }
            let rgba = sprite.color.to_rgba();
            let premultiply = |c: u8| ((c as u16 * rgba.a as u16) / 255) as u8;
            let color = Rgb888::new(premultiply(rgba.r), premultiply(rgba.g), premultiply(rgba.b));

            let center = Point::new(sprite.x as i32, sprite.y as i32);
            if Circle::with_center(center, diameter)
                .into_styled(PrimitiveStyle::with_fill(color))
                .draw(&mut *self.target)
                .is_err()
            {
                self.failures += 1;
            }
        }
    }

}
