//! A single simulated particle and its per-tick integration

use crate::color::ColorF;
use crate::surface::Sprite;

/// Alpha units `fade` is expressed in (8-bit channel scale).
const ALPHA_UNITS: f32 = 255.0;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Particle {
    pub x: f32,
    pub y: f32,
    /// Draw order, copied from the emitter at creation
    pub z: f32,
    /// Direction of travel and sprite rotation, in radians
    pub angle: f32,
    pub speed: f32,
    pub angular_velocity: f32,
    pub scale: f32,
    /// Scale change per second
    pub zoom: f32,
    /// Alpha decay per second, in 0-255 alpha units
    pub fade: f32,
    /// Speed decay per second
    pub friction: f32,
    /// Downward acceleration, pixels per second squared
    pub gravity: f32,
    /// Vertical velocity gained from gravity so far
    pub fall_speed: f32,
    pub color: ColorF,
    /// Seconds; `f32::INFINITY` never expires by age
    pub time_to_live: f32,
    pub age: f32,
}

impl Default for Particle {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            z: 0.0,
            angle: 0.0,
            speed: 0.0,
            angular_velocity: 0.0,
            scale: 1.0,
            zoom: 0.0,
            fade: 0.0,
            friction: 0.0,
            gravity: 0.0,
            fall_speed: 0.0,
            color: ColorF::WHITE,
            time_to_live: f32::INFINITY,
            age: 0.0,
        }
    }
}

impl Particle {
    pub fn is_expired(&self) -> bool {
        self.time_to_live.is_finite() && self.age >= self.time_to_live
    }

    /// Advance the particle by `delta` seconds.
    ///
    /// Movement uses the velocity from the start of the tick; friction,
    /// gravity, rotation, zoom and fade are applied afterwards.
    pub fn advance(&mut self, delta: f32) {
        self.age += delta;

        // CHANGE: libm trig instead of std float methods
        // REASON: no_std
        self.x += self.speed * libm::cosf(self.angle) * delta;
        self.y += (self.speed * libm::sinf(self.angle) + self.fall_speed) * delta;

        self.speed = (self.speed - self.friction * delta).max(0.0);
        self.fall_speed += self.gravity * delta;
        self.angle += self.angular_velocity * delta;
        self.scale += self.zoom * delta;
        self.color.a = (self.color.a - self.fade / ALPHA_UNITS * delta).max(0.0);
    }

    pub fn sprite(&self) -> Sprite {
        Sprite {
            x: self.x,
            y: self.y,
            z: self.z,
            rotation: self.angle,
            scale: self.scale,
            color: self.color,
        }
    }
}
