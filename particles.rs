//! particles-fx - 2-D particle emitters and pixel read-back for games
//! No heap allocation, no_std compatible
//!
//! A [`ParticleEmitter`] owns a fixed-capacity [`ParticlePool`] and an
//! [`EmissionScheduler`]. The host calls [`ParticleEmitter::update`] once
//! per frame with the elapsed time and [`ParticleEmitter::draw`] with
//! whatever [`DrawSurface`] it renders to:
//!
//! ```
//! use particles_fx::{ParticleEmitter, SpriteBuffer};
//!
//! let mut emitter: ParticleEmitter<256> = ParticleEmitter::new(160.0, 85.0, 0.0);
//! emitter.set_interval(0.01);
//! emitter.set_speed([20.0, 40.0]);
//! emitter.set_time_to_live([0.5, 1.5]);
//!
//! emitter.update(1.0 / 60.0).unwrap();
//!
//! let mut sprites = SpriteBuffer::<256>::new();
//! emitter.draw(&mut sprites);
//! assert_eq!(sprites.sprites().len(), emitter.count());
//! ```

#![cfg_attr(not(test), no_std)]

pub mod color;
pub mod config;
pub mod emitter;
pub mod error;
pub mod particle;
pub mod pixel_cache;
pub mod pool;
pub mod range;
pub mod scheduler;
pub mod surface;
pub mod value;

pub use color::{ColorF, Rgba};
pub use config::{EmitterConfig, DEFAULT_MAX_PARTICLES, OPTION_KEYS};
pub use emitter::{ParticleEmitter, DEFAULT_SEED};
pub use error::{EmitterError, Result};
pub use particle::Particle;
pub use pixel_cache::{PixelCache, PixelSource};
pub use pool::ParticlePool;
pub use range::RangedAttribute;
pub use scheduler::EmissionScheduler;
#[cfg(feature = "embedded-graphics")]
pub use surface::Canvas;
pub use surface::{DrawSurface, Sprite, SpriteBuffer, SpriteShader, Tint};
pub use value::Value;
