//! The particle emitter: configuration, pool, scheduler and RNG in one unit

use core::f32::consts::TAU;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::color::{ColorF, Rgba};
use crate::config::{EmitterConfig, DEFAULT_MAX_PARTICLES};
use crate::error::{EmitterError, Result};
use crate::particle::Particle;
use crate::pool::ParticlePool;
use crate::range::RangedAttribute;
use crate::scheduler::{check_delta, EmissionScheduler};
use crate::surface::{DrawSurface, SpriteShader};
use crate::value::Value;

/// Seed used when the caller does not supply one. There is no entropy
/// source in `no_std`.
pub const DEFAULT_SEED: u64 = 0x1234_5678;

/// Generates getter/setter pairs for the ranged attributes.
macro_rules! ranged_accessors {
    ($($name:ident / $setter:ident),* $(,)?) => {
        $(
            pub fn $name(&self) -> RangedAttribute {
                self.config.$name
            }

            pub fn $setter(&mut self, value: impl Into<RangedAttribute>) {
                self.config.$name = value.into();
            }
        )*
    };
}

/// Emits, ages and draws particles.
///
/// `N` is the pool's storage size, fixed at compile time; the runtime
/// `max_particles` can be anything in `1..=N`. Nothing is heap-allocated,
/// so the emitter can be large: `ParticleEmitter<1000>` keeps its
/// particles inline.
#[derive(Debug)]
pub struct ParticleEmitter<const N: usize = DEFAULT_MAX_PARTICLES> {
    x: f32,
    y: f32,
    z: f32,
    config: EmitterConfig,
    image_size: Option<(f32, f32)>,
    pool: ParticlePool<N>,
    scheduler: EmissionScheduler,
    rng: SmallRng,
}

impl<const N: usize> ParticleEmitter<N> {
    /// Emitter with default configuration, capped at `min(N, 1000)`.
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        let pool = ParticlePool::clamped(DEFAULT_MAX_PARTICLES);
        let config = EmitterConfig {
            max_particles: pool.max_particles(),
            ..Default::default()
        };
        Self::assemble(x, y, z, config, pool, DEFAULT_SEED)
    }

    pub fn with_config(x: f32, y: f32, z: f32, config: EmitterConfig) -> Result<Self> {
        Self::with_seed(x, y, z, config, DEFAULT_SEED)
    }

    pub fn with_seed(x: f32, y: f32, z: f32, config: EmitterConfig, seed: u64) -> Result<Self> {
        config.validate(N)?;
        let pool = ParticlePool::new(config.max_particles)?;
        Ok(Self::assemble(x, y, z, config, pool, seed))
    }

    fn assemble(x: f32, y: f32, z: f32, config: EmitterConfig, pool: ParticlePool<N>, seed: u64) -> Self {
        tracing::debug!(x, y, z, max_particles = config.max_particles, "emitter created");
        Self {
            x,
            y,
            z,
            config,
            image_size: None,
            pool,
            scheduler: EmissionScheduler::new(),
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Build from a loosely-typed option bag, e.g. one handed over by a
    /// scripting layer.
    pub fn from_options(x: f32, y: f32, z: f32, options: &[(&str, Value<'_>)]) -> Result<Self> {
        let config = EmitterConfig::from_options(options)?;
        Self::with_config(x, y, z, config)
    }

    pub fn x(&self) -> f32 {
        self.x
    }

    pub fn set_x(&mut self, x: f32) {
        self.x = x;
    }

    pub fn y(&self) -> f32 {
        self.y
    }

    pub fn set_y(&mut self, y: f32) {
        self.y = y;
    }

    pub fn z(&self) -> f32 {
        self.z
    }

    pub fn set_z(&mut self, z: f32) {
        self.z = z;
    }

    ranged_accessors! {
        angular_velocity / set_angular_velocity,
        center_x / set_center_x,
        center_y / set_center_y,
        fade / set_fade,
        friction / set_friction,
        interval / set_interval,
        offset / set_offset,
        scale / set_scale,
        speed / set_speed,
        time_to_live / set_time_to_live,
        zoom / set_zoom,
    }

    pub fn gravity(&self) -> f32 {
        self.config.gravity
    }

    /// Downward acceleration for particles emitted from now on.
    pub fn set_gravity(&mut self, gravity: f32) {
        self.config.gravity = gravity;
    }

    pub fn color(&self) -> Rgba {
        self.config.color
    }

    pub fn set_color(&mut self, color: Rgba) {
        self.config.color = color;
    }

    pub fn max_particles(&self) -> usize {
        self.pool.max_particles()
    }

    /// Change the cap; shrinking evicts the oldest particles.
    pub fn set_max_particles(&mut self, max_particles: usize) -> Result<()> {
        self.pool.set_max_particles(max_particles)?;
        self.config.max_particles = max_particles;
        tracing::debug!(max_particles, "emitter cap changed");
        Ok(())
    }

    /// Size of the image particles are drawn with, if bound. Spawn offsets
    /// (`center_x`, `center_y`) are fractions of it.
    pub fn image_size(&self) -> Option<(f32, f32)> {
        self.image_size
    }

    pub fn set_image_size(&mut self, size: Option<(f32, f32)>) {
        self.image_size = size;
    }

    pub fn config(&self) -> &EmitterConfig {
        &self.config
    }

    /// Set one option by name, as accepted by [`EmitterConfig::set_option`].
    pub fn set_option(&mut self, key: &str, value: &Value<'_>) -> Result<()> {
        if key == "max_particles" {
            let mut staged = self.config;
            staged.set_option(key, value)?;
            return self.set_max_particles(staged.max_particles);
        }
        self.config.set_option(key, value)
    }

    pub fn count(&self) -> usize {
        self.pool.len()
    }

    /// Live particles, oldest first.
    pub fn particles(&self) -> impl Iterator<Item = &Particle> {
        self.pool.iter()
    }

    /// Drop every live particle and any accrued emission time.
    pub fn clear(&mut self) {
        self.pool.clear();
        self.scheduler.reset();
    }

    /// Create one particle from the configured ranges.
    pub fn emit(&mut self) {
        let particle = self.sample_particle();
        if let Some(evicted) = self.pool.insert(particle) {
            tracing::trace!(age = evicted.age, "evicted oldest particle");
        }
    }

    fn sample_particle(&mut self) -> Particle {
        let rng = &mut self.rng;
        let c = &self.config;

        let (offset_x, offset_y) = match self.image_size {
            Some((width, height)) => (c.center_x.sample(rng) * width, c.center_y.sample(rng) * height),
            None => (c.center_x.sample(rng), c.center_y.sample(rng)),
        };
        let angle = rng.gen_range(0.0..TAU);
        let distance = c.offset.sample(rng);

        Particle {
            x: self.x + offset_x + distance * libm::cosf(angle),
            y: self.y + offset_y + distance * libm::sinf(angle),
            z: self.z,
            angle,
            speed: c.speed.sample(rng),
            angular_velocity: c.angular_velocity.sample(rng),
            scale: c.scale.sample(rng),
            zoom: c.zoom.sample(rng),
            fade: c.fade.sample(rng),
            friction: c.friction.sample(rng),
            gravity: c.gravity,
            fall_speed: 0.0,
            color: ColorF::from(c.color),
            time_to_live: c.time_to_live.sample(rng),
            age: 0.0,
        }
    }

    /// Advance the simulation by `delta` seconds.
    ///
    /// Emits whatever the interval says is due, ages every particle and
    /// prunes the expired ones. A rejected `delta` leaves the emitter
    /// untouched.
    pub fn update(&mut self, delta: f32) -> Result<()> {
        check_delta(delta)?;

        let due = self.scheduler.due_count(delta, self.config.interval.low())?;
        let cap = self.pool.max_particles();
        // Anything past the cap would only evict what this same batch emitted
        let emit_count = (due as usize).min(cap);
        if emit_count < due as usize {
            tracing::debug!(due, cap, "emission burst capped at pool size");
        }
        if emit_count > 0 {
            tracing::trace!(count = emit_count, "emitting");
        }
        for _ in 0..emit_count {
            self.emit();
        }

        for particle in self.pool.iter_mut() {
            particle.advance(delta);
        }
        let expired = self.pool.prune_expired();
        if expired > 0 {
            tracing::trace!(expired, "pruned expired particles");
        }
        Ok(())
    }

    /// [`update`](Self::update) for deltas arriving through an untyped
    /// boundary. Non-numeric values are a `TypeMismatch`.
    pub fn update_value(&mut self, delta: &Value<'_>) -> Result<()> {
        let delta = delta
            .as_number()
            .ok_or(EmitterError::type_mismatch("numeric delta"))?;
        self.update(delta as f32)
    }

    /// Hand every live particle to `surface`, oldest first.
    pub fn draw<S: DrawSurface + ?Sized>(&self, surface: &mut S) {
        self.draw_with(surface, &());
    }

    /// Like [`draw`](Self::draw), passing each sprite through `shader`.
    pub fn draw_with<S, H>(&self, surface: &mut S, shader: &H)
    where
        S: DrawSurface + ?Sized,
        H: SpriteShader + ?Sized,
    {
        for particle in self.pool.iter() {
            surface.draw_point_sprite(&shader.shade(particle.sprite()));
        }
    }
}
