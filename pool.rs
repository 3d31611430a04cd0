//! Fixed-capacity particle storage with oldest-first eviction

// CHANGE: heapless::Deque ring buffer instead of an active-flag array
// REASON: O(1) eviction of the oldest particle, no scan for a free slot
use heapless::Deque;

use crate::error::{EmitterError, Result};
use crate::particle::Particle;

/// Ring buffer of particles, oldest at the head.
///
/// `N` is the compile-time storage size; `max_particles` is the runtime cap
/// and never exceeds it.
#[derive(Debug)]
pub struct ParticlePool<const N: usize> {
    particles: Deque<Particle, N>,
    max_particles: usize,
}

impl<const N: usize> ParticlePool<N> {
    pub fn new(max_particles: usize) -> Result<Self> {
        Self::check_max(max_particles)?;
        Ok(Self {
            particles: Deque::new(),
            max_particles,
        })
    }

    /// Pool whose cap is `max_particles` pulled into `1..=N`.
    pub fn clamped(max_particles: usize) -> Self {
        const { assert!(N > 0, "ParticlePool needs N > 0") };
        Self {
            particles: Deque::new(),
            max_particles: max_particles.clamp(1, N),
        }
    }

    fn check_max(max_particles: usize) -> Result<()> {
        if max_particles == 0 {
            return Err(EmitterError::InvalidArgument("max_particles must be > 0"));
        }
        if max_particles > N {
            return Err(EmitterError::InvalidArgument(
                "max_particles exceeds the pool's storage capacity",
            ));
        }
        Ok(())
    }

    /// Append `particle`, evicting and returning the oldest one when full.
    pub fn insert(&mut self, particle: Particle) -> Option<Particle> {
        let evicted = if self.particles.len() >= self.max_particles {
            self.particles.pop_front()
        } else {
            None
        };
        // max_particles <= N, so there is always room after the eviction
        let _ = self.particles.push_back(particle);
        evicted
    }

    /// Remove every expired particle, keeping survivors in age order.
    /// Returns the number removed.
    pub fn prune_expired(&mut self) -> usize {
        let before = self.particles.len();
        for _ in 0..before {
            if let Some(p) = self.particles.pop_front() {
                if !p.is_expired() {
                    let _ = self.particles.push_back(p);
                }
            }
        }
        before - self.particles.len()
    }

    /// Change the runtime cap. Shrinking below the live count evicts the
    /// oldest particles.
    pub fn set_max_particles(&mut self, max_particles: usize) -> Result<()> {
        Self::check_max(max_particles)?;
        while self.particles.len() > max_particles {
            self.particles.pop_front();
        }
        self.max_particles = max_particles;
        Ok(())
    }

    pub fn max_particles(&self) -> usize {
        self.max_particles
    }

    pub const fn capacity(&self) -> usize {
        N
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.particles.len() >= self.max_particles
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }

    /// Live particles, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Particle> {
        self.particles.iter_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tagged(tag: f32) -> Particle {
        Particle {
            x: tag,
            ..Default::default()
        }
    }

    fn tags<const N: usize>(pool: &ParticlePool<N>) -> Vec<f32> {
        pool.iter().map(|p| p.x).collect()
    }

    #[test]
    fn test_rejects_bad_caps() {
        assert!(ParticlePool::<4>::new(0).unwrap_err().is_invalid_argument());
        assert!(ParticlePool::<4>::new(5).unwrap_err().is_invalid_argument());
        assert!(ParticlePool::<4>::new(4).is_ok());
    }

    #[test]
    fn test_clamped_cap() {
        assert_eq!(ParticlePool::<4>::clamped(1000).max_particles(), 4);
        assert_eq!(ParticlePool::<4>::clamped(0).max_particles(), 1);
        assert_eq!(ParticlePool::<4>::clamped(2).max_particles(), 2);
    }

    #[test]
    fn test_insert_below_capacity() {
        let mut pool = ParticlePool::<4>::new(3).unwrap();
        assert!(pool.is_empty());
        assert_eq!(pool.insert(tagged(1.0)), None);
        assert_eq!(pool.len(), 1);
    }

    #[test]
    fn test_insert_at_capacity_evicts_oldest() {
        let mut pool = ParticlePool::<4>::new(3).unwrap();
        for i in 0..3 {
            pool.insert(tagged(i as f32));
        }
        assert!(pool.is_full());

        let evicted = pool.insert(tagged(3.0));
        assert_eq!(evicted.map(|p| p.x), Some(0.0));
        assert_eq!(pool.len(), 3);
        assert_eq!(tags(&pool), [1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_never_exceeds_cap_over_many_wraps() {
        let mut pool = ParticlePool::<8>::new(8).unwrap();
        for i in 0..100 {
            pool.insert(tagged(i as f32));
            assert!(pool.len() <= 8);
        }
        assert_eq!(tags(&pool), [92.0, 93.0, 94.0, 95.0, 96.0, 97.0, 98.0, 99.0]);
    }

    #[test]
    fn test_prune_preserves_order() {
        let mut pool = ParticlePool::<8>::new(8).unwrap();
        for i in 0..6 {
            let mut p = tagged(i as f32);
            if i % 2 == 0 {
                p.time_to_live = 1.0;
                p.age = 1.0;
            }
            pool.insert(p);
        }
        assert_eq!(pool.prune_expired(), 3);
        assert_eq!(tags(&pool), [1.0, 3.0, 5.0]);
    }

    #[test]
    fn test_prune_after_wrap_around() {
        let mut pool = ParticlePool::<3>::new(3).unwrap();
        for i in 0..5 {
            let mut p = tagged(i as f32);
            p.time_to_live = 10.0;
            p.age = if i == 3 { 10.0 } else { 0.0 };
            pool.insert(p);
        }
        assert_eq!(pool.prune_expired(), 1);
        assert_eq!(tags(&pool), [2.0, 4.0]);
    }

    #[test]
    fn test_shrinking_cap_evicts_oldest() {
        let mut pool = ParticlePool::<8>::new(8).unwrap();
        for i in 0..6 {
            pool.insert(tagged(i as f32));
        }
        pool.set_max_particles(2).unwrap();
        assert_eq!(tags(&pool), [4.0, 5.0]);
        assert!(pool.set_max_particles(9).is_err());
        assert_eq!(pool.max_particles(), 2);
    }

    #[test]
    fn test_iter_mut_and_clear() {
        let mut pool = ParticlePool::<4>::new(4).unwrap();
        pool.insert(tagged(1.0));
        pool.insert(tagged(2.0));
        for p in pool.iter_mut() {
            p.x *= 10.0;
        }
        assert_eq!(tags(&pool), [10.0, 20.0]);
        pool.clear();
        assert!(pool.is_empty());
        assert_eq!(pool.capacity(), 4);
    }
}
