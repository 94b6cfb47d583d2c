//! Catch sparkles. Purely visual; never read by gameplay code.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::items::ItemKind;
use crate::consts::PARTICLE_BURST;
use crate::frames;
use crate::tuning::Tuning;

/// A particle for visual effects
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    /// px per reference frame
    pub vel: Vec2,
    /// Kind of the caught item, for colour lookup
    pub color: ItemKind,
    /// Seconds remaining; also used as draw alpha
    pub life: f32,
    pub size: f32,
}

/// Emit a burst at `at` in the colour of `kind`
pub fn emit_burst(
    particles: &mut Vec<Particle>,
    rng: &mut impl Rng,
    at: Vec2,
    kind: ItemKind,
    tuning: &Tuning,
) {
    particles.reserve(PARTICLE_BURST);
    for _ in 0..PARTICLE_BURST {
        let vel = Vec2::new(
            (rng.random::<f32>() - 0.5) * tuning.particle_spread,
            (rng.random::<f32>() - 0.5) * tuning.particle_spread,
        );
        particles.push(Particle {
            pos: at,
            vel,
            color: kind,
            life: tuning.particle_life,
            size: tuning.particle_min_size + rng.random::<f32>() * tuning.particle_size_range,
        });
    }
}

/// Move and age particles, dropping the expired ones
pub fn update_particles(particles: &mut Vec<Particle>, dt_ms: f32) {
    let f = frames(dt_ms);
    for particle in particles.iter_mut() {
        particle.pos += particle.vel * f;
        particle.life -= dt_ms / 1000.0;
    }
    particles.retain(|p| p.life > 0.0);
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_burst_shape() {
        let mut particles = Vec::new();
        let mut rng = Pcg32::seed_from_u64(5);
        let at = Vec2::new(10.0, 20.0);
        emit_burst(&mut particles, &mut rng, at, ItemKind::Diamond, &Tuning::default());

        assert_eq!(particles.len(), PARTICLE_BURST);
        for p in &particles {
            assert_eq!(p.pos, at);
            assert_eq!(p.color, ItemKind::Diamond);
            assert_eq!(p.life, 1.0);
            assert!(p.vel.x.abs() <= 2.0 && p.vel.y.abs() <= 2.0);
            assert!((2.0..7.0).contains(&p.size));
        }
    }

    #[test]
    fn test_particles_decay_and_expire() {
        let mut particles = vec![Particle {
            pos: Vec2::ZERO,
            vel: Vec2::new(1.0, 0.0),
            color: ItemKind::SmallGold,
            life: 1.0,
            size: 3.0,
        }];

        update_particles(&mut particles, 500.0);
        assert_eq!(particles.len(), 1);
        assert!((particles[0].life - 0.5).abs() < 1e-6);
        assert!((particles[0].pos.x - 30.0).abs() < 1e-3);

        update_particles(&mut particles, 500.0);
        assert!(particles.is_empty());
    }

    #[test]
    fn test_zero_dt_is_noop() {
        let mut particles = Vec::new();
        let mut rng = Pcg32::seed_from_u64(1);
        emit_burst(&mut particles, &mut rng, Vec2::ONE, ItemKind::Crystal, &Tuning::default());
        update_particles(&mut particles, 0.0);
        assert_eq!(particles.len(), PARTICLE_BURST);
        assert!(particles.iter().all(|p| p.pos == Vec2::ONE));
    }
}
