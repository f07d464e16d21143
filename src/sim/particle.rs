//! Particle bodies and the explicit Euler integrator

use glam::DVec2;

/// A circular body
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub pos: DVec2,
    pub vel: DVec2,
    /// Fixed at creation, always > 0
    pub radius: f64,
    /// Fixed at creation, always > 0
    pub mass: f64,
    /// RGB display color (no effect on physics)
    pub color: [u8; 3],
}

impl Particle {
    pub fn new(pos: DVec2, vel: DVec2, radius: f64, mass: f64) -> Self {
        Self {
            pos,
            vel,
            radius,
            mass,
            color: [255, 255, 255],
        }
    }

    /// Builder-style color override
    pub fn with_color(mut self, color: [u8; 3]) -> Self {
        self.color = color;
        self
    }

    #[inline]
    pub fn kinetic_energy(&self) -> f64 {
        0.5 * self.mass * self.vel.length_squared()
    }

    /// Advance one substep and bounce off the plane walls.
    ///
    /// Each call adds `vel / substeps` to the position, so `substeps`
    /// consecutive calls with unchanged velocity advance by one full `vel`.
    /// This is an accumulated linear advance, not a physical timestep.
    pub fn advance(&mut self, substeps: u32, width: f64, height: f64) {
        self.pos += self.vel / substeps as f64;

        // Axes are independent so a corner hit flips both components
        if self.pos.x < self.radius {
            self.pos.x = self.radius;
            self.vel.x = -self.vel.x;
        } else if self.pos.x > width - self.radius {
            self.pos.x = width - self.radius;
            self.vel.x = -self.vel.x;
        }

        if self.pos.y < self.radius {
            self.pos.y = self.radius;
            self.vel.y = -self.vel.y;
        } else if self.pos.y > height - self.radius {
            self.pos.y = height - self.radius;
            self.vel.y = -self.vel.y;
        }
    }
}

/// Integrate every particle by one substep
pub fn integrate(particles: &mut [Particle], substeps: u32, width: f64, height: f64) {
    for p in particles.iter_mut() {
        p.advance(substeps, width, height);
    }
}

/// Total kinetic energy: sum of 0.5 * m * |v|^2
pub fn kinetic_energy(particles: &[Particle]) -> f64 {
    particles.iter().map(Particle::kinetic_energy).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const W: f64 = 800.0;
    const H: f64 = 600.0;

    #[test]
    fn test_advance_is_scaled_by_substeps() {
        let mut p = Particle::new(DVec2::new(100.0, 100.0), DVec2::new(4.0, -2.0), 10.0, 1.0);
        for _ in 0..4 {
            p.advance(4, W, H);
        }
        assert!((p.pos - DVec2::new(104.0, 98.0)).length() < 1e-9);
    }

    #[test]
    fn test_wall_bounce_clamps_and_reflects() {
        let mut p = Particle::new(DVec2::new(12.0, 300.0), DVec2::new(-5.0, 0.0), 10.0, 1.0);
        p.advance(1, W, H);
        assert_eq!(p.pos.x, 10.0);
        assert_eq!(p.vel.x, 5.0);

        let mut p = Particle::new(DVec2::new(788.0, 300.0), DVec2::new(5.0, 0.0), 10.0, 1.0);
        p.advance(1, W, H);
        assert_eq!(p.pos.x, W - 10.0);
        assert_eq!(p.vel.x, -5.0);
    }

    #[test]
    fn test_corner_bounce_reflects_both_axes() {
        let mut p = Particle::new(DVec2::new(11.0, 11.0), DVec2::new(-3.0, -3.0), 10.0, 1.0);
        p.advance(1, W, H);
        assert_eq!(p.pos, DVec2::new(10.0, 10.0));
        assert_eq!(p.vel, DVec2::new(3.0, 3.0));
    }

    #[test]
    fn test_wall_bounce_preserves_speed() {
        let mut p = Particle::new(DVec2::new(400.0, 300.0), DVec2::new(7.3, -4.1), 10.0, 1.0);
        let speed = p.vel.length();
        for _ in 0..5000 {
            p.advance(3, W, H);
            assert!((p.vel.length() - speed).abs() < 1e-12);
        }
    }

    #[test]
    fn test_rest_state_is_stationary() {
        let start = DVec2::new(250.0, 175.0);
        let mut p = Particle::new(start, DVec2::ZERO, 10.0, 1.0);
        for _ in 0..1000 {
            p.advance(2, W, H);
        }
        assert_eq!(p.pos, start);
    }

    #[test]
    fn test_kinetic_energy_sum() {
        let ps = vec![
            Particle::new(DVec2::ZERO, DVec2::new(3.0, 4.0), 1.0, 2.0),
            Particle::new(DVec2::ZERO, DVec2::new(1.0, 0.0), 1.0, 10.0),
        ];
        assert!((kinetic_energy(&ps) - 30.0).abs() < 1e-12);
    }

    proptest! {
        #[test]
        fn prop_positions_stay_inside_plane(
            x in 0.0f64..W,
            y in 0.0f64..H,
            vx in -500.0f64..500.0,
            vy in -500.0f64..500.0,
            radius in 1.0f64..50.0,
            substeps in 1u32..6,
            steps in 1usize..200,
        ) {
            let mut p = Particle::new(DVec2::new(x, y), DVec2::new(vx, vy), radius, 1.0);
            for _ in 0..steps {
                p.advance(substeps, W, H);
                prop_assert!(p.pos.x >= radius && p.pos.x <= W - radius);
                prop_assert!(p.pos.y >= radius && p.pos.y <= H - radius);
            }
        }
    }
}
