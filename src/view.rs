//! Read-only draw snapshot
//!
//! Everything a renderer needs to draw one frame: particle sprites, gravity
//! target markers and grid overlay segments. Nothing here mutates the
//! simulation.

use glam::DVec2;

use crate::consts::TARGET_MARKER_RADIUS;
use crate::sim::Simulation;

/// Speed at or above which the speed tint saturates to red
pub const SPEED_COLOR_MAX: f64 = 8.0;

/// Gravity target marker color
pub const TARGET_COLOR: [u8; 3] = [255, 220, 80];
/// Grid overlay color
pub const GRID_COLOR: [u8; 3] = [60, 60, 60];

/// A filled circle to draw
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sprite {
    pub pos: DVec2,
    pub radius: f64,
    pub color: [u8; 3],
}

/// A straight overlay line
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub from: DVec2,
    pub to: DVec2,
}

/// Interpolate color based on speed (slow=blue, medium=green, fast=red/orange)
pub fn speed_color(speed: f64) -> [u8; 3] {
    let t = (speed / SPEED_COLOR_MAX).clamp(0.0, 1.0);

    // Gradient: blue -> cyan -> green -> yellow -> red/orange
    let (r, g, b) = if t < 0.25 {
        let u = t / 0.25;
        (0.2, 0.4 + 0.4 * u, 1.0)
    } else if t < 0.5 {
        let u = (t - 0.25) / 0.25;
        (0.2, 0.8, 1.0 - 0.6 * u)
    } else if t < 0.75 {
        let u = (t - 0.5) / 0.25;
        (0.2 + 0.8 * u, 0.8, 0.4 - 0.2 * u)
    } else {
        let u = (t - 0.75) / 0.25;
        (1.0, 0.8 - 0.5 * u, 0.2)
    };

    [to_byte(r), to_byte(g), to_byte(b)]
}

#[inline]
fn to_byte(channel: f64) -> u8 {
    (channel * 255.0).round() as u8
}

/// One sprite per particle, in particle order
pub fn sprites(sim: &Simulation, speed_colors: bool) -> Vec<Sprite> {
    sim.particles
        .iter()
        .map(|p| Sprite {
            pos: p.pos,
            radius: p.radius,
            color: if speed_colors {
                speed_color(p.vel.length())
            } else {
                p.color
            },
        })
        .collect()
}

/// Markers for each gravity target
pub fn target_markers(sim: &Simulation) -> Vec<Sprite> {
    sim.params
        .gravity_targets
        .iter()
        .map(|&pos| Sprite {
            pos,
            radius: TARGET_MARKER_RADIUS,
            color: TARGET_COLOR,
        })
        .collect()
}

/// Cell boundary lines covering a `width` x `height` plane
pub fn grid_lines(width: f64, height: f64, cell_size: f64) -> Vec<Segment> {
    let mut lines = Vec::new();
    if cell_size <= 0.0 {
        return lines;
    }

    let mut x = 0.0;
    while x < width {
        lines.push(Segment {
            from: DVec2::new(x, 0.0),
            to: DVec2::new(x, height),
        });
        x += cell_size;
    }

    let mut y = 0.0;
    while y < height {
        lines.push(Segment {
            from: DVec2::new(0.0, y),
            to: DVec2::new(width, y),
        });
        y += cell_size;
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Particle, SimParams};

    #[test]
    fn test_speed_color_endpoints() {
        assert_eq!(speed_color(0.0), [51, 102, 255]);
        assert_eq!(speed_color(SPEED_COLOR_MAX * 10.0), [255, 77, 51]);
        // Faster is redder
        assert!(speed_color(6.0)[0] > speed_color(2.0)[0]);
    }

    #[test]
    fn test_sprites_follow_particles() {
        let particles = vec![
            Particle::new(DVec2::new(10.0, 20.0), DVec2::ZERO, 4.0, 1.0).with_color([1, 2, 3]),
            Particle::new(DVec2::new(30.0, 40.0), DVec2::new(100.0, 0.0), 6.0, 1.0),
        ];
        let sim = Simulation::from_particles(particles, SimParams::default());

        let plain = sprites(&sim, false);
        assert_eq!(plain.len(), 2);
        assert_eq!(plain[0].color, [1, 2, 3]);
        assert_eq!(plain[1].pos, DVec2::new(30.0, 40.0));
        assert_eq!(plain[1].radius, 6.0);

        let tinted = sprites(&sim, true);
        assert_eq!(tinted[0].color, speed_color(0.0));
        assert_eq!(tinted[1].color, speed_color(100.0));
    }

    #[test]
    fn test_target_markers() {
        let params = SimParams {
            gravity_targets: vec![DVec2::new(5.0, 5.0), DVec2::new(50.0, 50.0)],
            ..Default::default()
        };
        let sim = Simulation::from_particles(Vec::new(), params);
        let markers = target_markers(&sim);
        assert_eq!(markers.len(), 2);
        assert!(markers.iter().all(|m| m.radius == TARGET_MARKER_RADIUS && m.color == TARGET_COLOR));
    }

    #[test]
    fn test_grid_lines_cover_plane() {
        let lines = grid_lines(120.0, 80.0, 40.0);
        // x = 0, 40, 80 and y = 0, 40
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[2].from, DVec2::new(80.0, 0.0));
        assert_eq!(lines[4].to, DVec2::new(120.0, 40.0));
        assert!(grid_lines(100.0, 100.0, 0.0).is_empty());
    }
}
