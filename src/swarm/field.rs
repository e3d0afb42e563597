use eframe::egui::{Color32, Vec2, vec2};
use rand::Rng;
use rand::seq::SliceRandom;

pub const INITIAL_PARTICLES: usize = 50;
pub const MAX_PARTICLES: usize = 100;
pub const DRIFT_SPEED: f32 = 0.25;
pub const BASE_RADIUS: f32 = 4.0;
pub const FOCAL_RADIUS: f32 = 8.0;
pub const SPAWN_RADIUS_MIN: f32 = 2.0;
pub const SPAWN_RADIUS_MAX: f32 = 5.0;
pub const LINK_DISTANCE: f32 = 150.0;

const COLOR_DRIFT_CHANCE: f64 = 0.01;
const SPAWN_CHANCE: f64 = 0.1;

#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    pub position: Vec2,
    pub velocity: Vec2,
    pub color: Color32,
    pub radius: f32,
}

/// Insertion-ordered particles; the midpoint element is the focal one.
#[derive(Clone, Debug, Default)]
pub struct ParticleField {
    particles: Vec<Particle>,
}

fn sample_position(bounds: Vec2, rng: &mut impl Rng) -> Vec2 {
    vec2(
        rng.gen_range(0.0..=bounds.x.max(0.0)),
        rng.gen_range(0.0..=bounds.y.max(0.0)),
    )
}

fn sample_velocity(animating: bool, rng: &mut impl Rng) -> Vec2 {
    if animating {
        vec2(
            rng.gen_range(-DRIFT_SPEED..=DRIFT_SPEED),
            rng.gen_range(-DRIFT_SPEED..=DRIFT_SPEED),
        )
    } else {
        Vec2::ZERO
    }
}

fn sample_color(colors: &[Color32], rng: &mut impl Rng) -> Color32 {
    colors.choose(rng).copied().unwrap_or(Color32::WHITE)
}

/// Moves one axis and reflects it off the `[0, limit]` walls.
fn bounce_axis(position: &mut f32, velocity: &mut f32, limit: f32) {
    *position += *velocity;
    if *position < 0.0 || *position > limit {
        *velocity = -*velocity;
    }
    *position = position.clamp(0.0, limit);
}

impl ParticleField {
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn focal_index(&self) -> Option<usize> {
        if self.particles.is_empty() {
            None
        } else {
            Some(self.particles.len() / 2)
        }
    }

    pub fn rebuild(
        &mut self,
        bounds: Vec2,
        colors: &[Color32],
        animating: bool,
        rng: &mut impl Rng,
    ) {
        let focal = INITIAL_PARTICLES / 2;

        self.particles.clear();
        self.particles.reserve(MAX_PARTICLES);
        for index in 0..INITIAL_PARTICLES {
            let color = sample_color(colors, rng);
            let position = sample_position(bounds, rng);
            let velocity = sample_velocity(animating, rng);
            self.particles.push(Particle {
                position,
                velocity,
                color,
                radius: if index == focal {
                    FOCAL_RADIUS
                } else {
                    BASE_RADIUS
                },
            });
        }
    }

    pub fn step(&mut self, bounds: Vec2, colors: &[Color32], rng: &mut impl Rng) {
        let width = bounds.x.max(0.0);
        let height = bounds.y.max(0.0);

        for particle in &mut self.particles {
            bounce_axis(&mut particle.position.x, &mut particle.velocity.x, width);
            bounce_axis(&mut particle.position.y, &mut particle.velocity.y, height);

            if rng.gen_bool(COLOR_DRIFT_CHANCE) {
                particle.color = sample_color(colors, rng);
            }
        }

        if self.particles.len() < MAX_PARTICLES && rng.gen_bool(SPAWN_CHANCE) {
            self.spawn(bounds, colors, rng);
        }
    }

    fn spawn(&mut self, bounds: Vec2, colors: &[Color32], rng: &mut impl Rng) {
        let color = sample_color(colors, rng);
        let position = sample_position(bounds, rng);
        let radius = rng.gen_range(SPAWN_RADIUS_MIN..=SPAWN_RADIUS_MAX);
        let velocity = sample_velocity(true, rng);
        self.particles.push(Particle {
            position,
            velocity,
            color,
            radius,
        });
    }

    /// Unordered index pairs closer than [`LINK_DISTANCE`].
    pub fn links(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let link_distance_sq = LINK_DISTANCE * LINK_DISTANCE;
        let particles = &self.particles;

        (0..particles.len()).flat_map(move |i| {
            ((i + 1)..particles.len()).filter_map(move |j| {
                let delta = particles[i].position - particles[j].position;
                (delta.length_sq() < link_distance_sq).then_some((i, j))
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    const BOUNDS: Vec2 = vec2(800.0, 600.0);

    fn in_bounds(particle: &Particle, bounds: Vec2) -> bool {
        (0.0..=bounds.x).contains(&particle.position.x)
            && (0.0..=bounds.y).contains(&particle.position.y)
    }

    #[test]
    fn idle_rebuild_matches_reference_layout() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut field = ParticleField::default();
        field.rebuild(BOUNDS, &[Color32::RED], false, &mut rng);

        assert_eq!(field.len(), INITIAL_PARTICLES);
        assert_eq!(field.focal_index(), Some(25));
        for (index, particle) in field.particles().iter().enumerate() {
            assert_eq!(particle.color, Color32::RED);
            assert_eq!(particle.velocity, Vec2::ZERO);
            assert!(in_bounds(particle, BOUNDS));
            let expected = if index == 25 { FOCAL_RADIUS } else { BASE_RADIUS };
            assert_eq!(particle.radius, expected);
        }
    }

    #[test]
    fn animating_rebuild_draws_small_velocities_from_active_colors() {
        let mut rng = StdRng::seed_from_u64(11);
        let colors = [Color32::RED, Color32::BLUE];
        let mut field = ParticleField::default();
        field.rebuild(BOUNDS, &colors, true, &mut rng);

        assert!(field.particles().iter().any(|particle| particle.velocity != Vec2::ZERO));
        for particle in field.particles() {
            assert!(colors.contains(&particle.color));
            assert!(particle.velocity.x.abs() <= DRIFT_SPEED);
            assert!(particle.velocity.y.abs() <= DRIFT_SPEED);
        }
    }

    #[test]
    fn bounce_flips_velocity_and_clamps_to_crossed_wall() {
        let mut field = ParticleField {
            particles: vec![
                Particle {
                    position: vec2(799.9, 300.0),
                    velocity: vec2(0.25, 0.0),
                    color: Color32::RED,
                    radius: BASE_RADIUS,
                },
                Particle {
                    position: vec2(0.1, 0.05),
                    velocity: vec2(-0.2, -0.1),
                    color: Color32::RED,
                    radius: BASE_RADIUS,
                },
            ],
        };
        let mut rng = StdRng::seed_from_u64(3);
        field.step(BOUNDS, &[Color32::RED], &mut rng);

        let right = &field.particles()[0];
        assert_eq!(right.position.x, 800.0);
        assert_eq!(right.velocity.x, -0.25);
        assert_eq!(right.position.y, 300.0);

        let corner = &field.particles()[1];
        assert_eq!(corner.position, vec2(0.0, 0.0));
        assert_eq!(corner.velocity, vec2(0.2, 0.1));
    }

    #[test]
    fn steps_stay_in_bounds_and_never_exceed_ceiling() {
        let mut rng = StdRng::seed_from_u64(42);
        let colors = [Color32::RED, Color32::GREEN];
        let mut field = ParticleField::default();
        field.rebuild(BOUNDS, &colors, true, &mut rng);

        let mut previous_len = field.len();
        for _ in 0..5_000 {
            field.step(BOUNDS, &colors, &mut rng);
            assert!(field.len() >= previous_len);
            assert!(field.len() <= MAX_PARTICLES);
            previous_len = field.len();
            assert!(field.particles().iter().all(|particle| in_bounds(particle, BOUNDS)));
        }

        assert_eq!(field.len(), MAX_PARTICLES);
        assert_eq!(field.focal_index(), Some(MAX_PARTICLES / 2));
        for particle in &field.particles()[INITIAL_PARTICLES..] {
            assert!((SPAWN_RADIUS_MIN..=SPAWN_RADIUS_MAX).contains(&particle.radius));
            assert!(colors.contains(&particle.color));
        }
    }

    #[test]
    fn color_drift_stays_within_new_palette() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut field = ParticleField::default();
        field.rebuild(BOUNDS, &[Color32::RED], true, &mut rng);

        for _ in 0..2_000 {
            field.step(BOUNDS, &[Color32::BLUE], &mut rng);
        }

        assert!(
            field
                .particles()
                .iter()
                .all(|particle| particle.color == Color32::RED || particle.color == Color32::BLUE)
        );
        assert!(field.particles().iter().any(|particle| particle.color == Color32::BLUE));
    }

    #[test]
    fn links_only_join_close_pairs() {
        let particle = |x: f32| Particle {
            position: vec2(x, 10.0),
            velocity: Vec2::ZERO,
            color: Color32::RED,
            radius: BASE_RADIUS,
        };
        let field = ParticleField {
            particles: vec![particle(0.0), particle(100.0), particle(200.0), particle(400.0)],
        };

        assert_eq!(field.links().collect::<Vec<_>>(), [(0, 1), (1, 2)]);
    }
}
