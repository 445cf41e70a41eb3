//! Paint particles shed by the brush
//!
//! Particles are spawned just behind the brush with a fraction of its
//! velocity, then curl, drift back towards the cursor, slowly grow and fade.
//! Close to the cursor they swirl, get pushed apart, pick up the brush
//! colour and occasionally split.

use insular_core::{Color, Point, Size, Vec2};
use insular_paint::gradient::radial_glow;
use insular_paint::PaintContext;

use crate::color::mix;
use crate::pointer::Motion;

const MAX_SPAWN: usize = 6;
const CURL: f32 = 0.03;
const ATTRACTION: f32 = 0.0018;
const GROWTH: f32 = 1.006;
const DRAG: f32 = 0.965;
const LIFE_DECAY: f32 = 0.997;
const SPLIT_CHANCE: f32 = 0.08;
const MIN_LIFE: f32 = 0.03;
const CULL_MARGIN: f32 = 100.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    pub position: Point,
    pub velocity: Vec2,
    pub radius: f32,
    pub life: f32,
    pub color: Color,
}

impl Particle {
    fn alpha(&self) -> f32 {
        0.25 * self.life
    }

    fn is_spent(&self, bounds: Size) -> bool {
        self.life < MIN_LIFE
            || self.position.x < -CULL_MARGIN
            || self.position.y < -CULL_MARGIN
            || self.position.x > bounds.width + CULL_MARGIN
            || self.position.y > bounds.height + CULL_MARGIN
    }
}

/// The live particles plus the generator that jitters them
pub struct ParticleField {
    particles: Vec<Particle>,
    rng: fastrand::Rng,
}

impl ParticleField {
    pub fn new(seed: Option<u64>) -> Self {
        Self {
            particles: Vec::new(),
            rng: seed.map_or_else(fastrand::Rng::new, fastrand::Rng::with_seed),
        }
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }

    /// Uniform value in `-half..half`
    fn jitter(&mut self, half: f32) -> f32 {
        (self.rng.f32() - 0.5) * 2.0 * half
    }

    /// Shed particles behind the brush for this frame
    pub fn spawn(&mut self, motion: &Motion, c1: Color, c2: Color, extent: f32) {
        let count = MAX_SPAWN.min(2 + (motion.speed * 0.035).floor() as usize);
        let lag = 8.0 + (motion.speed * 0.15).min(40.0);
        let heading = motion.velocity.normalize();

        for _ in 0..count {
            let turn = self.jitter(0.125);
            let push = 0.12 + self.rng.f32() * 0.12;
            let color = mix(c1, c2, self.rng.f32());
            let position = Point::new(
                motion.position.x - heading.x * lag + self.jitter(3.0),
                motion.position.y - heading.y * lag + self.jitter(3.0),
            );
            self.particles.push(Particle {
                position,
                velocity: motion.velocity.scale(push).rotate(turn),
                radius: extent * (0.035 + self.rng.f32() * 0.015),
                life: 1.0,
                color,
            });
        }
    }

    /// Integrate one frame and paint the survivors
    pub fn step(
        &mut self,
        ctx: &mut PaintContext,
        now_ms: f64,
        cursor: Point,
        brush_color: Color,
        bounds: Size,
    ) {
        let extent = bounds.max_side();
        let reach = extent * 0.12;
        let split_reach = reach * 0.45;
        let curl_clock = (now_ms * 0.002) as f32;
        let mut splits = Vec::new();

        for i in (0..self.particles.len()).rev() {
            let mut p = self.particles[i];

            let rot = CURL * (curl_clock + (p.position.x + p.position.y) * 0.002).sin();
            let curled = p.velocity.rotate(rot);
            p.velocity = Vec2::new(
                curled.x * DRAG + (cursor.x - p.position.x) * ATTRACTION,
                curled.y * DRAG + (cursor.y - p.position.y) * ATTRACTION,
            );

            let away = p.position.delta_from(cursor);
            let dist = away.length().max(0.0001);
            if dist < reach {
                let influence = 1.0 - dist / reach;
                let (nx, ny) = (away.x / dist, away.y / dist);
                // swirl around the cursor, then a softer push outwards
                p.velocity.x += -ny * influence * 0.6 + nx * influence * 0.15;
                p.velocity.y += nx * influence * 0.6 + ny * influence * 0.15;
                p.color = mix(p.color, brush_color, 0.25 * influence);

                if dist < split_reach
                    && p.radius > extent * 0.02
                    && self.rng.f32() < SPLIT_CHANCE
                {
                    splits.push(Particle {
                        position: Point::new(
                            p.position.x + self.jitter(3.0),
                            p.position.y + self.jitter(3.0),
                        ),
                        velocity: Vec2::new(
                            -p.velocity.x * 0.3 + self.jitter(0.25),
                            -p.velocity.y * 0.3 + self.jitter(0.25),
                        ),
                        radius: p.radius * 0.6,
                        life: p.life,
                        color: p.color,
                    });
                    p.radius *= 0.85;
                }
            }

            p.position.x += p.velocity.x;
            p.position.y += p.velocity.y;
            p.radius *= GROWTH;
            p.life *= LIFE_DECAY;

            if p.alpha() > 0.002 {
                ctx.fill_circle_xyr(
                    p.position.x,
                    p.position.y,
                    p.radius,
                    radial_glow(p.position, p.radius, p.color, p.alpha()),
                );
            }

            if p.is_spent(bounds) {
                self.particles.swap_remove(i);
            } else {
                self.particles[i] = p;
            }
        }

        self.particles.extend(splits);
    }
}
