//! Decorative effects: the ambient background field and the confetti burst
//! fired when the teardown starts. Nothing here feeds back into game logic.

use glam::Vec2;

use crate::easing::Easing;

/// Seedable pseudo-random number generator (xorshift64).
/// Deterministic, fast, no-std compatible.
#[derive(Debug, Clone)]
pub struct Rng {
    state: u64,
}

impl Rng {
    pub fn new(seed: u64) -> Self {
        Rng {
            state: if seed == 0 { 1 } else { seed },
        }
    }

    fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }

    /// Generate a random number in [0, upper_bound).
    pub fn next_int(&mut self, upper_bound: u32) -> u32 {
        (self.next_u64() % upper_bound as u64) as u32
    }

    /// Generate a random float in [0, 1).
    pub fn next_f32(&mut self) -> f32 {
        self.next_int(1_000_000) as f32 / 1_000_000.0
    }

    /// Generate a random float in [lo, hi).
    pub fn range(&mut self, lo: f32, hi: f32) -> f32 {
        lo + self.next_f32() * (hi - lo)
    }
}

// ---- Ambient background field ----

/// Number of floating background dots.
pub const BACKGROUND_COUNT: usize = 20;

/// One floating background dot. Placed once per page load; the host loops
/// its ping animation from `delay`/`duration`.
#[derive(Debug, Clone, Copy)]
pub struct BackgroundParticle {
    /// Horizontal position as a percentage of the viewport.
    pub left: f32,
    /// Vertical position as a percentage of the viewport.
    pub top: f32,
    /// Animation start delay in seconds.
    pub delay: f32,
    /// Animation period in seconds.
    pub duration: f32,
}

/// The full set of background dots.
///
/// Must be generated from a host-provided seed after the page is
/// interactive; baking positions into the initial markup would make the
/// server-rendered and hydrated output disagree.
#[derive(Debug, Clone)]
pub struct BackgroundField {
    particles: Vec<BackgroundParticle>,
}

impl BackgroundField {
    pub fn generate(rng: &mut Rng) -> Self {
        let particles = (0..BACKGROUND_COUNT)
            .map(|_| BackgroundParticle {
                left: rng.range(0.0, 100.0),
                top: rng.range(0.0, 100.0),
                delay: rng.range(0.0, 5.0),
                duration: rng.range(2.0, 5.0),
            })
            .collect();
        Self { particles }
    }

    pub fn particles(&self) -> &[BackgroundParticle] {
        &self.particles
    }
}

// ---- Confetti burst ----

/// Particles per reveal burst.
pub const CONFETTI_COUNT: usize = 30;
/// Lifetime of one confetti particle once its delay has elapsed.
pub const CONFETTI_DURATION: f32 = 1.5;
/// Per-index start stagger.
pub const CONFETTI_STAGGER: f32 = 0.02;
/// Maximum travel from the burst center, in viewport percent.
const CONFETTI_SPREAD: f32 = 300.0;
/// Maximum spin over a particle's life, in degrees.
const CONFETTI_MAX_SPIN: f32 = 720.0;

/// Confetti color palette, indexed by `ConfettiParticle::color`.
pub const CONFETTI_PALETTE: [&str; 6] = [
    "#ec4899", "#8b5cf6", "#3b82f6", "#10b981", "#f59e0b", "#ef4444",
];

/// One confetti particle: bursts from the center, scales up then away,
/// spinning as it fades.
#[derive(Debug, Clone, Copy)]
pub struct ConfettiParticle {
    /// Seconds to wait before this particle starts moving.
    delay: f32,
    age: f32,
    /// Travel offset from the center at full life, in viewport percent.
    target: Vec2,
    spin: f32,
    pub color: u8,
}

impl ConfettiParticle {
    /// Advance the particle. Returns false once its life has fully elapsed.
    pub fn tick(&mut self, dt: f32) -> bool {
        self.age += dt;
        self.age < self.delay + CONFETTI_DURATION
    }

    /// Normalized life fraction in [0, 1], eased for travel.
    fn t(&self) -> f32 {
        ((self.age - self.delay) / CONFETTI_DURATION).clamp(0.0, 1.0)
    }

    /// Position in viewport percent, starting from the center (50, 50).
    pub fn position(&self) -> Vec2 {
        let t = Easing::QuadOut.apply(self.t());
        Vec2::new(50.0, 50.0) + self.target * t
    }

    /// Scale keyframes: 0 up to 1.5 at mid-life, back to 0.
    pub fn scale(&self) -> f32 {
        let t = self.t();
        if t < 0.5 {
            1.5 * (t / 0.5)
        } else {
            1.5 * (1.0 - (t - 0.5) / 0.5)
        }
    }

    /// Opacity holds at 1 for the first half, then fades to 0.
    pub fn opacity(&self) -> f32 {
        let t = self.t();
        if t < 0.5 {
            1.0
        } else {
            1.0 - (t - 0.5) / 0.5
        }
    }

    /// Accumulated rotation in degrees.
    pub fn rotation(&self) -> f32 {
        self.spin * self.t()
    }
}

/// A burst of independently time-offset confetti particles.
#[derive(Debug, Clone, Default)]
pub struct ConfettiBurst {
    particles: Vec<ConfettiParticle>,
}

impl ConfettiBurst {
    pub fn spawn(rng: &mut Rng) -> Self {
        let particles = (0..CONFETTI_COUNT)
            .map(|i| ConfettiParticle {
                delay: i as f32 * CONFETTI_STAGGER,
                age: 0.0,
                target: Vec2::new(
                    (rng.next_f32() - 0.5) * CONFETTI_SPREAD,
                    (rng.next_f32() - 0.5) * CONFETTI_SPREAD,
                ),
                spin: rng.next_f32() * CONFETTI_MAX_SPIN,
                color: (i % CONFETTI_PALETTE.len()) as u8,
            })
            .collect();
        Self { particles }
    }

    /// Advance all particles, dropping expired ones.
    pub fn tick(&mut self, dt: f32) {
        self.particles.retain_mut(|p| p.tick(dt));
    }

    pub fn is_active(&self) -> bool {
        !self.particles.is_empty()
    }

    pub fn particles(&self) -> &[ConfettiParticle] {
        &self.particles
    }
}
