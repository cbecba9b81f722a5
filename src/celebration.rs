use rand::seq::SliceRandom;
use rand::Rng;
use std::time::Duration;

use crate::rewards::Celebration;

const SYMBOLS: [char; 6] = ['✨', '🎉', '⭐', '🌟', '🌱', '💧'];
const GRAVITY: f64 = 15.0;
const OFF_SCREEN_BUFFER: f64 = 5.0;

/// Single confetti piece, in terminal cell coordinates
#[derive(Debug, Clone)]
pub struct ConfettiParticle {
    pub x: f64,
    pub y: f64,
    pub vel_x: f64,
    pub vel_y: f64,
    pub symbol: char,
    pub color_index: usize,
    pub age: f64,
    pub max_age: f64,
}

impl ConfettiParticle {
    fn launch<G: Rng>(rng: &mut G, origin_x: f64, origin_y: f64, spread: f64) -> Self {
        Self {
            x: origin_x,
            y: origin_y,
            vel_x: rng.gen_range(-spread..spread),
            vel_y: rng.gen_range(-12.0..-4.0),
            symbol: *SYMBOLS.choose(rng).unwrap_or(&'✨'),
            color_index: rng.gen_range(0..7),
            age: 0.0,
            max_age: rng.gen_range(1.5..3.0),
        }
    }

    /// Moves the particle; returns false once it has burnt out.
    fn update(&mut self, dt: f64) -> bool {
        self.x += self.vel_x * dt;
        self.y += self.vel_y * dt;
        self.vel_y += GRAVITY * dt;
        self.age += dt;
        self.age < self.max_age
    }
}

/// Confetti bursts layered over whatever screen is showing
#[derive(Debug, Default)]
pub struct ConfettiAnimation {
    pub particles: Vec<ConfettiParticle>,
    width: f64,
    height: f64,
}

impl ConfettiAnimation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a burst sized for the signal. Small bursts rise from lower on the
    /// screen and spread less.
    pub fn burst(&mut self, celebration: Celebration, width: u16, height: u16) {
        let mut rng = rand::thread_rng();
        self.width = width as f64;
        self.height = height as f64;

        let (origin_fraction, spread) = match celebration {
            Celebration::Small => (0.7, 6.0),
            Celebration::Large => (0.6, 10.0),
        };
        let origin_x = self.width / 2.0;
        let origin_y = self.height * origin_fraction;

        self.particles.extend(
            (0..celebration.particle_count())
                .map(|_| ConfettiParticle::launch(&mut rng, origin_x, origin_y, spread)),
        );
        log::debug!(
            "{} celebration, {} particles live",
            celebration,
            self.particles.len()
        );
    }

    pub fn update(&mut self, elapsed: Duration) {
        if self.particles.is_empty() {
            return;
        }
        let dt = elapsed.as_secs_f64();
        let (width, height) = (self.width, self.height);
        self.particles.retain_mut(|p| {
            let alive = p.update(dt);
            let off_screen = p.y > height + OFF_SCREEN_BUFFER
                || p.x < -OFF_SCREEN_BUFFER
                || p.x > width + OFF_SCREEN_BUFFER;
            alive && !off_screen
        });
    }

    pub fn is_active(&self) -> bool {
        !self.particles.is_empty()
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }
}
