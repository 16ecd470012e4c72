//! Transient visuals: particle bursts and message banners.
//!
//! One polymorphic type covers both shapes the game needs.  Particle fans
//! use fixed angle tables, so effects never touch an RNG and a tick stays
//! fully deterministic.

use std::f32::consts::TAU;

/// Downward pull applied to burst particles each frame.
pub const PARTICLE_GRAVITY: f32 = 0.2;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParticleColor {
    Orange,
    Red,
    Cyan,
    Yellow,
    White,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    /// Offset from the burst origin.
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub color: ParticleColor,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
    Burst {
        x: f32,
        y: f32,
        particles: Vec<Particle>,
        remaining: u32,
        total: u32,
    },
    Banner {
        text: String,
        remaining: u32,
    },
}

/// Evenly spread `count` particles around a circle.
fn ring(count: usize, speed: f32, colors: &[ParticleColor]) -> Vec<Particle> {
    (0..count)
        .map(|i| {
            let angle = i as f32 * TAU / count as f32;
            // Vary speed a little so the ring breaks up as it expands
            let s = speed + (i % 3) as f32;
            Particle {
                x: 0.0,
                y: 0.0,
                vx: angle.cos() * s,
                vy: angle.sin() * s,
                color: colors[i % colors.len()],
            }
        })
        .collect()
}

impl Effect {
    /// Small spark ring where a melee hit lands.
    pub fn hit(x: f32, y: f32) -> Self {
        Effect::Burst {
            x,
            y,
            particles: ring(8, 2.0, &[ParticleColor::Yellow, ParticleColor::White]),
            remaining: 15,
            total: 15,
        }
    }

    /// Debris burst for a defeated robot or boss.
    pub fn explosion(x: f32, y: f32) -> Self {
        Effect::Burst {
            x,
            y,
            particles: ring(10, 3.0, &[ParticleColor::Orange, ParticleColor::Red]),
            remaining: 45,
            total: 45,
        }
    }

    /// Sparkle where a diamond was collected.
    pub fn sparkle(x: f32, y: f32) -> Self {
        Effect::Burst {
            x,
            y,
            particles: ring(5, 1.5, &[ParticleColor::Cyan]),
            remaining: 30,
            total: 30,
        }
    }

    /// Expanding ring for the power-up shockwave.
    pub fn shockwave(x: f32, y: f32) -> Self {
        Effect::Burst {
            x,
            y,
            particles: ring(12, 5.0, &[ParticleColor::White, ParticleColor::Yellow]),
            remaining: 30,
            total: 30,
        }
    }

    /// Streak fired from the boss toward a target point.  Purely visual;
    /// no projectile entity exists.
    pub fn projectile(from: (f32, f32), toward: (f32, f32)) -> Self {
        let dx = toward.0 - from.0;
        let dy = toward.1 - from.1;
        let len = (dx * dx + dy * dy).sqrt().max(1.0);
        let (ux, uy) = (dx / len, dy / len);
        let particles = (0..5)
            .map(|i| {
                let s = 6.0 + i as f32 * 1.5;
                Particle {
                    x: 0.0,
                    y: 0.0,
                    vx: ux * s,
                    vy: uy * s,
                    color: ParticleColor::Red,
                }
            })
            .collect();
        Effect::Burst {
            x: from.0,
            y: from.1,
            particles,
            remaining: 20,
            total: 20,
        }
    }

    /// Centered on-screen message.
    pub fn banner(text: &str, frames: u32) -> Self {
        Effect::Banner {
            text: text.to_string(),
            remaining: frames,
        }
    }

    /// Advance one frame.  Returns false once the effect has expired.
    pub fn step(&mut self) -> bool {
        match self {
            Effect::Burst {
                particles,
                remaining,
                ..
            } => {
                for p in particles.iter_mut() {
                    p.x += p.vx;
                    p.y += p.vy;
                    p.vy += PARTICLE_GRAVITY;
                }
                *remaining = remaining.saturating_sub(1);
                *remaining > 0
            }
            Effect::Banner { remaining, .. } => {
                *remaining = remaining.saturating_sub(1);
                *remaining > 0
            }
        }
    }
}
