//! Level generation.  Layouts are deterministic for a given level index:
//! all randomness comes from a `StdRng` seeded with the index, so the same
//! level always produces the same world.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::entities::{
    Boss, Diamond, Robot, RobotKind, SuperDiamond, BOSS_HEIGHT, DIAMOND_SIZE, ROBOT_HEIGHT,
    ROBOT_WIDTH, SUPER_DIAMOND_SIZE,
};
use crate::physics::{Platform, FLOOR_Y, WORLD_WIDTH};
use crate::powerups::BuffKind;

pub const MAX_LEVEL: u32 = 5;

const LEVEL_SEED: u64 = 0xD1A3_0057;

/// Robots per level.
const ROBOT_COUNTS: [usize; 5] = [6, 9, 11, 12, 16];

/// Tough robots appear on alternating slots from this level on.
const TOUGH_ROBOT_MIN_LEVEL: u32 = 4;

/// Floating diamonds sit at most this far above their supporting surface,
/// so every one is reachable with a normal jump.
const MAX_PICKUP_HEIGHT: f32 = 140.0;

/// Super diamonds only appear on platforms at least this high off the floor.
const SUPER_DIAMOND_MIN_HEIGHT: f32 = 150.0;

/// Everything `generate_level` places into the world.
#[derive(Clone, Debug)]
pub struct LevelData {
    pub platforms: Vec<Platform>,
    pub robots: Vec<Robot>,
    pub diamonds: Vec<Diamond>,
    pub super_diamonds: Vec<SuperDiamond>,
    pub boss: Boss,
}

pub fn generate_level(level: u32) -> LevelData {
    let mut rng = StdRng::seed_from_u64(LEVEL_SEED ^ level as u64);

    let platforms = create_platforms(level);
    let robots = create_robots(level, &platforms, &mut rng);
    let diamonds = create_diamonds(level, &platforms, &mut rng);
    let super_diamonds = create_super_diamonds(level, &platforms, &mut rng);
    let boss = Boss::new(WORLD_WIDTH - 200.0, FLOOR_Y - BOSS_HEIGHT, level);

    LevelData {
        platforms,
        robots,
        diamonds,
        super_diamonds,
        boss,
    }
}

/// Platforms above the ground strip.
fn elevated(platforms: &[Platform]) -> Vec<Platform> {
    platforms
        .iter()
        .copied()
        .filter(|p| p.y < FLOOR_Y - 50.0)
        .collect()
}

fn create_platforms(level: u32) -> Vec<Platform> {
    // Ground strip: full-width tiled platform
    let mut platforms: Vec<Platform> = (0..WORLD_WIDTH as i32)
        .step_by(200)
        .map(|x| Platform::new(x as f32, FLOOR_Y, 200.0, 50.0))
        .collect();

    match level {
        1 => {
            platforms.push(Platform::new(300.0, 600.0, 150.0, 20.0));
            platforms.push(Platform::new(600.0, 500.0, 150.0, 20.0));
            platforms.push(Platform::new(1000.0, 400.0, 150.0, 20.0));
        }
        2 => {
            platforms.push(Platform::new(200.0, 600.0, 100.0, 20.0));
            platforms.push(Platform::new(400.0, 550.0, 100.0, 20.0));
            platforms.push(Platform::new(650.0, 500.0, 100.0, 20.0));
            platforms.push(Platform::new(900.0, 450.0, 100.0, 20.0));
            platforms.push(Platform::new(1200.0, 400.0, 150.0, 20.0));
        }
        3 => {
            // Vertical zig-zag climb
            for i in 0..8 {
                platforms.push(Platform::new(
                    300.0 + (i % 2) as f32 * 400.0,
                    650.0 - i as f32 * 80.0,
                    120.0,
                    20.0,
                ));
            }
        }
        4 => {
            platforms.push(Platform::new(150.0, 600.0, 100.0, 20.0));
            platforms.push(Platform::new(350.0, 550.0, 80.0, 20.0));
            platforms.push(Platform::new(500.0, 500.0, 100.0, 20.0));
            platforms.push(Platform::new(700.0, 450.0, 80.0, 20.0));
            platforms.push(Platform::new(900.0, 400.0, 100.0, 20.0));
            platforms.push(Platform::new(1100.0, 350.0, 120.0, 20.0));
        }
        _ => {
            // Staircase gauntlet
            for i in 0..10 {
                platforms.push(Platform::new(
                    200.0 + i as f32 * 150.0,
                    600.0 - (i % 3) as f32 * 100.0,
                    100.0,
                    20.0,
                ));
            }
        }
    }

    platforms
}

fn create_robots(level: u32, platforms: &[Platform], rng: &mut StdRng) -> Vec<Robot> {
    let count = ROBOT_COUNTS[(level as usize - 1).min(ROBOT_COUNTS.len() - 1)];

    // Ground slots first, then platform tops until the quota is met
    let mut positions: Vec<(f32, f32)> = Vec::with_capacity(count);
    for i in 0..count * 3 / 5 {
        positions.push((
            400.0 + i as f32 * 300.0 + rng.gen_range(0.0..100.0),
            FLOOR_Y - ROBOT_HEIGHT,
        ));
    }
    for platform in elevated(platforms) {
        if positions.len() >= count {
            break;
        }
        positions.push((
            platform.x + rng.gen_range(0.0..(platform.w - ROBOT_WIDTH)),
            platform.y - ROBOT_HEIGHT,
        ));
    }

    positions
        .into_iter()
        .take(count)
        .enumerate()
        .map(|(i, (x, y))| {
            let kind = if level >= TOUGH_ROBOT_MIN_LEVEL && i % 2 == 0 {
                RobotKind::Tough
            } else {
                RobotKind::Normal
            };
            let direction = if rng.gen_bool(0.5) { 1.0 } else { -1.0 };
            Robot::new(x, y, kind, direction)
        })
        .collect()
}

fn create_diamonds(level: u32, platforms: &[Platform], rng: &mut StdRng) -> Vec<Diamond> {
    let count = 15 + 5 * level as usize;
    let elevated = elevated(platforms);

    (0..count)
        .map(|i| match i % 3 {
            // On a platform top
            0 if !elevated.is_empty() => {
                let p = elevated[rng.gen_range(0..elevated.len())];
                Diamond::new(
                    p.x + rng.gen_range(0.0..(p.w - DIAMOND_SIZE)),
                    p.y - DIAMOND_SIZE - 4.0,
                )
            }
            // On the ground
            1 => Diamond::new(
                rng.gen_range(200.0..WORLD_WIDTH - 300.0),
                FLOOR_Y - DIAMOND_SIZE - 4.0,
            ),
            // Floating, within jump reach of the ground
            _ => Diamond::new(
                rng.gen_range(200.0..WORLD_WIDTH - 300.0),
                FLOOR_Y - DIAMOND_SIZE - rng.gen_range(60.0..MAX_PICKUP_HEIGHT),
            ),
        })
        .collect()
}

fn create_super_diamonds(
    level: u32,
    platforms: &[Platform],
    rng: &mut StdRng,
) -> Vec<SuperDiamond> {
    let count = (((level + 1) / 2) as usize).min(3);
    let kinds = [
        BuffKind::SuperJump,
        BuffKind::SuperStrength,
        BuffKind::Invincibility,
    ];

    let candidates: Vec<Platform> = platforms
        .iter()
        .copied()
        .filter(|p| p.y < FLOOR_Y - SUPER_DIAMOND_MIN_HEIGHT)
        .collect();
    if candidates.is_empty() {
        return Vec::new();
    }

    (0..count)
        .map(|i| {
            let p = candidates[i % candidates.len()];
            SuperDiamond::new(
                p.x + rng.gen_range(0.0..(p.w - SUPER_DIAMOND_SIZE)),
                p.y - SUPER_DIAMOND_SIZE - 6.0,
                kinds[i % kinds.len()],
            )
        })
        .collect()
}
