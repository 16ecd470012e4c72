use diamond_quest::entities::*;
use diamond_quest::level::*;
use diamond_quest::physics::{FLOOR_Y, WORLD_WIDTH};
use diamond_quest::powerups::BuffKind;

// ── determinism ───────────────────────────────────────────────────────────────

#[test]
fn same_level_generates_the_same_layout() {
    let a = generate_level(3);
    let b = generate_level(3);
    assert_eq!(a.platforms, b.platforms);
    assert_eq!(a.robots, b.robots);
    assert_eq!(a.diamonds, b.diamonds);
    assert_eq!(a.super_diamonds, b.super_diamonds);
    assert_eq!(a.boss, b.boss);
}

#[test]
fn different_levels_generate_different_layouts() {
    let a = generate_level(1);
    let b = generate_level(2);
    assert_ne!(a.robots.len(), b.robots.len());
    assert_ne!(a.platforms, b.platforms);
}

// ── platforms ─────────────────────────────────────────────────────────────────

#[test]
fn ground_strip_tiles_the_whole_world() {
    for level in 1..=MAX_LEVEL {
        let data = generate_level(level);
        let ground: Vec<_> = data
            .platforms
            .iter()
            .filter(|p| p.y == FLOOR_Y)
            .collect();
        assert_eq!(ground.len(), 15); // 3000 / 200
        let rightmost = ground
            .iter()
            .map(|p| p.x + p.w)
            .fold(0.0f32, f32::max);
        assert_eq!(rightmost, WORLD_WIDTH);
    }
}

#[test]
fn every_level_has_elevated_platforms() {
    for level in 1..=MAX_LEVEL {
        let data = generate_level(level);
        assert!(
            data.platforms.iter().any(|p| p.y < FLOOR_Y - 50.0),
            "level {} has no elevated platforms",
            level
        );
    }
}

// ── robots ────────────────────────────────────────────────────────────────────

#[test]
fn robot_counts_follow_the_level_table() {
    for (i, expected) in [6usize, 9, 11, 12, 16].iter().enumerate() {
        let data = generate_level(i as u32 + 1);
        assert_eq!(data.robots.len(), *expected);
    }
}

#[test]
fn tough_robots_unlock_at_level_four() {
    for level in 1..=3 {
        let data = generate_level(level);
        assert!(data.robots.iter().all(|r| r.kind == RobotKind::Normal));
    }
    for level in 4..=MAX_LEVEL {
        let data = generate_level(level);
        for (i, robot) in data.robots.iter().enumerate() {
            let expected = if i % 2 == 0 {
                RobotKind::Tough
            } else {
                RobotKind::Normal
            };
            assert_eq!(robot.kind, expected);
        }
    }
}

#[test]
fn robots_anchor_their_patrol_at_spawn() {
    let data = generate_level(2);
    for robot in &data.robots {
        assert_eq!(robot.start_x, robot.body.x);
        assert!(!robot.defeated);
        assert_eq!(robot.health, robot.max_health);
    }
}

// ── diamonds ──────────────────────────────────────────────────────────────────

#[test]
fn diamond_count_scales_with_level() {
    for level in 1..=MAX_LEVEL {
        let data = generate_level(level);
        assert_eq!(data.diamonds.len(), 15 + 5 * level as usize);
    }
}

#[test]
fn every_diamond_is_reachable_from_a_surface() {
    for level in 1..=MAX_LEVEL {
        let data = generate_level(level);
        for diamond in &data.diamonds {
            let bottom = diamond.y + DIAMOND_SIZE;
            let supported = data.platforms.iter().any(|p| {
                diamond.x + DIAMOND_SIZE > p.x
                    && diamond.x < p.x + p.w
                    && bottom <= p.y + 0.01
                    && p.y - bottom <= 150.0
            });
            assert!(
                supported,
                "level {} diamond at ({}, {}) is out of jump reach",
                level, diamond.x, diamond.y
            );
        }
    }
}

// ── super diamonds ────────────────────────────────────────────────────────────

#[test]
fn super_diamond_count_scales_with_level() {
    let expected = [1usize, 1, 2, 2, 3];
    for level in 1..=MAX_LEVEL {
        let data = generate_level(level);
        assert_eq!(data.super_diamonds.len(), expected[level as usize - 1]);
    }
}

#[test]
fn super_diamonds_sit_on_high_platforms() {
    for level in 1..=MAX_LEVEL {
        let data = generate_level(level);
        for sd in &data.super_diamonds {
            let bottom = sd.y + SUPER_DIAMOND_SIZE;
            let supported = data.platforms.iter().any(|p| {
                p.y < FLOOR_Y - 150.0
                    && sd.x + SUPER_DIAMOND_SIZE > p.x
                    && sd.x < p.x + p.w
                    && bottom <= p.y + 0.01
            });
            assert!(supported, "super diamond not on a high platform");
        }
    }
}

#[test]
fn super_diamond_kinds_cycle_through_all_buffs() {
    let data = generate_level(5);
    let kinds: Vec<BuffKind> = data.super_diamonds.iter().map(|sd| sd.kind).collect();
    assert_eq!(
        kinds,
        vec![
            BuffKind::SuperJump,
            BuffKind::SuperStrength,
            BuffKind::Invincibility
        ]
    );
}

// ── boss ──────────────────────────────────────────────────────────────────────

#[test]
fn one_boss_near_the_world_edge() {
    for level in 1..=MAX_LEVEL {
        let data = generate_level(level);
        assert_eq!(data.boss.body.x, WORLD_WIDTH - 200.0);
        assert_eq!(data.boss.level, level);
        assert!(!data.boss.defeated);
    }
}

#[test]
fn boss_health_scales_with_level() {
    assert_eq!(generate_level(1).boss.health, 100);
    assert_eq!(generate_level(3).boss.health, 200);
    assert_eq!(generate_level(5).boss.health, 300);
}
