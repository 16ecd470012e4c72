//! The simulation tick.
//!
//! One call to [`tick`] advances the world by a single frame in a fixed
//! order: player, robots, boss, pickups, effects, progression.  Later
//! entities read positions the earlier ones already updated this tick.
//! Nothing here performs I/O or blocks; the frontend drives it once per
//! frame and renders the resulting state.

use crate::combat;
use crate::effects::Effect;
use crate::entities::{
    AttackKind, Boss, Cue, Diamond, InputState, Mode, Player, Robot, Session, SuperDiamond, World,
    BOSS_ENGAGE_RADIUS, BOSS_MELEE_COOLDOWN, BOSS_MELEE_DAMAGE, BOSS_MELEE_RADIUS,
    BOSS_RANGED_COOLDOWN, BOSS_RANGED_MIN_LEVEL, DIAMOND_SCORE, JUMP_STRENGTH, PLAYER_SPAWN_X,
    PLAYER_SPAWN_Y, PLAYER_SPEED, ROBOT_CHASE_RADIUS, ROBOT_CONTACT_COOLDOWN,
    ROBOT_CONTACT_DAMAGE, SUPER_DIAMOND_SCORE, SUPER_JUMP_STRENGTH,
};
use crate::level::{generate_level, MAX_LEVEL};
use crate::physics::{
    clamp_to_world, integrate, overlaps, resolve_platform_collision, Platform, TickPhysics,
    FLOOR_Y, SCREEN_WIDTH, WORLD_WIDTH,
};

/// Robots patrol at this fraction of their chase speed.
pub const PATROL_SPEED_FACTOR: f32 = 0.5;

/// Frames the "level complete" interstitial lasts.
pub const TRANSITION_FRAMES: u32 = 90;

// ── Construction ─────────────────────────────────────────────────────────────

/// Build the world for a level, with the player at the fixed spawn point.
pub fn init_world(level: u32) -> World {
    let data = generate_level(level);
    World {
        player: Player::spawn(PLAYER_SPAWN_X, PLAYER_SPAWN_Y),
        platforms: data.platforms,
        robots: data.robots,
        diamonds: data.diamonds,
        super_diamonds: data.super_diamonds,
        boss: Some(data.boss),
        effects: Vec::new(),
        camera_x: camera_for(PLAYER_SPAWN_X),
        cues: Vec::new(),
    }
}

/// Camera scroll derived from the player position, clamped to the world.
pub fn camera_for(player_x: f32) -> f32 {
    (player_x - SCREEN_WIDTH / 2.0).clamp(0.0, WORLD_WIDTH - SCREEN_WIDTH)
}

// ── The tick ─────────────────────────────────────────────────────────────────

/// Advance the simulation by one frame.
pub fn tick(world: &mut World, session: &mut Session, input: &InputState) {
    match session.mode {
        Mode::Running => {}
        Mode::LevelTransition => {
            session.transition_timer = session.transition_timer.saturating_sub(1);
            if session.transition_timer == 0 {
                *world = init_world(session.level);
                session.mode = Mode::Running;
            }
            return;
        }
        Mode::Paused | Mode::Win | Mode::GameOver => return,
    }

    // Physics parameters for this tick, fixed before anyone integrates
    let physics = TickPhysics::for_tick(world.player.powerups.super_jump_active());

    let World {
        player,
        platforms,
        robots,
        diamonds,
        super_diamonds,
        boss,
        effects,
        camera_x,
        cues,
    } = world;

    update_player(
        player,
        input,
        &physics,
        platforms,
        robots,
        boss.as_mut(),
        session,
        effects,
        cues,
    );
    *camera_x = camera_for(player.body.x);

    for robot in robots.iter_mut() {
        update_robot(robot, player, platforms, &physics, session, cues);
    }
    if let Some(boss) = boss.as_mut() {
        update_boss(boss, player, platforms, &physics, session, effects, cues);
    }

    if player.shockwave_pending {
        player.shockwave_pending = false;
        combat::shockwave(
            player.body.center(),
            robots,
            boss.as_mut(),
            session,
            effects,
            cues,
        );
    }

    collect_diamonds(diamonds, player, session, effects, cues);
    collect_super_diamonds(super_diamonds, player, *camera_x, session, effects, cues);

    effects.retain_mut(|e| e.step());

    check_level_completion(robots, boss.as_ref(), session, effects);
}

// ── Player ───────────────────────────────────────────────────────────────────

#[allow(clippy::too_many_arguments)]
pub fn update_player(
    player: &mut Player,
    input: &InputState,
    physics: &TickPhysics,
    platforms: &[Platform],
    robots: &mut [Robot],
    mut boss: Option<&mut Boss>,
    session: &mut Session,
    effects: &mut Vec<Effect>,
    cues: &mut Vec<Cue>,
) {
    // Input
    player.body.vx = 0.0;
    if input.left {
        player.body.vx = -PLAYER_SPEED;
        player.facing_right = false;
    }
    if input.right {
        player.body.vx = PLAYER_SPEED;
        player.facing_right = true;
    }
    if input.jump && player.body.on_ground {
        player.body.vy = if player.powerups.super_jump_active() {
            SUPER_JUMP_STRENGTH
        } else {
            JUMP_STRENGTH
        };
        player.body.on_ground = false;
        cues.push(Cue::Jump);
    }
    if !player.attacking() {
        if input.punch {
            combat::start_attack(
                player,
                AttackKind::Punch,
                robots,
                boss.as_deref_mut(),
                session,
                effects,
                cues,
            );
        } else if input.kick {
            combat::start_attack(
                player,
                AttackKind::Kick,
                robots,
                boss.as_deref_mut(),
                session,
                effects,
                cues,
            );
        }
    }

    // Buff timers
    player.powerups.tick();

    // Move, then resolve
    integrate(&mut player.body, physics.player_gravity);
    let falling_vy = player.body.vy;
    resolve_platform_collision(&mut player.body, platforms, true);

    // Landing from the air onto a robot or the boss is a stomp
    combat::check_stomp(player, falling_vy, robots, boss, session, effects, cues);

    // Countdown timers
    player.invulnerable = player.invulnerable.saturating_sub(1);
    player.attack = match player.attack {
        Some((_, 1)) | None => None,
        Some((kind, t)) => Some((kind, t - 1)),
    };
    player.stomp_cooldown = player.stomp_cooldown.saturating_sub(1);

    // Walk cycle
    if player.body.vx.abs() > 0.1 {
        player.walk_timer += 1;
        if player.walk_timer >= 10 {
            player.walk_frame = (player.walk_frame + 1) % 4;
            player.walk_timer = 0;
        }
    } else {
        player.walk_frame = 0;
    }

    clamp_to_world(&mut player.body);
}

// ── Robots ───────────────────────────────────────────────────────────────────

pub fn update_robot(
    robot: &mut Robot,
    player: &mut Player,
    platforms: &[Platform],
    physics: &TickPhysics,
    session: &mut Session,
    cues: &mut Vec<Cue>,
) {
    if robot.defeated {
        return;
    }

    let distance = (robot.body.x - player.body.x).abs();
    robot.chasing = distance < ROBOT_CHASE_RADIUS;

    if robot.chasing {
        robot.direction = if player.body.x > robot.body.x {
            1.0
        } else {
            -1.0
        };
        robot.body.vx = robot.direction * robot.speed;
    } else {
        robot.body.vx = robot.direction * robot.speed * PATROL_SPEED_FACTOR;
        if (robot.body.x - robot.start_x).abs() > robot.patrol_distance {
            robot.direction = -robot.direction;
        }
    }

    integrate(&mut robot.body, physics.gravity);
    resolve_platform_collision(&mut robot.body, platforms, false);

    // Turn before a ledge while patrolling
    if robot.body.on_ground && !robot.chasing {
        let ahead = robot.body.x + robot.direction * robot.speed * 2.0;
        let mut will_fall = true;
        for platform in platforms {
            if ahead >= platform.x
                && ahead <= platform.x + platform.w
                && robot.body.bottom() <= platform.y + 10.0
            {
                will_fall = false;
            }
        }
        if robot.body.bottom() >= FLOOR_Y - 10.0 {
            will_fall = false;
        }
        if will_fall {
            robot.direction = -robot.direction;
        }
    }

    // Contact attack
    if robot.attack_cooldown == 0 && overlaps(&robot.body.rect(), &player.body.rect()) {
        combat::damage_player(player, ROBOT_CONTACT_DAMAGE, session, cues);
        cues.push(Cue::RobotHit);
        robot.attack_cooldown = ROBOT_CONTACT_COOLDOWN;
    }
    robot.attack_cooldown = robot.attack_cooldown.saturating_sub(1);

    clamp_to_world(&mut robot.body);
}

// ── Boss ─────────────────────────────────────────────────────────────────────

pub fn update_boss(
    boss: &mut Boss,
    player: &mut Player,
    platforms: &[Platform],
    physics: &TickPhysics,
    session: &mut Session,
    effects: &mut Vec<Effect>,
    cues: &mut Vec<Cue>,
) {
    if boss.defeated {
        return;
    }

    let distance = (boss.body.x - player.body.x).abs();

    // Advance toward the player, but never leave the arena
    boss.body.vx = 0.0;
    if distance < BOSS_ENGAGE_RADIUS && distance > BOSS_MELEE_RADIUS {
        if player.body.x > boss.body.x && boss.body.x < boss.start_x + boss.patrol_range {
            boss.body.vx = boss.speed;
            boss.direction = 1.0;
        } else if player.body.x < boss.body.x && boss.body.x > boss.start_x - boss.patrol_range {
            boss.body.vx = -boss.speed;
            boss.direction = -1.0;
        }
    }

    integrate(&mut boss.body, physics.gravity);
    resolve_platform_collision(&mut boss.body, platforms, false);

    // Attack selection
    if boss.attack_cooldown == 0 {
        if distance < BOSS_MELEE_RADIUS {
            combat::damage_player(player, BOSS_MELEE_DAMAGE, session, cues);
            cues.push(Cue::BossHit);
            boss.attack_cooldown = BOSS_MELEE_COOLDOWN;
        } else if distance < BOSS_ENGAGE_RADIUS && boss.level >= BOSS_RANGED_MIN_LEVEL {
            effects.push(Effect::projectile(boss.body.center(), player.body.center()));
            boss.attack_cooldown = BOSS_RANGED_COOLDOWN;
        }
    }
    boss.attack_cooldown = boss.attack_cooldown.saturating_sub(1);

    boss.body.x = boss
        .body
        .x
        .clamp(boss.start_x - boss.patrol_range, boss.start_x + boss.patrol_range);
}

// ── Pickups ──────────────────────────────────────────────────────────────────

pub fn collect_diamonds(
    diamonds: &mut [Diamond],
    player: &mut Player,
    session: &mut Session,
    effects: &mut Vec<Effect>,
    cues: &mut Vec<Cue>,
) {
    for diamond in diamonds.iter_mut() {
        if diamond.collected {
            continue;
        }
        if overlaps(&diamond.rect(), &player.body.rect()) {
            diamond.collected = true;
            session.diamonds += 1;
            session.score += DIAMOND_SCORE;
            cues.push(Cue::PickupCollect);
            effects.push(Effect::sparkle(diamond.x, diamond.y));
        }
    }
}

pub fn collect_super_diamonds(
    super_diamonds: &mut [SuperDiamond],
    player: &mut Player,
    camera_x: f32,
    session: &mut Session,
    effects: &mut Vec<Effect>,
    cues: &mut Vec<Cue>,
) {
    for sd in super_diamonds.iter_mut() {
        if sd.collected {
            continue;
        }
        // Off-screen pickups are not collectible this tick
        let rect = sd.rect();
        if rect.x + rect.w < camera_x || rect.x > camera_x + SCREEN_WIDTH {
            continue;
        }
        if overlaps(&rect, &player.body.rect()) {
            sd.collected = true;
            player.powerups.activate(sd.kind);
            session.score += SUPER_DIAMOND_SCORE;
            cues.push(Cue::PickupCollect);
            effects.push(Effect::sparkle(sd.x, sd.y));
            effects.push(Effect::banner(sd.kind.label(), 90));
        }
    }
}

// ── Progression ──────────────────────────────────────────────────────────────

/// Level completion: every robot defeated and the boss defeated (or absent).
/// Leaving `Running` makes the transition fire exactly once.
pub fn check_level_completion(
    robots: &[Robot],
    boss: Option<&Boss>,
    session: &mut Session,
    effects: &mut Vec<Effect>,
) {
    if session.mode != Mode::Running {
        return;
    }
    let robots_done = robots.iter().all(|r| r.defeated);
    let boss_done = boss.map_or(true, |b| b.defeated);
    if !(robots_done && boss_done) {
        return;
    }

    if session.level >= MAX_LEVEL {
        session.mode = Mode::Win;
    } else {
        session.level += 1;
        session.mode = Mode::LevelTransition;
        session.transition_timer = TRANSITION_FRAMES;
        effects.push(Effect::banner("LEVEL COMPLETE", TRANSITION_FRAMES));
    }
}
