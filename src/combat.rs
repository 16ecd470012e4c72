//! Combat resolution: melee hit-testing, stomps, shockwaves and damage
//! application for every combatant.

use crate::effects::Effect;
use crate::entities::{
    AttackKind, Boss, Cue, Mode, Player, Robot, Session, HIT_INVULN_FRAMES, PLAYER_SPAWN_X,
    PLAYER_SPAWN_Y, START_DIAMONDS,
};
use crate::physics::Body;

// ── Melee ────────────────────────────────────────────────────────────────────

pub const PUNCH_RANGE: f32 = 45.0;
pub const KICK_RANGE: f32 = 55.0;
pub const PUNCH_DAMAGE: i32 = 15;
pub const KICK_DAMAGE: i32 = 25;
/// Frames an attack stays active; no new attack can start meanwhile.
pub const ATTACK_DURATION: u32 = 20;
/// A target slightly behind the attacker's center still counts as "in front".
pub const BACKWARD_TOLERANCE: f32 = 10.0;
/// Maximum vertical center offset for a melee hit.
pub const VERTICAL_TOLERANCE: f32 = 60.0;

// ── Stomp ────────────────────────────────────────────────────────────────────

pub const JUMP_DAMAGE: i32 = 30;
/// Extra damage per unit of fall speed.
pub const FALL_SPEED_BONUS: f32 = 0.5;
pub const BOUNCE_FACTOR: f32 = 0.6;
pub const BOUNCE_CAP: f32 = 12.0;
/// Frames before another stomp can land, so one fall cannot multi-hit.
pub const STOMP_COOLDOWN: u32 = 15;
/// The target's top must be within this band of the player's bottom.
pub const STOMP_BAND: f32 = 14.0;
/// Horizontal inset of the target span; glancing hits don't count.
pub const STOMP_INSET: f32 = 4.0;

// ── Shockwave ────────────────────────────────────────────────────────────────

pub const SHOCKWAVE_RADIUS: f32 = 150.0;
pub const SHOCKWAVE_DAMAGE: i32 = 10;
pub const SHOCKWAVE_KNOCKBACK: f32 = 12.0;
pub const SHOCKWAVE_LIFT: f32 = -4.0;

// ── Scores ───────────────────────────────────────────────────────────────────

pub const ROBOT_SCORE: u32 = 100;
pub const BOSS_SCORE: u32 = 500;

pub fn damage_for(kind: AttackKind) -> i32 {
    match kind {
        AttackKind::Punch => PUNCH_DAMAGE,
        AttackKind::Kick => KICK_DAMAGE,
    }
}

pub fn range_for(kind: AttackKind) -> f32 {
    match kind {
        AttackKind::Punch => PUNCH_RANGE,
        AttackKind::Kick => KICK_RANGE,
    }
}

/// Melee hit test: centers within `range`, vertically aligned, and the
/// target roughly in the facing direction.
pub fn in_attack_range(attacker: &Body, facing_right: bool, target: &Body, range: f32) -> bool {
    let (ax, ay) = attacker.center();
    let (tx, ty) = target.center();
    let dx = tx - ax;
    let dy = ty - ay;

    if (dx * dx + dy * dy).sqrt() > range {
        return false;
    }
    if dy.abs() > VERTICAL_TOLERANCE {
        return false;
    }
    let dir = if facing_right { 1.0 } else { -1.0 };
    dx * dir >= -BACKWARD_TOLERANCE
}

/// Start a punch or kick and resolve its hits immediately.  Every robot in
/// range is damaged in one pass; the boss is tested as well.
pub fn start_attack(
    player: &mut Player,
    kind: AttackKind,
    robots: &mut [Robot],
    boss: Option<&mut Boss>,
    session: &mut Session,
    effects: &mut Vec<Effect>,
    cues: &mut Vec<Cue>,
) {
    player.attack = Some((kind, ATTACK_DURATION));
    cues.push(match kind {
        AttackKind::Punch => Cue::Punch,
        AttackKind::Kick => Cue::Kick,
    });

    let damage = (damage_for(kind) as f32 * player.powerups.strength_multiplier()) as i32;
    let range = range_for(kind);

    for robot in robots.iter_mut() {
        if robot.defeated {
            continue;
        }
        if in_attack_range(&player.body, player.facing_right, &robot.body, range) {
            effects.push(Effect::hit(robot.body.center_x(), robot.body.y));
            damage_robot(robot, damage, session, effects, cues);
        }
    }
    if let Some(boss) = boss {
        if !boss.defeated
            && in_attack_range(&player.body, player.facing_right, &boss.body, range)
        {
            effects.push(Effect::hit(boss.body.center_x(), boss.body.y));
            damage_boss(boss, damage, session, effects, cues);
        }
    }

    // Attacking with an offensive buff up releases a shockwave at tick end
    if player.powerups.super_strength_active() || player.powerups.invincible() {
        player.shockwave_pending = true;
    }
}

/// Stomp geometry: the target's top sits just under the player's bottom and
/// the player's center is over the target, inset so glancing hits miss.
fn stomp_hit(player: &Body, target: &Body) -> bool {
    if (target.y - player.bottom()).abs() > STOMP_BAND {
        return false;
    }
    let cx = player.center_x();
    cx >= target.x + STOMP_INSET && cx <= target.x + target.w - STOMP_INSET
}

fn bounce(player: &mut Player, falling_vy: f32) {
    player.body.vy = -(BOUNCE_FACTOR * falling_vy).min(BOUNCE_CAP);
    player.stomp_cooldown = STOMP_COOLDOWN;
}

/// Jump-attack test, run after collision resolution with the fall speed the
/// player had while moving.  Hits the first robot only; the boss is checked
/// independently in the same tick.
pub fn check_stomp(
    player: &mut Player,
    falling_vy: f32,
    robots: &mut [Robot],
    boss: Option<&mut Boss>,
    session: &mut Session,
    effects: &mut Vec<Effect>,
    cues: &mut Vec<Cue>,
) {
    if falling_vy <= 0.0 || player.stomp_cooldown > 0 {
        return;
    }

    let damage =
        (JUMP_DAMAGE as f32 * player.powerups.strength_multiplier() + falling_vy * FALL_SPEED_BONUS)
            as i32;

    let mut bounced = false;
    for robot in robots.iter_mut() {
        if robot.defeated {
            continue;
        }
        if stomp_hit(&player.body, &robot.body) {
            effects.push(Effect::hit(robot.body.center_x(), robot.body.y));
            damage_robot(robot, damage, session, effects, cues);
            bounce(player, falling_vy);
            bounced = true;
            break;
        }
    }
    if let Some(boss) = boss {
        if !boss.defeated && stomp_hit(&player.body, &boss.body) {
            effects.push(Effect::hit(boss.body.center_x(), boss.body.y));
            damage_boss(boss, damage, session, effects, cues);
            if !bounced {
                bounce(player, falling_vy);
            }
        }
    }
}

/// Radius AOE around the player, with knockback.  Fired once per tick from
/// the pending flag.
pub fn shockwave(
    center: (f32, f32),
    robots: &mut [Robot],
    boss: Option<&mut Boss>,
    session: &mut Session,
    effects: &mut Vec<Effect>,
    cues: &mut Vec<Cue>,
) {
    effects.push(Effect::shockwave(center.0, center.1));

    for robot in robots.iter_mut() {
        if robot.defeated {
            continue;
        }
        let (rx, ry) = robot.body.center();
        let (dx, dy) = (rx - center.0, ry - center.1);
        if (dx * dx + dy * dy).sqrt() <= SHOCKWAVE_RADIUS {
            robot.body.x += SHOCKWAVE_KNOCKBACK * dx.signum();
            robot.body.vy = SHOCKWAVE_LIFT;
            damage_robot(robot, SHOCKWAVE_DAMAGE, session, effects, cues);
        }
    }
    if let Some(boss) = boss {
        if !boss.defeated {
            let (bx, by) = boss.body.center();
            let (dx, dy) = (bx - center.0, by - center.1);
            if (dx * dx + dy * dy).sqrt() <= SHOCKWAVE_RADIUS {
                boss.body.vy = SHOCKWAVE_LIFT;
                damage_boss(boss, SHOCKWAVE_DAMAGE, session, effects, cues);
            }
        }
    }
}

// ── Damage application ───────────────────────────────────────────────────────

/// Damage a robot.  Defeat happens exactly once; hitting an already-defeated
/// robot is a no-op.
pub fn damage_robot(
    robot: &mut Robot,
    amount: i32,
    session: &mut Session,
    effects: &mut Vec<Effect>,
    cues: &mut Vec<Cue>,
) {
    if robot.defeated {
        return;
    }
    robot.health -= amount;
    if robot.health <= 0 {
        robot.defeated = true;
        session.score += ROBOT_SCORE;
        cues.push(Cue::Explosion);
        effects.push(Effect::explosion(robot.body.center_x(), robot.body.y));
    } else {
        cues.push(Cue::RobotHit);
    }
}

/// Damage the boss.  Same exactly-once defeat contract as robots; the level
/// completion itself is detected by the progression check at tick end.
pub fn damage_boss(
    boss: &mut Boss,
    amount: i32,
    session: &mut Session,
    effects: &mut Vec<Effect>,
    cues: &mut Vec<Cue>,
) {
    if boss.defeated {
        return;
    }
    boss.health -= amount;
    if boss.health <= 0 {
        boss.defeated = true;
        session.score += BOSS_SCORE;
        cues.push(Cue::Explosion);
        effects.push(Effect::explosion(boss.body.center_x(), boss.body.y));
    } else {
        cues.push(Cue::BossHit);
    }
}

/// Damage the player.  Invincibility nullifies the hit (and arms the
/// shockwave); post-hit invulnerability frames make it a no-op.  Currency
/// never goes negative: an emptying hit runs the death path instead.
pub fn damage_player(
    player: &mut Player,
    amount: i32,
    session: &mut Session,
    cues: &mut Vec<Cue>,
) {
    if player.powerups.invincible() {
        player.shockwave_pending = true;
        return;
    }
    if player.invulnerable > 0 {
        return;
    }

    session.diamonds -= amount;
    cues.push(Cue::PickupLost);
    player.invulnerable = HIT_INVULN_FRAMES;

    if session.diamonds <= 0 {
        session.diamonds = 0;
        session.lives = session.lives.saturating_sub(1);
        cues.push(Cue::LifeLost);
        if session.lives == 0 {
            session.mode = Mode::GameOver;
        } else {
            session.diamonds = START_DIAMONDS;
            respawn(player);
        }
    }
}

fn respawn(player: &mut Player) {
    player.body.x = PLAYER_SPAWN_X;
    player.body.y = PLAYER_SPAWN_Y;
    player.body.vx = 0.0;
    player.body.vy = 0.0;
    player.invulnerable = HIT_INVULN_FRAMES;
}
