use diamond_quest::compute::*;
use diamond_quest::entities::*;
use diamond_quest::level::MAX_LEVEL;
use diamond_quest::physics::{FLOOR_Y, GRAVITY, WORLD_WIDTH};
use diamond_quest::powerups::{BuffKind, PowerUps, POWER_UP_DURATION};

fn empty_world() -> World {
    World {
        player: Player::spawn(PLAYER_SPAWN_X, PLAYER_SPAWN_Y),
        platforms: Vec::new(),
        robots: Vec::new(),
        diamonds: Vec::new(),
        super_diamonds: Vec::new(),
        boss: None,
        effects: Vec::new(),
        camera_x: 0.0,
        cues: Vec::new(),
    }
}

fn grounded_robot(x: f32) -> Robot {
    Robot::new(x, FLOOR_Y - ROBOT_HEIGHT, RobotKind::Normal, 1.0)
}

fn defeated_robot(x: f32) -> Robot {
    let mut robot = grounded_robot(x);
    robot.defeated = true;
    robot
}

/// Empty world plus one distant live robot, so the level cannot
/// spuriously complete mid-test.
fn arena_world() -> World {
    let mut world = empty_world();
    world.robots.push(grounded_robot(PLAYER_SPAWN_X + 2000.0));
    world
}

// ── session bootstrap ─────────────────────────────────────────────────────────

#[test]
fn session_defaults() {
    let s = Session::new();
    assert_eq!(s.level, 1);
    assert_eq!(s.diamonds, 50);
    assert_eq!(s.lives, 3);
    assert_eq!(s.score, 0);
    assert_eq!(s.mode, Mode::Running);
}

#[test]
fn init_world_spawns_player_and_boss() {
    let world = init_world(1);
    assert_eq!(world.player.body.x, PLAYER_SPAWN_X);
    assert_eq!(world.player.body.y, PLAYER_SPAWN_Y);
    assert_eq!(world.robots.len(), 6);
    assert!(world.boss.is_some());
    assert_eq!(world.camera_x, 0.0);
}

// ── camera ────────────────────────────────────────────────────────────────────

#[test]
fn camera_follows_and_clamps() {
    assert_eq!(camera_for(100.0), 0.0);
    assert_eq!(camera_for(1500.0), 1500.0 - 512.0);
    assert_eq!(camera_for(2950.0), WORLD_WIDTH - 1024.0);
}

// ── mode gating ───────────────────────────────────────────────────────────────

#[test]
fn paused_tick_freezes_the_world() {
    let mut world = empty_world();
    let mut session = Session::new();
    session.mode = Mode::Paused;
    let before = world.player.body.clone();

    tick(&mut world, &mut session, &InputState::default());
    assert_eq!(world.player.body, before);
}

// ── player update ─────────────────────────────────────────────────────────────

#[test]
fn gravity_pulls_the_player_down() {
    let mut world = arena_world();
    let mut session = Session::new();

    tick(&mut world, &mut session, &InputState::default());
    assert!((world.player.body.vy - GRAVITY).abs() < 1e-6);
    assert!((world.player.body.y - (PLAYER_SPAWN_Y + GRAVITY)).abs() < 1e-6);
}

#[test]
fn input_moves_and_faces_the_player() {
    let mut world = arena_world();
    let mut session = Session::new();
    let input = InputState {
        right: true,
        ..Default::default()
    };

    tick(&mut world, &mut session, &input);
    assert!((world.player.body.x - (PLAYER_SPAWN_X + PLAYER_SPEED)).abs() < 1e-6);
    assert!(world.player.facing_right);

    let input = InputState {
        left: true,
        ..Default::default()
    };
    tick(&mut world, &mut session, &input);
    assert!(!world.player.facing_right);
}

#[test]
fn jump_only_works_on_the_ground() {
    let mut world = arena_world();
    let mut session = Session::new();
    world.player.body.y = FLOOR_Y - PLAYER_HEIGHT;
    world.player.body.on_ground = true;
    let input = InputState {
        jump: true,
        ..Default::default()
    };

    tick(&mut world, &mut session, &input);
    assert!(world.player.body.vy < 0.0); // rising
    assert!(world.cues.contains(&Cue::Jump));

    // Mid-air jump does nothing
    let mut airborne = arena_world();
    airborne.player.body.on_ground = false;
    let mut session2 = Session::new();
    tick(&mut airborne, &mut session2, &input);
    assert!(airborne.player.body.vy > 0.0); // still falling
}

#[test]
fn super_jump_buff_raises_the_impulse() {
    let mut world = arena_world();
    let mut session = Session::new();
    world.player.body.y = FLOOR_Y - PLAYER_HEIGHT;
    world.player.body.on_ground = true;
    world.player.powerups.activate(BuffKind::SuperJump);
    let input = InputState {
        jump: true,
        ..Default::default()
    };

    tick(&mut world, &mut session, &input);
    // -22 impulse softened by the reduced 0.6 gravity this tick
    assert!(world.player.body.vy < JUMP_STRENGTH);
}

#[test]
fn attack_window_blocks_new_attacks() {
    let mut world = arena_world();
    let mut session = Session::new();
    let input = InputState {
        punch: true,
        ..Default::default()
    };

    tick(&mut world, &mut session, &input);
    let after_one = world.cues.iter().filter(|c| **c == Cue::Punch).count();
    assert_eq!(after_one, 1);

    // Holding punch during the attack window starts nothing new
    tick(&mut world, &mut session, &input);
    let after_two = world.cues.iter().filter(|c| **c == Cue::Punch).count();
    assert_eq!(after_two, 1);
}

// ── robot AI ──────────────────────────────────────────────────────────────────

#[test]
fn robot_patrols_beyond_chase_radius() {
    let mut world = empty_world();
    let mut session = Session::new();
    // Distance 200 >= chase radius 150
    world.robots.push(grounded_robot(PLAYER_SPAWN_X + 200.0));
    let start = world.robots[0].body.x;

    tick(&mut world, &mut session, &InputState::default());
    let robot = &world.robots[0];
    assert!(!robot.chasing);
    // Patrolling at half speed in its own direction, not toward the player
    assert!((robot.body.x - (start + robot.speed * PATROL_SPEED_FACTOR)).abs() < 1e-4);
}

#[test]
fn robot_chases_within_radius() {
    let mut world = empty_world();
    let mut session = Session::new();
    world.robots.push(grounded_robot(PLAYER_SPAWN_X + 100.0));
    let start = world.robots[0].body.x;

    tick(&mut world, &mut session, &InputState::default());
    let robot = &world.robots[0];
    assert!(robot.chasing);
    assert_eq!(robot.direction, -1.0); // player is to the left
    assert!(robot.body.x < start);
}

#[test]
fn robot_contact_costs_diamonds() {
    let mut world = arena_world();
    let mut session = Session::new();
    // Robot right on top of the player
    world.robots.insert(0, grounded_robot(PLAYER_SPAWN_X));
    world.robots[0].body.y = PLAYER_SPAWN_Y;

    tick(&mut world, &mut session, &InputState::default());
    assert_eq!(session.diamonds, 50 - ROBOT_CONTACT_DAMAGE);
    assert_eq!(world.robots[0].attack_cooldown, ROBOT_CONTACT_COOLDOWN - 1);
    assert!(world.cues.contains(&Cue::RobotHit));
}

#[test]
fn defeated_robot_is_inert() {
    let mut world = arena_world();
    let mut session = Session::new();
    world.robots.insert(0, defeated_robot(PLAYER_SPAWN_X));
    world.robots[0].body.y = PLAYER_SPAWN_Y;
    let before = world.robots[0].body.clone();

    tick(&mut world, &mut session, &InputState::default());
    assert_eq!(world.robots[0].body, before);
    assert_eq!(session.diamonds, 50);
}

// ── boss behaviour ────────────────────────────────────────────────────────────

#[test]
fn boss_ranged_attack_at_level_three() {
    let mut world = arena_world();
    let mut session = Session::new();
    session.level = 3;
    let mut boss = Boss::new(PLAYER_SPAWN_X + 150.0, FLOOR_Y - BOSS_HEIGHT, 3);
    boss.body.on_ground = true;
    world.boss = Some(boss);

    tick(&mut world, &mut session, &InputState::default());
    let boss = world.boss.as_ref().unwrap();
    // Beyond melee, inside the ranged radius: a visual projectile and the
    // ranged cooldown, not the melee one
    assert_eq!(boss.attack_cooldown, BOSS_RANGED_COOLDOWN - 1);
    assert_eq!(world.effects.len(), 1);
    assert_eq!(session.diamonds, 50); // no direct damage
}

#[test]
fn low_level_boss_has_no_ranged_attack() {
    let mut world = arena_world();
    let mut session = Session::new();
    let mut boss = Boss::new(PLAYER_SPAWN_X + 150.0, FLOOR_Y - BOSS_HEIGHT, 2);
    boss.body.on_ground = true;
    world.boss = Some(boss);

    tick(&mut world, &mut session, &InputState::default());
    assert_eq!(world.boss.as_ref().unwrap().attack_cooldown, 0);
    assert!(world.effects.is_empty());
}

#[test]
fn boss_melee_in_close_range() {
    let mut world = arena_world();
    let mut session = Session::new();
    let boss = Boss::new(PLAYER_SPAWN_X + 50.0, FLOOR_Y - BOSS_HEIGHT, 1);
    world.boss = Some(boss);

    tick(&mut world, &mut session, &InputState::default());
    assert_eq!(session.diamonds, 50 - BOSS_MELEE_DAMAGE);
    assert_eq!(
        world.boss.as_ref().unwrap().attack_cooldown,
        BOSS_MELEE_COOLDOWN - 1
    );
    assert!(world.cues.contains(&Cue::BossHit));
}

#[test]
fn boss_stays_inside_its_arena() {
    let mut world = arena_world();
    let mut session = Session::new();
    let mut boss = Boss::new(PLAYER_SPAWN_X + 150.0, FLOOR_Y - BOSS_HEIGHT, 1);
    // Already at the left edge of its envelope
    boss.body.x = boss.start_x - boss.patrol_range;
    world.boss = Some(boss);

    tick(&mut world, &mut session, &InputState::default());
    let boss = world.boss.as_ref().unwrap();
    assert!(boss.body.x >= boss.start_x - boss.patrol_range);
}

// ── pickups ───────────────────────────────────────────────────────────────────

#[test]
fn diamond_collection_pays_out() {
    let mut world = arena_world();
    let mut session = Session::new();
    world
        .diamonds
        .push(Diamond::new(PLAYER_SPAWN_X + 5.0, PLAYER_SPAWN_Y + 10.0));

    tick(&mut world, &mut session, &InputState::default());
    assert!(world.diamonds[0].collected);
    assert_eq!(session.diamonds, 51);
    assert_eq!(session.score, DIAMOND_SCORE);
    assert!(world.cues.contains(&Cue::PickupCollect));
}

#[test]
fn super_diamond_activates_its_buff() {
    let mut world = arena_world();
    let mut session = Session::new();
    world.super_diamonds.push(SuperDiamond::new(
        PLAYER_SPAWN_X + 5.0,
        PLAYER_SPAWN_Y + 10.0,
        BuffKind::SuperJump,
    ));

    tick(&mut world, &mut session, &InputState::default());
    assert!(world.super_diamonds[0].collected);
    assert_eq!(world.player.powerups.super_jump, POWER_UP_DURATION);
    assert_eq!(session.score, SUPER_DIAMOND_SCORE);
}

#[test]
fn offscreen_super_diamond_is_not_collectible() {
    let mut world = empty_world();
    let mut session = Session::new();
    let mut sd = vec![SuperDiamond::new(
        PLAYER_SPAWN_X + 5.0,
        PLAYER_SPAWN_Y + 10.0,
        BuffKind::Invincibility,
    )];

    // Stale camera far to the right: the pickup is outside the viewport
    collect_super_diamonds(
        &mut sd,
        &mut world.player,
        1976.0,
        &mut session,
        &mut world.effects,
        &mut world.cues,
    );
    assert!(!sd[0].collected);

    // With the camera over the player it collects normally
    collect_super_diamonds(
        &mut sd,
        &mut world.player,
        0.0,
        &mut session,
        &mut world.effects,
        &mut world.cues,
    );
    assert!(sd[0].collected);
}

// ── power-up timers ───────────────────────────────────────────────────────────

#[test]
fn buff_expires_after_its_duration() {
    let mut p = PowerUps::new();
    p.activate(BuffKind::SuperStrength);
    for _ in 0..POWER_UP_DURATION - 1 {
        p.tick();
    }
    assert!(p.super_strength_active());
    p.tick();
    assert!(!p.super_strength_active());
}

#[test]
fn repeat_pickup_resets_the_timer() {
    let mut p = PowerUps::new();
    p.activate(BuffKind::Invincibility);
    for _ in 0..300 {
        p.tick();
    }
    p.activate(BuffKind::Invincibility);
    assert_eq!(p.invincibility, POWER_UP_DURATION);
}

// ── progression ───────────────────────────────────────────────────────────────

fn cleared_world() -> World {
    let mut world = empty_world();
    world.robots.push(defeated_robot(500.0));
    let mut boss = Boss::new(2800.0, FLOOR_Y - BOSS_HEIGHT, 1);
    boss.defeated = true;
    world.boss = Some(boss);
    world
}

#[test]
fn level_completion_advances_exactly_once() {
    let mut world = cleared_world();
    let mut session = Session::new();

    tick(&mut world, &mut session, &InputState::default());
    assert_eq!(session.level, 2);
    assert_eq!(session.mode, Mode::LevelTransition);

    // The completed state persists across ticks without re-firing
    tick(&mut world, &mut session, &InputState::default());
    assert_eq!(session.level, 2);
}

#[test]
fn transition_regenerates_the_next_level() {
    let mut world = cleared_world();
    let mut session = Session::new();

    tick(&mut world, &mut session, &InputState::default());
    for _ in 0..TRANSITION_FRAMES {
        tick(&mut world, &mut session, &InputState::default());
    }
    assert_eq!(session.mode, Mode::Running);
    assert_eq!(session.level, 2);
    assert_eq!(world.robots.len(), 9); // level-2 roster
    assert_eq!(world.player.body.x, PLAYER_SPAWN_X);
}

#[test]
fn final_level_completion_wins_the_game() {
    let mut world = cleared_world();
    let mut session = Session::new();
    session.level = MAX_LEVEL;
    let score_before = session.score;

    tick(&mut world, &mut session, &InputState::default());
    assert_eq!(session.mode, Mode::Win);
    assert_eq!(session.level, MAX_LEVEL);

    tick(&mut world, &mut session, &InputState::default());
    assert_eq!(session.mode, Mode::Win);
    assert_eq!(session.score, score_before);
}

#[test]
fn bossless_world_completes_on_robots_alone() {
    let mut world = empty_world();
    let mut session = Session::new();
    world.robots.push(defeated_robot(500.0));

    tick(&mut world, &mut session, &InputState::default());
    assert_eq!(session.mode, Mode::LevelTransition);
}

#[test]
fn living_boss_blocks_completion() {
    let mut world = empty_world();
    let mut session = Session::new();
    world.robots.push(defeated_robot(500.0));
    world.boss = Some(Boss::new(2800.0, FLOOR_Y - BOSS_HEIGHT, 1));

    tick(&mut world, &mut session, &InputState::default());
    assert_eq!(session.mode, Mode::Running);
    assert_eq!(session.level, 1);
}
