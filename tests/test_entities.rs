use diamond_quest::entities::*;
use diamond_quest::powerups::BuffKind;

#[test]
fn entity_enums_clone_and_compare() {
    // Enums derive PartialEq; equality comparisons must work
    assert_eq!(RobotKind::Normal, RobotKind::Normal);
    assert_ne!(RobotKind::Normal, RobotKind::Tough);
    assert_eq!(Mode::Running, Mode::Running);
    assert_ne!(Mode::Running, Mode::GameOver);
    assert_eq!(AttackKind::Punch, AttackKind::Punch);
    assert_ne!(AttackKind::Punch, AttackKind::Kick);
    assert_eq!(Cue::Jump, Cue::Jump);
    assert_ne!(Cue::Jump, Cue::LifeLost);

    // Clone must produce an equal value
    let kind = BuffKind::SuperStrength;
    assert_eq!(kind, BuffKind::SuperStrength);
}

#[test]
fn robot_kind_drives_health_and_speed() {
    let normal = Robot::new(0.0, 0.0, RobotKind::Normal, 1.0);
    let tough = Robot::new(0.0, 0.0, RobotKind::Tough, 1.0);
    assert_eq!(normal.health, 30);
    assert_eq!(tough.health, 60);
    assert!(tough.speed > normal.speed);
}

#[test]
fn boss_health_depends_on_level() {
    assert_eq!(Boss::new(0.0, 0.0, 1).health, 100);
    assert_eq!(Boss::new(0.0, 0.0, 4).health, 250);
}

#[test]
fn world_clone_is_independent() {
    let original = World {
        player: Player::spawn(PLAYER_SPAWN_X, PLAYER_SPAWN_Y),
        platforms: Vec::new(),
        robots: vec![Robot::new(300.0, 600.0, RobotKind::Normal, 1.0)],
        diamonds: vec![Diamond::new(400.0, 500.0)],
        super_diamonds: Vec::new(),
        boss: None,
        effects: Vec::new(),
        camera_x: 0.0,
        cues: Vec::new(),
    };
    let mut cloned = original.clone();

    // Mutating the clone must not affect the original
    cloned.player.body.x = 999.0;
    cloned.robots[0].defeated = true;
    cloned.diamonds[0].collected = true;

    assert_eq!(original.player.body.x, PLAYER_SPAWN_X);
    assert!(!original.robots[0].defeated);
    assert!(!original.diamonds[0].collected);
}
