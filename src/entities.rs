//! All game entity types. Pure data, no logic.

use crate::effects::Effect;
use crate::physics::{Body, Platform, Rect};
use crate::powerups::{BuffKind, PowerUps};

// ── Player ───────────────────────────────────────────────────────────────────

pub const PLAYER_WIDTH: f32 = 30.0;
pub const PLAYER_HEIGHT: f32 = 50.0;
pub const PLAYER_SPEED: f32 = 6.0;
pub const JUMP_STRENGTH: f32 = -16.0;
/// Jump impulse while the super-jump buff is active.
pub const SUPER_JUMP_STRENGTH: f32 = -22.0;
pub const PLAYER_SPAWN_X: f32 = 100.0;
pub const PLAYER_SPAWN_Y: f32 = 500.0;
/// Starting diamond stock, restored on respawn.
pub const START_DIAMONDS: i32 = 50;
/// Invulnerability frames granted after taking a hit or respawning.
pub const HIT_INVULN_FRAMES: u32 = 120;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AttackKind {
    Punch,
    Kick,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub body: Body,
    pub facing_right: bool,
    /// Frames of damage immunity remaining after a hit.
    pub invulnerable: u32,
    /// Active attack and its remaining frames, if any.
    pub attack: Option<(AttackKind, u32)>,
    /// Frames until the next stomp can land.
    pub stomp_cooldown: u32,
    /// Set when a shockwave should fire at the end of the current tick.
    pub shockwave_pending: bool,
    pub powerups: PowerUps,
    pub walk_frame: u32,
    pub walk_timer: u32,
}

impl Player {
    pub fn spawn(x: f32, y: f32) -> Self {
        Self {
            body: Body::new(x, y, PLAYER_WIDTH, PLAYER_HEIGHT),
            facing_right: true,
            invulnerable: 0,
            attack: None,
            stomp_cooldown: 0,
            shockwave_pending: false,
            powerups: PowerUps::new(),
            walk_frame: 0,
            walk_timer: 0,
        }
    }

    pub fn attacking(&self) -> bool {
        self.attack.is_some()
    }
}

// ── Robots ───────────────────────────────────────────────────────────────────

pub const ROBOT_WIDTH: f32 = 25.0;
pub const ROBOT_HEIGHT: f32 = 40.0;
pub const ROBOT_PATROL_DISTANCE: f32 = 100.0;
/// Horizontal distance below which a robot abandons its patrol.
pub const ROBOT_CHASE_RADIUS: f32 = 150.0;
pub const ROBOT_CONTACT_DAMAGE: i32 = 5;
pub const ROBOT_CONTACT_COOLDOWN: u32 = 60;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RobotKind {
    Normal,
    Tough,
}

impl RobotKind {
    pub fn health(&self) -> i32 {
        match self {
            RobotKind::Normal => 30,
            RobotKind::Tough => 60,
        }
    }

    pub fn speed(&self) -> f32 {
        match self {
            RobotKind::Normal => 1.5,
            RobotKind::Tough => 2.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Robot {
    pub body: Body,
    pub kind: RobotKind,
    pub health: i32,
    pub max_health: i32,
    pub speed: f32,
    /// Patrol anchor: the spawn position bounds non-chasing movement.
    pub start_x: f32,
    pub patrol_distance: f32,
    /// Movement direction, +1 or -1.
    pub direction: f32,
    pub chasing: bool,
    pub attack_cooldown: u32,
    pub defeated: bool,
}

impl Robot {
    pub fn new(x: f32, y: f32, kind: RobotKind, direction: f32) -> Self {
        let health = kind.health();
        Self {
            body: Body::new(x, y, ROBOT_WIDTH, ROBOT_HEIGHT),
            kind,
            health,
            max_health: health,
            speed: kind.speed(),
            start_x: x,
            patrol_distance: ROBOT_PATROL_DISTANCE,
            direction,
            chasing: false,
            attack_cooldown: 0,
            defeated: false,
        }
    }
}

// ── Boss ─────────────────────────────────────────────────────────────────────

pub const BOSS_WIDTH: f32 = 50.0;
pub const BOSS_HEIGHT: f32 = 80.0;
/// The boss only moves while the player is inside this radius.
pub const BOSS_ENGAGE_RADIUS: f32 = 200.0;
pub const BOSS_MELEE_RADIUS: f32 = 60.0;
pub const BOSS_MELEE_DAMAGE: i32 = 10;
pub const BOSS_MELEE_COOLDOWN: u32 = 90;
pub const BOSS_RANGED_COOLDOWN: u32 = 120;
/// Bosses gain the ranged attack from this level on.
pub const BOSS_RANGED_MIN_LEVEL: u32 = 3;
/// The boss never strays further than this from its spawn point.
pub const BOSS_PATROL_RANGE: f32 = 150.0;

#[derive(Clone, Debug, PartialEq)]
pub struct Boss {
    pub body: Body,
    pub level: u32,
    pub health: i32,
    pub max_health: i32,
    pub speed: f32,
    pub start_x: f32,
    pub patrol_range: f32,
    pub direction: f32,
    pub attack_cooldown: u32,
    pub defeated: bool,
}

impl Boss {
    pub fn new(x: f32, y: f32, level: u32) -> Self {
        let health = 100 + (level.saturating_sub(1) as i32) * 50;
        Self {
            body: Body::new(x, y, BOSS_WIDTH, BOSS_HEIGHT),
            level,
            health,
            max_health: health,
            speed: 1.0 + level as f32 * 0.2,
            start_x: x,
            patrol_range: BOSS_PATROL_RANGE,
            direction: 1.0,
            attack_cooldown: 0,
            defeated: false,
        }
    }
}

// ── Pickups ──────────────────────────────────────────────────────────────────

pub const DIAMOND_SIZE: f32 = 20.0;
pub const DIAMOND_SCORE: u32 = 10;
pub const SUPER_DIAMOND_SIZE: f32 = 24.0;
pub const SUPER_DIAMOND_SCORE: u32 = 50;

#[derive(Clone, Debug, PartialEq)]
pub struct Diamond {
    pub x: f32,
    pub y: f32,
    pub collected: bool,
}

impl Diamond {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            x,
            y,
            collected: false,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, DIAMOND_SIZE, DIAMOND_SIZE)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SuperDiamond {
    pub x: f32,
    pub y: f32,
    pub kind: BuffKind,
    pub collected: bool,
}

impl SuperDiamond {
    pub fn new(x: f32, y: f32, kind: BuffKind) -> Self {
        Self {
            x,
            y,
            kind,
            collected: false,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, SUPER_DIAMOND_SIZE, SUPER_DIAMOND_SIZE)
    }
}

// ── Session & progression ────────────────────────────────────────────────────

pub const START_LIVES: u32 = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    Running,
    /// Update phase suspended; rendering continues.
    Paused,
    /// Brief interstitial before the next level's entities are generated.
    LevelTransition,
    Win,
    GameOver,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Session {
    pub level: u32,
    /// Currency.  Doubles as the player's health pool.
    pub diamonds: i32,
    pub lives: u32,
    pub score: u32,
    pub mode: Mode,
    pub transition_timer: u32,
}

impl Session {
    pub fn new() -> Self {
        Self {
            level: 1,
            diamonds: START_DIAMONDS,
            lives: START_LIVES,
            score: 0,
            mode: Mode::Running,
            transition_timer: 0,
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

// ── Frontend contracts ───────────────────────────────────────────────────────

/// Logical actions currently held, sampled once per tick.  The simulation
/// never sees a keyboard.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InputState {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
    pub punch: bool,
    pub kick: bool,
}

/// Named audio events.  The tick appends them to the world's cue queue and
/// the frontend drains the queue each frame, fire-and-forget.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cue {
    Jump,
    Punch,
    Kick,
    PickupCollect,
    PickupLost,
    RobotHit,
    BossHit,
    Explosion,
    LifeLost,
}

// ── World ────────────────────────────────────────────────────────────────────

/// Everything the simulation owns.  Entities never hold references back to
/// the world; update functions receive exactly the collections they need.
#[derive(Clone, Debug)]
pub struct World {
    pub player: Player,
    pub platforms: Vec<Platform>,
    pub robots: Vec<Robot>,
    pub diamonds: Vec<Diamond>,
    pub super_diamonds: Vec<SuperDiamond>,
    pub boss: Option<Boss>,
    pub effects: Vec<Effect>,
    pub camera_x: f32,
    pub cues: Vec<Cue>,
}
