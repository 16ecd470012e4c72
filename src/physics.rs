//! Geometry and physics utilities: AABB tests, gravity integration and
//! platform collision resolution.  Foundation for every entity.

// ── World constants ──────────────────────────────────────────────────────────

pub const SCREEN_WIDTH: f32 = 1024.0;
pub const SCREEN_HEIGHT: f32 = 768.0;
pub const WORLD_WIDTH: f32 = 3000.0;

/// Top of the solid ground plane spanning the whole world.
pub const FLOOR_Y: f32 = SCREEN_HEIGHT - 50.0;

pub const GRAVITY: f32 = 0.8;
/// Gravity applied to the player while the super-jump buff is active.
pub const FLOAT_GRAVITY: f32 = 0.6;

// ── Rectangles ───────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub fn center(&self) -> (f32, f32) {
        (self.x + self.w / 2.0, self.y + self.h / 2.0)
    }
}

/// True iff two axis-aligned rectangles intersect.  Boundaries are
/// exclusive: rectangles that merely touch do not overlap.
pub fn overlaps(a: &Rect, b: &Rect) -> bool {
    a.x < b.x + b.w && a.x + a.w > b.x && a.y < b.y + b.h && a.y + a.h > b.y
}

// ── Static platforms ─────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Platform {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Platform {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.w, self.h)
    }
}

// ── Kinematic bodies ─────────────────────────────────────────────────────────

/// Shared kinematic state of every dynamic entity (player, robot, boss).
#[derive(Clone, Debug, PartialEq)]
pub struct Body {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
    pub vx: f32,
    pub vy: f32,
    pub on_ground: bool,
}

impl Body {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            x,
            y,
            w,
            h,
            vx: 0.0,
            vy: 0.0,
            on_ground: false,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.w, self.h)
    }

    pub fn center(&self) -> (f32, f32) {
        self.rect().center()
    }

    pub fn center_x(&self) -> f32 {
        self.x + self.w / 2.0
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }
}

// ── Per-tick physics parameters ──────────────────────────────────────────────

/// Physics parameters computed once at tick start from the player's buff
/// state.  Robots and the boss always integrate with the standard gravity;
/// only the player's integration is buff-sensitive.
#[derive(Clone, Copy, Debug)]
pub struct TickPhysics {
    pub player_gravity: f32,
    pub gravity: f32,
}

impl TickPhysics {
    pub fn for_tick(super_jump_active: bool) -> Self {
        Self {
            player_gravity: if super_jump_active {
                FLOAT_GRAVITY
            } else {
                GRAVITY
            },
            gravity: GRAVITY,
        }
    }
}

// ── Integration & collision resolution ───────────────────────────────────────

/// Gravity, then one position step.
pub fn integrate(body: &mut Body, gravity: f32) {
    body.vy += gravity;
    body.x += body.vx;
    body.y += body.vy;
}

/// Resolve penetration against every overlapping platform, in creation
/// order, then clamp to the world floor plane.
///
/// Falling bodies whose top is still above the platform's top snap onto it;
/// rising bodies whose top is below snap under it.  Side penetration is
/// only resolved for the player (`resolve_sides`), in the direction of
/// travel.
pub fn resolve_platform_collision(body: &mut Body, platforms: &[Platform], resolve_sides: bool) {
    body.on_ground = false;

    for platform in platforms {
        if !overlaps(&body.rect(), &platform.rect()) {
            continue;
        }
        if body.vy > 0.0 && body.y < platform.y {
            body.y = platform.y - body.h;
            body.vy = 0.0;
            body.on_ground = true;
        } else if body.vy < 0.0 && body.y > platform.y {
            body.y = platform.y + platform.h;
            body.vy = 0.0;
        } else if resolve_sides {
            if body.vx > 0.0 {
                body.x = platform.x - body.w;
            } else if body.vx < 0.0 {
                body.x = platform.x + platform.w;
            }
        }
    }

    // World floor
    if body.bottom() >= FLOOR_Y {
        body.y = FLOOR_Y - body.h;
        body.vy = 0.0;
        body.on_ground = true;
    }
}

/// Clamp a body horizontally into the world.
pub fn clamp_to_world(body: &mut Body) {
    body.x = body.x.clamp(0.0, WORLD_WIDTH - body.w);
}
