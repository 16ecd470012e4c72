//! Timed power-up buffs.  Three independent countdown timers; 0 means
//! inactive.  Picking up a super diamond of an already-active type resets
//! its timer to the full duration without stacking the effect.

/// Frames a buff stays active after pickup (10 seconds at 60 FPS).
pub const POWER_UP_DURATION: u32 = 600;

/// Melee and stomp damage multiplier while super strength is active.
pub const STRENGTH_MULTIPLIER: f32 = 2.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BuffKind {
    SuperJump,
    SuperStrength,
    Invincibility,
}

impl BuffKind {
    pub fn label(&self) -> &'static str {
        match self {
            BuffKind::SuperJump => "SUPER JUMP",
            BuffKind::SuperStrength => "SUPER STRENGTH",
            BuffKind::Invincibility => "INVINCIBILITY",
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct PowerUps {
    /// Remaining frames of each buff; 0 = inactive.
    pub super_jump: u32,
    pub super_strength: u32,
    pub invincibility: u32,
}

impl PowerUps {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count every active buff down one frame.
    pub fn tick(&mut self) {
        self.super_jump = self.super_jump.saturating_sub(1);
        self.super_strength = self.super_strength.saturating_sub(1);
        self.invincibility = self.invincibility.saturating_sub(1);
    }

    /// Activate (or refresh) a buff to its full duration.
    pub fn activate(&mut self, kind: BuffKind) {
        match kind {
            BuffKind::SuperJump => self.super_jump = POWER_UP_DURATION,
            BuffKind::SuperStrength => self.super_strength = POWER_UP_DURATION,
            BuffKind::Invincibility => self.invincibility = POWER_UP_DURATION,
        }
    }

    pub fn super_jump_active(&self) -> bool {
        self.super_jump > 0
    }

    pub fn super_strength_active(&self) -> bool {
        self.super_strength > 0
    }

    pub fn invincible(&self) -> bool {
        self.invincibility > 0
    }

    /// Damage multiplier applied at the moment an attack starts.
    pub fn strength_multiplier(&self) -> f32 {
        if self.super_strength_active() {
            STRENGTH_MULTIPLIER
        } else {
            1.0
        }
    }
}
