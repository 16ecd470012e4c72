//! Rendering layer: all terminal I/O lives here.
//!
//! Each function receives a mutable writer and an immutable view of the
//! world.  No game logic is performed; this module only scales the fixed
//! 1024x768 viewport onto the terminal grid and translates state into
//! terminal commands.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal, QueueableCommand,
};

use diamond_quest::effects::{Effect, ParticleColor};
use diamond_quest::entities::{Mode, Robot, RobotKind, Session, World};
use diamond_quest::physics::{SCREEN_HEIGHT, SCREEN_WIDTH};
use diamond_quest::powerups::BuffKind;

// ── Colour palette ────────────────────────────────────────────────────────────

const C_HUD: Color = Color::Yellow;
const C_PLATFORM: Color = Color::Green;
const C_PLAYER: Color = Color::White;
const C_ROBOT: Color = Color::Grey;
const C_ROBOT_TOUGH: Color = Color::DarkRed;
const C_BOSS: Color = Color::Magenta;
const C_DIAMOND: Color = Color::Cyan;
const C_BANNER: Color = Color::Yellow;
const C_HINT: Color = Color::DarkGrey;
const C_NOTICE: Color = Color::Red;

/// Where the playfield starts; rows above it hold the HUD.
const FIELD_TOP: u16 = 2;

// ── Viewport scaling ──────────────────────────────────────────────────────────

struct View {
    cols: u16,
    rows: u16,
    camera_x: f32,
}

impl View {
    fn field_rows(&self) -> u16 {
        self.rows.saturating_sub(FIELD_TOP + 1)
    }

    /// Map a world position onto the terminal grid, if visible.
    fn cell(&self, wx: f32, wy: f32) -> Option<(u16, u16)> {
        let sx = (wx - self.camera_x) / SCREEN_WIDTH * self.cols as f32;
        let sy = wy / SCREEN_HEIGHT * self.field_rows() as f32;
        if sx < 0.0 || sx >= self.cols as f32 || sy < 0.0 {
            return None;
        }
        let row = FIELD_TOP + sy as u16;
        if row >= self.rows.saturating_sub(1) {
            return None;
        }
        Some((sx as u16, row))
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(
    out: &mut W,
    world: &World,
    session: &Session,
    notice: Option<&str>,
) -> std::io::Result<()> {
    let (cols, rows) = terminal::size()?;
    let view = View {
        cols,
        rows,
        camera_x: world.camera_x,
    };

    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_hud(out, world, session, cols)?;
    draw_platforms(out, world, &view)?;
    draw_pickups(out, world, &view)?;
    draw_robots(out, &world.robots, &view)?;
    draw_boss(out, world, &view)?;
    draw_player(out, world, &view)?;
    draw_effects(out, world, &view)?;
    draw_overlay(out, session, &view)?;
    draw_hint(out, rows)?;

    if let Some(text) = notice {
        out.queue(cursor::MoveTo(1, rows.saturating_sub(2)))?;
        out.queue(style::SetForegroundColor(C_NOTICE))?;
        out.queue(Print(text))?;
    }

    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, rows.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── HUD (rows 0-1) ────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(
    out: &mut W,
    world: &World,
    session: &Session,
    cols: u16,
) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD))?;
    out.queue(Print(format!(
        "Level {}  Diamonds:{:>4}  Lives:{}  Score:{:>6}",
        session.level, session.diamonds, session.lives, session.score
    )))?;

    let robots_left = world.robots.iter().filter(|r| !r.defeated).count();
    let status = if robots_left > 0 {
        format!("Robots left: {}", robots_left)
    } else if world.boss.as_ref().map_or(false, |b| !b.defeated) {
        "All robots down! Find the boss!".to_string()
    } else {
        String::new()
    };
    if !status.is_empty() {
        out.queue(cursor::MoveTo(
            cols.saturating_sub(status.chars().count() as u16 + 1),
            0,
        ))?;
        out.queue(style::SetForegroundColor(Color::White))?;
        out.queue(Print(&status))?;
    }

    // Active buffs with remaining seconds
    let p = &world.player.powerups;
    let buffs: Vec<String> = [
        (BuffKind::SuperJump, p.super_jump),
        (BuffKind::SuperStrength, p.super_strength),
        (BuffKind::Invincibility, p.invincibility),
    ]
    .iter()
    .filter(|(_, t)| *t > 0)
    .map(|(kind, t)| format!("{} {}s", kind.label(), t / 60 + 1))
    .collect();
    if !buffs.is_empty() {
        out.queue(cursor::MoveTo(1, 1))?;
        out.queue(style::SetForegroundColor(Color::Cyan))?;
        out.queue(Print(buffs.join("   ")))?;
    }

    Ok(())
}

// ── World drawing ─────────────────────────────────────────────────────────────

fn draw_platforms<W: Write>(out: &mut W, world: &World, view: &View) -> std::io::Result<()> {
    out.queue(style::SetForegroundColor(C_PLATFORM))?;
    for platform in &world.platforms {
        // Walk the platform span in screen cells
        let step = SCREEN_WIDTH / view.cols as f32;
        let mut wx = platform.x;
        while wx < platform.x + platform.w {
            if let Some((col, row)) = view.cell(wx, platform.y) {
                out.queue(cursor::MoveTo(col, row))?;
                out.queue(Print("▀"))?;
            }
            wx += step;
        }
    }
    Ok(())
}

fn draw_pickups<W: Write>(out: &mut W, world: &World, view: &View) -> std::io::Result<()> {
    out.queue(style::SetForegroundColor(C_DIAMOND))?;
    for diamond in world.diamonds.iter().filter(|d| !d.collected) {
        if let Some((col, row)) = view.cell(diamond.x, diamond.y) {
            out.queue(cursor::MoveTo(col, row))?;
            out.queue(Print("◆"))?;
        }
    }
    for sd in world.super_diamonds.iter().filter(|d| !d.collected) {
        let color = match sd.kind {
            BuffKind::SuperJump => Color::Blue,
            BuffKind::SuperStrength => Color::Red,
            BuffKind::Invincibility => Color::Yellow,
        };
        if let Some((col, row)) = view.cell(sd.x, sd.y) {
            out.queue(style::SetForegroundColor(color))?;
            out.queue(cursor::MoveTo(col, row))?;
            out.queue(Print("◈"))?;
        }
    }
    Ok(())
}

fn draw_robots<W: Write>(out: &mut W, robots: &[Robot], view: &View) -> std::io::Result<()> {
    for robot in robots.iter().filter(|r| !r.defeated) {
        let (symbol, color) = match robot.kind {
            RobotKind::Normal => ("R", C_ROBOT),
            RobotKind::Tough => ("T", C_ROBOT_TOUGH),
        };
        if let Some((col, row)) = view.cell(robot.body.x, robot.body.y) {
            out.queue(style::SetForegroundColor(color))?;
            out.queue(cursor::MoveTo(col, row))?;
            out.queue(Print(symbol))?;
        }
    }
    Ok(())
}

fn draw_boss<W: Write>(out: &mut W, world: &World, view: &View) -> std::io::Result<()> {
    let Some(boss) = world.boss.as_ref().filter(|b| !b.defeated) else {
        return Ok(());
    };
    if let Some((col, row)) = view.cell(boss.body.x, boss.body.y) {
        out.queue(style::SetForegroundColor(C_BOSS))?;
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(Print("▣▣"))?;
        // Health readout above
        if row > FIELD_TOP {
            out.queue(cursor::MoveTo(col, row - 1))?;
            out.queue(Print(format!("{}", boss.health.max(0))))?;
        }
    }
    Ok(())
}

fn draw_player<W: Write>(out: &mut W, world: &World, view: &View) -> std::io::Result<()> {
    let player = &world.player;

    // Flicker while invulnerable
    if player.invulnerable > 0 && (player.invulnerable / 5) % 2 == 1 {
        return Ok(());
    }

    if let Some((col, row)) = view.cell(player.body.x, player.body.y) {
        out.queue(style::SetForegroundColor(C_PLAYER))?;
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(Print("@"))?;

        // Attack flash in the facing direction
        if player.attacking() {
            let (symbol, offset): (&str, i32) = if player.facing_right {
                (")", 1)
            } else {
                ("(", -1)
            };
            let flash_col = col as i32 + offset;
            if flash_col >= 0 && (flash_col as u16) < view.cols {
                out.queue(style::SetForegroundColor(Color::Yellow))?;
                out.queue(cursor::MoveTo(flash_col as u16, row))?;
                out.queue(Print(symbol))?;
            }
        }
    }
    Ok(())
}

fn particle_color(color: ParticleColor) -> Color {
    match color {
        ParticleColor::Orange => Color::DarkYellow,
        ParticleColor::Red => Color::Red,
        ParticleColor::Cyan => Color::Cyan,
        ParticleColor::Yellow => Color::Yellow,
        ParticleColor::White => Color::White,
    }
}

fn draw_effects<W: Write>(out: &mut W, world: &World, view: &View) -> std::io::Result<()> {
    for effect in &world.effects {
        match effect {
            Effect::Burst { x, y, particles, .. } => {
                for p in particles {
                    if let Some((col, row)) = view.cell(x + p.x, y + p.y) {
                        out.queue(style::SetForegroundColor(particle_color(p.color)))?;
                        out.queue(cursor::MoveTo(col, row))?;
                        out.queue(Print("•"))?;
                    }
                }
            }
            Effect::Banner { text, .. } => {
                let col = (view.cols / 2).saturating_sub(text.chars().count() as u16 / 2);
                let row = view.rows / 3;
                out.queue(style::SetForegroundColor(C_BANNER))?;
                out.queue(cursor::MoveTo(col, row))?;
                out.queue(Print(text))?;
            }
        }
    }
    Ok(())
}

// ── Mode overlays ─────────────────────────────────────────────────────────────

fn draw_overlay<W: Write>(out: &mut W, session: &Session, view: &View) -> std::io::Result<()> {
    let lines: &[&str] = match session.mode {
        Mode::Running | Mode::LevelTransition => return Ok(()),
        Mode::Paused => &["⏸  PAUSED", "ESC to resume"],
        Mode::Win => &[
            "★  VICTORY!  ★",
            "All 5 levels of Diamond Quest complete!",
            "S: submit score   R: play again   Q: quit",
        ],
        Mode::GameOver => &[
            "💀  GAME OVER",
            "S: submit score   R: try again   Q: quit",
        ],
    };

    let cy = view.rows / 2;
    for (i, line) in lines.iter().enumerate() {
        let col = (view.cols / 2).saturating_sub(line.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, cy.saturating_sub(1) + i as u16))?;
        out.queue(style::SetForegroundColor(if i == 0 {
            Color::Red
        } else {
            Color::White
        }))?;
        out.queue(Print(line))?;
    }
    Ok(())
}

fn draw_hint<W: Write>(out: &mut W, rows: u16) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, rows.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print(
        "←→/AD: Move  ↑/W/Space: Jump  X: Punch  Z: Kick  ESC: Pause  F5: Save  Q: Quit",
    ))?;
    Ok(())
}
