//! Snapshot persistence and the leaderboard.
//!
//! The simulation never calls into this module; the frontend captures a
//! [`Snapshot`] and hands it to a [`Persistence`] implementation on level
//! transitions and explicit saves.  Failures are surfaced to the UI layer
//! and never reach the tick loop.
//!
//! Entities are soft-deleted (defeated/collected flags), never removed, so
//! the index-based `robots_defeated` / `diamonds_collected` lists stay
//! valid across save and load.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::entities::{Mode, Session, World};

// ── Snapshot ─────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub level: u32,
    pub diamonds: i32,
    pub lives: u32,
    pub score: u32,
    pub player_x: f32,
    pub player_y: f32,
    pub robots_defeated: Vec<usize>,
    pub diamonds_collected: Vec<usize>,
    pub boss_defeated: bool,
    pub level_completed: bool,
}

impl Snapshot {
    /// Capture the persistable state of a running game.
    pub fn capture(world: &World, session: &Session) -> Self {
        Self {
            level: session.level,
            diamonds: session.diamonds,
            lives: session.lives,
            score: session.score,
            player_x: world.player.body.x,
            player_y: world.player.body.y,
            robots_defeated: world
                .robots
                .iter()
                .enumerate()
                .filter(|(_, r)| r.defeated)
                .map(|(i, _)| i)
                .collect(),
            diamonds_collected: world
                .diamonds
                .iter()
                .enumerate()
                .filter(|(_, d)| d.collected)
                .map(|(i, _)| i)
                .collect(),
            boss_defeated: world.boss.as_ref().map_or(false, |b| b.defeated),
            level_completed: session.mode == Mode::LevelTransition,
        }
    }

    /// Restore this snapshot onto a world freshly generated for its level.
    pub fn apply(&self, world: &mut World, session: &mut Session) {
        session.level = self.level;
        session.diamonds = self.diamonds;
        session.lives = self.lives;
        session.score = self.score;
        session.mode = Mode::Running;
        session.transition_timer = 0;

        world.player.body.x = self.player_x;
        world.player.body.y = self.player_y;
        for &i in &self.robots_defeated {
            if let Some(robot) = world.robots.get_mut(i) {
                robot.defeated = true;
            }
        }
        for &i in &self.diamonds_collected {
            if let Some(diamond) = world.diamonds.get_mut(i) {
                diamond.collected = true;
            }
        }
        if self.boss_defeated {
            if let Some(boss) = world.boss.as_mut() {
                boss.defeated = true;
            }
        }
        world.camera_x = crate::compute::camera_for(world.player.body.x);
    }
}

// ── Persistence service ──────────────────────────────────────────────────────

/// The remote persistence contract: save a snapshot, load the last one,
/// submit a score and learn its rank.  All calls are fallible and must be
/// treated as fire-and-forget by callers on the frame path.
pub trait Persistence {
    fn save(&mut self, snapshot: &Snapshot) -> Result<()>;
    fn load(&mut self) -> Result<Option<Snapshot>>;
    fn submit_score(&mut self, name: &str, score: u32, level: u32) -> Result<u32>;
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub name: String,
    pub score: u32,
    pub level: u32,
}

/// JSON files under a directory, `~/.diamond_quest` by default.
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new() -> Self {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
        Self::at(PathBuf::from(home).join(".diamond_quest"))
    }

    pub fn at(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    fn save_path(&self) -> PathBuf {
        self.dir.join("save.json")
    }

    fn scores_path(&self) -> PathBuf {
        self.dir.join("scores.json")
    }

    fn read_scores(&self) -> Vec<ScoreEntry> {
        fs::read_to_string(self.scores_path())
            .ok()
            .and_then(|s| serde_json::from_str(&s).ok())
            .unwrap_or_default()
    }
}

impl Default for FileStore {
    fn default() -> Self {
        Self::new()
    }
}

impl Persistence for FileStore {
    fn save(&mut self, snapshot: &Snapshot) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("creating {}", self.dir.display()))?;
        let json = serde_json::to_string_pretty(snapshot)?;
        fs::write(self.save_path(), json)
            .with_context(|| format!("writing {}", self.save_path().display()))?;
        Ok(())
    }

    fn load(&mut self) -> Result<Option<Snapshot>> {
        let path = self.save_path();
        if !path.exists() {
            return Ok(None);
        }
        let json = fs::read_to_string(&path)
            .with_context(|| format!("reading {}", path.display()))?;
        let snapshot = serde_json::from_str(&json)
            .with_context(|| format!("parsing {}", path.display()))?;
        Ok(Some(snapshot))
    }

    fn submit_score(&mut self, name: &str, score: u32, level: u32) -> Result<u32> {
        let mut scores = self.read_scores();
        scores.push(ScoreEntry {
            name: name.to_string(),
            score,
            level,
        });
        scores.sort_by(|a, b| b.score.cmp(&a.score));

        fs::create_dir_all(&self.dir)
            .with_context(|| format!("creating {}", self.dir.display()))?;
        let json = serde_json::to_string_pretty(&scores)?;
        fs::write(self.scores_path(), json)
            .with_context(|| format!("writing {}", self.scores_path().display()))?;

        let rank = scores
            .iter()
            .position(|e| e.score == score && e.name == name)
            .map_or(scores.len(), |i| i + 1);
        Ok(rank as u32)
    }
}
