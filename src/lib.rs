//! Diamond Quest, a side-scrolling platform-fighter simulation core.
//!
//! The library holds the whole game simulation: entity data, physics,
//! combat, power-ups, level generation, the per-frame tick, and snapshot
//! persistence.  It performs no I/O; the binary target wires it to a
//! terminal frontend that samples input, renders frames, forwards audio
//! cues and persists snapshots.

pub mod combat;
pub mod compute;
pub mod effects;
pub mod entities;
pub mod level;
pub mod persist;
pub mod physics;
pub mod powerups;
