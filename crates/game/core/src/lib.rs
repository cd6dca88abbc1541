//! Deterministic dungeon-crawl rules engine shared across drivers.
//!
//! `warren-core` owns the canonical rules: tile occupancy, room/hall
//! geometry, per-actor move policies, and the level state machine. It is
//! synchronous and single-writer by design — one external scheduler applies
//! one move at a time — and performs no I/O. Content loading, adversary
//! decision-making, rendering, and multi-level sequencing live in the crates
//! built on top of the types re-exported here.
pub mod actor;
pub mod component;
pub mod config;
pub mod entity;
pub mod error;
pub mod item;
pub mod level;
pub mod point;
pub mod rules;
pub mod tile;

pub use actor::{Actor, AdversaryKind, PlayerProgress};
pub use component::{ComponentError, ComponentId, Hall, LevelComponent, Room};
pub use config::GameConfig;
pub use entity::EntityType;
pub use error::{GeometryError, OccupancyError};
pub use item::{Item, ItemKind};
pub use level::{Level, LevelBuilder, LevelError, LevelStatus};
pub use point::{Bounds, Point};
pub use rules::{InteractionResult, TagGrid, check_move, interaction_on, max_stride, path_exists};
pub use tile::Tile;
