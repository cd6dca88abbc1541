use strum::Display;

use crate::entity::EntityType;
use crate::point::Point;

/// The two item kinds a level can contain.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ItemKind {
    Key,
    Exit,
}

/// An item pinned to its spawn position.
///
/// A well-formed level has exactly one exit, and either exactly one key or
/// no key with the exit already unlocked. The position is fixed at
/// construction; picking a key up removes the item rather than moving it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Item {
    kind: ItemKind,
    position: Point,
}

impl Item {
    pub fn key(position: Point) -> Self {
        Self {
            kind: ItemKind::Key,
            position,
        }
    }

    pub fn exit(position: Point) -> Self {
        Self {
            kind: ItemKind::Exit,
            position,
        }
    }

    pub fn kind(&self) -> ItemKind {
        self.kind
    }

    pub fn position(&self) -> Point {
        self.position
    }

    /// The tag this item projects onto an otherwise empty tile.
    pub fn entity_type(&self) -> EntityType {
        match self.kind {
            ItemKind::Key => EntityType::Key,
            ItemKind::Exit => EntityType::Exit,
        }
    }
}
