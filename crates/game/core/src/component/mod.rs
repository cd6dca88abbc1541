//! Geometric composition units.
//!
//! A level is stitched together from rooms and halls. Components live in an
//! arena owned by the level and reference each other by [`ComponentId`]
//! instead of holding direct back-references, so the room↔hall graph stays
//! cycle-free under single ownership.

mod hall;
mod room;

pub use hall::Hall;
pub use room::Room;

use std::fmt;

use crate::actor::Actor;
use crate::entity::EntityType;
use crate::error::{GeometryError, OccupancyError};
use crate::item::Item;
use crate::point::{Bounds, Point};
use crate::tile::Tile;

/// Stable handle into the level's component arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ComponentId(pub(crate) usize);

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Error raised by content operations addressed through a component, which
/// can fail on either the addressing (geometry) or the tile (occupancy).
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ComponentError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Occupancy(#[from] OccupancyError),
}

/// A room or a hall; the unit of geometric composition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LevelComponent {
    Room(Room),
    Hall(Hall),
}

impl LevelComponent {
    pub fn as_room(&self) -> Option<&Room> {
        match self {
            LevelComponent::Room(room) => Some(room),
            LevelComponent::Hall(_) => None,
        }
    }

    pub fn as_room_mut(&mut self) -> Option<&mut Room> {
        match self {
            LevelComponent::Room(room) => Some(room),
            LevelComponent::Hall(_) => None,
        }
    }

    pub fn as_hall(&self) -> Option<&Hall> {
        match self {
            LevelComponent::Room(_) => None,
            LevelComponent::Hall(hall) => Some(hall),
        }
    }

    /// True iff the component's footprint covers `p`.
    pub fn contains(&self, p: Point) -> bool {
        match self {
            LevelComponent::Room(room) => room.contains(p),
            LevelComponent::Hall(hall) => hall.contains(p),
        }
    }

    pub fn tile(&self, p: Point) -> Result<&Tile, GeometryError> {
        match self {
            LevelComponent::Room(room) => room.tile(p),
            LevelComponent::Hall(hall) => hall.tile(p),
        }
    }

    pub fn tile_mut(&mut self, p: Point) -> Result<&mut Tile, GeometryError> {
        match self {
            LevelComponent::Room(room) => room.tile_mut(p),
            LevelComponent::Hall(hall) => hall.tile_mut(p),
        }
    }

    /// The tag at `p` in this component's context: halls re-tag bare floor
    /// as [`EntityType::HallSpace`].
    pub fn entity_type_at(&self, p: Point) -> Result<EntityType, GeometryError> {
        match self {
            LevelComponent::Room(room) => room.tile(p).map(Tile::entity_type),
            LevelComponent::Hall(hall) => hall.entity_type_at(p),
        }
    }

    pub fn place_actor(&mut self, p: Point, actor: Actor) -> Result<(), ComponentError> {
        self.tile_mut(p)?.place_actor(actor)?;
        Ok(())
    }

    pub fn remove_actor(&mut self, p: Point) -> Result<Actor, ComponentError> {
        Ok(self.tile_mut(p)?.remove_actor()?)
    }

    pub fn place_item(&mut self, p: Point, item: Item) -> Result<(), ComponentError> {
        self.tile_mut(p)?.place_item(item)?;
        Ok(())
    }

    pub fn remove_item(&mut self, p: Point) -> Result<Item, ComponentError> {
        Ok(self.tile_mut(p)?.remove_item()?)
    }

    /// Linear scan for the named actor's position.
    pub fn find_actor(&self, name: &str) -> Result<Point, OccupancyError> {
        match self {
            LevelComponent::Room(room) => room.find_actor(name),
            LevelComponent::Hall(hall) => hall.find_actor(name),
        }
    }

    /// Rectangle used for level-wide bounding-box computation; never for
    /// addressing.
    pub fn bounds(&self) -> Bounds {
        match self {
            LevelComponent::Room(room) => room.bounds(),
            LevelComponent::Hall(hall) => hall.bounds(),
        }
    }
}

impl From<Room> for LevelComponent {
    fn from(room: Room) -> Self {
        LevelComponent::Room(room)
    }
}

impl From<Hall> for LevelComponent {
    fn from(hall: Hall) -> Self {
        LevelComponent::Hall(hall)
    }
}
