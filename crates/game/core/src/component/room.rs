use std::collections::BTreeMap;

use crate::error::{GeometryError, OccupancyError};
use crate::point::{Bounds, Point};
use crate::tile::Tile;

use super::ComponentId;

/// A fixed-origin rectangular block of tiles with a door registry.
///
/// The tile block is supplied fully formed at construction and is
/// shape-immutable afterwards; only tile contents change. Doors are
/// boundary positions registered to exactly one hall each.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Room {
    origin: Point,
    width: u32,
    height: u32,
    tiles: Vec<Tile>,
    doors: BTreeMap<Point, ComponentId>,
}

impl Room {
    /// Builds a room from a row-major tile block anchored at `origin`.
    pub fn new(
        origin: Point,
        width: u32,
        height: u32,
        tiles: Vec<Tile>,
    ) -> Result<Self, GeometryError> {
        if width == 0 || height == 0 {
            return Err(GeometryError::DegenerateRoom { width, height });
        }
        let expected = width as usize * height as usize;
        if tiles.len() != expected {
            return Err(GeometryError::TileCountMismatch {
                expected,
                actual: tiles.len(),
            });
        }
        Ok(Self {
            origin,
            width,
            height,
            tiles,
            doors: BTreeMap::new(),
        })
    }

    /// Convenience constructor: a room whose every tile is an empty space.
    pub fn open(origin: Point, width: u32, height: u32) -> Result<Self, GeometryError> {
        let count = width as usize * height as usize;
        Self::new(origin, width, height, vec![Tile::space(); count])
    }

    pub fn origin(&self) -> Point {
        self.origin
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::anchored(self.origin, self.width, self.height)
    }

    /// True iff `p` lies within the room rectangle, inclusive of its
    /// boundary.
    pub fn contains(&self, p: Point) -> bool {
        self.bounds().contains(p)
    }

    /// True iff `p` lies on one of the rectangle's four boundary lines,
    /// corners included.
    pub fn on_boundary(&self, p: Point) -> bool {
        let bounds = self.bounds();
        bounds.contains(p)
            && (p.x == bounds.min().x
                || p.x == bounds.max().x
                || p.y == bounds.min().y
                || p.y == bounds.max().y)
    }

    /// Translates an absolute position into the row-major tile index.
    fn index_of(&self, p: Point) -> Result<usize, GeometryError> {
        if !self.contains(p) {
            return Err(GeometryError::OutOfBounds { point: p });
        }
        let dx = (p.x - self.origin.x) as usize;
        let dy = (p.y - self.origin.y) as usize;
        Ok(dy * self.width as usize + dx)
    }

    pub fn tile(&self, p: Point) -> Result<&Tile, GeometryError> {
        let index = self.index_of(p)?;
        Ok(&self.tiles[index])
    }

    pub fn tile_mut(&mut self, p: Point) -> Result<&mut Tile, GeometryError> {
        let index = self.index_of(p)?;
        Ok(&mut self.tiles[index])
    }

    /// Registers a door for `hall`. The door must sit exactly on the room
    /// boundary, and a door belongs to one hall only.
    pub fn connect_hall(&mut self, door: Point, hall: ComponentId) -> Result<(), GeometryError> {
        if !self.on_boundary(door) {
            return Err(GeometryError::DoorOffBoundary { door });
        }
        if self.doors.contains_key(&door) {
            return Err(GeometryError::DoorInUse { door });
        }
        self.doors.insert(door, hall);
        Ok(())
    }

    pub fn doors(&self) -> impl Iterator<Item = (Point, ComponentId)> + '_ {
        self.doors.iter().map(|(&door, &hall)| (door, hall))
    }

    /// The absolute position of the row-major tile index.
    fn point_of(&self, index: usize) -> Point {
        Point::new(
            self.origin.x + (index % self.width as usize) as i32,
            self.origin.y + (index / self.width as usize) as i32,
        )
    }

    /// Linear scan for the named actor.
    pub fn find_actor(&self, name: &str) -> Result<Point, OccupancyError> {
        for (index, tile) in self.tiles.iter().enumerate() {
            if let Tile::Space {
                actor: Some(actor), ..
            } = tile
                && actor.name() == name
            {
                return Ok(self.point_of(index));
            }
        }
        Err(OccupancyError::ActorNotFound {
            name: name.to_owned(),
        })
    }

    /// First unoccupied space in row-major scan order; a resting item does
    /// not make a tile occupied.
    pub fn first_free_space(&self) -> Option<Point> {
        self.tiles
            .iter()
            .position(|tile| matches!(tile, Tile::Space { actor: None, .. }))
            .map(|index| self.point_of(index))
    }
}
