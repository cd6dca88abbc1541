use crate::entity::EntityType;
use crate::error::{GeometryError, OccupancyError};
use crate::point::{Bounds, Point};
use crate::tile::Tile;

use super::ComponentId;

/// Door endpoints of a connected hall. Set exactly once; reconnection is an
/// error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct HallEnds {
    start_door: Point,
    start_room: ComponentId,
    end_door: Point,
    end_room: ComponentId,
}

/// An ordered chain of spaces joining two room doors, optionally bent
/// through waypoints.
///
/// The chain holds the cells strictly between the doors; the doors
/// themselves belong to their rooms. There is no stored coordinate for any
/// cell — positions are recovered by walking the door/waypoint path one
/// orthogonal step at a time, each step consuming one sequence index.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Hall {
    tiles: Vec<Tile>,
    waypoints: Vec<Point>,
    ends: Option<HallEnds>,
}

impl Hall {
    /// Bootstrap form: a prebuilt tile sequence that is not yet connected
    /// to rooms. Every positional query fails until [`Hall::connect`] runs.
    pub fn from_tiles(tiles: Vec<Tile>, waypoints: Vec<Point>) -> Self {
        Self {
            tiles,
            waypoints,
            ends: None,
        }
    }

    /// Synthesizing form: connects two doors through the waypoints and
    /// fills the implied path with empty spaces.
    pub fn between(
        start_door: Point,
        start_room: ComponentId,
        end_door: Point,
        end_room: ComponentId,
        waypoints: Vec<Point>,
    ) -> Result<Self, GeometryError> {
        let length = path_length(start_door, &waypoints, end_door)?;
        let mut hall = Self::from_tiles(vec![Tile::space(); length - 1], waypoints);
        hall.ends = Some(HallEnds {
            start_door,
            start_room,
            end_door,
            end_room,
        });
        Ok(hall)
    }

    /// Connects a bootstrap hall to its rooms. Each straight segment must
    /// be axis-aligned and the tile sequence must match the implied path
    /// length; connecting twice is an error.
    pub fn connect(
        &mut self,
        start_door: Point,
        start_room: ComponentId,
        end_door: Point,
        end_room: ComponentId,
    ) -> Result<(), GeometryError> {
        if self.ends.is_some() {
            return Err(GeometryError::AlreadyConnected);
        }
        let length = path_length(start_door, &self.waypoints, end_door)?;
        if self.tiles.len() != length - 1 {
            return Err(GeometryError::PathLengthMismatch {
                expected: length - 1,
                actual: self.tiles.len(),
            });
        }
        self.ends = Some(HallEnds {
            start_door,
            start_room,
            end_door,
            end_room,
        });
        Ok(())
    }

    fn ends(&self) -> Result<&HallEnds, GeometryError> {
        self.ends.as_ref().ok_or(GeometryError::Unconnected)
    }

    pub fn start_door(&self) -> Result<Point, GeometryError> {
        Ok(self.ends()?.start_door)
    }

    pub fn end_door(&self) -> Result<Point, GeometryError> {
        Ok(self.ends()?.end_door)
    }

    pub fn start_room(&self) -> Result<ComponentId, GeometryError> {
        Ok(self.ends()?.start_room)
    }

    pub fn end_room(&self) -> Result<ComponentId, GeometryError> {
        Ok(self.ends()?.end_room)
    }

    pub fn waypoints(&self) -> &[Point] {
        &self.waypoints
    }

    /// Number of cells in the chain.
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Positions of the chain's cells in index order, recovered by the
    /// simulated walk from the start door toward each waypoint in turn.
    fn path(&self) -> Vec<Point> {
        let Some(ends) = &self.ends else {
            return Vec::new();
        };
        let mut points = Vec::with_capacity(self.tiles.len());
        let mut cursor = ends.start_door;
        for anchor in self.waypoints.iter().copied().chain([ends.end_door]) {
            while cursor != anchor {
                cursor = cursor.step_toward(anchor);
                if cursor != ends.end_door {
                    points.push(cursor);
                }
            }
        }
        points
    }

    pub fn contains(&self, p: Point) -> bool {
        self.path().contains(&p)
    }

    fn index_of(&self, p: Point) -> Result<usize, GeometryError> {
        self.path()
            .iter()
            .position(|&cell| cell == p)
            .ok_or(GeometryError::OutOfBounds { point: p })
    }

    pub fn tile(&self, p: Point) -> Result<&Tile, GeometryError> {
        let index = self.index_of(p)?;
        Ok(&self.tiles[index])
    }

    pub fn tile_mut(&mut self, p: Point) -> Result<&mut Tile, GeometryError> {
        let index = self.index_of(p)?;
        Ok(&mut self.tiles[index])
    }

    /// The tag at `p`: identical to the tile's own tag except that bare
    /// floor reads [`EntityType::HallSpace`], distinguishing corridor cells
    /// from room cells without a third tile variant.
    pub fn entity_type_at(&self, p: Point) -> Result<EntityType, GeometryError> {
        let tag = self.tile(p)?.entity_type();
        Ok(match tag {
            EntityType::Space => EntityType::HallSpace,
            other => other,
        })
    }

    /// Linear scan along the chain for the named actor.
    pub fn find_actor(&self, name: &str) -> Result<Point, OccupancyError> {
        for (index, p) in self.path().into_iter().enumerate() {
            if let Tile::Space {
                actor: Some(actor), ..
            } = &self.tiles[index]
                && actor.name() == name
            {
                return Ok(p);
            }
        }
        Err(OccupancyError::ActorNotFound {
            name: name.to_owned(),
        })
    }

    /// Min/max rectangle over doors and waypoints. Only used for level-wide
    /// bounding-box computation, never for addressing.
    pub fn bounds(&self) -> Bounds {
        let mut anchors = Vec::with_capacity(self.waypoints.len() + 2);
        if let Some(ends) = &self.ends {
            anchors.push(ends.start_door);
            anchors.push(ends.end_door);
        }
        anchors.extend_from_slice(&self.waypoints);

        let mut anchors = anchors.into_iter();
        let first = anchors.next().unwrap_or(Point::ORIGIN);
        anchors.fold(Bounds::spanning(first, first), Bounds::including)
    }
}

/// Total orthogonal path length from door to door through the waypoints.
/// Every straight segment must be axis-aligned.
fn path_length(
    start_door: Point,
    waypoints: &[Point],
    end_door: Point,
) -> Result<usize, GeometryError> {
    let mut length = 0usize;
    let mut cursor = start_door;
    for anchor in waypoints.iter().copied().chain([end_door]) {
        if !cursor.orthogonal_to(anchor) {
            return Err(GeometryError::MisalignedSegment {
                from: cursor,
                to: anchor,
            });
        }
        length += cursor.manhattan_distance(anchor) as usize;
        cursor = anchor;
    }
    Ok(length)
}
