//! Level description loader.
//!
//! Loads a complete level layout from a RON file: rooms as glyph-row tile
//! blocks ('X' wall, '.' space), halls as door-to-door connections with
//! waypoints, and item placements. Actor rosters are not part of a level
//! description; drivers place actors after loading.

use std::path::Path;

use serde::{Deserialize, Serialize};
use warren_core::{ComponentId, Item, ItemKind, Level, Point, Room, Tile};

use crate::loaders::{LoadResult, read_file};

/// Level description structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct LevelDataRon {
    rooms: Vec<RoomData>,
    #[serde(default)]
    halls: Vec<HallData>,
    #[serde(default)]
    items: Vec<ItemData>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct RoomData {
    origin: (i32, i32),
    /// Row-major glyph rows, all of equal width: 'X' wall, '.' space.
    layout: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct HallData {
    from: DoorData,
    to: DoorData,
    #[serde(default)]
    waypoints: Vec<(i32, i32)>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct DoorData {
    /// Index into the `rooms` list.
    room: usize,
    door: (i32, i32),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ItemData {
    kind: ItemKind,
    position: (i32, i32),
}

/// Loader for level descriptions from RON files.
pub struct LevelLoader;

impl LevelLoader {
    /// Load a level from a RON description file.
    pub fn load(path: &Path) -> LoadResult<Level> {
        let content = read_file(path)?;
        Self::from_str(&content)
    }

    /// Parse a level from RON text.
    pub fn from_str(content: &str) -> LoadResult<Level> {
        let data: LevelDataRon = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse level RON: {}", e))?;

        let mut builder = Level::builder();

        let mut room_ids: Vec<ComponentId> = Vec::with_capacity(data.rooms.len());
        for (index, room) in data.rooms.iter().enumerate() {
            let built = build_room(room)
                .map_err(|e| anyhow::anyhow!("Invalid room {}: {}", index, e))?;
            room_ids.push(builder.add_room(built));
        }

        for (index, hall) in data.halls.iter().enumerate() {
            let start_room = resolve_room(&room_ids, hall.from.room, index)?;
            let end_room = resolve_room(&room_ids, hall.to.room, index)?;
            let waypoints = hall.waypoints.iter().map(|&(x, y)| Point::new(x, y)).collect();
            builder
                .connect(
                    point(hall.from.door),
                    start_room,
                    point(hall.to.door),
                    end_room,
                    waypoints,
                )
                .map_err(|e| anyhow::anyhow!("Invalid hall {}: {}", index, e))?;
        }

        for item in &data.items {
            let at = point(item.position);
            builder.add_item(match item.kind {
                ItemKind::Key => Item::key(at),
                ItemKind::Exit => Item::exit(at),
            });
        }

        builder
            .build()
            .map_err(|e| anyhow::anyhow!("Level assembly failed: {}", e))
    }
}

fn point((x, y): (i32, i32)) -> Point {
    Point::new(x, y)
}

fn resolve_room(ids: &[ComponentId], index: usize, hall: usize) -> LoadResult<ComponentId> {
    ids.get(index)
        .copied()
        .ok_or_else(|| anyhow::anyhow!("Hall {} references unknown room {}", hall, index))
}

fn build_room(data: &RoomData) -> LoadResult<Room> {
    let height = data.layout.len();
    let width = data
        .layout
        .first()
        .map(|row| row.chars().count())
        .unwrap_or(0);

    let mut tiles = Vec::with_capacity(width * height);
    for (y, row) in data.layout.iter().enumerate() {
        if row.chars().count() != width {
            return Err(anyhow::anyhow!(
                "Layout row {} is {} glyphs wide, expected {}",
                y,
                row.chars().count(),
                width
            ));
        }
        for (x, glyph) in row.chars().enumerate() {
            tiles.push(match glyph {
                'X' => Tile::wall(),
                '.' => Tile::space(),
                other => {
                    return Err(anyhow::anyhow!(
                        "Unknown glyph {:?} at ({}, {})",
                        other,
                        x,
                        y
                    ));
                }
            });
        }
    }

    Ok(Room::new(
        point(data.origin),
        width as u32,
        height as u32,
        tiles,
    )?)
}
