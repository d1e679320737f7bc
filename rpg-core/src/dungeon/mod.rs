//! Procedural dungeon levels.
//!
//! A level is a square grid of [`DungeonRoom`]s indexed `rooms[y][x]`. The
//! [`DungeonGenerator`] carves tunnels, frames them with walls and places the
//! special rooms; [`find_path`] moves through the result; [`DungeonLevel`]
//! tracks a hero walking around in it.

mod generator;
mod level;
mod path;

pub use generator::DungeonGenerator;
pub use level::{DungeonLevel, MapError, Travel};
pub use path::find_path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from level generation. All of them mean the configuration can't
/// produce a valid level.
#[derive(Debug, Error)]
pub enum DungeonError {
    #[error("invalid dungeon config: {0}")]
    InvalidConfig(String),

    #[error("gave up after {attempts} attempts")]
    AttemptsExhausted { attempts: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoomType {
    None,
    Wall,
    Empty,
    Entrance,
    Exit,
    Battle,
    Boss,
    Shop,
    Rest,
    Treasure,
}

impl RoomType {
    /// Whether the cell is part of the walkable layout at all.
    pub fn is_open(&self) -> bool {
        !matches!(self, RoomType::None | RoomType::Wall)
    }

    /// Rooms that stop the hero until they are cleared.
    pub fn blocks(&self) -> bool {
        matches!(
            self,
            RoomType::None | RoomType::Wall | RoomType::Battle | RoomType::Boss
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoomState {
    Idle,
    Blocking,
    Complete,
}

/// A cell position on a given level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Location {
    pub level: u32,
    pub x: usize,
    pub y: usize,
}

impl Location {
    pub fn new(level: u32, x: usize, y: usize) -> Self {
        Self { level, x, y }
    }

    pub fn distance(&self, other: &Location) -> usize {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DungeonRoom {
    pub location: Location,
    pub room_type: RoomType,
    pub room_state: RoomState,
}

impl DungeonRoom {
    /// Whether the hero may walk through this room.
    pub fn is_passable(&self) -> bool {
        match self.room_type {
            RoomType::None | RoomType::Wall => false,
            _ => self.room_state != RoomState::Blocking,
        }
    }
}

/// A generated level, indexed `rooms[y][x]`.
pub type Grid = Vec<Vec<DungeonRoom>>;

/// Look up a room, or `None` if the location is off the grid.
pub fn room_at(grid: &Grid, location: Location) -> Option<&DungeonRoom> {
    grid.get(location.y).and_then(|row| row.get(location.x))
}

/// Level generation settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DungeonConfig {
    /// Width and height of the grid.
    pub size: usize,
    /// Cells kept clear of tunnels along every edge.
    pub padding: usize,
    /// Number of tunnel runs to carve.
    pub tunnels: usize,
    pub max_tunnel_length: usize,
    pub rest_rooms: usize,
    pub treasure_rooms: usize,
    pub battle_rooms: usize,
}

impl Default for DungeonConfig {
    fn default() -> Self {
        Self {
            size: 20,
            padding: 1,
            tunnels: 40,
            max_tunnel_length: 6,
            rest_rooms: 2,
            treasure_rooms: 2,
            battle_rooms: 6,
        }
    }
}

impl DungeonConfig {
    pub fn with_size(mut self, size: usize) -> Self {
        self.size = size;
        self
    }

    pub fn with_padding(mut self, padding: usize) -> Self {
        self.padding = padding;
        self
    }

    pub fn with_tunnels(mut self, tunnels: usize, max_length: usize) -> Self {
        self.tunnels = tunnels;
        self.max_tunnel_length = max_length;
        self
    }

    pub fn with_rooms(mut self, rest: usize, treasure: usize, battle: usize) -> Self {
        self.rest_rooms = rest;
        self.treasure_rooms = treasure;
        self.battle_rooms = battle;
        self
    }

    fn validate(&self) -> Result<(), DungeonError> {
        // The carving area needs at least a 2x2 interior to turn in.
        if self.size < 2 * self.padding + 2 {
            return Err(DungeonError::InvalidConfig(format!(
                "size {} is too small for padding {}",
                self.size, self.padding
            )));
        }
        if self.tunnels == 0 || self.max_tunnel_length == 0 {
            return Err(DungeonError::InvalidConfig(
                "at least one tunnel of length 1 is required".to_string(),
            ));
        }
        Ok(())
    }
}
