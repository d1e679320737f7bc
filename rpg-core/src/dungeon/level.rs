use super::{
    find_path, DungeonConfig, DungeonError, DungeonGenerator, DungeonRoom, Grid, Location,
    RoomState, RoomType,
};
use crate::dice::Dice;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MapError {
    #[error("level has no entrance")]
    NoEntrance,

    #[error("({x}, {y}) is outside the level")]
    OutOfBounds { x: usize, y: usize },

    #[error("no path to ({x}, {y})")]
    NoPath { x: usize, y: usize },

    #[error("room at ({x}, {y}) must be cleared before moving on")]
    Blocked { x: usize, y: usize },

    #[error("treasure at ({x}, {y}) was already taken")]
    TreasureTaken { x: usize, y: usize },

    #[error("no treasure at ({x}, {y})")]
    NotATreasure { x: usize, y: usize },

    #[error(transparent)]
    Generation(#[from] DungeonError),
}

/// The result of a successful move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Travel {
    /// Every room entered, ending at the destination.
    pub steps: Vec<Location>,
    /// The destination as it was on arrival.
    pub room: DungeonRoom,
    /// Set when the destination is a special room that hasn't been completed.
    pub encounter: Option<RoomType>,
}

/// A generated level plus where the hero currently stands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DungeonLevel {
    pub level: u32,
    pub rooms: Grid,
    position: Location,
}

impl DungeonLevel {
    /// Wrap an existing grid, placing the hero on its entrance.
    pub fn new(level: u32, rooms: Grid) -> Result<Self, MapError> {
        let entrance = rooms
            .iter()
            .flatten()
            .find(|room| room.room_type == RoomType::Entrance)
            .map(|room| room.location)
            .ok_or(MapError::NoEntrance)?;
        Ok(Self {
            level,
            rooms,
            position: entrance,
        })
    }

    pub fn generate(
        level: u32,
        config: &DungeonConfig,
        dice: &mut dyn Dice,
    ) -> Result<Self, MapError> {
        let rooms = DungeonGenerator::new(config.clone()).create_level(level, dice)?;
        Self::new(level, rooms)
    }

    pub fn position(&self) -> Location {
        self.position
    }

    pub fn room(&self, x: usize, y: usize) -> Result<&DungeonRoom, MapError> {
        self.rooms
            .get(y)
            .and_then(|row| row.get(x))
            .ok_or(MapError::OutOfBounds { x, y })
    }

    fn room_mut(&mut self, x: usize, y: usize) -> Result<&mut DungeonRoom, MapError> {
        self.rooms
            .get_mut(y)
            .and_then(|row| row.get_mut(x))
            .ok_or(MapError::OutOfBounds { x, y })
    }

    /// Walk the hero to `(x, y)` along the shortest open path.
    ///
    /// A hero standing in a room that still blocks has to clear it first.
    pub fn travel(&mut self, x: usize, y: usize) -> Result<Travel, MapError> {
        let dest = self.room(x, y)?.location;
        let here = self.room(self.position.x, self.position.y)?;
        if here.room_state == RoomState::Blocking {
            return Err(MapError::Blocked {
                x: self.position.x,
                y: self.position.y,
            });
        }

        let steps = if dest == self.position {
            Vec::new()
        } else {
            let path = find_path(&self.rooms, self.position, dest);
            if path.is_empty() {
                return Err(MapError::NoPath { x, y });
            }
            path
        };

        let room = *self.room(x, y)?;
        let encounter = match room.room_type {
            RoomType::None | RoomType::Wall | RoomType::Empty | RoomType::Entrance => None,
            _ if room.room_state == RoomState::Complete => None,
            other => Some(other),
        };
        self.position = dest;
        tracing::debug!(x, y, steps = steps.len(), ?encounter, "hero moved");

        Ok(Travel {
            steps,
            room,
            encounter,
        })
    }

    /// Mark a room as done so it no longer blocks.
    pub fn complete_room(&mut self, x: usize, y: usize) -> Result<(), MapError> {
        self.room_mut(x, y)?.room_state = RoomState::Complete;
        Ok(())
    }

    /// Take the treasure at `(x, y)`. Each treasure can be claimed once.
    pub fn claim_treasure(&mut self, x: usize, y: usize) -> Result<(), MapError> {
        let room = self.room_mut(x, y)?;
        if room.room_type != RoomType::Treasure {
            return Err(MapError::NotATreasure { x, y });
        }
        if room.room_state == RoomState::Complete {
            return Err(MapError::TreasureTaken { x, y });
        }
        room.room_state = RoomState::Complete;
        Ok(())
    }

    /// Location of the first room of the given type, scanning row by row.
    pub fn find(&self, room_type: RoomType) -> Option<Location> {
        self.rooms
            .iter()
            .flatten()
            .find(|room| room.room_type == room_type)
            .map(|room| room.location)
    }
}
