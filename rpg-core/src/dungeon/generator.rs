//! Tunnel-carving level generator.

use super::{DungeonConfig, DungeonError, DungeonRoom, Grid, Location, RoomState, RoomType};
use crate::dice::Dice;

/// Whole-level retries before the configuration is declared unworkable.
const LEVEL_ATTEMPTS: usize = 20;

/// Carving steps allowed per requested tunnel within one attempt.
const STEPS_PER_TUNNEL: usize = 50;

type Cells = Vec<Vec<RoomType>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    const ALL: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
    ];

    fn delta(self) -> (isize, isize) {
        match self {
            Direction::North => (0, -1),
            Direction::South => (0, 1),
            Direction::East => (1, 0),
            Direction::West => (-1, 0),
        }
    }

    fn opposite(self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::South => Direction::North,
            Direction::East => Direction::West,
            Direction::West => Direction::East,
        }
    }

    fn is_vertical(self) -> bool {
        matches!(self, Direction::North | Direction::South)
    }

    fn is_perpendicular(self, other: Direction) -> bool {
        self.is_vertical() != other.is_vertical()
    }
}

/// Shape of an open cell, by which of its four neighbours are open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Junction {
    Isolated,
    DeadEnd,
    Corner,
    Straight,
    TJunction,
    Cross,
}

impl Junction {
    fn classify(cells: &Cells, x: usize, y: usize) -> Junction {
        let open = |dir: Direction| {
            step(cells.len(), x, y, dir)
                .map(|(nx, ny)| cells[ny][nx].is_open())
                .unwrap_or(false)
        };
        let (north, south, east, west) = (
            open(Direction::North),
            open(Direction::South),
            open(Direction::East),
            open(Direction::West),
        );
        match [north, south, east, west].iter().filter(|o| **o).count() {
            0 => Junction::Isolated,
            1 => Junction::DeadEnd,
            2 if (north && south) || (east && west) => Junction::Straight,
            2 => Junction::Corner,
            3 => Junction::TJunction,
            _ => Junction::Cross,
        }
    }
}

fn step(size: usize, x: usize, y: usize, dir: Direction) -> Option<(usize, usize)> {
    let (dx, dy) = dir.delta();
    let nx = x.checked_add_signed(dx)?;
    let ny = y.checked_add_signed(dy)?;
    (nx < size && ny < size).then_some((nx, ny))
}

/// Builds dungeon levels from a [`DungeonConfig`].
#[derive(Debug, Clone, Default)]
pub struct DungeonGenerator {
    config: DungeonConfig,
}

impl DungeonGenerator {
    pub fn new(config: DungeonConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DungeonConfig {
        &self.config
    }

    /// Generate level number `level`.
    ///
    /// Fails only when the configuration can't produce a level: either it is
    /// invalid outright or repeated attempts never fit all the rooms.
    pub fn create_level(&self, level: u32, dice: &mut dyn Dice) -> Result<Grid, DungeonError> {
        self.config.validate()?;

        for attempt in 1..=LEVEL_ATTEMPTS {
            let Some(mut cells) = self.carve(dice) else {
                tracing::debug!(attempt, "tunnel carving stalled, retrying");
                continue;
            };
            frame_walls(&mut cells);
            if self.place_rooms(&mut cells, dice) {
                tracing::info!(level, attempt, size = self.config.size, "dungeon level generated");
                return Ok(into_grid(level, cells));
            }
            tracing::debug!(attempt, "not enough room for every special room, retrying");
        }

        Err(DungeonError::AttemptsExhausted {
            attempts: LEVEL_ATTEMPTS,
        })
    }

    fn in_bounds(&self, x: usize, y: usize) -> bool {
        let low = self.config.padding;
        let high = self.config.size - 1 - self.config.padding;
        (low..=high).contains(&x) && (low..=high).contains(&y)
    }

    /// Where a step from `(x, y)` lands, if it stays inside the padding and
    /// doesn't open up a 2x2 block.
    fn carve_target(
        &self,
        cells: &Cells,
        x: usize,
        y: usize,
        dir: Direction,
    ) -> Option<(usize, usize)> {
        let (nx, ny) = step(cells.len(), x, y, dir)?;
        (self.in_bounds(nx, ny) && !converges(cells, nx, ny)).then_some((nx, ny))
    }

    /// Carve tunnels from a random start until the tunnel budget is spent.
    ///
    /// Every run turns relative to the previous one. Returns `None` if the
    /// step budget runs out first.
    fn carve(&self, dice: &mut dyn Dice) -> Option<Cells> {
        let size = self.config.size;
        let low = self.config.padding as i32;
        let high = (size - 1 - self.config.padding) as i32;

        let mut cells = vec![vec![RoomType::None; size]; size];
        let mut x = dice.range(low, high) as usize;
        let mut y = dice.range(low, high) as usize;
        cells[y][x] = RoomType::Empty;

        let mut last: Option<Direction> = None;
        let mut tunnels = self.config.tunnels;
        let mut steps = 0;

        while tunnels > 0 {
            steps += 1;
            if steps > self.config.tunnels * STEPS_PER_TUNNEL {
                return None;
            }

            let options: Vec<Direction> = Direction::ALL
                .into_iter()
                .filter(|dir| last.map_or(true, |l| dir.is_perpendicular(l)))
                .filter(|dir| self.carve_target(&cells, x, y, *dir).is_some())
                .collect();

            let Some(index) = dice.choose_index(options.len()) else {
                // Dead end: back up along the last run, or restart from any open cell.
                let back = last
                    .and_then(|l| step(size, x, y, l.opposite()))
                    .filter(|(bx, by)| cells[*by][*bx] == RoomType::Empty);
                match back {
                    Some((bx, by)) => (x, y) = (bx, by),
                    None => {
                        let open = open_cells(&cells);
                        let pick = dice.choose_index(open.len())?;
                        (x, y) = open[pick];
                        last = None;
                    }
                }
                continue;
            };

            let dir = options[index];
            let length = dice.range(1, self.config.max_tunnel_length as i32);
            for _ in 0..length {
                let Some((nx, ny)) = self.carve_target(&cells, x, y, dir) else {
                    break;
                };
                cells[ny][nx] = RoomType::Empty;
                (x, y) = (nx, ny);
            }
            last = Some(dir);
            tunnels -= 1;
        }

        tracing::debug!(
            open = open_cells(&cells).len(),
            steps,
            "tunnels carved"
        );
        Some(cells)
    }

    /// Place every special room. Returns `false` if some room found no cell.
    fn place_rooms(&self, cells: &mut Cells, dice: &mut dyn Dice) -> bool {
        let mut dead_ends = Vec::new();
        let mut corners = Vec::new();
        let mut junctions = Vec::new();
        let all = open_cells(cells);
        for &(x, y) in &all {
            match Junction::classify(cells, x, y) {
                Junction::DeadEnd => dead_ends.push((x, y)),
                Junction::Corner => corners.push((x, y)),
                Junction::TJunction | Junction::Cross => junctions.push((x, y)),
                Junction::Isolated | Junction::Straight => {}
            }
        }
        let secluded: [&[(usize, usize)]; 3] = [&dead_ends, &corners, &all];

        let Some(exit) = place(cells, dice, &secluded, RoomType::Exit) else {
            return false;
        };
        if place(cells, dice, &secluded, RoomType::Entrance).is_none() {
            return false;
        }
        for _ in 0..self.config.rest_rooms {
            if place(cells, dice, &secluded, RoomType::Rest).is_none() {
                return false;
            }
        }
        for _ in 0..self.config.treasure_rooms {
            if place(cells, dice, &secluded, RoomType::Treasure).is_none() {
                return false;
            }
        }
        if place(cells, dice, &secluded, RoomType::Shop).is_none() {
            return false;
        }

        let beside_exit: Vec<(usize, usize)> = Direction::ALL
            .into_iter()
            .filter_map(|dir| step(cells.len(), exit.0, exit.1, dir))
            .collect();
        let boss_pools: [&[(usize, usize)]; 4] = [&beside_exit, &dead_ends, &corners, &all];
        if place(cells, dice, &boss_pools, RoomType::Boss).is_none() {
            return false;
        }

        let mut battles = 0;
        while battles < self.config.battle_rooms
            && place(cells, dice, &[junctions.as_slice()], RoomType::Battle).is_some()
        {
            battles += 1;
        }

        tracing::debug!(
            dead_ends = dead_ends.len(),
            corners = corners.len(),
            junctions = junctions.len(),
            battles,
            "rooms placed"
        );
        true
    }
}

/// Put `room` on a random still-empty cell from the first pool that has one.
fn place(
    cells: &mut Cells,
    dice: &mut dyn Dice,
    pools: &[&[(usize, usize)]],
    room: RoomType,
) -> Option<(usize, usize)> {
    for pool in pools {
        let free: Vec<(usize, usize)> = pool
            .iter()
            .copied()
            .filter(|(x, y)| cells[*y][*x] == RoomType::Empty)
            .collect();
        if let Some(index) = dice.choose_index(free.len()) {
            let (x, y) = free[index];
            cells[y][x] = room;
            return Some((x, y));
        }
    }
    None
}

/// Whether opening `(x, y)` would complete a 2x2 block of open cells.
fn converges(cells: &Cells, x: usize, y: usize) -> bool {
    let size = cells.len();
    let open = |cx: Option<usize>, cy: Option<usize>| match (cx, cy) {
        (Some(cx), Some(cy)) if cx < size && cy < size => cells[cy][cx].is_open(),
        _ => false,
    };
    [(-1isize, -1isize), (1, -1), (-1, 1), (1, 1)]
        .into_iter()
        .any(|(dx, dy)| {
            let sx = x.checked_add_signed(dx);
            let sy = y.checked_add_signed(dy);
            open(sx, Some(y)) && open(Some(x), sy) && open(sx, sy)
        })
}

/// Turn every blank cell touching a tunnel (diagonals included) into wall.
fn frame_walls(cells: &mut Cells) {
    let snapshot = cells.clone();
    let size = snapshot.len();
    for y in 0..size {
        for x in 0..size {
            if snapshot[y][x] != RoomType::None {
                continue;
            }
            let touches_tunnel = (-1isize..=1)
                .flat_map(|dy| (-1isize..=1).map(move |dx| (dx, dy)))
                .filter(|&(dx, dy)| (dx, dy) != (0, 0))
                .filter_map(|(dx, dy)| Some((x.checked_add_signed(dx)?, y.checked_add_signed(dy)?)))
                .any(|(nx, ny)| nx < size && ny < size && snapshot[ny][nx] == RoomType::Empty);
            if touches_tunnel {
                cells[y][x] = RoomType::Wall;
            }
        }
    }
}

fn open_cells(cells: &Cells) -> Vec<(usize, usize)> {
    let mut open = Vec::new();
    for (y, row) in cells.iter().enumerate() {
        for (x, cell) in row.iter().enumerate() {
            if *cell == RoomType::Empty {
                open.push((x, y));
            }
        }
    }
    open
}

fn into_grid(level: u32, cells: Cells) -> Grid {
    cells
        .into_iter()
        .enumerate()
        .map(|(y, row)| {
            row.into_iter()
                .enumerate()
                .map(|(x, room_type)| DungeonRoom {
                    location: Location::new(level, x, y),
                    room_type,
                    room_state: if room_type.blocks() {
                        RoomState::Blocking
                    } else {
                        RoomState::Idle
                    },
                })
                .collect()
        })
        .collect()
}
