use super::{room_at, Grid, Location};
use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};

/// Shortest four-directional path from `from` to `to`.
///
/// The returned steps exclude `from` and end at `to`. Every intermediate
/// room must be passable; the destination only has to be open, so the hero
/// can walk up to a battle or boss room that still blocks. An empty path
/// means `to` is unreachable (or is `from` itself).
pub fn find_path(grid: &Grid, from: Location, to: Location) -> Vec<Location> {
    if from == to || from.level != to.level {
        return Vec::new();
    }
    match (room_at(grid, from), room_at(grid, to)) {
        (Some(_), Some(dest)) if dest.room_type.is_open() => {}
        _ => return Vec::new(),
    }

    let mut open = BinaryHeap::new();
    let mut came_from: HashMap<Location, Location> = HashMap::new();
    let mut cost: HashMap<Location, usize> = HashMap::new();

    cost.insert(from, 0);
    open.push(Reverse((from.distance(&to), 0usize, from)));

    while let Some(Reverse((_, g, current))) = open.pop() {
        if current == to {
            return rebuild(&came_from, from, to);
        }
        if cost.get(&current).is_some_and(|best| g > *best) {
            continue;
        }

        for next in neighbours(grid, current) {
            let walkable = room_at(grid, next)
                .map(|room| room.is_passable() || (next == to && room.room_type.is_open()))
                .unwrap_or(false);
            if !walkable {
                continue;
            }
            let next_cost = g + 1;
            if cost.get(&next).map_or(true, |best| next_cost < *best) {
                cost.insert(next, next_cost);
                came_from.insert(next, current);
                open.push(Reverse((next_cost + next.distance(&to), next_cost, next)));
            }
        }
    }

    tracing::debug!(?from, ?to, "no path");
    Vec::new()
}

fn neighbours(grid: &Grid, at: Location) -> impl Iterator<Item = Location> + '_ {
    let candidates = [
        at.y.checked_sub(1).map(|y| Location::new(at.level, at.x, y)),
        Some(Location::new(at.level, at.x, at.y + 1)),
        Some(Location::new(at.level, at.x + 1, at.y)),
        at.x.checked_sub(1).map(|x| Location::new(at.level, x, at.y)),
    ];
    candidates
        .into_iter()
        .flatten()
        .filter(move |l| room_at(grid, *l).is_some())
}

fn rebuild(came_from: &HashMap<Location, Location>, from: Location, to: Location) -> Vec<Location> {
    let mut path = vec![to];
    let mut current = to;
    while let Some(previous) = came_from.get(&current) {
        if *previous == from {
            break;
        }
        path.push(*previous);
        current = *previous;
    }
    path.reverse();
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dungeon::{DungeonRoom, RoomState, RoomType};

    /// Build a grid from rows of characters: `#` wall, `.` empty, `B` battle
    /// (blocking), `b` battle (complete).
    fn grid(rows: &[&str]) -> Grid {
        rows.iter()
            .enumerate()
            .map(|(y, row)| {
                row.chars()
                    .enumerate()
                    .map(|(x, c)| {
                        let (room_type, room_state) = match c {
                            '.' => (RoomType::Empty, RoomState::Idle),
                            'B' => (RoomType::Battle, RoomState::Blocking),
                            'b' => (RoomType::Battle, RoomState::Complete),
                            _ => (RoomType::Wall, RoomState::Blocking),
                        };
                        DungeonRoom {
                            location: Location::new(1, x, y),
                            room_type,
                            room_state,
                        }
                    })
                    .collect()
            })
            .collect()
    }

    fn at(x: usize, y: usize) -> Location {
        Location::new(1, x, y)
    }

    #[test]
    fn test_straight_corridor() {
        let g = grid(&["....."]);
        let path = find_path(&g, at(0, 0), at(4, 0));
        assert_eq!(path, vec![at(1, 0), at(2, 0), at(3, 0), at(4, 0)]);
    }

    #[test]
    fn test_goes_around_walls() {
        let g = grid(&[
            ".#...",
            ".#.#.",
            "...#.",
        ]);
        let path = find_path(&g, at(0, 0), at(4, 2));
        assert_eq!(path.len(), 10);
        assert_eq!(path.last(), Some(&at(4, 2)));
        for pair in path.windows(2) {
            assert_eq!(pair[0].distance(&pair[1]), 1);
        }
    }

    #[test]
    fn test_same_cell_is_empty() {
        let g = grid(&["..."]);
        assert!(find_path(&g, at(1, 0), at(1, 0)).is_empty());
    }

    #[test]
    fn test_unreachable() {
        let g = grid(&[".#."]);
        assert!(find_path(&g, at(0, 0), at(2, 0)).is_empty());
        assert!(find_path(&g, at(0, 0), at(1, 0)).is_empty());
        assert!(find_path(&g, at(0, 0), at(9, 9)).is_empty());
    }

    #[test]
    fn test_blocking_room_only_as_destination() {
        let g = grid(&["..B.."]);
        assert_eq!(find_path(&g, at(0, 0), at(2, 0)), vec![at(1, 0), at(2, 0)]);
        assert!(find_path(&g, at(0, 0), at(4, 0)).is_empty());

        let cleared = grid(&["..b.."]);
        assert_eq!(find_path(&cleared, at(0, 0), at(4, 0)).len(), 4);
    }

    #[test]
    fn test_other_level_is_unreachable() {
        let g = grid(&["..."]);
        assert!(find_path(&g, at(0, 0), Location::new(2, 2, 0)).is_empty());
    }
}
