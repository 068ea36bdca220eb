use std::collections::{BTreeSet, VecDeque};

use crate::config::GameConfig;
use crate::tile::{Tile, TileCoord, TileType};

/// A connected same-color rock group plus the same-color pillars touching it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NeighborGroup {
    /// Group members in discovery order, starting with the seed coordinate.
    pub group: Vec<TileCoord>,
    pub pillars: Vec<TileCoord>,
}

impl NeighborGroup {
    pub fn len(&self) -> usize {
        self.group.len()
    }

    pub fn is_empty(&self) -> bool {
        self.group.is_empty()
    }

    pub fn is_removable(&self) -> bool {
        self.group.len() >= GameConfig::MIN_GROUP_SIZE
    }
}

fn tile_at(tiles: &[Vec<Tile>], coord: TileCoord) -> Option<&Tile> {
    let (row, col) = coord.index(tiles.len())?;
    tiles.get(row)?.get(col)
}

/// Flood fill from `coord` across orthogonally adjacent rocks of the same
/// color.
///
/// Each visited tile scans its 3×3 neighborhood and keeps only cells whose
/// checkerboard parity differs from its own, so diagonals never join a group.
/// Pillars of the group's color are collected separately and never expand
/// the search. An out-of-bounds seed yields an empty group; a non-rock seed
/// yields a group of one.
pub fn find_neighbors(tiles: &[Vec<Tile>], coord: TileCoord) -> NeighborGroup {
    let Some(seed) = tile_at(tiles, coord) else {
        return NeighborGroup::default();
    };
    let Some(color) = seed.tile_type.rock_color() else {
        return NeighborGroup {
            group: vec![coord],
            pillars: Vec::new(),
        };
    };

    let size = tiles.len();
    let mut group = vec![coord];
    let mut pillars = Vec::new();
    let mut seen = BTreeSet::from([coord]);
    let mut queue = VecDeque::from([coord]);

    while let Some(current) = queue.pop_front() {
        for dr in -1..=1 {
            for dc in -1..=1 {
                let next = TileCoord::new(current.row + dr, current.col + dc);
                if !next.in_bounds(size) || !current.is_orthogonal_neighbor(next) {
                    continue;
                }
                if !seen.insert(next) {
                    continue;
                }
                match tile_at(tiles, next).map(|tile| &tile.tile_type) {
                    Some(TileType::Rock { color: other }) if *other == color => {
                        group.push(next);
                        queue.push_back(next);
                    }
                    Some(TileType::Pillar(pillar)) if pillar.color == color => {
                        pillars.push(next);
                    }
                    _ => {}
                }
            }
        }
    }

    NeighborGroup { group, pillars }
}

/// True when at least one rock group large enough to remove exists.
pub fn legal_move_exists(tiles: &[Vec<Tile>]) -> bool {
    let size = tiles.len();
    let mut visited = BTreeSet::new();
    for row in 0..size as i32 {
        for col in 0..size as i32 {
            let coord = TileCoord::new(row, col);
            if visited.contains(&coord) {
                continue;
            }
            let is_rock = tile_at(tiles, coord).is_some_and(|tile| tile.tile_type.is_rock());
            if !is_rock {
                continue;
            }
            let found = find_neighbors(tiles, coord);
            if found.is_removable() {
                return true;
            }
            visited.extend(found.group);
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::test_support::*;
    use crate::entity::EntityState;
    use crate::tile::{Color, PillarData};

    fn sorted(mut coords: Vec<TileCoord>) -> Vec<TileCoord> {
        coords.sort();
        coords
    }

    #[test]
    fn finds_the_seven_blues() {
        let player = Tile::new(TileType::Player(EntityState::player(3, 1)));
        let board = board_from_rows(
            vec![
                vec![player, Tile::exit(), rock(Color::Blue)],
                vec![rock(Color::Blue), rock(Color::Blue), rock(Color::Blue)],
                vec![rock(Color::Blue), rock(Color::Blue), rock(Color::Blue)],
            ],
            vec![],
        );
        let found = find_neighbors(board.tiles(), TileCoord::new(1, 1));
        let expected = vec![
            TileCoord::new(0, 0),
            TileCoord::new(0, 1),
            TileCoord::new(0, 2),
            TileCoord::new(1, 0),
            TileCoord::new(1, 1),
            TileCoord::new(1, 2),
            TileCoord::new(2, 2),
        ];
        assert_eq!(sorted(found.group.clone()), expected);
        assert_eq!(found.group[0], TileCoord::new(1, 1));
        assert!(found.is_removable());
    }

    #[test]
    fn never_crosses_diagonals() {
        let board = board_from_rows(
            vec![
                vec![rock(Color::Red), rock(Color::Blue), rock(Color::Red)],
                vec![rock(Color::Blue), rock(Color::Red), rock(Color::Blue)],
                vec![rock(Color::Red), rock(Color::Blue), rock(Color::Red)],
            ],
            vec![],
        );
        for row in 0..3 {
            for col in 0..3 {
                assert_eq!(find_neighbors(board.tiles(), TileCoord::new(row, col)).len(), 1);
            }
        }
        assert!(!legal_move_exists(board.tiles()));
    }

    #[test]
    fn out_of_bounds_is_empty() {
        let board = board_from_rows(vec![vec![rock(Color::Red); 3]; 3], vec![]);
        assert!(find_neighbors(board.tiles(), TileCoord::new(3, 0)).is_empty());
        assert!(find_neighbors(board.tiles(), TileCoord::new(0, -1)).is_empty());
        assert_eq!(find_neighbors(board.tiles(), TileCoord::new(0, 0)).len(), 9);
    }

    #[test]
    fn pillars_are_collected_not_crossed() {
        let pillar = Tile::new(TileType::Pillar(PillarData {
            color: Color::Red,
            health: 3,
        }));
        let board = board_from_rows(
            vec![
                vec![rock(Color::Red), rock(Color::Blue), rock(Color::Blue)],
                vec![pillar, rock(Color::Blue), rock(Color::Blue)],
                vec![rock(Color::Red), rock(Color::Red), rock(Color::Blue)],
            ],
            vec![],
        );
        let found = find_neighbors(board.tiles(), TileCoord::new(0, 0));
        assert_eq!(sorted(found.group), vec![TileCoord::new(0, 0), TileCoord::new(0, 1)]);
        assert_eq!(found.pillars, vec![TileCoord::new(1, 0)]);
    }
}
