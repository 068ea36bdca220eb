//! Rule enforcement after every settled transformation.
//!
//! The referee is a pure function of the grid. It returns the single most
//! urgent consequence, or `None` when play simply continues. Checks run in
//! priority order and the first match wins:
//!
//! 1. the player stands directly above an unlocked exit → `GameWin`
//! 2. the player is dead → `GameLose`
//! 3. a monster can hit the player → `Attack`
//! 4. the player can hit a monster → `Attack`
//! 5. a monster is dead → `MonsterDies` (first in row-major order)
//! 6. an item lies directly below the player → `CollectItem`
//! 7. no removable group exists and no quarter turn enables a win or an
//!    attack → `GameLose`

use crate::board::{Rotation, legal_move_exists, rotate_tiles};
use crate::config::GameConfig;
use crate::entity::EntityState;
use crate::input::{InputType, LoseReason};
use crate::tile::{Tile, TileCoord, TileType};

#[derive(Clone, Copy, Debug, Default)]
pub struct Referee;

struct Located<'a> {
    coord: TileCoord,
    entity: &'a EntityState,
}

fn coords(size: usize) -> impl Iterator<Item = TileCoord> {
    let size = size as i32;
    (0..size).flat_map(move |row| (0..size).map(move |col| TileCoord::new(row, col)))
}

fn tile_type(tiles: &[Vec<Tile>], coord: TileCoord) -> Option<&TileType> {
    let (row, col) = coord.index(tiles.len())?;
    tiles.get(row)?.get(col).map(|tile| &tile.tile_type)
}

fn find_player(tiles: &[Vec<Tile>]) -> Option<Located<'_>> {
    coords(tiles.len()).find_map(|coord| match tile_type(tiles, coord)? {
        TileType::Player(entity) => Some(Located { coord, entity }),
        _ => None,
    })
}

fn monsters(tiles: &[Vec<Tile>]) -> impl Iterator<Item = Located<'_>> {
    coords(tiles.len()).filter_map(|coord| match tile_type(tiles, coord)? {
        TileType::Monster(entity) => Some(Located { coord, entity }),
        _ => None,
    })
}

fn win(tiles: &[Vec<Tile>]) -> Option<InputType> {
    let player = find_player(tiles)?;
    match tile_type(tiles, player.coord.row_below())? {
        TileType::Exit { blocked: false } => Some(InputType::GameWin),
        _ => None,
    }
}

fn monster_attack(tiles: &[Vec<Tile>], player: &Located<'_>) -> Option<InputType> {
    monsters(tiles)
        .filter(|monster| !monster.entity.is_dead() && monster.entity.can_attack())
        .find(|monster| {
            monster
                .entity
                .attack
                .targets_from(monster.coord, tiles.len())
                .contains(&player.coord)
        })
        .map(|monster| InputType::Attack {
            attacker: monster.coord,
            defender: Some(player.coord),
        })
}

fn player_attack(tiles: &[Vec<Tile>], player: &Located<'_>) -> Option<InputType> {
    if !player.entity.can_attack() {
        return None;
    }
    player
        .entity
        .attack
        .targets_from(player.coord, tiles.len())
        .into_iter()
        .find(|&target| {
            matches!(tile_type(tiles, target), Some(TileType::Monster(monster)) if !monster.is_dead())
        })
        .map(|target| InputType::Attack {
            attacker: player.coord,
            defender: Some(target),
        })
}

fn attack(tiles: &[Vec<Tile>]) -> Option<InputType> {
    let player = find_player(tiles)?;
    monster_attack(tiles, &player).or_else(|| player_attack(tiles, &player))
}

fn monster_dies(tiles: &[Vec<Tile>]) -> Option<InputType> {
    monsters(tiles)
        .find(|monster| monster.entity.is_dead())
        .map(|monster| InputType::MonsterDies {
            coord: monster.coord,
            kind: monster.entity.kind,
        })
}

fn collect_item(tiles: &[Vec<Tile>]) -> Option<InputType> {
    let player = find_player(tiles)?;
    let below = player.coord.row_below();
    match tile_type(tiles, below)? {
        TileType::Item(item) => Some(InputType::CollectItem {
            coord: below,
            item: *item,
        }),
        _ => None,
    }
}

/// A quarter turn (or two, or three) that would let the game continue.
fn rotation_rescues(tiles: &[Vec<Tile>]) -> bool {
    let mut rotated = tiles.to_vec();
    for _ in 0..GameConfig::ROTATIONS_TO_PROBE {
        rotated = rotate_tiles(&rotated, Rotation::Left).0;
        if win(&rotated).is_some() || attack(&rotated).is_some() {
            return true;
        }
    }
    false
}

impl Referee {
    pub fn enforce_rules(tiles: &[Vec<Tile>]) -> Option<InputType> {
        if tiles.is_empty() {
            return None;
        }
        if let Some(win) = win(tiles) {
            return Some(win);
        }
        if find_player(tiles).is_some_and(|player| player.entity.is_dead()) {
            return Some(InputType::GameLose {
                reason: LoseReason::PlayerDied,
            });
        }
        attack(tiles)
            .or_else(|| monster_dies(tiles))
            .or_else(|| collect_item(tiles))
            .or_else(|| {
                (!legal_move_exists(tiles) && !rotation_rescues(tiles)).then_some(InputType::GameLose {
                    reason: LoseReason::NoMoreMoves,
                })
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{AttackModel, AttackRange, EntityKind};
    use crate::tile::{Color, Direction, Item};

    fn rock(color: Color) -> Tile {
        Tile::rock(color)
    }

    fn player() -> Tile {
        Tile::new(TileType::Player(EntityState::player(3, 1)))
    }

    fn monster(kind: EntityKind, hp: i32, directions: &[Direction]) -> Tile {
        let attack = AttackModel::new(1, directions, AttackRange::adjacent());
        Tile::new(TileType::Monster(EntityState::new(kind, hp, attack)))
    }

    fn pickaxe(hp: i32) -> Tile {
        monster(EntityKind::Rat, hp, &[Direction::South])
    }

    fn mouthy(hp: i32) -> Tile {
        monster(EntityKind::Alamo, hp, &[Direction::East, Direction::West])
    }

    /// Rows top-down.
    fn grid(rows: Vec<Vec<Tile>>) -> Vec<Vec<Tile>> {
        rows.into_iter().rev().collect()
    }

    #[test]
    fn player_above_exit_wins() {
        let tiles = grid(vec![
            vec![rock(Color::Red), rock(Color::Blue), rock(Color::Red)],
            vec![rock(Color::Blue), player(), rock(Color::Blue)],
            vec![rock(Color::Red), Tile::exit(), rock(Color::Red)],
        ]);
        assert_eq!(Referee::enforce_rules(&tiles), Some(InputType::GameWin));
    }

    #[test]
    fn blocked_exit_does_not_win() {
        let tiles = grid(vec![
            vec![rock(Color::Blue), rock(Color::Blue), rock(Color::Blue)],
            vec![rock(Color::Red), player(), rock(Color::Red)],
            vec![rock(Color::Red), Tile::new(TileType::Exit { blocked: true }), rock(Color::Red)],
        ]);
        assert_eq!(Referee::enforce_rules(&tiles), None);
    }

    #[test]
    fn player_attacks_monster_below() {
        let tiles = grid(vec![
            vec![rock(Color::Blue), rock(Color::Blue), rock(Color::Blue)],
            vec![rock(Color::Red), player(), rock(Color::Red)],
            vec![Tile::exit(), mouthy(2), rock(Color::Red)],
        ]);
        assert_eq!(
            Referee::enforce_rules(&tiles),
            Some(InputType::Attack {
                attacker: TileCoord::new(1, 1),
                defender: Some(TileCoord::new(0, 1)),
            })
        );
    }

    #[test]
    fn pickaxe_monster_attacks_down() {
        let tiles = grid(vec![
            vec![rock(Color::Blue), pickaxe(2), rock(Color::Blue)],
            vec![rock(Color::Red), player(), rock(Color::Red)],
            vec![Tile::exit(), rock(Color::Red), rock(Color::Blue)],
        ]);
        assert_eq!(
            Referee::enforce_rules(&tiles),
            Some(InputType::Attack {
                attacker: TileCoord::new(2, 1),
                defender: Some(TileCoord::new(1, 1)),
            })
        );
    }

    #[test]
    fn mouthy_monster_attacks_sideways() {
        let tiles = grid(vec![
            vec![rock(Color::Blue), rock(Color::Blue), rock(Color::Blue)],
            vec![mouthy(2), player(), rock(Color::Red)],
            vec![Tile::exit(), rock(Color::Red), rock(Color::Red)],
        ]);
        assert_eq!(
            Referee::enforce_rules(&tiles),
            Some(InputType::Attack {
                attacker: TileCoord::new(1, 0),
                defender: Some(TileCoord::new(1, 1)),
            })
        );
    }

    #[test]
    fn spent_attackers_do_not_attack() {
        let mut spent = EntityState::player(3, 1);
        spent = spent.did_attack();
        let tiles = grid(vec![
            vec![rock(Color::Blue), rock(Color::Blue), rock(Color::Blue)],
            vec![rock(Color::Red), Tile::new(TileType::Player(spent)), rock(Color::Red)],
            vec![Tile::exit(), pickaxe(2), rock(Color::Red)],
        ]);
        assert_eq!(Referee::enforce_rules(&tiles), None);
    }

    #[test]
    fn only_first_dead_monster_is_reported() {
        let tiles = grid(vec![
            vec![player(), rock(Color::Blue), rock(Color::Blue), rock(Color::Blue)],
            vec![rock(Color::Red), rock(Color::Red), pickaxe(0), rock(Color::Red)],
            vec![rock(Color::Blue), pickaxe(-1), rock(Color::Blue), rock(Color::Blue)],
            vec![Tile::exit(), rock(Color::Blue), rock(Color::Red), rock(Color::Red)],
        ]);
        assert_eq!(
            Referee::enforce_rules(&tiles),
            Some(InputType::MonsterDies {
                coord: TileCoord::new(1, 1),
                kind: EntityKind::Rat,
            })
        );
    }

    #[test]
    fn item_below_player_is_collected() {
        let tiles = grid(vec![
            vec![rock(Color::Blue), player(), rock(Color::Blue)],
            vec![rock(Color::Red), Tile::new(TileType::Item(Item::gem(1))), rock(Color::Red)],
            vec![Tile::exit(), rock(Color::Red), rock(Color::Blue)],
        ]);
        assert_eq!(
            Referee::enforce_rules(&tiles),
            Some(InputType::CollectItem {
                coord: TileCoord::new(1, 1),
                item: Item::gem(1),
            })
        );
    }

    #[test]
    fn dead_player_loses() {
        let mut dead = EntityState::player(3, 1);
        dead.hp = 0;
        let tiles = grid(vec![
            vec![rock(Color::Blue), Tile::new(TileType::Player(dead)), rock(Color::Blue)],
            vec![rock(Color::Blue), rock(Color::Blue), rock(Color::Blue)],
            vec![Tile::exit(), rock(Color::Red), rock(Color::Blue)],
        ]);
        assert_eq!(
            Referee::enforce_rules(&tiles),
            Some(InputType::GameLose {
                reason: LoseReason::PlayerDied
            })
        );
    }

    #[test]
    fn checkerboard_loses() {
        let tiles: Vec<Vec<Tile>> = (0..4)
            .map(|row| {
                (0..4)
                    .map(|col| rock(if (row + col) % 2 == 0 { Color::Red } else { Color::Blue }))
                    .collect()
            })
            .collect();
        assert_eq!(
            Referee::enforce_rules(&tiles),
            Some(InputType::GameLose {
                reason: LoseReason::NoMoreMoves
            })
        );
    }

    #[test]
    fn rotation_that_wins_prevents_loss() {
        // Exit at the left edge of the player's row; one left turn puts the
        // exit directly under the player.
        let tiles = grid(vec![
            vec![rock(Color::Red), rock(Color::Blue), rock(Color::Red)],
            vec![Tile::exit(), player(), rock(Color::Blue)],
            vec![rock(Color::Red), rock(Color::Blue), rock(Color::Red)],
        ]);
        assert!(!legal_move_exists(&tiles));
        assert_eq!(Referee::enforce_rules(&tiles), None);
    }

    #[test]
    fn stuck_board_loses() {
        let tiles = grid(vec![
            vec![rock(Color::Red), rock(Color::Blue), player()],
            vec![rock(Color::Blue), rock(Color::Red), rock(Color::Blue)],
            vec![Tile::exit(), rock(Color::Blue), rock(Color::Red)],
        ]);
        assert_eq!(
            Referee::enforce_rules(&tiles),
            Some(InputType::GameLose {
                reason: LoseReason::NoMoreMoves
            })
        );
    }
}
