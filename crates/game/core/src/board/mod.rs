//! The board engine.
//!
//! [`Board`] owns the N×N grid, the tile generator and the run RNG. All
//! mutation goes through [`Board::handle`], which answers every input with
//! the [`Transformation`](crate::Transformation) it caused, `Ok(None)` for an
//! illegal or irrelevant input, or a [`BoardError`] when a precondition the
//! rules guarantee has been violated.

mod abilities;
mod gravity;
mod handle;
mod matching;
mod rotate;

pub use matching::{NeighborGroup, find_neighbors, legal_move_exists};
pub use rotate::{Rotation, rotate_tiles};

use crate::entity::{EntityCatalog, EntityKind, EntityState};
use crate::env::{ConfigError, LevelConfig, RollContext, RunRng};
use crate::error::{ErrorContext, ErrorSeverity, GameError};
use crate::generator::{GenerationContext, TileGenerator, TileStrategy};
use crate::input::InputType;
use crate::tile::{Tile, TileCoord, TileFlags, TileType};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    #[error("row {row} has {len} tiles on a board of size {size}")]
    NotSquare { row: usize, len: usize, size: usize },

    #[error("board holds {0} players")]
    PlayerCount(usize),

    #[error("board holds {0} exits")]
    ExitCount(usize),

    #[error("expected an entity at {}", .0.coord.unwrap_or_default())]
    MissingEntity(ErrorContext),

    #[error("expected {expected} at {}", .context.coord.unwrap_or_default())]
    UnexpectedTile {
        expected: &'static str,
        context: ErrorContext,
    },

    #[error("{attacker} cannot reach {defender} along a row or column")]
    NoLineOfAttack {
        attacker: TileCoord,
        defender: TileCoord,
    },

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl BoardError {
    fn missing_entity(coord: TileCoord) -> Self {
        Self::MissingEntity(ErrorContext::at(coord))
    }

    fn unexpected(coord: TileCoord, expected: &'static str) -> Self {
        Self::UnexpectedTile {
            expected,
            context: ErrorContext::at(coord),
        }
    }
}

impl GameError for BoardError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Config(err) => err.severity(),
            Self::NotSquare { .. } | Self::PlayerCount(_) | Self::ExitCount(_) => {
                ErrorSeverity::Validation
            }
            _ => ErrorSeverity::Internal,
        }
    }

    fn context(&self) -> Option<&ErrorContext> {
        match self {
            Self::MissingEntity(context) | Self::UnexpectedTile { context, .. } => Some(context),
            _ => None,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NotSquare { .. } => "BOARD_NOT_SQUARE",
            Self::PlayerCount(_) => "BOARD_PLAYER_COUNT",
            Self::ExitCount(_) => "BOARD_EXIT_COUNT",
            Self::MissingEntity(_) => "BOARD_MISSING_ENTITY",
            Self::UnexpectedTile { .. } => "BOARD_UNEXPECTED_TILE",
            Self::NoLineOfAttack { .. } => "BOARD_NO_LINE_OF_ATTACK",
            Self::Config(err) => err.error_code(),
        }
    }
}

#[derive(Debug)]
pub struct Board {
    tiles: Vec<Vec<Tile>>,
    size: usize,
    player: Option<TileCoord>,
    exit: Option<TileCoord>,
    tutorial: bool,
    gold_multiplier: u32,
    generator: Box<dyn TileStrategy>,
    rng: RunRng,
}

impl Board {
    /// Wraps an existing grid, indexed `[row][col]` with row 0 at the bottom.
    pub fn from_tiles(
        tiles: Vec<Vec<Tile>>,
        generator: Box<dyn TileStrategy>,
        rng: RunRng,
    ) -> Result<Self, BoardError> {
        let size = tiles.len();
        if let Some((row, len)) = tiles
            .iter()
            .enumerate()
            .map(|(row, cols)| (row, cols.len()))
            .find(|&(_, len)| len != size)
        {
            return Err(BoardError::NotSquare { row, len, size });
        }

        let count = |pred: fn(&TileType) -> bool| {
            tiles
                .iter()
                .flatten()
                .filter(|tile| pred(&tile.tile_type))
                .count()
        };
        let players = count(TileType::is_player);
        if players > 1 {
            return Err(BoardError::PlayerCount(players));
        }
        let exits = count(TileType::is_exit);
        if exits > 1 {
            return Err(BoardError::ExitCount(exits));
        }

        let mut board = Self {
            tiles,
            size,
            player: None,
            exit: None,
            tutorial: false,
            gold_multiplier: 100,
            generator,
            rng,
        };
        board.refresh_markers();
        Ok(board)
    }

    /// Lays out a fresh level: pillars, an exit on the bottom row, the
    /// player on the top row, starting monsters, then generated tiles.
    pub fn build(
        level: &LevelConfig,
        catalog: EntityCatalog,
        player: EntityState,
        seed: u64,
    ) -> Result<Self, BoardError> {
        level.validate_with(&catalog)?;

        let size = level.board_size;
        let mut rng = RunRng::new(seed);
        let mut generator = TileGenerator::new(level, catalog);
        let mut tiles = vec![vec![Tile::empty(); size]; size];

        for placement in &level.pillars {
            if let Some((row, col)) = placement.coord.index(size) {
                tiles[row][col] = Tile::new(TileType::Pillar(placement.pillar));
            }
        }

        let free_in_row = |tiles: &Vec<Vec<Tile>>, row: usize| -> Vec<usize> {
            (0..size)
                .filter(|&col| tiles[row][col].tile_type.is_empty())
                .collect()
        };

        let exit_cols = free_in_row(&tiles, 0);
        let exit_col = rng
            .index(RollContext::Setup, exit_cols.len())
            .map(|idx| exit_cols[idx])
            .ok_or(ConfigError::RowBlocked { row: 0 })?;
        tiles[0][exit_col] = Tile::new(TileType::Exit {
            blocked: level.goals_to_unlock_exit > 0,
        });

        let player_cols = free_in_row(&tiles, size - 1);
        let player_col = rng
            .index(RollContext::Setup, player_cols.len())
            .map(|idx| player_cols[idx])
            .ok_or(ConfigError::RowBlocked { row: size - 1 })?;
        tiles[size - 1][player_col] = Tile::new(TileType::Player(player.clone()));

        let mut monsters = 0;
        if level.max_monsters() > 0 {
            for _ in 0..level.starting_monsters.min(level.max_monsters()) {
                let free: Vec<(usize, usize)> = (1..size - 1)
                    .flat_map(|row| (0..size).map(move |col| (row, col)))
                    .filter(|&(row, col)| tiles[row][col].tile_type.is_empty())
                    .collect();
                let Some(idx) = rng.index(RollContext::Setup, free.len()) else {
                    break;
                };
                if let Some(monster) = generator.monster(None, &mut rng) {
                    let (row, col) = free[idx];
                    tiles[row][col] = Tile::new(TileType::Monster(monster));
                    monsters += 1;
                }
            }
        }

        let empties: Vec<(usize, usize)> = (0..size)
            .flat_map(|row| (0..size).map(move |col| (row, col)))
            .filter(|&(row, col)| tiles[row][col].tile_type.is_empty())
            .collect();
        let ctx = GenerationContext {
            board_size: size,
            monsters_on_board: monsters,
            player_luck: player.luck,
        };
        let fresh = generator.tiles(&ctx, empties.len(), &mut rng);
        for ((row, col), tile_type) in empties.into_iter().zip(fresh) {
            tiles[row][col] = Tile::new(tile_type);
        }

        let mut board = Self::from_tiles(tiles, Box::new(generator), rng)?;
        board.tutorial = level.tutorial;
        board.gold_multiplier = level.gold_multiplier;
        Ok(board)
    }

    #[must_use]
    pub fn with_tutorial(mut self, tutorial: bool) -> Self {
        self.tutorial = tutorial;
        self
    }

    #[must_use]
    pub fn with_gold_multiplier(mut self, gold_multiplier: u32) -> Self {
        self.gold_multiplier = gold_multiplier;
        self
    }

    pub const fn size(&self) -> usize {
        self.size
    }

    pub fn tiles(&self) -> &[Vec<Tile>] {
        &self.tiles
    }

    pub fn tile(&self, coord: TileCoord) -> Option<&Tile> {
        let (row, col) = coord.index(self.size)?;
        Some(&self.tiles[row][col])
    }

    pub fn tile_type(&self, coord: TileCoord) -> Option<&TileType> {
        self.tile(coord).map(|tile| &tile.tile_type)
    }

    pub const fn player_coord(&self) -> Option<TileCoord> {
        self.player
    }

    pub const fn exit_coord(&self) -> Option<TileCoord> {
        self.exit
    }

    pub fn player(&self) -> Option<&EntityState> {
        self.tile_type(self.player?)?.entity()
    }

    pub const fn is_tutorial(&self) -> bool {
        self.tutorial
    }

    pub const fn rng(&self) -> &RunRng {
        &self.rng
    }

    pub fn monster_count(&self) -> usize {
        self.tiles
            .iter()
            .flatten()
            .filter(|tile| tile.tile_type.is_monster())
            .count()
    }

    /// Coordinates of every monster, row-major from the bottom row.
    pub fn monsters(&self) -> Vec<(TileCoord, EntityKind)> {
        self.coords()
            .filter_map(|coord| {
                let kind = self.tile_type(coord)?;
                match kind {
                    TileType::Monster(entity) => Some((coord, entity.kind)),
                    _ => None,
                }
            })
            .collect()
    }

    /// A touch input reflecting what is currently at `coord`.
    pub fn touch(&self, coord: TileCoord) -> Option<InputType> {
        Some(InputType::Touch {
            coord,
            tile_type: self.tile_type(coord)?.clone(),
        })
    }

    /// SHA-256 of the bincode-encoded grid. Two runs with the same seed and
    /// inputs must agree on this value after every input.
    #[cfg(feature = "serde")]
    pub fn state_root(&self) -> [u8; 32] {
        use sha2::{Digest, Sha256};

        let mut hasher = Sha256::new();
        for row in &self.tiles {
            if let Ok(bytes) = bincode::serialize(row) {
                hasher.update(&bytes);
            }
        }
        hasher.update(self.rng.draws().to_le_bytes());
        hasher.finalize().into()
    }

    // ===== internal helpers =====

    fn coords(&self) -> impl Iterator<Item = TileCoord> + use<> {
        let size = self.size as i32;
        (0..size).flat_map(move |row| (0..size).map(move |col| TileCoord::new(row, col)))
    }

    fn tile_mut(&mut self, coord: TileCoord) -> Option<&mut Tile> {
        let (row, col) = coord.index(self.size)?;
        Some(&mut self.tiles[row][col])
    }

    fn set(&mut self, coord: TileCoord, tile_type: TileType) {
        if let Some(tile) = self.tile_mut(coord) {
            *tile = Tile::new(tile_type);
        }
    }

    fn entity_at(&self, coord: TileCoord) -> Result<&EntityState, BoardError> {
        self.tile_type(coord)
            .and_then(TileType::entity)
            .ok_or_else(|| BoardError::missing_entity(coord))
    }

    /// Replaces the entity at `coord`, keeping its player/monster role.
    fn put_entity(&mut self, coord: TileCoord, entity: EntityState) {
        if let Some(tile) = self.tile_mut(coord) {
            tile.tile_type = match tile.tile_type {
                TileType::Player(_) => TileType::Player(entity),
                _ => TileType::Monster(entity),
            };
        }
    }

    fn swap(&mut self, a: TileCoord, b: TileCoord) {
        let (Some((ar, ac)), Some((br, bc))) = (a.index(self.size), b.index(self.size)) else {
            return;
        };
        let first = core::mem::take(&mut self.tiles[ar][ac]);
        let second = core::mem::replace(&mut self.tiles[br][bc], first);
        self.tiles[ar][ac] = second;
        self.refresh_markers();
    }

    fn clear_flags(&mut self) {
        for tile in self.tiles.iter_mut().flatten() {
            tile.flags = TileFlags::empty();
        }
    }

    fn refresh_markers(&mut self) {
        self.player = None;
        self.exit = None;
        for (row, cols) in self.tiles.iter().enumerate() {
            for (col, tile) in cols.iter().enumerate() {
                let coord = TileCoord::new(row as i32, col as i32);
                match tile.tile_type {
                    TileType::Player(_) => self.player = Some(coord),
                    TileType::Exit { .. } => self.exit = Some(coord),
                    _ => {}
                }
            }
        }
    }

    fn generation_context(&self) -> GenerationContext {
        GenerationContext {
            board_size: self.size,
            monsters_on_board: self.monster_count(),
            player_luck: self.player().map_or(0, |player| player.luck),
        }
    }

    fn snapshot(&self) -> Vec<Vec<Tile>> {
        self.tiles.clone()
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;
    use crate::entity::EntityCatalog;
    use crate::env::{PillarPlacement, monster_ratios};
    use crate::tile::{Color, PillarData};

    #[test]
    fn rejects_ragged_grids() {
        let tiles = vec![vec![Tile::empty(); 3], vec![Tile::empty(); 2], vec![Tile::empty(); 3]];
        let err = Board::from_tiles(
            tiles,
            Box::new(crate::generator::ScriptedTiles::default()),
            RunRng::new(0),
        )
        .unwrap_err();
        assert_eq!(err, BoardError::NotSquare { row: 1, len: 2, size: 3 });
        assert_eq!(err.error_code(), "BOARD_NOT_SQUARE");
    }

    #[test]
    fn tracks_player_and_exit() {
        let player = Tile::new(TileType::Player(EntityState::player(3, 1)));
        let board = board_from_rows(
            vec![
                vec![player, rock(Color::Red), rock(Color::Red)],
                vec![rock(Color::Blue), rock(Color::Blue), rock(Color::Blue)],
                vec![Tile::exit(), rock(Color::Red), rock(Color::Red)],
            ],
            vec![],
        );
        assert_eq!(board.player_coord(), Some(TileCoord::new(2, 0)));
        assert_eq!(board.exit_coord(), Some(TileCoord::new(0, 0)));
        assert!(board.tile(TileCoord::new(3, 0)).is_none());
        assert!(board.tile(TileCoord::new(0, -1)).is_none());
    }

    #[test]
    fn build_places_everything() {
        let mut level = LevelConfig::new(7).with_monsters(
            monster_ratios(&[(EntityKind::Rat, 100)]),
            10,
            20,
        );
        level.starting_monsters = 2;
        level.pillars = vec![PillarPlacement {
            coord: TileCoord::new(3, 3),
            pillar: PillarData {
                color: Color::Red,
                health: 3,
            },
        }];
        level.goals_to_unlock_exit = 0;

        let board = Board::build(&level, EntityCatalog::standard(), EntityState::player(3, 1), 77)
            .expect("valid level");
        assert_eq!(board.size(), 7);
        assert_eq!(board.player_coord().map(|c| c.row), Some(6));
        assert_eq!(board.exit_coord().map(|c| c.row), Some(0));
        assert!(board.tile_type(TileCoord::new(3, 3)).is_some_and(TileType::is_pillar));
        assert!(board.monster_count() >= 2);
        assert!(board.monster_count() <= level.max_monsters().max(2));
        assert!(board.tiles().iter().flatten().all(|tile| !tile.tile_type.is_empty()));
    }

    #[test]
    fn build_is_deterministic() {
        let level = LevelConfig::new(6);
        let a = Board::build(&level, EntityCatalog::standard(), EntityState::player(3, 1), 5)
            .expect("valid level");
        let b = Board::build(&level, EntityCatalog::standard(), EntityState::player(3, 1), 5)
            .expect("valid level");
        assert_eq!(a.tiles(), b.tiles());
    }

    #[test]
    fn build_keeps_every_pillar() {
        let pillar = PillarData {
            color: Color::Blue,
            health: 3,
        };
        let placements = |cols: std::ops::Range<i32>| {
            cols.map(|col| PillarPlacement {
                coord: TileCoord::new(0, col),
                pillar,
            })
            .collect::<Vec<_>>()
        };

        let blocked = LevelConfig::new(5).with_pillars(placements(0..5));
        let err = Board::build(&blocked, EntityCatalog::standard(), EntityState::player(3, 1), 3)
            .unwrap_err();
        assert_eq!(err, BoardError::Config(ConfigError::RowBlocked { row: 0 }));

        let open = LevelConfig::new(5).with_pillars(placements(1..5));
        let board = Board::build(&open, EntityCatalog::standard(), EntityState::player(3, 1), 3)
            .expect("valid level");
        assert_eq!(board.exit_coord(), Some(TileCoord::new(0, 0)));
        let pillars = board
            .tiles()
            .iter()
            .flatten()
            .filter(|tile| tile.tile_type.is_pillar())
            .count();
        assert_eq!(pillars, 4);
    }

    #[test]
    fn build_rejects_bad_config() {
        let err = Board::build(
            &LevelConfig::new(40),
            EntityCatalog::standard(),
            EntityState::player(3, 1),
            1,
        )
        .unwrap_err();
        assert_eq!(err.severity(), ErrorSeverity::Fatal);
    }
}
