//! End-to-end board scenarios: a rule consequence is read off the referee,
//! applied to the board, and the result checked against the rules.

use downfall_core::{
    AttackOutcome, Board, Color, EntityCatalog, EntityKind, EntityState, GoalTarget, InputType,
    Item, LevelGoal, LevelGoalTracker, MatchedGroup, Referee, RunRng, ScriptedTiles, Tile,
    TileCoord, TileType,
};

fn rock(color: Color) -> Tile {
    Tile::rock(color)
}

fn player() -> Tile {
    Tile::new(TileType::Player(EntityState::player(3, 1)))
}

fn rat(hp: i32) -> Tile {
    let mut rat = EntityCatalog::standard().spawn(EntityKind::Rat).unwrap();
    rat.hp = hp;
    Tile::new(TileType::Monster(rat))
}

/// Rows are written top-down, the way the board reads on screen.
fn board(rows: Vec<Vec<Tile>>, script: Vec<TileType>) -> Board {
    let tiles = rows.into_iter().rev().collect();
    Board::from_tiles(tiles, Box::new(ScriptedTiles::new(script)), RunRng::new(42)).unwrap()
}

fn entity(board: &Board, coord: TileCoord) -> EntityState {
    board.tile_type(coord).and_then(TileType::entity).cloned().unwrap()
}

fn no_gaps(board: &Board) -> bool {
    board.tiles().iter().flatten().all(|tile| !tile.tile_type.is_empty())
}

// ================================================================
// Matching
// ================================================================

#[test]
fn test_match_three_scenario() {
    let mut board = board(
        vec![
            vec![player(), rock(Color::Red), rock(Color::Blue)],
            vec![rock(Color::Blue), rock(Color::Green), rock(Color::Blue)],
            vec![rock(Color::Red), rock(Color::Red), rock(Color::Red)],
        ],
        vec![TileType::rock(Color::Purple)],
    );

    let transformation = board.handle(&board.touch(TileCoord::new(0, 1)).unwrap()).unwrap().unwrap();

    assert_eq!(transformation.removed.len(), 3);
    assert_eq!(transformation.new_tiles.len(), 3);
    assert_eq!(
        transformation.matched,
        Some(MatchedGroup {
            color: Color::Red,
            size: 3
        })
    );
    assert!(no_gaps(&board));
    assert_eq!(board.player_coord(), Some(TileCoord::new(1, 0)));
    for col in 0..3 {
        assert_eq!(
            board.tile_type(TileCoord::new(2, col)),
            Some(&TileType::rock(Color::Purple))
        );
    }
    assert_eq!(transformation.end_tiles, board.tiles());
}

#[test]
fn test_small_and_stale_touches_are_ignored() {
    let mut board = board(
        vec![
            vec![player(), rock(Color::Red), rock(Color::Blue)],
            vec![rock(Color::Blue), rock(Color::Green), rock(Color::Blue)],
            vec![rock(Color::Red), rock(Color::Red), rock(Color::Red)],
        ],
        vec![],
    );
    let before = board.tiles().to_vec();

    let small = board.touch(TileCoord::new(1, 1)).unwrap();
    assert_eq!(board.handle(&small), Ok(None));

    let stale = InputType::Touch {
        coord: TileCoord::new(0, 0),
        tile_type: TileType::rock(Color::Blue),
    };
    assert_eq!(board.handle(&stale), Ok(None));
    assert_eq!(board.touch(TileCoord::new(9, 9)), None);
    assert_eq!(board.tiles(), before.as_slice());
}

// ================================================================
// Combat
// ================================================================

#[test]
fn test_combat_scenario() {
    let mut board = board(
        vec![
            vec![rock(Color::Blue), rock(Color::Blue), rock(Color::Blue)],
            vec![rock(Color::Red), player(), rock(Color::Green)],
            vec![rock(Color::Green), rat(2), rock(Color::Red)],
        ],
        vec![],
    );

    let attack = Referee::enforce_rules(board.tiles()).unwrap();
    assert_eq!(
        attack,
        InputType::Attack {
            attacker: TileCoord::new(1, 1),
            defender: Some(TileCoord::new(0, 1)),
        }
    );

    let transformation = board.handle(&attack).unwrap().unwrap();
    let outcome = &transformation.combat[0];
    assert_eq!(outcome.outcome, Some(AttackOutcome::Hit));
    assert_eq!(outcome.damage, 1);
    assert_eq!(entity(&board, TileCoord::new(0, 1)).hp, 1);

    // The player has spent its attack; the rat faces away from the player.
    assert_eq!(Referee::enforce_rules(board.tiles()), None);

    let finished = board
        .handle(&InputType::ReffingFinished { new_turn: true })
        .unwrap()
        .unwrap();
    assert!(!finished.has_tile_changes());
    assert!(entity(&board, TileCoord::new(1, 1)).can_attack());
}

#[test]
fn test_monster_attacks_player() {
    let mut board = board(
        vec![
            vec![rock(Color::Blue), rat(2), rock(Color::Blue)],
            vec![rock(Color::Red), player(), rock(Color::Green)],
            vec![rock(Color::Green), rock(Color::Green), rock(Color::Green)],
        ],
        vec![],
    );

    let attack = Referee::enforce_rules(board.tiles()).unwrap();
    board.handle(&attack).unwrap();

    assert_eq!(entity(&board, TileCoord::new(1, 1)).hp, 2);
    assert!(!entity(&board, TileCoord::new(2, 1)).can_attack());
}

#[test]
fn test_only_a_new_turn_rearms_monsters() {
    let mut board = board(
        vec![
            vec![rock(Color::Blue), rat(2), rock(Color::Blue)],
            vec![rock(Color::Red), player(), rock(Color::Green)],
            vec![rock(Color::Green), rock(Color::Green), rock(Color::Green)],
        ],
        vec![],
    );
    let attack = Referee::enforce_rules(board.tiles()).unwrap();
    board.handle(&attack).unwrap();

    let inspect = board.touch(TileCoord::new(2, 1)).unwrap();
    assert!(inspect.is_inspection());
    let highlighted = board.handle(&inspect).unwrap().unwrap();
    assert!(!highlighted.has_tile_changes());

    board.handle(&InputType::ReffingFinished { new_turn: false }).unwrap();
    assert!(!entity(&board, TileCoord::new(2, 1)).can_attack());
    assert_ne!(Referee::enforce_rules(board.tiles()), Some(attack));

    board.handle(&InputType::ReffingFinished { new_turn: true }).unwrap();
    assert!(entity(&board, TileCoord::new(2, 1)).can_attack());
    assert_eq!(entity(&board, TileCoord::new(1, 1)).hp, 2);
}

#[test]
fn test_attack_without_entity_is_an_error() {
    let mut board = board(vec![vec![rock(Color::Blue); 3]; 3], vec![]);
    let attack = InputType::Attack {
        attacker: TileCoord::new(1, 1),
        defender: None,
    };
    assert!(board.handle(&attack).is_err());
}

// ================================================================
// Monster death and loot
// ================================================================

#[test]
fn test_monster_death_scenario() {
    let mut board = board(
        vec![
            vec![rock(Color::Red), player(), rock(Color::Blue)],
            vec![rock(Color::Green), rat(0), rock(Color::Red)],
            vec![
                rock(Color::Blue),
                Tile::new(TileType::Exit { blocked: true }),
                rock(Color::Green),
            ],
        ],
        vec![TileType::rock(Color::Purple)],
    );

    let dies = Referee::enforce_rules(board.tiles()).unwrap();
    assert_eq!(
        dies,
        InputType::MonsterDies {
            coord: TileCoord::new(1, 1),
            kind: EntityKind::Rat,
        }
    );
    board.handle(&dies).unwrap();
    assert_eq!(
        board.tile_type(TileCoord::new(1, 1)),
        Some(&TileType::Item(Item::gold(1)))
    );

    let collect = Referee::enforce_rules(board.tiles()).unwrap();
    assert_eq!(
        collect,
        InputType::CollectItem {
            coord: TileCoord::new(1, 1),
            item: Item::gold(1),
        }
    );
    let transformation = board.handle(&collect).unwrap().unwrap();
    assert_eq!(transformation.removed.len(), 1);
    assert_eq!(board.player_coord(), Some(TileCoord::new(1, 1)));
    assert_eq!(board.player().map(|player| player.carry.gold), Some(1));
    assert!(no_gaps(&board));

    // Standing on a locked exit is not a win.
    assert_ne!(Referee::enforce_rules(board.tiles()), Some(InputType::GameWin));
}

#[test]
fn test_gold_multiplier_can_zero_the_drop() {
    let mut board = board(
        vec![
            vec![rock(Color::Red), player(), rock(Color::Blue)],
            vec![rock(Color::Green), rat(0), rock(Color::Red)],
            vec![rock(Color::Blue), rock(Color::Blue), rock(Color::Green)],
        ],
        vec![TileType::rock(Color::Purple)],
    )
    .with_gold_multiplier(50);

    let dies = Referee::enforce_rules(board.tiles()).unwrap();
    let transformation = board.handle(&dies).unwrap().unwrap();
    assert_eq!(transformation.removed.len(), 1);
    assert_eq!(board.monster_count(), 0);
}

// ================================================================
// Goals, exit and winning
// ================================================================

#[test]
fn test_goal_completion_scenario() {
    let mut board = board(
        vec![
            vec![player(), rock(Color::Red), rock(Color::Blue), rock(Color::Red), rock(Color::Blue)],
            vec![rock(Color::Red), rock(Color::Blue), rock(Color::Red), rock(Color::Blue), rock(Color::Red)],
            vec![rock(Color::Purple), rock(Color::Purple), rock(Color::Purple), rock(Color::Blue), rock(Color::Red)],
            vec![rock(Color::Red), rock(Color::Blue), rock(Color::Red), rock(Color::Blue), rock(Color::Red)],
            vec![rock(Color::Purple); 5],
        ],
        vec![TileType::rock(Color::Purple)],
    );
    let goal = LevelGoal::new(GoalTarget::Rock(Color::Purple), 10, Item::gem(2)).in_groups_of(5);
    let mut tracker = LevelGoalTracker::new(&[goal], 1);

    let mut mine = |board: &mut Board, coord: TileCoord| {
        let touch = board.touch(coord).unwrap();
        let transformation = board.handle(&touch).unwrap().unwrap();
        tracker.observe(&transformation);
        transformation.matched.map(|group| group.size)
    };

    assert_eq!(mine(&mut board, TileCoord::new(0, 0)), Some(5));
    assert_eq!(mine(&mut board, TileCoord::new(1, 0)), Some(3));
    assert_eq!(mine(&mut board, TileCoord::new(4, 4)), Some(8));

    assert_eq!(tracker.tracking()[0].current, 10);
    assert_eq!(
        tracker.check_for_completed_goals(),
        Some(InputType::PlayerAwarded { reward: Item::gem(2) })
    );
    assert_eq!(tracker.check_for_completed_goals(), Some(InputType::UnlockExit));
    assert_eq!(tracker.check_for_completed_goals(), None);
}

#[test]
fn test_unlock_and_win() {
    let mut board = board(
        vec![
            vec![rock(Color::Blue), rock(Color::Blue), rock(Color::Blue)],
            vec![rock(Color::Red), player(), rock(Color::Green)],
            vec![
                rock(Color::Green),
                Tile::new(TileType::Exit { blocked: true }),
                rock(Color::Red),
            ],
        ],
        vec![],
    );
    assert_ne!(Referee::enforce_rules(board.tiles()), Some(InputType::GameWin));

    board.handle(&InputType::UnlockExit).unwrap().unwrap();
    assert_eq!(
        board.tile_type(TileCoord::new(0, 1)),
        Some(&TileType::Exit { blocked: false })
    );

    let win = Referee::enforce_rules(board.tiles()).unwrap();
    assert_eq!(win, InputType::GameWin);
    let transformation = board.handle(&win).unwrap().unwrap();
    assert_eq!(transformation.moved.len(), 1);
    assert_eq!(board.player_coord(), Some(TileCoord::new(0, 1)));
}

#[test]
fn test_award_pays_the_player() {
    let mut board = board(
        vec![
            vec![player(), rock(Color::Blue), rock(Color::Blue)],
            vec![rock(Color::Red), rock(Color::Red), rock(Color::Green)],
            vec![rock(Color::Green), Tile::exit(), rock(Color::Red)],
        ],
        vec![],
    );
    board
        .handle(&InputType::PlayerAwarded { reward: Item::gem(3) })
        .unwrap()
        .unwrap();
    assert_eq!(board.player().map(|player| player.carry.gems), Some(3));
}

// ================================================================
// Rotation
// ================================================================

#[test]
fn test_rotation_moves_every_tile() {
    let mut board = board(
        vec![
            vec![player(), rock(Color::Red), rock(Color::Blue)],
            vec![rock(Color::Red), rock(Color::Green), rock(Color::Red)],
            vec![rock(Color::Green), Tile::exit(), rock(Color::Blue)],
        ],
        vec![],
    );
    let transformation = board.handle(&InputType::RotateLeft).unwrap().unwrap();
    assert_eq!(transformation.moved.len(), 9);
    assert!(transformation.removed.is_empty());
    assert_eq!(board.player_coord(), Some(TileCoord::new(0, 0)));
    assert_eq!(board.exit_coord(), Some(TileCoord::new(1, 2)));

    board.handle(&InputType::RotateRight).unwrap();
    assert_eq!(board.player_coord(), Some(TileCoord::new(2, 0)));
}
