use dogfight_core::{
    BehaviorState, ConfigError, ControllerConfig, GridOracle, ScriptedSource, TileCoord,
};
use dogfight_system_goals::{GoalMarker, GoalOutcome, GoalRequest};
use dogfight_world::Board;

const SHIP: TileCoord = TileCoord::new(2, 2);
const TARGET: TileCoord = TileCoord::new(10, 10);

fn marker() -> GoalMarker {
    GoalMarker::new(&ControllerConfig::default()).expect("default tuning is valid")
}

fn request(state: BehaviorState, ticks: u64) -> GoalRequest {
    GoalRequest {
        state,
        ship_tile: SHIP,
        target_tile: Some(TARGET),
        ticks,
    }
}

fn sorted(mut tiles: Vec<TileCoord>) -> Vec<TileCoord> {
    tiles.sort();
    tiles
}

fn tiles(coords: &[(i32, i32)]) -> Vec<TileCoord> {
    sorted(
        coords
            .iter()
            .map(|&(column, row)| TileCoord::new(column, row))
            .collect(),
    )
}

#[test]
fn spawn_falls_back_to_own_tile() {
    let mut board = Board::open(20, 20, 1.0);
    let mut source = ScriptedSource::new(vec![0]);

    let outcome = marker().mark(&mut board, request(BehaviorState::Spawn, 10), &mut source);

    assert_eq!(
        outcome,
        GoalOutcome {
            marked: 0,
            fell_back: true
        }
    );
    assert_eq!(board.goals(), vec![SHIP]);
}

#[test]
fn chase_ring_branch_marks_tiles_just_inside_attack_range() {
    let mut board = Board::open(20, 20, 1.0);
    let mut source = ScriptedSource::new(vec![0]);

    let outcome = marker().mark(&mut board, request(BehaviorState::Chase, 20), &mut source);

    assert_eq!(outcome.marked, 4);
    assert_eq!(
        sorted(board.goals()),
        tiles(&[(13, 10), (7, 10), (10, 7), (10, 13)])
    );
}

#[test]
fn chase_adjacent_branch_closes_distance() {
    let mut board = Board::open(20, 20, 1.0);
    let mut source = ScriptedSource::new(vec![1]);

    let _ = marker().mark(&mut board, request(BehaviorState::Chase, 20), &mut source);

    assert_eq!(
        sorted(board.goals()),
        tiles(&[(11, 10), (9, 10), (10, 9), (10, 11)])
    );
}

#[test]
fn chase_skips_unsafe_candidates() {
    let mut board = Board::open(20, 20, 1.0);
    board.set_safe(TileCoord::new(13, 10), false);
    board.set_safe(TileCoord::new(10, 7), false);
    let mut source = ScriptedSource::new(vec![0]);

    let outcome = marker().mark(&mut board, request(BehaviorState::Chase, 20), &mut source);

    assert_eq!(outcome.marked, 2);
    assert!(!outcome.fell_back);
    assert_eq!(sorted(board.goals()), tiles(&[(7, 10), (10, 13)]));
}

#[test]
fn attack_ring_offsets_stay_asymmetric() {
    let mut board = Board::open(20, 20, 1.0);
    let mut source = ScriptedSource::new(vec![0]);

    let _ = marker().mark(&mut board, request(BehaviorState::Attack, 30), &mut source);

    // +x / +y use attack_distance - 1, -x / -y use attack_distance + 1.
    assert_eq!(
        sorted(board.goals()),
        tiles(&[(13, 10), (5, 10), (10, 5), (10, 13)])
    );
}

#[test]
fn attack_adjacent_branch_matches_chase() {
    let mut board = Board::open(20, 20, 1.0);
    let mut source = ScriptedSource::new(vec![1]);

    let _ = marker().mark(&mut board, request(BehaviorState::Attack, 30), &mut source);

    assert_eq!(
        sorted(board.goals()),
        tiles(&[(11, 10), (9, 10), (10, 9), (10, 11)])
    );
}

#[test]
fn chase_without_target_holds_position() {
    let mut board = Board::open(20, 20, 1.0);
    let mut source = ScriptedSource::new(vec![0]);
    let request = GoalRequest {
        target_tile: None,
        ..request(BehaviorState::Chase, 20)
    };

    let outcome = marker().mark(&mut board, request, &mut source);

    assert!(outcome.fell_back);
    assert_eq!(board.goals(), vec![SHIP]);
    assert_eq!(source.draws(), 0);
}

#[test]
fn wander_picks_neighbour_on_cycle_and_sticks_to_it() {
    let mut board = Board::open(20, 20, 1.0);
    let mut marker = marker();
    // Index 0 of the +x, -x, +y, -y order: step right.
    let mut source = ScriptedSource::new(vec![0]);

    let _ = marker.mark(&mut board, request(BehaviorState::Wander, 30), &mut source);
    assert_eq!(board.goals(), vec![TileCoord::new(3, 2)]);
    assert_eq!(marker.last_wander_destination(), Some(TileCoord::new(3, 2)));

    board.clear_marks();
    let _ = marker.mark(&mut board, request(BehaviorState::Wander, 40), &mut source);
    assert_eq!(board.goals(), vec![TileCoord::new(3, 2)]);
    assert_eq!(source.draws(), 1, "remembered destination needs no draw");
}

#[test]
fn wander_on_cycle_does_not_try_other_directions() {
    let mut board = Board::open(20, 20, 1.0);
    board.set_safe(TileCoord::new(2, 1), false);
    let mut marker = marker();
    // Index 3: step up, onto the hole.
    let mut source = ScriptedSource::new(vec![3]);

    let outcome = marker.mark(&mut board, request(BehaviorState::Wander, 60), &mut source);

    assert!(outcome.fell_back);
    assert_eq!(board.goals(), vec![SHIP]);
    assert_eq!(marker.last_wander_destination(), None);
}

#[test]
fn wander_off_cycle_heads_for_board_center_first() {
    let mut board = Board::open(20, 20, 1.0);
    let mut source = ScriptedSource::new(vec![0]);

    let _ = marker().mark(&mut board, request(BehaviorState::Wander, 10), &mut source);

    assert_eq!(board.goals(), vec![TileCoord::new(10, 10)]);
    assert_eq!(source.draws(), 0);
}

#[test]
fn wander_off_cycle_redraws_when_remembered_tile_is_unsafe() {
    let mut board = Board::open(20, 20, 1.0);
    board.set_safe(board.center(), false);
    let mut marker = marker();
    // Index 2: step down.
    let mut source = ScriptedSource::new(vec![2]);

    let _ = marker.mark(&mut board, request(BehaviorState::Wander, 20), &mut source);

    assert_eq!(board.goals(), vec![TileCoord::new(2, 3)]);
    assert_eq!(marker.last_wander_destination(), Some(TileCoord::new(2, 3)));
}

#[test]
fn every_state_marks_a_goal_when_boxed_in() {
    let mut board = Board::from_layout(
        "
        #####
        #####
        ##.##
        #####
        #####
        ",
        1.0,
    )
    .expect("valid layout");
    let ship = TileCoord::new(2, 2);

    let states = [
        BehaviorState::Spawn,
        BehaviorState::Wander,
        BehaviorState::Chase,
        BehaviorState::Attack,
    ];
    for state in states {
        for ticks in [10, 30] {
            for choice in 0..4 {
                board.clear_marks();
                let mut source = ScriptedSource::new(vec![choice]);
                let mut marker = marker();
                let request = GoalRequest {
                    state,
                    ship_tile: ship,
                    target_tile: Some(TileCoord::new(0, 0)),
                    ticks,
                };

                let _ = marker.mark(&mut board, request, &mut source);

                assert!(
                    !board.goals().is_empty(),
                    "{state:?} at tick {ticks} with choice {choice} marked nothing"
                );
            }
        }
    }
}

#[test]
fn zero_wander_interval_is_rejected_up_front() {
    let config = ControllerConfig {
        wander_interval: 0,
        ..ControllerConfig::default()
    };

    let error = GoalMarker::new(&config).expect_err("zero interval rejected");

    assert_eq!(
        error,
        ConfigError::ZeroInterval {
            field: "wander_interval"
        }
    );
}
