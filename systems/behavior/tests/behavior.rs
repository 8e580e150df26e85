use dogfight_core::{
    BehaviorState, Command, ConfigError, Control, ControllerConfig, FleetView, ScriptedSource,
    ShipId, TileCoord,
};
use dogfight_system_behavior::{can_shoot_from, can_shoot_target, BehaviorMachine, Situation};
use dogfight_world::{self as world, query, ArenaSettings, Board, World};

const PLAYER: ShipId = ShipId::new(0);
const HUNTER: ShipId = ShipId::new(1);

fn arena(player: (i32, i32), hunter: (i32, i32)) -> World {
    let mut world = World::new(Board::open(30, 30, 10.0), ArenaSettings::default());
    let _ = world
        .spawn_ship(TileCoord::new(player.0, player.1))
        .expect("spawn player");
    let _ = world
        .spawn_ship(TileCoord::new(hunter.0, hunter.1))
        .expect("spawn hunter");
    world
}

fn advance(
    machine: &mut BehaviorMachine,
    world: &World,
    ticks: u64,
    source: &mut ScriptedSource,
) -> BehaviorState {
    let fleet: FleetView = query::fleet_view(world);
    let situation = Situation {
        ship: HUNTER,
        ticks,
        board: query::board(world),
        fleet: &fleet,
    };
    machine.advance(&situation, source)
}

fn primed_machine(world: &World, source: &mut ScriptedSource) -> BehaviorMachine {
    let mut machine = BehaviorMachine::new(&ControllerConfig::default()).expect("valid tuning");
    let fleet = query::fleet_view(world);
    machine.acquire_target(
        &Situation {
            ship: HUNTER,
            ticks: 0,
            board: query::board(world),
            fleet: &fleet,
        },
        source,
    );
    machine
}

fn fire(world: &mut World, ship: ShipId) {
    let mut events = Vec::new();
    world::apply(
        world,
        Command::Steer {
            ship,
            control: Control::FIRE,
        },
        &mut events,
    );
}

#[test]
fn spawn_always_leaves_for_wander() {
    let world = arena((0, 0), (29, 29));
    let mut source = ScriptedSource::new(vec![0]);
    let mut machine = primed_machine(&world, &mut source);

    assert_eq!(machine.state(), BehaviorState::Spawn);
    assert_eq!(machine.target(), Some(PLAYER));
    assert_eq!(advance(&mut machine, &world, 10, &mut source), BehaviorState::Wander);
    assert_eq!(advance(&mut machine, &world, 20, &mut source), BehaviorState::Wander);
}

#[test]
fn wander_chases_target_inside_chase_box() {
    let world = arena((10, 10), (18, 2));
    let mut source = ScriptedSource::new(vec![0]);
    let mut machine = primed_machine(&world, &mut source);

    let _ = advance(&mut machine, &world, 10, &mut source);
    assert_eq!(advance(&mut machine, &world, 20, &mut source), BehaviorState::Chase);
}

#[test]
fn wander_ignores_target_on_chase_box_edge() {
    let world = arena((10, 10), (19, 10));
    let mut source = ScriptedSource::new(vec![0]);
    let mut machine = primed_machine(&world, &mut source);

    let _ = advance(&mut machine, &world, 10, &mut source);
    assert_eq!(advance(&mut machine, &world, 20, &mut source), BehaviorState::Wander);
}

#[test]
fn chase_escalates_to_attack_and_falls_back_when_weapon_cools() {
    let mut world = arena((10, 10), (13, 10));
    let mut source = ScriptedSource::new(vec![0]);
    let mut machine = primed_machine(&world, &mut source);

    let _ = advance(&mut machine, &world, 10, &mut source);
    assert_eq!(advance(&mut machine, &world, 20, &mut source), BehaviorState::Chase);
    assert_eq!(advance(&mut machine, &world, 30, &mut source), BehaviorState::Attack);

    fire(&mut world, HUNTER);
    assert_eq!(advance(&mut machine, &world, 40, &mut source), BehaviorState::Chase);
}

#[test]
fn chase_returns_to_wander_when_target_destroyed_without_replacement() {
    let mut world = arena((10, 10), (14, 10));
    let mut source = ScriptedSource::new(vec![0]);
    let mut machine = primed_machine(&world, &mut source);
    let _ = advance(&mut machine, &world, 10, &mut source);
    let _ = advance(&mut machine, &world, 20, &mut source);
    assert_eq!(machine.state(), BehaviorState::Chase);

    let mut events = Vec::new();
    world::apply(&mut world, Command::DestroyShip { ship: PLAYER }, &mut events);

    assert_eq!(advance(&mut machine, &world, 30, &mut source), BehaviorState::Wander);
    assert_eq!(machine.target(), Some(PLAYER), "stale target is kept");
    assert_eq!(advance(&mut machine, &world, 40, &mut source), BehaviorState::Wander);
}

#[test]
fn wander_periodically_reselects_target() {
    let mut world = World::new(Board::open(60, 60, 10.0), ArenaSettings::default());
    for column in [0, 50, 52, 54] {
        let _ = world
            .spawn_ship(TileCoord::new(column, 0))
            .expect("spawn");
    }
    // Ship 1 is far from ship 0 (the player) but close to ships 2 and 3.
    let fleet = query::fleet_view(&world);
    let mut machine = BehaviorMachine::new(&ControllerConfig::default()).expect("valid tuning");
    let mut source = ScriptedSource::new(vec![0]);
    machine.acquire_target(
        &Situation {
            ship: HUNTER,
            ticks: 0,
            board: query::board(&world),
            fleet: &fleet,
        },
        &mut source,
    );
    assert_eq!(machine.target(), Some(PLAYER));

    let _ = advance(&mut machine, &world, 10, &mut source);
    let _ = advance(&mut machine, &world, 290, &mut source);
    assert_eq!(machine.target(), Some(PLAYER), "no reselection off-cycle");

    let state = advance(&mut machine, &world, 300, &mut source);
    assert_eq!(machine.target(), Some(ShipId::new(2)));
    assert_eq!(state, BehaviorState::Chase);
}

#[test]
fn axis_shots_require_alignment_and_range() {
    let board = Board::open(12, 12, 1.0);
    let from = TileCoord::new(5, 5);

    assert!(can_shoot_from(&board, from, TileCoord::new(8, 5), 4));
    assert!(can_shoot_from(&board, from, TileCoord::new(5, 2), 4));
    assert!(can_shoot_from(&board, from, from, 4));
    assert!(!can_shoot_from(&board, from, TileCoord::new(9, 5), 4));
    assert!(!can_shoot_from(&board, from, TileCoord::new(1, 5), 4));
    assert!(!can_shoot_from(&board, from, TileCoord::new(6, 6), 4));
}

#[test]
fn power_tiles_extend_shots_to_a_square() {
    let mut board = Board::open(12, 12, 1.0);
    let from = TileCoord::new(5, 5);
    board.set_power(from, true);

    assert!(can_shoot_from(&board, from, TileCoord::new(8, 8), 4));
    assert!(can_shoot_from(&board, from, TileCoord::new(2, 7), 4));
    assert!(!can_shoot_from(&board, from, TileCoord::new(9, 6), 4));
}

#[test]
fn adjacent_target_on_power_tile_is_shootable() {
    let mut world = arena((10, 10), (11, 11));
    world.board_mut().set_power(TileCoord::new(11, 11), true);
    let fleet = query::fleet_view(&world);

    assert!(can_shoot_target(
        query::board(&world),
        &fleet,
        HUNTER,
        Some(PLAYER),
        4
    ));
    assert!(!can_shoot_target(query::board(&world), &fleet, HUNTER, None, 4));

    fire(&mut world, HUNTER);
    let fleet = query::fleet_view(&world);
    assert!(!can_shoot_target(
        query::board(&world),
        &fleet,
        HUNTER,
        Some(PLAYER),
        4
    ));
}

/// Crowded roster around the hunter at (20, 20): the player far away, ship 2
/// inside the proximity box but outside chase range, ship 3 at `near`.
fn crowded(near: (i32, i32)) -> World {
    let mut world = World::new(Board::open(60, 60, 10.0), ArenaSettings::default());
    for (column, row) in [(50, 50), (20, 20), (30, 20), near] {
        let _ = world
            .spawn_ship(TileCoord::new(column, row))
            .expect("spawn");
    }
    world
}

#[test]
fn chase_reselects_only_on_its_own_interval() {
    // Five tiles east of the hunter on the same row: chased but out of shot.
    let world = crowded((25, 20));
    // Index 2 among ships 0, 2 and 3 picks ship 3.
    let mut source = ScriptedSource::new(vec![2]);
    let mut machine = primed_machine(&world, &mut source);
    assert_eq!(machine.target(), Some(ShipId::new(3)));

    let _ = advance(&mut machine, &world, 10, &mut source);
    assert_eq!(advance(&mut machine, &world, 20, &mut source), BehaviorState::Chase);

    assert_eq!(advance(&mut machine, &world, 300, &mut source), BehaviorState::Chase);
    assert_eq!(machine.target(), Some(ShipId::new(3)));
    assert_eq!(advance(&mut machine, &world, 590, &mut source), BehaviorState::Chase);
    assert_eq!(machine.target(), Some(ShipId::new(3)));

    // Ship 2 is the first roster entry inside the extended box.
    let state = advance(&mut machine, &world, 600, &mut source);
    assert_eq!(machine.target(), Some(ShipId::new(2)));
    assert_eq!(state, BehaviorState::Wander, "ship 2 is outside chase range");
}

#[test]
fn attack_reselects_every_attack_interval() {
    // Two tiles east on the same row: close enough to shoot.
    let world = crowded((22, 20));
    let mut source = ScriptedSource::new(vec![2]);
    let mut machine = primed_machine(&world, &mut source);
    assert_eq!(machine.target(), Some(ShipId::new(3)));

    let _ = advance(&mut machine, &world, 10, &mut source);
    let _ = advance(&mut machine, &world, 20, &mut source);
    assert_eq!(advance(&mut machine, &world, 30, &mut source), BehaviorState::Attack);
    assert_eq!(advance(&mut machine, &world, 290, &mut source), BehaviorState::Attack);
    assert_eq!(machine.target(), Some(ShipId::new(3)));

    let state = advance(&mut machine, &world, 300, &mut source);
    assert_eq!(machine.target(), Some(ShipId::new(2)));
    assert_eq!(state, BehaviorState::Chase, "ship 2 is out of shot range");
}

#[test]
fn zero_retarget_interval_is_rejected_up_front() {
    let config = ControllerConfig {
        chase_retarget_interval: 0,
        ..ControllerConfig::default()
    };

    let error = BehaviorMachine::new(&config).expect_err("zero interval rejected");

    assert_eq!(
        error,
        ConfigError::ZeroInterval {
            field: "chase_retarget_interval"
        }
    );
}
