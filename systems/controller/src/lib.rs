#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! AI controller that turns a ship's observations into controls.
//!
//! Every `replan_interval` ticks the controller runs a decision cycle: the
//! behaviour machine picks a state, the goal marker flags destinations inside
//! a [`PlanningPass`], and the path search converts them into a movement.
//! Between cycles the last movement is repeated. The fire bit is evaluated on
//! every tick.

use dogfight_core::{
    BehaviorState, Control, ControllerConfig, ControllerError, FleetView, GridOracle,
    InputController, PlanningPass, RandomSource, ShipId, TileCoord,
};
use dogfight_system_behavior::{BehaviorMachine, Situation};
use dogfight_system_goals::{GoalMarker, GoalRequest};
use dogfight_system_pathfinding::PathSearch;
use tracing::{trace, warn};

/// Controller for a single non-player ship.
#[derive(Debug)]
pub struct AiController<R> {
    ship: ShipId,
    ticks: u64,
    replan_interval: u64,
    machine: BehaviorMachine,
    goals: GoalMarker,
    search: PathSearch,
    movement: Control,
    last_path: Option<Vec<TileCoord>>,
    source: R,
}

impl<R: RandomSource> AiController<R> {
    /// Creates a controller for `ship` and selects its initial target.
    ///
    /// Fails when the tuning is unusable or the ship is not in the roster.
    pub fn new<G>(
        ship: ShipId,
        board: &G,
        fleet: &FleetView,
        config: &ControllerConfig,
        mut source: R,
    ) -> Result<Self, ControllerError>
    where
        G: GridOracle + ?Sized,
    {
        let mut machine = BehaviorMachine::new(config)?;
        let goals = GoalMarker::new(config)?;
        if fleet.get(ship).is_none() {
            return Err(ControllerError::UnknownShip { ship });
        }

        machine.acquire_target(
            &Situation {
                ship,
                ticks: 0,
                board,
                fleet,
            },
            &mut source,
        );

        Ok(Self {
            ship,
            ticks: 0,
            replan_interval: config.replan_interval,
            machine,
            goals,
            search: PathSearch::new(),
            movement: Control::NO_ACTION,
            last_path: None,
            source,
        })
    }

    /// Ship driven by this controller.
    #[must_use]
    pub const fn ship(&self) -> ShipId {
        self.ship
    }

    /// Number of times the controller has been polled.
    #[must_use]
    pub const fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Current behaviour state.
    #[must_use]
    pub const fn state(&self) -> BehaviorState {
        self.machine.state()
    }

    /// Ship currently pursued.
    #[must_use]
    pub const fn target(&self) -> Option<ShipId> {
        self.machine.target()
    }

    /// Path found by the most recent decision cycle, if it reached a goal.
    #[must_use]
    pub fn last_path(&self) -> Option<&[TileCoord]> {
        self.last_path.as_deref()
    }

    fn plan<G>(&mut self, board: &mut G, fleet: &FleetView, ship_tile: TileCoord)
    where
        G: GridOracle + ?Sized,
    {
        let (state, target_tile) = {
            let situation = Situation {
                ship: self.ship,
                ticks: self.ticks,
                board: &*board,
                fleet,
            };
            let state = self.machine.advance(&situation, &mut self.source);
            (state, self.machine.target_tile(&situation))
        };

        let mut pass = PlanningPass::begin(board);
        let marking = self.goals.mark(
            &mut *pass,
            GoalRequest {
                state,
                ship_tile,
                target_tile,
                ticks: self.ticks,
            },
            &mut self.source,
        );
        let outcome = self.search.search(&mut *pass, ship_tile);

        self.movement = outcome.first_step();
        trace!(
            ship = self.ship.get(),
            tick = self.ticks,
            state = ?state,
            goals = marking.marked,
            expanded = outcome.expanded,
            movement = ?self.movement,
            "decision cycle"
        );
        self.last_path = outcome.path;
    }
}

impl<G, R> InputController<G> for AiController<R>
where
    G: GridOracle + ?Sized,
    R: RandomSource,
{
    fn action(&mut self, board: &mut G, fleet: &FleetView) -> Control {
        self.ticks += 1;

        let Some(snapshot) = fleet.get(self.ship) else {
            warn!(ship = self.ship.get(), "controlled ship missing from roster");
            return Control::NO_ACTION;
        };
        if !snapshot.active {
            return Control::NO_ACTION;
        }
        let ship_tile = board.tile_at(snapshot.position);

        if self.ticks % self.replan_interval == 0 {
            self.plan(board, fleet, ship_tile);
        }

        let mut action = self.movement;
        if self.machine.state() == BehaviorState::Attack {
            let situation = Situation {
                ship: self.ship,
                ticks: self.ticks,
                board: &*board,
                fleet,
            };
            if self.machine.can_shoot_target(&situation) {
                action |= Control::FIRE;
            }
        }
        action
    }
}

/// Controller that never moves or fires, used for the human-controlled ship
/// in headless runs.
#[derive(Clone, Copy, Debug, Default)]
pub struct HoldPosition;

impl<G: GridOracle + ?Sized> InputController<G> for HoldPosition {
    fn action(&mut self, _board: &mut G, _fleet: &FleetView) -> Control {
        Control::NO_ACTION
    }
}
