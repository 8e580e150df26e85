#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Behaviour state machine that decides whether a ship wanders, chases or
//! attacks, together with the shot eligibility checks it relies on.

mod shooting;

use dogfight_core::{
    BehaviorState, ConfigError, ControllerConfig, FleetView, GridOracle, RandomSource, ShipId,
    TileCoord,
};
use dogfight_system_targeting::TargetSelector;
use tracing::debug;

pub use shooting::{can_shoot_from, can_shoot_target};

/// Observations available to the state machine during one decision cycle.
#[derive(Debug)]
pub struct Situation<'a, G: GridOracle + ?Sized> {
    /// Ship being controlled.
    pub ship: ShipId,
    /// Controller tick at which the decision cycle runs.
    pub ticks: u64,
    /// Board used for tile conversion and power-tile queries.
    pub board: &'a G,
    /// Roster of every ship in the arena.
    pub fleet: &'a FleetView,
}

/// Finite state machine holding a ship's behaviour state and its target.
#[derive(Debug)]
pub struct BehaviorMachine {
    state: BehaviorState,
    target: Option<ShipId>,
    selector: TargetSelector,
    chase_distance: i32,
    attack_distance: i32,
    wander_retarget_interval: u64,
    chase_retarget_interval: u64,
    attack_retarget_interval: u64,
}

impl BehaviorMachine {
    /// Creates a machine in the [`BehaviorState::Spawn`] state without a target.
    ///
    /// Fails when the tuning has a zero retarget interval or a non-positive
    /// distance.
    pub fn new(config: &ControllerConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            state: BehaviorState::Spawn,
            target: None,
            selector: TargetSelector::new(config),
            chase_distance: config.chase_distance,
            attack_distance: config.attack_distance,
            wander_retarget_interval: config.wander_retarget_interval,
            chase_retarget_interval: config.chase_retarget_interval,
            attack_retarget_interval: config.attack_retarget_interval,
        })
    }

    /// Current behaviour state.
    #[must_use]
    pub const fn state(&self) -> BehaviorState {
        self.state
    }

    /// Ship currently pursued, which may have become inactive since it was chosen.
    #[must_use]
    pub const fn target(&self) -> Option<ShipId> {
        self.target
    }

    /// Runs target selection once, as done when a controller is created.
    pub fn acquire_target<G>(&mut self, situation: &Situation<'_, G>, source: &mut dyn RandomSource)
    where
        G: GridOracle + ?Sized,
    {
        self.retarget(situation, source);
    }

    /// Evaluates the transition rules for the current state and returns the
    /// state that is active afterwards.
    pub fn advance<G>(
        &mut self,
        situation: &Situation<'_, G>,
        source: &mut dyn RandomSource,
    ) -> BehaviorState
    where
        G: GridOracle + ?Sized,
    {
        let previous = self.state;
        self.state = match previous {
            BehaviorState::Spawn => BehaviorState::Wander,
            BehaviorState::Wander => {
                self.refresh_target(situation, self.wander_retarget_interval, source);
                if self.target_in_chase_range(situation) {
                    BehaviorState::Chase
                } else {
                    BehaviorState::Wander
                }
            }
            BehaviorState::Chase => {
                self.refresh_target(situation, self.chase_retarget_interval, source);
                let mut next = BehaviorState::Chase;
                if self.can_shoot_target(situation) {
                    next = BehaviorState::Attack;
                }
                if !self.target_in_chase_range(situation) {
                    next = BehaviorState::Wander;
                }
                next
            }
            BehaviorState::Attack => {
                self.refresh_target(situation, self.attack_retarget_interval, source);
                if self.can_shoot_target(situation) {
                    BehaviorState::Attack
                } else {
                    BehaviorState::Chase
                }
            }
        };

        if self.state != previous {
            debug!(
                ship = situation.ship.get(),
                tick = situation.ticks,
                from = ?previous,
                to = ?self.state,
                "behavior transition"
            );
        }
        self.state
    }

    /// Reports whether the ship can fire now and would hit its target.
    #[must_use]
    pub fn can_shoot_target<G>(&self, situation: &Situation<'_, G>) -> bool
    where
        G: GridOracle + ?Sized,
    {
        can_shoot_target(
            situation.board,
            situation.fleet,
            situation.ship,
            self.target,
            self.attack_distance,
        )
    }

    /// Tile of the current target, provided it is still active.
    #[must_use]
    pub fn target_tile<G>(&self, situation: &Situation<'_, G>) -> Option<TileCoord>
    where
        G: GridOracle + ?Sized,
    {
        active_target_tile(situation.board, situation.fleet, self.target)
    }

    fn refresh_target<G>(
        &mut self,
        situation: &Situation<'_, G>,
        interval: u64,
        source: &mut dyn RandomSource,
    ) where
        G: GridOracle + ?Sized,
    {
        let stale = self
            .target
            .map_or(true, |target| !situation.fleet.is_active(target));
        if stale {
            self.retarget(situation, source);
        }
        if situation.ticks % interval == 0 {
            self.retarget(situation, source);
        }
    }

    fn retarget<G>(&mut self, situation: &Situation<'_, G>, source: &mut dyn RandomSource)
    where
        G: GridOracle + ?Sized,
    {
        self.target = self.selector.select(
            situation.ship,
            self.target,
            situation.fleet,
            situation.board,
            source,
        );
    }

    fn target_in_chase_range<G>(&self, situation: &Situation<'_, G>) -> bool
    where
        G: GridOracle + ?Sized,
    {
        let Some(ship) = situation.fleet.get(situation.ship) else {
            return false;
        };
        let Some(target) = self.target_tile(situation) else {
            return false;
        };
        situation
            .board
            .tile_at(ship.position)
            .within_box(target, self.chase_distance)
    }
}

fn active_target_tile<G>(board: &G, fleet: &FleetView, target: Option<ShipId>) -> Option<TileCoord>
where
    G: GridOracle + ?Sized,
{
    let snapshot = fleet.get(target?)?;
    snapshot.active.then(|| board.tile_at(snapshot.position))
}
