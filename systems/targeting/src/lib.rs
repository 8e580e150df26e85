#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that chooses which opposing ship an AI controller pursues.

use dogfight_core::{ControllerConfig, FleetView, GridOracle, RandomSource, ShipId};
use tracing::debug;

/// Target selector that reuses a scratch buffer of candidates between calls.
#[derive(Debug)]
pub struct TargetSelector {
    retarget_distance: i32,
    crowded_fleet_size: usize,
    candidates: Vec<ShipId>,
}

impl TargetSelector {
    /// Creates a selector using the distances from the provided tuning.
    #[must_use]
    pub fn new(config: &ControllerConfig) -> Self {
        Self {
            retarget_distance: config.retarget_distance(),
            crowded_fleet_size: config.crowded_fleet_size,
            candidates: Vec::new(),
        }
    }

    /// Chooses the target `ship` should pursue next.
    ///
    /// * Without a current target, or when it is no longer active, a new one
    ///   is drawn uniformly from every other active ship.
    /// * In rosters larger than the crowded threshold, the first active ship in
    ///   roster order inside the extended proximity box replaces the target.
    /// * In smaller rosters the player is preferred while it is active.
    ///
    /// When no candidate qualifies the current target is returned unchanged,
    /// even if it is stale, so callers must keep checking its activity.
    #[must_use]
    pub fn select<G>(
        &mut self,
        ship: ShipId,
        current: Option<ShipId>,
        fleet: &FleetView,
        board: &G,
        source: &mut dyn RandomSource,
    ) -> Option<ShipId>
    where
        G: GridOracle + ?Sized,
    {
        self.prepare_candidates(ship, fleet);

        let stale = current.map_or(true, |target| !fleet.is_active(target));
        let selected = if stale {
            self.draw(source).or(current)
        } else if fleet.len() > self.crowded_fleet_size {
            self.closest_in_roster_order(ship, fleet, board).or(current)
        } else {
            match fleet.player() {
                Some(player) if player.active && player.id != ship => Some(player.id),
                _ => current,
            }
        };

        if selected != current {
            debug!(
                ship = ship.get(),
                previous = ?current.map(|target| target.get()),
                target = ?selected.map(|target| target.get()),
                "target changed"
            );
        }
        selected
    }

    fn prepare_candidates(&mut self, ship: ShipId, fleet: &FleetView) {
        self.candidates.clear();
        self.candidates.extend(
            fleet
                .iter()
                .filter(|snapshot| snapshot.active && snapshot.id != ship)
                .map(|snapshot| snapshot.id),
        );
    }

    fn draw(&self, source: &mut dyn RandomSource) -> Option<ShipId> {
        if self.candidates.is_empty() {
            return None;
        }
        let index = source.next_index(self.candidates.len());
        self.candidates.get(index).copied()
    }

    fn closest_in_roster_order<G>(&self, ship: ShipId, fleet: &FleetView, board: &G) -> Option<ShipId>
    where
        G: GridOracle + ?Sized,
    {
        let origin = board.tile_at(fleet.get(ship)?.position);
        self.candidates.iter().copied().find(|candidate| {
            fleet.get(*candidate).is_some_and(|snapshot| {
                origin.within_box(board.tile_at(snapshot.position), self.retarget_distance)
            })
        })
    }
}
