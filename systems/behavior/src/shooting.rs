//! Shot eligibility checks.

use dogfight_core::{FleetView, GridOracle, ShipId, TileCoord};

/// Reports whether a shot fired from `from` would reach `target`.
///
/// From a power tile the target only has to lie inside the square box of
/// half-width `attack_distance`. Anywhere else the shot travels along a single
/// axis, so the target must share the row or the column and be closer than
/// `attack_distance` along it.
#[must_use]
pub fn can_shoot_from<G>(board: &G, from: TileCoord, target: TileCoord, attack_distance: i32) -> bool
where
    G: GridOracle + ?Sized,
{
    if board.is_power_tile_at(from) {
        return from.within_box(target, attack_distance);
    }

    let range = i64::from(attack_distance);
    let columns = (i64::from(target.column()) - i64::from(from.column())).abs();
    let rows = (i64::from(target.row()) - i64::from(from.row())).abs();
    (rows == 0 && columns < range) || (columns == 0 && rows < range)
}

/// Reports whether `ship` can fire right now and would hit its target.
///
/// Missing or inactive targets can never be shot.
#[must_use]
pub fn can_shoot_target<G>(
    board: &G,
    fleet: &FleetView,
    ship: ShipId,
    target: Option<ShipId>,
    attack_distance: i32,
) -> bool
where
    G: GridOracle + ?Sized,
{
    let Some(shooter) = fleet.get(ship) else {
        return false;
    };
    if !shooter.can_fire {
        return false;
    }
    let Some(target_tile) = crate::active_target_tile(board, fleet, target) else {
        return false;
    };
    can_shoot_from(board, board.tile_at(shooter.position), target_tile, attack_distance)
}
