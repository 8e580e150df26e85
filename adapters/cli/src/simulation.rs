//! Headless match loop that polls every ship's controller once per tick.

use anyhow::{Context, Result};
use dogfight_core::{Command, Event, FleetView, InputController, SeededSource, ShipId};
use dogfight_system_controller::{AiController, HoldPosition};
use dogfight_world::{self as world, query, Board, World};
use tracing::{debug, info};

use crate::scenario::Scenario;

struct Pilot {
    ship: ShipId,
    controller: Box<dyn InputController<Board>>,
}

/// Tallies collected while the match runs.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct Report {
    /// Ticks simulated so far.
    pub(crate) ticks: u64,
    /// Weapon discharges, hit or miss.
    pub(crate) shots: usize,
    /// Shots that struck a ship.
    pub(crate) hits: usize,
    /// Destroyed ships with the tick at which they left play.
    pub(crate) destroyed: Vec<(ShipId, u64)>,
}

/// Arena plus the controllers steering its ships.
pub(crate) struct Simulation {
    world: World,
    pilots: Vec<Pilot>,
    events: Vec<Event>,
    report: Report,
}

impl Simulation {
    /// Spawns the scenario's ships and attaches a controller to each.
    ///
    /// The first ship is the player and holds its position; every other ship
    /// is flown by an [`AiController`] seeded from the scenario seed and its id.
    pub(crate) fn new(scenario: &Scenario) -> Result<Self> {
        let mut world = World::new(scenario.board()?, scenario.arena_settings());
        let mut ships = Vec::with_capacity(scenario.ships.len());
        for spawn in &scenario.ships {
            let ship = world.spawn_ship(spawn.tile()).with_context(|| {
                format!("failed to spawn ship at ({}, {})", spawn.column, spawn.row)
            })?;
            ships.push(ship);
        }

        let fleet = query::fleet_view(&world);
        let mut pilots = Vec::with_capacity(ships.len());
        for ship in ships {
            let controller: Box<dyn InputController<Board>> = if ship == fleet.player_id() {
                Box::new(HoldPosition)
            } else {
                let source = SeededSource::new(scenario.arena.seed.wrapping_add(u64::from(ship.get())));
                let controller = AiController::new(
                    ship,
                    query::board(&world),
                    &fleet,
                    &scenario.controller,
                    source,
                )
                .with_context(|| format!("failed to create controller for ship {}", ship.get()))?;
                Box::new(controller)
            };
            pilots.push(Pilot { ship, controller });
        }

        Ok(Self {
            world,
            pilots,
            events: Vec::new(),
            report: Report::default(),
        })
    }

    /// Read-only access to the arena.
    #[must_use]
    pub(crate) fn world(&self) -> &World {
        &self.world
    }

    /// Tallies collected so far.
    #[must_use]
    pub(crate) fn report(&self) -> &Report {
        &self.report
    }

    /// Runs up to `ticks` ticks, stopping early once a single ship remains.
    pub(crate) fn run(&mut self, ticks: u64) {
        for _ in 0..ticks {
            if query::active_ships(&self.world).len() < 2 {
                info!(tick = self.report.ticks, "match decided");
                break;
            }
            self.step();
        }
    }

    /// Polls every controller once, applies the controls and advances time.
    pub(crate) fn step(&mut self) {
        for pilot in &mut self.pilots {
            let fleet: FleetView = query::fleet_view(&self.world);
            let control = pilot.controller.action(self.world.board_mut(), &fleet);
            if control.is_empty() {
                continue;
            }
            world::apply(
                &mut self.world,
                Command::Steer {
                    ship: pilot.ship,
                    control,
                },
                &mut self.events,
            );
        }
        world::apply(&mut self.world, Command::Tick, &mut self.events);
        self.report.ticks = query::tick(&self.world);

        for event in self.events.drain(..) {
            match event {
                Event::ShotFired { ship } => {
                    self.report.shots += 1;
                    debug!(ship = ship.get(), tick = self.report.ticks, "shot fired");
                }
                Event::ShipHit {
                    ship,
                    by,
                    remaining_health,
                } => {
                    self.report.hits += 1;
                    debug!(
                        ship = ship.get(),
                        by = by.get(),
                        remaining_health,
                        "ship hit"
                    );
                }
                Event::ShipDestroyed { ship } => {
                    info!(ship = ship.get(), tick = self.report.ticks, "ship destroyed");
                    self.report.destroyed.push((ship, self.report.ticks));
                }
                Event::TimeAdvanced { .. } | Event::ShipMoved { .. } => {}
            }
        }
    }

    /// Board text with the player drawn as `P` and every other active ship
    /// as the last digit of its id.
    #[must_use]
    pub(crate) fn render(&self) -> String {
        let player = query::fleet_view(&self.world).player_id();
        let markers: Vec<_> = query::active_ships(&self.world)
            .into_iter()
            .filter_map(|ship| {
                let tile = query::ship_tile(&self.world, ship)?;
                let glyph = if ship == player {
                    'P'
                } else {
                    char::from_digit(ship.get() % 10, 10).unwrap_or('?')
                };
                Some((tile, glyph))
            })
            .collect();
        query::board(&self.world).render(&markers)
    }
}
