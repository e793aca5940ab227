//! Resource relay protocol
//!
//! Every carrying unit shuttles between a *source* (where it picks cargo
//! up) and a *sink* (where it drops cargo off). Each turn [`relay_step`]
//! picks one leg, travels along it and, on arrival, performs the leg's
//! action.
//!
//! Legs carry plain action descriptors; the caller supplies a
//! [`RelayExecutor`] that knows how to travel and how to carry out each
//! descriptor.

use glam::Vec2;

use crate::core::types::UnitId;

/// One end of a relay
#[derive(Debug, Clone, PartialEq)]
pub struct Leg<A> {
    pub target: Vec2,
    /// How close the unit needs to get before acting
    pub stop_distance: f32,
    pub action: A,
}

impl<A> Leg<A> {
    pub fn new(target: Vec2, stop_distance: f32, action: A) -> Self {
        Self {
            target,
            stop_distance,
            action,
        }
    }

    /// Distance still to cover before this leg's action can happen
    pub fn marginal_distance(&self, from: Vec2) -> f32 {
        from.distance(self.target) - self.stop_distance
    }
}

/// Which end of the relay the unit works this turn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LegChoice {
    Source,
    Sink,
}

/// What the relay needs to know about the unit
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Carrier {
    pub id: UnitId,
    pub position: Vec2,
    pub carried: f32,
    pub capacity: f32,
}

/// Carries out relay legs for the caller's unit role
pub trait RelayExecutor<A> {
    /// Head along a leg; returns whether the unit is within the leg's stop
    /// distance afterwards
    fn travel(&mut self, unit: UnitId, leg: &Leg<A>) -> bool;

    /// Perform a leg's action once the unit has arrived
    fn perform(&mut self, unit: UnitId, action: &A);
}

/// Decide between the source and the sink
///
/// An empty unit always heads for the source, even one with no capacity,
/// and a full one never does. In between, the unit keeps working the
/// source until the sink is strictly closer.
pub fn choose_leg(carried: f32, capacity: f32, source_marginal: f32, sink_marginal: f32) -> LegChoice {
    if carried <= 0.0 {
        return LegChoice::Source;
    }
    if carried < capacity && source_marginal < sink_marginal {
        LegChoice::Source
    } else {
        LegChoice::Sink
    }
}

/// Run one turn of the relay for `carrier`
pub fn relay_step<A, E>(executor: &mut E, carrier: &Carrier, source: &Leg<A>, sink: &Leg<A>) -> LegChoice
where
    E: RelayExecutor<A> + ?Sized,
{
    let choice = choose_leg(
        carrier.carried,
        carrier.capacity,
        source.marginal_distance(carrier.position),
        sink.marginal_distance(carrier.position),
    );
    let leg = match choice {
        LegChoice::Source => source,
        LegChoice::Sink => sink,
    };
    if executor.travel(carrier.id, leg) {
        executor.perform(carrier.id, &leg.action);
    }
    choice
}
