//! Per-turn view of the game plus the intent ledger
//!
//! Every intent the engine issues goes through [`TurnContext::submit`],
//! which enforces the per-unit budget (one movement and one action per
//! turn) before handing the intent to the arbiter.

use ahash::AHashSet;
use tracing::debug;

use crate::core::types::UnitId;
use crate::game::arbiter::Arbiter;
use crate::game::intents::{Intent, IntentClass};
use crate::game::snapshot::Snapshot;

/// Which units have spent which budget this turn
#[derive(Debug, Clone, Default)]
pub struct TurnLedger {
    moved: AHashSet<UnitId>,
    acted: AHashSet<UnitId>,
    /// Intents accepted by the arbiter
    pub issued: usize,
    /// Intents the arbiter refused
    pub rejected: usize,
    /// Intents dropped locally because the unit's budget was already spent
    pub dropped: usize,
    /// Accepted spawn intents
    pub spawns: usize,
}

impl TurnLedger {
    pub fn has_moved(&self, unit: UnitId) -> bool {
        self.moved.contains(&unit)
    }

    pub fn has_acted(&self, unit: UnitId) -> bool {
        self.acted.contains(&unit)
    }

    /// Whether the unit may still issue an intent of `class`
    fn allows(&self, class: IntentClass, unit: Option<UnitId>) -> bool {
        match (class, unit) {
            (IntentClass::Movement, Some(u)) => !self.moved.contains(&u),
            (IntentClass::Action, Some(u)) => !self.acted.contains(&u),
            _ => true,
        }
    }

    fn spend(&mut self, class: IntentClass, unit: Option<UnitId>) {
        match (class, unit) {
            (IntentClass::Movement, Some(u)) => {
                self.moved.insert(u);
            }
            (IntentClass::Action, Some(u)) => {
                self.acted.insert(u);
            }
            _ => {}
        }
    }
}

/// The mutable state of one turn's planning
pub struct TurnContext<'a> {
    pub state: &'a mut Snapshot,
    arbiter: &'a mut dyn Arbiter,
    ledger: TurnLedger,
}

impl<'a> TurnContext<'a> {
    pub fn new(state: &'a mut Snapshot, arbiter: &'a mut dyn Arbiter) -> Self {
        Self {
            state,
            arbiter,
            ledger: TurnLedger::default(),
        }
    }

    /// Issue an intent. Returns whether the game accepted it.
    ///
    /// A refused intent still spends the unit's budget for the turn.
    pub fn submit(&mut self, intent: Intent) -> bool {
        let class = intent.class();
        let actor = intent.actor();

        if !self.ledger.allows(class, actor) {
            self.ledger.dropped += 1;
            debug!("Dropped {}: budget already spent this turn", intent);
            return false;
        }
        self.ledger.spend(class, actor);

        match self.arbiter.submit(self.state, &intent) {
            Ok(()) => {
                self.ledger.issued += 1;
                if class == IntentClass::Spawn {
                    self.ledger.spawns += 1;
                }
                debug!("Issued {}", intent);
                true
            }
            Err(rejection) => {
                self.ledger.rejected += 1;
                debug!("Rejected {}: {}", intent, rejection);
                false
            }
        }
    }

    pub fn has_moved(&self, unit: UnitId) -> bool {
        self.ledger.has_moved(unit)
    }

    pub fn has_acted(&self, unit: UnitId) -> bool {
        self.ledger.has_acted(unit)
    }

    pub fn ledger(&self) -> &TurnLedger {
        &self.ledger
    }

    pub fn into_ledger(self) -> TurnLedger {
        self.ledger
    }
}
