//! Two-resource economy: manpower pays for construction, supply is earned
//! from defeated enemies.

use crate::config::Cost;
use crate::store::LedgerStore;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Balance {
    pub manpower: u32,
    pub supply: u32,
}

impl Balance {
    pub fn new(manpower: u32, supply: u32) -> Self {
        Self { manpower, supply }
    }

    pub fn covers(&self, cost: Cost) -> bool {
        self.manpower >= cost.manpower && self.supply >= cost.supply
    }
}

impl From<Balance> for Cost {
    fn from(b: Balance) -> Self {
        Cost {
            manpower: b.manpower,
            supply: b.supply,
        }
    }
}

type Listener = Box<dyn FnMut(Balance) + Send>;

/// Owns the balance. Every successful mutation is persisted and reported to
/// the listener; failed consumes change nothing.
pub struct Ledger {
    balance: Balance,
    starting: Balance,
    store: Box<dyn LedgerStore>,
    listener: Option<Listener>,
}

impl Ledger {
    /// Open a ledger, reading the persisted balance if there is one.
    pub fn open(starting: Balance, store: Box<dyn LedgerStore>) -> Self {
        let balance = match store.load() {
            Ok(Some(saved)) => {
                tracing::debug!(?saved, "ledger restored");
                saved
            }
            Ok(None) => starting,
            Err(e) => {
                tracing::warn!("ledger store unreadable, using defaults: {}", e);
                starting
            }
        };
        Self {
            balance,
            starting,
            store,
            listener: None,
        }
    }

    pub fn balance(&self) -> Balance {
        self.balance
    }

    pub fn manpower(&self) -> u32 {
        self.balance.manpower
    }

    pub fn supply(&self) -> u32 {
        self.balance.supply
    }

    /// Replace the listener. There is only ever one.
    pub fn set_listener(&mut self, listener: impl FnMut(Balance) + Send + 'static) {
        self.listener = Some(Box::new(listener));
    }

    pub fn clear_listener(&mut self) {
        self.listener = None;
    }

    pub fn can_consume(&self, manpower: u32, supply: u32) -> bool {
        self.balance.manpower >= manpower && self.balance.supply >= supply
    }

    pub fn consume_manpower(&mut self, amount: u32) -> bool {
        self.consume(amount, 0)
    }

    pub fn consume_supply(&mut self, amount: u32) -> bool {
        self.consume(0, amount)
    }

    /// Spend both resources or neither.
    pub fn consume(&mut self, manpower: u32, supply: u32) -> bool {
        if !self.can_consume(manpower, supply) {
            return false;
        }
        self.balance.manpower -= manpower;
        self.balance.supply -= supply;
        self.changed();
        true
    }

    pub fn add_manpower(&mut self, amount: u32) {
        self.balance.manpower = self.balance.manpower.saturating_add(amount);
        self.changed();
    }

    pub fn add_supply(&mut self, amount: u32) {
        self.balance.supply = self.balance.supply.saturating_add(amount);
        self.changed();
    }

    /// Back to the starting balance.
    pub fn reset(&mut self) {
        self.balance = self.starting;
        self.changed();
    }

    fn changed(&mut self) {
        if let Err(e) = self.store.save(self.balance) {
            tracing::warn!("failed to persist ledger: {}", e);
        }
        if let Some(listener) = self.listener.as_mut() {
            listener(self.balance);
        }
    }
}

impl std::fmt::Debug for Ledger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Ledger")
            .field("balance", &self.balance)
            .field("starting", &self.starting)
            .field("has_listener", &self.listener.is_some())
            .finish()
    }
}
