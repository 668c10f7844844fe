//! The player: location, bag, and energy.

use serde::{Deserialize, Serialize};

use crate::id::{ItemId, SpaceId};

/// Default carrying capacity.
pub const DEFAULT_CAPACITY: u32 = 50;
/// Default (and maximum) starting energy.
pub const DEFAULT_ENERGY: u32 = 100;

/// The player's state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// The player's name.
    pub name: String,
    /// A short description of the player.
    pub description: String,
    /// The space the player is in.
    pub location: SpaceId,
    #[serde(rename = "items")]
    pub(crate) bag: Vec<ItemId>,
    /// Maximum total weight the bag can hold.
    pub capacity: u32,
    /// Energy left; every action spends some.
    pub energy: u32,
    /// Energy restored by a full recharge.
    pub max_energy: u32,
    /// Cleared once the player runs out of energy.
    pub alive: bool,
}

impl Player {
    /// Create a player standing in `location` with default stats.
    pub fn new(name: impl Into<String>, location: SpaceId) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            location,
            bag: Vec::new(),
            capacity: DEFAULT_CAPACITY,
            energy: DEFAULT_ENERGY,
            max_energy: DEFAULT_ENERGY,
            alive: true,
        }
    }

    /// Set capacity.
    pub fn with_capacity(mut self, capacity: u32) -> Self {
        self.capacity = capacity;
        self
    }

    /// Set both current and maximum energy.
    pub fn with_energy(mut self, energy: u32) -> Self {
        self.energy = energy;
        self.max_energy = energy;
        self
    }

    /// Items in the bag, in pickup order.
    pub fn items(&self) -> &[ItemId] {
        &self.bag
    }

    /// Check if the player carries an item.
    pub fn has_item(&self, item: ItemId) -> bool {
        self.bag.contains(&item)
    }

    /// Spend energy, stopping at zero.
    pub fn spend_energy(&mut self, cost: u32) {
        self.energy = self.energy.saturating_sub(cost);
    }

    /// Restore energy, stopping at the maximum.
    pub fn restore_energy(&mut self, amount: u32) {
        self.energy = self.energy.saturating_add(amount).min(self.max_energy);
    }

    /// Refill energy to the maximum.
    pub fn recharge(&mut self) {
        self.energy = self.max_energy;
    }

    /// Whether the player has no energy left.
    pub fn is_exhausted(&self) -> bool {
        self.energy == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn energy_floors_at_zero() {
        let mut player = Player::new("bot", SpaceId::new()).with_energy(1);
        player.spend_energy(2);
        assert_eq!(player.energy, 0);
        assert!(player.is_exhausted());
    }

    #[test]
    fn restore_caps_at_max() {
        let mut player = Player::new("bot", SpaceId::new()).with_energy(10);
        player.spend_energy(3);
        player.restore_energy(100);
        assert_eq!(player.energy, 10);
    }

    #[test]
    fn recharge_fills() {
        let mut player = Player::new("bot", SpaceId::new()).with_energy(8);
        player.spend_energy(8);
        player.recharge();
        assert_eq!(player.energy, 8);
    }

    #[test]
    fn bag_serializes_as_items() {
        let mut player = Player::new("bot", SpaceId::new());
        let item = ItemId::new();
        player.bag.push(item);
        let json = serde_json::to_value(&player).unwrap();
        assert_eq!(json["items"][0], serde_json::json!(item.0.to_string()));
    }
}
