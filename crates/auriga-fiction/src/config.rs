//! Configuration for a fiction session.

/// Energy charged per action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnergyCosts {
    /// Moving through an exit.
    pub go: u32,
    /// Picking an item up.
    pub take: u32,
    /// Putting an item down.
    pub drop: u32,
    /// Talking to a character.
    pub talk: u32,
    /// Looking around.
    pub look: u32,
    /// Looking at something.
    pub look_at: u32,
    /// Use, push or pull.
    pub interact: u32,
    /// Listing the bag.
    pub inventory: u32,
}

impl Default for EnergyCosts {
    fn default() -> Self {
        Self {
            go: 3,
            take: 2,
            drop: 1,
            talk: 1,
            look: 1,
            look_at: 1,
            interact: 1,
            inventory: 1,
        }
    }
}

/// Configuration for a session.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Per-action energy costs.
    pub costs: EnergyCosts,
    /// Energy restored by listening or waiting.
    pub rest_gain: u32,
    /// Name of the item that allows recharging.
    pub charger_item: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            costs: EnergyCosts::default(),
            rest_gain: 1,
            charger_item: "charger".to_string(),
        }
    }
}

impl SessionConfig {
    /// Set the energy costs.
    pub fn with_costs(mut self, costs: EnergyCosts) -> Self {
        self.costs = costs;
        self
    }

    /// Set the energy restored by resting.
    pub fn with_rest_gain(mut self, gain: u32) -> Self {
        self.rest_gain = gain;
        self
    }

    /// Set the charger item name.
    pub fn with_charger_item(mut self, name: impl Into<String>) -> Self {
        self.charger_item = name.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let cfg = SessionConfig::default();
        assert_eq!(cfg.costs.go, 3);
        assert_eq!(cfg.costs.take, 2);
        assert_eq!(cfg.rest_gain, 1);
        assert_eq!(cfg.charger_item, "charger");
    }

    #[test]
    fn builder_methods() {
        let costs = EnergyCosts {
            go: 5,
            ..EnergyCosts::default()
        };
        let cfg = SessionConfig::default()
            .with_costs(costs)
            .with_rest_gain(4)
            .with_charger_item("ac adapter");
        assert_eq!(cfg.costs.go, 5);
        assert_eq!(cfg.costs.drop, 1);
        assert_eq!(cfg.rest_gain, 4);
        assert_eq!(cfg.charger_item, "ac adapter");
    }
}
