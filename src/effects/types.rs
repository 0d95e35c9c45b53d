use serde::{Deserialize, Serialize};

pub const NUM_CHANNELS: usize = 10;

/// A stat a bonus can target.
///
/// `ClickDamage` and `AutoDamage` are flat points, `AutoClickerCount` is a
/// count, every other channel is a percentage (5.0 = +5%).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Channel {
    ClickDamage,
    AutoDamage,
    AutoSpeed,
    AutoClickerCount,
    CritChance,
    GoldBonus,
    XpBonus,
    MaterialBonus,
    CraftingSpeed,
    QuestEfficiency,
}

impl Channel {
    pub const ALL: [Channel; NUM_CHANNELS] = [
        Channel::ClickDamage,
        Channel::AutoDamage,
        Channel::AutoSpeed,
        Channel::AutoClickerCount,
        Channel::CritChance,
        Channel::GoldBonus,
        Channel::XpBonus,
        Channel::MaterialBonus,
        Channel::CraftingSpeed,
        Channel::QuestEfficiency,
    ];

    pub fn index(&self) -> usize {
        match self {
            Channel::ClickDamage => 0,
            Channel::AutoDamage => 1,
            Channel::AutoSpeed => 2,
            Channel::AutoClickerCount => 3,
            Channel::CritChance => 4,
            Channel::GoldBonus => 5,
            Channel::XpBonus => 6,
            Channel::MaterialBonus => 7,
            Channel::CraftingSpeed => 8,
            Channel::QuestEfficiency => 9,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Channel::ClickDamage => "Click Damage",
            Channel::AutoDamage => "Auto Damage",
            Channel::AutoSpeed => "Auto Speed",
            Channel::AutoClickerCount => "Auto Clickers",
            Channel::CritChance => "Crit Chance",
            Channel::GoldBonus => "Gold Bonus",
            Channel::XpBonus => "XP Bonus",
            Channel::MaterialBonus => "Material Bonus",
            Channel::CraftingSpeed => "Crafting Speed",
            Channel::QuestEfficiency => "Quest Efficiency",
        }
    }

    /// Whether values on this channel are percentages rather than flat amounts.
    pub fn is_percent(&self) -> bool {
        !matches!(
            self,
            Channel::ClickDamage | Channel::AutoDamage | Channel::AutoClickerCount
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EffectOp {
    Add,
    Multiply,
}

/// One `(channel, op, value)` contribution.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Effect {
    pub channel: Channel,
    pub op: EffectOp,
    pub value: f64,
}

impl Effect {
    pub fn add(channel: Channel, value: f64) -> Self {
        Self {
            channel,
            op: EffectOp::Add,
            value,
        }
    }

    pub fn multiply(channel: Channel, value: f64) -> Self {
        Self {
            channel,
            op: EffectOp::Multiply,
            value,
        }
    }

    /// Same effect with its value scaled by `factor`.
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            value: self.value * factor,
            ..*self
        }
    }
}

/// Final value per channel. Channels nobody contributed to read as 0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChannelMap {
    values: [f64; NUM_CHANNELS],
}

impl Default for ChannelMap {
    fn default() -> Self {
        Self::new()
    }
}

impl ChannelMap {
    pub fn new() -> Self {
        Self {
            values: [0.0; NUM_CHANNELS],
        }
    }

    pub fn get(&self, channel: Channel) -> f64 {
        self.values[channel.index()]
    }

    pub fn set(&mut self, channel: Channel, value: f64) {
        self.values[channel.index()] = value;
    }

    pub fn add_to(&mut self, channel: Channel, value: f64) {
        self.values[channel.index()] += value;
    }

    /// Channel-wise sum with another map.
    pub fn add(&mut self, other: &ChannelMap) {
        for channel in Channel::ALL {
            self.values[channel.index()] += other.get(channel);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Channel, f64)> + '_ {
        Channel::ALL.into_iter().map(|c| (c, self.get(c)))
    }

    pub fn is_zero(&self) -> bool {
        self.values.iter().all(|v| *v == 0.0)
    }

    pub fn from_pairs(pairs: &[(Channel, f64)]) -> Self {
        let mut map = Self::new();
        for (channel, value) in pairs {
            map.add_to(*channel, *value);
        }
        map
    }
}
