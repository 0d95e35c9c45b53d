//! Combines `(channel, op, value)` contributions into final channel values.
//!
//! Each channel carries an additive sum (starting at 0) and a multiplicative
//! product (starting at 1). The final value is `sum * product`, so a channel
//! that only ever receives multipliers resolves to 0.

use super::types::{Channel, ChannelMap, Effect, EffectOp, NUM_CHANNELS};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChannelAccumulator {
    additive: [f64; NUM_CHANNELS],
    multiplicative: [f64; NUM_CHANNELS],
}

impl Default for ChannelAccumulator {
    fn default() -> Self {
        Self::new()
    }
}

impl ChannelAccumulator {
    pub fn new() -> Self {
        Self {
            additive: [0.0; NUM_CHANNELS],
            multiplicative: [1.0; NUM_CHANNELS],
        }
    }

    pub fn add(&mut self, channel: Channel, value: f64) {
        self.additive[channel.index()] += value;
    }

    pub fn multiply(&mut self, channel: Channel, factor: f64) {
        self.multiplicative[channel.index()] *= factor;
    }

    pub fn apply(&mut self, effect: &Effect) {
        match effect.op {
            EffectOp::Add => self.add(effect.channel, effect.value),
            EffectOp::Multiply => self.multiply(effect.channel, effect.value),
        }
    }

    pub fn additive(&self, channel: Channel) -> f64 {
        self.additive[channel.index()]
    }

    pub fn multiplier(&self, channel: Channel) -> f64 {
        self.multiplicative[channel.index()]
    }

    /// Apply each channel's product to its finished sum.
    pub fn finalize(&self) -> ChannelMap {
        let mut map = ChannelMap::new();
        for channel in Channel::ALL {
            map.set(channel, self.additive(channel) * self.multiplier(channel));
        }
        map
    }
}

/// Fold any sequence of effects into a finished `ChannelMap`.
pub fn fold_effects<'a>(effects: impl IntoIterator<Item = &'a Effect>) -> ChannelMap {
    let mut acc = ChannelAccumulator::new();
    for effect in effects {
        acc.apply(effect);
    }
    acc.finalize()
}
