use serde_derive::{Deserialize, Serialize};
use slot_buffer as buffer;
use std::io::Read;

use crate::err::Error;

/// How a full stack picks its next capacity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GrowthPolicy {
    /// One more slot per growth. Every push on a full stack reallocates, so a
    /// run of `n` pushes from empty costs O(n^2) element moves.
    #[serde(rename = "linear")]
    Linear,
    /// Twice the slots per growth, amortized O(1) pushes.
    #[serde(rename = "doubling")]
    Doubling,
}

impl GrowthPolicy {
    /// Capacity to grow to from `current` so that at least `required` slots
    /// exist. Never less than one slot.
    pub fn next_capacity(self, current: usize, required: usize) -> Result<usize, buffer::Error> {
        let proposed = match self {
            GrowthPolicy::Linear => current.checked_add(1),
            GrowthPolicy::Doubling => current.checked_mul(2),
        }
        .ok_or(buffer::Error::CapacityOverflow)?;
        Ok(proposed.max(required).max(1))
    }
}

impl Default for GrowthPolicy {
    fn default() -> Self {
        GrowthPolicy::Doubling
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub growth: GrowthPolicy,

    #[serde(rename = "initialCapacity", default)]
    pub initial_capacity: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            growth: GrowthPolicy::Doubling,
            initial_capacity: 0,
        }
    }
}

impl Config {
    pub fn load<R>(reader: R) -> Result<Self, Error>
    where
        R: Read,
    {
        Ok(serde_json::from_reader(reader)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_capacity_linear() {
        let p = GrowthPolicy::Linear;
        assert_eq!(p.next_capacity(0, 1), Ok(1));
        assert_eq!(p.next_capacity(1, 2), Ok(2));
        assert_eq!(p.next_capacity(7, 8), Ok(8));
        assert_eq!(p.next_capacity(2, 10), Ok(10));
    }

    #[test]
    fn test_next_capacity_doubling() {
        let p = GrowthPolicy::Doubling;
        assert_eq!(p.next_capacity(0, 1), Ok(1));
        assert_eq!(p.next_capacity(1, 2), Ok(2));
        assert_eq!(p.next_capacity(3, 4), Ok(6));
        assert_eq!(p.next_capacity(4, 20), Ok(20));
    }

    #[test]
    fn test_next_capacity_overflow() {
        assert_eq!(
            GrowthPolicy::Linear.next_capacity(usize::MAX, usize::MAX),
            Err(buffer::Error::CapacityOverflow)
        );
        assert_eq!(
            GrowthPolicy::Doubling.next_capacity(usize::MAX / 2 + 1, 1),
            Err(buffer::Error::CapacityOverflow)
        );
    }

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.growth, GrowthPolicy::Doubling);
        assert_eq!(config.initial_capacity, 0);
    }
}
