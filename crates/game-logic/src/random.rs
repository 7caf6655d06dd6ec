//! Seed derivation for reproducible play
//!
//! A single master seed fans out into one stream per match and one per side
//! within a match, so a match never depends on which matches ran before it
//! or on how the other side consumes randomness.

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

/// Generator handed to strategies and to stochastic replay.
///
/// `StdRng` produces the same stream on every platform, so a match replayed
/// in the browser matches the native run.
pub type MatchRng = StdRng;

/// Master seed
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Seed(u64);

impl Seed {
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    pub const fn value(self) -> u64 {
        self.0
    }

    /// Stream for the match with this index in a tournament schedule.
    pub fn for_match(self, match_index: u64) -> Self {
        let salt = match_index.wrapping_add(1).wrapping_mul(0x517cc1b727220a95);
        Self(mix(self.0 ^ salt))
    }

    /// Stream for one side of a match (0 = A, 1 = B, 2 = match length).
    pub fn for_side(self, side: u8) -> Self {
        let salt = (side as u64).wrapping_add(1).wrapping_mul(0x9e3779b97f4a7c15);
        Self(mix(self.0 ^ salt))
    }

    pub fn rng(self) -> MatchRng {
        MatchRng::seed_from_u64(self.0)
    }
}

impl From<u64> for Seed {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

/// splitmix64 finalizer
fn mix(mut z: u64) -> u64 {
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58476d1ce4e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d049bb133111eb);
    z ^ (z >> 31)
}
