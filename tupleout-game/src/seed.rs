//! Deterministic per-player dice streams derived from one user-visible seed.
//!
//! Each player draws from their own stream so a game replays identically for
//! a given seed and roster regardless of how many rolls earlier players took.
use hmac::{Hmac, Mac};
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use sha2::Sha256;

use crate::constants::DIE_SIDES;
use crate::roller::{DiceSource, DiceSupply};

/// Derive a stream seed from the user seed and a domain tag.
#[must_use]
pub fn derive_stream_seed(user_seed: u64, domain_tag: &[u8]) -> u64 {
    let mut mac =
        Hmac::<Sha256>::new_from_slice(&user_seed.to_le_bytes()).expect("64-bit seed is valid key");
    mac.update(domain_tag);
    let digest = mac.finalize().into_bytes();
    let seed_bytes: [u8; 8] = digest[..8].try_into().expect("digest slice length");
    u64::from_le_bytes(seed_bytes)
}

/// Seeded dice stream for a single player, instrumented with a draw count.
#[derive(Debug, Clone)]
pub struct RollStream {
    rng: SmallRng,
    draws: u64,
}

impl RollStream {
    fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
            draws: 0,
        }
    }

    /// Number of die faces drawn from this stream so far.
    #[must_use]
    pub const fn draws(&self) -> u64 {
        self.draws
    }
}

impl DiceSource for RollStream {
    fn roll_face(&mut self) -> u8 {
        self.draws = self.draws.saturating_add(1);
        self.rng.gen_range(1..=DIE_SIDES)
    }
}

/// Bundle of dice streams, one per registered player.
#[derive(Debug, Clone)]
pub struct RollStreams {
    streams: Vec<RollStream>,
}

impl RollStreams {
    /// Construct the bundle from the user seed, one stream per player in
    /// registration order. Stream tags include the registration index so
    /// the derivation never collides even for equal names.
    #[must_use]
    pub fn from_user_seed(user_seed: u64, players: &[String]) -> Self {
        let streams = players
            .iter()
            .enumerate()
            .map(|(idx, name)| {
                let tag = format!("player:{idx}:{name}");
                RollStream::new(derive_stream_seed(user_seed, tag.as_bytes()))
            })
            .collect();
        Self { streams }
    }

    /// Number of streams in the bundle.
    #[must_use]
    pub fn len(&self) -> usize {
        self.streams.len()
    }

    /// True when no players were registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.streams.is_empty()
    }

    /// Borrow one player's stream.
    ///
    /// # Panics
    ///
    /// Panics when the index is outside the registered player range.
    #[must_use]
    pub fn player(&mut self, idx: usize) -> &mut RollStream {
        &mut self.streams[idx]
    }
}

impl DiceSupply for RollStreams {
    fn source(&mut self, player: usize) -> &mut dyn DiceSource {
        self.player(player)
    }
}
