use crate::error::{EngineError, Result};
use crate::model::enums::BlockDiceFace;
use std::collections::VecDeque;

/// Source of die results. The engine never generates randomness itself.
pub trait DiceSource {
    fn d6(&mut self) -> Result<u8>;
    fn d8(&mut self) -> Result<u8>;

    fn two_d6(&mut self) -> Result<u8> {
        Ok(self.d6()? + self.d6()?)
    }

    fn block_die(&mut self) -> Result<BlockDiceFace> {
        Ok(BlockDiceFace::from_d6(self.d6()?))
    }
}

/// Replays a fixed sequence of results, in the order the engine asks for them.
#[derive(Debug, Clone, Default)]
pub struct ScriptedDice {
    rolls: VecDeque<u8>,
}

impl ScriptedDice {
    pub fn new(rolls: impl IntoIterator<Item = u8>) -> Self {
        ScriptedDice {
            rolls: rolls.into_iter().collect(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.rolls.len()
    }

    pub fn is_exhausted(&self) -> bool {
        self.rolls.is_empty()
    }

    fn next(&mut self, die: &'static str, sides: u8) -> Result<u8> {
        let roll = self
            .rolls
            .pop_front()
            .ok_or(EngineError::DiceExhausted { die })?;
        if !(1..=sides).contains(&roll) {
            return Err(EngineError::InvalidState(format!(
                "Scripted {die} result {roll} is out of range"
            )));
        }
        Ok(roll)
    }
}

impl DiceSource for ScriptedDice {
    fn d6(&mut self) -> Result<u8> {
        self.next("d6", 6)
    }

    fn d8(&mut self) -> Result<u8> {
        self.next("d8", 8)
    }
}

/// Seedable pseudo-random dice for simulations and benchmarks.
#[derive(Debug, Clone)]
pub struct RandomDice {
    rng: fastrand::Rng,
}

impl RandomDice {
    pub fn new() -> Self {
        RandomDice {
            rng: fastrand::Rng::new(),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        RandomDice {
            rng: fastrand::Rng::with_seed(seed),
        }
    }
}

impl Default for RandomDice {
    fn default() -> Self {
        RandomDice::new()
    }
}

impl DiceSource for RandomDice {
    fn d6(&mut self) -> Result<u8> {
        Ok(self.rng.u8(1..=6))
    }

    fn d8(&mut self) -> Result<u8> {
        Ok(self.rng.u8(1..=8))
    }
}
