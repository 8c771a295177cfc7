//! RNG module - piece source for spawns
//!
//! The default source draws every piece independently and uniformly from the
//! seven kinds, with no fairness guarantee. A 7-bag source (each bag holds one
//! of each kind, shuffled) is available as an explicit opt-in.
//!
//! Both are driven by a small seeded LCG so games are reproducible.

use crate::types::PieceKind;

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    ///
    /// Uses the high bits (multiply-shift); the low bits of an LCG cycle quickly.
    pub fn next_range(&mut self, max: u32) -> u32 {
        ((self.next_u32() as u64 * max as u64) >> 32) as u32
    }

    /// Shuffle a slice using Fisher-Yates
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.next_range((i + 1) as u32) as usize;
            slice.swap(i, j);
        }
    }

    /// Current internal state (usable as a seed to replay from here).
    pub fn state(&self) -> u32 {
        self.state
    }
}

/// How spawned pieces are chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Randomizer {
    /// Independent uniform draws.
    #[default]
    Uniform,
    /// Shuffled bags of all seven kinds.
    Bag,
}

impl Randomizer {
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "uniform" | "random" => Some(Randomizer::Uniform),
            "bag" | "bag7" | "7bag" => Some(Randomizer::Bag),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Randomizer::Uniform => "uniform",
            Randomizer::Bag => "bag",
        }
    }
}

/// Seeded source of piece kinds.
#[derive(Debug, Clone)]
pub struct PieceSource {
    randomizer: Randomizer,
    rng: SimpleRng,
    seed: u32,
    /// Current bag (only used by `Randomizer::Bag`)
    bag: [PieceKind; 7],
    bag_index: usize,
}

impl PieceSource {
    pub fn new(seed: u32, randomizer: Randomizer) -> Self {
        Self {
            randomizer,
            rng: SimpleRng::new(seed),
            seed,
            bag: PieceKind::ALL,
            // Force a refill on the first bag draw.
            bag_index: PieceKind::ALL.len(),
        }
    }

    /// Uniform source, the default for play.
    pub fn uniform(seed: u32) -> Self {
        Self::new(seed, Randomizer::Uniform)
    }

    /// 7-bag source.
    pub fn bag(seed: u32) -> Self {
        Self::new(seed, Randomizer::Bag)
    }

    pub fn randomizer(&self) -> Randomizer {
        self.randomizer
    }

    /// Seed this source was created with.
    pub fn seed(&self) -> u32 {
        self.seed
    }

    fn refill_bag(&mut self) {
        self.bag = PieceKind::ALL;
        self.rng.shuffle(&mut self.bag);
        self.bag_index = 0;
    }

    /// Draw the next piece kind.
    pub fn draw(&mut self) -> PieceKind {
        match self.randomizer {
            Randomizer::Uniform => {
                let i = self.rng.next_range(PieceKind::ALL.len() as u32) as usize;
                PieceKind::ALL[i]
            }
            Randomizer::Bag => {
                if self.bag_index >= self.bag.len() {
                    self.refill_bag();
                }
                let kind = self.bag[self.bag_index];
                self.bag_index += 1;
                kind
            }
        }
    }
}

impl Default for PieceSource {
    fn default() -> Self {
        Self::uniform(1)
    }
}
