use std::{fmt, str::FromStr};

use rand::{
    Rng, SeedableRng as _,
    distr::{Distribution, StandardUniform},
    seq::SliceRandom as _,
};
use rand_pcg::Pcg32;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{FIELD_CELLS, FieldGrid, Position};

/// The order in which the repairer visits the 81 cells.
///
/// Always a permutation of every field position. The order decides which of two
/// conflicting footprints keeps its size: the one visited first wins.
///
/// # Example
///
/// ```
/// use gadantic_engine::{OrderSeed, Position, VisitingOrder};
///
/// let order = VisitingOrder::prioritized(&[Position::new(4, 4)]);
/// assert_eq!(order.positions()[0], Position::new(4, 4));
/// assert_eq!(order.positions()[1], Position::new(0, 0));
///
/// let seed: OrderSeed = "000102030405060708090a0b0c0d0e0f".parse().unwrap();
/// assert_eq!(VisitingOrder::from_seed(seed), VisitingOrder::from_seed(seed));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisitingOrder {
    positions: Vec<Position>,
}

impl Default for VisitingOrder {
    fn default() -> Self {
        Self::row_major()
    }
}

impl VisitingOrder {
    /// Top row first, left to right.
    #[must_use]
    pub fn row_major() -> Self {
        Self {
            positions: FieldGrid::<()>::positions().collect(),
        }
    }

    /// A uniformly random permutation drawn from `rng`.
    pub fn shuffled<R>(rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
    {
        let mut order = Self::row_major();
        order.positions.shuffle(rng);
        order
    }

    /// A reproducible random permutation.
    #[must_use]
    pub fn from_seed(seed: OrderSeed) -> Self {
        let mut rng = Pcg32::from_seed(seed.0);
        Self::shuffled(&mut rng)
    }

    /// Visits `priority` first, in the given order, then every other cell row-major.
    ///
    /// Positions outside the field and repeated positions are skipped.
    #[must_use]
    pub fn prioritized(priority: &[Position]) -> Self {
        let mut seen: FieldGrid<bool> = FieldGrid::filled(false);
        let mut positions = Vec::with_capacity(FIELD_CELLS);
        let rest = FieldGrid::<()>::positions();
        for pos in priority.iter().copied().chain(rest) {
            if seen.get(pos) == Some(&false) {
                seen.set(pos, true);
                positions.push(pos);
            }
        }
        Self { positions }
    }

    /// Uses an explicit permutation.
    pub fn from_positions(positions: Vec<Position>) -> Result<Self, VisitingOrderError> {
        if positions.len() != FIELD_CELLS {
            return Err(VisitingOrderError::WrongLength {
                expected: FIELD_CELLS,
                actual: positions.len(),
            });
        }
        let mut seen: FieldGrid<bool> = FieldGrid::filled(false);
        for &pos in &positions {
            match seen.get(pos) {
                None => return Err(VisitingOrderError::OutOfBounds { position: pos }),
                Some(true) => return Err(VisitingOrderError::Duplicate { position: pos }),
                Some(false) => seen.set(pos, true),
            }
        }
        Ok(Self { positions })
    }

    #[must_use]
    pub fn positions(&self) -> &[Position] {
        &self.positions
    }

    pub fn iter(&self) -> impl Iterator<Item = Position> + '_ {
        self.positions.iter().copied()
    }
}

/// Error returned when a list of positions is not a permutation of the field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum VisitingOrderError {
    #[display("visiting order must list exactly {expected} positions, got {actual}")]
    WrongLength { expected: usize, actual: usize },
    #[display("position {position} is outside the field")]
    OutOfBounds { position: Position },
    #[display("position {position} is listed more than once")]
    Duplicate { position: Position },
}

/// 128-bit seed for a reproducible [`VisitingOrder`].
///
/// Serialized as a 32-character lowercase hex string, and parsed from one with
/// [`str::parse`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OrderSeed([u8; 16]);

impl OrderSeed {
    #[must_use]
    pub const fn new(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }

    #[must_use]
    pub const fn to_bytes(self) -> [u8; 16] {
        self.0
    }
}

impl fmt::Display for OrderSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:032x}", u128::from_be_bytes(self.0))
    }
}

/// Error returned when parsing an [`OrderSeed`] from text.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum OrderSeedParseError {
    #[display("invalid hex: expected 32 characters, got {actual}")]
    WrongLength { actual: usize },
    #[display("invalid hex: {text}")]
    InvalidHex { text: String },
}

impl FromStr for OrderSeed {
    type Err = OrderSeedParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != 32 {
            return Err(OrderSeedParseError::WrongLength { actual: s.len() });
        }
        // from_str_radix would accept a leading '+'
        if !s.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(OrderSeedParseError::InvalidHex { text: s.to_owned() });
        }
        let num = u128::from_str_radix(s, 16)
            .map_err(|_| OrderSeedParseError::InvalidHex { text: s.to_owned() })?;
        Ok(Self(num.to_be_bytes()))
    }
}

impl Serialize for OrderSeed {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for OrderSeed {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let hex_str = String::deserialize(deserializer)?;
        hex_str.parse().map_err(serde::de::Error::custom)
    }
}

/// Allows generating random `OrderSeed` values with `rng.random()`.
impl Distribution<OrderSeed> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> OrderSeed {
        let mut seed = [0; 16];
        rng.fill(&mut seed);
        OrderSeed(seed)
    }
}
