use std::fmt;

use rand::{Rng, distr::StandardUniform, prelude::Distribution};
use serde::{Deserialize, Serialize};

use crate::CatalogError;

/// Largest footprint edge any crop may have.
pub const MAX_EDGE: usize = 3;

/// Buff category a crop propagates to its orthogonal neighbors.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum Perk {
    #[display("water")]
    Water = 0,
    #[display("weed")]
    Weed = 1,
    #[display("quality")]
    Quality = 2,
    #[display("harvest")]
    Harvest = 3,
}

impl Perk {
    /// Number of perk categories (4).
    pub const COUNT: usize = 4;

    /// All perk categories in index order.
    pub const ALL: [Perk; Self::COUNT] = [Perk::Water, Perk::Weed, Perk::Quality, Perk::Harvest];

    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Static description of a crop: how it is shown, how large it is, and what it buffs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropSpec {
    /// Human readable crop name.
    pub name: &'static str,
    /// Short code used by the external garden planner layout string.
    pub code: &'static str,
    /// Side length of the square footprint (1, 2 or 3).
    pub edge: usize,
    /// Perk propagated to neighboring crops.
    pub perk: Perk,
}

impl CropSpec {
    const fn new(name: &'static str, code: &'static str, edge: usize, perk: Perk) -> Self {
        Self {
            name,
            code,
            edge,
            perk,
        }
    }
}

/// The crop catalog, indexed by [`CropId`].
///
/// The order is part of the genotype wire form: gene value `i` selects `CATALOG[i]`.
pub const CATALOG: [CropSpec; 15] = [
    // single-cell crops
    CropSpec::new("Tomatoes", "T", 1, Perk::Water),
    CropSpec::new("Potatoes", "P", 1, Perk::Water),
    CropSpec::new("Cabbage", "Cb", 1, Perk::Water),
    CropSpec::new("Rice", "R", 1, Perk::Harvest),
    CropSpec::new("Wheat", "W", 1, Perk::Harvest),
    CropSpec::new("Corn", "Cr", 1, Perk::Harvest),
    CropSpec::new("Carrots", "C", 1, Perk::Weed),
    CropSpec::new("Onions", "O", 1, Perk::Weed),
    CropSpec::new("Bok Choy", "Bk", 1, Perk::Weed),
    CropSpec::new("Cotton", "Co", 1, Perk::Quality),
    // 2×2 crops
    CropSpec::new("Blueberries", "B", 2, Perk::Harvest),
    CropSpec::new("Beans", "Bt", 2, Perk::Harvest),
    CropSpec::new("Peppers", "S", 2, Perk::Quality),
    CropSpec::new("Pumpkins", "Pm", 2, Perk::Quality),
    // 3×3 crops
    CropSpec::new("Apples", "A", 3, Perk::Harvest),
];

/// Number of crops in the catalog (15).
pub const CROP_COUNT: usize = CATALOG.len();

/// Checks the invariants every crop table must satisfy.
///
/// Each footprint edge must lie in `1..=MAX_EDGE`, and every perk needs at least one crop
/// with edge 1. The repairer relies on the latter: any footprint can always be shrunk to a
/// single cell without changing its perk.
pub const fn verify_catalog(catalog: &[CropSpec]) -> Result<(), CatalogError> {
    let mut i = 0;
    while i < catalog.len() {
        let edge = catalog[i].edge;
        if edge == 0 || edge > MAX_EDGE {
            return Err(CatalogError::InvalidEdge {
                name: catalog[i].name,
                edge,
            });
        }
        i += 1;
    }
    let mut p = 0;
    while p < Perk::COUNT {
        let perk = Perk::ALL[p];
        if find_crop(catalog, perk, 1).is_none() {
            return Err(CatalogError::MissingUnitCrop(perk));
        }
        p += 1;
    }
    Ok(())
}

const fn find_crop(catalog: &[CropSpec], perk: Perk, edge: usize) -> Option<usize> {
    let mut i = 0;
    while i < catalog.len() {
        if catalog[i].perk as usize == perk as usize && catalog[i].edge == edge {
            return Some(i);
        }
        i += 1;
    }
    None
}

// SUBSTITUTES[perk][edge - 1] is the first crop of `perk` with the largest edge <= `edge`.
// Building it verifies the catalog, so a broken table fails at compile time.
const SUBSTITUTES: [[CropId; MAX_EDGE]; Perk::COUNT] = {
    assert!(
        verify_catalog(&CATALOG).is_ok(),
        "crop catalog needs valid edges and an edge-1 crop for every perk"
    );
    assert!(CROP_COUNT <= u8::MAX as usize);
    let mut table = [[CropId(0); MAX_EDGE]; Perk::COUNT];
    let mut p = 0;
    while p < Perk::COUNT {
        let mut edge = 1;
        while edge <= MAX_EDGE {
            let mut candidate = edge;
            loop {
                if let Some(i) = find_crop(&CATALOG, Perk::ALL[p], candidate) {
                    #[expect(clippy::cast_possible_truncation)]
                    let id = CropId(i as u8);
                    table[p][edge - 1] = id;
                    break;
                }
                candidate -= 1;
            }
            edge += 1;
        }
        p += 1;
    }
    table
};

/// Index of a crop in the [`CATALOG`].
///
/// A `CropId` is always in range; it can only be obtained through [`CropId::new`], the
/// named constants, or deserialization (which rejects out-of-range values).
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct CropId(u8);

impl CropId {
    pub const TOMATOES: Self = Self(0);
    pub const POTATOES: Self = Self(1);
    pub const CABBAGE: Self = Self(2);
    pub const RICE: Self = Self(3);
    pub const WHEAT: Self = Self(4);
    pub const CORN: Self = Self(5);
    pub const CARROTS: Self = Self(6);
    pub const ONIONS: Self = Self(7);
    pub const BOK_CHOY: Self = Self(8);
    pub const COTTON: Self = Self(9);
    pub const BLUEBERRIES: Self = Self(10);
    pub const BEANS: Self = Self(11);
    pub const PEPPERS: Self = Self(12);
    pub const PUMPKINS: Self = Self(13);
    pub const APPLES: Self = Self(14);

    /// Returns the crop with catalog index `index`, or `None` if out of range.
    #[must_use]
    #[expect(clippy::cast_possible_truncation)]
    pub const fn new(index: usize) -> Option<Self> {
        if index < CROP_COUNT {
            Some(Self(index as u8))
        } else {
            None
        }
    }

    /// Iterates over every crop in catalog order.
    pub fn all() -> impl Iterator<Item = Self> {
        (0..CROP_COUNT).filter_map(Self::new)
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    #[must_use]
    pub const fn spec(self) -> CropSpec {
        CATALOG[self.0 as usize]
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        self.spec().name
    }

    #[must_use]
    pub const fn code(self) -> &'static str {
        self.spec().code
    }

    #[must_use]
    pub const fn edge(self) -> usize {
        self.spec().edge
    }

    #[must_use]
    pub const fn area(self) -> usize {
        self.edge() * self.edge()
    }

    #[must_use]
    pub const fn perk(self) -> Perk {
        self.spec().perk
    }

    /// Returns the crop that replaces a footprint of `perk` shrunk to `edge`.
    ///
    /// The result has the same perk and the largest available edge not exceeding `edge`
    /// (ties go to the lowest catalog index). `edge` is clamped to `1..=MAX_EDGE`.
    #[must_use]
    pub const fn substitute(perk: Perk, edge: usize) -> Self {
        let edge = if edge == 0 {
            1
        } else if edge > MAX_EDGE {
            MAX_EDGE
        } else {
            edge
        };
        SUBSTITUTES[perk.index()][edge - 1]
    }

    /// Returns `true` if both crops share perk and footprint size.
    ///
    /// Used for symmetry scoring, where the exact crop kind does not matter.
    #[must_use]
    pub const fn is_equivalent(self, other: Self) -> bool {
        self.perk() as usize == other.perk() as usize && self.edge() == other.edge()
    }
}

impl fmt::Debug for CropId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CropId({}:{})", self.0, self.name())
    }
}

impl fmt::Display for CropId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl<'de> Deserialize<'de> for CropId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let index = usize::deserialize(deserializer)?;
        Self::new(index).ok_or_else(|| {
            serde::de::Error::custom(format!(
                "crop id must be in [0, {CROP_COUNT}), got {index}"
            ))
        })
    }
}

/// Allows sampling uniformly random crops with `rng.random()`.
impl Distribution<CropId> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> CropId {
        #[expect(clippy::cast_possible_truncation)]
        let index = rng.random_range(0..CROP_COUNT) as u8;
        CropId(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_is_valid() {
        assert_eq!(verify_catalog(&CATALOG), Ok(()));
        assert_eq!(CROP_COUNT, 15);
    }

    #[test]
    fn test_every_perk_has_unit_crop() {
        for perk in Perk::ALL {
            let unit = CropId::substitute(perk, 1);
            assert_eq!(unit.edge(), 1);
            assert_eq!(unit.perk(), perk);
        }
    }

    #[test]
    fn test_verify_catalog_rejects_missing_unit_crop() {
        let broken = [
            CropSpec::new("Tomatoes", "T", 1, Perk::Water),
            CropSpec::new("Carrots", "C", 1, Perk::Weed),
            CropSpec::new("Cotton", "Co", 1, Perk::Quality),
            CropSpec::new("Apples", "A", 3, Perk::Harvest),
        ];
        assert_eq!(
            verify_catalog(&broken),
            Err(CatalogError::MissingUnitCrop(Perk::Harvest))
        );
    }

    #[test]
    fn test_verify_catalog_rejects_invalid_edge() {
        let broken = [CropSpec::new("Giant", "G", 4, Perk::Water)];
        assert_eq!(
            verify_catalog(&broken),
            Err(CatalogError::InvalidEdge {
                name: "Giant",
                edge: 4
            })
        );
    }

    #[test]
    fn test_substitute_prefers_exact_edge() {
        assert_eq!(CropId::substitute(Perk::Harvest, 3), CropId::APPLES);
        assert_eq!(CropId::substitute(Perk::Harvest, 2), CropId::BLUEBERRIES);
        assert_eq!(CropId::substitute(Perk::Harvest, 1), CropId::RICE);
        assert_eq!(CropId::substitute(Perk::Quality, 2), CropId::PEPPERS);
        assert_eq!(CropId::substitute(Perk::Quality, 1), CropId::COTTON);
    }

    #[test]
    fn test_substitute_falls_back_to_smaller_edge() {
        // Water and weed crops only come in 1×1.
        assert_eq!(CropId::substitute(Perk::Water, 3), CropId::TOMATOES);
        assert_eq!(CropId::substitute(Perk::Weed, 2), CropId::CARROTS);
        // Quality has no 3×3 crop.
        assert_eq!(CropId::substitute(Perk::Quality, 3), CropId::PEPPERS);
    }

    #[test]
    fn test_new_rejects_out_of_range() {
        assert_eq!(CropId::new(14), Some(CropId::APPLES));
        assert_eq!(CropId::new(15), None);
        assert_eq!(CropId::all().count(), CROP_COUNT);
    }

    #[test]
    fn test_random_crops_cover_catalog() {
        use rand::SeedableRng as _;

        let mut rng = rand_pcg::Pcg32::seed_from_u64(11);
        let mut seen = [false; CROP_COUNT];
        for _ in 0..1000 {
            let crop: CropId = rng.random();
            assert!(crop.index() < CROP_COUNT);
            seen[crop.index()] = true;
        }
        assert!(seen.iter().all(|s| *s));
    }

    #[test]
    fn test_equivalence_ignores_kind() {
        assert!(CropId::TOMATOES.is_equivalent(CropId::CABBAGE));
        assert!(CropId::BLUEBERRIES.is_equivalent(CropId::BEANS));
        assert!(!CropId::RICE.is_equivalent(CropId::BLUEBERRIES));
        assert!(!CropId::COTTON.is_equivalent(CropId::CARROTS));
    }

    #[test]
    fn test_crop_id_serde() {
        let json = serde_json::to_string(&CropId::PUMPKINS).unwrap();
        assert_eq!(json, "13");
        let crop: CropId = serde_json::from_str("14").unwrap();
        assert_eq!(crop, CropId::APPLES);
        assert!(serde_json::from_str::<CropId>("15").is_err());
    }
}
