use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::{CROP_COUNT, CropId, FIELD_CELLS, FIELD_WIDTH, FieldGrid, Position};
use crate::GenotypeError;

/// A candidate garden plot: one crop id per cell, row-major (`index = y * 9 + x`).
///
/// The gene at a cell names the crop whose footprint would be anchored there. Genes that
/// fall inside another crop's footprint are ignored by validation and decoding, so many
/// genotypes describe the same plot.
///
/// A `Genotype` is always well-formed: it has exactly [`FIELD_CELLS`] genes and every gene
/// is a valid [`CropId`]. Whether the footprints fit together is a separate question
/// answered by [`validate`](crate::validate).
///
/// The wire form is a flat JSON array of 81 integers in `[0, 15)`.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<usize>", into = "Vec<usize>")]
pub struct Genotype {
    genes: [CropId; FIELD_CELLS],
}

impl Genotype {
    /// Creates a genotype from catalog ids.
    #[must_use]
    pub const fn new(genes: [CropId; FIELD_CELLS]) -> Self {
        Self { genes }
    }

    /// Creates a genotype with every gene set to `crop`.
    #[must_use]
    pub const fn filled(crop: CropId) -> Self {
        Self::new([crop; FIELD_CELLS])
    }

    /// Creates a genotype from raw integers, checking length and range.
    pub fn from_slice(raw: &[usize]) -> Result<Self, GenotypeError> {
        if raw.len() != FIELD_CELLS {
            return Err(GenotypeError::WrongLength {
                expected: FIELD_CELLS,
                actual: raw.len(),
            });
        }
        let mut genes = [CropId::TOMATOES; FIELD_CELLS];
        for (index, (gene, &value)) in genes.iter_mut().zip(raw).enumerate() {
            *gene = CropId::new(value).ok_or(GenotypeError::CropOutOfRange {
                index,
                value,
                limit: CROP_COUNT,
            })?;
        }
        Ok(Self { genes })
    }

    /// Draws every gene uniformly from the catalog.
    ///
    /// Most random genotypes are infeasible; pass them through
    /// [`repair`](crate::repair) before decoding.
    pub fn random<R>(rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
    {
        Self::new(std::array::from_fn(|_| rng.random()))
    }

    #[must_use]
    pub fn crop_at(&self, pos: Position) -> CropId {
        self.genes[pos.index()]
    }

    pub fn set(&mut self, pos: Position, crop: CropId) {
        self.genes[pos.index()] = crop;
    }

    #[must_use]
    pub fn as_slice(&self) -> &[CropId] {
        &self.genes
    }

    /// Iterates over `(position, crop)` pairs in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Position, CropId)> + '_ {
        self.genes
            .iter()
            .enumerate()
            .map(|(index, &crop)| (Position::from_index(index), crop))
    }

    /// Lays the genes out on a [`FieldGrid`].
    #[must_use]
    pub fn to_grid(&self) -> FieldGrid<CropId> {
        FieldGrid::from_fn(|pos| self.crop_at(pos))
    }

    /// Returns the raw catalog indices.
    #[must_use]
    pub fn to_raw(&self) -> Vec<usize> {
        self.genes.iter().map(|crop| crop.index()).collect()
    }
}

impl TryFrom<Vec<usize>> for Genotype {
    type Error = GenotypeError;

    fn try_from(raw: Vec<usize>) -> Result<Self, Self::Error> {
        Self::from_slice(&raw)
    }
}

impl TryFrom<&[usize]> for Genotype {
    type Error = GenotypeError;

    fn try_from(raw: &[usize]) -> Result<Self, Self::Error> {
        Self::from_slice(raw)
    }
}

impl From<Genotype> for Vec<usize> {
    fn from(genotype: Genotype) -> Self {
        genotype.to_raw()
    }
}

impl fmt::Debug for Genotype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Genotype").field(&self.to_raw()).finish()
    }
}

/// Nine lines of nine space-separated crop names, each with inner spaces removed and
/// truncated to four characters.
impl fmt::Display for Genotype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.genes.chunks(FIELD_WIDTH).enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            for (j, crop) in row.iter().enumerate() {
                if j > 0 {
                    f.write_str(" ")?;
                }
                let short: String = crop
                    .name()
                    .chars()
                    .filter(|ch| !ch.is_whitespace())
                    .take(4)
                    .collect();
                write!(f, "{short:<4}")?;
            }
        }
        Ok(())
    }
}
