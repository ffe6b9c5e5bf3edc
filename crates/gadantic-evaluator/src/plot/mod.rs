//! Phenotype decoding: from a feasible genotype to a scored plot.
//!
//! # How It Works
//!
//! [`decode`] makes two passes over the field:
//!
//! 1. **Placement** - Scanning row-major, every cell not yet covered becomes the origin of a
//!    [`PlacedTile`] for the crop named there, and the tile claims its whole footprint
//! 2. **Buff propagation** - Every cell credits each orthogonal neighbor whose tile holds a
//!    different crop kind, incrementing that tile's counter for the perk of the crediting
//!    crop
//!
//! A tile *fully receives* a perk once its counter reaches the tile's footprint edge. A 1×1
//! crop needs one crediting cell, a 3×3 crop needs three.
//!
//! # Aggregates
//!
//! - **Coverage** per perk: total area of tiles fully receiving it (0..=81)
//! - **Distinct**: number of different crop kinds in the plot (1..=15)
//! - **Efficiency**: credits that moved a counter up to its threshold, divided by
//!   `4 × tile count` (each tile can cross once per perk), so the ratio lies in \[0, 1\]
//! - **Symmetry**: mirror and rotation match ratios, see [`Symmetry`]
//! - **Layout URL**: the canonical string understood by the external garden planner
//!
//! # Design Decisions
//!
//! Tiles live in an arena ([`Plot::tiles`]) and cells refer to them by [`TileId`]. Perk
//! counters are updated through the arena, so cells covered by the same tile always agree.
//!
//! Crop kinds, not tiles, decide whether a neighbor is credited: two adjacent tomato tiles
//! never buff each other.

use arrayvec::ArrayVec;
use gadantic_engine::{
    CROP_COUNT, CropId, FIELD_CELLS, FIELD_HEIGHT, FIELD_WIDTH, FieldGrid, Genotype, Perk,
    Position, Square, validate,
};
use serde::Serialize;

pub use self::{symmetry::*, table::*};

mod symmetry;
mod table;

/// Prefix of every canonical layout string.
pub const LAYOUT_URL_PREFIX: &str =
    "https://palia-garden-planner.vercel.app/?layout=v0.4_D-111-111-111_CR";

/// Side length of the blocks the layout string is grouped by.
const LAYOUT_BLOCK: usize = 3;

/// Index of a tile in [`Plot::tiles`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct TileId(u8);

impl TileId {
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// One placed crop instance with its perk counters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacedTile {
    origin: Position,
    crop: CropId,
    received: [usize; Perk::COUNT],
}

impl PlacedTile {
    fn new(origin: Position, crop: CropId) -> Self {
        Self {
            origin,
            crop,
            received: [0; Perk::COUNT],
        }
    }

    #[must_use]
    pub fn origin(&self) -> Position {
        self.origin
    }

    #[must_use]
    pub fn crop(&self) -> CropId {
        self.crop
    }

    #[must_use]
    pub fn edge(&self) -> usize {
        self.crop.edge()
    }

    #[must_use]
    pub fn area(&self) -> usize {
        self.crop.area()
    }

    #[must_use]
    pub fn square(&self) -> Square {
        Square::new(self.origin, self.edge())
    }

    /// Number of credits received for `perk`.
    #[must_use]
    pub fn received(&self, perk: Perk) -> usize {
        self.received[perk.index()]
    }

    /// Returns `true` once the counter for `perk` reached the footprint edge.
    #[must_use]
    pub fn has(&self, perk: Perk) -> bool {
        self.received(perk) >= self.edge()
    }

    /// Perks fully received, in [`Perk::ALL`] order.
    pub fn perks(&self) -> impl Iterator<Item = Perk> + '_ {
        Perk::ALL.into_iter().filter(|perk| self.has(*perk))
    }

    /// Adds one credit for `perk`; returns `true` if this credit reached the threshold.
    fn credit(&mut self, perk: Perk) -> bool {
        let before = self.has(perk);
        self.received[perk.index()] += 1;
        !before && self.has(perk)
    }
}

/// Error returned by [`try_decode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum DecodeError {
    #[display("genotype is not a feasible placement; repair it before decoding")]
    Infeasible,
}

/// A decoded plot. Immutable once produced.
#[derive(Debug, Clone, PartialEq)]
pub struct Plot {
    tiles: ArrayVec<PlacedTile, FIELD_CELLS>,
    owners: FieldGrid<TileId>,
    coverage: [usize; Perk::COUNT],
    distinct: usize,
    efficiency: f64,
    symmetry: Symmetry,
    layout_url: String,
}

/// Decodes a feasible genotype.
///
/// # Panics
///
/// Panics if the genotype does not pass [`validate`]. Use [`try_decode`] for genotypes
/// that were not repaired.
#[must_use]
pub fn decode(genotype: &Genotype) -> Plot {
    try_decode(genotype).unwrap_or_else(|e| panic!("cannot decode genotype: {e}"))
}

/// Decodes a genotype, failing with [`DecodeError::Infeasible`] if it does not validate.
pub fn try_decode(genotype: &Genotype) -> Result<Plot, DecodeError> {
    if !validate(genotype) {
        return Err(DecodeError::Infeasible);
    }

    let mut tiles = ArrayVec::<PlacedTile, FIELD_CELLS>::new();
    let mut owners = FieldGrid::filled(TileId(0));
    let mut owned = FieldGrid::filled(false);
    for (pos, crop) in genotype.iter() {
        if *owned.at(pos) {
            continue;
        }
        #[expect(clippy::cast_possible_truncation)]
        let id = TileId(tiles.len() as u8);
        let tile = PlacedTile::new(pos, crop);
        for cell in tile.square().cells() {
            owners.set(cell, id);
            owned.set(cell, true);
        }
        tiles.push(tile);
    }

    let mut crossings = 0_usize;
    for pos in FieldGrid::<()>::positions() {
        let source = tiles[owners.at(pos).index()].crop();
        for neighbor in owners.neighbors(pos) {
            let target = &mut tiles[owners.at(neighbor).index()];
            if target.crop() != source && target.credit(source.perk()) {
                crossings += 1;
            }
        }
    }

    let mut coverage = [0; Perk::COUNT];
    let mut kinds = [false; CROP_COUNT];
    for tile in &tiles {
        for perk in tile.perks() {
            coverage[perk.index()] += tile.area();
        }
        kinds[tile.crop().index()] = true;
    }
    let distinct = kinds.iter().filter(|seen| **seen).count();

    #[expect(clippy::cast_precision_loss)]
    let efficiency = crossings as f64 / (4 * tiles.len()) as f64;

    let crops = FieldGrid::from_fn(|pos| tiles[owners.at(pos).index()].crop());
    let symmetry = Symmetry::of(&crops);
    let layout_url = layout_url(&crops);

    tracing::trace!(
        tiles = tiles.len(),
        ?coverage,
        distinct,
        efficiency,
        "decoded plot"
    );

    Ok(Plot {
        tiles,
        owners,
        coverage,
        distinct,
        efficiency,
        symmetry,
        layout_url,
    })
}

fn layout_url(crops: &FieldGrid<CropId>) -> String {
    let mut url = String::from(LAYOUT_URL_PREFIX);
    for block_y in (0..FIELD_HEIGHT).step_by(LAYOUT_BLOCK) {
        for block_x in (0..FIELD_WIDTH).step_by(LAYOUT_BLOCK) {
            url.push('-');
            for y in block_y..block_y + LAYOUT_BLOCK {
                for x in block_x..block_x + LAYOUT_BLOCK {
                    url.push_str(crops.at(Position::new(x, y)).code());
                }
            }
        }
    }
    url
}

impl Plot {
    /// Distinct tiles, ordered by origin in row-major order.
    #[must_use]
    pub fn tiles(&self) -> &[PlacedTile] {
        &self.tiles
    }

    #[must_use]
    pub fn tile(&self, id: TileId) -> &PlacedTile {
        &self.tiles[id.index()]
    }

    /// Id of the tile covering `pos`.
    #[must_use]
    pub fn owner_at(&self, pos: Position) -> TileId {
        *self.owners.at(pos)
    }

    /// The tile covering `pos`.
    #[must_use]
    pub fn tile_at(&self, pos: Position) -> &PlacedTile {
        self.tile(self.owner_at(pos))
    }

    /// The crop growing on `pos`.
    #[must_use]
    pub fn crop_at(&self, pos: Position) -> CropId {
        self.tile_at(pos).crop()
    }

    /// Area of the tiles fully receiving `perk`.
    #[must_use]
    pub fn coverage(&self, perk: Perk) -> usize {
        self.coverage[perk.index()]
    }

    /// [`Plot::coverage`] as a fraction of the field.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn coverage_ratio(&self, perk: Perk) -> f64 {
        self.coverage(perk) as f64 / FIELD_CELLS as f64
    }

    /// Number of different crop kinds.
    #[must_use]
    pub fn distinct(&self) -> usize {
        self.distinct
    }

    /// [`Plot::distinct`] as a fraction of the catalog.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn diversity(&self) -> f64 {
        self.distinct as f64 / CROP_COUNT as f64
    }

    #[must_use]
    pub fn efficiency(&self) -> f64 {
        self.efficiency
    }

    #[must_use]
    pub fn symmetry(&self) -> Symmetry {
        self.symmetry
    }

    /// Canonical layout string for the external garden planner.
    #[must_use]
    pub fn layout_url(&self) -> &str {
        &self.layout_url
    }

    /// Serializable report of the aggregates and tiles.
    #[must_use]
    pub fn summary(&self) -> PlotSummary {
        let coverage = |perk| CoverageSummary::new(self.coverage(perk), FIELD_CELLS);
        PlotSummary {
            water: coverage(Perk::Water),
            weed: coverage(Perk::Weed),
            quality: coverage(Perk::Quality),
            harvest: coverage(Perk::Harvest),
            distinct: CoverageSummary::new(self.distinct, CROP_COUNT),
            efficiency: self.efficiency,
            symmetry: self.symmetry,
            layout_url: self.layout_url.clone(),
            tiles: self
                .tiles
                .iter()
                .map(|tile| TileSummary {
                    origin: tile.origin(),
                    crop: tile.crop(),
                    name: tile.crop().name(),
                    edge: tile.edge(),
                    perks: tile.perks().collect(),
                })
                .collect(),
        }
    }
}

/// A count together with its integer percentage of the possible maximum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CoverageSummary {
    pub count: usize,
    pub percent: usize,
}

impl CoverageSummary {
    fn new(count: usize, total: usize) -> Self {
        Self {
            count,
            percent: 100 * count / total,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TileSummary {
    pub origin: Position,
    pub crop: CropId,
    pub name: &'static str,
    pub edge: usize,
    pub perks: Vec<Perk>,
}

/// Serializable view of a [`Plot`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlotSummary {
    pub water: CoverageSummary,
    pub weed: CoverageSummary,
    pub quality: CoverageSummary,
    pub harvest: CoverageSummary,
    pub distinct: CoverageSummary,
    pub efficiency: f64,
    pub symmetry: Symmetry,
    pub layout_url: String,
    pub tiles: Vec<TileSummary>,
}
