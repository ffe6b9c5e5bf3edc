use gadantic_engine::{CropId, FIELD_HEIGHT, FIELD_WIDTH, FieldGrid, Position};
use serde::Serialize;

/// How closely a plot matches its mirror images and its half-turn rotation.
///
/// Each ratio is the fraction of compared cell pairs holding equivalent crops (same perk
/// and footprint size, see [`CropId::is_equivalent`]), in \[0, 1\]:
///
/// - `horizontal`: left half against right half, 36 pairs
/// - `vertical`: top half against bottom half, 36 pairs
/// - `rotational`: each cell against its 180° image, 40 pairs (the center cell is skipped)
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Symmetry {
    pub horizontal: f64,
    pub vertical: f64,
    pub rotational: f64,
}

impl Symmetry {
    /// Measures the symmetry of the per-cell crop layout.
    #[must_use]
    pub fn of(crops: &FieldGrid<CropId>) -> Self {
        let mirror_x = |pos: Position| Position::new(FIELD_WIDTH - 1 - pos.x, pos.y);
        let mirror_y = |pos: Position| Position::new(pos.x, FIELD_HEIGHT - 1 - pos.y);
        let rotate = |pos: Position| mirror_x(mirror_y(pos));

        let left_half = (0..FIELD_HEIGHT)
            .flat_map(|y| (0..FIELD_WIDTH / 2).map(move |x| Position::new(x, y)));
        let top_half = (0..FIELD_HEIGHT / 2)
            .flat_map(|y| (0..FIELD_WIDTH).map(move |x| Position::new(x, y)));
        let center_column = (0..FIELD_HEIGHT / 2).map(|y| Position::new(FIELD_WIDTH / 2, y));

        Self {
            horizontal: match_ratio(crops, left_half.clone().map(|pos| (pos, mirror_x(pos)))),
            vertical: match_ratio(crops, top_half.map(|pos| (pos, mirror_y(pos)))),
            rotational: match_ratio(
                crops,
                left_half.chain(center_column).map(|pos| (pos, rotate(pos))),
            ),
        }
    }
}

#[expect(clippy::cast_precision_loss)]
fn match_ratio<I>(crops: &FieldGrid<CropId>, pairs: I) -> f64
where
    I: Iterator<Item = (Position, Position)>,
{
    let mut total = 0_usize;
    let mut matches = 0_usize;
    for (a, b) in pairs {
        total += 1;
        if crops.at(a).is_equivalent(*crops.at(b)) {
            matches += 1;
        }
    }
    matches as f64 / total as f64
}

#[cfg(test)]
mod tests {
    use gadantic_engine::Genotype;

    use super::*;
    use crate::{
        plot::decode,
        test_fixtures::{ALL_CROPS, FEW_CROPS, genotype},
    };

    fn approx(actual: f64, expected: f64) {
        assert!((actual - expected).abs() < 1e-12, "{actual} != {expected}");
    }

    #[test]
    fn test_uniform_field_is_symmetric() {
        let symmetry = Symmetry::of(&FieldGrid::filled(CropId::WHEAT));
        approx(symmetry.horizontal, 1.0);
        approx(symmetry.vertical, 1.0);
        approx(symmetry.rotational, 1.0);
    }

    #[test]
    fn test_equivalent_crops_match() {
        // Rice and Corn share perk and size.
        let mut crops = FieldGrid::filled(CropId::RICE);
        for y in 0..FIELD_HEIGHT {
            crops.set(Position::new(8, y), CropId::CORN);
        }
        approx(Symmetry::of(&crops).horizontal, 1.0);

        crops.set(Position::new(8, 0), CropId::COTTON);
        approx(Symmetry::of(&crops).horizontal, 35.0 / 36.0);
        approx(Symmetry::of(&crops).vertical, 35.0 / 36.0);
        approx(Symmetry::of(&crops).rotational, 39.0 / 40.0);
    }

    #[test]
    fn test_center_cell_is_ignored() {
        let mut crops = FieldGrid::filled(CropId::TOMATOES);
        crops.set(Position::new(4, 4), CropId::CARROTS);
        let symmetry = Symmetry::of(&crops);
        approx(symmetry.horizontal, 1.0);
        approx(symmetry.vertical, 1.0);
        approx(symmetry.rotational, 1.0);
    }

    #[test]
    fn test_fixture_symmetry() {
        let few = decode(&genotype(&FEW_CROPS)).symmetry();
        approx(few.horizontal, 24.0 / 36.0);
        approx(few.vertical, 24.0 / 36.0);
        approx(few.rotational, 1.0);

        let all = decode(&genotype(&ALL_CROPS)).symmetry();
        approx(all.horizontal, 25.0 / 36.0);
        approx(all.vertical, 9.0 / 36.0);
        approx(all.rotational, 13.0 / 40.0);

        let uniform = decode(&Genotype::filled(CropId::ONIONS)).symmetry();
        approx(uniform.rotational, 1.0);
    }
}
