use std::fmt;

use serde::Serialize;

use super::{PlacementGrid, Square, VisitingOrder, validate};
use crate::{CropId, FIELD_HEIGHT, FIELD_WIDTH, Genotype, Position};

/// A gene replacement applied by the repairer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Substitution {
    pub position: Position,
    pub from: CropId,
    pub to: CropId,
}

impl Substitution {
    /// Writes the replacement crop into `genotype`.
    pub fn apply(&self, genotype: &mut Genotype) {
        genotype.set(self.position, self.to);
    }
}

impl fmt::Display for Substitution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} -> {}", self.position, self.from, self.to)
    }
}

/// Computes the substitutions [`repair`] would apply, without applying them.
///
/// Returns an empty list when the genotype already validates. Otherwise the cells are
/// visited in `order` against an empty placement grid; each footprint starts at its
/// requested edge clipped to the field, and shrinks one step at a time while it is
/// rejected. A footprint that ends smaller than requested yields a substitution by a crop
/// of the same perk with the reached edge ([`CropId::substitute`]).
#[must_use]
pub fn plan_repair(genotype: &Genotype, order: &VisitingOrder) -> Vec<Substitution> {
    if validate(genotype) {
        return vec![];
    }

    let mut grid = PlacementGrid::new();
    let mut substitutions = vec![];
    for pos in order.iter() {
        let crop = genotype.crop_at(pos);
        let requested = crop.edge();
        let clipped = requested.min(FIELD_WIDTH - pos.x).min(FIELD_HEIGHT - pos.y);
        let placed = grid.place_shrinking(Square::new(pos, clipped));
        if placed.edge < requested {
            let to = CropId::substitute(crop.perk(), placed.edge);
            tracing::trace!(
                %pos,
                from = crop.name(),
                to = to.name(),
                edge = placed.edge,
                "shrinking crop"
            );
            substitutions.push(Substitution {
                position: pos,
                from: crop,
                to,
            });
        }
    }
    substitutions
}

/// Returns a feasible genotype derived from `genotype`.
///
/// Feasible input is returned unchanged. Otherwise the substitutions from [`plan_repair`]
/// are applied as one batch; footprints visited earlier in `order` keep their size.
/// The result always satisfies [`validate`].
///
/// # Example
///
/// ```
/// use gadantic_engine::{CropId, Genotype, Position, VisitingOrder, repair, validate};
///
/// // Two overlapping 2×2 footprints.
/// let mut genotype = Genotype::filled(CropId::TOMATOES);
/// genotype.set(Position::new(0, 0), CropId::PEPPERS);
/// genotype.set(Position::new(1, 1), CropId::PUMPKINS);
/// assert!(!validate(&genotype));
///
/// let repaired = repair(&genotype, &VisitingOrder::row_major());
/// assert!(validate(&repaired));
/// assert_eq!(repaired.crop_at(Position::new(0, 0)), CropId::PEPPERS);
/// assert_eq!(repaired.crop_at(Position::new(1, 1)), CropId::COTTON);
/// ```
#[must_use]
pub fn repair(genotype: &Genotype, order: &VisitingOrder) -> Genotype {
    apply_repair(genotype, &plan_repair(genotype, order))
}

/// Applies a batch of substitutions computed by [`plan_repair`] for `genotype`.
///
/// Every substitution is written into a copy of `genotype`; none of them sees the others.
#[must_use]
pub fn apply_repair(genotype: &Genotype, substitutions: &[Substitution]) -> Genotype {
    let mut repaired = genotype.clone();
    for sub in substitutions {
        sub.apply(&mut repaired);
    }
    if !substitutions.is_empty() {
        tracing::debug!(count = substitutions.len(), "repaired genotype");
    }
    repaired
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng as _;
    use rand_pcg::Pcg32;

    use super::*;
    use crate::OrderSeed;

    fn genotype_with(base: CropId, crops: &[(usize, usize, CropId)]) -> Genotype {
        let mut genotype = Genotype::filled(base);
        for &(x, y, crop) in crops {
            genotype.set(Position::new(x, y), crop);
        }
        genotype
    }

    fn all_orders_for_test(rng: &mut Pcg32) -> Vec<VisitingOrder> {
        let mut orders = vec![
            VisitingOrder::row_major(),
            VisitingOrder::prioritized(&[Position::new(8, 8)]),
        ];
        orders.extend((0..4).map(|_| VisitingOrder::shuffled(rng)));
        orders
    }

    #[test]
    fn test_overlap_first_visited_wins() {
        let genotype = genotype_with(
            CropId::TOMATOES,
            &[(0, 0, CropId::PEPPERS), (1, 1, CropId::PUMPKINS)],
        );
        assert!(!validate(&genotype));

        let upper_left = repair(&genotype, &VisitingOrder::prioritized(&[Position::new(0, 0)]));
        assert!(validate(&upper_left));
        assert_eq!(upper_left.crop_at(Position::new(0, 0)), CropId::PEPPERS);
        assert_eq!(upper_left.crop_at(Position::new(1, 1)), CropId::COTTON);

        let lower_right = repair(&genotype, &VisitingOrder::prioritized(&[Position::new(1, 1)]));
        assert!(validate(&lower_right));
        assert_eq!(lower_right.crop_at(Position::new(0, 0)), CropId::COTTON);
        assert_eq!(lower_right.crop_at(Position::new(1, 1)), CropId::PUMPKINS);
    }

    #[test]
    fn test_overlap_side_by_side() {
        let genotype = genotype_with(
            CropId::TOMATOES,
            &[(1, 0, CropId::BLUEBERRIES), (0, 1, CropId::BEANS)],
        );

        let upper_right = repair(&genotype, &VisitingOrder::prioritized(&[Position::new(1, 0)]));
        assert_eq!(upper_right.crop_at(Position::new(1, 0)), CropId::BLUEBERRIES);
        assert_eq!(upper_right.crop_at(Position::new(0, 1)), CropId::RICE);

        let lower_left = repair(&genotype, &VisitingOrder::prioritized(&[Position::new(0, 1)]));
        assert_eq!(lower_left.crop_at(Position::new(1, 0)), CropId::RICE);
        assert_eq!(lower_left.crop_at(Position::new(0, 1)), CropId::BEANS);
    }

    #[test]
    fn test_overflow_shrinks_to_same_perk() {
        // right edge
        let genotype = genotype_with(CropId::TOMATOES, &[(7, 6, CropId::APPLES)]);
        let repaired = repair(&genotype, &VisitingOrder::row_major());
        assert_eq!(repaired.crop_at(Position::new(7, 6)), CropId::BLUEBERRIES);
        assert!(validate(&repaired));

        // bottom edge
        let genotype = genotype_with(CropId::TOMATOES, &[(6, 7, CropId::APPLES)]);
        let repaired = repair(&genotype, &VisitingOrder::row_major());
        assert_eq!(repaired.crop_at(Position::new(6, 7)), CropId::BLUEBERRIES);

        // corner
        let genotype = genotype_with(CropId::TOMATOES, &[(8, 8, CropId::PUMPKINS)]);
        let repaired = repair(&genotype, &VisitingOrder::row_major());
        assert_eq!(repaired.crop_at(Position::new(8, 8)), CropId::COTTON);
    }

    #[test]
    fn test_plan_reports_substitutions() {
        let genotype = genotype_with(CropId::CORN, &[(8, 0, CropId::BEANS)]);
        let plan = plan_repair(&genotype, &VisitingOrder::row_major());
        assert_eq!(
            plan,
            vec![Substitution {
                position: Position::new(8, 0),
                from: CropId::BEANS,
                to: CropId::RICE,
            }]
        );
        assert_eq!(plan[0].to_string(), "(8, 0): Beans -> Rice");
    }

    #[test]
    fn test_applying_plan_matches_repair() {
        let mut rng = Pcg32::seed_from_u64(5);
        for _ in 0..50 {
            let genotype = Genotype::random(&mut rng);
            let order = VisitingOrder::shuffled(&mut rng);
            let plan = plan_repair(&genotype, &order);
            assert_eq!(apply_repair(&genotype, &plan), repair(&genotype, &order));
        }
        let genotype = Genotype::filled(CropId::WHEAT);
        assert_eq!(apply_repair(&genotype, &[]), genotype);
    }

    #[test]
    fn test_valid_genotype_is_untouched() {
        // A gene inside a larger footprint would be shrunk if visited before its owner.
        let genotype = genotype_with(
            CropId::TOMATOES,
            &[(0, 0, CropId::APPLES), (1, 1, CropId::BLUEBERRIES), (0, 3, CropId::PUMPKINS)],
        );
        assert!(validate(&genotype));

        let order = VisitingOrder::prioritized(&[Position::new(1, 1)]);
        assert!(plan_repair(&genotype, &order).is_empty());
        assert_eq!(repair(&genotype, &order), genotype);

        let mut rng = Pcg32::seed_from_u64(5);
        for order in all_orders_for_test(&mut rng) {
            assert_eq!(repair(&genotype, &order), genotype);
        }
    }

    #[test]
    fn test_repair_result_always_validates() {
        let mut rng = Pcg32::seed_from_u64(42);
        for _ in 0..200 {
            let genotype = Genotype::random(&mut rng);
            for order in all_orders_for_test(&mut rng) {
                let repaired = repair(&genotype, &order);
                assert!(validate(&repaired), "not repaired:\n{genotype}\nresult:\n{repaired}");
                // idempotence
                assert_eq!(repair(&repaired, &order), repaired);
            }
        }
    }

    #[test]
    fn test_repair_from_seed_is_reproducible() {
        let mut rng = Pcg32::seed_from_u64(8);
        let genotype = Genotype::random(&mut rng);
        let seed = OrderSeed::new([7; 16]);
        let a = repair(&genotype, &VisitingOrder::from_seed(seed));
        let b = repair(&genotype, &VisitingOrder::from_seed(seed));
        assert_eq!(a, b);
    }

    #[test]
    fn test_repair_keeps_perks() {
        let mut rng = Pcg32::seed_from_u64(1);
        for _ in 0..50 {
            let genotype = Genotype::random(&mut rng);
            let order = VisitingOrder::shuffled(&mut rng);
            for sub in plan_repair(&genotype, &order) {
                assert_eq!(sub.from.perk(), sub.to.perk());
                assert!(sub.to.edge() < sub.from.edge());
                assert_eq!(genotype.crop_at(sub.position), sub.from);
            }
        }
    }
}
