//! Recorded plots shared by the unit tests.

use gadantic_engine::{FIELD_CELLS, Genotype};

/// Five 3×3 apple trees in a checkerboard, separated by cotton, pumpkins and onions.
#[rustfmt::skip]
pub(crate) const FEW_CROPS: [usize; FIELD_CELLS] = [
    14, 0, 0, 9, 13, 0, 14, 0, 0,
     0, 0, 0, 9,  0, 0,  0, 0, 0,
     0, 0, 0, 7,  9, 9,  0, 0, 0,
    13, 0, 9, 14, 0, 0,  7, 9, 9,
     0, 0, 9, 0,  0, 0,  9, 13, 0,
     9, 9, 7, 0,  0, 0,  9, 0, 0,
    14, 0, 0, 9,  9, 7, 14, 0, 0,
     0, 0, 0, 13, 0, 9,  0, 0, 0,
     0, 0, 0, 0,  0, 9,  0, 0, 0,
];

pub(crate) const FEW_CROPS_URL: &str = "https://palia-garden-planner.vercel.app/?layout=v0.4_D-111-111-111_CR-AAAAAAAAA-CoPmPmCoPmPmOCoCo-AAAAAAAAA-PmPmCoPmPmCoCoCoO-AAAAAAAAA-OCoCoCoPmPmCoPmPm-AAAAAAAAA-CoCoOPmPmCoPmPmCo-AAAAAAAAA";

/// Every catalog crop once in the top rows, apple trees below.
#[rustfmt::skip]
pub(crate) const ALL_CROPS: [usize; FIELD_CELLS] = [
     0,  1, 2,  3, 4,  5, 6,  7, 8,
     9, 10, 0, 11, 0, 12, 0, 13, 0,
     0,  0, 0,  0, 0,  0, 0,  0, 0,
    14,  0, 0, 14, 0,  0, 14, 0, 0,
     0,  0, 0,  0, 0,  0, 0,  0, 0,
     0,  0, 0,  0, 0,  0, 0,  0, 0,
    14,  0, 0, 14, 0,  0, 14, 0, 0,
     0,  0, 0,  0, 0,  0, 0,  0, 0,
     0,  0, 0,  0, 0,  0, 0,  0, 0,
];

pub(crate) const ALL_CROPS_URL: &str = "https://palia-garden-planner.vercel.app/?layout=v0.4_D-111-111-111_CR-TPCbCoBBTBB-RWCrBtBtSBtBtS-COBkSPmPmSPmPm-AAAAAAAAA-AAAAAAAAA-AAAAAAAAA-AAAAAAAAA-AAAAAAAAA-AAAAAAAAA";

pub(crate) fn genotype(raw: &[usize]) -> Genotype {
    Genotype::from_slice(raw).unwrap()
}
