use super::frame::ReferenceFrame;
use super::hbond::HydrogenBond;

/// Pair classification derived from the simplified pair parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PairClass {
    #[default]
    Unclassified,
    Wobble,
    WatsonCrick,
}

/// An accepted base pair.
///
/// Residues are 1-based legacy indices with `residue_i < residue_j`; hydrogen bonds
/// name the `residue_i` atom first.
#[derive(Debug, Clone, PartialEq)]
pub struct BasePair {
    pub residue_i: usize,
    pub residue_j: usize,
    pub class: PairClass,
    pub frame_i: ReferenceFrame,
    pub frame_j: ReferenceFrame,
    pub score: f64,
    pub hbonds: Vec<HydrogenBond>,
}

impl BasePair {
    pub fn contains(&self, legacy_index: usize) -> bool {
        self.residue_i == legacy_index || self.residue_j == legacy_index
    }

    /// The other residue of the pair, if `legacy_index` is one of them.
    pub fn partner_of(&self, legacy_index: usize) -> Option<usize> {
        match legacy_index {
            i if i == self.residue_i => Some(self.residue_j),
            j if j == self.residue_j => Some(self.residue_i),
            _ => None,
        }
    }

    pub fn is_watson_crick(&self) -> bool {
        self.class == PairClass::WatsonCrick
    }
}
