use super::frame::ReferenceFrame;
use super::ids::{AtomId, ChainId};
use crate::core::utils::identifiers::canonical_atom_name;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BaseType {
    Adenine,  // A
    Cytosine, // C
    Guanine,  // G
    Thymine,  // T
    Uracil,   // U
    Inosine,  // I
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BaseCategory {
    Purine,
    Pyrimidine,
    #[default]
    Other,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Invalid base type: '{0}'")]
pub struct ParseBaseTypeError(String);

impl BaseType {
    pub const ALL: [BaseType; 6] = [
        BaseType::Adenine,
        BaseType::Cytosine,
        BaseType::Guanine,
        BaseType::Thymine,
        BaseType::Uracil,
        BaseType::Inosine,
    ];

    pub fn one_letter(self) -> char {
        match self {
            BaseType::Adenine => 'A',
            BaseType::Cytosine => 'C',
            BaseType::Guanine => 'G',
            BaseType::Thymine => 'T',
            BaseType::Uracil => 'U',
            BaseType::Inosine => 'I',
        }
    }

    /// Case-insensitive inverse of [`BaseType::one_letter`].
    pub fn from_one_letter(letter: char) -> Option<Self> {
        match letter.to_ascii_uppercase() {
            'A' => Some(BaseType::Adenine),
            'C' => Some(BaseType::Cytosine),
            'G' => Some(BaseType::Guanine),
            'T' => Some(BaseType::Thymine),
            'U' => Some(BaseType::Uracil),
            'I' => Some(BaseType::Inosine),
            _ => None,
        }
    }

    pub fn category(self) -> BaseCategory {
        match self {
            BaseType::Adenine | BaseType::Guanine | BaseType::Inosine => BaseCategory::Purine,
            BaseType::Cytosine | BaseType::Thymine | BaseType::Uracil => BaseCategory::Pyrimidine,
        }
    }
}

impl FromStr for BaseType {
    type Err = ParseBaseTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let mut chars = trimmed.chars();
        if let (Some(letter), None) = (chars.next(), chars.next()) {
            if let Some(base) = BaseType::from_one_letter(letter) {
                return Ok(base);
            }
        }
        match trimmed.to_ascii_lowercase().as_str() {
            "adenine" => Ok(BaseType::Adenine),
            "cytosine" => Ok(BaseType::Cytosine),
            "guanine" => Ok(BaseType::Guanine),
            "thymine" => Ok(BaseType::Thymine),
            "uracil" => Ok(BaseType::Uracil),
            "inosine" => Ok(BaseType::Inosine),
            _ => Err(ParseBaseTypeError(s.to_string())),
        }
    }
}

impl fmt::Display for BaseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.one_letter())
    }
}

/// Base type plus modification flag, the key under which templates are stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BaseIdentity {
    pub base: BaseType,
    pub modified: bool,
}

impl BaseIdentity {
    pub fn new(base: BaseType, modified: bool) -> Self {
        Self { base, modified }
    }

    pub fn standard(base: BaseType) -> Self {
        Self::new(base, false)
    }

    /// Upper case for standard bases, lower case for modified ones (e.g. `u` for PSU).
    pub fn one_letter(&self) -> char {
        let letter = self.base.one_letter();
        if self.modified {
            letter.to_ascii_lowercase()
        } else {
            letter
        }
    }

    pub fn category(&self) -> BaseCategory {
        self.base.category()
    }
}

impl fmt::Display for BaseIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.one_letter())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Residue {
    pub name: String,                       // Residue name from source file (e.g., "DA", "PSU")
    pub number: isize,                      // Residue sequence number from source file
    pub insertion_code: Option<char>,       // PDB insertion code, if any
    pub chain_id: ChainId,                  // ID of the parent chain
    pub(crate) legacy_index: usize,         // 1-based order of insertion into the structure
    pub(crate) atoms: Vec<AtomId>,          // Atoms in the order they were added
    atom_name_map: HashMap<String, AtomId>, // Normalised atom name -> first atom with that name
    identity: Option<BaseIdentity>,
    frame: Option<ReferenceFrame>,
}

impl Residue {
    pub(crate) fn new(
        number: isize,
        insertion_code: Option<char>,
        name: &str,
        chain_id: ChainId,
        legacy_index: usize,
    ) -> Self {
        Self {
            name: name.trim().to_string(),
            number,
            insertion_code,
            chain_id,
            legacy_index,
            atoms: Vec::new(),
            atom_name_map: HashMap::new(),
            identity: None,
            frame: None,
        }
    }

    pub(crate) fn add_atom(&mut self, atom_name: &str, atom_id: AtomId) {
        self.atoms.push(atom_id);
        // Alternate locations repeat names; the first occurrence wins.
        self.atom_name_map
            .entry(canonical_atom_name(atom_name))
            .or_insert(atom_id);
    }

    pub fn atoms(&self) -> &[AtomId] {
        &self.atoms
    }

    /// Looks up an atom by name; see [`canonical_atom_name`] for the accepted spellings.
    pub fn get_atom_id_by_name(&self, name: &str) -> Option<AtomId> {
        self.atom_name_map.get(&canonical_atom_name(name)).copied()
    }

    pub fn legacy_index(&self) -> usize {
        self.legacy_index
    }

    /// Base identity recorded by the last successful frame fit.
    pub fn base_identity(&self) -> Option<BaseIdentity> {
        self.identity
    }

    /// One-letter code, or `'?'` while no frame has been fitted.
    pub fn one_letter_code(&self) -> char {
        self.identity.map_or('?', |identity| identity.one_letter())
    }

    pub fn category(&self) -> BaseCategory {
        self.identity
            .map_or(BaseCategory::Other, |identity| identity.category())
    }

    pub fn frame(&self) -> Option<&ReferenceFrame> {
        self.frame.as_ref()
    }

    pub fn has_frame(&self) -> bool {
        self.frame.is_some()
    }

    pub(crate) fn set_frame(&mut self, frame: ReferenceFrame, identity: BaseIdentity) {
        self.frame = Some(frame);
        self.identity = Some(identity);
    }

    pub(crate) fn clear_frame(&mut self) {
        self.frame = None;
        self.identity = None;
    }
}
