use super::validation::ValidationResult;
use std::collections::HashMap;

/// Validation results keyed by the unordered residue pair, plus each residue's
/// valid partners in ascending order.
#[derive(Debug, Default, Clone)]
pub struct ValidationCache {
    data: HashMap<(usize, usize), ValidationResult>,
    partners: HashMap<usize, Vec<usize>>,
}

fn key(residue_i: usize, residue_j: usize) -> (usize, usize) {
    (residue_i.min(residue_j), residue_i.max(residue_j))
}

impl ValidationCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, result: ValidationResult) {
        let (i, j) = (result.residue_i, result.residue_j);
        let is_valid = result.is_valid;
        let previous = self.data.insert(key(i, j), result);

        if previous.is_some_and(|old| old.is_valid) {
            self.remove_partner(i, j);
            self.remove_partner(j, i);
        }
        if is_valid {
            self.add_partner(i, j);
            self.add_partner(j, i);
        }
    }

    /// Result for the pair, in either argument order.
    pub fn get(&self, residue_i: usize, residue_j: usize) -> Option<&ValidationResult> {
        self.data.get(&key(residue_i, residue_j))
    }

    pub fn iter(&self) -> impl Iterator<Item = &ValidationResult> {
        self.data.values()
    }

    /// All results ordered by their residue key.
    pub fn sorted(&self) -> Vec<&ValidationResult> {
        let mut results: Vec<_> = self.data.iter().collect();
        results.sort_unstable_by_key(|(key, _)| **key);
        results.into_iter().map(|(_, result)| result).collect()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn valid_count(&self) -> usize {
        self.data.values().filter(|result| result.is_valid).count()
    }

    /// Residues forming a valid pair with `residue`, ascending.
    pub fn valid_partners(&self, residue: usize) -> &[usize] {
        self.partners.get(&residue).map_or(&[], Vec::as_slice)
    }

    fn add_partner(&mut self, residue: usize, partner: usize) {
        let list = self.partners.entry(residue).or_default();
        if let Err(position) = list.binary_search(&partner) {
            list.insert(position, partner);
        }
    }

    fn remove_partner(&mut self, residue: usize, partner: usize) {
        if let Some(list) = self.partners.get_mut(&residue) {
            if let Ok(position) = list.binary_search(&partner) {
                list.remove(position);
            }
        }
    }
}
