//! Letter-coded matrix registry.
//!
//! Identifiers run `A..Z`, `AA..AZ`, `BA..` (bijective base 26) in allocation
//! order. A deleted identifier goes back into a free pool and the lowest
//! freed one is handed out before any new identifier is minted.
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

use matstep_engine::Matrix;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MatrixId(usize);

impl MatrixId {
    pub fn from_index(index: usize) -> Self {
        Self(index)
    }

    /// Zero-based allocation index: `A` is 0, `Z` is 25, `AA` is 26.
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for MatrixId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut letters = Vec::new();
        let mut n = self.0 + 1;
        while n > 0 {
            n -= 1;
            letters.push(b'A' + (n % 26) as u8);
            n /= 26;
        }
        letters.reverse();
        f.write_str(&String::from_utf8_lossy(&letters))
    }
}

impl FromStr for MatrixId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim();
        if code.is_empty() || !code.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(format!("Invalid matrix ID: {}", s));
        }

        let mut n: usize = 0;
        for c in code.bytes().map(|b| b.to_ascii_uppercase()) {
            n = n
                .checked_mul(26)
                .and_then(|n| n.checked_add((c - b'A') as usize + 1))
                .ok_or_else(|| format!("Matrix ID out of range: {}", s))?;
        }
        Ok(MatrixId(n - 1))
    }
}

#[derive(Debug, Clone, Default)]
pub struct MatrixStore {
    matrices: BTreeMap<MatrixId, Matrix>,
    freed: BTreeSet<MatrixId>,
    next: usize,
}

impl MatrixStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `matrix` under the lowest freed identifier, or a fresh one.
    pub fn insert(&mut self, matrix: Matrix) -> MatrixId {
        let id = match self.freed.pop_first() {
            Some(id) => id,
            None => {
                let id = MatrixId(self.next);
                self.next += 1;
                id
            }
        };
        log::trace!("storing {} matrix as {}", matrix.shape(), id);
        self.matrices.insert(id, matrix);
        id
    }

    /// Look up by textual identifier; unknown or malformed codes give `None`.
    pub fn get(&self, id: &str) -> Option<&Matrix> {
        let id = id.parse::<MatrixId>().ok()?;
        self.matrices.get(&id)
    }

    pub fn remove(&mut self, id: &str) -> Option<Matrix> {
        let id = id.parse::<MatrixId>().ok()?;
        let matrix = self.matrices.remove(&id)?;
        self.freed.insert(id);
        Some(matrix)
    }

    /// Stored matrices in identifier order.
    pub fn list(&self) -> impl Iterator<Item = (MatrixId, &Matrix)> + '_ {
        self.matrices.iter().map(|(id, matrix)| (*id, matrix))
    }

    pub fn len(&self) -> usize {
        self.matrices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matrices.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_use_bijective_base_26() {
        for (index, code) in [(0, "A"), (25, "Z"), (26, "AA"), (51, "AZ"), (52, "BA"), (701, "ZZ"), (702, "AAA")] {
            let id = MatrixId::from_index(index);
            assert_eq!(id.to_string(), code);
            assert_eq!(code.parse::<MatrixId>().unwrap(), id);
        }
    }

    #[test]
    fn malformed_ids_are_rejected() {
        assert!("".parse::<MatrixId>().is_err());
        assert!("A1".parse::<MatrixId>().is_err());
        assert!("Ä".parse::<MatrixId>().is_err());
    }
}
