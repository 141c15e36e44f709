use crate::error::ConfigurationError;
use serde::{Deserialize, Serialize};

pub const NO_CONTACT: u8 = 0;
pub const CONTACT: u8 = 1;
/// Diagonal marker. A segment is trivially in contact with itself.
pub const SELF_MARK: u8 = 2;

/// Segment-by-segment contact flags, stored row-major.
///
/// Off-diagonal cells are [`CONTACT`] or [`NO_CONTACT`]; the diagonal is
/// always [`SELF_MARK`] once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "StoredContactMatrix")]
pub struct ContactMatrix {
    size: usize,
    segment_length: usize,
    cells: Vec<u8>,
}

/// On-disk shape of [`ContactMatrix`], checked before it becomes one.
#[derive(Deserialize)]
struct StoredContactMatrix {
    size: usize,
    segment_length: usize,
    cells: Vec<u8>,
}

impl TryFrom<StoredContactMatrix> for ContactMatrix {
    type Error = ConfigurationError;

    fn try_from(stored: StoredContactMatrix) -> Result<Self, Self::Error> {
        let expected = stored.size.checked_mul(stored.size).ok_or(ConfigurationError::MatrixShape {
            size: stored.size,
            expected: usize::MAX,
            found: stored.cells.len(),
        })?;
        if stored.cells.len() != expected {
            return Err(ConfigurationError::MatrixShape {
                size: stored.size,
                expected,
                found: stored.cells.len(),
            });
        }
        Ok(ContactMatrix {
            size: stored.size,
            segment_length: stored.segment_length,
            cells: stored.cells,
        })
    }
}

impl ContactMatrix {
    /// A `size x size` matrix of [`NO_CONTACT`].
    pub fn new(size: usize, segment_length: usize) -> Self {
        ContactMatrix {
            size,
            segment_length,
            cells: vec![NO_CONTACT; size * size],
        }
    }

    /// Number of segments (rows and columns).
    pub fn size(&self) -> usize {
        self.size
    }

    /// Points per segment.
    pub fn segment_length(&self) -> usize {
        self.segment_length
    }

    /// Segment holding filament index `index`.
    pub fn segment_of(&self, index: usize) -> usize {
        index / self.segment_length.max(1)
    }

    pub fn get(&self, a: usize, b: usize) -> Option<u8> {
        if a < self.size && b < self.size {
            Some(self.cells[a * self.size + b])
        } else {
            None
        }
    }

    pub fn row(&self, a: usize) -> &[u8] {
        &self.cells[a * self.size..(a + 1) * self.size]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[u8]> + '_ {
        self.cells.chunks(self.size.max(1))
    }

    /// Marks `a` and `b` as touching. Out-of-range segments are ignored.
    pub fn mark_contact(&mut self, a: usize, b: usize) {
        if a < self.size && b < self.size {
            self.cells[a * self.size + b] = CONTACT;
        }
    }

    /// Overwrites the whole diagonal with [`SELF_MARK`].
    pub fn mark_diagonal(&mut self) {
        for a in 0..self.size {
            self.cells[a * self.size + a] = SELF_MARK;
        }
    }

    /// Off-diagonal contacts, counting each unordered segment pair once.
    pub fn contact_count(&self) -> usize {
        (0..self.size)
            .flat_map(|a| (a + 1..self.size).map(move |b| (a, b)))
            .filter(|&(a, b)| self.cells[a * self.size + b] == CONTACT)
            .count()
    }

    pub fn is_symmetric(&self) -> bool {
        (0..self.size).all(|a| {
            (a + 1..self.size).all(|b| self.cells[a * self.size + b] == self.cells[b * self.size + a])
        })
    }
}
