use filament_common::{ConfigurationError, ContactMatrix, ContactSizing, OverlapMap};

/// Number of segments used for a filament of `filament_length` points.
pub fn segment_count(filament_length: usize, segment_length: usize, sizing: ContactSizing) -> usize {
    match sizing {
        ContactSizing::Tight => filament_length.div_ceil(segment_length),
        ContactSizing::Legacy => filament_length / segment_length + 1,
    }
}

/// Aggregates point overlaps into a segment-level contact matrix.
///
/// Point `i` belongs to segment `i / segment_length`. Any overlap between a
/// point of segment `a` and a point of segment `b` marks `(a, b)`; the
/// diagonal is then forced to the self marker, replacing same-segment hits.
pub fn build(
    filament_length: usize,
    overlap_map: &OverlapMap,
    segment_length: usize,
    sizing: ContactSizing,
) -> Result<ContactMatrix, ConfigurationError> {
    if segment_length < 1 {
        return Err(ConfigurationError::InvalidSegmentLength(segment_length));
    }
    if filament_length < 1 {
        return Err(ConfigurationError::InvalidLength(filament_length));
    }
    if overlap_map.len() != filament_length {
        return Err(ConfigurationError::OverlapLengthMismatch {
            expected: filament_length,
            found: overlap_map.len(),
        });
    }

    let size = segment_count(filament_length, segment_length, sizing);
    let mut matrix = ContactMatrix::new(size, segment_length);

    for (i, overlaps) in overlap_map.iter().enumerate() {
        let segment_i = matrix.segment_of(i);
        for &j in overlaps {
            if j >= filament_length {
                return Err(ConfigurationError::OverlapIndexOutOfRange {
                    index: j,
                    length: filament_length,
                });
            }
            matrix.mark_contact(segment_i, matrix.segment_of(j));
        }
    }
    matrix.mark_diagonal();

    Ok(matrix)
}
