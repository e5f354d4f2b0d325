//! Bit-exact comparison of a recovered sequence against its reference.

use crate::error::CodecError;

/// Index of the first element where `a` and `b` disagree, counting a length
/// difference as a disagreement at the shorter length.
pub fn first_difference(a: &[u32], b: &[u32]) -> Option<usize> {
    a.iter()
        .zip(b.iter())
        .position(|(x, y)| x != y)
        .or_else(|| (a.len() != b.len()).then(|| a.len().min(b.len())))
}

/// Fails with [`CodecError::RoundTripMismatch`] unless `recovered` equals
/// `reference` element-wise and in length.
pub fn check_round_trip(reference: &[u32], recovered: &[u32]) -> Result<(), CodecError> {
    match first_difference(reference, recovered) {
        None => Ok(()),
        Some(index) => {
            log::error!(
                "round-trip mismatch at index {index}: expected {:?}, recovered {:?}",
                reference.get(index),
                recovered.get(index)
            );
            Err(CodecError::RoundTripMismatch {
                expected_len: reference.len(),
                actual_len: recovered.len(),
                first_difference: Some(index),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_sequences_pass() {
        assert!(check_round_trip(&[1, 2, 2, 3], &[1, 2, 2, 3]).is_ok());
        assert!(check_round_trip(&[], &[]).is_ok());
    }

    #[test]
    fn test_element_difference_is_located() {
        let err = check_round_trip(&[1, 2, 3], &[1, 5, 3]).unwrap_err();
        assert!(matches!(
            err,
            CodecError::RoundTripMismatch {
                expected_len: 3,
                actual_len: 3,
                first_difference: Some(1)
            }
        ));
    }

    #[test]
    fn test_truncated_recovery_is_a_mismatch() {
        let err = check_round_trip(&[1, 2, 3], &[1, 2]).unwrap_err();
        assert!(matches!(
            err,
            CodecError::RoundTripMismatch {
                actual_len: 2,
                first_difference: Some(2),
                ..
            }
        ));
    }

    #[test]
    fn test_duplicated_tail_is_a_mismatch() {
        assert_eq!(first_difference(&[4, 4], &[4, 4, 4]), Some(2));
    }
}
