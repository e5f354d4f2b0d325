//! This module contains the pure, stateless kernels for delta (differential)
//! coding of integer sequences.
//!
//! This is the value-reduction step most codecs run first: on sorted input the
//! successive differences are small, which is what the bit-width reduction
//! kernels feed on. All arithmetic wraps, so unsorted input still round-trips.

use num_traits::{PrimInt, WrappingAdd, WrappingSub};

//==================================================================================
// 1. In-Place Kernels
//==================================================================================

/// Replaces `data[i]` with `data[i] - data[i - 1]` **in-place**, starting
/// from `initial` as the predecessor of `data[0]`.
pub fn encode_in_place<T>(data: &mut [T], initial: T)
where
    T: PrimInt + WrappingSub,
{
    if data.is_empty() {
        return;
    }
    // Iterate backwards to use original values for calculation
    for i in (1..data.len()).rev() {
        data[i] = data[i].wrapping_sub(&data[i - 1]);
    }
    data[0] = data[0].wrapping_sub(&initial);
}

/// Inverse of [`encode_in_place`]: a running (wrapping) prefix sum.
pub fn decode_in_place<T>(data: &mut [T], initial: T)
where
    T: PrimInt + WrappingAdd,
{
    let mut acc = initial;
    for value in data.iter_mut() {
        acc = acc.wrapping_add(value);
        *value = acc;
    }
}

//==================================================================================
// 2. Out-of-Place Kernel
//==================================================================================

/// Computes the deltas of `input` into `output` without touching `input`.
/// Returns the last value seen, to chain blocks together.
pub fn encode_into<T>(input: &[T], initial: T, output: &mut Vec<T>) -> T
where
    T: PrimInt + WrappingSub,
{
    output.clear();
    output.reserve(input.len());
    let mut prev = initial;
    for &value in input {
        output.push(value.wrapping_sub(&prev));
        prev = value;
    }
    prev
}

//==================================================================================
// 3. Unit Tests
//==================================================================================
