//! Copying variable-length native payloads into owned sequences
//!
//! Callers materialize only after the adapter reported success. A failed
//! call leaves the count and buffer undefined, so the caller returns a
//! neutral result instead and nothing is allocated.

/// Copy the first `reported` elements of `native` into a new `Vec`
///
/// `reported` is clamped to `native.len()`, the adapter's fixed capacity,
/// so a bogus count can never read past the buffer. The returned `Vec` is
/// allocated once, with exactly the clamped length, and preserves source
/// order. A count of zero yields an empty `Vec` without allocating.
pub fn materialize<N, T>(reported: u32, native: &[N]) -> Vec<T>
where
    N: Copy,
    T: From<N>,
{
    let count = (reported as usize).min(native.len());
    let mut owned = Vec::with_capacity(count);
    owned.extend(native[..count].iter().copied().map(T::from));
    owned
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::VddcPoint;
    use crate::rsmi::bindings::RsmiOdVddcPoint;

    #[test]
    fn test_copies_reported_prefix_in_order() {
        let native = [300u64, 600, 900, 0, 0];
        let owned: Vec<u64> = materialize(3, &native);
        assert_eq!(owned, vec![300, 600, 900]);
        assert_eq!(owned.capacity(), 3);
    }

    #[test]
    fn test_zero_count_is_empty() {
        let owned: Vec<u64> = materialize(0, &[1u64, 2, 3]);
        assert!(owned.is_empty());
        assert_eq!(owned.capacity(), 0);
    }

    #[test]
    fn test_count_clamped_to_capacity() {
        let owned: Vec<u64> = materialize(1000, &[7u64, 8]);
        assert_eq!(owned, vec![7, 8]);
    }

    #[test]
    fn test_converts_native_points() {
        let native = [
            RsmiOdVddcPoint {
                frequency: 800,
                voltage: 700,
            },
            RsmiOdVddcPoint {
                frequency: 1600,
                voltage: 900,
            },
        ];
        let points: Vec<VddcPoint> = materialize(2, &native);
        assert_eq!(points, vec![VddcPoint::new(800, 700), VddcPoint::new(1600, 900)]);
    }
}
