//! Seeded key sequences, used to drive trees in tests and benchmarks
mod random;
mod sequential;

pub use random::*;
pub use sequential::*;

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn lengths() {
        for num in vec![0, 1, 2, 17, 1000] {
            assert_eq!(RandomKeys::new(num, 10, 17).len(), num);
            assert_eq!(RandomKeys::new(num, 10, 17).count(), num);
            assert_eq!(Permutation::new(num, 17).count(), num);
            assert_eq!(
                SequentialKeys::new(num, SequentialOrder::Ascending).count(),
                num
            );
            assert_eq!(
                SequentialKeys::new(num, SequentialOrder::Descending).count(),
                num
            );
        }
    }

    #[test]
    fn permutation_covers_range() {
        let mut keys: Vec<i64> = Permutation::new(500, 3).collect();
        assert_ne!(keys, (0..500).collect::<Vec<_>>());
        keys.sort();
        assert_eq!(keys, (0..500).collect::<Vec<_>>());
    }
}
