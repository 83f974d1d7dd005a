//! Random selection and lookup over a loaded name list

use rand::seq::SliceRandom;
use rand::Rng;

use crate::catalog::NameEntry;

/// Number of names shown per generation
pub const DEFAULT_SAMPLE_SIZE: usize = 10;

/// Returned by `describe` when no entry matches
pub const NO_DESCRIPTION: &str = "No description available.";

/// Draw up to `count` distinct entries in random order.
///
/// Partial Fisher-Yates over the indices, so every subset of size `count`
/// is equally likely. The input is left untouched.
pub fn sample<R: Rng + ?Sized>(collection: &[NameEntry], count: usize, rng: &mut R) -> Vec<NameEntry> {
    if collection.is_empty() || count == 0 {
        return Vec::new();
    }

    let mut indices: Vec<usize> = (0..collection.len()).collect();
    let (picked, _) = indices.partial_shuffle(rng, count);

    picked.iter().map(|&i| collection[i].clone()).collect()
}

/// Description of the first entry named exactly `name`
pub fn describe<'a>(collection: &'a [NameEntry], name: &str) -> &'a str {
    collection
        .iter()
        .find(|entry| entry.name == name)
        .map(|entry| entry.description.as_str())
        .unwrap_or(NO_DESCRIPTION)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn entries(n: usize) -> Vec<NameEntry> {
        (0..n)
            .map(|i| NameEntry::new(format!("Name {}", i), format!("desc {}", i)))
            .collect()
    }

    #[test]
    fn test_sample_returns_count_distinct_members() {
        let collection = entries(50);
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..100 {
            let result = sample(&collection, 10, &mut rng);
            assert_eq!(result.len(), 10);

            let names: HashSet<_> = result.iter().map(|e| e.name.as_str()).collect();
            assert_eq!(names.len(), 10, "sample contained a duplicate");
            assert!(result.iter().all(|e| collection.contains(e)));
        }
    }

    #[test]
    fn test_sample_smaller_collection() {
        let collection = vec![NameEntry::new("A", "desc A"), NameEntry::new("B", "desc B")];
        let mut rng = StdRng::seed_from_u64(1);

        let result = sample(&collection, 10, &mut rng);
        assert_eq!(result.len(), 2);
        assert!(result.contains(&collection[0]));
        assert!(result.contains(&collection[1]));
    }

    #[test]
    fn test_sample_empty() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(sample(&[], 10, &mut rng).is_empty());
        assert!(sample(&entries(5), 0, &mut rng).is_empty());
    }

    #[test]
    fn test_sample_does_not_mutate_input() {
        let collection = entries(20);
        let before = collection.clone();
        let mut rng = StdRng::seed_from_u64(3);

        let _ = sample(&collection, 10, &mut rng);
        assert_eq!(collection, before);
    }

    #[test]
    fn test_sample_varies_between_calls() {
        let collection = entries(500);
        let mut rng = rand::thread_rng();

        let first = sample(&collection, 10, &mut rng);
        let differs = (0..20).any(|_| sample(&collection, 10, &mut rng) != first);
        assert!(differs);
    }

    #[test]
    fn test_sample_roughly_uniform() {
        // Each of 20 entries should be picked about half the time for k = 10
        let collection = entries(20);
        let mut rng = StdRng::seed_from_u64(42);
        let mut hits = vec![0usize; collection.len()];
        let trials = 4000;

        for _ in 0..trials {
            for entry in sample(&collection, 10, &mut rng) {
                let idx: usize = entry.name["Name ".len()..].parse().unwrap();
                hits[idx] += 1;
            }
        }

        for (i, &count) in hits.iter().enumerate() {
            assert!(
                (1700..=2300).contains(&count),
                "entry {} picked {} times out of {}",
                i,
                count,
                trials
            );
        }
    }

    #[test]
    fn test_same_seed_same_sample() {
        let collection = entries(100);
        let a = sample(&collection, 10, &mut StdRng::seed_from_u64(99));
        let b = sample(&collection, 10, &mut StdRng::seed_from_u64(99));
        assert_eq!(a, b);
    }

    #[test]
    fn test_describe() {
        let collection = vec![
            NameEntry::new("A", "desc A"),
            NameEntry::new("B", "desc B"),
            NameEntry::new("A", "second A"),
        ];

        assert_eq!(describe(&collection, "B"), "desc B");
        assert_eq!(describe(&collection, "A"), "desc A");
        assert_eq!(describe(&collection, "a"), NO_DESCRIPTION);
        assert_eq!(describe(&collection, "NonexistentName"), "No description available.");
        assert_eq!(describe(&[], "A"), NO_DESCRIPTION);

        // Lookups never change the answer
        for _ in 0..3 {
            assert_eq!(describe(&collection, "B"), "desc B");
        }
    }
}
