//! Deterministic Lloyd iterations over 3-D color features.
use log::warn;
use nalgebra::Vector3;

pub(crate) type Feature = Vector3<f64>;

/// Outcome of [`run`].
pub(crate) struct Clustering {
    pub centroids: Vec<Feature>,
    pub assignments: Vec<usize>,
    pub counts: Vec<usize>,
    pub iterations: usize,
    pub converged: bool,
}

/// Spread `k` seeds evenly along the diagonal of the features' bounding box.
pub(crate) fn seed_centroids(features: &[Feature], k: usize) -> Vec<Feature> {
    let (lo, hi) = match features.first() {
        Some(first) => features.iter().fold((*first, *first), |(lo, hi), f| {
            (lo.inf(f), hi.sup(f))
        }),
        None => (Feature::zeros(), Feature::zeros()),
    };
    let span = hi - lo;
    (0..k)
        .map(|i| lo + span * ((i as f64 + 0.5) / k as f64))
        .collect()
}

/// Index of the closest centroid; ties go to the lower index.
#[inline]
pub(crate) fn nearest(centroids: &[Feature], p: &Feature) -> usize {
    let mut best = 0;
    let mut best_d = f64::INFINITY;
    for (i, c) in centroids.iter().enumerate() {
        let d = (c - p).norm_squared();
        if d < best_d {
            best_d = d;
            best = i;
        }
    }
    best
}

#[cfg(feature = "parallel")]
fn assign(features: &[Feature], centroids: &[Feature]) -> Vec<usize> {
    use rayon::prelude::*;

    features
        .par_iter()
        .map(|p| nearest(centroids, p))
        .collect()
}

#[cfg(not(feature = "parallel"))]
fn assign(features: &[Feature], centroids: &[Feature]) -> Vec<usize> {
    features.iter().map(|p| nearest(centroids, p)).collect()
}

/// Cluster `features` into at most `k` groups. Empty clusters keep their
/// centroid.
///
/// No more clusters are formed than there are features (at least one), so
/// the result never holds more entries than the input.
pub(crate) fn run(features: &[Feature], k: usize, max_iterations: usize) -> Clustering {
    let k = k.min(features.len()).max(1);
    let mut centroids = seed_centroids(features, k);
    let mut assignments = vec![usize::MAX; features.len()];
    let mut counts = vec![0usize; k];
    let mut iterations = 0;
    let mut converged = false;

    while iterations < max_iterations {
        iterations += 1;
        let next = assign(features, &centroids);
        if next == assignments {
            converged = true;
            break;
        }
        assignments = next;

        let mut sums = vec![Feature::zeros(); k];
        counts.iter_mut().for_each(|c| *c = 0);
        for (f, &a) in features.iter().zip(&assignments) {
            sums[a] += f;
            counts[a] += 1;
        }
        for ((centroid, sum), &count) in centroids.iter_mut().zip(&sums).zip(&counts) {
            if count > 0 {
                *centroid = sum / count as f64;
            }
        }
    }

    if !converged && !features.is_empty() {
        warn!(
            "k-means stopped at the iteration cap ({max_iterations}) before assignments settled"
        );
    }

    Clustering {
        centroids,
        assignments,
        counts,
        iterations,
        converged,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeds_are_evenly_spaced() {
        let features = vec![Feature::new(0.0, 0.0, 0.0), Feature::new(1.0, 0.5, 0.0)];
        let seeds = seed_centroids(&features, 2);
        assert!((seeds[0] - Feature::new(0.25, 0.125, 0.0)).norm() < 1e-12);
        assert!((seeds[1] - Feature::new(0.75, 0.375, 0.0)).norm() < 1e-12);
    }

    #[test]
    fn two_blobs_separate() {
        let mut features = vec![Feature::new(0.1, 0.1, 0.1); 10];
        features.extend(vec![Feature::new(0.9, 0.8, 0.9); 5]);
        let out = run(&features, 2, 10);
        assert!(out.converged);
        assert_eq!(out.counts, vec![10, 5]);
        assert!((out.centroids[1] - Feature::new(0.9, 0.8, 0.9)).norm() < 1e-12);
    }

    #[test]
    fn cluster_count_is_capped_by_feature_count() {
        let features = vec![Feature::new(0.0, 0.0, 0.0), Feature::new(1.0, 1.0, 1.0)];
        for k in [3, 1 << 40, usize::MAX] {
            let out = run(&features, k, 10);
            assert_eq!(out.centroids.len(), 2, "k={k}");
            assert_eq!(out.counts, vec![1, 1]);
            assert_eq!(out.assignments, vec![0, 1]);
        }
        let out = run(&[], usize::MAX, 10);
        assert_eq!(out.centroids.len(), 1);
        assert!(out.assignments.is_empty());
    }

    #[test]
    fn surplus_clusters_keep_their_seed() {
        let features = vec![Feature::new(0.5, 0.5, 0.5); 4];
        let out = run(&features, 3, 10);
        assert!(out.converged);
        assert_eq!(out.counts.iter().sum::<usize>(), 4);
        for c in &out.centroids {
            assert!(c.iter().all(|v| v.is_finite()));
        }
    }
}
