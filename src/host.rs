//! Host-side math used to generate inputs and to check device results.

/// `n` values drawn uniformly from `[0, 1)` with the thread-local generator.
pub fn random_vector(n: usize) -> Vec<f64> {
    (0..n).map(|_| fastrand::f64()).collect()
}

/// Like [`random_vector`], but reproducible: the same `seed` yields the same vector.
pub fn random_vector_seeded(n: usize, seed: u64) -> Vec<f64> {
    let mut rng = fastrand::Rng::with_seed(seed);
    (0..n).map(|_| rng.f64()).collect()
}

/// Elementwise `x[i] + y[i]`. Truncates to the shorter input.
pub fn add(x: &[f64], y: &[f64]) -> Vec<f64> {
    x.iter().zip(y).map(|(x, y)| x + y).collect()
}

/// Elementwise `|a[i] - b[i]|`.
pub fn abs_diff(a: &[f64], b: &[f64]) -> Vec<f64> {
    a.iter().zip(b).map(|(a, b)| (a - b).abs()).collect()
}

/// Euclidean norm, `sqrt(sum(v[i]^2))`.
pub fn norm(v: &[f64]) -> f64 {
    v.iter().map(|v| v * v).sum::<f64>().sqrt()
}

/// Returns `true` if every `|(x[i] + y[i]) - z[i]|` is at most [`f64::EPSILON`].
pub fn within_epsilon(z: &[f64], x: &[f64], y: &[f64]) -> bool {
    z.len() == x.len()
        && x.len() == y.len()
        && z
            .iter()
            .zip(x.iter().zip(y))
            .all(|(z, (x, y))| ((x + y) - z).abs() <= f64::EPSILON)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_vector_range() {
        let v = random_vector(10_000);
        assert_eq!(v.len(), 10_000);
        assert!(v.iter().all(|v| (0. ..1.).contains(v)));
    }

    #[test]
    fn test_seeded_is_reproducible() {
        assert_eq!(random_vector_seeded(64, 42), random_vector_seeded(64, 42));
        assert_ne!(random_vector_seeded(64, 42), random_vector_seeded(64, 43));
    }

    #[test]
    fn test_norm() {
        assert_eq!(norm(&[3., 4.]), 5.);
        assert_eq!(norm(&[0.; 16]), 0.);
        assert_eq!(norm(&[]), 0.);
    }

    #[test]
    fn test_diff_norm_zero_iff_exact() {
        let x = random_vector_seeded(1000, 1);
        let y = random_vector_seeded(1000, 2);
        let mut z = add(&x, &y);

        assert_eq!(norm(&abs_diff(&z, &add(&x, &y))), 0.);

        z[500] = f64::from_bits(z[500].to_bits() + 1);
        assert!(norm(&abs_diff(&z, &add(&x, &y))) > 0.);
    }

    #[test]
    fn test_within_epsilon() {
        let x = [1., 2., 3.];
        let y = [0.5, 0.25, 0.125];

        assert!(within_epsilon(&add(&x, &y), &x, &y));
        assert!(!within_epsilon(&[1.5, 2.25, 3.5], &x, &y));
        assert!(!within_epsilon(&[1.5, 2.25], &x, &y));
    }
}
