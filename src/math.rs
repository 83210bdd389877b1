//! Shared mathematical utilities for feature-vector operations.

/// Compute cosine similarity between two vectors.
///
/// Returns 0.0 if vectors have different lengths, are empty, or have zero magnitude.
///
/// # Arguments
/// * `a` - First vector
/// * `b` - Second vector
///
/// # Returns
/// Cosine similarity in range [-1.0, 1.0]
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot / (norm_a * norm_b)
}

/// Standardize a batch of vectors to zero mean and unit variance per dimension.
///
/// Statistics are fit on the whole batch, so the caller should pass the seed
/// and candidate rows together to compare them in the same space. A dimension
/// with zero variance across the batch maps to 0.0 for every row.
///
/// All rows must have the same length.
pub fn standardize(rows: &[Vec<f32>]) -> Vec<Vec<f32>> {
    if rows.is_empty() {
        return Vec::new();
    }

    let dims = rows[0].len();
    let n = rows.len() as f32;

    let mut mean = vec![0.0f32; dims];
    for row in rows {
        debug_assert_eq!(row.len(), dims, "Rows must have same length");
        for (i, &val) in row.iter().enumerate() {
            mean[i] += val;
        }
    }
    for m in &mut mean {
        *m /= n;
    }

    let mut std_dev = vec![0.0f32; dims];
    for row in rows {
        for (i, &val) in row.iter().enumerate() {
            let d = val - mean[i];
            std_dev[i] += d * d;
        }
    }
    for s in &mut std_dev {
        *s = (*s / n).sqrt();
    }

    rows.iter()
        .map(|row| {
            row.iter()
                .enumerate()
                .map(|(i, &val)| {
                    if std_dev[i] > 0.0 {
                        (val - mean[i]) / std_dev[i]
                    } else {
                        0.0
                    }
                })
                .collect()
        })
        .collect()
}

/// Project a batch of vectors onto its first two principal components.
///
/// Used to produce 2-D scatter coordinates for visualization. Returns one
/// `[x, y]` point per input row plus the explained-variance ratio of each
/// component. Component signs are arbitrary.
///
/// Degenerate inputs (fewer than two rows, or zero total variance) project
/// to the origin with zero explained variance.
pub fn pca_project(rows: &[Vec<f32>]) -> (Vec<[f32; 2]>, [f32; 2]) {
    if rows.len() < 2 {
        return (vec![[0.0, 0.0]; rows.len()], [0.0, 0.0]);
    }

    let dims = rows[0].len();
    let n = rows.len() as f32;

    // Center the data
    let mut mean = vec![0.0f32; dims];
    for row in rows {
        for (i, &val) in row.iter().enumerate() {
            mean[i] += val;
        }
    }
    for m in &mut mean {
        *m /= n;
    }
    let centered: Vec<Vec<f32>> = rows
        .iter()
        .map(|row| row.iter().enumerate().map(|(i, &v)| v - mean[i]).collect())
        .collect();

    // Covariance matrix (dims x dims)
    let mut cov = vec![vec![0.0f32; dims]; dims];
    for row in &centered {
        for i in 0..dims {
            for j in 0..dims {
                cov[i][j] += row[i] * row[j];
            }
        }
    }
    for cov_row in &mut cov {
        for val in cov_row.iter_mut() {
            *val /= n;
        }
    }

    let total_variance: f32 = (0..dims).map(|i| cov[i][i]).sum();
    if total_variance <= 0.0 {
        return (vec![[0.0, 0.0]; rows.len()], [0.0, 0.0]);
    }

    let (axis1, var1) = dominant_eigenvector(&cov);
    let deflated = deflate(&cov, &axis1, var1);
    let (axis2, var2) = dominant_eigenvector(&deflated);

    let points = centered
        .iter()
        .map(|row| {
            [
                row.iter().zip(&axis1).map(|(a, b)| a * b).sum(),
                row.iter().zip(&axis2).map(|(a, b)| a * b).sum(),
            ]
        })
        .collect();

    (
        points,
        [var1 / total_variance, (var2 / total_variance).max(0.0)],
    )
}

/// Find the dominant eigenvector of a symmetric matrix via power iteration.
///
/// Returns the unit eigenvector and its eigenvalue.
fn dominant_eigenvector(matrix: &[Vec<f32>]) -> (Vec<f32>, f32) {
    let dims = matrix.len();
    let mut v = vec![1.0f32 / (dims as f32).sqrt(); dims];

    for _ in 0..100 {
        let mut next = vec![0.0f32; dims];
        for (i, row) in matrix.iter().enumerate() {
            next[i] = row.iter().zip(&v).map(|(a, b)| a * b).sum();
        }
        let norm: f32 = next.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm <= f32::EPSILON {
            // Matrix annihilated the iterate; no direction left to find
            return (v, 0.0);
        }
        for x in &mut next {
            *x /= norm;
        }
        v = next;
    }

    // Rayleigh quotient; with a unit vector this is v' * M * v
    let eigenvalue: f32 = matrix
        .iter()
        .enumerate()
        .map(|(i, row)| v[i] * row.iter().zip(&v).map(|(a, b)| a * b).sum::<f32>())
        .sum();

    (v, eigenvalue)
}

/// Remove an eigencomponent from a symmetric matrix: M - lambda * v * v'.
fn deflate(matrix: &[Vec<f32>], v: &[f32], eigenvalue: f32) -> Vec<Vec<f32>> {
    matrix
        .iter()
        .enumerate()
        .map(|(i, row)| {
            row.iter()
                .enumerate()
                .map(|(j, &val)| val - eigenvalue * v[i] * v[j])
                .collect()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cosine_similarity_identical() {
        let a = vec![1.0, 0.0, 0.0];
        let b = vec![1.0, 0.0, 0.0];
        assert!((cosine_similarity(&a, &b) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_cosine_similarity_orthogonal() {
        let a = vec![1.0, 0.0, 0.0];
        let b = vec![0.0, 1.0, 0.0];
        assert!(cosine_similarity(&a, &b).abs() < 1e-6);
    }

    #[test]
    fn test_cosine_similarity_symmetric() {
        let a = vec![0.3, 0.7, -0.2, 1.1];
        let b = vec![0.9, -0.4, 0.5, 0.2];
        assert!((cosine_similarity(&a, &b) - cosine_similarity(&b, &a)).abs() < 1e-6);
    }

    #[test]
    fn test_cosine_similarity_same_direction() {
        let a = vec![0.5, 0.5, 0.5, 0.5];
        let b = vec![1.0, 1.0, 1.0, 1.0];
        assert!((cosine_similarity(&a, &b) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_cosine_similarity_empty() {
        let a: Vec<f32> = vec![];
        let b: Vec<f32> = vec![];
        assert_eq!(cosine_similarity(&a, &b), 0.0);
    }

    #[test]
    fn test_cosine_similarity_zero_vector() {
        let a = vec![0.0, 0.0, 0.0];
        let b = vec![1.0, 0.0, 0.0];
        assert_eq!(cosine_similarity(&a, &b), 0.0);
    }

    #[test]
    fn test_cosine_similarity_different_lengths() {
        let a = vec![1.0, 0.0];
        let b = vec![1.0, 0.0, 0.0];
        assert_eq!(cosine_similarity(&a, &b), 0.0);
    }

    #[test]
    fn test_standardize_zero_mean_unit_variance() {
        let rows = vec![vec![1.0, 10.0], vec![2.0, 20.0], vec![3.0, 30.0]];
        let out = standardize(&rows);

        for dim in 0..2 {
            let mean: f32 = out.iter().map(|r| r[dim]).sum::<f32>() / 3.0;
            let var: f32 = out.iter().map(|r| (r[dim] - mean).powi(2)).sum::<f32>() / 3.0;
            assert!(mean.abs() < 1e-5);
            assert!((var - 1.0).abs() < 1e-4);
        }
    }

    #[test]
    fn test_standardize_constant_dimension_is_zero() {
        let rows = vec![vec![5.0, 1.0], vec![5.0, 2.0], vec![5.0, 3.0]];
        let out = standardize(&rows);

        for row in &out {
            assert_eq!(row[0], 0.0);
        }
        // The varying dimension still carries signal
        assert!(out[0][1] < out[2][1]);
    }

    #[test]
    fn test_standardize_self_similarity_is_one() {
        let rows = vec![
            vec![0.8, 0.9, 0.7, 120.0],
            vec![0.1, 0.2, 0.3, 80.0],
            vec![0.5, 0.4, 0.6, 150.0],
        ];
        let out = standardize(&rows);
        assert!((cosine_similarity(&out[0], &out[0]) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_standardize_empty() {
        let rows: Vec<Vec<f32>> = vec![];
        assert!(standardize(&rows).is_empty());
    }

    #[test]
    fn test_pca_first_component_follows_variance() {
        // Spread along one axis dwarfs the other; the first component
        // should absorb nearly all the variance.
        let rows = vec![
            vec![-10.0, 0.1],
            vec![-5.0, -0.1],
            vec![0.0, 0.05],
            vec![5.0, -0.05],
            vec![10.0, 0.0],
        ];
        let (points, explained) = pca_project(&rows);

        assert_eq!(points.len(), 5);
        assert!(explained[0] > 0.9);
        assert!(explained[0] >= explained[1]);
        // Projections are centered
        let mean_x: f32 = points.iter().map(|p| p[0]).sum::<f32>() / 5.0;
        assert!(mean_x.abs() < 1e-3);
    }

    #[test]
    fn test_pca_degenerate_single_row() {
        let rows = vec![vec![1.0, 2.0, 3.0]];
        let (points, explained) = pca_project(&rows);
        assert_eq!(points, vec![[0.0, 0.0]]);
        assert_eq!(explained, [0.0, 0.0]);
    }

    #[test]
    fn test_pca_zero_variance() {
        let rows = vec![vec![1.0, 1.0], vec![1.0, 1.0], vec![1.0, 1.0]];
        let (points, explained) = pca_project(&rows);
        assert!(points.iter().all(|p| p[0] == 0.0 && p[1] == 0.0));
        assert_eq!(explained, [0.0, 0.0]);
    }
}
