//! B-spline knot-span search and basis evaluation.

/// Find the knot span index for parameter `t`.
///
/// Returns `i` such that `knots[i] <= t < knots[i+1]`, with the upper
/// domain boundary mapped to the last non-empty span. The control point
/// count is implied by the knot vector (`knots.len() - degree - 1`).
pub fn span_index(degree: usize, knots: &[f64], t: f64) -> usize {
    let n = knots.len() - degree - 2;
    if t >= knots[n + 1] {
        return n;
    }
    if t <= knots[degree] {
        return degree;
    }

    // Binary search
    let mut low = degree;
    let mut high = n + 1;
    let mut mid = (low + high) / 2;
    while t < knots[mid] || t >= knots[mid + 1] {
        if t < knots[mid] {
            high = mid;
        } else {
            low = mid;
        }
        mid = (low + high) / 2;
    }
    mid
}

/// Compute the `degree + 1` non-vanishing basis function values at `t`.
pub fn basis_values(degree: usize, knots: &[f64], span: usize, t: f64) -> Vec<f64> {
    let mut n = vec![0.0; degree + 1];
    let mut left = vec![0.0; degree + 1];
    let mut right = vec![0.0; degree + 1];

    n[0] = 1.0;
    for j in 1..=degree {
        left[j] = t - knots[span + 1 - j];
        right[j] = knots[span + j] - t;
        let mut saved = 0.0;
        for r in 0..j {
            let temp = n[r] / (right[r + 1] + left[j - r]);
            n[r] = saved + right[r + 1] * temp;
            saved = left[j - r] * temp;
        }
        n[j] = saved;
    }
    n
}

/// Compute basis function values and their first derivatives at `t`.
pub fn basis_values_derivs(
    degree: usize,
    knots: &[f64],
    span: usize,
    t: f64,
) -> (Vec<f64>, Vec<f64>) {
    let p = degree;

    // Triangular table of knot differences and basis values.
    let mut ndu = vec![vec![0.0; p + 1]; p + 1];
    let mut left = vec![0.0; p + 1];
    let mut right = vec![0.0; p + 1];

    ndu[0][0] = 1.0;
    for j in 1..=p {
        left[j] = t - knots[span + 1 - j];
        right[j] = knots[span + j] - t;
        let mut saved = 0.0;
        for r in 0..j {
            ndu[j][r] = right[r + 1] + left[j - r];
            let temp = ndu[r][j - 1] / ndu[j][r];
            ndu[r][j] = saved + right[r + 1] * temp;
            saved = left[j - r] * temp;
        }
        ndu[j][j] = saved;
    }

    let mut values = vec![0.0; p + 1];
    for j in 0..=p {
        values[j] = ndu[j][p];
    }

    // First derivatives from the difference form.
    let mut derivs = vec![0.0; p + 1];
    if p > 0 {
        for r in 0..=p {
            let mut d = 0.0;
            if r >= 1 {
                d += ndu[r - 1][p - 1] / ndu[p][r - 1];
            }
            if r <= p - 1 {
                d -= ndu[r][p - 1] / ndu[p][r];
            }
            derivs[r] = d * p as f64;
        }
    }

    (values, derivs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_index_uniform() {
        // Degree 2, 5 control points, uniform knot vector
        let knots = vec![0.0, 0.0, 0.0, 1.0, 2.0, 3.0, 3.0, 3.0];
        let degree = 2;

        assert_eq!(span_index(degree, &knots, 0.0), 2);
        assert_eq!(span_index(degree, &knots, 0.5), 2);
        assert_eq!(span_index(degree, &knots, 1.0), 3);
        assert_eq!(span_index(degree, &knots, 1.5), 3);
        assert_eq!(span_index(degree, &knots, 2.5), 4);
        assert_eq!(span_index(degree, &knots, 3.0), 4);
    }

    #[test]
    fn test_basis_partition_of_unity() {
        let knots = vec![0.0, 0.0, 0.0, 1.0, 2.0, 3.0, 3.0, 3.0];
        let degree = 2;

        for &t in &[0.0, 0.5, 1.0, 1.5, 2.0, 2.5, 3.0] {
            let span = span_index(degree, &knots, t);
            let basis = basis_values(degree, &knots, span, t);
            let sum: f64 = basis.iter().sum();
            assert!(
                (sum - 1.0).abs() < 1e-12,
                "Partition of unity failed at t={}: sum={}",
                t,
                sum
            );
        }
    }

    #[test]
    fn test_basis_derivs_sum_to_zero() {
        // Derivatives of a partition of unity must sum to zero.
        let knots = vec![0.0, 0.0, 0.0, 0.0, 1.0, 1.0, 1.0, 1.0];
        let degree = 3;

        for i in 1..20 {
            let t = i as f64 / 20.0;
            let span = span_index(degree, &knots, t);
            let (_, derivs) = basis_values_derivs(degree, &knots, span, t);
            let sum: f64 = derivs.iter().sum();
            assert!(sum.abs() < 1e-10, "Derivative sum at t={}: {}", t, sum);
        }
    }

    #[test]
    fn test_basis_derivs_match_values() {
        let knots = vec![0.0, 0.0, 0.0, 1.0, 2.0, 3.0, 3.0, 3.0];
        let degree = 2;
        let t = 1.3;
        let span = span_index(degree, &knots, t);
        let plain = basis_values(degree, &knots, span, t);
        let (values, _) = basis_values_derivs(degree, &knots, span, t);
        for (a, b) in plain.iter().zip(values.iter()) {
            assert!((a - b).abs() < 1e-12);
        }
    }
}
