/*
 * Chebyshev evaluator: Clenshaw recurrence for series value and derivative.
 * Operates on a bare coefficient slice rather than a spline-record
 * abstraction.
 */

use crate::errors::DecodingError;

/// Evaluates a Chebyshev polynomial series and its derivative at
/// `normalized_time` (expected in `[-1, 1]`), given `degree + 1` leading
/// coefficients of `spline_coeffs`. `spline_radius` is the half-width (in
/// the series' native units, e.g. seconds) used to scale the derivative.
///
/// Implements `f(x) = c0 + x*b1 - b2` with `bk = ck + 2x*bk+1 - bk+2`,
/// started at `bn = cn`.
pub fn chebyshev_eval(
    normalized_time: f64,
    spline_coeffs: &[f64],
    spline_radius: f64,
    degree: usize,
) -> Result<(f64, f64), DecodingError> {
    if spline_radius.abs() < f64::EPSILON {
        return Err(DecodingError::TooFewDoubles {
            dataset: "Chebyshev series",
            got: 0,
            need: 1,
        });
    }

    let mut w = [0.0_f64; 3];
    let mut dw = [0.0_f64; 3];

    for j in (2..=degree + 1).rev() {
        w[2] = w[1];
        w[1] = w[0];
        w[0] = *spline_coeffs
            .get(j - 1)
            .ok_or(DecodingError::InaccessibleBytes {
                start: j - 1,
                end: j,
                size: spline_coeffs.len(),
            })?
            + (2.0 * normalized_time * w[1] - w[2]);

        dw[2] = dw[1];
        dw[1] = dw[0];
        dw[0] = w[1] * 2.0 + dw[1] * 2.0 * normalized_time - dw[2];
    }

    let c0 = *spline_coeffs
        .first()
        .ok_or(DecodingError::TooFewDoubles {
            dataset: "Chebyshev series",
            got: spline_coeffs.len(),
            need: 1,
        })?;

    let val = c0 + (normalized_time * w[0] - w[1]);
    let deriv = (w[0] + normalized_time * dw[0] - dw[1]) / spline_radius;
    Ok((val, deriv))
}

/// Evaluates only the value of the Chebyshev series (no derivative),
/// avoiding the second recurrence when the caller does not need it.
pub fn chebyshev_eval_poly(
    normalized_time: f64,
    spline_coeffs: &[f64],
    degree: usize,
) -> Result<f64, DecodingError> {
    let mut w = [0.0_f64; 3];

    for j in (2..=degree + 1).rev() {
        w[2] = w[1];
        w[1] = w[0];
        w[0] = *spline_coeffs
            .get(j - 1)
            .ok_or(DecodingError::InaccessibleBytes {
                start: j - 1,
                end: j,
                size: spline_coeffs.len(),
            })?
            + (2.0 * normalized_time * w[1] - w[2]);
    }

    let c0 = *spline_coeffs
        .first()
        .ok_or(DecodingError::TooFewDoubles {
            dataset: "Chebyshev series",
            got: spline_coeffs.len(),
            need: 1,
        })?;

    Ok((normalized_time * w[0]) - w[1] + c0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    /// Central-difference check of the derivative evaluator against the
    /// value-only evaluator.
    #[test]
    fn derivative_matches_central_difference() {
        let coeffs = [0.3, -1.2, 0.7, 2.1, -0.4];
        let degree = coeffs.len() - 1;
        let radius = 1.0;
        let x = 0.2_f64;
        let h = 1e-6;

        let (_, deriv) = chebyshev_eval(x, &coeffs, radius, degree).unwrap();
        let f_plus = chebyshev_eval_poly(x + h, &coeffs, degree).unwrap();
        let f_minus = chebyshev_eval_poly(x - h, &coeffs, degree).unwrap();
        let central = (f_plus - f_minus) / (2.0 * h) / radius;

        assert_relative_eq!(deriv, central, max_relative = 1e-6);
    }

    #[test]
    fn constant_series_evaluates_to_constant() {
        let coeffs = [5.0];
        let v = chebyshev_eval_poly(0.37, &coeffs, 0).unwrap();
        assert_relative_eq!(v, 5.0, epsilon = 1e-15);
    }
}
