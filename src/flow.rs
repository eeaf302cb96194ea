use ndarray::{Array2, Zip};

/// Velocity components of the fan flow on the sampling grid.
pub struct FlowField {
    pub u: Array2<f64>,
    pub v: Array2<f64>,
}

impl FlowField {
    /// Inverse-distance radial field: velocity = position / r² with
    /// r = sqrt(x² + y²) + epsilon. The epsilon keeps r strictly positive,
    /// so a grid point on the exact origin yields a huge but finite vector.
    pub fn radial(x: &Array2<f64>, y: &Array2<f64>, epsilon: f64) -> Self {
        assert_eq!(x.dim(), y.dim(), "coordinate arrays must share a shape");

        let mut u = Array2::<f64>::zeros(x.dim());
        let mut v = Array2::<f64>::zeros(x.dim());

        Zip::from(&mut u)
            .and(&mut v)
            .and(x)
            .and(y)
            .par_for_each(|u, v, &x, &y| {
                let r = (x * x + y * y).sqrt() + epsilon;
                *u = x / (r * r);
                *v = y / (r * r);
            });

        Self { u, v }
    }

    /// Zero the vertical component everywhere above the blocking plane.
    /// The horizontal component is never touched.
    pub fn block_above(&mut self, y: &Array2<f64>, plane_y: f64) {
        Zip::from(&mut self.v).and(y).for_each(|v, &y| {
            if y > plane_y {
                *v = 0.0;
            }
        });
    }

    pub fn magnitude(&self) -> Array2<f64> {
        let mut mag = Array2::<f64>::zeros(self.u.dim());
        Zip::from(&mut mag)
            .and(&self.u)
            .and(&self.v)
            .for_each(|m, &u, &v| {
                *m = (u * u + v * v).sqrt();
            });
        mag
    }

    pub fn max_magnitude(&self) -> f64 {
        self.magnitude().iter().fold(0.0_f64, |acc, &m| acc.max(m))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Grid;

    const EPSILON: f64 = 1e-6;

    fn fan_coords(n: usize) -> (Array2<f64>, Array2<f64>) {
        Grid::new(n, -5.0, 5.0).meshgrid()
    }

    #[test]
    fn field_points_away_from_origin() {
        let (x, y) = fan_coords(20);
        let field = FlowField::radial(&x, &y, EPSILON);

        for ((j, i), &px) in x.indexed_iter() {
            let py = y[[j, i]];
            assert_eq!(field.u[[j, i]].signum(), px.signum());
            assert_eq!(field.v[[j, i]].signum(), py.signum());
        }
    }

    #[test]
    fn field_matches_inverse_square_formula() {
        let (x, y) = fan_coords(20);
        let field = FlowField::radial(&x, &y, EPSILON);

        for ((j, i), &px) in x.indexed_iter() {
            let py = y[[j, i]];
            let r = (px * px + py * py).sqrt() + EPSILON;
            assert!((field.u[[j, i]] - px / (r * r)).abs() < 1e-12);
            assert!((field.v[[j, i]] - py / (r * r)).abs() < 1e-12);
        }
    }

    #[test]
    fn origin_sample_is_finite() {
        // A 21-point axis lands a sample exactly on (0, 0); the epsilon term
        // must turn that into a finite (if enormous) vector, not a NaN.
        let (x, y) = fan_coords(21);
        let field = FlowField::radial(&x, &y, EPSILON);

        for &u in field.u.iter() {
            assert!(u.is_finite());
        }
        for &v in field.v.iter() {
            assert!(v.is_finite());
        }
        assert!(field.max_magnitude() > 1e6);
    }

    #[test]
    fn blocking_zeros_v_above_plane_only() {
        let (x, y) = fan_coords(20);
        let open = FlowField::radial(&x, &y, EPSILON);
        let mut blocked = FlowField::radial(&x, &y, EPSILON);
        blocked.block_above(&y, 0.0);

        for ((j, i), &py) in y.indexed_iter() {
            if py > 0.0 {
                assert_eq!(blocked.v[[j, i]], 0.0);
            } else {
                assert_eq!(blocked.v[[j, i]], open.v[[j, i]]);
            }
            // u is never masked
            assert_eq!(blocked.u[[j, i]], open.u[[j, i]]);
        }
    }

    #[test]
    fn magnitude_is_euclidean_norm() {
        let (x, y) = fan_coords(20);
        let field = FlowField::radial(&x, &y, EPSILON);
        let mag = field.magnitude();

        for ((j, i), &m) in mag.indexed_iter() {
            let expected = (field.u[[j, i]].powi(2) + field.v[[j, i]].powi(2)).sqrt();
            assert!((m - expected).abs() < 1e-12);
        }
        assert!(field.max_magnitude() >= mag[[0, 0]]);
    }
}
