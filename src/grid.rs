use ndarray::{Array1, Array2};

pub struct Grid {
    pub n: usize, // Number of points per axis
    pub min: f64, // Lower axis bound
    pub max: f64, // Upper axis bound
}

impl Grid {
    pub fn new(n: usize, min: f64, max: f64) -> Self {
        if n < 2 {
            panic!("Grid needs at least 2 points per axis, got {}", n);
        }
        if max <= min {
            panic!("Grid bounds must satisfy max > min (min={}, max={})", min, max);
        }
        Grid { n, min, max }
    }

    pub fn spacing(&self) -> f64 {
        // Axis step between adjacent sample points
        (self.max - self.min) / (self.n - 1) as f64
    }

    pub fn linspace(&self) -> Array1<f64> {
        // n evenly spaced coordinates, both endpoints included
        Array1::linspace(self.min, self.max, self.n)
    }

    pub fn meshgrid(&self) -> (Array2<f64>, Array2<f64>) {
        // Outer product of the axis with itself.
        // Row index varies y, column index varies x.
        let axis = self.linspace();
        let mut xs = Array2::<f64>::zeros((self.n, self.n));
        let mut ys = Array2::<f64>::zeros((self.n, self.n));

        for j in 0..self.n {
            for i in 0..self.n {
                xs[[j, i]] = axis[i];
                ys[[j, i]] = axis[j];
            }
        }

        (xs, ys)
    }
}
