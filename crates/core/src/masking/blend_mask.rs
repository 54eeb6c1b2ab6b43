use ndarray::Array2;

/// Dense per-pixel blend weights in `[0, 1]`, same spatial extent as the
/// destination frame: near one inside the face silhouette, near zero
/// outside. Rebuilt for every composite, never persisted.
#[derive(Clone, Debug, PartialEq)]
pub struct BlendMask {
    // Indexed [row, col] like the frame's ndarray view.
    weights: Array2<f32>,
}

impl BlendMask {
    pub fn zeros(width: u32, height: u32) -> Self {
        Self {
            weights: Array2::zeros((height as usize, width as usize)),
        }
    }

    pub fn width(&self) -> u32 {
        self.weights.ncols() as u32
    }

    pub fn height(&self) -> u32 {
        self.weights.nrows() as u32
    }

    pub fn get(&self, x: usize, y: usize) -> f32 {
        self.weights[[y, x]]
    }

    pub fn set(&mut self, x: usize, y: usize, value: f32) {
        self.weights[[y, x]] = value;
    }

    /// Elementwise product with another mask of the same extent, giving
    /// the intersection of the two coverage areas.
    pub fn intersect(&mut self, other: &BlendMask) {
        debug_assert_eq!(self.weights.dim(), other.weights.dim());
        self.weights *= &other.weights;
    }

    pub fn clamp_unit(&mut self) {
        self.weights.mapv_inplace(|v| v.clamp(0.0, 1.0));
    }

    pub fn weights(&self) -> &Array2<f32> {
        &self.weights
    }

    pub fn weights_mut(&mut self) -> &mut Array2<f32> {
        &mut self.weights
    }
}
