use ndarray::Array1;

/// Evenly spaced positions `start + i * step` for `i in 0..len`.
pub fn linear_axis(start: f64, step: f64, len: usize) -> Array1<f64> {
    Array1::from_iter((0..len).map(|i| start + step * i as f64))
}

/// `len` evenly spaced values from `min` to `max` inclusive.
pub fn spanning_axis(min: f64, max: f64, len: usize) -> Array1<f64> {
    Array1::linspace(min, max, len)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn linear_axis_uses_step() {
        assert_eq!(linear_axis(10.0, 1.0, 5), array![10.0, 11.0, 12.0, 13.0, 14.0]);
        assert_eq!(linear_axis(10.0, 1.0, 0).len(), 0);
    }

    #[test]
    fn spanning_axis_covers_bounds() {
        assert_eq!(spanning_axis(60.0, 90.0, 4), array![60.0, 70.0, 80.0, 90.0]);
        assert_eq!(spanning_axis(42.0, 42.0, 1), array![42.0]);
    }
}
