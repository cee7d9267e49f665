use super::cost::Cost;
use super::matrix::CostMatrix;
use crate::error::{Error, Result};

/// A city location in the plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: &Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Builds the symmetric matrix of straight-line distances between `points`,
/// with a forbidden diagonal.
///
/// # Errors
/// * `Error::InvalidInput` - if fewer than two points are given or a
///   coordinate is not finite
pub fn euclidean_matrix(points: &[Point]) -> Result<CostMatrix<f64>> {
    if let Some(i) = points
        .iter()
        .position(|p| !p.x.is_finite() || !p.y.is_finite())
    {
        return Err(Error::invalid_input(format!(
            "point {} has a non-finite coordinate",
            i
        )));
    }
    CostMatrix::from_fn(points.len(), |r, c| {
        if r == c {
            Cost::Forbidden
        } else {
            Cost::Finite(points[r].distance(&points[c]))
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_euclidean_matrix() {
        let points = [Point::new(0.0, 0.0), Point::new(3.0, 4.0), Point::new(0.0, 4.0)];
        let m = euclidean_matrix(&points).unwrap();
        assert_eq!(m.len(), 3);
        assert_eq!(m.get(0, 1), Cost::Finite(5.0));
        assert_eq!(m.get(1, 0), Cost::Finite(5.0));
        assert_eq!(m.get(1, 2), Cost::Finite(3.0));
        assert!(m.get(2, 2).is_forbidden());
    }

    #[test]
    fn test_rejects_bad_points() {
        assert!(euclidean_matrix(&[Point::new(0.0, 0.0)]).is_err());
        assert!(euclidean_matrix(&[Point::new(0.0, 0.0), Point::new(f64::NAN, 1.0)]).is_err());
    }
}
