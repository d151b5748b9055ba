use geo_types::{Coord, LineString, Polygon};
use serde::{Deserialize, Serialize};

/// Ordered polygon vertices tracing the outer boundary of a template's
/// dominant foreground region.
///
/// Vertices are integer pixel coordinates in contour-traversal order. The
/// ring is stored open; consumers treat the last vertex as connected back to
/// the first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShapeProfile {
    points: Vec<[i32; 2]>,
}

impl ShapeProfile {
    pub fn new(points: Vec<[i32; 2]>) -> Self {
        Self { points }
    }

    /// Boundary vertices in traversal order.
    pub fn points(&self) -> &[[i32; 2]] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Convert to a geo-types Polygon for geometric operations. The exterior
    /// ring is closed automatically.
    pub fn to_geo_polygon(&self) -> Polygon<f64> {
        let coords: Vec<Coord<f64>> = self
            .points
            .iter()
            .map(|&[x, y]| Coord {
                x: x as f64,
                y: y as f64,
            })
            .collect();

        Polygon::new(LineString::new(coords), vec![])
    }

    /// Enclosed area computed with the shoelace formula.
    pub fn area(&self) -> f64 {
        use geo::Area;
        self.to_geo_polygon().unsigned_area()
    }

    /// Inclusive bounding box of the vertices, or `None` for an empty profile.
    pub fn bounding_box(&self) -> Option<([i32; 2], [i32; 2])> {
        let mut vertices = self.points.iter();
        let &[mut min_x, mut min_y] = vertices.next()?;
        let (mut max_x, mut max_y) = (min_x, min_y);

        for &[x, y] in vertices {
            min_x = min_x.min(x);
            min_y = min_y.min(y);
            max_x = max_x.max(x);
            max_y = max_y.max(y);
        }

        Some(([min_x, min_y], [max_x, max_y]))
    }
}
