use crate::error::{MoodmapError, Result};
use crate::geo::Position;

/// A closed polygon ring.
///
/// The first and last vertex are always equal once constructed; `new`
/// appends the closing vertex when the input ring is open.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    vertices: Vec<Position>,
}

impl Polygon {
    /// Builds a polygon from an ordered vertex list.
    ///
    /// # Errors
    /// Returns `EmptyPolygon` if `vertices` is empty.
    pub fn new(mut vertices: Vec<Position>) -> Result<Self> {
        let first = *vertices.first().ok_or(MoodmapError::EmptyPolygon)?;
        if vertices.last() != Some(&first) {
            vertices.push(first);
        }
        Ok(Self { vertices })
    }

    pub fn vertices(&self) -> &[Position] {
        &self.vertices
    }

    /// Vertices without the duplicated closing point.
    pub fn ring(&self) -> &[Position] {
        &self.vertices[..self.vertices.len() - 1]
    }
}

/// A named area composed of one or more closed polygons.
#[derive(Debug, Clone, PartialEq)]
pub struct Region {
    pub name: String,
    pub polygons: Vec<Polygon>,
}

impl Region {
    pub fn new(name: impl Into<String>, polygons: Vec<Polygon>) -> Result<Self> {
        let name = name.into();
        if polygons.is_empty() {
            return Err(MoodmapError::RegionData(format!(
                "region '{}' has no polygons",
                name
            )));
        }
        Ok(Self { name, polygons })
    }
}

/// Shoelace centroid of a closed polygon.
///
/// Returns `(lat, lon, area)` where `area` is the absolute enclosed area.
/// A degenerate polygon (zero signed area) yields its first vertex with
/// area 0 instead of dividing by zero.
pub fn find_centroid(polygon: &Polygon) -> (f64, f64, f64) {
    let vs = polygon.vertices();
    let mut signed_area = 0.0;
    let mut cx = 0.0;
    let mut cy = 0.0;

    for pair in vs.windows(2) {
        let (p, q) = (pair[0], pair[1]);
        let cross = p.lat * q.lon - q.lat * p.lon;
        signed_area += cross;
        cx += (p.lat + q.lat) * cross;
        cy += (p.lon + q.lon) * cross;
    }
    signed_area /= 2.0;

    if signed_area == 0.0 {
        return (vs[0].lat, vs[0].lon, 0.0);
    }

    cx /= 6.0 * signed_area;
    cy /= 6.0 * signed_area;
    (cx, cy, signed_area.abs())
}

/// Area-weighted center of a multi-polygon region.
///
/// # Errors
/// Returns `DegenerateRegion` when every polygon has zero area; the caller
/// supplies the region name for the error message.
pub fn find_center(polygons: &[Polygon]) -> Result<Position> {
    let mut lat_sum = 0.0;
    let mut lon_sum = 0.0;
    let mut total_area = 0.0;

    for polygon in polygons {
        let (lat, lon, area) = find_centroid(polygon);
        lat_sum += lat * area;
        lon_sum += lon * area;
        total_area += area;
    }

    if total_area == 0.0 {
        return Err(MoodmapError::DegenerateRegion {
            name: String::new(),
        });
    }

    Ok(Position::new(lat_sum / total_area, lon_sum / total_area))
}
