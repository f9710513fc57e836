use crate::error::{MoodmapError, Result};
use crate::geo::Position;
use crate::geometry::{Polygon, Region};

use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

/// Raw JSON shape: region name -> polygons -> [lat, lon] vertices.
type RawRegions = BTreeMap<String, Vec<Vec<[f64; 2]>>>;

/// Reads region definitions from a JSON file
///
/// The expected shape is `{"NAME": [[[lat, lon], ...], ...]}` where each
/// inner list is one polygon ring. Open rings are closed on load.
///
/// # Errors
/// Returns error if the file cannot be read, the JSON is malformed, or a
/// region has no polygons / a polygon has no vertices
pub fn read_regions_json<P: AsRef<Path>>(path: P) -> Result<Vec<Region>> {
    let file = std::fs::File::open(path)?;
    read_regions_from_reader(file)
}

pub fn read_regions_from_reader<R: Read>(reader: R) -> Result<Vec<Region>> {
    let raw: RawRegions = serde_json::from_reader(reader)?;
    let mut regions = Vec::with_capacity(raw.len());

    for (name, raw_polygons) in raw {
        let mut polygons = Vec::with_capacity(raw_polygons.len());
        for ring in raw_polygons {
            let vertices = ring
                .into_iter()
                .map(|[lat, lon]| Position::new(lat, lon))
                .collect();
            let polygon = Polygon::new(vertices).map_err(|_| {
                MoodmapError::RegionData(format!("region '{}' has an empty polygon", name))
            })?;
            polygons.push(polygon);
        }
        regions.push(Region::new(name, polygons)?);
    }

    Ok(regions)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_named_multi_polygon_regions() {
        let json = br#"{
            "CA": [[[1.0, 2.0], [3.0, 4.0], [5.0, 0.0], [1.0, 2.0]]],
            "HI": [
                [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 0.0]],
                [[5.0, 5.0], [6.0, 5.0], [6.0, 6.0], [5.0, 5.0]]
            ]
        }"#;
        let regions = read_regions_from_reader(&json[..]).unwrap();
        assert_eq!(regions.len(), 2);
        assert_eq!(regions[0].name, "CA");
        assert_eq!(regions[0].polygons.len(), 1);
        assert_eq!(regions[1].name, "HI");
        assert_eq!(regions[1].polygons.len(), 2);
    }

    #[test]
    fn open_rings_are_closed_on_load() {
        let json = br#"{"TX": [[[1.0, 2.0], [3.0, 4.0], [5.0, 0.0]]]}"#;
        let regions = read_regions_from_reader(&json[..]).unwrap();
        let vs = regions[0].polygons[0].vertices();
        assert_eq!(vs.first(), vs.last());
        assert_eq!(vs.len(), 4);
    }

    #[test]
    fn region_with_no_polygons_is_rejected() {
        let json = br#"{"XX": []}"#;
        assert!(matches!(
            read_regions_from_reader(&json[..]),
            Err(MoodmapError::RegionData(_))
        ));
    }

    #[test]
    fn polygon_with_no_vertices_is_rejected() {
        let json = br#"{"XX": [[]]}"#;
        assert!(matches!(
            read_regions_from_reader(&json[..]),
            Err(MoodmapError::RegionData(_))
        ));
    }

    #[test]
    fn malformed_json_is_a_region_data_error() {
        let json = br#"{"XX": [[[1.0]]]}"#;
        assert!(matches!(
            read_regions_from_reader(&json[..]),
            Err(MoodmapError::RegionData(_))
        ));
    }
}
