use crate::config::CanvasConfig;
use crate::constants::LABEL_FONT_SIZE;
use crate::error::{MoodmapError, Result};
use crate::geo::Position;
use crate::geometry::Region;

use ab_glyph::{FontVec, PxScale};
use font_kit::{family_name::FamilyName, properties::Properties, source::SystemSource};
use image::{ImageBuffer, Rgb, RgbImage};
use imageproc::{
    drawing::{draw_filled_circle_mut, draw_polygon_mut, draw_text_mut},
    point::Point,
};
use itertools::Itertools;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Color palette
pub struct Colors;

impl Colors {
    pub const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
    pub const BLACK: Rgb<u8> = Rgb([0, 0, 0]);
    pub const LIGHT_GRAY: Rgb<u8> = Rgb([200, 200, 200]); // regions without data
    pub const DARK_GRAY: Rgb<u8> = Rgb([128, 128, 128]);
    pub const BLUE: Rgb<u8> = Rgb([0, 100, 255]); // positive extreme
    pub const RED: Rgb<u8> = Rgb([255, 0, 0]); // negative extreme
}

/// Maps a sentiment value onto the red-white-blue ramp.
///
/// `None` (no data) is light gray; negative values blend white toward red,
/// positive values blend white toward blue.
pub fn sentiment_color(sentiment: Option<f64>) -> Rgb<u8> {
    let Some(s) = sentiment else {
        return Colors::LIGHT_GRAY;
    };
    let t = s.clamp(-1.0, 1.0);
    if t < 0.0 {
        lerp_color(Colors::WHITE, Colors::RED, -t)
    } else {
        lerp_color(Colors::WHITE, Colors::BLUE, t)
    }
}

fn lerp_color(from: Rgb<u8>, to: Rgb<u8>, t: f64) -> Rgb<u8> {
    let mix = |a: u8, b: u8| -> u8 {
        (f64::from(a) + (f64::from(b) - f64::from(a)) * t).round() as u8
    };
    Rgb([
        mix(from.0[0], to.0[0]),
        mix(from.0[1], to.0[1]),
        mix(from.0[2], to.0[2]),
    ])
}

/// Equirectangular projection of lat/lon onto the canvas interior.
#[derive(Debug, Clone)]
pub struct MapProjection {
    lat_min: f64,
    lat_max: f64,
    lon_min: f64,
    lon_max: f64,
    margin: f64,
    inner_width: f64,
    inner_height: f64,
}

impl MapProjection {
    /// Fits the bounding box of all region vertices to the canvas.
    ///
    /// # Errors
    /// Returns `EmptyRegionSet` when `regions` contains no vertex at all
    pub fn fit(regions: &[Region], canvas: &CanvasConfig) -> Result<Self> {
        let positions = regions
            .iter()
            .flat_map(|r| r.polygons.iter())
            .flat_map(|p| p.ring().iter());

        let lats = positions.clone().map(|p| p.lat);
        let lons = positions.map(|p| p.lon);

        let (lat_min, lat_max) = lats
            .minmax()
            .into_option()
            .ok_or(MoodmapError::EmptyRegionSet)?;
        let (lon_min, lon_max) = lons.minmax().into_option().unwrap();

        Ok(Self {
            lat_min,
            lat_max,
            lon_min,
            lon_max,
            margin: f64::from(canvas.margin),
            inner_width: f64::from(canvas.width - 2 * canvas.margin),
            inner_height: f64::from(canvas.height - 2 * canvas.margin),
        })
    }

    /// Projects a position to pixel coordinates (Y axis inverted).
    pub fn to_px(&self, p: Position) -> (i32, i32) {
        let lon_span = (self.lon_max - self.lon_min).max(f64::EPSILON);
        let lat_span = (self.lat_max - self.lat_min).max(f64::EPSILON);
        let x = self.margin + (p.lon - self.lon_min) / lon_span * self.inner_width;
        let y = self.margin + (self.lat_max - p.lat) / lat_span * self.inner_height;
        (x.round() as i32, y.round() as i32)
    }
}

/// Drawing context over an RGB image and a system font.
pub struct Renderer {
    image: RgbImage,
    font: FontVec,
    dot_radius: i32,
}

impl Renderer {
    pub fn new(canvas: &CanvasConfig) -> Result<Self> {
        let image = ImageBuffer::from_pixel(canvas.width, canvas.height, Colors::WHITE);
        let font = load_system_font()?;

        Ok(Self {
            image,
            font,
            dot_radius: canvas.dot_radius as i32,
        })
    }

    /// Fills every polygon of a region with the given color.
    pub fn draw_region(&mut self, region: &Region, projection: &MapProjection, color: Rgb<u8>) {
        for polygon in &region.polygons {
            // imageproc closes the ring itself, so the duplicated final
            // vertex must not be passed through.
            let mut points: Vec<Point<i32>> = polygon
                .ring()
                .iter()
                .map(|&p| {
                    let (x, y) = projection.to_px(p);
                    Point::new(x, y)
                })
                .dedup()
                .collect();
            // Rounding can also collapse the first and last vertex onto the
            // same pixel, which draw_polygon_mut rejects.
            while points.len() > 1 && points.first() == points.last() {
                points.pop();
            }
            if points.len() < 3 {
                continue; // collapses to a line at this resolution
            }
            draw_polygon_mut(&mut self.image, &points, color);
        }
    }

    pub fn draw_name(&mut self, name: &str, at: Position, projection: &MapProjection) {
        let (x, y) = projection.to_px(at);
        let scale = PxScale::from(LABEL_FONT_SIZE as f32);
        draw_text_mut(&mut self.image, Colors::BLACK, x, y, scale, &self.font, name);
    }

    pub fn draw_dot(&mut self, at: Position, projection: &MapProjection, color: Rgb<u8>) {
        let (x, y) = projection.to_px(at);
        draw_filled_circle_mut(&mut self.image, (x, y), self.dot_radius, color);
    }

    /// Saves the image as PNG, creating the parent directory if needed.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<PathBuf> {
        let path = path.as_ref();
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        self.image.save(path)?;
        Ok(path.to_path_buf())
    }
}

fn load_system_font() -> Result<FontVec> {
    let source = SystemSource::new();

    let font_families = vec![
        FamilyName::Title("Arial".to_string()),
        FamilyName::SansSerif,
        FamilyName::Title("Helvetica".to_string()),
        FamilyName::Title("DejaVu Sans".to_string()),
    ];

    for family in font_families {
        if let Ok(handle) = source.select_best_match(&[family], &Properties::new())
            && let Ok(font_kit_font) = handle.load()
            && let Some(font_bytes) = font_kit_font.copy_font_data()
            && let Ok(font) = FontVec::try_from_vec(font_bytes.to_vec())
        {
            return Ok(font);
        }
    }

    Err(MoodmapError::Other(
        "No usable system font found".to_string(),
    ))
}

/// Renders the choropleth: regions colored by average sentiment, labels at
/// region centers, one dot per tweet colored by its own sentiment.
pub fn render_sentiment_map<P: AsRef<Path>>(
    regions: &[Region],
    centers: &BTreeMap<String, Position>,
    averages: &BTreeMap<String, f64>,
    tweet_dots: &[(Position, Option<f64>)],
    canvas: &CanvasConfig,
    path: P,
) -> Result<PathBuf> {
    let projection = MapProjection::fit(regions, canvas)?;
    let mut renderer = Renderer::new(canvas)?;

    for region in regions {
        let color = sentiment_color(averages.get(&region.name).copied());
        renderer.draw_region(region, &projection, color);
    }
    for (location, sentiment) in tweet_dots {
        renderer.draw_dot(*location, &projection, sentiment_color(*sentiment));
    }
    for (name, &center) in centers {
        renderer.draw_name(name, center, &projection);
    }

    renderer.save(path)
}

/// Renders the `n` regions nearest to a chosen center, names included,
/// with a marker dot on the chosen center itself.
pub fn render_centered_map<P: AsRef<Path>>(
    regions: &[Region],
    centers: &BTreeMap<String, Position>,
    selected: &[String],
    marked: Position,
    canvas: &CanvasConfig,
    path: P,
) -> Result<PathBuf> {
    let shown: Vec<Region> = regions
        .iter()
        .filter(|r| selected.contains(&r.name))
        .cloned()
        .collect();

    let projection = MapProjection::fit(&shown, canvas)?;
    let mut renderer = Renderer::new(canvas)?;

    for region in &shown {
        renderer.draw_region(region, &projection, Colors::LIGHT_GRAY);
    }
    for name in selected {
        if let Some(&center) = centers.get(name) {
            renderer.draw_name(name, center, &projection);
        }
    }
    renderer.draw_dot(marked, &projection, Colors::RED);

    renderer.save(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Polygon;

    fn unit_region(name: &str) -> Region {
        let p = Polygon::new(vec![
            Position::new(0.0, 0.0),
            Position::new(10.0, 0.0),
            Position::new(10.0, 20.0),
            Position::new(0.0, 20.0),
        ])
        .unwrap();
        Region::new(name, vec![p]).unwrap()
    }

    fn canvas() -> CanvasConfig {
        CanvasConfig {
            width: 240,
            height: 120,
            margin: 20,
            dot_radius: 3,
        }
    }

    #[test]
    fn projection_maps_corners_to_canvas_interior() {
        let regions = vec![unit_region("A")];
        let proj = MapProjection::fit(&regions, &canvas()).unwrap();

        // North-west data corner lands at the top-left interior corner.
        assert_eq!(proj.to_px(Position::new(10.0, 0.0)), (20, 20));
        // South-east corner lands at the bottom-right interior corner.
        assert_eq!(proj.to_px(Position::new(0.0, 20.0)), (220, 100));
    }

    #[test]
    fn projection_fails_without_regions() {
        assert!(matches!(
            MapProjection::fit(&[], &canvas()),
            Err(MoodmapError::EmptyRegionSet)
        ));
    }

    #[test]
    fn no_data_is_gray() {
        assert_eq!(sentiment_color(None), Colors::LIGHT_GRAY);
    }

    #[test]
    fn extremes_hit_palette_ends() {
        assert_eq!(sentiment_color(Some(1.0)), Colors::BLUE);
        assert_eq!(sentiment_color(Some(-1.0)), Colors::RED);
        assert_eq!(sentiment_color(Some(0.0)), Colors::WHITE);
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        assert_eq!(sentiment_color(Some(5.0)), sentiment_color(Some(1.0)));
        assert_eq!(sentiment_color(Some(-5.0)), sentiment_color(Some(-1.0)));
    }

    #[test]
    fn midpoints_blend_toward_white() {
        let Rgb([r, g, b]) = sentiment_color(Some(0.5));
        // Halfway to blue keeps red/green channels light.
        assert!(r > 100 && g > 150 && b == 255);
    }
}
