pub mod analysis;
pub mod config;
pub mod constants;
pub mod error;
pub mod geo;
pub mod geometry;
pub mod region_reader;
pub mod sentiment;
pub mod sentiment_reader;
pub mod tweet;
pub mod tweet_reader;
pub mod visualization;

pub use analysis::{
    average_sentiments, closest_region, group_tweets, region_centers, regions_nearest_to,
};
pub use config::Config;
pub use constants::EARTH_RADIUS_MILES;
pub use error::MoodmapError;
pub use geo::{Position, geo_distance};
pub use geometry::{Polygon, Region, find_center, find_centroid};
pub use region_reader::read_regions_json;
pub use sentiment::{SentimentTable, extract_words, tweet_sentiment};
pub use sentiment_reader::read_sentiments_csv;
pub use tweet::Tweet;
pub use tweet_reader::load_tweets;
pub use visualization::{render_centered_map, render_sentiment_map};
