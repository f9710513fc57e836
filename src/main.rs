use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use log::info;
use std::path::PathBuf;

use moodmap::analysis::{average_sentiments, group_tweets, region_centers, regions_nearest_to};
use moodmap::config::Config;
use moodmap::region_reader::read_regions_json;
use moodmap::sentiment::{extract_words, tweet_sentiment};
use moodmap::sentiment_reader::read_sentiments_csv;
use moodmap::tweet::Tweet;
use moodmap::tweet_reader::load_tweets;
use moodmap::visualization::{render_centered_map, render_sentiment_map};

#[derive(Parser)]
#[command(author, version, about = "Visualize the sentiment of geotagged tweets by region", long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long, default_value = "config/default.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print each word of a sentence with its sentiment score
    PrintSentiment {
        /// Sentence to score
        text: String,
    },
    /// Render the N regions nearest to a given region's center
    CenteredMap {
        /// Region name (case-insensitive)
        region: String,
        /// Number of regions to draw, the chosen one included
        #[arg(default_value_t = 10)]
        n: usize,
    },
    /// Render the sentiment choropleth for tweets matching a term
    TermMap {
        /// Word or phrase to filter tweets by
        term: String,
    },
}

fn main() -> Result<()> {
    // Initialize logger - defaults to RUST_LOG if set, otherwise INFO
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();

    let args = Args::parse();
    let config = Config::load_from_file(&args.config)?;

    match args.command {
        Command::PrintSentiment { text } => print_sentiment(&text, &config),
        Command::CenteredMap { region, n } => draw_centered_map(&region, n, &config),
        Command::TermMap { term } => draw_map_for_term(&term, &config),
    }
}

fn print_sentiment(text: &str, config: &Config) -> Result<()> {
    let table = read_sentiments_csv(&config.data.sentiments_csv)
        .with_context(|| format!("loading {}", config.data.sentiments_csv.display()))?;
    info!("Loaded {} sentiment words", table.len());

    let words = extract_words(&text.to_lowercase());
    if words.is_empty() {
        bail!("No words extracted from \"{text}\"");
    }

    let width = words.iter().map(String::len).max().unwrap_or(0);
    for word in &words {
        match table.get(word) {
            Some(value) => println!("{word:>width$}: {value}"),
            None => println!("{word:>width$}: unknown"),
        }
    }
    Ok(())
}

fn draw_centered_map(region: &str, n: usize, config: &Config) -> Result<()> {
    let regions = read_regions_json(&config.data.regions_json)
        .with_context(|| format!("loading {}", config.data.regions_json.display()))?;
    info!("Loaded {} regions", regions.len());

    let centers = region_centers(&regions)?;
    let name = region.to_uppercase();
    let selected = regions_nearest_to(&name, &centers, n)?;
    let marked = centers
        .get(&name)
        .copied()
        .ok_or_else(|| moodmap::MoodmapError::UnknownRegion(name.clone()))?;

    let path = config
        .data
        .output_dir
        .join(format!("centered_{}.png", name.to_lowercase()));
    let saved = render_centered_map(&regions, &centers, &selected, marked, &config.canvas, path)?;
    info!("Centered map saved to: {}", saved.display());
    Ok(())
}

fn draw_map_for_term(term: &str, config: &Config) -> Result<()> {
    let table = read_sentiments_csv(&config.data.sentiments_csv)
        .with_context(|| format!("loading {}", config.data.sentiments_csv.display()))?;
    let regions = read_regions_json(&config.data.regions_json)
        .with_context(|| format!("loading {}", config.data.regions_json.display()))?;
    let tweets = load_tweets(&config.data.tweets_file, term)
        .with_context(|| format!("loading {}", config.data.tweets_file.display()))?;
    info!(
        "Loaded {} sentiment words, {} regions, {} matching tweets",
        table.len(),
        regions.len(),
        tweets.len()
    );
    if tweets.is_empty() {
        bail!("No tweets match term \"{term}\"");
    }

    let centers = region_centers(&regions)?;
    let grouped = group_tweets(&tweets, &regions)?;
    let averages = average_sentiments(&grouped, &table);
    info!(
        "{} of {} regions received tweets, {} have sentiment",
        grouped.len(),
        regions.len(),
        averages.len()
    );

    let dots: Vec<_> = tweets
        .iter()
        .map(|t: &Tweet| (t.location(), tweet_sentiment(t, &table)))
        .collect();

    let path = config
        .data
        .output_dir
        .join(format!("map_{}.png", sanitize_term(term)));
    let saved = render_sentiment_map(&regions, &centers, &averages, &dots, &config.canvas, path)?;
    info!("Sentiment map saved to: {}", saved.display());
    Ok(())
}

/// Turns a free-form search term into a filename fragment.
fn sanitize_term(term: &str) -> String {
    let cleaned: String = term
        .to_lowercase()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    if cleaned.is_empty() {
        "term".to_string()
    } else {
        cleaned
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_keeps_alphanumerics() {
        assert_eq!(sanitize_term("my job"), "my_job");
        assert_eq!(sanitize_term("Texas"), "texas");
        assert_eq!(sanitize_term("#!?"), "___");
        assert_eq!(sanitize_term(""), "term");
    }
}
