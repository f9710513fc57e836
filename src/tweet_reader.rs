use crate::error::{MoodmapError, Result};
use crate::geo::Position;
use crate::tweet::Tweet;

use chrono::NaiveDateTime;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Loads tweets whose text contains `term` from a tab-separated corpus.
///
/// Line format: `[lat, lon]<TAB>unused<TAB>YYYY-MM-DD HH:MM:SS<TAB>text`.
/// Text is lowercased on load; `term` matching is case-insensitive
/// substring containment. Blank lines are skipped.
///
/// # Errors
/// Returns `TweetLine` with the 1-indexed line number for malformed lines
pub fn load_tweets<P: AsRef<Path>>(path: P, term: &str) -> Result<Vec<Tweet>> {
    let file = std::fs::File::open(path)?;
    load_tweets_from_reader(file, term)
}

pub fn load_tweets_from_reader<R: Read>(reader: R, term: &str) -> Result<Vec<Tweet>> {
    let term = term.to_lowercase();
    let mut tweets = Vec::new();

    for (i, line) in BufReader::new(reader).lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let tweet = parse_tweet_line(&line, i + 1)?;
        if tweet.text().contains(&term) {
            tweets.push(tweet);
        }
    }

    Ok(tweets)
}

fn parse_tweet_line(line: &str, line_number: usize) -> Result<Tweet> {
    let mut fields = line.split('\t');
    let location_field = next_field(&mut fields, line_number, "location")?;
    let _unused = next_field(&mut fields, line_number, "id")?;
    let time_field = next_field(&mut fields, line_number, "timestamp")?;
    let text_field = next_field(&mut fields, line_number, "text")?;

    let location = parse_location(location_field, line_number)?;
    // The timestamp is opaque metadata; an unparsable one degrades to None
    // instead of rejecting the line.
    let time = NaiveDateTime::parse_from_str(time_field.trim(), TIMESTAMP_FORMAT).ok();

    Ok(Tweet::new(text_field.trim().to_lowercase(), time, location))
}

fn next_field<'a>(
    fields: &mut impl Iterator<Item = &'a str>,
    line: usize,
    name: &str,
) -> Result<&'a str> {
    fields.next().ok_or_else(|| MoodmapError::TweetLine {
        line,
        reason: format!("missing {} column", name),
    })
}

/// Parses a `[lat, lon]` location field.
fn parse_location(field: &str, line: usize) -> Result<Position> {
    let inner = field
        .trim()
        .strip_prefix('[')
        .and_then(|s| s.strip_suffix(']'))
        .ok_or_else(|| MoodmapError::TweetLine {
            line,
            reason: format!("location '{}' is not of the form [lat, lon]", field.trim()),
        })?;

    let mut parts = inner.splitn(2, ',');
    let lat = parse_coordinate(parts.next(), field, line)?;
    let lon = parse_coordinate(parts.next(), field, line)?;
    Ok(Position::new(lat, lon))
}

fn parse_coordinate(part: Option<&str>, field: &str, line: usize) -> Result<f64> {
    part.and_then(|s| s.trim().parse().ok())
        .ok_or_else(|| MoodmapError::TweetLine {
            line,
            reason: format!("bad coordinate in location '{}'", field.trim()),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Timelike};

    const CORPUS: &str = "[38.0, -122.0]\t6\t2011-08-28 19:02:06\tWelcome to San Francisco\n\
                          [41.0, -74.0]\t6\t2011-08-28 20:15:30\tmy job in new york\n\
                          \n\
                          [33.0, -97.0]\t6\t2011-08-29 01:00:00\ttexas forever\n";

    #[test]
    fn loads_and_lowercases_matching_tweets() {
        let tweets = load_tweets_from_reader(CORPUS.as_bytes(), "San Francisco").unwrap();
        assert_eq!(tweets.len(), 1);
        assert_eq!(tweets[0].text(), "welcome to san francisco");
        assert_eq!(tweets[0].location(), Position::new(38.0, -122.0));
    }

    #[test]
    fn empty_term_matches_everything() {
        let tweets = load_tweets_from_reader(CORPUS.as_bytes(), "").unwrap();
        assert_eq!(tweets.len(), 3);
    }

    #[test]
    fn preserves_corpus_order() {
        let tweets = load_tweets_from_reader(CORPUS.as_bytes(), "").unwrap();
        let texts: Vec<_> = tweets.iter().map(Tweet::text).collect();
        assert_eq!(
            texts,
            vec![
                "welcome to san francisco",
                "my job in new york",
                "texas forever"
            ]
        );
    }

    #[test]
    fn parses_timestamps() {
        let tweets = load_tweets_from_reader(CORPUS.as_bytes(), "job").unwrap();
        let time = tweets[0].time().unwrap();
        assert_eq!(time.date(), NaiveDate::from_ymd_opt(2011, 8, 28).unwrap());
        assert_eq!(time.hour(), 20);
    }

    #[test]
    fn bad_timestamp_degrades_to_none() {
        let line = "[38.0, -122.0]\t6\tnot a time\thello\n";
        let tweets = load_tweets_from_reader(line.as_bytes(), "").unwrap();
        assert_eq!(tweets[0].time(), None);
    }

    #[test]
    fn missing_columns_report_line_number() {
        let line = "[38.0, -122.0]\t6\n";
        match load_tweets_from_reader(line.as_bytes(), "") {
            Err(MoodmapError::TweetLine { line, .. }) => assert_eq!(line, 1),
            other => panic!("expected TweetLine, got {other:?}"),
        }
    }

    #[test]
    fn malformed_location_is_rejected() {
        let line = "38.0, -122.0\t6\t2011-08-28 19:02:06\thello\n";
        assert!(matches!(
            load_tweets_from_reader(line.as_bytes(), ""),
            Err(MoodmapError::TweetLine { .. })
        ));
    }

    #[test]
    fn loads_from_a_file_on_disk() {
        use std::io::Write;
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{}", CORPUS).unwrap();
        let tweets = load_tweets(file.path(), "texas").unwrap();
        assert_eq!(tweets.len(), 1);
    }
}
