use crate::geo::Position;
use chrono::NaiveDateTime;

/// A geotagged text record.
///
/// `text` is stored lowercase; `time` is opaque metadata that scoring and
/// assignment never consult. Constructed once, never mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct Tweet {
    text: String,
    time: Option<NaiveDateTime>,
    location: Position,
}

impl Tweet {
    pub fn new(text: impl Into<String>, time: Option<NaiveDateTime>, location: Position) -> Self {
        Self {
            text: text.into(),
            time,
            location,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn time(&self) -> Option<NaiveDateTime> {
        self.time
    }

    pub fn location(&self) -> Position {
        self.location
    }
}

impl std::fmt::Display for Tweet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "\"{}\" @ {}", self.text, self.location)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_quotes_text_and_location() {
        let t = Tweet::new("welcome to san francisco", None, Position::new(38.0, -122.0));
        assert_eq!(t.to_string(), "\"welcome to san francisco\" @ (38, -122)");
    }
}
