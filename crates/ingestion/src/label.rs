//! Tokenizer for packed IPO labels.
//!
//! The report packs name, listing type, status and annotations into one
//! string, e.g. `"Acme Ltd BSE SME IPO Open Sub:2.5x GMP:₹35(7.2%)"`.
//! Delimiter keywords are located first so later cleanup only ever sees the
//! segment it cares about.

/// Keywords that split a packed label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keyword {
    /// `IPO`, ends the name in the GMP report.
    Ipo,
    /// `GMP` annotation, ends the name in the subscription report.
    Gmp,
    /// `Sub:` annotation.
    Sub,
}

impl Keyword {
    pub const ALL: [Keyword; 3] = [Keyword::Ipo, Keyword::Gmp, Keyword::Sub];

    pub fn token(self) -> &'static str {
        match self {
            Keyword::Ipo => "IPO",
            Keyword::Gmp => "GMP",
            Keyword::Sub => "Sub:",
        }
    }
}

/// Position of a keyword occurrence in the label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Marker {
    pub keyword: Keyword,
    /// Byte offset of the keyword.
    pub start: usize,
    /// Byte offset just past the keyword.
    pub end: usize,
}

/// A label with its keyword markers located.
#[derive(Debug, Clone)]
pub struct Label<'a> {
    text: &'a str,
    markers: Vec<Marker>,
}

impl<'a> Label<'a> {
    /// Locate every non-overlapping keyword occurrence, ordered by position.
    pub fn parse(text: &'a str) -> Self {
        let mut markers = Vec::new();
        for keyword in Keyword::ALL {
            let token = keyword.token();
            markers.extend(text.match_indices(token).map(|(start, _)| Marker {
                keyword,
                start,
                end: start + token.len(),
            }));
        }
        markers.sort_by_key(|m| m.start);
        Self { text, markers }
    }

    pub fn text(&self) -> &'a str {
        self.text
    }

    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    /// First occurrence of a keyword.
    pub fn first(&self, keyword: Keyword) -> Option<Marker> {
        self.markers.iter().copied().find(|m| m.keyword == keyword)
    }

    pub fn contains(&self, keyword: Keyword) -> bool {
        self.first(keyword).is_some()
    }

    /// Text before the first occurrence of `keyword`, or the whole label.
    pub fn head(&self, keyword: Keyword) -> &'a str {
        match self.first(keyword) {
            Some(m) => &self.text[..m.start],
            None => self.text,
        }
    }

    /// Text following each occurrence of `keyword`, up to the next marker.
    pub fn segments(&self, keyword: Keyword) -> impl Iterator<Item = &'a str> + '_ {
        let text = self.text;
        self.markers
            .iter()
            .enumerate()
            .filter(move |(_, m)| m.keyword == keyword)
            .map(move |(i, m)| {
                let end = self.markers.get(i + 1).map_or(text.len(), |n| n.start);
                &text[m.end..end]
            })
    }
}
