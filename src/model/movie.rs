use std::fmt;

/// A rated movie as it appears on a SensCritique profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Movie {
    pub title: String,
    pub year: Option<u32>,
    /// Rating on SensCritique's 1-10 scale.
    pub rating: u8,
    pub url: String,
}

impl fmt::Display for Movie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.year {
            Some(year) => write!(f, "{} ({})", self.title, year),
            None => write!(f, "{}", self.title),
        }
    }
}
