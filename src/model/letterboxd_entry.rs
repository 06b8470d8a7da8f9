use crate::model::{movie::Movie, rating::to_letterboxd_rating};

/// One row of a Letterboxd import file.
#[derive(Debug, Clone, PartialEq)]
pub struct LetterboxdEntry {
    pub title: String,
    /// Kept as text so converter input passes through untouched.
    pub year: String,
    pub rating: f32,
    pub rating10: i32,
}

impl LetterboxdEntry {
    pub fn csv_titles() -> Vec<&'static str> {
        vec!["Title", "Year", "Rating", "Rating10"]
    }

    pub fn to_csvable_array(&self) -> Vec<String> {
        vec![
            quote_field(&self.title),
            self.year.clone(),
            self.rating.to_string(),
            self.rating10.to_string(),
        ]
    }
}

impl From<&Movie> for LetterboxdEntry {
    fn from(movie: &Movie) -> Self {
        LetterboxdEntry {
            title: movie.title.clone(),
            year: movie.year.map(|y| y.to_string()).unwrap_or_default(),
            rating: to_letterboxd_rating(movie.rating as f32),
            rating10: movie.rating as i32,
        }
    }
}

// Titles are always quoted. The csv writer runs with QuoteStyle::Never.
fn quote_field(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_entry_from_movie() {
        let movie = Movie {
            title: "Paris, Texas".to_string(),
            year: Some(1984),
            rating: 9,
            url: "https://www.senscritique.com/film/paris_texas/470489".to_string(),
        };

        let entry = LetterboxdEntry::from(&movie);

        assert_eq!(entry.year, "1984");
        assert_eq!(entry.rating, 4.5);
        assert_eq!(entry.rating10, 9);
    }

    #[test]
    fn missing_year_is_empty() {
        let movie = Movie {
            title: "Untitled".to_string(),
            year: None,
            rating: 4,
            url: String::new(),
        };

        assert_eq!(LetterboxdEntry::from(&movie).to_csvable_array()[1], "");
    }

    #[test]
    fn quotes_titles_and_doubles_inner_quotes() {
        assert_eq!(quote_field("Plain"), "\"Plain\"");
        assert_eq!(quote_field("Say \"Hi\", Bob"), "\"Say \"\"Hi\"\", Bob\"");
    }

    #[test]
    fn whole_ratings_print_without_decimals() {
        let entry = LetterboxdEntry {
            title: "x".to_string(),
            year: String::new(),
            rating: 5.0,
            rating10: 10,
        };

        assert_eq!(entry.to_csvable_array()[2], "5");
    }
}
