pub mod clients;
pub mod config;
pub mod converter;
pub mod error;
pub mod extractors;
pub mod fetchers;
pub mod logging;
pub mod model;
pub mod persisters;
pub mod sources;

use config::Config;
use error::Result;
use fetchers::profile_fetcher::ProfileFetcher;
use model::{letterboxd_entry::LetterboxdEntry, movie::Movie, rating::to_letterboxd_rating};
use persisters::csv_writer::CsvWriter;
use sources::PageSource;

pub async fn run(config: Config) -> Result<Vec<Movie>> {
    let mut source = open_page_source(&config).await?;

    let movies = ProfileFetcher::default()
        .extract_all_movies(source.as_mut(), &config.profile_url)
        .await?;

    log::info!("Total movies extracted: {}", movies.len());

    if movies.is_empty() {
        return Ok(movies);
    }

    let entries: Vec<LetterboxdEntry> = movies.iter().map(LetterboxdEntry::from).collect();
    CsvWriter::save_entries_to_csv(&entries, &config.output_file)?;
    log::info!(
        "Exported {} movies to {}",
        entries.len(),
        config.output_file.display()
    );

    log_top_movies(&movies);

    log::info!(
        "Upload {} at https://letterboxd.com/import/ and review the import before confirming it.",
        config.output_file.display()
    );

    Ok(movies)
}

async fn open_page_source(config: &Config) -> Result<Box<dyn PageSource>> {
    #[cfg(feature = "browser")]
    {
        if config.use_browser {
            let source =
                sources::browser_source::BrowserPageSource::launch(config.headless).await?;
            return Ok(Box::new(source));
        }
    }

    log::debug!("Fetching {} over plain HTTP", config.profile_url);
    let client = clients::senscritique_client::SensCritiqueClient::new()?;
    Ok(Box::new(sources::http_source::HttpPageSource::new(client)))
}

/// Best rated movies first. Ties keep profile order.
pub fn top_rated(movies: &[Movie], count: usize) -> Vec<&Movie> {
    let mut sorted: Vec<&Movie> = movies.iter().collect();
    sorted.sort_by(|a, b| b.rating.cmp(&a.rating));
    sorted.truncate(count);
    sorted
}

fn log_top_movies(movies: &[Movie]) {
    log::info!("Your top 10 rated movies:");
    for (i, movie) in top_rated(movies, 10).iter().enumerate() {
        log::info!(
            "  {}. {} - {}/10 -> {}/5",
            i + 1,
            movie,
            movie.rating,
            to_letterboxd_rating(movie.rating as f32)
        );
    }
}
