use std::{collections::BTreeMap, time::Duration};

use tokio::time::sleep;

use crate::{
    error::Result,
    extractors::{movie_extractor::MovieExtractor, pagination::PaginationState},
    model::movie::Movie,
    sources::PageSource,
};

/// Pages the pagination widget advertises when a profile is first opened.
pub const ESTIMATED_PAGES: usize = 30;
pub const MOVIES_PER_PAGE: usize = 18;

#[derive(Debug, Clone)]
pub struct FetcherOptions {
    /// Pause before reading each page.
    pub settle_delay: Duration,
    /// Pause after moving to the next page.
    pub page_delay: Duration,
    pub max_pages: u32,
    /// Stop once this many movies have been collected.
    pub estimated_total: usize,
}

impl Default for FetcherOptions {
    fn default() -> Self {
        FetcherOptions {
            settle_delay: Duration::from_millis(2000),
            page_delay: Duration::from_millis(1500),
            max_pages: 50,
            estimated_total: ESTIMATED_PAGES * MOVIES_PER_PAGE,
        }
    }
}

pub struct ProfileFetcher {
    options: FetcherOptions,
}

impl ProfileFetcher {
    pub fn new(options: FetcherOptions) -> Self {
        ProfileFetcher { options }
    }

    /// Collects every rated movie of the profile, page after page.
    ///
    /// Only failing to open the profile is an error. Anything going wrong later
    /// ends pagination and the movies gathered so far are returned.
    pub async fn extract_all_movies<S>(&self, source: &mut S, profile_url: &str) -> Result<Vec<Movie>>
    where
        S: PageSource + ?Sized,
    {
        log::info!("Starting SensCritique extraction");
        log::info!("Profile URL: {}", profile_url);

        source.open(profile_url).await?;

        let movies = self.collect_pages(source).await;

        log::info!("Extraction complete! Found {} movies total.", movies.len());
        Self::log_summary(&movies);

        if let Err(e) = source.close().await {
            log::warn!("Could not close page source cleanly: {}", e);
        }

        Ok(movies)
    }

    async fn collect_pages<S>(&self, source: &mut S) -> Vec<Movie>
    where
        S: PageSource + ?Sized,
    {
        let mut movies: Vec<Movie> = vec![];
        let mut page_number: u32 = 1;
        let mut total_expected = 0;

        loop {
            log::info!("Processing page {}...", page_number);
            sleep(self.options.settle_delay).await;

            let html = match source.current_html().await {
                Ok(html) => html,
                Err(e) => {
                    log::error!("Error during extraction: {}", e);
                    break;
                }
            };

            let page_movies = MovieExtractor::extract_movies_from_page(&html);
            if page_movies.is_empty() {
                log::info!("No movies found on this page. Stopping pagination.");
                break;
            }

            let found = page_movies.len();
            movies.extend(page_movies);
            log::info!(
                "Page {}: found {} movies (total: {})",
                page_number,
                found,
                movies.len()
            );

            if page_number == 1 {
                total_expected = self.options.estimated_total;
                log::info!("Target: {} total movies", total_expected);
            }

            let pagination = PaginationState::from_html(&html);
            if !(pagination.has_next_page() && movies.len() < total_expected) {
                break;
            }

            let next_page = pagination.current_page.unwrap_or(page_number) + 1;
            match source.go_to_page(next_page).await {
                Ok(true) => {}
                Ok(false) => {
                    log::warn!("Failed to navigate to next page. Stopping.");
                    break;
                }
                Err(e) => {
                    log::error!("Error navigating to page {}: {}", next_page, e);
                    break;
                }
            }

            page_number += 1;
            sleep(self.options.page_delay).await;

            if page_number > self.options.max_pages {
                log::warn!(
                    "Safety limit reached ({} pages). Stopping.",
                    self.options.max_pages
                );
                break;
            }
        }

        movies
    }

    pub fn rating_distribution(movies: &[Movie]) -> BTreeMap<u8, usize> {
        let mut counts = BTreeMap::new();
        for movie in movies {
            *counts.entry(movie.rating).or_insert(0) += 1;
        }
        counts
    }

    fn log_summary(movies: &[Movie]) {
        log::info!("Extraction summary: {} movies", movies.len());
        log::info!("Rating distribution:");
        for (rating, count) in Self::rating_distribution(movies).iter().rev() {
            log::info!("  {}/10: {} movies", rating, count);
        }
    }
}

impl Default for ProfileFetcher {
    fn default() -> Self {
        Self::new(FetcherOptions::default())
    }
}
