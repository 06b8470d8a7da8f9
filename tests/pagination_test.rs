use std::time::Duration;

use async_trait::async_trait;
use senscritique2letterboxd::{
    error::{Error, Result},
    fetchers::profile_fetcher::{FetcherOptions, ProfileFetcher},
    sources::PageSource,
};

/// A profile whose listing pages are generated on the fly.
struct FakeProfile {
    /// Number of movies listed on each page.
    movies_on_page: Box<dyn Fn(u32) -> usize + Send>,
    /// Whether the pagination widget offers a page after `page`.
    has_next: Box<dyn Fn(u32) -> bool + Send>,
    fail_navigation_at: Option<u32>,
    refuse_navigation_at: Option<u32>,
    current: u32,
    opened: bool,
    closed: bool,
    navigations: Vec<u32>,
}

impl FakeProfile {
    fn new(
        movies_on_page: impl Fn(u32) -> usize + Send + 'static,
        has_next: impl Fn(u32) -> bool + Send + 'static,
    ) -> Self {
        FakeProfile {
            movies_on_page: Box::new(movies_on_page),
            has_next: Box::new(has_next),
            fail_navigation_at: None,
            refuse_navigation_at: None,
            current: 0,
            opened: false,
            closed: false,
            navigations: vec![],
        }
    }

    fn render(&self, page: u32) -> String {
        let items: String = (0..(self.movies_on_page)(page))
            .map(|i| {
                format!(
                    r#"<li class="jwrjNN"><a data-testid="product-title" href="/film/movie_{page}_{i}/{page}{i:03}">Movie {page}-{i} (2001)</a><span data-testid="Rating">{rating}</span></li>"#,
                    rating = (i % 10) + 1
                )
            })
            .collect();

        let next = if (self.has_next)(page) {
            format!(r#"<button data-testid="click-{}">{}</button>"#, page + 1, page + 1)
        } else {
            String::new()
        };

        format!(
            r#"<html><body><ul>{items}</ul><nav aria-label="pagination"><span aria-current="page">{page}</span>{next}</nav></body></html>"#
        )
    }
}

#[async_trait]
impl PageSource for FakeProfile {
    async fn open(&mut self, _profile_url: &str) -> Result<()> {
        self.opened = true;
        self.current = 1;
        Ok(())
    }

    async fn current_html(&mut self) -> Result<String> {
        Ok(self.render(self.current))
    }

    async fn go_to_page(&mut self, page: u32) -> Result<bool> {
        self.navigations.push(page);
        if self.fail_navigation_at == Some(page) {
            return Err(Error::Config(format!("page {} exploded", page)));
        }
        if self.refuse_navigation_at == Some(page) {
            return Ok(false);
        }
        self.current = page;
        Ok(true)
    }

    async fn close(&mut self) -> Result<()> {
        self.closed = true;
        Ok(())
    }
}

fn instant_options() -> FetcherOptions {
    FetcherOptions {
        settle_delay: Duration::ZERO,
        page_delay: Duration::ZERO,
        ..FetcherOptions::default()
    }
}

#[tokio::test]
async fn stops_when_a_page_has_no_movies() {
    let mut profile = FakeProfile::new(|page| if page < 4 { 3 } else { 0 }, |_| true);

    let movies = ProfileFetcher::new(instant_options())
        .extract_all_movies(&mut profile, "https://www.senscritique.com/jdoe/collection")
        .await
        .unwrap();

    assert_eq!(movies.len(), 9);
    assert_eq!(movies.first().unwrap().title, "Movie 1-0");
    assert_eq!(movies.last().unwrap().title, "Movie 3-2");
    assert_eq!(profile.navigations, vec![2, 3, 4]);
    assert!(profile.opened);
    assert!(profile.closed);
}

#[tokio::test]
async fn stops_when_pagination_has_no_next_page() {
    let mut profile = FakeProfile::new(|_| 2, |page| page < 2);

    let movies = ProfileFetcher::new(instant_options())
        .extract_all_movies(&mut profile, "https://www.senscritique.com/jdoe/collection")
        .await
        .unwrap();

    assert_eq!(movies.len(), 4);
    assert_eq!(profile.navigations, vec![2]);
}

#[tokio::test]
async fn stops_at_the_safety_limit() {
    let mut profile = FakeProfile::new(|_| 1, |_| true);

    let movies = ProfileFetcher::new(instant_options())
        .extract_all_movies(&mut profile, "https://www.senscritique.com/jdoe/collection")
        .await
        .unwrap();

    assert_eq!(movies.len(), 50);
    assert_eq!(movies.last().unwrap().title, "Movie 50-0");
}

#[tokio::test]
async fn stops_once_the_estimated_total_is_reached() {
    let mut profile = FakeProfile::new(|_| 18, |_| true);

    let movies = ProfileFetcher::new(instant_options())
        .extract_all_movies(&mut profile, "https://www.senscritique.com/jdoe/collection")
        .await
        .unwrap();

    assert_eq!(movies.len(), 540);
    assert_eq!(profile.navigations.len(), 29);
}

#[tokio::test]
async fn keeps_collected_movies_when_navigation_fails() {
    let mut profile = FakeProfile::new(|_| 2, |_| true);
    profile.fail_navigation_at = Some(3);

    let movies = ProfileFetcher::new(instant_options())
        .extract_all_movies(&mut profile, "https://www.senscritique.com/jdoe/collection")
        .await
        .unwrap();

    assert_eq!(movies.len(), 4);
    assert!(profile.closed);
}

#[tokio::test]
async fn stops_when_the_next_page_cannot_be_reached() {
    let mut profile = FakeProfile::new(|_| 3, |_| true);
    profile.refuse_navigation_at = Some(4);

    let movies = ProfileFetcher::new(instant_options())
        .extract_all_movies(&mut profile, "https://www.senscritique.com/jdoe/collection")
        .await
        .unwrap();

    assert_eq!(movies.len(), 9);
    assert_eq!(movies.last().unwrap().title, "Movie 3-2");
    assert_eq!(profile.navigations, vec![2, 3, 4]);
    assert!(profile.closed);
}

#[tokio::test]
async fn rating_distribution_counts_each_rating() {
    let mut profile = FakeProfile::new(|page| if page == 1 { 12 } else { 0 }, |_| true);

    let movies = ProfileFetcher::new(instant_options())
        .extract_all_movies(&mut profile, "https://www.senscritique.com/jdoe/collection")
        .await
        .unwrap();

    let distribution = ProfileFetcher::rating_distribution(&movies);
    assert_eq!(distribution.get(&1), Some(&2));
    assert_eq!(distribution.get(&2), Some(&2));
    assert_eq!(distribution.get(&3), Some(&1));
    assert_eq!(distribution.values().sum::<usize>(), 12);
}
