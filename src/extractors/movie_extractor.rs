use once_cell::sync::Lazy;
use regex::Regex;
use select::{
    document::Document,
    node::Node,
    predicate::{And, Attr, Class, Name, Or},
};
use serde_json::{Map, Value};

use crate::{clients::senscritique_client::SensCritiqueClient, model::movie::Movie};

static MOVIE_ID_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"/film/[^/]+/(\d+)").unwrap());
static YEAR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\((\d{4})\)").unwrap());
static TRAILING_YEAR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s*\(\d{4}\)\s*$").unwrap());
static USER_INFO_KEY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"ProductUserInfos:\d+_(\d+)").unwrap());

const USER_INFO_PREFIX: &str = "ProductUserInfos:";

/// Apollo cache embedded by the profile page, plus the id of the profile owner.
#[derive(Debug, Default)]
pub struct PageState {
    apollo_state: Option<Map<String, Value>>,
    user_id: Option<String>,
}

impl PageState {
    pub fn from_html(document: &Document) -> Self {
        let Some(script) = document.find(Attr("id", "__NEXT_DATA__")).next() else {
            return PageState::default();
        };

        let data: Value = match serde_json::from_str(&script.text()) {
            Ok(data) => data,
            Err(e) => {
                log::warn!("Could not parse JSON data for this page: {}", e);
                return PageState::default();
            }
        };

        let apollo_state = data
            .pointer("/props/pageProps/__APOLLO_STATE__")
            .and_then(Value::as_object)
            .cloned();
        let user_id = apollo_state.as_ref().and_then(Self::extract_user_id);

        PageState {
            apollo_state,
            user_id,
        }
    }

    fn extract_user_id(apollo_state: &Map<String, Value>) -> Option<String> {
        let first_key = apollo_state
            .keys()
            .find(|key| key.starts_with(USER_INFO_PREFIX))?;

        USER_INFO_KEY_RE
            .captures(first_key)
            .map(|caps| caps[1].to_string())
    }

    #[cfg(test)]
    fn user_id(&self) -> Option<&str> {
        self.user_id.as_deref()
    }

    pub fn rating_for(&self, movie_id: &str) -> Option<u8> {
        let apollo_state = self.apollo_state.as_ref()?;
        let key = format!("{}{}_{}", USER_INFO_PREFIX, movie_id, self.user_id.as_ref()?);

        apollo_state
            .get(&key)?
            .get("rating")?
            .as_f64()
            .filter(|r| *r > 0.0)
            .map(|r| r.round() as u8)
    }
}

#[derive(Debug)]
pub struct MovieExtractor {}

impl MovieExtractor {
    /// Pulls every rated movie out of one profile listing page.
    pub fn extract_movies_from_page(page_html: &str) -> Vec<Movie> {
        let document = Document::from(page_html);
        let state = PageState::from_html(&document);

        document
            .find(And(Name("a"), Attr("data-testid", "product-title")))
            .filter_map(|node| MovieExtractor::extract_movie(&node, &state))
            .collect()
    }

    fn extract_movie(node: &Node, state: &PageState) -> Option<Movie> {
        let title = node.text().trim().to_string();
        let url = node.attr("href").filter(|href| !href.is_empty())?;

        if title.is_empty() {
            return None;
        }

        let rating = MovieExtractor::extract_movie_id(url)
            .and_then(|movie_id| state.rating_for(&movie_id))
            .or_else(|| MovieExtractor::extract_rating_from_html(node));

        match rating {
            Some(rating) => Some(Movie {
                title: MovieExtractor::clean_title(&title),
                year: MovieExtractor::extract_year(&title),
                rating,
                url: SensCritiqueClient::absolute_url(url),
            }),
            None => {
                log::debug!("Skipping unrated movie {}", title);
                None
            }
        }
    }

    fn extract_rating_from_html(node: &Node) -> Option<u8> {
        let mut container = Some(*node);
        while let Some(candidate) = container {
            if candidate.is(Or(Class("sc-86ec7c44-5"), Class("jwrjNN"))) {
                break;
            }
            container = candidate.parent();
        }

        let rating_text = container?
            .find(Attr("data-testid", "Rating"))
            .next()?
            .text();

        match rating_text.trim().parse::<f32>() {
            Ok(rating) if rating > 0.0 => Some(rating.round() as u8),
            Ok(_) => None,
            Err(_) => {
                log::warn!("Could not parse rating '{}'", rating_text.trim());
                None
            }
        }
    }

    pub fn extract_movie_id(url: &str) -> Option<String> {
        MOVIE_ID_RE.captures(url).map(|caps| caps[1].to_string())
    }

    pub fn extract_year(title: &str) -> Option<u32> {
        YEAR_RE
            .captures(title)
            .and_then(|caps| caps[1].parse::<u32>().ok())
    }

    pub fn clean_title(title: &str) -> String {
        TRAILING_YEAR_RE.replace(title, "").into_owned()
    }
}
