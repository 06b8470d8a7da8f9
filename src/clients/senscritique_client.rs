use reqwest::{header, Client, Url};

use crate::error::{Error, Result};

#[derive(Debug, Clone)]
pub struct SensCritiqueClient {
    client: Client,
}

impl SensCritiqueClient {
    pub fn new() -> Result<Self> {
        let user_agent = header::HeaderValue::from_static("Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36");
        let client = Client::builder()
            .user_agent(user_agent)
            .build()
            .map_err(|source| Error::Http {
                url: Self::get_base_url(),
                source,
            })?;

        Ok(Self { client })
    }

    pub fn get_base_url() -> String {
        "https://www.senscritique.com".to_string()
    }

    /// Site-relative links (`/film/...`) are resolved against the SensCritique host.
    pub fn absolute_url(url: &str) -> String {
        if url.starts_with('/') {
            return Self::get_base_url() + url;
        }
        url.to_string()
    }

    /// The profile listing URL with its `page` query parameter set to `page`.
    pub fn get_profile_url_for_page(profile_url: &str, page: u32) -> Result<String> {
        let mut url =
            Url::parse(profile_url).map_err(|_| Error::InvalidUrl(profile_url.to_string()))?;

        let kept_pairs: Vec<(String, String)> = url
            .query_pairs()
            .filter(|(key, _)| key != "page")
            .map(|(key, value)| (key.into_owned(), value.into_owned()))
            .collect();

        {
            let mut pairs = url.query_pairs_mut();
            pairs.clear();
            pairs.extend_pairs(kept_pairs);
            if page > 1 {
                pairs.append_pair("page", &page.to_string());
            }
        }

        if url.query() == Some("") {
            url.set_query(None);
        }

        Ok(url.to_string())
    }

    pub async fn get_html_from_url(&self, url: &str) -> Result<String> {
        log::debug!("Fetching {}", url);

        let resp = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| Error::Http {
                url: url.to_string(),
                source,
            })?;

        if !resp.status().is_success() {
            return Err(Error::Status {
                url: url.to_string(),
                status: resp.status(),
            });
        }

        resp.text().await.map_err(|source| Error::Http {
            url: url.to_string(),
            source,
        })
    }
}
