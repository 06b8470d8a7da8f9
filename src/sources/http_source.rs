use async_trait::async_trait;

use crate::{
    clients::senscritique_client::SensCritiqueClient,
    error::{Error, Result},
    sources::PageSource,
};

/// Walks the listing by requesting `?page=N` directly, no JavaScript involved.
pub struct HttpPageSource {
    client: SensCritiqueClient,
    profile_url: Option<String>,
    html: Option<String>,
}

impl HttpPageSource {
    pub fn new(client: SensCritiqueClient) -> Self {
        HttpPageSource {
            client,
            profile_url: None,
            html: None,
        }
    }

    fn profile_url(&self) -> Result<&str> {
        self.profile_url
            .as_deref()
            .ok_or_else(|| Error::Config("profile page was never opened".to_string()))
    }
}

#[async_trait]
impl PageSource for HttpPageSource {
    async fn open(&mut self, profile_url: &str) -> Result<()> {
        let html = self.client.get_html_from_url(profile_url).await?;
        self.profile_url = Some(profile_url.to_string());
        self.html = Some(html);
        Ok(())
    }

    async fn current_html(&mut self) -> Result<String> {
        match &self.html {
            Some(html) => Ok(html.clone()),
            None => Err(Error::Config("profile page was never opened".to_string())),
        }
    }

    async fn go_to_page(&mut self, page: u32) -> Result<bool> {
        let url = SensCritiqueClient::get_profile_url_for_page(self.profile_url()?, page)?;
        log::info!("  Fetching page {}...", page);

        match self.client.get_html_from_url(&url).await {
            Ok(html) => {
                self.html = Some(html);
                Ok(true)
            }
            Err(Error::Status { status, .. }) if status == reqwest::StatusCode::NOT_FOUND => {
                log::info!("  No page {} at {}", page, url);
                Ok(false)
            }
            Err(e) => Err(e),
        }
    }
}
