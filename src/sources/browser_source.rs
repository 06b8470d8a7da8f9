use std::time::Duration;

use async_trait::async_trait;
use chromiumoxide::{Browser, BrowserConfig, Page};
use futures::StreamExt;
use tokio::{task::JoinHandle, time::sleep};

use crate::{
    error::{Error, Result},
    extractors::pagination::PaginationState,
    sources::{poll_until, PageSource},
};

const PAGE_NUMBER_TIMEOUT: Duration = Duration::from_secs(15);
const CONTENT_TIMEOUT: Duration = Duration::from_secs(10);
const POLL_INTERVAL: Duration = Duration::from_millis(250);
const SETTLE_DELAY: Duration = Duration::from_millis(2000);
const TIMEOUT_GRACE_DELAY: Duration = Duration::from_millis(3000);

/// Drives a Chromium window and paginates by clicking the listing's page buttons.
pub struct BrowserPageSource {
    browser: Browser,
    handler_task: JoinHandle<()>,
    page: Option<Page>,
}

impl BrowserPageSource {
    pub async fn launch(headless: bool) -> Result<Self> {
        let mut builder = BrowserConfig::builder().window_size(1200, 800);
        if !headless {
            builder = builder.with_head();
        }
        let config = builder.build().map_err(Error::Config)?;

        let (browser, mut handler) = Browser::launch(config).await?;

        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    log::debug!("Browser handler error: {:?}", e);
                }
            }
        });

        Ok(BrowserPageSource {
            browser,
            handler_task,
            page: None,
        })
    }

    fn page(&self) -> Result<&Page> {
        self.page
            .as_ref()
            .ok_or_else(|| Error::Config("profile page was never opened".to_string()))
    }
}

async fn wait_until(page: &Page, script: &str, timeout: Duration) -> bool {
    poll_until(
        || async move {
            let done = page
                .evaluate(script)
                .await?
                .into_value::<bool>()
                .unwrap_or(false);
            Ok::<_, Error>(done)
        },
        timeout,
        POLL_INTERVAL,
    )
    .await
}

#[async_trait]
impl PageSource for BrowserPageSource {
    async fn open(&mut self, profile_url: &str) -> Result<()> {
        let page = self.browser.new_page(profile_url).await?;
        page.wait_for_navigation().await?;
        self.page = Some(page);
        Ok(())
    }

    async fn current_html(&mut self) -> Result<String> {
        Ok(self.page()?.content().await?)
    }

    async fn go_to_page(&mut self, page_number: u32) -> Result<bool> {
        let selector = format!(
            r#"[data-testid="{}"]"#,
            PaginationState::click_test_id(page_number)
        );

        let button = match self.page()?.find_element(selector.as_str()).await {
            Ok(button) => button,
            Err(_) => {
                log::info!("  No next page element found for page {}", page_number);
                return Ok(false);
            }
        };

        log::info!("  Clicking page {}...", page_number);
        button.click().await?;

        log::info!("  Waiting for page {} content to load...", page_number);
        let page_number_script = format!(
            r#"(() => {{ const el = document.querySelector('[aria-current]'); return !!el && el.textContent === '{}'; }})()"#,
            page_number
        );
        let content_script =
            r#"document.querySelectorAll('a[data-testid="product-title"]').length > 0"#;

        let page = self.page()?;
        let loaded = wait_until(page, &page_number_script, PAGE_NUMBER_TIMEOUT).await
            && wait_until(page, content_script, CONTENT_TIMEOUT).await;

        if loaded {
            sleep(SETTLE_DELAY).await;
            log::info!("  Successfully navigated to page {}", page_number);
        } else {
            log::warn!(
                "  Timeout waiting for page {} to load, but continuing...",
                page_number
            );
            sleep(TIMEOUT_GRACE_DELAY).await;
        }

        Ok(true)
    }

    async fn close(&mut self) -> Result<()> {
        self.page = None;
        let closed = self.browser.close().await;
        self.handler_task.abort();
        closed?;
        Ok(())
    }
}
