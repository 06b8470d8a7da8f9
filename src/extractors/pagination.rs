use select::{
    document::Document,
    predicate::{Attr, Name},
};

/// What the pagination widget of a profile listing page says about where we are.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationState {
    pub has_nav: bool,
    pub current_page: Option<u32>,
    pub next_page_link: bool,
}

impl PaginationState {
    pub fn from_html(page_html: &str) -> Self {
        let document = Document::from(page_html);

        let has_nav = document.find(Name("nav")).any(|n| {
            n.attr("aria-label")
                .map(|label| label.contains("pagination") || label.contains("Navigation"))
                .unwrap_or(false)
        });

        let current_page = document
            .find(Attr("aria-current", ()))
            .next()
            .and_then(|n| Self::parse_page_number(&n.text()));

        let next_page_link = current_page
            .map(|current| {
                let test_id = Self::click_test_id(current + 1);
                document
                    .find(Attr("data-testid", test_id.as_str()))
                    .next()
                    .is_some()
            })
            .unwrap_or(false);

        PaginationState {
            has_nav,
            current_page,
            next_page_link,
        }
    }

    pub fn has_next_page(&self) -> bool {
        if !self.has_nav {
            log::debug!("No pagination nav found");
            return false;
        }

        match self.current_page {
            Some(current) => {
                log::debug!(
                    "Current page: {}, next page element exists: {}",
                    current,
                    self.next_page_link
                );
                self.next_page_link
            }
            None => {
                log::debug!("No current page number found");
                false
            }
        }
    }

    /// Empty text means the first page. Anything else must be a page number.
    fn parse_page_number(text: &str) -> Option<u32> {
        let text = text.trim();
        if text.is_empty() {
            return Some(1);
        }
        text.parse::<u32>().ok()
    }

    /// `data-testid` of the pagination button leading to `page`.
    pub fn click_test_id(page: u32) -> String {
        format!("click-{}", page)
    }
}
