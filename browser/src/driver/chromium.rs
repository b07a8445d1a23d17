use super::{
    Driver,
    DriverElement,
};
use crate::locator::{
    Locator,
    Strategy,
};
use async_trait::async_trait;
use chromiumoxide::{
    cdp::browser_protocol::dom::{
        DiscardSearchResultsParams,
        PerformSearchParams,
    },
    Element,
    Page,
};
use eyre::{
    bail,
    Context as _,
    Result,
};
use std::future::Future;

/// Same notion of "displayed" as WebDriver: attached, not hidden by style and
/// occupying some space on screen.
const IS_DISPLAYED_FN: &str = r#"function() {
    if (!this.isConnected) { return false; }
    const style = window.getComputedStyle(this);
    if (style.display === 'none' || style.visibility === 'hidden' || style.opacity === '0') { return false; }
    const rect = this.getBoundingClientRect();
    return rect.width > 0 && rect.height > 0;
}"#;

/// [`Driver`] backed by a chromiumoxide page over CDP.
#[derive(Debug, Clone)]
pub struct ChromiumDriver {
    page: Page,
}

impl ChromiumDriver {
    pub fn new(page: Page) -> Self {
        Self { page }
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    /// Number of nodes `xpath` currently matches in the document.
    async fn count_xpath_matches(&self, xpath: &str) -> Result<i64> {
        self.page.get_document().await?;
        let search = self
            .page
            .execute(PerformSearchParams {
                query: xpath.to_string(),
                include_user_agent_shadow_dom: Some(true),
            })
            .await?
            .result;
        self.page
            .execute(DiscardSearchResultsParams::new(search.search_id))
            .await?;
        Ok(search.result_count)
    }
}

/// Resolves an XPath lookup so that "no match" is an empty list.
///
/// Fetching the results of a search that found nothing is rejected by the
/// browser, so the matches are counted first. A failed fetch is re-counted
/// in case the last match went away in between.
async fn find_xpath_matches<T, C, CF, F, FF>(mut count: C, fetch: F) -> Result<Vec<T>>
where
    C: FnMut() -> CF,
    CF: Future<Output = Result<i64>>,
    F: FnOnce() -> FF,
    FF: Future<Output = Result<Vec<T>>>,
{
    if count().await? == 0 {
        return Ok(Vec::new());
    }

    match fetch().await {
        Ok(found) => Ok(found),
        Err(err) => {
            if count().await? != 0 {
                return Err(err);
            }
            trace!("xpath matches disappeared while fetching: {err}");
            Ok(Vec::new())
        }
    }
}

#[async_trait]
impl Driver for ChromiumDriver {
    type Element = ChromiumElement;

    async fn find_elements(&self, locator: &Locator) -> Result<Vec<ChromiumElement>> {
        let elements = match locator.strategy() {
            Strategy::Css => self.page.find_elements(locator.selector()).await.map_err(eyre::Report::from),
            Strategy::XPath => {
                find_xpath_matches(
                    || self.count_xpath_matches(locator.selector()),
                    || async {
                        self.page
                            .find_xpaths(locator.selector())
                            .await
                            .map_err(eyre::Report::from)
                    },
                )
                .await
            }
        }
        .with_context(|| format!("failed to query {locator}"))?;

        Ok(elements.into_iter().map(ChromiumElement).collect())
    }

    async fn evaluate(&self, expression: &str) -> Result<serde_json::Value> {
        let result = self
            .page
            .evaluate(expression)
            .await
            .with_context(|| format!("failed to evaluate `{expression}`"))?;

        Ok(result.value().cloned().unwrap_or(serde_json::Value::Null))
    }

    async fn press_key(&self, key: &str) -> Result<()> {
        self.page
            .find_element("body")
            .await
            .context("failed to find the document body")?
            .press_key(key)
            .await
            .with_context(|| format!("failed to press {key:?}"))?;
        Ok(())
    }
}

#[derive(Debug)]
pub struct ChromiumElement(Element);

#[async_trait]
impl DriverElement for ChromiumElement {
    async fn find_elements(&self, locator: &Locator) -> Result<Vec<Self>> {
        if locator.strategy() != Strategy::Css {
            bail!("element scoped lookups only support css selectors, got {locator}");
        }
        let elements = self
            .0
            .find_elements(locator.selector())
            .await
            .with_context(|| format!("failed to query {locator} inside element"))?;

        Ok(elements.into_iter().map(ChromiumElement).collect())
    }

    async fn click(&self) -> Result<()> {
        self.0.click().await.context("failed to click element")?;
        Ok(())
    }

    async fn hover(&self) -> Result<()> {
        self.0.hover().await.context("failed to hover element")?;
        Ok(())
    }

    async fn text(&self) -> Result<String> {
        let text = self.0.inner_text().await.context("failed to read element text")?;
        Ok(text.unwrap_or_default())
    }

    async fn attribute(&self, name: &str) -> Result<Option<String>> {
        self.0
            .attribute(name)
            .await
            .with_context(|| format!("failed to read attribute {name}"))
    }

    async fn is_displayed(&self) -> Result<bool> {
        let returns = self
            .0
            .call_js_fn(IS_DISPLAYED_FN, false)
            .await
            .context("failed to check element visibility")?;

        Ok(returns
            .result
            .value
            .and_then(|value| value.as_bool())
            .unwrap_or(false))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::cell::Cell;

    #[tokio::test]
    async fn xpath_without_matches_is_empty_and_never_fetched() {
        let fetched = Cell::new(false);

        let found: Vec<u32> = find_xpath_matches(
            || async { Ok(0) },
            || async {
                fetched.set(true);
                Err(eyre::eyre!("Invalid search result range"))
            },
        )
        .await
        .unwrap();

        assert!(found.is_empty());
        assert!(!fetched.get());
    }

    #[tokio::test]
    async fn xpath_matches_are_fetched_when_counted() {
        let found = find_xpath_matches(|| async { Ok(2) }, || async { Ok(vec![7, 8]) })
            .await
            .unwrap();

        assert_eq!(found, vec![7, 8]);
    }

    #[tokio::test]
    async fn matches_vanishing_before_the_fetch_count_as_none() {
        let counts = Cell::new(0);

        let found: Vec<u32> = find_xpath_matches(
            || {
                counts.set(counts.get() + 1);
                let remaining = if counts.get() == 1 { 1 } else { 0 };
                async move { Ok(remaining) }
            },
            || async { Err(eyre::eyre!("Invalid search result range")) },
        )
        .await
        .unwrap();

        assert!(found.is_empty());
        assert_eq!(counts.get(), 2);
    }

    #[tokio::test]
    async fn fetch_errors_surface_while_matches_remain() {
        let err = find_xpath_matches::<u32, _, _, _, _>(
            || async { Ok(1) },
            || async { Err(eyre::eyre!("No node with given id found")) },
        )
        .await
        .unwrap_err();

        assert_eq!(err.to_string(), "No node with given id found");
    }

    #[tokio::test]
    async fn count_errors_surface_unchanged() {
        let err = find_xpath_matches::<u32, _, _, _, _>(
            || async { Err(eyre::eyre!("target closed")) },
            || async { Ok(vec![]) },
        )
        .await
        .unwrap_err();

        assert_eq!(err.to_string(), "target closed");
    }
}
