//! The seam between page objects and whatever drives the browser.
//!
//! Page objects only ever talk to a [`Driver`]; production code plugs in
//! [`chromium::ChromiumDriver`], tests plug in an in-memory DOM.

use crate::locator::Locator;
use async_trait::async_trait;
use eyre::Result;

pub mod chromium;

/// A browser session that can be queried and acted upon.
///
/// Lookups never cache: every call re-queries the live page.
#[async_trait]
pub trait Driver: Send + Sync {
    type Element: DriverElement;

    /// All elements matching `locator`. An empty vector means "not found",
    /// errors are reserved for the driver itself failing.
    async fn find_elements(&self, locator: &Locator) -> Result<Vec<Self::Element>>;

    /// Evaluates a JavaScript expression in the page and returns its JSON value
    /// (`Null` for `undefined`).
    async fn evaluate(&self, expression: &str) -> Result<serde_json::Value>;

    /// Presses and releases a single key on the focused document.
    async fn press_key(&self, key: &str) -> Result<()>;
}

#[async_trait]
pub trait DriverElement: Send + Sync + Sized {
    /// Elements matching `locator` below this element.
    async fn find_elements(&self, locator: &Locator) -> Result<Vec<Self>>;

    async fn click(&self) -> Result<()>;

    /// Moves the pointer over the element, revealing hover-only controls.
    async fn hover(&self) -> Result<()>;

    /// Rendered text of the element, empty when it has none.
    async fn text(&self) -> Result<String>;

    async fn attribute(&self, name: &str) -> Result<Option<String>>;

    async fn is_displayed(&self) -> Result<bool>;
}
