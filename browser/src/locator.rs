//! Element locators and the pure functions that build them.

use derive_more::Display;
use serde::{
    Deserialize,
    Serialize,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
pub enum Strategy {
    #[display("css")]
    Css,
    #[display("xpath")]
    XPath,
}

/// Identifies zero or more elements of the page. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[display("{strategy} `{selector}`")]
pub struct Locator {
    strategy: Strategy,
    selector: String,
}

impl Locator {
    pub fn css(selector: impl Into<String>) -> Self {
        Self {
            strategy: Strategy::Css,
            selector: selector.into(),
        }
    }

    pub fn xpath(selector: impl Into<String>) -> Self {
        Self {
            strategy: Strategy::XPath,
            selector: selector.into(),
        }
    }

    pub fn id(id: &str) -> Self {
        Self::css(format!(r#"[id="{}"]"#, escape_quotes(id)))
    }

    pub fn class_name(class: &str) -> Self {
        Self::css(format!(".{class}"))
    }

    /// `[data-testid="..."]`
    pub fn test_id(test_id: &str) -> Self {
        Self::css(format!(r#"[data-testid="{}"]"#, escape_quotes(test_id)))
    }

    /// `[aria-label="..."]`
    pub fn accessibility_label(label: &str) -> Self {
        Self::css(format!(r#"[aria-label="{}"]"#, escape_quotes(label)))
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    pub fn selector(&self) -> &str {
        &self.selector
    }
}

fn escape_quotes(value: &str) -> String {
    value.replace('\\', r"\\").replace('"', r#"\""#)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn builders_format_css_selectors() {
        assert_eq!(Locator::test_id("mute-audio-1a2b").selector(), r#"[data-testid="mute-audio-1a2b"]"#);
        assert_eq!(
            Locator::accessibility_label("Invite Someone").selector(),
            r#"[aria-label="Invite Someone"]"#
        );
        assert_eq!(Locator::class_name("participants_pane").selector(), ".participants_pane");
        assert_eq!(Locator::id("participant-item-42").selector(), r#"[id="participant-item-42"]"#);
        assert_eq!(Locator::id("x").strategy(), Strategy::Css);
    }

    #[test]
    fn labels_with_quotes_stay_inside_the_attribute() {
        assert_eq!(
            Locator::accessibility_label(r#"Room "A""#).selector(),
            r#"[aria-label="Room \"A\""]"#
        );
    }

    #[test]
    fn display_names_strategy_and_selector() {
        let locator = Locator::xpath("//div[@id='lobby-list']");
        assert_eq!(locator.strategy(), Strategy::XPath);
        assert_eq!(locator.to_string(), "xpath `//div[@id='lobby-list']`");
    }
}
