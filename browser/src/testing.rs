//! In-memory stand-in for a browser page, used by the page-object tests.
//!
//! Nodes are matched by the exact [`Locator`] they were registered under, so
//! tests describe the page in the same terms the page objects query it.

use crate::{
    driver::{
        Driver,
        DriverElement,
    },
    locator::Locator,
};
use async_trait::async_trait;
use eyre::{
    eyre,
    Result,
};
use serde_json::Value;
use std::{
    collections::HashMap,
    fmt,
    sync::{
        Arc,
        Mutex,
        MutexGuard,
    },
};
use tokio::time::Instant;

pub(crate) type Hook = Arc<dyn Fn(&mut DomState) + Send + Sync>;

#[derive(Debug, Clone)]
pub(crate) struct FakeNode {
    locator: Locator,
    text: String,
    attributes: HashMap<String, String>,
    displayed: bool,
    appears_at: Option<Instant>,
    removed_at: Option<Instant>,
    parent: Option<usize>,
}

impl FakeNode {
    pub(crate) fn new(locator: Locator) -> Self {
        Self {
            locator,
            text: String::new(),
            attributes: HashMap::new(),
            displayed: true,
            appears_at: None,
            removed_at: None,
            parent: None,
        }
    }

    pub(crate) fn text(mut self, text: &str) -> Self {
        self.text = text.to_string();
        self
    }

    pub(crate) fn attribute(mut self, name: &str, value: &str) -> Self {
        self.attributes.insert(name.to_string(), value.to_string());
        self
    }

    pub(crate) fn hidden(mut self) -> Self {
        self.displayed = false;
        self
    }

    pub(crate) fn appearing_at(mut self, at: Instant) -> Self {
        self.appears_at = Some(at);
        self
    }

    pub(crate) fn removed_at(mut self, at: Instant) -> Self {
        self.removed_at = Some(at);
        self
    }

    pub(crate) fn child_of(mut self, parent: usize) -> Self {
        self.parent = Some(parent);
        self
    }

    fn is_attached(&self, now: Instant) -> bool {
        self.appears_at.is_none_or(|at| now >= at) && self.removed_at.is_none_or(|at| now < at)
    }
}

#[derive(Default)]
pub(crate) struct DomState {
    nodes: Vec<FakeNode>,
    scripts: HashMap<String, Value>,
    clicks: Vec<Locator>,
    hovers: Vec<Locator>,
    keys: Vec<String>,
    on_click: HashMap<Locator, Hook>,
    on_hover: HashMap<Locator, Hook>,
    on_key: HashMap<String, Hook>,
    failure: Option<String>,
}

impl DomState {
    pub(crate) fn add(&mut self, node: FakeNode) -> usize {
        self.nodes.push(node);
        self.nodes.len() - 1
    }

    /// Detaches every node registered under `locator`.
    pub(crate) fn remove(&mut self, locator: &Locator) {
        let now = Instant::now();
        self.nodes
            .iter_mut()
            .filter(|node| &node.locator == locator && node.is_attached(now))
            .for_each(|node| node.removed_at = Some(now));
    }

    pub(crate) fn set_script(&mut self, expression: &str, value: Value) {
        self.scripts.insert(expression.to_string(), value);
    }

    pub(crate) fn script(&self, expression: &str) -> Value {
        self.scripts.get(expression).cloned().unwrap_or(Value::Null)
    }

    fn check(&self) -> Result<()> {
        match &self.failure {
            Some(failure) => Err(eyre!("{failure}")),
            None => Ok(()),
        }
    }

    fn attached(&self, index: usize) -> Result<&FakeNode> {
        self.nodes
            .get(index)
            .filter(|node| node.is_attached(Instant::now()))
            .ok_or_else(|| eyre!("stale element reference"))
    }

    fn matching(&self, locator: &Locator, parent: Option<usize>) -> Vec<usize> {
        let now = Instant::now();
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, node)| &node.locator == locator && node.is_attached(now))
            .filter(|(_, node)| parent.is_none() || node.parent == parent)
            .map(|(index, _)| index)
            .collect()
    }
}

#[derive(Clone, Default)]
pub(crate) struct FakeDom(Arc<Mutex<DomState>>);

impl fmt::Debug for FakeDom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("FakeDom")
    }
}

impl FakeDom {
    fn lock(&self) -> MutexGuard<'_, DomState> {
        self.0.lock().unwrap()
    }

    pub(crate) fn add(&self, node: FakeNode) -> usize {
        self.lock().add(node)
    }

    pub(crate) fn set_script(&self, expression: &str, value: Value) {
        self.lock().set_script(expression, value);
    }

    pub(crate) fn on_click(&self, locator: Locator, hook: impl Fn(&mut DomState) + Send + Sync + 'static) {
        self.lock().on_click.insert(locator, Arc::new(hook));
    }

    pub(crate) fn on_hover(&self, locator: Locator, hook: impl Fn(&mut DomState) + Send + Sync + 'static) {
        self.lock().on_hover.insert(locator, Arc::new(hook));
    }

    pub(crate) fn on_key(&self, key: &str, hook: impl Fn(&mut DomState) + Send + Sync + 'static) {
        self.lock().on_key.insert(key.to_string(), Arc::new(hook));
    }

    /// Makes every further driver call fail, like a dead session would.
    pub(crate) fn fail_with(&self, failure: &str) {
        self.lock().failure = Some(failure.to_string());
    }

    pub(crate) fn clicks(&self) -> Vec<Locator> {
        self.lock().clicks.clone()
    }

    pub(crate) fn hovers(&self) -> Vec<Locator> {
        self.lock().hovers.clone()
    }

    pub(crate) fn keys(&self) -> Vec<String> {
        self.lock().keys.clone()
    }
}

#[derive(Debug, Clone, Default)]
pub(crate) struct FakeDriver {
    dom: FakeDom,
}

impl FakeDriver {
    pub(crate) fn dom(&self) -> &FakeDom {
        &self.dom
    }

    fn elements(&self, indices: Vec<usize>) -> Vec<FakeElement> {
        indices
            .into_iter()
            .map(|index| FakeElement {
                dom: self.dom.clone(),
                index,
            })
            .collect()
    }
}

#[async_trait]
impl Driver for FakeDriver {
    type Element = FakeElement;

    async fn find_elements(&self, locator: &Locator) -> Result<Vec<FakeElement>> {
        let indices = {
            let state = self.dom.lock();
            state.check()?;
            state.matching(locator, None)
        };
        Ok(self.elements(indices))
    }

    async fn evaluate(&self, expression: &str) -> Result<Value> {
        let state = self.dom.lock();
        state.check()?;
        Ok(state.script(expression))
    }

    async fn press_key(&self, key: &str) -> Result<()> {
        let mut state = self.dom.lock();
        state.check()?;
        state.keys.push(key.to_string());
        let hook = state.on_key.get(key).cloned();
        if let Some(hook) = hook {
            hook(&mut *state);
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub(crate) struct FakeElement {
    dom: FakeDom,
    index: usize,
}

#[async_trait]
impl DriverElement for FakeElement {
    async fn find_elements(&self, locator: &Locator) -> Result<Vec<Self>> {
        let state = self.dom.lock();
        state.check()?;
        state.attached(self.index)?;
        Ok(state
            .matching(locator, Some(self.index))
            .into_iter()
            .map(|index| FakeElement {
                dom: self.dom.clone(),
                index,
            })
            .collect())
    }

    async fn click(&self) -> Result<()> {
        let mut state = self.dom.lock();
        state.check()?;
        let locator = state.attached(self.index)?.locator.clone();
        state.clicks.push(locator.clone());
        let hook = state.on_click.get(&locator).cloned();
        if let Some(hook) = hook {
            hook(&mut *state);
        }
        Ok(())
    }

    async fn hover(&self) -> Result<()> {
        let mut state = self.dom.lock();
        state.check()?;
        let locator = state.attached(self.index)?.locator.clone();
        state.hovers.push(locator.clone());
        let hook = state.on_hover.get(&locator).cloned();
        if let Some(hook) = hook {
            hook(&mut *state);
        }
        Ok(())
    }

    async fn text(&self) -> Result<String> {
        let state = self.dom.lock();
        state.check()?;
        Ok(state.attached(self.index)?.text.clone())
    }

    async fn attribute(&self, name: &str) -> Result<Option<String>> {
        let state = self.dom.lock();
        state.check()?;
        Ok(state.attached(self.index)?.attributes.get(name).cloned())
    }

    async fn is_displayed(&self) -> Result<bool> {
        let state = self.dom.lock();
        state.check()?;
        Ok(state
            .nodes
            .get(self.index)
            .is_some_and(|node| node.displayed && node.is_attached(Instant::now())))
    }
}
