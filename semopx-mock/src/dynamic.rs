use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use semopx_core::{IndexPage, IndexQuery, ReportSource, ResultDocument, SemopxError};

/// Instruction for how a request should behave.
#[derive(Debug, Clone)]
pub enum MockBehavior<T> {
    /// Return the provided value immediately.
    Return(T),
    /// Fail immediately with the provided error.
    Fail(SemopxError),
    /// Hang indefinitely (simulate a stalled connection).
    Hang,
}

/// Queue of behaviors for one key; the last entry repeats once the others are used.
#[derive(Debug, Default)]
struct Script<T> {
    queue: VecDeque<MockBehavior<T>>,
}

impl<T: Clone> Script<T> {
    fn next(&mut self) -> Option<MockBehavior<T>> {
        if self.queue.len() > 1 {
            self.queue.pop_front()
        } else {
            self.queue.front().cloned()
        }
    }
}

#[derive(Default)]
struct InternalState {
    index_rules: HashMap<u32, Script<Option<IndexPage>>>,
    document_rules: HashMap<String, Script<Option<ResultDocument>>>,
    index_requests: Vec<IndexQuery>,
    document_requests: Vec<String>,
}

/// Controller handle used by tests to drive the dynamic mock from the outside.
#[derive(Clone)]
pub struct DynamicMockController {
    state: Arc<Mutex<InternalState>>,
}

impl DynamicMockController {
    /// Queue a behavior for index page `page`.
    ///
    /// Behaviors are consumed in order; the last one queued keeps answering.
    pub async fn push_index_behavior(&self, page: u32, behavior: MockBehavior<Option<IndexPage>>) {
        let mut guard = self.state.lock().await;
        guard
            .index_rules
            .entry(page)
            .or_default()
            .queue
            .push_back(behavior);
    }

    /// Answer index page `page` with `body`.
    pub async fn set_index_page(&self, page: u32, body: IndexPage) {
        let mut guard = self.state.lock().await;
        let script = guard.index_rules.entry(page).or_default();
        script.queue.clear();
        script.queue.push_back(MockBehavior::Return(Some(body)));
    }

    /// Queue a behavior for the document `resource_name`.
    pub async fn push_document_behavior(
        &self,
        resource_name: impl Into<String>,
        behavior: MockBehavior<Option<ResultDocument>>,
    ) {
        let mut guard = self.state.lock().await;
        guard
            .document_rules
            .entry(resource_name.into())
            .or_default()
            .queue
            .push_back(behavior);
    }

    /// Answer the document `resource_name` with `body`.
    pub async fn set_document(&self, resource_name: impl Into<String>, body: ResultDocument) {
        let mut guard = self.state.lock().await;
        let script = guard.document_rules.entry(resource_name.into()).or_default();
        script.queue.clear();
        script.queue.push_back(MockBehavior::Return(Some(body)));
    }

    /// Index queries received so far, in order.
    pub async fn index_requests(&self) -> Vec<IndexQuery> {
        self.state.lock().await.index_requests.clone()
    }

    /// Page numbers requested so far, in order.
    pub async fn requested_pages(&self) -> Vec<u32> {
        self.state
            .lock()
            .await
            .index_requests
            .iter()
            .map(|q| q.page)
            .collect()
    }

    /// Document identifiers requested so far, in order.
    pub async fn document_requests(&self) -> Vec<String> {
        self.state.lock().await.document_requests.clone()
    }

    /// Clear all configured behaviors and request logs.
    pub async fn clear_all(&self) {
        let mut guard = self.state.lock().await;
        guard.index_rules.clear();
        guard.document_rules.clear();
        guard.index_requests.clear();
        guard.document_requests.clear();
    }
}

/// Report source whose answers are scripted through a [`DynamicMockController`].
///
/// Unscripted index pages and documents answer with no content.
pub struct DynamicMockSource {
    name: &'static str,
    state: Arc<Mutex<InternalState>>,
}

impl DynamicMockSource {
    /// Create a source and the controller that scripts it.
    #[must_use]
    pub fn new_with_controller(name: &'static str) -> (Arc<Self>, DynamicMockController) {
        let state = Arc::new(Mutex::new(InternalState::default()));
        let source = Arc::new(Self {
            name,
            state: Arc::clone(&state),
        });
        (source, DynamicMockController { state })
    }

    async fn resolve<T>(behavior: Option<MockBehavior<Option<T>>>) -> Result<Option<T>, SemopxError> {
        match behavior {
            None => Ok(None),
            Some(MockBehavior::Return(v)) => Ok(v),
            Some(MockBehavior::Fail(e)) => Err(e),
            Some(MockBehavior::Hang) => std::future::pending().await,
        }
    }
}

#[async_trait]
impl ReportSource for DynamicMockSource {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn index_page(&self, query: &IndexQuery) -> Result<Option<IndexPage>, SemopxError> {
        let behavior = {
            let mut guard = self.state.lock().await;
            guard.index_requests.push(query.clone());
            guard.index_rules.get_mut(&query.page).and_then(Script::next)
        };
        Self::resolve(behavior).await
    }

    async fn document(&self, resource_name: &str) -> Result<Option<ResultDocument>, SemopxError> {
        let behavior = {
            let mut guard = self.state.lock().await;
            guard.document_requests.push(resource_name.to_string());
            guard
                .document_rules
                .get_mut(resource_name)
                .and_then(Script::next)
        };
        Self::resolve(behavior).await
    }
}
