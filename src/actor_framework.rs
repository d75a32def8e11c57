use std::collections::BTreeMap;
use std::fmt::{Debug, Display};
use thiserror::Error;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, instrument};

// =============================================================================
// 1. THE ABSTRACTION (Traits with Hooks, DTOs, and Actions)
// =============================================================================

/// Trait that any table row must implement to be managed by [`ResourceActor`].
pub trait Entity: Clone + Debug + Send + Sync + 'static {
    type Id: Ord + Copy + Send + Sync + Display + Debug;
    type CreatePayload: Send + Sync + Debug;
    type Patch: Send + Sync + Debug;
    type Action: Send + Sync + Debug;
    type ActionResult: Send + Sync + Debug;

    fn id(&self) -> Self::Id;

    /// Construct the full row from a freshly allocated ID and the payload.
    fn from_create(id: Self::Id, payload: Self::CreatePayload) -> Result<Self, String>;

    // --- Lifecycle Hooks ---

    fn on_create(&mut self) -> Result<(), String> {
        Ok(())
    }
    fn on_update(&mut self, patch: Self::Patch) -> Result<(), String>;

    /// Handle a custom table-specific action.
    fn handle_action(&mut self, action: Self::Action) -> Result<Self::ActionResult, String>;
}

/// Errors raised by the actor plumbing itself.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum FrameworkError {
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped the response")]
    ActorDropped,
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("Rejected: {0}")]
    Rejected(String),
}

// =============================================================================
// 2. THE GENERIC MESSAGES
// =============================================================================

pub type Response<T> = oneshot::Sender<Result<T, FrameworkError>>;

/// Row filter evaluated inside the actor.
pub struct Predicate<T>(Box<dyn Fn(&T) -> bool + Send + Sync>);

impl<T> Predicate<T> {
    pub fn new(f: impl Fn(&T) -> bool + Send + Sync + 'static) -> Self {
        Self(Box::new(f))
    }

    pub fn matches(&self, item: &T) -> bool {
        (self.0)(item)
    }
}

impl<T> Debug for Predicate<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Predicate(..)")
    }
}

#[derive(Debug)]
pub enum ResourceRequest<T: Entity> {
    Create {
        payload: T::CreatePayload,
        respond_to: Response<T>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>>,
    },
    List {
        filter: Option<Predicate<T>>,
        respond_to: Response<Vec<T>>,
    },
    Update {
        id: T::Id,
        patch: T::Patch,
        respond_to: Response<T>,
    },
    Action {
        id: T::Id,
        action: T::Action,
        respond_to: Response<T::ActionResult>,
    },
}

// =============================================================================
// 3. THE GENERIC ACTOR SERVER
// =============================================================================

/// Owns one table. IDs come from a monotonic generator, so the ordered map
/// iterates in insertion order.
pub struct ResourceActor<T: Entity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    store: BTreeMap<T::Id, T>,
    next_id_fn: Box<dyn Fn() -> T::Id + Send + Sync>,
}

impl<T: Entity> ResourceActor<T> {
    pub fn new(
        buffer_size: usize,
        next_id_fn: impl Fn() -> T::Id + Send + Sync + 'static,
    ) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            store: BTreeMap::new(),
            next_id_fn: Box::new(next_id_fn),
        };
        let client = ResourceClient::new(sender);
        (actor, client)
    }

    /// Preload rows. The ID generator must start past the largest seeded ID.
    pub fn with_seed(mut self, items: impl IntoIterator<Item = T>) -> Self {
        for item in items {
            self.store.insert(item.id(), item);
        }
        self
    }

    #[instrument(name = "resource_actor", skip(self), fields(entity = std::any::type_name::<T>()))]
    pub async fn run(mut self) {
        debug!(rows = self.store.len(), "Actor starting");
        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ResourceRequest::Create { payload, respond_to } => {
                    let _ = respond_to.send(self.handle_create(payload));
                }
                ResourceRequest::Get { id, respond_to } => {
                    let item = self.store.get(&id).cloned();
                    let _ = respond_to.send(Ok(item));
                }
                ResourceRequest::List { filter, respond_to } => {
                    let items = self
                        .store
                        .values()
                        .filter(|item| filter.as_ref().map_or(true, |f| f.matches(item)))
                        .cloned()
                        .collect();
                    let _ = respond_to.send(Ok(items));
                }
                ResourceRequest::Update { id, patch, respond_to } => {
                    let result = match self.store.get_mut(&id) {
                        Some(item) => item
                            .on_update(patch)
                            .map(|_| item.clone())
                            .map_err(FrameworkError::Rejected),
                        None => Err(FrameworkError::NotFound(id.to_string())),
                    };
                    let _ = respond_to.send(result);
                }
                ResourceRequest::Action { id, action, respond_to } => {
                    let result = match self.store.get_mut(&id) {
                        Some(item) => item.handle_action(action).map_err(FrameworkError::Rejected),
                        None => Err(FrameworkError::NotFound(id.to_string())),
                    };
                    let _ = respond_to.send(result);
                }
            }
        }
        debug!("Actor stopped");
    }

    fn handle_create(&mut self, payload: T::CreatePayload) -> Result<T, FrameworkError> {
        let id = (self.next_id_fn)();
        let mut item = T::from_create(id, payload).map_err(FrameworkError::Rejected)?;
        item.on_create().map_err(FrameworkError::Rejected)?;
        self.store.insert(id, item.clone());
        Ok(item)
    }
}

// =============================================================================
// 4. THE GENERIC CLIENT
// =============================================================================

pub struct ResourceClient<T: Entity> {
    sender: mpsc::Sender<ResourceRequest<T>>,
}

impl<T: Entity> Clone for ResourceClient<T> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

impl<T: Entity> ResourceClient<T> {
    pub fn new(sender: mpsc::Sender<ResourceRequest<T>>) -> Self {
        Self { sender }
    }

    async fn request<R>(
        &self,
        build: impl FnOnce(Response<R>) -> ResourceRequest<T>,
    ) -> Result<R, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(build(respond_to))
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    pub async fn create(&self, payload: T::CreatePayload) -> Result<T, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Create { payload, respond_to })
            .await
    }

    pub async fn get(&self, id: T::Id) -> Result<Option<T>, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Get { id, respond_to })
            .await
    }

    pub async fn list(&self) -> Result<Vec<T>, FrameworkError> {
        self.request(|respond_to| ResourceRequest::List { filter: None, respond_to })
            .await
    }

    pub async fn list_where(
        &self,
        filter: impl Fn(&T) -> bool + Send + Sync + 'static,
    ) -> Result<Vec<T>, FrameworkError> {
        let filter = Some(Predicate::new(filter));
        self.request(|respond_to| ResourceRequest::List { filter, respond_to })
            .await
    }

    pub async fn update(&self, id: T::Id, patch: T::Patch) -> Result<T, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Update { id, patch, respond_to })
            .await
    }

    pub async fn perform_action(
        &self,
        id: T::Id,
        action: T::Action,
    ) -> Result<T::ActionResult, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Action { id, action, respond_to })
            .await
    }
}

// =============================================================================
// 5. EXAMPLE USAGE (Test)
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::sync::Arc;

    #[derive(Clone, Debug, PartialEq)]
    struct Counter {
        id: u64,
        label: String,
        hits: u32,
    }

    #[derive(Debug)]
    struct CounterCreate {
        label: String,
    }

    #[derive(Debug)]
    struct CounterPatch {
        label: Option<String>,
    }

    #[derive(Debug)]
    enum CounterAction {
        Hit,
        Reset,
    }

    impl Entity for Counter {
        type Id = u64;
        type CreatePayload = CounterCreate;
        type Patch = CounterPatch;
        type Action = CounterAction;
        type ActionResult = u32;

        fn id(&self) -> u64 {
            self.id
        }

        fn from_create(id: u64, payload: CounterCreate) -> Result<Self, String> {
            if payload.label.is_empty() {
                return Err("label required".to_string());
            }
            Ok(Self { id, label: payload.label, hits: 0 })
        }

        fn on_update(&mut self, patch: CounterPatch) -> Result<(), String> {
            if let Some(label) = patch.label {
                self.label = label;
            }
            Ok(())
        }

        fn handle_action(&mut self, action: CounterAction) -> Result<u32, String> {
            match action {
                CounterAction::Hit => self.hits += 1,
                CounterAction::Reset => self.hits = 0,
            }
            Ok(self.hits)
        }
    }

    fn start(seed: Vec<Counter>, first_id: u64) -> ResourceClient<Counter> {
        let next = Arc::new(AtomicU64::new(first_id));
        let (actor, client) = ResourceActor::new(10, move || next.fetch_add(1, Ordering::SeqCst));
        tokio::spawn(actor.with_seed(seed).run());
        client
    }

    #[tokio::test]
    async fn test_resource_actor_with_actions() {
        let client = start(Vec::new(), 1);

        let created = client.create(CounterCreate { label: "a".into() }).await.unwrap();
        assert_eq!(created.id, 1);

        assert_eq!(client.perform_action(1, CounterAction::Hit).await.unwrap(), 1);
        assert_eq!(client.perform_action(1, CounterAction::Hit).await.unwrap(), 2);
        assert_eq!(client.perform_action(1, CounterAction::Reset).await.unwrap(), 0);

        let missing = client.perform_action(9, CounterAction::Hit).await;
        assert_eq!(missing, Err(FrameworkError::NotFound("9".to_string())));
    }

    #[tokio::test]
    async fn test_rejected_create_does_not_consume_row() {
        let client = start(Vec::new(), 1);

        let err = client.create(CounterCreate { label: String::new() }).await.unwrap_err();
        assert_eq!(err, FrameworkError::Rejected("label required".to_string()));
        assert!(client.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_seeded_rows_list_in_insertion_order() {
        let seed = vec![
            Counter { id: 2, label: "second".into(), hits: 0 },
            Counter { id: 1, label: "first".into(), hits: 5 },
        ];
        let client = start(seed, 3);
        client.create(CounterCreate { label: "third".into() }).await.unwrap();

        let labels: Vec<String> = client.list().await.unwrap().into_iter().map(|c| c.label).collect();
        assert_eq!(labels, vec!["first", "second", "third"]);

        let busy = client.list_where(|c| c.hits > 0).await.unwrap();
        assert_eq!(busy.len(), 1);
        assert_eq!(busy[0].id, 1);
    }

    #[tokio::test]
    async fn test_update_missing_row_is_not_found() {
        let client = start(Vec::new(), 1);
        let err = client.update(7, CounterPatch { label: None }).await.unwrap_err();
        assert_eq!(err, FrameworkError::NotFound("7".to_string()));
    }

    #[tokio::test]
    async fn test_closed_actor_reports_error() {
        let (actor, client) = ResourceActor::<Counter>::new(1, || 1);
        drop(actor);
        assert_eq!(client.get(1).await, Err(FrameworkError::ActorClosed));
    }
}
