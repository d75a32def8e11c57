//! # Mock Framework
//!
//! Utilities for testing clients in isolation.
//!
//! Use [`create_mock_client`] to get a client and a receiver.
//! Then use helpers like [`expect_create`] or [`expect_get`] to assert behavior
//! and answer on the actor's behalf.

use tokio::sync::{mpsc, oneshot};
use crate::actor_framework::{Entity, FrameworkError, Predicate, ResourceClient, ResourceRequest};

type Reply<T> = oneshot::Sender<Result<T, FrameworkError>>;

/// Creates a client whose requests land on a receiver the test controls.
pub fn create_mock_client<T: Entity>(buffer_size: usize) -> (ResourceClient<T>, mpsc::Receiver<ResourceRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (ResourceClient::new(sender), receiver)
}

/// Helper to verify that the next message is a Create request
pub async fn expect_create<T: Entity>(receiver: &mut mpsc::Receiver<ResourceRequest<T>>) -> Option<(T::CreatePayload, Reply<T>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Create { payload, respond_to }) => Some((payload, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a Get request
pub async fn expect_get<T: Entity>(receiver: &mut mpsc::Receiver<ResourceRequest<T>>) -> Option<(T::Id, Reply<Option<T>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Get { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a List request
pub async fn expect_list<T: Entity>(receiver: &mut mpsc::Receiver<ResourceRequest<T>>) -> Option<(Option<Predicate<T>>, Reply<Vec<T>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::List { filter, respond_to }) => Some((filter, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is an Update request
pub async fn expect_update<T: Entity>(receiver: &mut mpsc::Receiver<ResourceRequest<T>>) -> Option<(T::Id, T::Patch, Reply<T>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Update { id, patch, respond_to }) => Some((id, patch, respond_to)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::UserClient;
    use crate::domain::User;

    #[tokio::test]
    async fn test_mock_client() {
        let (inner, mut receiver) = create_mock_client::<User>(10);
        let client = UserClient::new(inner);

        let create_task = tokio::spawn(async move { client.create_user("Test", "test@example.com").await });

        let (payload, responder) = expect_create(&mut receiver).await.expect("Expected Create request");
        assert_eq!(payload.name, "Test");
        let user = User::new(7, payload.name, payload.email);
        responder.send(Ok(user.clone())).unwrap();

        assert_eq!(create_task.await.unwrap(), Ok(user));
    }

    #[tokio::test]
    async fn test_email_lookup_filters_inside_actor() {
        let (inner, mut receiver) = create_mock_client::<User>(10);
        let client = UserClient::new(inner);

        let lookup = tokio::spawn(async move { client.get_user_by_email("bob@example.com").await });

        let (filter, responder) = expect_list(&mut receiver).await.expect("Expected List request");
        let filter = filter.expect("email lookup should send a predicate");
        let alice = User::new(1, "Alice Johnson", "alice@example.com");
        let bob = User::new(2, "Bob Smith", "bob@example.com");
        assert!(!filter.matches(&alice));
        assert!(filter.matches(&bob));
        responder.send(Ok(vec![bob.clone()])).unwrap();

        assert_eq!(lookup.await.unwrap(), Ok(Some(bob)));
    }
}
