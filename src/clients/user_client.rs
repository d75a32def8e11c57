use tracing::{debug, instrument};
use crate::domain::{User, UserCreate, UserPatch};
use crate::user_actor::UserError;
use crate::actor_framework::{FrameworkError, ResourceClient};

/// Client for interacting with the User actor.
#[derive(Clone)]
pub struct UserClient {
    inner: ResourceClient<User>,
}

impl_basic_client!(UserClient, User, UserError, user);

impl UserClient {
    #[instrument(skip(self))]
    pub async fn list_users(&self) -> Result<Vec<User>, UserError> {
        debug!("Sending request");
        Ok(self.inner.list().await?)
    }

    /// First user whose email matches exactly, in insertion order.
    #[instrument(skip(self))]
    pub async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, UserError> {
        debug!("Sending request");
        let email = email.to_string();
        let matches = self.inner.list_where(move |user| user.email == email).await?;
        Ok(matches.into_iter().next())
    }

    #[instrument(skip(self))]
    pub async fn create_user(&self, name: &str, email: &str) -> Result<User, UserError> {
        debug!("Sending request");
        let payload = UserCreate {
            name: name.to_string(),
            email: email.to_string(),
        };
        Ok(self.inner.create(payload).await?)
    }

    /// Flips the active flag. Returns `None` for an unknown user.
    #[instrument(skip(self))]
    pub async fn set_active(&self, id: u64, is_active: bool) -> Result<Option<User>, UserError> {
        debug!("Sending request");
        let patch = UserPatch {
            is_active: Some(is_active),
            ..Default::default()
        };
        match self.inner.update(id, patch).await {
            Ok(user) => Ok(Some(user)),
            Err(FrameworkError::NotFound(_)) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}
