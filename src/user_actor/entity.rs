use chrono::Utc;
use crate::actor_framework::Entity;
use crate::domain::{User, UserCreate, UserPatch};

impl Entity for User {
    type Id = u64;
    type CreatePayload = UserCreate;
    type Patch = UserPatch;
    type Action = ();
    type ActionResult = ();

    fn id(&self) -> u64 {
        self.id
    }

    /// Creates an active user. Email uniqueness is not checked.
    fn from_create(id: u64, payload: UserCreate) -> Result<Self, String> {
        Ok(Self {
            id,
            name: payload.name,
            email: payload.email,
            created_at: Utc::now(),
            is_active: true,
        })
    }

    fn on_update(&mut self, patch: UserPatch) -> Result<(), String> {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(email) = patch.email {
            self.email = email;
        }
        if let Some(is_active) = patch.is_active {
            self.is_active = is_active;
        }
        Ok(())
    }

    fn handle_action(&mut self, _action: ()) -> Result<(), String> {
        Ok(())
    }
}
