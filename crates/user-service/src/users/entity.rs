//! Record trait implementation for the User domain type.

use crate::model::{User, UserId, UserPatch};
use record_framework::Record;

impl Record for User {
    type Id = UserId;
    type Patch = UserPatch;

    fn id(&self) -> UserId {
        self.id
    }

    fn assign_id(&mut self, id: UserId) {
        self.id = id;
    }

    /// Handles partial updates to the User entity.
    ///
    /// # Fields Updated
    /// - `username`, `email`, `phone`: replaced when present and non-empty
    ///
    /// The id is never touched.
    fn apply_patch(&mut self, patch: UserPatch) {
        if let Some(username) = patch.username.filter(|v| !v.is_empty()) {
            self.username = username;
        }
        if let Some(email) = patch.email.filter(|v| !v.is_empty()) {
            self.email = email;
        }
        if let Some(phone) = patch.phone.filter(|v| !v.is_empty()) {
            self.phone = phone;
        }
    }
}
