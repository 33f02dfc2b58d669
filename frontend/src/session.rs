//! The client-local session marker.
//!
//! One LocalStorage entry holding the JSON-serialized signed-in user.
//! Written by the login page, read once at shell start, removed on logout.

use gloo_storage::{LocalStorage, Storage};
use shared::models::User;

const SESSION_KEY: &str = "user_info";

/// The signed-in user, if a marker is present and parseable.
pub fn load() -> Option<User> {
    LocalStorage::get(SESSION_KEY).ok()
}

/// Persist the marker after a successful login.
pub fn store(user: &User) {
    if let Err(err) = LocalStorage::set(SESSION_KEY, user) {
        log::error!("failed to persist session marker: {err}");
    }
}

/// Remove the marker on logout.
pub fn clear() {
    LocalStorage::delete(SESSION_KEY);
}
