use shared::models::User;
use yewdux::Store;

/// Session-scoped state shared by the shell and the views.
///
/// Populated once at startup from the session marker and treated as
/// read-only by the views; only login and logout replace it.
#[derive(Default, Clone, PartialEq, Store)]
pub struct AppState {
    pub user: Option<User>,
}
