use serde::{Deserialize, Serialize};

/// Role of a console account.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserType {
    /// Property-management staff with access to every view.
    Admin,
    /// Resident owner, restricted to the self-service views.
    Owner,
}

impl UserType {
    /// Display label used in tables and detail panes.
    pub fn label(self) -> &'static str {
        match self {
            UserType::Admin => "管理员",
            UserType::Owner => "业主",
        }
    }

    /// Wire string, used for `<select>` option values.
    pub fn as_wire(self) -> &'static str {
        match self {
            UserType::Admin => "ADMIN",
            UserType::Owner => "OWNER",
        }
    }
}

/// A user record as the backend returns it, and as the session marker
/// persists it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub user_id: i64,
    pub user_name: String,

    /// Real name; some legacy rows only carry the login name.
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub gender: Option<String>,

    #[serde(default)]
    pub phone: Option<String>,

    pub user_type: UserType,
}

impl User {
    /// Name shown in the header: the real name when present, else the
    /// login name.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.user_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> User {
        serde_json::from_str(
            r#"{"userId":1,"userName":"alice","name":"Alice","gender":"女","phone":"13800000000","userType":"OWNER"}"#,
        )
        .unwrap()
    }

    #[test]
    fn deserializes_camel_case_wire_format() {
        let user = sample();
        assert_eq!(user.user_id, 1);
        assert_eq!(user.user_name, "alice");
        assert_eq!(user.user_type, UserType::Owner);
    }

    #[test]
    fn tolerates_missing_optional_fields() {
        let user: User =
            serde_json::from_str(r#"{"userId":2,"userName":"root","userType":"ADMIN"}"#).unwrap();
        assert_eq!(user.name, None);
        assert_eq!(user.display_name(), "root");
    }

    #[test]
    fn display_name_prefers_real_name() {
        assert_eq!(sample().display_name(), "Alice");
    }

    #[test]
    fn type_labels_are_translated() {
        assert_eq!(UserType::Admin.label(), "管理员");
        assert_eq!(UserType::Owner.label(), "业主");
    }
}
