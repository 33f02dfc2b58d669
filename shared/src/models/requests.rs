use serde::{Deserialize, Serialize};

/// Credentials for `/auth/login`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub user_name: String,
    pub password: String,
}

/// Body of `/user/create` and `/user/update`.
///
/// Create carries the gender and a mandatory password; update carries the
/// id, never the gender, and a password only when the operator typed one.
/// Serialization skips the absent fields so the backend sees the same
/// payloads the forms have always sent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SaveUserRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,

    pub user_name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,

    pub name: String,
    pub phone: String,
    pub user_type: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
}

/// Body of `/property/create` and `/property/update`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SavePropertyRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub p_id: Option<i64>,

    pub building_no: String,
    pub unit_no: String,
    pub room_no: String,
    pub area: f64,
    pub p_status: String,

    /// `None` keeps the unit as unsold stock.
    pub user_id: Option<i64>,
}

/// Body of `/ai/chat`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatRequest {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_user_payload_includes_gender_and_password() {
        let request = SaveUserRequest {
            user_id: None,
            user_name: "bob".into(),
            password: Some("secret".into()),
            name: "Bob".into(),
            phone: "".into(),
            user_type: "OWNER".into(),
            gender: Some("男".into()),
        };
        let json = serde_json::to_value(&request).unwrap();
        assert!(json.get("userId").is_none());
        assert_eq!(json["password"], "secret");
        assert_eq!(json["gender"], "男");
    }

    #[test]
    fn update_user_payload_omits_untouched_password() {
        let request = SaveUserRequest {
            user_id: Some(3),
            user_name: "bob".into(),
            password: None,
            name: "Bob".into(),
            phone: "13800000000".into(),
            user_type: "ADMIN".into(),
            gender: None,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["userId"], 3);
        assert!(json.get("password").is_none());
        assert!(json.get("gender").is_none());
    }

    #[test]
    fn property_payload_keeps_explicit_null_owner() {
        let request = SavePropertyRequest {
            p_id: Some(5),
            building_no: "3".into(),
            unit_no: "2".into(),
            room_no: "501".into(),
            area: 89.5,
            p_status: "UNSOLD".into(),
            user_id: None,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["pId"], 5);
        assert!(json["userId"].is_null());
    }
}
