use serde::{Deserialize, Serialize};

/// Status code the backend places in an envelope on success.
pub const SUCCESS_CODE: i32 = 200;

/// The uniform response wrapper every backend endpoint returns.
///
/// `code == 200` is the sole success discriminant used throughout the
/// console. The transport layer forwards the envelope exactly as parsed,
/// whatever its `code`; branching on it is the caller's job. `data` is
/// nullable on the wire (error envelopes carry no payload).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct ApiResponse<T> {
    pub code: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    /// Whether the envelope signals success.
    pub fn is_success(&self) -> bool {
        self.code == SUCCESS_CODE
    }

    /// The server message, or a generic fallback mentioning the code.
    pub fn message_or_default(&self) -> String {
        self.message
            .clone()
            .unwrap_or_else(|| format!("请求失败 (code {})", self.code))
    }

    /// Caller-side branch on the envelope: the payload on `code == 200`,
    /// otherwise the server message.
    pub fn ok(self) -> Result<T, String> {
        if self.code == SUCCESS_CODE {
            self.data.ok_or_else(|| "服务端未返回数据".to_string())
        } else {
            Err(self.message_or_default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_envelope_round_trips() {
        let json = r#"{"code":200,"message":null,"data":[1,2,3]}"#;
        let envelope: ApiResponse<Vec<i64>> = serde_json::from_str(json).unwrap();
        assert_eq!(envelope.code, 200);
        assert!(envelope.is_success());
        assert_eq!(envelope.ok().unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn business_error_is_parsed_not_rejected() {
        // A 2xx transport status with a non-200 code is a normal envelope.
        let json = r#"{"code":500,"message":"钱包余额不足","data":null}"#;
        let envelope: ApiResponse<String> = serde_json::from_str(json).unwrap();
        assert_eq!(envelope.code, 500);
        assert!(!envelope.is_success());
        assert_eq!(envelope.ok().unwrap_err(), "钱包余额不足");
    }

    #[test]
    fn missing_fields_get_defaults() {
        let json = r#"{"code":403}"#;
        let envelope: ApiResponse<i64> = serde_json::from_str(json).unwrap();
        assert_eq!(envelope.message, None);
        assert_eq!(envelope.data, None);
        assert_eq!(envelope.ok().unwrap_err(), "请求失败 (code 403)");
    }

    #[test]
    fn success_without_payload_is_an_error_for_callers_needing_data() {
        let json = r#"{"code":200,"data":null}"#;
        let envelope: ApiResponse<String> = serde_json::from_str(json).unwrap();
        assert!(envelope.is_success());
        assert!(envelope.ok().is_err());
    }
}
