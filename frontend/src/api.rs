use crate::config::FrontendConfig;
use once_cell::unsync::OnceCell;
use reqwest::{Client, Response};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde::ser::Serialize;
use shared::models::{
    ApiResponse, ChatRequest, DashboardStats, LoginRequest, OwnerDetail, Property,
    SavePropertyRequest, SaveUserRequest, User, UtilityCard, WalletTransaction,
};
use thiserror::Error;

thread_local! {
    static SHARED_CLIENT: OnceCell<CourtyardClient> = OnceCell::new();
}

/// Transport-level failures surfaced by the API client.
///
/// A 2xx response whose envelope carries `code != 200` is NOT an error at
/// this layer: the parsed envelope is forwarded as a normal return value
/// and callers branch on its `code`.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Network failure before any response was received.
    #[error("网络错误: {0}")]
    Transport(#[from] reqwest::Error),

    /// Non-2xx transport status, message extracted from the body when the
    /// body parses as an error envelope.
    #[error("{message}")]
    Http { status: u16, message: String },

    /// 2xx transport status whose body is not a valid envelope.
    #[error("响应解析失败: {0}")]
    Decode(String),
}

/// Shorthand for the double-layered result every endpoint call produces:
/// the outer error is transport-level, the envelope code is business-level.
pub type ApiResult<T> = Result<ApiResponse<T>, ApiError>;

/// Minimal shape an error body is probed for.
#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// Best-effort message for a failed transport status: the body's envelope
/// message when it has one, else a generic status-coded line.
fn error_message(status: u16, body: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|parsed| parsed.message)
        .unwrap_or_else(|| format!("HTTP Error {status}"))
}

/// Single chokepoint for every backend call the console makes.
#[derive(Clone, Debug)]
pub struct CourtyardClient {
    base_url: String,
    client: Client,
}

impl CourtyardClient {
    /// Create a new API client with the provided base URL.
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: Client::new(),
        }
    }

    /// The shared per-page client instance.
    pub fn shared() -> Self {
        SHARED_CLIENT.with(|cell| {
            cell.get_or_init(|| Self::new(FrontendConfig::new().api_base()))
                .clone()
        })
    }

    fn api_url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Normalize a raw response into an envelope or an `ApiError`.
    ///
    /// Success statuses are parsed and forwarded unconditionally, whatever
    /// the envelope `code`.
    async fn handle_response<T: DeserializeOwned>(response: Response) -> ApiResult<T> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Http {
                status: status.as_u16(),
                message: error_message(status.as_u16(), &body),
            });
        }
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|err| ApiError::Decode(err.to_string()))
    }

    /// GET with each query parameter stringified onto the URL.
    async fn get<T: DeserializeOwned>(&self, path: &str, query: &[(&str, String)]) -> ApiResult<T> {
        let response = self
            .client
            .get(self.api_url(path))
            .query(query)
            .send()
            .await?;
        Self::handle_response(response).await
    }

    /// POST with a JSON body.
    async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> ApiResult<T> {
        let response = self
            .client
            .post(self.api_url(path))
            .json(body)
            .send()
            .await?;
        Self::handle_response(response).await
    }

    /// Bodyless POST with the parameters appended to the URL, for the
    /// form-style endpoints.
    async fn post_form<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> ApiResult<T> {
        let response = self
            .client
            .post(self.api_url(path))
            .query(params)
            .send()
            .await?;
        Self::handle_response(response).await
    }

    /// PUT with a JSON body.
    async fn put<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> ApiResult<T> {
        let response = self
            .client
            .put(self.api_url(path))
            .json(body)
            .send()
            .await?;
        Self::handle_response(response).await
    }

    /// DELETE without a body.
    async fn delete<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let response = self.client.delete(self.api_url(path)).send().await?;
        Self::handle_response(response).await
    }

    // ---- auth ----

    /// Authenticate with username/password credentials.
    pub async fn login(&self, request: &LoginRequest) -> ApiResult<User> {
        self.post("auth/login", request).await
    }

    /// Terminate the server-side session. Best effort; the caller signs
    /// out locally regardless.
    pub async fn logout(&self) -> ApiResult<String> {
        self.post_form("auth/logout", &[]).await
    }

    // ---- dashboard ----

    /// Estate-wide statistics for the dashboard view.
    pub async fn dashboard_stats(&self) -> ApiResult<DashboardStats> {
        self.get("dashboard/stats", &[]).await
    }

    // ---- users / owners ----

    pub async fn list_users(&self) -> ApiResult<Vec<User>> {
        self.get("user/list", &[]).await
    }

    pub async fn search_users(&self, keyword: &str) -> ApiResult<Vec<User>> {
        self.get("user/search", &[("keyword", keyword.to_string())])
            .await
    }

    pub async fn get_user(&self, user_id: i64) -> ApiResult<User> {
        self.get(&format!("user/{user_id}"), &[]).await
    }

    /// The owner's holdings; only meaningful for `OWNER` accounts.
    pub async fn owner_detail(&self, user_id: i64) -> ApiResult<OwnerDetail> {
        self.get(&format!("owner/{user_id}"), &[]).await
    }

    pub async fn create_user(&self, request: &SaveUserRequest) -> ApiResult<i64> {
        self.post("user/create", request).await
    }

    pub async fn update_user(&self, request: &SaveUserRequest) -> ApiResult<String> {
        self.put("user/update", request).await
    }

    pub async fn delete_user(&self, user_id: i64) -> ApiResult<String> {
        self.delete(&format!("user/{user_id}")).await
    }

    // ---- properties ----

    pub async fn list_properties(&self) -> ApiResult<Vec<Property>> {
        self.get("property/list", &[]).await
    }

    /// Search by any combination of building/unit/room; blank fields are
    /// omitted from the query.
    pub async fn search_properties(
        &self,
        building: &str,
        unit: &str,
        room: &str,
    ) -> ApiResult<Vec<Property>> {
        let mut query = Vec::new();
        if !building.is_empty() {
            query.push(("building", building.to_string()));
        }
        if !unit.is_empty() {
            query.push(("unit", unit.to_string()));
        }
        if !room.is_empty() {
            query.push(("room", room.to_string()));
        }
        self.get("property/search", &query).await
    }

    pub async fn get_property(&self, property_id: i64) -> ApiResult<Property> {
        self.get(&format!("property/{property_id}"), &[]).await
    }

    pub async fn create_property(&self, request: &SavePropertyRequest) -> ApiResult<i64> {
        self.post("property/create", request).await
    }

    pub async fn update_property(&self, request: &SavePropertyRequest) -> ApiResult<String> {
        self.put("property/update", request).await
    }

    pub async fn delete_property(&self, property_id: i64) -> ApiResult<String> {
        self.delete(&format!("property/{property_id}")).await
    }

    // ---- utility cards ----

    /// All cards bound to the signed-in owner's properties.
    pub async fn my_cards(&self) -> ApiResult<Vec<UtilityCard>> {
        self.get("utility/my-cards", &[]).await
    }

    pub async fn card_balance(&self, card_id: i64) -> ApiResult<f64> {
        self.get(&format!("utility/card/{card_id}"), &[]).await
    }

    /// Recharge a card from the owning wallet. The backend resolves the
    /// wallet from the card, so no user id travels with the call.
    pub async fn topup_card(&self, card_id: i64, amount: f64) -> ApiResult<String> {
        self.post_form(
            "utility/card/topup",
            &[
                ("cardId", card_id.to_string()),
                ("amount", amount.to_string()),
            ],
        )
        .await
    }

    // ---- wallet ----

    pub async fn wallet_balance(&self, user_id: i64) -> ApiResult<f64> {
        self.get("wallet/info", &[("userId", user_id.to_string())])
            .await
    }

    pub async fn recharge_wallet(&self, user_id: i64, amount: f64) -> ApiResult<String> {
        self.post_form(
            "wallet/recharge",
            &[
                ("userId", user_id.to_string()),
                ("amount", amount.to_string()),
            ],
        )
        .await
    }

    pub async fn wallet_transactions(&self, user_id: i64) -> ApiResult<Vec<WalletTransaction>> {
        self.get("wallet/transactions", &[("userId", user_id.to_string())])
            .await
    }

    // ---- assistant ----

    /// One question to the AI assistant; the reply is a markdown string.
    pub async fn ai_chat(&self, message: &str) -> ApiResult<String> {
        self.post(
            "ai/chat",
            &ChatRequest {
                message: message.to_string(),
            },
        )
        .await
    }
}

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;
