pub mod ai_chat;
pub mod dashboard;
pub mod login;
pub mod not_found;
pub mod owners;
pub mod properties;
pub mod utility;
pub mod wallet;

pub use ai_chat::AiChatPage;
pub use dashboard::DashboardPage;
pub use login::LoginPage;
pub use not_found::NotFoundPage;
pub use owners::OwnersPage;
pub use properties::PropertiesPage;
pub use utility::UtilityPage;
pub use wallet::WalletPage;
