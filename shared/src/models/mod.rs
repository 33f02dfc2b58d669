pub mod dashboard;
pub mod envelope;
pub mod property;
pub mod requests;
pub mod user;
pub mod utility;
pub mod wallet;

pub use dashboard::{ArrearsRow, CollectionRate, DashboardStats, IncomeSlice, translate_fee_type};
pub use envelope::ApiResponse;
pub use property::{OwnerDetail, Property, PropertyStatus};
pub use requests::{ChatRequest, LoginRequest, SavePropertyRequest, SaveUserRequest};
pub use user::{User, UserType};
pub use utility::{CardType, UtilityCard};
pub use wallet::WalletTransaction;
