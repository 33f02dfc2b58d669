use shared::models::UserType;
use strum::{EnumIter, IntoEnumIterator};
use yew_router::prelude::*;

/// The console routes, one per view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Routable, EnumIter)]
pub enum Route {
    #[at("/login")]
    Login,
    #[at("/")]
    Dashboard,
    #[at("/owners")]
    Owners,
    #[at("/properties")]
    Properties,
    #[at("/utility")]
    Utility,
    #[at("/wallet")]
    Wallet,
    #[at("/ai-chat")]
    AiChat,
    #[not_found]
    #[at("/404")]
    NotFound,
}

impl Route {
    /// Header title, updated the moment a view is requested.
    pub fn title(self) -> &'static str {
        match self {
            Route::Login => "登录",
            Route::Dashboard => "数据看板",
            Route::Owners => "用户/业主管理",
            Route::Properties => "房产管理",
            Route::Utility => "水电服务",
            Route::Wallet => "我的钱包",
            Route::AiChat => "AI 助手",
            Route::NotFound => "Unknown Module",
        }
    }

    /// Whether this route is a sidebar destination at all.
    fn is_nav(self) -> bool {
        !matches!(self, Route::Login | Route::NotFound)
    }

    /// Whether an account of the given type may open this view.
    ///
    /// Owners get exactly the self-service subset; everything else is
    /// staff-only.
    pub fn allowed_for(self, user_type: UserType) -> bool {
        match self {
            Route::Login => false,
            Route::NotFound => true,
            Route::Utility | Route::Wallet | Route::AiChat => true,
            Route::Dashboard | Route::Owners | Route::Properties => {
                matches!(user_type, UserType::Admin)
            }
        }
    }

    /// Sidebar items for the given role, in declaration order.
    pub fn visible_for(user_type: UserType) -> Vec<Route> {
        Route::iter()
            .filter(|route| route.is_nav() && route.allowed_for(user_type))
            .collect()
    }

    /// The view auto-loaded right after sign-in.
    pub fn default_for(user_type: UserType) -> Route {
        match user_type {
            UserType::Admin => Route::Dashboard,
            UserType::Owner => Route::Utility,
        }
    }
}

#[cfg(test)]
#[path = "routes_test.rs"]
mod routes_test;
