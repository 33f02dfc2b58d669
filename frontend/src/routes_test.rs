//! Tests for the routing table and the role allow-lists.

use super::Route;
use shared::models::UserType;

#[test]
fn owner_sees_exactly_the_self_service_views() {
    assert_eq!(
        Route::visible_for(UserType::Owner),
        vec![Route::Utility, Route::Wallet, Route::AiChat]
    );
}

#[test]
fn admin_sees_every_view() {
    assert_eq!(
        Route::visible_for(UserType::Admin),
        vec![
            Route::Dashboard,
            Route::Owners,
            Route::Properties,
            Route::Utility,
            Route::Wallet,
            Route::AiChat,
        ]
    );
}

#[test]
fn login_and_not_found_never_appear_in_navigation() {
    for user_type in [UserType::Admin, UserType::Owner] {
        let visible = Route::visible_for(user_type);
        assert!(!visible.contains(&Route::Login));
        assert!(!visible.contains(&Route::NotFound));
    }
}

#[test]
fn owner_default_is_utility_never_dashboard() {
    assert_eq!(Route::default_for(UserType::Owner), Route::Utility);
    assert_ne!(Route::default_for(UserType::Owner), Route::Dashboard);
}

#[test]
fn admin_default_is_dashboard() {
    assert_eq!(Route::default_for(UserType::Admin), Route::Dashboard);
}

#[test]
fn owner_cannot_open_staff_views_directly() {
    for route in [Route::Dashboard, Route::Owners, Route::Properties] {
        assert!(!route.allowed_for(UserType::Owner));
        assert!(route.allowed_for(UserType::Admin));
    }
}

#[test]
fn titles_match_the_view_map() {
    assert_eq!(Route::Dashboard.title(), "数据看板");
    assert_eq!(Route::Owners.title(), "用户/业主管理");
    assert_eq!(Route::Properties.title(), "房产管理");
    assert_eq!(Route::Utility.title(), "水电服务");
    assert_eq!(Route::Wallet.title(), "我的钱包");
    assert_eq!(Route::AiChat.title(), "AI 助手");
}

#[test]
fn route_paths_round_trip() {
    use yew_router::Routable;
    assert_eq!(Route::Dashboard.to_path(), "/");
    assert_eq!(Route::AiChat.to_path(), "/ai-chat");
    assert_eq!(Route::recognize("/owners"), Some(Route::Owners));
    assert_eq!(Route::recognize("/no-such-view"), Some(Route::NotFound));
}
