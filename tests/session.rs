mod common;

use common::{user, Call, FakeApi};
use rentals_client::api::{ApiError, Credentials, MarketplaceApi, Registration};
use rentals_client::models::Role;
use rentals_client::session::{GuardDecision, RouteGuard, Session, SessionState};
use std::sync::Arc;

#[tokio::test]
async fn restore_without_token_settles_unauthenticated() {
    let api = Arc::new(FakeApi::new());
    let mut session = Session::new(api.clone());

    assert_eq!(
        session.guard(RouteGuard::Protected, "/ads/new"),
        GuardDecision::Placeholder
    );

    session.restore().await;

    assert_eq!(session.state(), &SessionState::Unauthenticated);
    assert_eq!(
        session.guard(RouteGuard::Protected, "/ads/new"),
        GuardDecision::RedirectToLogin {
            from: "/ads/new".into()
        }
    );
    assert_eq!(api.calls(), vec![Call::CurrentUser]);
}

#[tokio::test]
async fn restore_with_token_picks_up_the_user() {
    let api = Arc::new(FakeApi::new());
    api.set_token(Some("stored".into()));
    api.signed_in_as(user("admin@example.com", Role::Admin));

    let mut session = Session::new(api.clone());
    session.restore().await;

    assert!(session.is_authenticated());
    assert_eq!(
        session.guard(RouteGuard::Admin, "/admin/categories"),
        GuardDecision::Render
    );
}

#[tokio::test]
async fn login_stores_token_and_user() {
    let api = Arc::new(FakeApi::new());
    let mut session = Session::new(api.clone());

    let signed_in = session
        .login(&Credentials {
            email: "renter@example.com".into(),
            password: "secret".into(),
        })
        .await
        .unwrap();

    assert_eq!(signed_in.email, "renter@example.com");
    assert_eq!(api.token().as_deref(), Some("token-1"));
    assert_eq!(
        session.guard(RouteGuard::Admin, "/admin"),
        GuardDecision::RedirectToHome
    );

    session.logout();
    assert_eq!(api.token(), None);
    assert_eq!(session.state(), &SessionState::Unauthenticated);
}

#[tokio::test]
async fn failed_login_surfaces_backend_message() {
    let api = Arc::new(FakeApi::new());
    let mut session = Session::new(api.clone());

    let err = session
        .login(&Credentials {
            email: "renter@example.com".into(),
            password: "wrong".into(),
        })
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::Unauthorized { .. }));
    assert_eq!(err.user_message(), "Invalid email or password");
    assert_eq!(session.state(), &SessionState::Unauthenticated);
    assert_eq!(api.token(), None);
}

#[tokio::test]
async fn register_signs_the_new_user_in() {
    let api = Arc::new(FakeApi::new());
    let mut session = Session::new(api.clone());

    let created = session
        .register(&Registration {
            name: "Yasmine".into(),
            email: "yasmine@example.com".into(),
            password: "secret".into(),
            phone_number: None,
        })
        .await
        .unwrap();

    assert_eq!(created.name, "Yasmine");
    assert_eq!(session.user().map(|u| u.email.as_str()), Some("yasmine@example.com"));
    assert_eq!(api.token().as_deref(), Some("token-new"));
}
