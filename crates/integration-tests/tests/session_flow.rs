//! Login, registration, approval, and session restore.

#![allow(clippy::unwrap_used)]

use kalartz_core::{Email, Role};
use kalartz_integration_tests::{ScriptedGateway, fill_scenario_cart, storefront};
use kalartz_storefront::StorefrontError;
use kalartz_storefront::models::ProfileFields;
use kalartz_storefront::models::session_keys::CURRENT_IDENTITY;
use kalartz_storefront::session::{IdentityDirectory, KeyValueStore, SessionState};
use kalartz_storefront::views::DashboardView;

#[test]
fn scenario_vendor_registration_is_pending() {
    let storefront = storefront(ScriptedGateway::succeeding("pay_1"));

    let registration = storefront
        .register(ProfileFields::new("a@b.com", "A"), Role::Vendor)
        .unwrap();

    assert!(registration.is_pending());
    assert!(!storefront.is_authenticated());
    assert_eq!(
        storefront.login("a@b.com", "secret", Role::Vendor).unwrap_err(),
        StorefrontError::PendingApproval
    );
}

#[test]
fn scenario_customer_registration_signs_in() {
    let storefront = storefront(ScriptedGateway::succeeding("pay_1"));

    let registration = storefront
        .register(ProfileFields::new("c@d.com", "C"), Role::Customer)
        .unwrap();

    assert!(!registration.is_pending());
    assert!(storefront.is_authenticated());
    assert_eq!(storefront.current_role(), Some(Role::Customer));
    assert_eq!(storefront.dashboard(), DashboardView::Customer);
}

#[test]
fn approved_vendor_can_sign_in() {
    let storefront = storefront(ScriptedGateway::succeeding("pay_1"));
    let id = storefront
        .register(ProfileFields::new("maker@studio.in", "Maker"), Role::Vendor)
        .unwrap()
        .identity()
        .id;

    assert!(storefront.with_session(|session| session.directory_mut().activate(id)));

    let identity = storefront
        .login("maker@studio.in", "secret", Role::Vendor)
        .unwrap();
    assert_eq!(identity.id, id);
    assert!(storefront.dashboard().can_manage_products());
}

#[test]
fn login_requires_matching_role() {
    let storefront = storefront(ScriptedGateway::succeeding("pay_1"));

    let err = storefront
        .login("customer@kalartz.com", "secret", Role::Admin)
        .unwrap_err();
    assert_eq!(err, StorefrontError::InvalidCredentials);
    assert!(!storefront.is_authenticated());
}

#[test]
fn logout_keeps_cart_and_is_idempotent() {
    let storefront = storefront(ScriptedGateway::succeeding("pay_1"));
    fill_scenario_cart(&storefront);
    storefront
        .login("vendor@kalartz.com", "secret", Role::Vendor)
        .unwrap();

    storefront.logout();
    storefront.logout();

    assert!(!storefront.is_authenticated());
    assert_eq!(storefront.current_role(), None);
    assert_eq!(storefront.dashboard(), DashboardView::Home);
    assert_eq!(storefront.item_count(), 3);
}

#[test]
fn session_is_restored_from_store() {
    let storefront = storefront(ScriptedGateway::succeeding("pay_1"));
    storefront
        .login("customer@kalartz.com", "secret", Role::Customer)
        .unwrap();
    let store = storefront.with_session(|session| session.store().clone());
    assert!(store.get(CURRENT_IDENTITY).is_some());

    let restored = SessionState::restore(IdentityDirectory::with_demo_accounts(), store);
    assert_eq!(restored.current_role(), Some(Role::Customer));
    assert_eq!(
        restored.current().unwrap().email.as_str(),
        "customer@kalartz.com"
    );
}

#[test]
fn logout_clears_persisted_identity() {
    let storefront = storefront(ScriptedGateway::succeeding("pay_1"));
    storefront
        .login("customer@kalartz.com", "secret", Role::Customer)
        .unwrap();
    storefront.logout();

    let store = storefront.with_session(|session| session.store().clone());
    assert!(store.get(CURRENT_IDENTITY).is_none());

    let restored = SessionState::restore(IdentityDirectory::with_demo_accounts(), store);
    assert!(!restored.is_authenticated());
}

#[test]
fn registration_rejects_incomplete_profiles() {
    let storefront = storefront(ScriptedGateway::succeeding("pay_1"));

    let missing_name = ProfileFields {
        email: Some("x@y.com".to_string()),
        name: None,
    };
    assert!(matches!(
        storefront.register(missing_name, Role::Customer),
        Err(StorefrontError::Validation(_))
    ));
    assert!(matches!(
        storefront.register(ProfileFields::new("not-an-email", "X"), Role::Customer),
        Err(StorefrontError::Validation(_))
    ));
    assert!(matches!(
        storefront.register(ProfileFields::new("root@x.com", "Root"), Role::Admin),
        Err(StorefrontError::Validation(_))
    ));
    assert!(!storefront.is_authenticated());
}

#[test]
fn duplicate_vendor_registration_is_rejected() {
    let storefront = storefront(ScriptedGateway::succeeding("pay_1"));
    let id = storefront
        .register(ProfileFields::new("a@b.com", "A"), Role::Vendor)
        .unwrap()
        .identity()
        .id;

    let err = storefront
        .register(ProfileFields::new("a@b.com", "A again"), Role::Vendor)
        .unwrap_err();
    assert!(matches!(err, StorefrontError::Validation(_)));

    assert!(storefront.with_session(|session| session.directory_mut().activate(id)));
    let identity = storefront.login("a@b.com", "secret", Role::Vendor).unwrap();
    assert_eq!(identity.id, id);
}

#[test]
fn pending_vendor_email_cannot_be_taken_by_customer() {
    let storefront = storefront(ScriptedGateway::succeeding("pay_1"));
    let vendor_id = storefront
        .register(ProfileFields::new("x@y.com", "X"), Role::Vendor)
        .unwrap()
        .identity()
        .id;

    assert!(matches!(
        storefront.register(ProfileFields::new("x@y.com", "X"), Role::Customer),
        Err(StorefrontError::Validation(_))
    ));
    assert!(!storefront.is_authenticated());

    assert!(storefront.with_session(|session| session.directory_mut().activate(vendor_id)));
    assert!(storefront.login("x@y.com", "secret", Role::Vendor).is_ok());
    assert_eq!(
        storefront.login("x@y.com", "secret", Role::Customer).unwrap_err(),
        StorefrontError::InvalidCredentials
    );
}

#[test]
fn reactivating_an_active_identity_is_harmless() {
    let storefront = storefront(ScriptedGateway::succeeding("pay_1"));
    let demo_vendor = storefront.with_session(|session| {
        let email = Email::parse("vendor@kalartz.com").unwrap();
        session.directory().find(&email, Role::Vendor).unwrap().id
    });

    assert!(storefront.with_session(|session| session.directory_mut().activate(demo_vendor)));
    assert!(storefront.login("vendor@kalartz.com", "secret", Role::Vendor).is_ok());
}
