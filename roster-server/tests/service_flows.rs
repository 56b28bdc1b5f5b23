//! End-to-end operation flows over the in-memory store
//!
//! Exercises the service surface the way the transport does: principal in,
//! tagged result out.

use std::sync::Arc;

use chrono::{Duration, Utc};
use roster_server::auth::{CurrentUser, JwtConfig, JwtService};
use roster_server::db::models::Employee;
use roster_server::db::repository::{EmployeeStore, MemoryEmployeeStore};
use roster_server::service::EmployeeService;
use roster_server::utils::AppError;
use shared::models::{EmployeeCreate, EmployeeUpdate, Role};
use shared::query::{EmployeeFilter, EmployeeQuery, SortBy, SortDirection, SortField};

fn jwt_service() -> Arc<JwtService> {
    Arc::new(JwtService::with_config(JwtConfig {
        secret: "integration-test-secret-key-0123456789".to_string(),
        expiration_minutes: 120,
        issuer: "roster-server".to_string(),
        audience: "roster-clients".to_string(),
    }))
}

fn record(id: &str, age: u32, role: Role, email: &str, password_hash: &str) -> Employee {
    Employee {
        id: Some(id.to_string()),
        name: format!("Employee {}", id),
        age,
        class: Some("10A".to_string()),
        subjects: vec!["Math".to_string()],
        attendance: 90.0,
        role,
        avatar: None,
        date: Utc::now() - Duration::days(age as i64),
        email: email.to_string(),
        flagged: false,
        password_hash: password_hash.to_string(),
    }
}

/// Store with the three-record fixture from the query scenarios:
/// e1 (age 20, employee), e2 (age 30, admin), e3 (age 40, employee)
async fn fixture() -> (Arc<MemoryEmployeeStore>, EmployeeService) {
    let store = Arc::new(MemoryEmployeeStore::new());
    let hash = Employee::hash_password("password123").expect("hash");

    for employee in [
        record("e1", 20, Role::Employee, "e1@example.com", &hash),
        record("e2", 30, Role::Admin, "e2@example.com", &hash),
        record("e3", 40, Role::Employee, "e3@example.com", &hash),
    ] {
        store.create(employee).await.expect("seed record");
    }

    let service = EmployeeService::new(store.clone(), jwt_service());
    (store, service)
}

fn admin() -> CurrentUser {
    CurrentUser {
        id: "e2".to_string(),
        name: "Employee e2".to_string(),
        role: Role::Admin,
    }
}

fn employee(id: &str) -> CurrentUser {
    CurrentUser {
        id: id.to_string(),
        name: format!("Employee {}", id),
        role: Role::Employee,
    }
}

#[tokio::test]
async fn list_filters_sorts_and_counts() {
    let (_store, service) = fixture().await;

    let page = service
        .list(
            Some(&admin()),
            &EmployeeQuery {
                filter: Some(EmployeeFilter {
                    role: Some(Role::Employee),
                    ..Default::default()
                }),
                sort_by: Some(SortBy {
                    field: SortField::Age,
                    direction: SortDirection::Desc,
                }),
                page: Some(1),
                page_size: Some(10),
            },
        )
        .await
        .expect("list");

    assert_eq!(page.total, 2);
    let ids: Vec<&str> = page.items.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(ids, vec!["e3", "e1"]);
}

#[tokio::test]
async fn anonymous_callers_are_rejected_at_the_gate() {
    let (_store, service) = fixture().await;

    let err = service.list(None, &EmployeeQuery::default()).await.unwrap_err();
    assert!(matches!(err, AppError::Unauthorized));

    let err = service.get_one(None, "e1").await.unwrap_err();
    assert!(matches!(err, AppError::Unauthorized));
}

#[tokio::test]
async fn non_admin_list_is_scoped_to_own_record() {
    let (store, service) = fixture().await;

    // Even a broad filter never reveals anyone else
    let page = service
        .list(
            Some(&employee("e1")),
            &EmployeeQuery {
                filter: Some(EmployeeFilter {
                    min_age: Some(0),
                    ..Default::default()
                }),
                ..Default::default()
            },
        )
        .await
        .expect("list");
    assert_eq!(page.total, 1);
    assert_eq!(page.items[0].id, "e1");

    // A principal whose record is gone sees an empty page, not an error
    store.delete_by_id("e1").await.unwrap();
    let page = service
        .list(Some(&employee("e1")), &EmployeeQuery::default())
        .await
        .expect("list");
    assert_eq!(page.total, 0);
    assert!(page.items.is_empty());
}

#[tokio::test]
async fn get_one_distinguishes_absent_from_forbidden() {
    let (_store, service) = fixture().await;

    // Entitled caller, missing record: a successful null, not an error
    let absent = service.get_one(Some(&admin()), "missing").await.expect("get");
    assert!(absent.is_none());

    // Someone else's record is forbidden whether it exists or not
    let err = service.get_one(Some(&employee("e1")), "e3").await.unwrap_err();
    assert!(matches!(err, AppError::Forbidden(_)));
    let err = service
        .get_one(Some(&employee("e1")), "missing")
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Forbidden(_)));

    // Own record is readable
    let own = service.get_one(Some(&employee("e1")), "e1").await.expect("get");
    assert_eq!(own.expect("record").id, "e1");
}

#[tokio::test]
async fn cross_user_update_is_forbidden() {
    let (_store, service) = fixture().await;

    let err = service
        .update(
            Some(&employee("e1")),
            "e2",
            EmployeeUpdate {
                name: Some("X".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Forbidden(_)));
}

#[tokio::test]
async fn self_update_with_disallowed_field_is_rejected_unapplied() {
    let (store, service) = fixture().await;

    let err = service
        .update(
            Some(&employee("e1")),
            "e1",
            EmployeeUpdate {
                name: Some("X".to_string()),
                role: Some(Role::Admin),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Forbidden(_)));

    // Nothing was partially applied
    let unchanged = store.find_by_id("e1").await.unwrap().unwrap();
    assert_eq!(unchanged.name, "Employee e1");
    assert_eq!(unchanged.role, Role::Employee);
}

#[tokio::test]
async fn self_update_within_whitelist_succeeds() {
    let (_store, service) = fixture().await;

    let view = service
        .update(
            Some(&employee("e1")),
            "e1",
            EmployeeUpdate {
                name: Some("Renamed".to_string()),
                subjects: Some(vec!["Art".to_string()]),
                class: Some("11B".to_string()),
                avatar: Some("https://example.com/a.png".to_string()),
                ..Default::default()
            },
        )
        .await
        .expect("update");

    assert_eq!(view.name, "Renamed");
    assert_eq!(view.subjects, vec!["Art".to_string()]);
    assert_eq!(view.class.as_deref(), Some("11B"));
}

#[tokio::test]
async fn admin_update_is_unrestricted_and_missing_id_is_not_found() {
    let (_store, service) = fixture().await;

    let view = service
        .update(
            Some(&admin()),
            "e1",
            EmployeeUpdate {
                role: Some(Role::Admin),
                attendance: Some(42.5),
                ..Default::default()
            },
        )
        .await
        .expect("update");
    assert_eq!(view.role, Role::Admin);
    assert_eq!(view.attendance, 42.5);

    let err = service
        .update(Some(&admin()), "missing", EmployeeUpdate::default())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn create_is_admin_gated_and_conflicts_on_duplicate_email() {
    let (store, service) = fixture().await;

    let input = EmployeeCreate {
        name: "New Hire".to_string(),
        age: 28,
        class: None,
        subjects: vec![],
        attendance: 100.0,
        role: Role::Employee,
        avatar: None,
        date: None,
        email: "new@example.com".to_string(),
        flagged: None,
        password: "password123".to_string(),
    };

    let err = service
        .create(Some(&employee("e1")), input.clone())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Forbidden(_)));

    let created = service.create(Some(&admin()), input.clone()).await.expect("create");
    assert!(!created.id.is_empty());

    // Same email again: conflict, no record added
    let before = store.find_all().await.unwrap().len();
    let err = service.create(Some(&admin()), input).await.unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));
    assert_eq!(store.find_all().await.unwrap().len(), before);
}

#[tokio::test]
async fn delete_is_admin_gated_and_idempotent() {
    let (store, service) = fixture().await;

    let err = service.delete(Some(&employee("e1")), "e3").await.unwrap_err();
    assert!(matches!(err, AppError::Forbidden(_)));

    service.delete(Some(&admin()), "e3").await.expect("delete");
    assert!(store.find_by_id("e3").await.unwrap().is_none());

    // Deleting a nonexistent id succeeds without error
    service.delete(Some(&admin()), "e3").await.expect("delete again");
    service.delete(Some(&admin()), "never-existed").await.expect("delete");
}

#[tokio::test]
async fn login_failures_are_indistinguishable() {
    let (_store, service) = fixture().await;

    let unknown_email = service
        .login("nobody@example.com", "password123")
        .await
        .unwrap_err();
    let wrong_password = service
        .login("e1@example.com", "not-the-password")
        .await
        .unwrap_err();

    assert!(matches!(unknown_email, AppError::Invalid(_)));
    assert!(matches!(wrong_password, AppError::Invalid(_)));
    assert_eq!(unknown_email.to_string(), wrong_password.to_string());
}

#[tokio::test]
async fn login_issues_a_usable_token_and_redacted_user() {
    let (_store, service) = fixture().await;
    let jwt = jwt_service();

    let response = service
        .login("e1@example.com", "password123")
        .await
        .expect("login");

    assert_eq!(response.user.id, "e1");
    assert_eq!(response.user.role, Role::Employee);

    // The issued token resolves back to the same principal
    let header = format!("Bearer {}", response.token);
    let principal = jwt.resolve(Some(&header)).expect("principal");
    assert_eq!(principal.id, "e1");
    assert_eq!(principal.role, Role::Employee);

    // The response carries no credential material
    let json = serde_json::to_value(&response).expect("serialize");
    let user_keys: Vec<String> = json["user"]
        .as_object()
        .unwrap()
        .keys()
        .cloned()
        .collect();
    assert!(
        !user_keys
            .iter()
            .any(|k| k.to_lowercase().contains("password") || k.to_lowercase().contains("hash"))
    );
}

#[tokio::test]
async fn no_returned_view_contains_credential_material() {
    let (_store, service) = fixture().await;

    let page = service
        .list(Some(&admin()), &EmployeeQuery::default())
        .await
        .expect("list");
    let json = serde_json::to_value(&page).expect("serialize");

    for item in json["items"].as_array().unwrap() {
        for key in item.as_object().unwrap().keys() {
            let key = key.to_lowercase();
            assert!(!key.contains("password") && !key.contains("hash"), "leaked key: {}", key);
        }
    }
}

#[tokio::test]
async fn me_returns_the_fresh_own_record() {
    let (_store, service) = fixture().await;

    let view = service.me(Some(&employee("e1"))).await.expect("me");
    assert_eq!(view.id, "e1");

    let err = service.me(None).await.unwrap_err();
    assert!(matches!(err, AppError::Unauthorized));

    let err = service.me(Some(&employee("ghost"))).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}
