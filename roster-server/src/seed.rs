//! Startup seed data
//!
//! Ensures a default admin exists and can populate the store with synthetic
//! employees for demos. All seeded accounts share one password, hashed once.

use chrono::{Duration, Utc};
use rand::Rng;
use rand::seq::SliceRandom;

use crate::db::models::Employee;
use crate::db::repository::{EmployeeStore, RepoResult};
use shared::models::Role;

pub const DEFAULT_ADMIN_EMAIL: &str = "admin@example.com";

const SEED_PASSWORD: &str = "password123";

const CLASSES: &[&str] = &["10A", "10B", "11A", "11B", "12A", "12B"];

const SUBJECTS: &[&str] = &[
    "Math",
    "Science",
    "History",
    "English",
    "Art",
    "Physics",
    "Chemistry",
];

const FIRST_NAMES: &[&str] = &[
    "Ada", "Alan", "Edsger", "Grace", "Donald", "Barbara", "John", "Margaret", "Dennis", "Radia",
    "Ken", "Frances", "Linus", "Katherine", "Tim", "Hedy",
];

const LAST_NAMES: &[&str] = &[
    "Lovelace", "Turing", "Dijkstra", "Hopper", "Knuth", "Liskov", "Backus", "Hamilton",
    "Ritchie", "Perlman", "Thompson", "Allen", "Torvalds", "Johnson", "Lee", "Lamarr",
];

/// Create the default admin account if it does not exist
pub async fn ensure_default_admin(store: &dyn EmployeeStore) -> RepoResult<()> {
    if store.find_by_email(DEFAULT_ADMIN_EMAIL).await?.is_some() {
        return Ok(());
    }

    let password_hash = Employee::hash_password(SEED_PASSWORD)
        .map_err(|e| crate::db::repository::RepoError::Database(e.to_string()))?;

    let admin = Employee {
        id: None,
        name: "Admin User".to_string(),
        age: 35,
        class: Some("Staff".to_string()),
        subjects: vec![],
        attendance: 100.0,
        role: Role::Admin,
        avatar: Some("https://i.pravatar.cc/150?u=admin".to_string()),
        date: Utc::now(),
        email: DEFAULT_ADMIN_EMAIL.to_string(),
        flagged: false,
        password_hash,
    };

    let created = store.create(admin).await?;
    tracing::info!(
        id = %created.id.as_deref().unwrap_or_default(),
        email = %created.email,
        "Default admin created"
    );
    Ok(())
}

/// Seed `count` synthetic employees
///
/// Skipped when the store already holds more than the admin record, so a
/// restart does not double the roster.
pub async fn seed_demo_data(store: &dyn EmployeeStore, count: usize) -> RepoResult<()> {
    if store.find_all().await?.len() > 1 {
        tracing::info!("Store already populated, skipping demo seed");
        return Ok(());
    }

    // One hash for all seeded accounts; hashing per record would make
    // startup take seconds for no benefit.
    let password_hash = Employee::hash_password(SEED_PASSWORD)
        .map_err(|e| crate::db::repository::RepoError::Database(e.to_string()))?;

    let mut rng = rand::thread_rng();
    let mut employees = Vec::with_capacity(count);

    for i in 1..=count {
        let first = FIRST_NAMES.choose(&mut rng).copied().unwrap_or("Alex");
        let last = LAST_NAMES.choose(&mut rng).copied().unwrap_or("Doe");
        let subject_count = rng.gen_range(1..=3);

        employees.push(Employee {
            id: None,
            name: format!("{} {}", first, last),
            age: rng.gen_range(22..=60),
            class: CLASSES.choose(&mut rng).map(|c| c.to_string()),
            subjects: SUBJECTS
                .choose_multiple(&mut rng, subject_count)
                .map(|s| s.to_string())
                .collect(),
            attendance: (rng.gen_range(60.0..=100.0f64) * 100.0).round() / 100.0,
            role: Role::Employee,
            avatar: Some(format!("https://i.pravatar.cc/150?u={}", i)),
            date: Utc::now() - Duration::days(rng.gen_range(0..730)),
            email: format!("employee{}@example.com", i),
            flagged: rng.gen_bool(0.2),
            password_hash: password_hash.clone(),
        });
    }

    store.insert_many(employees).await?;
    tracing::info!(count = count, "Seeded demo employees");
    Ok(())
}
