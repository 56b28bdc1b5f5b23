//! Employee model

use chrono::{DateTime, Utc};
use shared::models::{EmployeeCreate, EmployeeUpdate, EmployeeView, Role};

/// Employee record as the stores hold it
///
/// Deliberately not serde-serializable: the only way a record leaves the
/// process is as an [`EmployeeView`], which has no credential field. The
/// stores use their own row types for persistence.
#[derive(Debug, Clone, PartialEq)]
pub struct Employee {
    /// Assigned by the repository at creation; immutable afterwards
    pub id: Option<String>,
    pub name: String,
    pub age: u32,
    pub class: Option<String>,
    pub subjects: Vec<String>,
    /// Attendance percentage
    pub attendance: f64,
    pub role: Role,
    /// Avatar URL
    pub avatar: Option<String>,
    pub date: DateTime<Utc>,
    pub email: String,
    pub flagged: bool,
    /// Argon2 PHC string; write-only from the API's perspective
    pub password_hash: String,
}

impl Employee {
    /// Build a record from a create payload and an already-hashed secret
    ///
    /// `date` defaults to the creation time when the payload omits it.
    pub fn from_create(input: EmployeeCreate, password_hash: String) -> Self {
        Self {
            id: None,
            name: input.name,
            age: input.age,
            class: input.class,
            subjects: input.subjects,
            attendance: input.attendance,
            role: input.role,
            avatar: input.avatar,
            date: input.date.unwrap_or_else(Utc::now),
            email: input.email,
            flagged: input.flagged.unwrap_or(false),
            password_hash,
        }
    }

    /// Apply a partial update: only supplied fields change
    pub fn apply_update(&mut self, changes: &EmployeeUpdate) {
        if let Some(ref name) = changes.name {
            self.name = name.clone();
        }
        if let Some(age) = changes.age {
            self.age = age;
        }
        if let Some(ref class) = changes.class {
            self.class = Some(class.clone());
        }
        if let Some(ref subjects) = changes.subjects {
            self.subjects = subjects.clone();
        }
        if let Some(attendance) = changes.attendance {
            self.attendance = attendance;
        }
        if let Some(role) = changes.role {
            self.role = role;
        }
        if let Some(ref avatar) = changes.avatar {
            self.avatar = Some(avatar.clone());
        }
        if let Some(date) = changes.date {
            self.date = date;
        }
        if let Some(ref email) = changes.email {
            self.email = email.clone();
        }
        if let Some(flagged) = changes.flagged {
            self.flagged = flagged;
        }
    }

    /// The outward, credential-free representation
    pub fn view(&self) -> EmployeeView {
        EmployeeView {
            id: self.id.clone().unwrap_or_default(),
            name: self.name.clone(),
            age: self.age,
            class: self.class.clone(),
            subjects: self.subjects.clone(),
            attendance: self.attendance,
            role: self.role,
            avatar: self.avatar.clone(),
            date: self.date,
            email: self.email.clone(),
            flagged: self.flagged,
        }
    }

    /// Verify a password against the stored hash using argon2
    pub fn verify_password(&self, password: &str) -> Result<bool, argon2::password_hash::Error> {
        use argon2::{
            Argon2,
            password_hash::{PasswordHash, PasswordVerifier},
        };

        let parsed_hash = PasswordHash::new(&self.password_hash)?;
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }

    /// Hash a password using argon2
    pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
        use argon2::{
            Argon2,
            password_hash::{PasswordHasher, SaltString, rand_core::OsRng},
        };

        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();
        let password_hash = argon2.hash_password(password.as_bytes(), &salt)?;
        Ok(password_hash.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_hash_roundtrip() {
        let hash = Employee::hash_password("correct horse battery").expect("hash");
        let employee = Employee {
            id: Some("e1".to_string()),
            name: "Ada".to_string(),
            age: 30,
            class: None,
            subjects: vec![],
            attendance: 100.0,
            role: Role::Employee,
            avatar: None,
            date: Utc::now(),
            email: "ada@example.com".to_string(),
            flagged: false,
            password_hash: hash,
        };

        assert!(employee.verify_password("correct horse battery").unwrap());
        assert!(!employee.verify_password("wrong password").unwrap());
    }

    #[test]
    fn apply_update_touches_only_supplied_fields() {
        let mut employee = Employee {
            id: Some("e1".to_string()),
            name: "Ada".to_string(),
            age: 30,
            class: Some("10A".to_string()),
            subjects: vec!["Math".to_string()],
            attendance: 90.0,
            role: Role::Employee,
            avatar: None,
            date: Utc::now(),
            email: "ada@example.com".to_string(),
            flagged: false,
            password_hash: "x".to_string(),
        };

        employee.apply_update(&EmployeeUpdate {
            name: Some("Ada L.".to_string()),
            flagged: Some(true),
            ..Default::default()
        });

        assert_eq!(employee.name, "Ada L.");
        assert!(employee.flagged);
        assert_eq!(employee.age, 30);
        assert_eq!(employee.class.as_deref(), Some("10A"));
        assert_eq!(employee.email, "ada@example.com");
    }
}
