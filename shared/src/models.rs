//! Employee record DTOs
//!
//! The server keeps its own storage-side model; these are the shapes that
//! cross the wire. `EmployeeView` is the only outward representation of a
//! record and carries no credential material by construction.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Employee role
///
/// Every authorization decision is keyed on this field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Employee,
}

impl Role {
    pub fn is_admin(self) -> bool {
        matches!(self, Role::Admin)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Employee => "employee",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outward view of an employee record
///
/// Same field set as the stored record minus the password hash.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeView {
    pub id: String,
    pub name: String,
    pub age: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,
    pub subjects: Vec<String>,
    pub attendance: f64,
    pub role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    pub date: DateTime<Utc>,
    pub email: String,
    pub flagged: bool,
}

/// Create employee payload
///
/// `password` is the only place plaintext credentials enter the system; the
/// server hashes it before the record reaches any store.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeCreate {
    #[validate(length(min = 1))]
    pub name: String,
    pub age: u32,
    pub class: Option<String>,
    #[serde(default)]
    pub subjects: Vec<String>,
    pub attendance: f64,
    pub role: Role,
    pub avatar: Option<String>,
    /// Defaults to the creation time when omitted
    pub date: Option<DateTime<Utc>>,
    #[validate(email)]
    pub email: String,
    pub flagged: Option<bool>,
    #[validate(length(min = 8))]
    pub password: String,
}

/// Partial update payload
///
/// Only supplied fields are changed; absent fields are untouched. Password
/// changes are not part of the update surface.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct EmployeeUpdate {
    pub name: Option<String>,
    pub age: Option<u32>,
    pub class: Option<String>,
    pub subjects: Option<Vec<String>>,
    pub attendance: Option<f64>,
    pub role: Option<Role>,
    pub avatar: Option<String>,
    pub date: Option<DateTime<Utc>>,
    #[validate(email)]
    pub email: Option<String>,
    pub flagged: Option<bool>,
}

/// The updatable fields of an employee record, as a typed table
///
/// Authorization works over this enum rather than inspecting payload keys at
/// runtime: the policy names which fields a caller may touch and
/// [`EmployeeUpdate::supplied_fields`] names which fields a payload touches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdatableField {
    Name,
    Age,
    Class,
    Subjects,
    Attendance,
    Role,
    Avatar,
    Date,
    Email,
    Flagged,
}

impl UpdatableField {
    pub fn as_str(self) -> &'static str {
        match self {
            UpdatableField::Name => "name",
            UpdatableField::Age => "age",
            UpdatableField::Class => "class",
            UpdatableField::Subjects => "subjects",
            UpdatableField::Attendance => "attendance",
            UpdatableField::Role => "role",
            UpdatableField::Avatar => "avatar",
            UpdatableField::Date => "date",
            UpdatableField::Email => "email",
            UpdatableField::Flagged => "flagged",
        }
    }
}

impl EmployeeUpdate {
    /// Fields carried by this payload, in declaration order
    pub fn supplied_fields(&self) -> Vec<UpdatableField> {
        let mut fields = Vec::new();
        if self.name.is_some() {
            fields.push(UpdatableField::Name);
        }
        if self.age.is_some() {
            fields.push(UpdatableField::Age);
        }
        if self.class.is_some() {
            fields.push(UpdatableField::Class);
        }
        if self.subjects.is_some() {
            fields.push(UpdatableField::Subjects);
        }
        if self.attendance.is_some() {
            fields.push(UpdatableField::Attendance);
        }
        if self.role.is_some() {
            fields.push(UpdatableField::Role);
        }
        if self.avatar.is_some() {
            fields.push(UpdatableField::Avatar);
        }
        if self.date.is_some() {
            fields.push(UpdatableField::Date);
        }
        if self.email.is_some() {
            fields.push(UpdatableField::Email);
        }
        if self.flagged.is_some() {
            fields.push(UpdatableField::Flagged);
        }
        fields
    }

    /// True when no field is supplied at all
    pub fn is_empty(&self) -> bool {
        self.supplied_fields().is_empty()
    }
}
