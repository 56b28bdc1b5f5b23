//! Authorization policy
//!
//! Pure decision functions over `(principal, operation, target)`. Nothing in
//! here touches the store or constructs HTTP errors: callers receive a
//! decision value (or a [`Denial`]) and interpret it.
//!
//! The update rules are a static table over [`UpdatableField`] rather than
//! runtime payload-key inspection: [`SELF_UPDATE_FIELDS`] is the complete
//! set a non-admin may change on their own record.

use shared::models::UpdatableField;

use crate::auth::CurrentUser;
use crate::utils::AppError;

/// Fields a non-admin may change on their own record
pub const SELF_UPDATE_FIELDS: &[UpdatableField] = &[
    UpdatableField::Name,
    UpdatableField::Avatar,
    UpdatableField::Subjects,
    UpdatableField::Class,
];

/// Why an operation was denied
///
/// The three causes stay distinguishable so callers can render "log in"
/// differently from "forbidden".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Denial {
    /// No principal at all
    Unauthenticated,
    /// Authenticated, but the operation needs a different role
    WrongRole,
    /// Authenticated, but the target record belongs to someone else
    NotSelf,
}

impl From<Denial> for AppError {
    fn from(denial: Denial) -> Self {
        match denial {
            Denial::Unauthenticated => AppError::Unauthorized,
            Denial::WrongRole => AppError::forbidden("Admin privileges required"),
            Denial::NotSelf => AppError::forbidden("Not authorized to access this employee"),
        }
    }
}

/// Row visibility granted to a list call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListScope {
    /// Every record
    All,
    /// Only the record with this id - the caller's own
    OwnRecord(String),
}

/// Field mutability granted to an update call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateGrant {
    Unrestricted,
    Restricted(&'static [UpdatableField]),
}

/// Any authenticated principal may list; non-admins are row-scoped to their
/// own record
pub fn can_list(principal: Option<&CurrentUser>) -> Result<ListScope, Denial> {
    let user = principal.ok_or(Denial::Unauthenticated)?;
    if user.is_admin() {
        Ok(ListScope::All)
    } else {
        Ok(ListScope::OwnRecord(user.id.clone()))
    }
}

/// Admins may read anyone; everyone else only themselves
pub fn can_read_one(principal: Option<&CurrentUser>, target_id: &str) -> Result<(), Denial> {
    let user = principal.ok_or(Denial::Unauthenticated)?;
    if user.is_admin() || user.id == target_id {
        Ok(())
    } else {
        Err(Denial::NotSelf)
    }
}

/// Creation is admin-only
pub fn can_create(principal: Option<&CurrentUser>) -> Result<(), Denial> {
    let user = principal.ok_or(Denial::Unauthenticated)?;
    if user.is_admin() {
        Ok(())
    } else {
        Err(Denial::WrongRole)
    }
}

/// Admins update anyone without restriction; a caller updating their own
/// record is limited to [`SELF_UPDATE_FIELDS`]
pub fn can_update(
    principal: Option<&CurrentUser>,
    target_id: &str,
) -> Result<UpdateGrant, Denial> {
    let user = principal.ok_or(Denial::Unauthenticated)?;
    if user.is_admin() {
        Ok(UpdateGrant::Unrestricted)
    } else if user.id == target_id {
        Ok(UpdateGrant::Restricted(SELF_UPDATE_FIELDS))
    } else {
        Err(Denial::NotSelf)
    }
}

/// Deletion is admin-only
pub fn can_delete(principal: Option<&CurrentUser>) -> Result<(), Denial> {
    let user = principal.ok_or(Denial::Unauthenticated)?;
    if user.is_admin() {
        Ok(())
    } else {
        Err(Denial::WrongRole)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::Role;

    fn admin() -> CurrentUser {
        CurrentUser {
            id: "a1".to_string(),
            name: "Admin".to_string(),
            role: Role::Admin,
        }
    }

    fn employee(id: &str) -> CurrentUser {
        CurrentUser {
            id: id.to_string(),
            name: "Worker".to_string(),
            role: Role::Employee,
        }
    }

    #[test]
    fn anonymous_is_denied_everywhere() {
        assert_eq!(can_list(None), Err(Denial::Unauthenticated));
        assert_eq!(can_read_one(None, "e1"), Err(Denial::Unauthenticated));
        assert_eq!(can_create(None), Err(Denial::Unauthenticated));
        assert_eq!(can_update(None, "e1"), Err(Denial::Unauthenticated));
        assert_eq!(can_delete(None), Err(Denial::Unauthenticated));
    }

    #[test]
    fn admin_gets_full_scope() {
        let user = admin();
        assert_eq!(can_list(Some(&user)), Ok(ListScope::All));
        assert_eq!(can_read_one(Some(&user), "e9"), Ok(()));
        assert_eq!(can_create(Some(&user)), Ok(()));
        assert_eq!(can_update(Some(&user), "e9"), Ok(UpdateGrant::Unrestricted));
        assert_eq!(can_delete(Some(&user)), Ok(()));
    }

    #[test]
    fn non_admin_list_is_scoped_to_own_record() {
        let user = employee("e1");
        assert_eq!(
            can_list(Some(&user)),
            Ok(ListScope::OwnRecord("e1".to_string()))
        );
    }

    #[test]
    fn non_admin_may_only_read_self() {
        let user = employee("e1");
        assert_eq!(can_read_one(Some(&user), "e1"), Ok(()));
        assert_eq!(can_read_one(Some(&user), "e2"), Err(Denial::NotSelf));
    }

    #[test]
    fn non_admin_mutations_are_restricted() {
        let user = employee("e1");
        assert_eq!(can_create(Some(&user)), Err(Denial::WrongRole));
        assert_eq!(can_delete(Some(&user)), Err(Denial::WrongRole));
        assert_eq!(can_update(Some(&user), "e2"), Err(Denial::NotSelf));
        assert_eq!(
            can_update(Some(&user), "e1"),
            Ok(UpdateGrant::Restricted(SELF_UPDATE_FIELDS))
        );
    }

    #[test]
    fn self_update_table_excludes_privileged_fields() {
        assert!(SELF_UPDATE_FIELDS.contains(&UpdatableField::Name));
        assert!(SELF_UPDATE_FIELDS.contains(&UpdatableField::Avatar));
        assert!(SELF_UPDATE_FIELDS.contains(&UpdatableField::Subjects));
        assert!(SELF_UPDATE_FIELDS.contains(&UpdatableField::Class));
        assert!(!SELF_UPDATE_FIELDS.contains(&UpdatableField::Role));
        assert!(!SELF_UPDATE_FIELDS.contains(&UpdatableField::Email));
        assert!(!SELF_UPDATE_FIELDS.contains(&UpdatableField::Attendance));
    }
}
