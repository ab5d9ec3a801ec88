//! Identity resolution
//!
//! Login checks `(email, password)` against a fixed credential table, then
//! enriches the session user from the employee directory. The role always
//! comes from the credential, never from the employee record.

use std::collections::HashMap;
use std::fmt;

use shared::models::{Employee, Role, User};

use crate::seed::SeedData;

/// One login: email, password and the role it grants
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    pub email: String,
    password: String,
    pub role: Role,
}

impl Credential {
    pub fn new(email: impl Into<String>, password: impl Into<String>, role: Role) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            role,
        }
    }

    /// Email is compared case-insensitively, the password exactly
    pub fn verify(&self, email: &str, password: &str) -> bool {
        self.email.eq_ignore_ascii_case(email) && self.password == password
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("email", &self.email)
            .field("password", &"***")
            .field("role", &self.role)
            .finish()
    }
}

/// Credential lookup keyed by lowercase email
#[derive(Debug, Clone, Default)]
pub struct CredentialTable {
    entries: HashMap<String, Credential>,
}

impl CredentialTable {
    pub fn new(credentials: impl IntoIterator<Item = Credential>) -> Self {
        let entries = credentials
            .into_iter()
            .map(|c| (c.email.to_lowercase(), c))
            .collect();
        Self { entries }
    }

    /// Role granted to `(email, password)`, `None` on any mismatch
    pub fn verify(&self, email: &str, password: &str) -> Option<Role> {
        self.entries
            .get(&email.to_lowercase())
            .filter(|c| c.verify(email, password))
            .map(|c| c.role)
    }

    pub fn contains(&self, email: &str) -> bool {
        self.entries.contains_key(&email.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl From<&SeedData> for CredentialTable {
    fn from(seed: &SeedData) -> Self {
        Self::new(seed.credentials.iter().cloned())
    }
}

/// Resolves a login into a session [`User`]
#[derive(Debug, Clone)]
pub struct IdentityResolver {
    credentials: CredentialTable,
}

impl IdentityResolver {
    pub fn new(credentials: CredentialTable) -> Self {
        Self { credentials }
    }

    pub fn credentials(&self) -> &CredentialTable {
        &self.credentials
    }

    /// Verify the credential and build the session user
    ///
    /// The directory entry is looked up in `directory` first, then in the
    /// seed dataset; a seed-only match is appended to `directory` so later
    /// lookups agree. A credential without any directory entry still signs
    /// in, with a placeholder profile.
    pub fn resolve(
        &self,
        email: &str,
        password: &str,
        directory: &mut Vec<Employee>,
        seed: &SeedData,
    ) -> Option<User> {
        let role = self.credentials.verify(email, password)?;

        if let Some(employee) = directory.iter().find(|e| e.has_email(email)) {
            return Some(User::from_employee(employee, role));
        }

        if let Some(employee) = seed.find_employee_by_email(email) {
            tracing::debug!(employee_id = %employee.id, "Login resolved from seed directory");
            directory.push(employee.clone());
            return Some(User::from_employee(employee, role));
        }

        tracing::warn!(email = %email, "Credential has no directory entry, using placeholder profile");
        Some(placeholder_user(email, role))
    }
}

fn placeholder_user(email: &str, role: Role) -> User {
    let first_name = match role {
        Role::HrAdmin => "HR Admin",
        Role::Employee => "Team Member",
    };
    User {
        id: email.to_string(),
        employee_id: email.to_string(),
        email: email.to_string(),
        first_name: first_name.to_string(),
        last_name: String::new(),
        role,
        avatar_url: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolver(seed: &SeedData) -> IdentityResolver {
        IdentityResolver::new(CredentialTable::from(seed))
    }

    #[test]
    fn test_credential_table() {
        let table = CredentialTable::new([
            Credential::new("Sarah.Chen@blackflag.hr", "Admin123!", Role::HrAdmin),
            Credential::new("a@blackflag.hr", "Staff123!", Role::Employee),
        ]);

        assert_eq!(table.verify("sarah.chen@BLACKFLAG.hr", "Admin123!"), Some(Role::HrAdmin));
        assert_eq!(table.verify("sarah.chen@blackflag.hr", "admin123!"), None);
        assert_eq!(table.verify("nobody@blackflag.hr", "Admin123!"), None);
        assert!(table.contains("A@BLACKFLAG.HR"));
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_debug_hides_password() {
        let c = Credential::new("a@b.c", "secret", Role::Employee);
        assert!(!format!("{:?}", c).contains("secret"));
    }

    #[test]
    fn test_resolve_from_live_directory() {
        let seed = SeedData::generate(5, 2);
        let mut directory = seed.employees.clone();
        directory[0].first_name = "Sara".to_string();

        let user = resolver(&seed)
            .resolve("sarah.chen@blackflag.hr", "Admin123!", &mut directory, &seed)
            .unwrap();
        assert_eq!(user.first_name, "Sara");
        assert_eq!(user.role, Role::HrAdmin);
        assert_eq!(directory.len(), seed.employees.len());
    }

    #[test]
    fn test_resolve_falls_back_to_seed_and_inserts() {
        let seed = SeedData::generate(5, 2);
        let mut directory = Vec::new();

        let user = resolver(&seed)
            .resolve("hr.manager@blackflag.hr", "HRPass123!", &mut directory, &seed)
            .unwrap();
        assert_eq!(user.id, "emp-013");
        assert_eq!(directory.len(), 1);
        assert_eq!(directory[0].email, "hr.manager@blackflag.hr");
    }

    #[test]
    fn test_role_comes_from_credential() {
        let mut seed = SeedData::generate(1, 1);
        let email = seed.employees[2].email.clone();
        seed.employees[2].position = "HR Director".to_string();

        let user = resolver(&seed)
            .resolve(&email, "Staff123!", &mut Vec::new(), &seed)
            .unwrap();
        assert_eq!(user.role, Role::Employee);
    }

    #[test]
    fn test_placeholder_profile() {
        let mut seed = SeedData::generate(0, 0);
        seed.credentials
            .push(Credential::new("ghost@blackflag.hr", "pw", Role::HrAdmin));

        let user = resolver(&seed)
            .resolve("ghost@blackflag.hr", "pw", &mut Vec::new(), &seed)
            .unwrap();
        assert_eq!(user.first_name, "HR Admin");
        assert_eq!(user.id, "ghost@blackflag.hr");
    }

    #[test]
    fn test_wrong_password() {
        let seed = SeedData::generate(0, 0);
        let mut directory = Vec::new();
        assert!(resolver(&seed)
            .resolve("sarah.chen@blackflag.hr", "wrong", &mut directory, &seed)
            .is_none());
        assert!(directory.is_empty());
    }
}
