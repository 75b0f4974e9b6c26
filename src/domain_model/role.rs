use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Admin,
    Manager,
    Employee,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Admin, Role::Manager, Role::Employee];

    pub fn description(self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::Manager => "Manager",
            Role::Employee => "Employee",
        }
    }

    /// Open work that blocks deleting a user holding this role.
    ///
    /// Managers own projects (as assigned manager), employees own tasks (as
    /// assigned employee). A new role must pick its dependency here.
    pub fn open_work_dependency(self) -> Option<OpenWorkDependency> {
        match self {
            Role::Manager => Some(OpenWorkDependency::Projects),
            Role::Employee => Some(OpenWorkDependency::Tasks),
            Role::Admin => None,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

#[derive(Debug, Clone, thiserror::Error)]
#[error("unknown role: {0}")]
pub struct UnknownRole(pub String);

impl std::str::FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|role| role.description().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownRole(s.to_owned()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenWorkDependency {
    Projects,
    Tasks,
}

impl OpenWorkDependency {
    pub fn linked_items(self) -> &'static str {
        match self {
            OpenWorkDependency::Projects => "project(s)",
            OpenWorkDependency::Tasks => "task(s)",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoleRecord {
    pub id: i64,
    pub description: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_descriptions_case_insensitively() {
        assert_eq!("Manager".parse::<Role>().unwrap(), Role::Manager);
        assert_eq!("employee".parse::<Role>().unwrap(), Role::Employee);
        assert_eq!("ADMIN".parse::<Role>().unwrap(), Role::Admin);
        assert!("Intern".parse::<Role>().is_err());
    }

    #[test]
    fn only_managers_and_employees_have_open_work() {
        assert_eq!(
            Role::Manager.open_work_dependency(),
            Some(OpenWorkDependency::Projects)
        );
        assert_eq!(
            Role::Employee.open_work_dependency(),
            Some(OpenWorkDependency::Tasks)
        );
        assert_eq!(Role::Admin.open_work_dependency(), None);
    }
}
