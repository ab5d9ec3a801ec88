//! Employee directory operations
//!
//! The directory is never persisted, so none of these write to storage.

use chrono::Utc;

use shared::models::{Employee, EmployeeCreate, EmployeeUpdate, NotificationKind, format_employee_code};
use shared::util::generate_id;

use super::HrStore;

/// Display name used for dangling employee references
pub const UNKNOWN_EMPLOYEE: &str = "Unknown employee";

impl HrStore {
    pub fn employees(&self) -> &[Employee] {
        &self.employees
    }

    pub fn get_employee(&self, id: &str) -> Option<&Employee> {
        self.employees.iter().find(|e| e.id == id)
    }

    pub fn find_employee_by_email(&self, email: &str) -> Option<&Employee> {
        self.employees.iter().find(|e| e.has_email(email))
    }

    /// Full name for `id`, or a placeholder when the id points nowhere
    pub fn employee_name(&self, id: &str) -> String {
        self.get_employee(id)
            .map(Employee::full_name)
            .unwrap_or_else(|| UNKNOWN_EMPLOYEE.to_string())
    }

    /// Next `EMP###` code: highest numeric suffix in the directory plus one
    ///
    /// Codes that cannot be incremented are skipped.
    fn next_employee_code(&self) -> String {
        let next = self
            .employees
            .iter()
            .filter_map(Employee::code_number)
            .filter_map(|n| n.checked_add(1))
            .max()
            .unwrap_or(1);
        format_employee_code(next)
    }

    pub fn add_employee(&mut self, data: EmployeeCreate) -> Employee {
        let now = Utc::now();
        let employee = Employee {
            id: generate_id("emp"),
            employee_id: self.next_employee_code(),
            first_name: data.first_name,
            last_name: data.last_name,
            email: data.email,
            phone: data.phone,
            department: data.department,
            position: data.position,
            hire_date: data.hire_date,
            is_active: true,
            address: data.address,
            salary: data.salary,
            ssn: data.ssn,
            manager_id: data.manager_id,
            avatar_url: data.avatar_url,
            created_at: now,
            updated_at: now,
        };

        tracing::info!(id = %employee.id, employee_id = %employee.employee_id, "Employee added");
        self.notify(
            format!(
                "Employee {} {} added successfully.",
                employee.first_name, employee.last_name
            ),
            NotificationKind::Success,
        );
        self.employees.push(employee.clone());
        employee
    }

    /// Merge `update` into the employee and refresh `updated_at`
    pub fn update_employee(&mut self, id: &str, update: EmployeeUpdate) -> Option<Employee> {
        let Some(employee) = self.employees.iter_mut().find(|e| e.id == id) else {
            tracing::warn!(id = %id, "Update of unknown employee ignored");
            return None;
        };

        update.apply_to(employee);
        employee.updated_at = Utc::now();
        let updated = employee.clone();

        self.notify("Employee updated successfully.", NotificationKind::Success);
        Some(updated)
    }

    /// Soft delete: the row stays, only `is_active` and `updated_at` change
    pub fn delete_employee(&mut self, id: &str) -> bool {
        let Some(employee) = self.employees.iter_mut().find(|e| e.id == id) else {
            tracing::warn!(id = %id, "Deactivation of unknown employee ignored");
            return false;
        };

        employee.is_active = false;
        employee.updated_at = Utc::now();
        tracing::info!(id = %id, "Employee deactivated");

        self.notify("Employee deactivated.", NotificationKind::Info);
        true
    }
}
