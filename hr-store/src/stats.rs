//! Dashboard aggregates
//!
//! Derived views over the store collections. Nothing here is cached: the
//! numbers are recomputed from the current collections on every call.

use std::collections::BTreeMap;

use chrono::{Months, NaiveDate};
use serde::Serialize;

use shared::models::{Document, Employee, LeaveBalance, LeaveRequest, LeaveStatus, User};

/// Pending requests shown in the personal summary
const PERSONAL_PENDING_LIMIT: usize = 4;
/// Latest requests shown in the personal summary
const PERSONAL_RECENT_LIMIT: usize = 3;

/// Organisation-wide figures
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    /// Active employees
    pub total_employees: usize,
    pub pending_leave_count: usize,
    /// Active employees hired within the last three months
    pub recent_hires_count: usize,
    /// Active headcount per department
    pub by_department: BTreeMap<String, usize>,
    /// Rounded mean salary of active employees, 0 without any
    pub average_salary: f64,
}

impl DashboardStats {
    pub fn compute(employees: &[Employee], requests: &[LeaveRequest], today: NaiveDate) -> Self {
        let active: Vec<&Employee> = employees.iter().filter(|e| e.is_active).collect();
        let cutoff = today.checked_sub_months(Months::new(3)).unwrap_or(NaiveDate::MIN);

        let mut by_department = BTreeMap::new();
        for employee in &active {
            *by_department.entry(employee.department.clone()).or_insert(0) += 1;
        }

        let average_salary = if active.is_empty() {
            0.0
        } else {
            (active.iter().map(|e| e.salary).sum::<f64>() / active.len() as f64).round()
        };

        Self {
            total_employees: active.len(),
            pending_leave_count: requests
                .iter()
                .filter(|r| r.status == LeaveStatus::Pending)
                .count(),
            recent_hires_count: active.iter().filter(|e| e.hire_date > cutoff).count(),
            by_department,
            average_salary,
        }
    }
}

/// What the signed-in user sees about themselves
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalSummary {
    pub balances: Vec<LeaveBalance>,
    pub documents: Vec<Document>,
    /// First pending requests, in storage order
    pub pending_requests: Vec<LeaveRequest>,
    /// Latest requests by start date
    pub recent_requests: Vec<LeaveRequest>,
    /// Sum of available days across balances, may be negative
    pub available_days: f64,
}

impl PersonalSummary {
    pub fn compute(
        user: &User,
        balances: &[LeaveBalance],
        requests: &[LeaveRequest],
        documents: &[Document],
    ) -> Self {
        let balances: Vec<LeaveBalance> = balances
            .iter()
            .filter(|b| user.owns(&b.employee_id))
            .cloned()
            .collect();
        let own_requests: Vec<&LeaveRequest> =
            requests.iter().filter(|r| user.owns(&r.employee_id)).collect();

        let pending_requests = own_requests
            .iter()
            .filter(|r| r.status == LeaveStatus::Pending)
            .take(PERSONAL_PENDING_LIMIT)
            .map(|r| (*r).clone())
            .collect();

        let mut recent = own_requests;
        recent.sort_by(|a, b| b.start_date.cmp(&a.start_date));
        let recent_requests = recent
            .into_iter()
            .take(PERSONAL_RECENT_LIMIT)
            .cloned()
            .collect();

        Self {
            available_days: balances.iter().map(LeaveBalance::available).sum(),
            documents: documents
                .iter()
                .filter(|d| user.owns(&d.employee_id))
                .cloned()
                .collect(),
            balances,
            pending_requests,
            recent_requests,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::SeedData;
    use shared::models::{LeaveType, Role};

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_dashboard_stats() {
        let seed = SeedData::generate(6, 0);
        let mut employees = seed.employees.clone();
        employees[3].is_active = false;
        employees[4].hire_date = day(2025, 2, 1);

        let stats = DashboardStats::compute(&employees, &seed.leave_requests, day(2025, 3, 15));
        assert_eq!(stats.total_employees, 7);
        assert_eq!(stats.pending_leave_count, 3);
        assert_eq!(stats.recent_hires_count, 1);
        assert_eq!(stats.by_department["Human Resources"], 2);
        assert_eq!(stats.by_department.values().sum::<usize>(), 7);
        assert!(!stats.by_department.contains_key("Sales"));
    }

    #[test]
    fn test_average_salary_rounds_and_handles_empty() {
        let seed = SeedData::generate(0, 0);
        let mut employees = seed.employees.clone();
        employees[0].salary = 100_000.4;
        employees[1].salary = 100_000.0;
        let stats = DashboardStats::compute(&employees, &[], day(2025, 1, 1));
        assert_eq!(stats.average_salary, 100_000.0);

        assert_eq!(DashboardStats::compute(&[], &[], day(2025, 1, 1)).average_salary, 0.0);
    }

    #[test]
    fn test_personal_summary_is_unclamped() {
        let seed = SeedData::generate(0, 0);
        let user = User::from_employee(&seed.employees[0], Role::HrAdmin);
        let mut balances = seed.leave_balances.clone();
        let vacation = balances
            .iter_mut()
            .find(|b| b.matches("emp-001", LeaveType::Vacation))
            .unwrap();
        vacation.used = 40.0;

        let summary =
            PersonalSummary::compute(&user, &balances, &seed.leave_requests, &seed.documents);
        assert_eq!(summary.balances.len(), 4);
        assert_eq!(summary.documents.len(), 4);
        // vacation 20+5-40, sick 10+1-3, personal 3, bereavement 5
        assert_eq!(summary.available_days, -15.0 + 8.0 + 3.0 + 5.0);
        assert!(summary.pending_requests.is_empty());
        assert_eq!(summary.recent_requests[0].id, "lr-004");
    }
}
