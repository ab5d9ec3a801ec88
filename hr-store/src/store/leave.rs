use chrono::Utc;

use shared::models::{LeaveBalance, LeaveRequest, LeaveStatus, NewLeaveRequest, NotificationKind};
use shared::util::generate_id;

use super::HrStore;

impl HrStore {
    pub fn leave_balances(&self) -> &[LeaveBalance] {
        &self.leave_balances
    }

    /// Balance rows owned by `employee_id`
    pub fn balances_for<'a>(
        &'a self,
        employee_id: &'a str,
    ) -> impl Iterator<Item = &'a LeaveBalance> + 'a {
        self.leave_balances
            .iter()
            .filter(move |b| b.employee_id == employee_id)
    }

    pub fn leave_requests(&self) -> &[LeaveRequest] {
        &self.leave_requests
    }

    pub fn get_leave_request(&self, id: &str) -> Option<&LeaveRequest> {
        self.leave_requests.iter().find(|r| r.id == id)
    }

    /// Submit a request. It always starts pending with no approver.
    pub fn add_leave_request(&mut self, data: NewLeaveRequest) -> LeaveRequest {
        let now = Utc::now();
        let request = LeaveRequest {
            id: generate_id("lr"),
            employee_id: data.employee_id,
            leave_type: data.leave_type,
            start_date: data.start_date,
            end_date: data.end_date,
            hours: data.hours,
            status: LeaveStatus::Pending,
            notes: data.notes,
            approved_by: None,
            created_at: now,
            updated_at: now,
        };

        tracing::info!(
            id = %request.id,
            employee_id = %request.employee_id,
            leave_type = %request.leave_type,
            hours = request.hours,
            "Leave request submitted"
        );
        self.leave_requests.push(request.clone());
        self.persist();
        self.notify("Leave request submitted.", NotificationKind::Success);
        request
    }

    /// Move a request to `status`
    ///
    /// Approval debits `hours / 8` days from every balance row matching the
    /// request's employee and leave type. No other transition touches the
    /// balances, so rejecting or cancelling an approved request does not
    /// give the days back.
    pub fn update_leave_status(
        &mut self,
        id: &str,
        status: LeaveStatus,
        approved_by: Option<&str>,
    ) -> Option<LeaveRequest> {
        let Some(request) = self.leave_requests.iter_mut().find(|r| r.id == id) else {
            tracing::warn!(id = %id, status = %status, "Status change of unknown leave request ignored");
            return None;
        };

        // Balance match uses the request as it was before this update
        let (employee_id, leave_type, days) =
            (request.employee_id.clone(), request.leave_type, request.days());

        let previous = request.status;
        request.status = status;
        if let Some(approver) = approved_by.filter(|a| !a.is_empty()) {
            request.approved_by = Some(approver.to_string());
        }
        request.updated_at = Utc::now();
        let updated = request.clone();

        if status == LeaveStatus::Approved {
            for balance in self
                .leave_balances
                .iter_mut()
                .filter(|b| b.matches(&employee_id, leave_type))
            {
                balance.used += days;
            }
            tracing::info!(id = %id, employee_id = %employee_id, days, "Leave balance debited");
        }

        tracing::info!(id = %id, from = %previous, to = %status, "Leave request status changed");
        self.persist();

        let kind = if status == LeaveStatus::Approved {
            NotificationKind::Success
        } else {
            NotificationKind::Info
        };
        self.notify(format!("Leave request {}.", status), kind);
        Some(updated)
    }

    pub fn cancel_leave_request(&mut self, id: &str) -> Option<LeaveRequest> {
        self.update_leave_status(id, LeaveStatus::Cancelled, None)
    }
}
