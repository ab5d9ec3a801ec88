//! Seed dataset
//!
//! Compiled-in fixture the store starts from: two hand-authored HR admins,
//! a generated employee population, curated leave and document records,
//! and the credential table used for login.
//!
//! Generated employees continue the code sequence after `EMP013` and only
//! the first `credential_count` of them receive a login.

use std::collections::HashSet;

use chrono::{DateTime, NaiveDate, TimeZone, Utc};

use crate::identity::Credential;
use shared::models::{
    Document, DocumentType, Employee, LeaveBalance, LeaveRequest, LeaveStatus, LeaveType, Role,
    format_employee_code,
};

pub const DEFAULT_EMPLOYEE_COUNT: usize = 10_000;
pub const DEFAULT_CREDENTIAL_COUNT: usize = 100;

/// Shared password of every generated login
pub const BULK_PASSWORD: &str = "Staff123!";

/// First code number handed to generated employees
const BULK_START_INDEX: usize = 14;

/// Identity used for uploads and messages when nobody is signed in
pub const FALLBACK_USER_ID: &str = "emp-001";

/// Email domain of every seeded account
pub const EMAIL_DOMAIN: &str = "blackflag.hr";

const DEPARTMENTS: [&str; 6] = [
    "Engineering",
    "Sales",
    "Marketing",
    "Finance",
    "Operations",
    "Support",
];
const POSITIONS: [&str; 6] = [
    "Engineer",
    "Analyst",
    "Coordinator",
    "Associate",
    "Specialist",
    "Consultant",
];

const FIRST_NAMES: [&str; 16] = [
    "Georgi", "Bezalel", "Parto", "Chirstian", "Kyoichi", "Anneke", "Tzvetan", "Saniya",
    "Sumant", "Duangkaew", "Mary", "Patricio", "Eberhardt", "Berni", "Guoxiang", "Kazuhito",
];
const LAST_NAMES: [&str; 16] = [
    "Facello", "Simmel", "Bamford", "Koblick", "Maliniak", "Preusig", "Zielinski", "Kalloufi",
    "Peac", "Piveteau", "Sluis", "Bridgland", "Terkki", "Genin", "Nooteboom", "Cappelletti",
];

/// The compiled-in dataset
#[derive(Debug, Clone)]
pub struct SeedData {
    pub employees: Vec<Employee>,
    pub leave_balances: Vec<LeaveBalance>,
    pub leave_requests: Vec<LeaveRequest>,
    pub documents: Vec<Document>,
    pub credentials: Vec<Credential>,
}

impl Default for SeedData {
    fn default() -> Self {
        Self::generate(DEFAULT_EMPLOYEE_COUNT, DEFAULT_CREDENTIAL_COUNT)
    }
}

impl SeedData {
    /// Build the dataset with `employee_count` generated employees, the first
    /// `credential_count` of which can sign in with [`BULK_PASSWORD`].
    pub fn generate(employee_count: usize, credential_count: usize) -> Self {
        let mut employees = base_employees();
        let mut leave_balances = curated_balances();
        let mut credentials = vec![
            Credential::new("sarah.chen@blackflag.hr", "Admin123!", Role::HrAdmin),
            Credential::new("hr.manager@blackflag.hr", "HRPass123!", Role::HrAdmin),
        ];

        for i in 0..employee_count {
            let employee = generated_employee(i);
            if i < credential_count {
                credentials.push(Credential::new(
                    employee.email.clone(),
                    BULK_PASSWORD,
                    Role::Employee,
                ));
            }
            let code = BULK_START_INDEX + i;
            leave_balances.push(LeaveBalance {
                id: format!("lb-{:03}-v", code),
                employee_id: employee.id.clone(),
                leave_type: LeaveType::Vacation,
                year: 2024,
                accrued: 15.0,
                used: (i % 5) as f64,
                carried_over: 2.0,
            });
            leave_balances.push(LeaveBalance {
                id: format!("lb-{:03}-s", code),
                employee_id: employee.id.clone(),
                leave_type: LeaveType::Sick,
                year: 2024,
                accrued: 8.0,
                used: (i % 3) as f64,
                carried_over: 1.0,
            });
            employees.push(employee);
        }

        Self {
            employees,
            leave_balances,
            leave_requests: curated_requests(),
            documents: curated_documents(),
            credentials,
        }
    }

    /// Seeded employees that have a credential (login-capable fixtures)
    pub fn test_profiles(&self) -> impl Iterator<Item = &Employee> {
        let emails: HashSet<String> = self
            .credentials
            .iter()
            .map(|c| c.email.to_lowercase())
            .collect();
        self.employees
            .iter()
            .filter(move |e| emails.contains(&e.email.to_lowercase()))
    }

    /// Append every test profile whose email is not already in `list`
    pub fn ensure_test_profiles(&self, mut list: Vec<Employee>) -> Vec<Employee> {
        let present: HashSet<String> = list.iter().map(|e| e.email.to_lowercase()).collect();
        let extras: Vec<Employee> = self
            .test_profiles()
            .filter(|e| !present.contains(&e.email.to_lowercase()))
            .cloned()
            .collect();
        if !extras.is_empty() {
            tracing::debug!(count = extras.len(), "Added seeded test profiles to directory");
            list.extend(extras);
        }
        list
    }

    pub fn find_employee_by_email(&self, email: &str) -> Option<&Employee> {
        self.employees.iter().find(|e| e.has_email(email))
    }
}

// =============================================================================
// Builders
// =============================================================================

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, min, 0)
        .single()
        .unwrap_or_default()
}

/// Salary inside the department band, stepped by index, bumped by position
fn pick_salary(department: &str, position: &str, index: usize) -> f64 {
    let (min, max): (i64, i64) = match department {
        "Engineering" => (110_000, 185_000),
        "Sales" => (90_000, 165_000),
        "Marketing" => (85_000, 150_000),
        "Finance" => (95_000, 170_000),
        "Operations" => (85_000, 140_000),
        "Support" => (70_000, 120_000),
        _ => (80_000, 140_000),
    };
    let bump: i64 = match position {
        "Engineer" => 15_000,
        "Analyst" => 5_000,
        "Coordinator" => -3_000,
        "Associate" => -5_000,
        "Specialist" => 8_000,
        "Consultant" => 12_000,
        _ => 0,
    };
    let step = (max - min) as f64 / 12.0;
    let base = min as f64 + step * (index % 12) as f64;
    let variance = ((index % 5) * 750 + (index % 3) * 500) as f64;
    (base + bump as f64 + variance).round()
}

fn generated_employee(i: usize) -> Employee {
    let code = BULK_START_INDEX + i;
    let first = FIRST_NAMES[i % FIRST_NAMES.len()];
    let last = LAST_NAMES[(i / FIRST_NAMES.len()) % LAST_NAMES.len()];
    let department = DEPARTMENTS[i % DEPARTMENTS.len()];
    let position = POSITIONS[i % POSITIONS.len()];

    Employee {
        id: format!("emp-{:03}", code),
        employee_id: format_employee_code(code as u64),
        first_name: first.to_string(),
        last_name: last.to_string(),
        email: format!(
            "{}.{}{:04}@{}",
            first.to_lowercase(),
            last.to_lowercase(),
            i + 1,
            EMAIL_DOMAIN
        ),
        phone: format!("+1-555-200-{:04}", (1000 + i) % 10_000),
        department: department.to_string(),
        position: position.to_string(),
        hire_date: date(2023, 6, 1),
        is_active: true,
        address: format!("{} Market St, San Francisco, CA 94105", 100 + i),
        salary: pick_salary(department, position, i),
        ssn: "***-**-0000".to_string(),
        manager_id: None,
        avatar_url: None,
        created_at: at(2023, 6, 1, 9, 0),
        updated_at: at(2024, 12, 1, 9, 0),
    }
}

fn base_employees() -> Vec<Employee> {
    vec![
        Employee {
            id: "emp-001".to_string(),
            employee_id: "EMP001".to_string(),
            first_name: "Sarah".to_string(),
            last_name: "Chen".to_string(),
            email: "sarah.chen@blackflag.hr".to_string(),
            phone: "+1-415-555-0147".to_string(),
            department: "Human Resources".to_string(),
            position: "HR Director".to_string(),
            hire_date: date(2019, 8, 20),
            is_active: true,
            address: "2847 Evergreen Terrace, San Francisco, CA 94107".to_string(),
            salary: 175_000.0,
            ssn: "***-**-7890".to_string(),
            manager_id: None,
            avatar_url: Some("https://api.dicebear.com/7.x/avataaars/svg?seed=sarah".to_string()),
            created_at: at(2019, 8, 20, 8, 30),
            updated_at: at(2024, 12, 6, 10, 15),
        },
        Employee {
            id: "emp-013".to_string(),
            employee_id: "EMP013".to_string(),
            first_name: "Patricia".to_string(),
            last_name: "Anderson".to_string(),
            email: "hr.manager@blackflag.hr".to_string(),
            phone: "+1 (555) 100-0013".to_string(),
            department: "Human Resources".to_string(),
            position: "HR Manager".to_string(),
            hire_date: date(2020, 3, 15),
            is_active: true,
            address: "1313 Valencia St, San Francisco, CA 94110".to_string(),
            salary: 135_000.0,
            ssn: "***-**-3344".to_string(),
            manager_id: Some("emp-001".to_string()),
            avatar_url: Some(
                "https://api.dicebear.com/7.x/avataaars/svg?seed=patricia".to_string(),
            ),
            created_at: at(2020, 3, 15, 9, 0),
            updated_at: at(2024, 2, 28, 10, 0),
        },
    ]
}

fn curated_balances() -> Vec<LeaveBalance> {
    // (employee, vacation used, vacation carried, sick used, sick carried, personal used)
    let rows: [(&str, f64, f64, f64, f64, f64); 5] = [
        ("emp-001", 8.0, 5.0, 3.0, 1.0, 0.0),
        ("emp-002", 12.0, 0.0, 2.0, 0.0, 1.0),
        ("emp-003", 5.0, 2.0, 4.0, 0.0, 2.0),
        ("emp-004", 10.0, 3.0, 1.0, 1.0, 0.0),
        ("emp-013", 6.0, 4.0, 2.0, 1.0, 1.0),
    ];

    let mut balances = Vec::with_capacity(rows.len() * 4);
    let mut seq = 1;
    for (employee, vac_used, vac_carried, sick_used, sick_carried, personal_used) in rows {
        let entries = [
            (LeaveType::Vacation, 20.0, vac_used, vac_carried),
            (LeaveType::Sick, 10.0, sick_used, sick_carried),
            (LeaveType::Personal, 3.0, personal_used, 0.0),
            (LeaveType::Bereavement, 5.0, 0.0, 0.0),
        ];
        for (leave_type, accrued, used, carried_over) in entries {
            balances.push(LeaveBalance {
                id: format!("lb-{:03}", seq),
                employee_id: employee.to_string(),
                leave_type,
                year: 2024,
                accrued,
                used,
                carried_over,
            });
            seq += 1;
        }
    }
    balances
}

fn curated_requests() -> Vec<LeaveRequest> {
    let request = |id: &str,
                   employee_id: &str,
                   leave_type: LeaveType,
                   (start, end): (NaiveDate, NaiveDate),
                   hours: f64,
                   approved_by: Option<&str>,
                   notes: &str,
                   (created_at, updated_at): (DateTime<Utc>, DateTime<Utc>)| LeaveRequest {
        id: id.to_string(),
        employee_id: employee_id.to_string(),
        leave_type,
        start_date: start,
        end_date: end,
        hours,
        status: if approved_by.is_some() {
            LeaveStatus::Approved
        } else {
            LeaveStatus::Pending
        },
        notes: Some(notes.to_string()),
        approved_by: approved_by.map(str::to_string),
        created_at,
        updated_at,
    };

    vec![
        request(
            "lr-001",
            "emp-002",
            LeaveType::Vacation,
            (date(2024, 12, 20), date(2024, 12, 27)),
            40.0,
            None,
            "Holiday vacation with family",
            (at(2024, 11, 15, 10, 0), at(2024, 11, 15, 10, 0)),
        ),
        request(
            "lr-002",
            "emp-003",
            LeaveType::Sick,
            (date(2024, 11, 25), date(2024, 11, 26)),
            16.0,
            Some("emp-001"),
            "Doctor appointment and recovery",
            (at(2024, 11, 20, 9, 0), at(2024, 11, 20, 14, 0)),
        ),
        request(
            "lr-003",
            "emp-004",
            LeaveType::Personal,
            (date(2024, 12, 15), date(2024, 12, 15)),
            8.0,
            None,
            "Personal errand",
            (at(2024, 11, 28, 11, 0), at(2024, 11, 28, 11, 0)),
        ),
        request(
            "lr-004",
            "emp-001",
            LeaveType::Vacation,
            (date(2024, 11, 28), date(2024, 11, 29)),
            16.0,
            Some("emp-001"),
            "Thanksgiving break",
            (at(2024, 11, 1, 9, 0), at(2024, 11, 5, 10, 0)),
        ),
        request(
            "lr-005",
            "emp-007",
            LeaveType::Vacation,
            (date(2024, 12, 23), date(2025, 1, 3)),
            64.0,
            None,
            "Winter holiday",
            (at(2024, 11, 30, 15, 0), at(2024, 11, 30, 15, 0)),
        ),
    ]
}

fn curated_documents() -> Vec<Document> {
    let doc = |id: &str,
               employee_id: &str,
               document_type: DocumentType,
               filename: &str,
               file_size: u64,
               uploaded_by: &str,
               expiry_date: Option<NaiveDate>,
               created_at: DateTime<Utc>| Document {
        id: id.to_string(),
        employee_id: employee_id.to_string(),
        document_type,
        filename: filename.to_string(),
        file_size,
        uploaded_by: uploaded_by.to_string(),
        expiry_date,
        created_at,
    };

    vec![
        doc("doc-001", "emp-001", DocumentType::Id, "CA_Drivers_License.pdf", 542_000, "emp-001", Some(date(2028, 8, 15)), at(2019, 8, 20, 10, 0)),
        doc("doc-002", "emp-001", DocumentType::OfferLetter, "Offer_Letter_Sarah_Chen_2019.pdf", 285_000, "emp-001", None, at(2019, 8, 15, 9, 0)),
        doc("doc-003", "emp-001", DocumentType::Contract, "Employment_Agreement.pdf", 412_000, "emp-001", None, at(2019, 8, 20, 11, 0)),
        doc("doc-004", "emp-001", DocumentType::TaxForm, "2024_W2_Form.pdf", 325_000, "hr-system", None, at(2025, 1, 15, 8, 0)),
        doc("doc-017", "emp-004", DocumentType::Id, "CA_Drivers_License.pdf", 498_000, "emp-004", Some(date(2027, 9, 12)), at(2021, 9, 15, 9, 0)),
        doc("doc-018", "emp-004", DocumentType::OfferLetter, "Offer_Letter_David_Kim_2021.pdf", 288_000, "emp-001", None, at(2021, 9, 10, 10, 0)),
        doc("doc-021", "emp-013", DocumentType::Id, "CA_Drivers_License.pdf", 520_000, "emp-013", Some(date(2029, 1, 5)), at(2020, 3, 15, 9, 0)),
        doc("doc-022", "emp-013", DocumentType::OfferLetter, "Offer_Letter_Patricia_Anderson_2020.pdf", 292_000, "emp-001", None, at(2020, 3, 10, 10, 0)),
        doc("doc-023", "emp-013", DocumentType::Certification, "CIPHR_HR_Certification_2021.pdf", 475_000, "emp-013", Some(date(2026, 11, 30)), at(2021, 11, 30, 14, 0)),
        doc("doc-025", "emp-013", DocumentType::TaxForm, "2024_W2_Form.pdf", 330_000, "hr-system", None, at(2025, 1, 15, 8, 0)),
    ]
}
