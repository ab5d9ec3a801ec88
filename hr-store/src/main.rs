use hr_store::{HrStore, StoreConfig, hydration};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Environment (.env is optional)
    dotenvy::dotenv().ok();

    // 2. Configuration and logging
    let config = StoreConfig::from_env();
    let _guard = hr_store::logger::init_logger(
        &config.log_level,
        config.log_json,
        config.log_dir.as_deref(),
    )?;

    tracing::info!(
        use_api = config.use_api,
        api_url = %config.api_url,
        data_dir = %config.data_dir.display(),
        "HR store starting..."
    );

    // 3. Load persisted state, start the directory fetch
    let mut store = HrStore::open(&config)?;
    let pending = hydration::spawn_hydration(
        hydration::remote_source(&config),
        config.fetch_limit,
        store.seed_handle(),
    );

    // 4. Optional headless sign-in, while the fetch runs
    let credentials = (
        std::env::var("HR_LOGIN_EMAIL"),
        std::env::var("HR_LOGIN_PASSWORD"),
    );
    let signed_in = match credentials {
        (Ok(email), Ok(password)) => {
            let ok = store.login(&email, &password);
            if !ok {
                tracing::warn!("HR_LOGIN_EMAIL / HR_LOGIN_PASSWORD rejected");
            }
            ok
        }
        _ => false,
    };

    store.finish_hydration(pending).await;
    tracing::info!(employees = store.employees().len(), "Employee directory ready");

    if signed_in {
        if let Some(summary) = store.personal_summary() {
            tracing::info!(
                balances = summary.balances.len(),
                documents = summary.documents.len(),
                pending = summary.pending_requests.len(),
                available_days = summary.available_days,
                "Personal summary"
            );
        }
    }

    // Expiring paperwork is only surfaced to HR admins
    if store.user().is_some_and(|u| u.is_hr_admin()) {
        let today = chrono::Utc::now().date_naive();
        for document in store.expired_documents(today) {
            tracing::warn!(
                id = %document.id,
                employee = %store.employee_name(&document.employee_id),
                filename = %document.filename,
                "Document expired"
            );
        }
    }

    // 5. Report
    let stats = store.dashboard_stats(chrono::Utc::now().date_naive());
    tracing::info!(
        active = stats.total_employees,
        pending_leave = stats.pending_leave_count,
        recent_hires = stats.recent_hires_count,
        departments = stats.by_department.len(),
        average_salary = stats.average_salary,
        "Dashboard"
    );
    println!("{}", serde_json::to_string_pretty(&stats)?);

    Ok(())
}
