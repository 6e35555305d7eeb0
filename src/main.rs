use chrono::{DateTime, Utc};
use dotenvy::dotenv;
use loan_maturity_tracker::{
    config::{portfolio, settings},
    core::{
        filters::AlertFeedState,
        format::{format_currency, format_date, format_days_remaining},
        query::sort_alerts_by_priority,
    },
    errors::Result,
    seed::sample_portfolio,
    store::PortfolioStore,
};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn print_report(store: &PortfolioStore, config: &settings::AppConfig, now: DateTime<Utc>) {
    let policy = &config.alert_policy;
    let summary = store.dashboard(now, &config.dashboard, policy);
    println!("Portfolio as of {}", format_date(now.date_naive()));
    println!(
        "  Companies: {}  Active loans: {}  Upcoming: {}  Total value: {}",
        summary.total_companies,
        summary.active_loans,
        summary.upcoming_loans,
        format_currency(summary.total_loan_value)
    );

    println!("\nAlerts");
    let mut rows = store.list_alerts(now, policy, &AlertFeedState::default().active_filter());
    sort_alerts_by_priority(&mut rows);
    for row in rows {
        println!(
            "  [{}] {} - {} ({})",
            row.priority,
            row.company_name.as_deref().unwrap_or("Unknown company"),
            row.alert.message,
            row.days_until_maturity
                .map_or_else(|| "no loan on file".to_string(), format_days_remaining)
        );
    }

    println!("\nMaturity timeline");
    for bucket in store.timeline(now) {
        println!(
            "  {} - {} loan(s), {}",
            bucket.period.label(),
            bucket.loans.len(),
            format_currency(bucket.total_amount)
        );
        for loan in bucket.loans {
            println!(
                "    {} {} {} [{}]",
                format_date(loan.loan.maturity_date),
                loan.loan.loan_type,
                format_currency(loan.loan.amount),
                loan.status
            );
        }
    }
}

fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file, non-fatal since env vars can be set externally
    dotenv().ok();

    // 3. Load settings and the reference time for this run
    let config = settings::load_app_configuration()
        .inspect_err(|e| error!("Failed to load settings: {}", e))?;
    let now = settings::reference_time()?;
    info!("Evaluating portfolio as of {}", now);

    // 4. Build the store from a portfolio file or the demo sample
    let mut store = match portfolio::get_portfolio_path() {
        Some(path) => portfolio::load_portfolio(&path)
            .inspect(|_| info!("Loaded portfolio from {}", path))
            .inspect_err(|e| error!("Failed to load portfolio {}: {}", path, e))?,
        None => sample_portfolio()?,
    };

    // 5. Raise any alerts the portfolio is missing, then report
    store
        .raise_alerts(now, &config.alert_policy)
        .inspect_err(|e| error!("Failed to raise alerts: {}", e))?;
    print_report(&store, &config, now);

    Ok(())
}
