//! Command-line entry point.
//!
//! Loads the record store, refreshes derived statuses, and prints the
//! dashboard overview plus the current expiry report. With `notify` as the
//! first argument it also attempts one Telegram delivery of the report.

use std::sync::Arc;
use std::time::Duration;

use submanager_ai::GeminiClient;
use submanager_app::{persist, AppAction, AppEnvironment, AppReducer};
use submanager_core::environment::{Clock, SystemClock};
use submanager_core::report::build_report;
use submanager_core::stats::dashboard_stats;
use submanager_runtime::Store;
use submanager_store::JsonFileStore;
use submanager_telegram::TelegramSender;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let data_dir =
        std::env::var("SUBMANAGER_DATA_DIR").unwrap_or_else(|_| "data".to_string());
    let records = Arc::new(JsonFileStore::new(&data_dir)?);

    let gemini = GeminiClient::from_env().unwrap_or_else(|_| {
        tracing::warn!("GEMINI_API_KEY not set; extraction and drafting will fall back");
        GeminiClient::new(String::new())
    });
    let gemini = Arc::new(gemini);

    let clock = Arc::new(SystemClock);
    let today = clock.today();

    let env = AppEnvironment::new(
        clock,
        records.clone(),
        gemini.clone(),
        gemini.clone(),
        gemini,
        Arc::new(TelegramSender::new()),
    );

    let initial = persist::load_app_state(&*records, today)?;
    let store = Store::new(initial, AppReducer::new(), env);

    store.send(AppAction::RefreshStatuses).await;

    let (stats, report, configured) = store
        .state(|state| {
            (
                dashboard_stats(&state.accounts),
                build_report(today, &state.accounts, &state.clients),
                state.telegram.is_configured(),
            )
        })
        .await;

    println!("=== SubManager ===\n");
    println!("Accounts:         {}", stats.total_accounts);
    println!(
        "Slots:            {}/{} used",
        stats.used_slots, stats.total_slots
    );
    println!("Active clients:   {}", stats.active_clients);
    println!("Expiring slots:   {}", stats.expiring_slots);
    println!("Expiring masters: {}", stats.expiring_masters);
    println!("\n{}", report.message);

    if std::env::args().nth(1).as_deref() == Some("notify") {
        if configured {
            store.send(AppAction::SendExpiryReport).await;
            store.drain(Duration::from_secs(30)).await?;
            let delivered = store.state(|state| state.report_delivered).await;
            match delivered {
                Some(true) => println!("Report delivered."),
                _ => println!("Report delivery failed."),
            }
        } else {
            println!("Telegram is not configured; skipping delivery.");
        }
    }

    store.drain(Duration::from_secs(10)).await?;
    Ok(())
}
