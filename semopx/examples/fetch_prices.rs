mod common;

use std::time::Duration;

use chrono::NaiveDate;
use common::get_source;
use semopx::Semopx;
use tracing_subscriber::fmt::format::FmtSpan;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Suggested: RUST_LOG=info,semopx=debug,semopx_core=trace
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .with_span_events(FmtSpan::CLOSE)
        .try_init();

    // 1. Build the client for the Republic of Ireland market.
    let client = Semopx::builder()
        .with_source(get_source())
        .market_area("ROI")
        .timezone("Europe/Dublin")
        .request_timeout(Duration::from_secs(300))
        .build()?;

    // 2. Hourly rates, best available auction per hour.
    let report = client.fetch().await?;
    println!("{} hourly records", report.len());
    for rec in report.records().take(24) {
        println!(
            "{}  da={:?}  final={:?}",
            rec.datetime, rec.da_kwh_rate, rec.final_kwh_rate
        );
    }

    // 3. Daily means up to an optional end date (first CLI argument, YYYY-MM-DD).
    let end_date = std::env::args()
        .nth(1)
        .map(|s| NaiveDate::parse_from_str(&s, "%Y-%m-%d"))
        .transpose()?;
    let daily = client.daily(end_date).await?;
    println!("{}", serde_json::to_string_pretty(&daily)?);

    Ok(())
}
