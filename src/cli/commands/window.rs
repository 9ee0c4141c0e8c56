//! window command - Show the time span a run would cover

use anyhow::Result;
use chrono::{NaiveDate, SecondsFormat, Utc};

use crate::core::window::Quarter;

/// Print the quarter and its half-open bounds.
pub fn window(quarter: Option<Quarter>) -> Result<()> {
    println!("{}", describe(quarter, Utc::now().date_naive())?);
    Ok(())
}

fn describe(quarter: Option<Quarter>, today: NaiveDate) -> Result<String> {
    let quarter = quarter.unwrap_or_else(|| Quarter::preceding(today));
    let window = quarter.window()?;
    Ok(format!(
        "{}\nstart: {}\nend:   {} (exclusive)",
        quarter,
        window.start.to_rfc3339_opts(SecondsFormat::Secs, true),
        window.end.to_rfc3339_opts(SecondsFormat::Secs, true)
    ))
}
