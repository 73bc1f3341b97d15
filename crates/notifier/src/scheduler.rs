//! Daily trigger for notification runs.
//!
//! The first run happens as soon as the scheduler starts, so a deploy on
//! somebody's birthday still notifies. After that a run fires at every local
//! midnight. Both triggers share this one task, so runs never overlap.

use std::time::Duration;

use chrono::{Local, NaiveDateTime, TimeDelta};

use crate::run::Notifier;

/// Run once now, then once per day at local midnight. Never returns.
pub async fn run_daily(notifier: Notifier) {
    tracing::info!("Notification scheduler started");
    notifier.run_today().await;

    loop {
        let wait = until_next_midnight(Local::now().naive_local());
        tracing::debug!(wait_secs = wait.as_secs(), "Next notification run scheduled");
        tokio::time::sleep(wait).await;
        notifier.run_today().await;
    }
}

/// Time from `now` until the start of the following day.
pub fn until_next_midnight(now: NaiveDateTime) -> Duration {
    let next_midnight = now
        .date()
        .succ_opt()
        .and_then(|day| day.and_hms_opt(0, 0, 0))
        .unwrap_or(now + TimeDelta::days(1));

    (next_midnight - now).to_std().unwrap_or(Duration::ZERO)
}
