use super::expression::next_run_for;
use anyhow::Result;
use chrono::{DateTime, Local};
use std::future::Future;
use tokio::time::{self, Duration};

/// Smallest sleep between two fire times; guards against a busy loop when the
/// clock lands exactly on a boundary.
const MIN_SLEEP_MILLIS: u64 = 500;

/// Run `job` every time `expression` fires until Ctrl-C.
///
/// Runs are strictly sequential: the next fire time is computed only after
/// the previous run returned. A failed run is logged and the loop continues.
/// Ctrl-C during a run drops the run at whatever step it is in.
pub async fn run<F, Fut>(expression: &str, job: F) -> Result<()>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<()>>,
{
    run_until(expression, job, async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!("cannot listen for Ctrl-C: {e}");
            std::future::pending::<()>().await;
        }
    })
    .await
}

/// [`run`] with an explicit stop signal, polled while sleeping and while a
/// job is in flight.
pub async fn run_until<F, Fut, S>(expression: &str, mut job: F, shutdown: S) -> Result<()>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<()>>,
    S: Future<Output = ()>,
{
    // Reject bad expressions before entering the loop.
    super::expression::validate(expression)?;

    tokio::pin!(shutdown);

    loop {
        let now = Local::now();
        let next = next_run_for(expression, &now)?;
        let wait = sleep_duration(&now, &next);
        tracing::info!(next_run = %next.format("%Y-%m-%d %H:%M:%S"), "scheduler waiting");

        tokio::select! {
            () = time::sleep(wait) => {}
            () = &mut shutdown => {
                tracing::info!("scheduler stopped");
                return Ok(());
            }
        }

        tracing::info!("running scheduled generation");
        tokio::select! {
            result = job() => match result {
                Ok(()) => tracing::info!("scheduled generation completed"),
                Err(e) => tracing::warn!("scheduled generation failed: {e:#}"),
            },
            () = &mut shutdown => {
                tracing::warn!("scheduler stopped, in-flight generation aborted");
                return Ok(());
            }
        }
    }
}

fn sleep_duration(now: &DateTime<Local>, next: &DateTime<Local>) -> Duration {
    let millis = (*next - *now).num_milliseconds();
    let millis = u64::try_from(millis).unwrap_or(0).max(MIN_SLEEP_MILLIS);
    Duration::from_millis(millis)
}
