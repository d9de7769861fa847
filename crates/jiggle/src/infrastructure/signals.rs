//! OS signal listener that raises the stop signal.
//!
//! Ctrl-C is handled on every platform; SIGTERM is handled on Unix as well.
//! Either one raises the shared [`StopSignal`] exactly once; the scheduler
//! notices on its current wait and ends the run with exit code 0.

use std::future::Future;

use tokio::task::JoinHandle;
use tracing::{error, info};

use crate::application::stop::StopSignal;

/// Spawns a task that raises `stop` on the first termination signal.
///
/// Must be called from within a Tokio runtime.
pub fn spawn_stop_listener(stop: StopSignal) -> JoinHandle<()> {
    tokio::spawn(async move {
        match wait_for_termination().await {
            Ok(name) => {
                info!("{name} received; stopping");
                stop.raise();
            }
            Err(e) => error!("failed to listen for termination signals: {e}"),
        }
    })
}

#[cfg(unix)]
async fn wait_for_termination() -> std::io::Result<&'static str> {
    use tokio::signal::unix::{signal, SignalKind};

    let terminate = match signal(SignalKind::terminate()) {
        Ok(mut term) => Some(async move {
            // A closed stream never delivers SIGTERM; keep waiting on Ctrl-C.
            if term.recv().await.is_none() {
                std::future::pending::<()>().await;
            }
        }),
        Err(e) => {
            tracing::warn!("cannot listen for SIGTERM ({e}); only Ctrl-C will stop the run");
            None
        }
    };
    first_signal(tokio::signal::ctrl_c(), terminate).await
}

#[cfg(not(unix))]
async fn wait_for_termination() -> std::io::Result<&'static str> {
    first_signal(tokio::signal::ctrl_c(), None::<std::future::Pending<()>>).await
}

/// Waits for the interrupt future, or for `terminate` when one is available.
async fn first_signal<I, T>(interrupt: I, terminate: Option<T>) -> std::io::Result<&'static str>
where
    I: Future<Output = std::io::Result<()>>,
    T: Future<Output = ()>,
{
    match terminate {
        Some(terminate) => tokio::select! {
            result = interrupt => result.map(|()| "interrupt"),
            () = terminate => Ok("SIGTERM"),
        },
        None => interrupt.await.map(|()| "interrupt"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_listener_does_not_raise_without_a_signal() {
        let stop = StopSignal::new();
        let handle = spawn_stop_listener(stop.clone());

        tokio::task::yield_now().await;

        assert!(!stop.is_raised());
        handle.abort();
    }

    #[tokio::test]
    async fn test_interrupt_still_stops_without_a_terminate_listener() {
        let name = first_signal(async { Ok(()) }, None::<std::future::Pending<()>>)
            .await
            .unwrap();

        assert_eq!(name, "interrupt");
    }

    #[tokio::test]
    async fn test_terminate_wins_when_it_fires_first() {
        let name = first_signal(
            std::future::pending::<std::io::Result<()>>(),
            Some(std::future::ready(())),
        )
        .await
        .unwrap();

        assert_eq!(name, "SIGTERM");
    }

    #[tokio::test]
    async fn test_interrupt_error_is_reported() {
        let result = first_signal(
            async { Err(std::io::Error::other("no handler")) },
            None::<std::future::Pending<()>>,
        )
        .await;

        assert!(result.is_err());
    }
}
