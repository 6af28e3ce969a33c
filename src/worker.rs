//! Background override worker
//!
//! Runs apply/remove requests end-to-end on a worker thread so the caller
//! stays responsive while the elevation prompt blocks. Requests and results
//! are typed values over an mpsc channel; the caller submits a request and
//! awaits its outcome. One request runs at a time; serializing requests per
//! display is the caller's responsibility.

use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;

use tracing::{error, info};

use crate::display::DisplayIdentity;
use crate::elevation::{Elevator, OsascriptElevator};
use crate::privileged::PrivilegedApplier;
use crate::resolution::ResolutionSelection;

/// One override operation for one display.
#[derive(Debug, Clone)]
pub enum OverrideRequest {
    Enable {
        identity: DisplayIdentity,
        selection: ResolutionSelection,
    },
    Disable {
        identity: DisplayIdentity,
    },
}

/// The result of one request: success or failure, with a user-facing message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverrideOutcome {
    pub success: bool,
    pub message: String,
}

type Submission = (OverrideRequest, Sender<OverrideOutcome>);

/// Handle to the worker thread.
pub struct OverrideWorker {
    tx: Sender<Submission>,
}

impl OverrideWorker {
    /// Spawn the worker with the production elevation channel.
    pub fn spawn() -> Self {
        let (tx, rx) = mpsc::channel::<Submission>();
        thread::spawn(move || {
            let applier = PrivilegedApplier::new(OsascriptElevator);
            while let Ok((request, reply)) = rx.recv() {
                let outcome = execute(&applier, request);
                if reply.send(outcome).is_err() {
                    error!("request outcome dropped: caller went away");
                }
            }
        });
        Self { tx }
    }

    /// Submit a request; the returned receiver yields exactly one outcome.
    pub fn submit(&self, request: OverrideRequest) -> Receiver<OverrideOutcome> {
        let (reply_tx, reply_rx) = mpsc::channel();
        if self.tx.send((request, reply_tx)).is_err() {
            error!("override worker is gone");
        }
        reply_rx
    }
}

/// Run one request to completion, folding every error into the outcome.
pub(crate) fn execute<E: Elevator>(
    applier: &PrivilegedApplier<E>,
    request: OverrideRequest,
) -> OverrideOutcome {
    match request {
        OverrideRequest::Enable {
            identity,
            selection,
        } => {
            info!(display = %identity, selection = %selection, "enable requested");
            match applier.apply(identity, &selection) {
                Ok(()) => OverrideOutcome {
                    success: true,
                    message: format!(
                        "HiDPI enabled for {identity}. Reboot to apply changes."
                    ),
                },
                Err(err) => OverrideOutcome {
                    success: false,
                    message: err.to_string(),
                },
            }
        }
        OverrideRequest::Disable { identity } => {
            info!(display = %identity, "disable requested");
            match applier.remove(identity) {
                Ok(()) => OverrideOutcome {
                    success: true,
                    message: format!(
                        "HiDPI disabled for {identity}. Reboot to apply changes."
                    ),
                },
                Err(err) => OverrideOutcome {
                    success: false,
                    message: err.to_string(),
                },
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elevation::test_support::RecordingElevator;
    use crate::resolution::Resolution;

    #[test]
    fn test_enable_success_reports_reboot_notice() {
        let applier = PrivilegedApplier::new(RecordingElevator::succeeding());
        let request = OverrideRequest::Enable {
            identity: DisplayIdentity::new(0x10ac, 0x40a8),
            selection: ResolutionSelection::parse("1920x1200").unwrap(),
        };

        let outcome = execute(&applier, request);
        assert!(outcome.success);
        assert_eq!(
            outcome.message,
            "HiDPI enabled for 10ac:40a8. Reboot to apply changes."
        );
    }

    #[test]
    fn test_enable_failure_carries_script_output() {
        let applier = PrivilegedApplier::new(RecordingElevator::failing("mkdir: Permission denied"));
        let request = OverrideRequest::Enable {
            identity: DisplayIdentity::new(0x10ac, 0x40a8),
            selection: ResolutionSelection::parse("1920x1080").unwrap(),
        };

        let outcome = execute(&applier, request);
        assert!(!outcome.success);
        assert!(outcome.message.contains("mkdir: Permission denied"));
    }

    #[test]
    fn test_oversized_enable_fails_without_elevation() {
        let applier = PrivilegedApplier::new(RecordingElevator::succeeding());
        let request = OverrideRequest::Enable {
            identity: DisplayIdentity::new(0x10ac, 0x40a8),
            selection: ResolutionSelection::Custom(vec![Resolution::new(u32::MAX, 1)]),
        };

        let outcome = execute(&applier, request);
        assert!(!outcome.success);
        assert!(outcome.message.contains("too large"));
    }

    #[test]
    fn test_disable_success_message() {
        let applier = PrivilegedApplier::new(RecordingElevator::succeeding());
        let request = OverrideRequest::Disable {
            identity: DisplayIdentity::new(0x1e6d, 0x5b00),
        };

        let outcome = execute(&applier, request);
        assert!(outcome.success);
        assert_eq!(
            outcome.message,
            "HiDPI disabled for 1e6d:5b00. Reboot to apply changes."
        );
    }
}
