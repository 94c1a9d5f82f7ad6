//! Command orchestration from UI actions to the backend command queue.

use crossbeam_channel::{Sender, TrySendError};

use crate::backend_bridge::commands::BackendCommand;

/// Queues `cmd` without blocking the frame. Returns `false` and writes the
/// reason into `status` when the queue cannot take it.
pub fn dispatch_backend_command(
    cmd_tx: &Sender<BackendCommand>,
    cmd: BackendCommand,
    status: &mut String,
) -> bool {
    let cmd_name = cmd.name();
    match cmd_tx.try_send(cmd) {
        Ok(()) => {
            tracing::debug!(command = cmd_name, "queued ui->backend command");
            true
        }
        Err(TrySendError::Full(_)) => {
            *status = "UI command queue is full; please retry".to_string();
            false
        }
        Err(TrySendError::Disconnected(_)) => {
            *status =
                "Backend worker disconnected (possible startup failure); restart the app"
                    .to_string();
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use crossbeam_channel::bounded;

    use super::*;

    #[test]
    fn reports_full_and_disconnected_queues() {
        let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(1);
        let mut status = String::new();

        assert!(dispatch_backend_command(&cmd_tx, BackendCommand::LoadFeed, &mut status));
        assert!(status.is_empty());

        assert!(!dispatch_backend_command(&cmd_tx, BackendCommand::LoadFeed, &mut status));
        assert!(status.contains("full"));

        drop(cmd_rx);
        assert!(!dispatch_backend_command(&cmd_tx, BackendCommand::LoadFeed, &mut status));
        assert!(status.contains("disconnected"));
    }
}
