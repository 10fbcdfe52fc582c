//! Desktop notifications for finished sessions

use tokio::process::Command;
use tracing::{debug, info};

use crate::state::SessionMode;

/// Title and body shown when a countdown of `mode` finishes
pub fn completion_message(mode: SessionMode) -> (&'static str, &'static str) {
    match mode {
        SessionMode::Focus => ("Focus session complete", "Nice work. Time for a break."),
        SessionMode::ShortBreak => ("Short break over", "Ready for the next focus session?"),
        SessionMode::LongBreak => ("Long break over", "Back to it when you're ready."),
    }
}

/// Show a desktop notification using notify-send
pub async fn send_notification(summary: &str, body: &str) -> Result<(), String> {
    debug!("Sending notification: {}", summary);

    let output = Command::new("notify-send")
        .args(["--app-name=focus-flow", summary, body])
        .output()
        .await
        .map_err(|e| format!("Failed to execute notify-send: {}", e))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(format!("notify-send failed: {}", stderr));
    }

    info!("Notification sent: {}", summary);
    Ok(())
}

/// Announce that a countdown finished
pub async fn send_completion_notification(mode: SessionMode) -> Result<(), String> {
    let (summary, body) = completion_message(mode);
    send_notification(summary, body).await
}

/// Check if notify-send is available on the system
pub async fn check_notify_send_available() -> Result<(), String> {
    Command::new("notify-send")
        .arg("--version")
        .output()
        .await
        .map_err(|_| "notify-send is not available; desktop notifications are disabled".to_string())?;

    info!("notify-send is available");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_mode_has_a_message() {
        for mode in SessionMode::ALL {
            let (summary, body) = completion_message(mode);
            assert!(!summary.is_empty());
            assert!(!body.is_empty());
        }
        assert_eq!(completion_message(SessionMode::Focus).0, "Focus session complete");
    }
}
