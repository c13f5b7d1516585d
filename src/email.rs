use tracing::{info, warn};

use crate::errors::{Error, Result};

/// Outbound email. Welcome and invitation mail is fire-and-forget: a
/// delivery problem must never fail the operation that triggered it.
/// Password reset mail is the one exception and escalates to the caller.
///
/// No SMTP transport is wired up; when delivery is disabled the service
/// logs what it would have sent, mirroring the dashboard's development
/// mode.
#[derive(Debug, Clone)]
pub struct EmailService {
    enabled: bool,
    from: String,
    base_url: String,
}

impl EmailService {
    pub fn new(enabled: bool, from: String, base_url: String) -> Self {
        Self {
            enabled,
            from,
            base_url,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn send_welcome_email(&self, to: &str, username: &str) {
        if !self.enabled {
            info!("[email disabled] would send welcome email to {to} for {username}");
            return;
        }
        warn!(
            "email enabled but no transport configured; dropping welcome email from {} to {to}",
            self.from
        );
    }

    pub fn send_invitation_email(&self, to: &str, token: &str, inviter_username: &str) {
        let link = format!("{}/accept-invite?token={token}", self.base_url);
        if !self.enabled {
            info!("[email disabled] would send invitation from {inviter_username} to {to}: {link}");
            return;
        }
        warn!(
            "email enabled but no transport configured; dropping invitation from {} to {to}",
            self.from
        );
    }

    pub fn send_password_reset_email(&self, to: &str, token: &str) -> Result<()> {
        let link = format!("{}/reset-password?token={token}", self.base_url);
        if !self.enabled {
            info!("[email disabled] would send password reset to {to}: {link}");
            return Ok(());
        }
        Err(Error::EmailDelivery(format!(
            "no transport configured for password reset to {to}"
        )))
    }
}
