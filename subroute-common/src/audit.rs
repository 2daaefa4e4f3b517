//! Audit logging for routing decisions
//!
//! Every routed message produces exactly one audit event on the
//! `subroute::audit` target:
//!
//! - `Forwarded`: the recipient was valid and the message went to its destination
//! - `FailForwarded`: the recipient was refused and the message went to the failure address
//! - `Rejected`: the recipient was refused and the sender receives a bounce
//!
//! ## PII Redaction
//!
//! Sender and recipient addresses can be redacted based on the `AuditConfig`.

use std::sync::{Arc, OnceLock};

use serde::{Deserialize, Serialize};

use crate::address::Mailbox;

/// Audit logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditConfig {
    /// Enable audit logging for routing decisions
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Redact sender email addresses from audit logs
    #[serde(default)]
    pub redact_sender: bool,

    /// Redact recipient email addresses from audit logs
    #[serde(default)]
    pub redact_recipients: bool,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            redact_sender: false,
            redact_recipients: false,
        }
    }
}

const fn default_true() -> bool {
    true
}

static AUDIT_CONFIG: OnceLock<Arc<AuditConfig>> = OnceLock::new();

/// Initialize audit logging with configuration
pub fn init(config: AuditConfig) {
    AUDIT_CONFIG.get_or_init(|| Arc::new(config));
}

/// Get the current audit configuration
#[must_use]
pub fn config() -> Arc<AuditConfig> {
    AUDIT_CONFIG
        .get()
        .cloned()
        .unwrap_or_else(|| Arc::new(AuditConfig::default()))
}

/// Redact email address if redaction is enabled
#[must_use]
pub fn redact_email(email: &str, redact: bool) -> String {
    if !redact {
        return email.to_string();
    }

    // Keep domain but redact local part
    match Mailbox::from_recipient(email).domain {
        Some(domain) => format!("[REDACTED]@{domain}"),
        None => "[REDACTED]".to_string(),
    }
}

/// Log a forward to the configured destination (`PASS`) or to the failure
/// address (`FAIL`).
///
/// The destination is an operator-configured address and is never redacted.
pub fn log_forward(sender: &str, recipient: &str, destination: &str, verdict: &str) {
    let config = config();
    if !config.enabled {
        return;
    }

    let event = if verdict == "PASS" {
        "Forwarded"
    } else {
        "FailForwarded"
    };

    tracing::info!(
        target: "subroute::audit",
        event,
        sender = %redact_email(sender, config.redact_sender),
        recipient = %redact_email(recipient, config.redact_recipients),
        destination,
        verdict,
        "Message forwarded"
    );
}

/// Log a rejection with the reason returned to the sender.
pub fn log_reject(sender: &str, recipient: &str, reason: &str) {
    let config = config();
    if !config.enabled {
        return;
    }

    tracing::info!(
        target: "subroute::audit",
        event = "Rejected",
        sender = %redact_email(sender, config.redact_sender),
        recipient = %redact_email(recipient, config.redact_recipients),
        reason,
        "Message rejected"
    );
}
