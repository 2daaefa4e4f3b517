use std::{collections::BTreeMap, fmt};

use async_trait::async_trait;

use crate::ForwardError;

/// Headers added to a forwarded message, by name.
pub type Headers = BTreeMap<String, String>;

/// An inbound message as seen by the router
///
/// The host owns delivery; the router only calls back into it. Exactly one
/// of [`forward`](Self::forward) or [`set_reject`](Self::set_reject) is
/// called per routed message.
#[async_trait]
pub trait InboundMessage: Send {
    /// The envelope recipient.
    fn to(&self) -> &str;

    /// The envelope sender.
    fn from(&self) -> &str;

    /// Deliver the message to `destination` with `headers` added.
    ///
    /// # Errors
    ///
    /// Returns an error if the host could not forward the message.
    async fn forward(&mut self, destination: &str, headers: Headers) -> Result<(), ForwardError>;

    /// Bounce the message back to the sender with `reason`.
    fn set_reject(&mut self, reason: &str);
}

/// The outbound call made for a [`RecordingMessage`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outbound {
    Forward {
        destination: String,
        headers: Headers,
    },
    Reject {
        reason: String,
    },
}

impl fmt::Display for Outbound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Forward {
                destination,
                headers,
            } => {
                write!(f, "forward to {destination}")?;
                for (name, value) in headers {
                    write!(f, " ({name}: {value})")?;
                }
                Ok(())
            }
            Self::Reject { reason } => write!(f, "reject: {reason}"),
        }
    }
}

/// An in-process message that records the router's outbound calls.
///
/// Used for dry runs and in tests.
#[derive(Debug, Clone, Default)]
pub struct RecordingMessage {
    to: String,
    from: String,
    calls: Vec<Outbound>,
    refuse_forward: Option<String>,
}

impl RecordingMessage {
    #[must_use]
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            to: to.into(),
            from: from.into(),
            ..Self::default()
        }
    }

    /// Make every forward fail with `reason`.
    #[must_use]
    pub fn refusing_forward(mut self, reason: impl Into<String>) -> Self {
        self.refuse_forward = Some(reason.into());
        self
    }

    /// Every outbound call made so far, in order.
    #[must_use]
    pub fn calls(&self) -> &[Outbound] {
        &self.calls
    }

    /// The single outbound call, if exactly one was made.
    #[must_use]
    pub fn outbound(&self) -> Option<&Outbound> {
        match self.calls.as_slice() {
            [call] => Some(call),
            _ => None,
        }
    }
}

#[async_trait]
impl InboundMessage for RecordingMessage {
    fn to(&self) -> &str {
        &self.to
    }

    fn from(&self) -> &str {
        &self.from
    }

    async fn forward(&mut self, destination: &str, headers: Headers) -> Result<(), ForwardError> {
        if let Some(reason) = &self.refuse_forward {
            return Err(ForwardError {
                destination: destination.to_string(),
                reason: reason.clone(),
            });
        }

        self.calls.push(Outbound::Forward {
            destination: destination.to_string(),
            headers,
        });
        Ok(())
    }

    fn set_reject(&mut self, reason: &str) {
        self.calls.push(Outbound::Reject {
            reason: reason.to_string(),
        });
    }
}
