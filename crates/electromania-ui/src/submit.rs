//! Submit seam for validated forms.
//!
//! Nothing is delivered anywhere yet: the default handler only logs. A real
//! mailing-list or CRM client plugs in by implementing [`SubmitHandler`].

use serde::{Deserialize, Serialize};

use crate::form::FormValues;

/// Which form was submitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormKind {
    /// Contact page message
    Contact,
    /// Newsletter sign-up
    Newsletter,
}

impl FormKind {
    pub fn as_str(self) -> &'static str {
        match self {
            FormKind::Contact => "contact",
            FormKind::Newsletter => "newsletter",
        }
    }
}

/// Validated values handed to a [`SubmitHandler`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Submission {
    pub kind: FormKind,
    pub values: FormValues,
}

/// Errors a handler may report.
#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    #[error("Submission rejected: {0}")]
    Rejected(String),

    #[error("Delivery failed: {0}")]
    Delivery(String),
}

/// Receiver of validated form submissions.
pub trait SubmitHandler: Send + Sync {
    /// Handler identifier for logs
    fn name(&self) -> &'static str;

    /// Deliver one submission.
    fn submit(&self, submission: &Submission) -> Result<(), SubmitError>;
}

/// Handler that only logs what it receives.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingSubmitHandler;

impl SubmitHandler for LoggingSubmitHandler {
    fn name(&self) -> &'static str {
        "log"
    }

    fn submit(&self, submission: &Submission) -> Result<(), SubmitError> {
        tracing::info!(
            form = submission.kind.as_str(),
            values = ?submission.values,
            "Form submitted"
        );
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Handler that keeps every submission it receives.
    #[derive(Debug, Default)]
    pub(crate) struct RecordingHandler {
        received: Mutex<Vec<Submission>>,
    }

    impl RecordingHandler {
        pub(crate) fn received(&self) -> Vec<Submission> {
            self.received.lock().unwrap().clone()
        }
    }

    impl SubmitHandler for RecordingHandler {
        fn name(&self) -> &'static str {
            "recording"
        }

        fn submit(&self, submission: &Submission) -> Result<(), SubmitError> {
            self.received.lock().unwrap().push(submission.clone());
            Ok(())
        }
    }

    #[test]
    fn logging_handler_accepts_everything() {
        let submission = Submission {
            kind: FormKind::Newsletter,
            values: [("email".to_string(), "a@b.com".to_string())].into(),
        };
        assert!(LoggingSubmitHandler.submit(&submission).is_ok());
    }

    #[test]
    fn form_kind_names() {
        assert_eq!(FormKind::Contact.as_str(), "contact");
        assert_eq!(FormKind::Newsletter.as_str(), "newsletter");
    }
}
