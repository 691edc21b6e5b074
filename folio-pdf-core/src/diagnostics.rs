//! Non-fatal diagnostics raised by dictionary views.
//!
//! Some mutations are legal but probably not what the caller meant, for
//! example replacing a link's action with a destination. Views report these
//! as [`Advisory`] values through a [`DiagnosticSink`] and carry on with the
//! mutation. Hard failures are [`PdfError`](crate::error::PdfError)s instead.

use std::cell::RefCell;
use std::fmt;

/// How loud an advisory is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Info,
    Warning,
}

/// What an advisory is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AdvisoryKind {
    /// A destination was set on a link that had an action; the action was removed.
    DestinationReplacesAction,
    /// An action was set on a link that had a destination; the destination was removed.
    ActionReplacesDestination,
    /// A destination array starts with a page number instead of a page reference.
    InvalidDestinationType,
    /// A value was written that readers are likely to ignore.
    SuspiciousValue,
}

impl AdvisoryKind {
    /// Default severity for this kind.
    pub fn severity(&self) -> Severity {
        match self {
            AdvisoryKind::DestinationReplacesAction
            | AdvisoryKind::ActionReplacesDestination
            | AdvisoryKind::InvalidDestinationType => Severity::Warning,
            AdvisoryKind::SuspiciousValue => Severity::Info,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Advisory {
    pub kind: AdvisoryKind,
    pub severity: Severity,
    pub message: String,
}

impl Advisory {
    pub fn new(kind: AdvisoryKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            severity: kind.severity(),
            message: message.into(),
        }
    }
}

impl fmt::Display for Advisory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}: {}", self.severity, self.message)
    }
}

/// Receiver for advisories.
///
/// Reporting must not fail or block; implementations that buffer use interior
/// mutability so views can report through a shared reference.
pub trait DiagnosticSink {
    fn report(&self, advisory: Advisory);
}

/// Forwards advisories to `tracing` at the matching level.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn report(&self, advisory: Advisory) {
        match advisory.severity {
            Severity::Warning => {
                tracing::warn!(kind = ?advisory.kind, "{}", advisory.message)
            }
            Severity::Info => {
                tracing::info!(kind = ?advisory.kind, "{}", advisory.message)
            }
        }
    }
}

static TRACING_SINK: TracingSink = TracingSink;

/// The sink views use when none is given.
pub fn tracing_sink() -> &'static TracingSink {
    &TRACING_SINK
}

/// Keeps every advisory it receives, in order.
#[derive(Debug, Default)]
pub struct CollectingSink {
    advisories: RefCell<Vec<Advisory>>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the advisories received so far.
    pub fn advisories(&self) -> Vec<Advisory> {
        self.advisories.borrow().clone()
    }

    pub fn kinds(&self) -> Vec<AdvisoryKind> {
        self.advisories.borrow().iter().map(|a| a.kind).collect()
    }

    pub fn len(&self) -> usize {
        self.advisories.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.advisories.borrow().is_empty()
    }

    /// Drains the received advisories.
    pub fn take(&self) -> Vec<Advisory> {
        self.advisories.take()
    }
}

impl DiagnosticSink for CollectingSink {
    fn report(&self, advisory: Advisory) {
        self.advisories.borrow_mut().push(advisory);
    }
}
