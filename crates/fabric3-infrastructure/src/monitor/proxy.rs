//! Monitor handles
//!
//! A [`Monitor`] is what runtime code holds to emit events: it carries the
//! destination index resolved at creation and drops events below its
//! threshold before anything is rendered.

use std::fmt::Display;
use std::sync::Arc;

use chrono::Local;
use fabric3_domain::Result;
use tracing::warn;

use super::level::MonitorLevel;
use super::router::RingBufferDestinationRouter;

/// Emits monitor events to one destination
#[derive(Clone)]
pub struct Monitor {
    router: Arc<RingBufferDestinationRouter>,
    destination: usize,
    runtime: Arc<str>,
    threshold: MonitorLevel,
}

impl Monitor {
    /// Create a monitor for a named destination
    pub fn new(
        router: Arc<RingBufferDestinationRouter>,
        destination: &str,
        runtime: &str,
        threshold: MonitorLevel,
    ) -> Result<Self> {
        let destination = router.get_destination_index(destination)?;
        Ok(Self {
            router,
            destination,
            runtime: Arc::from(runtime),
            threshold,
        })
    }

    /// Level below which events are dropped
    pub fn threshold(&self) -> MonitorLevel {
        self.threshold
    }

    /// Emit an event; routing failures are logged, never returned
    pub fn log(&self, level: MonitorLevel, template: &str, args: &[&dyn Display]) {
        if !level.is_enabled(self.threshold) {
            return;
        }
        if let Err(e) = self.router.send(
            level,
            self.destination,
            Local::now(),
            &self.runtime,
            template,
            args,
        ) {
            warn!(error = %e, "Monitor event dropped");
        }
    }

    /// Emit a severe event
    pub fn severe(&self, template: &str, args: &[&dyn Display]) {
        self.log(MonitorLevel::Severe, template, args);
    }

    /// Emit a warning
    pub fn warning(&self, template: &str, args: &[&dyn Display]) {
        self.log(MonitorLevel::Warning, template, args);
    }

    /// Emit an informational event
    pub fn info(&self, template: &str, args: &[&dyn Display]) {
        self.log(MonitorLevel::Info, template, args);
    }

    /// Emit a debug event
    pub fn debug(&self, template: &str, args: &[&dyn Display]) {
        self.log(MonitorLevel::Debug, template, args);
    }
}
