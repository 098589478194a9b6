//! Dispatcher — forwards a write set to the controller as a single batch.

use smarthouse_domain::error::SmartHouseError;
use smarthouse_domain::write_set::{DeviceWrite, WriteSet};

use crate::ports::Controller;

/// Sends device writes to the controller.
pub struct Dispatcher<C> {
    controller: C,
}

impl<C: Controller> Dispatcher<C> {
    /// Create a dispatcher for the given controller.
    pub fn new(controller: C) -> Self {
        Self { controller }
    }

    /// Borrow the underlying controller.
    pub fn controller(&self) -> &C {
        &self.controller
    }

    /// Send every write of `writes` in one controller call.
    ///
    /// An empty write set makes no call. Returns the batch that was sent.
    ///
    /// # Errors
    ///
    /// Propagates the controller error unchanged; the writes are then not
    /// considered applied.
    pub async fn dispatch(&self, writes: WriteSet) -> Result<Vec<DeviceWrite>, SmartHouseError> {
        if writes.is_empty() {
            tracing::debug!("no device changes to dispatch");
            return Ok(Vec::new());
        }

        let batch = writes.into_batch();
        for write in &batch {
            tracing::info!(device = %write.name, value = %write.value, "dispatching device write");
        }
        self.controller.send(batch.clone()).await?;
        Ok(batch)
    }
}
