//! Controller port — reads and writes device state on the smart-home gateway.

use std::future::Future;

use smarthouse_domain::error::SmartHouseError;
use smarthouse_domain::state::StateSnapshot;
use smarthouse_domain::write_set::DeviceWrite;

/// The smart-home controller API.
///
/// Implementations map every transport or protocol failure to
/// [`SmartHouseError::ControllerUnreachable`].
pub trait Controller {
    /// Read the current value of every device.
    fn fetch(&self) -> impl Future<Output = Result<StateSnapshot, SmartHouseError>> + Send;

    /// Apply a batch of device writes in a single call.
    fn send(
        &self,
        batch: Vec<DeviceWrite>,
    ) -> impl Future<Output = Result<(), SmartHouseError>> + Send;
}

impl<T: Controller + Send + Sync> Controller for std::sync::Arc<T> {
    fn fetch(&self) -> impl Future<Output = Result<StateSnapshot, SmartHouseError>> + Send {
        (**self).fetch()
    }

    fn send(
        &self,
        batch: Vec<DeviceWrite>,
    ) -> impl Future<Output = Result<(), SmartHouseError>> + Send {
        (**self).send(batch)
    }
}
