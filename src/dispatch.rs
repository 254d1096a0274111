//! Fire-and-forget device commands.
//!
//! Each request is sent once and never retried. Success has no visible
//! effect; the change shows up on the next status reconciliation. A command
//! rejected by the server is logged at error level, and a transport failure
//! is dropped with a debug line. Nothing reaches the operator's screen.
//!
//! Superseding calls do not cancel earlier ones: every call is its own
//! detached task, so handlers must stay idempotent.

use std::rc::Rc;

use crate::api::{self, transport::get_typed, CommandResponse, Transport};
use crate::error::Result;
use crate::runtime;

/// Who a command is addressed to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CommandTarget {
    Device(String),
    AllDevices,
}

/// One command, built at invocation time and discarded after its response.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CommandRequest {
    target: CommandTarget,
    command: String,
}

impl CommandRequest {
    /// `command` for a single device.
    pub fn device(device_id: impl Into<String>, command: impl Into<String>) -> Self {
        Self {
            target: CommandTarget::Device(device_id.into()),
            command: command.into(),
        }
    }

    /// Fleet-wide connectivity probe. The only command addressed to all devices.
    pub fn ping_all() -> Self {
        Self {
            target: CommandTarget::AllDevices,
            command: "ping".to_string(),
        }
    }

    pub fn target(&self) -> &CommandTarget {
        &self.target
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    /// Request path; identifiers are interpolated without escaping.
    pub fn path(&self) -> String {
        match &self.target {
            CommandTarget::AllDevices => api::PING_ALL_PATH.to_string(),
            CommandTarget::Device(device_id) => api::command_path(device_id, &self.command),
        }
    }
}

/// Result of a command whose response arrived.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CommandOutcome {
    Accepted,
    /// The server answered with a truthy `error` field.
    Rejected(String),
}

pub struct CommandDispatcher<T: Transport> {
    transport: Rc<T>,
}

impl<T: Transport> Clone for CommandDispatcher<T> {
    fn clone(&self) -> Self {
        Self {
            transport: self.transport.clone(),
        }
    }
}

impl<T: Transport> CommandDispatcher<T> {
    pub fn new(transport: Rc<T>) -> Self {
        Self { transport }
    }

    /// Ask the server to probe every device. Returns immediately.
    pub fn ping_all(&self) {
        self.fire(api::PING_ALL_PATH.to_string());
    }

    /// Ask the server to probe one device. Returns immediately.
    pub fn ping_device(&self, device_id: &str) {
        self.fire(api::ping_device_path(device_id));
    }

    /// Send `command` to `device_id`. Returns immediately.
    pub fn send_command(&self, device_id: &str, command: &str) {
        let request = CommandRequest::device(device_id, command);
        let this = self.clone();
        runtime::spawn_detached(async move {
            match this.dispatch(&request).await {
                Ok(CommandOutcome::Accepted) => {
                    tracing::debug!("Command {} accepted", request.path());
                }
                Ok(CommandOutcome::Rejected(message)) => {
                    tracing::error!("Command failed: {}", message);
                }
                Err(e) => {
                    tracing::debug!("Command {} dropped: {}", request.path(), e);
                }
            }
        });
    }

    /// Send one request and classify its response.
    pub async fn dispatch(&self, request: &CommandRequest) -> Result<CommandOutcome> {
        let response: CommandResponse = get_typed(&*self.transport, &request.path()).await?;
        Ok(match response.failure() {
            Some(message) => CommandOutcome::Rejected(message),
            None => CommandOutcome::Accepted,
        })
    }

    /// Probe requests only confirm completion; the body is not inspected.
    fn fire(&self, path: String) {
        let transport = self.transport.clone();
        runtime::spawn_detached(async move {
            match transport.get_json(&path).await {
                Ok(_) => tracing::debug!("Probe {} sent", path),
                Err(e) => tracing::debug!("Probe {} dropped: {}", path, e),
            }
        });
    }
}
