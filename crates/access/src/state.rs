use serde::{Deserialize, Serialize};

use giftshop_core::{Aggregate, DomainError, Event};

/// Aggregate: the persisted "unlocked" flag.
///
/// Once granted it stays granted until explicitly revoked; it never expires.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessState {
    #[serde(default)]
    has_access: bool,
}

impl AccessState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_access(&self) -> bool {
        self.has_access
    }
}

/// Command: SetAccess.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SetAccess {
    pub granted: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessCommand {
    SetAccess(SetAccess),
}

/// Event: AccessSet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessSet {
    pub granted: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccessEvent {
    AccessSet(AccessSet),
}

impl Event for AccessEvent {
    fn event_type(&self) -> &'static str {
        match self {
            AccessEvent::AccessSet(_) => "access.set",
        }
    }

    fn version(&self) -> u32 {
        1
    }
}

impl Aggregate for AccessState {
    type Command = AccessCommand;
    type Event = AccessEvent;
    type Error = DomainError;

    fn apply(&mut self, event: &Self::Event) {
        match event {
            AccessEvent::AccessSet(e) => self.has_access = e.granted,
        }
    }

    fn handle(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        match command {
            AccessCommand::SetAccess(cmd) if cmd.granted == self.has_access => Ok(vec![]),
            AccessCommand::SetAccess(cmd) => Ok(vec![AccessEvent::AccessSet(AccessSet {
                granted: cmd.granted,
            })]),
        }
    }
}
