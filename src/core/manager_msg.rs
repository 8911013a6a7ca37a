// Author: Dustin Pilgrim
// License: MIT

use tokio::sync::oneshot;

use crate::core::{events::Event, info::InfoSnapshot};

pub type Reply = oneshot::Sender<Result<String, String>>;

/// Everything the daemon loop accepts from the outside world.
///
/// Clock ticks are not here: the loop polls its own clock directly.
#[derive(Debug)]
pub enum ManagerMsg {
    /// A workout command (start/pause/reset/toggle/configure).
    Command { event: Event, reply: Reply },

    GetInfo { reply: oneshot::Sender<InfoSnapshot> },

    ReloadConfig { reply: Reply },

    StopDaemon { reply: Reply },
}
