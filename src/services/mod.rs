// Author: Dustin Pilgrim
// License: MIT

pub mod clock;
pub mod sink;
