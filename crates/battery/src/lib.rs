//! Battery information library.
//!
//! [`Manager`] enumerates the system's batteries; each [`Battery`] is a
//! point-in-time snapshot whose accessors keep returning the same values
//! until it is refreshed through the manager:
//!
//! ```no_run
//! use battery::Manager;
//!
//! # fn main() -> battery::Result<()> {
//! let manager = Manager::new()?;
//! for mut battery in manager.batteries()? {
//!     println!("{:?}: {:.1}%", battery.state(), battery.state_of_charge());
//!     manager.refresh(&mut battery)?;
//! }
//! # Ok(())
//! # }
//! ```
//!
//! Battery ordering is not guaranteed and may change between enumerations.
//!
//! The built-in backend reads the Linux `power_supply` sysfs class. On other
//! platforms `Manager::new` fails with [`Error::Unsupported`]; prebuilt
//! backends for those are distributed separately (see the `battery_dist`
//! crate).

pub mod battery;
pub mod error;
pub mod manager;
pub mod state;
mod sysfs;
pub mod technology;

pub use crate::battery::Battery;
pub use error::{Error, Result};
pub use manager::Manager;
pub use state::State;
pub use technology::Technology;
