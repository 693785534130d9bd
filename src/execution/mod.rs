//! Alert check execution, lookup resolution, and interval scheduling

pub mod executor;
pub mod lookup;
pub mod runner;
pub mod state;

pub use executor::{AlertCheck, AlertExecutor, CheckError};
pub use lookup::LookupResolver;
pub use runner::AlertRunner;
pub use state::AlertState;
