//! Field feature passes.

pub mod lookup;
pub mod required;

pub use lookup::LookupPass;
pub use required::RequiredPass;
