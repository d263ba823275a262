//! Gameplay logic
//!
//! Engine-independent rules behind GeoBlade's world objects. The host
//! engine feeds positions, contacts and time in and applies the results.

pub mod damage;
pub mod droid;
pub mod receptacle;

pub use damage::{DamageCollider, DamageDealt, Damageable};
pub use droid::{DroidCommand, DroidController, DroidParams};
pub use receptacle::{GeoPickup, Receptacle};
