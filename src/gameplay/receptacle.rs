//! Geo receptacles
//!
//! A receptacle collects geo pickups until their combined energy matches
//! its target. Pickups stack vertically above the receptacle.

use glam::Vec3;

/// Height of one stacked pickup
const STACK_STEP: f32 = 0.5;
/// Gap between the receptacle and the first pickup
const STACK_BASE: f32 = 1.0;

/// A collectable energy pickup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeoPickup {
    pub energy: i32,
}

impl GeoPickup {
    pub fn new(energy: i32) -> Self {
        Self { energy }
    }
}

#[derive(Debug, Clone)]
pub struct Receptacle {
    id: u32,
    target_energy: i32,
    total_energy: i32,
    target_reached: bool,
    pickups: Vec<GeoPickup>,
}

impl Receptacle {
    pub fn new(id: u32, target_energy: i32) -> Self {
        Self {
            id,
            target_energy,
            total_energy: 0,
            target_reached: target_energy == 0,
            pickups: Vec::new(),
        }
    }

    /// Place a pickup on top of the stack
    pub fn add_pickup(&mut self, pickup: GeoPickup) {
        self.pickups.push(pickup);
        self.total_energy += pickup.energy;
        self.update_status();
    }

    /// Take the top pickup off the stack
    pub fn remove_pickup(&mut self) -> Option<GeoPickup> {
        let pickup = self.pickups.pop()?;
        self.total_energy -= pickup.energy;
        self.update_status();
        Some(pickup)
    }

    /// Where the next pickup should be placed, given the receptacle's position
    pub fn next_open_position(&self, base: Vec3) -> Vec3 {
        let height = (self.pickups.len() as f32 + 1.0) * STACK_STEP + STACK_BASE;
        base + Vec3::new(0.0, height, 0.0)
    }

    pub fn is_empty(&self) -> bool {
        self.pickups.is_empty()
    }

    pub fn target_reached(&self) -> bool {
        self.target_reached
    }

    pub fn total_energy(&self) -> i32 {
        self.total_energy
    }

    pub fn target_energy(&self) -> i32 {
        self.target_energy
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    fn update_status(&mut self) {
        self.target_reached = self.total_energy == self.target_energy;
        log::info!(
            "Receptacle {}: {}/{}",
            self.id,
            self.total_energy,
            self.target_energy
        );
    }
}
