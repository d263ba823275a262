//! Melee damage delivery
//!
//! A damage collider hits the first damageable object it touches and then
//! disarms until the attack re-arms it.

/// Sound event posted by the host when a hit lands
pub const IMPACT_EVENT: &str = "Player_Attack_Impact";

/// Something with hit points
pub trait Damageable {
    fn name(&self) -> &str;
    fn apply_damage(&mut self, amount: f32);
}

/// Record of a landed hit
#[derive(Debug, Clone, PartialEq)]
pub struct DamageDealt {
    pub target: String,
    pub amount: f32,
    pub sound_event: &'static str,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DamageCollider {
    damage: f32,
    active: bool,
}

impl DamageCollider {
    pub fn new(damage: f32) -> Self {
        Self {
            damage,
            active: true,
        }
    }

    /// Handle a contact reported by the physics engine
    ///
    /// `target` is `None` when the other object cannot take damage.
    pub fn on_contact(&mut self, target: Option<&mut dyn Damageable>) -> Option<DamageDealt> {
        if !self.active {
            return None;
        }
        let target = target?;

        target.apply_damage(self.damage);
        log::debug!("Dealing {} to {}", self.damage, target.name());
        self.active = false;

        Some(DamageDealt {
            target: target.name().to_string(),
            amount: self.damage,
            sound_event: IMPACT_EVENT,
        })
    }

    /// Allow the next contact to deal damage
    pub fn rearm(&mut self) {
        self.active = true;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn damage(&self) -> f32 {
        self.damage
    }
}
