//! Security droid chase/attack logic
//!
//! Decides each frame whether the droid faces, chases or attacks its target.
//! Movement integration, turn smoothing and animation stay with the host;
//! this only produces the command for the frame.

use glam::Vec3;

/// Sound event posted by the host when the droid attacks
pub const ATTACK_EVENT: &str = "Security_Droid_Attack";

#[derive(Debug, Clone, PartialEq)]
pub struct DroidParams {
    pub movement_speed: f32,
    pub chase_radius: f32,
    pub attack_radius: f32,
    /// Seconds between attacks while in range
    pub attack_cooldown: f32,
    /// Seconds after entering attack range before the first attack
    pub attack_grace_period: f32,
    pub attack_damage: f32,
}

impl Default for DroidParams {
    fn default() -> Self {
        Self {
            movement_speed: 2.0,
            chase_radius: 10.0,
            attack_radius: 5.0,
            attack_cooldown: 3.0,
            attack_grace_period: 1.0,
            attack_damage: 10.0,
        }
    }
}

/// What the droid does this frame
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DroidCommand {
    /// Yaw in degrees the droid should turn towards
    pub facing: Option<f32>,
    /// Velocity to move with
    pub movement: Option<Vec3>,
    /// Damage to deal to the target
    pub attack: Option<f32>,
    /// New value for the animator's fighting flag, `None` to leave it as is
    pub fighting: Option<bool>,
}

#[derive(Debug, Clone)]
pub struct DroidController {
    params: DroidParams,
    aggro: bool,
    in_attack_range: bool,
    next_attack: f32,
}

impl DroidController {
    pub fn new(params: DroidParams) -> Self {
        Self {
            params,
            aggro: false,
            in_attack_range: false,
            next_attack: 0.0,
        }
    }

    pub fn set_aggro(&mut self, aggro: bool) {
        self.aggro = aggro;
    }

    pub fn is_aggro(&self) -> bool {
        self.aggro
    }

    pub fn params(&self) -> &DroidParams {
        &self.params
    }

    /// Compute the command for a frame at time `now` (seconds)
    pub fn update(&mut self, now: f32, position: Vec3, target: Vec3) -> DroidCommand {
        let distance = position.distance(target);
        if distance > self.params.chase_radius {
            return DroidCommand {
                fighting: Some(false),
                ..DroidCommand::default()
            };
        }

        let direction = (target - position).normalize_or_zero();
        let mut command = DroidCommand {
            facing: Some(direction.x.atan2(direction.z).to_degrees()),
            ..DroidCommand::default()
        };

        if !self.aggro {
            return command;
        }
        command.fighting = Some(true);

        if distance <= self.params.attack_radius {
            if !self.in_attack_range {
                self.next_attack = now + self.params.attack_grace_period;
            }
            self.in_attack_range = true;

            if now >= self.next_attack {
                log::debug!("Droid attacks for {}", self.params.attack_damage);
                command.attack = Some(self.params.attack_damage);
                self.next_attack = now + self.params.attack_cooldown;
            }
        } else {
            self.in_attack_range = false;
            let speed = self.params.movement_speed;
            command.movement = Some(Vec3::new(direction.x * speed, direction.y, direction.z * speed));
        }

        command
    }
}

impl Default for DroidController {
    fn default() -> Self {
        Self::new(DroidParams::default())
    }
}
