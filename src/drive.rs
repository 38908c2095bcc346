use crate::config::DriveSettings;

/// Keys held during a tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Controls {
    pub accelerate: bool,
    pub brake: bool,
    pub left: bool,
    pub right: bool,
}

/// The whole mutable state of a demo: how far we've driven, where we sit
/// across the road and how fast we're going.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DriveState {
    pub position: f64,
    pub player_x: f32,
    pub speed: f32,
}

impl DriveState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advances one simulation tick.
    ///
    /// Speed stays within `[0, max_speed]` and `player_x` within
    /// `[-lateral_limit, lateral_limit]` whatever the controls are.
    pub fn step(&mut self, controls: Controls, settings: &DriveSettings) {
        if controls.accelerate {
            self.speed = (self.speed + settings.acceleration).min(settings.max_speed);
        }
        if controls.brake {
            self.speed = (self.speed - settings.deceleration).max(0.0);
        }
        if !controls.accelerate && !controls.brake {
            self.speed *= settings.friction;
        }

        if controls.left {
            self.player_x = (self.player_x - settings.steer_step).max(-settings.lateral_limit);
        }
        if controls.right {
            self.player_x = (self.player_x + settings.steer_step).min(settings.lateral_limit);
        }

        self.position += self.speed as f64;
    }

    pub fn speed_kmh(&self, settings: &DriveSettings) -> i32 {
        (self.speed * settings.kmh_per_unit).round() as i32
    }

    pub fn readout(&self, settings: &DriveSettings) -> String {
        format!("Speed: {} km/h", self.speed_kmh(settings))
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DemoMode;

    const ACCEL: Controls = Controls {
        accelerate: true,
        brake: false,
        left: false,
        right: false,
    };

    fn scene() -> DriveSettings {
        DriveSettings::for_mode(DemoMode::Scene)
    }

    #[test]
    fn acceleration_is_capped_at_max_speed() {
        let settings = scene();
        let mut state = DriveState::new();
        for _ in 0..1000 {
            state.step(ACCEL, &settings);
            assert!(state.speed <= settings.max_speed);
        }
        assert_eq!(state.speed, settings.max_speed);
    }

    #[test]
    fn braking_never_goes_negative() {
        let settings = DriveSettings::for_mode(DemoMode::Combo);
        let mut state = DriveState {
            speed: 1.0,
            ..DriveState::default()
        };
        let brake = Controls {
            brake: true,
            ..Controls::default()
        };
        for _ in 0..10 {
            state.step(brake, &settings);
            assert!(state.speed >= 0.0);
        }
        assert_eq!(state.speed, 0.0);
    }

    #[test]
    fn coasting_decays_speed_by_friction() {
        let settings = scene();
        let mut state = DriveState {
            speed: 4.0,
            ..DriveState::default()
        };
        state.step(Controls::default(), &settings);
        assert!((state.speed - 3.8).abs() < 1e-6);
        assert!((state.position - 3.8).abs() < 1e-6);
    }

    #[test]
    fn both_pedals_apply_in_order() {
        let settings = scene();
        let mut state = DriveState {
            speed: settings.max_speed,
            ..DriveState::default()
        };
        let both = Controls {
            accelerate: true,
            brake: true,
            ..Controls::default()
        };
        state.step(both, &settings);
        assert!((state.speed - (settings.max_speed - settings.deceleration)).abs() < 1e-6);
    }

    #[test]
    fn steering_stays_inside_track() {
        for mode in [DemoMode::Scene, DemoMode::Combo] {
            let settings = DriveSettings::for_mode(mode);
            let mut state = DriveState::new();
            let left = Controls {
                left: true,
                ..Controls::default()
            };
            for _ in 0..10_000 {
                state.step(left, &settings);
                assert!(state.player_x >= -settings.lateral_limit);
            }
            assert_eq!(state.player_x, -settings.lateral_limit);

            let right = Controls {
                right: true,
                ..Controls::default()
            };
            for _ in 0..10_000 {
                state.step(right, &settings);
                assert!(state.player_x <= settings.lateral_limit);
            }
            assert_eq!(state.player_x, settings.lateral_limit);
        }
    }

    #[test]
    fn readout_rounds_to_kmh() {
        let settings = scene();
        let state = DriveState {
            speed: 2.345,
            ..DriveState::default()
        };
        assert_eq!(state.speed_kmh(&settings), 117);
        assert_eq!(state.readout(&settings), "Speed: 117 km/h");
    }

    #[test]
    fn reset_returns_to_rest() {
        let settings = scene();
        let mut state = DriveState::new();
        for _ in 0..20 {
            state.step(ACCEL, &settings);
        }
        state.reset();
        assert_eq!(state, DriveState::default());
    }
}
