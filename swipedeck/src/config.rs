// Copyright 2025 the Swipedeck Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Geometry, gesture and timing configuration.
//!
//! The defaults reproduce the reference look: three 320x530 cards fanned 55 points apart,
//! each slot 8% smaller than the one in front of it.

use core::f64::consts::FRAC_PI_8;
use core::time::Duration;

use kurbo::Size;
use thiserror::Error;

/// Errors reported by [`DeckConfig::validate`].
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ConfigError {
    /// The window must hold at least one card.
    #[error("window capacity must be at least 1")]
    ZeroCapacity,

    /// A length, threshold or duration that must be positive is not.
    #[error("`{field}` must be positive and finite, got {value}")]
    NonPositive {
        /// Name of the offending field.
        field: &'static str,
        /// The rejected value.
        value: f64,
    },

    /// A length that may be zero is negative or not finite.
    #[error("`{field}` must be non-negative and finite, got {value}")]
    Negative {
        /// Name of the offending field.
        field: &'static str,
        /// The rejected value.
        value: f64,
    },

    /// The back slot would be drawn at zero or negative scale.
    #[error("scale step {scale_step} leaves slot {slot} with non-positive scale")]
    SlotScale {
        /// Configured scale step.
        scale_step: f64,
        /// First slot whose scale is not positive.
        slot: usize,
    },
}

/// Drag thresholds and fling geometry.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SwipeConfig {
    /// Horizontal travel, in points, beyond which a release dismisses the card.
    pub distance_threshold: f64,
    /// Horizontal release speed, in points per second, beyond which a release dismisses the card.
    pub velocity_threshold: f64,
    /// How far a dismissed card travels past its release point.
    pub fling_distance: f64,
    /// Horizontal travel that produces [`SwipeConfig::rotation_max_angle`].
    ///
    /// Rotation keeps growing past this point; it is a ratio, not a clamp.
    pub rotation_reference: f64,
    /// Rotation, in radians, at [`SwipeConfig::rotation_reference`] points of travel.
    pub rotation_max_angle: f64,
    /// Duration of both the fling and the snap-back.
    pub settle_duration: Duration,
}

impl Default for SwipeConfig {
    fn default() -> Self {
        Self {
            distance_threshold: 100.0,
            velocity_threshold: 500.0,
            fling_distance: 500.0,
            rotation_reference: 200.0,
            rotation_max_angle: FRAC_PI_8,
            settle_duration: Duration::from_millis(300),
        }
    }
}

/// Timings of the stack transitions that follow a dismissal.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TransitionConfig {
    /// Shrink-and-fade of the dismissed card before it is detached.
    pub retire_duration: Duration,
    /// Scale the dismissed card shrinks to.
    pub retire_scale: f64,
    /// Fade-in of a refilled back card.
    pub refill_fade_duration: Duration,
    /// Delay before the refilled card starts fading in.
    pub refill_fade_delay: Duration,
    /// Movement of every card into its new slot.
    pub layout_duration: Duration,
    /// Delay before the promoted card spins its affordance.
    pub affordance_spin_delay: Duration,
    /// Full-turn spin of the promoted card's affordance.
    pub affordance_spin_duration: Duration,
}

impl Default for TransitionConfig {
    fn default() -> Self {
        Self {
            retire_duration: Duration::from_millis(250),
            retire_scale: 0.8,
            refill_fade_duration: Duration::from_millis(250),
            refill_fade_delay: Duration::from_millis(200),
            layout_duration: Duration::from_millis(300),
            affordance_spin_delay: Duration::from_millis(200),
            affordance_spin_duration: Duration::from_secs(1),
        }
    }
}

/// Configuration of a card stack.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DeckConfig {
    /// Maximum number of cards on screen.
    pub capacity: usize,
    /// Width of the hosting viewport; cards are centered horizontally in it.
    pub viewport_width: f64,
    /// Card width.
    pub card_width: f64,
    /// Card height.
    pub card_height: f64,
    /// Top edge of the front card.
    pub base_y: f64,
    /// Vertical distance between consecutive slots.
    pub slot_spacing: f64,
    /// Scale lost per slot behind the front.
    pub scale_step: f64,
    /// Vertical distance per existing card at which a refilled card first appears.
    pub entry_spacing: f64,
    /// Drag thresholds and fling geometry.
    pub swipe: SwipeConfig,
    /// Transition timings.
    pub transitions: TransitionConfig,
}

impl Default for DeckConfig {
    fn default() -> Self {
        Self {
            capacity: 3,
            viewport_width: 390.0,
            card_width: 320.0,
            card_height: 530.0,
            base_y: 100.0,
            slot_spacing: 55.0,
            scale_step: 0.08,
            entry_spacing: 65.0,
            swipe: SwipeConfig::default(),
            transitions: TransitionConfig::default(),
        }
    }
}

impl DeckConfig {
    /// Card size.
    pub fn card_size(&self) -> Size {
        Size::new(self.card_width, self.card_height)
    }

    /// Horizontal center of every slot.
    pub fn center_x(&self) -> f64 {
        self.viewport_width / 2.0
    }

    /// Check that the configuration describes a drawable stack.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        let positive = [
            ("viewport_width", self.viewport_width),
            ("card_width", self.card_width),
            ("card_height", self.card_height),
            ("swipe.distance_threshold", self.swipe.distance_threshold),
            ("swipe.velocity_threshold", self.swipe.velocity_threshold),
            ("swipe.fling_distance", self.swipe.fling_distance),
            ("swipe.rotation_reference", self.swipe.rotation_reference),
            ("transitions.retire_scale", self.transitions.retire_scale),
        ];
        for (field, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::NonPositive { field, value });
            }
        }
        let non_negative = [
            ("base_y", self.base_y),
            ("slot_spacing", self.slot_spacing),
            ("scale_step", self.scale_step),
            ("entry_spacing", self.entry_spacing),
        ];
        for (field, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(ConfigError::Negative { field, value });
            }
        }
        if !self.swipe.rotation_max_angle.is_finite() {
            return Err(ConfigError::Negative {
                field: "swipe.rotation_max_angle",
                value: self.swipe.rotation_max_angle,
            });
        }
        if let Some(slot) = (0..self.capacity).find(|i| crate::controller::slot_scale(self, *i) <= 0.0)
        {
            return Err(ConfigError::SlotScale {
                scale_step: self.scale_step,
                slot,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert_eq!(DeckConfig::default().validate(), Ok(()));
        assert_eq!(DeckConfig::default().center_x(), 195.0);
        assert_eq!(DeckConfig::default().card_size(), Size::new(320.0, 530.0));
    }

    #[test]
    fn zero_capacity_is_rejected() {
        let cfg = DeckConfig {
            capacity: 0,
            ..Default::default()
        };
        assert_eq!(cfg.validate(), Err(ConfigError::ZeroCapacity));
    }

    #[test]
    fn non_finite_sizes_are_rejected() {
        let cfg = DeckConfig {
            card_height: f64::NAN,
            ..Default::default()
        };
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::NonPositive {
                field: "card_height",
                ..
            })
        ));
        let cfg = DeckConfig {
            slot_spacing: -1.0,
            ..Default::default()
        };
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::Negative {
                field: "slot_spacing",
                ..
            })
        ));
    }

    #[test]
    fn scale_step_must_leave_every_slot_visible() {
        let cfg = DeckConfig {
            capacity: 3,
            scale_step: 0.5,
            ..Default::default()
        };
        assert_eq!(
            cfg.validate(),
            Err(ConfigError::SlotScale {
                scale_step: 0.5,
                slot: 2
            })
        );
    }

    #[test]
    fn error_messages_name_the_field() {
        let err = ConfigError::NonPositive {
            field: "card_width",
            value: 0.0,
        };
        assert_eq!(err.to_string(), "`card_width` must be positive and finite, got 0");
    }
}
