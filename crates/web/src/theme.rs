//! Light/dark theme state and the toggle's transition timeline.

use std::sync::Mutex;
use std::time::Duration;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}

/// Easing curves used by the toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Easing {
    /// Quadratic ease-in-out.
    #[serde(rename = "power2.inOut")]
    Power2InOut,
    /// Overshooting ease-out (overshoot 1.7).
    #[serde(rename = "back.out(1.7)")]
    BackOut,
}

impl Easing {
    /// CSS timing function approximating the curve.
    pub fn css(&self) -> &'static str {
        match self {
            Easing::Power2InOut => "cubic-bezier(0.455, 0.03, 0.515, 0.955)",
            Easing::BackOut => "cubic-bezier(0.175, 0.885, 0.32, 1.275)",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColorTween {
    pub to: &'static str,
    pub duration: Duration,
    pub ease: Easing,
}

impl ColorTween {
    /// CSS `transition` value animating `property` along this tween.
    pub fn transition_css(&self, property: &str) -> String {
        format!("{property} {}ms {}", self.duration.as_millis(), self.ease.css())
    }
}

/// Icon spin with a scale pulse that plays forward then back once.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IconTween {
    pub rotation_deg: f32,
    pub pulse_scale: f32,
    /// Scale applied once the pulse completes.
    pub settle_scale: f32,
    pub duration: Duration,
    pub ease: Easing,
    pub yoyo: bool,
    pub repeat: u32,
}

impl IconTween {
    /// CSS `transform` for the icon, mid-pulse or settled.
    pub fn transform_css(&self, pulsing: bool) -> String {
        let scale = if pulsing { self.pulse_scale } else { self.settle_scale };
        format!("rotate({}deg) scale({})", self.rotation_deg, scale)
    }

    /// Wall-clock length including the yoyo leg(s).
    pub fn total_duration(&self) -> Duration {
        self.duration * (self.repeat + 1)
    }
}

/// The full timeline played when the toggle is pressed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToggleAnimation {
    pub track: ColorTween,
    pub icon: IconTween,
    pub page: ColorTween,
}

const TRACK_DARK: &str = "#374151";
const TRACK_LIGHT: &str = "#e5e7eb";
const PAGE_DARK: &str = "#0f172a";
const PAGE_LIGHT: &str = "#ffffff";

impl ToggleAnimation {
    /// Timeline for leaving `from` (i.e. switching to `from.toggled()`).
    pub fn for_transition(from: Theme) -> Self {
        let to_dark = from == Theme::Light;

        Self {
            track: ColorTween {
                to: if to_dark { TRACK_DARK } else { TRACK_LIGHT },
                duration: Duration::from_millis(300),
                ease: Easing::Power2InOut,
            },
            icon: IconTween {
                rotation_deg: if to_dark { 180.0 } else { 0.0 },
                pulse_scale: 0.8,
                settle_scale: 1.0,
                duration: Duration::from_millis(400),
                ease: Easing::BackOut,
                yoyo: true,
                repeat: 1,
            },
            page: ColorTween {
                to: if to_dark { PAGE_DARK } else { PAGE_LIGHT },
                duration: Duration::from_millis(300),
                ease: Easing::Power2InOut,
            },
        }
    }
}

/// Resting look of the toggle for a theme (no animation).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToggleAppearance {
    pub track_color: &'static str,
    pub icon_rotation_deg: u16,
    pub icon: ThemeIcon,
    pub icon_class: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeIcon {
    Sun,
    Moon,
}

impl ToggleAppearance {
    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Light => Self {
                track_color: TRACK_LIGHT,
                icon_rotation_deg: 0,
                icon: ThemeIcon::Sun,
                icon_class: "text-gray-600",
            },
            Theme::Dark => Self {
                track_color: TRACK_DARK,
                icon_rotation_deg: 180,
                icon: ThemeIcon::Moon,
                icon_class: "text-yellow-400",
            },
        }
    }
}

/// Owner of the current theme, injected where the toggle is built.
pub trait ThemeSource {
    fn current(&self) -> Theme;

    /// Flip the theme and return the new value.
    fn toggle(&self) -> Theme;
}

#[derive(Debug, Default)]
pub struct ThemeState {
    theme: Mutex<Theme>,
}

impl ThemeState {
    pub fn new(theme: Theme) -> Self {
        Self {
            theme: Mutex::new(theme),
        }
    }
}

impl ThemeSource for ThemeState {
    fn current(&self) -> Theme {
        // A poisoned lock still holds a valid theme.
        match self.theme.lock() {
            Ok(guard) => *guard,
            Err(poisoned) => *poisoned.into_inner(),
        }
    }

    fn toggle(&self) -> Theme {
        let mut guard = match self.theme.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        *guard = guard.toggled();
        tracing::debug!(theme = guard.as_str(), "theme toggled");
        *guard
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggling_twice_restores_theme() {
        let state = ThemeState::default();
        assert_eq!(state.current(), Theme::Light);
        assert_eq!(state.toggle(), Theme::Dark);
        assert_eq!(state.toggle(), Theme::Light);
    }

    #[test]
    fn switching_to_dark_darkens_track_and_page() {
        let anim = ToggleAnimation::for_transition(Theme::Light);
        assert_eq!(anim.track.to, "#374151");
        assert_eq!(anim.page.to, "#0f172a");
        assert_eq!(anim.icon.rotation_deg, 180.0);
        assert_eq!(anim.track.duration, Duration::from_millis(300));
    }

    #[test]
    fn switching_to_light_resets_rotation() {
        let anim = ToggleAnimation::for_transition(Theme::Dark);
        assert_eq!(anim.track.to, "#e5e7eb");
        assert_eq!(anim.page.to, "#ffffff");
        assert_eq!(anim.icon.rotation_deg, 0.0);
    }

    #[test]
    fn icon_pulse_plays_there_and_back() {
        let icon = ToggleAnimation::for_transition(Theme::Light).icon;
        assert!(icon.yoyo);
        assert_eq!(icon.pulse_scale, 0.8);
        assert_eq!(icon.settle_scale, 1.0);
        assert_eq!(icon.total_duration(), Duration::from_millis(800));
    }

    #[test]
    fn css_values_follow_the_timeline() {
        let anim = ToggleAnimation::for_transition(Theme::Light);
        assert_eq!(
            anim.track.transition_css("background-color"),
            "background-color 300ms cubic-bezier(0.455, 0.03, 0.515, 0.955)"
        );
        assert_eq!(anim.icon.transform_css(true), "rotate(180deg) scale(0.8)");
        assert_eq!(anim.icon.transform_css(false), "rotate(180deg) scale(1)");
    }

    #[test]
    fn resting_appearance_matches_theme() {
        let dark = ToggleAppearance::for_theme(Theme::Dark);
        assert_eq!(dark.icon, ThemeIcon::Moon);
        assert_eq!(dark.icon_rotation_deg, 180);
        assert_eq!(ToggleAppearance::for_theme(Theme::Light).track_color, "#e5e7eb");
    }

    #[test]
    fn easing_serializes_by_curve_name() {
        let json = serde_json::to_value(Easing::BackOut).unwrap();
        assert_eq!(json, serde_json::json!("back.out(1.7)"));
    }
}
