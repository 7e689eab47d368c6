//! Editor tunables.
//!
//! Everything here has a sensible default; hosts override individual fields
//! (the CLI maps its flags and environment variables onto this struct).

/// Tunable limits for viewport scaling and keyboard interaction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EditorConfig {
    /// Upper bound on the fit-to-container scale factor.
    pub max_zoom: f64,
    /// Lower bound on the effective scale factor.
    pub min_scale: f64,
    /// Arrow-key nudge distance in canvas pixels.
    pub nudge_step: f64,
    /// Shift+arrow nudge distance in canvas pixels.
    pub nudge_step_large: f64,
    /// Lower bound on the user zoom multiplier.
    pub min_user_zoom: f64,
    /// Upper bound on the user zoom multiplier.
    pub max_user_zoom: f64,
    /// Multiplicative step applied per wheel notch when zooming.
    pub wheel_zoom_step: f64,
    /// Angle in degrees the rotate handle snaps to while Shift is held.
    pub rotation_snap_deg: f64,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            max_zoom: 2.0,
            min_scale: 0.2,
            nudge_step: 1.0,
            nudge_step_large: 10.0,
            min_user_zoom: 0.25,
            max_user_zoom: 4.0,
            wheel_zoom_step: 1.1,
            rotation_snap_deg: 15.0,
        }
    }
}
