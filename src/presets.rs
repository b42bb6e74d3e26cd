use crate::animation::AnimationRequest;
use crate::color::PackedColor;
use crate::location::{Distance, Equation, Location};

pub const SAVED_WAVE_KEY: &str = "savedwave";

/// Buttons shown under the spiral, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    Ripple,
    SaveWave,
    StartWave,
    Wave,
    PlaneRun,
    Parabola,
    Cubic,
    Runway,
    Color,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PresetAction {
    Run(AnimationRequest),
    Save(AnimationRequest),
    StartSaved(String),
}

impl Preset {
    pub const ALL: [Preset; 9] = [
        Preset::Ripple,
        Preset::SaveWave,
        Preset::StartWave,
        Preset::Wave,
        Preset::PlaneRun,
        Preset::Parabola,
        Preset::Cubic,
        Preset::Runway,
        Preset::Color,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Preset::Ripple => "Ripple",
            Preset::SaveWave => "Save wave",
            Preset::StartWave => "Start wave",
            Preset::Wave => "Wave",
            Preset::PlaneRun => "Plane Run",
            Preset::Parabola => "x^2",
            Preset::Cubic => "x^3",
            Preset::Runway => "Runway",
            Preset::Color => "Color",
        }
    }

    /// Builds the request for this button. Random colors are resolved here,
    /// so a saved request replays with the same color.
    pub fn action(self, center: Location) -> PresetAction {
        match self {
            Preset::Ripple => PresetAction::Run(
                AnimationRequest::new("Ripple")
                    .color(PackedColor::random())
                    .location_param("center", center),
            ),
            Preset::SaveWave => PresetAction::Save(wave().id(SAVED_WAVE_KEY)),
            Preset::StartWave => PresetAction::StartSaved(SAVED_WAVE_KEY.to_string()),
            Preset::Wave => PresetAction::Run(wave()),
            Preset::PlaneRun => PresetAction::Run(
                AnimationRequest::new("Plane Run")
                    .color(PackedColor::random())
                    .double_param("movementPerIteration", 10.0)
                    .int_param("interMovementDelay", 30),
            ),
            Preset::Parabola => PresetAction::Run(meteor(
                Equation::new([0.0, 0.0, 0.01]),
                Distance::new(350.0, 100.0),
            )),
            Preset::Cubic => PresetAction::Run(meteor(
                Equation::new([0.0, 0.0, 0.0, 0.00005]),
                Distance::new(350.0, 350.0),
            )),
            Preset::Runway => PresetAction::Run(
                AnimationRequest::new("Runway Lights")
                    .equation_param("lineEquation", Equation::new([0.0, 1.0]))
                    .int_param("interMovementDelay", 30)
                    .double_param("maximumInfluence", 50.0)
                    .double_param("movementPerIteration", 25.0)
                    .double_param("spacing", 200.0)
                    .int_param("interMovementDelay", 100)
                    .add_color(PackedColor::random()),
            ),
            Preset::Color => {
                PresetAction::Run(AnimationRequest::new("Color").color(PackedColor::random()))
            }
        }
    }
}

fn wave() -> AnimationRequest {
    AnimationRequest::new("Wave")
        .color(PackedColor::random())
        .double_param("movementPerIteration", 10.0)
        .int_param("interMovementDelay", 30)
}

fn meteor(line: Equation, offset: Distance) -> AnimationRequest {
    AnimationRequest::new("Meteor")
        .equation_param("lineEquation", line)
        .distance_param("offset", offset)
        .int_param("interMovementDelay", 30)
        .double_param("maximumInfluence", 100.0)
        .double_param("movementPerIteration", 10.0)
        .add_color(PackedColor::random())
}
