use super::request::AnimationRequest;
use crate::color::PackedColor;
use crate::error::EmulatorError;
use crate::location::{Bounds, Distance, Equation, Location};
use crate::strip::EmulatedStrip;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;

const DEFAULT_DELAY_MS: i64 = 10;
const DEFAULT_MOVEMENT: f64 = 10.0;
const DEFAULT_INFLUENCE: f64 = 30.0;
const DEFAULT_SPACING: f64 = 100.0;

/// Upper bound on the iterations of a single animation.
const MAX_STEPS: usize = 100_000;

const TRAIL_DECAY: f64 = 0.75;
const TRAIL_CUTOFF: f64 = 0.02;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationKind {
    Color,
    Wave,
    PlaneRun,
    Ripple,
    Meteor,
    RunwayLights,
}

impl AnimationKind {
    pub const ALL: [AnimationKind; 6] = [
        AnimationKind::Color,
        AnimationKind::Wave,
        AnimationKind::PlaneRun,
        AnimationKind::Ripple,
        AnimationKind::Meteor,
        AnimationKind::RunwayLights,
    ];

    pub fn name(self) -> &'static str {
        match self {
            AnimationKind::Color => "Color",
            AnimationKind::Wave => "Wave",
            AnimationKind::PlaneRun => "Plane Run",
            AnimationKind::Ripple => "Ripple",
            AnimationKind::Meteor => "Meteor",
            AnimationKind::RunwayLights => "Runway Lights",
        }
    }
}

impl FromStr for AnimationKind {
    type Err = EmulatorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AnimationKind::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| EmulatorError::UnknownAnimation(s.to_string()))
    }
}

/// A request resolved against a strip: every parameter checked and defaulted.
#[derive(Debug, Clone)]
pub struct Animation {
    kind: AnimationKind,
    color: PackedColor,
    delay: Duration,
    movement: f64,
    influence: f64,
    spacing: f64,
    center: Location,
    offset: Distance,
    equation: Equation,
    steps: usize,
}

fn positive(name: &str, value: f64) -> Result<f64, EmulatorError> {
    if value > 0.0 && value.is_finite() {
        Ok(value)
    } else {
        Err(EmulatorError::InvalidParameter {
            name: name.to_string(),
            value,
        })
    }
}

impl Animation {
    pub fn from_request(request: &AnimationRequest, strip: &EmulatedStrip) -> Result<Self, EmulatorError> {
        let kind: AnimationKind = request.animation.parse()?;

        let delay_ms = request.int_or("interMovementDelay", DEFAULT_DELAY_MS);
        if delay_ms < 0 {
            return Err(EmulatorError::InvalidParameter {
                name: "interMovementDelay".to_string(),
                value: delay_ms as f64,
            });
        }

        let default_center = strip
            .bounds()
            .map(|b| Location::new((b.min.x + b.max.x) / 2.0, (b.min.y + b.max.y) / 2.0))
            .unwrap_or_default();

        let mut animation = Self {
            kind,
            color: request.primary_color(),
            delay: Duration::from_millis(delay_ms as u64),
            movement: positive(
                "movementPerIteration",
                request.double_or("movementPerIteration", DEFAULT_MOVEMENT),
            )?,
            influence: positive(
                "maximumInfluence",
                request.double_or("maximumInfluence", DEFAULT_INFLUENCE),
            )?,
            spacing: positive("spacing", request.double_or("spacing", DEFAULT_SPACING))?,
            center: request.location_or("center", default_center),
            offset: request.distance_or("offset", Distance::default()),
            equation: request.equation_or("lineEquation", Equation::new([0.0])),
            steps: 0,
        };
        animation.steps = animation.step_count(strip)?;
        Ok(animation)
    }

    pub fn kind(&self) -> AnimationKind {
        self.kind
    }

    pub async fn run(self, strip: Arc<EmulatedStrip>) {
        let Some(bounds) = strip.bounds() else {
            return;
        };

        match self.kind {
            AnimationKind::Color => strip.fill(self.color),
            AnimationKind::PlaneRun => self.run_plane(&strip, &bounds).await,
            _ => self.run_with_trail(&strip, &bounds).await,
        }
    }

    async fn run_plane(&self, strip: &EmulatedStrip, bounds: &Bounds) {
        for step in 0..self.steps {
            let plane = bounds.min.x + step as f64 * self.movement;
            for (i, l) in strip.locations().iter().enumerate() {
                if l.x <= plane {
                    strip.set_pixel_color(i, self.color);
                }
            }
            sleep(self.delay).await;
        }
    }

    async fn run_with_trail(&self, strip: &EmulatedStrip, bounds: &Bounds) {
        let mut trail = Trail::new(strip.num_pixels());

        for step in 0..self.steps {
            trail.decay();
            for (i, l) in strip.locations().iter().enumerate() {
                trail.light(i, self.influence_at(step, l, bounds));
            }
            trail.write(strip, self.color);
            sleep(self.delay).await;
        }

        while trail.is_lit() {
            trail.decay();
            trail.write(strip, self.color);
            sleep(self.delay).await;
        }
    }

    /// Number of movement steps needed to sweep the strip, capped at `MAX_STEPS`.
    fn step_count(&self, strip: &EmulatedStrip) -> Result<usize, EmulatorError> {
        let Some(bounds) = strip.bounds() else {
            return Ok(0);
        };
        let (name, value, travel) = match self.kind {
            AnimationKind::Color => return Ok(0),
            AnimationKind::PlaneRun => ("movementPerIteration", self.movement, bounds.width()),
            AnimationKind::Ripple => {
                let farthest = strip
                    .locations()
                    .iter()
                    .map(|l| l.distance_to(&self.center))
                    .fold(0.0, f64::max);
                ("center", farthest, farthest + self.influence)
            }
            AnimationKind::RunwayLights => {
                ("spacing", self.spacing, bounds.width().max(self.spacing))
            }
            AnimationKind::Wave | AnimationKind::Meteor => (
                "maximumInfluence",
                self.influence,
                bounds.width() + 2.0 * self.influence,
            ),
        };
        if !travel.is_finite() {
            return Err(EmulatorError::InvalidParameter {
                name: name.to_string(),
                value,
            });
        }

        let steps = (travel / self.movement).ceil() + 1.0;
        if steps.is_finite() && steps <= MAX_STEPS as f64 {
            Ok(steps as usize)
        } else {
            Err(EmulatorError::InvalidParameter {
                name: "movementPerIteration".to_string(),
                value: self.movement,
            })
        }
    }

    /// Brightness in `[0, 1]` of the pixel at `l` during `step`.
    fn influence_at(&self, step: usize, l: &Location, bounds: &Bounds) -> f64 {
        let travelled = step as f64 * self.movement;
        let distance = match self.kind {
            AnimationKind::Wave => (l.x - (bounds.min.x - self.influence + travelled)).abs(),
            AnimationKind::Ripple => (l.distance_to(&self.center) - travelled).abs(),
            AnimationKind::Meteor => {
                let x = bounds.min.x - self.influence + travelled;
                l.distance_to(&self.on_line(x))
            }
            AnimationKind::RunwayLights => {
                let pos = l.x - bounds.min.x - travelled;
                let nearest = pos - self.spacing * (pos / self.spacing).round();
                l.distance_to(&self.on_line(l.x - nearest))
            }
            AnimationKind::Color | AnimationKind::PlaneRun => return 0.0,
        };
        (1.0 - distance / self.influence).max(0.0)
    }

    fn on_line(&self, x: f64) -> Location {
        Location::new(x, self.equation.eval(x - self.offset.x) + self.offset.y)
    }
}

/// Per-pixel brightness left behind by a moving animation.
struct Trail {
    levels: Vec<f64>,
    cleared: Vec<usize>,
}

impl Trail {
    fn new(num_pixels: usize) -> Self {
        Self {
            levels: vec![0.0; num_pixels],
            cleared: Vec::new(),
        }
    }

    fn decay(&mut self) {
        for (i, level) in self.levels.iter_mut().enumerate() {
            if *level == 0.0 {
                continue;
            }
            *level *= TRAIL_DECAY;
            if *level < TRAIL_CUTOFF {
                *level = 0.0;
                self.cleared.push(i);
            }
        }
    }

    fn light(&mut self, index: usize, level: f64) {
        if let Some(current) = self.levels.get_mut(index) {
            if level > *current {
                *current = level;
            }
        }
    }

    fn is_lit(&self) -> bool {
        self.levels.iter().any(|l| *l > 0.0)
    }

    fn write(&mut self, strip: &EmulatedStrip, color: PackedColor) {
        for i in self.cleared.drain(..) {
            if self.levels[i] == 0.0 {
                strip.set_pixel_color(i, PackedColor::BLACK);
            }
        }
        for (i, level) in self.levels.iter().enumerate() {
            if *level > 0.0 {
                strip.set_pixel_color(i, color.scaled(*level));
            }
        }
    }
}
