use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Location {
    pub x: f64,
    pub y: f64,
}

impl Location {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: &Location) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }
}

/// Absolute offset measured in the same units as pixel locations.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Distance {
    pub x: f64,
    pub y: f64,
}

impl Distance {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Polynomial `c0 + c1*x + c2*x^2 + ...`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Equation {
    pub coefficients: Vec<f64>,
}

impl Equation {
    pub fn new(coefficients: impl Into<Vec<f64>>) -> Self {
        Self {
            coefficients: coefficients.into(),
        }
    }

    pub fn eval(&self, x: f64) -> f64 {
        // Horner
        self.coefficients.iter().rev().fold(0.0, |acc, c| acc * x + c)
    }
}

/// Axis aligned box containing every pixel location.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: Location,
    pub max: Location,
}

impl Bounds {
    pub fn of<'a>(locations: impl IntoIterator<Item = &'a Location>) -> Option<Self> {
        locations.into_iter().fold(None, |bounds, l| {
            Some(match bounds {
                None => Bounds { min: *l, max: *l },
                Some(Bounds { min, max }) => Bounds {
                    min: Location::new(min.x.min(l.x), min.y.min(l.y)),
                    max: Location::new(max.x.max(l.x), max.y.max(l.y)),
                },
            })
        })
    }

    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }
}
