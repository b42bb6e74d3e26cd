use crate::color::PackedColor;
use crate::location::{Distance, Equation, Location};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A named animation plus every parameter it should run with.
///
/// Built with chained setters, e.g.
/// `AnimationRequest::new("Wave").color(c).double_param("movementPerIteration", 10.0)`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnimationRequest {
    pub animation: String,
    pub id: Option<String>,
    pub colors: Vec<PackedColor>,
    pub int_params: BTreeMap<String, i64>,
    pub double_params: BTreeMap<String, f64>,
    pub location_params: BTreeMap<String, Location>,
    pub distance_params: BTreeMap<String, Distance>,
    pub equation_params: BTreeMap<String, Equation>,
}

impl AnimationRequest {
    pub fn new(animation: impl Into<String>) -> Self {
        Self {
            animation: animation.into(),
            ..Default::default()
        }
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Sets the first color, keeping any others.
    pub fn color(mut self, color: PackedColor) -> Self {
        match self.colors.first_mut() {
            Some(first) => *first = color,
            None => self.colors.push(color),
        }
        self
    }

    pub fn add_color(mut self, color: PackedColor) -> Self {
        self.colors.push(color);
        self
    }

    pub fn int_param(mut self, name: impl Into<String>, value: i64) -> Self {
        self.int_params.insert(name.into(), value);
        self
    }

    pub fn double_param(mut self, name: impl Into<String>, value: f64) -> Self {
        self.double_params.insert(name.into(), value);
        self
    }

    pub fn location_param(mut self, name: impl Into<String>, value: Location) -> Self {
        self.location_params.insert(name.into(), value);
        self
    }

    pub fn distance_param(mut self, name: impl Into<String>, value: Distance) -> Self {
        self.distance_params.insert(name.into(), value);
        self
    }

    pub fn equation_param(mut self, name: impl Into<String>, value: Equation) -> Self {
        self.equation_params.insert(name.into(), value);
        self
    }

    pub fn int_or(&self, name: &str, default: i64) -> i64 {
        self.int_params.get(name).copied().unwrap_or(default)
    }

    pub fn double_or(&self, name: &str, default: f64) -> f64 {
        self.double_params.get(name).copied().unwrap_or(default)
    }

    pub fn location_or(&self, name: &str, default: Location) -> Location {
        self.location_params.get(name).copied().unwrap_or(default)
    }

    pub fn distance_or(&self, name: &str, default: Distance) -> Distance {
        self.distance_params.get(name).copied().unwrap_or(default)
    }

    pub fn equation_or(&self, name: &str, default: Equation) -> Equation {
        self.equation_params.get(name).cloned().unwrap_or(default)
    }

    pub fn primary_color(&self) -> PackedColor {
        self.colors.first().copied().unwrap_or(PackedColor::WHITE)
    }
}
