use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::ContractViolation;

/// Number of steps in every layer's explanation sequence.
pub const STEPS_PER_SEQUENCE: u8 = 4;

/// Points awarded for each completed sequence, repeats included.
pub const POINTS_PER_SEQUENCE: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Layer {
    Perception,
    Network,
    Middleware,
    Application,
}

impl Layer {
    /// Every layer in unlock order.
    pub const ALL: [Layer; 4] = [
        Layer::Perception,
        Layer::Network,
        Layer::Middleware,
        Layer::Application,
    ];

    /// The layer unlocked by completing this one, if any.
    pub fn successor(self) -> Option<Layer> {
        match self {
            Layer::Perception => Some(Layer::Network),
            Layer::Network => Some(Layer::Middleware),
            Layer::Middleware => Some(Layer::Application),
            Layer::Application => None,
        }
    }

    pub fn id(self) -> &'static str {
        match self {
            Layer::Perception => "perception",
            Layer::Network => "network",
            Layer::Middleware => "middleware",
            Layer::Application => "application",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Layer::Perception => "Perception",
            Layer::Network => "Network",
            Layer::Middleware => "Middleware",
            Layer::Application => "Application",
        }
    }

    /// Where the layer lives on the city map.
    pub fn district(self) -> &'static str {
        match self {
            Layer::Perception => "Underground",
            Layer::Network => "Streets",
            Layer::Middleware => "Buildings",
            Layer::Application => "City Center",
        }
    }

    pub fn role(self) -> &'static str {
        match self {
            Layer::Perception => "sensors and data collection",
            Layer::Network => "data transmission",
            Layer::Middleware => "data processing",
            Layer::Application => "data visualization",
        }
    }

    fn bit(self) -> u8 {
        1 << (self as u8)
    }
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Layer {
    type Err = ContractViolation;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let trimmed = raw.trim();
        Layer::ALL
            .into_iter()
            .find(|layer| layer.id().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ContractViolation::UnknownLayer(raw.to_string()))
    }
}

/// Position within a layer's four-step sequence, always in `0..=3`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Step(u8);

impl Step {
    pub const FIRST: Step = Step(0);
    pub const LAST: Step = Step(STEPS_PER_SEQUENCE - 1);

    pub fn new(index: u8) -> Result<Self, ContractViolation> {
        if index < STEPS_PER_SEQUENCE {
            Ok(Self(index))
        } else {
            Err(ContractViolation::StepOutOfRange(index))
        }
    }

    pub fn index(self) -> u8 {
        self.0
    }

    /// The following step, or `None` once the sequence is on its last step.
    pub fn next(self) -> Option<Step> {
        if self.is_last() {
            None
        } else {
            Some(Self(self.0 + 1))
        }
    }

    pub fn is_last(self) -> bool {
        self == Self::LAST
    }

    /// Share of the sequence shown once this step is on screen: 25, 50, 75, 100.
    pub fn progress_percent(self) -> u8 {
        (self.0 + 1) * (100 / STEPS_PER_SEQUENCE)
    }

    /// One-based step number for display ("Step 2 of 4").
    pub fn ordinal(self) -> u8 {
        self.0 + 1
    }
}

impl TryFrom<u8> for Step {
    type Error = ContractViolation;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Step::new(value)
    }
}

impl From<Step> for u8 {
    fn from(step: Step) -> Self {
        step.0
    }
}

/// Set of layers, iterated in unlock order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "Vec<Layer>", into = "Vec<Layer>")]
pub struct LayerSet(u8);

impl LayerSet {
    pub fn empty() -> Self {
        Self(0)
    }

    pub fn contains(&self, layer: Layer) -> bool {
        self.0 & layer.bit() != 0
    }

    /// Adds `layer`, returning `true` if it was not already present.
    pub fn insert(&mut self, layer: Layer) -> bool {
        let added = !self.contains(layer);
        self.0 |= layer.bit();
        added
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn is_superset(&self, other: &LayerSet) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn iter(&self) -> impl Iterator<Item = Layer> + '_ {
        Layer::ALL.into_iter().filter(|layer| self.contains(*layer))
    }
}

impl FromIterator<Layer> for LayerSet {
    fn from_iter<I: IntoIterator<Item = Layer>>(iter: I) -> Self {
        let mut set = LayerSet::empty();
        for layer in iter {
            set.insert(layer);
        }
        set
    }
}

impl From<Vec<Layer>> for LayerSet {
    fn from(layers: Vec<Layer>) -> Self {
        layers.into_iter().collect()
    }
}

impl From<LayerSet> for Vec<Layer> {
    fn from(set: LayerSet) -> Self {
        set.iter().collect()
    }
}

/// Milestones surfaced to the player as achievement labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Achievement {
    Unlocked(Layer),
    Mastered(Layer),
}

impl Achievement {
    pub fn label(self) -> String {
        match self {
            Achievement::Unlocked(layer) => format!("{} Layer Unlocked!", layer.title()),
            Achievement::Mastered(layer) => format!("{} Master", layer.title()),
        }
    }
}

impl fmt::Display for Achievement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}
