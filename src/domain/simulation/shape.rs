use bevy::prelude::*;
use rand::Rng;

/// Identity of a combatant. Every entity has exactly one true shape.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Shape {
    Circle,
    Square,
    Triangle,
}

impl Shape {
    pub const ALL: [Shape; 3] = [Shape::Circle, Shape::Square, Shape::Triangle];

    pub fn index(self) -> usize {
        match self {
            Shape::Circle => 0,
            Shape::Square => 1,
            Shape::Triangle => 2,
        }
    }

    pub fn random(rng: &mut impl Rng) -> Self {
        Self::ALL[rng.gen_range(0..Self::ALL.len())]
    }

    /// Uniform pick among the two shapes that are not `self`.
    pub fn random_other(self, rng: &mut impl Rng) -> Self {
        let roll = rng.gen_range(0..Self::ALL.len() - 1);
        let idx = if roll >= self.index() { roll + 1 } else { roll };
        Self::ALL[idx]
    }

    pub fn color(self) -> Color {
        match self {
            Shape::Circle => Color::srgb(1.0, 0.0, 0.0),
            Shape::Square => Color::srgb(0.0, 0.0, 1.0),
            Shape::Triangle => Color::srgb(0.0, 1.0, 0.0),
        }
    }
}

/// True shape plus an optional disguise.
///
/// Other entities only ever observe [`ShapeWithMask::masked_shape`]; the true
/// shape is consulted for targeting decisions made *by* the owner and for
/// kill scoring.
#[derive(Component, Clone, Copy, PartialEq, Eq, Debug)]
pub struct ShapeWithMask {
    true_shape: Shape,
    mask: Option<Shape>,
}

impl ShapeWithMask {
    pub fn new(true_shape: Shape) -> Self {
        Self {
            true_shape,
            mask: None,
        }
    }

    pub fn random(rng: &mut impl Rng) -> Self {
        Self::new(Shape::random(rng))
    }

    pub fn true_shape(&self) -> Shape {
        self.true_shape
    }

    pub fn masked_shape(&self) -> Shape {
        self.mask.unwrap_or(self.true_shape)
    }

    pub fn mask(&self) -> Option<Shape> {
        self.mask
    }

    pub fn has_mask(&self) -> bool {
        self.mask.is_some()
    }

    pub fn set_mask(&mut self, mask: Shape) {
        self.mask = Some(mask);
    }

    /// Returns `true` when a mask was actually worn.
    pub fn remove_mask(&mut self) -> bool {
        self.mask.take().is_some()
    }
}
