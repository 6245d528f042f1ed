use std::time::Duration;

use crate::{coordinate::Coordinate, map::RouteId};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationStep {
    pub index: usize,
    /// Offset from the moment the route resolved.
    pub delay: Duration,
    pub position: Coordinate,
}

/// Vehicle movement along one resolved route.
///
/// Steps are spaced `index * step` apart regardless of the distance between
/// vertices, so densely sampled routes take longer to play back.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationPlan {
    pub route: RouteId,
    pub vehicle_start: Coordinate,
    pub path: Vec<Coordinate>,
    pub steps: Vec<AnimationStep>,
}

impl AnimationPlan {
    pub fn new(route: RouteId, vehicle_start: Coordinate, path: Vec<Coordinate>, step: Duration) -> Self {
        let steps = path
            .iter()
            .enumerate()
            .map(|(index, &position)| AnimationStep {
                index,
                delay: step_delay(step, index),
                position,
            })
            .collect();
        Self {
            route,
            vehicle_start,
            path,
            steps,
        }
    }

    pub fn total_duration(&self) -> Duration {
        self.steps.last().map(|s| s.delay).unwrap_or_default()
    }
}

pub fn step_delay(step: Duration, index: usize) -> Duration {
    step.saturating_mul(u32::try_from(index).unwrap_or(u32::MAX))
}
