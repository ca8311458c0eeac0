use crate::intent::{classify_offset, GestureIntent, GestureThresholds};
use serde::{Deserialize, Serialize};

/// Per-card drag state as the UI renders it.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SwipeGestureState {
    /// Always within `[-max_distance, +max_distance]`.
    pub offset: f32,
    pub is_dragging: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GesturePhase {
    #[default]
    Idle,
    Dragging,
}

/// State machine for one horizontal drag at a time: `Idle -> Dragging -> Idle`.
#[derive(Debug, Clone)]
pub struct BookmarkGestureController {
    max_distance: f32,
    thresholds: GestureThresholds,
    state: SwipeGestureState,
}

impl BookmarkGestureController {
    /// `max_distance` is the available horizontal travel, in offset units.
    pub fn new(max_distance: f32) -> Self {
        Self::with_thresholds(max_distance, GestureThresholds::default())
    }

    pub fn with_thresholds(max_distance: f32, thresholds: GestureThresholds) -> Self {
        Self {
            max_distance: sanitize_distance(max_distance),
            thresholds,
            state: SwipeGestureState::default(),
        }
    }

    pub fn state(&self) -> SwipeGestureState {
        self.state
    }

    pub fn phase(&self) -> GesturePhase {
        if self.state.is_dragging {
            GesturePhase::Dragging
        } else {
            GesturePhase::Idle
        }
    }

    pub fn max_distance(&self) -> f32 {
        self.max_distance
    }

    /// Update the travel (e.g. on resize), re-clamping any drag in progress.
    pub fn set_max_distance(&mut self, max_distance: f32) {
        self.max_distance = sanitize_distance(max_distance);
        self.state.offset = self.clamp(self.state.offset);
    }

    /// Apply a drag movement and return the new offset.
    ///
    /// The first delta of a gesture moves the controller into `Dragging`.
    pub fn drag_delta(&mut self, delta: f32) -> f32 {
        self.state.is_dragging = true;
        if delta.is_finite() {
            self.state.offset = self.clamp(self.state.offset + delta);
        }
        self.state.offset
    }

    /// Intent the gesture would produce if released now.
    pub fn preview(&self) -> GestureIntent {
        if !self.state.is_dragging {
            return GestureIntent::None;
        }
        classify_offset(self.state.offset, self.max_distance, self.thresholds)
    }

    /// Finish the gesture: classify, then reset to `Idle` with offset 0.
    pub fn drag_end(&mut self) -> GestureIntent {
        let intent = self.preview();
        if !intent.is_none() {
            tracing::debug!(offset = self.state.offset, %intent, "swipe resolved");
        }
        self.state = SwipeGestureState::default();
        intent
    }

    /// Abandon the gesture without an intent.
    pub fn cancel(&mut self) {
        self.state = SwipeGestureState::default();
    }

    fn clamp(&self, offset: f32) -> f32 {
        offset.clamp(-self.max_distance, self.max_distance)
    }
}

fn sanitize_distance(max_distance: f32) -> f32 {
    if max_distance.is_finite() && max_distance > 0.0 {
        max_distance
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn swipe(controller: &mut BookmarkGestureController, deltas: &[f32]) -> GestureIntent {
        for delta in deltas {
            controller.drag_delta(*delta);
        }
        controller.drag_end()
    }

    #[test]
    fn test_starts_idle() {
        let controller = BookmarkGestureController::new(400.0);
        assert_eq!(controller.phase(), GesturePhase::Idle);
        assert_eq!(controller.state(), SwipeGestureState::default());
    }

    #[test]
    fn test_delta_enters_dragging_and_accumulates() {
        let mut controller = BookmarkGestureController::new(400.0);
        controller.drag_delta(30.0);
        controller.drag_delta(-10.0);

        assert_eq!(controller.phase(), GesturePhase::Dragging);
        assert_eq!(controller.state().offset, 20.0);
    }

    #[test]
    fn test_offset_is_clamped() {
        let mut controller = BookmarkGestureController::new(400.0);
        assert_eq!(controller.drag_delta(1_000.0), 400.0);
        assert_eq!(controller.drag_delta(-5_000.0), -400.0);
    }

    #[test]
    fn test_each_intent_from_a_swipe() {
        let mut controller = BookmarkGestureController::new(400.0);
        assert_eq!(swipe(&mut controller, &[150.0, 100.0]), GestureIntent::Delete);
        assert_eq!(swipe(&mut controller, &[120.0]), GestureIntent::Edit);
        assert_eq!(swipe(&mut controller, &[-250.0]), GestureIntent::FilterByEpisode);
        assert_eq!(swipe(&mut controller, &[-100.0]), GestureIntent::JumpToSource);
        assert_eq!(swipe(&mut controller, &[40.0, -80.0]), GestureIntent::None);
    }

    #[test]
    fn test_half_travel_is_edit() {
        let mut controller = BookmarkGestureController::new(400.0);
        assert_eq!(swipe(&mut controller, &[200.0]), GestureIntent::Edit);
    }

    #[test]
    fn test_reset_after_every_gesture() {
        let mut controller = BookmarkGestureController::new(400.0);
        for deltas in [&[350.0][..], &[-350.0], &[10.0], &[]] {
            swipe(&mut controller, deltas);
            assert_eq!(controller.phase(), GesturePhase::Idle);
            assert_eq!(controller.state().offset, 0.0);
        }
    }

    #[test]
    fn test_clamped_offset_remembers_direction_changes() {
        let mut controller = BookmarkGestureController::new(400.0);
        // Overshooting right does not bank distance past the clamp
        assert_eq!(swipe(&mut controller, &[900.0, -330.0]), GestureIntent::None);
    }

    #[test]
    fn test_preview_follows_drag() {
        let mut controller = BookmarkGestureController::new(400.0);
        assert_eq!(controller.preview(), GestureIntent::None);
        controller.drag_delta(-120.0);
        assert_eq!(controller.preview(), GestureIntent::JumpToSource);
        controller.drag_delta(-200.0);
        assert_eq!(controller.preview(), GestureIntent::FilterByEpisode);
    }

    #[test]
    fn test_cancel_discards_intent() {
        let mut controller = BookmarkGestureController::new(400.0);
        controller.drag_delta(380.0);
        controller.cancel();
        assert_eq!(controller.drag_end(), GestureIntent::None);
    }

    #[test]
    fn test_resize_reclamps() {
        let mut controller = BookmarkGestureController::new(400.0);
        controller.drag_delta(300.0);
        controller.set_max_distance(200.0);
        assert_eq!(controller.state().offset, 200.0);
        assert_eq!(controller.drag_end(), GestureIntent::Delete);
    }

    #[test]
    fn test_non_finite_input_ignored() {
        let mut controller = BookmarkGestureController::new(400.0);
        controller.drag_delta(100.0);
        controller.drag_delta(f32::NAN);
        controller.drag_delta(f32::INFINITY);
        assert_eq!(controller.state().offset, 100.0);
    }

    #[test]
    fn test_zero_travel_never_triggers() {
        let mut controller = BookmarkGestureController::new(0.0);
        assert_eq!(controller.drag_delta(50.0), 0.0);
        assert_eq!(controller.drag_end(), GestureIntent::None);
    }
}
