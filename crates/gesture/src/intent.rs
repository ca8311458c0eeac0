use serde::{Deserialize, Serialize};

/// What a finished swipe asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GestureIntent {
    Delete,
    Edit,
    FilterByEpisode,
    JumpToSource,
    None,
}

impl GestureIntent {
    pub fn label(&self) -> &'static str {
        match self {
            GestureIntent::Delete => "delete",
            GestureIntent::Edit => "edit",
            GestureIntent::FilterByEpisode => "filter_by_episode",
            GestureIntent::JumpToSource => "jump_to_source",
            GestureIntent::None => "none",
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, GestureIntent::None)
    }
}

impl std::fmt::Display for GestureIntent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Fractions of the available travel at which intents trigger.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureThresholds {
    /// Beyond this, the swipe deletes (right) or filters (left).
    pub action: f32,
    /// Beyond this, the swipe edits (right) or jumps (left).
    pub reveal: f32,
}

impl Default for GestureThresholds {
    fn default() -> Self {
        Self {
            action: 0.5,
            reveal: 0.2,
        }
    }
}

/// Classify a final drag offset.
///
/// Boundaries are exclusive: an offset of exactly half the travel is
/// still an edit, not a delete.
pub fn classify_offset(
    offset: f32,
    max_distance: f32,
    thresholds: GestureThresholds,
) -> GestureIntent {
    if !offset.is_finite() || !max_distance.is_finite() || max_distance <= 0.0 {
        return GestureIntent::None;
    }

    let action = max_distance * thresholds.action;
    let reveal = max_distance * thresholds.reveal;

    if offset > action {
        GestureIntent::Delete
    } else if offset > reveal {
        GestureIntent::Edit
    } else if offset < -action {
        GestureIntent::FilterByEpisode
    } else if offset < -reveal {
        GestureIntent::JumpToSource
    } else {
        GestureIntent::None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MAX: f32 = 400.0;

    fn classify(offset: f32) -> GestureIntent {
        classify_offset(offset, MAX, GestureThresholds::default())
    }

    #[test]
    fn test_right_swipes() {
        assert_eq!(classify(300.0), GestureIntent::Delete);
        assert_eq!(classify(150.0), GestureIntent::Edit);
        assert_eq!(classify(50.0), GestureIntent::None);
    }

    #[test]
    fn test_left_swipes() {
        assert_eq!(classify(-300.0), GestureIntent::FilterByEpisode);
        assert_eq!(classify(-150.0), GestureIntent::JumpToSource);
        assert_eq!(classify(-50.0), GestureIntent::None);
    }

    #[test]
    fn test_exact_boundaries_take_the_weaker_intent() {
        assert_eq!(classify(MAX * 0.5), GestureIntent::Edit);
        assert_eq!(classify(MAX * 0.2), GestureIntent::None);
        assert_eq!(classify(-MAX * 0.5), GestureIntent::JumpToSource);
        assert_eq!(classify(-MAX * 0.2), GestureIntent::None);
    }

    #[test]
    fn test_full_travel() {
        assert_eq!(classify(MAX), GestureIntent::Delete);
        assert_eq!(classify(-MAX), GestureIntent::FilterByEpisode);
    }

    #[test]
    fn test_degenerate_inputs() {
        let t = GestureThresholds::default();
        assert_eq!(classify_offset(100.0, 0.0, t), GestureIntent::None);
        assert_eq!(classify_offset(100.0, -5.0, t), GestureIntent::None);
        assert_eq!(classify_offset(f32::NAN, MAX, t), GestureIntent::None);
        assert_eq!(classify_offset(100.0, f32::NAN, t), GestureIntent::None);
    }

    #[test]
    fn test_custom_thresholds() {
        let t = GestureThresholds {
            action: 0.8,
            reveal: 0.1,
        };
        assert_eq!(classify_offset(300.0, MAX, t), GestureIntent::Edit);
        assert_eq!(classify_offset(-330.0, MAX, t), GestureIntent::FilterByEpisode);
    }

    #[test]
    fn test_intent_serialization() {
        let json = serde_json::to_string(&GestureIntent::FilterByEpisode).unwrap();
        assert_eq!(json, "\"filter_by_episode\"");
        assert_eq!(GestureIntent::JumpToSource.to_string(), "jump_to_source");
    }
}
