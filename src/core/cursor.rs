//! Mouse cursor selection from an ordered rule list.
//!
//! Rules are evaluated top to bottom every frame and the LAST matching rule
//! wins, mirroring CSS-like override order. This is a documented tie-break,
//! not an accident of iteration: later rules deliberately override earlier
//! ones. With no match the cursor stays at "no override".

use log::warn;

use super::state::{GuiState, Predicate};

/// Cursor styles the hosting layer knows how to apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CursorStyle {
    /// No override: the host keeps its default cursor.
    #[default]
    Unset,
    Pointer,
    Grab,
    Grabbing,
    Move,
    Crosshair,
    Text,
}

impl CursorStyle {
    /// CSS cursor name as the canvas/DOM layer expects it.
    pub fn css_name(&self) -> &'static str {
        match self {
            CursorStyle::Unset => "",
            CursorStyle::Pointer => "pointer",
            CursorStyle::Grab => "grab",
            CursorStyle::Grabbing => "grabbing",
            CursorStyle::Move => "move",
            CursorStyle::Crosshair => "crosshair",
            CursorStyle::Text => "text",
        }
    }
}

/// One (style, condition) pair.
#[derive(Debug, Clone)]
pub struct CursorRule {
    pub style: CursorStyle,
    pub when: Predicate,
}

impl CursorRule {
    pub fn new(style: CursorStyle, when: Predicate) -> Self {
        Self { style, when }
    }
}

/// Evaluate all rules in declared order; last match wins.
///
/// A failing predicate skips only that rule for this frame.
pub fn resolve(rules: &[CursorRule], state: &GuiState) -> CursorStyle {
    let mut cursor = CursorStyle::Unset;
    for rule in rules {
        match rule.when.eval(state) {
            Ok(true) => cursor = rule.style,
            Ok(false) => {}
            Err(e) => warn!("cursor rule {:?} skipped: {e:#}", rule.style),
        }
    }
    cursor
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    #[test]
    fn test_last_match_wins() {
        let rules = vec![
            CursorRule::new(CursorStyle::Pointer, Predicate::new(|s| s.mouse.x < 100.0)),
            CursorRule::new(CursorStyle::Grab, Predicate::new(|s| s.mouse.x < 200.0)),
        ];
        let state = GuiState {
            mouse: Vec2::new(50.0, 0.0),
            ..Default::default()
        };
        // Both rules match; the later one overrides
        assert_eq!(resolve(&rules, &state), CursorStyle::Grab);

        let state = GuiState {
            mouse: Vec2::new(150.0, 0.0),
            ..Default::default()
        };
        assert_eq!(resolve(&rules, &state), CursorStyle::Grab);
    }

    #[test]
    fn test_no_match_means_no_override() {
        let rules = vec![CursorRule::new(
            CursorStyle::Pointer,
            Predicate::new(|s| s.mouse.x < 100.0),
        )];
        let state = GuiState {
            mouse: Vec2::new(500.0, 0.0),
            ..Default::default()
        };
        assert_eq!(resolve(&rules, &state), CursorStyle::Unset);
        assert_eq!(resolve(&rules, &state).css_name(), "");
    }

    #[test]
    fn test_failing_rule_is_skipped() {
        let rules = vec![
            CursorRule::new(CursorStyle::Pointer, Predicate::always()),
            CursorRule::new(
                CursorStyle::Grab,
                Predicate::fallible(|_| anyhow::bail!("state not ready")),
            ),
        ];
        // The failing rule does not override the earlier match
        assert_eq!(resolve(&rules, &GuiState::default()), CursorStyle::Pointer);
    }
}
