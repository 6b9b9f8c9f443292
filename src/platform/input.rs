//! Raw input to intents
//!
//! Keyboard codes follow `KeyboardEvent.code`.

use crate::session::Intent;

/// Map a keyboard code to an intent (unmapped keys are ignored)
pub fn intent_for_key(code: &str) -> Option<Intent> {
    match code {
        "Space" | "ArrowUp" | "KeyW" => Some(Intent::Jump),
        "Enter" => Some(Intent::Start),
        "KeyI" => Some(Intent::ToggleAutopilot),
        _ => None,
    }
}

/// Any pointer/touch press is a jump
pub fn intent_for_pointer() -> Intent {
    Intent::Jump
}

/// Keys whose browser default (scrolling) must be suppressed
pub fn should_prevent_default(code: &str) -> bool {
    matches!(code, "Space" | "ArrowUp")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_mapping() {
        assert_eq!(intent_for_key("Space"), Some(Intent::Jump));
        assert_eq!(intent_for_key("ArrowUp"), Some(Intent::Jump));
        assert_eq!(intent_for_key("Enter"), Some(Intent::Start));
        assert_eq!(intent_for_key("KeyI"), Some(Intent::ToggleAutopilot));
        assert_eq!(intent_for_key("KeyQ"), None);
    }

    #[test]
    fn test_prevent_default_only_for_scroll_keys() {
        assert!(should_prevent_default("Space"));
        assert!(!should_prevent_default("KeyI"));
    }
}
