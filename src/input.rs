//! Input routing
//!
//! Translates raw keys into session events. Stateless: it does not look at the
//! session, so out-of-phase presses are forwarded and dropped by the state
//! machine.

use crate::session::{Event, Lane};

/// Keys that restart the run
const RESTART_KEYS: [&str; 3] = ["r", "R", "restart"];

/// Map a key to an event, or `None` for keys the game does not use
pub fn route(key: &str) -> Option<Event> {
    let key = key.trim();
    match key {
        "1" => Some(Event::ChoiceMade(Lane::FIRST)),
        "2" => Some(Event::ChoiceMade(Lane::SECOND)),
        "3" => Some(Event::ChoiceMade(Lane::THIRD)),
        _ if RESTART_KEYS.contains(&key) => Some(Event::Restart),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lane_keys() {
        assert_eq!(route("1"), Some(Event::ChoiceMade(Lane::FIRST)));
        assert_eq!(route("2"), Some(Event::ChoiceMade(Lane::SECOND)));
        assert_eq!(route(" 3\n"), Some(Event::ChoiceMade(Lane::THIRD)));
    }

    #[test]
    fn test_restart_keys() {
        for key in ["r", "R", "restart"] {
            assert_eq!(route(key), Some(Event::Restart));
        }
    }

    #[test]
    fn test_other_keys_ignored() {
        for key in ["", "0", "4", "12", "x", "space"] {
            assert_eq!(route(key), None, "key {key:?}");
        }
    }
}
