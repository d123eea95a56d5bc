use crate::game::GameId;
use crate::input::{Key, ResponseEvent, ResponseKind};

/// Direction of a flanker target or response key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    pub fn glyph(&self) -> &'static str {
        match self {
            Direction::Left => "←",
            Direction::Right => "→",
        }
    }

    pub fn opposite(&self) -> Direction {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    pub fn key(&self) -> Key {
        match self {
            Direction::Left => Key::ArrowLeft,
            Direction::Right => Key::ArrowRight,
        }
    }
}

/// One stimulus, generated fresh per trial and discarded after evaluation.
#[derive(Debug, Clone, PartialEq)]
pub enum Trial {
    Flanker {
        /// Five glyphs: two flankers, the target, two flankers.
        display: String,
        /// Direction of the center glyph, regardless of flanker congruence.
        correct: Direction,
    },
    Gonogo {
        is_go: bool,
    },
    Oddball {
        is_bonus: bool,
        symbol: &'static str,
    },
}

impl Trial {
    pub fn game(&self) -> GameId {
        match self {
            Trial::Flanker { .. } => GameId::Flanker,
            Trial::Gonogo { .. } => GameId::Gonogo,
            Trial::Oddball { .. } => GameId::Oddball,
        }
    }

    /// Text the UI shows for this stimulus.
    pub fn display_string(&self) -> String {
        match self {
            Trial::Flanker { display, .. } => display.clone(),
            Trial::Gonogo { is_go: true } => "GO 🟢".to_string(),
            Trial::Gonogo { is_go: false } => "STOP 🔴".to_string(),
            Trial::Oddball { is_bonus: true, .. } => "⭐ BONUS ⭐".to_string(),
            Trial::Oddball { symbol, .. } => (*symbol).to_string(),
        }
    }

    /// True when the correct behavior is to withhold any response.
    pub fn is_inhibition(&self) -> bool {
        matches!(
            self,
            Trial::Gonogo { is_go: false } | Trial::Oddball { is_bonus: false, .. }
        )
    }
}

/// Outcome of one trial. Derived, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Evaluation {
    pub answered: bool,
    pub correct: bool,
    pub reaction_ms: Option<u32>,
}

impl Evaluation {
    fn omitted() -> Self {
        Evaluation {
            answered: false,
            correct: false,
            reaction_ms: None,
        }
    }
}

/// Maps (trial, response-or-timeout) to an outcome. Pure.
///
/// The response, when present, already passed the race's qualification
/// filter, so only key identity (Flanker) and presence (inhibition
/// trials) are decided here.
pub fn evaluate(trial: &Trial, response: Option<&ResponseEvent>) -> Evaluation {
    match trial {
        Trial::Flanker { correct, .. } => match response {
            None => Evaluation::omitted(),
            Some(r) => Evaluation {
                answered: true,
                correct: r.kind == ResponseKind::Key(correct.key()),
                reaction_ms: Some(r.reaction_ms),
            },
        },
        Trial::Gonogo { is_go: true } => match response {
            None => Evaluation::omitted(),
            Some(r) => Evaluation {
                answered: true,
                correct: r.kind == ResponseKind::Key(Key::Space),
                reaction_ms: Some(r.reaction_ms),
            },
        },
        Trial::Oddball { is_bonus: true, .. } => match response {
            None => Evaluation::omitted(),
            // Any qualifying response catches the bonus.
            Some(r) => Evaluation {
                answered: true,
                correct: true,
                reaction_ms: Some(r.reaction_ms),
            },
        },
        // Inhibition: No-Go and non-bonus share the exact same rule.
        Trial::Gonogo { is_go: false } | Trial::Oddball { is_bonus: false, .. } => Evaluation {
            answered: response.is_some(),
            correct: response.is_none(),
            reaction_ms: response.map(|r| r.reaction_ms),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(k: Key, rt: u32) -> ResponseEvent {
        ResponseEvent {
            kind: ResponseKind::Key(k),
            reaction_ms: rt,
        }
    }

    fn click(rt: u32) -> ResponseEvent {
        ResponseEvent {
            kind: ResponseKind::Click,
            reaction_ms: rt,
        }
    }

    #[test]
    fn flanker_matches_center_direction() {
        let trial = Trial::Flanker {
            display: "→→←→→".into(),
            correct: Direction::Left,
        };
        let ev = evaluate(&trial, Some(&key(Key::ArrowLeft, 430)));
        assert!(ev.answered && ev.correct);
        assert_eq!(ev.reaction_ms, Some(430));

        let ev = evaluate(&trial, Some(&key(Key::ArrowRight, 380)));
        assert!(ev.answered);
        assert!(!ev.correct);
        assert_eq!(ev.reaction_ms, Some(380));
    }

    #[test]
    fn flanker_timeout_is_an_omission() {
        let trial = Trial::Flanker {
            display: "←←←←←".into(),
            correct: Direction::Left,
        };
        let ev = evaluate(&trial, None);
        assert!(!ev.answered && !ev.correct);
        assert_eq!(ev.reaction_ms, None);
    }

    #[test]
    fn go_trial_requires_the_activate_key() {
        let trial = Trial::Gonogo { is_go: true };
        assert!(evaluate(&trial, Some(&key(Key::Space, 300))).correct);
        let ev = evaluate(&trial, None);
        assert!(!ev.answered && !ev.correct);
    }

    #[test]
    fn inhibition_symmetry_across_games() {
        let nogo = Trial::Gonogo { is_go: false };
        let filler = Trial::Oddball {
            is_bonus: false,
            symbol: "◆",
        };
        for trial in [&nogo, &filler] {
            // Withholding is correct.
            let ev = evaluate(trial, None);
            assert!(ev.correct);
            assert!(!ev.answered);

            // Any response is wrong, whatever the input was.
            for resp in [key(Key::Space, 200), click(200)] {
                let ev = evaluate(trial, Some(&resp));
                assert!(!ev.correct);
                assert!(ev.answered);
            }
        }
    }

    #[test]
    fn bonus_accepts_key_or_click() {
        let trial = Trial::Oddball {
            is_bonus: true,
            symbol: "⭐",
        };
        assert!(evaluate(&trial, Some(&key(Key::Space, 250))).correct);
        assert!(evaluate(&trial, Some(&click(250))).correct);
        assert!(!evaluate(&trial, None).correct);
    }

    #[test]
    fn display_strings() {
        assert_eq!(
            Trial::Gonogo { is_go: true }.display_string(),
            "GO 🟢"
        );
        assert_eq!(
            Trial::Gonogo { is_go: false }.display_string(),
            "STOP 🔴"
        );
        assert_eq!(
            Trial::Oddball {
                is_bonus: true,
                symbol: "⭐"
            }
            .display_string(),
            "⭐ BONUS ⭐"
        );
        assert_eq!(
            Trial::Oddball {
                is_bonus: false,
                symbol: "●"
            }
            .display_string(),
            "●"
        );
    }
}
