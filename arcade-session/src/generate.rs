use rand::Rng;

use arcade_core::{Direction, GameId, Trial};

use crate::config::DifficultyConfig;

pub const BONUS_SYMBOL: &str = "⭐";
/// Oddball fillers, bonus glyph excluded.
pub const FILLER_SYMBOLS: [&str; 8] = ["◆", "●", "■", "▲", "✦", "✸", "✚", "✖"];

/// Produces one stimulus for the given game. Pure except for the
/// injected random source, so seeded runs are reproducible.
pub fn generate<R: Rng>(game: GameId, cfg: &DifficultyConfig, rng: &mut R) -> Trial {
    match game {
        GameId::Flanker => {
            let target = if rng.random_bool(0.5) {
                Direction::Left
            } else {
                Direction::Right
            };
            let flank = if rng.random_bool(cfg.incong_rate) {
                target.opposite()
            } else {
                target
            };
            let display = format!(
                "{f}{f}{c}{f}{f}",
                f = flank.glyph(),
                c = target.glyph()
            );
            Trial::Flanker {
                display,
                correct: target,
            }
        }
        GameId::Gonogo => Trial::Gonogo {
            is_go: rng.random_bool(cfg.go_rate),
        },
        GameId::Oddball => {
            let is_bonus = rng.random_bool(cfg.bonus_rate);
            let symbol = if is_bonus {
                BONUS_SYMBOL
            } else {
                FILLER_SYMBOLS[rng.random_range(0..FILLER_SYMBOLS.len())]
            };
            Trial::Oddball { is_bonus, symbol }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::level_config;
    use arcade_core::LevelId;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    fn cfg_with(f: impl FnOnce(&mut DifficultyConfig)) -> DifficultyConfig {
        let mut cfg = level_config(LevelId::Explorer);
        f(&mut cfg);
        cfg
    }

    #[test]
    fn flanker_center_always_matches_correct_response() {
        let cfg = level_config(LevelId::Expert);
        let mut rng = rng();
        for _ in 0..200 {
            let Trial::Flanker { display, correct } = generate(GameId::Flanker, &cfg, &mut rng)
            else {
                panic!("flanker generator produced a different game");
            };
            let glyphs: Vec<char> = display.chars().collect();
            assert_eq!(glyphs.len(), 5);
            assert_eq!(glyphs[2].to_string(), correct.glyph());
            // Flankers agree with each other and either match or oppose
            // the center.
            assert!(glyphs[0] == glyphs[1] && glyphs[1] == glyphs[3] && glyphs[3] == glyphs[4]);
        }
    }

    #[test]
    fn flanker_congruence_follows_the_rate() {
        let mut rng = rng();
        let congruent = cfg_with(|c| c.incong_rate = 0.0);
        for _ in 0..50 {
            let Trial::Flanker { display, correct } = generate(GameId::Flanker, &congruent, &mut rng)
            else {
                unreachable!()
            };
            assert!(display.chars().all(|g| g.to_string() == correct.glyph()));
        }

        let incongruent = cfg_with(|c| c.incong_rate = 1.0);
        for _ in 0..50 {
            let Trial::Flanker { display, correct } = generate(GameId::Flanker, &incongruent, &mut rng)
            else {
                unreachable!()
            };
            let glyphs: Vec<char> = display.chars().collect();
            assert_eq!(glyphs[2].to_string(), correct.glyph());
            assert_eq!(glyphs[0].to_string(), correct.opposite().glyph());
        }
    }

    #[test]
    fn gonogo_rate_extremes() {
        let mut rng = rng();
        let all_go = cfg_with(|c| c.go_rate = 1.0);
        let no_go = cfg_with(|c| c.go_rate = 0.0);
        for _ in 0..50 {
            assert_eq!(generate(GameId::Gonogo, &all_go, &mut rng), Trial::Gonogo { is_go: true });
            assert_eq!(generate(GameId::Gonogo, &no_go, &mut rng), Trial::Gonogo { is_go: false });
        }
    }

    #[test]
    fn oddball_symbols_respect_bonus_flag() {
        let mut rng = rng();
        let all_bonus = cfg_with(|c| c.bonus_rate = 1.0);
        for _ in 0..50 {
            let Trial::Oddball { is_bonus, symbol } = generate(GameId::Oddball, &all_bonus, &mut rng)
            else {
                unreachable!()
            };
            assert!(is_bonus);
            assert_eq!(symbol, BONUS_SYMBOL);
        }

        let no_bonus = cfg_with(|c| c.bonus_rate = 0.0);
        for _ in 0..50 {
            let Trial::Oddball { is_bonus, symbol } = generate(GameId::Oddball, &no_bonus, &mut rng)
            else {
                unreachable!()
            };
            assert!(!is_bonus);
            assert!(FILLER_SYMBOLS.contains(&symbol));
            assert_ne!(symbol, BONUS_SYMBOL);
        }
    }

    #[test]
    fn seeded_sequences_are_reproducible() {
        let cfg = level_config(LevelId::Beginner);
        let mut a = StdRng::seed_from_u64(42);
        let mut b = StdRng::seed_from_u64(42);
        for game in GameId::ALL {
            for _ in 0..20 {
                assert_eq!(generate(game, &cfg, &mut a), generate(game, &cfg, &mut b));
            }
        }
    }
}
