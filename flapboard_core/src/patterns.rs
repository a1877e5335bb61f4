//! Ready-made playlists and generated board art.

use crate::cell::FlapRng;

pub struct Preset {
    pub name: &'static str,
    pub entries: &'static [&'static str],
}

pub const PRESETS: &[Preset] = &[
    Preset {
        name: "Welcome",
        entries: &["WELCOME TO OMNI BOARD", "HAVE A NICE DAY"],
    },
    Preset {
        name: "Departures",
        entries: &[
            "DEPARTURES\n08:15 LONDON    ON TIME\n\
             08:40 PARIS     DELAYED\n09:05 BERLIN    BOARDING",
            "DEPARTURES\n09:30 MADRID    ON TIME\n\
             09:55 ROME      GATE 12\n10:20 OSLO      CANCELLED",
        ],
    },
    Preset {
        name: "Weather",
        entries: &["TODAY 🌞 21C", "TONIGHT 🌙 12C", "TOMORROW 🌧 15C", "SURF 🌊 2M"],
    },
    Preset {
        name: "Countdown",
        entries: &["5", "4", "3", "2", "1", "GO!"],
    },
];

// Shading blocks plus blanks; none of these are on the default wheel.
const ART_SYMBOLS: &[&str] = &["█", "▓", "▒", "░", " ", " "];

/// Random block art filling a `rows` x `cols` board. Same seed, same art.
pub fn random_art(rows: usize, cols: usize, seed: u64) -> String {
    let mut rng = FlapRng::seeded(seed);
    let mut art = String::with_capacity(rows * (cols * 3 + 1));
    for row in 0..rows {
        if row > 0 {
            art.push('\n');
        }
        for _ in 0..cols {
            art.push_str(ART_SYMBOLS[rng.below(ART_SYMBOLS.len())]);
        }
    }
    art
}

/// `count` art frames with consecutive seeds starting at `seed`.
pub fn random_art_playlist(rows: usize, cols: usize, seed: u64, count: usize) -> Vec<String> {
    (0..count as u64)
        .map(|i| random_art(rows, cols, seed.wrapping_add(i)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbol::symbol_count;

    #[test]
    fn art_fills_the_board() {
        let art = random_art(3, 7, 9);
        let lines: Vec<&str> = art.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines.iter().all(|l| symbol_count(l) == 7));
    }

    #[test]
    fn art_is_repeatable_per_seed() {
        assert_eq!(random_art(4, 10, 1), random_art(4, 10, 1));
        assert_ne!(random_art_playlist(4, 10, 1, 2)[0], random_art_playlist(4, 10, 1, 2)[1]);
    }

    #[test]
    fn presets_are_named_and_non_empty() {
        assert!(PRESETS.iter().all(|p| !p.name.is_empty() && !p.entries.is_empty()));
    }

    #[test]
    fn departures_keep_one_line_per_train() {
        let departures = PRESETS.iter().find(|p| p.name == "Departures").unwrap();
        for entry in departures.entries {
            let lines: Vec<&str> = entry.lines().collect();
            assert_eq!(lines.len(), 4);
            assert_eq!(lines[0], "DEPARTURES");
            assert!(lines[1..].iter().all(|l| l.as_bytes()[2] == b':' && !l.starts_with(' ')));
        }
    }
}
