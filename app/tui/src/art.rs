//! Result visuals.

use escapevel_core::Verdict;

const LIFTOFF: &[&str] = &[
    "      *      ",
    "     /^\\     ",
    "    |   |    ",
    "    | O |    ",
    "   /|   |\\   ",
    "  /_|___|_\\  ",
    "    )))((    ",
    "   ((( )))   ",
];

const GROUNDED: &[&str] = &[
    "             ",
    "             ",
    "      _      ",
    "   __/ \\__   ",
    "  /  x x  \\  ",
    " |  .---.  | ",
    "~~~~~~~~~~~~~",
    "  (fizzle)   ",
];

pub fn verdict_art(verdict: Verdict) -> &'static [&'static str] {
    match verdict {
        Verdict::Escape => LIFTOFF,
        Verdict::NoEscape => GROUNDED,
    }
}
