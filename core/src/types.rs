/// Position of a cell inside the puzzle content, counted in `char`s.
pub type CellIndex = usize;

/// Counter type used for guesses, hits and hints.
pub type Count = u32;

/// Milliseconds since the Unix epoch. Zero means "not recorded".
pub type TimestampMs = u64;

/// Points as used by the score breakdown; components may be negative.
pub type Points = i32;

/// First code point accepted as a guessable ideograph.
pub const HANZI_FIRST: char = '\u{4e00}';

/// Last code point accepted as a guessable ideograph.
pub const HANZI_LAST: char = '\u{9fa5}';

/// Whether `ch` is a CJK unified ideograph that takes part in the game.
pub const fn is_hanzi(ch: char) -> bool {
    matches!(ch, HANZI_FIRST..=HANZI_LAST)
}

/// Formats whole seconds as `mm:ss`, minutes are not wrapped into hours.
pub fn format_mm_ss(secs: u64) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}
