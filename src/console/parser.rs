//! Operator command parser.
//!
//! Commands are case-insensitive and surrounding whitespace is ignored.
//! `SET DRY <n>` / `SET WET <n>` take a best-effort integer: leading
//! whitespace, an optional sign, then as many digits as are present.
//! Anything unparsable reads as 0.  The result is clamped to `0..=1023`.

use crate::app::commands::AppCommand;
use crate::config::clamp_reading;

const SET_DRY: &str = "SET DRY ";
const SET_WET: &str = "SET WET ";

/// Parse one console line into a command.
pub fn parse_command(line: &str) -> AppCommand {
    let line = line.trim();

    if let Some(arg) = strip_prefix_ignore_case(line, SET_DRY) {
        return AppCommand::SetDry(clamp_reading(lenient_int(arg)));
    }
    if let Some(arg) = strip_prefix_ignore_case(line, SET_WET) {
        return AppCommand::SetWet(clamp_reading(lenient_int(arg)));
    }

    const WORDS: [(&str, AppCommand); 5] = [
        ("HELP", AppCommand::Help),
        ("STATUS", AppCommand::Status),
        ("START", AppCommand::Start),
        ("STOP", AppCommand::Stop),
        ("SAVE", AppCommand::Save),
    ];
    WORDS
        .iter()
        .find(|(word, _)| line.eq_ignore_ascii_case(word))
        .map_or(AppCommand::Unknown, |&(_, cmd)| cmd)
}

fn strip_prefix_ignore_case<'a>(s: &'a str, prefix: &str) -> Option<&'a str> {
    let head = s.get(..prefix.len())?;
    if head.eq_ignore_ascii_case(prefix) {
        s.get(prefix.len()..)
    } else {
        None
    }
}

/// Integer prefix of `s`, saturating at the `i64` range.  Returns 0 when
/// no digits follow the optional sign.
pub fn lenient_int(s: &str) -> i64 {
    let s = s.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let mut value: i64 = 0;
    for b in digits.bytes().take_while(u8::is_ascii_digit) {
        let d = i64::from(b - b'0');
        value = if negative {
            value.saturating_mul(10).saturating_sub(d)
        } else {
            value.saturating_mul(10).saturating_add(d)
        };
    }
    value
}
