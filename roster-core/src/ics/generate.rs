//! ICS text generation.

use indoc::formatdoc;

use crate::config::RosterConfig;
use crate::error::{RosterError, RosterResult};
use crate::event::{ROSTER_CATEGORY, ROSTER_TRANSPARENCY, RosterDay, compact_date};

/// iCalendar line terminator.
pub const CRLF: &str = "\r\n";

/// Longest content line, in octets, before it must be folded.
const MAX_LINE_OCTETS: usize = 75;

const FOOTER: &str = "END:VCALENDAR\n";

/// Render a complete VCALENDAR document for the given days.
///
/// Days are written in the order given; the generator passes them sorted.
pub fn generate_ics(config: &RosterConfig, days: &[RosterDay]) -> RosterResult<String> {
    let mut ics = header(config);

    for day in days {
        ics.push_str(&event_block(day)?);
    }

    ics.push_str(FOOTER);

    Ok(to_content_lines(&ics))
}

fn header(config: &RosterConfig) -> String {
    formatdoc!(
        "
        BEGIN:VCALENDAR
        VERSION:2.0
        PRODID:{prodid}
        CALSCALE:GREGORIAN
        METHOD:PUBLISH
        ",
        prodid = config.product_id(),
    )
}

fn event_block(day: &RosterDay) -> RosterResult<String> {
    let end = day.end().ok_or(RosterError::NoFollowingDay(day.date))?;

    Ok(formatdoc!(
        "
        BEGIN:VEVENT
        UID:{uid}
        DTSTAMP:{stamp}T000000
        DTSTART:{start}
        DTEND:{end}
        TRANSP:{transp}
        SUMMARY:{summary}
        DESCRIPTION:{description}
        CATEGORIES:{category}
        END:VEVENT
        ",
        uid = day.uid,
        stamp = compact_date(day.stamp),
        start = compact_date(day.date),
        end = compact_date(end),
        transp = ROSTER_TRANSPARENCY,
        summary = day.summary(),
        description = day.description(),
        category = ROSTER_CATEGORY,
    ))
}

/// Normalize line breaks and fold long lines, terminating every line with CRLF.
fn to_content_lines(text: &str) -> String {
    let normalized = normalize_line_endings(text);
    let mut result = String::with_capacity(normalized.len());

    for line in normalized.split_terminator(CRLF) {
        result.push_str(&fold_line(line));
        result.push_str(CRLF);
    }

    result
}

/// Convert `\r\n`, lone `\r` and lone `\n` into `\r\n`.
pub fn normalize_line_endings(text: &str) -> String {
    let mut result = String::with_capacity(text.len() + text.len() / 32);
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\r' => {
                chars.next_if_eq(&'\n');
                result.push_str(CRLF);
            }
            '\n' => result.push_str(CRLF),
            _ => result.push(c),
        }
    }

    result
}

/// Fold a content line longer than 75 octets (RFC 5545 section 3.1).
///
/// Continuation lines start with a single space, which counts toward their
/// length. Splits never land inside a UTF-8 sequence.
pub fn fold_line(line: &str) -> String {
    if line.len() <= MAX_LINE_OCTETS {
        return line.to_string();
    }

    let mut result = String::with_capacity(line.len() + line.len() / MAX_LINE_OCTETS * 3);
    let mut budget = MAX_LINE_OCTETS;
    let mut used = 0;

    for c in line.chars() {
        if used + c.len_utf8() > budget {
            result.push_str(CRLF);
            result.push(' ');
            budget = MAX_LINE_OCTETS - 1;
            used = 0;
        }
        result.push(c);
        used += c.len_utf8();
    }

    result
}
