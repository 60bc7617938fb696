//! Text helpers shared by the event logs and reports.

use std::fmt;

/// A species' event log for one turn. The `Other events:` header is written
/// before the first event that asks for it.
#[derive(Debug, Default, Clone)]
pub struct EventLog {
    text: String,
    header_printed: bool,
}

impl EventLog {
    /// Buffer for an event listed under the `Other events:` header.
    pub fn event(&mut self) -> &mut String {
        if !self.header_printed {
            self.text.push_str("\nOther events:\n");
            self.header_printed = true;
        }
        &mut self.text
    }

    /// Buffer for text outside the events section.
    pub fn raw(&mut self) -> &mut String {
        &mut self.text
    }

    /// Append formatted text under the `Other events:` header.
    pub fn event_fmt(&mut self, args: fmt::Arguments<'_>) {
        self.event().push_str(&fmt::format(args));
    }

    /// Append formatted text outside the events section.
    pub fn raw_fmt(&mut self, args: fmt::Arguments<'_>) {
        self.text.push_str(&fmt::format(args));
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn into_text(self) -> String {
        self.text
    }
}

/// Integer with thousands separators, e.g. `1,234,567`.
pub fn commas(n: i64) -> String {
    let digits = n.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if n < 0 {
        out.push('-');
    }
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Fixed-point hundredths as `x.yy`.
pub fn hundredths(n: i64) -> String {
    format!("{}.{:02}", n / 100, n % 100)
}

/// Fixed-point tenths as `x.y`.
pub fn tenths(n: i64) -> String {
    format!("{}.{}", n / 10, n % 10)
}

/// `s` unless `n == 1`.
pub fn plural(n: i64) -> &'static str {
    if n == 1 {
        ""
    } else {
        "s"
    }
}
