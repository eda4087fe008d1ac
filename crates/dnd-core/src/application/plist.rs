//! Agent definition files (property-list XML)
//!
//! Rendering fills a fixed template. Parsing is a streaming pass over the tags
//! that only tracks the most recent `<key>` and picks up the `<string>` values
//! of the two keys dnd cares about; everything else is checked for balance and
//! otherwise ignored.

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use crate::constants::KILL_INTERVAL_SECS;

/// Key holding the pattern passed to pkill.
pub const PATTERN_KEY: &str = "TargetedPattern";

/// Key holding the agent label.
pub const LABEL_KEY: &str = "Label";

static TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<(/?)([A-Za-z][A-Za-z0-9_.:-]*)[^>]*?(/?)>").expect("Invalid tag regex")
});

/// The values recovered from an agent definition.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AgentFields {
    pub label: String,
    pub pattern: String,
}

/// Structural problems found while parsing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlistError {
    #[error("unexpected </{found}>, expected </{expected}>")]
    Mismatched { expected: String, found: String },

    #[error("unexpected </{found}> with no open element")]
    Unopened { found: String },

    #[error("unterminated <{tag}>")]
    Unterminated { tag: String },
}

/// Render the agent definition that kills every process matching `pattern`
/// every [`KILL_INTERVAL_SECS`] seconds.
pub fn render(pattern: &str, label: &str, log_file: &Path) -> String {
    let pattern = escape(pattern);
    let label = escape(label);
    let log = escape(&log_file.display().to_string());

    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE plist PUBLIC "-//Apple//DTD PLIST 1.0//EN" "http://www.apple.com/DTDs/PropertyList-1.0.dtd">
<plist version="1.0">
<dict>
    <key>{PATTERN_KEY}</key>
    <string>{pattern}</string>
    <key>{LABEL_KEY}</key>
    <string>{label}</string>
    <key>ProgramArguments</key>
    <array>
        <string>pkill</string>
        <string>-SIGKILL</string>
        <string>-i</string>
        <string>-f</string>
        <string>{pattern}</string>
    </array>
    <key>StandardOutPath</key>
    <string>{log}</string>
    <key>StandardErrorPath</key>
    <string>{log}</string>
    <key>StartInterval</key>
    <integer>{KILL_INTERVAL_SECS}</integer>
</dict>
</plist>
"#
    )
}

/// Parse the label and pattern out of an agent definition.
///
/// Missing keys come back as empty strings; the caller decides whether the
/// file is one of ours.
pub fn parse(content: &str) -> Result<AgentFields, PlistError> {
    let mut fields = AgentFields::default();
    let mut open: Vec<&str> = Vec::new();
    let mut key: Option<String> = None;
    let mut text_start = 0;

    for caps in TAG.captures_iter(content) {
        let (Some(tag), Some(name)) = (caps.get(0), caps.get(2)) else {
            continue;
        };
        let name = name.as_str();
        let closing = caps.get(1).is_some_and(|m| !m.as_str().is_empty());
        let self_closing = caps.get(3).is_some_and(|m| !m.as_str().is_empty());

        if self_closing {
            continue;
        }
        if !closing {
            open.push(name);
            text_start = tag.end();
            continue;
        }

        match open.pop() {
            Some(expected) if expected == name => {}
            Some(expected) => {
                return Err(PlistError::Mismatched {
                    expected: expected.to_string(),
                    found: name.to_string(),
                });
            }
            None => {
                return Err(PlistError::Unopened {
                    found: name.to_string(),
                });
            }
        }

        let text = || unescape(&content[text_start..tag.start()]);
        match name {
            "key" => key = Some(text()),
            "string" => match key.as_deref() {
                Some(PATTERN_KEY) => fields.pattern = text(),
                Some(LABEL_KEY) => fields.label = text(),
                _ => {}
            },
            _ => {}
        }
    }

    match open.pop() {
        Some(tag) => Err(PlistError::Unterminated {
            tag: tag.to_string(),
        }),
        None => Ok(fields),
    }
}

/// Escape the five XML special characters.
pub fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

/// Resolve named and numeric character references. Unknown references are
/// kept verbatim.
pub fn unescape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut rest = value;

    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        rest = &rest[amp..];

        let resolved = rest.find(';').and_then(|semi| {
            let entity = &rest[1..semi];
            let c = match entity {
                "amp" => Some('&'),
                "lt" => Some('<'),
                "gt" => Some('>'),
                "quot" => Some('"'),
                "apos" => Some('\''),
                _ => entity
                    .strip_prefix("#x")
                    .or_else(|| entity.strip_prefix("#X"))
                    .map(|hex| u32::from_str_radix(hex, 16))
                    .or_else(|| entity.strip_prefix('#').map(str::parse::<u32>))
                    .and_then(|code| code.ok())
                    .and_then(char::from_u32),
            };
            c.map(|c| (c, semi))
        });

        match resolved {
            Some((c, semi)) => {
                out.push(c);
                rest = &rest[semi + 1..];
            }
            None => {
                out.push('&');
                rest = &rest[1..];
            }
        }
    }

    out.push_str(rest);
    out
}
