use once_cell::sync::Lazy;
use regex::Regex;

use crate::tree::element_model::Frame;
use crate::tree::element_type::ElementType;

/// `<indent><TYPE> 0x<handle>: <rest>`
static HEAD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?P<indent> *)(?P<kind>[A-Za-z][A-Za-z0-9]*) 0x(?P<handle>[0-9A-Fa-f]+):(?P<rest>.*)$")
        .expect("head pattern is valid")
});

/// `{x, y}, {w, h}` with optional outer braces.
static GEOMETRY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\{?\{\s*(?P<x>[^,{}]+),\s*(?P<y>[^,{}]+)\}\s*,\s*\{\s*(?P<w>[^,{}]+),\s*(?P<h>[^,{}]+)\}\}?")
        .expect("geometry pattern is valid")
});

static EXTRA_KEY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:^|,)\s*(?P<key>label|identifier|value|placeholderValue):\s*'")
        .expect("extra key pattern is valid")
});

static TRAITS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"traits:\s*(?P<bits>\d+)").expect("traits pattern is valid"));

static MAIN_WINDOW: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"Main Window|\(Main\)").expect("main window pattern is valid"));

/// Every field a single dump line carries, before tree placement.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedLine {
    pub depth: usize,
    pub element_type: ElementType,
    pub type_name: String,
    pub handle: u64,
    pub special: Option<String>,
    pub is_main_window: bool,
    pub traits: Option<u64>,
    pub frame: Option<Frame>,
    pub label: Option<String>,
    pub identifier: Option<String>,
    pub value: Option<String>,
    pub placeholder: Option<String>,
}

/// Parse one element line. The error string names the grammar part that
/// failed.
pub fn parse_line(line: &str) -> Result<ParsedLine, String> {
    let caps = HEAD
        .captures(line)
        .ok_or_else(|| "expected '<indent><Type> 0x<handle>:'".to_string())?;

    let indent = caps["indent"].len();
    let depth = (indent / 2)
        .checked_sub(1)
        .ok_or_else(|| format!("indent of {} is below the minimum of 2", indent))?;

    let type_name = caps["kind"].to_string();
    let handle = u64::from_str_radix(&caps["handle"], 16)
        .map_err(|e| format!("bad handle 0x{}: {}", &caps["handle"], e))?;

    let rest = caps.name("rest").map_or("", |m| m.as_str());
    let extras = parse_extras(rest);

    // Geometry never appears inside quoted values; the special segment is
    // whatever precedes geometry and extras.
    let head = &rest[..extras.start.unwrap_or(rest.len())];
    let geometry = GEOMETRY.captures(head);
    let geometry_start = geometry.as_ref().and_then(|g| g.get(0)).map(|m| m.start());
    let special_end = [geometry_start, extras.start]
        .into_iter()
        .flatten()
        .min()
        .unwrap_or(rest.len());
    let special = rest[..special_end]
        .trim()
        .trim_end_matches(',')
        .trim()
        .to_string();

    let frame = geometry.and_then(|g| {
        Some(Frame {
            x: g["x"].trim().parse().ok()?,
            y: g["y"].trim().parse().ok()?,
            width: g["w"].trim().parse().ok()?,
            height: g["h"].trim().parse().ok()?,
        })
    });

    let is_main_window = MAIN_WINDOW.is_match(&special);
    let traits = TRAITS
        .captures(&special)
        .and_then(|c| c["bits"].parse::<u64>().ok());

    Ok(ParsedLine {
        depth,
        element_type: ElementType::from_name(&type_name),
        type_name,
        handle,
        special: if special.is_empty() { None } else { Some(special) },
        is_main_window,
        traits,
        frame,
        label: extras.label,
        identifier: extras.identifier,
        value: extras.value,
        placeholder: extras.placeholder,
    })
}

#[derive(Debug, Default)]
struct Extras {
    start: Option<usize>,
    label: Option<String>,
    identifier: Option<String>,
    value: Option<String>,
    placeholder: Option<String>,
}

/// Values may contain quotes, so each value runs up to the last `'`
/// before the next key (or the end of the line).
fn parse_extras(rest: &str) -> Extras {
    let keys: Vec<_> = EXTRA_KEY.captures_iter(rest).collect();
    let mut extras = Extras {
        start: keys.first().and_then(|c| c.get(0)).map(|m| m.start()),
        ..Default::default()
    };

    for (i, caps) in keys.iter().enumerate() {
        let (Some(whole), Some(key)) = (caps.get(0), caps.name("key")) else {
            continue;
        };
        let value_start = whole.end();
        let segment_end = keys
            .get(i + 1)
            .and_then(|next| next.get(0))
            .map_or(rest.len(), |m| m.start());
        let segment = &rest[value_start..segment_end];
        let value = match segment.rfind('\'') {
            Some(close) => &segment[..close],
            None => segment.trim_end(),
        };
        if value.is_empty() {
            continue;
        }

        let slot = match key.as_str() {
            "label" => &mut extras.label,
            "identifier" => &mut extras.identifier,
            "value" => &mut extras.value,
            _ => &mut extras.placeholder,
        };
        *slot = Some(value.to_string());
    }

    extras
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_line() {
        let line = "      Button 0x7fa1: traits: 8589934593, {{16.0, 44.0}, {60.5, 30.0}}, identifier: 'back', label: 'Back'";
        let parsed = parse_line(line).unwrap();
        assert_eq!(parsed.depth, 2);
        assert_eq!(parsed.element_type, ElementType::Button);
        assert_eq!(parsed.handle, 0x7fa1);
        assert_eq!(parsed.traits, Some(8589934593));
        assert_eq!(
            parsed.frame,
            Some(Frame { x: 16.0, y: 44.0, width: 60.5, height: 30.0 })
        );
        assert_eq!(parsed.identifier.as_deref(), Some("back"));
        assert_eq!(parsed.label.as_deref(), Some("Back"));
        assert!(!parsed.is_main_window);
    }

    #[test]
    fn main_window_marker() {
        let parsed =
            parse_line("    Window 0x600000199240: Main Window, {{0.0, 0.0}, {414.0, 736.0}}").unwrap();
        assert_eq!(parsed.depth, 1);
        assert!(parsed.is_main_window);
        assert_eq!(parsed.special.as_deref(), Some("Main Window"));
    }

    #[test]
    fn quoted_values_keep_inner_quotes() {
        let parsed = parse_line("    StaticText 0x1: label: 'It's here', value: 'a, b'").unwrap();
        assert_eq!(parsed.label.as_deref(), Some("It's here"));
        assert_eq!(parsed.value.as_deref(), Some("a, b"));
        assert_eq!(parsed.frame, None);
    }

    #[test]
    fn braces_inside_label_are_not_geometry() {
        let parsed = parse_line("    StaticText 0x2: label: 'Size {1, 2}, {3, 4}'").unwrap();
        assert_eq!(parsed.frame, None);
        assert_eq!(parsed.label.as_deref(), Some("Size {1, 2}, {3, 4}"));
        assert_eq!(parsed.special, None);
    }

    #[test]
    fn geometry_before_label_with_braces_is_kept() {
        let parsed =
            parse_line("    Button 0x3: {{1.0, 2.0}, {3.0, 4.0}}, label: '{9, 9}, {9, 9}'").unwrap();
        assert_eq!(
            parsed.frame,
            Some(Frame { x: 1.0, y: 2.0, width: 3.0, height: 4.0 })
        );
    }

    #[test]
    fn unparseable_geometry_is_absent() {
        let parsed = parse_line("    Other 0x2: {{abc, 0.0}, {1.0, 1.0}}").unwrap();
        assert_eq!(parsed.frame, None);
    }

    #[test]
    fn rejects_shallow_indent_and_garbage() {
        assert!(parse_line("Button 0x1: ").is_err());
        assert!(parse_line("  Button: no handle").is_err());
        assert!(parse_line("").is_err());
    }

    #[test]
    fn unknown_type_is_other() {
        let parsed = parse_line("  Hologram 0xff: ").unwrap();
        assert_eq!(parsed.element_type, ElementType::Other);
        assert_eq!(parsed.type_name, "Hologram");
        assert_eq!(parsed.depth, 0);
    }
}
