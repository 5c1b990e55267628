use serde::Serialize;
use serde_json::Value;

use crate::core::category::FileStatusCategory;

/// Contents of the `workbench.colorCustomizations` settings object.
pub type ColorCustomization = serde_json::Map<String, Value>;

pub const DEFAULT_ADDED: &str = "#6FC2E9";
pub const DEFAULT_CONFLICTING: &str = "#E51400";
pub const DEFAULT_DELETED: &str = "#68217A";
pub const DEFAULT_MODIFIED: &str = "#E5C365";
pub const DEFAULT_UNTRACKED: &str = "#35CE8D";
pub const DEFAULT_IGNORED: &str = "#9C9C9C";
pub const DEFAULT_FILE_COLOR: &str = "#FFFFFF";
pub const DEFAULT_BACKGROUND: &str = "#000000";

/// Deleted default as shipped by early releases, without the leading `#`.
pub const DELETED_LEGACY: &str = "68217A";
/// Untracked default used by releases that followed the editor's accent blue.
pub const UNTRACKED_ALT: &str = "#007ACC";

pub const SLOT_ADDED: &str = "gitDecoration.addedResourceForeground";
pub const SLOT_CONFLICTING: &str = "gitDecoration.conflictingResourceForeground";
pub const SLOT_DELETED: &str = "gitDecoration.deletedResourceForeground";
pub const SLOT_MODIFIED: &str = "gitDecoration.modifiedResourceForeground";
pub const SLOT_UNTRACKED: &str = "gitDecoration.untrackedResourceForeground";
pub const SLOT_IGNORED: &str = "gitDecoration.ignoredResourceForeground";

pub const TAB_ACTIVE_FOREGROUND: &str = "tab.activeForeground";
pub const TAB_ACTIVE_BORDER: &str = "tab.activeBorder";
pub const TAB_UNFOCUSED_ACTIVE_FOREGROUND: &str = "tab.unfocusedActiveForeground";
pub const TAB_ACTIVE_BACKGROUND: &str = "tab.activeBackground";
pub const STATUS_BAR_BACKGROUND: &str = "statusBar.background";
pub const STATUS_BAR_FOREGROUND: &str = "statusBar.foreground";

const INVERT_THRESHOLD: u64 = 0xFF_FFFF / 2;

/// Overlay key a user sets to recolor `category`; `Unknown` has none.
pub fn slot_key(category: FileStatusCategory) -> Option<&'static str> {
    match category {
        FileStatusCategory::Added => Some(SLOT_ADDED),
        FileStatusCategory::Conflicting => Some(SLOT_CONFLICTING),
        FileStatusCategory::Deleted => Some(SLOT_DELETED),
        FileStatusCategory::Modified => Some(SLOT_MODIFIED),
        FileStatusCategory::Untracked => Some(SLOT_UNTRACKED),
        FileStatusCategory::Ignored => Some(SLOT_IGNORED),
        FileStatusCategory::Unknown => None,
    }
}

pub fn default_color(category: FileStatusCategory) -> &'static str {
    match category {
        FileStatusCategory::Added => DEFAULT_ADDED,
        FileStatusCategory::Conflicting => DEFAULT_CONFLICTING,
        FileStatusCategory::Deleted => DEFAULT_DELETED,
        FileStatusCategory::Modified => DEFAULT_MODIFIED,
        FileStatusCategory::Untracked => DEFAULT_UNTRACKED,
        FileStatusCategory::Ignored => DEFAULT_IGNORED,
        FileStatusCategory::Unknown => DEFAULT_FILE_COLOR,
    }
}

pub fn resolve_color(category: FileStatusCategory, overlay: &ColorCustomization) -> String {
    slot_key(category)
        .and_then(|key| overlay.get(key))
        .and_then(Value::as_str)
        .filter(|color| !color.is_empty())
        .unwrap_or_else(|| default_color(category))
        .to_string()
}

/// Black or white text for a background of `color`.
///
/// This is a plain midpoint test on the 24-bit value, not perceptual
/// contrast. Input that is not hexadecimal compares as not-greater and
/// yields white.
pub fn invert(color: Option<&str>) -> Option<&'static str> {
    let color = color.filter(|color| !color.is_empty())?;
    let above_midpoint = parse_hex(color).is_some_and(|value| value > INVERT_THRESHOLD);
    Some(if above_midpoint { "#000000" } else { "#ffffff" })
}

fn parse_hex(color: &str) -> Option<u64> {
    let digits = color.trim();
    let digits = digits.strip_prefix('#').unwrap_or(digits);
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let significant = digits.trim_start_matches('0');
    if significant.len() > 16 {
        return Some(u64::MAX);
    }
    if significant.is_empty() {
        return Some(0);
    }
    u64::from_str_radix(significant, 16).ok()
}

/// Tab and status bar colors derived from one resolved file color.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayColorState {
    pub tab_active_foreground: Option<String>,
    pub tab_active_border: Option<String>,
    pub tab_unfocused_active_foreground: Option<String>,
    pub tab_active_background: Option<String>,
    pub status_bar_background: Option<String>,
    pub status_bar_foreground: Option<String>,
}

impl DisplayColorState {
    pub fn for_color(color: &str) -> Self {
        let primary = Some(color.to_string()).filter(|color| !color.is_empty());
        Self {
            tab_active_foreground: primary.clone(),
            tab_active_border: primary.clone(),
            tab_unfocused_active_foreground: Some(DEFAULT_FILE_COLOR.to_string()),
            tab_active_background: Some(DEFAULT_BACKGROUND.to_string()),
            status_bar_background: primary,
            status_bar_foreground: invert(Some(color)).map(str::to_string),
        }
    }

    pub fn slots(&self) -> [(&'static str, Option<&str>); 6] {
        [
            (TAB_ACTIVE_FOREGROUND, self.tab_active_foreground.as_deref()),
            (TAB_ACTIVE_BORDER, self.tab_active_border.as_deref()),
            (
                TAB_UNFOCUSED_ACTIVE_FOREGROUND,
                self.tab_unfocused_active_foreground.as_deref(),
            ),
            (TAB_ACTIVE_BACKGROUND, self.tab_active_background.as_deref()),
            (STATUS_BAR_BACKGROUND, self.status_bar_background.as_deref()),
            (STATUS_BAR_FOREGROUND, self.status_bar_foreground.as_deref()),
        ]
    }

    pub fn is_empty(&self) -> bool {
        self.slots()
            .iter()
            .all(|(_, value)| value.map_or(true, str::is_empty))
    }

    /// Merge into `current`, keeping unrelated keys.
    ///
    /// Returns `None` when the merged mapping holds no usable value, which
    /// callers write as "no customization" rather than an empty object.
    pub fn merge_into(&self, current: &ColorCustomization) -> Option<ColorCustomization> {
        let mut merged = current.clone();
        for (key, value) in self.slots() {
            match value.filter(|value| !value.is_empty()) {
                Some(value) => {
                    merged.insert(key.to_string(), Value::String(value.to_string()));
                }
                None => {
                    merged.shift_remove(key);
                }
            }
        }

        merged.values().any(is_set).then_some(merged)
    }
}

fn is_set(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::String(text) => !text.is_empty(),
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        Value::Array(_) | Value::Object(_) => true,
    }
}
