// Central place for UI strings and other non-localized constants.
// Keep these out of gui.rs to reduce duplication and make tweaks safer.

// English UI strings (EN_ prefix to make future localization easier)
pub const EN_APP_TITLE: &str = "Flatini Settings Editor";

pub const EN_BTN_NEW: &str = "New";
pub const EN_BTN_OPEN: &str = "Open...";
pub const EN_BTN_SAVE: &str = "Save";
pub const EN_BTN_SAVE_AS: &str = "Save As...";
pub const EN_BTN_ABOUT: &str = "About";
pub const EN_BTN_TOGGLE_THEME: &str = "Theme";

pub const EN_BTN_UNDO: &str = "Undo";
pub const EN_BTN_REDO: &str = "Redo";

pub const EN_WINDOW_ABOUT: &str = "About";
pub const EN_ABOUT_HEADING: &str = "Flatini Settings Editor";
pub const EN_ABOUT_VERSION: &str = "Version:";
pub const EN_ABOUT_SHORTCUTS: &str = "Shortcuts:";
pub const EN_ABOUT_SHORTCUT_FILE: &str = "- Ctrl+O / Ctrl+S: Open / Save";
pub const EN_ABOUT_SHORTCUT_UNDO: &str = "- Ctrl+Z / Ctrl+Y: Undo / Redo";

pub const EN_HOME_HEADING: &str = "Flatini Settings Editor";
pub const EN_HOME_INSTRUCTIONS: &str =
    "Open a flat key=value settings file (.ini) to begin, or start a new one.";

pub const EN_HEADING_ENTRIES: &str = "Entries";
pub const EN_HEADING_EDIT: &str = "Edit";
pub const EN_HEADING_ADD: &str = "Add Entry";

pub const EN_LABEL_FILTER: &str = "Filter:";
pub const EN_HINT_FILTER: &str = "key or value";
pub const EN_FILTER_NO_MATCHES: &str = "No matches.";

pub const EN_COL_KEY: &str = "Key";
pub const EN_COL_VALUE: &str = "Value";

pub const EN_SELECT_ENTRY: &str = "Select an entry to edit.";

pub const EN_BTN_APPLY: &str = "Apply";
pub const EN_BTN_DELETE: &str = "Delete";
pub const EN_BTN_ADD: &str = "Add";
pub const EN_BTN_CLEAR: &str = "Clear";

pub const EN_HINT_KEY: &str = "key";
pub const EN_HINT_VALUE: &str = "value";

pub const EN_LABEL_ENTRIES_COUNT: &str = "entries:";
pub const EN_LABEL_CHANGES_COUNT: &str = "changes:";

pub const EN_PREFIX_UNDO: &str = "Undo:";
pub const EN_PREFIX_REDO: &str = "Redo:";

pub const EN_BADGE_DIRTY: &str = "dirty";
pub const EN_PLACEHOLDER_UNSAVED: &str = "<unsaved>";

pub const EN_DIALOG_FILTER: &str = "Settings";

// Newline constants (used for save formatting; keep out of store code).
pub const NL_LF: &str = "\n";
pub const NL_CRLF: &str = "\r\n";

// On-disk settings file name under <data dir>/<organization>/<product>/.
pub const SETTINGS_FILE_NAME: &str = "settings.ini";

// Identity and keys for the editor's own persisted preferences.
pub const EDITOR_ORGANIZATION: &str = "flatini";
pub const EDITOR_PRODUCT: &str = "editor";
pub const PREF_THEME: &str = "theme";
pub const PREF_THEME_DARK: &str = "dark";
pub const PREF_THEME_LIGHT: &str = "light";
pub const PREF_LAST_DIR: &str = "lastDir";
