use directories::{BaseDirs, ProjectDirs};
use std::path::PathBuf;

/// Profile mode for the application (dev or prod)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    Dev,
    Prod,
}

fn app_name(profile: Profile) -> &'static str {
    match profile {
        Profile::Dev => "leettrack-dev",
        Profile::Prod => "leettrack",
    }
}

/// Get the configuration directory path.
/// If profile is Dev, uses "leettrack-dev" instead of "leettrack".
pub fn get_config_dir(profile: Profile) -> Option<PathBuf> {
    ProjectDirs::from("com", "leettrack", app_name(profile))
        .map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the data directory path.
pub fn get_data_dir(profile: Profile) -> Option<PathBuf> {
    ProjectDirs::from("com", "leettrack", app_name(profile))
        .map(|dirs| dirs.data_dir().to_path_buf())
}

/// Default location of the problems JSON file.
pub fn default_data_file(profile: Profile) -> PathBuf {
    get_data_dir(profile)
        .unwrap_or_else(|| PathBuf::from("."))
        .join("leettrack-data.json")
}

/// Default location of the catalog snapshot used for autocomplete.
pub fn default_catalog_file(profile: Profile) -> PathBuf {
    get_data_dir(profile)
        .unwrap_or_else(|| PathBuf::from("."))
        .join("problems.json")
}

/// Expand `~` in a path string to the user's home directory
pub fn expand_path(path: &str) -> PathBuf {
    if path.starts_with("~/") {
        if let Some(home) = BaseDirs::new().map(|d| d.home_dir().to_path_buf()) {
            return home.join(&path[2..]);
        }
    }
    PathBuf::from(path)
}

/// Parsed key binding information
#[derive(Debug, Clone)]
pub struct ParsedKeyBinding {
    pub key_code: crossterm::event::KeyCode,
    pub requires_ctrl: bool,
}

/// Check if a key event has the primary modifier (Ctrl on Windows/Linux, Option/Alt on macOS)
/// This follows the standard cross-platform TUI pattern where Ctrl and Option/Alt are treated as equivalent
pub fn has_primary_modifier(modifiers: crossterm::event::KeyModifiers) -> bool {
    #[cfg(target_os = "macos")]
    {
        modifiers.contains(crossterm::event::KeyModifiers::CONTROL)
            || modifiers.contains(crossterm::event::KeyModifiers::ALT)
    }

    #[cfg(not(target_os = "macos"))]
    {
        modifiers.contains(crossterm::event::KeyModifiers::CONTROL)
    }
}

/// Format a key binding string for display, showing the platform-appropriate modifier
/// On macOS, "Ctrl+" is replaced with "Opt+" for better UX (Option key)
pub fn format_key_binding_for_display(key_binding: &str) -> String {
    #[cfg(target_os = "macos")]
    {
        key_binding.replace("Ctrl+", "Opt+")
    }

    #[cfg(not(target_os = "macos"))]
    {
        key_binding.to_string()
    }
}

/// Parse a key binding string from config into a ParsedKeyBinding
/// Supports: single keys ("q", "n", "j", "k"), special keys ("Enter", "Left", "Right"),
/// and modifiers ("Ctrl+b")
pub fn parse_key_binding(key_str: &str) -> Result<ParsedKeyBinding, String> {
    let key_str = key_str.trim();

    if let Some(key_part) = key_str.strip_prefix("Ctrl+") {
        let key_code = parse_key_code(key_part)?;
        return Ok(ParsedKeyBinding {
            key_code,
            requires_ctrl: true,
        });
    }

    let key_code = parse_key_code(key_str)?;
    Ok(ParsedKeyBinding {
        key_code,
        requires_ctrl: false,
    })
}

/// Parse a key code from a string (without modifiers)
fn parse_key_code(key_str: &str) -> Result<crossterm::event::KeyCode, String> {
    match key_str {
        "Enter" => Ok(crossterm::event::KeyCode::Enter),
        "Esc" | "Escape" => Ok(crossterm::event::KeyCode::Esc),
        "Backspace" => Ok(crossterm::event::KeyCode::Backspace),
        "Tab" => Ok(crossterm::event::KeyCode::Tab),
        "Space" | " " => Ok(crossterm::event::KeyCode::Char(' ')),
        "Left" => Ok(crossterm::event::KeyCode::Left),
        "Right" => Ok(crossterm::event::KeyCode::Right),
        "Up" => Ok(crossterm::event::KeyCode::Up),
        "Down" => Ok(crossterm::event::KeyCode::Down),
        "Home" => Ok(crossterm::event::KeyCode::Home),
        "End" => Ok(crossterm::event::KeyCode::End),
        "PageUp" => Ok(crossterm::event::KeyCode::PageUp),
        "PageDown" => Ok(crossterm::event::KeyCode::PageDown),
        "Delete" => Ok(crossterm::event::KeyCode::Delete),
        "Insert" => Ok(crossterm::event::KeyCode::Insert),
        "F1" => Ok(crossterm::event::KeyCode::F(1)),
        "F2" => Ok(crossterm::event::KeyCode::F(2)),
        "F3" => Ok(crossterm::event::KeyCode::F(3)),
        "F4" => Ok(crossterm::event::KeyCode::F(4)),
        "F5" => Ok(crossterm::event::KeyCode::F(5)),
        "F6" => Ok(crossterm::event::KeyCode::F(6)),
        "F7" => Ok(crossterm::event::KeyCode::F(7)),
        "F8" => Ok(crossterm::event::KeyCode::F(8)),
        "F9" => Ok(crossterm::event::KeyCode::F(9)),
        "F10" => Ok(crossterm::event::KeyCode::F(10)),
        "F11" => Ok(crossterm::event::KeyCode::F(11)),
        "F12" => Ok(crossterm::event::KeyCode::F(12)),
        _ => {
            if key_str.chars().count() == 1 {
                match key_str.chars().next() {
                    Some(c) => Ok(crossterm::event::KeyCode::Char(c)),
                    None => Err("Empty key string after length check".to_string()),
                }
            } else {
                Err(format!("Unknown key binding: {}", key_str))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyCode;

    #[test]
    fn parses_plain_and_modified_bindings() {
        let b = parse_key_binding("q").unwrap();
        assert_eq!(b.key_code, KeyCode::Char('q'));
        assert!(!b.requires_ctrl);

        let b = parse_key_binding("Ctrl+s").unwrap();
        assert_eq!(b.key_code, KeyCode::Char('s'));
        assert!(b.requires_ctrl);

        let b = parse_key_binding("F1").unwrap();
        assert_eq!(b.key_code, KeyCode::F(1));

        assert!(parse_key_binding("NotAKey").is_err());
    }
}
