//! Persisted default flags.
//!
//! A config file holds command-line flags, one or more per line, with `#`
//! comments. The global file sits in the platform config directory and a
//! `.tvirc` in the working directory is layered on top of it.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConfigFlags {
    pub line_numbers: bool,
    pub no_highlight: bool,
    pub log_file: Option<PathBuf>,
}

impl ConfigFlags {
    /// Merge two flag sets; booleans are OR-ed and `other` wins for options.
    pub fn union(&self, other: &Self) -> Self {
        Self {
            line_numbers: self.line_numbers || other.line_numbers,
            no_highlight: self.no_highlight || other.no_highlight,
            log_file: other.log_file.clone().or_else(|| self.log_file.clone()),
        }
    }
}

pub fn global_config_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        if let Some(appdata) = std::env::var_os("APPDATA") {
            return PathBuf::from(appdata).join("tvi").join("config");
        }
    }

    #[cfg(target_os = "macos")]
    {
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join("Library")
                .join("Application Support")
                .join("tvi")
                .join("config");
        }
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
            return PathBuf::from(xdg).join("tvi").join("config");
        }
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home).join(".config").join("tvi").join("config");
        }
    }

    local_override_path()
}

pub fn local_override_path() -> PathBuf {
    PathBuf::from(".tvirc")
}

/// Read flags from `path`; a missing file gives the defaults.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read.
pub fn load_config_flags(path: &Path) -> Result<ConfigFlags> {
    if !path.exists() {
        return Ok(ConfigFlags::default());
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let tokens = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .flat_map(|line| line.split_whitespace().map(ToOwned::to_owned))
        .collect::<Vec<_>>();
    let flags = parse_flag_tokens(&tokens);
    tracing::debug!(path = %path.display(), ?flags, "loaded config");
    Ok(flags)
}

/// Write `flags` to `path`, creating its directory.
///
/// # Errors
///
/// Returns an error if the directory or file cannot be written.
pub fn save_config_flags(path: &Path, flags: &ConfigFlags) -> Result<()> {
    let mut lines = vec!["# tvi defaults (saved with --save)".to_string()];
    if flags.line_numbers {
        lines.push("--line-numbers".to_string());
    }
    if flags.no_highlight {
        lines.push("--no-highlight".to_string());
    }
    if let Some(log) = &flags.log_file {
        lines.push(format!("--log-file {}", log.display()));
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config dir {}", parent.display()))?;
    }
    fs::write(path, format!("{}\n", lines.join("\n")))
        .with_context(|| format!("Failed to write config {}", path.display()))
}

/// Delete the config file at `path` if there is one.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be removed.
pub fn clear_config_flags(path: &Path) -> Result<()> {
    if path.exists() {
        fs::remove_file(path).with_context(|| format!("Failed to remove {}", path.display()))?;
    }
    Ok(())
}

/// Pick the persistable flags out of a token list, ignoring everything
/// else (file names, per-run flags).
pub fn parse_flag_tokens(tokens: &[String]) -> ConfigFlags {
    let mut flags = ConfigFlags::default();
    let mut i = 0;
    while i < tokens.len() {
        let token = tokens[i].as_str();
        match token {
            "-n" | "--line-numbers" => flags.line_numbers = true,
            "--no-highlight" => flags.no_highlight = true,
            "--log-file" => {
                if let Some(next) = tokens.get(i + 1) {
                    flags.log_file = Some(PathBuf::from(next));
                    i += 1;
                }
            }
            _ => {
                if let Some(value) = token.strip_prefix("--log-file=") {
                    flags.log_file = Some(PathBuf::from(value));
                }
            }
        }
        i += 1;
    }
    flags
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn tokens(args: &[&str]) -> Vec<String> {
        args.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_parse_flag_tokens_extracts_known_flags() {
        let flags = parse_flag_tokens(&tokens(&[
            "tvi",
            "-n",
            "--no-highlight",
            "--log-file=tvi.log",
            "--record",
            "keys.bin",
            "notes.txt",
        ]));
        assert!(flags.line_numbers);
        assert!(flags.no_highlight);
        assert_eq!(flags.log_file, Some(PathBuf::from("tvi.log")));
    }

    #[test]
    fn test_parse_log_file_as_separate_token() {
        let flags = parse_flag_tokens(&tokens(&["--log-file", "a.log", "--line-numbers"]));
        assert_eq!(flags.log_file, Some(PathBuf::from("a.log")));
        assert!(flags.line_numbers);
    }

    #[test]
    fn test_dangling_log_file_is_ignored() {
        let flags = parse_flag_tokens(&tokens(&["--log-file"]));
        assert_eq!(flags.log_file, None);
    }

    #[test]
    fn test_config_union_merges_cli_over_file_for_options() {
        let file = ConfigFlags {
            line_numbers: true,
            log_file: Some(PathBuf::from("file.log")),
            ..ConfigFlags::default()
        };
        let cli = ConfigFlags {
            no_highlight: true,
            log_file: Some(PathBuf::from("cli.log")),
            ..ConfigFlags::default()
        };
        let merged = file.union(&cli);
        assert!(merged.line_numbers);
        assert!(merged.no_highlight);
        assert_eq!(merged.log_file, Some(PathBuf::from("cli.log")));
    }

    #[test]
    fn test_save_load_and_clear_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config");
        let flags = ConfigFlags {
            line_numbers: true,
            no_highlight: true,
            log_file: Some(PathBuf::from("tvi.log")),
        };

        save_config_flags(&path, &flags).unwrap();
        assert_eq!(load_config_flags(&path).unwrap(), flags);

        clear_config_flags(&path).unwrap();
        assert!(!path.exists());
        assert_eq!(load_config_flags(&path).unwrap(), ConfigFlags::default());
    }

    #[test]
    fn test_comments_and_blank_lines_are_skipped() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(".tvirc");
        fs::write(&path, "# --no-highlight\n\n  --line-numbers  \n").unwrap();
        let flags = load_config_flags(&path).unwrap();
        assert!(flags.line_numbers);
        assert!(!flags.no_highlight);
    }
}
