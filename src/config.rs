//! Flat `key = value...` configuration
//!
//! One option per line. Everything after the first `=` is split into tokens
//! using shell quoting rules, so `externalConnectors = HDMI-1 "DP 2"` yields
//! two values. Empty lines and lines starting with `#` are ignored; a `#`
//! inside a value is literal, so `HDMI-1 #DP-1` keeps both connectors.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::constants;
use crate::error::{Error, Result};

/// Option name → list of shell-split values. Read-only after loading.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    values: HashMap<String, Vec<String>>,
}

impl Config {
    /// Default location: `~/.dsl.conf`
    pub fn path() -> PathBuf {
        let mut path = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push(constants::config::FILENAME);
        path
    }

    /// Load from `path`. A missing file is an empty config, not an error.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            info!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }
        let contents = fs::read_to_string(path)?;
        let config = Self::parse(&contents)?;
        info!(path = %path.display(), keys = config.len(), "Loaded config");
        Ok(config)
    }

    pub fn parse(contents: &str) -> Result<Self> {
        let mut values = HashMap::new();
        for (idx, raw) in contents.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let (key, rest) = line
                .split_once('=')
                .ok_or(Error::ConfigParse { line: idx + 1 })?;
            let tokens = shlex::split(&escape_hashes(rest))
                .ok_or(Error::ConfigParse { line: idx + 1 })?;
            debug!(key = key.trim(), ?tokens, "Parsed config line");
            values.insert(key.trim().to_string(), tokens);
        }
        Ok(Self { values })
    }

    pub fn get(&self, key: &str) -> Option<&[String]> {
        self.values.get(key).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }
}

/// Backslash-escape every unquoted `#` that starts a word, which shell
/// splitting would otherwise treat as the start of a comment.
fn escape_hashes(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    let mut quote = None;
    let mut word_start = true;
    let mut chars = value.chars();
    while let Some(c) = chars.next() {
        match (quote, c) {
            (None, '#') if word_start => escaped.push_str("\\#"),
            (None, '\\') | (Some('"'), '\\') => {
                escaped.push(c);
                if let Some(next) = chars.next() {
                    escaped.push(next);
                }
            }
            (None, '"' | '\'') => {
                quote = Some(c);
                escaped.push(c);
            }
            (Some(q), _) if c == q => {
                quote = None;
                escaped.push(c);
            }
            _ => escaped.push(c),
        }
        word_start = quote.is_none() && c.is_whitespace();
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_splits_values_with_shell_quoting() {
        let config = Config::parse(
            "# laptop setup\n\
             \n\
             internalConnector = eDP-1\n\
             externalConnectors = HDMI-1 \"DP 2\" 'VGA-1'\n",
        )
        .unwrap();

        assert_eq!(config.len(), 2);
        assert_eq!(config.get("internalConnector"), Some(&["eDP-1".to_string()][..]));
        assert_eq!(
            config.get("externalConnectors").unwrap(),
            &["HDMI-1", "DP 2", "VGA-1"]
        );
    }

    #[test]
    fn test_parse_allows_empty_value_list() {
        let config = Config::parse("externalConnectors =").unwrap();
        assert_eq!(config.get("externalConnectors"), Some(&[][..]));
    }

    #[test]
    fn test_parse_later_line_overrides_key() {
        let config = Config::parse("a = 1\na = 2 3").unwrap();
        assert_eq!(config.get("a").unwrap(), &["2", "3"]);
    }

    #[test]
    fn test_parse_value_keeps_further_equals_signs() {
        let config = Config::parse("key = a=b").unwrap();
        assert_eq!(config.get("key").unwrap(), &["a=b"]);
    }

    #[test]
    fn test_parse_keeps_hash_prefixed_values() {
        let config = Config::parse("externalConnectors = HDMI-1 #DP-1").unwrap();
        assert_eq!(config.get("externalConnectors").unwrap(), &["HDMI-1", "#DP-1"]);

        let config = Config::parse("a = \"x #y\" z#w '#v'").unwrap();
        assert_eq!(config.get("a").unwrap(), &["x #y", "z#w", "#v"]);
    }

    #[test]
    fn test_escape_hashes_only_touches_unquoted_word_starts() {
        assert_eq!(escape_hashes(" #a b#c"), " \\#a b#c");
        assert_eq!(escape_hashes("\"#a\" '#b'"), "\"#a\" '#b'");
        assert_eq!(escape_hashes("\\#a"), "\\#a");
    }

    #[test]
    fn test_parse_missing_equals_reports_line_number() {
        let err = Config::parse("# comment\n\ninternalConnector = eDP\nbogus line\n").unwrap_err();
        assert!(matches!(err, Error::ConfigParse { line: 4 }));
        assert!(err.to_string().contains("line 4"));
    }

    #[test]
    fn test_parse_unbalanced_quote_is_error() {
        let err = Config::parse("externalConnectors = \"HDMI-1").unwrap_err();
        assert!(matches!(err, Error::ConfigParse { line: 1 }));
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(&dir.path().join("does-not-exist.conf")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "internalConnector = LVDS1").unwrap();
        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.get("internalConnector").unwrap(), &["LVDS1"]);
    }

    #[test]
    fn test_path_ends_with_dotfile() {
        assert!(Config::path().ends_with(constants::config::FILENAME));
    }
}
