use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// On-disk TOML configuration structure.
/// All fields are optional so partial configs work (merge with defaults).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    pub input: Option<InputConfig>,
    pub output: Option<OutputConfig>,
    pub parsing: Option<ParsingSection>,
    pub concurrency: Option<ConcurrencyConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InputConfig {
    pub dir: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    pub path: Option<String>,
    /// `grouped` or `unified`.
    pub mode: Option<String>,
    /// `markdown` or `json`.
    pub format: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParsingSection {
    /// Extra section header literals (appended to the defaults unless
    /// `replace_defaults` is set).
    pub section_headers: Option<Vec<String>>,
    /// Extra next-section marker literals.
    pub next_section_markers: Option<Vec<String>>,
    pub replace_defaults: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConcurrencyConfig {
    pub num_workers: Option<usize>,
}

/// Platform config directory path: `<config_dir>/glossator/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("glossator").join("config.toml"))
}

/// Load config by cascading CWD `.glossator.toml` over platform config.
/// CWD values override platform values.
pub fn load_config() -> ConfigFile {
    let platform = config_path().and_then(|p| load_from_path(&p));
    let cwd = load_from_path(Path::new(".glossator.toml"));

    match (platform, cwd) {
        (None, None) => ConfigFile::default(),
        (Some(p), None) => p,
        (None, Some(c)) => c,
        (Some(p), Some(c)) => merge(p, c),
    }
}

/// Load a config from a specific path. Returns `None` if the file doesn't
/// exist or can't be parsed.
pub fn load_from_path(path: &Path) -> Option<ConfigFile> {
    let content = std::fs::read_to_string(path).ok()?;
    toml::from_str(&content).ok()
}

/// Overlay value if set, otherwise base.
fn pick<S, T>(
    base: &Option<S>,
    overlay: &Option<S>,
    field: impl Fn(&S) -> Option<T>,
) -> Option<T> {
    overlay
        .as_ref()
        .and_then(&field)
        .or_else(|| base.as_ref().and_then(&field))
}

/// Merge two configs: `overlay` values take precedence over `base`.
pub fn merge(base: ConfigFile, overlay: ConfigFile) -> ConfigFile {
    ConfigFile {
        input: Some(InputConfig {
            dir: pick(&base.input, &overlay.input, |i| i.dir.clone()),
        }),
        output: Some(OutputConfig {
            path: pick(&base.output, &overlay.output, |o| o.path.clone()),
            mode: pick(&base.output, &overlay.output, |o| o.mode.clone()),
            format: pick(&base.output, &overlay.output, |o| o.format.clone()),
        }),
        parsing: Some(ParsingSection {
            section_headers: pick(&base.parsing, &overlay.parsing, |p| {
                p.section_headers.clone()
            }),
            next_section_markers: pick(&base.parsing, &overlay.parsing, |p| {
                p.next_section_markers.clone()
            }),
            replace_defaults: pick(&base.parsing, &overlay.parsing, |p| p.replace_defaults),
        }),
        concurrency: Some(ConcurrencyConfig {
            num_workers: pick(&base.concurrency, &overlay.concurrency, |c| c.num_workers),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_file() {
        let toml_str = r#"
[input]
dir = "./docs"

[output]
path = "out.md"
mode = "unified"
format = "json"

[parsing]
section_headers = ["nomenclature"]
next_section_markers = ["contents"]
replace_defaults = true

[concurrency]
num_workers = 8
"#;
        let parsed: ConfigFile = toml::from_str(toml_str).unwrap();
        assert_eq!(parsed.input.unwrap().dir.unwrap(), "./docs");
        let output = parsed.output.unwrap();
        assert_eq!(output.mode.as_deref(), Some("unified"));
        assert_eq!(output.format.as_deref(), Some("json"));
        let parsing = parsed.parsing.unwrap();
        assert_eq!(parsing.section_headers.unwrap(), vec!["nomenclature"]);
        assert_eq!(parsing.replace_defaults, Some(true));
        assert_eq!(parsed.concurrency.unwrap().num_workers, Some(8));
    }

    #[test]
    fn absent_sections_deserialize_as_none() {
        let parsed: ConfigFile = toml::from_str("[output]\nmode = \"grouped\"\n").unwrap();
        assert!(parsed.input.is_none());
        assert!(parsed.output.unwrap().path.is_none());
    }

    #[test]
    fn merge_overlay_wins() {
        let base = ConfigFile {
            output: Some(OutputConfig {
                path: Some("base.md".to_string()),
                mode: Some("grouped".to_string()),
                ..Default::default()
            }),
            ..Default::default()
        };
        let overlay = ConfigFile {
            output: Some(OutputConfig {
                mode: Some("unified".to_string()),
                ..Default::default()
            }),
            ..Default::default()
        };
        let merged = merge(base, overlay).output.unwrap();
        assert_eq!(merged.mode.as_deref(), Some("unified"));
        // Fields absent from the overlay fall through to the base.
        assert_eq!(merged.path.as_deref(), Some("base.md"));
        assert!(merged.format.is_none());
    }

    #[test]
    fn merge_base_preserved_when_overlay_absent() {
        let base = ConfigFile {
            concurrency: Some(ConcurrencyConfig {
                num_workers: Some(2),
            }),
            ..Default::default()
        };
        let merged = merge(base, ConfigFile::default());
        assert_eq!(merged.concurrency.unwrap().num_workers, Some(2));
    }

    #[test]
    fn load_from_path_missing_or_invalid() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_from_path(&dir.path().join("nope.toml")).is_none());

        let bad = dir.path().join("bad.toml");
        std::fs::write(&bad, "this is [not toml").unwrap();
        assert!(load_from_path(&bad).is_none());

        let good = dir.path().join("good.toml");
        std::fs::write(&good, "[input]\ndir = \"pdfs\"\n").unwrap();
        let cfg = load_from_path(&good).unwrap();
        assert_eq!(cfg.input.unwrap().dir.as_deref(), Some("pdfs"));
    }
}
