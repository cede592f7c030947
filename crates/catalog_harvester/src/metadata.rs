//! Version and platform extraction from artifact filenames and directory names.

use std::sync::LazyLock;

use regex::Regex;

/// Tried in order; compound shapes come first so `17.0.2+8` is not cut to `17`.
static VERSION_SHAPES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"\d+u\d+b\d+",
        r"\d+\.\d+\.\d+\+\d+",
        r"\d+\.\d+\.\d+",
        r"\d+",
    ]
    .iter()
    .map(|shape| Regex::new(shape).expect("version shape is valid"))
    .collect()
});

static BUILD_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^b\d+$").expect("build tag pattern is valid"));

pub const UNKNOWN_VERSION: &str = "unknown";

const FILENAME_PREFIX: &str = "openjdk-";
const LEGACY_MARKER: &str = "openjdk-8";
const SOURCE_MARKERS: [&str; 2] = ["_src.", "-src-"];
const ARCHIVE_EXTENSIONS: [&str; 2] = [".tar.gz", ".zip"];

/// First version-looking token in `filename`, or `"unknown"`.
pub fn extract_version(filename: &str) -> String {
    VERSION_SHAPES
        .iter()
        .find_map(|shape| shape.find(filename))
        .map(|found| found.as_str().to_string())
        .unwrap_or_else(|| UNKNOWN_VERSION.to_string())
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FilenameError {
    #[error("empty filename")]
    Empty,
    #[error("unrecognised filename layout ({0})")]
    Format(String),
    #[error("unknown operating system ({0})")]
    UnknownOs(String),
    #[error("unknown architecture ({0})")]
    UnknownArch(String),
    #[error("source archive, skipped ({0})")]
    SourceArchive(String),
}

impl FilenameError {
    /// The file is not an installable artifact; skipping it is expected.
    pub fn is_skip(&self) -> bool {
        matches!(self, FilenameError::SourceArchive(_))
    }

    pub fn is_unknown_platform(&self) -> bool {
        matches!(self, FilenameError::UnknownOs(_) | FilenameError::UnknownArch(_))
    }
}

/// Filename layouts a mirror publishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilenameGrammar {
    /// `openjdk-<version>_<os>-<arch>_<suffix>.<ext>` only.
    Standard,
    /// Standard, plus the dash-separated major-8 layouts
    /// `openjdk-8u43-linux-x64.tar.gz` and
    /// `openjdk-8u41-b04-windows-i586-14_jan_2020.zip`. Source archives are
    /// rejected with [`FilenameError::SourceArchive`].
    WithLegacy,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedFilename {
    pub os: String,
    pub arch: String,
    pub version: String,
}

impl FilenameGrammar {
    pub fn parse(self, filename: &str) -> Result<ParsedFilename, FilenameError> {
        let filename = filename.trim();
        if filename.is_empty() {
            return Err(FilenameError::Empty);
        }

        if self == FilenameGrammar::WithLegacy {
            if SOURCE_MARKERS.iter().any(|marker| filename.contains(marker)) {
                return Err(FilenameError::SourceArchive(filename.to_string()));
            }
            if let Some(parsed) = parse_legacy(filename) {
                return parsed;
            }
        }
        parse_standard(filename)
    }
}

fn parse_standard(filename: &str) -> Result<ParsedFilename, FilenameError> {
    let segments: Vec<&str> = filename.split('_').collect();
    if segments.len() < 3 {
        return Err(FilenameError::Format(filename.to_string()));
    }

    let version = segments[0]
        .strip_prefix(FILENAME_PREFIX)
        .unwrap_or(segments[0]);
    let (os, arch) = segments[1].split_once('-').unwrap_or((segments[1], ""));
    // Only the first two dash tokens of the platform segment matter.
    let arch = arch.split('-').next().unwrap_or(arch);

    Ok(ParsedFilename {
        os: normalize_os(os)?.to_string(),
        arch: normalize_arch(arch, false)?.to_string(),
        version: version.to_string(),
    })
}

/// `None` when the name does not have the legacy shape at all, so the caller
/// can fall back to the standard grammar.
fn parse_legacy(filename: &str) -> Option<Result<ParsedFilename, FilenameError>> {
    let stem = ARCHIVE_EXTENSIONS
        .iter()
        .fold(filename, |name, ext| name.strip_suffix(ext).unwrap_or(name));
    if !stem.contains(LEGACY_MARKER) {
        return None;
    }

    let tokens: Vec<&str> = stem.split('-').collect();
    if tokens.len() < 4 {
        return None;
    }
    let (os, arch) = if tokens.len() >= 5 && BUILD_TAG.is_match(tokens[2]) {
        (tokens[3], tokens[4])
    } else {
        (tokens[2], tokens[3])
    };

    Some(normalize_os(os).and_then(|os| {
        Ok(ParsedFilename {
            os: os.to_string(),
            arch: normalize_arch(arch, true)?.to_string(),
            version: tokens[1].to_string(),
        })
    }))
}

/// Filename OS token to canonical name; only linux, darwin and windows are accepted.
pub fn normalize_os(raw: &str) -> Result<&'static str, FilenameError> {
    match raw {
        "linux" => Ok("linux"),
        "darwin" | "osx" | "macos" => Ok("darwin"),
        "windows" => Ok("windows"),
        other => Err(FilenameError::UnknownOs(other.to_string())),
    }
}

/// Filename architecture token to canonical name. `i586` is only published
/// under the legacy layout.
pub fn normalize_arch(raw: &str, legacy: bool) -> Result<&'static str, FilenameError> {
    match raw {
        "x64" | "amd64" => Ok("amd64"),
        "aarch64" | "arm64" => Ok("arm64"),
        "arm" => Ok("arm"),
        "i586" | "386" if legacy => Ok("386"),
        other => Err(FilenameError::UnknownArch(other.to_string())),
    }
}

/// OS directory name to canonical name. Unknown names pass through unchanged.
pub fn map_os_dir(dir: &str) -> String {
    let name = dir.trim_end_matches('/');
    match name {
        "windows" => "windows",
        "linux" | "alpine-linux" => "linux",
        "mac" | "macos" | "osx" => "darwin",
        "aix" => "aix",
        "solaris" => "solaris",
        other => other,
    }
    .to_string()
}

/// Architecture directory name to canonical name. Unknown names pass through unchanged.
pub fn map_arch_dir(dir: &str) -> String {
    let name = dir.trim_end_matches('/');
    match name {
        "x64" => "amd64",
        "x32" => "386",
        "aarch64" => "arm64",
        "arm" => "arm",
        "ppc64" => "ppc64",
        "ppc64le" => "ppc64le",
        "s390x" => "s390x",
        "riscv64" => "riscv64",
        "sparcv9" => "sparc64",
        other => other,
    }
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parsed(os: &str, arch: &str, version: &str) -> ParsedFilename {
        ParsedFilename {
            os: os.to_string(),
            arch: arch.to_string(),
            version: version.to_string(),
        }
    }

    #[test]
    fn version_prefers_compound_shapes() {
        assert_eq!(extract_version("openjdk-17.0.2+8_linux-x64_bin.tar.gz"), "17.0.2+8");
        assert_eq!(extract_version("openjdk-21.0.1_windows-x64_bin.zip"), "21.0.1");
        assert_eq!(extract_version("OpenJDK8U-jdk_x64_linux_8u462b08.tar.gz"), "8u462b08");
        assert_eq!(extract_version("OpenJDK25U-jdk_x64_windows_hotspot_25_36.zip"), "25");
        assert_eq!(extract_version("readme.txt"), "unknown");
    }

    #[test]
    fn version_extraction_is_idempotent() {
        let once = extract_version("openjdk-17.0.2+8_linux-x64_bin.tar.gz");
        assert_eq!(extract_version(&once), once);
    }

    #[test]
    fn standard_layout() {
        assert_eq!(
            FilenameGrammar::Standard.parse("openjdk-10.0.1_windows-x64_bin.tar.gz"),
            Ok(parsed("windows", "amd64", "10.0.1"))
        );
        assert_eq!(
            FilenameGrammar::Standard.parse("openjdk-17.0.2_macos-aarch64_bin.tar.gz"),
            Ok(parsed("darwin", "arm64", "17.0.2"))
        );
        assert_eq!(
            FilenameGrammar::Standard.parse("openjdk-11.0.2_osx-x64_bin.tar.gz"),
            Ok(parsed("darwin", "amd64", "11.0.2"))
        );
    }

    #[test]
    fn standard_layout_needs_three_segments() {
        assert_eq!(
            FilenameGrammar::Standard.parse("openjdk-10.0.1_windows-x64.zip"),
            Err(FilenameError::Format("openjdk-10.0.1_windows-x64.zip".to_string()))
        );
        assert_eq!(FilenameGrammar::Standard.parse("   "), Err(FilenameError::Empty));
    }

    #[test]
    fn unknown_platforms_are_rejected() {
        let os = FilenameGrammar::Standard
            .parse("openjdk-17_solaris-sparcv9_bin.tar.gz")
            .unwrap_err();
        assert_eq!(os, FilenameError::UnknownOs("solaris".to_string()));
        assert!(os.is_unknown_platform());

        let arch = FilenameGrammar::Standard
            .parse("openjdk-17_linux-ppc64le_bin.tar.gz")
            .unwrap_err();
        assert_eq!(arch, FilenameError::UnknownArch("ppc64le".to_string()));
        assert!(!arch.is_skip());
    }

    #[test]
    fn i586_only_under_legacy_layout() {
        assert_eq!(
            FilenameGrammar::Standard.parse("openjdk-9_windows-i586_bin.zip"),
            Err(FilenameError::UnknownArch("i586".to_string()))
        );
    }

    #[test]
    fn legacy_plain_layout() {
        assert_eq!(
            FilenameGrammar::WithLegacy.parse("openjdk-8u43-linux-x64.tar.gz"),
            Ok(parsed("linux", "amd64", "8u43"))
        );
    }

    #[test]
    fn legacy_build_tag_layout() {
        assert_eq!(
            FilenameGrammar::WithLegacy.parse("openjdk-8u41-b04-windows-i586-14_jan_2020.zip"),
            Ok(parsed("windows", "386", "8u41"))
        );
    }

    #[test]
    fn legacy_grammar_still_reads_standard_names() {
        assert_eq!(
            FilenameGrammar::WithLegacy.parse("openjdk-21.0.1_linux-aarch64_bin.tar.gz"),
            Ok(parsed("linux", "arm64", "21.0.1"))
        );
    }

    #[test]
    fn source_archives_signal_skip() {
        for name in ["openjdk-11+28_src.zip", "openjdk-8u41-src-b04-14_jan_2020.zip"] {
            let err = FilenameGrammar::WithLegacy.parse(name).unwrap_err();
            assert!(err.is_skip(), "{name} should be skipped");
            assert!(!err.is_unknown_platform());
        }
    }

    #[test]
    fn directory_tables_pass_unknown_names_through() {
        assert_eq!(map_os_dir("mac/"), "darwin");
        assert_eq!(map_os_dir("alpine-linux/"), "linux");
        assert_eq!(map_os_dir("haiku/"), "haiku");
        assert_eq!(map_arch_dir("x64/"), "amd64");
        assert_eq!(map_arch_dir("sparcv9/"), "sparc64");
        assert_eq!(map_arch_dir("loongarch64/"), "loongarch64");
    }
}
