//! Name cleaning for media files and folders.

use std::collections::HashSet;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use crate::media_rename::MediaRenameConfig;

/// Bracketed and braced spans, usually release group tags.
static RE_BRACKETED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\[\{].*?[\]\}]").expect("Failed to compile bracket regex"));

static RE_NON_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w\s]").expect("Failed to compile non-word regex"));

static RE_WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("Failed to compile whitespace regex"));

static RE_YEAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(19|20)\d{2}$").expect("Failed to compile year regex"));

static RE_YEAR_RANGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(19|20)\d{2}-(19|20)\d{2}$").expect("Failed to compile year range regex"));

static DEFAULT_CLEANER: LazyLock<NameCleaner> = LazyLock::new(NameCleaner::default);

const SUBTITLE_EXTENSION: &str = ".srt";

const TITLE_TRIM_CHARS: [char; 9] = ['-', '_', '(', ')', '[', ']', '{', '}', '\''];

/// Tokens that mark the end of the title part of a name.
///
/// Matching is done per token after punctuation has been replaced with spaces,
/// so entries containing spaces or punctuation never match.
pub const UNWANTED_TERMS: &[&str] = &[
    // Resolutions and video quality
    "1080p", "720p", "480p", "2160p", "4K", "8K", "HD", "HDTV", "SD", "HQ",
    "10bit", "8bit", "HEVC", "AVC", "H264", "H265", "x264", "x265",
    // Source and encoding
    "BluRay", "BRRip", "BDRip", "WEBRip", "WEB", "WEB-DL", "HDRip", "DVDRip", "REMUX", "CAM", "TS", "R5",
    // Audio codecs and channels
    "AAC", "AC3", "EAC3", "DTS", "DTS-HD", "DTSHD", "MA", "TRUEHD", "MP3", "FLAC", "OGG", "DDP5", "DD5",
    "2.0", "5.1", "7.1", "ATMOS",
    // Release types and versions
    "EXTENDED", "UNRATED", "DIRECTORS CUT", "DC", "REMASTERED", "THEATRICAL CUT", "FINAL CUT",
    "SPECIAL EDITION", "SE",
    // Language and subtitles
    "SUBBED", "DUBBED", "MULTI", "DUAL AUDIO", "ENG", "ENG SUBS", "ITA", "GERMAN", "FRENCH", "SPANISH",
    "KOREAN", "JAPANESE", "CHINESE",
    // HDR formats
    "HDR", "SDR", "DV", "HDR10", "HDR10+", "HLG", "DOLBY VISION",
    // Release groups and uploaders
    "YIFY", "YTS", "RARBG", "SHiTSoNy", "SiNNERS", "ANOXMOUS", "AN0NYM0US", "HON3Y", "HIGHCODE", "DELTA",
    "JYK", "Z3R0C00", "BRSHNKV", "MZABI", "ETRG", "GANJAMAN", "CMRG", "INSPiRAL", "Tigole", "FGT",
    // Collections, streaming services and rip types
    "RESTORED", "COMPLETE", "DUOLOGY", "TRILOGY", "QUADRILOGY", "COLLECTION", "SERIES", "SEASON", "EPISODE",
    "S0", "E0", "READNFO", "NFO", "CAMRip", "WORKPRINT", "TELESYNC", "TELECINE", "SCREENER", "DVDSCR",
    "NF", "AMZN", "AMAZON", "HULU", "NETFLIX", "IMAX", "Criterion", "Rip", "UHD", "ULTRAHD", "HDCAM", "HDTS",
];

/// Subtitle language codes recognized as the secondary extension in `name.en.srt`.
pub const LANGUAGE_CODES: &[&str] = &[
    "en", "es", "fr", "de", "it", "pt", "ru", "zh", "ja", "ko", "ar", "nl", "sv", "no", "da", "fi", "pl", "tr", "he", "el",
    "cs", "sk", "hu", "bg", "ro", "hr", "sr", "sl", "uk", "th", "vi", "id", "ms",
];

/// Cleans raw file and directory names into the "Title (Year)" form.
///
/// The lookup sets are built once and never modified afterwards.
#[derive(Debug, Clone)]
pub struct NameCleaner {
    /// Uppercase unwanted terms.
    unwanted_terms: HashSet<String>,
    /// Lowercase language codes without the leading dot.
    language_codes: HashSet<String>,
}

/// A file name split into the part to clean and the extensions to keep.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct SplitName<'a> {
    stem: &'a str,
    language_extension: &'a str,
    extension: &'a str,
}

impl Default for NameCleaner {
    fn default() -> Self {
        Self::with_extra_terms(&[], &[])
    }
}

impl NameCleaner {
    /// Create a cleaner with the default terms extended by the user config.
    #[must_use]
    pub fn new(config: &MediaRenameConfig) -> Self {
        Self::with_extra_terms(&config.unwanted_terms, &config.language_codes)
    }

    /// Create a cleaner with additional unwanted terms and language codes.
    #[must_use]
    pub fn with_extra_terms(unwanted_terms: &[String], language_codes: &[String]) -> Self {
        let unwanted_terms = UNWANTED_TERMS
            .iter()
            .copied()
            .chain(unwanted_terms.iter().map(String::as_str))
            .map(str::trim)
            .filter(|term| !term.is_empty())
            .map(str::to_uppercase)
            .collect();

        let language_codes = LANGUAGE_CODES
            .iter()
            .copied()
            .chain(language_codes.iter().map(String::as_str))
            .map(|code| code.trim().trim_start_matches('.'))
            .filter(|code| !code.is_empty())
            .map(str::to_lowercase)
            .collect();

        Self {
            unwanted_terms,
            language_codes,
        }
    }

    /// Clean the final segment of the given path.
    #[must_use]
    pub fn clean_path(&self, path: &Path, is_directory: bool) -> String {
        self.clean_name(&crate::path_to_filename_string(path), is_directory)
    }

    /// Clean a single file or directory name.
    ///
    /// Files keep their extension, and subtitles also keep a language extension
    /// such as `.en` in `.en.srt`. Directory names are cleaned as a whole.
    #[must_use]
    pub fn clean_name(&self, name: &str, is_directory: bool) -> String {
        let split = if is_directory {
            SplitName {
                stem: name,
                language_extension: "",
                extension: "",
            }
        } else {
            self.split_extensions(name)
        };

        let normalized = normalize_punctuation(split.stem);
        let (title_words, year) = self.scan_tokens(&normalized);
        let title = assemble_title(&title_words);

        let mut new_name = match year {
            Some(year) => format!("{title} ({year})"),
            None => title,
        };
        new_name.push_str(split.language_extension);
        new_name.push_str(split.extension);
        new_name
    }

    /// Check if the token is an unwanted term, ignoring case.
    #[must_use]
    pub fn is_unwanted(&self, token: &str) -> bool {
        self.unwanted_terms.contains(&token.to_uppercase())
    }

    /// Check if the extension (including the dot) is a known subtitle language code.
    #[must_use]
    pub fn is_language_extension(&self, extension: &str) -> bool {
        extension
            .strip_prefix('.')
            .is_some_and(|code| self.language_codes.contains(&code.to_lowercase()))
    }

    fn split_extensions<'a>(&self, name: &'a str) -> SplitName<'a> {
        let (stem, extension) = split_extension(name);
        if extension.eq_ignore_ascii_case(SUBTITLE_EXTENSION) {
            let (inner_stem, language_extension) = split_extension(stem);
            if self.is_language_extension(language_extension) {
                return SplitName {
                    stem: inner_stem,
                    language_extension,
                    extension,
                };
            }
        }
        SplitName {
            stem,
            language_extension: "",
            extension,
        }
    }

    /// Collect title words until a year or an unwanted term is found.
    fn scan_tokens<'a>(&self, normalized: &'a str) -> (Vec<&'a str>, Option<String>) {
        let mut title_words = Vec::new();
        for word in normalized.split(' ').map(str::trim).filter(|word| !word.is_empty()) {
            if RE_YEAR.is_match(word) {
                return (title_words, Some(word.to_string()));
            }
            if RE_YEAR_RANGE.is_match(word) {
                return (title_words, Some(word.chars().take(4).collect()));
            }
            if self.is_unwanted(word) {
                break;
            }
            title_words.push(word);
        }
        (title_words, None)
    }
}

/// Clean the final segment of the given path with the default terms.
///
/// ```rust
/// use std::path::Path;
/// use media_renamer::media_rename::clean_name;
///
/// let path = Path::new("/media/The.Matrix.1999.1080p.BluRay.x264-GROUP.mkv");
/// assert_eq!(clean_name(path, false), "The Matrix (1999).mkv");
///
/// let path = Path::new("/media/Some.Show.S01.WEBRip");
/// assert_eq!(clean_name(path, true), "Some Show S01");
/// ```
#[must_use]
pub fn clean_name(path: &Path, is_directory: bool) -> String {
    DEFAULT_CLEANER.clean_path(path, is_directory)
}

/// Split the last extension from a file name, keeping the dot in the extension.
///
/// A trailing dot gives an empty extension.
fn split_extension(name: &str) -> (&str, &str) {
    match name.rfind('.') {
        Some(index) if index + 1 < name.len() => (&name[..index], &name[index..]),
        Some(index) => (&name[..index], ""),
        None => (name, ""),
    }
}

fn normalize_punctuation(stem: &str) -> String {
    let text = stem.replace('.', " ");
    let text = RE_BRACKETED.replace_all(&text, "");
    let text = text.replace(['_', '-'], " ");
    let text = RE_NON_WORD.replace_all(&text, " ");
    RE_WHITESPACE.replace_all(&text, " ").trim().to_string()
}

fn assemble_title(words: &[&str]) -> String {
    let title = words.join(" ");
    RE_WHITESPACE
        .replace_all(&title, " ")
        .trim_matches(TITLE_TRIM_CHARS.as_slice())
        .to_string()
}
