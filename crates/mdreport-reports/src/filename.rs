use mdreport_core::ResultEvent;

/// Names longer than this many bytes get truncated.
pub const MAX_FILENAME_BYTES: usize = 256;

/// Byte length kept when a name exceeds `MAX_FILENAME_BYTES`.
const TRUNCATED_FILENAME_BYTES: usize = 255;

/// Characters that are replaced with `_` in generated file names.
const FORBIDDEN_CHARS: [char; 11] = ['?', '/', '>', '|', ':', ';', '*', '<', '"', '\'', ' '];

/// Make a file name safe to create inside the output directory
///
/// This function:
/// - Truncates names longer than 256 bytes to at most 255 bytes, backing off
///   to the previous char boundary so a UTF-8 sequence is never split
/// - Replaces path separators, shell metacharacters and spaces with `_`
///
/// Truncation happens first, so an over-long name may lose its extension.
/// Replacements are byte-for-byte, so the byte length after truncation is
/// the final length.
///
/// # Arguments
/// * `filename` - The proposed file name
///
/// # Returns
/// A file name without any of the forbidden characters
pub fn sanitize_filename(filename: &str) -> String {
    let truncated = if filename.len() > MAX_FILENAME_BYTES {
        let mut end = TRUNCATED_FILENAME_BYTES;
        while !filename.is_char_boundary(end) {
            end -= 1;
        }
        &filename[..end]
    } else {
        filename
    };

    truncated
        .chars()
        .map(|c| if FORBIDDEN_CHARS.contains(&c) { '_' } else { c })
        .collect()
}

/// Generate the sanitized file name a finding is written to
///
/// By default the name is `<template-id>.md`. With `detailed` set, the matched
/// location and the matcher (or extractor) name are appended:
/// `<template-id>-<matched-at>[-<matcher|extractor>].md`.
///
/// # Arguments
/// * `event` - The finding being exported
/// * `detailed` - Whether to include the matched location and matcher suffix
///
/// # Returns
/// A sanitized file name ending in `.md` unless truncation removed it
pub fn finding_filename(event: &ResultEvent, detailed: bool) -> String {
    let mut filename = event.template_id.clone();

    if detailed {
        filename.push('-');
        filename.push_str(&event.matched_at().replace('/', "_").replace(':', "_"));

        let suffix = if !event.matcher().is_empty() {
            event.matcher()
        } else {
            event.extractor()
        };
        if !suffix.is_empty() {
            filename.push('-');
            filename.push_str(suffix);
        }
    }

    filename.push_str(".md");
    sanitize_filename(&filename)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_plain_name_is_unchanged() {
        assert_eq!(sanitize_filename("cve-2021-44228.md"), "cve-2021-44228.md");
        // underscores are kept as-is
        assert_eq!(sanitize_filename("tech_detect.md"), "tech_detect.md");
    }

    #[test]
    fn test_sanitize_replaces_forbidden_characters() {
        assert_eq!(
            sanitize_filename("http/exposures:git config.md"),
            "http_exposures_git_config.md"
        );
        assert_eq!(
            sanitize_filename("a?b>c|d;e*f<g\"h'i.md"),
            "a_b_c_d_e_f_g_h_i.md"
        );
    }

    #[test]
    fn test_sanitize_length_boundary() {
        let exact = "a".repeat(MAX_FILENAME_BYTES);
        assert_eq!(sanitize_filename(&exact).len(), MAX_FILENAME_BYTES);

        let over = "a".repeat(MAX_FILENAME_BYTES + 1);
        assert_eq!(sanitize_filename(&over).len(), TRUNCATED_FILENAME_BYTES);
    }

    #[test]
    fn test_sanitize_truncates_before_replacing() {
        let name = format!("{}:{}", "a".repeat(254), "b".repeat(10));
        let sanitized = sanitize_filename(&name);

        assert_eq!(sanitized.len(), 255);
        assert!(sanitized.ends_with("a_"));
    }

    #[test]
    fn test_sanitize_counts_bytes_for_multibyte_names() {
        // 200 two-byte chars plus ".md" is 403 bytes
        let name = format!("{}.md", "é".repeat(200));
        let sanitized = sanitize_filename(&name);

        assert!(sanitized.len() <= TRUNCATED_FILENAME_BYTES);
        // 255 falls inside a char, so the cut backs off to 254
        assert_eq!(sanitized, "é".repeat(127));
    }

    #[test]
    fn test_sanitize_short_multibyte_name_is_unchanged() {
        let name = format!("{}.md", "é".repeat(120));
        assert_eq!(sanitize_filename(&name), name);
    }

    #[test]
    fn test_finding_filename_default() {
        let event = ResultEvent::new("git-config", "https://example.com")
            .with_matcher_name("body")
            .with_matched("https://example.com/.git/config");

        assert_eq!(finding_filename(&event, false), "git-config.md");
    }

    #[test]
    fn test_finding_filename_detailed() {
        let event = ResultEvent::new("git-config", "example.com")
            .with_matched("https://example.com/.git")
            .with_matcher_name("body");
        assert_eq!(
            finding_filename(&event, true),
            "git-config-https___example.com_.git-body.md"
        );

        let event = ResultEvent::new("tech", "example.com")
            .with_matched("example.com:443")
            .with_extractor_name("version");
        assert_eq!(finding_filename(&event, true), "tech-example.com_443-version.md");

        let event = ResultEvent::new("tech", "example.com").with_matched("example.com");
        assert_eq!(finding_filename(&event, true), "tech-example.com.md");
    }

    #[test]
    fn test_finding_filename_uniqueness_in_detailed_mode() {
        let first = ResultEvent::new("t", "h").with_matched("https://a.example/");
        let second = ResultEvent::new("t", "h").with_matched("https://b.example/");

        assert_eq!(finding_filename(&first, false), finding_filename(&second, false));
        assert_ne!(finding_filename(&first, true), finding_filename(&second, true));
    }
}
