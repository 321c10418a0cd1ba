//! Untrusted filename sanitization.
//!
//! One pure function shared by the upload path (to derive the stored name)
//! and the static asset path (to vet requested paths). Both security checks
//! must use identical rules, so the logic lives here and nowhere else.

/// Transforms an untrusted, client-supplied filename into a form that is safe
/// to join onto a storage directory.
///
/// The rules:
///
/// - path separators (`/` and `\`) are treated as word breaks
/// - any character outside `[A-Za-z0-9_.-]` is dropped; runs of whitespace
///   and separators collapse to a single `_`
/// - runs of `.` collapse to a single `.`, so no parent-directory reference
///   survives anywhere in the output
/// - leading and trailing `.` and `_` are stripped, which removes
///   hidden-file prefixes
///
/// The result contains no separators and cannot refer outside the directory
/// it is joined to. It may be empty (e.g. for input `"..."`); callers must
/// treat an empty result as an invalid filename.
///
/// # Examples
///
/// ```
/// use cogkit_files::sanitize_filename;
///
/// assert_eq!(sanitize_filename("data.csv"), "data.csv");
/// assert_eq!(sanitize_filename("../../etc/passwd"), "etc_passwd");
/// assert_eq!(sanitize_filename("my results (1).csv"), "my_results_1.csv");
/// ```
#[must_use]
pub fn sanitize_filename(raw: &str) -> String {
    let mut cleaned = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '/' | '\\' => cleaned.push(' '),
            c if c.is_ascii_alphanumeric() => cleaned.push(c),
            '_' | '.' | '-' => cleaned.push(ch),
            c if c.is_whitespace() => cleaned.push(' '),
            _ => {}
        }
    }

    let joined = cleaned.split_whitespace().collect::<Vec<_>>().join("_");

    let mut collapsed = String::with_capacity(joined.len());
    let mut prev_dot = false;
    for ch in joined.chars() {
        if ch == '.' && prev_dot {
            continue;
        }
        prev_dot = ch == '.';
        collapsed.push(ch);
    }

    collapsed.trim_matches(|c| c == '.' || c == '_').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_filename_unchanged() {
        assert_eq!(sanitize_filename("data.csv"), "data.csv");
        assert_eq!(sanitize_filename("stroop_run-2.csv"), "stroop_run-2.csv");
    }

    #[test]
    fn test_spaces_become_underscores() {
        assert_eq!(sanitize_filename("my results.csv"), "my_results.csv");
        assert_eq!(sanitize_filename("a   b.csv"), "a_b.csv");
    }

    #[test]
    fn test_path_separators_removed() {
        assert_eq!(sanitize_filename("dir/data.csv"), "dir_data.csv");
        assert_eq!(sanitize_filename("dir\\data.csv"), "dir_data.csv");
    }

    #[test]
    fn test_traversal_sequences_neutralised() {
        assert_eq!(sanitize_filename("../../etc/passwd"), "etc_passwd");
        assert_eq!(sanitize_filename("..\\..\\secret.csv"), "secret.csv");
        let out = sanitize_filename("a/../b.csv");
        assert!(!out.contains("..") && !out.contains('/'));
        assert_eq!(sanitize_filename("report..final.csv"), "report.final.csv");
    }

    #[test]
    fn test_leading_dots_stripped() {
        assert_eq!(sanitize_filename(".hidden.csv"), "hidden.csv");
        assert_eq!(sanitize_filename("...data.csv"), "data.csv");
    }

    #[test]
    fn test_unsafe_characters_dropped() {
        assert_eq!(sanitize_filename("a;b|c&d.csv"), "abcd.csv");
        assert_eq!(sanitize_filename("résumé.csv"), "rsum.csv");
        assert_eq!(sanitize_filename("null\0byte.csv"), "nullbyte.csv");
    }

    #[test]
    fn test_degenerate_inputs_become_empty() {
        assert_eq!(sanitize_filename(""), "");
        assert_eq!(sanitize_filename("..."), "");
        assert_eq!(sanitize_filename("///"), "");
        assert_eq!(sanitize_filename("___"), "");
    }

    #[test]
    fn test_idempotent() {
        for raw in ["data.csv", "../../etc/passwd", "my file (2).csv", "..."] {
            let once = sanitize_filename(raw);
            assert_eq!(sanitize_filename(&once), once);
        }
    }
}
