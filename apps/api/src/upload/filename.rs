use unicode_normalization::UnicodeNormalization;

/// Reduces a client-supplied filename to a safe, ASCII-only basename.
///
/// Accents are folded, path separators become word breaks, whitespace runs
/// become `_`, anything outside `[A-Za-z0-9_.-]` is dropped and leading or
/// trailing `.`/`_` are stripped. May return an empty string.
pub fn secure_filename(filename: &str) -> String {
    let ascii: String = filename
        .nfkd()
        .filter(char::is_ascii)
        .map(|c| if c == '/' || c == '\\' { ' ' } else { c })
        .collect();

    ascii
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(*c, '_' | '.' | '-'))
        .collect::<String>()
        .trim_matches(|c: char| c == '.' || c == '_')
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_secure_filename_strips_paths_and_symbols() {
        assert_eq!(secure_filename("My Resume (final).pdf"), "My_Resume_final.pdf");
        assert_eq!(secure_filename("../../etc/passwd"), "etc_passwd");
        assert_eq!(secure_filename("C:\\Users\\me\\cv.docx"), "C_Users_me_cv.docx");
    }

    #[test]
    fn test_secure_filename_folds_accents() {
        assert_eq!(secure_filename("résumé.txt"), "resume.txt");
    }

    #[test]
    fn test_secure_filename_can_be_empty() {
        assert_eq!(secure_filename("...."), "");
        assert_eq!(secure_filename("日本語"), "");
    }
}
