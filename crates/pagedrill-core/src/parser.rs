//! Operation line parser and page loader.
//!
//! Splits `<int> <op> <int>` lines into operations, loads page files and
//! page directories, and lints pages for lines that can never be scored.

use std::path::Path;

use anyhow::{Context, Result};

use crate::error::ParseError;
use crate::model::{Operation, Page};

/// Parse one operation line.
///
/// Tokens are separated by single spaces, so doubled spaces yield empty
/// tokens. Tokens after the third are ignored. The operator token is not
/// checked here.
pub fn parse_operation(line: &str) -> Result<Operation, ParseError> {
    let tokens: Vec<&str> = line.split(' ').collect();
    if tokens.len() < 3 {
        return Err(ParseError::TooFewTokens {
            found: tokens.len(),
        });
    }

    let left = parse_operand(tokens[0])?;
    let right = parse_operand(tokens[2])?;

    Ok(Operation {
        text: line.to_string(),
        left,
        operator: tokens[1].to_string(),
        right,
    })
}

fn parse_operand(token: &str) -> Result<i64, ParseError> {
    token.parse().map_err(|_| ParseError::InvalidOperand {
        token: token.to_string(),
    })
}

/// Load a single page file. The page id is the file name.
pub fn load_page(path: &Path) -> Result<Page> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read page file: {}", path.display()))?;

    let id = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    Ok(parse_page_str(id, &content))
}

/// Build a page from file contents, dropping blank lines.
pub fn parse_page_str(id: impl Into<String>, content: &str) -> Page {
    let lines = content
        .lines()
        .filter(|l| !l.trim().is_empty())
        .map(str::to_string)
        .collect();

    Page {
        id: id.into(),
        lines,
    }
}

/// Load every page file directly inside `dir`, ordered by file name.
///
/// Subdirectories and hidden files are skipped. Any unreadable page is an
/// error.
pub fn load_page_directory(dir: &Path) -> Result<Vec<Page>> {
    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }

    let mut paths = Vec::new();
    for entry in std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
    {
        let path = entry?.path();
        let hidden = path
            .file_name()
            .is_some_and(|n| n.to_string_lossy().starts_with('.'));

        if path.is_dir() || hidden {
            tracing::debug!("skipping {}", path.display());
            continue;
        }
        paths.push(path);
    }
    paths.sort();

    paths.iter().map(|p| load_page(p)).collect()
}

/// A warning from page validation.
#[derive(Debug, Clone)]
pub struct PageWarning {
    /// 1-based line number within the page (if applicable).
    pub line: Option<usize>,
    /// Warning message.
    pub message: String,
}

/// Validate a page for lines that cannot be scored.
pub fn validate_page(page: &Page, expected_per_page: u32) -> Vec<PageWarning> {
    let mut warnings = Vec::new();

    if page.lines.is_empty() {
        warnings.push(PageWarning {
            line: None,
            message: "page has no operations".into(),
        });
        return warnings;
    }

    if page.lines.len() != expected_per_page as usize {
        warnings.push(PageWarning {
            line: None,
            message: format!(
                "page has {} operations but {} are expected per page",
                page.lines.len(),
                expected_per_page
            ),
        });
    }

    for (idx, line) in page.lines.iter().enumerate() {
        let problem = match parse_operation(line) {
            Ok(op) => op.evaluate().err().map(|e| e.to_string()),
            Err(e) => Some(e.to_string()),
        };
        if let Some(message) = problem {
            warnings.push(PageWarning {
                line: Some(idx + 1),
                message: format!("'{line}': {message}"),
            });
        }
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EvalError;

    #[test]
    fn parse_valid_operation() {
        let op = parse_operation("12 + 7").unwrap();
        assert_eq!(op.text, "12 + 7");
        assert_eq!(op.left, 12);
        assert_eq!(op.operator, "+");
        assert_eq!(op.right, 7);
    }

    #[test]
    fn parse_signed_operands() {
        let op = parse_operation("-3 x +4").unwrap();
        assert_eq!(op.left, -3);
        assert_eq!(op.right, 4);
    }

    #[test]
    fn parse_does_not_check_operator() {
        let op = parse_operation("1 ? 2").unwrap();
        assert_eq!(op.operator, "?");
    }

    #[test]
    fn parse_too_few_tokens() {
        assert_eq!(
            parse_operation("bad line"),
            Err(ParseError::TooFewTokens { found: 2 })
        );
        assert_eq!(
            parse_operation(""),
            Err(ParseError::TooFewTokens { found: 1 })
        );
    }

    #[test]
    fn parse_invalid_operands() {
        assert_eq!(
            parse_operation("a + 1"),
            Err(ParseError::InvalidOperand { token: "a".into() })
        );
        assert_eq!(
            parse_operation("1 + 2.5"),
            Err(ParseError::InvalidOperand {
                token: "2.5".into()
            })
        );
    }

    #[test]
    fn parse_double_space_yields_empty_token() {
        assert_eq!(
            parse_operation("1  + 2"),
            Err(ParseError::InvalidOperand {
                token: "+".into()
            })
        );
    }

    #[test]
    fn parse_ignores_extra_tokens() {
        let op = parse_operation("4 - 1 = 3").unwrap();
        assert_eq!((op.left, op.operator.as_str(), op.right), (4, "-", 1));
    }

    #[test]
    fn page_drops_blank_lines_and_carriage_returns() {
        let page = parse_page_str("p1", "1 + 1\r\n\n2 x 3\n   \n");
        assert_eq!(page.lines, vec!["1 + 1", "2 x 3"]);
    }

    #[test]
    fn load_directory_sorted_by_name() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("page-02.txt"), "2 + 2\n").unwrap();
        std::fs::write(dir.path().join("page-01.txt"), "1 + 1\n").unwrap();
        std::fs::write(dir.path().join(".hidden"), "junk").unwrap();
        std::fs::create_dir(dir.path().join("nested")).unwrap();

        let pages = load_page_directory(dir.path()).unwrap();
        let ids: Vec<&str> = pages.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["page-01.txt", "page-02.txt"]);
        assert_eq!(pages[0].lines, vec!["1 + 1"]);
    }

    #[test]
    fn load_directory_rejects_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("page.txt");
        std::fs::write(&file, "1 + 1").unwrap();
        assert!(load_page_directory(&file).is_err());
    }

    #[test]
    fn load_missing_page_fails() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_page(&dir.path().join("missing.txt")).is_err());
    }

    #[test]
    fn validate_flags_unscorable_lines() {
        let page = parse_page_str("p", "1 + 1\nbad line\n4 / 0\n3 % 2\n");
        let warnings = validate_page(&page, 4);
        let lines: Vec<Option<usize>> = warnings.iter().map(|w| w.line).collect();
        assert_eq!(lines, vec![Some(2), Some(3), Some(4)]);
        assert!(warnings[1]
            .message
            .contains(&EvalError::DivisionByZero.to_string()));
    }

    #[test]
    fn validate_flags_short_page() {
        let page = parse_page_str("p", "1 + 1\n");
        let warnings = validate_page(&page, 60);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].message.contains("60 are expected"));
    }

    #[test]
    fn validate_flags_empty_page() {
        let page = parse_page_str("p", "\n\n");
        let warnings = validate_page(&page, 60);
        assert!(warnings[0].message.contains("no operations"));
    }
}
