//! Glob syntax check
//!
//! Only structure is checked: balanced `[...]` classes and `{...}` groups, no
//! stray closers and no dangling escape. Matching is the consuming tool's job.

/// Check glob pattern syntax
#[must_use]
pub fn is_valid_glob(pattern: &str) -> bool {
    if pattern.trim().is_empty() {
        return false;
    }

    let mut escaping = false;
    let mut in_class = false;
    let mut brace_depth = 0usize;

    for ch in pattern.chars() {
        if escaping {
            escaping = false;
            continue;
        }
        match ch {
            '\\' => escaping = true,
            ']' if in_class => in_class = false,
            _ if in_class => {}
            '[' => in_class = true,
            ']' => return false,
            '{' => brace_depth += 1,
            '}' => {
                if brace_depth == 0 {
                    return false;
                }
                brace_depth -= 1;
            }
            _ => {}
        }
    }

    !escaping && !in_class && brace_depth == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_common_patterns() {
        for pattern in ["**/*.ts", "src/{a,b}/*.rs", "[abc]*.md", "docs/\\[draft\\].md", "a/{b,{c,d}}"] {
            assert!(is_valid_glob(pattern), "{pattern}");
        }
    }

    #[test]
    fn rejects_unbalanced_patterns() {
        for pattern in ["", "   ", "src/{a,b", "a}", "[abc", "abc]", "trailing\\"] {
            assert!(!is_valid_glob(pattern), "{pattern:?}");
        }
    }

    #[test]
    fn brackets_inside_class_are_literal() {
        assert!(is_valid_glob("[{]"));
        assert!(is_valid_glob("[}]x"));
    }
}
