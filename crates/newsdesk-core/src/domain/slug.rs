/// Normalize a user-supplied slug into its canonical URL-safe form.
///
/// Lowercases, strips everything that is not a word character, whitespace or
/// hyphen, collapses runs of whitespace/underscores/hyphens into a single
/// hyphen, and trims hyphens from both ends. Idempotent: applying it to its
/// own output is a no-op.
pub fn slugify(input: &str) -> String {
    let lowered = input.to_lowercase();

    // Keep only [A-Za-z0-9_], whitespace and '-'; everything else is dropped.
    let kept: String = lowered
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '-' || c.is_whitespace())
        .collect();

    let mut out = String::with_capacity(kept.len());
    let mut pending_hyphen = false;
    for c in kept.chars() {
        if c.is_whitespace() || c == '_' || c == '-' {
            pending_hyphen = !out.is_empty();
        } else {
            if pending_hyphen {
                out.push('-');
                pending_hyphen = false;
            }
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::slugify;

    #[test]
    fn lowercases_and_hyphenates() {
        assert_eq!(slugify("Hello World!"), "hello-world");
    }

    #[test]
    fn collapses_separator_runs() {
        assert_eq!(slugify("a  _ -  b"), "a-b");
        assert_eq!(slugify("foo__bar--baz"), "foo-bar-baz");
    }

    #[test]
    fn trims_edge_hyphens() {
        assert_eq!(slugify("--hello--"), "hello");
        assert_eq!(slugify("  spaced  "), "spaced");
    }

    #[test]
    fn strips_non_word_characters() {
        assert_eq!(slugify("C++ & Rust: a (short) tour"), "c-rust-a-short-tour");
        // Non-ASCII is dropped, matching the original word-character rule.
        assert_eq!(slugify("新闻 news"), "news");
    }

    #[test]
    fn idempotent() {
        for input in ["Hello World!", "--a_b  c--", "Tech/2024", "已发布 article"] {
            let once = slugify(input);
            assert_eq!(slugify(&once), once);
        }
    }

    #[test]
    fn empty_and_symbol_only_inputs() {
        assert_eq!(slugify(""), "");
        assert_eq!(slugify("!!!"), "");
    }
}
