//! Tests for the comment stripper

use super::*;
use pretty_assertions::assert_eq;

fn strip(input: &str) -> String {
    strip_str(input).unwrap()
}

#[test]
fn test_line_and_block_comments() {
    assert_eq!(
        strip("a\"//not a comment\"b//real comment\nc/*block\nspanning*/d"),
        "a\"//not a comment\"b\ncd"
    );
}

#[test]
fn test_code_without_comments_is_unchanged() {
    let source = "int main() {\n    return a / b;\n}\n";
    assert_eq!(strip(source), source);
}

#[test]
fn test_lone_slash_keeps_following_byte() {
    assert_eq!(strip("a/b"), "a/b");
    assert_eq!(strip("x /\"//\""), "x /\"//\"");
    assert_eq!(strip("end /"), "end /");
}

#[test]
fn test_quotes_with_escapes() {
    assert_eq!(strip(r#""a\"//b" // c"#), r#""a\"//b" "#);
    assert_eq!(strip(r"'\'' /* x */"), r"'\'' ");
    assert_eq!(strip(r#""it's" // x"#), r#""it's" "#);
}

#[test]
fn test_backslash_continues_line_comment() {
    assert_eq!(strip("a // one \\\n two\nb"), "a \nb");
}

#[test]
fn test_backslash_in_block_comment_escapes_star() {
    assert_eq!(strip("a/* \\*/ still */b"), "ab");
}

#[test]
fn test_double_star_closes_block() {
    assert_eq!(strip("a/* x **/b"), "ab");
    assert_eq!(strip("a/***/b"), "ab");
}

#[test]
fn test_unterminated_input_is_not_an_error() {
    assert_eq!(strip("a // trailing"), "a ");
    assert_eq!(strip("a /* open"), "a ");
    assert_eq!(strip("a \"open"), "a \"open");
}

#[test]
fn test_multibyte_text_survives() {
    assert_eq!(strip("π /* ∑ */ = \"λ\" // é\n"), "π  = \"λ\" \n");
}

#[test]
fn test_chunked_feed_matches_whole_input() {
    let source = b"x = '/'; /* a\n*/ y // z\nw";
    let expected = strip(std::str::from_utf8(source).unwrap());

    for split in 0..source.len() {
        let mut stripper = CommentStripper::new(Vec::new());
        stripper.feed(&source[..split]).unwrap();
        stripper.feed(&source[split..]).unwrap();
        let (out, _) = stripper.finish().unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), expected, "split at {split}");
    }
}

#[test]
fn test_stats_count_comments_and_bytes() {
    let source = "a // x\nb /* y */ c\n";
    let mut out = Vec::new();
    let stats = strip_comments(source.as_bytes(), &mut out).unwrap();
    assert_eq!(stats.comments, 2);
    assert_eq!(stats.bytes_in, source.len() as u64);
    assert_eq!(stats.bytes_out, out.len() as u64);
    assert!(stats.has_comments());

    let stats = strip_comments("plain\n".as_bytes(), std::io::sink()).unwrap();
    assert!(!stats.has_comments());
}

#[test]
fn test_write_errors_are_reported() {
    struct Broken;

    impl Write for Broken {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::Error::other("disk on fire"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    let err = strip_comments("abc".as_bytes(), Broken).unwrap_err();
    assert!(matches!(err, StripError::Io(_)));
    assert_eq!(err.to_string(), "I/O error: disk on fire");
}
