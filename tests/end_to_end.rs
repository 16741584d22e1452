//! End-to-end tests: strip a source file, then keep its lines in arrays
//! backed by different strategies.

use bumpalo::Bump;
use contig::{AllocStats, DynArray, Global, Tracking};
use pretty_assertions::assert_eq;

const SOURCE: &str = "\
/* header */
int add(int a, int b) { // sum
    return a + b; /* inline */
}
const char *msg = \"// not a comment\";
";

fn non_empty_lines(text: &str) -> impl Iterator<Item = &str> {
    text.lines().map(str::trim_end).filter(|line| !line.is_empty())
}

#[test]
fn stripped_lines_in_arena() {
    let stripped = contig::strip::strip_str(SOURCE).unwrap();
    let arena = Bump::new();
    let mut lines = DynArray::new_in(&arena);
    lines.extend(non_empty_lines(&stripped));

    assert_eq!(
        lines,
        [
            "int add(int a, int b) {",
            "    return a + b;",
            "}",
            "const char *msg = \"// not a comment\";",
        ]
    );
}

#[test]
fn moving_lines_between_strategies() {
    let stripped = contig::strip::strip_str(SOURCE).unwrap();
    let stats = AllocStats::new();
    {
        let mut tracked = DynArray::new_in(Tracking::new(Global, &stats));
        for line in non_empty_lines(&stripped) {
            tracked.push_back(line.to_string());
        }
        let copy: DynArray<String> = tracked.clone_in(Global);
        assert_eq!(copy, tracked);

        let mut target = DynArray::new();
        target.assign_slice(&copy);
        target.erase(0);
        assert_eq!(target.len(), 3);
    }
    assert!(stats.is_balanced());
}
