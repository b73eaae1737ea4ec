//! Line annotation across revisions
//!
//! Each pass diffs the previous annotated text against the next revision.
//! Lines that survive keep the version they were introduced in, new lines get
//! the current version and removed lines are dropped. Chaining passes over a
//! sequence of revisions gives per-line provenance, like `blame`.

use crate::diff::diff;
use crate::sequence::Diffable;
use serde::{Deserialize, Serialize};

/// A line tagged with the version that introduced it
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AnnotatedLine {
    pub text: String,
    pub version: usize,
}

impl AnnotatedLine {
    pub fn new(text: impl Into<String>, version: usize) -> Self {
        Self {
            text: text.into(),
            version,
        }
    }
}

/// Computes an annotated diff from `prev` to `lines`.
///
/// `version` is the version of `lines`. `prev` is the output of the previous
/// call, or empty for the first revision.
pub fn annotate<S: AsRef<str>>(
    prev: &[AnnotatedLine],
    lines: &[S],
    version: usize,
) -> Vec<AnnotatedLine> {
    let mut annotator = Annotator {
        prev,
        lines,
        j: 0,
        version,
        out: Vec::with_capacity(lines.len()),
    };
    diff(&mut annotator);
    annotator.out
}

/// [`annotate`] for a whole text, split into lines.
pub fn annotate_text(prev: &[AnnotatedLine], text: &str, version: usize) -> Vec<AnnotatedLine> {
    let lines: Vec<&str> = text.lines().collect();
    annotate(prev, &lines, version)
}

/// Annotates a chain of full revisions, the first one being version 0.
pub fn annotate_history<I, R, S>(revisions: I) -> Vec<AnnotatedLine>
where
    I: IntoIterator<Item = R>,
    R: AsRef<[S]>,
    S: AsRef<str>,
{
    revisions
        .into_iter()
        .enumerate()
        .fold(Vec::new(), |prev, (version, revision)| {
            annotate(&prev, revision.as_ref(), version)
        })
}

struct Annotator<'a, S> {
    prev: &'a [AnnotatedLine],
    lines: &'a [S],
    j: usize,
    version: usize,
    out: Vec<AnnotatedLine>,
}

impl<S: AsRef<str>> Diffable for Annotator<'_, S> {
    fn lengths(&self) -> (usize, usize) {
        (self.prev.len(), self.lines.len())
    }

    fn equal(&self, i: usize, j: usize) -> bool {
        self.prev[i].text == self.lines[j].as_ref()
    }

    fn common(&mut self, i: usize, j: usize, n: usize) {
        // lines new in this version; deleted ones on the left are skipped
        for line in &self.lines[self.j..j] {
            self.out.push(AnnotatedLine::new(line.as_ref(), self.version));
        }
        self.out.extend_from_slice(&self.prev[i..i + n]);
        self.j = j + n;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn files() -> Vec<Vec<&'static str>> {
        vec![
            vec!["0a", "0b", "0c"],
            vec!["1a", "0a", "1b", "0c", "1c"],
            vec!["0a", "1b", "0c", "2a", "2b", "1c"],
        ]
    }

    fn versions(lines: &[AnnotatedLine]) -> Vec<(usize, &str)> {
        lines.iter().map(|l| (l.version, l.text.as_str())).collect()
    }

    #[test]
    fn test_annotate_chain() {
        let files = files();
        let lines = annotate(&[], &files[0], 0);
        let lines = annotate(&lines, &files[1], 1);
        let lines = annotate(&lines, &files[2], 2);

        assert_eq!(
            versions(&lines),
            vec![
                (0, "0a"),
                (1, "1b"),
                (0, "0c"),
                (2, "2a"),
                (2, "2b"),
                (1, "1c"),
            ]
        );
    }

    #[test]
    fn test_annotate_history_matches_chain() {
        let files = files();
        let mut chained = Vec::new();
        for (version, file) in files.iter().enumerate() {
            chained = annotate(&chained, file, version);
        }

        assert_eq!(annotate_history(&files), chained);
    }

    #[test]
    fn test_first_version_tags_everything() {
        let lines = annotate(&[], &["a", "b"], 7);
        assert_eq!(
            lines,
            vec![AnnotatedLine::new("a", 7), AnnotatedLine::new("b", 7)]
        );
    }

    #[test]
    fn test_unchanged_text_keeps_versions() {
        let prev = vec![AnnotatedLine::new("a", 0), AnnotatedLine::new("b", 3)];
        let lines = annotate(&prev, &["a", "b"], 9);
        assert_eq!(lines, prev);
    }

    #[test]
    fn test_deleting_everything() {
        let prev = vec![AnnotatedLine::new("a", 0), AnnotatedLine::new("b", 1)];
        let lines = annotate::<&str>(&prev, &[], 2);
        assert!(lines.is_empty());
    }

    #[test]
    fn test_reappearing_line_gets_new_version() {
        let history = annotate_history([vec!["x", "y"], vec!["y"], vec!["x", "y"]]);
        assert_eq!(versions(&history), vec![(2, "x"), (0, "y")]);
    }

    #[test]
    fn test_annotate_text() {
        let first = annotate_text(&[], "one\ntwo\n", 0);
        let second = annotate_text(&first, "one\nthree\ntwo\n", 1);

        assert_eq!(versions(&second), vec![(0, "one"), (1, "three"), (0, "two")]);
    }

    #[test]
    fn test_annotated_line_serde() -> anyhow::Result<()> {
        let line = AnnotatedLine::new("fn main() {}", 4);
        let json = serde_json::to_string(&line)?;
        assert_eq!(json, r#"{"text":"fn main() {}","version":4}"#);
        Ok(())
    }
}
