//! Glossary texts used across harnesses.

/// A small English glossary exercising every feature of the text format:
/// pronunciation guides, ordinals, duplicates, blank lines inside an entry
/// and multi-line translation lists.
pub const GLOSSARY: &str = "\
hello [heh-LOH]
    1.hola, 2.qué tal

help [help]
    ayuda, socorro

    auxilio
cat [kat]
    3.gato, minino
dog
    perro, perro
    can
yellow
    amarillo
kitten
    gatito, minino
";

/// Headwords of [`GLOSSARY`] in lexicographic order.
pub const GLOSSARY_HEADWORDS: &[&str] = &["cat", "dog", "hello", "help", "kitten", "yellow"];

/// The smallest useful glossary.
pub const HELLO_ONLY: &str = "hello\n    hola\n";

/// Splits a report into lines, dropping the trailing elapsed-time line whose
/// value varies between runs.
pub fn report_lines(report: &str) -> Vec<&str> {
    let mut lines: Vec<&str> = report.lines().collect();
    if lines.last().is_some_and(|l| l.starts_with('(') && l.ends_with("s)")) {
        lines.pop();
    }
    lines
}
