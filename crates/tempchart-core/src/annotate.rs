// File: crates/tempchart-core/src/annotate.rs
// Summary: Repeat-appearance filter and the annotation lines built from it.

use std::collections::BTreeMap;

use crate::rank::AppearanceHistory;

/// Role of an annotation line; backends space blocks apart by it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnnotationKind {
    /// Aggregate value for the shown year.
    Readout,
    /// Title of the repeat list.
    Heading,
    /// One repeat entity and its years.
    Entry,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Annotation {
    pub kind: AnnotationKind,
    pub text: String,
}

impl Annotation {
    pub fn new(kind: AnnotationKind, text: impl Into<String>) -> Self { Self { kind, text: text.into() } }

    /// Readouts and headings open a new block.
    pub fn starts_block(&self) -> bool { self.kind != AnnotationKind::Entry }
}

/// Entities from `displayed` that placed in the top-K in more than one year,
/// with those years ascending.
pub fn find_repeats(history: &AppearanceHistory, displayed: &[String]) -> BTreeMap<String, Vec<i32>> {
    displayed
        .iter()
        .filter_map(|e| {
            let years = history.years_of(e)?;
            (years.len() > 1).then(|| (e.clone(), years.iter().copied().collect()))
        })
        .collect()
}

/// Heading plus one `Name: y1, y2` line per repeat, following `displayed` order.
/// Empty when there is nothing to annotate.
pub fn repeat_lines(
    repeats: &BTreeMap<String, Vec<i32>>,
    displayed: &[String],
    k: usize,
    window: (i32, i32),
) -> Vec<Annotation> {
    if repeats.is_empty() {
        return Vec::new();
    }
    let mut lines = vec![Annotation::new(
        AnnotationKind::Heading,
        format!(
            "Countries Repeatedly Ranking in the Top {k} for Temperature Increase ({}-{}):",
            window.0, window.1
        ),
    )];
    for e in displayed {
        if let Some(years) = repeats.get(e) {
            let joined = years.iter().map(|y| y.to_string()).collect::<Vec<_>>().join(", ");
            lines.push(Annotation::new(AnnotationKind::Entry, format!("{e}: {joined}")));
        }
    }
    lines
}

/// The aggregate readout for a snapshot year; `value` is the cell text.
pub fn global_readout(value: &str, year: i32, baseline_label: &str) -> Annotation {
    Annotation::new(
        AnnotationKind::Readout,
        format!("The global temperature has risen by {value}°C for the year of {year} compared to the {baseline_label}."),
    )
}
