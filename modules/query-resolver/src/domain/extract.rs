//! Filter extraction over interpreted query text.
//!
//! Extraction is independent of intent selection. Every recognizer reports
//! the byte offset it matched at; filters are then ordered by appearance and
//! conflicting filters on the same field are resolved last-writer-wins.

use std::cmp::Reverse;
use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use regex::{Captures, Regex};
use roster_query::{Field, QueryFilter};
use roster_security::Dimension;

use crate::config::{RelativeWindow, ResolverConfig};
use crate::error::ResolverError;

struct Thresholds {
    forward: Regex,
    backward: Regex,
    less_than: BTreeSet<String>,
}

pub struct FilterExtractor {
    grade_after: Regex,
    grade_before: Regex,
    grade_min: i64,
    grade_max: i64,
    grade_keywords: BTreeSet<String>,
    section: Option<Regex>,
    sections: BTreeMap<String, String>,
    regions: Vec<(Regex, String)>,
    subjects: Vec<(Regex, String)>,
    thresholds: Option<Thresholds>,
    metric_keywords: BTreeMap<String, Field>,
    window: usize,
    time_windows: Vec<(Regex, RelativeWindow)>,
}

impl FilterExtractor {
    /// Compile the extraction vocabularies.
    ///
    /// # Errors
    /// Returns [`ResolverError`] when grade bounds are inverted, no grade
    /// keyword is configured, or a vocabulary fails to compile.
    pub fn new(config: &ResolverConfig) -> Result<Self, ResolverError> {
        if config.grades.min > config.grades.max {
            return Err(ResolverError::InvalidConfig(format!(
                "grade bounds inverted: {} > {}",
                config.grades.min, config.grades.max
            )));
        }
        let grade_kw = alternation(&config.grades.keywords)
            .ok_or_else(|| ResolverError::InvalidConfig("no grade keywords".to_owned()))?;

        let grade_after = compile(
            "grade",
            &format!(
                r"\b(?:{grade_kw})\s+(\d{{1,2}})(?:\s+(and|or|to)\s+(\d{{1,2}}))?\b"
            ),
        )?;
        let grade_before = compile(
            "grade",
            &format!(r"\b(\d{{1,2}})(?:st|nd|rd|th)?\s+(?:{grade_kw})\b"),
        )?;

        let sections: BTreeMap<String, String> = config
            .class_sections
            .iter()
            .map(|s| (s.trim().to_lowercase(), s.trim().to_owned()))
            .filter(|(k, _)| !k.is_empty())
            .collect();
        let section = alternation(sections.keys())
            .map(|letters| {
                compile(
                    "class section",
                    &format!(r"\b(?:class|section)\s+({letters})\b|\b({letters})\s+section\b"),
                )
            })
            .transpose()?;

        let regions = closed_list(
            "region",
            config.regions.iter().map(|r| (r, std::slice::from_ref(r))),
        )?;
        let subjects = closed_list(
            "subject",
            config
                .subjects
                .iter()
                .map(|s| (&s.name, s.aliases.as_slice())),
        )?;

        let metric_keywords = config
            .metrics
            .quiz_score
            .iter()
            .map(|k| (k.to_lowercase(), Field::QuizScore))
            .chain(
                config
                    .metrics
                    .attendance_percentage
                    .iter()
                    .map(|k| (k.to_lowercase(), Field::AttendancePercentage)),
            )
            .collect();

        let time_windows = config
            .time_windows
            .iter()
            .map(|w| {
                let re = compile("time window", &format!(r"\b{}\b", phrase_pattern(&w.phrase)))?;
                Ok((re, w.window))
            })
            .collect::<Result<Vec<_>, ResolverError>>()?;

        Ok(Self {
            grade_after,
            grade_before,
            grade_min: config.grades.min,
            grade_max: config.grades.max,
            grade_keywords: config.grades.keywords.iter().map(|k| k.to_lowercase()).collect(),
            section,
            sections,
            regions,
            subjects,
            thresholds: Thresholds::new(config)?,
            metric_keywords,
            window: config.metrics.window,
            time_windows,
        })
    }

    /// Extract filters from interpreted text, ordered by appearance.
    #[must_use]
    pub fn extract(&self, text: &str, today: NaiveDate) -> Vec<QueryFilter> {
        let mut found: Vec<(usize, QueryFilter)> = Vec::new();
        self.grades(text, &mut found);
        self.sections(text, &mut found);
        Self::match_closed_list(text, &self.regions, Dimension::Region, &mut found);
        Self::match_closed_list(text, &self.subjects, Dimension::Subject, &mut found);
        self.thresholds(text, &mut found);
        self.windows(text, today, &mut found);

        found.sort_by_key(|(pos, _)| *pos);
        last_writer_wins(found.into_iter().map(|(_, f)| f))
    }

    fn grades(&self, text: &str, found: &mut Vec<(usize, QueryFilter)>) {
        for caps in self.grade_after.captures_iter(text) {
            let Some(first) = int_at(&caps, 1) else {
                continue;
            };
            let values: Vec<i64> = match (caps.get(2).map(|m| m.as_str()), int_at(&caps, 3)) {
                (Some("to"), Some(last)) => (first.min(last)..=first.max(last)).collect(),
                (Some(_), Some(second)) => vec![first, second],
                _ => vec![first],
            };
            self.push_grades(caps.get(0).map_or(0, |m| m.start()), &values, found);
        }
        for caps in self.grade_before.captures_iter(text) {
            if let Some(grade) = int_at(&caps, 1) {
                self.push_grades(caps.get(0).map_or(0, |m| m.start()), &[grade], found);
            }
        }
    }

    fn push_grades(&self, pos: usize, values: &[i64], found: &mut Vec<(usize, QueryFilter)>) {
        let in_bounds: BTreeSet<i64> = values
            .iter()
            .copied()
            .filter(|g| (self.grade_min..=self.grade_max).contains(g))
            .collect();
        let filter = match in_bounds.len() {
            0 => {
                tracing::debug!(?values, "discarding out-of-range grade");
                return;
            }
            1 => in_bounds
                .first()
                .and_then(|g| QueryFilter::equals(Dimension::Grade, *g).ok()),
            _ => QueryFilter::one_of(Dimension::Grade, in_bounds).ok(),
        };
        if let Some(filter) = filter {
            found.push((pos, filter));
        }
    }

    fn sections(&self, text: &str, found: &mut Vec<(usize, QueryFilter)>) {
        let Some(re) = &self.section else {
            return;
        };
        for caps in re.captures_iter(text) {
            let letter = caps.get(1).or_else(|| caps.get(2));
            let canonical = letter.and_then(|m| self.sections.get(m.as_str()));
            if let (Some(m), Some(canonical)) = (caps.get(0), canonical)
                && let Ok(filter) = QueryFilter::equals(Dimension::ClassSection, canonical.as_str())
            {
                found.push((m.start(), filter));
            }
        }
    }

    fn match_closed_list(
        text: &str,
        list: &[(Regex, String)],
        dimension: Dimension,
        found: &mut Vec<(usize, QueryFilter)>,
    ) {
        for (re, canonical) in list {
            for m in re.find_iter(text) {
                if let Ok(filter) = QueryFilter::equals(dimension, canonical.as_str()) {
                    found.push((m.start(), filter));
                }
            }
        }
    }

    fn thresholds(&self, text: &str, found: &mut Vec<(usize, QueryFilter)>) {
        let Some(th) = &self.thresholds else {
            return;
        };
        let tokens = TokenIndex::new(text);
        let mut used_numbers = BTreeSet::new();
        let mut used_comparisons = BTreeSet::new();

        // "less than 80" first, then Hindi order "80 less than"
        let forward = th.forward.captures_iter(text);
        let backward = th.backward.captures_iter(text);
        for caps in forward.chain(backward) {
            let (Some(whole), Some(cmp), Some(num)) =
                (caps.get(0), caps.name("cmp"), caps.name("num"))
            else {
                continue;
            };
            if used_numbers.contains(&num.start()) || used_comparisons.contains(&cmp.start()) {
                continue;
            }
            let Ok(threshold) = num.as_str().parse::<i64>() else {
                continue;
            };
            // "grade 8 kam marks": the numeral belongs to the grade
            if self.follows_grade_keyword(&tokens, num.start()) {
                continue;
            }
            let span = (tokens.at(whole.start()), tokens.at(whole.end().saturating_sub(1)));
            let Some(field) = self.nearest_metric(&tokens, span) else {
                tracing::debug!(threshold, "discarding threshold without a metric keyword");
                continue;
            };
            let cmp_text = cmp.as_str().split_whitespace().collect::<Vec<_>>().join(" ");
            let filter = if th.less_than.contains(&cmp_text) {
                QueryFilter::less_than(field, threshold)
            } else {
                QueryFilter::greater_than(field, threshold)
            };
            if let Ok(filter) = filter {
                used_numbers.insert(num.start());
                used_comparisons.insert(cmp.start());
                found.push((whole.start(), filter));
            }
        }
    }

    fn follows_grade_keyword(&self, tokens: &TokenIndex<'_>, offset: usize) -> bool {
        tokens
            .at(offset)
            .checked_sub(1)
            .and_then(|i| tokens.words.get(i))
            .is_some_and(|word| self.grade_keywords.contains(*word))
    }

    /// Closest metric keyword within the window around a token span.
    /// Ties go to the keyword on the left.
    fn nearest_metric(&self, tokens: &TokenIndex<'_>, (first, last): (usize, usize)) -> Option<Field> {
        tokens
            .words
            .iter()
            .enumerate()
            .filter_map(|(i, word)| {
                let field = *self.metric_keywords.get(*word)?;
                let (distance, side) = if i < first {
                    (first - i, 0)
                } else if i > last {
                    (i - last, 1)
                } else {
                    return None;
                };
                (distance <= self.window).then_some(((distance, side), field))
            })
            .min_by_key(|(rank, _)| *rank)
            .map(|(_, field)| field)
    }

    fn windows(&self, text: &str, today: NaiveDate, found: &mut Vec<(usize, QueryFilter)>) {
        for (re, window) in &self.time_windows {
            for m in re.find_iter(text) {
                if let Some(range) = window.resolve(today) {
                    found.push((m.start(), QueryFilter::within(range)));
                }
            }
        }
    }
}

impl Thresholds {
    fn new(config: &ResolverConfig) -> Result<Option<Self>, ResolverError> {
        let all = config
            .comparisons
            .less_than
            .iter()
            .chain(config.comparisons.greater_than.iter());
        let Some(cmp) = alternation(all) else {
            return Ok(None);
        };
        let forward = compile(
            "comparison",
            &format!(r"\b(?P<cmp>{cmp})\s+(?P<num>\d{{1,3}})\b"),
        )?;
        let backward = compile(
            "comparison",
            &format!(r"\b(?P<num>\d{{1,3}})\s+(?P<cmp>{cmp})\b"),
        )?;
        let less_than = config
            .comparisons
            .less_than
            .iter()
            .map(|p| p.split_whitespace().map(str::to_lowercase).collect::<Vec<_>>().join(" "))
            .collect();
        Ok(Some(Self {
            forward,
            backward,
            less_than,
        }))
    }
}

/// Whitespace tokens of normalized text with their byte offsets.
struct TokenIndex<'a> {
    words: Vec<&'a str>,
    starts: Vec<usize>,
}

impl<'a> TokenIndex<'a> {
    fn new(text: &'a str) -> Self {
        let mut words = Vec::new();
        let mut starts = Vec::new();
        let mut offset = 0;
        for word in text.split(' ') {
            if !word.is_empty() {
                words.push(word);
                starts.push(offset);
            }
            offset += word.len() + 1;
        }
        Self { words, starts }
    }

    /// Index of the token containing byte `offset`.
    fn at(&self, offset: usize) -> usize {
        self.starts.partition_point(|s| *s <= offset).saturating_sub(1)
    }
}

/// Keep only the last of every group of conflicting filters, preserving the
/// order of the survivors.
fn last_writer_wins(filters: impl IntoIterator<Item = QueryFilter>) -> Vec<QueryFilter> {
    let mut out: Vec<QueryFilter> = Vec::new();
    for filter in filters {
        out.retain(|existing| !existing.conflicts_with(&filter));
        out.push(filter);
    }
    out
}

fn int_at(caps: &Captures<'_>, group: usize) -> Option<i64> {
    caps.get(group).and_then(|m| m.as_str().parse().ok())
}

fn phrase_pattern(phrase: &str) -> String {
    phrase
        .split_whitespace()
        .map(|w| regex::escape(&w.to_lowercase()))
        .collect::<Vec<_>>()
        .join(r"\s+")
}

/// Regex alternation of phrases, longest first.
fn alternation<'a, I>(phrases: I) -> Option<String>
where
    I: IntoIterator<Item = &'a String>,
{
    let mut parts: Vec<String> = phrases
        .into_iter()
        .map(|p| phrase_pattern(p))
        .filter(|p| !p.is_empty())
        .collect();
    parts.sort_by_key(|p| (Reverse(p.len()), p.clone()));
    parts.dedup();
    (!parts.is_empty()).then(|| parts.join("|"))
}

/// One recognizer per canonical entry, matching its name or any alias.
fn closed_list<'a, I>(
    table: &'static str,
    entries: I,
) -> Result<Vec<(Regex, String)>, ResolverError>
where
    I: IntoIterator<Item = (&'a String, &'a [String])>,
{
    let mut out = Vec::new();
    for (name, aliases) in entries {
        let Some(alts) = alternation(std::iter::once(name).chain(aliases)) else {
            continue;
        };
        out.push((compile(table, &format!(r"\b(?:{alts})\b"))?, name.trim().to_owned()));
    }
    Ok(out)
}

fn compile(table: &'static str, pattern: &str) -> Result<Regex, ResolverError> {
    Regex::new(pattern).map_err(|source| ResolverError::InvalidVocabulary { table, source })
}
