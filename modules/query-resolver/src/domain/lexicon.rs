use std::collections::BTreeMap;

/// Token-level transliteration table.
///
/// Entries may span several tokens (`"aane wale"`); at each position the
/// longest matching entry wins.
#[derive(Debug, Clone)]
pub struct Lexicon {
    entries: BTreeMap<String, String>,
    longest: usize,
}

impl Lexicon {
    #[must_use]
    pub fn new(table: &BTreeMap<String, String>) -> Self {
        let entries: BTreeMap<String, String> = table
            .iter()
            .map(|(from, to)| (canonical_phrase(from), to.clone()))
            .filter(|(from, _)| !from.is_empty())
            .collect();
        let longest = entries
            .keys()
            .map(|k| k.split(' ').count())
            .max()
            .unwrap_or(0);
        Self { entries, longest }
    }

    /// Rewrite normalized text through the table.
    #[must_use]
    pub fn apply(&self, normalized: &str) -> String {
        let tokens: Vec<&str> = normalized.split_whitespace().collect();
        let mut out: Vec<&str> = Vec::with_capacity(tokens.len());
        let mut i = 0;
        while i < tokens.len() {
            let max = self.longest.min(tokens.len() - i);
            let hit = (1..=max).rev().find_map(|len| {
                let phrase = tokens[i..i + len].join(" ");
                self.entries.get(&phrase).map(|to| (len, to.as_str()))
            });
            match hit {
                Some((len, to)) => {
                    out.push(to);
                    i += len;
                }
                None => {
                    out.push(tokens[i]);
                    i += 1;
                }
            }
        }
        out.join(" ")
    }
}

fn canonical_phrase(phrase: &str) -> String {
    phrase
        .split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    fn lexicon(pairs: &[(&str, &str)]) -> Lexicon {
        let table = pairs
            .iter()
            .map(|(a, b)| ((*a).to_owned(), (*b).to_owned()))
            .collect();
        Lexicon::new(&table)
    }

    #[test]
    fn single_tokens_are_replaced() {
        let lx = lexicon(&[("dikhao", "show"), ("nahi", "not")]);
        assert_eq!(lx.apply("grade 8 ki performance dikhao"), "grade 8 ki performance show");
        assert_eq!(lx.apply("submit nahi kiya"), "submit not kiya");
    }

    #[test]
    fn longest_phrase_wins() {
        let lx = lexicon(&[("kam", "low"), ("se kam", "less than"), ("sabse kam", "lowest")]);
        assert_eq!(lx.apply("60 se kam marks"), "60 less than marks");
        assert_eq!(lx.apply("sabse kam marks"), "lowest marks");
        assert_eq!(lx.apply("kam attendance"), "low attendance");
    }

    #[test]
    fn table_keys_are_normalized() {
        let lx = lexicon(&[("  Aane   Wale ", "upcoming")]);
        assert_eq!(lx.apply("aane wale quiz"), "upcoming quiz");
    }

    #[test]
    fn empty_table_is_identity() {
        let lx = lexicon(&[]);
        assert_eq!(lx.apply("show all students"), "show all students");
        assert_eq!(lx.apply(""), "");
    }
}
