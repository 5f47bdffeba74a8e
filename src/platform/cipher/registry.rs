//! Catalog of the array transforms a descrambler is built from

/// The kinds of transform the signature obfuscator is known to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransformKind {
    /// Reverse the whole array
    Reverse,
    /// Remove the first N elements
    DropPrefix,
    /// Swap element 0 with element N modulo the length
    SwapWithWrap,
}

/// A catalog entry: how to recognize a transform and how to run it
#[derive(Debug)]
pub struct TransformEntry {
    /// Transform kind
    pub kind: TransformKind,
    /// Substring that occurs in the defining source of this transform only
    pub fingerprint: &'static str,
    /// Array transform; receives the running array and the numeric argument
    pub apply: fn(Vec<char>, usize) -> Vec<char>,
}

impl TransformEntry {
    /// Run the transform, returning the new running array
    pub fn run(&self, chars: Vec<char>, count: usize) -> Vec<char> {
        (self.apply)(chars, count)
    }
}

fn reverse(mut chars: Vec<char>, _count: usize) -> Vec<char> {
    chars.reverse();
    chars
}

fn drop_prefix(mut chars: Vec<char>, count: usize) -> Vec<char> {
    let count = count.min(chars.len());
    chars.drain(..count);
    chars
}

fn swap_with_wrap(mut chars: Vec<char>, count: usize) -> Vec<char> {
    if !chars.is_empty() {
        let index = count % chars.len();
        chars.swap(0, index);
    }
    chars
}

static STANDARD_ENTRIES: [TransformEntry; 3] = [
    TransformEntry {
        kind: TransformKind::Reverse,
        fingerprint: ".reverse(",
        apply: reverse,
    },
    TransformEntry {
        kind: TransformKind::DropPrefix,
        fingerprint: ".splice(",
        apply: drop_prefix,
    },
    TransformEntry {
        kind: TransformKind::SwapWithWrap,
        fingerprint: ".length",
        apply: swap_with_wrap,
    },
];

static STANDARD: TransformRegistry = TransformRegistry {
    entries: &STANDARD_ENTRIES,
};

/// Ordered, read-only set of transform entries
///
/// Lookup is a linear scan and the first entry whose fingerprint occurs in
/// the definition wins, so entry order is the tie-break.
#[derive(Debug)]
pub struct TransformRegistry {
    entries: &'static [TransformEntry],
}

impl TransformRegistry {
    /// The process-wide registry with the three known transforms
    pub fn standard() -> &'static TransformRegistry {
        &STANDARD
    }

    /// Build a registry over a custom ordered set of entries
    pub const fn from_entries(entries: &'static [TransformEntry]) -> Self {
        Self { entries }
    }

    /// Entries in catalog order
    pub fn entries(&self) -> &'static [TransformEntry] {
        self.entries
    }

    /// Find the first entry whose fingerprint occurs in `definition`
    pub fn classify(&self, definition: &str) -> Option<&'static TransformEntry> {
        self.entries
            .iter()
            .find(|entry| definition.contains(entry.fingerprint))
    }

    /// Entry for a given kind
    pub fn entry(&self, kind: TransformKind) -> Option<&'static TransformEntry> {
        self.entries.iter().find(|entry| entry.kind == kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(kind: TransformKind, input: &str, count: usize) -> String {
        let entry = TransformRegistry::standard().entry(kind).unwrap();
        entry.run(input.chars().collect(), count).into_iter().collect()
    }

    #[test]
    fn test_reverse() {
        assert_eq!(run(TransformKind::Reverse, "abcde", 0), "edcba");
        assert_eq!(run(TransformKind::Reverse, "abcde", 42), "edcba");
        assert_eq!(run(TransformKind::Reverse, "", 3), "");
    }

    #[test]
    fn test_drop_prefix() {
        assert_eq!(run(TransformKind::DropPrefix, "abcde", 2), "cde");
        assert_eq!(run(TransformKind::DropPrefix, "abcde", 0), "abcde");
        assert_eq!(run(TransformKind::DropPrefix, "abcde", 9), "");
    }

    #[test]
    fn test_swap_with_wrap() {
        assert_eq!(run(TransformKind::SwapWithWrap, "abcde", 7), "cbade");
        assert_eq!(run(TransformKind::SwapWithWrap, "abcde", 3), "dbcae");
        assert_eq!(run(TransformKind::SwapWithWrap, "abcde", 5), "abcde");
        assert_eq!(run(TransformKind::SwapWithWrap, "", 7), "");
    }

    #[test]
    fn test_classify_by_fingerprint() {
        let registry = TransformRegistry::standard();

        let entry = registry.classify("Xy:function(a){a.reverse()}").unwrap();
        assert_eq!(entry.kind, TransformKind::Reverse);

        let entry = registry.classify("Xy:function(a,b){a.splice(0,b)}").unwrap();
        assert_eq!(entry.kind, TransformKind::DropPrefix);

        let entry = registry
            .classify("Xy:function(a,b){var c=a[0];a[0]=a[b%a.length];a[b%a.length]=c}")
            .unwrap();
        assert_eq!(entry.kind, TransformKind::SwapWithWrap);

        assert!(registry.classify("Xy:function(a){a.sort()}").is_none());
    }

    #[test]
    fn test_classify_first_match_wins() {
        // Both the reverse and the length fingerprints occur; catalog order decides.
        let entry = TransformRegistry::standard()
            .classify("Xy:function(a){a.length&&a.reverse()}")
            .unwrap();
        assert_eq!(entry.kind, TransformKind::Reverse);
    }

    #[test]
    fn test_custom_registry_order() {
        static ENTRIES: [TransformEntry; 2] = [
            TransformEntry {
                kind: TransformKind::SwapWithWrap,
                fingerprint: ".length",
                apply: swap_with_wrap,
            },
            TransformEntry {
                kind: TransformKind::Reverse,
                fingerprint: ".reverse(",
                apply: reverse,
            },
        ];
        static REGISTRY: TransformRegistry = TransformRegistry::from_entries(&ENTRIES);

        let entry = REGISTRY
            .classify("Xy:function(a){a.length&&a.reverse()}")
            .unwrap();
        assert_eq!(entry.kind, TransformKind::SwapWithWrap);
        assert_eq!(REGISTRY.entries().len(), 2);
    }
}
