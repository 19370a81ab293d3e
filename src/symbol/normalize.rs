// Tue Jan 20 2026 - Alex

/// Ordered `(from, to)` rewrites applied to a demangled signature.
///
/// Order is significant: declarator spacing is collapsed first, unsigned
/// spellings run before the signed ones they contain, and `long long` forms
/// run before `long`.
pub const PARAMETER_SUBSTITUTIONS: &[(&str, &str)] = &[
    // The demangler puts a space in front of pointer and reference modifiers.
    (" &", "&"),
    (" **", "**"),
    (" *", "*"),
    ("unsigned char", "uint8_t"),
    ("unsigned short", "uint16_t"),
    ("unsigned int", "uint32_t"),
    ("unsigned long long", "uint64_t"),
    ("unsigned long", "uint32_t"),
    ("char", "int8_t"),
    ("short", "int16_t"),
    ("int", "int32_t"),
    ("long long", "int64_t"),
    ("long", "int32_t"),
];

/// Words that extend an integer spelling into a different builtin type, so
/// `long double` must not lose its `long`.
const COMPOUND_TYPE_SUFFIXES: &[&str] = &[" double"];

/// Rewrites builtin integer spellings into fixed-width names.
#[derive(Debug, Clone)]
pub struct TypeNormalizer {
    substitutions: Vec<(String, String)>,
}

impl TypeNormalizer {
    pub fn new() -> Self {
        Self::with_substitutions(PARAMETER_SUBSTITUTIONS)
    }

    pub fn with_substitutions(substitutions: &[(&str, &str)]) -> Self {
        Self {
            substitutions: substitutions
                .iter()
                .map(|(from, to)| (from.to_string(), to.to_string()))
                .collect(),
        }
    }

    pub fn normalize(&self, signature: &str) -> String {
        let mut result = signature.to_string();
        for (from, to) in &self.substitutions {
            substitute_whole_words(&mut result, from, to);
        }
        result
    }
}

impl Default for TypeNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

/// Replaces every whole-word occurrence of `from` with `to`, scanning left
/// to right. Returns the number of replacements made.
pub fn substitute_whole_words(text: &mut String, from: &str, to: &str) -> usize {
    if from.is_empty() {
        return 0;
    }

    let mut replaced = 0;
    let mut pos = 0;

    while let Some(offset) = text.get(pos..).and_then(|rest| rest.find(from)) {
        let start = pos + offset;
        let end = start + from.len();

        let whole_word = start > 0
            && is_word_start(text.as_bytes()[start - 1], from)
            && is_word_end(text.as_bytes().get(end).copied())
            && !continues_compound_type(&text[end..]);

        if whole_word {
            text.replace_range(start..end, to);
            replaced += 1;
            // `to` may contain `from`, so skip the whole replacement.
            pos = start + to.len();
        } else {
            pos = start + 1;
        }
    }

    replaced
}

fn is_word_start(previous: u8, from: &str) -> bool {
    previous == b' ' || previous == b'(' || from.starts_with(' ')
}

fn is_word_end(next: Option<u8>) -> bool {
    matches!(next, None | Some(b',') | Some(b')') | Some(b' ') | Some(b'*') | Some(b'&'))
}

fn continues_compound_type(rest: &str) -> bool {
    COMPOUND_TYPE_SUFFIXES.iter().any(|suffix| {
        rest.strip_prefix(suffix)
            .map_or(false, |after| is_word_end(after.bytes().next()))
    })
}
