//! Text helpers shared by the parser stages
//!
//! Clause splitting, normalization for restatement checks, and fail-soft
//! numeric conversion.

use deunicode::deunicode;
use nom::{
    character::complete::{digit1, one_of},
    combinator::{all_consuming, map_res, opt, recognize},
    sequence::pair,
    IResult,
};

/// Characters that end a sentence inside rules text
const SENTENCE_END: &[char] = &['.', '!', '?'];

/// Boundaries between sub-effects inside one ability
const SUB_CLAUSE_END: &[char] = &['.', '!', '?', ';'];

/// Normalize text for "is this a restatement?" comparisons
///
/// Keeps only alphanumerics, lower-cased. With `fold_accents`, accented
/// letters are folded to ASCII first so "Pokémon" and "Pokemon" compare equal.
pub fn normalize_for_compare(text: &str, fold_accents: bool) -> String {
    let folded;
    let source = if fold_accents {
        folded = deunicode(text);
        folded.as_str()
    } else {
        text
    };

    source
        .chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Remove parenthesized reminder text, e.g. "Rush (This character can
/// challenge the turn they're played.)" becomes "Rush"
///
/// Nested parentheses are removed with their parent. An unbalanced closing
/// parenthesis is kept as-is.
pub fn strip_reminder_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut depth = 0usize;

    for c in text.chars() {
        match c {
            '(' => depth += 1,
            ')' if depth > 0 => depth -= 1,
            _ if depth == 0 => out.push(c),
            _ => {}
        }
    }

    // Collapse the double spaces left behind
    let mut collapsed = String::with_capacity(out.len());
    let mut last_space = false;
    for c in out.chars() {
        if c == ' ' {
            if !last_space {
                collapsed.push(c);
            }
            last_space = true;
        } else {
            collapsed.push(c);
            last_space = false;
        }
    }
    collapsed
}

/// Split a rules-text body into clauses: line breaks first, then sentences
pub fn split_clauses(body: &str) -> Vec<&str> {
    body.lines()
        .flat_map(|line| line.split(SENTENCE_END))
        .map(trim_clause)
        .filter(|clause| !clause.is_empty())
        .collect()
}

/// Split effect text into ordered sub-clauses on sentence ends and semicolons
pub fn split_sub_clauses(effect_text: &str) -> Vec<&str> {
    effect_text
        .split(SUB_CLAUSE_END)
        .map(trim_clause)
        .filter(|clause| !clause.is_empty())
        .collect()
}

/// Trim whitespace and dangling punctuation from both ends of a clause
pub fn trim_clause(clause: &str) -> &str {
    clause
        .trim()
        .trim_end_matches(|c: char| c == ',' || c == ':' || c.is_whitespace() || SUB_CLAUSE_END.contains(&c))
        .trim()
}

fn signed_integer(input: &str) -> IResult<&str, i64> {
    map_res(recognize(pair(opt(one_of("+-")), digit1)), |s: &str| s.parse::<i64>())(input)
}

/// Parse an integer token such as "3", "+2" or "-1"
///
/// Returns `None` for anything else, including values that overflow.
pub fn parse_int(token: &str) -> Option<i64> {
    all_consuming(signed_integer)(token.trim()).ok().map(|(_, n)| n)
}

/// Parse an amount token: a number, or the article "a"/"an" meaning one
pub fn parse_amount(token: &str) -> Option<i64> {
    let token = token.trim();
    if token.eq_ignore_ascii_case("a") || token.eq_ignore_ascii_case("an") {
        return Some(1);
    }
    parse_int(token)
}
