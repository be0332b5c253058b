//! Cascade source dialect: ordered contextual rewrite rules
//!
//! The bundled dialect is line-based:
//!
//! ```text
//! ! devoicing and vowel reduction
//! alphabet a b k p ə
//! rule devoice: b -> p / _ #
//! rule raise: a -> ə
//! ```
//!
//! - `!` starts a comment (to end of line).
//! - `alphabet` (optional) declares the accepted symbol inventory. Symbols
//!   mentioned by rules are added to it implicitly; when any declaration is
//!   present, tracing a word containing an undeclared symbol is a per-word
//!   trace error rather than a silent miss.
//! - `rule <name>: <source> -> <target> [/ <left> _ <right>]` declares one
//!   rewrite; cascade order is line order. `#` in a context is the word
//!   boundary, `0` as the target deletes the source symbols.
//!
//! Rule names must be unique within a cascade: the firing signature is a
//! sequence of names, and a reused name would make it ambiguous.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use thiserror::Error;

// ============================================================================
// The rule seam
// ============================================================================

/// Failure of a single rule application.
///
/// The bundled `ContextRule` never fails; external rule backends (e.g. a
/// finite-state transducer that rejects out-of-sigma input) surface their
/// rejection here.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct RuleError {
    pub message: String,
}

/// An ordered, named rewrite rule.
///
/// Contract: `apply` must return its input unchanged when the rule does not
/// affect it — the tracer detects "did this rule fire" by string inequality.
pub trait Rule {
    fn name(&self) -> &str;
    fn apply(&self, input: &str) -> Result<String, RuleError>;
}

// ============================================================================
// ContextRule
// ============================================================================

/// One side of a rewrite context: a literal symbol sequence, optionally
/// anchored at the word boundary (`#`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextSpec {
    pub boundary: bool,
    pub symbols: Vec<char>,
}

/// A contextual rewrite: `source -> target / left _ right`.
///
/// Application scans left to right over non-overlapping matches; the output
/// is not rescanned, so a rule sees each input position once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextRule {
    pub name: String,
    pub source: Vec<char>,
    pub target: String,
    pub left: ContextSpec,
    pub right: ContextSpec,
}

impl ContextRule {
    fn left_matches(&self, chars: &[char], at: usize) -> bool {
        let ctx = &self.left;
        if ctx.symbols.len() > at {
            return false;
        }
        let start = at - ctx.symbols.len();
        if chars[start..at] != ctx.symbols[..] {
            return false;
        }
        !ctx.boundary || start == 0
    }

    fn right_matches(&self, chars: &[char], at: usize) -> bool {
        let ctx = &self.right;
        if at + ctx.symbols.len() > chars.len() {
            return false;
        }
        let end = at + ctx.symbols.len();
        if chars[at..end] != ctx.symbols[..] {
            return false;
        }
        !ctx.boundary || end == chars.len()
    }
}

impl Rule for ContextRule {
    fn name(&self) -> &str {
        &self.name
    }

    fn apply(&self, input: &str) -> Result<String, RuleError> {
        // An empty source never advances the scan position; treat a
        // hand-built rule with one as inert. `readrules` rejects it outright.
        if self.source.is_empty() {
            return Ok(input.to_string());
        }
        let chars: Vec<char> = input.chars().collect();
        let mut out = String::with_capacity(input.len());
        let mut i = 0usize;
        while i < chars.len() {
            let matches = chars[i..].starts_with(&self.source)
                && self.left_matches(&chars, i)
                && self.right_matches(&chars, i + self.source.len());
            if matches {
                out.push_str(&self.target);
                i += self.source.len();
            } else {
                out.push(chars[i]);
                i += 1;
            }
        }
        Ok(out)
    }
}

// ============================================================================
// Cascade
// ============================================================================

/// An ordered rule cascade. Rule order is fixed for the lifetime of a run:
/// rule *i* always sees the output of rule *i-1*.
pub struct Cascade {
    rules: Vec<Box<dyn Rule>>,
    /// Accepted symbol inventory; `None` when the source declared none, in
    /// which case words are not checked.
    alphabet: Option<BTreeSet<char>>,
}

impl Cascade {
    /// Wrap an externally built rule list. No alphabet checking is performed;
    /// the backend is expected to reject input it cannot process via
    /// `RuleError`.
    pub fn new(rules: Vec<Box<dyn Rule>>) -> Self {
        Cascade {
            rules,
            alphabet: None,
        }
    }

    /// An empty cascade is valid: it fires nothing and maps every word to
    /// itself.
    pub fn empty() -> Self {
        Cascade::new(Vec::new())
    }

    pub fn rules(&self) -> &[Box<dyn Rule>] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Declared rule order, for report annotation.
    pub fn rule_order(&self) -> Vec<String> {
        self.rules.iter().map(|r| r.name().to_string()).collect()
    }

    /// The first symbol of `word` outside the declared alphabet, if any.
    pub fn undeclared_symbol(&self, word: &str) -> Option<char> {
        let alphabet = self.alphabet.as_ref()?;
        word.chars().find(|c| !alphabet.contains(c))
    }

    /// Build a cascade from the bundled dialect (`readrules` in the external
    /// engine's vocabulary). Rule order is line order.
    pub fn readrules(text: &str) -> Result<Cascade, CascadeParseError> {
        let mut rules: Vec<Box<dyn Rule>> = Vec::new();
        let mut seen: BTreeSet<String> = BTreeSet::new();
        let mut declared: BTreeSet<char> = BTreeSet::new();
        let mut mentioned: BTreeSet<char> = BTreeSet::new();
        let mut has_alphabet = false;

        for (idx, raw) in text.lines().enumerate() {
            let line_no = idx + 1;
            let line = match raw.find('!') {
                Some(pos) => &raw[..pos],
                None => raw,
            }
            .trim();
            if line.is_empty() {
                continue;
            }

            if let Some(rest) = line
                .strip_prefix("alphabet")
                .filter(|r| r.is_empty() || r.starts_with(char::is_whitespace))
            {
                has_alphabet = true;
                for sym in rest.split_whitespace() {
                    let mut chars = sym.chars();
                    match (chars.next(), chars.next()) {
                        (Some(c), None) => {
                            declared.insert(c);
                        }
                        _ => {
                            return Err(CascadeParseError::Line {
                                line: line_no,
                                message: format!(
                                    "alphabet symbols are single characters, got `{sym}`"
                                ),
                            })
                        }
                    }
                }
                continue;
            }

            if let Some(rest) = line.strip_prefix("rule ") {
                let rule = parse_rule(rest).map_err(|message| CascadeParseError::Line {
                    line: line_no,
                    message,
                })?;
                if !seen.insert(rule.name.clone()) {
                    return Err(CascadeParseError::DuplicateRule {
                        line: line_no,
                        name: rule.name,
                    });
                }
                tracing::debug!(rule = %rule.name, "read rule");
                mentioned.extend(rule.source.iter().copied());
                mentioned.extend(rule.target.chars());
                mentioned.extend(rule.left.symbols.iter().copied());
                mentioned.extend(rule.right.symbols.iter().copied());
                rules.push(Box::new(rule));
                continue;
            }

            return Err(CascadeParseError::Line {
                line: line_no,
                message: format!("expected `alphabet` or `rule`, got `{line}`"),
            });
        }

        // Symbols a rule mentions are accepted implicitly; the declaration
        // only has to cover whatever the rules themselves never touch.
        let alphabet = if has_alphabet {
            declared.extend(mentioned);
            Some(declared)
        } else {
            None
        };

        Ok(Cascade { rules, alphabet })
    }
}

impl std::fmt::Debug for Cascade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cascade")
            .field("rules", &self.rule_order())
            .field("alphabet", &self.alphabet)
            .finish()
    }
}

#[derive(Debug, Error)]
pub enum CascadeParseError {
    #[error("cascade parse error on line {line}: {message}")]
    Line { line: usize, message: String },
    #[error("cascade parse error on line {line}: rule name `{name}` is already defined")]
    DuplicateRule { line: usize, name: String },
}

/// Parse the body of a `rule` line: `<name>: <source> -> <target> [/ <l> _ <r>]`.
fn parse_rule(rest: &str) -> Result<ContextRule, String> {
    let (name, body) = rest
        .split_once(':')
        .ok_or_else(|| "missing `:` after rule name".to_string())?;
    let name = name.trim();
    if name.is_empty() {
        return Err("rule name missing".to_string());
    }
    if name.contains(['[', ']']) || name.contains(char::is_whitespace) {
        return Err(format!(
            "rule name `{name}` may not contain brackets or whitespace"
        ));
    }

    let (rewrite, context) = match body.split_once('/') {
        Some((rw, ctx)) => (rw, Some(ctx)),
        None => (body, None),
    };

    let (source, target) = rewrite
        .split_once("->")
        .ok_or_else(|| "missing `->` in rewrite".to_string())?;
    let source = parse_symbols(source.trim())?;
    if source.is_empty() {
        return Err("empty rewrite source".to_string());
    }
    let target = match target.trim() {
        "" => return Err("empty rewrite target (use `0` for deletion)".to_string()),
        "0" => String::new(),
        t => parse_symbols(t)?.into_iter().collect(),
    };

    let (left, right) = match context {
        None => (ContextSpec::default(), ContextSpec::default()),
        Some(ctx) => {
            let (l, r) = ctx
                .split_once('_')
                .ok_or_else(|| "context missing `_` slot".to_string())?;
            (parse_context(l.trim(), Side::Left)?, parse_context(r.trim(), Side::Right)?)
        }
    };

    Ok(ContextRule {
        name: name.to_string(),
        source,
        target,
        left,
        right,
    })
}

enum Side {
    Left,
    Right,
}

fn parse_symbols(text: &str) -> Result<Vec<char>, String> {
    let mut out = Vec::new();
    for sym in text.split_whitespace() {
        let mut chars = sym.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => out.push(c),
            _ => return Err(format!("symbols are single characters, got `{sym}`")),
        }
    }
    Ok(out)
}

fn parse_context(text: &str, side: Side) -> Result<ContextSpec, String> {
    let mut symbols = parse_symbols(text)?;
    let boundary = match side {
        Side::Left => {
            let b = symbols.first() == Some(&'#');
            if b {
                symbols.remove(0);
            }
            b
        }
        Side::Right => {
            let b = symbols.last() == Some(&'#');
            if b {
                symbols.pop();
            }
            b
        }
    };
    if symbols.contains(&'#') {
        return Err("`#` is only valid at the outer edge of a context".to_string());
    }
    Ok(ContextSpec { boundary, symbols })
}
