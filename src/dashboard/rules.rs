//! PromQL expression and legend rewrite rules.
//!
//! Upstream dashboards label series by `job` and `instance`; inside the
//! Kubernetes deployment those become `risingwave_component` and `pod`, and
//! every selector has to be scoped to the chosen namespace and RisingWave
//! instance.

use clap::ValueEnum;
use regex::{Captures, Regex};
use std::sync::LazyLock;

/// Label matcher scoping a query to the selected namespace and RisingWave
pub const SCOPE_MATCHER: &str = r#"namespace="$namespace", risingwave_name="$instance""#;

/// Label renames applied to query expressions
const EXPR_LABELS: [(&str, &str); 2] = [("job", "risingwave_component"), ("instance", "pod")];

/// Template token renames applied to legend formats
const LEGEND_LABELS: [(&str, &str); 2] = [
    ("{{job}}", "{{risingwave_component}}"),
    ("{{instance}}", "{{pod}}"),
];

const RATE_INTERVAL: &str = "[$__rate_interval]";
const BY_CLAUSE: &str = ") by (";

/// Which rules are applied to a target's `expr`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ExprProfile {
    /// Rename `job`/`instance` labels only
    #[default]
    Relabel,
    /// Rename labels, then scope every selector to `$namespace`/`$instance`
    Scoped,
}

// ============================================================================
// Whole-word substitution
// ============================================================================

/// Replace every occurrence of `word` with `replacement`.
///
/// Nothing is replaced unless `word` stands alone everywhere it occurs: a
/// single occurrence directly preceded or followed by `_` (as in `job_id`
/// or `node_instance`) leaves the text untouched. Grafana variable
/// references (`$instance`, `${instance}`) are neither counted nor replaced.
pub fn replace_word(text: &str, word: &str, replacement: &str) -> Option<String> {
    let bytes = text.as_bytes();
    let mut hits = Vec::new();

    for (start, _) in text.match_indices(word) {
        if is_variable_reference(bytes, start) {
            continue;
        }

        let end = start + word.len();
        let glued_before = start > 0 && bytes[start - 1] == b'_';
        let glued_after = bytes.get(end) == Some(&b'_');
        if glued_before || glued_after {
            return None;
        }

        hits.push(start);
    }

    if hits.is_empty() {
        return None;
    }

    let mut out = String::with_capacity(text.len() + hits.len() * replacement.len());
    let mut last = 0;
    for start in hits {
        out.push_str(&text[last..start]);
        out.push_str(replacement);
        last = start + word.len();
    }
    out.push_str(&text[last..]);

    Some(out)
}

fn is_variable_reference(bytes: &[u8], start: usize) -> bool {
    let prefix = &bytes[..start];
    prefix.ends_with(b"$") || prefix.ends_with(b"${")
}

fn apply_renames(text: &str, renames: &[(&str, &str)]) -> String {
    renames
        .iter()
        .fold(text.to_string(), |acc, (word, replacement)| {
            replace_word(&acc, word, replacement).unwrap_or(acc)
        })
}

// ============================================================================
// Expressions
// ============================================================================

/// Rename `job` to `risingwave_component` and `instance` to `pod`
pub fn relabel_expr(expr: &str) -> String {
    apply_renames(expr, &EXPR_LABELS)
}

/// Attach [`SCOPE_MATCHER`] to the selectors of an expression.
///
/// - With `[$__rate_interval]` present, every range selector gets it.
/// - Otherwise, with `) by (` present, it goes right before each aggregation.
/// - Otherwise it is appended to the end of the expression.
///
/// A selector that already has braces gets the matcher merged into them.
pub fn scope_expr(expr: &str) -> String {
    if expr.contains(RATE_INTERVAL) {
        attach_before(&RATE_INTERVAL_ANCHOR, expr, RATE_INTERVAL)
    } else if expr.contains(BY_CLAUSE) {
        attach_before(&BY_CLAUSE_ANCHOR, expr, BY_CLAUSE)
    } else {
        let body = expr.trim_end();
        let trailing = &expr[body.len()..];
        if let Some(head) = body.strip_suffix("{}") {
            format!("{head}{{{SCOPE_MATCHER}}}{trailing}")
        } else if let Some(head) = body.strip_suffix('}') {
            format!("{head}, {SCOPE_MATCHER}}}{trailing}")
        } else {
            format!("{body}{{{SCOPE_MATCHER}}}{trailing}")
        }
    }
}

/// Rewrite a target expression according to `profile`
pub fn rewrite_expr(expr: &str, profile: ExprProfile) -> String {
    let relabeled = relabel_expr(expr);
    match profile {
        ExprProfile::Relabel => relabeled,
        ExprProfile::Scoped => scope_expr(&relabeled),
    }
}

/// Matches `anchor`, optionally preceded by the closing brace of a selector
/// (`}`) or an empty selector (`{}`).
fn anchor_pattern(anchor: &str) -> Regex {
    Regex::new(&format!(r"(\{{?\}})?{}", regex::escape(anchor))).unwrap()
}

static RATE_INTERVAL_ANCHOR: LazyLock<Regex> = LazyLock::new(|| anchor_pattern(RATE_INTERVAL));
static BY_CLAUSE_ANCHOR: LazyLock<Regex> = LazyLock::new(|| anchor_pattern(BY_CLAUSE));

fn attach_before(pattern: &Regex, expr: &str, anchor: &str) -> String {
    pattern
        .replace_all(expr, |caps: &Captures| match caps.get(1).map(|m| m.as_str()) {
            Some("}") => format!(", {SCOPE_MATCHER}}}{anchor}"),
            _ => format!("{{{SCOPE_MATCHER}}}{anchor}"),
        })
        .into_owned()
}

// ============================================================================
// Legends
// ============================================================================

/// Rename `{{job}}` and `{{instance}}` legend tokens
pub fn rewrite_legend(legend: &str) -> String {
    apply_renames(legend, &LEGEND_LABELS)
}
