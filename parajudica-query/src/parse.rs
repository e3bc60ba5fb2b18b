//! Compact text syntax for pattern queries.
//!
//! Grammar (whitespace-separated tokens, `.` between patterns):
//!
//! ```text
//! SELECT ?var... WHERE { s p o [@ g] . s p o [@ g] ... }
//! ```
//!
//! Terms: `?var`, `prefix:local` (registered prefixes), integers,
//! `"string"`, `true`/`false`, and `a` for `rdf:type`.

use parajudica_core::{Sid, TermValue};
use parajudica_reasoner::{Pattern, PatternGraph, Term};
use parajudica_vocab::{namespaces, predicates, registered_namespaces};
use std::sync::Arc;

use crate::error::{QueryError, Result};
use crate::SelectQuery;

/// Parse the text form of a query.
pub fn parse_query(input: &str) -> Result<SelectQuery> {
    let tokens = tokenize(input)?;
    let mut cursor = tokens.iter().peekable();

    expect_keyword(&mut cursor, "SELECT")?;

    let mut outputs: Vec<Arc<str>> = Vec::new();
    while let Some(token) = cursor.peek() {
        if token.eq_ignore_ascii_case("WHERE") {
            break;
        }
        let token = cursor.next().unwrap();
        if !token.starts_with('?') {
            return Err(QueryError::Syntax(format!(
                "expected output variable, found {token:?}"
            )));
        }
        outputs.push(Arc::from(token.as_str()));
    }
    if outputs.is_empty() {
        return Err(QueryError::Syntax("no output variables".into()));
    }

    expect_keyword(&mut cursor, "WHERE")?;
    expect_keyword(&mut cursor, "{")?;

    let mut patterns = Vec::new();
    let mut current: Vec<String> = Vec::new();
    let mut closed = false;
    for token in cursor {
        match token.as_str() {
            "." => {
                if !current.is_empty() {
                    patterns.push(build_pattern(&current)?);
                    current.clear();
                }
            }
            "}" => {
                if !current.is_empty() {
                    patterns.push(build_pattern(&current)?);
                    current.clear();
                }
                closed = true;
                break;
            }
            other => current.push(other.to_string()),
        }
    }
    if !closed {
        return Err(QueryError::Syntax("missing closing brace".into()));
    }
    if patterns.is_empty() {
        return Err(QueryError::Syntax("empty query body".into()));
    }

    // Projection must be answerable.
    for output in &outputs {
        let bound = patterns.iter().any(|p| {
            let graph_var = match &p.graph {
                PatternGraph::Scope(term) => term.var_name() == Some(output.as_ref()),
                PatternGraph::Data => false,
            };
            graph_var
                || [&p.s, &p.p, &p.o]
                    .iter()
                    .any(|t| t.var_name() == Some(output.as_ref()))
        });
        if !bound {
            return Err(QueryError::UnboundOutput(output.to_string()));
        }
    }

    Ok(SelectQuery { outputs, patterns })
}

/// Split into tokens: quoted strings stay whole; braces and standalone
/// dots are their own tokens.
fn tokenize(input: &str) -> Result<Vec<String>> {
    let mut tokens = Vec::new();
    let mut chars = input.chars().peekable();
    while let Some(&c) = chars.peek() {
        match c {
            c if c.is_whitespace() => {
                chars.next();
            }
            '{' | '}' => {
                chars.next();
                tokens.push(c.to_string());
            }
            '"' => {
                chars.next();
                let mut literal = String::from("\"");
                let mut terminated = false;
                for c in chars.by_ref() {
                    literal.push(c);
                    if c == '"' {
                        terminated = true;
                        break;
                    }
                }
                if !terminated {
                    return Err(QueryError::Syntax("unterminated string literal".into()));
                }
                tokens.push(literal);
            }
            _ => {
                let mut word = String::new();
                while let Some(&c) = chars.peek() {
                    if c.is_whitespace() || c == '{' || c == '}' {
                        break;
                    }
                    word.push(c);
                    chars.next();
                }
                tokens.push(word);
            }
        }
    }
    Ok(tokens)
}

fn expect_keyword<'a>(
    cursor: &mut std::iter::Peekable<impl Iterator<Item = &'a String>>,
    keyword: &str,
) -> Result<()> {
    match cursor.next() {
        Some(token) if token.eq_ignore_ascii_case(keyword) => Ok(()),
        Some(token) => Err(QueryError::Syntax(format!(
            "expected {keyword}, found {token:?}"
        ))),
        None => Err(QueryError::Syntax(format!("expected {keyword}"))),
    }
}

/// Build one pattern from its tokens: `s p o` or `s p o @ g`.
fn build_pattern(tokens: &[String]) -> Result<Pattern> {
    let (triple, graph) = match tokens {
        [s, p, o] => ((s, p, o), PatternGraph::Data),
        [s, p, o, at, g] if at == "@" => ((s, p, o), PatternGraph::Scope(parse_term(g)?)),
        _ => return Err(QueryError::MalformedPattern(tokens.join(" "))),
    };
    let (s, p, o) = triple;
    Ok(Pattern {
        graph,
        s: parse_term(s)?,
        p: parse_term(p)?,
        o: parse_term(o)?,
    })
}

/// Parse one term token.
fn parse_term(token: &str) -> Result<Term> {
    if token.starts_with('?') {
        return Ok(Term::var(token));
    }
    if token == "a" {
        return Ok(Term::Sid(Sid::new(namespaces::RDF, predicates::RDF_TYPE)));
    }
    if token == "true" || token == "false" {
        return Ok(Term::Value(TermValue::Boolean(token == "true")));
    }
    if let Some(stripped) = token.strip_prefix('"') {
        let value = stripped.strip_suffix('"').unwrap_or(stripped);
        return Ok(Term::Value(TermValue::string(value)));
    }
    if let Ok(n) = token.parse::<i64>() {
        return Ok(Term::Value(TermValue::Long(n)));
    }
    if let Some((prefix, local)) = token.split_once(':') {
        let code = registered_namespaces()
            .iter()
            .find(|(_, label, _)| *label == prefix)
            .map(|(code, _, _)| *code)
            .ok_or_else(|| QueryError::UnknownPrefix(token.to_string()))?;
        return Ok(Term::Sid(Sid::new(code, local)));
    }
    Err(QueryError::MalformedPattern(token.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_query() {
        let query = parse_query(
            "SELECT ?c ?l WHERE { ?c pj:hasLabel ?l @ ?scope . ?c a pj:Table }",
        )
        .unwrap();
        assert_eq!(query.outputs.len(), 2);
        assert_eq!(query.patterns.len(), 2);
        assert!(matches!(query.patterns[0].graph, PatternGraph::Scope(_)));
        assert!(matches!(query.patterns[1].graph, PatternGraph::Data));
    }

    #[test]
    fn test_rdf_type_shortcut() {
        let query = parse_query("SELECT ?c WHERE { ?c a pj:Table }").unwrap();
        match &query.patterns[0].p {
            Term::Sid(sid) => {
                assert_eq!(sid.namespace_code, namespaces::RDF);
                assert_eq!(sid.name_str(), predicates::RDF_TYPE);
            }
            other => panic!("unexpected predicate {other:?}"),
        }
    }

    #[test]
    fn test_unknown_prefix_rejected() {
        let err = parse_query("SELECT ?c WHERE { ?c foo:bar ?x }").unwrap_err();
        assert!(matches!(err, QueryError::UnknownPrefix(_)));
    }

    #[test]
    fn test_unbound_output_rejected() {
        let err = parse_query("SELECT ?ghost WHERE { ?c a pj:Table }").unwrap_err();
        assert!(matches!(err, QueryError::UnboundOutput(_)));
    }

    #[test]
    fn test_missing_brace_rejected() {
        let err = parse_query("SELECT ?c WHERE { ?c a pj:Table").unwrap_err();
        assert!(matches!(err, QueryError::Syntax(_)));
    }

    #[test]
    fn test_literal_terms() {
        let query = parse_query("SELECT ?t WHERE { ?t pj:kAnonymity 3 }").unwrap();
        assert!(matches!(
            query.patterns[0].o,
            Term::Value(TermValue::Long(3))
        ));
    }
}
