//! Single-pass template parser.
//!
//! Recognizes three directive forms inside raw text:
//!
//! | Form | Syntax |
//! |------|--------|
//! | substitution | `{{ name }}` |
//! | conditional  | `{% if predicate %} … {% else %} … {% endif %}` |
//! | repetition   | `{% for binding in collection %} … {% endfor %}` |
//!
//! Nesting is explicit: an inner block must close before its enclosing
//! block closes. Parsing is pure and total over its error set - identical
//! raw text always yields a structurally identical [`ParsedTemplate`].
//!
//! All syntax errors carry the line/column of the offending directive.

use crate::domain::error::DomainError;
use crate::domain::template::ast::{ParsedTemplate, TemplateNode};

const OPEN_SUBST: &str = "{{";
const CLOSE_SUBST: &str = "}}";
const OPEN_BLOCK: &str = "{%";
const CLOSE_BLOCK: &str = "%}";

/// Compile raw template text into its parsed representation.
pub fn parse(raw: &str) -> Result<ParsedTemplate, DomainError> {
    let mut stack = vec![Frame::Root { nodes: Vec::new() }];
    let mut offset = 0;

    while offset < raw.len() {
        let remainder = &raw[offset..];
        let next_subst = remainder.find(OPEN_SUBST);
        let next_block = remainder.find(OPEN_BLOCK);

        let (pos, is_block) = match (next_subst, next_block) {
            (None, None) => {
                push_literal(&mut stack, remainder);
                break;
            }
            (Some(s), None) => (s, false),
            (None, Some(b)) => (b, true),
            (Some(s), Some(b)) => {
                if b < s {
                    (b, true)
                } else {
                    (s, false)
                }
            }
        };

        if pos > 0 {
            push_literal(&mut stack, &remainder[..pos]);
        }
        let marker_start = offset + pos;
        let body_start = marker_start + 2;

        if is_block {
            let close = raw[body_start..].find(CLOSE_BLOCK).ok_or_else(|| {
                syntax_error(raw, marker_start, "unterminated '{%' directive")
            })?;
            let directive = raw[body_start..body_start + close].trim();
            apply_directive(directive, &mut stack, raw, marker_start)?;
            offset = body_start + close + CLOSE_BLOCK.len();
        } else {
            let close = raw[body_start..].find(CLOSE_SUBST).ok_or_else(|| {
                syntax_error(raw, marker_start, "unterminated '{{' marker")
            })?;
            let name = raw[body_start..body_start + close].trim();
            if name.is_empty() {
                return Err(syntax_error(raw, marker_start, "empty placeholder name"));
            }
            if !is_name(name) {
                return Err(syntax_error(
                    raw,
                    marker_start,
                    &format!("invalid placeholder name '{name}'"),
                ));
            }
            current_nodes(&mut stack).push(TemplateNode::Substitution {
                name: name.to_string(),
            });
            offset = body_start + close + CLOSE_SUBST.len();
        }
    }

    match stack.pop() {
        Some(Frame::Root { nodes }) if stack.is_empty() => Ok(ParsedTemplate::new(nodes)),
        Some(frame) => {
            let opened_at = frame.opened_at();
            Err(syntax_error(
                raw,
                opened_at,
                &format!("unclosed '{}' block", frame.describe()),
            ))
        }
        // the root frame is never popped before this point
        None => unreachable!("parser stack underflow"),
    }
}

// ── frames ────────────────────────────────────────────────────────────────────

/// An open block during parsing. `opened_at` is the byte offset of the
/// directive that opened the frame, for error reporting.
enum Frame {
    Root {
        nodes: Vec<TemplateNode>,
    },
    Then {
        predicate: String,
        opened_at: usize,
        nodes: Vec<TemplateNode>,
    },
    Else {
        predicate: String,
        opened_at: usize,
        then_nodes: Vec<TemplateNode>,
        nodes: Vec<TemplateNode>,
    },
    Repeat {
        binding: String,
        source: String,
        opened_at: usize,
        nodes: Vec<TemplateNode>,
    },
}

impl Frame {
    fn nodes_mut(&mut self) -> &mut Vec<TemplateNode> {
        match self {
            Self::Root { nodes }
            | Self::Then { nodes, .. }
            | Self::Else { nodes, .. }
            | Self::Repeat { nodes, .. } => nodes,
        }
    }

    fn opened_at(&self) -> usize {
        match self {
            Self::Root { .. } => 0,
            Self::Then { opened_at, .. }
            | Self::Else { opened_at, .. }
            | Self::Repeat { opened_at, .. } => *opened_at,
        }
    }

    fn describe(&self) -> &'static str {
        match self {
            Self::Root { .. } => "template",
            Self::Then { .. } | Self::Else { .. } => "{% if %}",
            Self::Repeat { .. } => "{% for %}",
        }
    }
}

fn current_nodes(stack: &mut [Frame]) -> &mut Vec<TemplateNode> {
    stack
        .last_mut()
        .expect("parser stack always holds the root frame")
        .nodes_mut()
}

fn push_literal(stack: &mut [Frame], text: &str) {
    if !text.is_empty() {
        current_nodes(stack).push(TemplateNode::Literal(text.to_string()));
    }
}

// ── directives ────────────────────────────────────────────────────────────────

fn apply_directive(
    directive: &str,
    stack: &mut Vec<Frame>,
    raw: &str,
    at: usize,
) -> Result<(), DomainError> {
    if directive.is_empty() {
        return Err(syntax_error(raw, at, "empty directive"));
    }

    if let Some(predicate) = directive.strip_prefix("if ").map(str::trim) {
        if predicate.is_empty() || !is_name(predicate) {
            return Err(syntax_error(
                raw,
                at,
                &format!("invalid condition '{predicate}' in '{{% if %}}'"),
            ));
        }
        stack.push(Frame::Then {
            predicate: predicate.to_string(),
            opened_at: at,
            nodes: Vec::new(),
        });
        return Ok(());
    }

    if let Some(clause) = directive.strip_prefix("for ").map(str::trim) {
        let (binding, source) = clause
            .split_once(" in ")
            .map(|(b, s)| (b.trim(), s.trim()))
            .ok_or_else(|| {
                syntax_error(
                    raw,
                    at,
                    "malformed repetition, expected '{% for <item> in <collection> %}'",
                )
            })?;
        if !is_name(binding) || !is_name(source) {
            return Err(syntax_error(
                raw,
                at,
                &format!("invalid repetition names '{binding}'/'{source}'"),
            ));
        }
        stack.push(Frame::Repeat {
            binding: binding.to_string(),
            source: source.to_string(),
            opened_at: at,
            nodes: Vec::new(),
        });
        return Ok(());
    }

    match directive {
        "else" => match stack.pop() {
            Some(Frame::Then {
                predicate,
                opened_at,
                nodes,
            }) => {
                stack.push(Frame::Else {
                    predicate,
                    opened_at,
                    then_nodes: nodes,
                    nodes: Vec::new(),
                });
                Ok(())
            }
            Some(frame @ Frame::Else { .. }) => {
                stack.push(frame);
                Err(syntax_error(raw, at, "duplicate '{% else %}'"))
            }
            Some(frame) => {
                stack.push(frame);
                Err(syntax_error(
                    raw,
                    at,
                    "'{% else %}' outside a conditional block",
                ))
            }
            None => unreachable!("parser stack underflow"),
        },
        "endif" => match stack.pop() {
            Some(Frame::Then {
                predicate, nodes, ..
            }) => {
                current_nodes(stack).push(TemplateNode::Conditional {
                    predicate,
                    then_branch: nodes,
                    else_branch: Vec::new(),
                });
                Ok(())
            }
            Some(Frame::Else {
                predicate,
                then_nodes,
                nodes,
                ..
            }) => {
                current_nodes(stack).push(TemplateNode::Conditional {
                    predicate,
                    then_branch: then_nodes,
                    else_branch: nodes,
                });
                Ok(())
            }
            Some(frame) => {
                let msg = match &frame {
                    Frame::Repeat { .. } => "'{% endif %}' closes a '{% for %}' block",
                    _ => "'{% endif %}' without an open conditional",
                };
                stack.push(frame);
                Err(syntax_error(raw, at, msg))
            }
            None => unreachable!("parser stack underflow"),
        },
        "endfor" => match stack.pop() {
            Some(Frame::Repeat {
                binding,
                source,
                nodes,
                ..
            }) => {
                current_nodes(stack).push(TemplateNode::Repeat {
                    binding,
                    source,
                    body: nodes,
                });
                Ok(())
            }
            Some(frame) => {
                let msg = match &frame {
                    Frame::Then { .. } | Frame::Else { .. } => {
                        "'{% endfor %}' closes a '{% if %}' block"
                    }
                    _ => "'{% endfor %}' without an open repetition",
                };
                stack.push(frame);
                Err(syntax_error(raw, at, msg))
            }
            None => unreachable!("parser stack underflow"),
        },
        // catches bare "if"/"for" (no space-delimited operand) too
        other => Err(syntax_error(
            raw,
            at,
            &format!("unknown directive '{other}'"),
        )),
    }
}

// ── helpers ───────────────────────────────────────────────────────────────────

fn is_name(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn syntax_error(raw: &str, offset: usize, message: &str) -> DomainError {
    let (line, column) = location(raw, offset);
    DomainError::TemplateSyntax {
        line,
        column,
        message: message.to_string(),
    }
}

/// 1-based line/column of a byte offset.
fn location(raw: &str, offset: usize) -> (usize, usize) {
    let prefix = &raw[..offset.min(raw.len())];
    let line = prefix.matches('\n').count() + 1;
    let column = prefix.rfind('\n').map_or(offset + 1, |nl| offset - nl);
    (line, column)
}

// ── tests ─────────────────────────────────────────────────────────────────────
