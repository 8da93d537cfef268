//! Small deterministic template language for dish rendering.
//!
//! Supported syntax, a subset of Jinja:
//! - `{{ path }}` substitutes a dotted path from the JSON context (or a
//!   quoted literal); missing paths render empty. `{{ a if cond }}` and
//!   `{{ a if cond else b }}` pick a value inline.
//! - `{% if cond %} ... {% elif cond %} ... {% else %} ... {% endif %}` where
//!   `cond` combines `path`, `not`, `and`, `or`, `==`, `!=`, `in`, `not in`.
//! - `{% for item in path %} ... {% endfor %}` over arrays, with `loop.index`
//!   (1-based) and `loop.last` in scope.
//! - `{% raw %} ... {% endraw %}` copies its content untouched.
//! - `{% extends 'base.h' %}` renders `base.h` with the `{% block name %}`
//!   sections of the extending template replacing the base ones.
//!
//! A `-` inside a tag delimiter (`{%-`, `-%}`, `{{-`, `-}}`) strips the
//! whitespace on that side. A block tag alone on its line consumes that
//! whole line.
use crate::engine::RecipeError;
use regex::Regex;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::OnceLock;

const MAX_EXTENDS_DEPTH: usize = 8;

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Text(String),
    Expr(String),
    Tag(String),
}

#[derive(Debug, Clone, PartialEq)]
enum Operand {
    Path(String),
    Literal(String),
}

#[derive(Debug, Clone, PartialEq)]
enum Cond {
    Truthy(Operand),
    Equals(Operand, Operand),
    Contains { needle: Operand, haystack: Operand },
    Not(Box<Cond>),
    And(Box<Cond>, Box<Cond>),
    Or(Box<Cond>, Box<Cond>),
}

#[derive(Debug, Clone, PartialEq)]
enum Node {
    Text(String),
    Expr {
        value: Operand,
        when: Option<(Cond, Option<Operand>)>,
    },
    If {
        cond: Cond,
        then: Vec<Node>,
        otherwise: Vec<Node>,
    },
    For {
        var: String,
        path: String,
        body: Vec<Node>,
    },
    Block {
        name: String,
        body: Vec<Node>,
    },
    Extends(String),
}

fn token_regex() -> &'static Regex {
    static TOKEN: OnceLock<Regex> = OnceLock::new();
    TOKEN.get_or_init(|| {
        Regex::new(r"\{\{(-?)(.*?)(-?)\}\}|\{%(-?)(.*?)(-?)%\}")
            .expect("regex for template tokens")
    })
}

fn endraw_regex() -> &'static Regex {
    static ENDRAW: OnceLock<Regex> = OnceLock::new();
    ENDRAW.get_or_init(|| Regex::new(r"\{%(-?)\s*endraw\s*(-?)%\}").expect("regex for endraw"))
}

/// Render `source` against `context`.
///
/// `name` is only used in error messages; `load` resolves the templates
/// named by `{% extends %}`.
pub fn render_template(
    name: &str,
    source: &str,
    context: &Value,
    load: &dyn Fn(&str) -> Result<String, RecipeError>,
) -> Result<String, RecipeError> {
    let mut chain = vec![parse(name, source)?];
    while let Some(parent) = chain.last().map(Vec::as_slice).and_then(parent_of) {
        if chain.len() > MAX_EXTENDS_DEPTH {
            return Err(RecipeError::template(name, "extends chain is too deep"));
        }
        let source = load(&parent)?;
        chain.push(parse(&parent, &source)?);
    }

    let Some((base, children)) = chain.split_last() else {
        return Ok(String::new());
    };
    let mut blocks = HashMap::new();
    for nodes in children {
        collect_blocks(nodes, &mut blocks);
    }
    let mut frame = Frame {
        root: context,
        blocks,
        scope: Vec::new(),
        out: String::new(),
    };
    frame.render(base);
    Ok(frame.out)
}

fn parse(name: &str, source: &str) -> Result<Vec<Node>, RecipeError> {
    let tokens = tokenize(name, source)?;
    let mut pos = 0;
    let (nodes, end) = parse_nodes(name, &tokens, &mut pos)?;
    if let Some(tag) = end {
        return Err(RecipeError::template(name, format!("unexpected {{% {tag} %}}")));
    }
    Ok(nodes)
}

fn parent_of(nodes: &[Node]) -> Option<String> {
    nodes.iter().find_map(|node| match node {
        Node::Extends(parent) => Some(parent.clone()),
        _ => None,
    })
}

/// Record every block of an extending template; the most derived one wins.
fn collect_blocks<'n>(nodes: &'n [Node], blocks: &mut HashMap<&'n str, &'n [Node]>) {
    for node in nodes {
        if let Node::Block { name, body } = node {
            blocks.entry(name.as_str()).or_insert(body.as_slice());
            collect_blocks(body, blocks);
        }
    }
}

#[derive(Debug, Default)]
struct TokenStream {
    tokens: Vec<Token>,
    trim_next: bool,
}

impl TokenStream {
    fn text(&mut self, text: &str) {
        let text = if std::mem::take(&mut self.trim_next) {
            text.trim_start()
        } else {
            text
        };
        if !text.is_empty() {
            self.tokens.push(Token::Text(text.to_string()));
        }
    }

    fn markup(&mut self, token: Token, trim_before: bool, trim_after: bool) {
        if trim_before {
            if let Some(Token::Text(prev)) = self.tokens.last_mut() {
                let kept = prev.trim_end().len();
                prev.truncate(kept);
                if prev.is_empty() {
                    self.tokens.pop();
                }
            }
        }
        self.tokens.push(token);
        self.trim_next = trim_after;
    }

    /// Take `source` verbatim up to `{% endraw %}` and return what follows it.
    fn raw<'s>(&mut self, name: &str, source: &'s str) -> Result<&'s str, RecipeError> {
        let caps = endraw_regex()
            .captures(source)
            .ok_or_else(|| RecipeError::template(name, "unterminated raw block"))?;
        let Some(whole) = caps.get(0) else {
            return Err(RecipeError::template(name, "unterminated raw block"));
        };
        self.text(&source[..whole.start()]);
        self.markup(
            Token::Tag("endraw".to_string()),
            has_dash(caps.get(1)),
            has_dash(caps.get(2)),
        );
        Ok(&source[whole.end()..])
    }
}

fn has_dash(group: Option<regex::Match<'_>>) -> bool {
    group.is_some_and(|dash| !dash.as_str().is_empty())
}

fn tokenize(name: &str, source: &str) -> Result<Vec<Token>, RecipeError> {
    let mut stream = TokenStream::default();
    let mut rest = source;
    while let Some(caps) = token_regex().captures(rest) {
        let Some(whole) = caps.get(0) else {
            break;
        };
        stream.text(&rest[..whole.start()]);
        let after = &rest[whole.end()..];
        rest = after;
        if let Some(expr) = caps.get(2) {
            let token = Token::Expr(expr.as_str().trim().to_string());
            stream.markup(token, has_dash(caps.get(1)), has_dash(caps.get(3)));
        } else if let Some(tag) = caps.get(5) {
            let tag = tag.as_str().trim();
            stream.markup(
                Token::Tag(tag.to_string()),
                has_dash(caps.get(4)),
                has_dash(caps.get(6)),
            );
            if tag == "raw" {
                rest = stream.raw(name, after)?;
            }
        }
    }
    stream.text(rest);
    let mut tokens = stream.tokens;
    trim_standalone_tags(&mut tokens);
    Ok(tokens)
}

/// Remove the indentation and line break around block tags that sit alone on a line.
fn trim_standalone_tags(tokens: &mut [Token]) {
    let standalone: Vec<usize> = (0..tokens.len())
        .filter(|&idx| matches!(tokens[idx], Token::Tag(_)))
        .filter(|&idx| {
            let before_ok = match idx.checked_sub(1).map(|prev| &tokens[prev]) {
                None => true,
                Some(Token::Text(text)) => line_tail_is_blank(text, idx == 1),
                Some(_) => false,
            };
            let after_ok = match tokens.get(idx + 1) {
                None => true,
                Some(Token::Text(text)) => line_head_is_blank(text),
                Some(_) => false,
            };
            before_ok && after_ok
        })
        .collect();
    for idx in standalone {
        if idx > 0 {
            if let Token::Text(text) = &mut tokens[idx - 1] {
                let keep = text.rfind('\n').map(|pos| pos + 1).unwrap_or(0);
                text.truncate(keep);
            }
        }
        if let Some(Token::Text(text)) = tokens.get_mut(idx + 1) {
            let cut = text.find('\n').map(|pos| pos + 1).unwrap_or(text.len());
            text.replace_range(..cut, "");
        }
    }
}

fn line_tail_is_blank(text: &str, at_start: bool) -> bool {
    match text.rfind('\n') {
        Some(pos) => text[pos + 1..].trim().is_empty(),
        None => at_start && text.trim().is_empty(),
    }
}

fn line_head_is_blank(text: &str) -> bool {
    match text.find('\n') {
        Some(pos) => text[..pos].trim().is_empty(),
        None => text.trim().is_empty(),
    }
}

/// Tag keyword and the rest of the tag.
fn split_tag(tag: &str) -> (&str, &str) {
    tag.split_once(char::is_whitespace)
        .map(|(keyword, rest)| (keyword, rest.trim()))
        .unwrap_or((tag, ""))
}

fn parse_nodes(
    name: &str,
    tokens: &[Token],
    pos: &mut usize,
) -> Result<(Vec<Node>, Option<String>), RecipeError> {
    let mut nodes = Vec::new();
    while let Some(token) = tokens.get(*pos) {
        *pos += 1;
        match token {
            Token::Text(text) => nodes.push(Node::Text(text.clone())),
            Token::Expr(expr) => nodes.push(parse_expr(name, expr)?),
            Token::Tag(tag) => {
                let (keyword, rest) = split_tag(tag);
                match keyword {
                    "if" => nodes.push(parse_if(name, rest, tokens, pos)?),
                    "for" => nodes.push(parse_for(name, tag, tokens, pos)?),
                    "block" => nodes.push(parse_block(name, rest, tokens, pos)?),
                    "raw" => nodes.push(parse_raw(name, tokens, pos)?),
                    "extends" => match parse_operand(name, rest)? {
                        Operand::Literal(parent) => nodes.push(Node::Extends(parent)),
                        Operand::Path(_) => {
                            return Err(RecipeError::template(
                                name,
                                "extends needs a quoted template name",
                            ))
                        }
                    },
                    "else" | "elif" | "endif" | "endfor" | "endblock" => {
                        return Ok((nodes, Some(tag.clone())))
                    }
                    _ => {
                        return Err(RecipeError::template(
                            name,
                            format!("unknown tag {{% {tag} %}}"),
                        ))
                    }
                }
            }
        }
    }
    Ok((nodes, None))
}

fn end_keyword(end: &Option<String>) -> Option<&str> {
    end.as_deref().map(|tag| split_tag(tag).0)
}

fn parse_if(
    name: &str,
    cond: &str,
    tokens: &[Token],
    pos: &mut usize,
) -> Result<Node, RecipeError> {
    let cond = parse_cond(name, cond)?;
    let (then, end) = parse_nodes(name, tokens, pos)?;
    let otherwise = match end.as_deref().map(split_tag) {
        Some(("endif", _)) => Vec::new(),
        Some(("elif", rest)) => vec![parse_if(name, rest, tokens, pos)?],
        Some(("else", _)) => {
            let (otherwise, end) = parse_nodes(name, tokens, pos)?;
            if end_keyword(&end) != Some("endif") {
                return Err(RecipeError::template(name, "unterminated if block"));
            }
            otherwise
        }
        _ => return Err(RecipeError::template(name, "unterminated if block")),
    };
    Ok(Node::If {
        cond,
        then,
        otherwise,
    })
}

fn parse_for(
    name: &str,
    tag: &str,
    tokens: &[Token],
    pos: &mut usize,
) -> Result<Node, RecipeError> {
    let parts: Vec<&str> = tag.split_whitespace().collect();
    let [_, var, "in", path] = parts.as_slice() else {
        return Err(RecipeError::template(name, format!("malformed {{% {tag} %}}")));
    };
    let (body, end) = parse_nodes(name, tokens, pos)?;
    if end_keyword(&end) != Some("endfor") {
        return Err(RecipeError::template(name, "unterminated for block"));
    }
    Ok(Node::For {
        var: var.to_string(),
        path: path.to_string(),
        body,
    })
}

fn parse_block(
    name: &str,
    block: &str,
    tokens: &[Token],
    pos: &mut usize,
) -> Result<Node, RecipeError> {
    if !crate::engine::is_identifier(block) {
        return Err(RecipeError::template(name, format!("invalid block name {block:?}")));
    }
    let (body, end) = parse_nodes(name, tokens, pos)?;
    if end_keyword(&end) != Some("endblock") {
        return Err(RecipeError::template(name, format!("unterminated block {block}")));
    }
    Ok(Node::Block {
        name: block.to_string(),
        body,
    })
}

fn parse_raw(name: &str, tokens: &[Token], pos: &mut usize) -> Result<Node, RecipeError> {
    let text = match tokens.get(*pos) {
        Some(Token::Text(text)) => {
            *pos += 1;
            text.clone()
        }
        _ => String::new(),
    };
    match tokens.get(*pos) {
        Some(Token::Tag(tag)) if tag == "endraw" => {
            *pos += 1;
            Ok(Node::Text(text))
        }
        _ => Err(RecipeError::template(name, "unterminated raw block")),
    }
}

fn parse_expr(name: &str, text: &str) -> Result<Node, RecipeError> {
    let Some((value, rest)) = text.split_once(" if ") else {
        return Ok(Node::Expr {
            value: parse_operand(name, text)?,
            when: None,
        });
    };
    let (cond, otherwise) = match rest.split_once(" else ") {
        Some((cond, otherwise)) => (cond, Some(parse_operand(name, otherwise)?)),
        None => (rest, None),
    };
    Ok(Node::Expr {
        value: parse_operand(name, value)?,
        when: Some((parse_cond(name, cond)?, otherwise)),
    })
}

fn parse_cond(name: &str, text: &str) -> Result<Cond, RecipeError> {
    let text = text.trim();
    if let Some((left, right)) = text.split_once(" or ") {
        return Ok(Cond::Or(
            Box::new(parse_cond(name, left)?),
            Box::new(parse_cond(name, right)?),
        ));
    }
    if let Some((left, right)) = text.split_once(" and ") {
        return Ok(Cond::And(
            Box::new(parse_cond(name, left)?),
            Box::new(parse_cond(name, right)?),
        ));
    }
    if let Some(rest) = text.strip_prefix("not ") {
        return Ok(Cond::Not(Box::new(parse_cond(name, rest)?)));
    }
    if let Some((left, right)) = text.split_once(" not in ") {
        return Ok(Cond::Not(Box::new(Cond::Contains {
            needle: parse_operand(name, left)?,
            haystack: parse_operand(name, right)?,
        })));
    }
    if let Some((left, right)) = text.split_once(" in ") {
        return Ok(Cond::Contains {
            needle: parse_operand(name, left)?,
            haystack: parse_operand(name, right)?,
        });
    }
    if let Some((left, right)) = text.split_once("!=") {
        return Ok(Cond::Not(Box::new(Cond::Equals(
            parse_operand(name, left)?,
            parse_operand(name, right)?,
        ))));
    }
    if let Some((left, right)) = text.split_once("==") {
        return Ok(Cond::Equals(
            parse_operand(name, left)?,
            parse_operand(name, right)?,
        ));
    }
    Ok(Cond::Truthy(parse_operand(name, text)?))
}

fn parse_operand(name: &str, text: &str) -> Result<Operand, RecipeError> {
    let text = text.trim();
    let quoted = |quote: char| {
        text.strip_prefix(quote)
            .and_then(|rest| rest.strip_suffix(quote))
    };
    if let Some(inner) = quoted('"').or_else(|| quoted('\'')) {
        return Ok(Operand::Literal(inner.to_string()));
    }
    let valid = !text.is_empty()
        && text
            .split('.')
            .all(|segment| crate::engine::is_identifier(segment));
    if !valid {
        return Err(RecipeError::template(
            name,
            format!("invalid expression {text:?}"),
        ));
    }
    Ok(Operand::Path(text.to_string()))
}

fn display(value: &Value) -> String {
    match value {
        Value::Null | Value::Object(_) => String::new(),
        Value::String(text) => text.clone(),
        Value::Bool(flag) => flag.to_string(),
        Value::Number(number) => number.to_string(),
        Value::Array(items) => items.iter().map(display).collect::<Vec<_>>().join(", "),
    }
}

fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::String(text) => !text.is_empty(),
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

/// Render state: the context, the overriding blocks and the loop scopes.
struct Frame<'a> {
    root: &'a Value,
    blocks: HashMap<&'a str, &'a [Node]>,
    scope: Vec<(String, Value)>,
    out: String,
}

impl<'a> Frame<'a> {
    fn lookup(&self, path: &str) -> Option<&Value> {
        let mut segments = path.split('.');
        let first = segments.next()?;
        let mut current = self
            .scope
            .iter()
            .rev()
            .find(|(name, _)| name == first)
            .map(|(_, value)| value)
            .or_else(|| self.root.get(first))?;
        for segment in segments {
            current = current.get(segment)?;
        }
        Some(current)
    }

    fn resolve(&self, operand: &Operand) -> Value {
        match operand {
            Operand::Literal(text) => Value::String(text.clone()),
            Operand::Path(path) => self.lookup(path).cloned().unwrap_or(Value::Null),
        }
    }

    fn evaluate(&self, cond: &Cond) -> bool {
        match cond {
            Cond::Truthy(operand) => truthy(&self.resolve(operand)),
            Cond::Equals(left, right) => {
                display(&self.resolve(left)) == display(&self.resolve(right))
            }
            Cond::Contains { needle, haystack } => {
                let needle = display(&self.resolve(needle));
                match self.resolve(haystack) {
                    Value::String(text) => text.contains(&needle),
                    Value::Array(items) => items.iter().any(|item| display(item) == needle),
                    _ => false,
                }
            }
            Cond::Not(inner) => !self.evaluate(inner),
            Cond::And(left, right) => self.evaluate(left) && self.evaluate(right),
            Cond::Or(left, right) => self.evaluate(left) || self.evaluate(right),
        }
    }

    fn render(&mut self, nodes: &'a [Node]) {
        for node in nodes {
            match node {
                Node::Text(text) => self.out.push_str(text),
                Node::Expr { value, when } => {
                    let shown = match when {
                        None => Some(value),
                        Some((cond, otherwise)) if !self.evaluate(cond) => otherwise.as_ref(),
                        Some(_) => Some(value),
                    };
                    if let Some(operand) = shown {
                        let text = display(&self.resolve(operand));
                        self.out.push_str(&text);
                    }
                }
                Node::If {
                    cond,
                    then,
                    otherwise,
                } => {
                    let branch = if self.evaluate(cond) { then } else { otherwise };
                    self.render(branch);
                }
                Node::For { var, path, body } => {
                    let items = match self.lookup(path) {
                        Some(Value::Array(items)) => items.clone(),
                        _ => Vec::new(),
                    };
                    let count = items.len();
                    for (idx, item) in items.into_iter().enumerate() {
                        self.scope.push((
                            "loop".to_string(),
                            json!({ "index": idx + 1, "last": idx + 1 == count }),
                        ));
                        self.scope.push((var.clone(), item));
                        self.render(body);
                        self.scope.pop();
                        self.scope.pop();
                    }
                }
                Node::Block { name, body } => {
                    let body = self.blocks.get(name.as_str()).copied().unwrap_or(body.as_slice());
                    self.render(body);
                }
                Node::Extends(_) => {}
            }
        }
    }
}

#[cfg(test)]
#[path = "render_tests.rs"]
mod tests;
