//! Go template scanner for Helm templates.
//!
//! Splits a template into actions for static analysis without evaluating it,
//! and picks out the pieces the template rules look at: control-block
//! balance, `required` calls on `.Values` paths, and literal resource
//! headers (`apiVersion`, `kind`, `metadata.namespace`).

/// A template action: the text between `{{` and `}}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Action {
    pub content: String,
    pub line: u32,
}

/// Control structure keywords that affect block nesting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlStructure {
    If,
    Range,
    With,
    Define,
    Block,
    Else,
    End,
}

impl ControlStructure {
    /// Parse from action content.
    pub fn parse(content: &str) -> Option<Self> {
        match content.split_whitespace().next()? {
            "if" => Some(Self::If),
            "range" => Some(Self::Range),
            "with" => Some(Self::With),
            "define" => Some(Self::Define),
            "block" => Some(Self::Block),
            "else" => Some(Self::Else),
            "end" => Some(Self::End),
            _ => None,
        }
    }

    pub fn starts_block(&self) -> bool {
        matches!(
            self,
            Self::If | Self::Range | Self::With | Self::Define | Self::Block
        )
    }
}

/// A `required "message" .Values.path` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequiredValue {
    /// Dotted path below `.Values`
    pub path: String,
    pub message: String,
    pub line: u32,
}

/// Literal header fields of one YAML document in a template.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourceHeader {
    pub api_version: Option<String>,
    pub kind: Option<String>,
    pub namespace: Option<String>,
    pub line: u32,
}

/// Scan error for templates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateParseError {
    pub message: String,
    pub line: u32,
}

impl std::fmt::Display for TemplateParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "line {}: {}", self.line, self.message)
    }
}

/// A scanned template.
#[derive(Debug, Clone)]
pub struct ParsedTemplate {
    /// Chart-relative path
    pub path: String,
    pub actions: Vec<Action>,
    pub required_values: Vec<RequiredValue>,
    pub resources: Vec<ResourceHeader>,
    pub errors: Vec<TemplateParseError>,
}

impl ParsedTemplate {
    /// Partials (`_helpers.tpl` and friends) are never rendered on their own.
    pub fn is_partial(&self) -> bool {
        self.path
            .rsplit('/')
            .next()
            .is_some_and(|name| name.starts_with('_'))
    }
}

/// Scan a template file.
pub fn parse_template(content: &str, path: &str) -> ParsedTemplate {
    let mut actions = Vec::new();
    let mut errors = Vec::new();
    let mut block_stack: Vec<(ControlStructure, u32)> = Vec::new();

    let mut line: u32 = 1;
    let mut rest = content;

    while let Some(start) = rest.find("{{") {
        line += count_lines(&rest[..start]);
        let after_open = &rest[start + 2..];

        let Some(end) = after_open.find("}}") else {
            errors.push(TemplateParseError {
                message: "unclosed action".to_string(),
                line,
            });
            break;
        };

        let raw = &after_open[..end];
        let action_line = line;
        line += count_lines(raw);
        rest = &after_open[end + 2..];

        let inner = raw
            .strip_prefix('-')
            .unwrap_or(raw)
            .trim_end()
            .trim_end_matches('-')
            .trim();
        if inner.starts_with("/*") {
            continue;
        }

        if let Some(structure) = ControlStructure::parse(inner) {
            if structure.starts_block() {
                block_stack.push((structure, action_line));
            } else if structure == ControlStructure::End && block_stack.pop().is_none() {
                errors.push(TemplateParseError {
                    message: "unexpected {{end}}".to_string(),
                    line: action_line,
                });
            }
        }

        actions.push(Action {
            content: inner.to_string(),
            line: action_line,
        });
    }

    for (structure, open_line) in &block_stack {
        errors.push(TemplateParseError {
            message: format!("unexpected EOF: unclosed {:?} block", structure).to_lowercase(),
            line: *open_line,
        });
    }

    let required_values = actions.iter().filter_map(extract_required).collect();

    ParsedTemplate {
        path: path.to_string(),
        actions,
        required_values,
        resources: scan_resources(content),
        errors,
    }
}

fn count_lines(s: &str) -> u32 {
    s.matches('\n').count() as u32
}

/// Split an action into words, keeping quoted strings together.
fn words(content: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut current = String::new();
    let mut quote: Option<char> = None;

    for c in content.chars() {
        match quote {
            Some(q) => {
                current.push(c);
                if c == q {
                    quote = None;
                }
            }
            None if c == '"' || c == '`' => {
                quote = Some(c);
                current.push(c);
            }
            None if c.is_whitespace() || c == '(' || c == ')' => {
                if !current.is_empty() {
                    out.push(std::mem::take(&mut current));
                }
            }
            None => current.push(c),
        }
    }
    if !current.is_empty() {
        out.push(current);
    }
    out
}

fn values_path(word: &str) -> Option<&str> {
    word.strip_prefix(".Values.")
        .or_else(|| word.strip_prefix("$.Values."))
        .filter(|p| !p.is_empty())
}

fn unquote(word: &str) -> Option<&str> {
    let inner = word
        .strip_prefix('"')
        .and_then(|w| w.strip_suffix('"'))
        .or_else(|| word.strip_prefix('`').and_then(|w| w.strip_suffix('`')))?;
    Some(inner)
}

/// `required "msg" .Values.x` or `.Values.x | required "msg"`.
fn extract_required(action: &Action) -> Option<RequiredValue> {
    let words = words(&action.content);
    let idx = words.iter().position(|w| w == "required")?;
    let message = unquote(words.get(idx + 1)?)?.to_string();

    let path = match words.get(idx + 2).and_then(|w| values_path(w)) {
        Some(path) => path,
        None if idx >= 2 && words[idx - 1] == "|" => values_path(&words[idx - 2])?,
        None => return None,
    };

    Some(RequiredValue {
        path: path.to_string(),
        message,
        line: action.line,
    })
}

/// Literal `apiVersion`, `kind` and `metadata.namespace` of every document.
fn scan_resources(content: &str) -> Vec<ResourceHeader> {
    let mut resources = Vec::new();
    let mut current = ResourceHeader {
        line: 1,
        ..Default::default()
    };
    let mut in_metadata = false;

    let literal = |value: &str| {
        let value = value.trim().trim_matches('"').trim_matches('\'');
        (!value.is_empty() && !value.contains("{{")).then(|| value.to_string())
    };

    for (idx, text) in content.lines().enumerate() {
        let line = idx as u32 + 1;
        if text.trim_end() == "---" {
            if current.api_version.is_some() || current.kind.is_some() {
                resources.push(std::mem::take(&mut current));
            }
            current.line = line + 1;
            in_metadata = false;
            continue;
        }

        if let Some(value) = text.strip_prefix("apiVersion:") {
            current.api_version = literal(value);
            current.line = line;
        } else if let Some(value) = text.strip_prefix("kind:") {
            current.kind = literal(value);
        } else if text.starts_with("metadata:") {
            in_metadata = true;
        } else if !text.starts_with(' ') && !text.trim().is_empty() {
            in_metadata = false;
        } else if in_metadata && let Some(value) = text.strip_prefix("  namespace:") {
            current.namespace = literal(value);
        }
    }

    if current.api_version.is_some() || current.kind.is_some() {
        resources.push(current);
    }
    resources
}
