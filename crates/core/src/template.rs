use crate::context::ImageContext;
use thiserror::Error;

pub const DEFAULT_TEMPLATE: &str = "{FileName}{Extension}";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplatePart {
    Literal(String),
    Field(String),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TemplateError {
    #[error("template is empty")]
    Empty,
    #[error("template has unbalanced braces")]
    UnbalancedBraces,
    #[error("invalid field name in template: {0:?}")]
    InvalidField(String),
    #[error("field {0} is not available for this file")]
    MissingField(String),
}

pub fn validate_template(input: &str) -> Result<(), TemplateError> {
    parse_template(input).map(|_| ())
}

pub fn parse_template(input: &str) -> Result<Vec<TemplatePart>, TemplateError> {
    if input.is_empty() {
        return Err(TemplateError::Empty);
    }

    let mut parts = Vec::new();
    let mut literal = String::new();
    let mut chars = input.chars();

    while let Some(ch) = chars.next() {
        match ch {
            '{' => {
                if !literal.is_empty() {
                    parts.push(TemplatePart::Literal(std::mem::take(&mut literal)));
                }
                let mut field = String::new();
                let mut found_close = false;
                for next in chars.by_ref() {
                    if next == '}' {
                        found_close = true;
                        break;
                    }
                    if next == '{' {
                        return Err(TemplateError::UnbalancedBraces);
                    }
                    field.push(next);
                }
                if !found_close {
                    return Err(TemplateError::UnbalancedBraces);
                }
                parts.push(TemplatePart::Field(parse_field(&field)?));
            }
            '}' => return Err(TemplateError::UnbalancedBraces),
            _ => literal.push(ch),
        }
    }

    if !literal.is_empty() {
        parts.push(TemplatePart::Literal(literal));
    }

    Ok(parts)
}

pub fn render_template(
    parts: &[TemplatePart],
    context: &ImageContext,
) -> Result<String, TemplateError> {
    let mut output = String::new();
    for part in parts {
        match part {
            TemplatePart::Literal(s) => output.push_str(s),
            TemplatePart::Field(name) => {
                let value = context
                    .get(name)
                    .ok_or_else(|| TemplateError::MissingField(name.clone()))?;
                output.push_str(value);
            }
        }
    }
    Ok(output)
}

fn parse_field(raw: &str) -> Result<String, TemplateError> {
    let name = raw.trim();
    if name.is_empty() || !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(TemplateError::InvalidField(raw.to_string()));
    }
    Ok(name.to_string())
}
