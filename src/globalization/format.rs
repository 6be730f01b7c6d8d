//! Positional `{0}` placeholder substitution

use tracing::warn;

use crate::convert::{Culture, Value};

/// Replace `{n}` with the text of `args[n]` under `culture`
///
/// `{{` and `}}` produce literal braces. A placeholder that is malformed or
/// out of range is kept as written.
pub fn format_placeholders(template: &str, args: &[Value], culture: &Culture) -> String {
    let mut output = String::with_capacity(template.len());
    let mut chars = template.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '{' if chars.peek() == Some(&'{') => {
                chars.next();
                output.push('{');
            }
            '}' if chars.peek() == Some(&'}') => {
                chars.next();
                output.push('}');
            }
            '{' => {
                let mut inner = String::new();
                let mut closed = false;
                for next in chars.by_ref() {
                    if next == '}' {
                        closed = true;
                        break;
                    }
                    inner.push(next);
                }
                let arg = inner
                    .trim()
                    .parse::<usize>()
                    .ok()
                    .filter(|_| closed)
                    .and_then(|index| args.get(index));
                match arg {
                    Some(value) => output.push_str(&value.to_text(culture).unwrap_or_default()),
                    None => {
                        warn!(placeholder = %inner, args = args.len(), "Unresolved format placeholder");
                        output.push('{');
                        output.push_str(&inner);
                        if closed {
                            output.push('}');
                        }
                    }
                }
            }
            other => output.push(other),
        }
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positional_substitution() {
        let args = [Value::from("Bob"), Value::from(3)];
        assert_eq!(
            format_placeholders("{0} has {1} new messages, {0}", &args, &Culture::invariant()),
            "Bob has 3 new messages, Bob"
        );
    }

    #[test]
    fn test_escaped_braces() {
        let args = [Value::from(1)];
        assert_eq!(
            format_placeholders("{{literal}} {0}", &args, &Culture::invariant()),
            "{literal} 1"
        );
    }

    #[test]
    fn test_arguments_use_culture() {
        let args = [Value::from(2.5f64)];
        assert_eq!(format_placeholders("x={0}", &args, &Culture::de_de()), "x=2,5");
        assert_eq!(format_placeholders("x={0}", &args, &Culture::en_us()), "x=2.5");
    }

    #[test]
    fn test_unresolved_placeholders_kept() {
        let args = [Value::from("a")];
        assert_eq!(format_placeholders("{1} {x} {0", &args, &Culture::invariant()), "{1} {x} {0");
        assert_eq!(format_placeholders("{0}", &[Value::Null], &Culture::invariant()), "");
    }
}
