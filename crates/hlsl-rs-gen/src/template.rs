//! Per-component formula templates.
//!
//! A template is a Rust expression with positional placeholders `$0`..`$9`,
//! e.g. `$0.mul_add($1, $2)`. Every generated formula goes through
//! [`apply`], which rejects placeholders without a matching argument and
//! output that does not parse as an expression.
use snafu::prelude::*;

use crate::{Error, MalformedTemplateSnafu};

/// Substitutes `args` into `template`.
pub fn apply(template: &str, args: &[&str]) -> Result<String, Error> {
    let mut out = String::with_capacity(template.len() + args.iter().map(|a| a.len()).sum::<usize>());
    let mut chars = template.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch != '$' {
            out.push(ch);
            continue;
        }
        let index = chars
            .next_if(|c| c.is_ascii_digit())
            .and_then(|c| c.to_digit(10))
            .context(MalformedTemplateSnafu {
                template,
                reason: "'$' must be followed by an argument index",
            })? as usize;
        let arg = args.get(index).context(MalformedTemplateSnafu {
            template,
            reason: format!("argument ${index} given but only {} supplied", args.len()),
        })?;
        out.push_str(arg);
    }
    validate_expr(template, &out)?;
    Ok(out)
}

/// Checks that `expr` parses as a Rust expression.
pub fn validate_expr(template: &str, expr: &str) -> Result<(), Error> {
    match syn::parse_str::<syn::Expr>(expr) {
        Ok(_) => Ok(()),
        Err(e) => MalformedTemplateSnafu {
            template,
            reason: format!("'{expr}' does not parse: {e}"),
        }
        .fail(),
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn sanity_apply() {
        assert_eq!(
            "self.x.mul_add(b.x, c.x)",
            apply("$0.mul_add($1, $2)", &["self.x", "b.x", "c.x"]).unwrap()
        );
        assert_eq!("(a - a.floor())", apply("($0 - $0.floor())", &["a"]).unwrap());
    }

    #[test]
    fn sanity_missing_argument() {
        let err = apply("$0.atan2($1)", &["y"]).unwrap_err();
        assert!(matches!(err, Error::MalformedTemplate { .. }), "{err}");
    }

    #[test]
    fn sanity_dangling_placeholder() {
        assert!(apply("$0 + $", &["a"]).is_err());
    }

    #[test]
    fn sanity_unparseable_output() {
        assert!(apply("($0 + $1", &["a", "b"]).is_err());
    }
}
