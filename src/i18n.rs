//! Translation hook for error message text.
//!
//! The resolver builds a handful of human-readable messages and routes them
//! through the [`Translate`] trait so applications can plug in a real message
//! catalog. [`Identity`] is the catalog-less implementation: it performs the
//! positional `%s` substitution and nothing else.

/// Message catalog lookup used when building error text.
///
/// `template` is the English source string with `%s` placeholders and `args`
/// are substituted in order. A translating implementation looks the template
/// up in its catalog first and substitutes into the translated form.
pub trait Translate: Send + Sync {
    fn translate(&self, template: &str, args: &[&str]) -> String;
}

/// Passthrough catalog: no lookup, positional substitution only.
#[derive(Debug, Default, Clone, Copy)]
pub struct Identity;

impl Translate for Identity {
    fn translate(&self, template: &str, args: &[&str]) -> String {
        format_template(template, args)
    }
}

/// Replace each `%s` in `template` with the next argument, in order.
///
/// Placeholders beyond the last argument stay literal and surplus arguments
/// are ignored, so a stale catalog entry cannot panic the resolver.
pub fn format_template(template: &str, args: &[&str]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut parts = template.split("%s");
    if let Some(head) = parts.next() {
        out.push_str(head);
    }
    let mut args = args.iter();
    for part in parts {
        match args.next() {
            Some(arg) => out.push_str(arg),
            None => out.push_str("%s"),
        }
        out.push_str(part);
    }
    out
}
