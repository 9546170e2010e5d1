//! Parsing for `sql!` templates.
//!
//! The template syntax follows `format!`: `{name}` captures a local or names
//! an argument, `{}` takes the next positional argument, `{N}` refers to a
//! positional argument by index and `{{` / `}}` escape braces. Every hole
//! becomes its own placeholder; values never reach the command text.

use crate::schema::ErrorSet;

use proc_macro2::Span;
use syn::{parse::ParseStream, spanned::Spanned};

#[derive(Debug)]
pub(crate) struct Template {
    /// Literal text and argument references in source order
    pub(crate) segments: Vec<Segment>,

    /// Arguments, each evaluated exactly once
    pub(crate) args: Vec<syn::Expr>,

    /// Total length of the literal text
    pub(crate) literal_len: usize,
}

#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Segment {
    Literal(String),

    /// Index into `Template::args`
    Value(usize),
}

struct NamedArg {
    name: syn::Ident,
    expr: syn::Expr,
}

impl syn::parse::Parse for Template {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let lit: syn::LitStr = input.parse()?;

        let mut positional = vec![];
        let mut named: Vec<NamedArg> = vec![];

        while !input.is_empty() {
            let _comma: syn::Token![,] = input.parse()?;

            if input.is_empty() {
                break;
            }

            if input.peek(syn::Ident) && input.peek2(syn::Token![=]) && !input.peek2(syn::Token![==]) {
                let name: syn::Ident = input.parse()?;
                let _eq: syn::Token![=] = input.parse()?;
                let expr: syn::Expr = input.parse()?;

                if named.iter().any(|arg| arg.name == name) {
                    return Err(syn::Error::new_spanned(
                        &name,
                        format!("duplicate argument named `{name}`"),
                    ));
                }

                named.push(NamedArg { name, expr });
            } else {
                let expr: syn::Expr = input.parse()?;

                if !named.is_empty() {
                    return Err(syn::Error::new_spanned(
                        expr,
                        "positional arguments cannot follow named arguments",
                    ));
                }

                positional.push(expr);
            }
        }

        Template::build(&lit, positional, named)
    }
}

impl Template {
    fn build(
        lit: &syn::LitStr,
        positional: Vec<syn::Expr>,
        named: Vec<NamedArg>,
    ) -> syn::Result<Template> {
        let holes = scan(&lit.value(), lit.span())?;

        // Explicit arguments come first: positional, then named. Implicit
        // captures are appended after them as they are discovered.
        let positional_len = positional.len();
        let named_names: Vec<_> = named.iter().map(|arg| arg.name.clone()).collect();
        let mut args: Vec<syn::Expr> = positional;
        args.extend(named.into_iter().map(|arg| arg.expr));

        let mut used = vec![false; args.len()];
        let mut captures: Vec<(String, usize)> = vec![];
        let mut next_positional = 0;
        let mut segments = vec![];
        let mut literal_len = 0;
        let mut errs = ErrorSet::new();

        for hole in holes {
            let index = match hole {
                Piece::Literal(text) => {
                    literal_len += text.len();
                    segments.push(Segment::Literal(text));
                    continue;
                }
                Piece::Next => {
                    let index = next_positional;
                    next_positional += 1;
                    index
                }
                Piece::Index(index) => index,
                Piece::Name(name) => {
                    if let Some(pos) = named_names.iter().position(|ident| *ident == name) {
                        segments.push(Segment::Value(positional_len + pos));
                        used[positional_len + pos] = true;
                        continue;
                    }

                    let index = match captures.iter().find(|(captured, _)| *captured == name) {
                        Some((_, index)) => *index,
                        None => {
                            let mut ident: syn::Ident = syn::parse_str(&name).map_err(|_| {
                                syn::Error::new(
                                    lit.span(),
                                    format!("invalid argument name `{name}` in template"),
                                )
                            })?;
                            ident.set_span(lit.span());
                            args.push(syn::parse_quote!(#ident));
                            captures.push((name, args.len() - 1));
                            args.len() - 1
                        }
                    };

                    segments.push(Segment::Value(index));
                    continue;
                }
            };

            if index >= positional_len {
                errs.push(syn::Error::new(
                    lit.span(),
                    format!(
                        "invalid reference to positional argument {index} ({})",
                        match positional_len {
                            0 => "no positional arguments were given".to_string(),
                            1 => "there is 1 argument".to_string(),
                            n => format!("there are {n} arguments"),
                        }
                    ),
                ));
                continue;
            }

            used[index] = true;
            segments.push(Segment::Value(index));
        }

        for (index, used) in used.iter().enumerate() {
            if !used {
                errs.push(syn::Error::new(
                    args[index].span(),
                    "argument never used in template",
                ));
            }
        }

        errs.finish()?;

        Ok(Template {
            segments,
            args,
            literal_len,
        })
    }
}

#[derive(Debug, PartialEq, Eq)]
enum Piece {
    Literal(String),
    Next,
    Index(usize),
    Name(String),
}

/// Splits the template into literal text and holes.
fn scan(src: &str, span: Span) -> syn::Result<Vec<Piece>> {
    let mut pieces = vec![];
    let mut literal = String::new();
    let mut chars = src.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '{' if chars.peek() == Some(&'{') => {
                chars.next();
                literal.push('{');
            }
            '}' if chars.peek() == Some(&'}') => {
                chars.next();
                literal.push('}');
            }
            '}' => {
                return Err(syn::Error::new(
                    span,
                    "unmatched `}` in template, use `}}` to write a literal brace",
                ));
            }
            '{' => {
                let mut hole = String::new();
                loop {
                    match chars.next() {
                        Some('}') => break,
                        Some('{') | None => {
                            return Err(syn::Error::new(
                                span,
                                "unclosed `{` in template, use `{{` to write a literal brace",
                            ));
                        }
                        Some(ch) => hole.push(ch),
                    }
                }

                if !literal.is_empty() {
                    pieces.push(Piece::Literal(std::mem::take(&mut literal)));
                }

                pieces.push(parse_hole(hole.trim(), span)?);
            }
            ch => literal.push(ch),
        }
    }

    if !literal.is_empty() {
        pieces.push(Piece::Literal(literal));
    }

    Ok(pieces)
}

fn parse_hole(hole: &str, span: Span) -> syn::Result<Piece> {
    if hole.contains(':') {
        return Err(syn::Error::new(
            span,
            format!("format specs are not supported in templates: `{{{hole}}}`"),
        ));
    }

    if hole.is_empty() {
        Ok(Piece::Next)
    } else if hole.bytes().all(|b| b.is_ascii_digit()) {
        hole.parse()
            .map(Piece::Index)
            .map_err(|_| syn::Error::new(span, format!("invalid argument index `{hole}`")))
    } else {
        Ok(Piece::Name(hole.to_string()))
    }
}
