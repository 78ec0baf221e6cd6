use itertools::Itertools as _;
use proc_macro2::{Span, TokenStream as TokenStream2};
use quote::ToTokens;
use syn::{
    Attribute, Expr, GenericArgument, Ident, Pat, PathArguments, Type, ext::IdentExt as _,
    spanned::Spanned as _,
};

pub struct IdentString<'a> {
    raw: &'a Ident,
    string: String,
}

impl<'a> IdentString<'a> {
    /// The string form drops any `r#` prefix, so that `r#type` is named
    /// `type` on the command line.
    pub fn new(ident: &'a Ident) -> Self {
        Self {
            string: ident.unraw().to_string(),
            raw: ident,
        }
    }

    pub fn as_str(&self) -> &str {
        self.string.as_str()
    }

    pub fn raw(&self) -> &'a Ident {
        self.raw
    }

    pub fn span(&self) -> Span {
        self.raw.span()
    }
}

impl ToTokens for IdentString<'_> {
    fn to_tokens(&self, tokens: &mut TokenStream2) {
        self.raw.to_tokens(tokens);
    }
}

/// Collect the `///` comments from a list of attributes, one line each
pub fn compute_docs(attrs: &[Attribute]) -> syn::Result<String> {
    attrs
        .iter()
        .filter_map(|attr| match attr.meta {
            syn::Meta::NameValue(ref meta) => Some(meta),
            _ => None,
        })
        .filter(|meta| meta.path.is_ident("doc"))
        .map(|meta| match meta.value {
            Expr::Lit(ref lit) => match lit.lit {
                syn::Lit::Str(ref lit) => Ok(lit.value()),
                _ => Err(syn::Error::new(meta.span(), "malformed #[doc] attribute")),
            },
            Expr::Macro(ref expr) => Err(syn::Error::new(
                expr.span(),
                "macro #[doc] attributes aren't supported",
            )),
            _ => Err(syn::Error::new(meta.span(), "malformed #[doc] attribute")),
        })
        .map_ok(|mut doc| {
            doc.push('\n');
            doc
        })
        .collect()
}

/// Get the variable name bound by a function parameter's pattern
pub fn pattern_ident(pattern: &Pat) -> syn::Result<IdentString<'_>> {
    match pattern {
        Pat::Ident(pat) if pat.subpat.is_none() => Ok(IdentString::new(&pat.ident)),
        Pat::Paren(inner) => pattern_ident(&inner.pat),
        pattern => Err(syn::Error::new(
            pattern.span(),
            "command parameters must be plain identifiers, so that they can be named \
            on the command line",
        )),
    }
}

/// If this is `Option<T>`, get the `T`
pub fn option_inner(ty: &Type) -> Option<&Type> {
    let Type::Path(path) = ty else { return None };

    if path.qself.is_some() {
        return None;
    }

    let last = path.path.segments.last()?;

    if last.ident != "Option" {
        return None;
    }

    let PathArguments::AngleBracketed(ref args) = last.arguments else {
        return None;
    };

    match args.args.iter().exactly_one() {
        Ok(GenericArgument::Type(inner)) => Some(inner),
        _ => None,
    }
}

pub fn is_bool(ty: &Type) -> bool {
    match ty {
        Type::Path(path) => path.qself.is_none() && path.path.is_ident("bool"),
        Type::Paren(inner) => is_bool(&inner.elem),
        _ => false,
    }
}

/// Check that a command name can be typed as a single command-line token
pub fn check_command_name(name: &str, span: Span) -> syn::Result<()> {
    if name.is_empty() {
        Err(syn::Error::new(span, "command names can't be empty"))
    } else if name.starts_with('-') {
        Err(syn::Error::new(span, "command names can't start with '-'"))
    } else if name.contains(|c: char| c.is_whitespace()) {
        Err(syn::Error::new(span, "command names shouldn't include whitespace"))
    } else {
        Ok(())
    }
}
