use darling::{FromAttributes as _, FromMeta, ast::NestedMeta, util::SpannedValue};
use proc_macro2::TokenStream as TokenStream2;
use quote::{ToTokens as _, format_ident, quote};
use syn::{Attribute, Expr, FnArg, ItemFn, PatType, ReturnType, Type, spanned::Spanned as _};

use crate::common::{
    IdentString, check_command_name, compute_docs, is_bool, option_inner, pattern_ident,
};

/// The arguments to `#[signet::command(...)]`
#[derive(FromMeta, Default)]
struct CommandArgs {
    name: Option<SpannedValue<String>>,
    style: Option<SpannedValue<String>>,
}

/// `#[signet(...)]` on a single parameter
#[derive(darling::FromAttributes)]
#[darling(attributes(signet))]
struct ParamAttr {
    default: Option<Expr>,
    cast: Option<SpannedValue<String>>,
}

fn is_signet_attr(attr: &Attribute) -> bool {
    attr.path().is_ident("signet")
}

fn compute_style(style: Option<SpannedValue<String>>) -> syn::Result<Option<TokenStream2>> {
    let Some(style) = style else { return Ok(None) };

    Ok(Some(match style.as_str() {
        "positional" => quote! { ::signet::Style::Positional },
        "keyword" => quote! { ::signet::Style::Keyword },
        "mixed" => quote! { ::signet::Style::Mixed },
        _ => {
            return Err(syn::Error::new(
                style.span(),
                "style must be one of \"positional\", \"keyword\", or \"mixed\"",
            ));
        }
    }))
}

/// Everything needed to declare one parameter and to read it back out of
/// the bound arguments.
struct ParamInfo<'a> {
    ident: IdentString<'a>,
    ty: &'a Type,
    attr: ParamAttr,
}

impl<'a> ParamInfo<'a> {
    fn from_arg(arg: &'a PatType) -> syn::Result<Self> {
        let ident = pattern_ident(&arg.pat)?;
        let ty = &*arg.ty;

        if let Type::Reference(_) = ty {
            return Err(syn::Error::new(
                ty.span(),
                "command parameters must be owned; use `String` or `PathBuf` instead of a reference",
            ));
        }

        if let Type::ImplTrait(_) = ty {
            return Err(syn::Error::new(
                ty.span(),
                "`impl Trait` command parameters aren't supported",
            ));
        }

        let attr = ParamAttr::from_attributes(&arg.attrs)?;

        if is_bool(ty)
            && let Some(ref cast) = attr.cast
        {
            return Err(syn::Error::new(
                cast.span(),
                "boolean parameters are always flags, so they can't use a special cast",
            ));
        }

        if option_inner(ty).is_some()
            && let Some(ref default) = attr.default
        {
            return Err(syn::Error::new(
                default.span(),
                "optional parameters can't also have a default",
            ));
        }

        Ok(Self { ident, ty, attr })
    }

    /// The `ParameterSpec` expression
    fn spec(&self) -> TokenStream2 {
        let name = self.ident.as_str();

        if is_bool(self.ty) {
            let default = self.attr.default.as_ref().map(|default| {
                quote! { .default(::signet::Value::Bool(#default)) }
            });

            return quote! { ::signet::ParameterSpec::flag(#name) #default };
        }

        let (ty, optional) = match option_inner(self.ty) {
            Some(inner) => (inner, Some(quote! { .optional() })),
            None => (self.ty, None),
        };

        let cast = match self.attr.cast {
            Some(ref cast) => {
                let cast = cast.as_str();
                quote! { .cast(#cast) }
            }
            None => quote! { .typed::<#ty>() },
        };

        let default = self.attr.default.as_ref().map(|default| match self.attr.cast {
            Some(_) => quote! { .default(::signet::Value::custom::<#ty>(#default)) },
            None => quote! { .default(<::signet::Value as ::core::convert::From<#ty>>::from(#default)) },
        });

        quote! { ::signet::ParameterSpec::new(#name) #cast #default #optional }
    }

    /// The expression that gets this parameter's value from `arguments`
    fn getter(&self, arguments: &syn::Ident) -> TokenStream2 {
        let name = self.ident.as_str();

        match (option_inner(self.ty), &self.attr.cast) {
            (Some(inner), Some(_)) => quote! { #arguments.get_custom_opt::<#inner>(#name)? },
            (Some(inner), None) => quote! { #arguments.get_opt::<#inner>(#name)? },
            (None, Some(_)) => {
                let ty = self.ty;
                quote! { #arguments.get_custom::<#ty>(#name)? }
            }
            (None, None) => {
                let ty = self.ty;
                quote! { #arguments.get::<#ty>(#name)? }
            }
        }
    }
}

pub fn decorate_command(attrs: TokenStream2, function: TokenStream2) -> syn::Result<TokenStream2> {
    let args = match attrs.is_empty() {
        true => CommandArgs::default(),
        false => CommandArgs::from_list(&NestedMeta::parse_meta_list(attrs)?)?,
    };

    let mut function: ItemFn = syn::parse2(function)?;
    let sig = &function.sig;

    if let Some(asyncness) = sig.asyncness {
        return Err(syn::Error::new(
            asyncness.span(),
            "#[signet::command] functions can't be async",
        ));
    }

    if !sig.generics.params.is_empty() {
        return Err(syn::Error::new(
            sig.generics.span(),
            "#[signet::command] functions can't be generic",
        ));
    }

    if let Some(variadic) = sig.variadic.as_ref() {
        return Err(syn::Error::new(
            variadic.span(),
            "#[signet::command] functions can't be variadic",
        ));
    }

    let params = sig
        .inputs
        .iter()
        .map(|arg| match arg {
            FnArg::Typed(arg) => ParamInfo::from_arg(arg),
            FnArg::Receiver(receiver) => Err(syn::Error::new(
                receiver.span(),
                "#[signet::command] must be used on a free function, not a method",
            )),
        })
        .collect::<syn::Result<Vec<_>>>()?;

    let ident = IdentString::new(&sig.ident);
    let vis = &function.vis;

    let name = match args.name {
        Some(ref name) => {
            check_command_name(name, name.span())?;
            name.as_str()
        }
        None => ident.as_str(),
    };

    let style = compute_style(args.style)?.map(|style| quote! { .style(#style) });

    let docs = compute_docs(&function.attrs)?;
    let docs = (!docs.trim().is_empty()).then(|| quote! { .doc(#docs) });

    let ret = match sig.output {
        ReturnType::Default => quote! { () },
        ReturnType::Type(_, ref ty) => match **ty {
            Type::ImplTrait(_) => {
                return Err(syn::Error::new(
                    ty.span(),
                    "#[signet::command] functions can't return `impl Trait`",
                ));
            }
            ref ty => ty.to_token_stream(),
        },
    };

    let arguments = format_ident!("arguments");
    let factory = format_ident!("{}_command", ident.as_str(), span = ident.span());
    let specs = params.iter().map(|param| param.spec());
    let getters = params.iter().map(|param| param.getter(&arguments));
    let raw_ident = ident.raw();

    let factory = quote! {
        #[doc = ::core::concat!("The command-line binding for [`", ::core::stringify!(#raw_ident), "`]")]
        #vis fn #factory() -> ::signet::Command<#ret> {
            ::signet::Command::new(
                #name,
                |#[allow(unused_variables)] #arguments: &::signet::Arguments| -> ::core::result::Result<#ret, ::signet::Error> {
                    ::core::result::Result::Ok(#raw_ident(#(#getters,)*))
                },
            )
            #(.param(#specs))*
            #docs
            #style
        }
    };

    // The `#[signet]` attributes have been read, and aren't real attributes
    function
        .sig
        .inputs
        .iter_mut()
        .filter_map(|arg| match arg {
            FnArg::Typed(arg) => Some(arg),
            FnArg::Receiver(_) => None,
        })
        .for_each(|arg| arg.attrs.retain(|attr| !is_signet_attr(attr)));

    Ok(quote! {
        #function
        #factory
    })
}
