//! Proc macros for armory tool definitions.
//!
//! Provides `#[derive(Tool)]`, which implements `claude::ToolSchema`
//! from a struct definition: the doc comment becomes the tool
//! description and named fields become the JSON input schema.
//!
//! # Example
//!
//! ```ignore
//! /// Report the adversary named in a combat command.
//! #[derive(Tool, Deserialize)]
//! #[tool(name = "identify_target")]
//! struct IdentifyTarget {
//!     /// Monster name or weakness exactly as written
//!     target: Option<String>,
//! }
//! ```

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{parse_macro_input, DeriveInput, Field, Fields, LitStr, Type};

/// Derive macro implementing `claude::ToolSchema`.
///
/// # Attributes
///
/// - `#[tool(name = "...")]` - Override the tool name (defaults to snake_case struct name)
/// - `#[tool(description = "...")]` - Override the doc-comment description
/// - `#[tool(optional)]` on fields - Mark field as optional in JSON schema
/// - `#[tool(rename = "...")]` on fields - Override field name in schema
#[proc_macro_derive(Tool, attributes(tool))]
pub fn derive_tool(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand_tool(input)
        .unwrap_or_else(|err| err.to_compile_error())
        .into()
}

/// Options accepted by `#[tool(...)]` on the struct itself.
#[derive(Default)]
struct ToolOptions {
    name: Option<String>,
    description: Option<String>,
}

/// Options accepted by `#[tool(...)]` on a field.
#[derive(Default)]
struct FieldOptions {
    rename: Option<String>,
    optional: bool,
}

fn expand_tool(input: DeriveInput) -> syn::Result<TokenStream2> {
    let struct_name = &input.ident;
    let options = parse_tool_options(&input.attrs)?;

    let tool_name = options
        .name
        .unwrap_or_else(|| to_snake_case(&struct_name.to_string()));
    let description = options
        .description
        .unwrap_or_else(|| get_doc_comment(&input.attrs));

    if description.is_empty() {
        return Err(syn::Error::new_spanned(
            struct_name,
            "Tool derive needs a doc comment or #[tool(description = \"...\")]",
        ));
    }

    let fields: Vec<&Field> = match &input.data {
        syn::Data::Struct(data) => match &data.fields {
            Fields::Named(named) => named.named.iter().collect(),
            Fields::Unit => Vec::new(),
            Fields::Unnamed(_) => {
                return Err(syn::Error::new_spanned(
                    &input.ident,
                    "Tool derive does not support tuple structs",
                ))
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                &input.ident,
                "Tool derive only supports structs",
            ))
        }
    };

    let mut property_tokens = Vec::new();
    let mut required_fields = Vec::new();

    for field in fields {
        let field_options = parse_field_options(field)?;
        let field_name = match field_options.rename {
            Some(name) => name,
            None => field
                .ident
                .as_ref()
                .map(|ident| ident.to_string())
                .ok_or_else(|| syn::Error::new_spanned(field, "expected a named field"))?,
        };
        let field_desc = get_doc_comment(&field.attrs);
        let type_schema = type_to_schema(&field.ty);

        let desc_token = if field_desc.is_empty() {
            quote! {}
        } else {
            quote! { property["description"] = ::serde_json::json!(#field_desc); }
        };

        property_tokens.push(quote! {
            {
                let mut property = #type_schema;
                #desc_token
                properties.insert(#field_name.to_string(), property);
            }
        });

        if !field_options.optional && !is_option_type(&field.ty) {
            required_fields.push(field_name);
        }
    }

    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics ::claude::ToolSchema for #struct_name #ty_generics #where_clause {
            fn tool_name() -> &'static str {
                #tool_name
            }

            fn tool_description() -> &'static str {
                #description
            }

            fn input_schema() -> ::serde_json::Value {
                #[allow(unused_mut)]
                let mut properties = ::serde_json::Map::new();
                #(#property_tokens)*

                let required: Vec<&str> = vec![#(#required_fields),*];

                ::serde_json::json!({
                    "type": "object",
                    "properties": properties,
                    "required": required
                })
            }
        }
    })
}

fn parse_tool_options(attrs: &[syn::Attribute]) -> syn::Result<ToolOptions> {
    let mut options = ToolOptions::default();
    for attr in attrs.iter().filter(|a| a.path().is_ident("tool")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("name") {
                options.name = Some(meta.value()?.parse::<LitStr>()?.value());
                Ok(())
            } else if meta.path.is_ident("description") {
                options.description = Some(meta.value()?.parse::<LitStr>()?.value());
                Ok(())
            } else {
                Err(meta.error("expected `name` or `description`"))
            }
        })?;
    }
    Ok(options)
}

fn parse_field_options(field: &Field) -> syn::Result<FieldOptions> {
    let mut options = FieldOptions::default();
    for attr in field.attrs.iter().filter(|a| a.path().is_ident("tool")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("rename") {
                options.rename = Some(meta.value()?.parse::<LitStr>()?.value());
                Ok(())
            } else if meta.path.is_ident("optional") {
                options.optional = true;
                Ok(())
            } else {
                Err(meta.error("expected `rename` or `optional`"))
            }
        })?;
    }
    Ok(options)
}

fn get_doc_comment(attrs: &[syn::Attribute]) -> String {
    attrs
        .iter()
        .filter(|attr| attr.path().is_ident("doc"))
        .filter_map(|attr| match &attr.meta {
            syn::Meta::NameValue(nv) => match &nv.value {
                syn::Expr::Lit(syn::ExprLit {
                    lit: syn::Lit::Str(s),
                    ..
                }) => Some(s.value().trim().to_string()),
                _ => None,
            },
            _ => None,
        })
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

fn last_segment(ty: &Type) -> Option<&syn::PathSegment> {
    match ty {
        Type::Path(type_path) => type_path.path.segments.last(),
        _ => None,
    }
}

fn first_type_argument(segment: &syn::PathSegment) -> Option<&Type> {
    match &segment.arguments {
        syn::PathArguments::AngleBracketed(args) => args.args.iter().find_map(|arg| match arg {
            syn::GenericArgument::Type(inner) => Some(inner),
            _ => None,
        }),
        _ => None,
    }
}

fn is_option_type(ty: &Type) -> bool {
    last_segment(ty).is_some_and(|segment| segment.ident == "Option")
}

fn type_to_schema(ty: &Type) -> TokenStream2 {
    let Some(segment) = last_segment(ty) else {
        return quote! { ::serde_json::json!({}) };
    };

    match segment.ident.to_string().as_str() {
        "String" | "str" => quote! { ::serde_json::json!({"type": "string"}) },
        "i8" | "i16" | "i32" | "i64" | "isize" | "u8" | "u16" | "u32" | "u64" | "usize" => {
            quote! { ::serde_json::json!({"type": "integer"}) }
        }
        "f32" | "f64" => quote! { ::serde_json::json!({"type": "number"}) },
        "bool" => quote! { ::serde_json::json!({"type": "boolean"}) },
        "Option" => match first_type_argument(segment) {
            Some(inner) => type_to_schema(inner),
            None => quote! { ::serde_json::json!({}) },
        },
        "Vec" => match first_type_argument(segment) {
            Some(inner) => {
                let items = type_to_schema(inner);
                quote! { ::serde_json::json!({"type": "array", "items": #items}) }
            }
            None => quote! { ::serde_json::json!({"type": "array"}) },
        },
        _ => quote! { ::serde_json::json!({"type": "object"}) },
    }
}

fn to_snake_case(s: &str) -> String {
    let mut result = String::new();
    for (i, c) in s.chars().enumerate() {
        if c.is_uppercase() {
            if i > 0 {
                result.push('_');
            }
            result.push(c.to_ascii_lowercase());
        } else {
            result.push(c);
        }
    }
    result
}
