use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, Data, DeriveInput, Fields, LitStr, Type};

/// Derive macro that generates CSV column documentation from struct fields.
///
/// For each (non-skipped) field, extracts:
/// - Column name (respects #[serde(rename = "...")])
/// - Required (true if the type is not Option<T>)
/// - Description (from doc comments)
///
/// Generates a `csv_schema() -> &'static [CsvField]` method. The deriving
/// crate must have a `CsvField { name, required, description }` type in
/// scope at the derive site.
#[proc_macro_derive(CsvSchema, attributes(serde))]
pub fn derive_csv_schema(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let name = &input.ident;

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => panic!("CsvSchema only supports structs with named fields"),
        },
        _ => panic!("CsvSchema only supports structs"),
    };

    let field_entries = fields.iter().filter_map(|field| {
        let serde = SerdeFieldAttrs::parse(&field.attrs);
        if serde.skip {
            return None;
        }

        let column = serde
            .rename
            .unwrap_or_else(|| field.ident.as_ref().unwrap().to_string());
        let required = !is_option_type(&field.ty);
        let description = doc_comment(&field.attrs);

        Some(quote! {
            CsvField {
                name: #column,
                required: #required,
                description: #description,
            }
        })
    });

    let expanded = quote! {
        impl #name {
            pub fn csv_schema() -> &'static [CsvField] {
                static SCHEMA: &[CsvField] = &[
                    #(#field_entries),*
                ];
                SCHEMA
            }
        }
    };

    TokenStream::from(expanded)
}

#[derive(Default)]
struct SerdeFieldAttrs {
    rename: Option<String>,
    skip: bool,
}

impl SerdeFieldAttrs {
    fn parse(attrs: &[syn::Attribute]) -> Self {
        let mut parsed = Self::default();
        for attr in attrs {
            if !attr.path().is_ident("serde") {
                continue;
            }
            // Unrecognized serde arguments (default, with, ...) are ignored.
            let _ = attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("rename") {
                    let lit: LitStr = meta.value()?.parse()?;
                    parsed.rename = Some(lit.value());
                } else if meta.path.is_ident("skip") || meta.path.is_ident("skip_deserializing") {
                    parsed.skip = true;
                } else if meta.input.peek(syn::token::Eq) {
                    let _: syn::Expr = meta.value()?.parse()?;
                } else if meta.input.peek(syn::token::Paren) {
                    let content;
                    syn::parenthesized!(content in meta.input);
                    let _: proc_macro2::TokenStream = content.parse()?;
                }
                Ok(())
            });
        }
        parsed
    }
}

fn doc_comment(attrs: &[syn::Attribute]) -> String {
    attrs
        .iter()
        .filter_map(|attr| {
            if !attr.path().is_ident("doc") {
                return None;
            }
            if let syn::Meta::NameValue(meta) = &attr.meta {
                if let syn::Expr::Lit(expr_lit) = &meta.value {
                    if let syn::Lit::Str(lit_str) = &expr_lit.lit {
                        return Some(lit_str.value().trim().to_string());
                    }
                }
            }
            None
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn is_option_type(ty: &Type) -> bool {
    if let Type::Path(type_path) = ty {
        if let Some(segment) = type_path.path.segments.last() {
            return segment.ident == "Option";
        }
    }
    false
}
