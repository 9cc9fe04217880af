use proc_macro2::Span;
use syn::{
    parse::Parser, punctuated::Punctuated, spanned::Spanned, Attribute, Expr, ExprLit, Fields,
    ItemStruct, Lit, LitStr, Meta, MetaNameValue, Token,
};

#[derive(Default)]
pub struct ContentSchemaArgs {
    pub name: Option<LitStr>,
    pub description: Option<LitStr>,
}

pub fn parse_content_schema_args(attr: proc_macro::TokenStream) -> syn::Result<ContentSchemaArgs> {
    if attr.is_empty() {
        return Ok(ContentSchemaArgs::default());
    }

    let parser = Punctuated::<MetaNameValue, Token![,]>::parse_terminated;
    let mut args = ContentSchemaArgs::default();

    for pair in parser.parse(attr)? {
        let ident = pair
            .path
            .get_ident()
            .ok_or_else(|| syn::Error::new_spanned(&pair.path, "expected identifier"))?;

        let Expr::Lit(ExprLit {
            lit: Lit::Str(value),
            ..
        }) = &pair.value
        else {
            return Err(syn::Error::new_spanned(
                &pair.value,
                "expected string literal value",
            ));
        };

        let slot = match ident.to_string().as_str() {
            "name" => &mut args.name,
            "description" => &mut args.description,
            other => {
                return Err(syn::Error::new(
                    ident.span(),
                    format!("unsupported argument `{other}`"),
                ))
            }
        };

        if slot.is_some() {
            return Err(syn::Error::new(
                ident.span(),
                format!("duplicate `{ident}` argument"),
            ));
        }
        *slot = Some(value.clone());
    }

    Ok(args)
}

pub fn ensure_named_struct(item: &ItemStruct) -> syn::Result<()> {
    match &item.fields {
        Fields::Named(_) => Ok(()),
        _ => Err(syn::Error::new(
            item.struct_token.span(),
            "`#[content_schema]` only supports structs with named fields",
        )),
    }
}

pub fn collect_doc_comments(attrs: &[Attribute]) -> Option<String> {
    let docs: Vec<String> = attrs
        .iter()
        .filter(|attr| attr.path().is_ident("doc"))
        .filter_map(|attr| match &attr.meta {
            Meta::NameValue(MetaNameValue {
                value:
                    Expr::Lit(ExprLit {
                        lit: Lit::Str(lit), ..
                    }),
                ..
            }) => Some(lit.value().trim().to_string()),
            _ => None,
        })
        .collect();

    if docs.is_empty() {
        None
    } else {
        Some(docs.join(" "))
    }
}

/// Returns `true` when the struct carries `#[serde(rename_all = "camelCase")]`.
pub fn renames_to_camel_case(attrs: &[Attribute]) -> bool {
    let mut camel = false;
    for attr in attrs.iter().filter(|attr| attr.path().is_ident("serde")) {
        let _ = attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("rename_all") {
                let value: LitStr = meta.value()?.parse()?;
                camel = value.value() == "camelCase";
            } else if meta.input.peek(Token![=]) {
                let _: Expr = meta.value()?.parse()?;
            }
            Ok(())
        });
    }
    camel
}

/// Field docs keyed by the name the field has on the wire.
pub fn collect_field_docs(item: &ItemStruct) -> Vec<(String, String)> {
    let camel = renames_to_camel_case(&item.attrs);
    let Fields::Named(fields) = &item.fields else {
        return Vec::new();
    };

    fields
        .named
        .iter()
        .filter_map(|field| {
            let ident = field.ident.as_ref()?;
            let doc = collect_doc_comments(&field.attrs)?;
            let name = ident.to_string();
            let wire = if camel { to_camel_case(&name) } else { name };
            Some((wire, doc))
        })
        .collect()
}

pub fn infer_schema_name(item: &ItemStruct, explicit: Option<&LitStr>) -> LitStr {
    explicit
        .cloned()
        .unwrap_or_else(|| LitStr::new(&item.ident.to_string(), Span::call_site()))
}

pub fn infer_description(explicit: Option<&LitStr>, doc: Option<String>) -> Option<LitStr> {
    explicit
        .cloned()
        .or_else(|| doc.map(|text| LitStr::new(&text, Span::call_site())))
}

fn to_camel_case(snake: &str) -> String {
    let mut out = String::with_capacity(snake.len());
    let mut upper_next = false;
    for ch in snake.chars() {
        if ch == '_' {
            upper_next = true;
        } else if upper_next {
            out.extend(ch.to_uppercase());
            upper_next = false;
        } else {
            out.push(ch);
        }
    }
    out
}
