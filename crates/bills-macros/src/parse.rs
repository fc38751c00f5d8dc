//! Parsing of `#[validate(...)]` field attributes.

use syn::{
    punctuated::Punctuated, spanned::Spanned, Attribute, Expr, ExprLit, Lit, Meta, Token,
};

/// A rule as written on a field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleAttr {
    Required,
    Email,
    Number,
    Gte(String),
    Lte(String),
    OneOf(String),
}

/// Everything the validate attributes of one field declare.
#[derive(Debug, Default)]
pub struct FieldAttrs {
    pub name: Option<String>,
    pub rules: Vec<RuleAttr>,
    pub present: bool,
}

impl FieldAttrs {
    /// Collects every `#[validate(...)]` attribute in order.
    pub fn from_attributes(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut parsed = Self::default();

        for attr in attrs.iter().filter(|attr| attr.path().is_ident("validate")) {
            parsed.present = true;
            let metas = attr.parse_args_with(Punctuated::<Meta, Token![,]>::parse_terminated)?;
            for meta in metas {
                parsed.push(meta)?;
            }
        }

        Ok(parsed)
    }

    fn push(&mut self, meta: Meta) -> syn::Result<()> {
        match meta {
            Meta::Path(path) => {
                let ident = path
                    .get_ident()
                    .ok_or_else(|| syn::Error::new(path.span(), "expected identifier"))?
                    .to_string();
                let rule = match ident.as_str() {
                    "required" => RuleAttr::Required,
                    "email" => RuleAttr::Email,
                    "number" => RuleAttr::Number,
                    "gte" | "lte" | "oneof" | "name" => {
                        return Err(syn::Error::new(
                            path.span(),
                            format!("`{ident}` needs a value: {ident} = \"...\""),
                        ))
                    }
                    _ => {
                        return Err(syn::Error::new(
                            path.span(),
                            format!("unknown validation rule: {ident}"),
                        ))
                    }
                };
                self.rules.push(rule);
            }
            Meta::NameValue(nv) => {
                let ident = nv
                    .path
                    .get_ident()
                    .ok_or_else(|| syn::Error::new(nv.path.span(), "expected identifier"))?
                    .to_string();
                let value = literal_value(&nv.value)?;
                match ident.as_str() {
                    "gte" => self.rules.push(RuleAttr::Gte(value)),
                    "lte" => self.rules.push(RuleAttr::Lte(value)),
                    "oneof" => self.rules.push(RuleAttr::OneOf(value)),
                    "name" => self.name = Some(value),
                    _ => {
                        return Err(syn::Error::new(
                            nv.path.span(),
                            format!("unknown validation rule: {ident}"),
                        ))
                    }
                }
            }
            Meta::List(list) => {
                return Err(syn::Error::new(list.span(), "expected `rule` or `rule = value`"))
            }
        }
        Ok(())
    }
}

fn literal_value(expr: &Expr) -> syn::Result<String> {
    match expr {
        Expr::Lit(ExprLit { lit: Lit::Str(s), .. }) => Ok(s.value()),
        Expr::Lit(ExprLit { lit: Lit::Int(i), .. }) => Ok(i.base10_digits().to_string()),
        Expr::Lit(ExprLit { lit: Lit::Float(f), .. }) => Ok(f.base10_digits().to_string()),
        _ => Err(syn::Error::new(
            expr.span(),
            "expected a string or number literal",
        )),
    }
}

/// `product_id` → `ProductId`.
pub fn pascal_case(ident: &str) -> String {
    ident
        .split('_')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().chain(chars).collect()
            })
        })
        .collect()
}
