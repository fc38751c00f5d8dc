//! Expansion of `#[derive(Validate)]`.

use crate::parse::{pascal_case, FieldAttrs, RuleAttr};
use proc_macro2::TokenStream;
use quote::quote;
use syn::{ext::IdentExt, spanned::Spanned, Data, DeriveInput, Fields, Index, Member};

struct ValidatedField {
    member: Member,
    name: String,
    rules: Vec<RuleAttr>,
}

pub fn expand(input: &DeriveInput) -> syn::Result<TokenStream> {
    let Data::Struct(data) = &input.data else {
        return Err(syn::Error::new(
            input.span(),
            "Validate can only be derived for structs",
        ));
    };

    let fields = collect_fields(&data.fields)?;
    let ident = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let descriptors = fields.iter().map(|field| {
        let name = &field.name;
        let rules = field.rules.iter().map(rule_tokens);
        quote! {
            ::bills_core::validate::FieldDescriptor::new(#name, &[#(#rules),*])
        }
    });

    let arms = fields.iter().enumerate().map(|(index, field)| {
        let member = &field.member;
        quote! {
            #index => ::core::option::Option::Some(
                &self.#member as &dyn ::bills_core::validate::FieldValue
            ),
        }
    });

    Ok(quote! {
        impl #impl_generics ::bills_core::validate::Validate for #ident #ty_generics #where_clause {
            fn fields() -> &'static [::bills_core::validate::FieldDescriptor] {
                const FIELDS: &[::bills_core::validate::FieldDescriptor] = &[#(#descriptors),*];
                FIELDS
            }

            fn field(&self, index: usize) -> ::core::option::Option<&dyn ::bills_core::validate::FieldValue> {
                match index {
                    #(#arms)*
                    _ => ::core::option::Option::None,
                }
            }
        }
    })
}

fn collect_fields(fields: &Fields) -> syn::Result<Vec<ValidatedField>> {
    let mut validated = Vec::new();

    for (position, field) in fields.iter().enumerate() {
        let attrs = FieldAttrs::from_attributes(&field.attrs)?;
        if !attrs.present {
            continue;
        }

        let (member, default_name) = match &field.ident {
            Some(ident) => (
                Member::Named(ident.clone()),
                pascal_case(&ident.unraw().to_string()),
            ),
            None => (Member::Unnamed(Index::from(position)), position.to_string()),
        };

        validated.push(ValidatedField {
            member,
            name: attrs.name.unwrap_or(default_name),
            rules: attrs.rules,
        });
    }

    Ok(validated)
}

fn rule_tokens(rule: &RuleAttr) -> TokenStream {
    match rule {
        RuleAttr::Required => quote!(::bills_core::validate::Rule::Required),
        RuleAttr::Email => quote!(::bills_core::validate::Rule::Email),
        RuleAttr::Number => quote!(::bills_core::validate::Rule::Number),
        RuleAttr::Gte(value) => quote!(::bills_core::validate::Rule::Gte(#value)),
        RuleAttr::Lte(value) => quote!(::bills_core::validate::Rule::Lte(#value)),
        RuleAttr::OneOf(value) => quote!(::bills_core::validate::Rule::OneOf(#value)),
    }
}
