use proc_macro2::{Span, TokenStream};
use quote::quote;
use syn::{
    Data, DeriveInput, Field, Fields, GenericParam, Ident, Index, parse_quote,
    spanned::Spanned,
};

/// Returns true if the field carries `#[traverse(skip)]`.
fn is_skipped(field: &Field) -> syn::Result<bool> {
    let mut skip = false;
    for attr in &field.attrs {
        if !attr.path().is_ident("traverse") {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("skip") {
                skip = true;
                Ok(())
            } else {
                Err(meta.error("unsupported traverse attribute, expected `skip`"))
            }
        })?;
    }
    Ok(skip)
}

/// Field name as exposed to the comparator: the identifier for named fields,
/// the position for tuple fields.
fn field_label(field: &Field, position: usize) -> String {
    match &field.ident {
        Some(ident) => ident.to_string(),
        None => position.to_string(),
    }
}

pub fn derive_traverse_impl(mut input: DeriveInput) -> syn::Result<TokenStream> {
    let name = &input.ident;

    for param in input.generics.params.iter_mut() {
        if let GenericParam::Type(ty) = param {
            ty.bounds.push(parse_quote!(::decimal_assert::Traverse));
        }
    }
    let (impl_generics, ty_generics, where_clause) =
        input.generics.split_for_impl();

    let (shape_body, zero_body) = match &input.data {
        Data::Struct(data) => struct_bodies(&data.fields)?,
        Data::Enum(data) => {
            let mut arms = Vec::new();
            for variant in &data.variants {
                let variant_ident = &variant.ident;
                let variant_name = variant_ident.to_string();
                let (pattern, fields) =
                    variant_bindings(variant_ident, &variant.fields)?;
                arms.push(quote! {
                    #pattern => ::decimal_assert::Shape::Record(
                        ::decimal_assert::Record::variant(#variant_name, vec![#(#fields),*])
                    ),
                });
            }
            (
                quote! {
                    match self {
                        #(#arms)*
                    }
                },
                // enums have no zero value
                quote! { false },
            )
        }
        Data::Union(_) => {
            return Err(syn::Error::new(
                input.span(),
                "#[derive(Traverse)] is not supported for unions",
            ));
        }
    };

    Ok(quote! {
        impl #impl_generics ::decimal_assert::Traverse for #name #ty_generics #where_clause {
            fn shape(&self) -> ::decimal_assert::Shape<'_> {
                #shape_body
            }

            fn is_zero(&self) -> bool {
                #zero_body
            }
        }
    })
}

fn struct_bodies(fields: &Fields) -> syn::Result<(TokenStream, TokenStream)> {
    let mut entries = Vec::new();
    let mut zero_checks = Vec::new();
    for (position, field) in fields.iter().enumerate() {
        if is_skipped(field)? {
            continue;
        }
        let label = field_label(field, position);
        let access = match &field.ident {
            Some(ident) => quote! { self.#ident },
            None => {
                let index = Index::from(position);
                quote! { self.#index }
            }
        };
        entries.push(quote! {
            ::decimal_assert::Field::new(#label, &#access)
        });
        zero_checks.push(quote! {
            ::decimal_assert::Traverse::is_zero(&#access)
        });
    }

    Ok((
        quote! {
            ::decimal_assert::Shape::Record(
                ::decimal_assert::Record::new(vec![#(#entries),*])
            )
        },
        quote! { true #(&& #zero_checks)* },
    ))
}

/// Builds the match pattern binding every compared field of a variant and the
/// field constructors referring to those bindings.
fn variant_bindings(
    variant: &Ident,
    fields: &Fields,
) -> syn::Result<(TokenStream, Vec<TokenStream>)> {
    let mut entries = Vec::new();
    match fields {
        Fields::Named(named) => {
            let mut bindings = Vec::new();
            for field in &named.named {
                if is_skipped(field)? {
                    continue;
                }
                let ident = field.ident.as_ref().ok_or_else(|| {
                    syn::Error::new(field.span(), "expected a named field")
                })?;
                let label = ident.to_string();
                bindings.push(quote! { #ident });
                entries.push(quote! { ::decimal_assert::Field::new(#label, #ident) });
            }
            Ok((quote! { Self::#variant { #(#bindings,)* .. } }, entries))
        }
        Fields::Unnamed(unnamed) => {
            let mut bindings = Vec::new();
            for (position, field) in unnamed.unnamed.iter().enumerate() {
                if is_skipped(field)? {
                    bindings.push(quote! { _ });
                    continue;
                }
                let binding =
                    Ident::new(&format!("__field{position}"), Span::call_site());
                let label = position.to_string();
                bindings.push(quote! { #binding });
                entries.push(quote! { ::decimal_assert::Field::new(#label, #binding) });
            }
            Ok((quote! { Self::#variant(#(#bindings),*) }, entries))
        }
        Fields::Unit => Ok((quote! { Self::#variant }, entries)),
    }
}
