use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};
mod traverse_macros;

/// Derives `decimal_assert::Traverse` for a struct or an enum.
/// ```ignore
/// #[derive(Traverse)]
/// struct Invoice {
///     number: String,
///     total: BigDecimal,
///     #[traverse(skip)]
///     renderer: fn(&Invoice) -> String,
/// }
/// ```
/// Structs are exposed as records whose fields are visited in declaration order.
/// Enums are exposed as records named after the active variant.
/// Fields marked `#[traverse(skip)]` are neither compared nor required to
/// implement `Traverse`.
#[proc_macro_derive(Traverse, attributes(traverse))]
pub fn derive_traverse(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    traverse_macros::derive_traverse_impl(input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
