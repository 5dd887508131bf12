//! Augment the testing of bitlayout crates with procedural macros.

use proc_macro::TokenStream;
use proc_macro2::Span;
use quote::quote;
use syn::{parse_macro_input, AttributeArgs, Ident, ItemFn, Lit, Meta, NestedMeta};

const LEVELS: [&str; 5] = ["TRACE", "DEBUG", "INFO", "WARN", "ERROR"];

/// Run a test with a `tracing` subscriber that writes to the test output.
///
/// The subscriber records events at or above `level` (default `DEBUG`) and is only
/// installed for the duration of the test body, so tests running in parallel do not
/// interfere with each other.
///
/// The expansion refers to `::tracing` and `::tracing_subscriber`, so the calling crate
/// must list both (usually as dev-dependencies).
///
/// # Example
///
/// ```ignore
/// use bitlayout_macros::test_traced;
///
/// #[test_traced(level = "TRACE")]
/// fn test_flush() {
///     tracing::trace!("visible in the test output");
/// }
/// ```
#[proc_macro_attribute]
pub fn test_traced(attr: TokenStream, item: TokenStream) -> TokenStream {
    let args = parse_macro_input!(attr as AttributeArgs);
    let input = parse_macro_input!(item as ItemFn);

    let mut level = String::from("DEBUG");
    for arg in args {
        match arg {
            NestedMeta::Meta(Meta::NameValue(nv)) if nv.path.is_ident("level") => match nv.lit {
                Lit::Str(lit) => {
                    let value = lit.value().to_ascii_uppercase();
                    if !LEVELS.contains(&value.as_str()) {
                        return syn::Error::new(
                            lit.span(),
                            format!("invalid level `{}`; expected one of {:?}", value, LEVELS),
                        )
                        .to_compile_error()
                        .into();
                    }
                    level = value;
                }
                other => {
                    return syn::Error::new_spanned(other, "level must be a string literal")
                        .to_compile_error()
                        .into();
                }
            },
            other => {
                return syn::Error::new_spanned(other, "unsupported argument; expected `level`")
                    .to_compile_error()
                    .into();
            }
        }
    }
    let level = Ident::new(&level, Span::call_site());

    let attrs = &input.attrs;
    let vis = &input.vis;
    let sig = &input.sig;
    let block = &input.block;
    let expanded = quote! {
        #[test]
        #(#attrs)*
        #vis #sig {
            let subscriber = ::tracing_subscriber::fmt()
                .with_test_writer()
                .with_max_level(::tracing::Level::#level)
                .with_line_number(true)
                .finish();
            let dispatcher = ::tracing::Dispatch::new(subscriber);
            ::tracing::dispatcher::with_default(&dispatcher, || #block)
        }
    };
    TokenStream::from(expanded)
}
