use proc_macro::TokenStream;
use quote::quote;
use syn::{
    parse_macro_input, Data, DeriveInput, ImplItem, ImplItemFn, ItemImpl, Stmt,
    Variant, Visibility,
};

/// Procedural macro that enhances error enums with generic error handling
///
/// This macro automatically:
/// 1. Adds `#[derive(Debug, thiserror::Error, uniffi::Error)]` and `#[uniffi(flat_error)]`
/// 2. Adds a `Generic { message: String }` variant if not already present
/// 3. Implements `From<anyhow::Error>` for the error type
/// 4. Provides helper methods for error conversion
///
/// # Usage
///
/// ```rust,ignore
/// #[collect_error]
/// pub enum ResetError {
///     #[error("invalid preference schema: {reason}")]
///     InvalidSchema { reason: String },
/// }
/// ```
///
/// This will automatically add:
/// - `#[derive(Debug, thiserror::Error, uniffi::Error)]` and `#[uniffi(flat_error)]`
/// - `Generic { message: String }` variant
/// - `impl From<anyhow::Error> for ResetError`
#[proc_macro_attribute]
pub fn collect_error(_args: TokenStream, input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    let Data::Enum(data_enum) = &input.data else {
        return syn::Error::new_spanned(
            &input,
            "collect_error can only be applied to enums",
        )
        .to_compile_error()
        .into();
    };

    let enum_name = &input.ident;
    let visibility = &input.vis;

    // Existing derive/uniffi attributes are replaced by the generated ones
    let attrs: Vec<_> = input
        .attrs
        .iter()
        .filter(|attr| !attr.path().is_ident("derive") && !attr.path().is_ident("uniffi"))
        .collect();

    let generics = &input.generics;

    let has_generic = data_enum
        .variants
        .iter()
        .any(|variant| variant.ident == "Generic");

    let mut variants = data_enum.variants.clone();
    if !has_generic {
        let generic_variant: Variant = syn::parse_quote! {
            /// A generic error that can wrap any anyhow error.
            #[error("Generic error: {message}")]
            Generic {
                /// The error message from the wrapped error.
                message: String
            }
        };
        variants.push(generic_variant);
    }

    let expanded = quote! {
        #[derive(Debug, thiserror::Error, uniffi::Error)]
        #[uniffi(flat_error)]
        #(#attrs)*
        #visibility enum #enum_name #generics {
            #variants
        }

        impl #generics From<anyhow::Error> for #enum_name #generics {
            fn from(err: anyhow::Error) -> Self {
                Self::Generic {
                    message: {
                        // Include the full error chain in the message
                        let mut message = err.to_string();

                        let chain: Vec<String> = err.chain().skip(1).map(|e| e.to_string()).collect();
                        if !chain.is_empty() {
                            message.push_str(" (caused by: ");
                            message.push_str(&chain.join(" -> "));
                            message.push(')');
                        }

                        message
                    }
                }
            }
        }

        impl #generics #enum_name #generics {
            /// Convert an anyhow::Result to a Result with this error type
            pub fn from_anyhow_result<T>(result: anyhow::Result<T>) -> Result<T, Self> {
                result.map_err(Self::from)
            }
        }
    };

    TokenStream::from(expanded)
}

/// Procedural macro that wraps `uniffi::export` and automatically injects logging context
///
/// This macro automatically:
/// 1. Forwards the attribute to `#[uniffi::export]`
/// 2. Injects `let _collect_logger_ctx = crate::primitives::logger::LogContext::new("TypeName");` at the start of every `pub fn`
/// 3. Extracts the type name from the impl block for context
///
/// # Usage
///
/// ```rust,ignore
/// #[collect_export]
/// impl ResetCoordinator {
///     pub fn reset(&self, actions: Vec<ResetAction>) -> Vec<ResetAction> {
///         // _collect_logger_ctx is automatically injected here
///         info!("This will be prefixed with [ResetCoordinator]");
///         vec![]
///     }
/// }
/// ```
#[proc_macro_attribute]
pub fn collect_export(args: TokenStream, input: TokenStream) -> TokenStream {
    let input_impl = parse_macro_input!(input as ItemImpl);
    let type_name = impl_type_name(&input_impl);

    let new_items = input_impl
        .items
        .iter()
        .map(|item| match item {
            ImplItem::Fn(method) if matches!(method.vis, Visibility::Public(_)) => {
                let mut new_method = method.clone();
                inject_logging_context(&mut new_method, &type_name);
                ImplItem::Fn(new_method)
            }
            _ => item.clone(),
        })
        .collect();

    let new_impl = ItemImpl {
        items: new_items,
        ..input_impl
    };

    let args = proc_macro2::TokenStream::from(args);

    quote! {
        #[uniffi::export(#args)]
        #new_impl
    }
    .into()
}

/// Name of the type the impl block is for, used as the logging context
fn impl_type_name(input_impl: &ItemImpl) -> String {
    match &*input_impl.self_ty {
        syn::Type::Path(type_path) => type_path
            .path
            .segments
            .last()
            .map_or_else(|| "Unknown".to_string(), |segment| segment.ident.to_string()),
        _ => "Unknown".to_string(),
    }
}

/// Inject logging context at the start of a function body
fn inject_logging_context(method: &mut ImplItemFn, type_name: &str) {
    let context_stmt: Stmt = syn::parse_quote! {
        let _collect_logger_ctx = crate::primitives::logger::LogContext::new(#type_name);
    };

    method.block.stmts.insert(0, context_stmt);
}
