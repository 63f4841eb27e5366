use proc_macro::TokenStream;
use syn::DeriveInput;
use quote::quote;

pub fn impl_tag(ast: &DeriveInput) -> TokenStream {
    let name = &ast.ident;
    let name_str = name.to_string();

    let gen = quote! {
        impl turbo_store::components::Tag for #name {
            #[inline(always)]
            fn tag_index() -> turbo_store::components::TagIndex {
                turbo_store::lazy_static! {
                    static ref INDEX: turbo_store::components::TagIndex =
                        turbo_store::components::register_tag::<#name>(#name_str);
                }
                *INDEX
            }
        }
    };
    gen.into()
}
