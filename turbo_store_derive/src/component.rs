use proc_macro::TokenStream;
use syn::DeriveInput;
use quote::quote;

pub fn impl_component(ast: &DeriveInput) -> TokenStream {
    let name = &ast.ident;
    let name_str = name.to_string();

    let gen = quote! {
        impl turbo_store::components::Component for #name {
            #[inline(always)]
            fn component_index() -> turbo_store::components::ComponentIndex {
                turbo_store::lazy_static! {
                    static ref INDEX: turbo_store::components::ComponentIndex =
                        turbo_store::components::register_component::<#name>(#name_str);
                }
                *INDEX
            }
        }
    };
    gen.into()
}
