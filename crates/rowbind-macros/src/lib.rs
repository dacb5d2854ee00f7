extern crate proc_macro;

use proc_macro::TokenStream;

#[proc_macro_derive(
    Record,
    attributes(record, column, skip, ignore_if_null, position, reduce)
)]
pub fn derive_record(input: TokenStream) -> TokenStream {
    match rowbind_codegen::generate(input.into()) {
        Ok(output) => output.into(),
        Err(e) => e.to_compile_error().into(),
    }
}
