use proc_macro::TokenStream;
use proc_macro2::Span;
use quote::quote;
use syn::{
    parse_macro_input, Data, DeriveInput, Expr, Fields, GenericParam, Ident, Lit, LitInt, Type,
};

const STRUCT_SHAPE_ERR: &str = "StructuredData can only be derived for structs with named fields";
const GENERICS_ERR: &str =
    "StructuredData structs take either no generics or a single type parameter for the signal type";
const ARRAY_LEN_ERR: &str = "array fields of a StructuredData struct must have a literal length";

/// Derives `hdl::StructuredData` for a struct of signals.
///
/// A struct generic over one type parameter `T` flattens into `[T; N]`; a
/// non-generic struct flattens into `[bool; N]`. Scalar fields count as one
/// signal and `[_; K]` fields as `K` signals, in declaration order.
#[proc_macro_derive(StructuredData)]
pub fn structured_data(item: TokenStream) -> TokenStream {
    let ast = parse_macro_input!(item as DeriveInput);
    match expand(&ast) {
        Ok(gen) => gen.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

enum FieldWidth {
    Single,
    Array(usize),
}

fn field_width(ty: &Type) -> syn::Result<FieldWidth> {
    match ty {
        Type::Array(tya) => match &tya.len {
            Expr::Lit(x) => match &x.lit {
                Lit::Int(i) => Ok(FieldWidth::Array(i.base10_parse()?)),
                _ => Err(syn::Error::new_spanned(&tya.len, ARRAY_LEN_ERR)),
            },
            _ => Err(syn::Error::new_spanned(&tya.len, ARRAY_LEN_ERR)),
        },
        _ => Ok(FieldWidth::Single),
    }
}

fn expand(ast: &DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
    let struct_name = &ast.ident;
    let fields = match &ast.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => &named.named,
            _ => return Err(syn::Error::new_spanned(ast, STRUCT_SHAPE_ERR)),
        },
        _ => return Err(syn::Error::new_spanned(ast, STRUCT_SHAPE_ERR)),
    };

    let type_params: Vec<&Ident> = ast
        .generics
        .params
        .iter()
        .map(|param| match param {
            GenericParam::Type(ty) => Ok(&ty.ident),
            _ => Err(syn::Error::new_spanned(param, GENERICS_ERR)),
        })
        .collect::<syn::Result<_>>()?;
    let signal_ty = match type_params.as_slice() {
        [] => quote! { bool },
        [param] => quote! { #param },
        _ => return Err(syn::Error::new_spanned(&ast.generics, GENERICS_ERR)),
    };
    let (impl_generics, ty_generics, where_clause) = ast.generics.split_for_impl();

    let mut width = 0usize;
    let mut takes = Vec::new();
    let mut pushes = Vec::new();
    for field in fields {
        // named fields always carry an identifier
        let Some(ident) = field.ident.as_ref() else {
            return Err(syn::Error::new_spanned(field, STRUCT_SHAPE_ERR));
        };
        match field_width(&field.ty)? {
            FieldWidth::Single => {
                width += 1;
                takes.push(quote! { #ident: hdl::structured::take_one(&mut signals) });
                pushes.push(quote! { flat.push(self.#ident); });
            }
            FieldWidth::Array(len) => {
                width += len;
                takes.push(quote! { #ident: hdl::structured::take(&mut signals) });
                pushes.push(quote! { flat.extend(self.#ident); });
            }
        }
    }
    let width_literal = LitInt::new(&width.to_string(), Span::call_site());

    Ok(quote! {
        impl #impl_generics hdl::StructuredData<#signal_ty, #width_literal> for #struct_name #ty_generics #where_clause {
            fn from_flat(input: [#signal_ty; #width_literal]) -> Self {
                let mut signals = ::core::iter::IntoIterator::into_iter(input);
                Self {
                    #(#takes,)*
                }
            }

            fn to_flat(self) -> [#signal_ty; #width_literal] {
                let mut flat = ::std::vec::Vec::with_capacity(#width_literal);
                #(#pushes)*
                hdl::structured::collect(flat)
            }
        }
    })
}
