//! Procedural macros for the aoc-solver library

use proc_macro::TokenStream;
use proc_macro2::Literal;
use quote::quote;
use syn::{DeriveInput, Lit, parse_macro_input};

/// Derive macro that implements `Solver` by dispatching to `PartSolver<N>`
///
/// # Attributes
///
/// - `max_parts`: Required. Number of parts; parts `1..=max_parts` must each
///   have a `PartSolver<N>` impl.
///
/// Any other part number yields `SolveError::PartNotImplemented(part)`.
///
/// # Example
///
/// ```ignore
/// #[derive(AocSolver)]
/// #[aoc_solver(max_parts = 2)]
/// pub struct Solver;
///
/// impl AocParser for Solver { /* ... */ }
/// impl PartSolver<1> for Solver { /* ... */ }
/// impl PartSolver<2> for Solver { /* ... */ }
/// ```
#[proc_macro_derive(AocSolver, attributes(aoc_solver))]
pub fn derive_aoc_solver(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let name = &input.ident;

    let Some(attr) = input
        .attrs
        .iter()
        .find(|attr| attr.path().is_ident("aoc_solver"))
    else {
        return syn::Error::new_spanned(
            name,
            "AocSolver derive macro requires #[aoc_solver(max_parts = N)] attribute",
        )
        .to_compile_error()
        .into();
    };

    let mut max_parts: Option<u8> = None;
    let parsed = attr.parse_nested_meta(|meta| {
        if meta.path.is_ident("max_parts") {
            let value: Lit = meta.value()?.parse()?;
            match value {
                Lit::Int(lit_int) => max_parts = Some(lit_int.base10_parse()?),
                other => return Err(syn::Error::new_spanned(other, "expected integer")),
            }
            Ok(())
        } else {
            Err(meta.error("unsupported aoc_solver attribute"))
        }
    });
    if let Err(e) = parsed {
        return e.to_compile_error().into();
    }

    let max_parts = match max_parts {
        Some(n) if n > 0 => n,
        _ => {
            return syn::Error::new_spanned(attr, "max_parts must be at least 1")
                .to_compile_error()
                .into();
        }
    };

    let parts_lit = Literal::u8_unsuffixed(max_parts);
    let arms = (1..=max_parts).map(|part| {
        let lit = Literal::u8_unsuffixed(part);
        quote! {
            #lit => <Self as ::aoc_solver::PartSolver<#lit>>::solve(shared),
        }
    });

    let expanded = quote! {
        impl ::aoc_solver::Solver for #name {
            const PARTS: u8 = #parts_lit;

            fn solve_part(
                shared: &mut <Self as ::aoc_solver::AocParser>::SharedData<'_>,
                part: u8,
            ) -> ::core::result::Result<::std::string::String, ::aoc_solver::SolveError> {
                match part {
                    #(#arms)*
                    _ => ::core::result::Result::Err(::aoc_solver::SolveError::PartNotImplemented(part)),
                }
            }
        }
    };

    TokenStream::from(expanded)
}

/// Derive macro for automatically registering solvers with the plugin system
///
/// # Attributes
///
/// - `year`: Required. The Advent of Code year (e.g., 2020)
/// - `day`: Required. The day number (1-25)
/// - `tags`: Optional. Array of string literals for filtering (e.g., ["2020", "grid"])
///
/// # Requirements
///
/// The type must implement the `Solver` trait. If the trait is not implemented,
/// you will get a clear compile-time error:
///
/// ```text
/// error[E0277]: the trait bound `YourSolver: Solver` is not satisfied
/// ```
///
/// # Example
///
/// ```ignore
/// #[derive(AocSolver, AutoRegisterSolver)]
/// #[aoc_solver(max_parts = 2)]
/// #[aoc(year = 2020, day = 3, tags = ["2020", "grid"])]
/// pub struct Solver;
/// ```
#[proc_macro_derive(AutoRegisterSolver, attributes(aoc))]
pub fn derive_auto_register_solver(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let name = &input.ident;

    let Some(aoc_attr) = input.attrs.iter().find(|attr| attr.path().is_ident("aoc")) else {
        return syn::Error::new_spanned(
            name,
            "AutoRegisterSolver derive macro requires #[aoc(...)] attribute",
        )
        .to_compile_error()
        .into();
    };

    let mut year: Option<u16> = None;
    let mut day: Option<u8> = None;
    let mut tags: Vec<String> = Vec::new();

    let parsed = aoc_attr.parse_nested_meta(|meta| {
        if meta.path.is_ident("year") {
            let value: Lit = meta.value()?.parse()?;
            if let Lit::Int(lit_int) = value {
                year = Some(lit_int.base10_parse()?);
            }
        } else if meta.path.is_ident("day") {
            let value: Lit = meta.value()?.parse()?;
            if let Lit::Int(lit_int) = value {
                day = Some(lit_int.base10_parse()?);
            }
        } else if meta.path.is_ident("tags") {
            // tags = ["a", "b"]
            let _ = meta.value()?;
            let content;
            syn::bracketed!(content in meta.input);
            while !content.is_empty() {
                let lit: Lit = content.parse()?;
                if let Lit::Str(lit_str) = lit {
                    tags.push(lit_str.value());
                }
                if content.peek(syn::Token![,]) {
                    let _: syn::Token![,] = content.parse()?;
                }
            }
        } else {
            return Err(meta.error("unsupported aoc attribute"));
        }
        Ok(())
    });
    if let Err(e) = parsed {
        return e.to_compile_error().into();
    }

    let (Some(year), Some(day)) = (year, day) else {
        return syn::Error::new_spanned(aoc_attr, "#[aoc(...)] requires both `year` and `day`")
            .to_compile_error()
            .into();
    };

    let year = Literal::u16_unsuffixed(year);
    let day = Literal::u8_unsuffixed(day);
    let tag_strs = tags.iter().map(|s| s.as_str());

    let expanded = quote! {
        // Compile-time check that the type implements Solver trait
        const _: () = {
            trait MustImplementSolver: ::aoc_solver::Solver {}
            impl MustImplementSolver for #name {}
        };

        ::aoc_solver::inventory::submit! {
            ::aoc_solver::SolverPlugin {
                year: #year,
                day: #day,
                solver: &#name,
                tags: &[#(#tag_strs),*],
            }
        }
    };

    TokenStream::from(expanded)
}
