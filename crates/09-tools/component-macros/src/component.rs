//! `#[derive(Injectable)]` 实现

use crate::utils::{is_open_generic, path_to_string, string_value, with_static_bounds};
use proc_macro2::TokenStream;
use quote::{quote, quote_spanned};
use syn::spanned::Spanned;
use syn::{punctuated::Punctuated, DeriveInput, Meta, Path, Result, Token};

/// 组件生命周期类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComponentLifetime {
    Singleton,
    Scoped,
    Transient,
}

impl ComponentLifetime {
    fn from_ident(path: &Path) -> Option<Self> {
        if path.is_ident("singleton") {
            Some(Self::Singleton)
        } else if path.is_ident("scoped") {
            Some(Self::Scoped)
        } else if path.is_ident("transient") {
            Some(Self::Transient)
        } else {
            None
        }
    }

    fn tokens(self, root: &Path) -> TokenStream {
        match self {
            Self::Singleton => quote! { #root::Lifetime::Singleton },
            Self::Scoped => quote! { #root::Lifetime::Scoped },
            Self::Transient => quote! { #root::Lifetime::Transient },
        }
    }
}

/// `#[injectable(...)]` 参数
#[derive(Debug, Clone, Default)]
pub struct InjectableArgs {
    /// 声明的生命周期
    pub lifetime: Option<ComponentLifetime>,
    /// 服务接口
    pub interfaces: Vec<String>,
    /// 服务接口的原始路径，用于生成实现检查
    pub interface_paths: Vec<Path>,
    /// 自定义程序集
    pub assembly: Option<String>,
    /// 自定义简短名称
    pub name: Option<String>,
    /// 不参与自动注册
    pub skip: bool,
    /// 抽象类型
    pub is_abstract: bool,
    /// 生成代码的根路径
    pub crate_path: Option<Path>,
}

impl InjectableArgs {
    /// 从派生输入的全部 `#[injectable]` 属性中收集参数
    pub fn from_attributes(input: &DeriveInput) -> Result<Self> {
        let mut args = Self::default();
        for attr in input.attrs.iter().filter(|attr| attr.path().is_ident("injectable")) {
            let metas = attr.parse_args_with(Punctuated::<Meta, Token![,]>::parse_terminated)?;
            for meta in metas {
                args.apply(&meta)?;
            }
        }
        Ok(args)
    }

    fn apply(&mut self, meta: &Meta) -> Result<()> {
        let path = meta.path();

        if let Some(lifetime) = ComponentLifetime::from_ident(path) {
            meta.require_path_only()?;
            if self.lifetime.replace(lifetime).is_some() {
                return Err(syn::Error::new_spanned(meta, "生命周期只能声明一次"));
            }
        } else if path.is_ident("interfaces") {
            let list = meta.require_list()?;
            let paths = list.parse_args_with(Punctuated::<Path, Token![,]>::parse_terminated)?;
            for interface in paths {
                let name = path_to_string(&interface);
                if !self.interfaces.contains(&name) {
                    self.interfaces.push(name);
                    self.interface_paths.push(interface);
                }
            }
        } else if path.is_ident("assembly") {
            self.assembly = Some(non_empty(meta, string_value(meta)?)?);
        } else if path.is_ident("name") {
            self.name = Some(non_empty(meta, string_value(meta)?)?);
        } else if path.is_ident("skip") {
            meta.require_path_only()?;
            self.skip = true;
        } else if path.is_ident("abstract_type") {
            meta.require_path_only()?;
            self.is_abstract = true;
        } else if path.is_ident("crate") {
            let value = string_value(meta)?;
            self.crate_path = Some(syn::parse_str(&value).map_err(|e| syn::Error::new_spanned(meta, e))?);
        } else {
            return Err(syn::Error::new_spanned(
                path,
                "未知的 injectable 参数，可用: singleton, scoped, transient, interfaces(..), assembly, name, skip, abstract_type, crate",
            ));
        }
        Ok(())
    }
}

fn non_empty(meta: &Meta, value: String) -> Result<String> {
    if value.trim().is_empty() {
        Err(syn::Error::new_spanned(meta, "取值不能为空"))
    } else {
        Ok(value)
    }
}

/// 生成 `Injectable` 实现与编译期登记
pub fn derive_injectable_impl(input: &DeriveInput) -> Result<TokenStream> {
    if let Some(lifetime) = input.generics.lifetimes().next() {
        return Err(syn::Error::new_spanned(
            lifetime,
            "Injectable 不支持带生命周期参数的类型",
        ));
    }

    let args = InjectableArgs::from_attributes(input)?;
    let root = args
        .crate_path
        .clone()
        .unwrap_or_else(|| syn::parse_quote!(::syringe));

    let ident = &input.ident;
    let open_generic = is_open_generic(&input.generics);
    let generics = with_static_bounds(&input.generics);
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    // 开放泛型的标识不含具体类型参数
    let full_name = if open_generic {
        quote! { ::core::concat!(::core::module_path!(), "::", ::core::stringify!(#ident)) }
    } else {
        quote! { ::core::any::type_name::<Self>() }
    };

    let mut builders = Vec::new();
    if let Some(assembly) = &args.assembly {
        builders.push(quote! { .with_assembly(#assembly) });
    }
    if let Some(name) = &args.name {
        builders.push(quote! { .with_name(#name) });
    }
    if !args.interfaces.is_empty() {
        let interfaces = &args.interfaces;
        builders.push(quote! { .with_interfaces([#(#interfaces),*]) });
    }
    if let Some(lifetime) = args.lifetime {
        let lifetime = lifetime.tokens(&root);
        builders.push(quote! { .with_lifetime(#lifetime) });
    }
    if args.is_abstract {
        builders.push(quote! { .abstract_type() });
    }
    if open_generic {
        builders.push(quote! { .open_generic() });
    }
    if args.skip {
        builders.push(quote! { .skip() });
    }

    let injectable_impl = quote! {
        impl #impl_generics #root::Injectable for #ident #ty_generics #where_clause {
            fn type_descriptor() -> #root::TypeDescriptor {
                #root::TypeDescriptor::new(#full_name)
                    #(#builders)*
            }
        }
    };

    // 声明的接口必须确实由类型实现；开放泛型无法在此处命名具体类型
    let interface_checks: Vec<TokenStream> = if open_generic {
        Vec::new()
    } else {
        args.interface_paths
            .iter()
            .map(|interface| {
                let span = interface.span();
                let mut target = ident.clone();
                target.set_span(span);
                quote_spanned! {span=>
                    const _: fn() = || {
                        fn assert_implements<T: ?::core::marker::Sized + #interface>() {}
                        assert_implements::<#target>();
                    };
                }
            })
            .collect()
    };

    // 只有非泛型类型能够登记到编译期目录
    let registration = if open_generic {
        quote! {}
    } else {
        quote! {
            #root::__private::inventory::submit! {
                #root::TypeRegistration::new(<#ident as #root::Injectable>::type_descriptor)
            }
        }
    };

    Ok(quote! {
        #injectable_impl

        #(#interface_checks)*

        #registration
    })
}
