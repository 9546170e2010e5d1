use pretty_assertions::assert_eq;
use quote::quote;

fn generate(input: proc_macro2::TokenStream) -> String {
    rowbind_codegen::generate(input).unwrap().to_string()
}

fn generate_err(input: proc_macro2::TokenStream) -> String {
    rowbind_codegen::generate(input).unwrap_err().to_string()
}

fn errors(input: proc_macro2::TokenStream) -> Vec<String> {
    rowbind_codegen::generate(input)
        .unwrap_err()
        .into_iter()
        .map(|err| err.to_string())
        .collect()
}

#[test]
fn named_struct() {
    let actual = generate(quote! {
        struct Todo {
            #[column("Id")]
            id: i32,
            #[column("Title")]
            title: String,
            #[column("Note")]
            note: Option<String>,
            #[column("IsComplete")]
            is_complete: bool,
        }
    });

    let expected = quote! {
        const _: () = {
            use rowbind as _rowbind;
            impl _rowbind::codegen_support::FromRow for Todo {
                fn from_row<__rowbind_R: _rowbind::codegen_support::Row + ?Sized>(
                    row: &__rowbind_R
                ) -> _rowbind::codegen_support::Result<Self> {
                    Ok(Self {
                        id: row.get_int32("Id")?,
                        title: row.get_string("Title")?,
                        note: row.get_nullable_string("Note")?,
                        is_complete: row.get_bool("IsComplete")?,
                    })
                }
            }
        };
    };

    assert_eq!(actual, expected.to_string());
}

#[test]
fn default_column_is_field_name() {
    let actual = generate(quote! {
        struct Item {
            r#type: u8,
            DueBy: Option<chrono::NaiveDateTime>,
        }
    });

    assert!(actual.contains("r#type : row . get_byte (\"type\") ?"), "{actual}");
    assert!(
        actual.contains("DueBy : row . get_nullable_datetime (\"DueBy\") ?"),
        "{actual}"
    );
}

#[test]
fn rename_all() {
    let actual = generate(quote! {
        #[rowbind(rename_all = "PascalCase")]
        struct Todo {
            id: i64,
            is_complete: bool,
            #[column("note_text")]
            note: Option<String>,
        }
    });

    assert!(actual.contains("row . get_int64 (\"Id\")"), "{actual}");
    assert!(actual.contains("row . get_bool (\"IsComplete\")"), "{actual}");
    assert!(actual.contains("row . get_nullable_string (\"note_text\")"), "{actual}");
}

#[test]
fn tuple_struct() {
    let actual = generate(quote! {
        struct Pair(#[column("a")] i16, #[column("b")] Option<uuid::Uuid>);
    });

    let expected = quote! {
        const _: () = {
            use rowbind as _rowbind;
            impl _rowbind::codegen_support::FromRow for Pair {
                fn from_row<__rowbind_R: _rowbind::codegen_support::Row + ?Sized>(
                    row: &__rowbind_R
                ) -> _rowbind::codegen_support::Result<Self> {
                    Ok(Self(
                        row.get_int16("a")?,
                        row.get_nullable_guid("b")?,
                    ))
                }
            }
        };
    };

    assert_eq!(actual, expected.to_string());
}

#[test]
fn every_supported_type() {
    let actual = generate(quote! {
        struct All {
            a: u8, b: i16, c: i32, d: i64, e: f32, f: f64,
            g: rust_decimal::Decimal, h: std::string::String, i: bool,
            j: ::uuid::Uuid, k: char, l: NaiveDateTime,
            na: Option<u8>, nb: Option<i16>, nc: Option<i32>, nd: Option<i64>,
            ne: Option<f32>, nf: Option<f64>, ng: Option<Decimal>,
            nh: Option<String>, ni: Option<bool>, nj: Option<Uuid>,
            nk: Option<char>, nl: std::option::Option<chrono::NaiveDateTime>,
        }
    });

    for method in [
        "get_byte", "get_int16", "get_int32", "get_int64", "get_float", "get_double",
        "get_decimal", "get_string", "get_bool", "get_guid", "get_char", "get_datetime",
    ] {
        assert!(actual.contains(&format!("row . {method} (")), "{method}");
        let nullable = method.replacen("get_", "get_nullable_", 1);
        assert!(actual.contains(&format!("row . {nullable} (")), "{nullable}");
    }
}

#[test]
fn output_is_deterministic() {
    let input = quote! {
        struct Todo { id: i32, title: String }
    };

    assert_eq!(generate(input.clone()), generate(input));
}

#[test]
fn unsupported_types_are_all_reported() {
    let errors = errors(quote! {
        struct Bad {
            ok: i32,
            data: Vec<u8>,
            small: u16,
            nested: Option<Option<i32>>,
        }
    });

    assert_eq!(errors.len(), 3, "{errors:?}");
    assert!(errors[0].starts_with("unsupported field type `Vec<u8>`"), "{}", errors[0]);
    assert!(errors[1].starts_with("unsupported field type `u16`"), "{}", errors[1]);
    assert!(
        errors[2].starts_with("unsupported field type `Option<Option<i32>>`"),
        "{}",
        errors[2]
    );
}

#[test]
fn rejects_enums_and_unions() {
    assert_eq!(
        generate_err(quote!(enum E { A, B })),
        "FromRow can only be derived for structs"
    );
    assert_eq!(
        generate_err(quote!(union U { a: u8, b: i16 })),
        "FromRow can only be derived for structs"
    );
}

#[test]
fn rejects_generics_and_unit_structs() {
    assert_eq!(
        generate_err(quote!(struct W<T> { value: T })),
        "FromRow cannot be derived for generic types"
    );
    assert_eq!(
        generate_err(quote!(struct Empty;)),
        "FromRow cannot be derived for unit structs"
    );
}

#[test]
fn tuple_fields_need_columns() {
    assert_eq!(
        generate_err(quote!(struct Pair(#[column("a")] i32, String);)),
        "tuple struct fields require a `#[column(\"...\")]` attribute"
    );
}

#[test]
fn duplicate_column_attribute() {
    assert_eq!(
        generate_err(quote! {
            struct T {
                #[column("a")]
                #[column("b")]
                a: i32,
            }
        }),
        "duplicate #[column] attribute"
    );
}

#[test]
fn duplicate_column_names() {
    assert_eq!(
        generate_err(quote! {
            struct T {
                id: i32,
                #[column("id")]
                other: i64,
            }
        }),
        "duplicate column name `id`"
    );
}

#[test]
fn unknown_rename_rule() {
    let err = generate_err(quote! {
        #[rowbind(rename_all = "Title Case")]
        struct T { id: i32 }
    });
    assert!(err.starts_with("unknown rename rule `Title Case`"), "{err}");
}
