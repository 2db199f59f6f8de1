// SPDX-License-Identifier: Apache-2.0

/// Declares a record struct and implements [`Target`](crate::Target),
/// [`Record`](crate::Record) and [`Bind`](crate::Bind) for it.
///
/// Each field is bound from the JSON key of the same name, or from the key
/// given with `as "key"`. The struct must implement `Default`, which is used
/// to construct instances before binding.
///
/// ```
/// picobind::record! {
///     #[derive(Debug, Default)]
///     pub struct Page {
///         pub title: String,
///         pub page_count: u32 as "pageCount",
///         pub authors: Vec<String>,
///     }
/// }
///
/// let page: Page = picobind::from_str(
///     r#"{"title": "Rust", "pageCount": 300, "authors": ["a", "b"]}"#,
/// )
/// .unwrap()
/// .unwrap();
/// assert_eq!(page.page_count, 300);
/// assert_eq!(page.authors.len(), 2);
/// ```
#[macro_export]
macro_rules! record {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[$fmeta:meta])*
                $fvis:vis $field:ident : $ty:ty $(as $key:literal)?
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis struct $name {
            $(
                $(#[$fmeta])*
                $fvis $field: $ty,
            )*
        }

        impl $crate::Target for $name {
            #[allow(unused_variables)]
            fn bind_field<P: $crate::PullParser>(
                &mut self,
                key: &str,
                value: $crate::Incoming,
                binder: &mut $crate::Binder<P>,
            ) -> ::core::result::Result<$crate::Binding, $crate::BindError> {
                $(
                    if key == $crate::__record_key!($field $(, $key)?) {
                        return <$ty as $crate::Bind>::bind(&mut self.$field, value, binder)
                            .map($crate::Binding::from_written);
                    }
                )*
                ::core::result::Result::Ok($crate::Binding::Unknown(value))
            }
        }

        impl $crate::Record for $name {
            fn type_name() -> &'static str {
                ::core::stringify!($name)
            }

            fn fields() -> $crate::__private::Vec<$crate::Field> {
                $crate::__private::vec![
                    $(
                        $crate::Field::new(
                            $crate::__record_key!($field $(, $key)?),
                            <$ty as $crate::Bind>::declared(),
                        )
                    ),*
                ]
            }

            fn construct() -> ::core::result::Result<Self, $crate::BindError> {
                ::core::result::Result::Ok(<Self as ::core::default::Default>::default())
            }
        }

        impl $crate::Bind for $name {
            fn declared() -> $crate::FieldType {
                $crate::FieldType::Record(::core::stringify!($name))
            }

            fn construct() -> ::core::result::Result<Self, $crate::BindError> {
                <Self as $crate::Record>::construct()
            }

            fn bind<P: $crate::PullParser>(
                &mut self,
                value: $crate::Incoming,
                binder: &mut $crate::Binder<P>,
            ) -> ::core::result::Result<bool, $crate::BindError> {
                $crate::bind_record(self, value, binder)
            }
        }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __record_key {
    ($field:ident) => {
        ::core::stringify!($field)
    };
    ($field:ident, $key:literal) => {
        $key
    };
}

#[cfg(test)]
mod tests {
    use crate::{from_str, FieldType, Record};
    use alloc::string::String;
    use alloc::vec::Vec;
    use test_log::test;

    crate::record! {
        #[derive(Debug, Default, PartialEq)]
        struct Author {
            name: String,
            born: Option<i32>,
        }
    }

    crate::record! {
        #[derive(Debug, Default)]
        struct Book {
            /// Display title.
            title: String,
            page_count: u32 as "pageCount",
            authors: Vec<Author>,
        }
    }

    crate::record! {
        #[derive(Debug, Default)]
        struct Empty {}
    }

    #[test]
    fn test_fields_in_declaration_order() {
        let names: Vec<_> = Book::fields().into_iter().map(|f| f.name).collect();
        assert_eq!(names, ["title", "pageCount", "authors"]);
        assert_eq!(Book::type_name(), "Book");
        assert_eq!(
            Book::field("authors").map(|f| f.declared),
            Some(FieldType::List(alloc::boxed::Box::new(FieldType::Record(
                "Author"
            ))))
        );
        assert_eq!(Book::field("page_count"), None);
        assert!(Empty::fields().is_empty());
    }

    #[test]
    fn test_renamed_key_binds() {
        let book: Book = from_str(
            r#"{"pageCount": 12, "page_count": 99, "title": "T",
                "authors": [{"name": "A", "born": 1900}, {"name": "B", "born": null}]}"#,
        )
        .unwrap()
        .unwrap();
        assert_eq!(book.page_count, 12);
        assert_eq!(book.title, "T");
        assert_eq!(
            book.authors,
            [
                Author {
                    name: "A".into(),
                    born: Some(1900)
                },
                Author {
                    name: "B".into(),
                    born: None
                }
            ]
        );
    }

    #[test]
    fn test_empty_record_discards_everything() {
        let empty: Option<Empty> = from_str(r#"{"a": {"b": [1, 2]}, "c": "d"}"#).unwrap();
        assert!(empty.is_some());
    }
}
