/// Implement [`FieldEnumerable`](crate::record::FieldEnumerable) and
/// [`RelationEnumerable`](crate::record::RelationEnumerable) for a struct.
///
/// Scalar fields are cloned and converted with `Into<FieldValue>`.
/// Relationship fields must implement
/// [`IntoRelated`](crate::record::IntoRelated): `Option<T>`, `Vec<T>` or
/// `Box<T>` of another record type.
///
/// ```
/// use record_file_log::model_record;
///
/// struct Post { id: i64, title: String }
/// struct User { id: i64, name: String, posts: Vec<Post>, manager: Option<Box<User>> }
///
/// model_record!(Post { id, title });
/// model_record!(User { id, name } relations { posts, manager });
/// ```
#[macro_export]
macro_rules! model_record {
    ($ty:ty { $($field:ident),* $(,)? } relations { $($rel:ident),* $(,)? }) => {
        impl $crate::record::FieldEnumerable for $ty {
            fn fields(
                &self,
            ) -> ::std::result::Result<
                ::std::vec::Vec<(::std::string::String, $crate::value::FieldValue)>,
                $crate::error::LoggerError,
            > {
                ::std::result::Result::Ok(::std::vec![
                    $((
                        ::std::string::String::from(::std::stringify!($field)),
                        $crate::value::FieldValue::from(::std::clone::Clone::clone(&self.$field)),
                    )),*
                ])
            }
        }

        impl $crate::record::RelationEnumerable for $ty {
            fn relations(
                &self,
            ) -> ::std::result::Result<
                ::std::vec::Vec<(::std::string::String, $crate::record::Related<'_>)>,
                $crate::error::LoggerError,
            > {
                ::std::result::Result::Ok(::std::vec![
                    $((
                        ::std::string::String::from(::std::stringify!($rel)),
                        $crate::record::IntoRelated::related(&self.$rel),
                    )),*
                ])
            }
        }
    };
    ($ty:ty { $($field:ident),* $(,)? }) => {
        $crate::model_record!($ty { $($field),* } relations {});
    };
}
