//! Helper macro generating port error enums with `impl Into<String>`
//! constructors.

/// Declare a `thiserror` enum whose variants each carry a `message` field.
///
/// Every variant gets a snake-case constructor, so
/// `UserPersistenceError::connection("refused")` builds
/// `UserPersistenceError::Connection { message: "refused".into() }`.
macro_rules! define_port_error {
    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident => $message:literal
            ),* $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant { message: String },
            )*
        }

        impl $name {
            $(
                ::paste::paste! {
                    #[doc = concat!("Build a `", stringify!($variant), "` error.")]
                    pub fn [<$variant:snake>](message: impl Into<String>) -> Self {
                        Self::$variant {
                            message: message.into(),
                        }
                    }
                }
            )*
        }
    };
}

pub(crate) use define_port_error;

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    define_port_error! {
        pub enum ExamplePortError {
            Unreachable => "store unreachable: {message}",
            BadQuery => "query failed: {message}",
        }
    }

    #[test]
    fn constructors_accept_str() {
        let err = ExamplePortError::unreachable("refused");
        assert_eq!(err.to_string(), "store unreachable: refused");
    }

    #[test]
    fn multi_word_variants_use_snake_case_constructors() {
        let err = ExamplePortError::bad_query("syntax");
        assert_eq!(
            err,
            ExamplePortError::BadQuery {
                message: "syntax".to_owned()
            }
        );
    }
}
