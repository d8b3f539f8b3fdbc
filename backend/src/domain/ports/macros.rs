//! Helper macro for declaring driven-port error enums.
//!
//! Each variant gets a `thiserror` message and a snake_case constructor whose
//! parameters accept anything convertible into the field type, so adapters can
//! write `RecipeRepositoryError::query(err.to_string())` or pass a `&str`.

macro_rules! define_port_error {
    (@ctor $variant:ident $( { $($field:ident : $ty:ty),* } )?) => {
        ::paste::paste! {
            pub fn [<$variant:snake>]($($($field: impl Into<$ty>),*)?) -> Self {
                Self::$variant $( { $($field: $field.into()),* } )?
            }
        }
    };
    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident $( { $($field:ident : $ty:ty),* $(,)? } )? => $message:expr
            ),* $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant $( { $($field : $ty),* } )?,
            )*
        }

        impl $name {
            $(
                define_port_error!(@ctor $variant $( { $($field : $ty),* } )?);
            )*
        }
    };
}

pub(crate) use define_port_error;

#[cfg(test)]
mod tests {
    define_port_error! {
        pub enum SamplePortError {
            Unavailable => "store unavailable",
            Rejected { status: u16, message: String } => "store rejected ({status}): {message}",
            Decode { message: String } => "decode failed: {message}",
        }
    }

    #[test]
    fn unit_variants_get_zero_argument_constructors() {
        assert_eq!(SamplePortError::unavailable().to_string(), "store unavailable");
    }

    #[test]
    fn constructors_convert_each_field() {
        let err = SamplePortError::rejected(409_u16, "duplicate key");
        assert_eq!(err.to_string(), "store rejected (409): duplicate key");
    }

    #[test]
    fn string_fields_accept_borrowed_input() {
        assert_eq!(
            SamplePortError::decode("missing id"),
            SamplePortError::Decode {
                message: "missing id".to_owned()
            }
        );
    }
}
